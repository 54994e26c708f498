use crate::config::ClientConfig;
use crate::core_error::{FtpClientError, Result};
use crate::core_ftpcommand::response::Response;
use crate::core_ftpcommand::type_::{FileStructure, TransferMode, TransferType};
use crate::core_ftpcommand::{dele, list, mkd, pass, quit, retr, rmd, stor, type_, user};
use crate::core_network::pasv::negotiate_passive;
use crate::core_network::{ControlChannel, DataChannel};
use crate::core_url::{is_remote, parse_ftp_url, Credentials};
use log::{debug, info, warn};
use std::path::{Path, PathBuf};
use tokio_util::sync::CancellationToken;

/// Handshake progress. Strictly linear: no state is ever revisited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Disconnected,
    Connected,
    Authenticated,
    TypeSet,
    ModeSet,
    StructureSet,
    Ready,
    Closing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationKind {
    List,
    MakeDirectory,
    RemoveDirectory,
    Delete,
    Upload,
    Download,
    Copy,
    Move,
}

/// What the session is currently doing. Nested steps (the download inside a
/// copy, the delete after a move) replace the context while they run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationContext {
    pub kind: OperationKind,
    pub source: Option<String>,
    pub destination: Option<String>,
}

/// One engine call with its resolved arguments.
///
/// `Copy`/`Move` carry the raw arguments: exactly one of them is an
/// `ftp://` URL and the engine picks the direction from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    List { path: Option<String> },
    MakeDirectory { path: String },
    RemoveDirectory { path: String },
    Delete { path: String },
    Copy { source: String, destination: String },
    Move { source: String, destination: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Upload,
    Download,
}

/// A finished file transfer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transfer {
    pub direction: Direction,
    pub local: PathBuf,
    pub remote: String,
    pub bytes: u64,
}

/// Result of a successfully executed operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Listing(String),
    Reply(Response),
    Transferred(Transfer),
}

pub struct Session {
    control: ControlChannel,
    config: ClientConfig,
    host: String,
    port: u16,
    state: SessionState,
    context: Option<OperationContext>,
    greeting: Response,
}

impl Session {
    /// Opens the control connection and reads the greeting.
    pub async fn connect(config: &ClientConfig, cancel: CancellationToken) -> Result<Self> {
        let (control, greeting) = ControlChannel::open(
            &config.host,
            config.port,
            config.connect_timeout(),
            config.io_timeout(),
            cancel,
        )
        .await?;
        info!("Server greeting: {}", greeting.text());

        Ok(Self {
            control,
            config: config.clone(),
            host: config.host.clone(),
            port: config.port,
            state: SessionState::Connected,
            context: None,
            greeting,
        })
    }

    /// Connect, log in and negotiate transfer parameters in one go.
    pub async fn open(
        config: &ClientConfig,
        credentials: &Credentials,
        cancel: CancellationToken,
    ) -> Result<Self> {
        let mut session = Self::connect(config, cancel).await?;
        session.login(credentials).await?;
        session.negotiate().await?;
        Ok(session)
    }

    /// USER, then PASS when the server asks for one.
    pub async fn login(&mut self, credentials: &Credentials) -> Result<()> {
        self.ensure_state(SessionState::Connected)?;

        let reply = user::handle_user_command(&mut self.control, &credentials.username).await?;
        let reply = if reply.is_intermediate() {
            pass::handle_pass_command(&mut self.control, &credentials.password).await?
        } else {
            reply
        };

        if !reply.is_success() {
            if self.config.strict_login {
                return Err(FtpClientError::Authentication {
                    code: reply.code,
                    message: reply.text(),
                });
            }
            warn!("Login not accepted, continuing anyway: {}", reply.text());
        } else {
            info!("Logged in as {}", credentials.username);
        }

        self.state = SessionState::Authenticated;
        Ok(())
    }

    /// Binary type, stream mode, file structure: set once per session.
    pub async fn negotiate(&mut self) -> Result<()> {
        self.ensure_state(SessionState::Authenticated)?;

        type_::handle_type_command(&mut self.control, TransferType::Binary).await?;
        self.state = SessionState::TypeSet;
        type_::handle_mode_command(&mut self.control, TransferMode::Stream).await?;
        self.state = SessionState::ModeSet;
        type_::handle_stru_command(&mut self.control, FileStructure::File).await?;
        self.state = SessionState::StructureSet;

        self.state = SessionState::Ready;
        debug!("Session ready on {}:{}", self.host, self.port);
        Ok(())
    }

    /// Runs exactly one operation.
    pub async fn execute(&mut self, operation: &Operation) -> Result<Outcome> {
        match operation {
            Operation::List { path } => self.list(path.as_deref()).await.map(Outcome::Listing),
            Operation::MakeDirectory { path } => self.make_directory(path).await.map(Outcome::Reply),
            Operation::RemoveDirectory { path } => {
                self.remove_directory(path).await.map(Outcome::Reply)
            }
            Operation::Delete { path } => self.delete(path).await.map(Outcome::Reply),
            Operation::Copy {
                source,
                destination,
            } => self.copy(source, destination).await.map(Outcome::Transferred),
            Operation::Move {
                source,
                destination,
            } => self.move_file(source, destination).await.map(Outcome::Transferred),
        }
    }

    /// Lists `path` (defaults to `.`) over a fresh data connection.
    pub async fn list(&mut self, path: Option<&str>) -> Result<String> {
        let path = path.unwrap_or(".");
        self.begin(OperationKind::List, Some(path), None)?;

        let data = self.open_data_channel().await?;
        list::handle_list_command(
            &mut self.control,
            data,
            path,
            self.config.download_buffer_size(),
        )
        .await
    }

    pub async fn make_directory(&mut self, path: &str) -> Result<Response> {
        self.begin(OperationKind::MakeDirectory, None, Some(path))?;
        mkd::handle_mkd_command(&mut self.control, path).await
    }

    pub async fn remove_directory(&mut self, path: &str) -> Result<Response> {
        self.begin(OperationKind::RemoveDirectory, Some(path), None)?;
        rmd::handle_rmd_command(&mut self.control, path).await
    }

    pub async fn delete(&mut self, path: &str) -> Result<Response> {
        self.begin(OperationKind::Delete, Some(path), None)?;
        dele::handle_dele_command(&mut self.control, path).await
    }

    /// Uploads `local_path` to `remote_path`.
    ///
    /// A missing local file fails before any PASV is sent.
    pub async fn upload(&mut self, local_path: &Path, remote_path: &str) -> Result<u64> {
        let local = local_path.display().to_string();
        self.begin(OperationKind::Upload, Some(&local), Some(remote_path))?;

        let metadata = tokio::fs::metadata(local_path)
            .await
            .map_err(|e| FtpClientError::filesystem(local_path, e))?;
        if !metadata.is_file() {
            return Err(FtpClientError::filesystem(
                local_path,
                std::io::Error::new(std::io::ErrorKind::InvalidInput, "not a regular file"),
            ));
        }

        let data = self.open_data_channel().await?;
        stor::handle_stor_command(
            &mut self.control,
            data,
            local_path,
            remote_path,
            self.config.upload_buffer_size(),
        )
        .await
    }

    /// Downloads `remote_path` into `local_path`, replacing its contents.
    pub async fn download(&mut self, remote_path: &str, local_path: &Path) -> Result<u64> {
        let local = local_path.display().to_string();
        self.begin(OperationKind::Download, Some(remote_path), Some(&local))?;

        let data = self.open_data_channel().await?;
        retr::handle_retr_command(
            &mut self.control,
            data,
            remote_path,
            local_path,
            self.config.download_buffer_size(),
        )
        .await
    }

    /// Copies between a local path and an `ftp://` URL, in whichever direction applies.
    pub async fn copy(&mut self, source: &str, destination: &str) -> Result<Transfer> {
        self.begin(OperationKind::Copy, Some(source), Some(destination))?;
        self.transfer(source, destination).await
    }

    /// Like [`Session::copy`], then removes the source.
    ///
    /// If removing the source fails the transferred copy is kept and the
    /// error is returned.
    pub async fn move_file(&mut self, source: &str, destination: &str) -> Result<Transfer> {
        self.begin(OperationKind::Move, Some(source), Some(destination))?;
        let transfer = self.transfer(source, destination).await?;

        match transfer.direction {
            Direction::Download => {
                self.delete(&transfer.remote).await?;
            }
            Direction::Upload => {
                tokio::fs::remove_file(&transfer.local)
                    .await
                    .map_err(|e| FtpClientError::filesystem(&transfer.local, e))?;
                info!("Removed local source {:?}", transfer.local);
            }
        }
        Ok(transfer)
    }

    /// Sends QUIT. The session cannot run operations afterwards.
    pub async fn quit(&mut self) -> Result<Response> {
        self.state = SessionState::Closing;
        let response = quit::handle_quit_command(&mut self.control).await;
        self.state = SessionState::Disconnected;
        self.context = None;
        response
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn context(&self) -> Option<&OperationContext> {
        self.context.as_ref()
    }

    pub fn greeting(&self) -> &Response {
        &self.greeting
    }

    async fn transfer(&mut self, source: &str, destination: &str) -> Result<Transfer> {
        match (is_remote(source), is_remote(destination)) {
            (true, false) => {
                let remote = parse_ftp_url(source)?.path;
                let local = PathBuf::from(destination);
                let bytes = self.download(&remote, &local).await?;
                Ok(Transfer {
                    direction: Direction::Download,
                    local,
                    remote,
                    bytes,
                })
            }
            (false, true) => {
                let remote = parse_ftp_url(destination)?.path;
                let local = PathBuf::from(source);
                let bytes = self.upload(&local, &remote).await?;
                Ok(Transfer {
                    direction: Direction::Upload,
                    local,
                    remote,
                    bytes,
                })
            }
            _ => Err(FtpClientError::Argument(format!(
                "exactly one of '{}' and '{}' must be an ftp:// URL",
                source, destination
            ))),
        }
    }

    /// PASV then connect; the endpoint is used for this one connection only.
    async fn open_data_channel(&mut self) -> Result<DataChannel> {
        let endpoint = negotiate_passive(&mut self.control).await?;
        DataChannel::connect(
            endpoint,
            self.control.peer_addr().ip(),
            self.config.connect_timeout(),
            self.control.io_timeout(),
            self.control.cancel_token().clone(),
        )
        .await
    }

    fn begin(
        &mut self,
        kind: OperationKind,
        source: Option<&str>,
        destination: Option<&str>,
    ) -> Result<()> {
        self.ensure_state(SessionState::Ready)?;
        debug!("Starting {:?} ({:?} -> {:?})", kind, source, destination);
        self.context = Some(OperationContext {
            kind,
            source: source.map(str::to_string),
            destination: destination.map(str::to_string),
        });
        Ok(())
    }

    fn ensure_state(&self, expected: SessionState) -> Result<()> {
        if self.state == expected {
            return Ok(());
        }
        Err(FtpClientError::Protocol(format!(
            "session is {:?}, expected {:?}",
            self.state, expected
        )))
    }
}
