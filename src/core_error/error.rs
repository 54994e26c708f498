use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FtpClientError {
    #[error("Failed to connect to {addr}: {source}")]
    Connection {
        addr: String,
        #[source]
        source: io::Error,
    },

    #[error("Protocol error: {0}")]
    Protocol(String),

    #[error("Local file error on {}: {source}", path.display())]
    Filesystem {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Invalid arguments: {0}")]
    Argument(String),

    #[error("Login failed ({code}): {message}")]
    Authentication { code: u16, message: String },

    #[error("{command} rejected by server ({code}): {message}")]
    Rejected {
        command: String,
        code: u16,
        message: String,
    },

    #[error("Timed out while {0}")]
    Timeout(String),

    #[error("Operation cancelled")]
    Cancelled,
}

pub type Result<T> = std::result::Result<T, FtpClientError>;

impl FtpClientError {
    pub fn filesystem(path: impl Into<PathBuf>, source: io::Error) -> Self {
        FtpClientError::Filesystem {
            path: path.into(),
            source,
        }
    }

    pub fn rejected(command: &str, code: u16, message: &str) -> Self {
        FtpClientError::Rejected {
            command: command.to_string(),
            code,
            message: message.to_string(),
        }
    }

    /// Process exit status for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            FtpClientError::Argument(_) => 1,
            _ => 2,
        }
    }

    /// Whether the control connection can still carry a QUIT after this error.
    pub fn control_usable(&self) -> bool {
        matches!(
            self,
            FtpClientError::Filesystem { .. }
                | FtpClientError::Argument(_)
                | FtpClientError::Authentication { .. }
                | FtpClientError::Rejected { .. }
        )
    }

    /// Server status code carried by the error, if any.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            FtpClientError::Authentication { code, .. } | FtpClientError::Rejected { code, .. } => {
                Some(*code)
            }
            _ => None,
        }
    }
}
