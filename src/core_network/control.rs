use crate::core_error::{FtpClientError, Result};
use crate::core_ftpcommand::ftpcommand::FtpCommand;
use crate::core_ftpcommand::response::{ReplyAssembler, Response};
use crate::core_network::guarded;
use log::{debug, info, trace};
use std::net::SocketAddr;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::TcpStream;
use tokio_util::sync::CancellationToken;

/// The long-lived command connection: one command, then exactly one reply.
pub struct ControlChannel {
    reader: BufReader<OwnedReadHalf>,
    writer: OwnedWriteHalf,
    peer: SocketAddr,
    io_timeout: Duration,
    cancel: CancellationToken,
}

impl ControlChannel {
    /// Connects to `host:port` and consumes the server greeting.
    pub async fn open(
        host: &str,
        port: u16,
        connect_timeout: Duration,
        io_timeout: Duration,
        cancel: CancellationToken,
    ) -> Result<(Self, Response)> {
        let addr = format!("{}:{}", host, port);
        info!("Connecting to {}", addr);

        let stream = guarded(
            TcpStream::connect((host, port)),
            connect_timeout,
            &cancel,
            &format!("connecting to {}", addr),
            |source| FtpClientError::Connection {
                addr: addr.clone(),
                source,
            },
        )
        .await?;

        let peer = stream.peer_addr().map_err(|source| FtpClientError::Connection {
            addr: addr.clone(),
            source,
        })?;
        let (rd, wr) = stream.into_split();
        let mut channel = Self {
            reader: BufReader::new(rd),
            writer: wr,
            peer,
            io_timeout,
            cancel,
        };

        let mut greeting = channel.read_response().await?;
        // 120 announces a delay; the real greeting follows
        while greeting.is_preliminary() {
            info!("Server not ready yet: {}", greeting.text());
            greeting = channel.read_response().await?;
        }
        if !greeting.is_success() {
            return Err(FtpClientError::rejected("greeting", greeting.code, &greeting.text()));
        }
        info!("Connected to {}", peer);
        Ok((channel, greeting))
    }

    /// Writes `cmd [arg]\r\n` and waits for its reply.
    pub async fn send(&mut self, cmd: FtpCommand, arg: Option<&str>) -> Result<Response> {
        let wire = cmd.wire(arg);
        debug!(">>> {}", cmd.loggable(arg));

        let what = format!("sending {}", cmd);
        guarded(
            self.writer.write_all(wire.as_bytes()),
            self.io_timeout,
            &self.cancel,
            &what,
            |e| FtpClientError::Protocol(format!("Control connection lost while {}: {}", what, e)),
        )
        .await?;

        self.read_response().await
    }

    /// Reads one complete reply, following multi-line continuations.
    pub async fn read_response(&mut self) -> Result<Response> {
        let mut assembler = ReplyAssembler::new();
        loop {
            let mut buf = Vec::new();
            let n = guarded(
                self.reader.read_until(b'\n', &mut buf),
                self.io_timeout,
                &self.cancel,
                "waiting for a reply",
                |e| FtpClientError::Protocol(format!("Failed to read reply: {}", e)),
            )
            .await?;

            if n == 0 {
                return Err(FtpClientError::Protocol(
                    "Server closed the control connection".to_string(),
                ));
            }

            let line = String::from_utf8_lossy(&buf);
            trace!("<<< raw {:?}", line);
            if let Some(response) = assembler.push_line(&line)? {
                debug!("<<< {}", response.text());
                return Ok(response);
            }
        }
    }

    /// Address of the server end of the control connection.
    pub fn peer_addr(&self) -> SocketAddr {
        self.peer
    }

    pub fn io_timeout(&self) -> Duration {
        self.io_timeout
    }

    pub fn cancel_token(&self) -> &CancellationToken {
        &self.cancel
    }
}
