use crate::core_error::{FtpClientError, Result};
use crate::core_network::guarded;
use crate::core_network::pasv::PassiveEndpoint;
use log::{debug, error, info, warn};
use std::io;
use std::net::{IpAddr, SocketAddr};
use std::path::Path;
use std::time::Duration;
use tokio::fs::File;
use tokio::io::{AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio_util::sync::CancellationToken;

/// A per-transfer connection opened against a freshly negotiated passive endpoint.
///
/// Dropping the channel closes the socket, so every exit path releases it.
pub struct DataChannel {
    stream: TcpStream,
    addr: SocketAddr,
    io_timeout: Duration,
    cancel: CancellationToken,
}

impl DataChannel {
    /// Connects to `endpoint`, consuming it.
    ///
    /// A server advertising `0.0.0.0` is reached on `control_ip` instead.
    pub async fn connect(
        endpoint: PassiveEndpoint,
        control_ip: IpAddr,
        connect_timeout: Duration,
        io_timeout: Duration,
        cancel: CancellationToken,
    ) -> Result<Self> {
        let ip = if endpoint.ip.is_unspecified() {
            warn!("Server advertised {}, using control address {}", endpoint.ip, control_ip);
            control_ip
        } else {
            IpAddr::V4(endpoint.ip)
        };
        let addr = SocketAddr::new(ip, endpoint.port);

        let stream = guarded(
            TcpStream::connect(addr),
            connect_timeout,
            &cancel,
            &format!("opening data connection to {}", addr),
            |source| FtpClientError::Connection {
                addr: addr.to_string(),
                source,
            },
        )
        .await?;
        debug!("Data connection established with {}", addr);

        Ok(Self {
            stream,
            addr,
            io_timeout,
            cancel,
        })
    }

    /// Reads until the server closes its end; returns the bytes received.
    pub async fn read_to_end(&mut self, buffer_size: usize) -> Result<Vec<u8>> {
        let mut out = Vec::new();
        self.receive_into(&mut out, buffer_size, |e| {
            FtpClientError::Protocol(format!("Failed to buffer data: {}", e))
        })
        .await?;
        Ok(out)
    }

    /// Streams the data connection into `path`, creating or truncating it.
    pub async fn receive_file(&mut self, path: &Path, buffer_size: usize) -> Result<u64> {
        let mut file = File::create(path)
            .await
            .map_err(|e| FtpClientError::filesystem(path, e))?;
        let total = self
            .receive_into(&mut file, buffer_size, |e| FtpClientError::filesystem(path, e))
            .await?;
        file.flush()
            .await
            .map_err(|e| FtpClientError::filesystem(path, e))?;
        info!("Received {} bytes into {:?}", total, path);
        Ok(total)
    }

    /// Streams `path` over the data connection in fixed-size chunks.
    pub async fn send_file(&mut self, path: &Path, buffer_size: usize) -> Result<u64> {
        let mut file = File::open(path)
            .await
            .map_err(|e| FtpClientError::filesystem(path, e))?;
        let mut buffer = vec![0; buffer_size];
        let mut total = 0u64;

        loop {
            let bytes_read = match file.read(&mut buffer).await {
                Ok(0) => break, // End of file
                Ok(n) => n,
                Err(e) => {
                    error!("Error reading local file {:?}: {}", path, e);
                    return Err(FtpClientError::filesystem(path, e));
                }
            };
            self.write_chunk(&buffer[..bytes_read]).await?;
            total += bytes_read as u64;
        }

        info!("Sent {} bytes from {:?}", total, path);
        Ok(total)
    }

    /// Half-closes the connection so the server sees end-of-file, then drops it.
    pub async fn close(mut self) -> Result<()> {
        let addr = self.addr;
        guarded(
            self.stream.shutdown(),
            self.io_timeout,
            &self.cancel,
            "closing the data connection",
            |e| FtpClientError::Protocol(format!("Failed to close data connection {}: {}", addr, e)),
        )
        .await?;
        debug!("Data connection {} closed", addr);
        Ok(())
    }

    async fn write_chunk(&mut self, chunk: &[u8]) -> Result<()> {
        let addr = self.addr;
        guarded(
            self.stream.write_all(chunk),
            self.io_timeout,
            &self.cancel,
            "writing to the data connection",
            |e| FtpClientError::Protocol(format!("Data connection {} lost: {}", addr, e)),
        )
        .await
    }

    async fn receive_into<W>(
        &mut self,
        sink: &mut W,
        buffer_size: usize,
        on_write: impl Fn(io::Error) -> FtpClientError,
    ) -> Result<u64>
    where
        W: AsyncWrite + Unpin,
    {
        let addr = self.addr;
        let mut buffer = vec![0; buffer_size];
        let mut total = 0u64;

        loop {
            let n = guarded(
                self.stream.read(&mut buffer),
                self.io_timeout,
                &self.cancel,
                "reading from the data connection",
                |e| FtpClientError::Protocol(format!("Data connection {} lost: {}", addr, e)),
            )
            .await?;
            // Peer close marks the end of a stream-mode transfer
            if n == 0 {
                break;
            }
            sink.write_all(&buffer[..n]).await.map_err(&on_write)?;
            total += n as u64;
        }
        Ok(total)
    }
}
