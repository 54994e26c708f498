use crate::core_error::{FtpClientError, Result};
use crate::core_ftpcommand::ftpcommand::FtpCommand;
use crate::core_ftpcommand::response::Response;
use crate::core_network::ControlChannel;
use log::{debug, warn};

/// Sends a command and requires one of the `expected` status codes.
pub async fn expect_codes(
    control: &mut ControlChannel,
    cmd: FtpCommand,
    arg: Option<&str>,
    expected: &[u16],
) -> Result<Response> {
    let response = control.send(cmd, arg).await?;
    if expected.contains(&response.code) {
        return Ok(response);
    }
    warn!("{} answered with {}: {}", cmd, response.code, response.message);
    Err(FtpClientError::rejected(cmd.as_str(), response.code, &response.text()))
}

/// Sends a command and requires a 2xx reply.
pub async fn expect_success(
    control: &mut ControlChannel,
    cmd: FtpCommand,
    arg: Option<&str>,
) -> Result<Response> {
    let response = control.send(cmd, arg).await?;
    if response.is_success() {
        return Ok(response);
    }
    warn!("{} answered with {}: {}", cmd, response.code, response.message);
    Err(FtpClientError::rejected(cmd.as_str(), response.code, &response.text()))
}

/// Sends a transfer command; the server must accept it with 1xx (or 2xx).
pub async fn begin_transfer(
    control: &mut ControlChannel,
    cmd: FtpCommand,
    arg: &str,
) -> Result<Response> {
    let response = control.send(cmd, Some(arg)).await?;
    if response.is_preliminary() || response.is_success() {
        debug!("{} accepted: {}", cmd, response.message);
        return Ok(response);
    }
    warn!("{} {} refused: {}", cmd, arg, response.text());
    Err(FtpClientError::rejected(cmd.as_str(), response.code, &response.text()))
}

/// Reads the completion reply that follows a preliminary transfer reply.
///
/// Must only be called once the data connection is closed.
pub async fn finish_transfer(
    control: &mut ControlChannel,
    cmd: FtpCommand,
    opening: Response,
) -> Result<Response> {
    if !opening.is_preliminary() {
        return Ok(opening);
    }
    let done = control.read_response().await?;
    if done.is_success() {
        return Ok(done);
    }
    warn!("{} did not complete: {}", cmd, done.text());
    Err(FtpClientError::rejected(cmd.as_str(), done.code, &done.text()))
}
