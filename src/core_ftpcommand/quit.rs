use crate::core_error::Result;
use crate::core_ftpcommand::ftpcommand::FtpCommand;
use crate::core_ftpcommand::response::Response;
use crate::core_network::ControlChannel;
use log::{info, warn};

/// Handles the QUIT FTP command.
///
/// A non-2xx reply is logged but not treated as an error: the session is
/// over either way.
pub async fn handle_quit_command(control: &mut ControlChannel) -> Result<Response> {
    let response = control.send(FtpCommand::QUIT, None).await?;
    if response.is_success() {
        info!("Session closed: {}", response.message);
    } else {
        warn!("Unexpected reply to QUIT: {}", response.text());
    }
    Ok(response)
}
