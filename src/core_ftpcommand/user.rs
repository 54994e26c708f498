use crate::core_error::Result;
use crate::core_ftpcommand::ftpcommand::FtpCommand;
use crate::core_ftpcommand::response::Response;
use crate::core_network::ControlChannel;
use log::info;

/// Sends the USER command.
///
/// The reply is returned as-is: 230 means no password is needed, 331/332
/// means PASS must follow. The caller decides what a rejection means.
pub async fn handle_user_command(control: &mut ControlChannel, username: &str) -> Result<Response> {
    info!("Logging in as {}", username);
    control.send(FtpCommand::USER, Some(username)).await
}
