use crate::core_error::Result;
use crate::core_ftpcommand::ftpcommand::FtpCommand;
use crate::core_ftpcommand::response::Response;
use crate::core_network::ControlChannel;

/// Handles the PASS command.
///
/// Only sent after USER asked for a password (3xx). The password never
/// reaches the logs: `FtpCommand::loggable` masks it.
pub async fn handle_pass_command(control: &mut ControlChannel, password: &str) -> Result<Response> {
    control.send(FtpCommand::PASS, Some(password)).await
}
