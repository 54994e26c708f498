use crate::core_error::Result;
use crate::core_ftpcommand::ftpcommand::FtpCommand;
use crate::core_ftpcommand::response::Response;
use crate::core_ftpcommand::utils::expect_codes;
use crate::core_network::ControlChannel;
use log::info;

/// Handles the MKD (Make Directory) FTP command.
///
/// Only 257 counts as success; every other code comes back as `Rejected`
/// with the server's text attached.
pub async fn handle_mkd_command(control: &mut ControlChannel, path: &str) -> Result<Response> {
    let response = expect_codes(control, FtpCommand::MKD, Some(path), &[257]).await?;
    info!("Directory created: {}", path);
    Ok(response)
}
