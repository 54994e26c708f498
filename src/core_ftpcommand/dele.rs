use crate::core_error::Result;
use crate::core_ftpcommand::ftpcommand::FtpCommand;
use crate::core_ftpcommand::response::Response;
use crate::core_ftpcommand::utils::expect_codes;
use crate::core_network::ControlChannel;
use log::info;

/// Handles the DELE (Delete File) FTP command.
///
/// # Arguments
///
/// * `control` - The session's control channel.
/// * `path` - The remote file to delete.
///
/// # Returns
///
/// The 250 reply, or `Rejected` carrying the server's code and text.
pub async fn handle_dele_command(control: &mut ControlChannel, path: &str) -> Result<Response> {
    let response = expect_codes(control, FtpCommand::DELE, Some(path), &[250]).await?;
    info!("File deleted: {}", path);
    Ok(response)
}
