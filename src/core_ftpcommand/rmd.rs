use crate::core_error::Result;
use crate::core_ftpcommand::ftpcommand::FtpCommand;
use crate::core_ftpcommand::response::Response;
use crate::core_ftpcommand::utils::expect_codes;
use crate::core_network::ControlChannel;
use log::info;

/// Handles the RMD (Remove Directory) FTP command. Success is 250 only.
pub async fn handle_rmd_command(control: &mut ControlChannel, path: &str) -> Result<Response> {
    let response = expect_codes(control, FtpCommand::RMD, Some(path), &[250]).await?;
    info!("Directory removed: {}", path);
    Ok(response)
}
