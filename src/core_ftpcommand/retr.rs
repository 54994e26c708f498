use crate::core_error::Result;
use crate::core_ftpcommand::ftpcommand::FtpCommand;
use crate::core_ftpcommand::utils::{begin_transfer, finish_transfer};
use crate::core_network::{ControlChannel, DataChannel};
use log::info;
use std::path::Path;

/// Handles the RETR (Retrieve) FTP command.
///
/// The local file is created (or truncated) only once the server has
/// accepted the request, then filled chunk by chunk until the server closes
/// the data connection.
///
/// # Returns
///
/// The number of bytes written to `local_path`.
pub async fn handle_retr_command(
    control: &mut ControlChannel,
    mut data: DataChannel,
    remote_path: &str,
    local_path: &Path,
    buffer_size: usize,
) -> Result<u64> {
    let opening = begin_transfer(control, FtpCommand::RETR, remote_path).await?;
    let total = data.receive_file(local_path, buffer_size).await?;
    drop(data);

    finish_transfer(control, FtpCommand::RETR, opening).await?;
    info!("File retrieved successfully: {} -> {:?}", remote_path, local_path);
    Ok(total)
}
