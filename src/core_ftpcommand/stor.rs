use crate::core_error::Result;
use crate::core_ftpcommand::ftpcommand::FtpCommand;
use crate::core_ftpcommand::utils::{begin_transfer, finish_transfer};
use crate::core_network::{ControlChannel, DataChannel};
use log::info;
use std::path::Path;

/// Handles the STOR (Store File) FTP command.
///
/// The local file is streamed in `buffer_size` chunks, the data connection
/// is closed to signal end-of-file, and only then is the completion reply
/// read. On any error the data connection is dropped before returning.
///
/// # Arguments
///
/// * `control` - The session's control channel.
/// * `data` - A data connection opened for this upload only.
/// * `local_path` - The file to upload; must exist.
/// * `remote_path` - Where the server should store it.
/// * `buffer_size` - Chunk size for the upload.
///
/// # Returns
///
/// The number of bytes sent.
pub async fn handle_stor_command(
    control: &mut ControlChannel,
    mut data: DataChannel,
    local_path: &Path,
    remote_path: &str,
    buffer_size: usize,
) -> Result<u64> {
    let opening = begin_transfer(control, FtpCommand::STOR, remote_path).await?;
    let total = data.send_file(local_path, buffer_size).await?;
    data.close().await?;

    finish_transfer(control, FtpCommand::STOR, opening).await?;
    info!("File stored successfully: {:?} -> {}", local_path, remote_path);
    Ok(total)
}
