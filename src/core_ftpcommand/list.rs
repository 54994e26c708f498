use crate::core_error::Result;
use crate::core_ftpcommand::ftpcommand::FtpCommand;
use crate::core_ftpcommand::utils::{begin_transfer, finish_transfer};
use crate::core_network::{ControlChannel, DataChannel};
use log::info;

/// Handles the LIST command over an already opened data connection.
///
/// The listing is read until the server closes the data connection, then
/// the completion reply is read from the control channel.
///
/// # Arguments
///
/// * `control` - The session's control channel.
/// * `data` - A data connection opened for this listing only.
/// * `path` - The remote directory to list.
/// * `buffer_size` - Chunk size for reads from the data connection.
///
/// # Returns
///
/// The directory listing text as sent by the server.
pub async fn handle_list_command(
    control: &mut ControlChannel,
    mut data: DataChannel,
    path: &str,
    buffer_size: usize,
) -> Result<String> {
    let opening = begin_transfer(control, FtpCommand::LIST, path).await?;
    let bytes = data.read_to_end(buffer_size).await?;
    drop(data);

    finish_transfer(control, FtpCommand::LIST, opening).await?;
    info!("Listing of {} received ({} bytes)", path, bytes.len());
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
