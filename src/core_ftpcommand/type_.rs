use crate::core_error::Result;
use crate::core_ftpcommand::ftpcommand::FtpCommand;
use crate::core_ftpcommand::response::Response;
use crate::core_ftpcommand::utils::expect_success;
use crate::core_network::ControlChannel;
use log::info;

/// Representation type for the session (RFC 959 §3.1.1).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferType {
    Ascii,
    Binary,
}

/// Transmission mode (RFC 959 §3.4).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferMode {
    Stream,
}

/// File structure (RFC 959 §3.1.2).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileStructure {
    File,
}

impl TransferType {
    pub fn code(&self) -> &'static str {
        match self {
            TransferType::Ascii => "A",
            TransferType::Binary => "I",
        }
    }
}

impl TransferMode {
    pub fn code(&self) -> &'static str {
        match self {
            TransferMode::Stream => "S",
        }
    }
}

impl FileStructure {
    pub fn code(&self) -> &'static str {
        match self {
            FileStructure::File => "F",
        }
    }
}

/// Sends `TYPE <code>`; any 2xx reply accepts the type.
///
/// # Arguments
///
/// * `control` - The session's control channel.
/// * `transfer_type` - The representation type to select.
///
/// # Returns
///
/// The server's reply, or `Rejected` if the server refused the type.
pub async fn handle_type_command(
    control: &mut ControlChannel,
    transfer_type: TransferType,
) -> Result<Response> {
    let response = expect_success(control, FtpCommand::TYPE, Some(transfer_type.code())).await?;
    info!("Transfer type set to {}", transfer_type.code());
    Ok(response)
}

/// Sends `MODE <code>`; only stream mode is ever requested.
pub async fn handle_mode_command(control: &mut ControlChannel, mode: TransferMode) -> Result<Response> {
    let response = expect_success(control, FtpCommand::MODE, Some(mode.code())).await?;
    info!("Transfer mode set to {}", mode.code());
    Ok(response)
}

/// Sends `STRU <code>`; transfers are always whole files.
pub async fn handle_stru_command(
    control: &mut ControlChannel,
    structure: FileStructure,
) -> Result<Response> {
    let response = expect_success(control, FtpCommand::STRU, Some(structure.code())).await?;
    info!("File structure set to {}", structure.code());
    Ok(response)
}
