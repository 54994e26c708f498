use crate::constants::CRLF;
use std::fmt;

/// Control commands the client issues.
#[derive(Eq, Hash, PartialEq, Debug, Clone, Copy)]
pub enum FtpCommand {
    USER,
    PASS,
    TYPE,
    MODE,
    STRU,
    PASV,
    LIST,
    MKD,
    RMD,
    DELE,
    STOR,
    RETR,
    QUIT,
}

impl FtpCommand {
    pub fn from_str(cmd: &str) -> Option<FtpCommand> {
        match cmd.to_ascii_uppercase().as_str() {
            "USER" => Some(FtpCommand::USER),
            "PASS" => Some(FtpCommand::PASS),
            "TYPE" => Some(FtpCommand::TYPE),
            "MODE" => Some(FtpCommand::MODE),
            "STRU" => Some(FtpCommand::STRU),
            "PASV" => Some(FtpCommand::PASV),
            "LIST" => Some(FtpCommand::LIST),
            "MKD" => Some(FtpCommand::MKD),
            "RMD" => Some(FtpCommand::RMD),
            "DELE" => Some(FtpCommand::DELE),
            "STOR" => Some(FtpCommand::STOR),
            "RETR" => Some(FtpCommand::RETR),
            "QUIT" => Some(FtpCommand::QUIT),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FtpCommand::USER => "USER",
            FtpCommand::PASS => "PASS",
            FtpCommand::TYPE => "TYPE",
            FtpCommand::MODE => "MODE",
            FtpCommand::STRU => "STRU",
            FtpCommand::PASV => "PASV",
            FtpCommand::LIST => "LIST",
            FtpCommand::MKD => "MKD",
            FtpCommand::RMD => "RMD",
            FtpCommand::DELE => "DELE",
            FtpCommand::STOR => "STOR",
            FtpCommand::RETR => "RETR",
            FtpCommand::QUIT => "QUIT",
        }
    }

    /// Builds the command line without its terminator.
    pub fn line(&self, arg: Option<&str>) -> String {
        match arg {
            Some(arg) => format!("{} {}", self.as_str(), arg),
            None => self.as_str().to_string(),
        }
    }

    /// Builds the wire form, CRLF included.
    pub fn wire(&self, arg: Option<&str>) -> String {
        format!("{}{}", self.line(arg), CRLF)
    }

    /// Line as it should appear in logs.
    pub fn loggable(&self, arg: Option<&str>) -> String {
        match (self, arg) {
            (FtpCommand::PASS, Some(_)) => "PASS ****".to_string(),
            _ => self.line(arg),
        }
    }
}

impl fmt::Display for FtpCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
