use crate::constants::PASV_REGEX;
use crate::core_error::{FtpClientError, Result};
use crate::core_ftpcommand::ftpcommand::FtpCommand;
use crate::core_network::control::ControlChannel;
use log::{debug, error};
use regex::Regex;
use std::fmt;
use std::net::Ipv4Addr;
use std::sync::OnceLock;

/// Address the server opened for exactly one data connection.
///
/// Not `Clone`: opening a data channel consumes it.
#[derive(Debug, PartialEq, Eq)]
pub struct PassiveEndpoint {
    pub ip: Ipv4Addr,
    pub port: u16,
}

impl PassiveEndpoint {
    pub fn ip_string(&self) -> String {
        self.ip.to_string()
    }
}

impl fmt::Display for PassiveEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.ip, self.port)
    }
}

fn pasv_regex() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    RE.get_or_init(|| Regex::new(PASV_REGEX).ok()).as_ref()
}

/// Extracts `h1,h2,h3,h4,p1,p2` from a PASV reply.
///
/// Returns `None` when the six numbers are absent or do not fit in a byte.
pub fn parse_passive(raw: &str) -> Option<PassiveEndpoint> {
    let caps = pasv_regex()?.captures(raw)?;
    let mut octets = [0u8; 6];
    for (i, octet) in octets.iter_mut().enumerate() {
        *octet = caps.get(i + 1)?.as_str().parse::<u8>().ok()?;
    }
    Some(PassiveEndpoint {
        ip: Ipv4Addr::new(octets[0], octets[1], octets[2], octets[3]),
        port: u16::from(octets[4]) * 256 + u16::from(octets[5]),
    })
}

/// Sends PASV and decodes the endpoint the server is listening on.
pub async fn negotiate_passive(control: &mut ControlChannel) -> Result<PassiveEndpoint> {
    let response = control.send(FtpCommand::PASV, None).await?;
    if !response.is_success() {
        error!("PASV refused: {}", response);
        return Err(FtpClientError::rejected(
            FtpCommand::PASV.as_str(),
            response.code,
            &response.text(),
        ));
    }

    match parse_passive(&response.text()) {
        Some(endpoint) => {
            debug!("Data connection info - IP {}, Port: {}", endpoint.ip, endpoint.port);
            Ok(endpoint)
        }
        None => {
            error!("Could not parse PASV response: {}", response);
            Err(FtpClientError::Protocol(format!(
                "Could not parse PASV response: {}",
                response.text()
            )))
        }
    }
}
