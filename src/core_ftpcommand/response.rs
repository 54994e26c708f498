use crate::core_error::{FtpClientError, Result};
use std::fmt;

/// A decoded control-channel reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub code: u16,
    /// Text following the code on the first line.
    pub message: String,
    /// Every line of the reply, terminators stripped.
    pub lines: Vec<String>,
}

impl Response {
    /// 1xx: the server will send another reply once the action completes.
    pub fn is_preliminary(&self) -> bool {
        (100..200).contains(&self.code)
    }

    /// 2xx
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.code)
    }

    /// 3xx
    pub fn is_intermediate(&self) -> bool {
        (300..400).contains(&self.code)
    }

    /// Full reply text as received, one line per reply line.
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }
}

impl fmt::Display for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text())
    }
}

/// Splits `NNN text` into the numeric code and the remaining message.
pub fn parse_status(raw: &str) -> Result<(u16, String)> {
    let line = raw.lines().next().unwrap_or("").trim_end();
    let digits = line.get(..3).filter(|d| d.bytes().all(|b| b.is_ascii_digit()));
    let code = match digits {
        Some(d) => d
            .parse::<u16>()
            .map_err(|_| FtpClientError::Protocol(format!("Invalid reply code in: '{}'", line)))?,
        None if line.is_empty() => {
            return Err(FtpClientError::Protocol("Empty reply from server".to_string()))
        }
        None => {
            return Err(FtpClientError::Protocol(format!(
                "Reply does not start with a status code: '{}'",
                line
            )))
        }
    };
    let message = line[3..].trim_start_matches(|c: char| c == '-' || c == ' ').to_string();
    Ok((code, message))
}

/// Incrementally assembles a possibly multi-line reply.
///
/// A reply whose first line is `NNN-...` continues until a line that starts
/// with the same code followed by a space (or the bare code).
#[derive(Debug, Default)]
pub struct ReplyAssembler {
    code: Option<u16>,
    multiline: bool,
    message: String,
    lines: Vec<String>,
}

impl ReplyAssembler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds one line; returns the finished reply once the terminator is seen.
    pub fn push_line(&mut self, raw: &str) -> Result<Option<Response>> {
        let line = raw.trim_end_matches(|c: char| c == '\r' || c == '\n').to_string();

        let code = match self.code {
            None => {
                let (code, message) = parse_status(&line)?;
                self.multiline = line.as_bytes().get(3) == Some(&b'-');
                self.code = Some(code);
                self.message = message;
                self.lines.push(line);
                if self.multiline {
                    return Ok(None);
                }
                code
            }
            Some(code) => {
                let prefix = code.to_string();
                let done = line == prefix || line.starts_with(&format!("{} ", prefix));
                self.lines.push(line);
                if !done {
                    return Ok(None);
                }
                code
            }
        };

        Ok(Some(Response {
            code,
            message: std::mem::take(&mut self.message),
            lines: std::mem::take(&mut self.lines),
        }))
    }
}
