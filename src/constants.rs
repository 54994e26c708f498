// src/constants.rs

pub const FTP_SCHEME: &str = "ftp://";
pub const CRLF: &str = "\r\n";

pub const DEFAULT_HOST: &str = "ftp.3700.network";
pub const DEFAULT_PORT: u16 = 21;
pub const DEFAULT_CONFIG_PATH: &str = "/etc/rouilleftp.conf";

pub const TRANSFER_BUFFER_SIZE: usize = 4096;
pub const CONNECT_TIMEOUT_SECS: u64 = 30;
pub const IO_TIMEOUT_SECS: u64 = 60;

pub const PASV_REGEX: &str = r"(\d+),(\d+),(\d+),(\d+),(\d+),(\d+)";
