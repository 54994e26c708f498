pub mod url;

pub use self::url::{is_remote, parse_ftp_url, Credentials, FtpUrl};
