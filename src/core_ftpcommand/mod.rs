// Here's the list of the FTP commands the client issues
pub mod dele;
pub mod ftpcommand;
pub mod list;
pub mod mkd;
pub mod pass;
pub mod quit;
pub mod retr;
pub mod rmd;
pub mod stor;
pub mod type_;
pub mod user;

// Reply decoding
pub mod response;

// The utils and common functions are here
pub mod utils;
