//! rouilleftp: a minimal passive-mode FTP client.
//!
//! The [`session::Session`] engine owns the control connection, drives the
//! login handshake and runs one of six operations; [`dispatcher`] turns the
//! command line into engine calls.

pub mod config;
pub mod constants;
pub mod core_cli;
pub mod core_error;
pub mod core_ftpcommand;
pub mod core_log;
pub mod core_network;
pub mod core_url;
pub mod dispatcher;
pub mod helpers;
pub mod session;

#[cfg(test)]
mod test_session;

pub use config::{ClientConfig, Config};
pub use core_error::{FtpClientError, Result};
pub use session::{Operation, Outcome, Session};
