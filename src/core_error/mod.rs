// Error taxonomy shared by the engine, the channels and the dispatcher.

pub mod error;

pub use error::{FtpClientError, Result};
