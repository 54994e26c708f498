pub mod control;
pub mod data;
pub mod pasv;

pub use control::ControlChannel;
pub use data::DataChannel;
pub use pasv::{parse_passive, PassiveEndpoint};

use crate::core_error::{FtpClientError, Result};
use std::future::Future;
use std::io;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Runs one blocking socket step under a deadline and the session's cancellation token.
///
/// `what` names the step for the timeout message; `on_io` classifies I/O failures.
pub async fn guarded<F, T>(
    fut: F,
    deadline: Duration,
    cancel: &CancellationToken,
    what: &str,
    on_io: impl FnOnce(io::Error) -> FtpClientError,
) -> Result<T>
where
    F: Future<Output = io::Result<T>>,
{
    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(FtpClientError::Cancelled),
        res = tokio::time::timeout(deadline, fut) => match res {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(e)) => Err(on_io(e)),
            Err(_) => Err(FtpClientError::Timeout(what.to_string())),
        },
    }
}
