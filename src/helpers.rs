use crate::core_error::FtpClientError;
use crate::session::{Direction, Operation, Outcome};

/// Message printed when an operation completed.
pub fn success_message(operation: &Operation, outcome: &Outcome) -> String {
    match (operation, outcome) {
        (_, Outcome::Listing(listing)) => listing.trim_end().to_string(),
        (Operation::MakeDirectory { path }, _) => {
            format!("Directory '{}' created successfully.", path)
        }
        (Operation::RemoveDirectory { path }, _) => {
            format!("Directory '{}' removed successfully.", path)
        }
        (Operation::Delete { path }, _) => format!("File '{}' deleted successfully.", path),
        (Operation::Move { .. }, Outcome::Transferred(t)) => match t.direction {
            Direction::Download => format!(
                "Moved '{}' to {:?} ({} bytes).",
                t.remote, t.local, t.bytes
            ),
            Direction::Upload => format!(
                "Moved {:?} to '{}' ({} bytes).",
                t.local, t.remote, t.bytes
            ),
        },
        (_, Outcome::Transferred(t)) => match t.direction {
            Direction::Download => format!(
                "Downloaded '{}' to {:?} ({} bytes).",
                t.remote, t.local, t.bytes
            ),
            Direction::Upload => format!(
                "Uploaded {:?} to '{}' ({} bytes).",
                t.local, t.remote, t.bytes
            ),
        },
        (_, Outcome::Reply(reply)) => reply.text(),
    }
}

/// Message printed when an operation failed, server reply included.
pub fn failure_message(operation: &Operation, error: &FtpClientError) -> String {
    let what = match operation {
        Operation::List { path } => format!("list '{}'", path.as_deref().unwrap_or(".")),
        Operation::MakeDirectory { path } => format!("create directory '{}'", path),
        Operation::RemoveDirectory { path } => format!("remove directory '{}'", path),
        Operation::Delete { path } => format!("delete '{}'", path),
        Operation::Copy {
            source,
            destination,
        } => format!("copy '{}' to '{}'", source, destination),
        Operation::Move {
            source,
            destination,
        } => format!("move '{}' to '{}'", source, destination),
    };

    match error {
        FtpClientError::Rejected { message, .. } | FtpClientError::Authentication { message, .. } => {
            format!("Failed to {}. Server response: {}", what, message)
        }
        other => format!("Failed to {}: {}", what, other),
    }
}

/// Message printed when the configuration cannot be loaded, causes included.
pub fn config_failure_message(error: &anyhow::Error) -> String {
    format!("Error: {:#}", error)
}
