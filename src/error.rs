use thiserror::Error;

pub type Result<T> = std::result::Result<T, DrawerError>;

/// Errors surfaced by the outer layers of the drawer (files, commands).
///
/// Navigation itself never fails: stale ids, cancelled prompts and
/// out-of-range jumps are absorbed as no-ops.
#[derive(Error, Debug)]
pub enum DrawerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Unknown command: {0}")]
    UnknownCommand(String),
    #[error("Invalid argument for '{command}': {reason}")]
    InvalidArgument { command: String, reason: String },
    #[error("Invalid library: {0}")]
    InvalidLibrary(String),
}
