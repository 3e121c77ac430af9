//! Error types shared across the application.

use std::fmt::{Display, Formatter};

/// Shared application result type.
pub type Result<T> = std::result::Result<T, AppError>;

/// Application error enumeration covering all domain failure modes.
#[derive(Debug)]
pub enum AppError {
    /// Container runtime unreachable or a runtime API call failed.
    Runtime(String),
    /// Image pull failed with no cached copy to fall back on.
    Image(String),
    /// Unrecognized reply to the stop/restart prompt.
    InvalidAction(String),
    /// File-system, terminal, or stream I/O failure.
    Io(String),
    /// CLI or logging bootstrap failure.
    Config(String),
}

impl Display for AppError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Runtime(msg) => write!(f, "runtime: {msg}"),
            Self::Image(msg) => write!(f, "image: {msg}"),
            Self::InvalidAction(msg) => write!(f, "invalid action: {msg}"),
            Self::Io(msg) => write!(f, "io: {msg}"),
            Self::Config(msg) => write!(f, "config: {msg}"),
        }
    }
}

impl std::error::Error for AppError {}

impl From<bollard::errors::Error> for AppError {
    fn from(err: bollard::errors::Error) -> Self {
        Self::Runtime(err.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}
