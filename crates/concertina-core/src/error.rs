//! Error types for Concertina.

use std::fmt;

/// The main error type for Concertina core operations.
#[derive(Debug)]
pub enum CoreError {
    /// Signal-related error.
    Signal(SignalError),
}

impl fmt::Display for CoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Signal(err) => write!(f, "Signal error: {err}"),
        }
    }
}

impl std::error::Error for CoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Signal(err) => Some(err),
        }
    }
}

/// Signal-specific errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignalError {
    /// The connection ID is invalid or has already been disconnected.
    InvalidConnection,
}

impl fmt::Display for SignalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidConnection => write!(f, "Invalid or disconnected connection ID"),
        }
    }
}

impl std::error::Error for SignalError {}

impl From<SignalError> for CoreError {
    fn from(err: SignalError) -> Self {
        Self::Signal(err)
    }
}

/// A specialized Result type for Concertina core operations.
pub type Result<T> = std::result::Result<T, CoreError>;
