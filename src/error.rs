//! Error types for the contacts crate.

use thiserror::Error;

/// Errors surfaced by store operations, persistence, and the CLI.
#[derive(Debug, Error)]
pub enum ContactsError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("invalid selection: {0}")]
    InvalidSelection(String),

    #[error("duplicate contact: {0}")]
    Duplicate(String),
}

impl ContactsError {
    /// Stable code used in robot-mode error output.
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Io(_) => "io",
            Self::Serialization(_) => "serialization",
            Self::Config(_) => "config",
            Self::NotFound(_) => "not_found",
            Self::InvalidSelection(_) => "invalid_selection",
            Self::Duplicate(_) => "duplicate",
        }
    }
}

pub type Result<T> = std::result::Result<T, ContactsError>;
