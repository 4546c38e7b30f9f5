//! Shared error type across hitbadge crates.

use thiserror::Error;

/// Stable error codes, used as a structured logging field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Invalid input / malformed configuration.
    BadRequest,
    /// Text that cannot be embedded in an SVG document.
    InvalidText,
    /// Template formatting failed.
    Render,
    /// Backing store failure (connectivity, conflict, serialization).
    Store,
    /// Unsupported config version.
    UnsupportedVersion,
    /// Internal error.
    Internal,
}

impl ErrorCode {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::BadRequest => "BAD_REQUEST",
            ErrorCode::InvalidText => "INVALID_TEXT",
            ErrorCode::Render => "RENDER",
            ErrorCode::Store => "STORE",
            ErrorCode::UnsupportedVersion => "UNSUPPORTED_VERSION",
            ErrorCode::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, BadgeError>;

/// Unified error type used by core and gateway.
#[derive(Debug, Error)]
pub enum BadgeError {
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("invalid badge text: {0:?}")]
    InvalidText(String),
    #[error("svg formatting failed")]
    Render(#[from] std::fmt::Error),
    #[error("store: {0}")]
    Store(String),
    #[error("unsupported config version")]
    UnsupportedVersion,
    #[error("internal: {0}")]
    Internal(String),
}

impl BadgeError {
    pub fn code(&self) -> ErrorCode {
        match self {
            BadgeError::BadRequest(_) => ErrorCode::BadRequest,
            BadgeError::InvalidText(_) => ErrorCode::InvalidText,
            BadgeError::Render(_) => ErrorCode::Render,
            BadgeError::Store(_) => ErrorCode::Store,
            BadgeError::UnsupportedVersion => ErrorCode::UnsupportedVersion,
            BadgeError::Internal(_) => ErrorCode::Internal,
        }
    }
}
