//! Error types for message assembly and serialization.

use std::string::FromUtf8Error;

/// Result type alias for assembly and serialization operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Assembly and serialization error types.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Neither a text nor an html body was set at export time.
    #[error("no content (text or html)")]
    NoContent,

    /// Serialization to the output stream failed.
    #[error("write failed: {0}")]
    Write(#[from] std::io::Error),

    /// Invalid transfer-encoded input.
    #[error("invalid encoding: {0}")]
    InvalidEncoding(String),

    /// Base64 decode error.
    #[error("base64 decode error: {0}")]
    Base64Decode(#[from] base64::DecodeError),

    /// UTF-8 decode error.
    #[error("UTF-8 decode error: {0}")]
    Utf8Decode(#[from] FromUtf8Error),
}
