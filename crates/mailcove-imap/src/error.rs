//! Error types for the IMAP core.
//!
//! Three families of failure exist in this crate. Syntactic problems in a
//! server response surface as [`Error::Parse`] with the byte offset where the
//! grammar broke down. Values that cannot be represented as a `sequence-set`
//! surface as [`Error::DataFormat`]. A response that is grammatically fine but
//! uses a condition label outside the expected subset surfaces as
//! [`Error::InvalidResponse`].

use thiserror::Error;

/// Errors that can occur while parsing responses or building sequence sets.
#[derive(Debug, Error)]
pub enum Error {
    /// The input does not match the response grammar.
    #[error("parse error at byte {position}: {message}")]
    Parse {
        /// Byte position where the error occurred.
        position: usize,
        /// Description of the offending input and the expected tokens.
        message: String,
    },

    /// A value cannot be represented as a `sequence-set`.
    #[error("invalid sequence-set data: {0}")]
    DataFormat(String),

    /// A response-condition label is not in the expected subset.
    ///
    /// This is a semantic error: the input lexes and parses, but e.g. a
    /// tagged response carries a status other than OK, NO, or BAD.
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

impl Error {
    /// Creates a data-format error.
    pub(crate) fn data_format(message: impl Into<String>) -> Self {
        Self::DataFormat(message.into())
    }
}

/// Result type alias using our [`Error`] type.
pub type Result<T> = std::result::Result<T, Error>;
