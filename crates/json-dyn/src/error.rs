use json_dyn_token::{ReaderError, TokenKind, WriterError};
use thiserror::Error;

/// Failure of a single decode call. No partial value accompanies it.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("{token} encountered outside of its container loop at offset {offset}")]
    MalformedStructure { token: TokenKind, offset: usize },
    #[error("invalid JSON: input ended inside {context}")]
    TruncatedInput { context: TokenKind },
    #[error("maximum nesting depth {max_depth} exceeded at offset {offset}")]
    DepthExceeded { max_depth: usize, offset: usize },
    #[error("number at offset {offset} is out of range for a 64-bit float")]
    NumberOutOfRange { offset: usize },
    #[error(transparent)]
    Reader(#[from] ReaderError),
}

/// Error type of the crate-level convenience functions.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    #[error(transparent)]
    Decode(#[from] DecodeError),
    #[error(transparent)]
    Write(#[from] WriterError),
}

impl From<ReaderError> for Error {
    fn from(err: ReaderError) -> Self {
        Error::Decode(DecodeError::Reader(err))
    }
}
