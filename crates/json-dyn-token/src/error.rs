use thiserror::Error;

/// Failure raised by [`JsonReader`](crate::JsonReader) while tokenizing.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ReaderError {
    #[error("invalid JSON at offset {offset}: {message}")]
    Syntax { offset: usize, message: &'static str },
    #[error("invalid UTF-8 in string at offset {offset}")]
    InvalidUtf8 { offset: usize },
    #[error("invalid escape sequence in string at offset {offset}")]
    InvalidEscape { offset: usize },
    #[error("unterminated comment at offset {offset}")]
    UnterminatedComment { offset: usize },
}

impl ReaderError {
    pub fn offset(&self) -> usize {
        match self {
            ReaderError::Syntax { offset, .. }
            | ReaderError::InvalidUtf8 { offset }
            | ReaderError::InvalidEscape { offset }
            | ReaderError::UnterminatedComment { offset } => *offset,
        }
    }
}

/// Failure raised by [`JsonWriter`](crate::JsonWriter).
#[derive(Debug, Error, Clone, PartialEq)]
pub enum WriterError {
    #[error("invalid writer state: {0}")]
    InvalidState(&'static str),
    #[error("cannot write non-finite number {0} as JSON")]
    NonFiniteNumber(f64),
    #[error("cannot escape string: {0}")]
    Escape(String),
    #[error("cannot format temporal value: {0}")]
    Temporal(String),
    #[error("{depth} container(s) left open")]
    Unclosed { depth: usize },
}

impl From<time::error::Format> for WriterError {
    fn from(err: time::error::Format) -> Self {
        WriterError::Temporal(err.to_string())
    }
}
