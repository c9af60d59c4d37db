//! Token-level JSON plumbing for json-dyn.
//!
//! - [`JsonReader`]: a validating pull reader over a byte slice that exposes
//!   one token at a time through the [`TokenCursor`] trait.
//! - [`JsonWriter`]: a token sink that inserts separators and checks
//!   container balance.
//! - [`temporal`]: the date, date-time, offset date-time and duration string
//!   grammars shared by both directions.
//!
//! # Example
//!
//! ```
//! use json_dyn_token::{JsonReader, TokenCursor, TokenKind};
//!
//! let mut reader = JsonReader::new(br#"{"a": [1, true]}"#);
//! let mut kinds = Vec::new();
//! while reader.advance().unwrap() {
//!     kinds.push(reader.token_kind());
//! }
//! assert_eq!(
//!     kinds,
//!     vec![
//!         TokenKind::StartObject,
//!         TokenKind::PropertyName,
//!         TokenKind::StartArray,
//!         TokenKind::Number,
//!         TokenKind::True,
//!         TokenKind::EndArray,
//!         TokenKind::EndObject,
//!     ]
//! );
//! ```

mod cursor;
mod error;
mod options;
mod reader;
mod token;
mod writer;

pub mod temporal;

pub use cursor::TokenCursor;
pub use error::{ReaderError, WriterError};
pub use options::{CommentHandling, ReaderOptions, WriterOptions};
pub use reader::JsonReader;
pub use token::TokenKind;
pub use writer::JsonWriter;
