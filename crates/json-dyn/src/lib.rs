//! Schema-free JSON decoding into a strongly value-typed tree.
//!
//! [`ValueDecoder`] walks a [`TokenCursor`] and picks a representation for
//! every token: the narrowest exact integer width, `f64` otherwise, and
//! temporal types for strings that match a date, date-time, offset date-time
//! or duration grammar. [`ValueEncoder`] writes such trees back out.
//!
//! # Example
//!
//! ```
//! use json_dyn::{DynamicValue, ValueKind};
//!
//! let input = r#"{"n": 1234, "big": 2147483648, "at": "2023-04-09", "s": "100"}"#;
//! let v = json_dyn::from_str(input).unwrap();
//! assert_eq!(v["n"], DynamicValue::Integer32(1234));
//! assert_eq!(v["big"].kind(), ValueKind::Integer64);
//! assert_eq!(v["at"].kind(), ValueKind::DateOnly);
//! assert_eq!(v["s"].as_str(), Some("100"));
//!
//! assert_eq!(
//!     json_dyn::to_string(&v).unwrap(),
//!     r#"{"n":1234,"big":2147483648,"at":"2023-04-09","s":"100"}"#
//! );
//! ```

mod decoder;
mod encoder;
mod error;
mod infer;
mod serde_impl;
mod value;

pub mod collection;

pub use collection::{ArrayStream, CollectionDecoder, CollectionEncoder};
pub use decoder::{DecodeOptions, ValueDecoder};
pub use encoder::ValueEncoder;
pub use error::{DecodeError, Error};
pub use value::{DynamicValue, Mapping, ValueKind};

pub use json_dyn_token::{
    temporal, CommentHandling, JsonReader, JsonWriter, ReaderError, ReaderOptions, TokenCursor,
    TokenKind, WriterError, WriterOptions,
};

/// Decodes one JSON document with default options.
pub fn from_str(s: &str) -> Result<DynamicValue, Error> {
    from_slice(s.as_bytes())
}

pub fn from_slice(bytes: &[u8]) -> Result<DynamicValue, Error> {
    from_slice_with(bytes, ReaderOptions::default(), DecodeOptions::default())
}

pub fn from_str_with(
    s: &str,
    reader: ReaderOptions,
    decode: DecodeOptions,
) -> Result<DynamicValue, Error> {
    from_slice_with(s.as_bytes(), reader, decode)
}

/// Decodes one JSON document. Anything after the value other than
/// whitespace (or comments, when the reader accepts them) is an error.
pub fn from_slice_with(
    bytes: &[u8],
    reader: ReaderOptions,
    decode: DecodeOptions,
) -> Result<DynamicValue, Error> {
    let mut cursor = JsonReader::with_options(bytes, reader);
    let value = ValueDecoder::with_options(decode).decode(&mut cursor)?;
    while cursor.advance()? {
        if cursor.token_kind() != TokenKind::Comment {
            return Err(DecodeError::MalformedStructure {
                token: cursor.token_kind(),
                offset: cursor.offset(),
            }
            .into());
        }
    }
    Ok(value)
}

pub fn to_string(value: &DynamicValue) -> Result<String, Error> {
    to_string_with(value, WriterOptions::default())
}

pub fn to_string_pretty(value: &DynamicValue) -> Result<String, Error> {
    to_string_with(value, WriterOptions::pretty())
}

pub fn to_string_with(value: &DynamicValue, options: WriterOptions) -> Result<String, Error> {
    let mut writer = JsonWriter::with_options(options);
    ValueEncoder::new().encode(value, &mut writer)?;
    Ok(writer.finish()?)
}

pub fn to_vec(value: &DynamicValue) -> Result<Vec<u8>, Error> {
    to_string(value).map(String::into_bytes)
}
