//! Array-of-dynamic-values variant of the decoder/encoder pair.
//!
//! Unlike [`ValueDecoder`], [`CollectionDecoder`] is lenient about the shape
//! it is given: a value that is not an array is skipped and reported as
//! `None`.

use json_dyn_token::{JsonReader, JsonWriter, ReaderOptions, TokenCursor, TokenKind, WriterError};
use serde::{Deserialize, Deserializer};

use crate::decoder::{next_significant, DecodeOptions, ValueDecoder};
use crate::encoder::ValueEncoder;
use crate::error::{DecodeError, Error};
use crate::value::DynamicValue;

#[derive(Debug, Clone, Copy, Default)]
pub struct CollectionDecoder {
    inner: ValueDecoder,
}

impl CollectionDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: DecodeOptions) -> Self {
        Self {
            inner: ValueDecoder::with_options(options),
        }
    }

    /// Decodes an array of dynamic values. Any other value is skipped and
    /// yields `Ok(None)`.
    pub fn decode<C: TokenCursor + ?Sized>(
        &self,
        cursor: &mut C,
    ) -> Result<Option<Vec<DynamicValue>>, DecodeError> {
        if matches!(cursor.token_kind(), TokenKind::None | TokenKind::Comment)
            && !next_significant(cursor)?
        {
            return Err(DecodeError::TruncatedInput {
                context: TokenKind::None,
            });
        }
        let kind = cursor.token_kind();
        if kind != TokenKind::StartArray {
            tracing::debug!(token = %kind, offset = cursor.offset(), "skipping non-array value");
            if !cursor.skip()? {
                return Err(DecodeError::TruncatedInput { context: kind });
            }
            return Ok(None);
        }
        self.inner.read_list(cursor, 1).map(Some)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct CollectionEncoder {
    inner: ValueEncoder,
}

impl CollectionEncoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn encode(
        &self,
        items: &[DynamicValue],
        writer: &mut JsonWriter,
    ) -> Result<(), WriterError> {
        writer.write_start_array()?;
        for item in items {
            self.inner.encode(item, writer)?;
        }
        writer.write_end_array()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StreamState {
    Start,
    Items,
    Done,
}

/// Iterator over the elements of a top-level JSON array.
///
/// Each element is decoded completely before it is yielded. After the first
/// error the stream is finished.
pub struct ArrayStream<'a> {
    reader: JsonReader<'a>,
    decoder: ValueDecoder,
    state: StreamState,
}

impl<'a> ArrayStream<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self::with_options(data, ReaderOptions::default(), DecodeOptions::default())
    }

    pub fn with_options(data: &'a [u8], reader: ReaderOptions, decode: DecodeOptions) -> Self {
        Self {
            reader: JsonReader::with_options(data, reader),
            decoder: ValueDecoder::with_options(decode),
            state: StreamState::Start,
        }
    }

    fn step(&mut self) -> Result<Option<DynamicValue>, Error> {
        if self.state == StreamState::Start {
            if !next_significant(&mut self.reader)? {
                return Err(DecodeError::TruncatedInput {
                    context: TokenKind::None,
                }
                .into());
            }
            let kind = self.reader.token_kind();
            if kind != TokenKind::StartArray {
                return Err(DecodeError::MalformedStructure {
                    token: kind,
                    offset: self.reader.offset(),
                }
                .into());
            }
            self.state = StreamState::Items;
        }
        if self.state == StreamState::Done {
            return Ok(None);
        }
        if !next_significant(&mut self.reader)? {
            return Err(DecodeError::TruncatedInput {
                context: TokenKind::StartArray,
            }
            .into());
        }
        if self.reader.token_kind() == TokenKind::EndArray {
            self.state = StreamState::Done;
            // Surfaces trailing garbage; trailing comments are fine.
            next_significant(&mut self.reader)?;
            return Ok(None);
        }
        Ok(Some(self.decoder.read_any(&mut self.reader, 1)?))
    }
}

impl Iterator for ArrayStream<'_> {
    type Item = Result<DynamicValue, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.step() {
            Ok(Some(value)) => Some(Ok(value)),
            Ok(None) => None,
            Err(err) => {
                self.state = StreamState::Done;
                Some(Err(err))
            }
        }
    }
}

/// serde `deserialize_with` helper for `Option<Vec<DynamicValue>>` fields:
/// non-array values deserialize to `None` instead of failing.
pub fn deserialize_lenient<'de, D>(deserializer: D) -> Result<Option<Vec<DynamicValue>>, D::Error>
where
    D: Deserializer<'de>,
{
    match DynamicValue::deserialize(deserializer)? {
        DynamicValue::List(items) => Ok(Some(items)),
        other => {
            tracing::debug!(kind = %other.kind(), "non-array value for a dynamic collection");
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stream_yields_elements_in_order() {
        let items: Vec<DynamicValue> = ArrayStream::new(br#"[1, {"a": true}, "x"]"#)
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(items.len(), 3);
        assert_eq!(items[0], DynamicValue::Integer32(1));
        assert_eq!(items[1]["a"], DynamicValue::Bool(true));
        assert_eq!(items[2], DynamicValue::Text("x".into()));
    }

    #[test]
    fn stream_stops_after_error() {
        let mut stream = ArrayStream::new(b"[1, 2");
        assert_eq!(stream.next(), Some(Ok(DynamicValue::Integer32(1))));
        assert_eq!(stream.next(), Some(Ok(DynamicValue::Integer32(2))));
        assert_eq!(
            stream.next(),
            Some(Err(Error::Decode(DecodeError::TruncatedInput {
                context: TokenKind::StartArray
            })))
        );
        assert_eq!(stream.next(), None);
    }

    #[test]
    fn stream_requires_an_array() {
        let mut stream = ArrayStream::new(br#"{"a": 1}"#);
        assert!(matches!(
            stream.next(),
            Some(Err(Error::Decode(DecodeError::MalformedStructure {
                token: TokenKind::StartObject,
                ..
            })))
        ));
    }
}
