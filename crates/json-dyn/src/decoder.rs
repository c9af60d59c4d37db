//! Builds a [`DynamicValue`] from a token cursor.
//!
//! The decoder consumes exactly the tokens of one JSON value and leaves the
//! cursor on that value's last token (the scalar itself, `]` or `}`).
//! Containers recurse once per nesting level; the depth is capped by
//! [`DecodeOptions::max_depth`].

use json_dyn_token::{TokenCursor, TokenKind};
use serde::Deserialize;

use crate::error::DecodeError;
use crate::infer;
use crate::value::{DynamicValue, Mapping};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DecodeOptions {
    /// Deepest container nesting accepted. The top-level container is depth 1.
    pub max_depth: usize,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self { max_depth: 64 }
    }
}

impl DecodeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ValueDecoder {
    options: DecodeOptions,
}

impl ValueDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: DecodeOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> DecodeOptions {
        self.options
    }

    /// Decodes the value at the cursor. A cursor that has not produced a
    /// token yet is advanced once first.
    pub fn decode<C: TokenCursor + ?Sized>(
        &self,
        cursor: &mut C,
    ) -> Result<DynamicValue, DecodeError> {
        if cursor.token_kind() == TokenKind::None && !cursor.advance()? {
            return Err(DecodeError::TruncatedInput {
                context: TokenKind::None,
            });
        }
        self.read_any(cursor, 0).inspect_err(|err| {
            tracing::debug!(error = %err, offset = cursor.offset(), "dynamic decode failed");
        })
    }

    /// `depth` is the number of containers enclosing the current token.
    pub(crate) fn read_any<C: TokenCursor + ?Sized>(
        &self,
        cursor: &mut C,
        depth: usize,
    ) -> Result<DynamicValue, DecodeError> {
        loop {
            let kind = cursor.token_kind();
            match kind {
                TokenKind::StartArray => {
                    return self.read_list(cursor, depth + 1).map(DynamicValue::List);
                }
                TokenKind::StartObject => {
                    return self.read_mapping(cursor, depth + 1).map(DynamicValue::Mapping);
                }
                TokenKind::String => {
                    let text = token_text(cursor, kind)?;
                    return Ok(infer::infer_text(text));
                }
                TokenKind::Number => return infer::infer_number(cursor),
                TokenKind::True => return Ok(DynamicValue::Bool(true)),
                TokenKind::False => return Ok(DynamicValue::Bool(false)),
                TokenKind::Null => return Ok(DynamicValue::Null),
                TokenKind::EndArray | TokenKind::EndObject | TokenKind::PropertyName => {
                    return Err(DecodeError::MalformedStructure {
                        token: kind,
                        offset: cursor.offset(),
                    });
                }
                TokenKind::Comment | TokenKind::None => {}
            }
            if !cursor.advance()? {
                return Err(DecodeError::TruncatedInput { context: kind });
            }
        }
    }

    /// Reads list elements after a `[`, through the matching `]`.
    pub(crate) fn read_list<C: TokenCursor + ?Sized>(
        &self,
        cursor: &mut C,
        depth: usize,
    ) -> Result<Vec<DynamicValue>, DecodeError> {
        self.check_depth(cursor, depth)?;
        let mut list = Vec::new();
        loop {
            if !next_significant(cursor)? {
                return Err(DecodeError::TruncatedInput {
                    context: TokenKind::StartArray,
                });
            }
            if cursor.token_kind() == TokenKind::EndArray {
                return Ok(list);
            }
            list.push(self.read_any(cursor, depth)?);
        }
    }

    fn read_mapping<C: TokenCursor + ?Sized>(
        &self,
        cursor: &mut C,
        depth: usize,
    ) -> Result<Mapping, DecodeError> {
        self.check_depth(cursor, depth)?;
        let mut map = Mapping::new();
        loop {
            if !next_significant(cursor)? {
                return Err(DecodeError::TruncatedInput {
                    context: TokenKind::StartObject,
                });
            }
            match cursor.token_kind() {
                TokenKind::EndObject => return Ok(map),
                TokenKind::PropertyName => {}
                token => {
                    return Err(DecodeError::MalformedStructure {
                        token,
                        offset: cursor.offset(),
                    });
                }
            }
            let key = token_text(cursor, TokenKind::PropertyName)?;
            if !next_significant(cursor)? {
                return Err(DecodeError::TruncatedInput {
                    context: TokenKind::PropertyName,
                });
            }
            let value = self.read_any(cursor, depth)?;
            // Last occurrence of a duplicate key wins.
            map.insert(key, value);
        }
    }

    fn check_depth<C: TokenCursor + ?Sized>(
        &self,
        cursor: &C,
        depth: usize,
    ) -> Result<(), DecodeError> {
        if depth > self.options.max_depth {
            tracing::debug!(depth, max_depth = self.options.max_depth, "nesting limit hit");
            return Err(DecodeError::DepthExceeded {
                max_depth: self.options.max_depth,
                offset: cursor.offset(),
            });
        }
        Ok(())
    }
}

/// Text of a `String` or `PropertyName` token. A cursor that reports such a
/// token without its text is malformed.
fn token_text<C: TokenCursor + ?Sized>(
    cursor: &C,
    token: TokenKind,
) -> Result<String, DecodeError> {
    cursor
        .get_str()
        .map(str::to_string)
        .ok_or(DecodeError::MalformedStructure {
            token,
            offset: cursor.offset(),
        })
}

/// Advances past any comment tokens. Returns `false` at end of input.
pub(crate) fn next_significant<C: TokenCursor + ?Sized>(
    cursor: &mut C,
) -> Result<bool, DecodeError> {
    loop {
        if !cursor.advance()? {
            return Ok(false);
        }
        if cursor.token_kind() != TokenKind::Comment {
            return Ok(true);
        }
    }
}
