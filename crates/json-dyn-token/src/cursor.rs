use time::{Date, Duration, OffsetDateTime, PrimitiveDateTime};

use crate::error::ReaderError;
use crate::temporal;
use crate::token::TokenKind;

/// A pull-style cursor over a stream of JSON tokens.
///
/// The typed getters are probes: they return `None` when the current token
/// is of a different kind or does not fit the requested type, and never fail.
pub trait TokenCursor {
    /// Kind of the current token.
    fn token_kind(&self) -> TokenKind;

    /// Moves to the next token. Returns `Ok(false)` once the input is
    /// exhausted, after which [`token_kind`](Self::token_kind) is
    /// [`TokenKind::None`].
    fn advance(&mut self) -> Result<bool, ReaderError>;

    /// Byte offset of the current token in the underlying input.
    fn offset(&self) -> usize;

    /// Text of the current `String`, `PropertyName` or `Comment` token.
    fn get_str(&self) -> Option<&str>;

    /// Raw numeral of the current `Number` token.
    fn number_text(&self) -> Option<&str>;

    fn get_bool(&self) -> Option<bool> {
        match self.token_kind() {
            TokenKind::True => Some(true),
            TokenKind::False => Some(false),
            _ => None,
        }
    }

    fn try_get_i32(&self) -> Option<i32> {
        self.number_text()?.parse().ok()
    }

    fn try_get_i64(&self) -> Option<i64> {
        self.number_text()?.parse().ok()
    }

    /// Parses the numeral as `f64`; numerals that overflow to infinity are
    /// rejected.
    fn try_get_f64(&self) -> Option<f64> {
        self.number_text()?
            .parse::<f64>()
            .ok()
            .filter(|f| f.is_finite())
    }

    fn try_get_date(&self) -> Option<Date> {
        temporal::parse_date(self.string_value()?)
    }

    fn try_get_datetime(&self) -> Option<PrimitiveDateTime> {
        temporal::parse_datetime(self.string_value()?)
    }

    fn try_get_datetime_offset(&self) -> Option<OffsetDateTime> {
        temporal::parse_datetime_offset(self.string_value()?)
    }

    fn try_get_duration(&self) -> Option<Duration> {
        temporal::parse_duration(self.string_value()?)
    }

    /// Text of the current token only when it is a `String` value.
    fn string_value(&self) -> Option<&str> {
        if self.token_kind() == TokenKind::String {
            self.get_str()
        } else {
            None
        }
    }

    /// Moves the cursor onto the last token of the current value.
    ///
    /// On a property name the cursor first steps onto the property's value.
    /// Scalars and comments are left in place. Returns `Ok(false)` when the
    /// input ends before the value is complete.
    fn skip(&mut self) -> Result<bool, ReaderError> {
        if self.token_kind() == TokenKind::PropertyName && !self.advance()? {
            return Ok(false);
        }
        if !self.token_kind().is_container_start() {
            return Ok(true);
        }
        let mut depth = 0usize;
        loop {
            let kind = self.token_kind();
            if kind.is_container_start() {
                depth += 1;
            } else if kind.is_container_end() {
                depth -= 1;
                if depth == 0 {
                    return Ok(true);
                }
            }
            if !self.advance()? {
                return Ok(false);
            }
        }
    }
}
