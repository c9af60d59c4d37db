//! Validating pull tokenizer over a UTF-8 byte slice.
//!
//! The reader exposes one token at a time. Structural rules of RFC 8259
//! (separators, key positions, bracket matching) are checked as tokens are
//! produced. Running out of input, including in the middle of a token, is
//! not an error here: `advance` returns `Ok(false)` and the token kind drops
//! to `None`, so consumers decide what an unfinished value means.

use crate::cursor::TokenCursor;
use crate::error::ReaderError;
use crate::options::{CommentHandling, ReaderOptions};
use crate::token::TokenKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Container {
    Array,
    Object,
}

/// What the grammar allows at the scan position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Expect {
    Value,
    ValueOrEnd,
    Key,
    KeyOrEnd,
    CommaOrEnd,
    Done,
}

pub struct JsonReader<'a> {
    data: &'a [u8],
    x: usize,
    options: ReaderOptions,
    kind: TokenKind,
    start: usize,
    /// Raw numeral of the current `Number` token.
    num: (usize, usize),
    /// Decoded text of the current `String`, `PropertyName` or `Comment` token.
    text: String,
    stack: Vec<Container>,
    expect: Expect,
}

impl<'a> JsonReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self::with_options(data, ReaderOptions::default())
    }

    pub fn with_options(data: &'a [u8], options: ReaderOptions) -> Self {
        Self {
            data,
            x: 0,
            options,
            kind: TokenKind::None,
            start: 0,
            num: (0, 0),
            text: String::new(),
            stack: Vec::new(),
            expect: Expect::Value,
        }
    }

    pub fn options(&self) -> ReaderOptions {
        self.options
    }

    /// Number of containers currently open.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// `true` once a complete top-level value has been read.
    pub fn is_complete(&self) -> bool {
        self.expect == Expect::Done
    }

    /// Scan position: the offset just past the current token.
    pub fn position(&self) -> usize {
        self.x
    }

    fn skip_whitespace(&mut self) {
        while self.x < self.data.len() {
            match self.data[self.x] {
                b' ' | b'\t' | b'\n' | b'\r' => self.x += 1,
                _ => break,
            }
        }
    }

    fn syntax(&self, offset: usize, message: &'static str) -> ReaderError {
        ReaderError::Syntax { offset, message }
    }

    fn exhausted(&mut self) -> Result<bool, ReaderError> {
        self.x = self.data.len();
        self.kind = TokenKind::None;
        self.start = self.x;
        Ok(false)
    }

    fn after_value(&mut self) {
        self.expect = if self.stack.is_empty() {
            Expect::Done
        } else {
            Expect::CommaOrEnd
        };
    }

    fn open(&mut self, container: Container) {
        self.stack.push(container);
        self.x += 1;
        match container {
            Container::Array => {
                self.kind = TokenKind::StartArray;
                self.expect = Expect::ValueOrEnd;
            }
            Container::Object => {
                self.kind = TokenKind::StartObject;
                self.expect = Expect::KeyOrEnd;
            }
        }
    }

    fn close(&mut self, ch: u8) -> Result<bool, ReaderError> {
        let kind = match (self.stack.last(), ch) {
            (Some(Container::Array), b']') => TokenKind::EndArray,
            (Some(Container::Object), b'}') => TokenKind::EndObject,
            _ => return Err(self.syntax(self.x, "mismatched closing bracket")),
        };
        self.stack.pop();
        self.x += 1;
        self.kind = kind;
        self.after_value();
        Ok(true)
    }

    /// Reads a comment starting at the scan position. Returns `false` when
    /// the comment is consumed silently.
    fn read_comment(&mut self) -> Result<bool, ReaderError> {
        let start = self.x;
        if self.options.comments == CommentHandling::Disallow {
            return Err(self.syntax(start, "comments are not allowed"));
        }
        let data = self.data;
        let body = match data.get(start + 1) {
            Some(b'/') => {
                let end = data[start + 2..]
                    .iter()
                    .position(|&b| b == b'\n')
                    .map_or(data.len(), |p| start + 2 + p);
                self.x = end;
                &data[start + 2..end]
            }
            Some(b'*') => {
                let end = data[start + 2..]
                    .windows(2)
                    .position(|w| w == b"*/")
                    .map(|p| start + 2 + p)
                    .ok_or(ReaderError::UnterminatedComment { offset: start })?;
                self.x = end + 2;
                &data[start + 2..end]
            }
            _ => return Err(self.syntax(start, "unexpected '/'")),
        };
        if self.options.comments == CommentHandling::Skip {
            return Ok(false);
        }
        self.text = std::str::from_utf8(body)
            .map_err(|_| ReaderError::InvalidUtf8 { offset: start })?
            .to_string();
        self.kind = TokenKind::Comment;
        self.start = start;
        Ok(true)
    }

    fn read_value(&mut self, ch: u8) -> Result<bool, ReaderError> {
        self.start = self.x;
        match ch {
            b'{' => self.open(Container::Object),
            b'[' => self.open(Container::Array),
            b'"' => {
                if !self.read_str()? {
                    return self.exhausted();
                }
                self.kind = TokenKind::String;
                self.after_value();
            }
            b't' => return self.read_literal(b"true", TokenKind::True),
            b'f' => return self.read_literal(b"false", TokenKind::False),
            b'n' => return self.read_literal(b"null", TokenKind::Null),
            c if c.is_ascii_digit() || c == b'-' => return self.read_num(),
            _ => return Err(self.syntax(self.x, "expected a JSON value")),
        }
        Ok(true)
    }

    fn read_literal(&mut self, word: &[u8], kind: TokenKind) -> Result<bool, ReaderError> {
        let data = self.data;
        let rest = &data[self.x..];
        let n = rest.len().min(word.len());
        if rest[..n] != word[..n] {
            return Err(self.syntax(self.x, "invalid literal"));
        }
        if n < word.len() {
            return self.exhausted();
        }
        self.x += word.len();
        self.kind = kind;
        self.after_value();
        Ok(true)
    }

    /// Scans `-? (0 | [1-9][0-9]*) (. [0-9]+)? ([eE] [+-]? [0-9]+)?`.
    fn read_num(&mut self) -> Result<bool, ReaderError> {
        let data = self.data;
        let len = data.len();
        let start = self.x;
        let mut x = start;

        if data[x] == b'-' {
            x += 1;
        }
        match data.get(x) {
            None => return self.exhausted(),
            Some(b'0') => x += 1,
            Some(c) if c.is_ascii_digit() => {
                while x < len && data[x].is_ascii_digit() {
                    x += 1;
                }
            }
            Some(_) => return Err(self.syntax(x, "expected a digit")),
        }
        if x < len && data[x] == b'.' {
            x += 1;
            let digits = x;
            while x < len && data[x].is_ascii_digit() {
                x += 1;
            }
            if x == len && x == digits {
                return self.exhausted();
            }
            if x == digits {
                return Err(self.syntax(x, "expected a digit after '.'"));
            }
        }
        if x < len && (data[x] == b'e' || data[x] == b'E') {
            x += 1;
            if x < len && (data[x] == b'+' || data[x] == b'-') {
                x += 1;
            }
            let digits = x;
            while x < len && data[x].is_ascii_digit() {
                x += 1;
            }
            if x == len && x == digits {
                return self.exhausted();
            }
            if x == digits {
                return Err(self.syntax(x, "expected a digit in exponent"));
            }
        }

        self.num = (start, x);
        self.x = x;
        self.kind = TokenKind::Number;
        self.after_value();
        Ok(true)
    }

    /// Reads a quoted string into `self.text`. Returns `false` when the
    /// input ends before the closing quote.
    fn read_str(&mut self) -> Result<bool, ReaderError> {
        let data = self.data;
        let open = self.x;
        let mut x = open + 1;
        let mut escaped = false;
        loop {
            match data.get(x) {
                None => return Ok(false),
                Some(b'"') => break,
                Some(b'\\') => {
                    escaped = true;
                    x += 2;
                }
                Some(&b) if b < 0x20 => {
                    return Err(self.syntax(x, "control character in string"));
                }
                Some(_) => x += 1,
            }
        }
        self.text = decode_json_string(&data[open + 1..x], escaped, open)?;
        self.x = x + 1;
        Ok(true)
    }

    fn read_property_name(&mut self) -> Result<bool, ReaderError> {
        self.start = self.x;
        if !self.read_str()? {
            return self.exhausted();
        }
        self.skip_whitespace();
        match self.data.get(self.x) {
            None => return self.exhausted(),
            Some(b':') => self.x += 1,
            Some(_) => return Err(self.syntax(self.x, "expected ':' after property name")),
        }
        self.kind = TokenKind::PropertyName;
        self.expect = Expect::Value;
        Ok(true)
    }
}

impl TokenCursor for JsonReader<'_> {
    fn token_kind(&self) -> TokenKind {
        self.kind
    }

    fn advance(&mut self) -> Result<bool, ReaderError> {
        loop {
            self.skip_whitespace();
            let Some(&ch) = self.data.get(self.x) else {
                return self.exhausted();
            };
            if ch == b'/' {
                if self.read_comment()? {
                    return Ok(true);
                }
                continue;
            }
            return match self.expect {
                Expect::Done => Err(self.syntax(self.x, "unexpected data after top-level value")),
                Expect::CommaOrEnd => match ch {
                    b',' => {
                        self.x += 1;
                        let trailing = self.options.allow_trailing_commas;
                        self.expect = match (self.stack.last(), trailing) {
                            (Some(Container::Object), true) => Expect::KeyOrEnd,
                            (Some(Container::Object), false) => Expect::Key,
                            (_, true) => Expect::ValueOrEnd,
                            (_, false) => Expect::Value,
                        };
                        continue;
                    }
                    b']' | b'}' => self.close(ch),
                    _ => Err(self.syntax(self.x, "expected ',' or closing bracket")),
                },
                Expect::ValueOrEnd if ch == b']' => self.close(ch),
                Expect::Value | Expect::ValueOrEnd => self.read_value(ch),
                Expect::KeyOrEnd if ch == b'}' => self.close(ch),
                Expect::Key | Expect::KeyOrEnd => {
                    if ch != b'"' {
                        return Err(self.syntax(self.x, "expected a property name"));
                    }
                    self.read_property_name()
                }
            };
        }
    }

    fn offset(&self) -> usize {
        self.start
    }

    fn get_str(&self) -> Option<&str> {
        match self.kind {
            TokenKind::String | TokenKind::PropertyName | TokenKind::Comment => {
                Some(self.text.as_str())
            }
            _ => None,
        }
    }

    fn number_text(&self) -> Option<&str> {
        if self.kind != TokenKind::Number {
            return None;
        }
        std::str::from_utf8(&self.data[self.num.0..self.num.1]).ok()
    }
}

/// Decode a JSON string body (between the quotes).
/// Bodies with escapes are handed to serde_json for unescaping.
fn decode_json_string(bytes: &[u8], escaped: bool, offset: usize) -> Result<String, ReaderError> {
    if !escaped {
        return std::str::from_utf8(bytes)
            .map(str::to_string)
            .map_err(|_| ReaderError::InvalidUtf8 { offset });
    }
    let mut quoted = Vec::with_capacity(bytes.len() + 2);
    quoted.push(b'"');
    quoted.extend_from_slice(bytes);
    quoted.push(b'"');
    serde_json::from_slice(&quoted).map_err(|err| {
        tracing::debug!(offset, error = %err, "rejected string escape");
        ReaderError::InvalidEscape { offset }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str, options: ReaderOptions) -> Result<Vec<TokenKind>, ReaderError> {
        let mut reader = JsonReader::with_options(input.as_bytes(), options);
        let mut out = Vec::new();
        while reader.advance()? {
            out.push(reader.token_kind());
        }
        Ok(out)
    }

    #[test]
    fn number_token_keeps_raw_numeral() {
        let mut reader = JsonReader::new(b" -12.5e+3 ");
        assert!(reader.advance().unwrap());
        assert_eq!(reader.number_text(), Some("-12.5e+3"));
        assert_eq!(reader.offset(), 1);
        assert_eq!(reader.try_get_i64(), None);
        assert_eq!(reader.try_get_f64(), Some(-12500.0));
        assert!(reader.is_complete());
        assert!(!reader.advance().unwrap());
    }

    #[test]
    fn property_name_consumes_colon() {
        let mut reader = JsonReader::new(br#"{"k" : 1}"#);
        assert!(reader.advance().unwrap());
        assert!(reader.advance().unwrap());
        assert_eq!(reader.token_kind(), TokenKind::PropertyName);
        assert_eq!(reader.get_str(), Some("k"));
        assert!(reader.advance().unwrap());
        assert_eq!(reader.try_get_i32(), Some(1));
    }

    #[test]
    fn truncated_tokens_end_the_stream() {
        for input in ["\"abc", "tru", "-", "1.", "1e", "[1, ", "{\"a\"", "{\"a\":"] {
            let mut reader = JsonReader::new(input.as_bytes());
            while reader.advance().unwrap() {}
            assert_eq!(reader.token_kind(), TokenKind::None, "input {input:?}");
        }
    }

    #[test]
    fn separators_are_enforced() {
        let opts = ReaderOptions::default();
        assert!(kinds("[1 2]", opts).is_err());
        assert!(kinds("{\"a\" 1}", opts).is_err());
        assert!(kinds("{1: 2}", opts).is_err());
        assert!(kinds("[1,]", opts).is_err());
        assert!(kinds("[1}", opts).is_err());
        assert!(kinds("01", opts).is_err());
        assert!(kinds("1 2", opts).is_err());
    }

    #[test]
    fn trailing_commas_when_enabled() {
        let opts = ReaderOptions::new().allow_trailing_commas(true);
        assert_eq!(
            kinds("[1,]", opts).unwrap(),
            vec![TokenKind::StartArray, TokenKind::Number, TokenKind::EndArray]
        );
        assert_eq!(
            kinds("{\"a\":null,}", opts).unwrap(),
            vec![
                TokenKind::StartObject,
                TokenKind::PropertyName,
                TokenKind::Null,
                TokenKind::EndObject
            ]
        );
    }
}
