//! Token sink producing JSON text.
//!
//! Separators and indentation are inserted automatically; callers only emit
//! tokens. Misplaced tokens (a value where a property name is required, an
//! unbalanced end) fail with [`WriterError::InvalidState`].

use time::{Date, Duration, OffsetDateTime, PrimitiveDateTime};

use crate::error::WriterError;
use crate::options::WriterOptions;
use crate::temporal;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Container {
    Array,
    Object,
}

#[derive(Debug)]
struct Frame {
    container: Container,
    count: usize,
    /// A property name was written and its value is pending.
    pending_value: bool,
}

#[derive(Debug, Default)]
pub struct JsonWriter {
    out: String,
    options: WriterOptions,
    stack: Vec<Frame>,
    root_written: bool,
}

impl JsonWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: WriterOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    /// Number of containers currently open.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Text written so far.
    pub fn as_str(&self) -> &str {
        &self.out
    }

    /// Returns the written JSON text, failing if a container is still open.
    pub fn finish(self) -> Result<String, WriterError> {
        if !self.stack.is_empty() {
            return Err(WriterError::Unclosed {
                depth: self.stack.len(),
            });
        }
        Ok(self.out)
    }

    fn newline(&mut self, depth: usize) {
        if let Some(indent) = self.options.indent {
            self.out.push('\n');
            self.out.extend(std::iter::repeat(' ').take(indent * depth));
        }
    }

    /// Positions the output for a value token.
    fn before_value(&mut self) -> Result<(), WriterError> {
        let depth = self.stack.len();
        match self.stack.last_mut() {
            None => {
                if self.root_written {
                    return Err(WriterError::InvalidState(
                        "a top-level value was already written",
                    ));
                }
                self.root_written = true;
            }
            Some(frame) if frame.container == Container::Array => {
                if frame.count > 0 {
                    self.out.push(',');
                }
                frame.count += 1;
                self.newline(depth);
            }
            Some(frame) => {
                if !frame.pending_value {
                    return Err(WriterError::InvalidState("object values need a property name"));
                }
                frame.pending_value = false;
            }
        }
        Ok(())
    }

    fn start(&mut self, container: Container, open: char) -> Result<(), WriterError> {
        self.before_value()?;
        self.out.push(open);
        self.stack.push(Frame {
            container,
            count: 0,
            pending_value: false,
        });
        Ok(())
    }

    fn end(&mut self, container: Container, close: char) -> Result<(), WriterError> {
        match self.stack.last() {
            Some(frame) if frame.container == container && !frame.pending_value => {}
            Some(_) => return Err(WriterError::InvalidState("mismatched container end")),
            None => return Err(WriterError::InvalidState("no open container")),
        }
        if let Some(frame) = self.stack.pop() {
            if frame.count > 0 {
                self.newline(self.stack.len());
            }
        }
        self.out.push(close);
        Ok(())
    }

    pub fn write_start_array(&mut self) -> Result<(), WriterError> {
        self.start(Container::Array, '[')
    }

    pub fn write_end_array(&mut self) -> Result<(), WriterError> {
        self.end(Container::Array, ']')
    }

    pub fn write_start_object(&mut self) -> Result<(), WriterError> {
        self.start(Container::Object, '{')
    }

    pub fn write_end_object(&mut self) -> Result<(), WriterError> {
        self.end(Container::Object, '}')
    }

    pub fn write_property_name(&mut self, name: &str) -> Result<(), WriterError> {
        let quoted = quote(name)?;
        let depth = self.stack.len();
        let frame = match self.stack.last_mut() {
            Some(frame) if frame.container == Container::Object && !frame.pending_value => frame,
            _ => {
                return Err(WriterError::InvalidState(
                    "property names are only valid inside an object",
                ))
            }
        };
        let first = frame.count == 0;
        frame.count += 1;
        frame.pending_value = true;
        if !first {
            self.out.push(',');
        }
        self.newline(depth);
        self.out.push_str(&quoted);
        self.out.push(':');
        if self.options.indent.is_some() {
            self.out.push(' ');
        }
        Ok(())
    }

    pub fn write_null(&mut self) -> Result<(), WriterError> {
        self.before_value()?;
        self.out.push_str("null");
        Ok(())
    }

    pub fn write_bool(&mut self, value: bool) -> Result<(), WriterError> {
        self.before_value()?;
        self.out.push_str(if value { "true" } else { "false" });
        Ok(())
    }

    pub fn write_i32(&mut self, value: i32) -> Result<(), WriterError> {
        self.write_i64(i64::from(value))
    }

    pub fn write_i64(&mut self, value: i64) -> Result<(), WriterError> {
        self.before_value()?;
        self.out.push_str(&value.to_string());
        Ok(())
    }

    /// Writes a float so that it reads back as a float: the output always
    /// carries a fraction or an exponent (`1.0`, `1e16`).
    pub fn write_f64(&mut self, value: f64) -> Result<(), WriterError> {
        if !value.is_finite() {
            return Err(WriterError::NonFiniteNumber(value));
        }
        self.before_value()?;
        self.out.push_str(&format!("{value:?}"));
        Ok(())
    }

    pub fn write_str(&mut self, value: &str) -> Result<(), WriterError> {
        let quoted = quote(value)?;
        self.before_value()?;
        self.out.push_str(&quoted);
        Ok(())
    }

    pub fn write_date(&mut self, value: Date) -> Result<(), WriterError> {
        let text = temporal::format_date(value)?;
        self.write_str(&text)
    }

    pub fn write_datetime(&mut self, value: PrimitiveDateTime) -> Result<(), WriterError> {
        let text = temporal::format_datetime(value)?;
        self.write_str(&text)
    }

    pub fn write_datetime_offset(&mut self, value: OffsetDateTime) -> Result<(), WriterError> {
        let text = temporal::format_datetime_offset(value)?;
        self.write_str(&text)
    }

    pub fn write_duration(&mut self, value: Duration) -> Result<(), WriterError> {
        self.write_str(&temporal::format_duration(value))
    }
}

/// Quotes and escapes `s` as a JSON string literal.
fn quote(s: &str) -> Result<String, WriterError> {
    // Fast path: printable ASCII without quotes or backslashes.
    if s.bytes().all(|b| (32..=126).contains(&b) && b != b'"' && b != b'\\') {
        let mut out = String::with_capacity(s.len() + 2);
        out.push('"');
        out.push_str(s);
        out.push('"');
        return Ok(out);
    }
    serde_json::to_string(s).map_err(|err| WriterError::Escape(err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compact_nested_output() {
        let mut w = JsonWriter::new();
        w.write_start_object().unwrap();
        w.write_property_name("a").unwrap();
        w.write_start_array().unwrap();
        w.write_i32(1).unwrap();
        w.write_f64(2.0).unwrap();
        w.write_str("x\"y").unwrap();
        w.write_end_array().unwrap();
        w.write_property_name("b").unwrap();
        w.write_null().unwrap();
        w.write_end_object().unwrap();
        assert_eq!(w.finish().unwrap(), r#"{"a":[1,2.0,"x\"y"],"b":null}"#);
    }

    #[test]
    fn pretty_output() {
        let mut w = JsonWriter::with_options(WriterOptions::pretty());
        w.write_start_object().unwrap();
        w.write_property_name("a").unwrap();
        w.write_start_array().unwrap();
        w.write_bool(true).unwrap();
        w.write_end_array().unwrap();
        w.write_property_name("e").unwrap();
        w.write_start_array().unwrap();
        w.write_end_array().unwrap();
        w.write_end_object().unwrap();
        assert_eq!(w.finish().unwrap(), "{\n  \"a\": [\n    true\n  ],\n  \"e\": []\n}");
    }

    #[test]
    fn misuse_is_rejected() {
        let mut w = JsonWriter::new();
        assert!(w.write_property_name("a").is_err());
        w.write_start_object().unwrap();
        assert!(w.write_i32(1).is_err());
        assert!(w.write_end_array().is_err());
        w.write_property_name("a").unwrap();
        assert!(w.write_end_object().is_err());
        assert!(matches!(w.finish(), Err(WriterError::Unclosed { depth: 1 })));

        let mut w = JsonWriter::new();
        w.write_null().unwrap();
        assert!(w.write_null().is_err());
        assert_eq!(
            JsonWriter::new().write_f64(f64::NAN).map_err(|e| e.to_string()),
            Err("cannot write non-finite number NaN as JSON".to_string())
        );
    }
}
