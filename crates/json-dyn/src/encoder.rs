//! Writes a [`DynamicValue`] through a [`JsonWriter`].
//!
//! Emission follows the runtime variant of each node: containers are opened
//! and closed here, scalar leaves go to the writer's typed methods. Nothing
//! re-dispatches on the dynamic type itself, so nested values cannot loop
//! back into this encoder at the same node.

use json_dyn_token::{JsonWriter, WriterError};

use crate::value::DynamicValue;

#[derive(Debug, Clone, Copy, Default)]
pub struct ValueEncoder {
    lossy: bool,
}

impl ValueEncoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// An encoder that never fails on scalar content: non-finite floats are
    /// written as `null`, and temporal values the writer cannot format are
    /// written as their `Display` text.
    pub fn lossy() -> Self {
        Self { lossy: true }
    }

    pub fn encode(&self, value: &DynamicValue, writer: &mut JsonWriter) -> Result<(), WriterError> {
        match value {
            DynamicValue::Null => writer.write_null(),
            DynamicValue::Bool(b) => writer.write_bool(*b),
            DynamicValue::Integer32(i) => writer.write_i32(*i),
            DynamicValue::Integer64(i) => writer.write_i64(*i),
            DynamicValue::Float64(f) if self.lossy && !f.is_finite() => writer.write_null(),
            DynamicValue::Float64(f) => writer.write_f64(*f),
            DynamicValue::Text(s) => writer.write_str(s),
            DynamicValue::DateOnly(d) => {
                let written = writer.write_date(*d);
                self.or_text(written, writer, || d.to_string())
            }
            DynamicValue::DateTime(dt) => {
                let written = writer.write_datetime(*dt);
                self.or_text(written, writer, || dt.to_string())
            }
            DynamicValue::DateTimeWithOffset(dt) => {
                let written = writer.write_datetime_offset(*dt);
                self.or_text(written, writer, || dt.to_string())
            }
            DynamicValue::Duration(d) => writer.write_duration(*d),
            DynamicValue::List(items) => {
                writer.write_start_array()?;
                for item in items {
                    self.encode(item, writer)?;
                }
                writer.write_end_array()
            }
            DynamicValue::Mapping(map) => {
                writer.write_start_object()?;
                for (key, item) in map {
                    writer.write_property_name(key)?;
                    self.encode(item, writer)?;
                }
                writer.write_end_object()
            }
        }
    }

    /// Temporal writes fail before anything is emitted, so the fallback text
    /// takes the same position.
    fn or_text(
        &self,
        written: Result<(), WriterError>,
        writer: &mut JsonWriter,
        text: impl FnOnce() -> String,
    ) -> Result<(), WriterError> {
        match written {
            Err(WriterError::Temporal(_)) if self.lossy => writer.write_str(&text()),
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Mapping;
    use time::macros::datetime;

    #[test]
    fn nested_value_inside_host_document() {
        let mut inner = Mapping::new();
        inner.insert("at".into(), DynamicValue::from(datetime!(2023-04-09 01:23:45)));
        inner.insert("n".into(), DynamicValue::Integer64(2_147_483_648));

        let mut writer = JsonWriter::new();
        writer.write_start_object().unwrap();
        writer.write_property_name("property1").unwrap();
        writer.write_str("something").unwrap();
        writer.write_property_name("dynamicData").unwrap();
        ValueEncoder::new()
            .encode(&DynamicValue::Mapping(inner), &mut writer)
            .unwrap();
        writer.write_end_object().unwrap();
        assert_eq!(
            writer.finish().unwrap(),
            r#"{"property1":"something","dynamicData":{"at":"2023-04-09T01:23:45","n":2147483648}}"#
        );
    }

    #[test]
    fn lossy_encoder_writes_null_for_non_finite_floats() {
        let value = DynamicValue::List(vec![
            DynamicValue::Float64(f64::NAN),
            DynamicValue::Float64(f64::NEG_INFINITY),
            DynamicValue::Float64(0.5),
        ]);
        let mut writer = JsonWriter::new();
        ValueEncoder::lossy().encode(&value, &mut writer).unwrap();
        assert_eq!(writer.finish().unwrap(), "[null,null,0.5]");
    }

    #[test]
    fn unformattable_offset_falls_back_to_display_text() {
        let at = datetime!(2023-04-09 01:23:45 +01:00:30);
        let value = DynamicValue::DateTimeWithOffset(at);

        let mut writer = JsonWriter::new();
        let err = ValueEncoder::new().encode(&value, &mut writer).unwrap_err();
        assert!(matches!(err, WriterError::Temporal(_)), "{err:?}");

        let mut writer = JsonWriter::new();
        ValueEncoder::lossy().encode(&value, &mut writer).unwrap();
        assert_eq!(writer.finish().unwrap(), format!("\"{at}\""));
    }

    #[test]
    fn writer_errors_propagate() {
        let value = DynamicValue::List(vec![DynamicValue::Float64(f64::NAN)]);
        let mut writer = JsonWriter::new();
        let err = ValueEncoder::new().encode(&value, &mut writer).unwrap_err();
        assert!(matches!(err, WriterError::NonFiniteNumber(f) if f.is_nan()));
    }
}
