//! The value tree produced by schema-free decoding.

use std::fmt;
use std::ops::Index;

use indexmap::IndexMap;
use json_dyn_token::{temporal, JsonWriter};
use time::{Date, Duration, OffsetDateTime, PrimitiveDateTime};

use crate::encoder::ValueEncoder;
use crate::infer;

/// Insertion-ordered object representation. Inserting an existing key
/// replaces its value in place.
pub type Mapping = IndexMap<String, DynamicValue>;

/// A JSON value whose Rust representation was chosen from its content.
///
/// Numbers take the narrowest exact integer width, falling back to `f64`;
/// strings that match a temporal grammar become temporal values.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum DynamicValue {
    #[default]
    Null,
    Bool(bool),
    Integer32(i32),
    Integer64(i64),
    Float64(f64),
    Text(String),
    DateOnly(Date),
    DateTime(PrimitiveDateTime),
    DateTimeWithOffset(OffsetDateTime),
    Duration(Duration),
    List(Vec<DynamicValue>),
    Mapping(Mapping),
}

/// Variant tag of a [`DynamicValue`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Null,
    Bool,
    Integer32,
    Integer64,
    Float64,
    Text,
    DateOnly,
    DateTime,
    DateTimeWithOffset,
    Duration,
    List,
    Mapping,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

static NULL: DynamicValue = DynamicValue::Null;

impl DynamicValue {
    pub fn kind(&self) -> ValueKind {
        match self {
            DynamicValue::Null => ValueKind::Null,
            DynamicValue::Bool(_) => ValueKind::Bool,
            DynamicValue::Integer32(_) => ValueKind::Integer32,
            DynamicValue::Integer64(_) => ValueKind::Integer64,
            DynamicValue::Float64(_) => ValueKind::Float64,
            DynamicValue::Text(_) => ValueKind::Text,
            DynamicValue::DateOnly(_) => ValueKind::DateOnly,
            DynamicValue::DateTime(_) => ValueKind::DateTime,
            DynamicValue::DateTimeWithOffset(_) => ValueKind::DateTimeWithOffset,
            DynamicValue::Duration(_) => ValueKind::Duration,
            DynamicValue::List(_) => ValueKind::List,
            DynamicValue::Mapping(_) => ValueKind::Mapping,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, DynamicValue::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            DynamicValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Either integer width, widened to `i64`.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            DynamicValue::Integer32(i) => Some(i64::from(*i)),
            DynamicValue::Integer64(i) => Some(*i),
            _ => None,
        }
    }

    /// Any numeric variant as `f64`. Large `Integer64` values may round.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            DynamicValue::Integer32(i) => Some(f64::from(*i)),
            DynamicValue::Integer64(i) => Some(*i as f64),
            DynamicValue::Float64(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            DynamicValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[DynamicValue]> {
        match self {
            DynamicValue::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_mapping(&self) -> Option<&Mapping> {
        match self {
            DynamicValue::Mapping(map) => Some(map),
            _ => None,
        }
    }

    /// Looks up `key` when `self` is a mapping.
    pub fn get(&self, key: &str) -> Option<&DynamicValue> {
        self.as_mapping()?.get(key)
    }

    /// Builds an integer value with the narrowest exact width.
    pub fn integer(value: i64) -> Self {
        match i32::try_from(value) {
            Ok(narrow) => DynamicValue::Integer32(narrow),
            Err(_) => DynamicValue::Integer64(value),
        }
    }

    /// Builds a value from text, applying the numeral guard and the temporal
    /// grammars in decoding order.
    pub fn from_text(text: impl Into<String>) -> Self {
        infer::infer_text(text.into())
    }
}

impl Index<&str> for DynamicValue {
    type Output = DynamicValue;

    /// Missing keys and non-mappings index to `Null`.
    fn index(&self, key: &str) -> &DynamicValue {
        self.get(key).unwrap_or(&NULL)
    }
}

impl Index<usize> for DynamicValue {
    type Output = DynamicValue;

    /// Out-of-range positions and non-lists index to `Null`.
    fn index(&self, index: usize) -> &DynamicValue {
        self.as_list()
            .and_then(|items| items.get(index))
            .unwrap_or(&NULL)
    }
}

impl fmt::Display for DynamicValue {
    /// Compact JSON. Non-finite floats render as `null`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut writer = JsonWriter::new();
        ValueEncoder::lossy()
            .encode(self, &mut writer)
            .map_err(|_| fmt::Error)?;
        f.write_str(writer.as_str())
    }
}

macro_rules! impl_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for DynamicValue {
                fn from(v: $ty) -> Self {
                    DynamicValue::$variant(v)
                }
            }
        )*
    };
}

impl_from! {
    bool => Bool,
    i32 => Integer32,
    i64 => Integer64,
    f64 => Float64,
    String => Text,
    Date => DateOnly,
    PrimitiveDateTime => DateTime,
    OffsetDateTime => DateTimeWithOffset,
    Duration => Duration,
    Vec<DynamicValue> => List,
    Mapping => Mapping,
}

impl From<&str> for DynamicValue {
    fn from(v: &str) -> Self {
        DynamicValue::Text(v.to_string())
    }
}

impl<T: Into<DynamicValue>> From<Option<T>> for DynamicValue {
    fn from(v: Option<T>) -> Self {
        v.map_or(DynamicValue::Null, Into::into)
    }
}

impl From<serde_json::Value> for DynamicValue {
    /// Applies the decoding inference rules to an already parsed
    /// `serde_json::Value`.
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => DynamicValue::Null,
            serde_json::Value::Bool(b) => DynamicValue::Bool(b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    DynamicValue::integer(i)
                } else {
                    DynamicValue::Float64(n.as_f64().unwrap_or(0.0))
                }
            }
            serde_json::Value::String(s) => infer::infer_text(s),
            serde_json::Value::Array(arr) => {
                DynamicValue::List(arr.into_iter().map(DynamicValue::from).collect())
            }
            serde_json::Value::Object(obj) => DynamicValue::Mapping(
                obj.into_iter()
                    .map(|(k, v)| (k, DynamicValue::from(v)))
                    .collect(),
            ),
        }
    }
}

impl From<DynamicValue> for serde_json::Value {
    /// Temporal values become their string forms; non-finite floats become
    /// `null`.
    fn from(v: DynamicValue) -> Self {
        match v {
            DynamicValue::Null => serde_json::Value::Null,
            DynamicValue::Bool(b) => serde_json::Value::Bool(b),
            DynamicValue::Integer32(i) => serde_json::Value::from(i),
            DynamicValue::Integer64(i) => serde_json::Value::from(i),
            DynamicValue::Float64(f) => serde_json::Number::from_f64(f)
                .map_or(serde_json::Value::Null, serde_json::Value::Number),
            DynamicValue::Text(s) => serde_json::Value::String(s),
            DynamicValue::DateOnly(d) => serde_json::Value::String(
                temporal::format_date(d).unwrap_or_else(|_| d.to_string()),
            ),
            DynamicValue::DateTime(dt) => serde_json::Value::String(
                temporal::format_datetime(dt).unwrap_or_else(|_| dt.to_string()),
            ),
            DynamicValue::DateTimeWithOffset(dt) => serde_json::Value::String(
                temporal::format_datetime_offset(dt).unwrap_or_else(|_| dt.to_string()),
            ),
            DynamicValue::Duration(d) => {
                serde_json::Value::String(temporal::format_duration(d))
            }
            DynamicValue::List(items) => {
                serde_json::Value::Array(items.into_iter().map(serde_json::Value::from).collect())
            }
            DynamicValue::Mapping(map) => serde_json::Value::Object(
                map.into_iter()
                    .map(|(k, v)| (k, serde_json::Value::from(v)))
                    .collect(),
            ),
        }
    }
}
