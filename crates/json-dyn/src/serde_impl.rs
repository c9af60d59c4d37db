//! serde integration: a [`DynamicValue`] can be a field of any derived type.
//!
//! Deserialization applies the same inference as [`ValueDecoder`](crate::ValueDecoder);
//! serialization follows the runtime variant.

use std::fmt;

use json_dyn_token::temporal;
use serde::de::{self, MapAccess, SeqAccess, Visitor};
use serde::ser::{self, SerializeMap, SerializeSeq};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::infer;
use crate::value::{DynamicValue, Mapping};

impl Serialize for DynamicValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            DynamicValue::Null => serializer.serialize_unit(),
            DynamicValue::Bool(b) => serializer.serialize_bool(*b),
            DynamicValue::Integer32(i) => serializer.serialize_i32(*i),
            DynamicValue::Integer64(i) => serializer.serialize_i64(*i),
            DynamicValue::Float64(f) => serializer.serialize_f64(*f),
            DynamicValue::Text(s) => serializer.serialize_str(s),
            DynamicValue::DateOnly(d) => {
                serializer.serialize_str(&temporal::format_date(*d).map_err(format_error::<S>)?)
            }
            DynamicValue::DateTime(dt) => serializer
                .serialize_str(&temporal::format_datetime(*dt).map_err(format_error::<S>)?),
            DynamicValue::DateTimeWithOffset(dt) => serializer
                .serialize_str(&temporal::format_datetime_offset(*dt).map_err(format_error::<S>)?),
            DynamicValue::Duration(d) => serializer.serialize_str(&temporal::format_duration(*d)),
            DynamicValue::List(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            DynamicValue::Mapping(map) => {
                let mut out = serializer.serialize_map(Some(map.len()))?;
                for (key, item) in map {
                    out.serialize_entry(key, item)?;
                }
                out.end()
            }
        }
    }
}

fn format_error<S: Serializer>(err: time::error::Format) -> S::Error {
    <S::Error as ser::Error>::custom(err)
}

struct DynamicValueVisitor;

impl<'de> Visitor<'de> for DynamicValueVisitor {
    type Value = DynamicValue;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("any JSON value")
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<DynamicValue, E> {
        Ok(DynamicValue::Bool(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<DynamicValue, E> {
        Ok(DynamicValue::integer(v))
    }

    /// Beyond `i64::MAX` the numeral is no longer an exact signed integer.
    fn visit_u64<E: de::Error>(self, v: u64) -> Result<DynamicValue, E> {
        Ok(match i64::try_from(v) {
            Ok(signed) => DynamicValue::integer(signed),
            Err(_) => DynamicValue::Float64(v as f64),
        })
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<DynamicValue, E> {
        Ok(DynamicValue::Float64(v))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<DynamicValue, E> {
        Ok(infer::infer_text(v.to_string()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<DynamicValue, E> {
        Ok(infer::infer_text(v))
    }

    fn visit_unit<E: de::Error>(self) -> Result<DynamicValue, E> {
        Ok(DynamicValue::Null)
    }

    fn visit_none<E: de::Error>(self) -> Result<DynamicValue, E> {
        Ok(DynamicValue::Null)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<DynamicValue, D::Error> {
        DynamicValue::deserialize(deserializer)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<DynamicValue, A::Error> {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0).min(4096));
        while let Some(item) = seq.next_element()? {
            items.push(item);
        }
        Ok(DynamicValue::List(items))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<DynamicValue, A::Error> {
        let mut map = Mapping::new();
        while let Some((key, value)) = access.next_entry::<String, DynamicValue>()? {
            map.insert(key, value);
        }
        Ok(DynamicValue::Mapping(map))
    }
}

impl<'de> Deserialize<'de> for DynamicValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(DynamicValueVisitor)
    }
}
