//! Representation choice for number and string tokens.

use json_dyn_token::{temporal, TokenCursor};

use crate::error::DecodeError;
use crate::value::DynamicValue;

/// Narrowest exact integer width, else `f64`.
///
/// Floats get no narrowing attempt: an `f32` and an `f64` parsed from the
/// same decimal text can compare unequal.
pub(crate) fn infer_number<C: TokenCursor + ?Sized>(
    cursor: &C,
) -> Result<DynamicValue, DecodeError> {
    match (cursor.try_get_i32(), cursor.try_get_i64()) {
        (Some(narrow), Some(wide)) if i64::from(narrow) == wide => {
            Ok(DynamicValue::Integer32(narrow))
        }
        (_, Some(wide)) => Ok(DynamicValue::Integer64(wide)),
        _ => cursor
            .try_get_f64()
            .map(DynamicValue::Float64)
            .ok_or(DecodeError::NumberOutOfRange {
                offset: cursor.offset(),
            }),
    }
}

/// `true` when `s` reads as an integer or floating-point literal.
pub(crate) fn is_numeral(s: &str) -> bool {
    s.parse::<i64>().is_ok() || s.parse::<f64>().is_ok()
}

/// Numeral-looking strings stay text; otherwise the first temporal grammar
/// that accepts the string wins, in the order date, date-time, offset
/// date-time, duration.
pub(crate) fn infer_text(s: String) -> DynamicValue {
    if is_numeral(&s) {
        return DynamicValue::Text(s);
    }
    let value = if let Some(date) = temporal::parse_date(&s) {
        DynamicValue::DateOnly(date)
    } else if let Some(datetime) = temporal::parse_datetime(&s) {
        DynamicValue::DateTime(datetime)
    } else if let Some(datetime) = temporal::parse_datetime_offset(&s) {
        DynamicValue::DateTimeWithOffset(datetime)
    } else if let Some(duration) = temporal::parse_duration(&s) {
        DynamicValue::Duration(duration)
    } else {
        return DynamicValue::Text(s);
    };
    tracing::trace!(kind = %value.kind(), text = %s, "string inferred as temporal value");
    value
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::ValueKind;

    #[test]
    fn numeral_guard() {
        for s in ["100", "-7", "1.5", "1e5", ".5", "NaN", "inf"] {
            assert!(is_numeral(s), "{s}");
        }
        for s in ["", "1.2.3", "2023-04-09", "12:30", "abc"] {
            assert!(!is_numeral(s), "{s}");
        }
    }

    #[test]
    fn temporal_order_matrix() {
        let cases = [
            ("2023-04-09", ValueKind::DateOnly),
            ("2023-04-09T01:23:45", ValueKind::DateTime),
            ("2023-04-09T01:23:45.123", ValueKind::DateTime),
            ("2023-04-09T01:23:45+01:00", ValueKind::DateTimeWithOffset),
            ("2023-04-09T01:23:45Z", ValueKind::DateTimeWithOffset),
            ("00:02:23.453983", ValueKind::Duration),
            ("1.12:00", ValueKind::Duration),
            ("100", ValueKind::Text),
            ("1.5", ValueKind::Text),
            ("abcd", ValueKind::Text),
            ("2023-13-01", ValueKind::Text),
        ];
        for (input, kind) in cases {
            assert_eq!(infer_text(input.to_string()).kind(), kind, "{input}");
        }
    }
}
