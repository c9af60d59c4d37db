//! String grammars for temporal values.
//!
//! | Kind | Grammar | Example |
//! |---|---|---|
//! | date | `YYYY-MM-DD` | `2023-04-09` |
//! | date-time | `YYYY-MM-DDThh:mm:ss[.f{1,9}]` | `2023-04-09T01:23:45` |
//! | offset date-time | RFC 3339 | `2023-04-09T01:23:45+01:00` |
//! | duration | `[-][d.]h{1,2}:mm[:ss[.f{1,9}]]` | `1.02:03:04.5` |
//!
//! Every `format_*` function produces text its `parse_*` counterpart accepts.

use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{Date, Duration, OffsetDateTime, PrimitiveDateTime};

const SECONDS_PER_DAY: i64 = 86_400;

pub fn parse_date(s: &str) -> Option<Date> {
    Date::parse(s, format_description!("[year]-[month]-[day]")).ok()
}

pub fn parse_datetime(s: &str) -> Option<PrimitiveDateTime> {
    PrimitiveDateTime::parse(
        s,
        format_description!(
            "[year]-[month]-[day]T[hour]:[minute]:[second][optional [.[subsecond]]]"
        ),
    )
    .ok()
}

pub fn parse_datetime_offset(s: &str) -> Option<OffsetDateTime> {
    OffsetDateTime::parse(s, &Rfc3339).ok()
}

/// Parses a clock-style duration such as `00:02:23.453983` or `-3.04:05`.
pub fn parse_duration(s: &str) -> Option<Duration> {
    let (negative, rest) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s),
    };
    let mut parts = rest.split(':');
    let head = parts.next()?;
    let minutes = parts.next()?;
    let seconds = parts.next();
    if parts.next().is_some() {
        return None;
    }

    let (days, hours) = match head.split_once('.') {
        Some((days, hours)) => (digits(days, 15)?, hours),
        None => (0, head),
    };
    let hours = digits(hours, 2).filter(|h| *h < 24)?;
    let minutes = digits(minutes, 2).filter(|m| *m < 60)?;
    let (seconds, nanos) = match seconds {
        Some(field) => {
            let (whole, fraction) = match field.split_once('.') {
                Some((whole, fraction)) => (whole, Some(fraction)),
                None => (field, None),
            };
            let whole = digits(whole, 2).filter(|s| *s < 60)?;
            let nanos = match fraction {
                Some(fraction) => fraction_nanos(fraction)?,
                None => 0,
            };
            (whole, nanos)
        }
        None => (0, 0),
    };

    let total = days
        .checked_mul(SECONDS_PER_DAY)?
        .checked_add(hours * 3_600 + minutes * 60 + seconds)?;
    let duration = Duration::new(total, nanos);
    Some(if negative { -duration } else { duration })
}

pub fn format_date(date: Date) -> Result<String, time::error::Format> {
    date.format(format_description!("[year]-[month]-[day]"))
}

pub fn format_datetime(datetime: PrimitiveDateTime) -> Result<String, time::error::Format> {
    if datetime.nanosecond() == 0 {
        datetime.format(format_description!(
            "[year]-[month]-[day]T[hour]:[minute]:[second]"
        ))
    } else {
        datetime.format(format_description!(
            "[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond]"
        ))
    }
}

pub fn format_datetime_offset(datetime: OffsetDateTime) -> Result<String, time::error::Format> {
    datetime.format(&Rfc3339)
}

pub fn format_duration(duration: Duration) -> String {
    let mut out = String::new();
    if duration.is_negative() {
        out.push('-');
    }
    let duration = duration.abs();
    let total = duration.whole_seconds();
    let days = total / SECONDS_PER_DAY;
    if days > 0 {
        out.push_str(&format!("{days}."));
    }
    out.push_str(&format!(
        "{:02}:{:02}:{:02}",
        total / 3_600 % 24,
        total / 60 % 60,
        total % 60
    ));
    let nanos = duration.subsec_nanoseconds();
    if nanos != 0 {
        let fraction = format!("{nanos:09}");
        out.push('.');
        out.push_str(fraction.trim_end_matches('0'));
    }
    out
}

/// 1 to `max_len` ASCII digits.
fn digits(s: &str, max_len: usize) -> Option<i64> {
    if s.is_empty() || s.len() > max_len || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

/// 1 to 9 fractional digits, scaled to nanoseconds.
fn fraction_nanos(s: &str) -> Option<i32> {
    if s.is_empty() || s.len() > 9 || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let value: i32 = s.parse().ok()?;
    Some(value * 10_i32.pow(9 - s.len() as u32))
}
