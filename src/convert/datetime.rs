//! The three date/time conventions of the tag families.
//!
//! - EXIF: `YYYY:MM:DD HH:MM:SS`, no offset
//! - IPTC: `YYYY-MM-DD` dates and `HH:MM:SS±HH:MM` times
//! - XMP: ISO 8601 with optional precision down to microseconds
//!
//! Parsers return `None` on malformed input; each family decides what that
//! means (EXIF keeps the original text, IPTC and XMP fail). Formatters fail
//! with a [`TypeError`] when handed something that is not a date or time.

use chrono::{Datelike, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Timelike};
use lazy_static::lazy_static;
use regex::Regex;

use crate::error::TypeError;
use crate::value::datetime::fixed_offset;
use crate::value::{DateTimeValue, TimeValue, Value};

lazy_static! {
    static ref IPTC_DATE_RE: Regex = Regex::new(r"\A(\d{4})-(\d{2})-(\d{2})\z").unwrap();
    static ref IPTC_TIME_RE: Regex =
        Regex::new(r"\A(\d{2}):(\d{2}):(\d{2})([+-])(\d{2}):(\d{2})\z").unwrap();
    static ref XMP_DATE_RE: Regex = Regex::new(
        r"(?x)\A
            (?P<year> \d{4} )
            (?: - (?P<month> \d{2} )
                (?: - (?P<day> \d{2} )
                    (?: T
                        (?P<hours> \d{2} ) : (?P<minutes> \d{2} )
                        (?: : (?P<seconds> \d{2} ) (?: \. (?P<decimal> \d+ ) )? )?
                        (?P<tzd> Z | (?P<sign> [+-] ) (?P<ohours> \d{2} ) : (?P<ominutes> \d{2} ) )?
                    )?
                )?
            )?
        \z"
    )
    .unwrap();
}

const EXIF_DATETIME_FORMATS: &[&str] = &[
    "%Y:%m:%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%SZ",
];

/// `±HH:MM` for a signed duration, truncated to whole minutes.
///
/// The sign is always written, `+00:00` included.
pub fn offset_to_string(delta: TimeDelta) -> String {
    let seconds = delta.num_seconds();
    let sign = if seconds < 0 { '-' } else { '+' };
    let minutes = seconds.unsigned_abs() / 60;
    format!("{sign}{:02}:{:02}", minutes / 60, minutes % 60)
}

fn fixed_offset_to_string(offset: FixedOffset) -> String {
    offset_to_string(TimeDelta::seconds(offset.local_minus_utc() as i64))
}

fn format_date_with(date: NaiveDate, sep: char) -> String {
    format!(
        "{:04}{sep}{:02}{sep}{:02}",
        date.year(),
        date.month(),
        date.day()
    )
}

fn format_hms(time: NaiveTime) -> String {
    format!(
        "{:02}:{:02}:{:02}",
        time.hour(),
        time.minute(),
        time.second()
    )
}

// ── EXIF ─────────────────────────────────────────────────────────────

/// Parse an EXIF timestamp into a naive datetime.
///
/// Second 60 is rejected: chrono reads it as a leap second, EXIF has none.
pub fn exif_parse_datetime(text: &str) -> Option<NaiveDateTime> {
    EXIF_DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
        .filter(|dt| dt.nanosecond() < 1_000_000_000)
}

/// Parse an EXIF datestamp (`YYYY:MM:DD`).
pub fn exif_parse_date(text: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(text, "%Y:%m:%d").ok()
}

/// `YYYY:MM:DD HH:MM:SS` for a datetime, `YYYY:MM:DD` for a date.
///
/// Offsets and sub-second digits are dropped, not converted or rounded.
pub fn format_exif(value: &Value) -> Result<String, TypeError> {
    match value {
        Value::Date(date) => Ok(format_date_with(*date, ':')),
        Value::DateTime(dt) => Ok(format!(
            "{} {}",
            format_date_with(dt.date(), ':'),
            format_hms(dt.time())
        )),
        other => Err(TypeError::new("a date or a datetime", other.kind())),
    }
}

// ── IPTC ─────────────────────────────────────────────────────────────

/// Parse exactly `YYYY-MM-DD`.
pub fn iptc_parse_date(text: &str) -> Option<NaiveDate> {
    let caps = IPTC_DATE_RE.captures(text)?;
    NaiveDate::from_ymd_opt(
        caps[1].parse().ok()?,
        caps[2].parse().ok()?,
        caps[3].parse().ok()?,
    )
}

/// Parse exactly `HH:MM:SS±HH:MM`; the offset is mandatory.
pub fn iptc_parse_time(text: &str) -> Option<TimeValue> {
    let caps = IPTC_TIME_RE.captures(text)?;
    let time = NaiveTime::from_hms_opt(
        caps[1].parse().ok()?,
        caps[2].parse().ok()?,
        caps[3].parse().ok()?,
    )?;
    let ominutes: u32 = caps[6].parse().ok()?;
    if ominutes > 59 {
        return None;
    }
    let offset = fixed_offset(&caps[4] == "-", caps[5].parse().ok()?, ominutes)?;
    Some(TimeValue::with_offset(time, offset))
}

/// `YYYY-MM-DD`; a datetime loses its time of day.
pub fn format_iptc_date(value: &Value) -> Result<String, TypeError> {
    match value {
        Value::Date(date) => Ok(format_date_with(*date, '-')),
        Value::DateTime(dt) => Ok(format_date_with(dt.date(), '-')),
        other => Err(TypeError::new("a date or a datetime", other.kind())),
    }
}

/// `HH:MM:SS±HH:MM`, with `+00:00` for naive values.
pub fn format_iptc_time(value: &Value) -> Result<String, TypeError> {
    let time = match value {
        Value::Time(time) => *time,
        Value::DateTime(dt) => dt.to_time(),
        other => return Err(TypeError::new("a time or a datetime", other.kind())),
    };
    let offset = time
        .offset()
        .map(fixed_offset_to_string)
        .unwrap_or_else(|| "+00:00".to_string());
    Ok(format!("{}{offset}", format_hms(time.time())))
}

// ── XMP ──────────────────────────────────────────────────────────────

/// Parse an XMP date: a [`Value::Date`] when no time is given, otherwise a
/// [`Value::DateTime`] (naive when the time carries no zone designator).
pub fn xmp_parse(text: &str) -> Option<Value> {
    let caps = XMP_DATE_RE.captures(text)?;
    let number = |name: &str| -> Option<Option<u32>> {
        match caps.name(name) {
            Some(m) => m.as_str().parse().ok().map(Some),
            None => Some(None),
        }
    };
    let year: i32 = caps["year"].parse().ok()?;
    let month = number("month")?.unwrap_or(1);
    let day = number("day")?.unwrap_or(1);
    let date = NaiveDate::from_ymd_opt(year, month, day)?;

    let Some(hours) = number("hours")? else {
        return Some(Value::Date(date));
    };
    let minutes = number("minutes")?.unwrap_or(0);
    let seconds = number("seconds")?.unwrap_or(0);
    let micros = match caps.name("decimal") {
        Some(decimal) => {
            let digits = &decimal.as_str()[..decimal.as_str().len().min(6)];
            format!("{digits:0<6}").parse().ok()?
        }
        None => 0,
    };
    let datetime = date.and_hms_micro_opt(hours, minutes, seconds, micros)?;

    let value = match caps.name("tzd").map(|m| m.as_str()) {
        None => DateTimeValue::naive(datetime),
        Some("Z") => DateTimeValue::utc(datetime),
        Some(_) => {
            let ominutes = number("ominutes")?.unwrap_or(0);
            if ominutes > 59 {
                return None;
            }
            let ohours = number("ohours")?.unwrap_or(0);
            let offset = fixed_offset(&caps["sign"] == "-", ohours, ominutes)?;
            DateTimeValue::with_offset(datetime, offset)
        }
    };
    Some(Value::DateTime(value))
}

/// The most precise XMP form the value's populated fields call for.
///
/// A datetime at exactly midnight is written as a bare date. Microseconds are
/// written zero-padded to six digits when non-zero. Naive and zero-offset
/// values get `Z`.
pub fn format_xmp(value: &Value) -> Result<String, TypeError> {
    let dt = match value {
        Value::Date(date) => return Ok(format_date_with(*date, '-')),
        Value::DateTime(dt) => dt,
        other => return Err(TypeError::new("a date or a datetime", other.kind())),
    };
    let date = format_date_with(dt.date(), '-');
    let time = dt.time();
    let micros = dt.microsecond();
    if time.hour() == 0 && time.minute() == 0 && time.second() == 0 && micros == 0 {
        return Ok(date);
    }

    let tzd = match dt.offset() {
        Some(offset) if offset.local_minus_utc() != 0 => fixed_offset_to_string(offset),
        _ => "Z".to_string(),
    };
    let clock = if time.second() == 0 && micros == 0 {
        format!("{:02}:{:02}", time.hour(), time.minute())
    } else if micros == 0 {
        format_hms(time)
    } else {
        format!("{}.{micros:06}", format_hms(time))
    };
    Ok(format!("{date}T{clock}{tzd}"))
}
