//! Strict integer and rational wire forms.
//!
//! The parsers return `None` on any deviation; each tag family turns that
//! into its own value error.

use crate::value::{Rational, Value};

/// Width and signedness of an integer tag type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntKind {
    Byte,
    SByte,
    Short,
    SShort,
    Long,
    SLong,
}

impl IntKind {
    pub fn range(&self) -> (i64, i64) {
        match self {
            IntKind::Byte => (0, u8::MAX as i64),
            IntKind::SByte => (i8::MIN as i64, i8::MAX as i64),
            IntKind::Short => (0, u16::MAX as i64),
            IntKind::SShort => (i16::MIN as i64, i16::MAX as i64),
            IntKind::Long => (0, u32::MAX as i64),
            IntKind::SLong => (i32::MIN as i64, i32::MAX as i64),
        }
    }

    pub fn contains(&self, value: i64) -> bool {
        let (min, max) = self.range();
        (min..=max).contains(&value)
    }
}

/// An optional `+`/`-` followed by ASCII digits, nothing else.
///
/// No whitespace, grouping, decimal point or exponent is accepted.
pub fn parse_int(text: &str) -> Option<i64> {
    let digits = text.strip_prefix(['+', '-']).unwrap_or(text);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    text.parse().ok()
}

/// [`parse_int`] plus a range check for `kind`.
pub fn parse_int_kind(text: &str, kind: IntKind) -> Option<i64> {
    parse_int(text).filter(|v| kind.contains(*v))
}

/// Text form of an integer value within `kind`'s range.
pub fn format_int(value: &Value, kind: IntKind) -> Option<String> {
    match value {
        Value::Int(i) if kind.contains(*i) => Some(i.to_string()),
        _ => None,
    }
}

/// `N/D` with no whitespace and an unsigned, non-zero denominator.
///
/// For unsigned rationals the numerator must not be negative either.
pub fn parse_rational(text: &str, signed: bool) -> Option<Rational> {
    let (num, den) = text.split_once('/')?;
    let numerator = parse_int(num)?;
    if !den.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let denominator = parse_int(den)?;
    if !signed && numerator < 0 {
        return None;
    }
    Rational::new(numerator, denominator).ok()
}

/// `"N/D"` for a rational value; negative values only when `signed`.
pub fn format_rational(value: &Value, signed: bool) -> Option<String> {
    match value {
        Value::Rational(r) if signed || !r.is_negative() => Some(r.to_string()),
        _ => None,
    }
}
