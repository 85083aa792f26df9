//! Host-side values produced and consumed by the tag converters.
//!
//! [`Value`] is the dynamic value a tag decodes to or is assigned from. The
//! structured members live in their own modules:
//!
//! - [`rational`]: numerator/denominator pairs
//! - [`datetime`]: datetimes and times with an optional fixed offset
//! - [`gps`]: degrees/minutes/seconds coordinates
//! - [`notifying`]: the observable list used by multi-valued tags

pub mod datetime;
pub mod gps;
pub mod notifying;
pub mod rational;

use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;
use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};

pub use datetime::{DateTimeValue, TimeValue};
pub use gps::GpsCoordinate;
pub use notifying::{Listener, NotifyingList};
pub use rational::Rational;

/// A structured tag value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    None,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Rational(Rational),
    Date(NaiveDate),
    DateTime(DateTimeValue),
    Time(TimeValue),
    Gps(GpsCoordinate),
    /// `type/subtype`
    MimeType(String, String),
    List(Vec<Value>),
    /// Language tag → text, typically keyed `x-default`.
    LangAlt(BTreeMap<String, String>),
}

impl Value {
    /// Short name of the variant, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::None => "none",
            Value::Bool(_) => "boolean",
            Value::Int(_) => "integer",
            Value::Float(_) => "float",
            Value::Str(_) => "string",
            Value::Rational(_) => "rational",
            Value::Date(_) => "date",
            Value::DateTime(_) => "datetime",
            Value::Time(_) => "time",
            Value::Gps(_) => "GPS coordinate",
            Value::MimeType(..) => "MIME type",
            Value::List(_) => "list",
            Value::LangAlt(_) => "lang alt",
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    /// `{"x-default": text}`
    pub fn lang_alt_default(text: impl Into<String>) -> Self {
        Value::LangAlt(BTreeMap::from([("x-default".to_string(), text.into())]))
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v as i64)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Str(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Str(v)
    }
}

impl From<Rational> for Value {
    fn from(v: Rational) -> Self {
        Value::Rational(v)
    }
}

impl From<NaiveDate> for Value {
    fn from(v: NaiveDate) -> Self {
        Value::Date(v)
    }
}

impl From<DateTimeValue> for Value {
    fn from(v: DateTimeValue) -> Self {
        Value::DateTime(v)
    }
}

impl From<TimeValue> for Value {
    fn from(v: TimeValue) -> Self {
        Value::Time(v)
    }
}

impl From<GpsCoordinate> for Value {
    fn from(v: GpsCoordinate) -> Self {
        Value::Gps(v)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Self {
        Value::List(v.into_iter().map(Into::into).collect())
    }
}

impl From<BTreeMap<String, String>> for Value {
    fn from(v: BTreeMap<String, String>) -> Self {
        Value::LangAlt(v)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::None => write!(f, "None"),
            Value::Bool(b) => write!(f, "{}", if *b { "True" } else { "False" }),
            Value::Int(i) => write!(f, "{i}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::Str(s) => write!(f, "{s:?}"),
            Value::Rational(r) => write!(f, "{r}"),
            Value::Date(d) => write!(f, "{d}"),
            Value::DateTime(dt) => match dt.offset() {
                Some(offset) => write!(f, "{} {offset}", dt.datetime()),
                None => write!(f, "{}", dt.datetime()),
            },
            Value::Time(t) => match t.offset() {
                Some(offset) => write!(f, "{} {offset}", t.time()),
                None => write!(f, "{}", t.time()),
            },
            Value::Gps(g) => write!(f, "{g}"),
            Value::MimeType(t, s) => write!(f, "{t}/{s}"),
            Value::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
            Value::LangAlt(map) => {
                write!(f, "{{")?;
                for (i, (lang, text)) in map.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{lang}: {text:?}")?;
                }
                write!(f, "}}")
            }
        }
    }
}

/// JSON-friendly rendering: temporal values as ISO-8601 strings, rationals
/// and GPS coordinates in their text form.
impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::None => serializer.serialize_none(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Int(i) => serializer.serialize_i64(*i),
            Value::Float(x) => serializer.serialize_f64(*x),
            Value::Str(s) => serializer.serialize_str(s),
            Value::Rational(r) => serializer.collect_str(r),
            Value::Date(d) => serializer.collect_str(&d.format("%Y-%m-%d")),
            Value::DateTime(dt) => {
                let local = dt.datetime().format("%Y-%m-%dT%H:%M:%S%.f");
                let text = match dt.offset() {
                    Some(offset) => format!("{local}{offset}"),
                    None => local.to_string(),
                };
                serializer.serialize_str(&text)
            }
            Value::Time(t) => {
                let text = match t.offset() {
                    Some(offset) => format!("{}{offset}", t.time().format("%H:%M:%S%.f")),
                    None => t.time().format("%H:%M:%S%.f").to_string(),
                };
                serializer.serialize_str(&text)
            }
            Value::Gps(g) => serializer.collect_str(g),
            Value::MimeType(t, s) => serializer.serialize_str(&format!("{t}/{s}")),
            Value::List(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Value::LangAlt(entries) => {
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (lang, text) in entries {
                    map.serialize_entry(lang, text)?;
                }
                map.end()
            }
        }
    }
}
