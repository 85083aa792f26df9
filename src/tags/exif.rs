//! EXIF tags.

use std::fmt;
use std::str::FromStr;

use crate::convert::datetime::{exif_parse_date, exif_parse_datetime, format_exif};
use crate::convert::numeric::{IntKind, format_int, format_rational, parse_int_kind, parse_rational};
use crate::convert::undefined::{string_to_undefined, undefined_to_string};
use crate::error::{ExifValueError, TagError, TagResult};
use crate::tags::{Cached, Family, TagKey, catalog};
use crate::value::{DateTimeValue, Value};

/// Declared type of an EXIF tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExifType {
    Byte,
    SByte,
    Short,
    SShort,
    Long,
    SLong,
    Rational,
    SRational,
    Ascii,
    Comment,
    Undefined,
}

impl ExifType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExifType::Byte => "Byte",
            ExifType::SByte => "SByte",
            ExifType::Short => "Short",
            ExifType::SShort => "SShort",
            ExifType::Long => "Long",
            ExifType::SLong => "SLong",
            ExifType::Rational => "Rational",
            ExifType::SRational => "SRational",
            ExifType::Ascii => "Ascii",
            ExifType::Comment => "Comment",
            ExifType::Undefined => "Undefined",
        }
    }

    fn int_kind(&self) -> Option<IntKind> {
        match self {
            ExifType::Byte => Some(IntKind::Byte),
            ExifType::SByte => Some(IntKind::SByte),
            ExifType::Short => Some(IntKind::Short),
            ExifType::SShort => Some(IntKind::SShort),
            ExifType::Long => Some(IntKind::Long),
            ExifType::SLong => Some(IntKind::SLong),
            _ => None,
        }
    }
}

impl fmt::Display for ExifType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExifType {
    type Err = TagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "Byte" => ExifType::Byte,
            "SByte" => ExifType::SByte,
            "Short" => ExifType::Short,
            "SShort" => ExifType::SShort,
            "Long" => ExifType::Long,
            "SLong" => ExifType::SLong,
            "Rational" => ExifType::Rational,
            "SRational" => ExifType::SRational,
            "Ascii" => ExifType::Ascii,
            "Comment" => ExifType::Comment,
            "Undefined" => ExifType::Undefined,
            other => {
                return Err(TagError::UnknownType {
                    family: "EXIF",
                    type_name: other.to_string(),
                });
            }
        })
    }
}

/// How an `Ascii` tag treats dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateRule {
    None,
    /// `YYYY:MM:DD HH:MM:SS` (`DateTime`, `DateTimeOriginal`, ...)
    Timestamp,
    /// `YYYY:MM:DD` (`GPSDateStamp`)
    Datestamp,
}

impl DateRule {
    fn for_name(name: &str) -> Self {
        if name.starts_with("DateTime") {
            DateRule::Timestamp
        } else if name.ends_with("DateStamp") {
            DateRule::Datestamp
        } else {
            DateRule::None
        }
    }
}

/// Result of encoding a value for an EXIF tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Encoded {
    Raw(String),
    /// The comment's declared charset cannot represent its text.
    Unencodable,
}

/// Split a comment into its `charset=...` marker name (unquoted) and text.
///
/// A quoted name ends at its closing quote and may contain spaces; an
/// unquoted one ends at the first space.
fn split_comment_marker(raw: &str) -> Option<(&str, &str)> {
    let marker = raw.strip_prefix("charset=")?;
    let (name, rest) = match marker.strip_prefix('"') {
        Some(quoted) => quoted.split_once('"').unwrap_or((quoted, "")),
        None => marker.split_once(' ').unwrap_or((marker, "")),
    };
    Some((name, rest.strip_prefix(' ').unwrap_or(rest)))
}

/// Leading `charset=...` marker of a comment, unquoted.
pub fn comment_charset(raw: &str) -> Option<&str> {
    split_comment_marker(raw).map(|(name, _)| name)
}

fn strip_comment_marker(raw: &str) -> &str {
    split_comment_marker(raw).map_or(raw, |(_, text)| text)
}

/// Raw ↔ host conversion for one EXIF type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExifConverter {
    exif_type: ExifType,
    date_rule: DateRule,
}

impl ExifConverter {
    pub fn new(exif_type: ExifType) -> Self {
        Self {
            exif_type,
            date_rule: DateRule::None,
        }
    }

    /// A converter that also applies the date conventions implied by the
    /// tag name.
    pub fn for_key(key: &TagKey, exif_type: ExifType) -> Self {
        let date_rule = match exif_type {
            ExifType::Ascii => DateRule::for_name(key.name()),
            _ => DateRule::None,
        };
        Self {
            exif_type,
            date_rule,
        }
    }

    pub fn exif_type(&self) -> ExifType {
        self.exif_type
    }

    pub fn date_rule(&self) -> DateRule {
        self.date_rule
    }

    fn error(&self, value: impl ToString) -> ExifValueError {
        ExifValueError::new(value, self.exif_type)
    }

    /// Decode raw text into a host value.
    pub fn decode(&self, raw: &str) -> Result<Value, ExifValueError> {
        match self.exif_type {
            ExifType::Ascii => Ok(self.decode_ascii(raw)),
            ExifType::Comment => Ok(Value::Str(strip_comment_marker(raw).to_string())),
            ExifType::Byte | ExifType::SByte => Ok(Value::Str(raw.to_string())),
            ExifType::Undefined => undefined_to_string(raw)
                .map(Value::Str)
                .ok_or_else(|| self.error(raw)),
            ExifType::Rational | ExifType::SRational => {
                let signed = self.exif_type == ExifType::SRational;
                self.decode_components(raw, |c| parse_rational(c, signed).map(Value::Rational))
            }
            other => {
                let kind = other.int_kind().ok_or_else(|| self.error(raw))?;
                self.decode_components(raw, |c| parse_int_kind(c, kind).map(Value::Int))
            }
        }
    }

    fn decode_ascii(&self, raw: &str) -> Value {
        let parsed = match self.date_rule {
            DateRule::None => return Value::Str(raw.to_string()),
            DateRule::Timestamp => {
                exif_parse_datetime(raw).map(|dt| Value::DateTime(DateTimeValue::naive(dt)))
            }
            DateRule::Datestamp => exif_parse_date(raw).map(Value::Date),
        };
        parsed.unwrap_or_else(|| {
            log::debug!("Keeping unparseable EXIF date {raw:?} as text");
            Value::Str(raw.to_string())
        })
    }

    /// One component decodes to a scalar, several to a list.
    fn decode_components<F>(&self, raw: &str, parse: F) -> Result<Value, ExifValueError>
    where
        F: Fn(&str) -> Option<Value>,
    {
        let mut values = raw
            .split(' ')
            .map(|c| parse(c).ok_or_else(|| self.error(raw)))
            .collect::<Result<Vec<_>, _>>()?;
        if values.len() == 1 {
            Ok(values.remove(0))
        } else {
            Ok(Value::List(values))
        }
    }

    /// Encode a host value into raw text.
    pub fn encode(&self, value: &Value) -> Result<Encoded, ExifValueError> {
        match self.exif_type {
            ExifType::Ascii => self.encode_ascii(value).map(Encoded::Raw),
            ExifType::Comment => self.encode_comment(value),
            ExifType::Byte | ExifType::SByte => match value {
                Value::Str(s) => Ok(Encoded::Raw(s.clone())),
                other => Err(self.error(other)),
            },
            ExifType::Undefined => match value {
                Value::Str(s) => string_to_undefined(s)
                    .map(Encoded::Raw)
                    .ok_or_else(|| self.error(s)),
                other => Err(self.error(other)),
            },
            ExifType::Rational | ExifType::SRational => {
                let signed = self.exif_type == ExifType::SRational;
                self.encode_components(value, |v| format_rational(v, signed))
            }
            other => {
                let kind = other.int_kind().ok_or_else(|| self.error(value))?;
                self.encode_components(value, |v| format_int(v, kind))
            }
        }
    }

    fn encode_ascii(&self, value: &Value) -> Result<String, ExifValueError> {
        let formatted = match (value, self.date_rule) {
            (Value::Str(s), _) => return Ok(s.clone()),
            (Value::Date(date), DateRule::Timestamp) => {
                let midnight = date.and_hms_opt(0, 0, 0).ok_or_else(|| self.error(value))?;
                format_exif(&Value::DateTime(DateTimeValue::naive(midnight)))
            }
            (Value::DateTime(dt), DateRule::Datestamp) => format_exif(&Value::Date(dt.date())),
            (Value::Date(_) | Value::DateTime(_), _) => format_exif(value),
            (other, _) => return Err(self.error(other)),
        };
        formatted.map_err(|_| self.error(value))
    }

    fn encode_comment(&self, value: &Value) -> Result<Encoded, ExifValueError> {
        let Value::Str(text) = value else {
            return Err(self.error(value));
        };
        let narrow = matches!(comment_charset(text), Some("Ascii" | "Jis"));
        if narrow && !strip_comment_marker(text).is_ascii() {
            return Ok(Encoded::Unencodable);
        }
        Ok(Encoded::Raw(text.clone()))
    }

    fn encode_components<F>(&self, value: &Value, format: F) -> Result<Encoded, ExifValueError>
    where
        F: Fn(&Value) -> Option<String>,
    {
        let text = match value {
            Value::List(items) if !items.is_empty() => items
                .iter()
                .map(|v| format(v).ok_or_else(|| self.error(v)))
                .collect::<Result<Vec<_>, _>>()?
                .join(" "),
            other => format(other).ok_or_else(|| self.error(other))?,
        };
        Ok(Encoded::Raw(text))
    }

    /// Check raw text against the engine's text form of the type.
    pub fn validate_raw(&self, raw: &str) -> Result<(), ExifValueError> {
        if raw.is_empty() {
            return Ok(());
        }
        let ok = match self.exif_type {
            ExifType::Ascii | ExifType::Comment => true,
            ExifType::Undefined => undefined_to_string(raw).is_some(),
            ExifType::Rational | ExifType::SRational => {
                let signed = self.exif_type == ExifType::SRational;
                raw.split(' ').all(|c| parse_rational(c, signed).is_some())
            }
            other => match other.int_kind() {
                Some(kind) => raw.split(' ').all(|c| parse_int_kind(c, kind).is_some()),
                None => false,
            },
        };
        if ok { Ok(()) } else { Err(self.error(raw)) }
    }
}

/// An EXIF tag: key, declared type, raw text and decoded value.
#[derive(Debug, Clone)]
pub struct ExifTag {
    key: TagKey,
    converter: ExifConverter,
    /// `false` for maker-note tags whose type has not been read from an image.
    type_known: bool,
    raw: String,
    value: Cached<Value>,
}

impl ExifTag {
    /// An empty tag, typed from the catalog.
    ///
    /// Unknown maker-note keys get a provisional `Undefined` type and cannot be
    /// decoded until loaded with [`ExifTag::from_record`].
    pub fn new(key: &str) -> TagResult<Self> {
        let key = Self::parse_key(key)?;
        let full = key.to_string();
        let (exif_type, type_known) = match catalog::exif_type_name(&full) {
            Some(name) => (name.parse()?, true),
            None if catalog::is_maker_note_group(key.group()) => {
                log::debug!("No catalog type for maker-note tag {full}, assuming Undefined");
                (ExifType::Undefined, false)
            }
            None => return Err(TagError::UnknownKey(full)),
        };
        let converter = ExifConverter::for_key(&key, exif_type);
        Ok(Self {
            key,
            converter,
            type_known,
            raw: String::new(),
            value: Cached::Absent,
        })
    }

    /// A tag built from a host value.
    pub fn with_value(key: &str, value: impl Into<Value>) -> TagResult<Self> {
        let mut tag = Self::new(key)?;
        tag.set_value(value.into())?;
        Ok(tag)
    }

    /// A tag as read from an image, with the type the engine declared.
    pub fn from_record(key: &str, declared_type: &str, raw: impl Into<String>) -> TagResult<Self> {
        let key = Self::parse_key(key)?;
        let exif_type: ExifType = declared_type.parse()?;
        let converter = ExifConverter::for_key(&key, exif_type);
        Ok(Self {
            key,
            converter,
            type_known: true,
            raw: raw.into(),
            value: Cached::Absent,
        })
    }

    fn parse_key(key: &str) -> TagResult<TagKey> {
        let key = TagKey::parse(key)?;
        if key.family() != Family::Exif {
            return Err(TagError::UnknownKey(key.to_string()));
        }
        Ok(key)
    }

    pub fn key(&self) -> &TagKey {
        &self.key
    }

    pub fn exif_type(&self) -> ExifType {
        self.converter.exif_type()
    }

    pub fn type_name(&self) -> &'static str {
        self.converter.exif_type().as_str()
    }

    pub fn raw_value(&self) -> &str {
        &self.raw
    }

    /// Replace the raw text; the decoded value is dropped.
    pub fn set_raw_value(&mut self, raw: impl Into<String>) -> TagResult<()> {
        let raw = raw.into();
        if self.type_known {
            self.converter.validate_raw(&raw)?;
        }
        self.raw = raw;
        self.value = Cached::Absent;
        Ok(())
    }

    /// The decoded value, decoding the raw text on first access.
    pub fn value(&mut self) -> TagResult<&Value> {
        if !self.type_known {
            return Err(TagError::TypeNotKnown {
                key: self.key.to_string(),
            });
        }
        if !self.value.is_present() {
            self.value = Cached::Present(self.converter.decode(&self.raw)?);
        }
        match &self.value {
            Cached::Present(value) => Ok(value),
            Cached::Absent => Err(TagError::TypeNotKnown {
                key: self.key.to_string(),
            }),
        }
    }

    /// Assign a host value, re-encoding the raw text.
    ///
    /// On failure the tag keeps its previous raw and decoded values.
    pub fn set_value(&mut self, value: Value) -> TagResult<()> {
        if !self.type_known {
            return Err(TagError::TypeNotKnown {
                key: self.key.to_string(),
            });
        }
        match self.converter.encode(&value)? {
            Encoded::Raw(raw) => {
                self.raw = raw;
                self.value = Cached::Present(value);
                Ok(())
            }
            Encoded::Unencodable => {
                let charset = value
                    .as_str()
                    .and_then(comment_charset)
                    .unwrap_or_default()
                    .to_string();
                log::warn!(
                    "Comment for {} cannot be encoded as {charset}, tag left unchanged",
                    self.key
                );
                Err(TagError::Unencodable {
                    key: self.key.to_string(),
                    charset,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::value::Rational;

    fn converter(key: &str, ty: ExifType) -> ExifConverter {
        ExifConverter::for_key(&TagKey::parse(key).unwrap(), ty)
    }

    fn raw(text: &str) -> Encoded {
        Encoded::Raw(text.to_string())
    }

    // ── Ascii ────────────────────────────────────────────────────────

    #[test]
    fn ascii() {
        let c = converter("Exif.Image.Copyright", ExifType::Ascii);
        assert_eq!(c.decode("Some text.").unwrap(), Value::from("Some text."));
        assert_eq!(
            c.encode(&Value::from("Some text.")).unwrap(),
            raw("Some text.")
        );
        assert!(c.encode(&Value::Int(3)).is_err());
        assert!(c.encode(&Value::None).is_err());
    }

    #[test]
    fn ascii_timestamp() {
        let c = converter("Exif.Image.DateTime", ExifType::Ascii);
        assert_eq!(c.date_rule(), DateRule::Timestamp);
        let dt = NaiveDate::from_ymd_opt(2009, 3, 1)
            .unwrap()
            .and_hms_opt(12, 46, 51)
            .unwrap();
        let expected = Value::DateTime(DateTimeValue::naive(dt));
        assert_eq!(c.decode("2009:03:01 12:46:51").unwrap(), expected);
        assert_eq!(c.decode("2009-03-01 12:46:51").unwrap(), expected);
        assert_eq!(c.decode("2009-03-01T12:46:51Z").unwrap(), expected);
        assert_eq!(c.decode("2009-12-01").unwrap(), Value::from("2009-12-01"));
        assert_eq!(c.decode("invalid").unwrap(), Value::from("invalid"));

        assert_eq!(c.encode(&expected).unwrap(), raw("2009:03:01 12:46:51"));
        let date = NaiveDate::from_ymd_opt(2009, 3, 1).unwrap();
        assert_eq!(
            c.encode(&Value::Date(date)).unwrap(),
            raw("2009:03:01 00:00:00")
        );
    }

    #[test]
    fn timestamp_with_second_60_stays_text() {
        let mut tag = ExifTag::from_record(
            "Exif.Photo.DateTimeOriginal",
            "Ascii",
            "2009:03:01 12:46:60",
        )
        .unwrap();
        assert_eq!(tag.value().unwrap(), &Value::from("2009:03:01 12:46:60"));
    }

    #[test]
    fn ascii_datestamp() {
        let c = converter("Exif.GPSInfo.GPSDateStamp", ExifType::Ascii);
        assert_eq!(c.date_rule(), DateRule::Datestamp);
        let date = NaiveDate::from_ymd_opt(2009, 8, 4).unwrap();
        assert_eq!(c.decode("2009:08:04").unwrap(), Value::Date(date));
        assert_eq!(c.decode("2009-08-04").unwrap(), Value::from("2009-08-04"));
        assert_eq!(c.encode(&Value::Date(date)).unwrap(), raw("2009:08:04"));
        let dt = date.and_hms_opt(18, 0, 0).unwrap();
        assert_eq!(
            c.encode(&Value::DateTime(DateTimeValue::naive(dt)))
                .unwrap(),
            raw("2009:08:04")
        );
    }

    #[test]
    fn date_rule_only_for_ascii() {
        for (key, ty, rule) in [
            ("Exif.Image.DateTime", ExifType::Undefined, DateRule::None),
            ("Exif.Photo.DateTimeOriginal", ExifType::Ascii, DateRule::Timestamp),
            ("Exif.Image.Copyright", ExifType::Ascii, DateRule::None),
        ] {
            assert_eq!(converter(key, ty).date_rule(), rule, "{key}");
        }
    }

    // ── Comment ──────────────────────────────────────────────────────

    #[test]
    fn comment_decode_strips_marker() {
        let c = converter("Exif.Photo.UserComment", ExifType::Comment);
        for marker in ["Ascii", "Unicode", "Jis", "Undefined", "InvalidCharsetId"] {
            let text = format!("charset=\"{marker}\" déjà vu");
            assert_eq!(c.decode(&text).unwrap(), Value::from("déjà vu"), "{marker}");
        }
        assert_eq!(c.decode("déjà vu").unwrap(), Value::from("déjà vu"));
        assert_eq!(c.decode("charset=Ascii").unwrap(), Value::from(""));
    }

    #[test]
    fn comment_encode() {
        let c = converter("Exif.Photo.UserComment", ExifType::Comment);
        assert_eq!(c.encode(&Value::from("déjà vu")).unwrap(), raw("déjà vu"));
        let ascii = "charset=\"Ascii\" deja vu";
        assert_eq!(c.encode(&Value::from(ascii)).unwrap(), raw(ascii));
        for narrow in ["charset=\"Ascii\" déjà vu", "charset=\"Jis\" déjà vu"] {
            let encoded = c.encode(&Value::from(narrow)).unwrap();
            assert_eq!(encoded, Encoded::Unencodable, "{narrow}");
        }
        for marker in ["Unicode", "Undefined", "InvalidCharsetId"] {
            let text = format!("charset=\"{marker}\" déjà vu");
            assert_eq!(c.encode(&Value::from(text.as_str())).unwrap(), raw(&text));
        }
        assert!(c.encode(&Value::Int(1)).is_err());
    }

    #[test]
    fn charset_marker() {
        assert_eq!(comment_charset("charset=\"Ascii\" text"), Some("Ascii"));
        assert_eq!(comment_charset("charset=Unicode text"), Some("Unicode"));
        assert_eq!(comment_charset("text"), None);
        assert_eq!(
            comment_charset("charset=\"Shift JIS\" text"),
            Some("Shift JIS")
        );
        let c = converter("Exif.Photo.UserComment", ExifType::Comment);
        assert_eq!(
            c.decode("charset=\"Shift JIS\" déjà vu").unwrap(),
            Value::from("déjà vu")
        );
    }

    #[test]
    fn charset_names_are_exact() {
        let c = converter("Exif.Photo.UserComment", ExifType::Comment);
        for marker in ["ascii", "ASCII", "jis"] {
            let text = format!("charset=\"{marker}\" déjà vu");
            assert_eq!(c.encode(&Value::from(text.as_str())).unwrap(), raw(&text));
        }
    }

    // ── Numbers ──────────────────────────────────────────────────────

    #[test]
    fn byte_passes_text_through() {
        let c = converter("Exif.GPSInfo.GPSVersionID", ExifType::Byte);
        assert_eq!(c.decode("2 2 0 0").unwrap(), Value::from("2 2 0 0"));
        assert_eq!(c.encode(&Value::from("2 2 0 0")).unwrap(), raw("2 2 0 0"));
        assert!(c.encode(&Value::Int(2)).is_err());
    }

    #[test]
    fn integers() {
        let c = converter("Exif.Image.BitsPerSample", ExifType::Short);
        assert_eq!(c.decode("8").unwrap(), Value::Int(8));
        assert_eq!(c.decode("8 8 8").unwrap(), Value::from(vec![8i64, 8, 8]));
        assert!(c.decode("-8").is_err());
        assert!(c.decode("65536").is_err());
        assert!(c.decode("abc").is_err());
        assert!(c.decode("").is_err());
        assert_eq!(c.encode(&Value::Int(8)).unwrap(), raw("8"));
        assert_eq!(
            c.encode(&Value::from(vec![8i64, 8, 8])).unwrap(),
            raw("8 8 8")
        );
        assert!(c.encode(&Value::Int(-57)).is_err());
        assert!(c.encode(&Value::Float(3.14)).is_err());
        assert!(c.encode(&Value::List(vec![])).is_err());

        let c = converter("Exif.Image.TimeZoneOffset", ExifType::SShort);
        assert_eq!(c.decode("-6").unwrap(), Value::Int(-6));
        assert_eq!(c.encode(&Value::Int(-6)).unwrap(), raw("-6"));

        let c = converter("Exif.OlympusCs.ManometerReading", ExifType::SLong);
        assert_eq!(c.decode("-437").unwrap(), Value::Int(-437));
        assert!(c.decode("2147483648").is_err());
    }

    #[test]
    fn rationals() {
        let c = converter("Exif.Image.XResolution", ExifType::Rational);
        let r = |n, d| Value::Rational(Rational::new(n, d).unwrap());
        assert_eq!(c.decode("5/3").unwrap(), r(5, 3));
        assert_eq!(
            c.decode("1/2 3/4").unwrap(),
            Value::List(vec![r(1, 2), r(3, 4)])
        );
        assert!(c.decode("-5/3").is_err());
        assert!(c.decode("5/-3").is_err());
        assert!(c.decode("invalid").is_err());
        assert_eq!(c.encode(&r(5, 3)).unwrap(), raw("5/3"));
        assert!(c.encode(&r(-5, 3)).is_err());

        let c = converter("Exif.Image.BaselineExposure", ExifType::SRational);
        assert_eq!(c.decode("-5/3").unwrap(), r(-5, 3));
        assert_eq!(c.encode(&r(-5, 3)).unwrap(), raw("-5/3"));
        assert!(c.decode("5/-3").is_err());
    }

    #[test]
    fn undefined() {
        let c = converter("Exif.Photo.ExifVersion", ExifType::Undefined);
        assert_eq!(c.decode("48 49 48 48").unwrap(), Value::from("0100"));
        assert_eq!(c.encode(&Value::from("0100")).unwrap(), raw("48 49 48 48"));
        assert!(c.decode("foo").is_err());
        assert!(c.encode(&Value::Int(3)).is_err());
    }

    // ── ExifTag ──────────────────────────────────────────────────────

    #[test]
    fn tag_cache_invalidation() {
        let mut tag = ExifTag::new("Exif.Image.ImageWidth").unwrap();
        assert_eq!(tag.type_name(), "Long");
        tag.set_raw_value("640").unwrap();
        assert_eq!(tag.value().unwrap(), &Value::Int(640));

        tag.set_value(Value::Int(1024)).unwrap();
        assert_eq!(tag.raw_value(), "1024");

        tag.set_raw_value("800").unwrap();
        assert_eq!(tag.value().unwrap(), &Value::Int(800));
    }

    #[test]
    fn tag_rejects_bad_raw() {
        let mut tag = ExifTag::new("Exif.Image.ImageWidth").unwrap();
        assert!(matches!(
            tag.set_raw_value("wide"),
            Err(TagError::Exif(_))
        ));
        assert_eq!(tag.raw_value(), "");

        let mut tag = ExifTag::new("Exif.Photo.ExifVersion").unwrap();
        tag.set_raw_value("48 50 50 49").unwrap();
        assert_eq!(tag.value().unwrap(), &Value::from("0221"));
        assert!(tag.set_raw_value("O221").is_err());
        assert!(tag.set_raw_value("48 300").is_err());
    }

    #[test]
    fn tag_unknown_keys() {
        for key in ["Exif.Photo.Nope", "Iptc.Application2.City", "Exif.Photo"] {
            assert!(
                matches!(ExifTag::new(key), Err(TagError::UnknownKey(_))),
                "{key}"
            );
        }
    }

    #[test]
    fn maker_note_type_resolution() {
        let mut tag = ExifTag::new("Exif.Canon.FirmwareVersion").unwrap();
        assert_eq!(tag.exif_type(), ExifType::Undefined);
        assert!(matches!(tag.value(), Err(TagError::TypeNotKnown { .. })));

        let mut tag =
            ExifTag::from_record("Exif.Canon.FirmwareVersion", "Ascii", "Firmware 1.0.4")
                .unwrap();
        assert_eq!(tag.value().unwrap(), &Value::from("Firmware 1.0.4"));
    }

    #[test]
    fn unencodable_comment_leaves_tag_unchanged() {
        let unicode = "charset=\"Unicode\" déjà vu";
        let mut tag = ExifTag::with_value("Exif.Photo.UserComment", unicode).unwrap();
        let err = tag
            .set_value(Value::from("charset=\"Ascii\" déjà vu"))
            .unwrap_err();
        assert!(matches!(err, TagError::Unencodable { ref charset, .. } if charset == "Ascii"));
        assert_eq!(tag.raw_value(), unicode);
        assert_eq!(tag.value().unwrap(), &Value::from(unicode));
    }

    #[test]
    fn unknown_declared_type() {
        let err = ExifTag::from_record("Exif.Image.Make", "Float", "1.0").unwrap_err();
        assert!(matches!(err, TagError::UnknownType { family: "EXIF", .. }));
    }
}
