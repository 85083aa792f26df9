//! XMP tags.
//!
//! XMP types are either a scalar, a container of scalars (bag, seq, alt) or a
//! Lang Alt map from language tag to text. Keys whose property the catalog
//! does not describe are untyped and carry plain text.

use std::collections::BTreeMap;
use std::fmt;

use crate::convert::datetime::{format_xmp, xmp_parse};
use crate::convert::numeric::{parse_int, parse_rational};
use crate::error::{TagError, TagResult, TypeError, XmpValueError};
use crate::tags::{Cached, Family, NamespaceRegistry, RawValue, TagKey, catalog};
use crate::value::{GpsCoordinate, Value};

/// Scalar XMP value types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum XmpScalar {
    Boolean,
    Date,
    GpsCoordinate,
    Integer,
    MimeType,
    Rational,
    Real,
    AgentName,
    ProperName,
    Text,
    Uri,
    Url,
    Locale,
    Colorant,
    Dimensions,
    Font,
    Thumbnail,
    XPath,
}

impl XmpScalar {
    pub fn as_str(&self) -> &'static str {
        match self {
            XmpScalar::Boolean => "Boolean",
            XmpScalar::Date => "Date",
            XmpScalar::GpsCoordinate => "GPSCoordinate",
            XmpScalar::Integer => "Integer",
            XmpScalar::MimeType => "MIMEType",
            XmpScalar::Rational => "Rational",
            XmpScalar::Real => "Real",
            XmpScalar::AgentName => "AgentName",
            XmpScalar::ProperName => "ProperName",
            XmpScalar::Text => "Text",
            XmpScalar::Uri => "URI",
            XmpScalar::Url => "URL",
            XmpScalar::Locale => "Locale",
            XmpScalar::Colorant => "Colorant",
            XmpScalar::Dimensions => "Dimensions",
            XmpScalar::Font => "Font",
            XmpScalar::Thumbnail => "Thumbnail",
            XmpScalar::XPath => "XPath",
        }
    }

    fn parse(name: &str) -> Option<Self> {
        const ALL: [XmpScalar; 18] = [
            XmpScalar::Boolean,
            XmpScalar::Date,
            XmpScalar::GpsCoordinate,
            XmpScalar::Integer,
            XmpScalar::MimeType,
            XmpScalar::Rational,
            XmpScalar::Real,
            XmpScalar::AgentName,
            XmpScalar::ProperName,
            XmpScalar::Text,
            XmpScalar::Uri,
            XmpScalar::Url,
            XmpScalar::Locale,
            XmpScalar::Colorant,
            XmpScalar::Dimensions,
            XmpScalar::Font,
            XmpScalar::Thumbnail,
            XmpScalar::XPath,
        ];
        ALL.into_iter().find(|s| s.as_str() == name)
    }

    fn error(&self, value: impl ToString) -> TagError {
        XmpValueError::new(value, self.as_str()).into()
    }

    fn unsupported(&self) -> TagError {
        TagError::Unsupported {
            type_name: self.as_str().to_string(),
        }
    }

    /// Decode one raw string.
    pub fn decode(&self, raw: &str) -> TagResult<Value> {
        let value = match self {
            XmpScalar::Boolean => match raw {
                "True" => Some(Value::Bool(true)),
                "False" => Some(Value::Bool(false)),
                _ => None,
            },
            XmpScalar::Date => xmp_parse(raw),
            XmpScalar::GpsCoordinate => GpsCoordinate::from_string(raw).ok().map(Value::Gps),
            XmpScalar::Integer => parse_int(raw).map(Value::Int),
            XmpScalar::MimeType => match raw.split_once('/') {
                Some((t, s)) if !s.contains('/') => {
                    Some(Value::MimeType(t.to_string(), s.to_string()))
                }
                _ => None,
            },
            XmpScalar::Rational => parse_rational(raw, true).map(Value::Rational),
            XmpScalar::Real => raw
                .parse::<f64>()
                .ok()
                .filter(|x| x.is_finite())
                .map(Value::Float),
            XmpScalar::AgentName
            | XmpScalar::ProperName
            | XmpScalar::Text
            | XmpScalar::Uri
            | XmpScalar::Url
            | XmpScalar::Locale => Some(Value::Str(raw.to_string())),
            XmpScalar::Colorant
            | XmpScalar::Dimensions
            | XmpScalar::Font
            | XmpScalar::Thumbnail
            | XmpScalar::XPath => {
                return Err(self.unsupported());
            }
        };
        value.ok_or_else(|| self.error(raw))
    }

    /// Encode one host value.
    pub fn encode(&self, value: &Value) -> TagResult<String> {
        let text = match (self, value) {
            (XmpScalar::Boolean, Value::Bool(b)) => {
                (if *b { "True" } else { "False" }).to_string()
            }
            (XmpScalar::Date, Value::Date(_) | Value::DateTime(_)) => format_xmp(value)?,
            (XmpScalar::GpsCoordinate, Value::Gps(gps)) => gps.to_string(),
            (XmpScalar::Integer, Value::Int(i)) => i.to_string(),
            (XmpScalar::MimeType, Value::MimeType(t, s)) => format!("{t}/{s}"),
            (XmpScalar::Rational, Value::Rational(r)) => r.to_string(),
            (XmpScalar::Real, Value::Float(x)) if x.is_finite() => x.to_string(),
            (XmpScalar::Real, Value::Int(i)) => i.to_string(),
            (
                XmpScalar::AgentName
                | XmpScalar::ProperName
                | XmpScalar::Text
                | XmpScalar::Uri
                | XmpScalar::Url
                | XmpScalar::Locale,
                Value::Str(s),
            ) => s.clone(),
            (
                XmpScalar::Colorant
                | XmpScalar::Dimensions
                | XmpScalar::Font
                | XmpScalar::Thumbnail
                | XmpScalar::XPath,
                _,
            ) => return Err(self.unsupported()),
            (_, other) => return Err(self.error(other)),
        };
        Ok(text)
    }
}

/// Declared type of an XMP property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum XmpType {
    Simple(XmpScalar),
    Bag(XmpScalar),
    Seq(XmpScalar),
    Alt(XmpScalar),
    LangAlt,
    /// Custom namespaces and properties missing from the catalog.
    Untyped,
}

impl XmpType {
    /// Parse a type string such as `Text`, `bag ProperName`,
    /// `Closed Choice of Integer` or `Lang Alt`.
    pub fn parse(type_name: &str) -> TagResult<Self> {
        let text = type_name.trim();
        if text.is_empty() {
            return Ok(XmpType::Untyped);
        }
        if text.eq_ignore_ascii_case("Lang Alt") {
            return Ok(XmpType::LangAlt);
        }
        let unknown = || TagError::UnknownType {
            family: "XMP",
            type_name: type_name.to_string(),
        };

        let (wrap, rest): (fn(XmpScalar) -> XmpType, &str) = match text.split_once(' ') {
            Some((head, rest)) if head.eq_ignore_ascii_case("bag") => (XmpType::Bag, rest),
            Some((head, rest)) if head.eq_ignore_ascii_case("seq") => (XmpType::Seq, rest),
            Some((head, rest)) if head.eq_ignore_ascii_case("alt") => (XmpType::Alt, rest),
            _ => (XmpType::Simple, text),
        };
        let rest = rest.trim();
        let scalar_name = rest
            .strip_prefix("Closed Choice of ")
            .or_else(|| rest.strip_prefix("Open Choice of "))
            .unwrap_or(rest)
            .trim();
        let scalar = XmpScalar::parse(scalar_name).ok_or_else(unknown)?;
        Ok(wrap(scalar))
    }

    fn container_name(&self) -> &'static str {
        match self {
            XmpType::Bag(_) => "bag",
            XmpType::Seq(_) => "seq",
            XmpType::Alt(_) => "alt",
            XmpType::LangAlt => "Lang Alt",
            _ => "value",
        }
    }

    /// An empty raw value of the right shape.
    fn empty_raw(&self) -> RawValue {
        match self {
            XmpType::Simple(_) | XmpType::Untyped => RawValue::Text(String::new()),
            XmpType::Bag(_) | XmpType::Seq(_) | XmpType::Alt(_) => RawValue::Array(Vec::new()),
            XmpType::LangAlt => RawValue::LangAlt(BTreeMap::new()),
        }
    }
}

impl fmt::Display for XmpType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            XmpType::Simple(s) => write!(f, "{}", s.as_str()),
            XmpType::Bag(s) => write!(f, "bag {}", s.as_str()),
            XmpType::Seq(s) => write!(f, "seq {}", s.as_str()),
            XmpType::Alt(s) => write!(f, "alt {}", s.as_str()),
            XmpType::LangAlt => write!(f, "Lang Alt"),
            XmpType::Untyped => Ok(()),
        }
    }
}

/// An XMP tag: key, declared type, raw value and decoded value.
#[derive(Debug, Clone)]
pub struct XmpTag {
    key: TagKey,
    xmp_type: XmpType,
    type_name: String,
    raw: RawValue,
    value: Cached<Value>,
}

impl XmpTag {
    /// An empty tag, typed from the catalog.
    ///
    /// The key's prefix must be known to `namespaces`.
    pub fn new(key: &str, namespaces: &NamespaceRegistry) -> TagResult<Self> {
        let key = Self::parse_key(key, namespaces)?;
        let type_name = catalog::xmp_type_name(key.group(), key.base_name()).unwrap_or("");
        Self::typed(key, type_name)
    }

    /// A tag built from a host value.
    pub fn with_value(
        key: &str,
        namespaces: &NamespaceRegistry,
        value: impl Into<Value>,
    ) -> TagResult<Self> {
        let mut tag = Self::new(key, namespaces)?;
        tag.set_value(value.into())?;
        Ok(tag)
    }

    /// A tag as read from an image, with the type the engine declared.
    pub fn from_record(
        key: &str,
        namespaces: &NamespaceRegistry,
        declared_type: &str,
        raw: RawValue,
    ) -> TagResult<Self> {
        let key = Self::parse_key(key, namespaces)?;
        let mut tag = Self::typed(key, declared_type)?;
        tag.set_raw_value(raw)?;
        Ok(tag)
    }

    fn parse_key(key: &str, namespaces: &NamespaceRegistry) -> TagResult<TagKey> {
        let key = TagKey::parse(key)?;
        if key.family() != Family::Xmp {
            return Err(TagError::UnknownKey(key.to_string()));
        }
        if !namespaces.is_known_prefix(key.group()) {
            return Err(TagError::UnknownNamespace {
                key: key.to_string(),
                prefix: key.group().to_string(),
            });
        }
        Ok(key)
    }

    fn typed(key: TagKey, type_name: &str) -> TagResult<Self> {
        let xmp_type = XmpType::parse(type_name)?;
        Ok(Self {
            key,
            xmp_type,
            type_name: type_name.to_string(),
            raw: xmp_type.empty_raw(),
            value: Cached::Absent,
        })
    }

    pub fn key(&self) -> &TagKey {
        &self.key
    }

    pub fn xmp_type(&self) -> XmpType {
        self.xmp_type
    }

    /// The type string as declared, e.g. `Closed Choice of Integer`.
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn raw_value(&self) -> &RawValue {
        &self.raw
    }

    /// Replace the raw value; it must have the shape of the tag's type.
    pub fn set_raw_value(&mut self, raw: RawValue) -> TagResult<()> {
        let shape_ok = matches!(
            (&self.xmp_type, &raw),
            (XmpType::Simple(_) | XmpType::Untyped, RawValue::Text(_))
                | (XmpType::Bag(_) | XmpType::Seq(_) | XmpType::Alt(_), RawValue::Array(_))
                | (XmpType::LangAlt, RawValue::LangAlt(_))
        );
        if !shape_ok {
            let expected = match self.xmp_type.empty_raw() {
                RawValue::Text(_) => "text",
                RawValue::Array(_) => "an array",
                RawValue::LangAlt(_) => "a lang alt map",
            };
            return Err(TypeError::new(expected, raw.kind()).into());
        }
        self.raw = raw;
        self.value = Cached::Absent;
        Ok(())
    }

    /// The decoded value, decoding the raw value on first access.
    pub fn value(&mut self) -> TagResult<&Value> {
        if !self.value.is_present() {
            self.value = Cached::Present(self.decode()?);
        }
        match &self.value {
            Cached::Present(value) => Ok(value),
            Cached::Absent => Err(TagError::UnknownKey(self.key.to_string())),
        }
    }

    fn decode(&self) -> TagResult<Value> {
        match (&self.xmp_type, &self.raw) {
            (XmpType::Simple(scalar), RawValue::Text(text)) => scalar.decode(text),
            (XmpType::Untyped, RawValue::Text(text)) => Ok(Value::Str(text.clone())),
            (
                XmpType::Bag(scalar) | XmpType::Seq(scalar) | XmpType::Alt(scalar),
                RawValue::Array(items),
            ) => {
                let values = items
                    .iter()
                    .map(|item| scalar.decode(item))
                    .collect::<TagResult<Vec<_>>>()?;
                Ok(Value::List(values))
            }
            (XmpType::LangAlt, RawValue::LangAlt(map)) => Ok(Value::LangAlt(map.clone())),
            (_, raw) => {
                let expected = "a raw value matching the tag type";
                Err(TypeError::new(expected, raw.kind()).into())
            }
        }
    }

    /// Assign a host value, re-encoding the raw value.
    ///
    /// A plain string assigned to a Lang Alt tag is stored as its `x-default`
    /// entry.
    pub fn set_value(&mut self, value: Value) -> TagResult<()> {
        let (raw, value) = self.encode(value)?;
        self.raw = raw;
        self.value = Cached::Present(value);
        Ok(())
    }

    fn encode(&self, value: Value) -> TagResult<(RawValue, Value)> {
        match self.xmp_type {
            XmpType::Simple(scalar) => Ok((RawValue::Text(scalar.encode(&value)?), value)),
            XmpType::Bag(scalar) | XmpType::Seq(scalar) | XmpType::Alt(scalar) => {
                let items = match &value {
                    Value::List(items) => items,
                    other => return Err(TypeError::new("a list", other.kind()).into()),
                };
                if items.is_empty() {
                    return Err(self.empty_container());
                }
                let raw = items
                    .iter()
                    .map(|item| scalar.encode(item))
                    .collect::<TagResult<Vec<_>>>()?;
                Ok((RawValue::Array(raw), value))
            }
            XmpType::LangAlt => {
                let map = match value {
                    Value::Str(text) => BTreeMap::from([("x-default".to_string(), text)]),
                    Value::LangAlt(map) => map,
                    other => {
                        return Err(
                            TypeError::new("a lang alt map or a string", other.kind()).into()
                        );
                    }
                };
                if map.is_empty() {
                    return Err(self.empty_container());
                }
                Ok((RawValue::LangAlt(map.clone()), Value::LangAlt(map)))
            }
            XmpType::Untyped => {
                let text = match &value {
                    Value::Str(text) => text.clone(),
                    Value::Date(_) | Value::DateTime(_) => format_xmp(&value)?,
                    other => {
                        return Err(TagError::Unsupported {
                            type_name: format!("untyped {}", other.kind()),
                        });
                    }
                };
                Ok((RawValue::Text(text), value))
            }
        }
    }

    fn empty_container(&self) -> TagError {
        TagError::EmptyContainer {
            key: self.key.to_string(),
            container: self.xmp_type.container_name(),
        }
    }
}
