//! Tag objects for the three metadata families.
//!
//! A tag holds its raw value (the wire text the metadata engine stores) and a
//! lazily decoded [`Value`](crate::value::Value). Writing either side
//! invalidates the other: assigning a value re-encodes the raw value, assigning
//! a raw value drops the decoded one until it is next read.

pub mod catalog;
pub mod exif;
pub mod iptc;
pub mod namespace;
pub mod xmp;

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::error::{TagError, TagResult};

pub use exif::{ExifTag, ExifType};
pub use iptc::{IptcTag, IptcType};
pub use namespace::NamespaceRegistry;
pub use xmp::{XmpScalar, XmpTag, XmpType};

/// Metadata family, the first component of a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Family {
    Exif,
    Iptc,
    Xmp,
}

impl Family {
    pub fn as_str(&self) -> &'static str {
        match self {
            Family::Exif => "Exif",
            Family::Iptc => "Iptc",
            Family::Xmp => "Xmp",
        }
    }
}

/// A dotted tag key: `Family.Group.Name`.
///
/// For XMP the group is the namespace prefix and the name may carry an array
/// index (`[2]`) or a qualifier path (`/xml:lang`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TagKey {
    family: Family,
    group: String,
    name: String,
}

impl TagKey {
    pub fn parse(key: &str) -> TagResult<Self> {
        let mut parts = key.splitn(3, '.');
        let (Some(family), Some(group), Some(name)) = (parts.next(), parts.next(), parts.next())
        else {
            return Err(TagError::UnknownKey(key.to_string()));
        };
        if group.is_empty() || name.is_empty() {
            return Err(TagError::UnknownKey(key.to_string()));
        }
        let family = match family {
            "Exif" => Family::Exif,
            "Iptc" => Family::Iptc,
            "Xmp" => Family::Xmp,
            _ => return Err(TagError::UnknownKey(key.to_string())),
        };
        Ok(Self {
            family,
            group: group.to_string(),
            name: name.to_string(),
        })
    }

    pub fn family(&self) -> Family {
        self.family
    }

    pub fn group(&self) -> &str {
        &self.group
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The name without any `[n]` index or `/qualifier` suffix.
    pub fn base_name(&self) -> &str {
        let end = self.name.find(['[', '/']).unwrap_or(self.name.len());
        &self.name[..end]
    }
}

impl fmt::Display for TagKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.family.as_str(), self.group, self.name)
    }
}

/// One side of a tag's two-slot cache.
///
/// `Absent` means "not decoded yet", which is different from a decoded
/// [`Value::None`](crate::value::Value::None).
#[derive(Debug, Clone, PartialEq)]
pub enum Cached<T> {
    Absent,
    Present(T),
}

impl<T> Cached<T> {
    pub fn get(&self) -> Option<&T> {
        match self {
            Cached::Absent => None,
            Cached::Present(v) => Some(v),
        }
    }

    pub fn is_present(&self) -> bool {
        matches!(self, Cached::Present(_))
    }
}

impl<T> Default for Cached<T> {
    fn default() -> Self {
        Cached::Absent
    }
}

/// Raw tag value as exchanged with the metadata engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum RawValue {
    /// EXIF values and simple XMP properties.
    Text(String),
    /// IPTC datasets and XMP bag/seq/alt items.
    Array(Vec<String>),
    /// XMP Lang Alt: language tag → text.
    LangAlt(BTreeMap<String, String>),
}

impl RawValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            RawValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[String]> {
        match self {
            RawValue::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            RawValue::Text(_) => "text",
            RawValue::Array(_) => "array",
            RawValue::LangAlt(_) => "lang alt",
        }
    }
}

impl fmt::Display for RawValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawValue::Text(s) => write!(f, "{s:?}"),
            RawValue::Array(items) => write!(f, "{items:?}"),
            RawValue::LangAlt(map) => write!(f, "{map:?}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_keys() {
        let key = TagKey::parse("Exif.Photo.UserComment").unwrap();
        assert_eq!(key.family(), Family::Exif);
        assert_eq!(key.group(), "Photo");
        assert_eq!(key.name(), "UserComment");
        assert_eq!(key.to_string(), "Exif.Photo.UserComment");

        let key = TagKey::parse("Xmp.dc.title[1]/xml:lang").unwrap();
        assert_eq!(key.family(), Family::Xmp);
        assert_eq!(key.name(), "title[1]/xml:lang");
        assert_eq!(key.base_name(), "title");
    }

    #[test]
    fn malformed_keys() {
        for bad in [
            "",
            "Exif",
            "Exif.Photo",
            "Exif..Name",
            "Foo.Bar.Baz",
            "exif.Photo.UserComment",
        ] {
            assert!(
                matches!(TagKey::parse(bad), Err(TagError::UnknownKey(_))),
                "{bad:?}"
            );
        }
    }

    #[test]
    fn cache_slots() {
        let mut cached: Cached<i32> = Cached::default();
        assert!(!cached.is_present());
        cached = Cached::Present(3);
        assert_eq!(cached.get(), Some(&3));
    }

    #[test]
    fn raw_value_json() {
        let raw = RawValue::Array(vec!["a".into(), "b".into()]);
        assert_eq!(serde_json::to_string(&raw).unwrap(), r#"["a","b"]"#);
        assert_eq!(
            serde_json::to_string(&RawValue::Text("x".into())).unwrap(),
            r#""x""#
        );
    }
}
