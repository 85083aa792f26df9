//! In-memory metadata of one image.
//!
//! [`MetadataRecord`] sits between the metadata engine and host code. The
//! engine feeds it `(key, declared type, raw value)` entries with the `load_*`
//! methods and reads encoded entries back with [`MetadataRecord::raw_entries`];
//! host code reads and assigns values through the tags in between.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::{TagError, TagResult};
use crate::tags::{ExifTag, Family, IptcTag, NamespaceRegistry, RawValue, TagKey, XmpTag};
use crate::value::Value;

/// One encoded tag, as handed back to the metadata engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RawEntry {
    pub key: String,
    pub type_name: String,
    pub raw: RawValue,
}

/// Tags of one image, keyed by their dotted key.
#[derive(Debug, Default)]
pub struct MetadataRecord {
    exif: BTreeMap<String, ExifTag>,
    iptc: BTreeMap<String, IptcTag>,
    xmp: BTreeMap<String, XmpTag>,
    namespaces: NamespaceRegistry,
}

impl MetadataRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// A record resolving XMP prefixes with `namespaces`.
    pub fn with_namespaces(namespaces: NamespaceRegistry) -> Self {
        Self {
            namespaces,
            ..Self::default()
        }
    }

    pub fn namespaces(&self) -> &NamespaceRegistry {
        &self.namespaces
    }

    pub fn namespaces_mut(&mut self) -> &mut NamespaceRegistry {
        &mut self.namespaces
    }

    // ── Ingest ───────────────────────────────────────────────────────

    pub fn load_exif(
        &mut self,
        key: &str,
        declared_type: &str,
        raw: impl Into<String>,
    ) -> TagResult<()> {
        let tag = ExifTag::from_record(key, declared_type, raw)?;
        self.exif.insert(tag.key().to_string(), tag);
        Ok(())
    }

    pub fn load_iptc(&mut self, key: &str, raw: Vec<String>) -> TagResult<()> {
        let tag = IptcTag::from_record(key, raw)?;
        self.iptc.insert(tag.key().to_string(), tag);
        Ok(())
    }

    pub fn load_xmp(&mut self, key: &str, declared_type: &str, raw: RawValue) -> TagResult<()> {
        let tag = XmpTag::from_record(key, &self.namespaces, declared_type, raw)?;
        self.xmp.insert(tag.key().to_string(), tag);
        Ok(())
    }

    // ── Access ───────────────────────────────────────────────────────

    pub fn exif_keys(&self) -> Vec<&str> {
        self.exif.keys().map(String::as_str).collect()
    }

    pub fn iptc_keys(&self) -> Vec<&str> {
        self.iptc.keys().map(String::as_str).collect()
    }

    pub fn xmp_keys(&self) -> Vec<&str> {
        self.xmp.keys().map(String::as_str).collect()
    }

    pub fn exif_tag_mut(&mut self, key: &str) -> Option<&mut ExifTag> {
        self.exif.get_mut(key)
    }

    pub fn iptc_tag_mut(&mut self, key: &str) -> Option<&mut IptcTag> {
        self.iptc.get_mut(key)
    }

    pub fn xmp_tag_mut(&mut self, key: &str) -> Option<&mut XmpTag> {
        self.xmp.get_mut(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.exif.contains_key(key) || self.iptc.contains_key(key) || self.xmp.contains_key(key)
    }

    /// The decoded value of a tag.
    pub fn value(&mut self, key: &str) -> TagResult<Value> {
        let missing = || TagError::UnknownKey(key.to_string());
        match TagKey::parse(key)?.family() {
            Family::Exif => self.exif.get_mut(key).ok_or_else(missing)?.value().cloned(),
            Family::Iptc => self.iptc.get_mut(key).ok_or_else(missing)?.value(),
            Family::Xmp => self.xmp.get_mut(key).ok_or_else(missing)?.value().cloned(),
        }
    }

    /// Assign a value, creating the tag if the record does not hold it yet.
    ///
    /// A failed assignment leaves the record unchanged.
    pub fn set(&mut self, key: &str, value: impl Into<Value>) -> TagResult<()> {
        let value = value.into();
        match TagKey::parse(key)?.family() {
            Family::Exif => match self.exif.get_mut(key) {
                Some(tag) => tag.set_value(value),
                None => {
                    let tag = ExifTag::with_value(key, value)?;
                    self.exif.insert(tag.key().to_string(), tag);
                    Ok(())
                }
            },
            Family::Iptc => match self.iptc.get_mut(key) {
                Some(tag) => tag.set_value(value),
                None => {
                    let tag = IptcTag::with_values(key, value)?;
                    self.iptc.insert(tag.key().to_string(), tag);
                    Ok(())
                }
            },
            Family::Xmp => match self.xmp.get_mut(key) {
                Some(tag) => tag.set_value(value),
                None => {
                    let tag = XmpTag::with_value(key, &self.namespaces, value)?;
                    self.xmp.insert(tag.key().to_string(), tag);
                    Ok(())
                }
            },
        }
    }

    pub fn remove(&mut self, key: &str) -> TagResult<()> {
        let removed = match TagKey::parse(key)?.family() {
            Family::Exif => self.exif.remove(key).is_some(),
            Family::Iptc => self.iptc.remove(key).is_some(),
            Family::Xmp => self.xmp.remove(key).is_some(),
        };
        if removed { Ok(()) } else { Err(TagError::UnknownKey(key.to_string())) }
    }

    // ── Egress ───────────────────────────────────────────────────────

    /// Every tag in its encoded form.
    ///
    /// IPTC values edited in place are re-encoded here. XMP tags whose
    /// namespace has been unregistered since they were created are rejected.
    pub fn raw_entries(&mut self) -> TagResult<Vec<RawEntry>> {
        let mut entries = Vec::with_capacity(self.exif.len() + self.iptc.len() + self.xmp.len());
        for (key, tag) in &self.exif {
            entries.push(RawEntry {
                key: key.clone(),
                type_name: tag.type_name().to_string(),
                raw: RawValue::Text(tag.raw_value().to_string()),
            });
        }
        for (key, tag) in self.iptc.iter_mut() {
            let type_name = tag.type_name().to_string();
            let raw = RawValue::Array(tag.raw_value()?.to_vec());
            entries.push(RawEntry {
                key: key.clone(),
                type_name,
                raw,
            });
        }
        for (key, tag) in &self.xmp {
            let prefix = tag.key().group();
            if !self.namespaces.is_known_prefix(prefix) {
                return Err(TagError::UnknownNamespace {
                    key: key.clone(),
                    prefix: prefix.to_string(),
                });
            }
            entries.push(RawEntry {
                key: key.clone(),
                type_name: tag.type_name().to_string(),
                raw: tag.raw_value().clone(),
            });
        }
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    #[test]
    fn load_and_read() {
        let mut record = MetadataRecord::new();
        record
            .load_exif("Exif.Image.ImageWidth", "Long", "640")
            .unwrap();
        record
            .load_iptc(
                "Iptc.Application2.Keywords",
                vec!["sea".into(), "sky".into()],
            )
            .unwrap();
        record
            .load_xmp("Xmp.xmpMM.SaveID", "Integer", RawValue::Text("3".into()))
            .unwrap();

        assert_eq!(record.exif_keys(), ["Exif.Image.ImageWidth"]);
        assert_eq!(record.iptc_keys(), ["Iptc.Application2.Keywords"]);
        assert_eq!(record.xmp_keys(), ["Xmp.xmpMM.SaveID"]);
        assert_eq!(
            record.value("Exif.Image.ImageWidth").unwrap(),
            Value::Int(640)
        );
        assert_eq!(
            record.value("Iptc.Application2.Keywords").unwrap(),
            Value::from(vec!["sea", "sky"])
        );
        assert_eq!(record.value("Xmp.xmpMM.SaveID").unwrap(), Value::Int(3));
        assert!(matches!(
            record.value("Exif.Image.Make"),
            Err(TagError::UnknownKey(_))
        ));
    }

    #[test]
    fn set_creates_tags() {
        let mut record = MetadataRecord::new();
        let date = NaiveDate::from_ymd_opt(2009, 8, 4).unwrap();
        record.set("Exif.GPSInfo.GPSDateStamp", date).unwrap();
        record.set("Iptc.Application2.City", vec!["Paris"]).unwrap();
        record.set("Xmp.dc.title", "Sunset").unwrap();
        assert!(record.contains("Exif.GPSInfo.GPSDateStamp"));
        assert!(record.contains("Xmp.dc.title"));

        let entries = record.raw_entries().unwrap();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].raw, RawValue::Text("2009:08:04".into()));
        assert_eq!(entries[1].raw, RawValue::Array(vec!["Paris".into()]));
    }

    #[test]
    fn failed_set_leaves_record_unchanged() {
        let mut record = MetadataRecord::new();
        assert!(record.set("Exif.Image.ImageWidth", "wide").is_err());
        assert!(!record.contains("Exif.Image.ImageWidth"));
        assert!(matches!(
            record.set("Xmp.foo.bar", "baz"),
            Err(TagError::UnknownNamespace { .. })
        ));
    }

    #[test]
    fn maker_note_type_from_engine() {
        let mut record = MetadataRecord::new();
        record
            .load_exif("Exif.Pentax.Temperature", "SByte", "-3")
            .unwrap();
        assert_eq!(
            record.value("Exif.Pentax.Temperature").unwrap(),
            Value::from("-3")
        );
        assert!(matches!(
            record.set("Exif.Canon.FirmwareVersion", "1.0"),
            Err(TagError::TypeNotKnown { .. })
        ));
    }

    #[test]
    fn in_place_iptc_edit_reaches_raw_entries() {
        let mut record = MetadataRecord::new();
        record
            .load_iptc("Iptc.Application2.Keywords", vec!["sea".into()])
            .unwrap();
        let tag = record.iptc_tag_mut("Iptc.Application2.Keywords").unwrap();
        tag.values_mut().unwrap().push(Value::from("sky")).unwrap();

        let entries = record.raw_entries().unwrap();
        assert_eq!(
            entries[0].raw,
            RawValue::Array(vec!["sea".into(), "sky".into()])
        );
    }

    #[test]
    fn unregistered_namespace_fails_on_egress() {
        let ns = "http://example.com/myns/";
        let mut record = MetadataRecord::new();
        record.namespaces_mut().register(ns, "myns").unwrap();
        record.set("Xmp.myns.prop", "value").unwrap();
        record.namespaces_mut().unregister(ns).unwrap();
        assert!(matches!(
            record.raw_entries(),
            Err(TagError::UnknownNamespace { .. })
        ));
    }

    #[test]
    fn remove() {
        let mut record = MetadataRecord::new();
        record.set("Exif.Image.Make", "Canon").unwrap();
        record.remove("Exif.Image.Make").unwrap();
        assert!(!record.contains("Exif.Image.Make"));
        assert!(matches!(
            record.remove("Exif.Image.Make"),
            Err(TagError::UnknownKey(_))
        ));
    }
}
