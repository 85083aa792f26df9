//! XMP namespace registry.
//!
//! XMP keys name their namespace by prefix (`Xmp.dc.title`). The registry maps
//! prefixes to namespace URIs: a fixed builtin set plus custom namespaces
//! registered at runtime. Each [`MetadataRecord`](crate::metadata::MetadataRecord)
//! owns its own registry.

use crate::error::NamespaceError;

const BUILTIN: &[(&str, &str)] = &[
    ("dc", "http://purl.org/dc/elements/1.1/"),
    ("xmp", "http://ns.adobe.com/xap/1.0/"),
    ("xmpRights", "http://ns.adobe.com/xap/1.0/rights/"),
    ("xmpMM", "http://ns.adobe.com/xap/1.0/mm/"),
    ("xmpBJ", "http://ns.adobe.com/xap/1.0/bj/"),
    ("xmpTPg", "http://ns.adobe.com/xap/1.0/t/pg/"),
    ("xmpG", "http://ns.adobe.com/xap/1.0/g/"),
    ("xmpDM", "http://ns.adobe.com/xmp/1.0/DynamicMedia/"),
    ("pdf", "http://ns.adobe.com/pdf/1.3/"),
    ("photoshop", "http://ns.adobe.com/photoshop/1.0/"),
    ("crs", "http://ns.adobe.com/camera-raw-settings/1.0/"),
    ("tiff", "http://ns.adobe.com/tiff/1.0/"),
    ("exif", "http://ns.adobe.com/exif/1.0/"),
    ("aux", "http://ns.adobe.com/exif/1.0/aux/"),
    ("iptc", "http://iptc.org/std/Iptc4xmpCore/1.0/xmlns/"),
    ("iptcExt", "http://iptc.org/std/Iptc4xmpExt/2008-02-29/"),
    ("lr", "http://ns.adobe.com/lightroom/1.0/"),
    ("stRef", "http://ns.adobe.com/xap/1.0/sType/ResourceRef#"),
    ("stEvt", "http://ns.adobe.com/xap/1.0/sType/ResourceEvent#"),
    ("digiKam", "http://www.digikam.org/ns/1.0/"),
    ("MicrosoftPhoto", "http://ns.microsoft.com/photo/1.0/"),
];

/// Prefix ↔ URI table for XMP keys.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NamespaceRegistry {
    /// `(name, prefix)` in registration order.
    custom: Vec<(String, String)>,
}

impl NamespaceRegistry {
    /// A registry holding only the builtin namespaces.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `name` (a URI ending in `/`) under `prefix`.
    ///
    /// A builtin namespace may be given an additional prefix; a prefix can only
    /// be bound once.
    pub fn register(&mut self, name: &str, prefix: &str) -> Result<(), NamespaceError> {
        if !name.ends_with('/') {
            return Err(NamespaceError::MissingSlash(name.to_string()));
        }
        if self.is_known_prefix(prefix) {
            return Err(NamespaceError::PrefixTaken(prefix.to_string()));
        }
        log::debug!("Registering XMP namespace {name} as {prefix:?}");
        self.custom.push((name.to_string(), prefix.to_string()));
        Ok(())
    }

    /// Remove the most recent custom prefix bound to `name`.
    pub fn unregister(&mut self, name: &str) -> Result<(), NamespaceError> {
        match self.custom.iter().rposition(|(n, _)| n == name) {
            Some(index) => {
                let (_, prefix) = self.custom.remove(index);
                log::debug!("Unregistered XMP namespace {name} ({prefix:?})");
                Ok(())
            }
            None if BUILTIN.iter().any(|(_, uri)| *uri == name) => {
                Err(NamespaceError::Builtin(name.to_string()))
            }
            None => Err(NamespaceError::Unknown(name.to_string())),
        }
    }

    /// Drop every custom namespace.
    pub fn unregister_all(&mut self) {
        if !self.custom.is_empty() {
            log::debug!(
                "Unregistering {} custom XMP namespace(s)",
                self.custom.len()
            );
        }
        self.custom.clear();
    }

    pub fn is_known_prefix(&self, prefix: &str) -> bool {
        self.uri_for(prefix).is_some()
    }

    pub fn is_builtin_prefix(&self, prefix: &str) -> bool {
        BUILTIN.iter().any(|(p, _)| *p == prefix)
    }

    pub fn uri_for(&self, prefix: &str) -> Option<&str> {
        BUILTIN
            .iter()
            .find(|(p, _)| *p == prefix)
            .map(|(_, uri)| *uri)
            .or_else(|| {
                self.custom
                    .iter()
                    .find(|(_, p)| p == prefix)
                    .map(|(uri, _)| uri.as_str())
            })
    }

    /// Custom registrations as `(name, prefix)`, oldest first.
    pub fn custom(&self) -> impl Iterator<Item = (&str, &str)> {
        self.custom.iter().map(|(n, p)| (n.as_str(), p.as_str()))
    }
}
