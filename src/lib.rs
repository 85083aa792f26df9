//! # tagconv
//!
//! Typed value conversion for image metadata tags of the EXIF, IPTC and XMP
//! families. Raw tag values, as stored by a metadata engine, are decoded into
//! structured values (integers, rationals, dates, times with a fixed offset,
//! GPS coordinates, MIME types, lists, language-alternative maps) and encoded
//! back.
//!
//! ## Quick Start
//!
//! A [`MetadataRecord`](metadata::MetadataRecord) holds the tags of one image.
//! The engine loads raw entries into it; host code reads and assigns values:
//!
//! ```rust
//! use tagconv::metadata::MetadataRecord;
//! use tagconv::tags::RawValue;
//! use tagconv::value::Value;
//!
//! fn main() -> Result<(), tagconv::error::TagError> {
//!     let mut record = MetadataRecord::new();
//!     record.load_exif("Exif.Image.DateTime", "Ascii", "2009:03:01 12:46:51")?;
//!     let creators = RawValue::Array(vec!["Eric Idle".into()]);
//!     record.load_xmp("Xmp.dc.creator", "seq ProperName", creators)?;
//!
//!     println!("{}", record.value("Exif.Image.DateTime")?);
//!
//!     record.set("Xmp.dc.title", "Sunset")?;
//!     record.set("Iptc.Application2.Keywords", vec!["sea", "sky"])?;
//!
//!     for entry in record.raw_entries()? {
//!         println!("{} [{}] = {}", entry.key, entry.type_name, entry.raw);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Lower-Level Usage
//!
//! Tags can be used on their own, and the codecs behind them are public:
//!
//! ```rust
//! use tagconv::convert::datetime::{format_xmp, xmp_parse};
//! use tagconv::tags::ExifTag;
//! use tagconv::value::{GpsCoordinate, Value};
//!
//! let mut tag = ExifTag::new("Exif.Photo.ExifVersion").unwrap();
//! tag.set_raw_value("48 50 50 49").unwrap();
//! assert_eq!(tag.value().unwrap(), &Value::from("0221"));
//!
//! let date = xmp_parse("1999-10-13T05:03:54.721+06:00").unwrap();
//! assert_eq!(format_xmp(&date).unwrap(), "1999-10-13T05:03:54.721000+06:00");
//!
//! let gps: GpsCoordinate = "54,59.3800N".parse().unwrap();
//! assert_eq!(gps.to_string(), "54,59,22N");
//! ```
//!
//! ## Date Conventions
//!
//! | Family | Form |
//! |--------|------|
//! | EXIF | `YYYY:MM:DD HH:MM:SS`, no offset; unparseable dates stay text |
//! | IPTC | `YYYY-MM-DD` dates, `HH:MM:SS±HH:MM` times |
//! | XMP | `YYYY[-MM[-DD[THH:MM[:SS[.f]][TZD]]]]` |
//!
//! ## Modules
//!
//! - [`value`]: host values, rationals, GPS coordinates, the notifying list
//! - [`convert`]: wire-text codecs shared by the families
//! - [`tags`]: EXIF, IPTC and XMP tags, the tag catalog, XMP namespaces
//! - [`metadata`]: the per-image tag record
//! - [`config`]: configuration loading and saving
//! - [`error`]: error types

pub mod config;
pub mod convert;
pub mod error;
pub mod metadata;
pub mod tags;
pub mod value;
