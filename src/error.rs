//! Error types for tag value conversion.
//!
//! Each tag family has its own value error, raised when a raw value or a host
//! value does not match the declared type of the tag. Shape errors (a string
//! where a list is required, `None` where a date is required) are
//! [`TypeError`]s. [`TagError`] gathers everything a tag or a record can fail
//! with.

use thiserror::Error;

use crate::value::gps::GpsError;
use crate::value::notifying::ListError;
use crate::value::rational::RationalError;

/// A raw or host value that does not conform to an EXIF type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid value for EXIF type [{type_name}]: {value}")]
pub struct ExifValueError {
    pub value: String,
    pub type_name: String,
}

/// A raw or host value that does not conform to an IPTC type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid value for IPTC type [{type_name}]: {value}")]
pub struct IptcValueError {
    pub value: String,
    pub type_name: String,
}

/// A raw or host value that does not conform to an XMP type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid value for XMP type [{type_name}]: {value}")]
pub struct XmpValueError {
    pub value: String,
    pub type_name: String,
}

impl ExifValueError {
    pub fn new(value: impl ToString, type_name: impl ToString) -> Self {
        Self {
            value: value.to_string(),
            type_name: type_name.to_string(),
        }
    }
}

impl IptcValueError {
    pub fn new(value: impl ToString, type_name: impl ToString) -> Self {
        Self {
            value: value.to_string(),
            type_name: type_name.to_string(),
        }
    }
}

impl XmpValueError {
    pub fn new(value: impl ToString, type_name: impl ToString) -> Self {
        Self {
            value: value.to_string(),
            type_name: type_name.to_string(),
        }
    }
}

/// The input has the wrong shape, whatever the tag family.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Expecting {expected}, got {found}")]
pub struct TypeError {
    pub expected: &'static str,
    pub found: &'static str,
}

impl TypeError {
    pub fn new(expected: &'static str, found: &'static str) -> Self {
        Self { expected, found }
    }
}

/// Failures of the XMP namespace registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NamespaceError {
    #[error("Namespace name should end with a /: {0:?}")]
    MissingSlash(String),
    #[error("Prefix {0:?} is already registered")]
    PrefixTaken(String),
    #[error("Namespace {0:?} is not registered")]
    Unknown(String),
    #[error("Namespace {0:?} is builtin and cannot be unregistered")]
    Builtin(String),
}

/// Everything a tag or a metadata record can fail with.
#[derive(Debug, Error)]
pub enum TagError {
    #[error(transparent)]
    Exif(#[from] ExifValueError),
    #[error(transparent)]
    Iptc(#[from] IptcValueError),
    #[error(transparent)]
    Xmp(#[from] XmpValueError),
    #[error(transparent)]
    Type(#[from] TypeError),
    #[error(transparent)]
    Rational(#[from] RationalError),
    #[error(transparent)]
    Gps(#[from] GpsError),
    #[error(transparent)]
    Namespace(#[from] NamespaceError),
    #[error(transparent)]
    List(#[from] ListError),
    /// More than one value assigned to a non-repeatable IPTC tag.
    #[error("Tag {key} is not repeatable")]
    NonRepeatable { key: String },
    /// Zero entries assigned to an XMP bag, seq, alt or Lang Alt.
    #[error("Empty {container} for tag {key}")]
    EmptyContainer {
        key: String,
        container: &'static str,
    },
    /// The key is malformed or names no known tag.
    #[error("Invalid key: {0}")]
    UnknownKey(String),
    /// The XMP key's prefix is not registered.
    #[error("Unknown XMP namespace prefix {prefix:?} in key {key}")]
    UnknownNamespace { key: String, prefix: String },
    /// The declared type string names no type of the family.
    #[error("Unknown {family} type: {type_name:?}")]
    UnknownType {
        family: &'static str,
        type_name: String,
    },
    /// The conversion is not implemented for the type or value shape.
    #[error("XMP conversion for type [{type_name}] is not implemented")]
    Unsupported { type_name: String },
    /// The comment charset cannot represent the text.
    #[error("Cannot encode comment of tag {key} with charset {charset:?}")]
    Unencodable { key: String, charset: String },
    /// A maker-note tag whose real type is only known once read from a record.
    #[error("Type of tag {key} is not known until it is read from an image")]
    TypeNotKnown { key: String },
}

/// Result type for tag operations.
pub type TagResult<T> = Result<T, TagError>;
