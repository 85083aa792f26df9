//! IPTC tags.
//!
//! IPTC datasets are multi-valued: a tag's raw value is a list of strings and
//! its decoded value a [`NotifyingList`]. Editing that list in place marks the
//! raw value stale; it is re-encoded the next time it is read.

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;
use std::str::FromStr;

use crate::convert::datetime::{
    format_iptc_date, format_iptc_time, iptc_parse_date, iptc_parse_time,
};
use crate::convert::numeric::parse_int;
use crate::error::{IptcValueError, TagError, TagResult, TypeError};
use crate::tags::{Cached, Family, TagKey, catalog};
use crate::value::{Listener, NotifyingList, Value};

/// Declared type of an IPTC dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IptcType {
    Short,
    String,
    Date,
    Time,
    Undefined,
}

impl IptcType {
    pub fn as_str(&self) -> &'static str {
        match self {
            IptcType::Short => "Short",
            IptcType::String => "String",
            IptcType::Date => "Date",
            IptcType::Time => "Time",
            IptcType::Undefined => "Undefined",
        }
    }
}

impl fmt::Display for IptcType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IptcType {
    type Err = TagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "Short" => IptcType::Short,
            "String" => IptcType::String,
            "Date" => IptcType::Date,
            "Time" => IptcType::Time,
            "Undefined" => IptcType::Undefined,
            other => {
                return Err(TagError::UnknownType {
                    family: "IPTC",
                    type_name: other.to_string(),
                });
            }
        })
    }
}

/// Per-item raw ↔ host conversion for one IPTC type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IptcConverter {
    iptc_type: IptcType,
}

impl IptcConverter {
    pub fn new(iptc_type: IptcType) -> Self {
        Self { iptc_type }
    }

    fn error(&self, value: impl ToString) -> IptcValueError {
        IptcValueError::new(value, self.iptc_type)
    }

    pub fn decode(&self, raw: &str) -> Result<Value, IptcValueError> {
        let value = match self.iptc_type {
            IptcType::Short => parse_int(raw).map(Value::Int),
            IptcType::String | IptcType::Undefined => Some(Value::Str(raw.to_string())),
            IptcType::Date => iptc_parse_date(raw).map(Value::Date),
            IptcType::Time => iptc_parse_time(raw).map(Value::Time),
        };
        value.ok_or_else(|| self.error(raw))
    }

    pub fn encode(&self, value: &Value) -> Result<String, IptcValueError> {
        match (self.iptc_type, value) {
            (IptcType::Short, Value::Int(i)) => Ok(i.to_string()),
            (IptcType::String | IptcType::Undefined, Value::Str(s)) => Ok(s.clone()),
            (IptcType::Date, _) => format_iptc_date(value).map_err(|_| self.error(value)),
            (IptcType::Time, _) => format_iptc_time(value).map_err(|_| self.error(value)),
            (_, other) => Err(self.error(other)),
        }
    }
}

/// Flags the owning tag's raw value as out of date.
#[derive(Debug, Default)]
struct StaleFlag(Cell<bool>);

impl Listener for StaleFlag {
    fn contents_changed(&self) -> anyhow::Result<()> {
        self.0.set(true);
        Ok(())
    }
}

/// An IPTC tag: key, declared type, repeatability and values.
#[derive(Debug)]
pub struct IptcTag {
    key: TagKey,
    converter: IptcConverter,
    repeatable: bool,
    raw: Vec<String>,
    values: Cached<NotifyingList<Value>>,
    stale: Rc<StaleFlag>,
}

impl IptcTag {
    /// An empty tag, typed from the catalog.
    pub fn new(key: &str) -> TagResult<Self> {
        let key = TagKey::parse(key)?;
        if key.family() != Family::Iptc {
            return Err(TagError::UnknownKey(key.to_string()));
        }
        let full = key.to_string();
        let (type_name, repeatable) =
            catalog::iptc_info(&full).ok_or(TagError::UnknownKey(full))?;
        Ok(Self {
            key,
            converter: IptcConverter::new(type_name.parse()?),
            repeatable,
            raw: Vec::new(),
            values: Cached::Absent,
            stale: Rc::default(),
        })
    }

    /// A tag built from host values; `values` must be a [`Value::List`].
    pub fn with_values(key: &str, values: impl Into<Value>) -> TagResult<Self> {
        let mut tag = Self::new(key)?;
        tag.set_value(values.into())?;
        Ok(tag)
    }

    /// A tag as read from an image.
    pub fn from_record(key: &str, raw: Vec<String>) -> TagResult<Self> {
        let mut tag = Self::new(key)?;
        tag.raw = raw;
        Ok(tag)
    }

    pub fn key(&self) -> &TagKey {
        &self.key
    }

    pub fn iptc_type(&self) -> IptcType {
        self.converter.iptc_type
    }

    pub fn type_name(&self) -> &'static str {
        self.converter.iptc_type.as_str()
    }

    pub fn is_repeatable(&self) -> bool {
        self.repeatable
    }

    fn check_repeatable(&self, count: usize) -> TagResult<()> {
        if count > 1 && !self.repeatable {
            return Err(TagError::NonRepeatable {
                key: self.key.to_string(),
            });
        }
        Ok(())
    }

    fn watched(&self, items: Vec<Value>) -> NotifyingList<Value> {
        let mut list = NotifyingList::new(items);
        list.register_listener(self.stale.clone());
        list
    }

    /// The raw strings, re-encoded first if the values were edited in place.
    pub fn raw_value(&mut self) -> TagResult<&[String]> {
        if self.stale.0.get() {
            if let Cached::Present(values) = &self.values {
                self.check_repeatable(values.len())?;
                let raw = values
                    .iter()
                    .map(|v| self.converter.encode(v))
                    .collect::<Result<Vec<_>, _>>()?;
                log::debug!("Re-encoded {} after in-place edit", self.key);
                self.raw = raw;
            }
            self.stale.0.set(false);
        }
        Ok(&self.raw)
    }

    /// Replace the raw strings; the decoded values are dropped.
    pub fn set_raw_value(&mut self, raw: Vec<String>) -> TagResult<()> {
        self.check_repeatable(raw.len())?;
        for item in &raw {
            self.converter.decode(item)?;
        }
        self.raw = raw;
        self.values = Cached::Absent;
        self.stale.0.set(false);
        Ok(())
    }

    /// The decoded values, decoding the raw strings on first access.
    pub fn values(&mut self) -> TagResult<&NotifyingList<Value>> {
        self.values_mut().map(|values| &*values)
    }

    /// The decoded values for in-place editing.
    pub fn values_mut(&mut self) -> TagResult<&mut NotifyingList<Value>> {
        if !self.values.is_present() {
            let items = self
                .raw
                .iter()
                .map(|raw| self.converter.decode(raw))
                .collect::<Result<Vec<_>, _>>()?;
            self.values = Cached::Present(self.watched(items));
        }
        match &mut self.values {
            Cached::Present(values) => Ok(values),
            Cached::Absent => Err(TagError::UnknownKey(self.key.to_string())),
        }
    }

    /// The decoded values as a [`Value::List`].
    pub fn value(&mut self) -> TagResult<Value> {
        Ok(Value::List(self.values()?.to_vec()))
    }

    /// Assign a [`Value::List`] of host values, re-encoding the raw strings.
    pub fn set_value(&mut self, value: Value) -> TagResult<()> {
        let items = match value {
            Value::List(items) => items,
            other => return Err(TypeError::new("a list", other.kind()).into()),
        };
        self.check_repeatable(items.len())?;
        let raw = items
            .iter()
            .map(|v| self.converter.encode(v))
            .collect::<Result<Vec<_>, _>>()?;
        self.raw = raw;
        self.values = Cached::Present(self.watched(items));
        self.stale.0.set(false);
        Ok(())
    }
}
