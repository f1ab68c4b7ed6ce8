//! Property-list sink
//!
//! Shapes and styles are serialized into an ordered key/value map whose keys
//! follow the ODF-like vocabulary of the downstream document sink
//! (`draw:*`, `svg:*`, `fo:*`, `style:*`, `librevenge:*`). Numeric values
//! carry the unit the sink expects.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

use crate::error::PropertyError;

/// Unit attached to a numeric property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    /// 1/72 inch
    Point,
    Inch,
    /// Stored as a fraction, `0.5` is `50%`
    Percent,
    /// Unitless, or a unit implied by the key (cm for shadow offsets)
    Generic,
    /// 1/1440 inch
    Twip,
}

impl Unit {
    /// Converts `value` to inches, `None` for units that are not lengths.
    pub fn to_inch(self, value: f64) -> Option<f64> {
        match self {
            Unit::Point => Some(value / 72.0),
            Unit::Inch => Some(value),
            Unit::Twip => Some(value / 1440.0),
            Unit::Percent | Unit::Generic => None,
        }
    }
}

/// One value of a [`PropertyList`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyValue {
    Double { value: f64, unit: Unit },
    Int(i32),
    Bool(bool),
    String(String),
    /// Raw bytes, rendered as base64
    Binary(#[serde(serialize_with = "serialize_base64")] Vec<u8>),
    /// Nested lists (gradient stops, ...)
    List(Vec<PropertyList>),
}

fn serialize_base64<S: Serializer>(data: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&STANDARD.encode(data))
}

impl PropertyValue {
    /// Name of the variant, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            PropertyValue::Double { .. } => "double",
            PropertyValue::Int(_) => "int",
            PropertyValue::Bool(_) => "bool",
            PropertyValue::String(_) => "string",
            PropertyValue::Binary(_) => "binary",
            PropertyValue::List(_) => "list",
        }
    }

    /// The value as the sink would print it.
    pub fn as_string(&self) -> String {
        match self {
            PropertyValue::Double { value, unit } => match unit {
                Unit::Point => format!("{}pt", format_number(*value)),
                Unit::Inch => format!("{}in", format_number(*value)),
                Unit::Percent => format!("{}%", format_number(*value * 100.0)),
                Unit::Generic => format_number(*value),
                Unit::Twip => format!("{}*", format_number(*value)),
            },
            PropertyValue::Int(v) => v.to_string(),
            PropertyValue::Bool(v) => v.to_string(),
            PropertyValue::String(v) => v.clone(),
            PropertyValue::Binary(data) => STANDARD.encode(data),
            PropertyValue::List(lists) => format!("[{} entries]", lists.len()),
        }
    }
}

fn format_number(value: f64) -> String {
    let rounded = (value * 10_000.0).round() / 10_000.0;
    if rounded == 0.0 {
        return "0".to_string();
    }
    format!("{rounded}")
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_string())
    }
}

/// Ordered key → value map handed to the document sink.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct PropertyList {
    entries: BTreeMap<String, PropertyValue>,
}

impl PropertyList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: PropertyValue) {
        self.entries.insert(key.into(), value);
    }

    pub fn insert_double(&mut self, key: impl Into<String>, value: f64, unit: Unit) {
        self.insert(key, PropertyValue::Double { value, unit });
    }

    pub fn insert_point(&mut self, key: impl Into<String>, value: f64) {
        self.insert_double(key, value, Unit::Point);
    }

    pub fn insert_inch(&mut self, key: impl Into<String>, value: f64) {
        self.insert_double(key, value, Unit::Inch);
    }

    pub fn insert_percent(&mut self, key: impl Into<String>, value: f64) {
        self.insert_double(key, value, Unit::Percent);
    }

    pub fn insert_generic(&mut self, key: impl Into<String>, value: f64) {
        self.insert_double(key, value, Unit::Generic);
    }

    pub fn insert_int(&mut self, key: impl Into<String>, value: i32) {
        self.insert(key, PropertyValue::Int(value));
    }

    pub fn insert_bool(&mut self, key: impl Into<String>, value: bool) {
        self.insert(key, PropertyValue::Bool(value));
    }

    pub fn insert_string(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.insert(key, PropertyValue::String(value.into()));
    }

    pub fn insert_binary(&mut self, key: impl Into<String>, data: Vec<u8>) {
        self.insert(key, PropertyValue::Binary(data));
    }

    pub fn insert_list(&mut self, key: impl Into<String>, lists: Vec<PropertyList>) {
        self.insert(key, PropertyValue::List(lists));
    }

    pub fn get(&self, key: &str) -> Option<&PropertyValue> {
        self.entries.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// The numeric value stored under `key`, whatever its unit.
    pub fn get_double(&self, key: &str) -> Result<f64, PropertyError> {
        match self.lookup(key)? {
            PropertyValue::Double { value, .. } => Ok(*value),
            PropertyValue::Int(v) => Ok(f64::from(*v)),
            _ => Err(PropertyError::WrongKind {
                key: key.to_string(),
                expected: "double",
            }),
        }
    }

    pub fn get_str(&self, key: &str) -> Result<&str, PropertyError> {
        match self.lookup(key)? {
            PropertyValue::String(v) => Ok(v),
            _ => Err(PropertyError::WrongKind {
                key: key.to_string(),
                expected: "string",
            }),
        }
    }

    pub fn get_bool(&self, key: &str) -> Result<bool, PropertyError> {
        match self.lookup(key)? {
            PropertyValue::Bool(v) => Ok(*v),
            _ => Err(PropertyError::WrongKind {
                key: key.to_string(),
                expected: "bool",
            }),
        }
    }

    pub fn get_list(&self, key: &str) -> Result<&[PropertyList], PropertyError> {
        match self.lookup(key)? {
            PropertyValue::List(v) => Ok(v),
            _ => Err(PropertyError::WrongKind {
                key: key.to_string(),
                expected: "list",
            }),
        }
    }

    fn lookup(&self, key: &str) -> Result<&PropertyValue, PropertyError> {
        self.entries.get(key).ok_or_else(|| PropertyError::Missing {
            key: key.to_string(),
        })
    }

    pub fn remove(&mut self, key: &str) -> Option<PropertyValue> {
        self.entries.remove(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &PropertyValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl fmt::Display for PropertyList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (key, value) in self.iter() {
            if !first {
                f.write_str(" ")?;
            }
            first = false;
            write!(f, "{key}=\"{value}\"")?;
        }
        Ok(())
    }
}
