// crates/wrapline-core/src/properties.rs
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    String(String),
    Int(i32),
    Float(f32),
    Bool(bool),
    /// Keyword-style value, e.g. `start` for `text-align`
    Enum(String),
}

impl PropertyValue {
    pub fn as_string(&self) -> Option<&str> {
        match self {
            PropertyValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f32> {
        match self {
            PropertyValue::Float(f) => Some(*f),
            PropertyValue::Int(i) => Some(*i as f32),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            PropertyValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Keywords are accepted from both enum and plain string values.
    pub fn as_enum(&self) -> Option<&str> {
        match self {
            PropertyValue::Enum(s) | PropertyValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Parse a raw `value` from a `key=value` style source.
    ///
    /// Booleans and numbers are recognised first, anything else is kept as a
    /// keyword so it can feed enum-valued properties.
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        match raw {
            "true" => return PropertyValue::Bool(true),
            "false" => return PropertyValue::Bool(false),
            _ => {}
        }

        if let Ok(i) = raw.parse::<i32>() {
            return PropertyValue::Int(i);
        }
        if let Ok(f) = raw.parse::<f32>() {
            return PropertyValue::Float(f);
        }

        PropertyValue::Enum(raw.to_string())
    }
}

/// Read-only, keyed lookup into a style/attribute store.
///
/// Every getter returns `None` when the key is absent *or* holds a value of a
/// different kind, so callers can treat both as "not set here".
pub trait PropertySource {
    fn get_bool(&self, key: &str) -> Option<bool>;
    fn get_number(&self, key: &str) -> Option<f32>;
    fn get_enum_string(&self, key: &str) -> Option<&str>;
}

impl PropertySource for HashMap<String, PropertyValue> {
    fn get_bool(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(PropertyValue::as_bool)
    }

    fn get_number(&self, key: &str) -> Option<f32> {
        self.get(key).and_then(PropertyValue::as_float)
    }

    fn get_enum_string(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(PropertyValue::as_enum)
    }
}

/// Simple string-keyed property store.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropertyMap {
    properties: HashMap<String, PropertyValue>,
}

impl PropertyMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: PropertyValue) -> Self {
        self.set(key, value);
        self
    }

    pub fn set(&mut self, key: impl Into<String>, value: PropertyValue) {
        self.properties.insert(key.into(), value);
    }

    pub fn remove(&mut self, key: &str) -> Option<PropertyValue> {
        self.properties.remove(key)
    }

    pub fn get(&self, key: &str) -> Option<&PropertyValue> {
        self.properties.get(key)
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    /// Parse a `key=value` assignment and store it.
    pub fn set_assignment(&mut self, assignment: &str) -> Option<&PropertyValue> {
        let (key, raw) = assignment.split_once('=')?;
        let key = key.trim();
        if key.is_empty() {
            return None;
        }
        self.properties
            .insert(key.to_string(), PropertyValue::parse(raw));
        self.properties.get(key)
    }
}

impl PropertySource for PropertyMap {
    fn get_bool(&self, key: &str) -> Option<bool> {
        self.properties.get_bool(key)
    }

    fn get_number(&self, key: &str) -> Option<f32> {
        self.properties.get_number(key)
    }

    fn get_enum_string(&self, key: &str) -> Option<&str> {
        self.properties.get_enum_string(key)
    }
}

impl FromIterator<(String, PropertyValue)> for PropertyMap {
    fn from_iter<I: IntoIterator<Item = (String, PropertyValue)>>(iter: I) -> Self {
        Self {
            properties: iter.into_iter().collect(),
        }
    }
}
