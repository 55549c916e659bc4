//! Style maps
//!
//! A flat `property -> value` map written straight into an element's
//! `style` attribute. Properties are kept sorted so the emitted CSS text is
//! stable between renders.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

/// Malformed style declarations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StyleError {
    #[error("invalid CSS property name {0:?}")]
    InvalidProperty(String),
    #[error("property {0:?} has an empty value")]
    EmptyValue(String),
    #[error("invalid value {value:?} for property {property:?}")]
    InvalidValue { property: String, value: String },
    #[error("declaration {0:?} is missing a ':'")]
    MissingColon(String),
}

/// CSS property name -> value
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(into = "BTreeMap<String, String>")]
pub struct StyleMap {
    properties: BTreeMap<String, String>,
}

/// JSON style values may be written as numbers (`{"opacity": 0}`)
#[derive(Deserialize)]
#[serde(untagged)]
enum RawStyleValue {
    Text(String),
    Number(serde_json::Number),
}

impl StyleMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert for literals. Unchecked until [`validate`](Self::validate);
    /// use [`insert`](Self::insert) or [`parse`](Self::parse) for external data.
    pub fn with(mut self, property: &str, value: impl Into<String>) -> Self {
        let property = property.trim().to_ascii_lowercase();
        self.properties.insert(property, value.into().trim().to_string());
        self
    }

    /// Insert or replace a declaration
    pub fn insert(&mut self, property: &str, value: impl Into<String>) -> Result<(), StyleError> {
        let property = property.trim().to_ascii_lowercase();
        let value = value.into().trim().to_string();
        check_declaration(&property, &value)?;
        self.properties.insert(property, value);
        Ok(())
    }

    pub fn get(&self, property: &str) -> Option<&str> {
        self.properties.get(property).map(String::as_str)
    }

    pub fn contains(&self, property: &str) -> bool {
        self.properties.contains_key(property)
    }

    pub fn remove(&mut self, property: &str) -> Option<String> {
        self.properties.remove(property)
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.properties.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// A copy of `self` overlaid with `other`; `other` wins on conflicts
    pub fn merged(&self, other: &StyleMap) -> StyleMap {
        let mut properties = self.properties.clone();
        properties.extend(other.properties.iter().map(|(k, v)| (k.clone(), v.clone())));
        StyleMap { properties }
    }

    /// Re-check every declaration
    pub fn validate(&self) -> Result<(), StyleError> {
        self.properties
            .iter()
            .try_for_each(|(property, value)| check_declaration(property, value))
    }

    /// Parse inline declarations: `opacity: 0; transform: translateX(-100%)`
    pub fn parse(text: &str) -> Result<Self, StyleError> {
        let mut map = StyleMap::new();
        for decl in text.split(';').map(str::trim).filter(|d| !d.is_empty()) {
            let (property, value) = decl
                .split_once(':')
                .ok_or_else(|| StyleError::MissingColon(decl.to_string()))?;
            map.insert(property, value)?;
        }
        Ok(map)
    }

    /// Serialize as an inline `style` attribute value
    pub fn to_css_text(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for StyleMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (property, value)) in self.properties.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{property}: {value};")?;
        }
        Ok(())
    }
}

impl FromStr for StyleMap {
    type Err = StyleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl<'de> Deserialize<'de> for StyleMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = BTreeMap::<String, RawStyleValue>::deserialize(deserializer)?;
        let mut map = StyleMap::new();
        for (property, value) in raw {
            let value = match value {
                RawStyleValue::Text(text) => text,
                RawStyleValue::Number(number) => number.to_string(),
            };
            map.insert(&property, value).map_err(serde::de::Error::custom)?;
        }
        Ok(map)
    }
}

impl From<StyleMap> for BTreeMap<String, String> {
    fn from(map: StyleMap) -> Self {
        map.properties
    }
}

fn check_declaration(property: &str, value: &str) -> Result<(), StyleError> {
    let mut chars = property.chars();
    let valid_start = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '-');
    if !valid_start || !chars.all(|c| c.is_ascii_alphanumeric() || c == '-') {
        return Err(StyleError::InvalidProperty(property.to_string()));
    }
    if value.is_empty() {
        return Err(StyleError::EmptyValue(property.to_string()));
    }
    if value.contains([';', '{', '}']) || !parens_balanced(value) {
        return Err(StyleError::InvalidValue {
            property: property.to_string(),
            value: value.to_string(),
        });
    }
    Ok(())
}

fn parens_balanced(value: &str) -> bool {
    let mut depth = 0i32;
    for c in value.chars() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth < 0 {
                    return false;
                }
            }
            _ => {}
        }
    }
    depth == 0
}
