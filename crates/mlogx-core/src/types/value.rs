//! Compiler constant values
//!
//! Compiler constants are substituted into source text before tokenization.
//! A constant is a scalar, an ordered list, or a record of named values.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// A compile-time constant value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConstValue {
    Bool(bool),
    Number(f64),
    String(String),
    List(Vec<ConstValue>),
    Record(BTreeMap<String, ConstValue>),
}

impl ConstValue {
    /// Text inserted in place of a `$name` reference
    ///
    /// Lists interpolate as their elements joined by single spaces.
    pub fn render(&self) -> String {
        match self {
            ConstValue::Bool(value) => value.to_string(),
            ConstValue::Number(value) => format_number(*value),
            ConstValue::String(value) => value.clone(),
            ConstValue::List(values) => values
                .iter()
                .map(ConstValue::render)
                .collect::<Vec<_>>()
                .join(" "),
            ConstValue::Record(_) => serde_json::to_string(self).unwrap_or_default(),
        }
    }

    /// `$record.field`
    pub fn field(&self, name: &str) -> Option<&ConstValue> {
        match self {
            ConstValue::Record(fields) => fields.get(name),
            _ => None,
        }
    }

    /// `$list[index]`
    pub fn index(&self, index: usize) -> Option<&ConstValue> {
        match self {
            ConstValue::List(values) => values.get(index),
            _ => None,
        }
    }

    /// `$list.length`
    pub fn length(&self) -> Option<usize> {
        match self {
            ConstValue::List(values) => Some(values.len()),
            _ => None,
        }
    }
}

impl From<&str> for ConstValue {
    fn from(value: &str) -> Self {
        ConstValue::String(value.to_string())
    }
}

impl From<String> for ConstValue {
    fn from(value: String) -> Self {
        ConstValue::String(value)
    }
}

impl From<f64> for ConstValue {
    fn from(value: f64) -> Self {
        ConstValue::Number(value)
    }
}

impl From<bool> for ConstValue {
    fn from(value: bool) -> Self {
        ConstValue::Bool(value)
    }
}

/// Integers print without a fractional part, as the game would
fn format_number(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}

/// Named compiler constants
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CompilerConstants {
    values: HashMap<String, ConstValue>,
}

impl CompilerConstants {
    pub fn new() -> Self {
        Self::default()
    }

    /// A single binding, used for loop variables
    pub fn single(name: &str, value: impl Into<ConstValue>) -> Self {
        let mut constants = Self::new();
        constants.insert(name, value);
        constants
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn insert(&mut self, name: &str, value: impl Into<ConstValue>) {
        self.values.insert(name.to_string(), value.into());
    }

    /// Builder-style insert
    pub fn with(mut self, name: &str, value: impl Into<ConstValue>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn get(&self, name: &str) -> Option<&ConstValue> {
        self.values.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Add every constant from `other` that is not already defined here
    pub fn merge_missing(&mut self, other: CompilerConstants) {
        for (name, value) in other.values {
            self.values.entry(name).or_insert(value);
        }
    }
}
