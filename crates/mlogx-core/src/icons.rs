//! Icon name table
//!
//! The game renders private-use codepoints as content icons. The table is
//! loaded elsewhere and handed in; the compiler exposes it as the constant
//! record `$icon.<name>`.

use crate::error::Result;
use crate::types::ConstValue;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Codepoint -> short symbolic name
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IconMap {
    icons: BTreeMap<u32, String>,
}

impl IconMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a `{"63734": "copper", ...}` table
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn insert(&mut self, codepoint: u32, name: &str) {
        self.icons.insert(codepoint, name.to_string());
    }

    pub fn name_of(&self, codepoint: u32) -> Option<&str> {
        self.icons.get(&codepoint).map(String::as_str)
    }

    /// The icon character for a name
    pub fn glyph(&self, name: &str) -> Option<char> {
        self.icons
            .iter()
            .find(|(_, icon)| icon.as_str() == name)
            .and_then(|(codepoint, _)| char::from_u32(*codepoint))
    }

    pub fn len(&self) -> usize {
        self.icons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.icons.is_empty()
    }

    /// Every icon as a record of name -> glyph; invalid codepoints are skipped
    pub fn as_constants(&self) -> ConstValue {
        let record = self
            .icons
            .iter()
            .filter_map(|(codepoint, name)| {
                char::from_u32(*codepoint)
                    .map(|glyph| (name.clone(), ConstValue::String(glyph.to_string())))
            })
            .collect();
        ConstValue::Record(record)
    }
}
