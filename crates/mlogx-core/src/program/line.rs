use serde::{Deserialize, Serialize};
use std::fmt;

/// One source line and where it came from
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Line {
    pub text: String,
    /// 1-based
    pub line_number: usize,
    pub source_filename: String,
}

impl Line {
    pub fn new(text: impl Into<String>, line_number: usize, source_filename: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            line_number,
            source_filename: source_filename.into(),
        }
    }

    /// Split a whole source file into numbered lines
    pub fn from_source(source: &str, filename: &str) -> Vec<Line> {
        source
            .lines()
            .enumerate()
            .map(|(index, text)| Line::new(text, index + 1, filename))
            .collect()
    }

    /// Filename without directories or extension: `src/main.mlogx` -> `main`
    pub fn file_stem(&self) -> &str {
        let name = self
            .source_filename
            .rsplit(['/', '\\'])
            .next()
            .unwrap_or(&self.source_filename);
        match name.split_once('.') {
            Some((stem, _)) if !stem.is_empty() => stem,
            _ => name,
        }
    }
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.source_filename, self.line_number)
    }
}
