use crate::command::TypedVariable;
use crate::program::Line;

/// A compiled output line
///
/// Keeps the source line it came from, the cleaned text that was resolved, and
/// the fully rewritten text that is emitted.
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    /// Emitted text
    pub text: String,
    /// Source text after comment removal, constant substitution and trimming
    pub cleaned: String,
    pub source: Line,
    pub defined: Vec<TypedVariable>,
    pub used: Vec<TypedVariable>,
}

impl Statement {
    pub fn new(text: impl Into<String>, cleaned: impl Into<String>, source: Line) -> Self {
        Self {
            text: text.into(),
            cleaned: cleaned.into(),
            source,
            defined: Vec::new(),
            used: Vec::new(),
        }
    }

    pub fn with_variables(mut self, defined: Vec<TypedVariable>, used: Vec<TypedVariable>) -> Self {
        self.defined = defined;
        self.used = used;
        self
    }

    /// Text as written in the source file
    pub fn original_text(&self) -> &str {
        &self.source.text
    }
}
