//! Error types for mlogx core tables

use thiserror::Error;

/// Raised while building argument, command or content tables
#[derive(Error, Debug)]
pub enum DefinitionError {
    /// An arg template did not follow `[...]name:[*]type[?[=default]]`
    #[error("Invalid arg template \"{template}\": {message}")]
    InvalidArg { template: String, message: String },

    /// An arg template named a category that is not registered
    #[error("Unknown argument type \"{0}\"")]
    UnknownType(String),

    /// A command's arg list breaks the optional/spread ordering rules
    #[error("Invalid definition for command \"{command}\": {message}")]
    InvalidDefinition { command: String, message: String },

    /// The argument type registry references itself or an unregistered category
    #[error("Argument type registry is inconsistent: {0}")]
    InconsistentRegistry(String),

    /// A content table entry cannot be used as a token
    #[error("Invalid name \"{name}\" in content table \"{table}\"")]
    InvalidContent { table: String, name: String },

    /// JSON input could not be parsed
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML input could not be parsed
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, DefinitionError>;
