//! Compiler error types

use mlogx_core::Line;
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Classification of a compile error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ErrorKind {
    NoCommand,
    ArgumentCount,
    BadStructure,
    Type,
    UnmatchedBrace,
    UnterminatedBlock,
    InvalidBlock,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::NoCommand => "noCommand",
            ErrorKind::ArgumentCount => "argumentCount",
            ErrorKind::BadStructure => "badStructure",
            ErrorKind::Type => "type",
            ErrorKind::UnmatchedBrace => "unmatchedBrace",
            ErrorKind::UnterminatedBlock => "unterminatedBlock",
            ErrorKind::InvalidBlock => "invalidBlock",
        }
    }

    /// Errors that corrupt the block stack abort compilation regardless of options
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            ErrorKind::UnmatchedBrace | ErrorKind::UnterminatedBlock | ErrorKind::InvalidBlock
        )
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Compiler error
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CompileError {
    /// Unknown command name
    #[error("{line}: Unknown command \"{command}\"")]
    NoCommand { line: Line, command: String },

    /// No overload accepts this many arguments
    #[error("{line}: {message}")]
    ArgumentCount { line: Line, message: String },

    /// An argument has the wrong shape for every overload of the right arity
    #[error("{line}: {message}")]
    BadStructure { line: Line, message: String },

    /// A variable is used where its type is not accepted
    #[error("{line}: {message}")]
    Type { line: Line, message: String },

    /// `}` with no open block
    #[error("{line}: No block to end")]
    UnmatchedBrace { line: Line },

    /// A block was still open at end of program
    #[error("{line}: Unterminated {block} block")]
    UnterminatedBlock { line: Line, block: String },

    /// Malformed or unknown block header
    #[error("{line}: Invalid block header: {message}")]
    InvalidBlock { line: Line, message: String },
}

impl CompileError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CompileError::NoCommand { .. } => ErrorKind::NoCommand,
            CompileError::ArgumentCount { .. } => ErrorKind::ArgumentCount,
            CompileError::BadStructure { .. } => ErrorKind::BadStructure,
            CompileError::Type { .. } => ErrorKind::Type,
            CompileError::UnmatchedBrace { .. } => ErrorKind::UnmatchedBrace,
            CompileError::UnterminatedBlock { .. } => ErrorKind::UnterminatedBlock,
            CompileError::InvalidBlock { .. } => ErrorKind::InvalidBlock,
        }
    }

    pub fn is_fatal(&self) -> bool {
        self.kind().is_fatal()
    }

    /// Source line the error points at
    pub fn line(&self) -> &Line {
        match self {
            CompileError::NoCommand { line, .. }
            | CompileError::ArgumentCount { line, .. }
            | CompileError::BadStructure { line, .. }
            | CompileError::Type { line, .. }
            | CompileError::UnmatchedBrace { line }
            | CompileError::UnterminatedBlock { line, .. }
            | CompileError::InvalidBlock { line, .. } => line,
        }
    }
}

/// Why one overload rejected a line
#[derive(Debug, Clone, PartialEq)]
pub struct CommandError {
    pub kind: ErrorKind,
    pub message: String,
    /// Raised by a shorthand overload; shown only when nothing else failed
    pub low_priority: bool,
}

impl CommandError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            low_priority: false,
        }
    }

    pub fn low_priority(mut self, low_priority: bool) -> Self {
        self.low_priority = low_priority;
        self
    }

    /// Attach the source line
    pub fn at(&self, line: &Line, command: &str) -> CompileError {
        let line = line.clone();
        let message = self.message.clone();
        match self.kind {
            ErrorKind::NoCommand => CompileError::NoCommand {
                line,
                command: command.to_string(),
            },
            ErrorKind::ArgumentCount => CompileError::ArgumentCount { line, message },
            ErrorKind::Type => CompileError::Type { line, message },
            ErrorKind::UnmatchedBrace => CompileError::UnmatchedBrace { line },
            ErrorKind::UnterminatedBlock => CompileError::UnterminatedBlock {
                line,
                block: message,
            },
            ErrorKind::InvalidBlock => CompileError::InvalidBlock { line, message },
            ErrorKind::BadStructure => CompileError::BadStructure { line, message },
        }
    }
}

/// Per-overload failures for one line
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CommandErrors {
    errors: Vec<CommandError>,
}

impl CommandErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, error: CommandError) {
        self.errors.push(error);
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CommandError> {
        self.errors.iter()
    }

    /// The error worth reporting
    ///
    /// Errors from canonical overloads win over low priority ones; among
    /// those, a structure error (right arity, wrong token) is more specific
    /// than an argument count error.
    pub fn most_relevant(&self) -> Option<&CommandError> {
        let preferred: Vec<&CommandError> = if self.errors.iter().any(|e| !e.low_priority) {
            self.errors.iter().filter(|e| !e.low_priority).collect()
        } else {
            self.errors.iter().collect()
        };
        [ErrorKind::NoCommand, ErrorKind::BadStructure, ErrorKind::Type]
            .iter()
            .find_map(|kind| preferred.iter().find(|e| e.kind == *kind))
            .or_else(|| preferred.first())
            .copied()
    }
}

impl From<CommandError> for CommandErrors {
    fn from(error: CommandError) -> Self {
        Self {
            errors: vec![error],
        }
    }
}

/// Result type for compiler operations
pub type Result<T> = std::result::Result<T, CompileError>;
