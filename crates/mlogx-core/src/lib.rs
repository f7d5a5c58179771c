//! mlogx Core - Core types and command tables for the mlogx compiler
//!
//! This crate provides the data shared by the parser and the compiler:
//! - Generic argument type registry and game content tables
//! - Command definitions, shorthand expansions and port rules
//! - Compiler constants and the icon table
//! - Source lines, statements and programs
//! - Error types

pub mod command;
pub mod error;
pub mod icons;
pub mod program;
pub mod types;

// Re-export commonly used types
pub use command::{Arg, ArgType, CommandDefinition, CommandRegistry, PortingMode, TypedVariable};
pub use error::{DefinitionError, Result};
pub use icons::IconMap;
pub use program::{Line, Program, Statement};
pub use types::{ArgTypeRegistry, CompilerConstants, ConstValue, GameContent, GenericArgType};
