//! Command definitions
//!
//! Arg templates, per-command overloads, and the registries built from the
//! declarative command tables.

pub mod arg;
pub mod definition;
pub mod expansions;
pub mod port_rules;
pub mod registry;
pub mod table;

pub use arg::{Arg, ArgType};
pub use definition::{
    CommandDefinition, PortRule, PortingMode, ReplaceRule, TypedVariable, VariableExtractor,
};
pub use registry::CommandRegistry;
pub use table::CommandSpec;
