//! Command definition registry
//!
//! Built once from a declarative table into ordered overload lists per name.

use crate::command::table::{self, CommandSpec};
use crate::command::CommandDefinition;
use crate::error::Result;
use std::collections::HashMap;
use std::sync::LazyLock;

static STANDARD: LazyLock<CommandRegistry> = LazyLock::new(|| {
    CommandRegistry::from_table(table::base_table()).expect("builtin command table is well-formed")
});

static COMPILER: LazyLock<CommandRegistry> = LazyLock::new(|| {
    CommandRegistry::from_table(table::compiler_table())
        .expect("builtin compiler command table is well-formed")
});

/// Name -> overloads, most specific first
#[derive(Debug, Clone, Default)]
pub struct CommandRegistry {
    commands: HashMap<String, Vec<CommandDefinition>>,
    /// Command names in table order
    names: Vec<String>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from table rows, keeping row order within each name
    pub fn from_table(specs: Vec<CommandSpec>) -> Result<Self> {
        let mut registry = Self::new();
        for spec in specs {
            let mut definition = CommandDefinition::new(spec.name, spec.args, spec.description)?;
            definition.replace = spec.replace;
            definition.port = spec.port;
            definition.defined_vars = spec.defined_vars;
            registry.register(definition);
        }
        log::debug!(
            "Built command registry: {} commands, {} overloads",
            registry.names.len(),
            registry.overload_count()
        );
        Ok(registry)
    }

    /// Base dialect commands and shorthands
    pub fn standard() -> &'static CommandRegistry {
        &STANDARD
    }

    /// `namespace`, `&for` and `&if`
    pub fn compiler_commands() -> &'static CommandRegistry {
        &COMPILER
    }

    /// Append an overload after those already registered under its name
    pub fn register(&mut self, definition: CommandDefinition) {
        if !self.commands.contains_key(&definition.name) {
            self.names.push(definition.name.clone());
        }
        self.commands
            .entry(definition.name.clone())
            .or_default()
            .push(definition);
    }

    /// Overloads of a command, most specific first
    pub fn get(&self, name: &str) -> Option<&[CommandDefinition]> {
        self.commands.get(name).map(Vec::as_slice)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.commands.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn overload_count(&self) -> usize {
        self.commands.values().map(Vec::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_table_builds() {
        let registry = CommandRegistry::standard();
        assert!(registry.contains("draw"));
        assert!(registry.contains("printf"));
        assert!(!registry.contains("&for"));
        assert_eq!(registry.names().next(), Some("read"));
    }

    #[test]
    fn test_overload_order_is_table_order() {
        let jumps = CommandRegistry::standard().get("jump").unwrap();
        assert_eq!(jumps.len(), 3);
        assert_eq!(jumps[0].usage(), "jump target:jumpAddress always");
        assert!(jumps[2].is_shorthand());
    }

    #[test]
    fn test_compiler_commands() {
        let registry = CommandRegistry::compiler_commands();
        assert_eq!(registry.get("&for").map(<[_]>::len), Some(2));
        assert_eq!(registry.get("&if").map(<[_]>::len), Some(2));
        assert!(registry.contains("namespace"));
    }

    #[test]
    fn test_invalid_row_is_rejected() {
        let rows = vec![CommandSpec::new("bad", "x:notAType", "")];
        assert!(CommandRegistry::from_table(rows).is_err());
    }
}
