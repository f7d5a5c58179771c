//! Command resolver
//!
//! Matches a tokenized line against the overloads of its command. The first
//! overload that matches is authoritative.

use crate::error::{CommandError, CommandErrors, ErrorKind};
use mlogx_core::command::{Arg, ArgType, CommandDefinition, CommandRegistry};
use mlogx_core::types::{ArgTypeRegistry, GenericArgType};

fn expected_type(arg: &Arg) -> String {
    if arg.is_variable {
        return GenericArgType::Variable.to_string();
    }
    match &arg.arg_type {
        ArgType::Generic(ty) => ty.to_string(),
        ArgType::Literal(literal) => literal.clone(),
    }
}

/// Overload matcher over one command registry
#[derive(Debug, Clone, Copy)]
pub struct CommandResolver<'a> {
    commands: &'a CommandRegistry,
    types: &'a ArgTypeRegistry,
}

impl<'a> CommandResolver<'a> {
    pub fn new(commands: &'a CommandRegistry, types: &'a ArgTypeRegistry) -> Self {
        Self { commands, types }
    }

    pub fn commands(&self) -> &'a CommandRegistry {
        self.commands
    }

    pub fn types(&self) -> &'a ArgTypeRegistry {
        self.types
    }

    /// Check one overload against a line
    pub fn check_definition(
        &self,
        tokens: &[String],
        definition: &CommandDefinition,
    ) -> Result<(), CommandError> {
        let low_priority = definition.is_shorthand();
        let arg_count = tokens.len().saturating_sub(1);

        if !definition.arity_matches(arg_count) {
            let expected = match definition.max_args() {
                Some(max) if max == definition.min_args() => max.to_string(),
                Some(max) => format!("{}-{}", definition.min_args(), max),
                None => format!("at least {}", definition.min_args()),
            };
            return Err(CommandError::new(
                ErrorKind::ArgumentCount,
                format!(
                    "Incorrect number of arguments for command \"{}\": expected {}, got {}",
                    definition.name, expected, arg_count
                ),
            )
            .low_priority(low_priority));
        }

        for (token, arg) in definition.slots(tokens) {
            if !self.types.is_valid_for_arg(token, arg) {
                return Err(CommandError::new(
                    ErrorKind::BadStructure,
                    format!(
                        "Type mismatch: value \"{}\" was expected to be of type \"{}\", but was of type \"{}\" (usage: {})",
                        token,
                        expected_type(arg),
                        self.types.guess_type(token),
                        definition.usage()
                    ),
                )
                .low_priority(low_priority));
            }
        }
        Ok(())
    }

    /// Every overload that fully matches, in registry order
    pub fn find_definitions(&self, tokens: &[String]) -> Vec<&'a CommandDefinition> {
        self.find_definitions_with_errors(tokens).0
    }

    /// Matching overloads plus, per failing overload, why it failed
    pub fn find_definitions_with_errors(
        &self,
        tokens: &[String],
    ) -> (Vec<&'a CommandDefinition>, CommandErrors) {
        let mut errors = CommandErrors::new();
        let Some(name) = tokens.first() else {
            return (Vec::new(), errors);
        };
        let Some(overloads) = self.commands.get(name) else {
            errors.push(CommandError::new(
                ErrorKind::NoCommand,
                format!("Unknown command \"{}\"", name),
            ));
            return (Vec::new(), errors);
        };

        let mut matches = Vec::new();
        for definition in overloads {
            match self.check_definition(tokens, definition) {
                Ok(()) => matches.push(definition),
                Err(error) => errors.push(error),
            }
        }
        (matches, errors)
    }

    /// First matching overload, or the reasons none matched
    pub fn resolve(&self, tokens: &[String]) -> Result<&'a CommandDefinition, CommandErrors> {
        let Some(name) = tokens.first() else {
            return Err(CommandError::new(ErrorKind::NoCommand, "Empty line").into());
        };
        let Some(overloads) = self.commands.get(name) else {
            return Err(CommandError::new(
                ErrorKind::NoCommand,
                format!("Unknown command \"{}\"", name),
            )
            .into());
        };

        let mut errors = CommandErrors::new();
        for definition in overloads {
            match self.check_definition(tokens, definition) {
                Ok(()) => {
                    log::trace!("Resolved \"{}\" as {}", tokens.join(" "), definition.usage());
                    return Ok(definition);
                }
                Err(error) => errors.push(error),
            }
        }
        Err(errors)
    }
}
