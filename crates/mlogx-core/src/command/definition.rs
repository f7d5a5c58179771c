//! Command overload descriptors
//!
//! A `CommandDefinition` is one argument shape of a command. Optional
//! behaviours (shorthand expansion, porting, custom defined-variable extraction) are
//! plain function values on the descriptor.

use crate::command::Arg;
use crate::error::{DefinitionError, Result};
use crate::types::{ArgTypeRegistry, GenericArgType};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A variable defined or read by a statement, with its category
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypedVariable {
    pub name: String,
    pub var_type: GenericArgType,
    /// Written by the user as `name:type`
    pub declared: bool,
}

impl TypedVariable {
    pub fn new(name: &str, var_type: GenericArgType) -> Self {
        Self {
            name: name.to_string(),
            var_type,
            declared: false,
        }
    }

    pub fn declared(name: &str, var_type: GenericArgType) -> Self {
        Self {
            declared: true,
            ..Self::new(name, var_type)
        }
    }
}

/// Syntax era rewrite selected for the porting engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PortingMode {
    RemoveZeroes,
    ShortenSyntax,
    ModernSyntax,
}

impl PortingMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            PortingMode::RemoveZeroes => "removeZeroes",
            PortingMode::ShortenSyntax => "shortenSyntax",
            PortingMode::ModernSyntax => "modernSyntax",
        }
    }
}

impl fmt::Display for PortingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PortingMode {
    type Err = DefinitionError;

    fn from_str(name: &str) -> Result<Self> {
        [
            PortingMode::RemoveZeroes,
            PortingMode::ShortenSyntax,
            PortingMode::ModernSyntax,
        ]
        .into_iter()
        .find(|mode| mode.as_str() == name)
        .ok_or_else(|| DefinitionError::UnknownType(name.to_string()))
    }
}

/// Shorthand expansion into canonical lines
#[derive(Clone, Copy)]
pub enum ReplaceRule {
    /// Templates whose `{n}` placeholders refer to the matched tokens (`{0}` is the command)
    Patterns(&'static [&'static str]),
    /// Computed expansion for shapes a template cannot express
    Expand(fn(&[String]) -> Vec<String>),
}

/// Rewrites a matched line for one porting mode; `None` leaves it unchanged
pub type PortRule = fn(PortingMode, &[String], &CommandDefinition) -> Option<Vec<String>>;

/// Lookup-dependent variable extraction
pub type VariableExtractor = fn(&[String], &ArgTypeRegistry) -> Vec<TypedVariable>;

/// One overload of a command
#[derive(Clone)]
pub struct CommandDefinition {
    pub name: String,
    pub args: Vec<Arg>,
    pub description: &'static str,
    pub replace: Option<ReplaceRule>,
    pub port: Option<PortRule>,
    pub defined_vars: Option<VariableExtractor>,
}

impl CommandDefinition {
    /// Build an overload from its arg templates
    pub fn new(name: &str, args: &str, description: &'static str) -> Result<Self> {
        let definition = Self {
            name: name.to_string(),
            args: Arg::parse_list(args)?,
            description,
            replace: None,
            port: None,
            defined_vars: None,
        };
        definition.validate()?;
        Ok(definition)
    }

    /// Optional slots must trail the required ones; a spread slot must come last
    fn validate(&self) -> Result<()> {
        let invalid = |message: &str| DefinitionError::InvalidDefinition {
            command: self.name.clone(),
            message: message.to_string(),
        };
        let mut seen_optional = false;
        for (index, arg) in self.args.iter().enumerate() {
            if arg.spread && index + 1 != self.args.len() {
                return Err(invalid("spread slot must be last"));
            }
            if arg.spread && seen_optional {
                return Err(invalid("spread slot cannot follow optional slots"));
            }
            if arg.is_optional {
                seen_optional = true;
            } else if seen_optional && !arg.spread {
                return Err(invalid("required slot follows an optional slot"));
            }
            if arg.default.is_some() && !arg.is_optional {
                return Err(invalid("only optional slots have defaults"));
            }
        }
        Ok(())
    }

    /// Minimum number of argument tokens after the command name
    pub fn min_args(&self) -> usize {
        self.args.iter().filter(|arg| !arg.is_optional).count()
    }

    /// Maximum number of argument tokens, `None` when a spread slot is present
    pub fn max_args(&self) -> Option<usize> {
        if self.args.last().is_some_and(|arg| arg.spread) {
            None
        } else {
            Some(self.args.len())
        }
    }

    pub fn arity_matches(&self, arg_count: usize) -> bool {
        arg_count >= self.min_args() && self.max_args().map_or(true, |max| arg_count <= max)
    }

    /// Slot for the argument at `index` (0-based, excluding the command name)
    pub fn arg_at(&self, index: usize) -> Option<&Arg> {
        self.args
            .get(index)
            .or_else(|| self.args.last().filter(|arg| arg.spread))
    }

    /// Pair each argument token with its slot
    pub fn slots<'a>(&'a self, tokens: &'a [String]) -> impl Iterator<Item = (&'a String, &'a Arg)> + 'a {
        tokens
            .iter()
            .skip(1)
            .enumerate()
            .filter_map(move |(index, token)| self.arg_at(index).map(|arg| (token, arg)))
    }

    pub fn is_shorthand(&self) -> bool {
        self.replace.is_some()
    }

    /// Canonical lines for a matched shorthand, `None` for canonical overloads
    pub fn expand(&self, tokens: &[String]) -> Option<Vec<String>> {
        match self.replace? {
            ReplaceRule::Patterns(patterns) => Some(
                patterns
                    .iter()
                    .map(|pattern| fill_pattern(pattern, tokens))
                    .collect(),
            ),
            ReplaceRule::Expand(expand) => Some(expand(tokens)),
        }
    }

    /// Variables written by a matched line
    pub fn defined_variables(&self, tokens: &[String], types: &ArgTypeRegistry) -> Vec<TypedVariable> {
        if let Some(extract) = self.defined_vars {
            return extract(tokens, types);
        }
        self.slots(tokens)
            .filter(|(_, arg)| arg.is_variable)
            .map(|(token, arg)| {
                TypedVariable::new(token, arg.generic_type().unwrap_or(GenericArgType::Any))
            })
            .collect()
    }

    /// Variables read by a matched line, with the category each read requires
    pub fn used_variables(&self, tokens: &[String], types: &ArgTypeRegistry) -> Vec<TypedVariable> {
        self.slots(tokens)
            .filter(|(_, arg)| !arg.is_variable)
            .filter_map(|(token, arg)| {
                let ty = arg.generic_type()?;
                (types.accepts_variables(ty) && types.guess_type(token) == GenericArgType::Variable)
                    .then(|| TypedVariable::new(token, ty))
            })
            .collect()
    }

    /// `name arg1 arg2 ...` usage string
    pub fn usage(&self) -> String {
        std::iter::once(self.name.clone())
            .chain(self.args.iter().map(Arg::to_string))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Debug for CommandDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandDefinition")
            .field("usage", &self.usage())
            .field("shorthand", &self.is_shorthand())
            .field("port", &self.port.is_some())
            .finish()
    }
}

/// Substitute `{n}` placeholders with matched tokens
fn fill_pattern(pattern: &str, tokens: &[String]) -> String {
    let mut output = String::with_capacity(pattern.len());
    let mut rest = pattern;
    while let Some(start) = rest.find('{') {
        output.push_str(&rest[..start]);
        let after = &rest[start + 1..];
        match after.find('}') {
            Some(end) => match after[..end].parse::<usize>() {
                Ok(index) => {
                    output.push_str(tokens.get(index).map(String::as_str).unwrap_or(""));
                    rest = &after[end + 1..];
                }
                Err(_) => {
                    output.push('{');
                    rest = after;
                }
            },
            None => {
                output.push('{');
                rest = after;
            }
        }
    }
    output.push_str(rest);
    output
}
