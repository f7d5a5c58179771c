//! Command argument slots
//!
//! Arg templates follow a small fixed grammar:
//!
//! - `name:type` — generic slot
//! - `name:*type` — variable output slot
//! - `name:type?` / `name:type?=default` — optional trailing slot
//! - `...name:type` — spread slot, must come last
//! - `word` — literal token that must match exactly

use crate::error::{DefinitionError, Result};
use crate::types::GenericArgType;
use std::fmt;
use std::str::FromStr;

/// What a slot accepts
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgType {
    Generic(GenericArgType),
    Literal(String),
}

/// One argument slot of a command overload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Arg {
    pub name: String,
    pub arg_type: ArgType,
    pub is_optional: bool,
    /// Accepts a variable reference regardless of declared type; the slot is an output
    pub is_variable: bool,
    pub spread: bool,
    /// Documented default of an optional slot
    pub default: Option<String>,
}

impl Arg {
    pub fn is_generic(&self) -> bool {
        matches!(self.arg_type, ArgType::Generic(_))
    }

    /// The generic category, if any
    pub fn generic_type(&self) -> Option<GenericArgType> {
        match self.arg_type {
            ArgType::Generic(ty) => Some(ty),
            ArgType::Literal(_) => None,
        }
    }

    /// Parse a whitespace-separated list of arg templates
    pub fn parse_list(templates: &str) -> Result<Vec<Arg>> {
        templates.split_whitespace().map(str::parse).collect()
    }
}

impl FromStr for Arg {
    type Err = DefinitionError;

    fn from_str(template: &str) -> Result<Self> {
        let invalid = |message: &str| DefinitionError::InvalidArg {
            template: template.to_string(),
            message: message.to_string(),
        };

        let (spread, rest) = match template.strip_prefix("...") {
            Some(rest) => (true, rest),
            None => (false, template),
        };

        let Some((name, ty)) = rest.split_once(':') else {
            if spread {
                return Err(invalid("spread slots must be typed"));
            }
            if rest.is_empty() {
                return Err(invalid("empty literal"));
            }
            return Ok(Arg {
                name: rest.to_string(),
                arg_type: ArgType::Literal(rest.to_string()),
                is_optional: false,
                is_variable: false,
                spread: false,
                default: None,
            });
        };

        if name.is_empty() {
            return Err(invalid("missing name"));
        }

        let (is_variable, ty) = match ty.strip_prefix('*') {
            Some(ty) => (true, ty),
            None => (false, ty),
        };

        let (ty, is_optional, default) = match ty.split_once('?') {
            Some((ty, "")) => (ty, true, None),
            Some((ty, default)) => match default.strip_prefix('=') {
                Some(default) if !default.is_empty() => (ty, true, Some(default.to_string())),
                _ => return Err(invalid("expected `?=default`")),
            },
            None => (ty, false, None),
        };

        if spread && is_optional {
            return Err(invalid("spread slots cannot be optional"));
        }

        Ok(Arg {
            name: name.to_string(),
            arg_type: ArgType::Generic(ty.parse()?),
            is_optional,
            is_variable,
            spread,
            default,
        })
    }
}

impl fmt::Display for Arg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.arg_type {
            ArgType::Literal(literal) => f.write_str(literal),
            ArgType::Generic(ty) => {
                if self.spread {
                    f.write_str("...")?;
                }
                write!(f, "{}:", self.name)?;
                if self.is_variable {
                    f.write_str("*")?;
                }
                write!(f, "{}", ty)?;
                if self.is_optional {
                    f.write_str("?")?;
                }
                Ok(())
            }
        }
    }
}
