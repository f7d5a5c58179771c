//! Variable renaming for namespaces and cross-file isolation
//!
//! Inside `namespace a { namespace b { ... } }` a variable `x` becomes
//! `_a_b_x`. A name starting with exactly two underscores is file-private
//! instead: `__x` in `main.mlogx` becomes `__main__x` and is not namespaced.
//! Built-in `@` names are never renamed.

use mlogx_core::command::{ArgType, CommandDefinition};
use mlogx_core::types::{ArgTypeRegistry, GenericArgType};
use mlogx_parser::is_numeric_target;

/// `x` under `[a, b]` -> `_a_b_x`
pub fn add_namespace_prefix(name: &str, namespaces: &[&str]) -> String {
    if namespaces.is_empty() {
        return name.to_string();
    }
    format!("_{}_{}", namespaces.join("_"), name)
}

/// `__x` in file `main` -> `__main__x`; anything else is returned as is
pub fn prepend_filename(name: &str, file_stem: &str) -> String {
    match name.strip_prefix("__") {
        Some(rest) if !rest.is_empty() && !rest.starts_with('_') => {
            format!("__{}__{}", file_stem, rest)
        }
        _ => name.to_string(),
    }
}

fn is_file_private(name: &str) -> bool {
    name.strip_prefix("__")
        .is_some_and(|rest| !rest.is_empty() && !rest.starts_with('_'))
}

/// Rename one variable or label
pub fn rename_variable(name: &str, namespaces: &[&str], file_stem: &str) -> String {
    if name.starts_with('@') {
        name.to_string()
    } else if is_file_private(name) {
        prepend_filename(name, file_stem)
    } else {
        add_namespace_prefix(name, namespaces)
    }
}

/// Whether a token in this slot names a variable (or a symbolic label)
pub fn is_variable_position(
    token: &str,
    arg_type: &ArgType,
    is_variable: bool,
    types: &ArgTypeRegistry,
) -> bool {
    if token.starts_with('@') {
        return false;
    }
    if is_variable {
        return true;
    }
    match arg_type {
        ArgType::Literal(_) => false,
        ArgType::Generic(GenericArgType::JumpAddress) => !is_numeric_target(token),
        ArgType::Generic(ty) => {
            types.accepts_variables(*ty) && types.guess_type(token) == GenericArgType::Variable
        }
    }
}

/// Rename the variable-class tokens of a line matched by `definition`
pub fn namespace_tokens(
    tokens: &[String],
    definition: &CommandDefinition,
    types: &ArgTypeRegistry,
    namespaces: &[&str],
    file_stem: &str,
) -> Vec<String> {
    let mut renamed = Vec::with_capacity(tokens.len());
    if let Some(name) = tokens.first() {
        renamed.push(name.clone());
    }
    for (index, token) in tokens.iter().enumerate().skip(1) {
        let rename = definition
            .arg_at(index - 1)
            .is_some_and(|arg| is_variable_position(token, &arg.arg_type, arg.is_variable, types));
        renamed.push(if rename {
            rename_variable(token, namespaces, file_stem)
        } else {
            token.clone()
        });
    }
    renamed
}
