//! Port rules attached to command definitions
//!
//! Each rule handles the porting modes that make sense for its command and
//! returns `None` for the rest.

use crate::command::{CommandDefinition, PortingMode};
use crate::types::operators;

fn line(tokens: &[&str]) -> Option<Vec<String>> {
    Some(vec![tokens.join(" ")])
}

fn strs(tokens: &[String]) -> Vec<&str> {
    tokens.iter().map(String::as_str).collect()
}

/// Drop the zero padding the game writes after a command and any trailing
/// optional argument equal to its default
pub fn remove_zero_padding(
    mode: PortingMode,
    tokens: &[String],
    definition: &CommandDefinition,
) -> Option<Vec<String>> {
    if mode != PortingMode::RemoveZeroes {
        return None;
    }
    let limit = definition.max_args()?.saturating_add(1).min(tokens.len());
    if tokens[limit..].iter().any(|padding| padding != "0") {
        return None;
    }

    let mut kept = strs(&tokens[..limit]);
    while kept.len() > definition.min_args() + 1 {
        let arg = &definition.args[kept.len() - 2];
        let is_default = arg.is_optional
            && arg
                .default
                .as_deref()
                .is_some_and(|default| kept.last() == Some(&default));
        if !is_default {
            break;
        }
        kept.pop();
    }

    if kept.len() == tokens.len() {
        None
    } else {
        line(&kept)
    }
}

/// `radar enemy any any distance b 1 out` -> `radar enemy distance b 1 out`
pub fn port_radar(mode: PortingMode, tokens: &[String], _: &CommandDefinition) -> Option<Vec<String>> {
    let t = strs(tokens);
    match (mode, t.as_slice()) {
        (PortingMode::ShortenSyntax, ["radar", first, "any", "any", sort, building, order, output]) => {
            line(&["radar", first, sort, building, order, output])
        }
        _ => None,
    }
}

/// `uradar enemy any any distance 0 1 out` -> `uradar enemy distance 1 out`
pub fn port_uradar(mode: PortingMode, tokens: &[String], _: &CommandDefinition) -> Option<Vec<String>> {
    let t = strs(tokens);
    match (mode, t.as_slice()) {
        (PortingMode::ShortenSyntax, ["uradar", first, "any", "any", sort, "0", order, output]) => {
            line(&["uradar", first, sort, order, output])
        }
        _ => None,
    }
}

/// `sensor core.copper core @copper` -> `sensor core.copper`
pub fn port_sensor(mode: PortingMode, tokens: &[String], _: &CommandDefinition) -> Option<Vec<String>> {
    let t = strs(tokens);
    match (mode, t.as_slice()) {
        (PortingMode::ShortenSyntax, ["sensor", output, building, property]) => {
            let property = property.strip_prefix('@')?;
            (*output == format!("{}.{}", building, property)).then(|| vec![format!("sensor {}", output)])
        }
        _ => None,
    }
}

/// Binary `op`: `op add x x y` -> `op add x y` when shortening,
/// `op add y 2 2` -> `set y 2 + 2` when modernising
pub fn port_binary_op(mode: PortingMode, tokens: &[String], _: &CommandDefinition) -> Option<Vec<String>> {
    let t = strs(tokens);
    match (mode, t.as_slice()) {
        (PortingMode::ShortenSyntax, ["op", operation, output, left, right]) if output == left => {
            line(&["op", operation, output, right])
        }
        (PortingMode::ModernSyntax, ["op", operation, output, left, right]) => {
            let symbol = operators::symbol_for_operation(operation)?;
            line(&["set", output, left, symbol, right])
        }
        _ => None,
    }
}

/// `jump l equal a b` -> `jump l a == b`; `jump l always x y` -> `jump l always`
pub fn port_jump(mode: PortingMode, tokens: &[String], _: &CommandDefinition) -> Option<Vec<String>> {
    let t = strs(tokens);
    match (mode, t.as_slice()) {
        (PortingMode::RemoveZeroes, ["jump", target, "always", _, _]) => line(&["jump", target, "always"]),
        (PortingMode::ModernSyntax, ["jump", target, condition, left, right]) => {
            let symbol = operators::symbol_for_condition(condition)?;
            line(&["jump", target, left, symbol, right])
        }
        _ => None,
    }
}

/// Legacy `setrule rule team value` -> `setrule rule value team`
pub fn port_legacy_setrule(
    mode: PortingMode,
    tokens: &[String],
    _: &CommandDefinition,
) -> Option<Vec<String>> {
    let t = strs(tokens);
    match (mode, t.as_slice()) {
        (PortingMode::ModernSyntax, ["setrule", rule, team, value]) => line(&["setrule", rule, value, team]),
        _ => None,
    }
}
