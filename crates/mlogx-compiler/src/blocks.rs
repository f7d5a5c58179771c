//! Compile-time block headers
//!
//! `namespace name {`, `&for v in lower upper {`, `&for v of a b c {` and
//! `&if expr {` lines are validated against the compiler command table, then
//! turned into a `BlockHeader`.

use crate::resolver::CommandResolver;
use mlogx_core::command::ArgType;
use mlogx_parser::split_into_arguments;

/// Most elements an `&for ... in lower upper` range may produce
pub const MAX_RANGE_LENGTH: i64 = 10_000;

/// A recognized block opener
#[derive(Debug, Clone, PartialEq)]
pub enum BlockHeader {
    Namespace(String),
    For {
        variable: String,
        elements: Vec<String>,
    },
    If(bool),
}

/// Whether a cleaned line opens a compile-time block
pub fn is_block_opener(cleaned: &str, directives: &CommandResolver<'_>) -> bool {
    cleaned
        .split_whitespace()
        .next()
        .is_some_and(|command| directives.commands().contains(command))
}

/// Whether a cleaned line closes a compile-time block
pub fn is_block_closer(cleaned: &str) -> bool {
    cleaned == "}"
}

/// Parse an opener line; constants must already be substituted
pub fn parse_block_header(cleaned: &str, directives: &CommandResolver<'_>) -> Result<BlockHeader, String> {
    let Some(header) = cleaned.strip_suffix('{') else {
        return Err(format!("expected \"{{\" at end of \"{}\"", cleaned));
    };
    let tokens = split_into_arguments(header);
    let definition = directives.resolve(&tokens).map_err(|errors| {
        errors
            .most_relevant()
            .map(|error| error.message.clone())
            .unwrap_or_else(|| format!("unknown block \"{}\"", header.trim()))
    })?;

    match definition.name.as_str() {
        "namespace" => Ok(BlockHeader::Namespace(tokens[1].clone())),
        "&for" => {
            let variable = tokens[1].clone();
            let is_range = matches!(&definition.args[1].arg_type, ArgType::Literal(word) if word == "in");
            let elements = if is_range {
                let lower = parse_bound(&tokens[3])?;
                let upper = parse_bound(&tokens[4])?;
                if upper.saturating_sub(lower) >= MAX_RANGE_LENGTH {
                    return Err(format!(
                        "range {}..{} has more than {} elements",
                        lower, upper, MAX_RANGE_LENGTH
                    ));
                }
                (lower..=upper).map(|value| value.to_string()).collect()
            } else {
                tokens[3..].to_vec()
            };
            Ok(BlockHeader::For { variable, elements })
        }
        "&if" => Ok(BlockHeader::If(evaluate_condition(&tokens[1..]))),
        other => Err(format!("unknown block \"{}\"", other)),
    }
}

fn parse_bound(token: &str) -> Result<i64, String> {
    if let Ok(value) = token.parse::<i64>() {
        return Ok(value);
    }
    match token.parse::<f64>() {
        Ok(value) if value.fract() == 0.0 && value.abs() < 1e15 => Ok(value as i64),
        _ => Err(format!("range bound \"{}\" is not an integer", token)),
    }
}

/// `false`, `0`, `null` and the empty token are false; everything else is true
pub fn is_truthy(token: &str) -> bool {
    if let Some(inner) = token.strip_prefix('!') {
        return !is_truthy(inner);
    }
    match token {
        "" | "false" | "null" => false,
        _ => token.parse::<f64>().map_or(true, |value| value != 0.0),
    }
}

/// Evaluate the tokens after `&if`: a single value, or `left <cmp> right`
pub fn evaluate_condition(tokens: &[String]) -> bool {
    match tokens {
        [value] => is_truthy(value),
        [left, operator, right] => compare(left, operator, right),
        _ => false,
    }
}

fn compare(left: &str, operator: &str, right: &str) -> bool {
    let ordering = match (left.parse::<f64>(), right.parse::<f64>()) {
        (Ok(left), Ok(right)) => left.partial_cmp(&right),
        _ => Some(left.cmp(right)),
    };
    let Some(ordering) = ordering else {
        return operator == "!=";
    };
    match operator {
        "==" | "===" => ordering.is_eq(),
        "!=" => ordering.is_ne(),
        "<" => ordering.is_lt(),
        "<=" => ordering.is_le(),
        ">" => ordering.is_gt(),
        ">=" => ordering.is_ge(),
        _ => false,
    }
}
