//! Operator and comparison keyword tables
//!
//! The extended dialect writes `set x a + b` and `jump label a == b`; the base
//! dialect spells the same operations out as keywords.

/// Binary `op` operations and their infix symbols, if any
pub const BINARY_OPERATIONS: &[(&str, Option<&str>)] = &[
    ("add", Some("+")),
    ("sub", Some("-")),
    ("mul", Some("*")),
    ("div", Some("/")),
    ("idiv", Some("//")),
    ("mod", Some("%")),
    ("emod", Some("%%")),
    ("pow", Some("**")),
    ("equal", Some("==")),
    ("notEqual", Some("!=")),
    ("land", Some("&&")),
    ("lessThan", Some("<")),
    ("lessThanEq", Some("<=")),
    ("greaterThan", Some(">")),
    ("greaterThanEq", Some(">=")),
    ("strictEqual", Some("===")),
    ("shl", Some("<<")),
    ("shr", Some(">>")),
    ("ushr", Some(">>>")),
    ("or", Some("|")),
    ("and", Some("&")),
    ("xor", Some("^")),
    ("max", None),
    ("min", None),
    ("angle", None),
    ("angleDiff", None),
    ("len", None),
    ("noise", None),
];

/// Unary `op` operations
pub const UNARY_OPERATIONS: &[&str] = &[
    "not", "abs", "sign", "log", "log10", "floor", "ceil", "round", "sqrt", "rand", "sin", "cos",
    "tan", "asin", "acos", "atan",
];

/// Jump conditions and their comparison symbols
pub const CONDITIONS: &[(&str, &str)] = &[
    ("equal", "=="),
    ("notEqual", "!="),
    ("lessThan", "<"),
    ("lessThanEq", "<="),
    ("greaterThan", ">"),
    ("greaterThanEq", ">="),
    ("strictEqual", "==="),
];

pub fn is_binary_operation(name: &str) -> bool {
    BINARY_OPERATIONS.iter().any(|(op, _)| *op == name)
}

pub fn is_unary_operation(name: &str) -> bool {
    UNARY_OPERATIONS.contains(&name)
}

/// `+` -> `add`
pub fn operation_for_symbol(symbol: &str) -> Option<&'static str> {
    BINARY_OPERATIONS
        .iter()
        .find(|(_, sym)| *sym == Some(symbol))
        .map(|(op, _)| *op)
}

/// `add` -> `+`
pub fn symbol_for_operation(operation: &str) -> Option<&'static str> {
    BINARY_OPERATIONS
        .iter()
        .find(|(op, _)| *op == operation)
        .and_then(|(_, sym)| *sym)
}

/// `==` -> `equal`
pub fn condition_for_symbol(symbol: &str) -> Option<&'static str> {
    CONDITIONS
        .iter()
        .find(|(_, sym)| *sym == symbol)
        .map(|(cond, _)| *cond)
}

/// `equal` -> `==`
pub fn symbol_for_condition(condition: &str) -> Option<&'static str> {
    CONDITIONS
        .iter()
        .find(|(cond, _)| *cond == condition)
        .map(|(_, sym)| *sym)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbol_lookup_is_bidirectional() {
        for (op, symbol) in BINARY_OPERATIONS {
            if let Some(symbol) = symbol {
                assert_eq!(operation_for_symbol(symbol), Some(*op));
                assert_eq!(symbol_for_operation(op), Some(*symbol));
            }
        }
        assert_eq!(symbol_for_operation("max"), None);
    }

    #[test]
    fn test_conditions() {
        assert_eq!(condition_for_symbol("<="), Some("lessThanEq"));
        assert_eq!(symbol_for_condition("strictEqual"), Some("==="));
        assert_eq!(condition_for_symbol("&&"), None);
    }
}
