//! Computed shorthand expansions and lookup-dependent variable extraction

use crate::command::TypedVariable;
use crate::types::{operators, ArgTypeRegistry, GenericArgType};

fn token(tokens: &[String], index: usize) -> &str {
    tokens.get(index).map(String::as_str).unwrap_or("")
}

/// `printf "hp: {hp} / {max}"` -> one `print` per literal run and per `{variable}`
pub fn expand_printf(tokens: &[String]) -> Vec<String> {
    let body = token(tokens, 1);
    let body = body
        .strip_prefix('"')
        .and_then(|body| body.strip_suffix('"'))
        .unwrap_or(body);

    let mut lines = Vec::new();
    let mut literal = String::new();
    let mut rest = body;
    while let Some(start) = rest.find('{') {
        let after = &rest[start + 1..];
        let Some(end) = after.find('}') else {
            break;
        };
        let variable = after[..end].trim();
        literal.push_str(&rest[..start]);
        if variable.is_empty() || variable.contains(char::is_whitespace) {
            literal.push_str(&rest[start..start + end + 2]);
        } else {
            if !literal.is_empty() {
                lines.push(format!("print \"{}\"", literal));
                literal.clear();
            }
            lines.push(format!("print {}", variable));
        }
        rest = &after[end + 1..];
    }
    literal.push_str(rest);
    if !literal.is_empty() {
        lines.push(format!("print \"{}\"", literal));
    }
    lines
}

/// `set x a + b` -> `op add x a b`
pub fn expand_set_operation(tokens: &[String]) -> Vec<String> {
    let operation = operators::operation_for_symbol(token(tokens, 3)).unwrap_or("add");
    vec![format!(
        "op {} {} {} {}",
        operation,
        token(tokens, 1),
        token(tokens, 2),
        token(tokens, 4)
    )]
}

/// `set x:number 5` -> `set x 5`
pub fn expand_typed_set(tokens: &[String]) -> Vec<String> {
    let name = token(tokens, 1).split(':').next().unwrap_or("");
    vec![format!("set {} {}", name, token(tokens, 2))]
}

/// `jump label a == b` -> `jump label equal a b`
pub fn expand_jump_comparison(tokens: &[String]) -> Vec<String> {
    let condition = operators::condition_for_symbol(token(tokens, 3)).unwrap_or("equal");
    vec![format!(
        "jump {} {} {} {}",
        token(tokens, 1),
        condition,
        token(tokens, 2),
        token(tokens, 4)
    )]
}

/// `sensor core.copper` -> `sensor core.copper core @copper`
pub fn expand_sensor_path(tokens: &[String]) -> Vec<String> {
    let path = token(tokens, 1);
    let (building, property) = path.split_once('.').unwrap_or((path, ""));
    let property = property.trim_start_matches('@');
    vec![format!("sensor {} {} @{}", path, building, property)]
}

/// Declared type of `set name:type value`
pub fn typed_set_defined(tokens: &[String], _: &ArgTypeRegistry) -> Vec<TypedVariable> {
    match token(tokens, 1).split_once(':') {
        Some((name, ty)) => ty
            .parse::<GenericArgType>()
            .map(|ty| vec![TypedVariable::declared(name, ty)])
            .unwrap_or_default(),
        None => Vec::new(),
    }
}

/// `set x value` defines `x` with the guessed type of `value`
pub fn set_defined(tokens: &[String], types: &ArgTypeRegistry) -> Vec<TypedVariable> {
    let guessed = match types.guess_type(token(tokens, 2)) {
        GenericArgType::Variable | GenericArgType::Invalid => GenericArgType::Any,
        ty => ty,
    };
    vec![TypedVariable::new(token(tokens, 1), guessed)]
}

/// Result category of sensing a property
pub fn sensor_result_type(property: &str, types: &ArgTypeRegistry) -> GenericArgType {
    let content = types.content();
    if content.is_item(property) || content.is_fluid(property) {
        return GenericArgType::Number;
    }
    match property {
        "@firstItem" => GenericArgType::ItemType,
        "@type" | "@payloadType" => GenericArgType::Type,
        "@team" => GenericArgType::Team,
        "@name" => GenericArgType::String,
        "@controller" | "@config" => GenericArgType::Any,
        "@dead" | "@shooting" | "@boosting" | "@mining" | "@enabled" => GenericArgType::Boolean,
        _ if content.is_senseable(property) => GenericArgType::Number,
        _ => GenericArgType::Any,
    }
}

/// `sensor out building @property`: the output type depends on the property
pub fn sensor_defined(tokens: &[String], types: &ArgTypeRegistry) -> Vec<TypedVariable> {
    vec![TypedVariable::new(
        token(tokens, 1),
        sensor_result_type(token(tokens, 3), types),
    )]
}

/// `lookup kind out index`: the output type depends on the lookup kind
pub fn lookup_defined(tokens: &[String], _: &ArgTypeRegistry) -> Vec<TypedVariable> {
    let ty = match token(tokens, 1) {
        "block" => GenericArgType::BuildingType,
        "unit" => GenericArgType::UnitType,
        "item" => GenericArgType::ItemType,
        "liquid" => GenericArgType::FluidType,
        _ => GenericArgType::Type,
    };
    vec![TypedVariable::new(token(tokens, 2), ty)]
}

/// `ulocate` always writes position, found flag and building, whatever it searched for
pub fn ulocate_defined(tokens: &[String], _: &ArgTypeRegistry) -> Vec<TypedVariable> {
    vec![
        TypedVariable::new(token(tokens, 5), GenericArgType::Number),
        TypedVariable::new(token(tokens, 6), GenericArgType::Number),
        TypedVariable::new(token(tokens, 7), GenericArgType::Boolean),
        TypedVariable::new(token(tokens, 8), GenericArgType::Building),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(line: &str) -> Vec<String> {
        line.split_whitespace().map(str::to_string).collect()
    }

    #[test]
    fn test_printf() {
        assert_eq!(
            expand_printf(&["printf".to_string(), "\"amogus {x}\"".to_string()]),
            vec!["print \"amogus \"", "print x"]
        );
        assert_eq!(
            expand_printf(&["printf".to_string(), "\"{a}/{b} left\"".to_string()]),
            vec!["print a", "print \"/\"", "print b", "print \" left\""]
        );
        assert_eq!(
            expand_printf(&["printf".to_string(), "\"no {} vars {\"".to_string()]),
            vec!["print \"no {} vars {\""]
        );
    }

    #[test]
    fn test_set_operation() {
        assert_eq!(expand_set_operation(&tokens("set y 2 + 2")), vec!["op add y 2 2"]);
        assert_eq!(expand_set_operation(&tokens("set y a // b")), vec!["op idiv y a b"]);
    }

    #[test]
    fn test_typed_set() {
        let line = tokens("set hp:number 100");
        assert_eq!(expand_typed_set(&line), vec!["set hp 100"]);
        assert_eq!(
            typed_set_defined(&line, ArgTypeRegistry::standard()),
            vec![TypedVariable::declared("hp", GenericArgType::Number)]
        );
    }

    #[test]
    fn test_jump_comparison() {
        assert_eq!(
            expand_jump_comparison(&tokens("jump loop i < 10")),
            vec!["jump loop lessThan i 10"]
        );
    }

    #[test]
    fn test_sensor_path() {
        assert_eq!(
            expand_sensor_path(&tokens("sensor core.copper")),
            vec!["sensor core.copper core @copper"]
        );
        assert_eq!(
            expand_sensor_path(&tokens("sensor turret.@totalAmmo")),
            vec!["sensor turret.@totalAmmo turret @totalAmmo"]
        );
    }

    #[test]
    fn test_lookup_dependent_types() {
        let types = ArgTypeRegistry::standard();
        assert_eq!(sensor_result_type("@copper", types), GenericArgType::Number);
        assert_eq!(sensor_result_type("@type", types), GenericArgType::Type);
        assert_eq!(sensor_result_type("@x", types), GenericArgType::Number);
        assert_eq!(sensor_result_type("prop", types), GenericArgType::Any);
        assert_eq!(
            lookup_defined(&tokens("lookup unit kind 0"), types),
            vec![TypedVariable::new("kind", GenericArgType::UnitType)]
        );
        let located = ulocate_defined(&tokens("ulocate ore core true @copper ox oy found b"), types);
        assert_eq!(located.len(), 4);
        assert_eq!(located[2], TypedVariable::new("found", GenericArgType::Boolean));
        assert_eq!(
            set_defined(&tokens("set x \"hi\""), types),
            vec![TypedVariable::new("x", GenericArgType::String)]
        );
        assert_eq!(
            set_defined(&tokens("set x y"), types),
            vec![TypedVariable::new("x", GenericArgType::Any)]
        );
    }
}
