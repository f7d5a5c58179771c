//! Unit tests for generic argument types, content tables and constants
//!
//! Tests the registry rules the command resolver relies on

use mlogx_core::command::Arg;
use mlogx_core::types::{ArgTypeRegistry, CompilerConstants, ConstValue, GameContent, GenericArgType};

fn registry() -> &'static ArgTypeRegistry {
    ArgTypeRegistry::standard()
}

fn arg(template: &str) -> Arg {
    template.parse().unwrap()
}

// =============================================================================
// Guessing Tests
// =============================================================================

#[test]
fn test_guess_literal_categories() {
    let types = registry();
    assert_eq!(types.guess_type("null"), GenericArgType::Null);
    assert_eq!(types.guess_type("false"), GenericArgType::Boolean);
    assert_eq!(types.guess_type("42"), GenericArgType::Number);
    assert_eq!(types.guess_type("\"text\""), GenericArgType::String);
}

#[test]
fn test_guess_content_categories() {
    let types = registry();
    assert_eq!(types.guess_type("@lead"), GenericArgType::ItemType);
    assert_eq!(types.guess_type("@water"), GenericArgType::FluidType);
    assert_eq!(types.guess_type("@poly"), GenericArgType::UnitType);
    assert_eq!(types.guess_type("@router"), GenericArgType::BuildingType);
    assert_eq!(types.guess_type("@crux"), GenericArgType::Team);
}

#[test]
fn test_guess_never_returns_keyword_categories() {
    let types = registry();
    // `add` is a binary operation, but that category is never guessed
    assert_eq!(types.guess_type("add"), GenericArgType::Variable);
    assert_eq!(types.guess_type("enemy"), GenericArgType::Variable);
    assert_eq!(types.guess_type("x:number"), GenericArgType::Invalid);
}

#[test]
fn test_guess_linked_building_before_variable() {
    let types = registry();
    assert_eq!(types.guess_type("cell1"), GenericArgType::Building);
    assert_eq!(types.guess_type("switch2"), GenericArgType::Building);
    assert_eq!(types.guess_type("cell"), GenericArgType::Variable);
}

// =============================================================================
// Validity Tests
// =============================================================================

#[test]
fn test_valid_for_arg_literal_slot() {
    let types = registry();
    assert!(types.is_valid_for_arg("clear", &arg("clear")));
    assert!(!types.is_valid_for_arg("color", &arg("clear")));
}

#[test]
fn test_valid_for_arg_variable_slot() {
    let types = registry();
    let output = arg("output:*number");
    assert!(types.is_valid_for_arg("result", &output));
    assert!(!types.is_valid_for_arg("5", &output));
    assert!(!types.is_valid_for_arg("@time", &output));
}

#[test]
fn test_valid_for_arg_generic_slot() {
    let types = registry();
    let number = arg("value:number");
    assert!(types.is_valid_for_arg("5", &number));
    assert!(types.is_valid_for_arg("@time", &number));
    assert!(types.is_valid_for_arg("x", &number));
    assert!(!types.is_valid_for_arg("\"5\"", &number));
    assert!(!types.is_valid_for_arg("@copper", &number));
}

#[test]
fn test_senseable_accepts_content_types() {
    let types = registry();
    let property = arg("property:senseable");
    assert!(types.is_valid_for_arg("@totalItems", &property));
    assert!(types.is_valid_for_arg("@copper", &property));
    assert!(types.is_valid_for_arg("prop", &property));
    assert!(!types.is_valid_for_arg("@bogus", &property));
}

#[test]
fn test_custom_content_changes_validity() {
    let mut content = GameContent::default();
    content.items.push("unobtainium".to_string());
    let types = ArgTypeRegistry::new(content);
    assert_eq!(types.guess_type("@unobtainium"), GenericArgType::ItemType);
    assert_eq!(registry().guess_type("@unobtainium"), GenericArgType::Invalid);
    types.audit().unwrap();
}

// =============================================================================
// Constant Tests
// =============================================================================

#[test]
fn test_constants_nested_record() {
    let constants = CompilerConstants::from_yaml_str(
        r#"
display:
  width: 80
  origin: [0, 0]
"#,
    )
    .unwrap();
    let display = constants.get("display").unwrap();
    assert_eq!(display.field("width").map(ConstValue::render), Some("80".to_string()));
    assert_eq!(
        display.field("origin").map(ConstValue::render),
        Some("0 0".to_string())
    );
}
