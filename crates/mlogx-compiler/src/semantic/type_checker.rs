//! Type checker
//!
//! Runs over a compiled program. Every statement carries the variables it
//! defines and uses; a use is an error when the slot's category accepts none
//! of the types the variable is defined with. A `name:type` declaration fixes
//! the variable's type regardless of other definitions.

use crate::error::CompileError;
use mlogx_core::command::TypedVariable;
use mlogx_core::types::{ArgTypeRegistry, GenericArgType};
use mlogx_core::{Line, Program};
use std::collections::HashMap;

/// What is known about one variable
#[derive(Debug, Clone, Default)]
struct VariableInfo {
    declared: Option<(GenericArgType, Line)>,
    assigned: Vec<GenericArgType>,
}

impl VariableInfo {
    fn types(&self) -> Vec<GenericArgType> {
        match &self.declared {
            Some((ty, _)) => vec![*ty],
            None => self.assigned.clone(),
        }
    }
}

/// Type checker
pub struct TypeChecker<'a> {
    types: &'a ArgTypeRegistry,
}

impl<'a> TypeChecker<'a> {
    /// Create a new type checker
    pub fn new(types: &'a ArgTypeRegistry) -> Self {
        Self { types }
    }

    /// Type errors in program order
    pub fn check(&self, program: &Program) -> Vec<CompileError> {
        let mut errors = Vec::new();
        let variables = self.collect_definitions(program, &mut errors);

        for statement in program {
            for used in &statement.used {
                match variables.get(&used.name) {
                    Some(info) => {
                        if let Some(error) = self.check_use(used, info, &statement.source) {
                            errors.push(error);
                        }
                    }
                    None => log::warn!(
                        "{}: variable \"{}\" is used but never defined",
                        statement.source,
                        used.name
                    ),
                }
            }
        }
        errors
    }

    fn collect_definitions(
        &self,
        program: &Program,
        errors: &mut Vec<CompileError>,
    ) -> HashMap<String, VariableInfo> {
        let mut variables: HashMap<String, VariableInfo> = HashMap::new();
        for statement in program {
            for defined in &statement.defined {
                let info = variables.entry(defined.name.clone()).or_default();
                if !defined.declared {
                    if !info.assigned.contains(&defined.var_type) {
                        info.assigned.push(defined.var_type);
                    }
                    continue;
                }
                match &info.declared {
                    Some((existing, origin)) if *existing != defined.var_type => {
                        errors.push(CompileError::Type {
                            line: statement.source.clone(),
                            message: format!(
                                "Variable \"{}\" redeclared as \"{}\" (declared as \"{}\" at {})",
                                defined.name, defined.var_type, existing, origin
                            ),
                        });
                    }
                    Some(_) => {}
                    None => info.declared = Some((defined.var_type, statement.source.clone())),
                }
            }
        }
        variables
    }

    fn check_use(&self, used: &TypedVariable, info: &VariableInfo, line: &Line) -> Option<CompileError> {
        let types = info.types();
        if types.is_empty()
            || types
                .iter()
                .any(|actual| self.types.accepts_type(used.var_type, *actual))
        {
            return None;
        }
        let actual = types
            .iter()
            .map(GenericArgType::to_string)
            .collect::<Vec<_>>()
            .join("|");
        Some(CompileError::Type {
            line: line.clone(),
            message: format!(
                "Type mismatch: variable \"{}\" is of type \"{}\", but \"{}\" is required",
                used.name, actual, used.var_type
            ),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mlogx_core::Statement;

    fn statement(text: &str, number: usize, defined: Vec<TypedVariable>, used: Vec<TypedVariable>) -> Statement {
        Statement::new(text, text, Line::new(text, number, "main.mlogx")).with_variables(defined, used)
    }

    fn checker() -> TypeChecker<'static> {
        TypeChecker::new(ArgTypeRegistry::standard())
    }

    #[test]
    fn test_compatible_use() {
        let program: Program = vec![
            statement("set x 5", 1, vec![TypedVariable::new("x", GenericArgType::Number)], vec![]),
            statement("print x", 2, vec![], vec![TypedVariable::new("x", GenericArgType::Any)]),
            statement("wait x", 3, vec![], vec![TypedVariable::new("x", GenericArgType::Number)]),
        ]
        .into();
        assert!(checker().check(&program).is_empty());
    }

    #[test]
    fn test_incompatible_use() {
        let program: Program = vec![
            statement("set x 5", 1, vec![TypedVariable::new("x", GenericArgType::Number)], vec![]),
            statement("printflush x", 2, vec![], vec![TypedVariable::new("x", GenericArgType::Building)]),
        ]
        .into();
        let errors = checker().check(&program);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].line().line_number, 2);
        assert!(errors[0].to_string().contains("\"building\" is required"));
    }

    #[test]
    fn test_declaration_wins() {
        let program: Program = vec![
            statement("set b:building core", 1, vec![TypedVariable::declared("b", GenericArgType::Building)], vec![]),
            statement("set b 5", 2, vec![TypedVariable::new("b", GenericArgType::Number)], vec![]),
            statement("printflush b", 3, vec![], vec![TypedVariable::new("b", GenericArgType::Building)]),
        ]
        .into();
        assert!(checker().check(&program).is_empty());
    }

    #[test]
    fn test_conflicting_declarations() {
        let program: Program = vec![
            statement("set v:unit @unit", 1, vec![TypedVariable::declared("v", GenericArgType::Unit)], vec![]),
            statement("set v:number 1", 2, vec![TypedVariable::declared("v", GenericArgType::Number)], vec![]),
        ]
        .into();
        let errors = checker().check(&program);
        assert_eq!(errors.len(), 1);
        assert!(errors[0].to_string().contains("redeclared"));
    }

    #[test]
    fn test_undefined_variable_is_not_an_error() {
        let program: Program =
            vec![statement("wait t", 1, vec![], vec![TypedVariable::new("t", GenericArgType::Number)])].into();
        assert!(checker().check(&program).is_empty());
    }
}
