//! Jump label passes
//!
//! Rewrites legacy numeric jump targets to generated `jump_<n>_` labels and,
//! when enabled, removes label definitions nothing jumps to.

use mlogx_core::{Line, Program, Statement};
use mlogx_parser::{detect_defined_label, detect_used_label, is_numeric_target};
use std::collections::{HashMap, HashSet};

fn defined_label(statement: &Statement) -> Option<&str> {
    detect_defined_label(&statement.text)
}

fn numeric_target(statement: &Statement) -> Option<&str> {
    detect_used_label(&statement.text).filter(|target| is_numeric_target(target))
}

fn label_statement(name: &str, source: Line) -> Statement {
    let text = format!("{}:", name);
    Statement::new(text.clone(), text, source)
}

/// `jump 4 equal x 1` -> `jump <label> equal x 1`
fn retarget(text: &str, label: &str) -> String {
    let rest = text.trim_start();
    let rest = rest.strip_prefix("jump").unwrap_or(rest).trim_start();
    let tail = rest
        .find(char::is_whitespace)
        .map_or("", |end| rest[end..].trim_start());
    if tail.is_empty() {
        format!("jump {}", label)
    } else {
        format!("jump {} {}", label, tail)
    }
}

/// Jump label pass
#[derive(Debug, Clone, Copy, Default)]
pub struct JumpLabelPass {
    remove_unused: bool,
}

impl JumpLabelPass {
    pub fn new(remove_unused: bool) -> Self {
        Self { remove_unused }
    }

    /// Run both passes
    pub fn optimize(&self, program: &Program) -> Program {
        let program = self.materialize_numeric_jumps(program);
        let usage = self.label_usage(&program);
        self.remove_unused_jumps(&program, &usage)
    }

    /// Replace numeric jump targets with labels
    ///
    /// A numeric target counts instructions, so label definitions are
    /// skipped when locating it. A target that already has a label right
    /// before it reuses that label; otherwise `jump_<n>_` is generated in
    /// order of first reference. Targets past the last instruction get their
    /// label at the end of the program.
    pub fn materialize_numeric_jumps(&self, program: &Program) -> Program {
        let statements = program.statements();
        let instructions: Vec<usize> = statements
            .iter()
            .enumerate()
            .filter(|(_, statement)| defined_label(statement).is_none())
            .map(|(position, _)| position)
            .collect();
        let position_of = |target: &str| {
            target
                .parse::<usize>()
                .ok()
                .and_then(|index| instructions.get(index).copied())
                .unwrap_or(statements.len())
        };

        let mut taken: HashSet<String> = statements
            .iter()
            .filter_map(defined_label)
            .map(str::to_string)
            .collect();
        let mut labels: HashMap<usize, String> = HashMap::new();
        let mut generated: HashMap<usize, String> = HashMap::new();
        let mut next_id = 0;

        for target in statements.iter().filter_map(numeric_target) {
            let position = position_of(target);
            if labels.contains_key(&position) {
                continue;
            }
            let existing = position
                .checked_sub(1)
                .and_then(|previous| statements.get(previous))
                .and_then(defined_label);
            let label = match existing {
                Some(label) => label.to_string(),
                None => {
                    let mut name = format!("jump_{}_", next_id);
                    while taken.contains(&name) {
                        next_id += 1;
                        name = format!("jump_{}_", next_id);
                    }
                    next_id += 1;
                    log::debug!("Numeric jump target {} labelled {}", target, name);
                    taken.insert(name.clone());
                    generated.insert(position, name.clone());
                    name
                }
            };
            labels.insert(position, label);
        }

        if labels.is_empty() {
            return program.clone();
        }

        let mut output = Program::new();
        for (position, statement) in statements.iter().enumerate() {
            if let Some(name) = generated.get(&position) {
                output.push(label_statement(name, statement.source.clone()));
            }
            let label = numeric_target(statement)
                .map(|target| position_of(target))
                .and_then(|target| labels.get(&target))
                .cloned();
            let mut statement = statement.clone();
            if let Some(label) = label {
                statement.text = retarget(&statement.text, &label);
            }
            output.push(statement);
        }
        if let Some(name) = generated.get(&statements.len()) {
            output.push(label_statement(name, Line::default()));
        }
        output
    }

    /// Label name -> positions of the jumps that target it
    ///
    /// Every defined label has an entry, possibly empty.
    pub fn label_usage(&self, program: &Program) -> HashMap<String, Vec<usize>> {
        let mut usage: HashMap<String, Vec<usize>> = program
            .iter()
            .filter_map(defined_label)
            .map(|label| (label.to_string(), Vec::new()))
            .collect();
        for (position, statement) in program.iter().enumerate() {
            if let Some(target) = detect_used_label(&statement.text) {
                if !is_numeric_target(target) {
                    usage.entry(target.to_string()).or_default().push(position);
                }
            }
        }
        usage
    }

    /// Delete label definitions with no uses; a no-op unless enabled
    pub fn remove_unused_jumps(&self, program: &Program, usage: &HashMap<String, Vec<usize>>) -> Program {
        if !self.remove_unused {
            return program.clone();
        }
        let mut output = program.clone();
        output.retain(|statement| match defined_label(statement) {
            Some(label) => {
                let used = usage.get(label).is_some_and(|uses| !uses.is_empty());
                if !used {
                    log::debug!("Removing unused label {}", label);
                }
                used
            }
            None => true,
        });
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn program(lines: &[&str]) -> Program {
        lines
            .iter()
            .enumerate()
            .map(|(index, text)| Statement::new(*text, *text, Line::new(*text, index + 1, "main.mlogx")))
            .collect()
    }

    #[test]
    fn test_numeric_jump_becomes_label() {
        let pass = JumpLabelPass::new(false);
        let output = pass.optimize(&program(&["set ok false", "jump 1 always"]));
        assert_eq!(output.lines(), vec!["set ok false", "jump_0_:", "jump jump_0_ always"]);
    }

    #[test]
    fn test_shared_and_ordered_labels() {
        let pass = JumpLabelPass::new(false);
        let output = pass.materialize_numeric_jumps(&program(&[
            "jump 2 equal x 1",
            "jump 0 always",
            "print x",
            "jump 2 always",
        ]));
        assert_eq!(
            output.lines(),
            vec![
                "jump_1_:",
                "jump jump_0_ equal x 1",
                "jump jump_1_ always",
                "jump_0_:",
                "print x",
                "jump jump_0_ always",
            ]
        );
    }

    #[test]
    fn test_existing_label_reused() {
        let pass = JumpLabelPass::new(false);
        let output = pass.materialize_numeric_jumps(&program(&["set x 1", "top:", "print x", "jump 1 always"]));
        assert_eq!(output.lines(), vec!["set x 1", "top:", "print x", "jump top always"]);
    }

    #[test]
    fn test_generated_names_skip_existing() {
        let pass = JumpLabelPass::new(false);
        let output = pass.materialize_numeric_jumps(&program(&["jump_0_:", "print 1", "jump 3 always"]));
        assert_eq!(output.lines(), vec!["jump_0_:", "print 1", "jump jump_1_ always", "jump_1_:"]);
    }

    #[test]
    fn test_remove_unused_labels() {
        let input = program(&["start:", "unused:", "print 1", "jump start always"]);

        let keep = JumpLabelPass::new(false).optimize(&input);
        assert_eq!(keep.len(), 4);

        let pass = JumpLabelPass::new(true);
        let usage = pass.label_usage(&input);
        assert_eq!(usage["start"], vec![3]);
        assert!(usage["unused"].is_empty());
        assert_eq!(
            pass.optimize(&input).lines(),
            vec!["start:", "print 1", "jump start always"]
        );
    }
}
