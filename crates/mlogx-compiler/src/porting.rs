//! Porting engine
//!
//! Rewrites a program between syntax eras of the base dialect, one mode per
//! pass. Lines are matched against the command table and rewritten by the
//! matched overload's port rule. Anything that does not match, has no rule
//! for the mode, or would stop matching after the rewrite is kept as is.
//!
//! Matching is lenient about the zero padding the game appends to exported
//! code: trailing `0` tokens are dropped until some overload matches, and the
//! rule still sees the full line.

use crate::resolver::CommandResolver;
use mlogx_core::command::{CommandDefinition, CommandRegistry, PortingMode};
use mlogx_core::types::ArgTypeRegistry;
use mlogx_core::{Line, Program, Statement};
use mlogx_parser::{clean_line, detect_defined_label, split_into_arguments};

/// Syntax porting engine
pub struct PortingEngine<'a> {
    resolver: CommandResolver<'a>,
}

impl PortingEngine<'static> {
    /// Engine over the builtin command table and vanilla content
    pub fn new() -> Self {
        Self::with_registries(CommandRegistry::standard(), ArgTypeRegistry::standard())
    }
}

impl Default for PortingEngine<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> PortingEngine<'a> {
    pub fn with_registries(commands: &'a CommandRegistry, types: &'a ArgTypeRegistry) -> Self {
        Self {
            resolver: CommandResolver::new(commands, types),
        }
    }

    /// Port every line; blank lines, comments and labels are kept
    pub fn port(&self, lines: &[Line], mode: PortingMode) -> Program {
        let mut program = Program::new();
        for line in lines {
            let cleaned = clean_line(&line.text);
            for text in self.port_line(line, mode) {
                program.push(Statement::new(text, cleaned.clone(), line.clone()));
            }
        }
        program
    }

    /// Port a whole source file
    pub fn port_source(&self, source: &str, filename: &str, mode: PortingMode) -> String {
        let mut output = self.port(&Line::from_source(source, filename), mode).to_string();
        if source.ends_with('\n') {
            output.push('\n');
        }
        output
    }

    /// Port one line, keeping its indentation and trailing comment
    pub fn port_line(&self, line: &Line, mode: PortingMode) -> Vec<String> {
        let unchanged = vec![line.text.clone()];
        let cleaned = clean_line(&line.text);
        if cleaned.is_empty() || detect_defined_label(&cleaned).is_some() {
            return unchanged;
        }

        let tokens = split_into_arguments(&cleaned);
        let Some(definition) = self.match_lenient(&tokens) else {
            log::trace!("{}: no command matches, left unchanged", line);
            return unchanged;
        };
        let Some(port) = definition.port else {
            return unchanged;
        };
        let Some(rewritten) = port(mode, &tokens, definition) else {
            return unchanged;
        };
        if !self.verify(&rewritten, definition, mode) {
            log::warn!(
                "{}: {} rewrite of \"{}\" no longer matches, left unchanged",
                line,
                mode,
                cleaned
            );
            return unchanged;
        }

        let indent_len = line.text.len() - line.text.trim_start().len();
        let indent = &line.text[..indent_len];
        let comment = line.text[indent_len..]
            .strip_prefix(cleaned.as_str())
            .filter(|rest| !rest.trim().is_empty())
            .unwrap_or("");
        let last = rewritten.len().saturating_sub(1);
        rewritten
            .iter()
            .enumerate()
            .map(|(index, text)| {
                if index == last {
                    format!("{}{}{}", indent, text, comment)
                } else {
                    format!("{}{}", indent, text)
                }
            })
            .collect()
    }

    /// Resolve, dropping trailing `0` tokens until an overload matches
    fn match_lenient(&self, tokens: &[String]) -> Option<&'a CommandDefinition> {
        let mut end = tokens.len();
        loop {
            if let Ok(definition) = self.resolver.resolve(&tokens[..end]) {
                return Some(definition);
            }
            if end <= 1 || tokens[end - 1] != "0" {
                return None;
            }
            end -= 1;
        }
    }

    /// Every rewritten line must still match; dropping zeroes must also keep
    /// the same command in canonical form
    fn verify(&self, rewritten: &[String], original: &CommandDefinition, mode: PortingMode) -> bool {
        rewritten.iter().all(|text| {
            let tokens = split_into_arguments(text);
            match self.resolver.resolve(&tokens) {
                Ok(definition) if mode == PortingMode::RemoveZeroes => {
                    definition.name == original.name && !definition.is_shorthand()
                }
                Ok(_) => true,
                Err(_) => false,
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn port(text: &str, mode: PortingMode) -> Vec<String> {
        PortingEngine::new().port_line(&Line::new(text, 1, "main.mlog"), mode)
    }

    #[test]
    fn test_remove_zeroes() {
        assert_eq!(port("draw clear 0 0 0 0 0 0", PortingMode::RemoveZeroes), vec!["draw clear 0 0 0"]);
        assert_eq!(port("ucontrol idle 0 0 0 0 0", PortingMode::RemoveZeroes), vec!["ucontrol idle"]);
        assert_eq!(port("jump 3 always 0 0", PortingMode::RemoveZeroes), vec!["jump 3 always"]);
    }

    #[test]
    fn test_keeps_indent_and_comment() {
        assert_eq!(
            port("    draw clear 0 0 0 0 0 0 # wipe", PortingMode::RemoveZeroes),
            vec!["    draw clear 0 0 0 # wipe"]
        );
    }

    #[test]
    fn test_modern_op() {
        assert_eq!(port("op add y 2 2", PortingMode::ModernSyntax), vec!["set y 2 + 2"]);
    }

    #[test]
    fn test_passthrough() {
        for text in ["", "// note", "loop:", "amogus 1 2", "print \"x\""] {
            assert_eq!(port(text, PortingMode::ModernSyntax), vec![text.to_string()]);
        }
    }
}
