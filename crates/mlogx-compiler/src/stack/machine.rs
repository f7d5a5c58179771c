//! Macro stack machine
//!
//! Processes one source line at a time against the open block stack. Block
//! openers push, `}` pops, and plain lines compile to statements unless a
//! disabled `&if` discards them.
//!
//! While a `&for` is the innermost block every line is captured as source,
//! nested openers and closers included, with a depth counter on the loop to
//! find its own `}`. On close the body is substituted with each element and
//! fed back through `process_line`, so nested blocks see the current value.

use crate::blocks::{is_block_closer, is_block_opener, parse_block_header, BlockHeader};
use crate::compiler::CompilerOptions;
use crate::error::{CommandError, CommandErrors, CompileError, ErrorKind, Result};
use crate::namespacer::{namespace_tokens, rename_variable};
use crate::resolver::CommandResolver;
use crate::stack::{CompilerStack, Routing, StackElement};
use mlogx_core::command::TypedVariable;
use mlogx_core::types::CompilerConstants;
use mlogx_core::{Line, Statement};
use mlogx_parser::{clean_line, detect_defined_label, split_into_arguments, substitute_constants};

/// Shorthands expand into canonical lines; this bounds accidental cycles
const MAX_EXPANSION_DEPTH: usize = 8;

pub struct MacroStackMachine<'a> {
    resolver: CommandResolver<'a>,
    directives: CommandResolver<'a>,
    constants: &'a CompilerConstants,
    options: &'a CompilerOptions,
    stack: CompilerStack,
    errors: Vec<CompileError>,
}

impl<'a> MacroStackMachine<'a> {
    pub fn new(
        resolver: CommandResolver<'a>,
        directives: CommandResolver<'a>,
        constants: &'a CompilerConstants,
        options: &'a CompilerOptions,
    ) -> Self {
        Self {
            resolver,
            directives,
            constants,
            options,
            stack: CompilerStack::new(),
            errors: Vec::new(),
        }
    }

    pub fn stack(&self) -> &CompilerStack {
        &self.stack
    }

    /// Errors recorded so far under `compile_with_errors`
    pub fn errors(&self) -> &[CompileError] {
        &self.errors
    }

    pub fn take_errors(&mut self) -> Vec<CompileError> {
        std::mem::take(&mut self.errors)
    }

    /// Process one source line, returning the statements it emits
    pub fn process_line(&mut self, line: &Line) -> Result<Vec<Statement>> {
        let cleaned = clean_line(&line.text);
        if cleaned.is_empty() {
            return Ok(Vec::new());
        }

        let capture_depth = match self.stack.top() {
            Some(StackElement::For { depth, .. }) => Some(*depth),
            _ => None,
        };
        if let Some(depth) = capture_depth {
            let closes = is_block_closer(&cleaned);
            if closes && depth == 0 {
                return self.close_block(line);
            }
            let opens = is_block_opener(&cleaned, &self.directives);
            if let Some(StackElement::For {
                loop_buffer, depth, ..
            }) = self.stack.top_mut()
            {
                if closes {
                    *depth -= 1;
                } else if opens {
                    *depth += 1;
                }
                loop_buffer.push(line.clone());
            }
            return Ok(Vec::new());
        }

        if is_block_closer(&cleaned) {
            return self.close_block(line);
        }

        let substituted = substitute_constants(&cleaned, self.constants);
        if is_block_opener(&substituted, &self.directives) {
            self.open_block(line, &substituted)?;
            return Ok(Vec::new());
        }

        if self.stack.routing() == Routing::Discard {
            log::trace!("{}: skipped by disabled &if", line);
            return Ok(Vec::new());
        }
        self.compile_plain(line, &substituted)
    }

    /// Fail if any block is still open
    pub fn finish(&self) -> Result<()> {
        match self.stack.top() {
            Some(element) => Err(CompileError::UnterminatedBlock {
                line: element.origin().clone(),
                block: element.kind_name().to_string(),
            }),
            None => Ok(()),
        }
    }

    fn open_block(&mut self, line: &Line, header: &str) -> Result<()> {
        let header = parse_block_header(header, &self.directives).map_err(|message| {
            CompileError::InvalidBlock {
                line: line.clone(),
                message,
            }
        })?;
        let element = match header {
            BlockHeader::Namespace(name) => StackElement::namespace(&name, line.clone()),
            BlockHeader::For { variable, elements } => {
                StackElement::for_loop(&variable, elements, line.clone())
            }
            BlockHeader::If(enabled) => StackElement::if_block(enabled, line.clone()),
        };
        log::debug!("{}: opened {} block", line, element.kind_name());
        self.stack.push(element);
        Ok(())
    }

    fn close_block(&mut self, line: &Line) -> Result<Vec<Statement>> {
        let Some(element) = self.stack.pop() else {
            return Err(CompileError::UnmatchedBrace { line: line.clone() });
        };
        log::debug!("{}: closed {} block", line, element.kind_name());
        match element {
            StackElement::Namespace { .. } | StackElement::If { .. } => Ok(Vec::new()),
            StackElement::For {
                variable,
                elements,
                loop_buffer,
                ..
            } => self.unroll(&variable, &elements, &loop_buffer),
        }
    }

    fn unroll(&mut self, variable: &str, elements: &[String], body: &[Line]) -> Result<Vec<Statement>> {
        log::debug!(
            "Unrolling &for {} over {} elements, {} body lines",
            variable,
            elements.len(),
            body.len()
        );
        let base_depth = self.stack.len();
        let mut output = Vec::new();
        for element in elements {
            let binding = CompilerConstants::single(variable, element.as_str());
            for body_line in body {
                let line = Line {
                    text: substitute_constants(&body_line.text, &binding),
                    ..body_line.clone()
                };
                output.extend(self.process_line(&line)?);
            }
            if self.stack.len() != base_depth {
                if let Some(open) = self.stack.top() {
                    return Err(CompileError::UnterminatedBlock {
                        line: open.origin().clone(),
                        block: open.kind_name().to_string(),
                    });
                }
            }
        }
        Ok(output)
    }

    fn compile_plain(&mut self, line: &Line, substituted: &str) -> Result<Vec<Statement>> {
        if let Some(label) = detect_defined_label(substituted) {
            let name = rename_variable(label, &self.stack.namespaces(), line.file_stem());
            return Ok(vec![Statement::new(format!("{}:", name), substituted, line.clone())]);
        }
        let tokens = split_into_arguments(substituted);
        self.compile_tokens(&tokens, line, substituted, 0)
    }

    fn compile_tokens(
        &mut self,
        tokens: &[String],
        line: &Line,
        cleaned: &str,
        expansion_depth: usize,
    ) -> Result<Vec<Statement>> {
        let definition = match self.resolver.resolve(tokens) {
            Ok(definition) => definition,
            Err(errors) => return self.report(&errors, tokens, line, cleaned),
        };
        let types = self.resolver.types();

        if let Some(expanded) = definition.expand(tokens) {
            if expansion_depth >= MAX_EXPANSION_DEPTH {
                let error = CommandError::new(
                    ErrorKind::BadStructure,
                    format!("Shorthand \"{}\" does not expand to a canonical command", definition.usage()),
                );
                return self.report(&CommandErrors::from(error), tokens, line, cleaned);
            }
            let mut statements = Vec::new();
            for expanded_line in expanded {
                let expanded_tokens = split_into_arguments(&expanded_line);
                statements.extend(self.compile_tokens(&expanded_tokens, line, cleaned, expansion_depth + 1)?);
            }
            // Declarations made by the shorthand itself, e.g. `set x:number 5`
            if definition.defined_vars.is_some() {
                let declared = self.rename_all(definition.defined_variables(tokens, types), line);
                if let Some(first) = statements.first_mut() {
                    first.defined = declared;
                }
            }
            return Ok(statements);
        }

        let renamed = namespace_tokens(tokens, definition, types, &self.stack.namespaces(), line.file_stem());
        let defined = self.rename_all(definition.defined_variables(tokens, types), line);
        let used = self.rename_all(definition.used_variables(tokens, types), line);
        Ok(vec![
            Statement::new(renamed.join(" "), cleaned, line.clone()).with_variables(defined, used)
        ])
    }

    fn rename_all(&self, variables: Vec<TypedVariable>, line: &Line) -> Vec<TypedVariable> {
        let namespaces = self.stack.namespaces();
        variables
            .into_iter()
            .map(|variable| TypedVariable {
                name: rename_variable(&variable.name, &namespaces, line.file_stem()),
                ..variable
            })
            .collect()
    }

    /// Record or raise a per-line error; under `compile_with_errors` the line
    /// is emitted unchanged
    fn report(
        &mut self,
        errors: &CommandErrors,
        tokens: &[String],
        line: &Line,
        cleaned: &str,
    ) -> Result<Vec<Statement>> {
        let command = tokens.first().map(String::as_str).unwrap_or_default();
        let error = match errors.most_relevant() {
            Some(error) => error.at(line, command),
            None => CompileError::NoCommand {
                line: line.clone(),
                command: command.to_string(),
            },
        };
        if !self.options.compile_with_errors {
            return Err(error);
        }
        log::debug!("{}", error);
        self.errors.push(error);
        Ok(vec![Statement::new(cleaned, cleaned, line.clone())])
    }
}
