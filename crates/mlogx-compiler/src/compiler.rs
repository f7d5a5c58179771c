//! Main compiler
//!
//! Runs source lines through the macro stack machine, then the jump label
//! passes and, optionally, the type checker.

use crate::error::{CompileError, Result};
use crate::optimizer::JumpLabelPass;
use crate::resolver::CommandResolver;
use crate::semantic::TypeChecker;
use crate::stack::MacroStackMachine;
use mlogx_core::command::CommandRegistry;
use mlogx_core::types::{ArgTypeRegistry, CompilerConstants, GameContent};
use mlogx_core::{IconMap, Line, Program};
use serde::{Deserialize, Serialize};

/// Compiler options
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CompilerOptions {
    /// Record per-line command errors and keep going instead of aborting
    pub compile_with_errors: bool,
    /// Run the type checker over the compiled program
    pub check_types: bool,
    /// Delete label definitions no jump refers to
    pub remove_unused_jump_labels: bool,
}

impl Default for CompilerOptions {
    fn default() -> Self {
        Self {
            compile_with_errors: true,
            check_types: false,
            remove_unused_jump_labels: false,
        }
    }
}

impl CompilerOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_compile_with_errors(mut self, enabled: bool) -> Self {
        self.compile_with_errors = enabled;
        self
    }

    pub fn with_check_types(mut self, enabled: bool) -> Self {
        self.check_types = enabled;
        self
    }

    pub fn with_remove_unused_jump_labels(mut self, enabled: bool) -> Self {
        self.remove_unused_jump_labels = enabled;
        self
    }
}

/// Compiled program plus the errors recorded under `compile_with_errors`
#[derive(Debug, Clone, Default)]
pub struct CompileOutput {
    pub program: Program,
    pub errors: Vec<CompileError>,
}

impl CompileOutput {
    /// Output lines, one instruction or label each
    pub fn lines(&self) -> Vec<String> {
        self.program.lines()
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// The mlogx compiler
pub struct Compiler {
    /// Compiler options
    options: CompilerOptions,
    /// User constants
    constants: CompilerConstants,
    /// Argument categories over the active content tables
    types: ArgTypeRegistry,
    /// Base dialect commands
    commands: &'static CommandRegistry,
    /// `namespace`, `&for` and `&if`
    directives: &'static CommandRegistry,
    /// Exposed as the `icon` constant
    icons: Option<IconMap>,
}

impl Compiler {
    /// Create a compiler with default options and vanilla content
    pub fn new() -> Self {
        Self::with_options(CompilerOptions::default())
    }

    /// Create a compiler with custom options
    pub fn with_options(options: CompilerOptions) -> Self {
        Self {
            options,
            constants: CompilerConstants::new(),
            types: ArgTypeRegistry::standard().clone(),
            commands: CommandRegistry::standard(),
            directives: CommandRegistry::compiler_commands(),
            icons: None,
        }
    }

    pub fn with_constants(mut self, constants: CompilerConstants) -> Self {
        self.constants = constants;
        self
    }

    /// Validate against different game content tables
    pub fn with_content(mut self, content: GameContent) -> Self {
        self.types = ArgTypeRegistry::new(content);
        self
    }

    pub fn with_icons(mut self, icons: IconMap) -> Self {
        self.icons = Some(icons);
        self
    }

    pub fn options(&self) -> &CompilerOptions {
        &self.options
    }

    pub fn types(&self) -> &ArgTypeRegistry {
        &self.types
    }

    /// Compile one unit of source lines
    pub fn compile(&self, lines: &[Line]) -> Result<CompileOutput> {
        let mut constants = self.constants.clone();
        if let Some(icons) = &self.icons {
            constants.merge_missing(CompilerConstants::single("icon", icons.as_constants()));
        }

        let resolver = CommandResolver::new(self.commands, &self.types);
        let directives = CommandResolver::new(self.directives, &self.types);
        let mut machine = MacroStackMachine::new(resolver, directives, &constants, &self.options);

        let mut program = Program::new();
        for line in lines {
            program.extend(machine.process_line(line)?);
        }
        machine.finish()?;
        let mut errors = machine.take_errors();

        let program = JumpLabelPass::new(self.options.remove_unused_jump_labels).optimize(&program);

        if self.options.check_types {
            let type_errors = TypeChecker::new(&self.types).check(&program);
            if !self.options.compile_with_errors {
                if let Some(error) = type_errors.into_iter().next() {
                    return Err(error);
                }
            } else {
                errors.extend(type_errors);
            }
        }

        log::debug!(
            "Compiled {} lines into {} statements with {} errors",
            lines.len(),
            program.len(),
            errors.len()
        );
        Ok(CompileOutput { program, errors })
    }

    /// Split `source` into lines and compile them
    pub fn compile_source(&self, source: &str, filename: &str) -> Result<CompileOutput> {
        self.compile(&Line::from_source(source, filename))
    }
}

impl Default for Compiler {
    fn default() -> Self {
        Self::new()
    }
}
