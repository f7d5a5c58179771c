//! mlogx Compiler - mlogx to mlog compiler
//!
//! This crate expands the compile-time constructs of mlogx (namespaces,
//! `&for` and `&if` blocks, shorthands, compiler constants) into plain mlog,
//! and ports mlog between syntax eras.

pub mod blocks;
pub mod compiler;
pub mod error;
pub mod namespacer;
pub mod optimizer;
pub mod porting;
pub mod resolver;
pub mod semantic;
pub mod stack;

// Re-export main types
pub use compiler::{CompileOutput, Compiler, CompilerOptions};
pub use error::{CommandError, CommandErrors, CompileError, ErrorKind, Result};
pub use porting::PortingEngine;
pub use resolver::CommandResolver;

// Re-export compile-time machinery
pub use stack::{CompilerStack, MacroStackMachine, Routing, StackElement};

// Re-export passes
pub use optimizer::JumpLabelPass;
pub use semantic::TypeChecker;
