//! Semantic analysis module
//!
//! This module provides variable type checking for compiled programs.

pub mod type_checker;

// Re-export for convenience
pub use type_checker::TypeChecker;
