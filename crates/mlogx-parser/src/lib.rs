//! mlogx Parser - Source text handling for the mlogx compiler
//!
//! This crate turns raw source lines into the cleaned text and tokens the
//! compiler resolves: comment stripping, tokenization, compiler constant
//! substitution and jump label recognition.

pub mod constants;
pub mod labels;
pub mod normalizer;

// Re-export main parser functions
pub use constants::substitute_constants;
pub use labels::{detect_defined_label, detect_used_label, is_numeric_target};
pub use normalizer::{clean_line, remove_comments, remove_trailing_spaces, split_into_arguments};
