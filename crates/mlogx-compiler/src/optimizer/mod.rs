//! Optimization module
//!
//! Passes over the compiled program that run after macro expansion.

pub mod jump_labels;

// Re-export for convenience
pub use jump_labels::JumpLabelPass;
