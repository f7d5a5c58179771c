//! Type definitions for mlogx
//!
//! This module contains the generic argument type registry, the game content
//! tables it validates against, and compiler constant values.

pub mod arg_types;
pub mod content;
pub mod operators;
pub mod value;

pub use arg_types::{ArgKey, ArgTypeRegistry, GenericArgType, Validator};
pub use content::GameContent;
pub use value::{CompilerConstants, ConstValue};
