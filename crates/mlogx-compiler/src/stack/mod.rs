//! Compile-time block stack
//!
//! Open `namespace`, `&for` and `&if` blocks, innermost last, and the machine
//! that processes source lines against them.

mod element;
mod machine;

pub use element::StackElement;
pub use machine::MacroStackMachine;

/// Where output produced inside the current blocks goes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Routing {
    /// Straight to the program
    Emit,
    /// Into the nearest enclosing `&for` body
    Capture,
    /// Dropped by a disabled `&if`
    Discard,
}

/// Strictly nested open blocks
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompilerStack {
    elements: Vec<StackElement>,
}

impl CompilerStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, element: StackElement) {
        self.elements.push(element);
    }

    /// Only the innermost block can be closed
    pub fn pop(&mut self) -> Option<StackElement> {
        self.elements.pop()
    }

    pub fn top(&self) -> Option<&StackElement> {
        self.elements.last()
    }

    pub fn top_mut(&mut self) -> Option<&mut StackElement> {
        self.elements.last_mut()
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Outermost first
    pub fn iter(&self) -> std::slice::Iter<'_, StackElement> {
        self.elements.iter()
    }

    /// Names of the open namespaces, outermost first
    pub fn namespaces(&self) -> Vec<&str> {
        self.elements
            .iter()
            .filter_map(|element| match element {
                StackElement::Namespace { name, .. } => Some(name.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Walk outward from the innermost block: a `&for` captures, a disabled
    /// `&if` discards, anything else defers to the next block out
    pub fn routing(&self) -> Routing {
        for element in self.elements.iter().rev() {
            match element {
                StackElement::For { .. } => return Routing::Capture,
                StackElement::If { enabled: false, .. } => return Routing::Discard,
                StackElement::If { enabled: true, .. } | StackElement::Namespace { .. } => {}
            }
        }
        Routing::Emit
    }
}
