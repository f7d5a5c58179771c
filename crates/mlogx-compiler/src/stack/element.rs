use mlogx_core::Line;

/// An open compile-time block
#[derive(Debug, Clone, PartialEq)]
pub enum StackElement {
    Namespace {
        name: String,
        origin: Line,
    },
    For {
        variable: String,
        elements: Vec<String>,
        /// Body lines captured as source, compiled once per element on close
        loop_buffer: Vec<Line>,
        /// Nesting depth of blocks opened inside the captured body
        depth: usize,
        origin: Line,
    },
    If {
        enabled: bool,
        origin: Line,
    },
}

impl StackElement {
    pub fn namespace(name: &str, origin: Line) -> Self {
        StackElement::Namespace {
            name: name.to_string(),
            origin,
        }
    }

    pub fn for_loop(variable: &str, elements: Vec<String>, origin: Line) -> Self {
        StackElement::For {
            variable: variable.to_string(),
            elements,
            loop_buffer: Vec::new(),
            depth: 0,
            origin,
        }
    }

    pub fn if_block(enabled: bool, origin: Line) -> Self {
        StackElement::If { enabled, origin }
    }

    /// Line that opened the block
    pub fn origin(&self) -> &Line {
        match self {
            StackElement::Namespace { origin, .. }
            | StackElement::For { origin, .. }
            | StackElement::If { origin, .. } => origin,
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            StackElement::Namespace { .. } => "namespace",
            StackElement::For { .. } => "&for",
            StackElement::If { .. } => "&if",
        }
    }
}
