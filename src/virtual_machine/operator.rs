//! Operators: the behavior bound to one opcode.

use std::fmt;

/// Display text that is either fixed or computed from the state.
pub enum Text<S> {
    /// Literal text.
    Static(String),
    /// Text rendered from the state the operator is about to run against.
    Dynamic(Box<dyn Fn(&S) -> String + Send + Sync>),
}

impl<S> Text<S> {
    /// Wraps a closure rendering text from a state.
    pub fn dynamic(render: impl Fn(&S) -> String + Send + Sync + 'static) -> Self {
        Text::Dynamic(Box::new(render))
    }

    /// Resolves the text against `state`.
    pub fn resolve(&self, state: &S) -> String {
        match self {
            Text::Static(text) => text.clone(),
            Text::Dynamic(render) => render(state),
        }
    }

    /// Returns the literal text, or `None` for state-dependent text.
    pub fn as_static(&self) -> Option<&str> {
        match self {
            Text::Static(text) => Some(text),
            Text::Dynamic(_) => None,
        }
    }
}

impl<S> From<&str> for Text<S> {
    fn from(text: &str) -> Self {
        Text::Static(text.to_string())
    }
}

impl<S> From<String> for Text<S> {
    fn from(text: String) -> Self {
        Text::Static(text)
    }
}

impl<S> fmt::Debug for Text<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Text::Static(text) => f.debug_tuple("Static").field(text).finish(),
            Text::Dynamic(_) => f.write_str("Dynamic(..)"),
        }
    }
}

/// Resolved display text for one executed operator.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct DebuggingInformation {
    pub asm: String,
    pub description: String,
}

/// The behavior of a single opcode.
///
/// An operation receives the state right after the instruction set's `next`
/// hook ran, so it may consume operand bytes by moving the instruction pointer
/// forward. When it returns, the instruction pointer must point at the next
/// opcode (or one past the end of the script).
pub struct Operator<S> {
    asm: Text<S>,
    description: Text<S>,
    operation: Box<dyn Fn(&mut S) + Send + Sync>,
}

impl<S> Operator<S> {
    pub fn new(
        asm: impl Into<Text<S>>,
        description: impl Into<Text<S>>,
        operation: impl Fn(&mut S) + Send + Sync + 'static,
    ) -> Self {
        Self {
            asm: asm.into(),
            description: description.into(),
            operation: Box::new(operation),
        }
    }

    pub fn asm(&self) -> &Text<S> {
        &self.asm
    }

    pub fn description(&self) -> &Text<S> {
        &self.description
    }

    /// Runs the operation on `state` in place.
    #[inline]
    pub fn apply(&self, state: &mut S) {
        (self.operation)(state)
    }

    /// Resolves both display fields against the pre-operation `state`.
    pub fn describe(&self, state: &S) -> DebuggingInformation {
        DebuggingInformation {
            asm: self.asm.resolve(state),
            description: self.description.resolve(state),
        }
    }
}

impl<S> fmt::Debug for Operator<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Operator")
            .field("asm", &self.asm)
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}
