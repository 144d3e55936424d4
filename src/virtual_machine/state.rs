//! Program state contract consumed by the engine and the push operators.
//!
//! A program state is any type threaded through evaluation. The engine only
//! needs [`ProgramState`] (cursor + script). Push operators additionally need a
//! stack ([`StackState`]) and an error slot ([`ErrorState`]). Everything else a
//! concrete state carries (block height, lock time, ...) is opaque to the core
//! and only copied by the instruction set's `clone_state` hook.

use crate::virtual_machine::errors::CommonError;

/// Minimum state every instruction set must provide.
pub trait ProgramState {
    /// Index of the next byte to read in [`script`](ProgramState::script).
    fn ip(&self) -> usize;
    /// Moves the instruction pointer.
    fn set_ip(&mut self, ip: usize);
    /// The full program being evaluated.
    fn script(&self) -> &[u8];
}

/// States with a value stack. The top of the stack is the last element.
pub trait StackState {
    type Item;

    fn stack(&self) -> &[Self::Item];
    fn stack_mut(&mut self) -> &mut Vec<Self::Item>;
}

/// States with an optional error marker.
///
/// Once an error is set, the instruction set's `continue_execution` hook must
/// return false.
pub trait ErrorState {
    type Error;

    fn error(&self) -> Option<&Self::Error>;
    fn set_error(&mut self, error: Self::Error);
}

/// Records a common error on `state`.
pub fn apply_error<S>(state: &mut S, error: CommonError)
where
    S: ErrorState,
    S::Error: From<CommonError>,
{
    state.set_error(error.into());
}

/// Value stored on the stack of the bundled instruction sets.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum StackItem {
    /// Small integer pushed by the number opcodes.
    Number(i64),
    /// Raw bytes pushed by the data opcodes.
    Bytes(Vec<u8>),
}

impl StackItem {
    /// Returns the type name for display.
    pub fn type_name(&self) -> &'static str {
        match self {
            StackItem::Number(_) => "Number",
            StackItem::Bytes(_) => "Bytes",
        }
    }
}

impl From<i64> for StackItem {
    fn from(value: i64) -> Self {
        StackItem::Number(value)
    }
}

impl From<Vec<u8>> for StackItem {
    fn from(value: Vec<u8>) -> Self {
        StackItem::Bytes(value)
    }
}

impl std::fmt::Display for StackItem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StackItem::Number(n) => write!(f, "{n}"),
            StackItem::Bytes(bytes) => {
                write!(f, "0x")?;
                for byte in bytes {
                    write!(f, "{:02x}", byte)?;
                }
                Ok(())
            }
        }
    }
}
