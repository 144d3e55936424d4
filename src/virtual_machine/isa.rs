//! Instruction set contract.
//!
//! An instruction set defines the mechanics of one authentication language
//! (e.g. Bitcoin Cash): which [`Operator`] runs for each opcode, what runs for
//! opcodes it does not define, and the hooks the engine calls between
//! operators.

use crate::virtual_machine::errors::CommonError;
use crate::virtual_machine::operator::Operator;
use crate::virtual_machine::state::{ErrorState, ProgramState, apply_error};
use std::collections::BTreeMap;

/// Number of distinct opcodes (one byte each).
pub const OPCODE_COUNT: usize = 256;

/// Sparse opcode to operator mapping.
pub type OperatorMap<S> = BTreeMap<u8, Operator<S>>;

/// Pluggable table of operators plus the control hooks used by the engine.
pub trait InstructionSet {
    type State: ProgramState + 'static;

    /// Operators for the opcodes this set defines. Opcodes missing from the
    /// map dispatch to [`undefined`](InstructionSet::undefined).
    fn operators(&self) -> OperatorMap<Self::State>;

    /// Fallback for opcodes without an explicit operator. Should usually mark
    /// the state with an error.
    fn undefined(&self) -> Operator<Self::State>;

    /// Returns an independent copy of `state`. Script bytes and stack contents
    /// must be copied, not shared.
    fn clone_state(&self, state: &Self::State) -> Self::State;

    /// Returns whether evaluation should take another step. Must return false
    /// once the state carries an error.
    fn continue_execution(&self, state: &Self::State) -> bool;

    /// Runs after the opcode is selected and right before its operator.
    /// Usually advances the instruction pointer past the opcode byte.
    fn next(&self, state: &mut Self::State);
}

/// Fallback operator marking the state with [`CommonError::UnknownOpcode`].
pub fn undefined_operator<S>() -> Operator<S>
where
    S: ErrorState + 'static,
    S::Error: From<CommonError>,
{
    Operator::new(
        "undefined",
        "An undefined or unimplemented opcode was called.",
        |state: &mut S| apply_error(state, CommonError::UnknownOpcode),
    )
}

/// `next` hook shared by the bundled instruction sets: steps over the opcode byte.
#[inline]
pub fn advance_instruction_pointer<S: ProgramState>(state: &mut S) {
    state.set_ip(state.ip() + 1);
}

/// Continuation predicate shared by the bundled instruction sets: no error and
/// bytes left to execute.
#[inline]
pub fn has_more_instructions<S: ProgramState + ErrorState>(state: &S) -> bool {
    state.error().is_none() && state.ip() < state.script().len()
}
