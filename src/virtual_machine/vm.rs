//! Virtual machine engine.
//!
//! The engine is built once from an [`InstructionSet`] and resolves every
//! possible opcode to an operator up front, so dispatch is a table lookup. It
//! never fails on malformed programs: operators record errors on the state and
//! the instruction set's `continue_execution` hook stops the loop.

use crate::debug;
use crate::virtual_machine::isa::{InstructionSet, OPCODE_COUNT};
use crate::virtual_machine::operator::{DebuggingInformation, Operator};
use crate::virtual_machine::state::ProgramState;
use std::sync::Arc;

/// One entry of a [`VirtualMachine::debug`] trace.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DebugStep<S> {
    /// Display text of the operator that produced `state`; `None` for the
    /// initial entry.
    pub info: Option<DebuggingInformation>,
    /// State after the operator ran (or the input state for the initial entry).
    pub state: S,
}

/// Authentication virtual machine for one instruction set.
///
/// `step`, `evaluate` and `debug` never modify their input. `step_mutate` is
/// the copy-free primitive for callers that own the state exclusively.
pub struct VirtualMachine<I: InstructionSet> {
    instruction_set: I,
    /// Operator for every opcode, with `undefined` filling the gaps.
    operators: [Arc<Operator<I::State>>; OPCODE_COUNT],
}

impl<I: InstructionSet> VirtualMachine<I> {
    /// Builds the dispatch table for `instruction_set`.
    pub fn new(instruction_set: I) -> Self {
        let undefined = Arc::new(instruction_set.undefined());
        let mut defined = instruction_set.operators();
        let defined_count = defined.len();
        let operators = std::array::from_fn(|opcode| {
            defined
                .remove(&(opcode as u8))
                .map(Arc::new)
                .unwrap_or_else(|| Arc::clone(&undefined))
        });
        debug!(
            "dispatch table built: {} defined opcodes, {} undefined",
            defined_count,
            OPCODE_COUNT - defined_count
        );
        Self {
            instruction_set,
            operators,
        }
    }

    /// Returns the instruction set this engine dispatches to.
    pub fn instruction_set(&self) -> &I {
        &self.instruction_set
    }

    /// Returns the operator `opcode` dispatches to.
    pub fn operator(&self, opcode: u8) -> &Operator<I::State> {
        &self.operators[opcode as usize]
    }

    /// Operator for the opcode under the instruction pointer.
    #[inline]
    fn current_operator(&self, state: &I::State) -> &Operator<I::State> {
        self.operator(state.script()[state.ip()])
    }

    /// Runs `next` and then `operator` on `state`.
    #[inline]
    fn apply(&self, state: &mut I::State, operator: &Operator<I::State>) {
        self.instruction_set.next(state);
        operator.apply(state);
    }

    /// Executes the opcode under the instruction pointer directly on `state`
    /// and returns the same state.
    ///
    /// # Panics
    ///
    /// Panics if the instruction pointer is past the end of the script. Only
    /// call this while `continue_execution` holds.
    pub fn step_mutate<'s>(&self, state: &'s mut I::State) -> &'s mut I::State {
        let operator = self.current_operator(state);
        self.apply(state, operator);
        state
    }

    /// Returns a copy of `state` advanced by one opcode.
    ///
    /// # Panics
    ///
    /// Same contract as [`step_mutate`](Self::step_mutate).
    pub fn step(&self, state: &I::State) -> I::State {
        let mut next = self.instruction_set.clone_state(state);
        self.step_mutate(&mut next);
        next
    }

    /// Copies `state` once and steps the copy until `continue_execution`
    /// returns false.
    pub fn evaluate(&self, state: &I::State) -> I::State {
        let mut current = self.instruction_set.clone_state(state);
        while self.instruction_set.continue_execution(&current) {
            self.step_mutate(&mut current);
        }
        current
    }

    /// Evaluates `state` to completion, recording every intermediate state.
    ///
    /// The first entry holds a copy of the input with no operator info. Each
    /// following entry pairs the operator's text, rendered against the state
    /// before it ran, with the state after it ran. A step that sets an error
    /// is the last entry.
    pub fn debug(&self, state: &I::State) -> Vec<DebugStep<I::State>> {
        let mut trace = vec![DebugStep {
            info: None,
            state: self.instruction_set.clone_state(state),
        }];
        loop {
            let Some(last) = trace.last() else { break };
            let current = &last.state;
            if !self.instruction_set.continue_execution(current) {
                break;
            }
            let operator = self.current_operator(current);
            let info = operator.describe(current);
            let next = self.step(current);
            trace.push(DebugStep {
                info: Some(info),
                state: next,
            });
        }
        debug!("debug trace finished after {} steps", trace.len() - 1);
        trace
    }
}
