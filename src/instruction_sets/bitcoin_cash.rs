//! Bitcoin Cash instruction set.
//!
//! Implements the push range (`OP_0` through `OP_16`, constant and variable
//! data pushes). All other opcodes, including `OP_CODESEPARATOR`, dispatch to
//! the `undefined` operator.

use crate::instruction_sets::common::{
    push_data_constant_operators, push_data_variable_operators, push_number_operators,
};
use crate::instruction_sets::opcodes::Opcode;
use crate::virtual_machine::errors::CommonError;
use crate::virtual_machine::isa::{
    InstructionSet, OperatorMap, advance_instruction_pointer, has_more_instructions,
    undefined_operator,
};
use crate::virtual_machine::operator::Operator;
use crate::virtual_machine::script::serialize_script;
use crate::virtual_machine::state::{ErrorState, ProgramState, StackItem, StackState};
use crate::virtual_machine::vm::VirtualMachine;

/// Program state evaluated by [`BitcoinCashInstructionSet`].
///
/// The network and transaction fields are carried through evaluation
/// unchanged; no operator in this crate reads them.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct BitcoinCashProgramState {
    pub ip: usize,
    pub script: Vec<u8>,
    pub stack: Vec<StackItem>,
    pub error: Option<CommonError>,
    pub block_height: u32,
    pub block_time: u32,
    pub lock_time: u32,
    pub sequence_number: u32,
}

impl BitcoinCashProgramState {
    /// Fresh state at the start of `script`.
    pub fn new(script: Vec<u8>) -> Self {
        Self {
            script,
            ..Self::default()
        }
    }

    /// Fresh state for an unlocking script followed by `OP_CODESEPARATOR` and
    /// the locking script.
    pub fn from_scripts(unlocking: &[u8], locking: &[u8]) -> Self {
        Self::new(serialize_script(
            unlocking,
            locking,
            Opcode::OpCodeSeparator.byte(),
        ))
    }
}

impl ProgramState for BitcoinCashProgramState {
    fn ip(&self) -> usize {
        self.ip
    }

    fn set_ip(&mut self, ip: usize) {
        self.ip = ip;
    }

    fn script(&self) -> &[u8] {
        &self.script
    }
}

impl StackState for BitcoinCashProgramState {
    type Item = StackItem;

    fn stack(&self) -> &[StackItem] {
        &self.stack
    }

    fn stack_mut(&mut self) -> &mut Vec<StackItem> {
        &mut self.stack
    }
}

impl ErrorState for BitcoinCashProgramState {
    type Error = CommonError;

    fn error(&self) -> Option<&CommonError> {
        self.error.as_ref()
    }

    fn set_error(&mut self, error: CommonError) {
        self.error = Some(error);
    }
}

/// Options for [`BitcoinCashInstructionSet`].
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct BitcoinCashConfig {
    /// Makes `OP_PUSHDATA4` push data instead of always failing with
    /// [`CommonError::NonMinimalPush`].
    pub enable_pushdata4: bool,
}

/// The Bitcoin Cash authentication language.
#[derive(Clone, Copy, Debug, Default)]
pub struct BitcoinCashInstructionSet {
    config: BitcoinCashConfig,
}

impl BitcoinCashInstructionSet {
    pub fn new(config: BitcoinCashConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> BitcoinCashConfig {
        self.config
    }
}

impl InstructionSet for BitcoinCashInstructionSet {
    type State = BitcoinCashProgramState;

    fn operators(&self) -> OperatorMap<BitcoinCashProgramState> {
        let mut operators = push_number_operators();
        operators.extend(push_data_constant_operators());
        operators.extend(push_data_variable_operators(self.config.enable_pushdata4));
        operators
    }

    fn undefined(&self) -> Operator<BitcoinCashProgramState> {
        undefined_operator()
    }

    fn clone_state(&self, state: &BitcoinCashProgramState) -> BitcoinCashProgramState {
        state.clone()
    }

    fn continue_execution(&self, state: &BitcoinCashProgramState) -> bool {
        has_more_instructions(state)
    }

    fn next(&self, state: &mut BitcoinCashProgramState) {
        advance_instruction_pointer(state);
    }
}

/// Builds a Bitcoin Cash virtual machine.
pub fn create_virtual_machine(config: BitcoinCashConfig) -> VirtualMachine<BitcoinCashInstructionSet> {
    VirtualMachine::new(BitcoinCashInstructionSet::new(config))
}
