//! Instruction-set-pluggable virtual machine for authentication scripts.
//!
//! The engine knows nothing about any particular language. An
//! [`isa::InstructionSet`] supplies the operator for each opcode and the hooks
//! that advance and stop evaluation; the engine resolves those operators into
//! a dense dispatch table and drives the program state through them.
//!
//! # Execution model
//!
//! - **Program state**: an instruction pointer into a script plus whatever the
//!   instruction set needs (stack, error slot, transaction context)
//! - **Step**: select the opcode at `ip`, run the `next` hook, run the operator
//! - **Errors**: recorded on the state, never returned; `continue_execution`
//!   stops the loop once one is set
//! - **Debugging**: [`vm::VirtualMachine::debug`] returns every intermediate state
//!   with the operator's resolved asm and description
//!
//! # Modules
//!
//! - [`errors`]: Evaluation and script parsing error types
//! - [`isa`]: Instruction set contract and shared hooks
//! - [`operator`]: Operator type and debugging text
//! - [`push`]: Push operator builders
//! - [`script`]: Script concatenation and hex helpers
//! - [`state`]: Program state traits and the stack item type
//! - [`vm`]: Core virtual machine implementation

pub mod errors;
pub mod isa;
pub mod operator;
pub mod push;
pub mod script;
pub mod state;
pub mod vm;
