//! Instruction sets bundled with the engine.
//!
//! - [`opcodes`]: Bitcoin Cash opcode catalog
//! - [`common`]: push operator groups shared by Bitcoin-style languages
//! - [`bitcoin_cash`]: Bitcoin Cash program state and instruction set

pub mod bitcoin_cash;
pub mod common;
pub mod opcodes;
