//! Authentication virtual machine library.
//!
//! Provides a generic engine for byte-encoded authentication scripts, the push
//! operators shared by Bitcoin-style languages, and a Bitcoin Cash instruction set.

pub mod instruction_sets;
pub mod utils;
pub mod virtual_machine;
