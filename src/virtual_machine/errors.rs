use authvm_derive::Error;

/// Errors shared by every instruction set.
///
/// These are recorded on a program state's `error` field rather than returned;
/// the instruction set's `continue_execution` hook stops evaluation once one is
/// present.
#[derive(Clone, Copy, Debug, Error, Eq, PartialEq, Hash)]
pub enum CommonError {
    /// A push operator needed more bytes than the script holds.
    #[error("Script must be long enough to push the requested number of bytes.")]
    MalformedPush,
    /// A push used a longer encoding than its payload requires.
    #[error("Push operations must use the smallest possible encoding.")]
    NonMinimalPush,
    /// Dispatch reached the instruction set's `undefined` operator.
    #[error("Called an unknown or unimplemented opcode.")]
    UnknownOpcode,
}

/// Errors returned while converting textual scripts to bytes.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum ScriptError {
    /// Hex input must encode whole bytes.
    #[error("hex string has odd length {length}")]
    OddLength { length: usize },
    /// A character outside `[0-9a-fA-F]`.
    #[error("invalid hex character {character:?} at position {position}")]
    InvalidHexCharacter { character: char, position: usize },
    /// A byte with no opcode assigned in the instruction set's catalog.
    #[error("byte 0x{opcode:02x} is not an assigned opcode")]
    UnassignedOpcode { opcode: u8 },
}
