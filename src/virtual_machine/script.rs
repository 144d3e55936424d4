//! Script byte helpers.

use crate::virtual_machine::errors::ScriptError;

/// Joins an unlocking and a locking script into one program, separated by the
/// instruction set's `separator` opcode.
pub fn serialize_script(unlocking: &[u8], locking: &[u8], separator: u8) -> Vec<u8> {
    let mut script = Vec::with_capacity(unlocking.len() + locking.len() + 1);
    script.extend_from_slice(unlocking);
    script.push(separator);
    script.extend_from_slice(locking);
    script
}

fn hex_value(character: char, position: usize) -> Result<u8, ScriptError> {
    character
        .to_digit(16)
        .map(|v| v as u8)
        .ok_or(ScriptError::InvalidHexCharacter {
            character,
            position,
        })
}

/// Decodes a hex string (either case, no prefix) into bytes.
pub fn hex_to_bin(hex: &str) -> Result<Vec<u8>, ScriptError> {
    let hex = hex.trim();
    let chars: Vec<char> = hex.chars().collect();
    if chars.len() % 2 != 0 {
        return Err(ScriptError::OddLength {
            length: chars.len(),
        });
    }
    chars
        .chunks(2)
        .enumerate()
        .map(|(i, pair)| {
            let high = hex_value(pair[0], 2 * i)?;
            let low = hex_value(pair[1], 2 * i + 1)?;
            Ok(high << 4 | low)
        })
        .collect()
}

/// Encodes bytes as lowercase hex.
pub fn bin_to_hex(bytes: &[u8]) -> String {
    use std::fmt::Write;
    bytes.iter().fold(String::with_capacity(bytes.len() * 2), |mut out, b| {
        let _ = write!(out, "{:02x}", b);
        out
    })
}
