//! Push operators: small numbers, constant-length data and length-prefixed data.
//!
//! # Minimal encoding
//!
//! Pushes form a ladder of encodings: constant-length opcodes cover payloads up
//! to [`MAXIMUM_PUSH_DATA_CONSTANT`] bytes, then a 1-byte, a 2-byte and a 4-byte
//! little-endian length field. A variable-length push whose payload fits a
//! lower rung is rejected with [`CommonError::NonMinimalPush`]. The thresholds
//! are derived from the ladder in [`PushDataWidth::minimum_length`].

use crate::virtual_machine::errors::CommonError;
use crate::virtual_machine::operator::Operator;
use crate::virtual_machine::state::{ErrorState, ProgramState, StackState, apply_error};

/// Largest payload a constant-length push opcode (`OP_DATA_N`) can carry.
pub const MAXIMUM_PUSH_DATA_CONSTANT: usize = 75;

/// Width of the little-endian length field read by a variable-length push.
#[repr(u8)]
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum PushDataWidth {
    One = 1,
    Two = 2,
    Four = 4,
}

impl PushDataWidth {
    /// Size of the length field in bytes.
    pub const fn bytes(self) -> usize {
        self as usize
    }

    /// Number of distinct payload lengths a field of this width can encode.
    pub const fn representable_lengths(self) -> u64 {
        1u64 << (8 * self as u32)
    }

    /// Shortest payload this width may push without a smaller encoding
    /// existing for it.
    pub const fn minimum_length(self) -> usize {
        match self {
            PushDataWidth::One => MAXIMUM_PUSH_DATA_CONSTANT,
            PushDataWidth::Two => PushDataWidth::One.representable_lengths() as usize,
            PushDataWidth::Four => PushDataWidth::Two.representable_lengths() as usize,
        }
    }

    const fn type_name(self) -> &'static str {
        match self {
            PushDataWidth::One => "Uint8",
            PushDataWidth::Two => "Uint16",
            PushDataWidth::Four => "Uint32",
        }
    }

    fn description(self) -> String {
        let endianness = match self {
            PushDataWidth::One => "",
            PushDataWidth::Two | PushDataWidth::Four => "little-endian ",
        };
        format!(
            "Read the next {endianness}{} and push that number of bytes to the stack.",
            self.type_name()
        )
    }
}

/// Returns `start + count` when that many bytes are available from `start`.
#[inline]
fn available_end<S: ProgramState>(state: &S, start: usize, count: usize) -> Option<usize> {
    start
        .checked_add(count)
        .filter(|end| *end <= state.script().len())
}

/// Decodes an unsigned little-endian integer of up to 4 bytes.
#[inline]
fn read_le(bytes: &[u8]) -> usize {
    bytes
        .iter()
        .rev()
        .fold(0usize, |acc, byte| (acc << 8) | *byte as usize)
}

/// Pushes `script[start..end]` as bytes and moves the cursor to `end`.
fn push_slice<S>(state: &mut S, start: usize, end: usize)
where
    S: ProgramState + StackState,
    S::Item: From<Vec<u8>>,
{
    let payload = state.script()[start..end].to_vec();
    state.stack_mut().push(payload.into());
    state.set_ip(end);
}

/// Pushes a number fixed at construction. Consumes no operand bytes.
pub fn push_number<S>(value: i64) -> Operator<S>
where
    S: StackState + 'static,
    S::Item: From<i64>,
{
    let asm = if value == -1 {
        "OP_1NEGATE".to_string()
    } else {
        format!("OP_{value}")
    };
    Operator::new(
        asm,
        format!("Push the number {value} onto the stack."),
        move |state: &mut S| state.stack_mut().push(value.into()),
    )
}

/// Pushes the next `length` script bytes as binary data.
///
/// Sets [`CommonError::MalformedPush`] without touching the stack when fewer
/// than `length` bytes remain.
pub fn push_data_constant<S>(length: usize) -> Operator<S>
where
    S: ProgramState + StackState + ErrorState + 'static,
    S::Item: From<Vec<u8>>,
    S::Error: From<CommonError>,
{
    let description = if length == 1 {
        "Push the next byte onto the stack as binary data.".to_string()
    } else {
        format!("Push the next {length} bytes onto the stack as binary data.")
    };
    Operator::new(
        format!("OP_DATA_{length}"),
        description,
        move |state: &mut S| {
            let start = state.ip();
            match available_end(state, start, length) {
                Some(end) => push_slice(state, start, end),
                None => apply_error(state, CommonError::MalformedPush),
            }
        },
    )
}

/// Reads a `width`-byte little-endian length, then pushes that many bytes.
///
/// Checks, in order: the length field is complete, the payload is complete,
/// and the payload is at least `minimum` bytes long. The first two failures
/// set [`CommonError::MalformedPush`], the last [`CommonError::NonMinimalPush`].
pub fn push_data<S>(width: PushDataWidth, minimum: usize) -> Operator<S>
where
    S: ProgramState + StackState + ErrorState + 'static,
    S::Item: From<Vec<u8>>,
    S::Error: From<CommonError>,
{
    Operator::new(
        format!("OP_PUSHDATA{}", width.bytes()),
        width.description(),
        move |state: &mut S| {
            let ip = state.ip();
            let Some(begin) = available_end(state, ip, width.bytes()) else {
                return apply_error(state, CommonError::MalformedPush);
            };
            let length = read_le(&state.script()[ip..begin]);
            let Some(end) = available_end(state, begin, length) else {
                return apply_error(state, CommonError::MalformedPush);
            };
            if length < minimum {
                return apply_error(state, CommonError::NonMinimalPush);
            }
            push_slice(state, begin, end);
        },
    )
}

/// `OP_PUSHDATA1`: 1-byte length, payloads of at least 75 bytes.
pub fn push_data_1<S>() -> Operator<S>
where
    S: ProgramState + StackState + ErrorState + 'static,
    S::Item: From<Vec<u8>>,
    S::Error: From<CommonError>,
{
    push_data(PushDataWidth::One, PushDataWidth::One.minimum_length())
}

/// `OP_PUSHDATA2`: 2-byte length, payloads of at least 256 bytes.
pub fn push_data_2<S>() -> Operator<S>
where
    S: ProgramState + StackState + ErrorState + 'static,
    S::Item: From<Vec<u8>>,
    S::Error: From<CommonError>,
{
    push_data(PushDataWidth::Two, PushDataWidth::Two.minimum_length())
}

/// `OP_PUSHDATA4`: 4-byte length, payloads of at least 65536 bytes.
pub fn push_data_4_enabled<S>() -> Operator<S>
where
    S: ProgramState + StackState + ErrorState + 'static,
    S::Item: From<Vec<u8>>,
    S::Error: From<CommonError>,
{
    push_data(PushDataWidth::Four, PushDataWidth::Four.minimum_length())
}

/// `OP_PUSHDATA4` for instruction sets that require both minimal pushes and a
/// push size limit below 65536 bytes: every use is non-minimal, so it fails
/// without reading any bytes.
pub fn push_data_4<S>() -> Operator<S>
where
    S: ErrorState + 'static,
    S::Error: From<CommonError>,
{
    Operator::new(
        "OP_PUSHDATA4",
        PushDataWidth::Four.description(),
        |state: &mut S| apply_error(state, CommonError::NonMinimalPush),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::virtual_machine::state::StackItem;
    use crate::virtual_machine::state::tests::TestState;

    const OP_PUSHDATA1: u8 = 0x4c;
    const OP_PUSHDATA2: u8 = 0x4d;
    const OP_PUSHDATA4: u8 = 0x4e;

    fn run(op: &Operator<TestState>, script: Vec<u8>) -> TestState {
        let mut state = TestState::after_opcode(script);
        op.apply(&mut state);
        state
    }

    fn counting(n: usize) -> Vec<u8> {
        (1..=n).map(|i| i as u8).collect()
    }

    fn with_prefix(prefix: &[u8], payload: &[u8]) -> Vec<u8> {
        let mut script = prefix.to_vec();
        script.extend_from_slice(payload);
        script
    }

    // ==================== Ladder ====================

    #[test]
    fn minimum_lengths_follow_the_ladder() {
        assert_eq!(PushDataWidth::One.minimum_length(), 75);
        assert_eq!(PushDataWidth::Two.minimum_length(), 256);
        assert_eq!(PushDataWidth::Four.minimum_length(), 65536);
        assert_eq!(PushDataWidth::Four.representable_lengths(), 1 << 32);
    }

    #[test]
    fn read_le_decodes_little_endian() {
        assert_eq!(read_le(&[0x64]), 100);
        assert_eq!(read_le(&[0x01, 0x01]), 257);
        assert_eq!(read_le(&[0x01, 0x00, 0x01, 0x00]), 65537);
        assert_eq!(read_le(&[0xff, 0xff, 0xff, 0xff]), u32::MAX as usize);
    }

    // ==================== Numbers ====================

    #[test]
    fn push_number_pushes_value() {
        let op = push_number::<TestState>(1);
        assert_eq!(op.asm().as_static(), Some("OP_1"));
        assert_eq!(
            op.description().as_static(),
            Some("Push the number 1 onto the stack.")
        );
        let state = run(&op, vec![0x51]);
        assert_eq!(state.stack, vec![StackItem::Number(1)]);
        assert_eq!(state.ip, 1);
        assert_eq!(state.error, None);
    }

    #[test]
    fn push_number_appends_to_existing_stack() {
        let op = push_number::<TestState>(16);
        let mut state = TestState::after_opcode(vec![0x60]);
        state.stack.push(StackItem::Number(42));
        op.apply(&mut state);
        assert_eq!(
            state.stack,
            vec![StackItem::Number(42), StackItem::Number(16)]
        );
    }

    #[test]
    fn push_number_names_negative_one() {
        let op = push_number::<TestState>(-1);
        assert_eq!(op.asm().as_static(), Some("OP_1NEGATE"));
        assert_eq!(run(&op, vec![0x4f]).stack, vec![StackItem::Number(-1)]);
    }

    // ==================== Constant length ====================

    #[test]
    fn push_data_constant_single_byte() {
        let op = push_data_constant::<TestState>(1);
        assert_eq!(op.asm().as_static(), Some("OP_DATA_1"));
        assert_eq!(
            op.description().as_static(),
            Some("Push the next byte onto the stack as binary data.")
        );
        let state = run(&op, vec![0x01, 42]);
        assert_eq!(state.stack, vec![StackItem::Bytes(vec![42])]);
        assert_eq!(state.ip, 2);
    }

    #[test]
    fn push_data_constant_five_bytes() {
        let op = push_data_constant::<TestState>(5);
        assert_eq!(
            op.description().as_static(),
            Some("Push the next 5 bytes onto the stack as binary data.")
        );
        let state = run(&op, vec![0x05, 5, 10, 15, 20, 25]);
        assert_eq!(state.stack, vec![StackItem::Bytes(vec![5, 10, 15, 20, 25])]);
        assert_eq!(state.ip, 6);
        assert_eq!(state.error, None);
    }

    #[test]
    fn push_data_constant_leaves_following_opcodes() {
        let op = push_data_constant::<TestState>(2);
        let state = run(&op, vec![0x02, 7, 8, 0x55]);
        assert_eq!(state.ip, 3);
        assert_eq!(state.stack, vec![StackItem::Bytes(vec![7, 8])]);
    }

    #[test]
    fn push_data_constant_malformed_when_short() {
        let op = push_data_constant::<TestState>(6);
        let state = run(&op, vec![0x05, 5, 10, 15, 20, 25]);
        assert_eq!(state.error, Some(CommonError::MalformedPush));
        assert!(state.stack.is_empty());
        assert_eq!(state.ip, 1);
    }

    #[test]
    fn push_data_constant_malformed_at_end_of_script() {
        let op = push_data_constant::<TestState>(1);
        let state = run(&op, vec![0x01]);
        assert_eq!(state.error, Some(CommonError::MalformedPush));
        assert!(state.stack.is_empty());
    }

    // ==================== OP_PUSHDATA1 ====================

    #[test]
    fn push_data_1_works() {
        let op = push_data_1::<TestState>();
        assert_eq!(op.asm().as_static(), Some("OP_PUSHDATA1"));
        assert_eq!(
            op.description().as_static(),
            Some("Read the next Uint8 and push that number of bytes to the stack.")
        );
        let payload = counting(100);
        let script = with_prefix(&[OP_PUSHDATA1, 100], &payload);
        let len = script.len();
        let state = run(&op, script);
        assert_eq!(state.error, None);
        assert_eq!(state.ip, len);
        assert_eq!(state.stack, vec![StackItem::Bytes(payload)]);
    }

    #[test]
    fn push_data_1_accepts_threshold_length() {
        let op = push_data_1::<TestState>();
        let payload = counting(75);
        let state = run(&op, with_prefix(&[OP_PUSHDATA1, 75], &payload));
        assert_eq!(state.error, None);
        assert_eq!(state.ip, 77);
    }

    #[test]
    fn push_data_1_cannot_be_last_byte() {
        let state = run(&push_data_1::<TestState>(), vec![OP_PUSHDATA1]);
        assert_eq!(state.error, Some(CommonError::MalformedPush));
        assert!(state.stack.is_empty());
    }

    #[test]
    fn push_data_1_non_minimal() {
        let payload = counting(50);
        let state = run(
            &push_data_1::<TestState>(),
            with_prefix(&[OP_PUSHDATA1, 50], &payload),
        );
        assert_eq!(state.error, Some(CommonError::NonMinimalPush));
        assert!(state.stack.is_empty());
        assert_eq!(state.ip, 1);
    }

    #[test]
    fn push_data_1_requires_whole_payload() {
        let state = run(&push_data_1::<TestState>(), vec![OP_PUSHDATA1, 4, 1, 2, 3]);
        assert_eq!(state.error, Some(CommonError::MalformedPush));
        assert!(state.stack.is_empty());
    }

    #[test]
    fn push_data_malformed_takes_precedence_over_non_minimal() {
        // Length 4 is below the minimum, but the payload is also truncated.
        let state = run(&push_data_1::<TestState>(), vec![OP_PUSHDATA1, 4, 1]);
        assert_eq!(state.error, Some(CommonError::MalformedPush));
    }

    // ==================== OP_PUSHDATA2 ====================

    #[test]
    fn push_data_2_works() {
        let op = push_data_2::<TestState>();
        assert_eq!(
            op.description().as_static(),
            Some("Read the next little-endian Uint16 and push that number of bytes to the stack.")
        );
        let payload = counting(257);
        let script = with_prefix(&[OP_PUSHDATA2, 1, 1], &payload);
        let len = script.len();
        let state = run(&op, script);
        assert_eq!(state.error, None);
        assert_eq!(state.ip, len);
        assert_eq!(state.stack, vec![StackItem::Bytes(payload)]);
    }

    #[test]
    fn push_data_2_cannot_be_last_byte() {
        let state = run(&push_data_2::<TestState>(), vec![OP_PUSHDATA2]);
        assert_eq!(state.error, Some(CommonError::MalformedPush));
    }

    #[test]
    fn push_data_2_truncated_length_field() {
        let state = run(&push_data_2::<TestState>(), vec![OP_PUSHDATA2, 1]);
        assert_eq!(state.error, Some(CommonError::MalformedPush));
    }

    #[test]
    fn push_data_2_non_minimal() {
        let payload = counting(50);
        let state = run(
            &push_data_2::<TestState>(),
            with_prefix(&[OP_PUSHDATA2, 50, 0], &payload),
        );
        assert_eq!(state.error, Some(CommonError::NonMinimalPush));
        assert!(state.stack.is_empty());
    }

    #[test]
    fn push_data_2_requires_whole_payload() {
        let state = run(
            &push_data_2::<TestState>(),
            vec![OP_PUSHDATA2, 0, 4, 1, 2, 3],
        );
        assert_eq!(state.error, Some(CommonError::MalformedPush));
    }

    // ==================== OP_PUSHDATA4 ====================

    #[test]
    fn push_data_4_enabled_works() {
        let op = push_data_4_enabled::<TestState>();
        assert_eq!(op.asm().as_static(), Some("OP_PUSHDATA4"));
        let payload: Vec<u8> = (0..65537usize).map(|i| i as u8).collect();
        let script = with_prefix(&[OP_PUSHDATA4, 1, 0, 1, 0], &payload);
        let len = script.len();
        let state = run(&op, script);
        assert_eq!(state.error, None);
        assert_eq!(state.ip, len);
        assert_eq!(state.stack, vec![StackItem::Bytes(payload)]);
    }

    #[test]
    fn push_data_4_enabled_non_minimal() {
        let payload = counting(50);
        let state = run(
            &push_data_4_enabled::<TestState>(),
            with_prefix(&[OP_PUSHDATA4, 50, 0, 0, 0], &payload),
        );
        assert_eq!(state.error, Some(CommonError::NonMinimalPush));
    }

    #[test]
    fn push_data_4_enabled_truncated_length_field() {
        let state = run(
            &push_data_4_enabled::<TestState>(),
            vec![OP_PUSHDATA4, 0, 0, 1],
        );
        assert_eq!(state.error, Some(CommonError::MalformedPush));
    }

    #[test]
    fn push_data_4_enabled_huge_length_is_malformed() {
        let state = run(
            &push_data_4_enabled::<TestState>(),
            vec![OP_PUSHDATA4, 0xff, 0xff, 0xff, 0xff, 1, 2],
        );
        assert_eq!(state.error, Some(CommonError::MalformedPush));
    }

    #[test]
    fn push_data_4_disabled_always_non_minimal() {
        let op = push_data_4::<TestState>();
        assert_eq!(
            op.description().as_static(),
            Some("Read the next little-endian Uint32 and push that number of bytes to the stack.")
        );
        let payload: Vec<u8> = (0..65537usize).map(|i| i as u8).collect();
        let state = run(&op, with_prefix(&[OP_PUSHDATA4, 1, 0, 1, 0], &payload));
        assert_eq!(state.error, Some(CommonError::NonMinimalPush));
        assert!(state.stack.is_empty());
        assert_eq!(state.ip, 1);

        let state = run(&op, vec![OP_PUSHDATA4]);
        assert_eq!(state.error, Some(CommonError::NonMinimalPush));
    }
}
