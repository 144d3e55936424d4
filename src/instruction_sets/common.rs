//! Operator groups shared by instruction sets built on the Bitcoin push range.

use crate::instruction_sets::opcodes::Opcode;
use crate::virtual_machine::errors::CommonError;
use crate::virtual_machine::isa::OperatorMap;
use crate::virtual_machine::push::{
    MAXIMUM_PUSH_DATA_CONSTANT, push_data_1, push_data_2, push_data_4, push_data_4_enabled,
    push_data_constant, push_number,
};
use crate::virtual_machine::state::{ErrorState, ProgramState, StackState};

/// Number opcodes in the order of the value they push, starting at -1.
pub const PUSH_NUMBER_OPCODES: [Opcode; 18] = [
    Opcode::Op1Negate,
    Opcode::Op0,
    Opcode::Op1,
    Opcode::Op2,
    Opcode::Op3,
    Opcode::Op4,
    Opcode::Op5,
    Opcode::Op6,
    Opcode::Op7,
    Opcode::Op8,
    Opcode::Op9,
    Opcode::Op10,
    Opcode::Op11,
    Opcode::Op12,
    Opcode::Op13,
    Opcode::Op14,
    Opcode::Op15,
    Opcode::Op16,
];

/// `OP_1NEGATE`, `OP_0` and `OP_1` through `OP_16`.
pub fn push_number_operators<S>() -> OperatorMap<S>
where
    S: StackState + 'static,
    S::Item: From<i64>,
{
    PUSH_NUMBER_OPCODES
        .iter()
        .zip(-1i64..)
        .map(|(opcode, value)| (opcode.byte(), push_number(value)))
        .collect()
}

/// `OP_DATA_1` through `OP_DATA_75`. The opcode byte equals the push length.
pub fn push_data_constant_operators<S>() -> OperatorMap<S>
where
    S: ProgramState + StackState + ErrorState + 'static,
    S::Item: From<Vec<u8>>,
    S::Error: From<CommonError>,
{
    (1..=MAXIMUM_PUSH_DATA_CONSTANT as u8)
        .map(|opcode| (opcode, push_data_constant(opcode as usize)))
        .collect()
}

/// `OP_PUSHDATA1`, `OP_PUSHDATA2` and `OP_PUSHDATA4`.
///
/// Unless `enable_pushdata4` is set, `OP_PUSHDATA4` always fails with
/// [`CommonError::NonMinimalPush`].
pub fn push_data_variable_operators<S>(enable_pushdata4: bool) -> OperatorMap<S>
where
    S: ProgramState + StackState + ErrorState + 'static,
    S::Item: From<Vec<u8>>,
    S::Error: From<CommonError>,
{
    let push_data_4 = if enable_pushdata4 {
        push_data_4_enabled()
    } else {
        push_data_4()
    };
    OperatorMap::from([
        (Opcode::OpPushData1.byte(), push_data_1()),
        (Opcode::OpPushData2.byte(), push_data_2()),
        (Opcode::OpPushData4.byte(), push_data_4),
    ])
}
