//! Bitcoin Cash opcode catalog.
//!
//! The [`for_each_opcode!`](crate::for_each_opcode) macro holds the canonical
//! opcode table (variant, byte value, mnemonic) and invokes a callback macro
//! for code generation, so operator groups and tooling can be generated from
//! one list.
//!
//! Only the push range (`0x00..=0x60`) has operators in this crate; every
//! other assigned opcode is listed so scripts can be named and inspected, and
//! dispatches to the instruction set's `undefined` operator.

use crate::virtual_machine::errors::ScriptError;
use std::fmt;

/// Invokes a callback macro with the complete opcode definition list.
#[macro_export]
macro_rules! for_each_opcode {
    ($callback:ident) => {
        $callback! {
            // =========================
            // Push values
            // =========================
            /// Push an empty byte sequence (zero).
            Op0 = 0x00, "OP_0",
            /// Push the next N bytes, N = opcode value (1 to 75).
            OpData1 = 0x01, "OP_DATA_1",
            OpData2 = 0x02, "OP_DATA_2",
            OpData3 = 0x03, "OP_DATA_3",
            OpData4 = 0x04, "OP_DATA_4",
            OpData5 = 0x05, "OP_DATA_5",
            OpData6 = 0x06, "OP_DATA_6",
            OpData7 = 0x07, "OP_DATA_7",
            OpData8 = 0x08, "OP_DATA_8",
            OpData9 = 0x09, "OP_DATA_9",
            OpData10 = 0x0a, "OP_DATA_10",
            OpData11 = 0x0b, "OP_DATA_11",
            OpData12 = 0x0c, "OP_DATA_12",
            OpData13 = 0x0d, "OP_DATA_13",
            OpData14 = 0x0e, "OP_DATA_14",
            OpData15 = 0x0f, "OP_DATA_15",
            OpData16 = 0x10, "OP_DATA_16",
            OpData17 = 0x11, "OP_DATA_17",
            OpData18 = 0x12, "OP_DATA_18",
            OpData19 = 0x13, "OP_DATA_19",
            OpData20 = 0x14, "OP_DATA_20",
            OpData21 = 0x15, "OP_DATA_21",
            OpData22 = 0x16, "OP_DATA_22",
            OpData23 = 0x17, "OP_DATA_23",
            OpData24 = 0x18, "OP_DATA_24",
            OpData25 = 0x19, "OP_DATA_25",
            OpData26 = 0x1a, "OP_DATA_26",
            OpData27 = 0x1b, "OP_DATA_27",
            OpData28 = 0x1c, "OP_DATA_28",
            OpData29 = 0x1d, "OP_DATA_29",
            OpData30 = 0x1e, "OP_DATA_30",
            OpData31 = 0x1f, "OP_DATA_31",
            OpData32 = 0x20, "OP_DATA_32",
            OpData33 = 0x21, "OP_DATA_33",
            OpData34 = 0x22, "OP_DATA_34",
            OpData35 = 0x23, "OP_DATA_35",
            OpData36 = 0x24, "OP_DATA_36",
            OpData37 = 0x25, "OP_DATA_37",
            OpData38 = 0x26, "OP_DATA_38",
            OpData39 = 0x27, "OP_DATA_39",
            OpData40 = 0x28, "OP_DATA_40",
            OpData41 = 0x29, "OP_DATA_41",
            OpData42 = 0x2a, "OP_DATA_42",
            OpData43 = 0x2b, "OP_DATA_43",
            OpData44 = 0x2c, "OP_DATA_44",
            OpData45 = 0x2d, "OP_DATA_45",
            OpData46 = 0x2e, "OP_DATA_46",
            OpData47 = 0x2f, "OP_DATA_47",
            OpData48 = 0x30, "OP_DATA_48",
            OpData49 = 0x31, "OP_DATA_49",
            OpData50 = 0x32, "OP_DATA_50",
            OpData51 = 0x33, "OP_DATA_51",
            OpData52 = 0x34, "OP_DATA_52",
            OpData53 = 0x35, "OP_DATA_53",
            OpData54 = 0x36, "OP_DATA_54",
            OpData55 = 0x37, "OP_DATA_55",
            OpData56 = 0x38, "OP_DATA_56",
            OpData57 = 0x39, "OP_DATA_57",
            OpData58 = 0x3a, "OP_DATA_58",
            OpData59 = 0x3b, "OP_DATA_59",
            OpData60 = 0x3c, "OP_DATA_60",
            OpData61 = 0x3d, "OP_DATA_61",
            OpData62 = 0x3e, "OP_DATA_62",
            OpData63 = 0x3f, "OP_DATA_63",
            OpData64 = 0x40, "OP_DATA_64",
            OpData65 = 0x41, "OP_DATA_65",
            OpData66 = 0x42, "OP_DATA_66",
            OpData67 = 0x43, "OP_DATA_67",
            OpData68 = 0x44, "OP_DATA_68",
            OpData69 = 0x45, "OP_DATA_69",
            OpData70 = 0x46, "OP_DATA_70",
            OpData71 = 0x47, "OP_DATA_71",
            OpData72 = 0x48, "OP_DATA_72",
            OpData73 = 0x49, "OP_DATA_73",
            OpData74 = 0x4a, "OP_DATA_74",
            OpData75 = 0x4b, "OP_DATA_75",
            /// Next byte is the push length.
            OpPushData1 = 0x4c, "OP_PUSHDATA1",
            /// Next two bytes (little-endian) are the push length.
            OpPushData2 = 0x4d, "OP_PUSHDATA2",
            /// Next four bytes (little-endian) are the push length.
            OpPushData4 = 0x4e, "OP_PUSHDATA4",
            /// Push -1.
            Op1Negate = 0x4f, "OP_1NEGATE",
            OpReserved = 0x50, "OP_RESERVED",
            /// Push 1.
            Op1 = 0x51, "OP_1",
            Op2 = 0x52, "OP_2",
            Op3 = 0x53, "OP_3",
            Op4 = 0x54, "OP_4",
            Op5 = 0x55, "OP_5",
            Op6 = 0x56, "OP_6",
            Op7 = 0x57, "OP_7",
            Op8 = 0x58, "OP_8",
            Op9 = 0x59, "OP_9",
            Op10 = 0x5a, "OP_10",
            Op11 = 0x5b, "OP_11",
            Op12 = 0x5c, "OP_12",
            Op13 = 0x5d, "OP_13",
            Op14 = 0x5e, "OP_14",
            Op15 = 0x5f, "OP_15",
            Op16 = 0x60, "OP_16",
            // =========================
            // Flow control
            // =========================
            OpNop = 0x61, "OP_NOP",
            OpVer = 0x62, "OP_VER",
            OpIf = 0x63, "OP_IF",
            OpNotIf = 0x64, "OP_NOTIF",
            OpVerIf = 0x65, "OP_VERIF",
            OpVerNotIf = 0x66, "OP_VERNOTIF",
            OpElse = 0x67, "OP_ELSE",
            OpEndIf = 0x68, "OP_ENDIF",
            OpVerify = 0x69, "OP_VERIFY",
            OpReturn = 0x6a, "OP_RETURN",
            // =========================
            // Stack
            // =========================
            OpToAltStack = 0x6b, "OP_TOALTSTACK",
            OpFromAltStack = 0x6c, "OP_FROMALTSTACK",
            Op2Drop = 0x6d, "OP_2DROP",
            Op2Dup = 0x6e, "OP_2DUP",
            Op3Dup = 0x6f, "OP_3DUP",
            Op2Over = 0x70, "OP_2OVER",
            Op2Rot = 0x71, "OP_2ROT",
            Op2Swap = 0x72, "OP_2SWAP",
            OpIfDup = 0x73, "OP_IFDUP",
            OpDepth = 0x74, "OP_DEPTH",
            OpDrop = 0x75, "OP_DROP",
            OpDup = 0x76, "OP_DUP",
            OpNip = 0x77, "OP_NIP",
            OpOver = 0x78, "OP_OVER",
            OpPick = 0x79, "OP_PICK",
            OpRoll = 0x7a, "OP_ROLL",
            OpRot = 0x7b, "OP_ROT",
            OpSwap = 0x7c, "OP_SWAP",
            OpTuck = 0x7d, "OP_TUCK",
            // =========================
            // Splice
            // =========================
            OpCat = 0x7e, "OP_CAT",
            OpSplit = 0x7f, "OP_SPLIT",
            OpNum2Bin = 0x80, "OP_NUM2BIN",
            OpBin2Num = 0x81, "OP_BIN2NUM",
            OpSize = 0x82, "OP_SIZE",
            // =========================
            // Bitwise logic
            // =========================
            OpInvert = 0x83, "OP_INVERT",
            OpAnd = 0x84, "OP_AND",
            OpOr = 0x85, "OP_OR",
            OpXor = 0x86, "OP_XOR",
            OpEqual = 0x87, "OP_EQUAL",
            OpEqualVerify = 0x88, "OP_EQUALVERIFY",
            OpReserved1 = 0x89, "OP_RESERVED1",
            OpReserved2 = 0x8a, "OP_RESERVED2",
            // =========================
            // Arithmetic
            // =========================
            Op1Add = 0x8b, "OP_1ADD",
            Op1Sub = 0x8c, "OP_1SUB",
            Op2Mul = 0x8d, "OP_2MUL",
            Op2Div = 0x8e, "OP_2DIV",
            OpNegate = 0x8f, "OP_NEGATE",
            OpAbs = 0x90, "OP_ABS",
            OpNot = 0x91, "OP_NOT",
            Op0NotEqual = 0x92, "OP_0NOTEQUAL",
            OpAdd = 0x93, "OP_ADD",
            OpSub = 0x94, "OP_SUB",
            OpMul = 0x95, "OP_MUL",
            OpDiv = 0x96, "OP_DIV",
            OpMod = 0x97, "OP_MOD",
            OpLShift = 0x98, "OP_LSHIFT",
            OpRShift = 0x99, "OP_RSHIFT",
            OpBoolAnd = 0x9a, "OP_BOOLAND",
            OpBoolOr = 0x9b, "OP_BOOLOR",
            OpNumEqual = 0x9c, "OP_NUMEQUAL",
            OpNumEqualVerify = 0x9d, "OP_NUMEQUALVERIFY",
            OpNumNotEqual = 0x9e, "OP_NUMNOTEQUAL",
            OpLessThan = 0x9f, "OP_LESSTHAN",
            OpGreaterThan = 0xa0, "OP_GREATERTHAN",
            OpLessThanOrEqual = 0xa1, "OP_LESSTHANOREQUAL",
            OpGreaterThanOrEqual = 0xa2, "OP_GREATERTHANOREQUAL",
            OpMin = 0xa3, "OP_MIN",
            OpMax = 0xa4, "OP_MAX",
            OpWithin = 0xa5, "OP_WITHIN",
            // =========================
            // Crypto
            // =========================
            OpRipemd160 = 0xa6, "OP_RIPEMD160",
            OpSha1 = 0xa7, "OP_SHA1",
            OpSha256 = 0xa8, "OP_SHA256",
            OpHash160 = 0xa9, "OP_HASH160",
            OpHash256 = 0xaa, "OP_HASH256",
            /// Marks the boundary between the unlocking and locking scripts.
            OpCodeSeparator = 0xab, "OP_CODESEPARATOR",
            OpCheckSig = 0xac, "OP_CHECKSIG",
            OpCheckSigVerify = 0xad, "OP_CHECKSIGVERIFY",
            OpCheckMultiSig = 0xae, "OP_CHECKMULTISIG",
            OpCheckMultiSigVerify = 0xaf, "OP_CHECKMULTISIGVERIFY",
            // =========================
            // Locktime and expansion
            // =========================
            OpNop1 = 0xb0, "OP_NOP1",
            OpCheckLockTimeVerify = 0xb1, "OP_CHECKLOCKTIMEVERIFY",
            OpCheckSequenceVerify = 0xb2, "OP_CHECKSEQUENCEVERIFY",
            OpNop4 = 0xb3, "OP_NOP4",
            OpNop5 = 0xb4, "OP_NOP5",
            OpNop6 = 0xb5, "OP_NOP6",
            OpNop7 = 0xb6, "OP_NOP7",
            OpNop8 = 0xb7, "OP_NOP8",
            OpNop9 = 0xb8, "OP_NOP9",
            OpNop10 = 0xb9, "OP_NOP10",
            OpCheckDataSig = 0xba, "OP_CHECKDATASIG",
            OpCheckDataSigVerify = 0xbb, "OP_CHECKDATASIGVERIFY",
        }
    };
}

macro_rules! define_opcodes {
    (
        $(
            $(#[$doc:meta])*
            $name:ident = $value:literal, $mnemonic:literal
        ),* $(,)?
    ) => {
        /// Every assigned Bitcoin Cash opcode.
        #[repr(u8)]
        #[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
        pub enum Opcode {
            $(
                $(#[$doc])*
                $name = $value,
            )*
        }

        impl Opcode {
            /// All opcodes in ascending byte order.
            pub const ALL: &'static [Opcode] = &[$(Opcode::$name),*];

            /// Canonical mnemonic, e.g. `OP_CHECKSIG`.
            pub const fn mnemonic(self) -> &'static str {
                match self {
                    $(Opcode::$name => $mnemonic,)*
                }
            }
        }

        impl TryFrom<u8> for Opcode {
            type Error = ScriptError;

            fn try_from(byte: u8) -> Result<Self, Self::Error> {
                match byte {
                    $($value => Ok(Opcode::$name),)*
                    opcode => Err(ScriptError::UnassignedOpcode { opcode }),
                }
            }
        }
    };
}

crate::for_each_opcode!(define_opcodes);

impl Opcode {
    /// Byte value of the opcode.
    pub const fn byte(self) -> u8 {
        self as u8
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}

impl From<Opcode> for u8 {
    fn from(opcode: Opcode) -> u8 {
        opcode.byte()
    }
}

/// Mnemonic for any byte; unassigned bytes render as `OP_UNKNOWN<n>`.
pub fn mnemonic_for(byte: u8) -> String {
    match Opcode::try_from(byte) {
        Ok(opcode) => opcode.mnemonic().to_string(),
        Err(_) => format!("OP_UNKNOWN{byte}"),
    }
}
