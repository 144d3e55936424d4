//! Shared fixtures for engine tests.

#[cfg(test)]
pub mod utils {
    use crate::virtual_machine::errors::CommonError;
    use crate::virtual_machine::isa::{InstructionSet, OperatorMap};
    use crate::virtual_machine::operator::{Operator, Text};
    use crate::virtual_machine::state::{ErrorState, ProgramState, StackState};
    use authvm_derive::Error;

    /// Opcodes of the toy instruction set.
    pub const OP_0: u8 = 0;
    pub const OP_INCREMENT: u8 = 1;
    pub const OP_DECREMENT: u8 = 2;
    pub const OP_ADD: u8 = 3;
    pub const OP_CODESEPARATOR: u8 = 171;

    /// Errors of the toy instruction set, wrapping the common ones.
    #[derive(Clone, Copy, Debug, Error, Eq, PartialEq)]
    pub enum SimpleError {
        #[error("{0}")]
        Common(CommonError),
        #[error("The program called an undefined opcode.")]
        Undefined,
        #[error("The program tried to pop from an empty stack.")]
        EmptyStack,
    }

    impl From<CommonError> for SimpleError {
        fn from(error: CommonError) -> Self {
            SimpleError::Common(error)
        }
    }

    /// State with a numeric stack and no context fields.
    #[derive(Clone, Debug, Default, Eq, PartialEq)]
    pub struct SimpleState {
        pub ip: usize,
        pub script: Vec<u8>,
        pub stack: Vec<i64>,
        pub error: Option<SimpleError>,
    }

    impl SimpleState {
        pub fn new(script: Vec<u8>) -> Self {
            Self {
                script,
                ..Self::default()
            }
        }

        pub fn at(ip: usize, script: Vec<u8>, stack: Vec<i64>) -> Self {
            Self {
                ip,
                script,
                stack,
                error: None,
            }
        }
    }

    impl ProgramState for SimpleState {
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

    impl StackState for SimpleState {
        type Item = i64;

        fn stack(&self) -> &[i64] {
            &self.stack
        }

        fn stack_mut(&mut self) -> &mut Vec<i64> {
            &mut self.stack
        }
    }

    impl ErrorState for SimpleState {
        type Error = SimpleError;

        fn error(&self) -> Option<&SimpleError> {
            self.error.as_ref()
        }

        fn set_error(&mut self, error: SimpleError) {
            self.error = Some(error);
        }
    }

    fn unary(asm: &str, description: &str, delta: i64) -> Operator<SimpleState> {
        Operator::new(asm, description, move |state: &mut SimpleState| {
            match state.stack.pop() {
                Some(top) => state.stack.push(top + delta),
                None => state.error = Some(SimpleError::EmptyStack),
            }
        })
    }

    /// Toy instruction set: push zero, increment, decrement, add and a
    /// separator whose asm reports the instruction pointer.
    #[derive(Clone, Copy, Debug, Default)]
    pub struct SimpleInstructionSet;

    impl InstructionSet for SimpleInstructionSet {
        type State = SimpleState;

        fn operators(&self) -> OperatorMap<SimpleState> {
            let mut ops = OperatorMap::new();
            ops.insert(
                OP_0,
                Operator::new("OP_0", "Push a 0 onto the stack.", |state: &mut SimpleState| {
                    state.stack.push(0)
                }),
            );
            ops.insert(
                OP_INCREMENT,
                unary("OP_INCREMENT", "Add 1 to the top stack item.", 1),
            );
            ops.insert(
                OP_DECREMENT,
                unary("OP_DECREMENT", "Subtract 1 from the top stack item.", -1),
            );
            ops.insert(
                OP_ADD,
                Operator::new(
                    "OP_ADD",
                    Text::dynamic(|state: &SimpleState| {
                        let mut top = state.stack.iter().rev();
                        let render = |v: Option<&i64>| v.map_or("undefined".to_string(), i64::to_string);
                        let a = render(top.next());
                        let b = render(top.next());
                        format!(
                            "Pop the top two items off the stack ({a}, {b}) and push their sum onto the stack."
                        )
                    }),
                    |state: &mut SimpleState| {
                        match (state.stack.pop(), state.stack.pop()) {
                            (Some(a), Some(b)) => state.stack.push(a + b),
                            _ => state.error = Some(SimpleError::EmptyStack),
                        }
                    },
                ),
            );
            ops.insert(
                OP_CODESEPARATOR,
                Operator::new(
                    Text::dynamic(|state: &SimpleState| {
                        format!("OP_CODESEPARATOR(ip: {})", state.ip)
                    }),
                    "Used internally to separate the unlocking and locking scripts.",
                    |_: &mut SimpleState| {},
                ),
            );
            ops
        }

        fn undefined(&self) -> Operator<SimpleState> {
            Operator::new(
                "undefined",
                "Error: the program called an undefined opcode.",
                |state: &mut SimpleState| state.error = Some(SimpleError::Undefined),
            )
        }

        fn clone_state(&self, state: &SimpleState) -> SimpleState {
            state.clone()
        }

        fn continue_execution(&self, state: &SimpleState) -> bool {
            state.error.is_none() && state.ip < state.script.len()
        }

        fn next(&self, state: &mut SimpleState) {
            state.ip += 1;
        }
    }
}
