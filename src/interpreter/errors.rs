//! Runtime error types for the execution engine
//!
//! Only [`RuntimeError::ArithmeticFault`] ever escapes `Engine::step`; it halts
//! the engine. The other variants are recovered locally and surface as
//! diagnostics so hosts can display them with the same wording.

use super::io::InputRequest;
use crate::memory::Position;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuntimeError {
    /// The cell under the program counter is not an instruction
    #[error("Invalid instruction '{glyph}' (code point {value}) at {position}")]
    InvalidInstruction {
        value: i64,
        glyph: char,
        position: Position,
    },

    /// Division or remainder by zero
    #[error("Arithmetic fault: {operation} by zero at {position}")]
    ArithmeticFault {
        operation: &'static str,
        position: Position,
    },

    /// A reply to `&` or `~` that does not have the requested shape
    #[error("Expected {request}, got {text:?}")]
    MalformedInput { request: InputRequest, text: String },
}

impl RuntimeError {
    /// Whether the engine must halt
    pub fn is_fatal(&self) -> bool {
        matches!(self, RuntimeError::ArithmeticFault { .. })
    }

    pub fn position(&self) -> Option<Position> {
        match self {
            RuntimeError::InvalidInstruction { position, .. } => Some(*position),
            RuntimeError::ArithmeticFault { position, .. } => Some(*position),
            RuntimeError::MalformedInput { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_cell() {
        let err = RuntimeError::InvalidInstruction {
            value: 'z' as i64,
            glyph: 'z',
            position: Position::new(3, 1),
        };
        assert_eq!(
            err.to_string(),
            "Invalid instruction 'z' (code point 122) at (3, 1)"
        );
        assert!(!err.is_fatal());
    }

    #[test]
    fn only_arithmetic_faults_are_fatal() {
        let fault = RuntimeError::ArithmeticFault {
            operation: "division",
            position: Position::ORIGIN,
        };
        assert!(fault.is_fatal());
        assert_eq!(fault.to_string(), "Arithmetic fault: division by zero at (0, 0)");

        let malformed = RuntimeError::MalformedInput {
            request: InputRequest::Integer,
            text: "abc".to_string(),
        };
        assert!(!malformed.is_fatal());
        assert_eq!(malformed.position(), None);
    }
}
