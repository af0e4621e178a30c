use crate::ir::Intrinsic;

/// A fault found while replaying the instruction sequence against the
/// operand stack. Any of these is fatal for the compilation; nothing is
/// handed to the backend.
#[derive(Debug, Clone, PartialEq)]
pub enum LowerError {
    /// An intrinsic popped an empty stack.
    Underflow { ip: usize, intrinsic: Intrinsic },
    /// A push exceeded the operand stack's fixed capacity.
    Overflow { ip: usize, capacity: usize },
    /// The popped operand has the wrong type for the intrinsic.
    TypeMismatch {
        ip: usize,
        intrinsic: Intrinsic,
        expected: &'static str,
        found: &'static str,
    },
    /// A string handle with no table entry.
    BadHandle { ip: usize },
}

impl std::fmt::Display for LowerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "resolution error: ")?;
        match self {
            LowerError::Underflow { ip, intrinsic } => {
                write!(
                    f,
                    "stack underflow at ip={}, '{}' needs an operand but the stack is empty",
                    ip, intrinsic
                )
            }
            LowerError::Overflow { ip, capacity } => {
                write!(
                    f,
                    "stack overflow at ip={}, operand stack capacity ({}) exhausted",
                    ip, capacity
                )
            }
            LowerError::TypeMismatch {
                ip,
                intrinsic,
                expected,
                found,
            } => {
                write!(
                    f,
                    "type mismatch at ip={}, '{}' expects a {} operand but found a {}",
                    ip, intrinsic, expected, found
                )
            }
            LowerError::BadHandle { ip } => {
                write!(f, "dangling string handle at ip={}", ip)
            }
        }
    }
}

impl std::error::Error for LowerError {}
