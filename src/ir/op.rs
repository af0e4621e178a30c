use serde::{Deserialize, Serialize};

// =============================================================================
// OP - Parsed instructions
// =============================================================================

/// A fixed, built-in operation the language can call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Intrinsic {
    /// Terminate the generated program with the popped integer exit code.
    Exit,
    /// Print the popped string literal.
    Puts,
}

impl std::fmt::Display for Intrinsic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Intrinsic::Exit => write!(f, "exit"),
            Intrinsic::Puts => write!(f, "puts"),
        }
    }
}

/// One instruction of the parsed program.
///
/// Ops are immutable once appended to a [`Program`](crate::ir::Program):
/// the builder accumulates a statement into a pending op, freezes it on `;`,
/// and appends it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Op {
    /// Push an integer literal onto the operand stack.
    PushInt(i64),

    /// Push a string literal; interned at lowering time.
    PushString(String),

    /// Call a built-in operation on the top of the stack.
    Intrinsic(Intrinsic),

    /// Empty statement. No effect at lowering.
    Nop,
}

impl Op {
    /// Mnemonic used by the disassembler and the build trace.
    pub fn mnemonic(&self) -> &'static str {
        match self {
            Op::PushInt(_) => "PUSHI",
            Op::PushString(_) => "PUSHS",
            Op::Intrinsic(Intrinsic::Exit) => "EXIT",
            Op::Intrinsic(Intrinsic::Puts) => "PUTS",
            Op::Nop => "NOP",
        }
    }
}
