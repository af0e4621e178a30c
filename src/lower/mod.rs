pub mod lower_error;
pub mod operand_stack;
pub mod string_table;

pub use lower_error::LowerError;
pub use operand_stack::{OperandStack, Slot};
pub use string_table::{StrId, StringTable};

use crate::backend::{Backend, BackendError};
use crate::ir::{Intrinsic, Op, Program};

#[derive(Debug, Clone)]
pub struct LowerConfig {
    pub stack_capacity: usize,
}

impl Default for LowerConfig {
    fn default() -> Self {
        LowerConfig {
            stack_capacity: operand_stack::DEFAULT_CAPACITY,
        }
    }
}

/// The concrete argument an intrinsic call resolved to.
#[derive(Debug, Clone, PartialEq)]
pub enum ResolvedArg {
    Exit(i64),
    Puts(String),
}

/// One intrinsic instruction with its argument pinned down.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedCall {
    /// Index of the intrinsic op in the instruction sequence.
    pub ip: usize,
    pub arg: ResolvedArg,
}

/// Either resolution or the collaborator failed.
#[derive(Debug)]
pub enum PipelineError {
    Resolve(LowerError),
    Backend(BackendError),
}

impl std::fmt::Display for PipelineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PipelineError::Resolve(e) => write!(f, "{}", e),
            PipelineError::Backend(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for PipelineError {}

impl From<LowerError> for PipelineError {
    fn from(e: LowerError) -> Self {
        PipelineError::Resolve(e)
    }
}

impl From<BackendError> for PipelineError {
    fn from(e: BackendError) -> Self {
        PipelineError::Backend(e)
    }
}

/// Replays the instruction sequence against a fresh operand stack and
/// string table, resolving the argument of every intrinsic call.
#[allow(dead_code)]
pub fn resolve(program: &Program) -> Result<Vec<ResolvedCall>, LowerError> {
    resolve_with_config(program, &LowerConfig::default())
}

pub fn resolve_with_config(
    program: &Program,
    config: &LowerConfig,
) -> Result<Vec<ResolvedCall>, LowerError> {
    let mut stack = OperandStack::with_capacity(config.stack_capacity);
    let mut strings = StringTable::new();
    let mut calls = Vec::new();

    for (ip, op) in program.ops().iter().enumerate() {
        match op {
            Op::PushInt(value) => {
                stack.push(Slot::Int(*value)).map_err(|_| LowerError::Overflow {
                    ip,
                    capacity: stack.capacity(),
                })?;
            }
            Op::PushString(text) => {
                let id = strings.intern(text.clone());
                stack.push(Slot::Str(id)).map_err(|_| LowerError::Overflow {
                    ip,
                    capacity: stack.capacity(),
                })?;
            }
            Op::Intrinsic(intrinsic) => {
                let slot = stack.pop().ok_or(LowerError::Underflow {
                    ip,
                    intrinsic: *intrinsic,
                })?;

                let arg = match (intrinsic, slot) {
                    (Intrinsic::Exit, Slot::Int(code)) => ResolvedArg::Exit(code),
                    (Intrinsic::Puts, Slot::Str(id)) => {
                        let text = strings.get(id).ok_or(LowerError::BadHandle { ip })?;
                        ResolvedArg::Puts(text.to_string())
                    }
                    (Intrinsic::Exit, found) => {
                        return Err(LowerError::TypeMismatch {
                            ip,
                            intrinsic: Intrinsic::Exit,
                            expected: "integer",
                            found: found.type_name(),
                        });
                    }
                    (Intrinsic::Puts, found) => {
                        return Err(LowerError::TypeMismatch {
                            ip,
                            intrinsic: Intrinsic::Puts,
                            expected: "string",
                            found: found.type_name(),
                        });
                    }
                };

                calls.push(ResolvedCall { ip, arg });
            }
            Op::Nop => {}
        }
    }

    Ok(calls)
}

/// Resolves the whole program, then hands the calls to the backend in
/// order. A resolution error leaves the backend untouched: no partial
/// artifact.
pub fn lower<B: Backend>(
    program: &Program,
    backend: &mut B,
    config: &LowerConfig,
) -> Result<(), PipelineError> {
    let calls = resolve_with_config(program, config)?;

    for call in &calls {
        match &call.arg {
            ResolvedArg::Exit(code) => backend.emit_exit(*code)?,
            ResolvedArg::Puts(text) => backend.emit_puts(text)?,
        }
    }

    backend.finish()?;
    Ok(())
}
