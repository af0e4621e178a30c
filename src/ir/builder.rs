use crate::frontend::lexer::{Span, Spanned};
use crate::frontend::token::Token;
use crate::ir::build_error::{BuildError, BuildReport};
use crate::ir::disasm::format_op;
use crate::ir::{Intrinsic, Op, Program};

/// The statement accumulator. One statement is built up between terminators
/// and frozen into an [`Op`] on `;`.
#[derive(Debug, Clone, PartialEq)]
enum Pending {
    /// Nothing seen yet; finalizes to `Nop`.
    Empty,
    /// `pushi` seen; the operand slot fills from the integer literal.
    Int(Option<i64>),
    /// `pushs` seen; fills from the string literal.
    Str(Option<String>),
    /// `puts` / `exit`; complete as soon as the keyword is seen.
    Intrinsic(Intrinsic),
}

impl Pending {
    fn keyword(&self) -> &'static str {
        match self {
            Pending::Empty => "",
            Pending::Int(_) => "pushi",
            Pending::Str(_) => "pushs",
            Pending::Intrinsic(Intrinsic::Puts) => "puts",
            Pending::Intrinsic(Intrinsic::Exit) => "exit",
        }
    }
}

/// Assembles the token stream into a [`Program`].
///
/// The builder owns its output; there is no ambient program state. Literals
/// bind to the instruction being built, not to whatever statement order
/// happens to deliver, and a statement that breaks the rules is skipped as a
/// whole while the scan continues.
pub struct Builder {
    program: Program,
    errors: Vec<BuildError>,
    trace: bool,
}

impl Builder {
    pub fn new() -> Self {
        Self {
            program: Program::new(),
            errors: Vec::new(),
            trace: false,
        }
    }

    /// Print each instruction as it is finalized.
    pub fn with_trace(mut self) -> Self {
        self.trace = true;
        self
    }

    pub fn build(mut self, tokens: &[Spanned]) -> Result<Program, BuildReport> {
        let mut pending = Pending::Empty;
        // once a statement errors, swallow its remaining tokens up to `;`
        let mut skipping = false;

        for spanned in tokens {
            let span = spanned.span;

            if skipping {
                match spanned.token {
                    Token::Semi => {
                        skipping = false;
                        pending = Pending::Empty;
                    }
                    Token::Eof => break,
                    _ => {}
                }
                continue;
            }

            match &spanned.token {
                Token::Pushi => match pending {
                    Pending::Empty => pending = Pending::Int(None),
                    _ => {
                        self.errors.push(BuildError::second_keyword("pushi", span));
                        skipping = true;
                    }
                },
                Token::Pushs => match pending {
                    Pending::Empty => pending = Pending::Str(None),
                    _ => {
                        self.errors.push(BuildError::second_keyword("pushs", span));
                        skipping = true;
                    }
                },
                Token::Puts => match pending {
                    Pending::Empty => pending = Pending::Intrinsic(Intrinsic::Puts),
                    _ => {
                        self.errors.push(BuildError::second_keyword("puts", span));
                        skipping = true;
                    }
                },
                Token::Exit => match pending {
                    Pending::Empty => pending = Pending::Intrinsic(Intrinsic::Exit),
                    _ => {
                        self.errors.push(BuildError::second_keyword("exit", span));
                        skipping = true;
                    }
                },
                Token::Integer(value) => match pending {
                    Pending::Int(None) => pending = Pending::Int(Some(*value)),
                    Pending::Int(Some(_)) => {
                        self.errors
                            .push(BuildError::duplicate_operand(value.to_string(), span));
                        skipping = true;
                    }
                    Pending::Empty => {
                        self.errors
                            .push(BuildError::stray_literal(value.to_string(), span));
                        skipping = true;
                    }
                    _ => {
                        self.errors.push(BuildError::wrong_kind_literal(
                            "string",
                            value.to_string(),
                            span,
                        ));
                        skipping = true;
                    }
                },
                Token::String(text) => match pending {
                    Pending::Str(None) => pending = Pending::Str(Some(text.clone())),
                    Pending::Str(Some(_)) => {
                        self.errors
                            .push(BuildError::duplicate_operand(format!("{:?}", text), span));
                        skipping = true;
                    }
                    Pending::Empty => {
                        self.errors
                            .push(BuildError::stray_literal(format!("{:?}", text), span));
                        skipping = true;
                    }
                    _ => {
                        self.errors.push(BuildError::wrong_kind_literal(
                            "integer",
                            format!("{:?}", text),
                            span,
                        ));
                        skipping = true;
                    }
                },
                Token::Ident(word) => {
                    self.errors
                        .push(BuildError::unknown_instruction(word.clone(), span));
                    skipping = true;
                }
                Token::Semi => {
                    if let Some(op) = self.finalize(pending, span) {
                        self.append(op);
                    }
                    pending = Pending::Empty;
                }
                Token::Eof => {
                    if pending != Pending::Empty {
                        self.errors
                            .push(BuildError::UnterminatedStatement { span });
                    }
                    break;
                }
            }
        }

        if self.errors.is_empty() {
            Ok(self.program)
        } else {
            Err(BuildReport {
                errors: self.errors,
            })
        }
    }

    /// Freezes the accumulator into an op, or records why it cannot be.
    fn finalize(&mut self, pending: Pending, span: Span) -> Option<Op> {
        match pending {
            Pending::Empty => Some(Op::Nop),
            Pending::Int(Some(value)) => Some(Op::PushInt(value)),
            Pending::Str(Some(text)) => Some(Op::PushString(text)),
            Pending::Intrinsic(intrinsic) => Some(Op::Intrinsic(intrinsic)),
            incomplete @ (Pending::Int(None) | Pending::Str(None)) => {
                self.errors.push(BuildError::MissingOperand {
                    keyword: incomplete.keyword(),
                    span,
                });
                None
            }
        }
    }

    fn append(&mut self, op: Op) {
        if self.trace {
            println!("> op {:04}: {}", self.program.len(), format_op(&op));
        }
        self.program.push(op);
    }
}

impl Default for Builder {
    fn default() -> Self {
        Self::new()
    }
}
