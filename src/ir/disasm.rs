use crate::ir::{Op, Program};

/// One-line rendering of an op, shared by the listing and the build trace.
pub fn format_op(op: &Op) -> String {
    match op {
        Op::PushInt(value) => format!("{:<8}{}", op.mnemonic(), value),
        Op::PushString(text) => format!("{:<8}{:?}", op.mnemonic(), text),
        Op::Intrinsic(_) | Op::Nop => op.mnemonic().to_string(),
    }
}

/// Print the instruction listing of a built program.
pub fn print_program(program: &Program) {
    println!("════════════════════════════════════════");
    println!(" program");
    println!(" {} instructions", program.len());
    println!("════════════════════════════════════════");

    for (ip, op) in program.ops().iter().enumerate() {
        println!("{:04}   {}", ip, format_op(op));
    }
}
