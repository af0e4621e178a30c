mod backend;
mod frontend;
mod ir;
mod lower;

use std::{env, fs, path::Path, process};

use crate::backend::ListingBackend;
use crate::frontend::lexer::{Lexer, Spanned};
use crate::frontend::token_dumper::TokenDumper;
use crate::ir::disasm::print_program;
use crate::ir::{Builder, Program};
use crate::lower::LowerConfig;

fn main() {
    let args: Vec<String> = env::args().collect();

    let tokens_only = args.contains(&"--tokens".to_string());
    let no_color = args.contains(&"--no-color".to_string());
    let pretty = args.contains(&"--pretty".to_string());
    let ir_only = args.contains(&"--ir".to_string());
    let strict = args.contains(&"--strict".to_string());
    let quiet = args.contains(&"--quiet".to_string());
    let emit_path = flag_value(&args, "--emit");

    // first non-flag argument (that is not --emit's value) is the filename
    let filename = args
        .iter()
        .skip(1)
        .filter(|a| Some(a.as_str()) != emit_path.as_deref())
        .find(|a| !a.starts_with('-'));

    match filename {
        Some(filename) => {
            ensure_extension(filename);
            match fs::read_to_string(filename) {
                Ok(source) => {
                    if tokens_only {
                        dump_tokens(&source, no_color, pretty, strict);
                    } else {
                        run_pipeline(&source, ir_only, strict, quiet, emit_path.as_deref());
                    }
                }
                Err(e) => {
                    eprintln!("Failed to read '{}': {}", filename, e);
                    process::exit(1);
                }
            }
        }
        None => print_usage(),
    }
}

/// Value following a `--flag value` pair, if present.
fn flag_value(args: &[String], flag: &str) -> Option<String> {
    let idx = args.iter().position(|a| a == flag)?;
    args.get(idx + 1).cloned()
}

fn ensure_extension(filename: &str) {
    let path = Path::new(filename);
    if path.extension().and_then(|e| e.to_str()) != Some("st") {
        eprintln!("Error: expected a .st file, got {}", filename);
        process::exit(1);
    }
}

fn print_usage() {
    println!("STACKED - Stack-Oriented Scripting Language Front-End");
    println!();
    println!("Usage:");
    println!("  stacked <file.st>               Compile a program (listing backend)");
    println!("  stacked --tokens <file.st>      Show tokens only");
    println!("  stacked --ir <file.st>          Show the built instruction sequence");
    println!("  stacked --emit <out> <file.st>  Also write the encoded program");
    println!("  stacked --strict                Lexical warnings become errors");
    println!("  stacked --quiet                 Suppress the per-instruction trace");
    println!("  stacked --no-color --pretty     Token dump modifiers");
}

/// Lex, surfacing warnings on stderr. Warnings are fatal under --strict.
fn lex(source: &str, strict: bool) -> Vec<Spanned> {
    let mut lexer = Lexer::new(source);
    let tokens = match lexer.tokenize() {
        Ok(t) => t,
        Err(e) => {
            eprintln!("Lexer error: {}", e);
            process::exit(1);
        }
    };

    for warning in lexer.warnings() {
        eprintln!("Warning: {}", warning);
    }
    if strict && !lexer.warnings().is_empty() {
        eprintln!(
            "Error: {} lexical warning(s) in strict mode",
            lexer.warnings().len()
        );
        process::exit(1);
    }

    tokens
}

fn dump_tokens(source: &str, no_color: bool, pretty: bool, strict: bool) {
    let tokens = lex(source, strict);

    let mut dumper = TokenDumper::new();
    if no_color {
        dumper = dumper.no_color();
    }
    if pretty {
        dumper = dumper.pretty();
    }

    dumper.dump(&tokens);
}

fn run_pipeline(source: &str, ir_only: bool, strict: bool, quiet: bool, emit_path: Option<&str>) {
    let tokens = lex(source, strict);

    let mut builder = Builder::new();
    if !quiet {
        builder = builder.with_trace();
    }
    let program = match builder.build(&tokens) {
        Ok(p) => p,
        Err(report) => {
            eprintln!("Build failed:\n{}", report);
            process::exit(1);
        }
    };

    if ir_only {
        print_program(&program);
        return;
    }

    if let Some(path) = emit_path {
        write_program(&program, path);
    }

    let mut backend = ListingBackend::new();
    if let Err(e) = lower::lower(&program, &mut backend, &LowerConfig::default()) {
        eprintln!("{}", e);
        process::exit(1);
    }
}

fn write_program(program: &Program, path: &str) {
    let bytes = match program.to_bytes() {
        Ok(b) => b,
        Err(e) => {
            eprintln!("Failed to encode program: {}", e);
            process::exit(1);
        }
    };
    if let Err(e) = fs::write(path, bytes) {
        eprintln!("Failed to write '{}': {}", path, e);
        process::exit(1);
    }
}
