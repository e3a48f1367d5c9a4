use crate::error::NjieError;
use crate::runner::Interpreter;
use std::io::{self, Write};
use tracing::warn;

pub const PROMPT: &str = "njie > ";

/// Driver switches shared by the REPL and the script runner.
#[derive(Debug, Clone, Copy, Default)]
pub struct Options {
    pub show_tokens: bool,
    pub show_ast: bool,
    pub fancy_errors: bool,
}

/// Interactive loop keeping one session for the whole run.
pub fn start(options: Options) {
    println!("njie interpreter v{}", env!("CARGO_PKG_VERSION"));
    println!("Type 'exit' or press Ctrl+D to quit");
    println!();

    let interpreter = Interpreter::new("<stdin>");

    loop {
        print!("{}", PROMPT);
        if let Err(error) = io::stdout().flush() {
            warn!(%error, "failed to flush prompt");
        }

        let mut line = String::new();
        match io::stdin().read_line(&mut line) {
            Ok(0) => {
                // EOF reached (Ctrl+D or piped input ended)
                println!();
                break;
            }
            Ok(_) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                if line == "exit" || line == "quit" {
                    println!("Goodbye!");
                    break;
                }

                run_line(&interpreter, line, options);
            }
            Err(error) => {
                eprintln!("Error reading input: {}", error);
                break;
            }
        }
    }
}

/// Runs one line and prints its value or its error. Returns whether the line
/// succeeded.
pub fn run_line(interpreter: &Interpreter, line: &str, options: Options) -> bool {
    match execute(interpreter, line, options) {
        Ok(()) => true,
        Err(error) => {
            print_error(&error, options);
            false
        }
    }
}

fn execute(interpreter: &Interpreter, line: &str, options: Options) -> Result<(), NjieError> {
    let tokens = interpreter.tokenize(line)?;
    if options.show_tokens {
        let rendered: Vec<String> = tokens.iter().map(ToString::to_string).collect();
        println!("[{}]", rendered.join(", "));
    }

    let expr = crate::parser::parse(tokens)?;
    if options.show_ast {
        println!("{}", expr);
    }

    let value = interpreter.evaluate(&expr)?;
    println!("{}", value);
    Ok(())
}

fn print_error(error: &NjieError, options: Options) {
    if options.fancy_errors {
        if let Err(io_error) = error.report() {
            warn!(%io_error, "failed to print diagnostic");
            eprint!("{}", error.render());
        }
    } else {
        eprint!("{}", error.render());
    }
}
