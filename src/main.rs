use clap::{Arg, ArgAction, Command};
use njie::repl::{self, Options};
use njie::Interpreter;
use std::fs;
use std::path::Path;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

fn main() {
    let matches = Command::new("njie")
        .about("An interpreter for arithmetic and boolean expressions with variables")
        .version(env!("CARGO_PKG_VERSION"))
        .arg(
            Arg::new("file")
                .help("Script to run, one expression per line")
                .value_name("FILE")
                .index(1),
        )
        .arg(
            Arg::new("interactive")
                .short('i')
                .long("interactive")
                .help("Start in interactive REPL mode")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("tokens")
                .long("tokens")
                .help("Print the token list of every line before evaluating it")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("ast")
                .long("ast")
                .help("Print the parenthesized syntax tree of every line")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("fancy")
                .long("fancy")
                .help("Report errors as colored diagnostics")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Increase log output (-v debug, -vv trace)")
                .action(ArgAction::Count),
        )
        .get_matches();

    init_logging(matches.get_count("verbose"));

    let options = Options {
        show_tokens: matches.get_flag("tokens"),
        show_ast: matches.get_flag("ast"),
        fancy_errors: matches.get_flag("fancy"),
    };
    debug!(?options, "starting");

    match matches.get_one::<String>("file") {
        Some(file_path) if !matches.get_flag("interactive") => run_file(file_path, options),
        _ => repl::start(options),
    }
}

/// `RUST_LOG` wins; otherwise the level follows the `-v` count.
fn init_logging(verbosity: u8) {
    let default_level = match verbosity {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run_file(path: &str, options: Options) {
    let path = Path::new(path);

    if !path.exists() {
        eprintln!("Error: File '{}' not found", path.display());
        std::process::exit(1);
    }

    let source = match fs::read_to_string(path) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("Error reading file '{}': {}", path.display(), e);
            std::process::exit(1);
        }
    };

    let interpreter = Interpreter::new(&path.display().to_string());
    info!(file = %path.display(), "running script");

    for line in source.lines().map(str::trim).filter(|line| !line.is_empty()) {
        if !repl::run_line(&interpreter, line, options) {
            std::process::exit(1);
        }
    }
}
