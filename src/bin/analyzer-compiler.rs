//! analyzer-compiler CLI binary.

use std::io::Write;
use std::process;

use clap::Parser;
use env_logger::{Builder, Env};

use analyzer_compiler::cli::{args::*, commands::*};

/// Log filter for a verbosity level. `RUST_LOG` still overrides it.
fn default_filter(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "error", // Quiet mode
        1 => "warn",  // Default
        2 => "info",
        3 => "debug",
        _ => "trace",
    }
}

fn main() {
    let args = CompilerArgs::parse();

    Builder::from_env(Env::default().default_filter_or(default_filter(args.verbosity())))
        .format(|buf, record| writeln!(buf, "[{}] {}", record.level(), record.args()))
        .init();

    if let Err(e) = execute_command(args) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}
