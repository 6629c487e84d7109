//! Command line argument parsing for the analyzer compiler CLI using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

/// analyzer-compiler - Lucene analyzer configuration to Elasticsearch analysis settings
#[derive(Parser, Debug, Clone)]
#[command(name = "analyzer-compiler")]
#[command(about = "Compiles Lucene analyzer configuration trees into Elasticsearch analysis settings")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct CompilerArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "json", global = true)]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Compiler configuration file (JSON)
    #[arg(short, long, env = "ANALYZER_COMPILER_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl CompilerArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1, // Default to normal
                n => n,
            }
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Compile the analyzer definition of a configuration tree
    Compile(CompileArgs),

    /// Show the identifier a component name normalizes to
    Normalize(NormalizeArgs),
}

/// Arguments for compiling a tree
#[derive(Args, Debug, Clone)]
pub struct CompileArgs {
    /// Configuration tree (JSON document)
    #[arg(short, long)]
    pub tree: PathBuf,

    /// Name to register the analyzer under
    #[arg(short, long, default_value = "oak_analyzer")]
    pub name: String,

    /// Slash separated path from the document root to the analyzers node
    #[arg(short = 'p', long = "analyzers-path", default_value = "")]
    pub analyzers_path: String,
}

/// Arguments for normalizing component names
#[derive(Args, Debug, Clone)]
pub struct NormalizeArgs {
    /// Class names or short names
    #[arg(required = true)]
    pub values: Vec<String>,
}

/// Output formats for CLI
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}
