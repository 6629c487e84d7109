//! Command implementations for the analyzer compiler CLI.

use log::{debug, info};

use crate::analysis::compiler::AnalyzerCompiler;
use crate::analysis::normalize::normalize;
use crate::cli::args::*;
use crate::cli::output::*;
use crate::config::CompilerConfig;
use crate::error::{AnalyzerError, Result};
use crate::node::json::load_tree;

/// Execute a CLI command.
pub fn execute_command(args: CompilerArgs) -> Result<()> {
    match &args.command {
        Command::Compile(compile_args) => compile_tree(compile_args.clone(), &args),
        Command::Normalize(normalize_args) => normalize_names(normalize_args.clone(), &args),
    }
}

/// Load the compiler configuration named on the command line, if any.
fn load_config(cli_args: &CompilerArgs) -> Result<CompilerConfig> {
    match &cli_args.config {
        Some(path) => {
            debug!("Loading compiler configuration from {}", path.display());
            CompilerConfig::from_file(path)
        }
        None => Ok(CompilerConfig::default()),
    }
}

/// Compile the analyzers node of a JSON configuration tree.
fn compile_tree(args: CompileArgs, cli_args: &CompilerArgs) -> Result<()> {
    let config = load_config(cli_args)?;
    let tree = load_tree(&args.tree)?;

    let analyzers = tree.descendant(&args.analyzers_path).ok_or_else(|| {
        AnalyzerError::configuration(format!(
            "No node at '{}' in {}",
            args.analyzers_path,
            args.tree.display()
        ))
    })?;

    let compiler = AnalyzerCompiler::new(config);
    match compiler.compile(analyzers, &args.name)? {
        Some(settings) => {
            info!("Compiled {} from {}", args.name, args.tree.display());
            output_settings(&settings, cli_args)
        }
        None => output_nothing_compiled(
            &format!(
                "No '{}' analyzer defined in {}",
                compiler.config().default_node,
                args.tree.display()
            ),
            cli_args,
        ),
    }
}

/// Print the normalized identifier of each value.
fn normalize_names(args: NormalizeArgs, cli_args: &CompilerArgs) -> Result<()> {
    let names = args
        .values
        .into_iter()
        .map(|input| {
            let normalized = normalize(&input);
            NormalizedName { input, normalized }
        })
        .collect();

    output_normalized("Normalized names:", &NormalizeResults { names }, cli_args)
}
