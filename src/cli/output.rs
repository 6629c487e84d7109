//! Output formatting for CLI commands.

use serde::{Deserialize, Serialize};

use crate::analysis::settings::{AnalysisSettings, AnalyzerDefinition, ArgValue, ArgumentMap, FilterSpec};
use crate::cli::args::{CompilerArgs, OutputFormat};
use crate::error::Result;

/// A component name and the identifier it normalizes to.
#[derive(Debug, Serialize, Deserialize)]
pub struct NormalizedName {
    pub input: String,
    pub normalized: String,
}

/// Result structure for the normalize command.
#[derive(Debug, Serialize, Deserialize)]
pub struct NormalizeResults {
    pub names: Vec<NormalizedName>,
}

/// Output normalized names in the requested format.
pub fn output_normalized(message: &str, results: &NormalizeResults, args: &CompilerArgs) -> Result<()> {
    match args.output_format {
        OutputFormat::Human => {
            if args.verbosity() > 0 {
                println!("{message}");
                println!();
            }
            for entry in &results.names {
                println!("{} -> {}", entry.input, entry.normalized);
            }
            Ok(())
        }
        OutputFormat::Json => output_json(results, args),
    }
}

/// Output compiled settings. Human output summarizes the pipeline, JSON
/// output is the settings document itself.
pub fn output_settings(settings: &AnalysisSettings, args: &CompilerArgs) -> Result<()> {
    match args.output_format {
        OutputFormat::Human => {
            output_settings_human(settings);
            Ok(())
        }
        OutputFormat::Json => {
            println!("{}", settings.to_json(args.pretty)?);
            Ok(())
        }
    }
}

/// Report that the tree holds no analyzer to compile.
pub fn output_nothing_compiled(message: &str, args: &CompilerArgs) -> Result<()> {
    match args.output_format {
        OutputFormat::Human => {
            if args.verbosity() > 0 {
                println!("{message}");
            }
            Ok(())
        }
        OutputFormat::Json => output_json(&serde_json::Value::Null, args),
    }
}

fn output_settings_human(settings: &AnalysisSettings) {
    println!(
        "Analyzer: {} (type: {})",
        settings.analyzer_name(),
        settings.analyzer().analyzer_type()
    );

    if let AnalyzerDefinition::Builtin { args, .. } = settings.analyzer() {
        print_args(args);
    }

    for tokenizer in settings.tokenizers() {
        println!();
        println!("Tokenizer {} ({})", tokenizer.id, tokenizer.name);
        print_args(&tokenizer.args);
    }

    print_stages("Token filters", settings.filters());
    print_stages("Char filters", settings.char_filters());
}

fn print_stages(title: &str, stages: &[FilterSpec]) {
    if stages.is_empty() {
        return;
    }
    println!();
    println!("{title}:");
    for stage in stages {
        println!("  {}. {} ({})", stage.ordinal + 1, stage.id, stage.name);
        for (key, value) in &stage.args {
            println!("       {key}: {}", format_arg(value));
        }
    }
}

fn print_args(args: &ArgumentMap) {
    for (key, value) in args {
        println!("  {key}: {}", format_arg(value));
    }
}

fn format_arg(value: &ArgValue) -> String {
    match value {
        ArgValue::Text(text) => text.clone(),
        ArgValue::List(items) => format!("[{}]", items.join(", ")),
    }
}

/// Output in JSON format.
fn output_json<T: Serialize>(result: &T, args: &CompilerArgs) -> Result<()> {
    let json = if args.pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };

    println!("{json}");
    Ok(())
}
