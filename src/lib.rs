//! # analyzer-compiler
//!
//! Compiles analyzer definitions stored in a repository configuration tree,
//! written against Lucene's factory naming, into Elasticsearch analysis
//! settings.
//!
//! ## Features
//!
//! - Built-in analyzers selected by class or name
//! - Composed analyzers: one tokenizer plus ordered token and char filters
//! - Per-component argument key remapping (`words` → `stopwords`)
//! - Word lists dereferenced from content nodes
//! - In-memory and JSON backed configuration trees

pub mod analysis;
pub mod cli;
pub mod config;
pub mod error;
pub mod node;

pub mod prelude {
    pub use crate::analysis::{AnalysisSettings, AnalyzerCompiler, AnalyzerDefinition, ArgValue};
    pub use crate::config::CompilerConfig;
    pub use crate::error::{AnalyzerError, Result};
    pub use crate::node::{ConfigNode, MemoryNode};
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
