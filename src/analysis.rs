//! Analyzer configuration compilation.
//!
//! Translates a Lucene-style analyzer definition stored in a configuration
//! tree into Elasticsearch analysis settings. The entry point is
//! [`compiler::AnalyzerCompiler`]; the remaining modules are its building
//! blocks, leaves first:
//!
//! - [`normalize`]: canonical component identifiers
//! - [`content`]: word list loading
//! - [`identity`]: component identity lookup
//! - [`mapper`]: property to argument translation
//! - [`builtin`] / [`composed`]: the two analyzer modes
//! - [`settings`]: the compiled output

pub mod builtin;
pub mod compiler;
pub mod composed;
pub mod content;
pub mod identity;
pub mod mapper;
pub mod normalize;
pub mod settings;

pub use compiler::{AnalyzerCompiler, AnalyzerMode};
pub use settings::{AnalysisSettings, AnalyzerDefinition, ArgValue, ArgumentMap, FilterKind, FilterSpec, TokenizerSpec};
