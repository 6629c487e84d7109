//! The analyzer compiler.
//!
//! [`AnalyzerCompiler::compile`] turns the analyzers node of an index
//! definition into [`AnalysisSettings`]. The analyzer node is read in exactly
//! one of two modes, decided once up front:
//!
//! - **Built-in**: the node carries a `class` or `name` property naming a
//!   pre-packaged analyzer. Only its properties and content children are read.
//! - **Composed**: no marker is present. The analyzer is assembled from the
//!   `tokenizer`, `filters` and `charFilters` children.
//!
//! # Examples
//!
//! ```
//! use analyzer_compiler::analysis::compiler::AnalyzerCompiler;
//! use analyzer_compiler::node::MemoryNode;
//!
//! let analyzers = MemoryNode::builder()
//!     .child(
//!         "default",
//!         MemoryNode::builder()
//!             .property("class", "org.apache.lucene.analysis.en.EnglishAnalyzer")
//!             .build(),
//!     )
//!     .build();
//!
//! let compiler = AnalyzerCompiler::default();
//! let settings = compiler.compile(&analyzers, "oak_analyzer").unwrap().unwrap();
//! assert_eq!(settings.analyzer().analyzer_type(), "english");
//! ```

use std::sync::Arc;

use log::{debug, info};

use crate::analysis::builtin::BuiltinAnalyzerResolver;
use crate::analysis::composed::{ComposedAnalyzer, ComposedAnalyzerResolver};
use crate::analysis::content::ContentLoader;
use crate::analysis::identity::{IdentityResolver, StaticIdentityRegistry};
use crate::analysis::mapper::PropertyMapper;
use crate::analysis::settings::AnalysisSettings;
use crate::config::CompilerConfig;
use crate::error::Result;
use crate::node::ConfigNode;

/// How an analyzer node is to be read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalyzerMode {
    /// Pre-packaged analyzer named by the marker value.
    Builtin { marker: String },
    /// Tokenizer plus filter chain.
    Composed,
}

impl AnalyzerMode {
    /// Decide the mode of an analyzer node. The class marker wins over the name marker.
    pub fn detect(node: &dyn ConfigNode, config: &CompilerConfig) -> Self {
        node.get_string(&config.class_property)
            .or_else(|| node.get_string(&config.name_property))
            .map(|marker| AnalyzerMode::Builtin { marker })
            .unwrap_or(AnalyzerMode::Composed)
    }
}

/// Compiles analyzer configuration trees into analysis settings.
///
/// A compiler holds only immutable configuration and can be shared between
/// threads; every call builds its result from scratch.
#[derive(Debug, Clone)]
pub struct AnalyzerCompiler {
    config: CompilerConfig,
    identities: Arc<dyn IdentityResolver>,
}

impl Default for AnalyzerCompiler {
    fn default() -> Self {
        Self::new(CompilerConfig::default())
    }
}

impl AnalyzerCompiler {
    /// Create a compiler using the built-in Lucene identity registry.
    pub fn new(config: CompilerConfig) -> Self {
        AnalyzerCompiler {
            config,
            identities: Arc::new(StaticIdentityRegistry::new()),
        }
    }

    /// Replace the identity resolver.
    pub fn with_identity_resolver(mut self, identities: Arc<dyn IdentityResolver>) -> Self {
        self.identities = identities;
        self
    }

    pub fn config(&self) -> &CompilerConfig {
        &self.config
    }

    /// Compile the analyzer defined under `root`'s default node.
    ///
    /// Returns `Ok(None)` when `root` or its default node does not exist.
    /// Any failure, including an unreadable content block, aborts the whole
    /// compilation.
    pub fn compile(&self, root: &dyn ConfigNode, analyzer_name: &str) -> Result<Option<AnalysisSettings>> {
        if !root.exists() {
            debug!("Analyzers node does not exist, nothing to compile");
            return Ok(None);
        }
        let Some(analyzer) = root
            .child_node(&self.config.default_node)
            .filter(|node| node.exists())
        else {
            debug!(
                "No '{}' analyzer node, nothing to compile",
                self.config.default_node
            );
            return Ok(None);
        };

        let loader = ContentLoader::new().skip_blank_lines(self.config.skip_blank_lines);
        let reserved = self.config.reserved_properties();
        let mapper = PropertyMapper::new(&reserved, loader);

        let settings = match AnalyzerMode::detect(analyzer, &self.config) {
            AnalyzerMode::Builtin { marker } => {
                let definition = BuiltinAnalyzerResolver::new(&self.config, &mapper, loader)
                    .resolve(analyzer, &marker)?;
                AnalysisSettings::builtin(analyzer_name, definition)
            }
            AnalyzerMode::Composed => {
                let ComposedAnalyzer {
                    tokenizer,
                    filters,
                    char_filters,
                } = ComposedAnalyzerResolver::new(&self.config, &mapper, self.identities.as_ref())
                    .resolve(analyzer)?;
                AnalysisSettings::composed(analyzer_name, tokenizer, filters, char_filters)
            }
        };

        info!(
            "Compiled analyzer {} as {}",
            analyzer_name,
            settings.analyzer().analyzer_type()
        );
        Ok(Some(settings))
    }
}
