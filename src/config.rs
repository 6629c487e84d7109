//! Configuration for the analyzer compiler.
//!
//! The defaults describe the Oak/Lucene layout of an analyzers node:
//!
//! ```text
//! analyzers/
//!   default/               class | name, or:
//!     tokenizer/           name = "Standard"
//!     filters/             ordered token filter nodes
//!     charFilters/         ordered char filter nodes
//! ```
//!
//! # Example
//!
//! ```
//! use analyzer_compiler::config::CompilerConfig;
//!
//! let config: CompilerConfig = serde_json::from_str(r#"{ "tokenizer_id": "oak_tokenizer" }"#).unwrap();
//! assert_eq!(config.tokenizer_id, "oak_tokenizer");
//! assert_eq!(config.default_node, "default");
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::analysis::mapper::RemapRule;
use crate::error::{AnalyzerError, Result};

/// Settings controlling how a tree is read and what the output looks like.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompilerConfig {
    /// Child of the analyzers node holding the analyzer definition.
    pub default_node: String,
    /// Child of the analyzer node holding the tokenizer.
    pub tokenizer_node: String,
    /// Child of the analyzer node holding token filters.
    pub filters_node: String,
    /// Child of the analyzer node holding char filters.
    pub char_filters_node: String,
    /// Property naming a built-in analyzer class. Takes precedence over `name_property`.
    pub class_property: String,
    /// Property naming a built-in analyzer (or the tokenizer, on the tokenizer node).
    pub name_property: String,
    /// Structural node type property.
    pub primary_type_property: String,
    /// Identifier the tokenizer of a composed analyzer is registered under.
    pub tokenizer_id: String,
    /// Key remapping rules for filter stages, first match wins.
    pub remap_rules: Vec<RemapRule>,
    /// Drop blank lines from loaded content blocks.
    pub skip_blank_lines: bool,
}

impl Default for CompilerConfig {
    fn default() -> Self {
        CompilerConfig {
            default_node: "default".to_string(),
            tokenizer_node: "tokenizer".to_string(),
            filters_node: "filters".to_string(),
            char_filters_node: "charFilters".to_string(),
            class_property: "class".to_string(),
            name_property: "name".to_string(),
            primary_type_property: "jcr:primaryType".to_string(),
            tokenizer_id: "custom_tokenizer".to_string(),
            remap_rules: vec![RemapRule::words_file()],
            skip_blank_lines: false,
        }
    }
}

impl CompilerConfig {
    /// Load a configuration from a JSON file. Missing fields take their defaults.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: CompilerConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Property names that never become arguments.
    pub fn reserved_properties(&self) -> Vec<String> {
        vec![
            self.class_property.clone(),
            self.name_property.clone(),
            self.primary_type_property.clone(),
        ]
    }

    /// Child names of an analyzer node that describe pipeline structure.
    pub fn structural_nodes(&self) -> [&str; 3] {
        [
            self.tokenizer_node.as_str(),
            self.filters_node.as_str(),
            self.char_filters_node.as_str(),
        ]
    }

    /// Check that no name is empty.
    pub fn validate(&self) -> Result<()> {
        let names = [
            ("default_node", &self.default_node),
            ("tokenizer_node", &self.tokenizer_node),
            ("filters_node", &self.filters_node),
            ("char_filters_node", &self.char_filters_node),
            ("class_property", &self.class_property),
            ("name_property", &self.name_property),
            ("primary_type_property", &self.primary_type_property),
            ("tokenizer_id", &self.tokenizer_id),
        ];

        match names.iter().find(|(_, value)| value.trim().is_empty()) {
            Some((field, _)) => Err(AnalyzerError::invalid_config(format!("{field} must not be empty"))),
            None => Ok(()),
        }
    }
}
