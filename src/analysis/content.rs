//! Loading of content blocks (stop word lists, keep word lists, ...).
//!
//! A content block is a resource node whose binary holds UTF-8 text. The text
//! is read line by line and every line is trimmed. Blank lines are kept as
//! empty strings unless the loader is configured to skip them.

use std::io::{BufRead, BufReader};
use std::sync::Arc;

use log::trace;

use crate::error::{AnalyzerError, Result};
use crate::node::memory::{CONTENT_NODE, DATA_PROPERTY};
use crate::node::{Blob, ConfigNode};

/// Ordered lines of a loaded content block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentBlock {
    name: String,
    lines: Vec<String>,
}

impl ContentBlock {
    /// Name of the node the block was loaded from.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn into_lines(self) -> Vec<String> {
        self.lines
    }
}

/// Reads content blocks out of resource nodes.
#[derive(Debug, Clone, Copy, Default)]
pub struct ContentLoader {
    skip_blank_lines: bool,
}

impl ContentLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop lines that are empty after trimming.
    pub fn skip_blank_lines(mut self, skip: bool) -> Self {
        self.skip_blank_lines = skip;
        self
    }

    /// Whether the node holds binary content this loader can read.
    pub fn has_content(node: &dyn ConfigNode) -> bool {
        Self::find_blob(node).is_some()
    }

    /// Load the block stored in `node`. `name` is used for error reporting.
    ///
    /// Every call reads the blob from the start; nothing is cached.
    pub fn load(&self, node: &dyn ConfigNode, name: &str) -> Result<ContentBlock> {
        let blob = Self::find_blob(node).ok_or_else(|| {
            AnalyzerError::configuration(format!(
                "Was expecting to find {CONTENT_NODE}/{DATA_PROPERTY} to read resource {name}"
            ))
        })?;

        let stream = blob
            .new_stream()
            .map_err(|e| AnalyzerError::content_load(name, e))?;
        let reader = BufReader::new(stream);

        let mut lines = Vec::new();
        for line in reader.lines() {
            let line = line.map_err(|e| AnalyzerError::content_load(name, e))?;
            let trimmed = line.trim();
            if self.skip_blank_lines && trimmed.is_empty() {
                continue;
            }
            lines.push(trimmed.to_string());
        }

        trace!("Loaded {} lines from content node {}", lines.len(), name);

        Ok(ContentBlock {
            name: name.to_string(),
            lines,
        })
    }

    /// `jcr:content/jcr:data`, falling back to `jcr:data` on the node itself.
    fn find_blob(node: &dyn ConfigNode) -> Option<Arc<dyn Blob>> {
        let content = node
            .child_node(CONTENT_NODE)
            .filter(|child| child.exists())
            .and_then(|child| {
                child
                    .property(DATA_PROPERTY)
                    .and_then(|property| property.value().as_blob().cloned())
            });

        content.or_else(|| {
            node.property(DATA_PROPERTY)
                .and_then(|property| property.value().as_blob().cloned())
        })
    }
}

/// Load a content block with the default loader.
pub fn load_content(node: &dyn ConfigNode, name: &str) -> Result<ContentBlock> {
    ContentLoader::new().load(node, name)
}
