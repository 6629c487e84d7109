//! Translation of node properties into component arguments.
//!
//! Every eligible property of a stage node becomes one argument. Keys may be
//! renamed by a [`RemapRule`] chosen from the component identity, values that
//! name sibling content nodes are replaced by the content of those nodes.

use std::collections::{BTreeMap, HashMap};

use log::trace;
use serde::{Deserialize, Serialize};

use crate::analysis::content::ContentLoader;
use crate::analysis::identity::{ComponentIdentity, IdentityTag};
use crate::analysis::settings::{ArgValue, ArgumentMap};
use crate::error::{AnalyzerError, Result};
use crate::node::{ConfigNode, PropertyState};

/// Key renames applied to components carrying a given tag.
///
/// Rules are evaluated in order and the first one whose tag the identity
/// carries is used. A key missing from the chosen rule passes through
/// unchanged; later rules are not consulted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemapRule {
    pub tag: IdentityTag,
    pub keys: BTreeMap<String, String>,
}

impl RemapRule {
    pub fn new(tag: IdentityTag) -> Self {
        RemapRule {
            tag,
            keys: BTreeMap::new(),
        }
    }

    /// Add a `from → to` rename.
    pub fn rename<F: Into<String>, T: Into<String>>(mut self, from: F, to: T) -> Self {
        self.keys.insert(from.into(), to.into());
        self
    }

    pub fn matches(&self, identity: &ComponentIdentity) -> bool {
        identity.has_tag(self.tag)
    }

    /// The output key for a property name.
    pub fn remap<'a>(&'a self, key: &'a str) -> &'a str {
        self.keys.get(key).map(String::as_str).unwrap_or(key)
    }

    /// Lucene's words-file filters take `words`, Elasticsearch expects `stopwords`.
    pub fn words_file() -> Self {
        RemapRule::new(IdentityTag::WordsFile).rename("words", "stopwords")
    }
}

/// First rule matching the identity.
pub fn select_rule<'a>(rules: &'a [RemapRule], identity: &ComponentIdentity) -> Option<&'a RemapRule> {
    rules.iter().find(|rule| rule.matches(identity))
}

/// Names of the content nodes a property value refers to.
///
/// The value is split on commas; it is a reference only if every trimmed part
/// names an existing child of `node`. Otherwise `None` is returned and the
/// value must be used literally. Trailing empty parts are dropped, so a value
/// made only of commas references nothing and yields an empty list.
pub fn content_references<'v>(node: &dyn ConfigNode, value: &'v str) -> Option<Vec<&'v str>> {
    let mut parts: Vec<&str> = value.split(',').collect();
    if value.contains(',') {
        while parts.last().is_some_and(|part| part.is_empty()) {
            parts.pop();
        }
    }

    let parts: Vec<&str> = parts.into_iter().map(str::trim).collect();
    if parts.iter().all(|part| node.has_child_node(part)) {
        Some(parts)
    } else {
        None
    }
}

/// Converts node properties into an [`ArgumentMap`].
#[derive(Debug, Clone)]
pub struct PropertyMapper<'a> {
    reserved: &'a [String],
    loader: ContentLoader,
}

impl<'a> PropertyMapper<'a> {
    /// `reserved` names are never emitted as arguments.
    pub fn new(reserved: &'a [String], loader: ContentLoader) -> Self {
        PropertyMapper { reserved, loader }
    }

    /// Whether a property is translated at all.
    pub fn is_mappable(&self, property: &PropertyState) -> bool {
        !property.value().is_array()
            && property.value().as_blob().is_none()
            && !property.is_hidden()
            && !self.reserved.iter().any(|name| name == property.name())
    }

    /// Map the properties of `node`.
    ///
    /// When an identity is given, the first rule in `rules` matching it
    /// renames keys. Content references are resolved through the loader and
    /// any load failure aborts the mapping.
    pub fn map(
        &self,
        node: &dyn ConfigNode,
        rules: &[RemapRule],
        identity: Option<&ComponentIdentity>,
    ) -> Result<ArgumentMap> {
        let rule = identity.and_then(|identity| select_rule(rules, identity));
        let mut args = ArgumentMap::new();

        for property in node.properties() {
            if !self.is_mappable(property) {
                continue;
            }
            let Some(value) = property.value().as_string() else {
                continue;
            };

            let key = match rule {
                Some(rule) => rule.remap(property.name()),
                None => property.name(),
            };
            if args.contains_key(key) {
                return Err(AnalyzerError::configuration(format!(
                    "Property {} maps to argument '{key}', which is already set",
                    property.name()
                )));
            }
            let value = self.map_value(node, &value)?;

            trace!("Mapped property {} to argument {}", property.name(), key);
            args.insert(key.to_string(), value);
        }

        Ok(args)
    }

    fn map_value(&self, node: &dyn ConfigNode, value: &str) -> Result<ArgValue> {
        let Some(references) = content_references(node, value) else {
            return Ok(ArgValue::Text(value.to_string()));
        };

        // Blocks referenced more than once are loaded once per call.
        let mut loaded: HashMap<&str, Vec<String>> = HashMap::new();
        let mut lines = Vec::new();
        for reference in references {
            if !loaded.contains_key(reference) {
                let child = node
                    .child_node(reference)
                    .filter(|child| child.exists());
                let block = match child {
                    Some(child) => self.loader.load(child, reference)?,
                    None => return Ok(ArgValue::Text(value.to_string())),
                };
                loaded.insert(reference, block.into_lines());
            }
            if let Some(block) = loaded.get(reference) {
                lines.extend(block.iter().cloned());
            }
        }

        Ok(ArgValue::List(lines))
    }
}
