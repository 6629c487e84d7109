//! Resolution of built-in (pre-packaged) analyzers.

use std::collections::BTreeSet;

use log::debug;

use crate::analysis::content::ContentLoader;
use crate::analysis::mapper::{PropertyMapper, content_references};
use crate::analysis::normalize::normalize;
use crate::analysis::settings::{AnalyzerDefinition, ArgValue, TYPE_KEY};
use crate::config::CompilerConfig;
use crate::error::Result;
use crate::node::ConfigNode;

/// Builds a [`AnalyzerDefinition::Builtin`] from an analyzer node carrying a
/// class or name marker.
///
/// Arguments are the node's mappable properties (with content references
/// dereferenced) plus one list per content child node not already referenced
/// by a property, keyed by the normalized child name. Pipeline slots
/// (`tokenizer`, `filters`, `charFilters`) are never looked at.
#[derive(Debug)]
pub struct BuiltinAnalyzerResolver<'a> {
    config: &'a CompilerConfig,
    mapper: &'a PropertyMapper<'a>,
    loader: ContentLoader,
}

impl<'a> BuiltinAnalyzerResolver<'a> {
    pub fn new(config: &'a CompilerConfig, mapper: &'a PropertyMapper<'a>, loader: ContentLoader) -> Self {
        BuiltinAnalyzerResolver {
            config,
            mapper,
            loader,
        }
    }

    /// Resolve `node`, whose built-in marker value is `marker`.
    pub fn resolve(&self, node: &dyn ConfigNode, marker: &str) -> Result<AnalyzerDefinition> {
        let analyzer_type = normalize(marker);
        debug!("Resolving built-in analyzer {marker} as type {analyzer_type}");

        let mut args = self.mapper.map(node, &[], None)?;
        args.insert(TYPE_KEY.to_string(), ArgValue::Text(analyzer_type.clone()));

        let referenced = self.referenced_children(node);
        let structural = self.config.structural_nodes();

        for (name, child) in node.child_nodes() {
            if structural.contains(&name) || referenced.contains(name) {
                continue;
            }
            if !child.exists() || !ContentLoader::has_content(child) {
                continue;
            }

            let key = normalize(name);
            if args.contains_key(&key) {
                debug!("Content node {name} shadowed by property argument {key}");
                continue;
            }
            let block = self.loader.load(child, name)?;
            args.insert(key, ArgValue::List(block.into_lines()));
        }

        Ok(AnalyzerDefinition::Builtin {
            analyzer_type,
            args,
        })
    }

    /// Children already consumed through a property's content reference.
    fn referenced_children(&self, node: &dyn ConfigNode) -> BTreeSet<String> {
        node.properties()
            .into_iter()
            .filter(|property| self.mapper.is_mappable(property))
            .filter_map(|property| property.value().as_string())
            .flat_map(|value| {
                content_references(node, &value)
                    .unwrap_or_default()
                    .into_iter()
                    .map(str::to_string)
                    .collect::<Vec<_>>()
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::MemoryNode;

    fn resolve(node: &MemoryNode, marker: &str) -> Result<AnalyzerDefinition> {
        let config = CompilerConfig::default();
        let reserved = config.reserved_properties();
        let loader = ContentLoader::new();
        let mapper = PropertyMapper::new(&reserved, loader);
        BuiltinAnalyzerResolver::new(&config, &mapper, loader).resolve(node, marker)
    }

    fn list(values: &[&str]) -> ArgValue {
        ArgValue::List(values.iter().map(|v| v.to_string()).collect())
    }

    #[test]
    fn test_type_from_class() {
        let node = MemoryNode::builder()
            .property("class", "org.apache.lucene.analysis.en.EnglishAnalyzer")
            .property("jcr:primaryType", "nt:unstructured")
            .property("luceneMatchVersion", "LUCENE_47")
            .build();

        let definition = resolve(&node, "org.apache.lucene.analysis.en.EnglishAnalyzer").unwrap();
        let AnalyzerDefinition::Builtin { analyzer_type, args } = definition else {
            panic!("Expected built-in definition");
        };

        assert_eq!(analyzer_type, "english");
        assert_eq!(args.get("type"), Some(&ArgValue::from("english")));
        assert_eq!(args.get("luceneMatchVersion"), Some(&ArgValue::from("LUCENE_47")));
        assert!(!args.contains_key("class"));
        assert!(!args.contains_key("jcr:primaryType"));
    }

    #[test]
    fn test_content_child_becomes_list() {
        let node = MemoryNode::builder()
            .property("name", "Standard")
            .content("stopwords", "a\nthe\n")
            .build();

        let AnalyzerDefinition::Builtin { args, .. } = resolve(&node, "Standard").unwrap() else {
            panic!("Expected built-in definition");
        };
        assert_eq!(args.get("stopwords"), Some(&list(&["a", "the"])));
    }

    #[test]
    fn test_referenced_content_not_duplicated() {
        let node = MemoryNode::builder()
            .property("name", "Standard")
            .property("stopwords", "stop.txt")
            .content("stop.txt", "a\nthe")
            .build();

        let AnalyzerDefinition::Builtin { args, .. } = resolve(&node, "Standard").unwrap() else {
            panic!("Expected built-in definition");
        };
        assert_eq!(args.get("stopwords"), Some(&list(&["a", "the"])));
        assert!(!args.contains_key("txt"));
        assert_eq!(args.len(), 2);
    }

    #[test]
    fn test_pipeline_slots_ignored() {
        // The filters node has content a careless resolver would try to load.
        let node = MemoryNode::builder()
            .property("name", "Whitespace")
            .child("tokenizer", MemoryNode::builder().property("name", "Standard").build())
            .content("filters", "x")
            .child("charFilters", MemoryNode::new())
            .build();

        let AnalyzerDefinition::Builtin { analyzer_type, args } = resolve(&node, "Whitespace").unwrap()
        else {
            panic!("Expected built-in definition");
        };
        assert_eq!(analyzer_type, "whitespace");
        assert_eq!(args.len(), 1);
    }

    #[test]
    fn test_plain_child_without_content_is_skipped() {
        let node = MemoryNode::builder()
            .property("name", "Standard")
            .child("notes", MemoryNode::builder().property("text", "hi").build())
            .build();

        let AnalyzerDefinition::Builtin { args, .. } = resolve(&node, "Standard").unwrap() else {
            panic!("Expected built-in definition");
        };
        assert!(!args.contains_key("notes"));
    }
}
