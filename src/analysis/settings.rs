//! Analysis settings produced by the compiler.
//!
//! [`AnalysisSettings`] serializes directly into the `analysis` section of an
//! Elasticsearch index definition:
//!
//! ```json
//! {
//!   "analyzer": { "content": { "type": "custom", "tokenizer": "custom_tokenizer",
//!                              "filter": ["lowercase_0"], "char_filter": [] } },
//!   "tokenizer": { "custom_tokenizer": { "type": "standard" } },
//!   "filter": { "lowercase_0": { "type": "lowercase" } },
//!   "char_filter": {}
//! }
//! ```
//!
//! Stage sections are written in declaration order.

use std::collections::BTreeMap;

use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Key holding the component type in every argument map.
pub const TYPE_KEY: &str = "type";

/// Type name of a composed analyzer.
pub const CUSTOM_TYPE: &str = "custom";

/// A single argument value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ArgValue {
    Text(String),
    /// Lines of one or more content blocks.
    List(Vec<String>),
}

impl From<&str> for ArgValue {
    fn from(text: &str) -> Self {
        ArgValue::Text(text.to_string())
    }
}

impl From<String> for ArgValue {
    fn from(text: String) -> Self {
        ArgValue::Text(text)
    }
}

/// Component arguments. Keys are kept sorted so output is stable.
pub type ArgumentMap = BTreeMap<String, ArgValue>;

/// The tokenizer of a composed analyzer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenizerSpec {
    pub id: String,
    /// Normalized tokenizer name, also stored as `type` in `args`.
    pub name: String,
    pub args: ArgumentMap,
}

/// Which stage list a filter belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterKind {
    Token,
    Char,
}

/// A token filter or char filter stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterSpec {
    pub kind: FilterKind,
    /// `<name>_<ordinal>`
    pub id: String,
    pub name: String,
    pub args: ArgumentMap,
    /// Zero-based declaration position within its list.
    pub ordinal: usize,
}

impl FilterSpec {
    pub fn new(kind: FilterKind, name: String, args: ArgumentMap, ordinal: usize) -> Self {
        FilterSpec {
            kind,
            id: format!("{name}_{ordinal}"),
            name,
            args,
            ordinal,
        }
    }
}

/// The analyzer entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalyzerDefinition {
    /// A pre-packaged analyzer; `args` includes its `type`.
    Builtin { analyzer_type: String, args: ArgumentMap },
    /// Tokenizer plus ordered filter references.
    Composed {
        tokenizer: String,
        filter: Vec<String>,
        char_filter: Vec<String>,
    },
}

impl AnalyzerDefinition {
    pub fn is_builtin(&self) -> bool {
        matches!(self, AnalyzerDefinition::Builtin { .. })
    }

    /// Engine type of the analyzer.
    pub fn analyzer_type(&self) -> &str {
        match self {
            AnalyzerDefinition::Builtin { analyzer_type, .. } => analyzer_type,
            AnalyzerDefinition::Composed { .. } => CUSTOM_TYPE,
        }
    }
}

impl Serialize for AnalyzerDefinition {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            AnalyzerDefinition::Builtin { analyzer_type, args } => {
                let mut map = serializer.serialize_map(None)?;
                map.serialize_entry(TYPE_KEY, analyzer_type)?;
                for (key, value) in args.iter().filter(|(key, _)| key.as_str() != TYPE_KEY) {
                    map.serialize_entry(key, value)?;
                }
                map.end()
            }
            AnalyzerDefinition::Composed {
                tokenizer,
                filter,
                char_filter,
            } => {
                let mut map = serializer.serialize_map(Some(4))?;
                map.serialize_entry(TYPE_KEY, CUSTOM_TYPE)?;
                map.serialize_entry("tokenizer", tokenizer)?;
                map.serialize_entry("filter", filter)?;
                map.serialize_entry("char_filter", char_filter)?;
                map.end()
            }
        }
    }
}

/// The complete result of one compilation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisSettings {
    analyzer_name: String,
    analyzer: AnalyzerDefinition,
    tokenizers: Vec<TokenizerSpec>,
    filters: Vec<FilterSpec>,
    char_filters: Vec<FilterSpec>,
}

impl AnalysisSettings {
    /// Settings for a built-in analyzer.
    pub fn builtin<S: Into<String>>(analyzer_name: S, analyzer: AnalyzerDefinition) -> Self {
        AnalysisSettings {
            analyzer_name: analyzer_name.into(),
            analyzer,
            tokenizers: Vec::new(),
            filters: Vec::new(),
            char_filters: Vec::new(),
        }
    }

    /// Settings for a composed analyzer; the analyzer entry is derived from the stages.
    pub fn composed<S: Into<String>>(
        analyzer_name: S,
        tokenizer: TokenizerSpec,
        filters: Vec<FilterSpec>,
        char_filters: Vec<FilterSpec>,
    ) -> Self {
        let analyzer = AnalyzerDefinition::Composed {
            tokenizer: tokenizer.id.clone(),
            filter: filters.iter().map(|spec| spec.id.clone()).collect(),
            char_filter: char_filters.iter().map(|spec| spec.id.clone()).collect(),
        };

        AnalysisSettings {
            analyzer_name: analyzer_name.into(),
            analyzer,
            tokenizers: vec![tokenizer],
            filters,
            char_filters,
        }
    }

    pub fn analyzer_name(&self) -> &str {
        &self.analyzer_name
    }

    pub fn analyzer(&self) -> &AnalyzerDefinition {
        &self.analyzer
    }

    pub fn tokenizers(&self) -> &[TokenizerSpec] {
        &self.tokenizers
    }

    pub fn filters(&self) -> &[FilterSpec] {
        &self.filters
    }

    pub fn char_filters(&self) -> &[FilterSpec] {
        &self.char_filters
    }

    /// Look up a token filter by identifier.
    pub fn filter(&self, id: &str) -> Option<&FilterSpec> {
        self.filters.iter().find(|spec| spec.id == id)
    }

    /// Look up a char filter by identifier.
    pub fn char_filter(&self, id: &str) -> Option<&FilterSpec> {
        self.char_filters.iter().find(|spec| spec.id == id)
    }

    /// Serialize to JSON.
    pub fn to_json(&self, pretty: bool) -> Result<String> {
        let json = if pretty {
            serde_json::to_string_pretty(self)?
        } else {
            serde_json::to_string(self)?
        };
        Ok(json)
    }
}

/// Serializes `(id, args)` pairs as a map in slice order.
struct Stages<'a, T>(&'a [T], fn(&T) -> (&str, &ArgumentMap));

impl<T> Serialize for Stages<'_, T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for stage in self.0 {
            let (id, args) = (self.1)(stage);
            map.serialize_entry(id, args)?;
        }
        map.end()
    }
}

fn tokenizer_entry(spec: &TokenizerSpec) -> (&str, &ArgumentMap) {
    (&spec.id, &spec.args)
}

fn filter_entry(spec: &FilterSpec) -> (&str, &ArgumentMap) {
    (&spec.id, &spec.args)
}

impl Serialize for AnalysisSettings {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut analyzer = BTreeMap::new();
        analyzer.insert(self.analyzer_name.as_str(), &self.analyzer);

        let mut map = serializer.serialize_map(Some(4))?;
        map.serialize_entry("analyzer", &analyzer)?;
        map.serialize_entry("tokenizer", &Stages(&self.tokenizers, tokenizer_entry))?;
        map.serialize_entry("filter", &Stages(&self.filters, filter_entry))?;
        map.serialize_entry("char_filter", &Stages(&self.char_filters, filter_entry))?;
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    fn args(entries: &[(&str, &str)]) -> ArgumentMap {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), ArgValue::from(*v)))
            .collect()
    }

    #[test]
    fn test_filter_id_from_name_and_ordinal() {
        let spec = FilterSpec::new(FilterKind::Token, "stop".to_string(), ArgumentMap::new(), 2);
        assert_eq!(spec.id, "stop_2");
    }

    #[test]
    fn test_builtin_serialization() {
        let mut builtin_args = args(&[("type", "english")]);
        builtin_args.insert(
            "stopwords".to_string(),
            ArgValue::List(vec!["a".to_string(), "the".to_string()]),
        );
        let settings = AnalysisSettings::builtin(
            "content",
            AnalyzerDefinition::Builtin {
                analyzer_type: "english".to_string(),
                args: builtin_args,
            },
        );

        let value: Value = serde_json::from_str(&settings.to_json(false).unwrap()).unwrap();
        assert_eq!(
            value,
            json!({
                "analyzer": { "content": { "type": "english", "stopwords": ["a", "the"] } },
                "tokenizer": {},
                "filter": {},
                "char_filter": {}
            })
        );
    }

    #[test]
    fn test_composed_serialization_keeps_stage_order() {
        let tokenizer = TokenizerSpec {
            id: "custom_tokenizer".to_string(),
            name: "standard".to_string(),
            args: args(&[("type", "standard")]),
        };
        let filters = vec![
            FilterSpec::new(FilterKind::Token, "synonym".into(), args(&[("type", "synonym")]), 0),
            FilterSpec::new(FilterKind::Token, "lowercase".into(), args(&[("type", "lowercase")]), 1),
            FilterSpec::new(FilterKind::Token, "asciifolding".into(), args(&[("type", "asciifolding")]), 2),
        ];
        let char_filters = vec![FilterSpec::new(
            FilterKind::Char,
            "htmlstrip".into(),
            args(&[("type", "htmlstrip")]),
            0,
        )];
        let settings = AnalysisSettings::composed("content", tokenizer, filters, char_filters);

        assert_eq!(settings.analyzer().analyzer_type(), "custom");
        assert!(settings.filter("lowercase_1").is_some());
        assert!(settings.char_filter("htmlstrip_0").is_some());

        let json = settings.to_json(false).unwrap();
        let synonym = json.find("\"synonym_0\":").unwrap();
        let lowercase = json.find("\"lowercase_1\":").unwrap();
        let folding = json.find("\"asciifolding_2\":").unwrap();
        assert!(synonym < lowercase && lowercase < folding);

        let value: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(
            value["analyzer"]["content"],
            json!({
                "type": "custom",
                "tokenizer": "custom_tokenizer",
                "filter": ["synonym_0", "lowercase_1", "asciifolding_2"],
                "char_filter": ["htmlstrip_0"]
            })
        );
        assert_eq!(value["tokenizer"]["custom_tokenizer"], json!({ "type": "standard" }));
    }
}
