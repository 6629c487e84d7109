//! Integration tests for analyzer compilation over in-memory trees.

use std::sync::Arc;

use analyzer_compiler::analysis::identity::{
    ComponentIdentity, ComponentKind, IdentityTag, StaticIdentityRegistry,
};
use analyzer_compiler::analysis::mapper::RemapRule;
use analyzer_compiler::analysis::*;
use analyzer_compiler::config::CompilerConfig;
use analyzer_compiler::error::{AnalyzerError, Result};
use analyzer_compiler::node::{FileBlob, MemoryNode};
use serde_json::json;

fn analyzers(default: MemoryNode) -> MemoryNode {
    MemoryNode::builder().child("default", default).build()
}

fn list(values: &[&str]) -> ArgValue {
    ArgValue::List(values.iter().map(|v| v.to_string()).collect())
}

#[test]
fn test_builtin_analyzer_settings() -> Result<()> {
    let default = MemoryNode::builder()
        .property("jcr:primaryType", "nt:unstructured")
        .property("class", "org.apache.lucene.analysis.standard.StandardAnalyzer")
        .property("luceneMatchVersion", "LUCENE_47")
        .property("stopwords", "stop.txt")
        .content("stop.txt", "a\nan\nthe")
        .build();

    let settings = AnalyzerCompiler::default()
        .compile(&analyzers(default), "oak_analyzer")?
        .expect("analyzer should compile");

    assert_eq!(
        serde_json::to_value(&settings)?,
        json!({
            "analyzer": {
                "oak_analyzer": {
                    "type": "standard",
                    "luceneMatchVersion": "LUCENE_47",
                    "stopwords": ["a", "an", "the"]
                }
            },
            "tokenizer": {},
            "filter": {},
            "char_filter": {}
        })
    );

    Ok(())
}

#[test]
fn test_composed_analyzer_settings() -> Result<()> {
    let stop = MemoryNode::builder()
        .property("words", "stop1.txt, stop2.txt")
        .property("ignoreCase", true)
        .content("stop1.txt", "a\nan")
        .content("stop2.txt", "the\n")
        .build();
    let filters = MemoryNode::builder()
        .child("LowerCase", MemoryNode::new())
        .child("Stop", stop)
        .child("PorterStem", MemoryNode::new())
        .build();
    let char_filters = MemoryNode::builder()
        .child(
            "PatternReplace",
            MemoryNode::builder()
                .property("pattern", "(\\d+)-(?=\\d)")
                .property("replacement", "$1")
                .build(),
        )
        .build();
    let default = MemoryNode::builder()
        .child(
            "tokenizer",
            MemoryNode::builder().property("name", "Standard").build(),
        )
        .child("filters", filters)
        .child("charFilters", char_filters)
        .build();

    let settings = AnalyzerCompiler::default()
        .compile(&analyzers(default), "fulltext")?
        .expect("analyzer should compile");

    let expected = json!({
        "analyzer": {
            "fulltext": {
                "type": "custom",
                "tokenizer": "custom_tokenizer",
                "filter": ["lowercase_0", "stop_1", "porterstem_2"],
                "char_filter": ["patternreplace_0"]
            }
        },
        "tokenizer": {
            "custom_tokenizer": { "type": "standard" }
        },
        "filter": {
            "lowercase_0": { "type": "lowercase" },
            "stop_1": {
                "ignoreCase": "true",
                "stopwords": ["a", "an", "the"],
                "type": "stop"
            },
            "porterstem_2": { "type": "porterstem" }
        },
        "char_filter": {
            "patternreplace_0": {
                "pattern": "(\\d+)-(?=\\d)",
                "replacement": "$1",
                "type": "patternreplace"
            }
        }
    });
    assert_eq!(serde_json::to_value(&settings)?, expected);

    // Every referenced stage is defined.
    let AnalyzerDefinition::Composed { filter, char_filter, .. } = settings.analyzer() else {
        panic!("Expected a composed analyzer");
    };
    assert!(filter.iter().all(|id| settings.filter(id).is_some()));
    assert!(char_filter.iter().all(|id| settings.char_filter(id).is_some()));

    Ok(())
}

#[test]
fn test_filter_order_survives_serialization() -> Result<()> {
    let filters = MemoryNode::builder()
        .child("WordDelimiter", MemoryNode::new())
        .child("Synonym", MemoryNode::new())
        .child("ASCIIFolding", MemoryNode::new())
        .child("LowerCase", MemoryNode::new())
        .build();
    let default = MemoryNode::builder()
        .child("tokenizer", MemoryNode::builder().property("name", "Whitespace").build())
        .child("filters", filters)
        .build();

    let settings = AnalyzerCompiler::default()
        .compile(&analyzers(default), "a")?
        .expect("analyzer should compile");
    let json: serde_json::Value = serde_json::from_str(&settings.to_json(false)?)?;

    let keys: Vec<&String> = json["filter"].as_object().unwrap().keys().collect();
    assert_eq!(
        keys,
        vec!["worddelimiter_0", "synonym_1", "asciifolding_2", "lowercase_3"]
    );

    Ok(())
}

#[test]
fn test_non_reference_values_pass_through() -> Result<()> {
    // "a.txt, b.txt" only partly names children, so it stays a plain string.
    let default = MemoryNode::builder()
        .property("name", "Standard")
        .property("stopwords", "a.txt, b.txt")
        .content("a.txt", "x")
        .build();

    let settings = AnalyzerCompiler::default()
        .compile(&analyzers(default), "a")?
        .expect("analyzer should compile");
    let AnalyzerDefinition::Builtin { args, .. } = settings.analyzer() else {
        panic!("Expected a built-in analyzer");
    };

    assert_eq!(args.get("stopwords"), Some(&ArgValue::from("a.txt, b.txt")));
    // The unreferenced content child is still picked up under its own name.
    assert_eq!(args.get("a.txt"), None);
    assert_eq!(args.get("txt"), Some(&list(&["x"])));

    Ok(())
}

#[test]
fn test_absent_analyzer_yields_nothing() -> Result<()> {
    let compiler = AnalyzerCompiler::default();

    assert!(compiler.compile(&MemoryNode::missing(), "a")?.is_none());
    assert!(compiler.compile(&MemoryNode::new(), "a")?.is_none());
    assert!(
        compiler
            .compile(
                &MemoryNode::builder().child("other", MemoryNode::new()).build(),
                "a"
            )?
            .is_none()
    );

    Ok(())
}

#[test]
fn test_unreadable_content_aborts_compilation() {
    let stop = MemoryNode::builder()
        .property("words", "stop.txt")
        .child(
            "stop.txt",
            MemoryNode::blob_resource(FileBlob::new("/nonexistent/analyzer-compiler/stop.txt")),
        )
        .build();
    let default = MemoryNode::builder()
        .child("tokenizer", MemoryNode::builder().property("name", "Standard").build())
        .child("filters", MemoryNode::builder().child("Stop", stop).build())
        .build();

    let err = AnalyzerCompiler::default()
        .compile(&analyzers(default), "a")
        .unwrap_err();

    match err {
        AnalyzerError::ContentLoad { node, .. } => assert_eq!(node, "stop.txt"),
        other => panic!("Expected a content load error, got {other:?}"),
    }
}

#[test]
fn test_custom_remap_rules_and_registry() -> Result<()> {
    let registry = StaticIdentityRegistry::new().with_component(ComponentIdentity::new(
        ComponentKind::TokenFilter,
        "custommarker",
        "com.example.CustomMarkerFilterFactory",
        &[IdentityTag::ResourceLoading],
    ));
    let config = CompilerConfig {
        remap_rules: vec![
            RemapRule::words_file(),
            RemapRule::new(IdentityTag::ResourceLoading).rename("markers", "marker_list"),
        ],
        ..CompilerConfig::default()
    };
    let compiler = AnalyzerCompiler::new(config).with_identity_resolver(Arc::new(registry));

    let marker = MemoryNode::builder()
        .property("markers", "markers.txt")
        .content("markers.txt", "#\n@")
        .build();
    let default = MemoryNode::builder()
        .child("tokenizer", MemoryNode::builder().property("name", "Keyword").build())
        .child("filters", MemoryNode::builder().child("CustomMarker", marker).build())
        .build();

    let settings = compiler
        .compile(&analyzers(default), "a")?
        .expect("analyzer should compile");
    let filter = settings.filter("custommarker_0").expect("filter should exist");

    assert_eq!(filter.args.get("marker_list"), Some(&list(&["#", "@"])));
    assert!(!filter.args.contains_key("markers"));

    Ok(())
}

#[test]
fn test_compilation_is_repeatable() -> Result<()> {
    let default = MemoryNode::builder()
        .child("tokenizer", MemoryNode::builder().property("name", "Standard").build())
        .child(
            "filters",
            MemoryNode::builder()
                .child("LowerCase", MemoryNode::new())
                .child("LowerCase2", MemoryNode::new())
                .build(),
        )
        .build();
    let tree = analyzers(default);
    let compiler = AnalyzerCompiler::default();

    // "LowerCase2" is not a known filter; the failure must not leave state behind.
    assert!(compiler.compile(&tree, "a").is_err());
    assert!(compiler.compile(&tree, "a").is_err());

    let ok = analyzers(
        MemoryNode::builder()
            .child("tokenizer", MemoryNode::builder().property("name", "Standard").build())
            .build(),
    );
    let first = compiler.compile(&ok, "a")?;
    let second = compiler.compile(&ok, "a")?;
    assert_eq!(first, second);

    Ok(())
}

#[test]
fn test_language_filters_compile() -> Result<()> {
    let names = [
        "GermanStem",
        "FrenchLightStem",
        "KeywordRepeat",
        "ScandinavianFolding",
        "GreekLowerCase",
        "Type",
        "DictionaryCompoundWord",
        "LimitTokenPosition",
    ];

    for name in names {
        let default = MemoryNode::builder()
            .child("tokenizer", MemoryNode::builder().property("name", "Standard").build())
            .child("filters", MemoryNode::builder().child(name, MemoryNode::new()).build())
            .build();

        let settings = AnalyzerCompiler::default()
            .compile(&analyzers(default), "a")?
            .expect("analyzer should compile");
        assert_eq!(settings.filters()[0].name, name.to_lowercase());
    }

    Ok(())
}

#[test]
fn test_comma_only_value_is_empty_list() -> Result<()> {
    let default = MemoryNode::builder()
        .property("name", "Standard")
        .property("stopwords", ",")
        .build();

    let settings = AnalyzerCompiler::default()
        .compile(&analyzers(default), "a")?
        .expect("analyzer should compile");

    assert_eq!(
        settings.to_json(false)?,
        r#"{"analyzer":{"a":{"type":"standard","stopwords":[]}},"tokenizer":{},"filter":{},"char_filter":{}}"#
    );

    Ok(())
}

#[test]
fn test_words_and_stopwords_together_is_error() {
    let stop = MemoryNode::builder()
        .property("words", "stop.txt")
        .property("stopwords", "_english_")
        .content("stop.txt", "the")
        .build();
    let default = MemoryNode::builder()
        .child("tokenizer", MemoryNode::builder().property("name", "Standard").build())
        .child("filters", MemoryNode::builder().child("Stop", stop).build())
        .build();

    let result = AnalyzerCompiler::default().compile(&analyzers(default), "a");
    assert!(matches!(result, Err(AnalyzerError::Configuration(_))));
}
