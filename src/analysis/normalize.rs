//! Component name normalization.

/// Normalizes a Lucene component reference into an Elasticsearch compatible
/// identifier.
///
/// Accepts either a fully qualified class name
/// (`org.apache.lucene.analysis.en.EnglishAnalyzer`) or a short registered name
/// (`Standard`). The last non-empty dot-separated segment is lowercased and
/// every `analyzer` substring is removed, including ones formed by a removal.
///
/// ```
/// use analyzer_compiler::analysis::normalize::normalize;
///
/// assert_eq!(normalize("org.apache.lucene.analysis.en.EnglishAnalyzer"), "english");
/// assert_eq!(normalize("Standard"), "standard");
/// ```
pub fn normalize(value: &str) -> String {
    let last = value
        .rsplit('.')
        .find(|segment| !segment.is_empty())
        .unwrap_or_default();

    let mut name = last.to_lowercase();
    while name.contains("analyzer") {
        name = name.replace("analyzer", "");
    }
    name
}
