//! Component identity resolution.
//!
//! Filter stages are configured with Lucene SPI names (`Stop`, `LowerCase`,
//! `PatternReplace`, ...). The compiler never runs these components, it only
//! needs to know *what kind* of component a name refers to so it can pick the
//! right key remapping. An identity therefore carries a set of
//! [`IdentityTag`]s instead of a class hierarchy.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{AnalyzerError, Result};

/// Capabilities a component can be tagged with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdentityTag {
    /// Any token filter factory.
    TokenFilter,
    /// Any char filter factory.
    CharFilter,
    /// Filters that read a word list from a `words` resource.
    WordsFile,
    /// Components that load other external resources (synonyms, mappings, ...).
    ResourceLoading,
}

/// Which registry table a name is looked up in.
///
/// Token filters and char filters live in separate namespaces: the same name
/// can refer to different components in each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentKind {
    TokenFilter,
    CharFilter,
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComponentKind::TokenFilter => write!(f, "TokenFilterFactory"),
            ComponentKind::CharFilter => write!(f, "CharFilterFactory"),
        }
    }
}

/// The resolved identity of a filter component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentIdentity {
    kind: ComponentKind,
    name: String,
    factory: String,
    tags: Vec<IdentityTag>,
}

impl ComponentIdentity {
    pub fn new<N: Into<String>, F: Into<String>>(
        kind: ComponentKind,
        name: N,
        factory: F,
        tags: &[IdentityTag],
    ) -> Self {
        ComponentIdentity {
            kind,
            name: name.into(),
            factory: factory.into(),
            tags: tags.to_vec(),
        }
    }

    pub fn kind(&self) -> ComponentKind {
        self.kind
    }

    /// Registered (lowercase) name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Implementing factory class.
    pub fn factory(&self) -> &str {
        &self.factory
    }

    pub fn has_tag(&self, tag: IdentityTag) -> bool {
        self.tags.contains(&tag)
    }
}

/// Resolves normalized component names to identities.
pub trait IdentityResolver: Send + Sync + fmt::Debug {
    /// Look up a component, `None` if the name is unknown.
    fn lookup(&self, kind: ComponentKind, name: &str) -> Option<ComponentIdentity>;

    /// Look up a component, failing with a configuration error if unknown.
    fn resolve(&self, kind: ComponentKind, name: &str) -> Result<ComponentIdentity> {
        self.lookup(kind, name).ok_or_else(|| {
            AnalyzerError::configuration(format!(
                "A {kind} with name '{name}' does not exist"
            ))
        })
    }
}

use IdentityTag::{CharFilter, ResourceLoading, TokenFilter, WordsFile};

const LUCENE: &str = "org.apache.lucene.analysis";

/// Known token filter factories: (SPI name, class relative to `org.apache.lucene.analysis`, tags).
///
/// Covers the analysis-common module, including factories dropped or added
/// across Lucene releases (`standard`, `persianstem`, ...).
const TOKEN_FILTERS: &[(&str, &str, &[IdentityTag])] = &[
    ("apostrophe", "tr.ApostropheFilterFactory", &[TokenFilter]),
    ("arabicnormalization", "ar.ArabicNormalizationFilterFactory", &[TokenFilter]),
    ("arabicstem", "ar.ArabicStemFilterFactory", &[TokenFilter]),
    ("asciifolding", "miscellaneous.ASCIIFoldingFilterFactory", &[TokenFilter]),
    ("bengalinormalization", "bn.BengaliNormalizationFilterFactory", &[TokenFilter]),
    ("bengalistem", "bn.BengaliStemFilterFactory", &[TokenFilter]),
    ("brazilianstem", "br.BrazilianStemFilterFactory", &[TokenFilter]),
    ("bulgarianstem", "bg.BulgarianStemFilterFactory", &[TokenFilter]),
    ("capitalization", "miscellaneous.CapitalizationFilterFactory", &[TokenFilter]),
    ("cjkbigram", "cjk.CJKBigramFilterFactory", &[TokenFilter]),
    ("cjkwidth", "cjk.CJKWidthFilterFactory", &[TokenFilter]),
    ("classic", "standard.ClassicFilterFactory", &[TokenFilter]),
    ("codepointcount", "miscellaneous.CodepointCountFilterFactory", &[TokenFilter]),
    ("commongrams", "commongrams.CommonGramsFilterFactory", &[TokenFilter, ResourceLoading]),
    ("commongramsquery", "commongrams.CommonGramsQueryFilterFactory", &[TokenFilter, ResourceLoading]),
    ("concatenategraph", "miscellaneous.ConcatenateGraphFilterFactory", &[TokenFilter]),
    ("czechstem", "cz.CzechStemFilterFactory", &[TokenFilter]),
    ("daterecognizer", "miscellaneous.DateRecognizerFilterFactory", &[TokenFilter]),
    ("decimaldigit", "core.DecimalDigitFilterFactory", &[TokenFilter]),
    ("delimitedboost", "boost.DelimitedBoostTokenFilterFactory", &[TokenFilter]),
    ("delimitedpayload", "payloads.DelimitedPayloadTokenFilterFactory", &[TokenFilter]),
    ("delimitedtermfrequency", "miscellaneous.DelimitedTermFrequencyTokenFilterFactory", &[TokenFilter]),
    ("dictionarycompoundword", "compound.DictionaryCompoundWordTokenFilterFactory", &[TokenFilter, ResourceLoading]),
    ("dropifflagged", "miscellaneous.DropIfFlaggedFilterFactory", &[TokenFilter]),
    ("edgengram", "ngram.EdgeNGramFilterFactory", &[TokenFilter]),
    ("elision", "util.ElisionFilterFactory", &[TokenFilter, ResourceLoading]),
    ("englishminimalstem", "en.EnglishMinimalStemFilterFactory", &[TokenFilter]),
    ("englishpossessive", "en.EnglishPossessiveFilterFactory", &[TokenFilter]),
    ("fingerprint", "miscellaneous.FingerprintFilterFactory", &[TokenFilter]),
    ("finnishlightstem", "fi.FinnishLightStemFilterFactory", &[TokenFilter]),
    ("fixbrokenoffsets", "miscellaneous.FixBrokenOffsetsFilterFactory", &[TokenFilter]),
    ("fixedshingle", "shingle.FixedShingleFilterFactory", &[TokenFilter]),
    ("flattengraph", "core.FlattenGraphFilterFactory", &[TokenFilter]),
    ("frenchlightstem", "fr.FrenchLightStemFilterFactory", &[TokenFilter]),
    ("frenchminimalstem", "fr.FrenchMinimalStemFilterFactory", &[TokenFilter]),
    ("galicianminimalstem", "gl.GalicianMinimalStemFilterFactory", &[TokenFilter]),
    ("galicianstem", "gl.GalicianStemFilterFactory", &[TokenFilter]),
    ("germanlightstem", "de.GermanLightStemFilterFactory", &[TokenFilter]),
    ("germanminimalstem", "de.GermanMinimalStemFilterFactory", &[TokenFilter]),
    ("germannormalization", "de.GermanNormalizationFilterFactory", &[TokenFilter]),
    ("germanstem", "de.GermanStemFilterFactory", &[TokenFilter]),
    ("greeklowercase", "el.GreekLowerCaseFilterFactory", &[TokenFilter]),
    ("greekstem", "el.GreekStemFilterFactory", &[TokenFilter]),
    ("hindinormalization", "hi.HindiNormalizationFilterFactory", &[TokenFilter]),
    ("hindistem", "hi.HindiStemFilterFactory", &[TokenFilter]),
    ("hungarianlightstem", "hu.HungarianLightStemFilterFactory", &[TokenFilter]),
    ("hunspellstem", "hunspell.HunspellStemFilterFactory", &[TokenFilter, ResourceLoading]),
    ("hyphenatedwords", "miscellaneous.HyphenatedWordsFilterFactory", &[TokenFilter]),
    ("hyphenationcompoundword", "compound.HyphenationCompoundWordTokenFilterFactory", &[TokenFilter, ResourceLoading]),
    ("indicnormalization", "in.IndicNormalizationFilterFactory", &[TokenFilter]),
    ("indonesianstem", "id.IndonesianStemFilterFactory", &[TokenFilter]),
    ("irishlowercase", "ga.IrishLowerCaseFilterFactory", &[TokenFilter]),
    ("italianlightstem", "it.ItalianLightStemFilterFactory", &[TokenFilter]),
    ("keepword", "miscellaneous.KeepWordFilterFactory", &[TokenFilter, WordsFile, ResourceLoading]),
    ("keywordmarker", "miscellaneous.KeywordMarkerFilterFactory", &[TokenFilter, ResourceLoading]),
    ("keywordrepeat", "miscellaneous.KeywordRepeatFilterFactory", &[TokenFilter]),
    ("kstem", "en.KStemFilterFactory", &[TokenFilter]),
    ("latvianstem", "lv.LatvianStemFilterFactory", &[TokenFilter]),
    ("length", "miscellaneous.LengthFilterFactory", &[TokenFilter]),
    ("limittokencount", "miscellaneous.LimitTokenCountFilterFactory", &[TokenFilter]),
    ("limittokenoffset", "miscellaneous.LimitTokenOffsetFilterFactory", &[TokenFilter]),
    ("limittokenposition", "miscellaneous.LimitTokenPositionFilterFactory", &[TokenFilter]),
    ("lowercase", "core.LowerCaseFilterFactory", &[TokenFilter]),
    ("minhash", "minhash.MinHashFilterFactory", &[TokenFilter]),
    ("ngram", "ngram.NGramFilterFactory", &[TokenFilter]),
    ("norwegianlightstem", "no.NorwegianLightStemFilterFactory", &[TokenFilter]),
    ("norwegianminimalstem", "no.NorwegianMinimalStemFilterFactory", &[TokenFilter]),
    ("norwegiannormalization", "no.NorwegianNormalizationFilterFactory", &[TokenFilter]),
    ("numericpayload", "payloads.NumericPayloadTokenFilterFactory", &[TokenFilter]),
    ("patterncapturegroup", "pattern.PatternCaptureGroupFilterFactory", &[TokenFilter]),
    ("patternreplace", "pattern.PatternReplaceFilterFactory", &[TokenFilter]),
    ("patterntyping", "pattern.PatternTypingFilterFactory", &[TokenFilter, ResourceLoading]),
    ("persiannormalization", "fa.PersianNormalizationFilterFactory", &[TokenFilter]),
    ("persianstem", "fa.PersianStemFilterFactory", &[TokenFilter]),
    ("porterstem", "en.PorterStemFilterFactory", &[TokenFilter]),
    ("portugueselightstem", "pt.PortugueseLightStemFilterFactory", &[TokenFilter]),
    ("portugueseminimalstem", "pt.PortugueseMinimalStemFilterFactory", &[TokenFilter]),
    ("portuguesestem", "pt.PortugueseStemFilterFactory", &[TokenFilter]),
    ("protectedterm", "miscellaneous.ProtectedTermFilterFactory", &[TokenFilter, ResourceLoading]),
    ("removeduplicates", "miscellaneous.RemoveDuplicatesTokenFilterFactory", &[TokenFilter]),
    ("reversestring", "reverse.ReverseStringFilterFactory", &[TokenFilter]),
    ("russianlightstem", "ru.RussianLightStemFilterFactory", &[TokenFilter]),
    ("scandinavianfolding", "miscellaneous.ScandinavianFoldingFilterFactory", &[TokenFilter]),
    ("scandinaviannormalization", "miscellaneous.ScandinavianNormalizationFilterFactory", &[TokenFilter]),
    ("serbiannormalization", "sr.SerbianNormalizationFilterFactory", &[TokenFilter]),
    ("shingle", "shingle.ShingleFilterFactory", &[TokenFilter]),
    ("snowballporter", "snowball.SnowballPorterFilterFactory", &[TokenFilter, ResourceLoading]),
    ("soraninormalization", "ckb.SoraniNormalizationFilterFactory", &[TokenFilter]),
    ("soranistem", "ckb.SoraniStemFilterFactory", &[TokenFilter]),
    ("spanishlightstem", "es.SpanishLightStemFilterFactory", &[TokenFilter]),
    ("spanishminimalstem", "es.SpanishMinimalStemFilterFactory", &[TokenFilter]),
    ("spanishpluralstem", "es.SpanishPluralStemFilterFactory", &[TokenFilter]),
    ("standard", "standard.StandardFilterFactory", &[TokenFilter]),
    ("stemmeroverride", "miscellaneous.StemmerOverrideFilterFactory", &[TokenFilter, ResourceLoading]),
    ("stop", "core.StopFilterFactory", &[TokenFilter, WordsFile, ResourceLoading]),
    ("swedishlightstem", "sv.SwedishLightStemFilterFactory", &[TokenFilter]),
    ("swedishminimalstem", "sv.SwedishMinimalStemFilterFactory", &[TokenFilter]),
    ("synonym", "synonym.SynonymFilterFactory", &[TokenFilter, ResourceLoading]),
    ("synonymgraph", "synonym.SynonymGraphFilterFactory", &[TokenFilter, ResourceLoading]),
    ("telugunormalization", "te.TeluguNormalizationFilterFactory", &[TokenFilter]),
    ("telugustem", "te.TeluguStemFilterFactory", &[TokenFilter]),
    ("tokenoffsetpayload", "payloads.TokenOffsetPayloadTokenFilterFactory", &[TokenFilter]),
    ("trim", "miscellaneous.TrimFilterFactory", &[TokenFilter]),
    ("truncate", "miscellaneous.TruncateTokenFilterFactory", &[TokenFilter]),
    ("turkishlowercase", "tr.TurkishLowerCaseFilterFactory", &[TokenFilter]),
    ("type", "core.TypeTokenFilterFactory", &[TokenFilter, ResourceLoading]),
    ("typeaspayload", "payloads.TypeAsPayloadTokenFilterFactory", &[TokenFilter]),
    ("typeassynonym", "miscellaneous.TypeAsSynonymFilterFactory", &[TokenFilter]),
    ("uppercase", "core.UpperCaseFilterFactory", &[TokenFilter]),
    ("worddelimiter", "miscellaneous.WordDelimiterFilterFactory", &[TokenFilter, ResourceLoading]),
    ("worddelimitergraph", "miscellaneous.WordDelimiterGraphFilterFactory", &[TokenFilter, ResourceLoading]),
];

/// Known char filter factories.
const CHAR_FILTERS: &[(&str, &str, &[IdentityTag])] = &[
    ("cjkwidth", "cjk.CJKWidthCharFilterFactory", &[CharFilter]),
    ("htmlstrip", "charfilter.HTMLStripCharFilterFactory", &[CharFilter]),
    ("mapping", "charfilter.MappingCharFilterFactory", &[CharFilter, ResourceLoading]),
    ("patternreplace", "pattern.PatternReplaceCharFilterFactory", &[CharFilter]),
    ("persian", "fa.PersianCharFilterFactory", &[CharFilter]),
];

/// An enumerated registry of Lucene analysis factories.
///
/// Lookups are case-insensitive, mirroring Lucene's SPI loader. Additional
/// components can be registered for custom factories.
#[derive(Debug, Clone)]
pub struct StaticIdentityRegistry {
    token_filters: HashMap<String, ComponentIdentity>,
    char_filters: HashMap<String, ComponentIdentity>,
}

impl Default for StaticIdentityRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl StaticIdentityRegistry {
    /// Create a registry pre-populated with the Lucene factories.
    pub fn new() -> Self {
        let mut registry = Self::empty();
        for (name, class, tags) in TOKEN_FILTERS {
            registry.register(ComponentIdentity::new(
                ComponentKind::TokenFilter,
                *name,
                format!("{LUCENE}.{class}"),
                tags,
            ));
        }
        for (name, class, tags) in CHAR_FILTERS {
            registry.register(ComponentIdentity::new(
                ComponentKind::CharFilter,
                *name,
                format!("{LUCENE}.{class}"),
                tags,
            ));
        }
        registry
    }

    /// Create a registry without any components.
    pub fn empty() -> Self {
        StaticIdentityRegistry {
            token_filters: HashMap::new(),
            char_filters: HashMap::new(),
        }
    }

    /// Register a component, replacing one with the same kind and name.
    pub fn register(&mut self, identity: ComponentIdentity) {
        let key = identity.name().to_lowercase();
        self.table_mut(identity.kind()).insert(key, identity);
    }

    /// Builder-style [`register`](Self::register).
    pub fn with_component(mut self, identity: ComponentIdentity) -> Self {
        self.register(identity);
        self
    }

    /// Number of registered components of the given kind.
    pub fn len(&self, kind: ComponentKind) -> usize {
        self.table(kind).len()
    }

    fn table(&self, kind: ComponentKind) -> &HashMap<String, ComponentIdentity> {
        match kind {
            ComponentKind::TokenFilter => &self.token_filters,
            ComponentKind::CharFilter => &self.char_filters,
        }
    }

    fn table_mut(&mut self, kind: ComponentKind) -> &mut HashMap<String, ComponentIdentity> {
        match kind {
            ComponentKind::TokenFilter => &mut self.token_filters,
            ComponentKind::CharFilter => &mut self.char_filters,
        }
    }
}

impl IdentityResolver for StaticIdentityRegistry {
    fn lookup(&self, kind: ComponentKind, name: &str) -> Option<ComponentIdentity> {
        self.table(kind).get(&name.to_lowercase()).cloned()
    }
}
