//! Resolution of composed (tokenizer + filter chain) analyzers.

use log::debug;

use crate::analysis::identity::{ComponentKind, IdentityResolver};
use crate::analysis::mapper::PropertyMapper;
use crate::analysis::normalize::normalize;
use crate::analysis::settings::{ArgValue, FilterKind, FilterSpec, TYPE_KEY, TokenizerSpec};
use crate::config::CompilerConfig;
use crate::error::{AnalyzerError, Result};
use crate::node::ConfigNode;

/// The stages of a composed analyzer, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposedAnalyzer {
    pub tokenizer: TokenizerSpec,
    pub filters: Vec<FilterSpec>,
    pub char_filters: Vec<FilterSpec>,
}

/// Builds the tokenizer and filter stages of an analyzer node without a
/// built-in marker.
#[derive(Debug)]
pub struct ComposedAnalyzerResolver<'a> {
    config: &'a CompilerConfig,
    mapper: &'a PropertyMapper<'a>,
    identities: &'a dyn IdentityResolver,
}

impl<'a> ComposedAnalyzerResolver<'a> {
    pub fn new(
        config: &'a CompilerConfig,
        mapper: &'a PropertyMapper<'a>,
        identities: &'a dyn IdentityResolver,
    ) -> Self {
        ComposedAnalyzerResolver {
            config,
            mapper,
            identities,
        }
    }

    pub fn resolve(&self, node: &dyn ConfigNode) -> Result<ComposedAnalyzer> {
        let tokenizer = self.load_tokenizer(node)?;
        let filters = self.load_filters(
            existing_child(node, &self.config.filters_node),
            FilterKind::Token,
        )?;
        let char_filters = self.load_filters(
            existing_child(node, &self.config.char_filters_node),
            FilterKind::Char,
        )?;

        debug!(
            "Composed analyzer: tokenizer {}, {} filters, {} char filters",
            tokenizer.name,
            filters.len(),
            char_filters.len()
        );

        Ok(ComposedAnalyzer {
            tokenizer,
            filters,
            char_filters,
        })
    }

    /// The tokenizer slot must exist and name its tokenizer.
    pub fn load_tokenizer(&self, node: &dyn ConfigNode) -> Result<TokenizerSpec> {
        let slot = &self.config.tokenizer_node;
        let tokenizer = existing_child(node, slot).ok_or_else(|| {
            AnalyzerError::configuration(format!(
                "Composed analyzer requires a '{slot}' node"
            ))
        })?;

        let raw_name = tokenizer
            .get_string(&self.config.name_property)
            .ok_or_else(|| {
                AnalyzerError::configuration(format!(
                    "Tokenizer node is missing the '{}' property",
                    self.config.name_property
                ))
            })?;
        let name = normalize(&raw_name);

        let mut args = self.mapper.map(tokenizer, &[], None)?;
        args.insert(TYPE_KEY.to_string(), ArgValue::Text(name.clone()));

        Ok(TokenizerSpec {
            id: self.config.tokenizer_id.clone(),
            name,
            args,
        })
    }

    /// Load the children of a filter slot in declaration order.
    ///
    /// A missing slot yields no stages. Ordinals count per call, so token and
    /// char filters are numbered independently.
    pub fn load_filters(&self, slot: Option<&dyn ConfigNode>, kind: FilterKind) -> Result<Vec<FilterSpec>> {
        let Some(slot) = slot else {
            return Ok(Vec::new());
        };
        let component_kind = match kind {
            FilterKind::Token => ComponentKind::TokenFilter,
            FilterKind::Char => ComponentKind::CharFilter,
        };

        let mut filters = Vec::new();
        for (ordinal, (entry_name, entry)) in slot.child_nodes().into_iter().enumerate() {
            let name = normalize(entry_name);
            let identity = self.identities.resolve(component_kind, &name)?;

            let mut args = self
                .mapper
                .map(entry, &self.config.remap_rules, Some(&identity))?;
            args.insert(TYPE_KEY.to_string(), ArgValue::Text(name.clone()));

            let spec = FilterSpec::new(kind, name, args, ordinal);
            debug!("Loaded {:?} filter {} ({})", kind, spec.id, identity.factory());
            filters.push(spec);
        }

        Ok(filters)
    }
}

fn existing_child<'n>(node: &'n dyn ConfigNode, name: &str) -> Option<&'n dyn ConfigNode> {
    node.child_node(name).filter(|child| child.exists())
}
