//! In-memory configuration tree for tests and for trees loaded from JSON.

use std::io::{Cursor, Read};
use std::sync::Arc;

use crate::node::{Blob, ConfigNode, PropertyState, PropertyValue};

/// Name of the child node that holds a resource's binary.
pub const CONTENT_NODE: &str = "jcr:content";

/// Name of the binary property inside [`CONTENT_NODE`].
pub const DATA_PROPERTY: &str = "jcr:data";

/// Binary content held in memory.
#[derive(Debug, Clone)]
pub struct MemoryBlob {
    data: Arc<[u8]>,
}

impl MemoryBlob {
    pub fn new<B: Into<Vec<u8>>>(data: B) -> Self {
        MemoryBlob {
            data: Arc::from(data.into()),
        }
    }
}

impl From<&str> for MemoryBlob {
    fn from(text: &str) -> Self {
        MemoryBlob::new(text.as_bytes())
    }
}

impl Blob for MemoryBlob {
    fn new_stream(&self) -> std::io::Result<Box<dyn Read + '_>> {
        Ok(Box::new(Cursor::new(&self.data[..])))
    }

    fn length(&self) -> Option<u64> {
        Some(self.data.len() as u64)
    }
}

/// An in-memory configuration node.
///
/// Properties and children keep insertion order. Setting a property or child
/// that already exists replaces it in place.
#[derive(Debug, Clone)]
pub struct MemoryNode {
    properties: Vec<PropertyState>,
    children: Vec<(String, MemoryNode)>,
    exists: bool,
}

impl Default for MemoryNode {
    fn default() -> Self {
        MemoryNode::new()
    }
}

impl MemoryNode {
    /// Create an empty, existing node.
    pub fn new() -> Self {
        MemoryNode {
            properties: Vec::new(),
            children: Vec::new(),
            exists: true,
        }
    }

    /// A node that reports `exists() == false`.
    pub fn missing() -> Self {
        MemoryNode {
            properties: Vec::new(),
            children: Vec::new(),
            exists: false,
        }
    }

    /// Start building a node.
    pub fn builder() -> MemoryNodeBuilder {
        MemoryNodeBuilder::new()
    }

    /// A resource node whose binary content is the given text.
    pub fn text_resource(text: &str) -> Self {
        Self::blob_resource(MemoryBlob::from(text))
    }

    /// A resource node holding the blob under `jcr:content/jcr:data`.
    pub fn blob_resource<B: Blob + 'static>(blob: B) -> Self {
        let content = MemoryNode::builder()
            .property(DATA_PROPERTY, PropertyValue::Binary(Arc::new(blob)))
            .build();
        MemoryNode::builder().child(CONTENT_NODE, content).build()
    }

    /// Set a property, replacing any previous value with the same name.
    pub fn set_property<S: Into<String>, V: Into<PropertyValue>>(&mut self, name: S, value: V) {
        let property = PropertyState::new(name, value);
        match self
            .properties
            .iter_mut()
            .find(|existing| existing.name() == property.name())
        {
            Some(existing) => *existing = property,
            None => self.properties.push(property),
        }
    }

    /// Set a child node, replacing any previous child with the same name.
    pub fn set_child<S: Into<String>>(&mut self, name: S, child: MemoryNode) {
        let name = name.into();
        match self.children.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, existing)) => *existing = child,
            None => self.children.push((name, child)),
        }
    }

    /// Follow a `/`-separated path of child names.
    pub fn descendant(&self, path: &str) -> Option<&MemoryNode> {
        path.split('/')
            .filter(|segment| !segment.is_empty())
            .try_fold(self, |node, segment| {
                node.children
                    .iter()
                    .find(|(name, _)| name == segment)
                    .map(|(_, child)| child)
            })
    }
}

impl ConfigNode for MemoryNode {
    fn exists(&self) -> bool {
        self.exists
    }

    fn child_node(&self, name: &str) -> Option<&dyn ConfigNode> {
        self.children
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, child)| child as &dyn ConfigNode)
    }

    fn child_nodes(&self) -> Vec<(&str, &dyn ConfigNode)> {
        self.children
            .iter()
            .map(|(name, child)| (name.as_str(), child as &dyn ConfigNode))
            .collect()
    }

    fn properties(&self) -> Vec<&PropertyState> {
        self.properties.iter().collect()
    }
}

/// Fluent builder for [`MemoryNode`].
///
/// ```
/// use analyzer_compiler::node::{ConfigNode, MemoryNode};
///
/// let node = MemoryNode::builder()
///     .property("name", "Standard")
///     .child("filters", MemoryNode::builder().child("LowerCase", MemoryNode::new()).build())
///     .build();
///
/// assert_eq!(node.get_string("name").as_deref(), Some("Standard"));
/// assert!(node.has_child_node("filters"));
/// ```
#[derive(Debug, Default)]
pub struct MemoryNodeBuilder {
    node: MemoryNode,
}

impl MemoryNodeBuilder {
    pub fn new() -> Self {
        MemoryNodeBuilder {
            node: MemoryNode::new(),
        }
    }

    /// Add a property.
    pub fn property<S: Into<String>, V: Into<PropertyValue>>(mut self, name: S, value: V) -> Self {
        self.node.set_property(name, value);
        self
    }

    /// Add a multi-valued string property.
    pub fn strings<S: Into<String>>(mut self, name: S, values: &[&str]) -> Self {
        let values: Vec<String> = values.iter().map(|v| v.to_string()).collect();
        self.node.set_property(name, values);
        self
    }

    /// Add a child node.
    pub fn child<S: Into<String>>(mut self, name: S, child: MemoryNode) -> Self {
        self.node.set_child(name, child);
        self
    }

    /// Add a child resource node with the given text content.
    pub fn content<S: Into<String>>(mut self, name: S, text: &str) -> Self {
        self.node.set_child(name, MemoryNode::text_resource(text));
        self
    }

    pub fn build(self) -> MemoryNode {
        self.node
    }
}
