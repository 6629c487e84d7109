//! Read-only configuration tree abstraction.
//!
//! The compiler never owns the tree it reads. The repository layer hands it a
//! [`ConfigNode`] and the compiler borrows it for the duration of one call.
//! Binary property values are exposed through the [`Blob`] trait so content
//! blocks can be streamed from wherever the repository keeps them.

use std::fmt;
use std::io::Read;
use std::sync::Arc;

pub mod file;
pub mod json;
pub mod memory;

pub use file::FileBlob;
pub use memory::{MemoryBlob, MemoryNode, MemoryNodeBuilder};

/// Binary content stored in the repository.
pub trait Blob: Send + Sync + fmt::Debug {
    /// Open a fresh stream over the content. Every call starts from the beginning.
    fn new_stream(&self) -> std::io::Result<Box<dyn Read + '_>>;

    /// Length of the content in bytes, if known without reading it.
    fn length(&self) -> Option<u64> {
        None
    }
}

/// Declared type of a property.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyType {
    String,
    Long,
    Double,
    Boolean,
    Binary,
}

/// Value of a property.
#[derive(Debug, Clone)]
pub enum PropertyValue {
    String(String),
    Long(i64),
    Double(f64),
    Boolean(bool),
    /// Multi-valued string property.
    Strings(Vec<String>),
    Binary(Arc<dyn Blob>),
}

impl PropertyValue {
    /// Declared type of the value. Arrays report the type of their elements.
    pub fn property_type(&self) -> PropertyType {
        match self {
            PropertyValue::String(_) | PropertyValue::Strings(_) => PropertyType::String,
            PropertyValue::Long(_) => PropertyType::Long,
            PropertyValue::Double(_) => PropertyType::Double,
            PropertyValue::Boolean(_) => PropertyType::Boolean,
            PropertyValue::Binary(_) => PropertyType::Binary,
        }
    }

    /// Whether this is a multi-valued property.
    pub fn is_array(&self) -> bool {
        matches!(self, PropertyValue::Strings(_))
    }

    /// String form of a single-valued, non-binary property.
    pub fn as_string(&self) -> Option<String> {
        match self {
            PropertyValue::String(value) => Some(value.clone()),
            PropertyValue::Long(value) => Some(value.to_string()),
            PropertyValue::Double(value) => Some(value.to_string()),
            PropertyValue::Boolean(value) => Some(value.to_string()),
            PropertyValue::Strings(_) | PropertyValue::Binary(_) => None,
        }
    }

    /// The blob behind a binary property.
    pub fn as_blob(&self) -> Option<&Arc<dyn Blob>> {
        match self {
            PropertyValue::Binary(blob) => Some(blob),
            _ => None,
        }
    }
}

impl From<&str> for PropertyValue {
    fn from(value: &str) -> Self {
        PropertyValue::String(value.to_string())
    }
}

impl From<String> for PropertyValue {
    fn from(value: String) -> Self {
        PropertyValue::String(value)
    }
}

impl From<i64> for PropertyValue {
    fn from(value: i64) -> Self {
        PropertyValue::Long(value)
    }
}

impl From<f64> for PropertyValue {
    fn from(value: f64) -> Self {
        PropertyValue::Double(value)
    }
}

impl From<bool> for PropertyValue {
    fn from(value: bool) -> Self {
        PropertyValue::Boolean(value)
    }
}

impl From<Vec<String>> for PropertyValue {
    fn from(values: Vec<String>) -> Self {
        PropertyValue::Strings(values)
    }
}

/// A named property on a node.
#[derive(Debug, Clone)]
pub struct PropertyState {
    name: String,
    value: PropertyValue,
}

impl PropertyState {
    pub fn new<S: Into<String>, V: Into<PropertyValue>>(name: S, value: V) -> Self {
        PropertyState {
            name: name.into(),
            value: value.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &PropertyValue {
        &self.value
    }

    /// Hidden properties are internal to the repository and start with `:`.
    pub fn is_hidden(&self) -> bool {
        self.name.starts_with(':')
    }
}

/// A node of the configuration tree.
///
/// Children keep their insertion order; the compiler relies on it to preserve
/// the declaration order of filter stages.
pub trait ConfigNode: fmt::Debug {
    /// Whether this node exists in the repository.
    fn exists(&self) -> bool {
        true
    }

    /// Look up a direct child by name.
    fn child_node(&self, name: &str) -> Option<&dyn ConfigNode>;

    /// All direct children in declaration order.
    fn child_nodes(&self) -> Vec<(&str, &dyn ConfigNode)>;

    /// All properties of this node.
    fn properties(&self) -> Vec<&PropertyState>;

    /// Look up a property by name.
    fn property(&self, name: &str) -> Option<&PropertyState> {
        self.properties()
            .into_iter()
            .find(|property| property.name() == name)
    }

    /// String value of a single-valued property.
    fn get_string(&self, name: &str) -> Option<String> {
        self.property(name)
            .and_then(|property| property.value().as_string())
    }

    /// Whether an existing child with the given name is present.
    fn has_child_node(&self, name: &str) -> bool {
        self.child_node(name).is_some_and(|child| child.exists())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_string_forms() {
        assert_eq!(PropertyValue::from(42_i64).as_string().as_deref(), Some("42"));
        assert_eq!(PropertyValue::from(true).as_string().as_deref(), Some("true"));
        assert_eq!(PropertyValue::from(0.5).as_string().as_deref(), Some("0.5"));
        assert!(
            PropertyValue::from(vec!["a".to_string()])
                .as_string()
                .is_none()
        );
    }

    #[test]
    fn test_array_and_binary_types() {
        let array = PropertyValue::from(vec!["a".to_string(), "b".to_string()]);
        assert!(array.is_array());
        assert_eq!(array.property_type(), PropertyType::String);

        let binary = PropertyValue::Binary(Arc::new(MemoryBlob::from("x")));
        assert!(!binary.is_array());
        assert_eq!(binary.property_type(), PropertyType::Binary);
        assert!(binary.as_blob().is_some());
        assert!(binary.as_string().is_none());
    }

    #[test]
    fn test_hidden_property() {
        assert!(PropertyState::new(":childOrder", "a,b").is_hidden());
        assert!(!PropertyState::new("words", "a,b").is_hidden());
    }
}
