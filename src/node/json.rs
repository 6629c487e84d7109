//! Loading configuration trees from JSON documents.
//!
//! The document maps onto a tree as follows:
//!
//! - a JSON object is a child node, members keep their document order
//! - strings, numbers and booleans are single-valued properties
//! - arrays of scalars are multi-valued string properties
//! - a `jcr:data` member is a binary property: a string is taken as inline
//!   UTF-8 content, `{"file": "words.txt"}` points at a file resolved against
//!   the directory of the document
//!
//! ```json
//! {
//!   "default": {
//!     "tokenizer": { "name": "Standard" },
//!     "filters": {
//!       "Stop": {
//!         "words": "stop.txt",
//!         "stop.txt": { "jcr:content": { "jcr:data": { "file": "stop.txt" } } }
//!       }
//!     }
//!   }
//! }
//! ```

use std::fs;
use std::path::Path;
use std::sync::Arc;

use log::debug;
use serde_json::{Map, Value};

use crate::error::{AnalyzerError, Result};
use crate::node::file::FileBlob;
use crate::node::memory::{DATA_PROPERTY, MemoryBlob, MemoryNode};
use crate::node::{Blob, PropertyValue};

/// Load a tree from a JSON file. Relative blob paths resolve against the
/// file's directory.
pub fn load_tree<P: AsRef<Path>>(path: P) -> Result<MemoryNode> {
    let path = path.as_ref();
    debug!("Loading configuration tree from {}", path.display());

    let content = fs::read_to_string(path)?;
    let value: Value = serde_json::from_str(&content)?;
    parse_tree(&value, path.parent())
}

/// Build a tree from an already parsed JSON value.
pub fn parse_tree(value: &Value, base_dir: Option<&Path>) -> Result<MemoryNode> {
    match value {
        Value::Object(members) => parse_node(members, base_dir, ""),
        other => Err(AnalyzerError::configuration(format!(
            "Expected a JSON object at the root of the tree, found {}",
            json_kind(other)
        ))),
    }
}

fn parse_node(members: &Map<String, Value>, base_dir: Option<&Path>, path: &str) -> Result<MemoryNode> {
    let mut node = MemoryNode::new();

    for (name, value) in members {
        let member_path = format!("{path}/{name}");

        if name == DATA_PROPERTY {
            let blob = parse_blob(value, base_dir, &member_path)?;
            node.set_property(name.as_str(), PropertyValue::Binary(blob));
            continue;
        }

        match value {
            Value::Object(children) => {
                node.set_child(name.as_str(), parse_node(children, base_dir, &member_path)?);
            }
            Value::Array(items) => {
                let values = items
                    .iter()
                    .map(|item| {
                        scalar_to_string(item).ok_or_else(|| {
                            AnalyzerError::configuration(format!(
                                "Array property {member_path} may only contain scalars, found {}",
                                json_kind(item)
                            ))
                        })
                    })
                    .collect::<Result<Vec<String>>>()?;
                node.set_property(name.as_str(), values);
            }
            Value::Null => {
                return Err(AnalyzerError::configuration(format!(
                    "Property {member_path} has a null value"
                )));
            }
            scalar => node.set_property(name.as_str(), scalar_value(scalar)),
        }
    }

    Ok(node)
}

fn parse_blob(value: &Value, base_dir: Option<&Path>, path: &str) -> Result<Arc<dyn Blob>> {
    match value {
        Value::String(text) => Ok(Arc::new(MemoryBlob::from(text.as_str()))),
        Value::Object(members) => match members.get("file") {
            Some(Value::String(file)) => {
                let resolved = match base_dir {
                    Some(dir) => dir.join(file),
                    None => Path::new(file).to_path_buf(),
                };
                Ok(Arc::new(FileBlob::new(resolved)))
            }
            _ => Err(AnalyzerError::configuration(format!(
                "Binary property {path} must be a string or an object with a \"file\" member"
            ))),
        },
        other => Err(AnalyzerError::configuration(format!(
            "Binary property {path} must be a string or an object, found {}",
            json_kind(other)
        ))),
    }
}

fn scalar_value(value: &Value) -> PropertyValue {
    match value {
        Value::Bool(flag) => PropertyValue::Boolean(*flag),
        Value::Number(number) => match number.as_i64() {
            Some(long) => PropertyValue::Long(long),
            None => PropertyValue::Double(number.as_f64().unwrap_or(f64::NAN)),
        },
        other => PropertyValue::String(scalar_to_string(other).unwrap_or_default()),
    }
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        _ => None,
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
