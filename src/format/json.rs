//! JSON tree loader (`.json`).

use serde_json::Value;

use super::TreeLoader;
use crate::error::{ConfigError, ConfigResult};
use crate::tree::{ConfigTree, Node};

#[derive(Debug, Clone, Copy, Default)]
pub struct JsonLoader;

impl TreeLoader for JsonLoader {
    fn load(&self, source_id: &str, content: &str) -> ConfigResult<ConfigTree> {
        let value: Value = serde_json::from_str(content)
            .map_err(|e| ConfigError::parse(source_id, Some(e.line()), e.to_string()))?;

        match value {
            Value::Object(map) => Ok(convert_object(map)),
            _ => Err(ConfigError::parse(
                source_id,
                None,
                "top-level value must be an object",
            )),
        }
    }
}

fn convert_object(map: serde_json::Map<String, Value>) -> ConfigTree {
    let mut tree = ConfigTree::new();
    for (key, item) in map {
        if let Some(node) = convert(item) {
            let _ = tree.insert(key, node);
        }
    }
    tree
}

/// `null` converts to nothing and is dropped from its parent.
fn convert(value: Value) -> Option<Node> {
    let node = match value {
        Value::Null => return None,
        Value::String(s) => Node::Leaf(s),
        Value::Bool(b) => Node::Leaf(b.to_string()),
        Value::Number(n) => Node::Leaf(n.to_string()),
        Value::Array(items) => {
            let mut tree = ConfigTree::new();
            for (index, item) in items.into_iter().enumerate() {
                if let Some(node) = convert(item) {
                    let _ = tree.insert(index.to_string(), node);
                }
            }
            Node::Tree(tree)
        }
        Value::Object(map) => Node::Tree(convert_object(map)),
    };
    Some(node)
}
