//! TOML tree loader (`.toml`).
//!
//! Tables become subtrees, arrays become subtrees indexed `0`, `1`, ...,
//! scalars keep their TOML text (strings unquoted).

use super::TreeLoader;
use crate::error::{ConfigError, ConfigResult};
use crate::tree::{ConfigTree, Node};

#[derive(Debug, Clone, Copy, Default)]
pub struct TomlLoader;

impl TreeLoader for TomlLoader {
    fn load(&self, source_id: &str, content: &str) -> ConfigResult<ConfigTree> {
        let table: ::toml::Table = ::toml::from_str(content).map_err(|e| {
            let line = e.span().map(|span| line_of(content, span.start));
            ConfigError::parse(source_id, line, e.message())
        })?;
        Ok(convert_table(table))
    }
}

fn convert_table(table: ::toml::Table) -> ConfigTree {
    let mut tree = ConfigTree::new();
    for (key, value) in table {
        // toml tables have unique keys
        let _ = tree.insert(key, convert_value(value));
    }
    tree
}

fn convert_value(value: ::toml::Value) -> Node {
    use ::toml::Value;
    match value {
        Value::String(s) => Node::Leaf(s),
        Value::Integer(i) => Node::Leaf(i.to_string()),
        Value::Float(f) => Node::Leaf(f.to_string()),
        Value::Boolean(b) => Node::Leaf(b.to_string()),
        Value::Datetime(dt) => Node::Leaf(dt.to_string()),
        Value::Array(items) => {
            let mut tree = ConfigTree::new();
            for (index, item) in items.into_iter().enumerate() {
                let _ = tree.insert(index.to_string(), convert_value(item));
            }
            Node::Tree(tree)
        }
        Value::Table(table) => Node::Tree(convert_table(table)),
    }
}

/// 1-based line containing byte offset `offset`.
pub(crate) fn line_of(content: &str, offset: usize) -> usize {
    let end = offset.min(content.len());
    content.as_bytes()[..end].iter().filter(|&&b| b == b'\n').count() + 1
}
