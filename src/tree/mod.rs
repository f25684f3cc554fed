//! Hierarchical configuration tree.
//!
//! # Data Flow
//! ```text
//! source text
//!     → format loader (ini / toml / json)
//!     → ConfigTree (built once, immutable once published)
//!     → shared via Arc by the owning backend snapshot
//!     → path.rs walks it for lookups
//! ```
//!
//! # Design Decisions
//! - Children keep insertion order (mirrors the section order of the source)
//! - Sibling names are unique; inserting an existing name is rejected
//! - Leaves are always strings; typing happens at the accessor layer

pub mod path;

pub use path::PathResolver;

use serde::ser::{Serialize, SerializeMap, Serializer};

/// A node in the configuration tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// Scalar value.
    Leaf(String),
    /// Nested section.
    Tree(ConfigTree),
}

impl Node {
    /// Returns the leaf value, or `None` for a subtree.
    pub fn as_leaf(&self) -> Option<&str> {
        match self {
            Node::Leaf(value) => Some(value),
            Node::Tree(_) => None,
        }
    }

    /// Returns the subtree, or `None` for a leaf.
    pub fn as_tree(&self) -> Option<&ConfigTree> {
        match self {
            Node::Leaf(_) => None,
            Node::Tree(tree) => Some(tree),
        }
    }
}

/// Ordered mapping from segment name to [`Node`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigTree {
    children: Vec<(String, Node)>,
}

impl ConfigTree {
    /// Create an empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Number of direct children.
    pub fn len(&self) -> usize {
        self.children.len()
    }

    /// Look up a direct child by segment name.
    pub fn get(&self, name: &str) -> Option<&Node> {
        self.children
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, node)| node)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Node> {
        self.children
            .iter_mut()
            .find(|(key, _)| key == name)
            .map(|(_, node)| node)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Append a child. Returns the node back if the name is already taken.
    pub fn insert(&mut self, name: impl Into<String>, node: Node) -> Result<(), Node> {
        let name = name.into();
        if self.contains(&name) {
            return Err(node);
        }
        self.children.push((name, node));
        Ok(())
    }

    /// Append a leaf child.
    pub fn insert_leaf(
        &mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<(), Node> {
        self.insert(name, Node::Leaf(value.into()))
    }

    /// Iterate direct children in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Node)> {
        self.children.iter().map(|(key, node)| (key.as_str(), node))
    }

    /// Flatten every leaf into `(path, value)` pairs, depth-first in
    /// insertion order, joining segments with `separator`.
    pub fn leaves(&self, separator: char) -> Vec<(String, String)> {
        let mut out = Vec::new();
        self.collect_leaves(&mut String::new(), separator, &mut out);
        out
    }

    fn collect_leaves(&self, prefix: &mut String, separator: char, out: &mut Vec<(String, String)>) {
        for (key, node) in &self.children {
            let mark = prefix.len();
            if mark > 0 {
                prefix.push(separator);
            }
            prefix.push_str(key);
            match node {
                Node::Leaf(value) => out.push((prefix.clone(), value.clone())),
                Node::Tree(tree) => tree.collect_leaves(prefix, separator, out),
            }
            prefix.truncate(mark);
        }
    }
}

impl Serialize for Node {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Node::Leaf(value) => serializer.serialize_str(value),
            Node::Tree(tree) => tree.serialize(serializer),
        }
    }
}

impl Serialize for ConfigTree {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.children.len()))?;
        for (key, node) in &self.children {
            map.serialize_entry(key, node)?;
        }
        map.end()
    }
}
