//! Path resolution.
//!
//! # Responsibilities
//! - Split a path string into segments on a single separator character
//! - Walk a [`ConfigTree`] segment by segment from the root
//! - Report absence as `None`, never as an error
//!
//! # Design Decisions
//! - Empty segments (`a..b`, leading or trailing separator) are real segment
//!   names, not skipped
//! - Only leaves produce values; a path ending on a subtree is absent
//! - The separator belongs to the resolver, not to individual calls

use super::{ConfigTree, Node};

/// Separator used when none is configured.
pub const DEFAULT_SEPARATOR: char = '.';

/// Resolves separator-joined paths against a [`ConfigTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathResolver {
    separator: char,
}

impl PathResolver {
    pub fn new(separator: char) -> Self {
        Self { separator }
    }

    pub fn separator(&self) -> char {
        self.separator
    }

    /// Split `path` into its segments.
    pub fn segments<'p>(&self, path: &'p str) -> impl Iterator<Item = &'p str> {
        path.split(self.separator)
    }

    /// Locate the node addressed by `path`, leaf or subtree.
    pub fn resolve<'t>(&self, tree: &'t ConfigTree, path: &str) -> Option<&'t Node> {
        let mut segments = self.segments(path);
        // split always yields at least one segment
        let mut node = tree.get(segments.next()?)?;
        for segment in segments {
            node = node.as_tree()?.get(segment)?;
        }
        Some(node)
    }

    /// Locate the leaf value addressed by `path`.
    pub fn leaf<'t>(&self, tree: &'t ConfigTree, path: &str) -> Option<&'t str> {
        self.resolve(tree, path).and_then(Node::as_leaf)
    }
}

impl Default for PathResolver {
    fn default() -> Self {
        Self::new(DEFAULT_SEPARATOR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree() -> ConfigTree {
        let mut sec = ConfigTree::new();
        sec.insert_leaf("key", "value1").unwrap();
        sec.insert_leaf("", "blank-name").unwrap();
        sec.insert_leaf("dotted.key", "raw").unwrap();

        let mut root = ConfigTree::new();
        root.insert("sec", Node::Tree(sec)).unwrap();
        root.insert_leaf("top", "level").unwrap();
        root
    }

    #[test]
    fn test_resolves_nested_leaf() {
        let resolver = PathResolver::default();
        assert_eq!(resolver.leaf(&tree(), "sec.key"), Some("value1"));
        assert_eq!(resolver.leaf(&tree(), "top"), Some("level"));
    }

    #[test]
    fn test_subtree_is_absent() {
        let resolver = PathResolver::default();
        let tree = tree();
        assert!(resolver.resolve(&tree, "sec").is_some());
        assert_eq!(resolver.leaf(&tree, "sec"), None);
    }

    #[test]
    fn test_missing_segments_are_absent() {
        let resolver = PathResolver::default();
        let tree = tree();
        assert_eq!(resolver.leaf(&tree, "sec.missing"), None);
        assert_eq!(resolver.leaf(&tree, "nope.key"), None);
        // descending through a leaf
        assert_eq!(resolver.leaf(&tree, "top.deeper"), None);
        assert_eq!(resolver.leaf(&tree, ""), None);
    }

    #[test]
    fn test_empty_segments_are_names() {
        let resolver = PathResolver::default();
        let segments: Vec<_> = resolver.segments("a..b.").collect();
        assert_eq!(segments, vec!["a", "", "b", ""]);

        assert_eq!(resolver.leaf(&tree(), "sec."), Some("blank-name"));
        assert_eq!(resolver.leaf(&tree(), "sec..key"), None);
    }

    #[test]
    fn test_custom_separator() {
        let resolver = PathResolver::new('/');
        let tree = tree();
        assert_eq!(resolver.leaf(&tree, "sec/key"), Some("value1"));
        assert_eq!(resolver.leaf(&tree, "sec/dotted.key"), Some("raw"));
        assert_eq!(resolver.leaf(&tree, "sec.key"), None);
    }
}
