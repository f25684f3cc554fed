//! INI tree loader (`.ini`, `.cfg`).
//!
//! # Grammar
//! - Blank lines and lines starting with `;` or `#` are ignored
//! - `[section]` opens a section; sections do not nest, text after `]`
//!   is ignored
//! - `key=value` splits on the first `=`, both sides trimmed
//! - Keys before the first section are top-level leaves
//!
//! Duplicate sections and duplicate keys within a scope are parse errors.

use super::TreeLoader;
use crate::error::{ConfigError, ConfigResult};
use crate::tree::{ConfigTree, Node};

/// Loader for INI-style content.
#[derive(Debug, Clone, Copy, Default)]
pub struct IniLoader;

impl TreeLoader for IniLoader {
    fn load(&self, source_id: &str, content: &str) -> ConfigResult<ConfigTree> {
        let mut root = ConfigTree::new();
        // Section currently being filled; flushed into root when the next
        // header starts so sibling order follows the file.
        let mut section: Option<(String, ConfigTree)> = None;

        for (index, raw_line) in content.lines().enumerate() {
            let line_no = index + 1;
            let err = |message: &str| ConfigError::parse(source_id, Some(line_no), message);
            let line = raw_line.trim();

            if line.is_empty() || line.starts_with(';') || line.starts_with('#') {
                continue;
            }

            if let Some(header) = line.strip_prefix('[') {
                // anything after the closing bracket is ignored
                let (name, _) = header.split_once(']').ok_or_else(|| err("unmatched '['"))?;
                let name = name.trim();
                if let Some((done, tree)) = section.take() {
                    flush(&mut root, done, tree).map_err(|_| err("duplicate section name"))?;
                }
                if root.contains(name) {
                    return Err(err("duplicate section name"));
                }
                section = Some((name.to_string(), ConfigTree::new()));
                continue;
            }

            let (key, value) = line
                .split_once('=')
                .ok_or_else(|| err("'=' character not found in line"))?;
            let key = key.trim();
            if key.is_empty() {
                return Err(err("key expected"));
            }

            let scope = match section.as_mut() {
                Some((_, tree)) => tree,
                None => &mut root,
            };
            scope
                .insert_leaf(key, value.trim())
                .map_err(|_| err("duplicate key name"))?;
        }

        if let Some((name, tree)) = section {
            flush(&mut root, name, tree)
                .map_err(|_| ConfigError::parse(source_id, None, "duplicate section name"))?;
        }

        tracing::debug!(source = source_id, entries = root.len(), "Parsed INI source");
        Ok(root)
    }
}

fn flush(root: &mut ConfigTree, name: String, tree: ConfigTree) -> Result<(), Node> {
    root.insert(name, Node::Tree(tree))
}
