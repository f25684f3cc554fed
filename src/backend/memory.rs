//! In-memory, writable backend.
//!
//! Served from `memory:<name>` locators. Writes are copy-on-write: each
//! `put_string` publishes a new tree, readers keep whatever snapshot they
//! loaded.

use std::sync::Arc;

use arc_swap::ArcSwap;

use super::{Backend, Locator, OpenOptions, Scheme, Snapshot};
use crate::error::{ConfigError, ConfigResult};
use crate::tree::{ConfigTree, Node, PathResolver};

/// Writable backend holding its tree in memory.
#[derive(Debug)]
pub struct MemoryBackend {
    state: ArcSwap<Snapshot>,
    resolver: PathResolver,
}

impl MemoryBackend {
    /// Open an empty store under `locator` with default options.
    pub fn load(locator: &str) -> ConfigResult<Self> {
        Self::load_with(locator, OpenOptions::default())
    }

    pub fn load_with(locator: &str, options: OpenOptions) -> ConfigResult<Self> {
        Self::from_tree(locator, ConfigTree::new(), options.separator)
    }

    /// Seed a store with an existing tree.
    pub fn from_tree(locator: &str, tree: ConfigTree, separator: char) -> ConfigResult<Self> {
        let locator = parse_memory(locator)?;
        tracing::debug!(locator = %locator, entries = tree.len(), "Memory store opened");
        Ok(Self {
            state: ArcSwap::from_pointee(Snapshot::new(locator, tree)),
            resolver: PathResolver::new(separator),
        })
    }
}

impl Backend for MemoryBackend {
    fn get_string(&self, path: &str) -> Option<String> {
        let snapshot = self.state.load();
        self.resolver.leaf(&snapshot.tree, path).map(str::to_string)
    }

    fn put_string(&self, path: &str, value: &str) -> ConfigResult<()> {
        let segments: Vec<&str> = self.resolver.segments(path).collect();
        loop {
            let current = self.state.load_full();
            let mut tree = (*current.tree).clone();
            write_leaf(&mut tree, &segments, value).map_err(|_| ConfigError::PathConflict {
                path: path.to_string(),
            })?;

            let next = Arc::new(Snapshot {
                locator: current.locator.clone(),
                tree: Arc::new(tree),
            });
            let previous = self.state.compare_and_swap(&current, next);
            if Arc::ptr_eq(&previous, &current) {
                return Ok(());
            }
            // lost a race with another writer; retry on the newer tree
        }
    }

    fn set_prefix(&self, locator: &str) -> ConfigResult<()> {
        let locator = parse_memory(locator)?;
        tracing::info!(locator = %locator, "Memory store re-pointed");
        self.state.store(Arc::new(Snapshot::new(locator, ConfigTree::new())));
        Ok(())
    }

    fn locator(&self) -> String {
        self.state.load().locator.to_string()
    }

    fn separator(&self) -> char {
        self.resolver.separator()
    }

    fn snapshot(&self) -> Arc<ConfigTree> {
        self.state.load().tree.clone()
    }
}

fn parse_memory(raw: &str) -> ConfigResult<Locator> {
    let locator = Locator::parse(raw)?;
    if locator.scheme() != Scheme::Memory {
        return Err(ConfigError::invalid_locator(raw, "memory backend only serves memory: locators"));
    }
    Ok(locator)
}

/// Set the leaf at `segments`, creating intermediate subtrees.
fn write_leaf(tree: &mut ConfigTree, segments: &[&str], value: &str) -> Result<(), ()> {
    let Some((last, parents)) = segments.split_last() else {
        return Err(());
    };

    let mut current = tree;
    for segment in parents {
        if !current.contains(segment) {
            let _ = current.insert(*segment, Node::Tree(ConfigTree::new()));
        }
        current = match current.get_mut(segment) {
            Some(Node::Tree(child)) => child,
            _ => return Err(()),
        };
    }

    match current.get_mut(last) {
        Some(Node::Leaf(existing)) => {
            *existing = value.to_string();
            Ok(())
        }
        Some(Node::Tree(_)) => Err(()),
        None => current.insert_leaf(*last, value).map_err(|_| ()),
    }
}
