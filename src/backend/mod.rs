//! Configuration backends.
//!
//! # Data Flow
//! ```text
//! locator string
//!     → locator.rs (scheme + path)
//!     → open() picks FileBackend / MemoryBackend by scheme
//!     → format registry picks the tree loader by suffix
//!     → Snapshot { locator, tree } published through ArcSwap
//!
//! get_string(path):
//!     → load current snapshot (lock-free)
//!     → PathResolver walks the tree
//!     → Some(leaf) or None
//!
//! set_prefix(new locator):
//!     → build a complete new snapshot
//!     → atomic swap only on success
//!     → previous snapshot stays live on failure
//! ```
//!
//! # Design Decisions
//! - Absence is `None`, never an error
//! - Read-only backends reject writes with `UnsupportedOperation`
//! - Separator is fixed per backend instance

pub mod ext;
pub mod file;
pub mod locator;
pub mod memory;
pub mod watcher;

pub use ext::BackendExt;
pub use file::FileBackend;
pub use locator::{Locator, Scheme};
pub use memory::MemoryBackend;
pub use watcher::{ReloadOutcome, SourceWatcher};

use std::sync::Arc;

use crate::error::ConfigResult;
use crate::format::FormatRegistry;
use crate::tree::path::DEFAULT_SEPARATOR;
use crate::tree::ConfigTree;

/// Uniform access to hierarchical configuration.
pub trait Backend: Send + Sync + std::fmt::Debug {
    /// Leaf value at `path`, or `None` if any segment is missing or the
    /// path ends on a subtree.
    fn get_string(&self, path: &str) -> Option<String>;

    /// Store `value` at `path`.
    fn put_string(&self, path: &str, value: &str) -> ConfigResult<()>;

    /// Re-point the backend at `locator` and reload synchronously.
    ///
    /// On failure the previous source stays loaded and queryable.
    fn set_prefix(&self, locator: &str) -> ConfigResult<()>;

    /// Locator of the currently loaded source.
    fn locator(&self) -> String;

    /// Separator used to split paths.
    fn separator(&self) -> char;

    /// The currently loaded tree.
    fn snapshot(&self) -> Arc<ConfigTree>;
}

/// Options applied when opening a backend.
#[derive(Debug, Clone)]
pub struct OpenOptions {
    /// Path separator (default `.`).
    pub separator: char,

    /// Suffix → loader table.
    pub formats: Arc<FormatRegistry>,
}

impl OpenOptions {
    pub fn with_separator(mut self, separator: char) -> Self {
        self.separator = separator;
        self
    }

    pub fn with_formats(mut self, formats: FormatRegistry) -> Self {
        self.formats = Arc::new(formats);
        self
    }
}

impl Default for OpenOptions {
    fn default() -> Self {
        Self {
            separator: DEFAULT_SEPARATOR,
            formats: Arc::new(FormatRegistry::default()),
        }
    }
}

/// Open the backend selected by the locator scheme with default options.
pub fn open(locator: &str) -> ConfigResult<Box<dyn Backend>> {
    open_with(locator, OpenOptions::default())
}

/// Open the backend selected by the locator scheme.
pub fn open_with(locator: &str, options: OpenOptions) -> ConfigResult<Box<dyn Backend>> {
    let parsed = Locator::parse(locator)?;
    let backend: Box<dyn Backend> = match parsed.scheme() {
        Scheme::File => Box::new(FileBackend::load_with(locator, options)?),
        Scheme::Memory => Box::new(MemoryBackend::load_with(locator, options)?),
    };
    Ok(backend)
}

/// Locator and tree published together.
#[derive(Debug)]
pub(crate) struct Snapshot {
    pub(crate) locator: Locator,
    pub(crate) tree: Arc<ConfigTree>,
}

impl Snapshot {
    pub(crate) fn new(locator: Locator, tree: ConfigTree) -> Self {
        Self {
            locator,
            tree: Arc::new(tree),
        }
    }
}
