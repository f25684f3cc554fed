//! Format dispatch.
//!
//! # Responsibilities
//! - Hold the table of (suffix → tree loader) pairs
//! - Pick the loader for a locator by exact suffix match
//!
//! # Design Decisions
//! - Fixed trial order: first match wins, later registrations never shadow
//!   earlier ones
//! - Loaders parse text only; reading the source is the backend's job
//! - No match is `UnsupportedFormat`, distinct from a bad locator and from a
//!   parse failure

pub mod ini;
pub mod json;
pub mod toml;

use std::sync::Arc;

use crate::error::ConfigResult;
use crate::tree::ConfigTree;

/// Parses source text into a [`ConfigTree`].
pub trait TreeLoader: Send + Sync + std::fmt::Debug {
    /// Parse `content`. `source_id` identifies the source in parse errors.
    fn load(&self, source_id: &str, content: &str) -> ConfigResult<ConfigTree>;
}

/// Ordered table of suffix → loader pairs.
#[derive(Debug, Clone)]
pub struct FormatRegistry {
    entries: Vec<(String, Arc<dyn TreeLoader>)>,
}

impl FormatRegistry {
    /// A registry with no loaders.
    pub fn empty() -> Self {
        Self { entries: Vec::new() }
    }

    /// Append a loader for `suffix` after all existing entries.
    pub fn register(&mut self, suffix: impl Into<String>, loader: Arc<dyn TreeLoader>) -> &mut Self {
        self.entries.push((suffix.into(), loader));
        self
    }

    /// Find the first loader whose suffix `path` ends with.
    pub fn loader_for(&self, path: &str) -> Option<&dyn TreeLoader> {
        self.entries
            .iter()
            .find(|(suffix, _)| path.ends_with(suffix.as_str()))
            .map(|(_, loader)| loader.as_ref())
    }

    /// Registered suffixes in trial order.
    pub fn suffixes(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(suffix, _)| suffix.as_str())
    }
}

impl Default for FormatRegistry {
    /// `.ini` and `.cfg` (INI), then `.toml` and `.json`.
    fn default() -> Self {
        let ini: Arc<dyn TreeLoader> = Arc::new(ini::IniLoader);
        let mut registry = Self::empty();
        registry
            .register(".ini", ini.clone())
            .register(".cfg", ini)
            .register(".toml", Arc::new(toml::TomlLoader))
            .register(".json", Arc::new(json::JsonLoader));
        registry
    }
}
