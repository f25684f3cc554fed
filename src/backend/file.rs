//! File-backed, read-only backend.
//!
//! # Responsibilities
//! - Read the file named by a `file:` (or bare) locator
//! - Dispatch to the tree loader registered for its suffix
//! - Serve lookups from the published snapshot
//! - Re-point and reload on `set_prefix` / `reload`

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use arc_swap::ArcSwap;

use super::{Backend, Locator, OpenOptions, Scheme, Snapshot};
use crate::error::{ConfigError, ConfigResult};
use crate::format::FormatRegistry;
use crate::tree::{ConfigTree, PathResolver};

/// Read-only backend over a configuration file.
#[derive(Debug)]
pub struct FileBackend {
    state: ArcSwap<Snapshot>,
    resolver: PathResolver,
    formats: Arc<FormatRegistry>,
}

impl FileBackend {
    /// Load `locator` with default options.
    pub fn load(locator: &str) -> ConfigResult<Self> {
        Self::load_with(locator, OpenOptions::default())
    }

    /// Load `locator`, failing fast if it cannot be read or parsed.
    pub fn load_with(locator: &str, options: OpenOptions) -> ConfigResult<Self> {
        let snapshot = read_source(&options.formats, locator)?;
        tracing::info!(
            locator = %snapshot.locator,
            entries = snapshot.tree.len(),
            "Configuration loaded"
        );
        Ok(Self {
            state: ArcSwap::from_pointee(snapshot),
            resolver: PathResolver::new(options.separator),
            formats: options.formats,
        })
    }

    /// Re-read the current source.
    ///
    /// If a `set_prefix` lands while the source is being read, the re-pointed
    /// snapshot wins and the reloaded one is discarded.
    pub fn reload(&self) -> ConfigResult<()> {
        let current = self.state.load_full();
        let snapshot = read_source(&self.formats, current.locator.as_str()).map_err(|e| {
            tracing::warn!(
                locator = %current.locator,
                error = %e,
                "Failed to reload configuration. Keeping current source."
            );
            e
        })?;

        let entries = snapshot.tree.len();
        if self.publish_if_current(&current, snapshot) {
            tracing::info!(locator = %current.locator, entries, "Configuration reloaded");
        } else {
            tracing::debug!(locator = %current.locator, "Reload superseded by set_prefix");
        }
        Ok(())
    }

    /// Publish `next` only if `expected` is still the live snapshot.
    fn publish_if_current(&self, expected: &Arc<Snapshot>, next: Snapshot) -> bool {
        let previous = self.state.compare_and_swap(expected, Arc::new(next));
        Arc::ptr_eq(&previous, expected)
    }

    /// Filesystem path of the current source.
    pub fn source_path(&self) -> PathBuf {
        PathBuf::from(self.state.load().locator.path())
    }
}

impl Backend for FileBackend {
    fn get_string(&self, path: &str) -> Option<String> {
        let snapshot = self.state.load();
        self.resolver.leaf(&snapshot.tree, path).map(str::to_string)
    }

    fn put_string(&self, _path: &str, _value: &str) -> ConfigResult<()> {
        Err(ConfigError::UnsupportedOperation {
            backend: "file",
            operation: "putting values",
        })
    }

    fn set_prefix(&self, locator: &str) -> ConfigResult<()> {
        match read_source(&self.formats, locator) {
            Ok(snapshot) => {
                tracing::info!(
                    locator = %snapshot.locator,
                    entries = snapshot.tree.len(),
                    "Configuration reloaded"
                );
                self.state.store(Arc::new(snapshot));
                Ok(())
            }
            Err(e) => {
                tracing::warn!(
                    locator,
                    error = %e,
                    "Failed to reload configuration. Keeping current source."
                );
                Err(e)
            }
        }
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

/// Resolve, read and parse a file locator into a complete snapshot.
fn read_source(formats: &FormatRegistry, raw: &str) -> ConfigResult<Snapshot> {
    let locator = Locator::parse(raw)?;
    if locator.scheme() != Scheme::File {
        return Err(ConfigError::invalid_locator(raw, "file backend only serves file locators"));
    }

    let loader = formats
        .loader_for(locator.path())
        .ok_or_else(|| ConfigError::UnsupportedFormat {
            locator: raw.to_string(),
        })?;
    tracing::debug!(locator = raw, "Format loader selected");

    let content = fs::read_to_string(locator.path()).map_err(|source| ConfigError::Io {
        source_id: locator.path().to_string(),
        source,
    })?;
    let tree = loader.load(locator.path(), &content)?;

    Ok(Snapshot::new(locator, tree))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use tempfile::TempDir;

    fn write(dir: &Path, name: &str, content: &str) -> String {
        let path = dir.join(name);
        fs::write(&path, content).unwrap();
        format!("file:{}", path.display())
    }

    #[test]
    fn test_load_and_query() {
        let temp = TempDir::new().unwrap();
        let locator = write(temp.path(), "a.ini", "[sec]\nkey=value1\n");

        let backend = FileBackend::load(&locator).unwrap();
        assert_eq!(backend.get_string("sec.key").as_deref(), Some("value1"));
        assert_eq!(backend.get_string("sec"), None);
        assert_eq!(backend.get_string("sec.missing"), None);
        assert_eq!(backend.locator(), locator);
    }

    #[test]
    fn test_put_is_rejected() {
        let temp = TempDir::new().unwrap();
        let locator = write(temp.path(), "a.cfg", "[sec]\nkey=value1\n");
        let backend = FileBackend::load(&locator).unwrap();

        for path in ["sec.key", "sec.new", "", "no.such.path"] {
            assert!(matches!(
                backend.put_string(path, "x"),
                Err(ConfigError::UnsupportedOperation { backend: "file", .. })
            ));
        }
        assert_eq!(backend.get_string("sec.key").as_deref(), Some("value1"));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let temp = TempDir::new().unwrap();
        let locator = format!("file:{}", temp.path().join("absent.ini").display());
        assert!(matches!(FileBackend::load(&locator), Err(ConfigError::Io { .. })));
    }

    #[test]
    fn test_memory_locator_is_rejected() {
        assert!(matches!(
            FileBackend::load("memory:scratch"),
            Err(ConfigError::InvalidLocator { .. })
        ));
    }

    #[test]
    fn test_reload_picks_up_changes() {
        let temp = TempDir::new().unwrap();
        let locator = write(temp.path(), "a.ini", "[sec]\nkey=before\n");
        let backend = FileBackend::load(&locator).unwrap();

        write(temp.path(), "a.ini", "[sec]\nkey=after\n");
        backend.reload().unwrap();
        assert_eq!(backend.get_string("sec.key").as_deref(), Some("after"));
    }

    #[test]
    fn test_failed_reload_keeps_tree() {
        let temp = TempDir::new().unwrap();
        let locator = write(temp.path(), "a.ini", "[sec]\nkey=before\n");
        let backend = FileBackend::load(&locator).unwrap();

        write(temp.path(), "a.ini", "[sec\nkey=after\n");
        assert!(matches!(backend.reload(), Err(ConfigError::Parse { .. })));
        assert_eq!(backend.get_string("sec.key").as_deref(), Some("before"));
        assert_eq!(backend.locator(), locator);
    }

    #[test]
    fn test_reload_does_not_undo_set_prefix() {
        let temp = TempDir::new().unwrap();
        let a = write(temp.path(), "a.ini", "[sec]\nkey=a\n");
        let b = write(temp.path(), "b.ini", "[sec]\nkey=b\n");
        let backend = FileBackend::load(&a).unwrap();

        // reload has read `a` when set_prefix re-points to `b`
        let seen = backend.state.load_full();
        let reread = read_source(&backend.formats, &a).unwrap();
        backend.set_prefix(&b).unwrap();

        assert!(!backend.publish_if_current(&seen, reread));
        assert_eq!(backend.get_string("sec.key").as_deref(), Some("b"));
        assert_eq!(backend.locator(), b);
    }

    #[test]
    fn test_source_path_strips_scheme() {
        let temp = TempDir::new().unwrap();
        let locator = write(temp.path(), "a.toml", "k = 1\n");
        let backend = FileBackend::load(&locator).unwrap();
        assert_eq!(backend.source_path(), temp.path().join("a.toml"));
    }
}
