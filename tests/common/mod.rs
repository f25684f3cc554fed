//! Shared helpers for integration tests.

use std::fs;
use std::path::Path;

use tempfile::TempDir;

/// A scratch directory holding configuration sources.
pub struct Sources {
    dir: TempDir,
}

impl Default for Sources {
    fn default() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
        }
    }
}

impl Sources {
    pub fn new() -> Self {
        Self::default()
    }

    /// Write `content` to `name` and return its `file:` locator.
    pub fn write(&self, name: &str, content: &str) -> String {
        let path = self.dir.path().join(name);
        fs::write(&path, content).unwrap();
        format!("file:{}", path.display())
    }

    /// Locator for `name` without creating the file.
    #[allow(dead_code)]
    pub fn locator(&self, name: &str) -> String {
        format!("file:{}", self.dir.path().join(name).display())
    }

    #[allow(dead_code)]
    pub fn path(&self) -> &Path {
        self.dir.path()
    }
}
