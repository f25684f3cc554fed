//! Convenience accessors available on every [`Backend`].

use std::str::FromStr;

use super::Backend;
use crate::error::{ConfigError, ConfigResult};

/// Typed and defaulted lookups layered over [`Backend::get_string`].
pub trait BackendExt: Backend {
    /// Leaf value at `path`, or `default` when absent.
    fn get_or(&self, path: &str, default: &str) -> String {
        self.get_string(path).unwrap_or_else(|| default.to_string())
    }

    /// Parse the leaf at `path` into `T`.
    ///
    /// Absent stays `Ok(None)`; a present value that does not parse is
    /// `InvalidValue`.
    fn get_parsed<T: FromStr>(&self, path: &str) -> ConfigResult<Option<T>> {
        match self.get_string(path) {
            None => Ok(None),
            Some(raw) => raw
                .trim()
                .parse::<T>()
                .map(Some)
                .map_err(|_| ConfigError::InvalidValue {
                    path: path.to_string(),
                    value: raw,
                    expected: std::any::type_name::<T>(),
                }),
        }
    }

    /// True when a leaf exists at `path`.
    fn contains(&self, path: &str) -> bool {
        self.get_string(path).is_some()
    }
}

impl<B: Backend + ?Sized> BackendExt for B {}
