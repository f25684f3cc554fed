//! Error definitions shared by loaders and backends.
//!
//! A missing key is never an error: lookups return `Option`.

use thiserror::Error;

/// Errors that can occur while loading, re-pointing or writing a backend.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Locator is empty, malformed, or names a scheme this backend cannot serve.
    #[error("Invalid locator `{locator}`: {reason}")]
    InvalidLocator { locator: String, reason: &'static str },

    /// Locator is well formed but no registered loader or scheme matches it.
    #[error("Unsupported format: no loader registered for `{locator}`")]
    UnsupportedFormat { locator: String },

    /// Format recognized, content invalid.
    #[error("{}", render_parse(.source_id, .line, .message))]
    Parse {
        source_id: String,
        line: Option<usize>,
        message: String,
    },

    /// Write attempted on a read-only backend.
    #[error("{backend} backend does not support {operation}")]
    UnsupportedOperation {
        backend: &'static str,
        operation: &'static str,
    },

    /// Source could not be read.
    #[error("Cannot read `{source_id}`: {source}")]
    Io {
        source_id: String,
        #[source]
        source: std::io::Error,
    },

    /// Write would pass through a leaf or replace a subtree.
    #[error("Path `{path}` conflicts with existing structure")]
    PathConflict { path: String },

    /// Present value could not be converted to the requested type.
    #[error("Value `{value}` at `{path}` is not a valid {expected}")]
    InvalidValue {
        path: String,
        value: String,
        expected: &'static str,
    },
}

impl ConfigError {
    pub fn parse(source_id: impl Into<String>, line: Option<usize>, message: impl Into<String>) -> Self {
        ConfigError::Parse {
            source_id: source_id.into(),
            line,
            message: message.into(),
        }
    }

    pub(crate) fn invalid_locator(locator: &str, reason: &'static str) -> Self {
        ConfigError::InvalidLocator {
            locator: locator.to_string(),
            reason,
        }
    }
}

fn render_parse(source_id: &str, line: &Option<usize>, message: &str) -> String {
    match line {
        Some(line) => format!("{} in {} line {}", message, source_id, line),
        None => format!("{} {}", message, source_id),
    }
}

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;
