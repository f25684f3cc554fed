//! Source locator parsing.
//!
//! ```text
//! <scheme>:<path>[.<suffix>]      file:/etc/app/example.cfg
//! <path>[.<suffix>]               /etc/app/example.cfg   (file implied)
//! memory:<name>                   memory:scratch
//! ```
//!
//! A single-letter prefix (`C:\app.ini`) is a drive letter, not a scheme.

use crate::error::{ConfigError, ConfigResult};

/// Transport selected by the locator scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scheme {
    File,
    Memory,
}

impl Scheme {
    fn from_name(name: &str) -> Option<Self> {
        match name {
            "file" => Some(Scheme::File),
            "memory" => Some(Scheme::Memory),
            _ => None,
        }
    }
}

/// A parsed source locator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locator {
    raw: String,
    scheme: Scheme,
    path: String,
}

impl Locator {
    /// Parse a locator string.
    pub fn parse(raw: &str) -> ConfigResult<Self> {
        if raw.trim().is_empty() {
            return Err(ConfigError::invalid_locator(raw, "locator is empty"));
        }

        let (scheme, path) = match split_scheme(raw) {
            Some((name, rest)) => match Scheme::from_name(name) {
                Some(scheme) => (scheme, rest),
                None => {
                    return Err(ConfigError::UnsupportedFormat {
                        locator: raw.to_string(),
                    })
                }
            },
            None => (Scheme::File, raw),
        };

        if scheme == Scheme::File && path.is_empty() {
            return Err(ConfigError::invalid_locator(raw, "file locator has no path"));
        }

        Ok(Self {
            raw: raw.to_string(),
            scheme,
            path: path.to_string(),
        })
    }

    pub fn scheme(&self) -> Scheme {
        self.scheme
    }

    /// Locator with the scheme stripped.
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

impl std::fmt::Display for Locator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Split `scheme:rest` when the prefix looks like a URI scheme of two or more
/// characters.
fn split_scheme(raw: &str) -> Option<(&str, &str)> {
    let (name, rest) = raw.split_once(':')?;
    let mut chars = name.chars();
    let first = chars.next()?;
    let well_formed = name.len() >= 2
        && first.is_ascii_alphabetic()
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));
    well_formed.then_some((name, rest))
}
