//! Hierarchical configuration backends.
//!
//! Application code reads settings by path (`section.key`) without knowing
//! where they live. A [`Backend`] is opened from a source locator such as
//! `file:/etc/app/example.cfg` or `memory:scratch`; the locator scheme picks
//! the backend, the suffix picks the format loader.
//!
//! ```no_run
//! use config_backends::{open, Backend};
//!
//! # fn main() -> Result<(), config_backends::ConfigError> {
//! let backend = open("file:/etc/app/example.cfg")?;
//! if let Some(level) = backend.get_string("logging.level") {
//!     println!("level = {}", level);
//! }
//! backend.set_prefix("file:/etc/app/other.ini")?;
//! # Ok(())
//! # }
//! ```

pub mod backend;
pub mod error;
pub mod format;
pub mod observability;
pub mod tree;

pub use backend::{open, open_with, Backend, BackendExt, FileBackend, MemoryBackend, OpenOptions};
pub use error::{ConfigError, ConfigResult};
pub use format::{FormatRegistry, TreeLoader};
pub use tree::{ConfigTree, Node, PathResolver};
