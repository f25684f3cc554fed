//! Observability subsystem.
//!
//! Backends emit `tracing` events:
//! - `info`: source loaded, reloaded, re-pointed
//! - `warn`: reload failed, previous source kept
//! - `debug`: loader selection and parse summaries

pub mod logging;

pub use logging::init_logging;
