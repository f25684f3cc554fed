//! Source file watcher for opt-in hot reload.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;

use super::{Backend, FileBackend};

/// Result of a reload triggered by a file event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReloadOutcome {
    /// New tree published.
    Reloaded { locator: String },
    /// Reload failed; the previous tree is still served.
    Failed { locator: String, error: String },
}

/// Watches the file behind a [`FileBackend`] and reloads it on change.
///
/// The watch is bound to the source path at the time of [`SourceWatcher::run`].
/// Once the backend is re-pointed with `set_prefix`, events on the old file
/// are ignored; start a new watcher for the new source.
pub struct SourceWatcher {
    backend: Arc<FileBackend>,
    outcome_tx: mpsc::UnboundedSender<ReloadOutcome>,
}

impl SourceWatcher {
    /// Create a new SourceWatcher.
    ///
    /// Returns the watcher and a receiver for reload outcomes.
    pub fn new(backend: Arc<FileBackend>) -> (Self, mpsc::UnboundedReceiver<ReloadOutcome>) {
        let (outcome_tx, outcome_rx) = mpsc::unbounded_channel();
        (Self { backend, outcome_tx }, outcome_rx)
    }

    /// Start watching. Events are handled on notify's background thread;
    /// dropping the returned watcher stops them.
    pub fn run(self) -> Result<RecommendedWatcher, notify::Error> {
        let path = self.backend.source_path();
        let backend = self.backend.clone();
        let watched = path.clone();
        let tx = self.outcome_tx.clone();

        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| match res {
                Ok(event) => {
                    if let Some(outcome) = handle_event(&backend, &watched, &event) {
                        let _ = tx.send(outcome);
                    }
                }
                Err(e) => tracing::error!("Watch error: {:?}", e),
            },
            Config::default().with_poll_interval(Duration::from_secs(2)),
        )?;

        watcher.watch(&path, RecursiveMode::NonRecursive)?;

        tracing::info!(path = ?path, "Source watcher started");
        Ok(watcher)
    }
}

/// Reload `backend` if `event` is a modification or creation of `watched`
/// and `watched` is still the backend's source.
pub(crate) fn handle_event(
    backend: &FileBackend,
    watched: &Path,
    event: &Event,
) -> Option<ReloadOutcome> {
    if !(event.kind.is_modify() || event.kind.is_create()) {
        return None;
    }
    if backend.source_path() != watched {
        tracing::debug!(path = ?watched, "Backend re-pointed, ignoring event on old source");
        return None;
    }

    tracing::info!("Source change detected, reloading...");
    let locator = backend.locator();
    let outcome = match backend.reload() {
        Ok(()) => ReloadOutcome::Reloaded { locator },
        Err(e) => ReloadOutcome::Failed {
            locator,
            error: e.to_string(),
        },
    };
    Some(outcome)
}
