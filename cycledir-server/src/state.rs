use std::sync::Arc;

use cycledir_core::store::ChangeFeed;
use cycledir_core::{CycleStore, CycledirConfig, FileStore, MemoryStore, Tracker};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    tracker: Tracker<dyn CycleStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn CycleStore>) -> Self {
        AppState {
            tracker: Tracker::new(store),
        }
    }

    /// File-backed state in the configured data directory, or an in-memory
    /// store that is lost on exit when `ephemeral` is set.
    pub fn from_config(config: &CycledirConfig, ephemeral: bool) -> Self {
        let feed = ChangeFeed::new(config.server.change_buffer);

        let store: Arc<dyn CycleStore> = if ephemeral {
            Arc::new(
                MemoryStore::new()
                    .with_default_settings(config.default_settings)
                    .with_feed(feed),
            )
        } else {
            Arc::new(
                FileStore::new(config.data_path())
                    .with_default_settings(config.default_settings)
                    .with_feed(feed),
            )
        };

        AppState::new(store)
    }

    pub fn tracker(&self) -> &Tracker<dyn CycleStore> {
        &self.tracker
    }
}
