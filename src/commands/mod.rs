pub mod calendar;
pub mod config;
pub mod list;
pub mod log;
pub mod predict;
pub mod remove;
pub mod settings;
pub mod status;

use std::sync::Arc;

use anyhow::Result;

use cycledir_core::{CycledirConfig, FileStore, Identity, Tracker};

/// Everything a command needs, loaded once per invocation.
pub struct CliContext {
    pub config: CycledirConfig,
    pub identity: Identity,
    pub tracker: Tracker<FileStore>,
}

impl CliContext {
    pub fn new(config: CycledirConfig) -> Result<Self> {
        let identity = Identity::User(config.user_id()?);
        tracing::debug!(data = %config.data_path().display(), user = %config.user, "using store");
        let store =
            FileStore::new(config.data_path()).with_default_settings(config.default_settings);

        Ok(CliContext {
            config,
            identity,
            tracker: Tracker::new(Arc::new(store)),
        })
    }

    pub fn load() -> Result<Self> {
        Self::new(CycledirConfig::load()?)
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;

    /// A context whose data lives in `dir`.
    pub fn context(dir: &std::path::Path) -> CliContext {
        let config = CycledirConfig {
            data_dir: dir.to_path_buf(),
            user: "tester".to_string(),
            ..CycledirConfig::default()
        };
        CliContext::new(config).unwrap()
    }
}
