//! Directory-backed store.
//!
//! ```text
//! <root>/<user>/settings.toml
//! <root>/<user>/periods/<YYYY-MM-DD>.toml
//! ```

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use crate::error::{CycleError, CycleResult};
use crate::record::{PeriodRecord, sort_records};
use crate::settings::CycleSettings;
use crate::store::{ChangeFeed, ChangeKind, CycleStore, StoreChange};
use crate::user::UserId;

const SETTINGS_FILE: &str = "settings.toml";
const PERIODS_DIR: &str = "periods";

/// On-disk shape of settings.toml
#[derive(Serialize, Deserialize)]
struct SettingsFile {
    cycle_length: i64,
    period_length: i64,
}

impl From<&CycleSettings> for SettingsFile {
    fn from(s: &CycleSettings) -> Self {
        SettingsFile {
            cycle_length: s.cycle_length,
            period_length: s.period_length,
        }
    }
}

impl From<SettingsFile> for CycleSettings {
    fn from(f: SettingsFile) -> Self {
        CycleSettings::new(f.cycle_length, f.period_length)
    }
}

pub struct FileStore {
    root: PathBuf,
    default_settings: CycleSettings,
    feed: ChangeFeed,
    // Serializes check-then-write sequences across users; writes are rare.
    write_lock: Mutex<()>,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        FileStore {
            root: root.into(),
            default_settings: CycleSettings::default(),
            feed: ChangeFeed::default(),
            write_lock: Mutex::new(()),
        }
    }

    /// Settings returned for users that never saved any.
    pub fn with_default_settings(mut self, settings: CycleSettings) -> Self {
        self.default_settings = settings;
        self
    }

    pub fn with_feed(mut self, feed: ChangeFeed) -> Self {
        self.feed = feed;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn user_dir(&self, user: &UserId) -> PathBuf {
        self.root.join(user.as_str())
    }

    fn settings_path(&self, user: &UserId) -> PathBuf {
        self.user_dir(user).join(SETTINGS_FILE)
    }

    fn periods_dir(&self, user: &UserId) -> PathBuf {
        self.user_dir(user).join(PERIODS_DIR)
    }

    fn record_path(&self, user: &UserId, date: NaiveDate) -> PathBuf {
        self.periods_dir(user)
            .join(format!("{}.toml", date.format("%Y-%m-%d")))
    }

    /// A record file is named after the date it holds.
    fn named_for(path: &Path, record: &PeriodRecord) -> bool {
        path.file_stem().is_some_and(|stem| stem == record.key().as_str())
    }

    fn read_record(path: &Path) -> CycleResult<PeriodRecord> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| CycleError::Serialization(e.to_string()))
    }
}

/// Write via a temp file and rename so readers never see partial content.
fn write_atomic(path: &Path, content: &str) -> CycleResult<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let temp = path.with_extension("toml.tmp");
    std::fs::write(&temp, content)?;
    std::fs::rename(&temp, path)?;
    Ok(())
}

impl CycleStore for FileStore {
    fn get_settings(&self, user: &UserId) -> CycleResult<CycleSettings> {
        let path = self.settings_path(user);
        if !path.exists() {
            return Ok(self.default_settings);
        }

        let content = std::fs::read_to_string(&path)?;
        let file: SettingsFile =
            toml::from_str(&content).map_err(|e| CycleError::Serialization(e.to_string()))?;
        Ok(file.into())
    }

    fn put_settings(&self, user: &UserId, settings: &CycleSettings) -> CycleResult<()> {
        settings.validate()?;

        let content = toml::to_string_pretty(&SettingsFile::from(settings))
            .map_err(|e| CycleError::Serialization(e.to_string()))?;

        // Publish under the lock so subscribers see changes in write order.
        let _guard = self.write_lock.lock().unwrap_or_else(|e| e.into_inner());
        write_atomic(&self.settings_path(user), &content)?;

        tracing::debug!(%user, ?settings, "saved settings");
        self.feed.publish(StoreChange::new(
            user,
            ChangeKind::SettingsUpdated(*settings),
        ));
        Ok(())
    }

    fn list_records(&self, user: &UserId) -> CycleResult<Vec<PeriodRecord>> {
        let dir = self.periods_dir(user);

        let entries = match std::fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut records: Vec<PeriodRecord> = entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.extension().is_some_and(|e| e == "toml"))
            .filter_map(|path| match Self::read_record(&path) {
                Ok(record) if Self::named_for(&path, &record) => Some(record),
                Ok(record) => {
                    tracing::warn!(path = %path.display(), date = %record.date, "skipping record filed under another date");
                    None
                }
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "skipping unreadable record");
                    None
                }
            })
            .collect();

        sort_records(&mut records);
        Ok(records)
    }

    fn put_record(&self, user: &UserId, record: &PeriodRecord) -> CycleResult<()> {
        let path = self.record_path(user, record.date);
        let content =
            toml::to_string_pretty(record).map_err(|e| CycleError::Serialization(e.to_string()))?;

        let _guard = self.write_lock.lock().unwrap_or_else(|e| e.into_inner());
        if path.exists() {
            return Err(CycleError::DuplicateRecord(record.key()));
        }
        write_atomic(&path, &content)?;

        tracing::debug!(%user, date = %record.date, "recorded period");
        self.feed
            .publish(StoreChange::new(user, ChangeKind::RecordAdded(*record)));
        Ok(())
    }

    fn delete_record(&self, user: &UserId, date: NaiveDate) -> CycleResult<()> {
        let path = self.record_path(user, date);

        let _guard = self.write_lock.lock().unwrap_or_else(|e| e.into_inner());
        if !path.exists() {
            return Err(CycleError::RecordNotFound(
                date.format("%Y-%m-%d").to_string(),
            ));
        }
        std::fs::remove_file(&path)?;

        tracing::debug!(%user, %date, "deleted period");
        self.feed
            .publish(StoreChange::new(user, ChangeKind::RecordDeleted(date)));
        Ok(())
    }

    fn subscribe(&self) -> broadcast::Receiver<StoreChange> {
        self.feed.subscribe()
    }
}
