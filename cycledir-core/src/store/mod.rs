//! Per-user storage of settings and period records.
//!
//! `CycleStore` is the storage-and-notification capability the tracker
//! works against. Two adapters ship with the crate:
//! - `FileStore`: one directory per user, one TOML file per record
//! - `MemoryStore`: process-local, for tests and ephemeral servers
//!
//! Every successful mutation publishes one `StoreChange` on the store's
//! change feed.

mod feed;
mod file;
mod memory;

pub use feed::{ChangeFeed, DEFAULT_CHANGE_BUFFER};
pub use file::FileStore;
pub use memory::MemoryStore;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use crate::error::CycleResult;
use crate::record::PeriodRecord;
use crate::settings::CycleSettings;
use crate::user::UserId;

/// What changed in a user's data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum ChangeKind {
    SettingsUpdated(CycleSettings),
    RecordAdded(PeriodRecord),
    RecordDeleted(NaiveDate),
}

/// A mutation of one user's data, as seen by subscribers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreChange {
    pub user: UserId,
    pub change: ChangeKind,
}

impl StoreChange {
    pub fn new(user: &UserId, change: ChangeKind) -> Self {
        StoreChange {
            user: user.clone(),
            change,
        }
    }
}

/// Storage and change notification for cycle data.
///
/// # Contract
///
/// Implementations must:
/// - Keep each user's data isolated from every other user's
/// - Return default settings for a user that never saved any
/// - Return records most-recent first
/// - Reject a record whose date is already stored (`DuplicateRecord`)
/// - Reject deleting a date that is not stored (`RecordNotFound`)
/// - Publish exactly one `StoreChange` per successful mutation
pub trait CycleStore: Send + Sync {
    fn get_settings(&self, user: &UserId) -> CycleResult<CycleSettings>;

    fn put_settings(&self, user: &UserId, settings: &CycleSettings) -> CycleResult<()>;

    fn list_records(&self, user: &UserId) -> CycleResult<Vec<PeriodRecord>>;

    fn put_record(&self, user: &UserId, record: &PeriodRecord) -> CycleResult<()>;

    fn delete_record(&self, user: &UserId, date: NaiveDate) -> CycleResult<()>;

    /// Receive every change made through this store from now on.
    fn subscribe(&self) -> broadcast::Receiver<StoreChange>;
}
