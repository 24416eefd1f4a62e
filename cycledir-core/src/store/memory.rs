//! Process-local store.

use std::collections::{BTreeMap, HashMap};
use std::sync::RwLock;

use chrono::NaiveDate;
use tokio::sync::broadcast;

use crate::error::{CycleError, CycleResult};
use crate::record::{PeriodRecord, sort_records};
use crate::settings::CycleSettings;
use crate::store::{ChangeFeed, ChangeKind, CycleStore, StoreChange};
use crate::user::UserId;

#[derive(Default)]
struct UserData {
    settings: Option<CycleSettings>,
    records: BTreeMap<NaiveDate, PeriodRecord>,
}

/// In-memory store. Data lives as long as the value does.
pub struct MemoryStore {
    users: RwLock<HashMap<UserId, UserData>>,
    default_settings: CycleSettings,
    feed: ChangeFeed,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore {
            users: RwLock::new(HashMap::new()),
            default_settings: CycleSettings::default(),
            feed: ChangeFeed::default(),
        }
    }

    pub fn with_default_settings(mut self, settings: CycleSettings) -> Self {
        self.default_settings = settings;
        self
    }

    pub fn with_feed(mut self, feed: ChangeFeed) -> Self {
        self.feed = feed;
        self
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        MemoryStore::new()
    }
}

impl CycleStore for MemoryStore {
    fn get_settings(&self, user: &UserId) -> CycleResult<CycleSettings> {
        let users = self.users.read().unwrap_or_else(|e| e.into_inner());
        Ok(users
            .get(user)
            .and_then(|data| data.settings)
            .unwrap_or(self.default_settings))
    }

    fn put_settings(&self, user: &UserId, settings: &CycleSettings) -> CycleResult<()> {
        settings.validate()?;

        // Publish under the lock so subscribers see changes in write order.
        let mut users = self.users.write().unwrap_or_else(|e| e.into_inner());
        users.entry(user.clone()).or_default().settings = Some(*settings);

        tracing::debug!(%user, ?settings, "saved settings");
        self.feed.publish(StoreChange::new(
            user,
            ChangeKind::SettingsUpdated(*settings),
        ));
        Ok(())
    }

    fn list_records(&self, user: &UserId) -> CycleResult<Vec<PeriodRecord>> {
        let users = self.users.read().unwrap_or_else(|e| e.into_inner());
        let mut records: Vec<PeriodRecord> = users
            .get(user)
            .map(|data| data.records.values().copied().collect())
            .unwrap_or_default();
        sort_records(&mut records);
        Ok(records)
    }

    fn put_record(&self, user: &UserId, record: &PeriodRecord) -> CycleResult<()> {
        let mut users = self.users.write().unwrap_or_else(|e| e.into_inner());
        let data = users.entry(user.clone()).or_default();
        if data.records.contains_key(&record.date) {
            return Err(CycleError::DuplicateRecord(record.key()));
        }
        data.records.insert(record.date, *record);

        tracing::debug!(%user, date = %record.date, "recorded period");
        self.feed
            .publish(StoreChange::new(user, ChangeKind::RecordAdded(*record)));
        Ok(())
    }

    fn delete_record(&self, user: &UserId, date: NaiveDate) -> CycleResult<()> {
        let mut users = self.users.write().unwrap_or_else(|e| e.into_inner());
        let removed = users
            .get_mut(user)
            .and_then(|data| data.records.remove(&date));

        if removed.is_none() {
            return Err(CycleError::RecordNotFound(
                date.format("%Y-%m-%d").to_string(),
            ));
        }

        tracing::debug!(%user, %date, "deleted period");
        self.feed
            .publish(StoreChange::new(user, ChangeKind::RecordDeleted(date)));
        Ok(())
    }

    fn subscribe(&self) -> broadcast::Receiver<StoreChange> {
        self.feed.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: &str) -> UserId {
        UserId::new(id).unwrap()
    }

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn settings_default_until_saved() {
        let store = MemoryStore::new();
        let amy = user("amy");
        assert_eq!(store.get_settings(&amy).unwrap(), CycleSettings::default());

        store.put_settings(&amy, &CycleSettings::new(26, 4)).unwrap();
        assert_eq!(store.get_settings(&amy).unwrap(), CycleSettings::new(26, 4));
        assert_eq!(store.get_settings(&user("bea")).unwrap(), CycleSettings::default());
    }

    #[test]
    fn records_are_ordered_and_unique() {
        let store = MemoryStore::new();
        let amy = user("amy");

        store.put_record(&amy, &PeriodRecord::new(date("2024-01-20"))).unwrap();
        store.put_record(&amy, &PeriodRecord::new(date("2024-02-17"))).unwrap();
        assert!(matches!(
            store.put_record(&amy, &PeriodRecord::new(date("2024-01-20"))),
            Err(CycleError::DuplicateRecord(_))
        ));

        let records = store.list_records(&amy).unwrap();
        assert_eq!(records[0].date, date("2024-02-17"));
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn delete_missing_is_not_found() {
        let store = MemoryStore::new();
        assert!(matches!(
            store.delete_record(&user("amy"), date("2024-01-20")),
            Err(CycleError::RecordNotFound(_))
        ));
    }

    #[tokio::test]
    async fn settings_changes_are_published() {
        let store = MemoryStore::new();
        let mut rx = store.subscribe();
        let amy = user("amy");

        store.put_settings(&amy, &CycleSettings::new(30, 5)).unwrap();

        assert_eq!(
            rx.recv().await.unwrap(),
            StoreChange::new(&amy, ChangeKind::SettingsUpdated(CycleSettings::new(30, 5)))
        );
    }

    #[test]
    fn concurrent_settings_publish_in_write_order() {
        let store = std::sync::Arc::new(MemoryStore::new());
        let mut rx = store.subscribe();
        let amy = user("amy");

        let handles: Vec<_> = (1..=8)
            .map(|n| {
                let store = store.clone();
                let amy = amy.clone();
                std::thread::spawn(move || {
                    store
                        .put_settings(&amy, &CycleSettings::new(20 + n, 5))
                        .unwrap();
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let mut last = None;
        while let Ok(change) = rx.try_recv() {
            last = Some(change);
        }
        assert_eq!(
            last,
            Some(StoreChange::new(
                &amy,
                ChangeKind::SettingsUpdated(store.get_settings(&amy).unwrap())
            ))
        );
    }
}
