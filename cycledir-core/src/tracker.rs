//! Application service tying identity, storage and prediction together.

use std::sync::Arc;

use chrono::NaiveDate;
use serde::Serialize;
use tokio::sync::broadcast;

use crate::error::{CycleError, CycleResult};
use crate::markers::Countdown;
use crate::prediction::{Prediction, parse_calendar_date, predict_from};
use crate::record::{PeriodRecord, latest_record};
use crate::settings::CycleSettings;
use crate::store::{CycleStore, StoreChange};
use crate::user::Identity;

/// Everything a front end needs to render one user's state.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Overview {
    pub settings: CycleSettings,
    pub records: Vec<PeriodRecord>,
    /// `None` until the first period is recorded.
    pub prediction: Option<Prediction>,
    pub countdown: Option<Countdown>,
}

/// Gates store access on identity and derives predictions from stored data.
///
/// Every call requires a signed-in identity; anonymous callers get
/// `CycleError::Unauthenticated`.
pub struct Tracker<S: CycleStore + ?Sized> {
    store: Arc<S>,
}

impl<S: CycleStore + ?Sized> Clone for Tracker<S> {
    fn clone(&self) -> Self {
        Tracker {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: CycleStore + ?Sized> Tracker<S> {
    pub fn new(store: Arc<S>) -> Self {
        Tracker { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn settings(&self, identity: &Identity) -> CycleResult<CycleSettings> {
        let user = identity.require_user()?;
        self.store.get_settings(user)
    }

    pub fn update_settings(
        &self,
        identity: &Identity,
        settings: CycleSettings,
    ) -> CycleResult<CycleSettings> {
        let user = identity.require_user()?;
        self.store.put_settings(user, &settings)?;
        Ok(settings)
    }

    /// Records most-recent first.
    pub fn records(&self, identity: &Identity) -> CycleResult<Vec<PeriodRecord>> {
        let user = identity.require_user()?;
        self.store.list_records(user)
    }

    pub fn log_period(&self, identity: &Identity, date: &str) -> CycleResult<PeriodRecord> {
        let user = identity.require_user()?;
        let record = PeriodRecord::parse(date)?;
        self.store.put_record(user, &record)?;
        tracing::info!(%user, date = %record.date, "period logged");
        Ok(record)
    }

    pub fn remove_period(&self, identity: &Identity, date: &str) -> CycleResult<()> {
        let user = identity.require_user()?;
        let date = parse_calendar_date(date).ok_or_else(|| CycleError::InvalidDate(date.into()))?;
        self.store.delete_record(user, date)?;
        tracing::info!(%user, %date, "period removed");
        Ok(())
    }

    /// Prediction from the most recent record and current settings.
    ///
    /// `Ok(None)` when nothing is recorded yet.
    pub fn prediction(&self, identity: &Identity) -> CycleResult<Option<Prediction>> {
        let user = identity.require_user()?;
        let records = self.store.list_records(user)?;
        let settings = self.store.get_settings(user)?;
        Ok(latest_record(&records).and_then(|r| predict_from(r.date, &settings)))
    }

    pub fn overview(&self, identity: &Identity, today: NaiveDate) -> CycleResult<Overview> {
        let user = identity.require_user()?;
        let settings = self.store.get_settings(user)?;
        let records = self.store.list_records(user)?;
        let prediction = latest_record(&records).and_then(|r| predict_from(r.date, &settings));
        let countdown = prediction.as_ref().map(|p| Countdown::new(p, today));

        Ok(Overview {
            settings,
            records,
            prediction,
            countdown,
        })
    }

    pub fn subscribe(&self) -> broadcast::Receiver<StoreChange> {
        self.store.subscribe()
    }
}
