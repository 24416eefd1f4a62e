//! Core library for cycledir.
//!
//! - `prediction`: next-cycle prediction from the last period start
//! - `record`, `settings`, `user`: the per-user data model
//! - `store`: storage + change notification (`FileStore`, `MemoryStore`)
//! - `tracker`: identity-gated operations over a store
//! - `markers`: countdown and calendar day classification

pub mod config;
pub mod error;
pub mod markers;
pub mod prediction;
pub mod record;
pub mod settings;
pub mod store;
pub mod tracker;
pub mod user;

pub use config::{CycledirConfig, ServerConfig};
pub use error::{CycleError, CycleResult};
pub use markers::{Countdown, DayKind};
pub use prediction::{Prediction, parse_calendar_date, predict, predict_from};
pub use record::PeriodRecord;
pub use settings::CycleSettings;
pub use store::{ChangeFeed, ChangeKind, CycleStore, FileStore, MemoryStore, StoreChange};
pub use tracker::{Overview, Tracker};
pub use user::{Identity, UserId};
