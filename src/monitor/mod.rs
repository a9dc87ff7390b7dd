//! Background polling of the reading source.

mod controller;
mod loop_worker;

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::notifications::NotificationFeed;
use crate::settings::MonitorSettings;
use crate::vitals::{AlertRecord, SanitizedVitals, VitalStatuses};

pub use controller::MonitorController;

/// Published after every applied reading.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonitorUpdate {
    pub vitals: SanitizedVitals,
    pub statuses: VitalStatuses,
    /// Alerts raised by this reading only.
    pub alerts: Vec<AlertRecord>,
    pub reading_timestamp: Option<String>,
    pub fetched_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy)]
pub struct PollTiming {
    pub interval: Duration,
    pub fetch_timeout: Duration,
}

impl From<&MonitorSettings> for PollTiming {
    fn from(settings: &MonitorSettings) -> Self {
        Self {
            interval: settings.poll_interval(),
            fetch_timeout: settings.fetch_timeout(),
        }
    }
}

fn lock_feed(feed: &Arc<Mutex<NotificationFeed>>) -> MutexGuard<'_, NotificationFeed> {
    match feed.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}
