use chrono::{DateTime, NaiveDateTime, Utc};

use crate::vitals::{sanitize, RawReading, SanitizedVitals};

use super::SnapshotStore;

const ENABLE_LOGS: bool = true;

use crate::{log_error, log_warn};

/// Accepts RFC 3339 and the plain `YYYY-MM-DD HH:MM:SS` form (read as UTC).
pub fn parse_reading_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Some(parsed.with_timezone(&Utc));
    }
    ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .map(|naive| naive.and_utc())
}

/// Owns the sticky snapshot for one monitoring session and keeps it in step
/// with its store.
pub struct VitalsSession<S: SnapshotStore> {
    store: S,
    vitals: SanitizedVitals,
    last_applied_at: Option<DateTime<Utc>>,
}

impl<S: SnapshotStore> VitalsSession<S> {
    /// Restores the persisted snapshot; any load failure starts empty.
    pub fn open(store: S) -> Self {
        let vitals = match store.load() {
            Ok(saved) => saved.unwrap_or_default(),
            Err(err) => {
                log_warn!("Failed to restore vitals snapshot, starting empty: {err:?}");
                SanitizedVitals::default()
            }
        };

        Self {
            store,
            vitals,
            last_applied_at: None,
        }
    }

    pub fn vitals(&self) -> SanitizedVitals {
        self.vitals
    }

    pub fn last_applied_at(&self) -> Option<DateTime<Utc>> {
        self.last_applied_at
    }

    /// True when the reading carries a timestamp strictly older than the last
    /// one applied.
    pub fn is_stale(&self, raw: &RawReading) -> bool {
        let Some(last) = self.last_applied_at else {
            return false;
        };
        raw.timestamp
            .as_deref()
            .and_then(parse_reading_timestamp)
            .is_some_and(|at| at < last)
    }

    /// Merges the reading into the snapshot and persists the result.
    /// Returns `None` for a stale reading, which leaves everything untouched.
    pub fn apply(&mut self, raw: &RawReading) -> Option<SanitizedVitals> {
        if self.is_stale(raw) {
            log_warn!(
                "Discarding stale reading stamped {}",
                raw.timestamp.as_deref().unwrap_or_default()
            );
            return None;
        }

        self.vitals = sanitize(self.vitals, raw);
        if let Some(at) = raw.timestamp.as_deref().and_then(parse_reading_timestamp) {
            self.last_applied_at = Some(at);
        }

        if let Err(err) = self.store.save(&self.vitals) {
            log_error!("Failed to persist vitals snapshot: {err:?}");
        }

        Some(self.vitals)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::MemorySnapshotStore;
    use pretty_assertions::assert_eq;

    fn reading(heart_rate: f64, timestamp: &str) -> RawReading {
        RawReading {
            heart_rate: Some(heart_rate),
            timestamp: Some(timestamp.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn restores_persisted_snapshot() {
        let saved = SanitizedVitals {
            spo2: Some(97.0),
            ..Default::default()
        };
        let session = VitalsSession::open(MemorySnapshotStore::with_snapshot(saved));
        assert_eq!(session.vitals(), saved);
    }

    #[test]
    fn every_apply_is_persisted() {
        let store = MemorySnapshotStore::new();
        let mut session = VitalsSession::open(store.clone());

        session.apply(&reading(80.0, "2024-05-01T10:00:00Z"));
        session.apply(&RawReading::default());

        assert_eq!(store.writes(), 2);
        assert_eq!(store.saved().and_then(|v| v.heart_rate), Some(80.0));
    }

    #[test]
    fn older_reading_is_discarded() {
        let store = MemorySnapshotStore::new();
        let mut session = VitalsSession::open(store.clone());

        assert!(session.apply(&reading(80.0, "2024-05-01 10:00:05")).is_some());
        assert_eq!(session.apply(&reading(120.0, "2024-05-01 10:00:00")), None);

        assert_eq!(session.vitals().heart_rate, Some(80.0));
        assert_eq!(store.writes(), 1);
    }

    #[test]
    fn equal_or_unparseable_timestamps_are_applied() {
        let mut session = VitalsSession::open(MemorySnapshotStore::new());
        session.apply(&reading(80.0, "2024-05-01T10:00:00Z"));

        assert!(session.apply(&reading(81.0, "2024-05-01T10:00:00Z")).is_some());
        assert!(session.apply(&reading(82.0, "yesterday")).is_some());
        assert_eq!(session.vitals().heart_rate, Some(82.0));
    }

    #[test]
    fn parses_both_timestamp_forms() {
        let rfc = parse_reading_timestamp("2024-05-01T10:00:00+02:00").unwrap();
        let plain = parse_reading_timestamp("2024-05-01 08:00:00").unwrap();
        assert_eq!(rfc, plain);
        assert_eq!(parse_reading_timestamp(""), None);
    }
}
