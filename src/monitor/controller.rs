use std::sync::{Arc, Mutex};

use anyhow::{bail, Context, Result};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::notifications::NotificationFeed;
use crate::snapshot::{SnapshotStore, VitalsSession};
use crate::source::ReadingSource;
use crate::vitals::{AlertRecord, SanitizedVitals, Severity};

use super::loop_worker::{monitor_loop, LoopShared};
use super::{lock_feed, MonitorUpdate, PollTiming};

/// Owns the polling task and the alert feed it fills.
pub struct MonitorController {
    handle: Option<JoinHandle<()>>,
    cancel_token: Option<CancellationToken>,
    updates_tx: watch::Sender<Option<MonitorUpdate>>,
    feed: Arc<Mutex<NotificationFeed>>,
    restored: SanitizedVitals,
}

impl MonitorController {
    pub fn new(feed: NotificationFeed) -> Self {
        let (updates_tx, _) = watch::channel(None);
        Self {
            handle: None,
            cancel_token: None,
            updates_tx,
            feed: Arc::new(Mutex::new(feed)),
            restored: SanitizedVitals::default(),
        }
    }

    pub fn start<R, S>(&mut self, source: R, session: VitalsSession<S>, timing: PollTiming) -> Result<()>
    where
        R: ReadingSource,
        S: SnapshotStore,
    {
        if self.handle.is_some() {
            bail!("monitor already active");
        }

        self.restored = session.vitals();
        // a previous run's last update must not outlive its session
        self.updates_tx.send_replace(None);

        let cancel_token = CancellationToken::new();
        let shared = LoopShared {
            feed: Arc::clone(&self.feed),
            updates: self.updates_tx.clone(),
        };

        let handle = tokio::spawn(monitor_loop(
            source,
            session,
            shared,
            timing,
            cancel_token.clone(),
        ));

        self.handle = Some(handle);
        self.cancel_token = Some(cancel_token);
        Ok(())
    }

    pub async fn stop(&mut self) -> Result<()> {
        if let Some(token) = self.cancel_token.take() {
            token.cancel();
        }

        if let Some(handle) = self.handle.take() {
            handle
                .await
                .context("monitor loop task failed to join")
                .map(|_| ())
        } else {
            Ok(())
        }
    }

    pub fn is_running(&self) -> bool {
        self.handle.is_some()
    }

    /// Receives every applied reading.
    pub fn subscribe(&self) -> watch::Receiver<Option<MonitorUpdate>> {
        self.updates_tx.subscribe()
    }

    pub fn latest_update(&self) -> Option<MonitorUpdate> {
        self.updates_tx.borrow().clone()
    }

    /// Snapshot from the newest update, or the restored one before the first
    /// poll lands.
    pub fn latest_vitals(&self) -> SanitizedVitals {
        self.updates_tx
            .borrow()
            .as_ref()
            .map_or(self.restored, |update| update.vitals)
    }

    pub fn alerts(&self, severity: Option<Severity>) -> Vec<AlertRecord> {
        lock_feed(&self.feed)
            .filtered(severity)
            .into_iter()
            .cloned()
            .collect()
    }

    /// `(unread, critical unread)`
    pub fn unread_counts(&self) -> (usize, usize) {
        let feed = lock_feed(&self.feed);
        (feed.unread_count(), feed.critical_unread_count())
    }

    pub fn mark_read(&self, id: &str) -> bool {
        lock_feed(&self.feed).mark_read(id)
    }

    pub fn mark_all_read(&self) {
        lock_feed(&self.feed).mark_all_read();
    }

    pub fn delete(&self, id: &str) -> bool {
        lock_feed(&self.feed).delete(id)
    }
}

impl Drop for MonitorController {
    fn drop(&mut self) {
        if let Some(token) = self.cancel_token.take() {
            token.cancel();
        }
    }
}
