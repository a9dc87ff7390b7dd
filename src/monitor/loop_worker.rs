use std::sync::{Arc, Mutex};

use anyhow::{anyhow, Result};
use chrono::Utc;
use tokio::sync::watch;
use tokio::time::{Duration, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use crate::notifications::NotificationFeed;
use crate::snapshot::{SnapshotStore, VitalsSession};
use crate::source::ReadingSource;
use crate::vitals::{generate_alerts, AlertRecord};

use super::{lock_feed, MonitorUpdate, PollTiming};

// Set to false to silence the poll loop
const ENABLE_LOGS: bool = true;

use crate::{log_debug, log_info, log_warn};

/// State the loop shares with its controller.
pub(crate) struct LoopShared {
    pub feed: Arc<Mutex<NotificationFeed>>,
    pub updates: watch::Sender<Option<MonitorUpdate>>,
}

/// Polls the source until cancelled. Ticks run one at a time: a slow fetch
/// delays the next tick instead of overlapping with it.
pub(crate) async fn monitor_loop<R, S>(
    source: R,
    mut session: VitalsSession<S>,
    shared: LoopShared,
    timing: PollTiming,
    cancel_token: CancellationToken,
) where
    R: ReadingSource,
    S: SnapshotStore,
{
    let mut ticker = tokio::time::interval(timing.interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    log_info!(
        "monitor loop started (every {}s, fetch timeout {}s)",
        timing.interval.as_secs(),
        timing.fetch_timeout.as_secs()
    );

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                match poll_once(&source, &mut session, &shared, timing.fetch_timeout).await {
                    Ok(Some(update)) => {
                        shared.updates.send_replace(Some(update));
                    }
                    Ok(None) => {}
                    Err(err) => log_warn!("poll failed, keeping previous readings: {err:#}"),
                }
            }
            _ = cancel_token.cancelled() => {
                log_info!("monitor loop shutting down");
                break;
            }
        }
    }
}

/// One fetch-sanitize-alert cycle. `Ok(None)` means the reading was stale.
async fn poll_once<R, S>(
    source: &R,
    session: &mut VitalsSession<S>,
    shared: &LoopShared,
    fetch_timeout: Duration,
) -> Result<Option<MonitorUpdate>>
where
    R: ReadingSource,
    S: SnapshotStore,
{
    let raw = tokio::time::timeout(fetch_timeout, source.fetch_latest())
        .await
        .map_err(|_| anyhow!("fetch timed out after {}s", fetch_timeout.as_secs()))??;

    let Some(vitals) = session.apply(&raw) else {
        return Ok(None);
    };

    let fetched_at = Utc::now();
    let alerts = generate_alerts(&vitals, fetched_at);
    log_debug!("applied reading {:?}, {} alert(s)", raw.timestamp, alerts.len());

    if !alerts.is_empty() {
        record_alerts(shared, &alerts);
    }

    Ok(Some(MonitorUpdate {
        vitals,
        statuses: vitals.statuses(),
        alerts,
        reading_timestamp: raw.timestamp,
        fetched_at,
    }))
}

fn record_alerts(shared: &LoopShared, alerts: &[AlertRecord]) {
    for alert in alerts {
        log_info!("{} alert: {} ({})", alert.severity, alert.title, alert.message);
    }
    lock_feed(&shared.feed).push_batch(alerts);
}
