use crate::vitals::{AlertRecord, Severity};

pub const DEFAULT_RETENTION: usize = 50;

/// Newest-first alert list with a retention cap.
#[derive(Debug, Clone)]
pub struct NotificationFeed {
    alerts: Vec<AlertRecord>,
    retention: usize,
}

impl Default for NotificationFeed {
    fn default() -> Self {
        Self::new(DEFAULT_RETENTION)
    }
}

impl NotificationFeed {
    pub fn new(retention: usize) -> Self {
        Self {
            alerts: Vec::new(),
            retention: retention.max(1),
        }
    }

    pub fn retention(&self) -> usize {
        self.retention
    }

    /// Prepends one batch, keeping its order, and drops the oldest entries
    /// past the cap.
    pub fn push_batch(&mut self, batch: &[AlertRecord]) {
        if batch.is_empty() {
            return;
        }
        self.alerts.splice(0..0, batch.iter().cloned());
        self.alerts.truncate(self.retention);
    }

    pub fn alerts(&self) -> &[AlertRecord] {
        &self.alerts
    }

    pub fn len(&self) -> usize {
        self.alerts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.alerts.is_empty()
    }

    pub fn mark_read(&mut self, id: &str) -> bool {
        match self.alerts.iter_mut().find(|alert| alert.id == id) {
            Some(alert) => {
                alert.read = true;
                true
            }
            None => false,
        }
    }

    pub fn mark_all_read(&mut self) {
        for alert in &mut self.alerts {
            alert.read = true;
        }
    }

    pub fn delete(&mut self, id: &str) -> bool {
        let before = self.alerts.len();
        self.alerts.retain(|alert| alert.id != id);
        self.alerts.len() != before
    }

    /// All alerts, or only those of one severity.
    pub fn filtered(&self, severity: Option<Severity>) -> Vec<&AlertRecord> {
        self.alerts
            .iter()
            .filter(|alert| severity.map_or(true, |wanted| alert.severity == wanted))
            .collect()
    }

    pub fn unread_count(&self) -> usize {
        self.alerts.iter().filter(|alert| !alert.read).count()
    }

    pub fn critical_unread_count(&self) -> usize {
        self.alerts
            .iter()
            .filter(|alert| !alert.read && alert.severity == Severity::Critical)
            .count()
    }
}
