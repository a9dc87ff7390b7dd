//! Threshold tables.
//!
//! Three tables exist and they deliberately disagree:
//!
//! - [`DISPLAY_THRESHOLDS`] colour the vital cards on the patient and doctor
//!   dashboards. Strict: anything slightly off is flagged.
//! - [`ALERT_THRESHOLDS`] decide when a notification is raised. Wider bands,
//!   so that fewer pages go out.
//! - [`CHAT_TIERS`] pick the qualitative wording of chat answers.
//!
//! Keep them separate. Unifying them changes what the patient sees.

use super::types::{MetricType, Severity};

/// A single boundary test on a value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Bound {
    /// `value < limit`
    Below(f64),
    /// `value <= limit`
    AtOrBelow(f64),
    /// `value > limit`
    Above(f64),
    /// `value >= limit`
    AtOrAbove(f64),
}

impl Bound {
    pub fn breached_by(&self, value: f64) -> bool {
        match *self {
            Bound::Below(limit) => value < limit,
            Bound::AtOrBelow(limit) => value <= limit,
            Bound::Above(limit) => value > limit,
            Bound::AtOrAbove(limit) => value >= limit,
        }
    }
}

/// Critical and warning boundaries for one metric. Critical is checked first;
/// a value that breaches none of the bounds is normal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeverityBands {
    pub metric: MetricType,
    pub critical: &'static [Bound],
    pub warning: &'static [Bound],
}

impl SeverityBands {
    pub fn severity_of(&self, value: f64) -> Severity {
        if value.is_nan() || self.critical.iter().any(|bound| bound.breached_by(value)) {
            Severity::Critical
        } else if self.warning.iter().any(|bound| bound.breached_by(value)) {
            Severity::Warning
        } else {
            Severity::Normal
        }
    }
}

/// Vital-card colouring, taken from the patient/doctor dashboards.
///
/// Temperature is critical below 20 °C (covers the -127 disconnect sentinel)
/// and above 37.5 °C, which also covers the 42 °C sensor ceiling. SpO2 is
/// critical below 95 %, which covers the 50 % sensor floor.
pub const DISPLAY_THRESHOLDS: [SeverityBands; 4] = [
    SeverityBands {
        metric: MetricType::Temperature,
        critical: &[Bound::Below(20.0), Bound::Above(37.5)],
        warning: &[Bound::Above(37.0)],
    },
    SeverityBands {
        metric: MetricType::HeartRate,
        critical: &[Bound::Below(10.0), Bound::Above(100.0)],
        warning: &[Bound::Above(90.0)],
    },
    SeverityBands {
        metric: MetricType::Spo2,
        critical: &[Bound::Below(50.0), Bound::Below(95.0)],
        warning: &[Bound::Below(97.0)],
    },
    SeverityBands {
        metric: MetricType::BloodPressure,
        critical: &[Bound::Below(60.0), Bound::Above(180.0)],
        warning: &[Bound::Above(140.0), Bound::Below(90.0)],
    },
];

/// Notification thresholds, taken from the notifications screen.
pub const ALERT_THRESHOLDS: [SeverityBands; 4] = [
    SeverityBands {
        metric: MetricType::Temperature,
        critical: &[Bound::Above(38.0)],
        warning: &[Bound::Above(37.5)],
    },
    SeverityBands {
        metric: MetricType::HeartRate,
        critical: &[Bound::Below(50.0), Bound::Above(120.0)],
        warning: &[Bound::Above(100.0)],
    },
    SeverityBands {
        metric: MetricType::Spo2,
        critical: &[Bound::Below(92.0)],
        warning: &[Bound::Below(95.0)],
    },
    SeverityBands {
        metric: MetricType::BloodPressure,
        critical: &[Bound::AtOrAbove(160.0)],
        warning: &[Bound::Above(140.0)],
    },
];

/// Qualitative wording used by the chat engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatTier {
    CriticallyLow,
    Low,
    Normal,
    Elevated,
    High,
    CriticallyHigh,
}

impl ChatTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChatTier::CriticallyLow => "critically low",
            ChatTier::Low => "low",
            ChatTier::Normal => "normal",
            ChatTier::Elevated => "elevated",
            ChatTier::High => "high",
            ChatTier::CriticallyHigh => "critically high",
        }
    }
}

/// Ordered ladder of `(bound, tier)` steps; the first bound the value
/// breaches wins, otherwise the tier is [`ChatTier::Normal`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChatLadder {
    pub metric: MetricType,
    pub steps: &'static [(Bound, ChatTier)],
}

impl ChatLadder {
    pub fn tier_of(&self, value: f64) -> ChatTier {
        self.steps
            .iter()
            .find(|(bound, _)| bound.breached_by(value))
            .map(|(_, tier)| *tier)
            .unwrap_or(ChatTier::Normal)
    }
}

/// Chat tiers, taken from the chat engine's knowledge base.
///
/// Heart rate: <50 / 50-60 / 60-100 / 100-120 / >120.
/// SpO2: <92 / 92-95 / >=95. Temperature: >=38.0 / 37.5-38.0 / <37.5.
/// Systolic: >=160 / 140-160 / 120-140 / <90 / 90-120.
pub const CHAT_TIERS: [ChatLadder; 4] = [
    ChatLadder {
        metric: MetricType::Temperature,
        steps: &[
            (Bound::AtOrAbove(38.0), ChatTier::High),
            (Bound::AtOrAbove(37.5), ChatTier::Elevated),
        ],
    },
    ChatLadder {
        metric: MetricType::HeartRate,
        steps: &[
            (Bound::Below(50.0), ChatTier::CriticallyLow),
            (Bound::Below(60.0), ChatTier::Low),
            (Bound::Above(120.0), ChatTier::High),
            (Bound::Above(100.0), ChatTier::Elevated),
        ],
    },
    ChatLadder {
        metric: MetricType::Spo2,
        steps: &[
            (Bound::Below(92.0), ChatTier::CriticallyLow),
            (Bound::Below(95.0), ChatTier::Low),
        ],
    },
    ChatLadder {
        metric: MetricType::BloodPressure,
        steps: &[
            (Bound::AtOrAbove(160.0), ChatTier::CriticallyHigh),
            (Bound::AtOrAbove(140.0), ChatTier::High),
            (Bound::AtOrAbove(120.0), ChatTier::Elevated),
            (Bound::Below(90.0), ChatTier::Low),
        ],
    },
];

// Tables are declared in `MetricType::ALL` order.
fn table_index(metric: MetricType) -> usize {
    MetricType::ALL
        .iter()
        .position(|candidate| *candidate == metric)
        .unwrap_or(0)
}

pub fn display_bands(metric: MetricType) -> &'static SeverityBands {
    &DISPLAY_THRESHOLDS[table_index(metric)]
}

pub fn alert_bands(metric: MetricType) -> &'static SeverityBands {
    &ALERT_THRESHOLDS[table_index(metric)]
}

pub fn chat_ladder(metric: MetricType) -> &'static ChatLadder {
    &CHAT_TIERS[table_index(metric)]
}
