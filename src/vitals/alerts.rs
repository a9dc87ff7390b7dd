//! Alert generation.
//!
//! One pass over a sanitized snapshot yields at most one record per metric,
//! in the fixed order temperature, heart rate, spo2, systolic. There is no
//! deduplication: the same out-of-range value raises a fresh record on every
//! call. Retention is the caller's business (see `notifications`).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::sanitizer::TEMPERATURE_DISCONNECTED;
use super::thresholds::alert_bands;
use super::types::{MetricType, SanitizedVitals, Severity};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertRecord {
    pub id: String,
    pub severity: Severity,
    pub title: String,
    pub message: String,
    pub vital_type: MetricType,
    pub value: f64,
    pub timestamp: DateTime<Utc>,
    /// True exactly when `severity` is critical.
    pub action_required: bool,
    pub read: bool,
}

impl AlertRecord {
    fn new(metric: MetricType, severity: Severity, value: f64, at: DateTime<Utc>) -> Self {
        let (title, message) = alert_text(metric, severity, value);
        Self {
            id: Uuid::new_v4().to_string(),
            severity,
            title: title.to_string(),
            message,
            vital_type: metric,
            value,
            timestamp: at,
            action_required: severity == Severity::Critical,
            read: false,
        }
    }
}

fn alert_text(metric: MetricType, severity: Severity, value: f64) -> (&'static str, String) {
    let shown = metric.format_value(value);
    match (metric, severity) {
        (MetricType::Temperature, Severity::Critical) => (
            "High Temperature Alert",
            format!(
                "Body temperature elevated to {shown}°C. This may indicate fever or infection. Please call your doctor immediately!"
            ),
        ),
        (MetricType::Temperature, _) => (
            "Elevated Temperature",
            format!("Temperature reading of {shown}°C detected. Monitor closely."),
        ),
        (MetricType::HeartRate, Severity::Critical) => (
            "Abnormal Heart Rate Alert",
            format!(
                "Heart rate is {shown} BPM. This may indicate a critical issue. Please call your doctor immediately!"
            ),
        ),
        (MetricType::HeartRate, _) => (
            "Elevated Heart Rate",
            format!("Heart rate reading of {shown} BPM detected."),
        ),
        (MetricType::Spo2, Severity::Critical) => (
            "Low Oxygen Level Alert",
            format!(
                "Oxygen saturation dropped to {shown}%. This is a critical condition. Please call your doctor immediately!"
            ),
        ),
        (MetricType::Spo2, _) => (
            "Low Oxygen Level Warning",
            format!("Oxygen saturation is {shown}%. Monitor closely."),
        ),
        (MetricType::BloodPressure, Severity::Critical) => (
            "High Blood Pressure Alert",
            format!(
                "Systolic blood pressure is {shown} mmHg. This is a critical condition. Please call your doctor immediately!"
            ),
        ),
        (MetricType::BloodPressure, _) => (
            "Elevated Blood Pressure",
            format!("Systolic blood pressure is {shown} mmHg. Monitor closely."),
        ),
    }
}

/// A value the alert rules are allowed to look at. Zero, negative and the
/// disconnect sentinel mean "no measurement", not "dangerously low".
fn alertable(metric: MetricType, value: Option<f64>) -> Option<f64> {
    let value = value.filter(|v| v.is_finite())?;
    match metric {
        MetricType::Temperature => (value != TEMPERATURE_DISCONNECTED).then_some(value),
        _ => (value > 0.0).then_some(value),
    }
}

/// Severity the alerting table assigns, or `None` when the metric is absent.
pub fn alert_severity(metric: MetricType, value: Option<f64>) -> Option<Severity> {
    alertable(metric, value).map(|value| alert_bands(metric).severity_of(value))
}

pub fn generate_alerts(vitals: &SanitizedVitals, at: DateTime<Utc>) -> Vec<AlertRecord> {
    MetricType::ALL
        .iter()
        .filter_map(|metric| {
            let value = alertable(*metric, vitals.get(*metric))?;
            match alert_bands(*metric).severity_of(value) {
                Severity::Normal => None,
                severity => Some(AlertRecord::new(*metric, severity, value, at)),
            }
        })
        .collect()
}
