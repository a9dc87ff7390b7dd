//! Vital-sign data model.
//!
//! `RawReading` is what the reading source hands us, `SanitizedVitals` is the
//! sticky "last known good" snapshot derived from it.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The four measured vital signs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricType {
    Temperature,
    HeartRate,
    Spo2,
    /// Systolic blood pressure. The source only reports the upper number.
    #[serde(rename = "systolic", alias = "blood_pressure")]
    BloodPressure,
}

impl MetricType {
    /// Fixed alerting order: temperature, heart rate, spo2, systolic.
    pub const ALL: [MetricType; 4] = [
        MetricType::Temperature,
        MetricType::HeartRate,
        MetricType::Spo2,
        MetricType::BloodPressure,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MetricType::Temperature => "temperature",
            MetricType::HeartRate => "heart_rate",
            MetricType::Spo2 => "spo2",
            MetricType::BloodPressure => "systolic",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value {
            "temperature" => Some(MetricType::Temperature),
            "heart_rate" => Some(MetricType::HeartRate),
            "spo2" => Some(MetricType::Spo2),
            "systolic" | "blood_pressure" => Some(MetricType::BloodPressure),
            _ => None,
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            MetricType::Temperature => "°C",
            MetricType::HeartRate => "BPM",
            MetricType::Spo2 => "%",
            MetricType::BloodPressure => "mmHg",
        }
    }

    /// Renders a value the way every message in the app does: one decimal for
    /// spo2 and temperature, whole numbers otherwise. Halves round away from
    /// zero in both cases.
    pub fn format_value(&self, value: f64) -> String {
        match self {
            MetricType::Temperature | MetricType::Spo2 => {
                let rounded = (value * 10.0).round() / 10.0;
                format!("{rounded:.1}")
            }
            MetricType::HeartRate | MetricType::BloodPressure => format!("{}", value.round()),
        }
    }
}

impl fmt::Display for MetricType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Severity tier. Ordered so that `Normal < Warning < Critical`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Severity {
    Normal,
    Warning,
    Critical,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Normal => "normal",
            Severity::Warning => "warning",
            Severity::Critical => "critical",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value {
            "normal" => Some(Severity::Normal),
            "warning" => Some(Severity::Warning),
            "critical" => Some(Severity::Critical),
            _ => None,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One element of the source's `/api/data` array.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawReading {
    #[serde(default)]
    pub heart_rate: Option<f64>,
    #[serde(default)]
    pub spo2: Option<f64>,
    #[serde(default)]
    pub temperature: Option<f64>,
    /// Systolic pressure, despite the name.
    #[serde(default)]
    pub blood_pressure: Option<f64>,
    #[serde(default)]
    pub timestamp: Option<String>,
}

/// Last-known-good values. `None` means no valid value has been seen yet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SanitizedVitals {
    #[serde(default)]
    pub heart_rate: Option<f64>,
    #[serde(default)]
    pub spo2: Option<f64>,
    #[serde(default)]
    pub temperature: Option<f64>,
    #[serde(default)]
    pub systolic: Option<f64>,
    /// No known source reports this; it stays `None` unless set by hand.
    #[serde(default)]
    pub diastolic: Option<f64>,
}

impl SanitizedVitals {
    pub fn get(&self, metric: MetricType) -> Option<f64> {
        match metric {
            MetricType::Temperature => self.temperature,
            MetricType::HeartRate => self.heart_rate,
            MetricType::Spo2 => self.spo2,
            MetricType::BloodPressure => self.systolic,
        }
    }

    pub fn is_empty(&self) -> bool {
        MetricType::ALL.iter().all(|metric| self.get(*metric).is_none())
    }

    /// Display severities for all four metrics.
    pub fn statuses(&self) -> VitalStatuses {
        use super::classifier::classify;

        VitalStatuses {
            temperature: classify(MetricType::Temperature, self.temperature),
            heart_rate: classify(MetricType::HeartRate, self.heart_rate),
            spo2: classify(MetricType::Spo2, self.spo2),
            blood_pressure: classify(MetricType::BloodPressure, self.systolic),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VitalStatuses {
    pub temperature: Severity,
    pub heart_rate: Severity,
    pub spo2: Severity,
    pub blood_pressure: Severity,
}

impl VitalStatuses {
    pub fn get(&self, metric: MetricType) -> Severity {
        match metric {
            MetricType::Temperature => self.temperature,
            MetricType::HeartRate => self.heart_rate,
            MetricType::Spo2 => self.spo2,
            MetricType::BloodPressure => self.blood_pressure,
        }
    }

    /// Worst of the four.
    pub fn overall(&self) -> Severity {
        MetricType::ALL
            .iter()
            .map(|metric| self.get(*metric))
            .max()
            .unwrap_or(Severity::Normal)
    }
}
