//! Health tip cards for the patient dashboard.

use serde::{Deserialize, Serialize};

use super::thresholds::{Bound, SeverityBands};
use super::types::{MetricType, SanitizedVitals, Severity};

const MAX_TIPS: usize = 5;

/// Tip cards follow their own bands, separate from display and alerting.
/// Heart rate has no lower bound and systolic has no warning band.
const TIP_BANDS: [SeverityBands; 4] = [
    SeverityBands {
        metric: MetricType::Temperature,
        critical: &[Bound::Above(38.0)],
        warning: &[Bound::Above(37.5)],
    },
    SeverityBands {
        metric: MetricType::HeartRate,
        critical: &[Bound::Above(120.0)],
        warning: &[Bound::Above(100.0)],
    },
    SeverityBands {
        metric: MetricType::Spo2,
        critical: &[Bound::Below(90.0)],
        warning: &[Bound::Below(95.0)],
    },
    SeverityBands {
        metric: MetricType::BloodPressure,
        critical: &[Bound::Above(140.0), Bound::Below(90.0)],
        warning: &[],
    },
];

const LOW_SYSTOLIC: f64 = 90.0;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthTip {
    pub metric: Option<MetricType>,
    pub severity: Severity,
    pub title: String,
    pub message: String,
}

fn tip_for(metric: MetricType, severity: Severity, value: f64) -> HealthTip {
    let shown = metric.format_value(value);
    let (title, message) = match (metric, severity) {
        (MetricType::Temperature, Severity::Critical) => (
            "High Temperature Alert",
            format!("Your temperature is {shown}°C. Rest, stay hydrated, and contact your doctor."),
        ),
        (MetricType::Temperature, Severity::Warning) => (
            "Elevated Temperature",
            format!("Temperature reading of {shown}°C detected. Monitor closely."),
        ),
        (MetricType::Temperature, Severity::Normal) => (
            "Normal Temperature",
            "Your temperature is within a healthy range. Keep staying active and hydrated!".to_string(),
        ),
        (MetricType::HeartRate, Severity::Critical) => (
            "High Heart Rate Alert",
            format!("Heart rate elevated to {shown} BPM. Try deep breathing exercises."),
        ),
        (MetricType::HeartRate, Severity::Warning) => (
            "Elevated Heart Rate",
            format!("Heart rate reading of {shown} BPM. Practice relaxation techniques."),
        ),
        (MetricType::HeartRate, Severity::Normal) => (
            "Healthy Heart Rate",
            "Your heart rate is within a normal range. Keep up the good work!".to_string(),
        ),
        (MetricType::Spo2, Severity::Critical) => (
            "Low Oxygen Alert",
            format!("Oxygen level dropped to {shown}%. Sit upright and take deep breaths."),
        ),
        (MetricType::Spo2, Severity::Warning) => (
            "Low Oxygen Level",
            format!("Oxygen reading of {shown}% detected. Practice deep breathing."),
        ),
        (MetricType::Spo2, Severity::Normal) => (
            "Healthy Oxygen Level",
            "Your oxygen saturation is optimal. Keep breathing deeply and staying active!".to_string(),
        ),
        (MetricType::BloodPressure, Severity::Critical) if value < LOW_SYSTOLIC => (
            "Low Blood Pressure Alert",
            format!(
                "Your systolic blood pressure is {shown} mmHg. Stay hydrated and eat balanced meals."
            ),
        ),
        (MetricType::BloodPressure, Severity::Normal) => (
            "Healthy Blood Pressure",
            "Your blood pressure is within a normal range. Keep maintaining a healthy lifestyle!"
                .to_string(),
        ),
        (MetricType::BloodPressure, _) => (
            "High Blood Pressure Alert",
            format!(
                "Your systolic blood pressure is {shown} mmHg. Reduce salt intake and consult your doctor."
            ),
        ),
    };

    HealthTip {
        metric: Some(metric),
        severity,
        title: title.to_string(),
        message,
    }
}

fn all_good() -> HealthTip {
    HealthTip {
        metric: None,
        severity: Severity::Normal,
        title: "All Good!".to_string(),
        message: "Your vital signs are within normal range. Keep up the great work!".to_string(),
    }
}

/// Whether a stored value gets a card at all. The disconnected-probe sentinel
/// and non-positive values are skipped.
fn measured(metric: MetricType, value: f64) -> bool {
    match metric {
        MetricType::Temperature => value != -127.0,
        _ => value > 0.0,
    }
}

/// One card per measured metric, in alerting order; an "All Good!" card when
/// nothing has been measured yet.
pub fn health_tips(vitals: &SanitizedVitals) -> Vec<HealthTip> {
    let mut tips: Vec<HealthTip> = TIP_BANDS
        .iter()
        .filter_map(|bands| {
            let value = vitals.get(bands.metric)?;
            if !measured(bands.metric, value) {
                return None;
            }
            Some(tip_for(bands.metric, bands.severity_of(value), value))
        })
        .collect();

    if tips.is_empty() {
        tips.push(all_good());
    }
    tips.truncate(MAX_TIPS);
    tips
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn empty_snapshot_gets_all_good_card() {
        let tips = health_tips(&SanitizedVitals::default());
        assert_eq!(tips, vec![all_good()]);
    }

    #[test]
    fn one_card_per_present_metric() {
        let vitals = SanitizedVitals {
            heart_rate: Some(125.0),
            spo2: Some(98.0),
            ..Default::default()
        };
        let tips = health_tips(&vitals);
        assert_eq!(tips.len(), 2);
        assert_eq!(tips[0].title, "High Heart Rate Alert");
        assert_eq!(tips[0].message, "Heart rate elevated to 125 BPM. Try deep breathing exercises.");
        assert_eq!(tips[1].severity, Severity::Normal);
    }

    #[test]
    fn low_systolic_gets_its_own_card() {
        let vitals = SanitizedVitals {
            systolic: Some(85.0),
            ..Default::default()
        };
        let tips = health_tips(&vitals);
        assert_eq!(tips[0].title, "Low Blood Pressure Alert");
        assert_eq!(tips[0].severity, Severity::Critical);
        assert_eq!(
            tips[0].message,
            "Your systolic blood pressure is 85 mmHg. Stay hydrated and eat balanced meals."
        );
    }

    #[test_case(MetricType::HeartRate, 45.0, Severity::Normal, "Healthy Heart Rate" ; "slow heart rate is not flagged")]
    #[test_case(MetricType::HeartRate, 101.0, Severity::Warning, "Elevated Heart Rate" ; "heart rate above 100")]
    #[test_case(MetricType::HeartRate, 121.0, Severity::Critical, "High Heart Rate Alert" ; "heart rate above 120")]
    #[test_case(MetricType::Spo2, 91.0, Severity::Warning, "Low Oxygen Level" ; "spo2 between 90 and 95")]
    #[test_case(MetricType::Spo2, 89.0, Severity::Critical, "Low Oxygen Alert" ; "spo2 below 90")]
    #[test_case(MetricType::Spo2, 95.0, Severity::Normal, "Healthy Oxygen Level" ; "spo2 at 95")]
    #[test_case(MetricType::Temperature, 37.6, Severity::Warning, "Elevated Temperature" ; "temperature above 37.5")]
    #[test_case(MetricType::Temperature, 38.0, Severity::Warning, "Elevated Temperature" ; "temperature at 38")]
    #[test_case(MetricType::BloodPressure, 145.0, Severity::Critical, "High Blood Pressure Alert" ; "systolic above 140")]
    #[test_case(MetricType::BloodPressure, 140.0, Severity::Normal, "Healthy Blood Pressure" ; "systolic at 140")]
    fn tip_bands(metric: MetricType, value: f64, severity: Severity, title: &str) {
        let mut vitals = SanitizedVitals::default();
        match metric {
            MetricType::Temperature => vitals.temperature = Some(value),
            MetricType::HeartRate => vitals.heart_rate = Some(value),
            MetricType::Spo2 => vitals.spo2 = Some(value),
            MetricType::BloodPressure => vitals.systolic = Some(value),
        }
        let tips = health_tips(&vitals);
        assert_eq!(tips.len(), 1);
        assert_eq!(tips[0].severity, severity);
        assert_eq!(tips[0].title, title);
    }

    #[test]
    fn disconnected_temperature_gets_no_card() {
        let vitals = SanitizedVitals {
            temperature: Some(-127.0),
            ..Default::default()
        };
        assert_eq!(health_tips(&vitals), vec![all_good()]);
    }

    #[test]
    fn temperature_is_shown_as_measured() {
        let vitals = SanitizedVitals {
            temperature: Some(38.2),
            ..Default::default()
        };
        let tips = health_tips(&vitals);
        assert_eq!(
            tips[0].message,
            "Your temperature is 38.2°C. Rest, stay hydrated, and contact your doctor."
        );
    }
}
