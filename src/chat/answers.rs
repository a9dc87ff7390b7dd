//! Templated chat answers.
//!
//! Vital questions are answered from the latest sanitized snapshot using the
//! chat tiers; general questions get a fixed knowledge-base paragraph.

use crate::vitals::thresholds::{chat_ladder, ChatTier};
use crate::vitals::{MetricType, SanitizedVitals};

use super::intents::{classify_intent, ChatIntent};

pub const NUTRITION_ADVICE: &str = "A healthy pregnancy diet includes a variety of fruits, vegetables, lean proteins, and whole grains. It's important to take a prenatal vitamin with folic acid and iron. Avoid raw fish, unpasteurized dairy, and limit caffeine.";

pub const EXERCISE_ADVICE: &str = "Gentle exercise like walking, swimming, or prenatal yoga is usually recommended. Aim for about 30 minutes of moderate activity on most days. Always consult your doctor before starting a new exercise routine.";

pub const SLEEP_ADVICE: &str = "Aim for 7-9 hours of sleep per night. Sleeping on your left side can improve blood flow to the baby. Use pillows for support to get comfortable.";

pub const PREGNANCY_ADVICE: &str = "During pregnancy, it's important to maintain regular prenatal checkups, eat a balanced diet, stay hydrated, and get adequate rest. Always consult with your healthcare provider for personalized advice.";

pub const FALLBACK_REPLY: &str = "I can help with questions about your vital signs and general pregnancy topics like nutrition, exercise, and sleep. How can I assist you?";

pub const HEART_RATE_UNAVAILABLE: &str =
    "I can't access your current heart rate data right now. Please ensure your monitor is connected.";

pub const SPO2_UNAVAILABLE: &str = "I am unable to retrieve your oxygen saturation data at the moment. Please check if the sensor is properly attached.";

pub const TEMPERATURE_UNAVAILABLE: &str =
    "I cannot access your temperature data right now. Please ensure the sensor is working correctly.";

pub const BLOOD_PRESSURE_UNAVAILABLE: &str = "Your blood pressure data is currently unavailable. Please note that this is an estimate and not a diagnostic measurement.";

/// Present means set, finite and non-zero.
fn present(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite() && *v != 0.0)
}

/// The value as the patient sees it; tiers are decided on this, not on the
/// raw float.
fn displayed(metric: MetricType, value: f64) -> f64 {
    match metric {
        MetricType::Temperature | MetricType::Spo2 => (value * 10.0).round() / 10.0,
        MetricType::HeartRate | MetricType::BloodPressure => value.round(),
    }
}

/// Chat tier for a metric, or `None` when there is no usable value.
pub fn chat_tier(metric: MetricType, value: Option<f64>) -> Option<ChatTier> {
    present(value).map(|value| chat_ladder(metric).tier_of(displayed(metric, value)))
}

fn unavailable(metric: MetricType) -> &'static str {
    match metric {
        MetricType::HeartRate => HEART_RATE_UNAVAILABLE,
        MetricType::Spo2 => SPO2_UNAVAILABLE,
        MetricType::Temperature => TEMPERATURE_UNAVAILABLE,
        MetricType::BloodPressure => BLOOD_PRESSURE_UNAVAILABLE,
    }
}

fn lead_in(metric: MetricType, shown: &str) -> String {
    match metric {
        MetricType::HeartRate => format!("Your current heart rate is {shown} BPM."),
        MetricType::Spo2 => format!("Your current oxygen saturation is {shown}%."),
        MetricType::Temperature => format!("Your current temperature is {shown}°C."),
        MetricType::BloodPressure => {
            format!("Your current systolic blood pressure is approximately {shown} mmHg.")
        }
    }
}

fn assessment(metric: MetricType, tier: ChatTier) -> &'static str {
    match (metric, tier) {
        (MetricType::HeartRate, ChatTier::CriticallyLow) => {
            "This is critically low. Please contact your doctor immediately."
        }
        (MetricType::HeartRate, ChatTier::Low) => {
            "This is lower than the typical resting range. While sometimes normal, it's good to mention it to your doctor."
        }
        (MetricType::HeartRate, ChatTier::Elevated) => {
            "This is slightly elevated. An increased heart rate is common during pregnancy, but it's good to monitor."
        }
        (MetricType::HeartRate, ChatTier::High | ChatTier::CriticallyHigh) => {
            "This is high and requires attention. Please contact your doctor for guidance."
        }
        (MetricType::HeartRate, ChatTier::Normal) => "This is within the normal resting range.",

        (MetricType::Spo2, ChatTier::CriticallyLow) => {
            "This is below the recommended level. Please sit upright, take some deep breaths, and contact your doctor."
        }
        (MetricType::Spo2, ChatTier::Low) => {
            "This is slightly lower than ideal. It's important to monitor this. Ensure you are in a well-ventilated area."
        }
        (MetricType::Spo2, _) => "This is a healthy oxygen level.",

        (MetricType::Temperature, ChatTier::High | ChatTier::CriticallyHigh) => {
            "This indicates a fever, which requires immediate medical attention during pregnancy. Please contact your doctor."
        }
        (MetricType::Temperature, ChatTier::Elevated) => {
            "This is elevated. Please rest, drink plenty of fluids, and monitor your temperature closely."
        }
        (MetricType::Temperature, _) => "This is within the normal range.",

        (MetricType::BloodPressure, ChatTier::CriticallyHigh) => {
            "This is very high and requires immediate medical attention. Please contact your doctor or proceed to the nearest clinic."
        }
        (MetricType::BloodPressure, ChatTier::High) => {
            "This is considered high. It's important to report this to your doctor for further evaluation."
        }
        (MetricType::BloodPressure, ChatTier::Elevated) => {
            "This is in the elevated range. Please monitor it and discuss with your doctor at your next appointment."
        }
        (MetricType::BloodPressure, ChatTier::Low | ChatTier::CriticallyLow) => {
            "This is on the lower side. Make sure you are staying hydrated and stand up slowly to avoid dizziness."
        }
        (MetricType::BloodPressure, ChatTier::Normal) => "This is within the normal range.",
    }
}

fn vital_answer(metric: MetricType, vitals: &SanitizedVitals) -> String {
    let Some(value) = present(vitals.get(metric)) else {
        return unavailable(metric).to_string();
    };
    let tier = chat_ladder(metric).tier_of(displayed(metric, value));
    format!(
        "{} {}",
        lead_in(metric, &metric.format_value(value)),
        assessment(metric, tier)
    )
}

pub fn answer(intent: ChatIntent, vitals: &SanitizedVitals) -> String {
    match intent {
        ChatIntent::QueryHeartRate => vital_answer(MetricType::HeartRate, vitals),
        ChatIntent::QuerySpo2 => vital_answer(MetricType::Spo2, vitals),
        ChatIntent::QueryTemperature => vital_answer(MetricType::Temperature, vitals),
        ChatIntent::QueryBloodPressure => vital_answer(MetricType::BloodPressure, vitals),
        ChatIntent::GeneralNutrition => NUTRITION_ADVICE.to_string(),
        ChatIntent::GeneralExercise => EXERCISE_ADVICE.to_string(),
        ChatIntent::GeneralSleep => SLEEP_ADVICE.to_string(),
        ChatIntent::GeneralPregnancy => PREGNANCY_ADVICE.to_string(),
        ChatIntent::Fallback => FALLBACK_REPLY.to_string(),
    }
}

/// Classify then answer.
pub fn respond(question: &str, vitals: &SanitizedVitals) -> String {
    answer(classify_intent(question), vitals)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    fn vitals() -> SanitizedVitals {
        SanitizedVitals {
            heart_rate: Some(82.4),
            spo2: Some(98.0),
            temperature: Some(36.7),
            systolic: Some(112.0),
            diastolic: None,
        }
    }

    #[test]
    fn low_spo2_mentions_value_and_concern() {
        let reply = answer(
            ChatIntent::QuerySpo2,
            &SanitizedVitals {
                spo2: Some(90.0),
                ..vitals()
            },
        );
        assert!(reply.contains("90.0%"));
        assert!(reply.contains("below the recommended level"));
        assert_eq!(chat_tier(MetricType::Spo2, Some(90.0)), Some(ChatTier::CriticallyLow));
    }

    #[test]
    fn missing_spo2_returns_fixed_sentence() {
        let reply = answer(
            ChatIntent::QuerySpo2,
            &SanitizedVitals {
                spo2: None,
                ..vitals()
            },
        );
        assert_eq!(reply, SPO2_UNAVAILABLE);
    }

    #[test]
    fn zero_counts_as_missing() {
        let reply = answer(
            ChatIntent::QueryHeartRate,
            &SanitizedVitals {
                heart_rate: Some(0.0),
                ..vitals()
            },
        );
        assert_eq!(reply, HEART_RATE_UNAVAILABLE);
    }

    #[test]
    fn heart_rate_is_rounded() {
        assert_eq!(
            answer(ChatIntent::QueryHeartRate, &vitals()),
            "Your current heart rate is 82 BPM. This is within the normal resting range."
        );
    }

    #[test_case(MetricType::HeartRate, 45.0, ChatTier::CriticallyLow)]
    #[test_case(MetricType::HeartRate, 55.0, ChatTier::Low)]
    #[test_case(MetricType::HeartRate, 100.0, ChatTier::Normal)]
    #[test_case(MetricType::HeartRate, 100.4, ChatTier::Normal)]
    #[test_case(MetricType::HeartRate, 115.0, ChatTier::Elevated)]
    #[test_case(MetricType::HeartRate, 121.0, ChatTier::High)]
    #[test_case(MetricType::Spo2, 92.0, ChatTier::Low)]
    #[test_case(MetricType::Spo2, 95.0, ChatTier::Normal)]
    #[test_case(MetricType::Temperature, 37.96, ChatTier::High)]
    #[test_case(MetricType::Temperature, 37.5, ChatTier::Elevated)]
    #[test_case(MetricType::Temperature, 37.4, ChatTier::Normal)]
    #[test_case(MetricType::BloodPressure, 160.0, ChatTier::CriticallyHigh)]
    #[test_case(MetricType::BloodPressure, 139.6, ChatTier::High)]
    #[test_case(MetricType::BloodPressure, 120.0, ChatTier::Elevated)]
    #[test_case(MetricType::BloodPressure, 89.0, ChatTier::Low)]
    #[test_case(MetricType::BloodPressure, 90.0, ChatTier::Normal)]
    fn tiers(metric: MetricType, value: f64, expected: ChatTier) {
        assert_eq!(chat_tier(metric, Some(value)), Some(expected));
    }

    #[test]
    fn general_topics_are_verbatim() {
        assert_eq!(answer(ChatIntent::GeneralSleep, &vitals()), SLEEP_ADVICE);
        assert_eq!(answer(ChatIntent::Fallback, &SanitizedVitals::default()), FALLBACK_REPLY);
    }

    #[test]
    fn respond_routes_through_classifier() {
        let reply = respond("What's my pulse rate today?", &vitals());
        assert!(reply.starts_with("Your current heart rate is 82 BPM."));
        assert_eq!(respond("random unrelated text", &vitals()), FALLBACK_REPLY);
    }

    #[test]
    fn blood_pressure_answer() {
        let reply = answer(
            ChatIntent::QueryBloodPressure,
            &SanitizedVitals {
                systolic: Some(150.0),
                ..vitals()
            },
        );
        assert_eq!(
            reply,
            "Your current systolic blood pressure is approximately 150 mmHg. This is considered high. It's important to report this to your doctor for further evaluation."
        );
    }
}
