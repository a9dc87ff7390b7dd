use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatIntent {
    QueryHeartRate,
    QuerySpo2,
    QueryTemperature,
    QueryBloodPressure,
    GeneralNutrition,
    GeneralExercise,
    GeneralSleep,
    GeneralPregnancy,
    Fallback,
}

impl ChatIntent {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChatIntent::QueryHeartRate => "query_heart_rate",
            ChatIntent::QuerySpo2 => "query_spo2",
            ChatIntent::QueryTemperature => "query_temperature",
            ChatIntent::QueryBloodPressure => "query_blood_pressure",
            ChatIntent::GeneralNutrition => "general_nutrition",
            ChatIntent::GeneralExercise => "general_exercise",
            ChatIntent::GeneralSleep => "general_sleep",
            ChatIntent::GeneralPregnancy => "general_pregnancy",
            ChatIntent::Fallback => "fallback",
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct IntentRule {
    pub intent: ChatIntent,
    pub keywords: &'static [&'static str],
    /// Minimum normalized score for the intent to be eligible.
    pub threshold: f64,
}

/// Summed keyword lengths are divided by this.
pub const SCORE_NORMALIZER: f64 = 10.0;

/// Declaration order breaks ties.
pub const INTENT_RULES: [IntentRule; 8] = [
    IntentRule {
        intent: ChatIntent::QueryHeartRate,
        keywords: &["heart rate", "pulse rate", "pulse", "heartbeat"],
        threshold: 0.8,
    },
    IntentRule {
        intent: ChatIntent::QuerySpo2,
        keywords: &["oxygen", "spo2", "saturation"],
        threshold: 0.8,
    },
    IntentRule {
        intent: ChatIntent::QueryTemperature,
        keywords: &["temperature", "fever", "hot", "cold"],
        threshold: 0.7,
    },
    IntentRule {
        intent: ChatIntent::QueryBloodPressure,
        keywords: &["blood pressure", "bp"],
        threshold: 0.8,
    },
    IntentRule {
        intent: ChatIntent::GeneralNutrition,
        keywords: &["eat", "diet", "nutrition", "food", "drink"],
        threshold: 0.6,
    },
    IntentRule {
        intent: ChatIntent::GeneralExercise,
        keywords: &["exercise", "walk", "swim", "yoga", "active", "workout"],
        threshold: 0.6,
    },
    IntentRule {
        intent: ChatIntent::GeneralSleep,
        keywords: &["sleep", "tired", "rest", "nap"],
        threshold: 0.6,
    },
    IntentRule {
        intent: ChatIntent::GeneralPregnancy,
        keywords: &["pregnancy", "baby", "prenatal"],
        threshold: 0.7,
    },
];

impl IntentRule {
    /// Sum of the lengths of every keyword found as a substring, normalized.
    pub fn score(&self, lowered: &str) -> f64 {
        let matched: usize = self
            .keywords
            .iter()
            .filter(|keyword| lowered.contains(**keyword))
            .map(|keyword| keyword.chars().count())
            .sum();
        matched as f64 / SCORE_NORMALIZER
    }
}

/// Picks the highest-scoring intent that clears its own threshold.
pub fn classify_intent(text: &str) -> ChatIntent {
    let lowered = text.to_lowercase();
    let mut best = (ChatIntent::Fallback, 0.0);

    for rule in &INTENT_RULES {
        let score = rule.score(&lowered);
        if score > best.1 && score >= rule.threshold {
            best = (rule.intent, score);
        }
    }

    best.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("What's my pulse rate today?", ChatIntent::QueryHeartRate)]
    #[test_case("How is my HEART RATE?", ChatIntent::QueryHeartRate)]
    #[test_case("what is my oxygen saturation", ChatIntent::QuerySpo2)]
    #[test_case("what is my temperature", ChatIntent::QueryTemperature)]
    #[test_case("check my blood pressure", ChatIntent::QueryBloodPressure)]
    #[test_case("what food should I eat", ChatIntent::GeneralNutrition)]
    #[test_case("can I do yoga or swim", ChatIntent::GeneralExercise)]
    #[test_case("I feel tired and want to sleep", ChatIntent::GeneralSleep)]
    #[test_case("tips for my pregnancy", ChatIntent::GeneralPregnancy)]
    #[test_case("random unrelated text", ChatIntent::Fallback)]
    #[test_case("", ChatIntent::Fallback)]
    fn classifies(text: &str, expected: ChatIntent) {
        assert_eq!(classify_intent(text), expected);
    }

    #[test]
    fn single_short_keyword_stays_below_threshold() {
        // "bp" scores 0.2, "pulse" alone 0.5; both under 0.8.
        assert_eq!(classify_intent("bp?"), ChatIntent::Fallback);
        assert_eq!(classify_intent("pulse?"), ChatIntent::Fallback);
    }

    #[test]
    fn substring_matching_is_literal() {
        // "photo" contains "hot" (0.3), under the temperature threshold.
        assert_eq!(classify_intent("photo"), ChatIntent::Fallback);
    }

    #[test]
    fn ties_keep_the_earlier_intent() {
        // "nutrition" (0.9) against "pregnancy" (0.9): nutrition is declared first.
        assert_eq!(classify_intent("nutrition pregnancy"), ChatIntent::GeneralNutrition);
    }

    #[test]
    fn higher_score_wins_over_declaration_order() {
        // oxygen (0.6) fails its 0.8 threshold; "blood pressure" scores 1.4.
        assert_eq!(
            classify_intent("oxygen and blood pressure"),
            ChatIntent::QueryBloodPressure
        );
    }
}
