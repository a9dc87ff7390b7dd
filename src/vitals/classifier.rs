use super::thresholds::display_bands;
use super::types::{MetricType, Severity};

/// Maps a metric value to its display severity.
///
/// `None` is critical: a blank card must never read as healthy. Total over
/// all `f64` inputs, NaN included.
pub fn classify(metric: MetricType, value: Option<f64>) -> Severity {
    match value {
        Some(value) => display_bands(metric).severity_of(value),
        None => Severity::Critical,
    }
}
