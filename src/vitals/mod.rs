//! Vital-sign rules engine: sanitizing raw readings, colouring them for
//! display, raising alerts and producing health tips. Everything here is
//! synchronous and infallible.

pub mod alerts;
pub mod classifier;
pub mod sanitizer;
pub mod thresholds;
pub mod tips;
pub mod types;

pub use alerts::{alert_severity, generate_alerts, AlertRecord};
pub use classifier::classify;
pub use sanitizer::sanitize;
pub use thresholds::{ChatTier, ALERT_THRESHOLDS, CHAT_TIERS, DISPLAY_THRESHOLDS};
pub use tips::{health_tips, HealthTip};
pub use types::{MetricType, RawReading, SanitizedVitals, Severity, VitalStatuses};
