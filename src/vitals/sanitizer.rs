//! Raw reading validation and the sticky merge into the last-known-good
//! snapshot.
//!
//! Invalid values are an expected input (sensor warm-up, disconnects, noise)
//! and are dropped silently.

use super::types::{RawReading, SanitizedVitals};

/// DS18B20 reports this when the probe is unplugged.
pub const TEMPERATURE_DISCONNECTED: f64 = -127.0;

/// Anything at or below this is not a body temperature.
pub const MIN_PLAUSIBLE_TEMPERATURE: f64 = 20.0;

/// Exclusive systolic range accepted from the cuff.
pub const SYSTOLIC_VALID_RANGE: (f64, f64) = (60.0, 180.0);

pub fn is_valid_heart_rate(value: f64) -> bool {
    value > 0.0
}

pub fn is_valid_spo2(value: f64) -> bool {
    value > 0.0
}

pub fn is_valid_temperature(value: f64) -> bool {
    value > MIN_PLAUSIBLE_TEMPERATURE && value != TEMPERATURE_DISCONNECTED
}

pub fn is_valid_systolic(value: f64) -> bool {
    let (low, high) = SYSTOLIC_VALID_RANGE;
    value > low && value < high
}

fn keep_valid(previous: Option<f64>, raw: Option<f64>, is_valid: fn(f64) -> bool) -> Option<f64> {
    match raw {
        Some(value) if value.is_finite() && is_valid(value) => Some(value),
        _ => previous,
    }
}

/// Merges one raw reading into the previous snapshot.
///
/// Each field is replaced only when the raw value passes its validity
/// predicate; otherwise the previous value is kept. `diastolic` is never
/// touched.
pub fn sanitize(previous: SanitizedVitals, raw: &RawReading) -> SanitizedVitals {
    SanitizedVitals {
        heart_rate: keep_valid(previous.heart_rate, raw.heart_rate, is_valid_heart_rate),
        spo2: keep_valid(previous.spo2, raw.spo2, is_valid_spo2),
        temperature: keep_valid(previous.temperature, raw.temperature, is_valid_temperature),
        systolic: keep_valid(previous.systolic, raw.blood_pressure, is_valid_systolic),
        diastolic: previous.diastolic,
    }
}
