//! The external reading source and its payload format.

mod http;

use std::future::Future;

use anyhow::{bail, Result};
use serde_json::Value;

use crate::vitals::RawReading;

pub use http::HttpReadingSource;

/// Anything that can hand the monitor the newest raw reading.
///
/// Every failure, including an empty or malformed payload, is an `Err`; the
/// caller keeps its previous state.
pub trait ReadingSource: Send + Sync + 'static {
    fn fetch_latest(&self) -> impl Future<Output = Result<RawReading>> + Send;
}

fn number_field(entry: &Value, name: &str) -> Option<f64> {
    match entry.get(name)? {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    }
}

/// Picks the newest reading out of a `/api/data` payload (an array, newest
/// first). Individual fields that are missing or not numeric come back as
/// `None` and are left to the sanitizer.
pub fn latest_reading(payload: &Value) -> Result<RawReading> {
    let Some(entries) = payload.as_array() else {
        bail!("reading payload is not an array");
    };
    let Some(latest) = entries.first() else {
        bail!("reading payload is empty");
    };
    if !latest.is_object() {
        bail!("newest reading is not an object");
    }

    Ok(RawReading {
        heart_rate: number_field(latest, "heart_rate"),
        spo2: number_field(latest, "spo2"),
        temperature: number_field(latest, "temperature"),
        blood_pressure: number_field(latest, "blood_pressure"),
        timestamp: latest
            .get("timestamp")
            .and_then(Value::as_str)
            .map(str::to_string),
    })
}
