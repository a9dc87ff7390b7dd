use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::Client;
use serde_json::Value;

use crate::vitals::RawReading;

use super::{latest_reading, ReadingSource};

/// Polls `GET {base_url}/api/data`.
pub struct HttpReadingSource {
    client: Client,
    endpoint: String,
}

impl HttpReadingSource {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("failed to build HTTP client")?;

        Ok(Self {
            client,
            endpoint: format!("{}/api/data", base_url.trim_end_matches('/')),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl ReadingSource for HttpReadingSource {
    async fn fetch_latest(&self) -> Result<RawReading> {
        let payload: Value = self
            .client
            .get(&self.endpoint)
            .send()
            .await
            .with_context(|| format!("request to {} failed", self.endpoint))?
            .error_for_status()
            .with_context(|| format!("{} returned an error status", self.endpoint))?
            .json()
            .await
            .with_context(|| format!("{} returned a malformed body", self.endpoint))?;

        latest_reading(&payload)
    }
}
