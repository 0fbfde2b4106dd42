use crate::error::{Result, SourceError};
use crate::wire::decode_status;
use gasmon_traits::{DeviceStatus, StatusSource};
use std::time::Duration;

/// Polls the remote weight API over HTTP(S).
pub struct HttpStatusSource {
    client: reqwest::blocking::Client,
    status_url: String,
}

impl HttpStatusSource {
    /// `base_url` is the API root; requests go to `{base_url}/status`.
    pub fn new(base_url: &str, default_timeout: Duration) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(default_timeout)
            .build()
            .map_err(|e| SourceError::Http(format!("failed to create http client: {e}")))?;
        Ok(Self {
            client,
            status_url: status_url(base_url),
        })
    }

    pub fn status_url(&self) -> &str {
        &self.status_url
    }

    /// One request with a per-call timeout.
    pub fn get_status(&self, timeout: Duration) -> Result<DeviceStatus> {
        let resp = self.client.get(&self.status_url).timeout(timeout).send()?;
        let code = resp.status();
        if !code.is_success() {
            return Err(SourceError::Status(code.as_u16()));
        }
        let body = resp.text()?;
        let status = decode_status(&body)?;
        tracing::debug!(
            weight_kg = status.weight_kg,
            gas_swap_count = status.gas_swap_count,
            "status received"
        );
        Ok(status)
    }
}

impl StatusSource for HttpStatusSource {
    fn fetch(
        &mut self,
        timeout: Duration,
    ) -> std::result::Result<DeviceStatus, Box<dyn std::error::Error + Send + Sync>> {
        self.get_status(timeout).map_err(Into::into)
    }
}

fn status_url(base_url: &str) -> String {
    format!("{}/status", base_url.trim_end_matches('/'))
}
