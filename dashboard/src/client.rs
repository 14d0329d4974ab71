use crate::errors::{Error, Result};
use crate::model::DeviceTelemetry;
use crate::validate::validate_snapshot;
use tracing::debug;

const TELEMETRY_PATH: &str = "/telemetry/all";

/// HTTP client for the telemetry source
#[derive(Debug, Clone)]
pub struct TelemetryClient {
    client: reqwest::Client,
    url: String,
}

impl TelemetryClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: format!("{}{}", base_url.trim_end_matches('/'), TELEMETRY_PATH),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Fetches the current snapshot of every device
    pub async fn fetch_all(&self) -> Result<Vec<DeviceTelemetry>> {
        let resp = self.client.get(&self.url).send().await?;

        if !resp.status().is_success() {
            return Err(Error::Status(resp.status()));
        }

        let body = resp.bytes().await?;
        let snapshot: Vec<DeviceTelemetry> = serde_json::from_slice(&body)?;
        validate_snapshot(&snapshot)?;

        debug!("Fetched {} devices from {}", snapshot.len(), self.url);
        Ok(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_joins_base() {
        assert_eq!(
            TelemetryClient::new("http://localhost:5000").url(),
            "http://localhost:5000/telemetry/all"
        );
        assert_eq!(
            TelemetryClient::new("http://localhost:5000/").url(),
            "http://localhost:5000/telemetry/all"
        );
    }

    #[test]
    fn test_fetch_unreachable_source() {
        tokio_test::block_on(async {
            // Port 1 is reserved and closed on test hosts
            let client = TelemetryClient::new("http://127.0.0.1:1");
            assert!(matches!(client.fetch_all().await, Err(Error::Http(_))));
        });
    }
}
