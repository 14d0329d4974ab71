use crate::poller::DEFAULT_POLL_INTERVAL;
use clap::Parser;
use std::time::Duration;

#[derive(Debug, Clone, Parser)]
#[command(name = "dashboard", about = "Polls device telemetry and serves the dashboard view")]
pub struct Config {
    /// Base URL of the telemetry source
    #[arg(long, env = "TELEMETRY_URL", default_value = "http://localhost:5000")]
    pub telemetry_url: String,

    /// Seconds between polls
    #[arg(
        long,
        env = "POLL_INTERVAL_SECS",
        default_value_t = DEFAULT_POLL_INTERVAL.as_secs(),
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub poll_interval_secs: u64,

    /// Address for the dashboard HTTP API
    #[arg(long, env = "HTTP_ADDR", default_value = "0.0.0.0:8080")]
    pub http_addr: String,
}

impl Config {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::try_parse_from(["dashboard"]).unwrap();
        assert_eq!(config.poll_interval(), DEFAULT_POLL_INTERVAL);
        assert_eq!(config.poll_interval(), Duration::from_secs(5));
    }

    #[test]
    fn test_zero_interval_rejected() {
        assert!(Config::try_parse_from(["dashboard", "--poll-interval-secs", "0"]).is_err());
    }

    #[test]
    fn test_flags_override() {
        let config = Config::try_parse_from([
            "dashboard",
            "--telemetry-url",
            "http://sim:5000",
            "--http-addr",
            "127.0.0.1:9000",
        ])
        .unwrap();
        assert_eq!(config.telemetry_url, "http://sim:5000");
        assert_eq!(config.http_addr, "127.0.0.1:9000");
    }
}
