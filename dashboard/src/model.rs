use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::status::{BatteryTier, DeviceStatus, HeartRateTier};

/// Wearable device telemetry as reported by the telemetry source
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceTelemetry {
    pub device_id: String,
    pub heart_rate: u32,
    pub steps: u64,
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub timestamp: DateTime<Utc>,
    pub battery_level: u8,
}

/// Accepts RFC 3339 as well as offset-less ISO-8601, which is read as UTC.
fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_timestamp(&raw).map_err(serde::de::Error::custom)
}

pub fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    match DateTime::parse_from_rfc3339(raw) {
        Ok(ts) => Ok(ts.with_timezone(&Utc)),
        Err(_) => NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f").map(|ts| ts.and_utc()),
    }
}

/// One rendered device card
#[derive(Debug, Clone, Serialize)]
pub struct DeviceCard {
    #[serde(flatten)]
    pub telemetry: DeviceTelemetry,
    pub minutes_since_update: f64,
    pub heart_rate_tier: HeartRateTier,
    pub heart_rate_color: &'static str,
    pub battery_tier: BatteryTier,
    pub battery_color: &'static str,
    /// Progress-bar fill in [0, 1]
    pub heart_rate_fraction: f64,
    pub steps_fraction: f64,
    pub battery_fraction: f64,
    pub status: DeviceStatus,
    pub status_color: &'static str,
}

/// REST API response for the dashboard view
#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub phase: crate::state::Phase,
    pub loading: bool,
    pub error: Option<String>,
    pub last_refreshed: Option<DateTime<Utc>>,
    pub devices: Vec<DeviceCard>,
    pub total: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_naive_timestamp_is_utc() {
        let ts = parse_timestamp("2024-05-01T12:00:00.123456").unwrap();
        assert_eq!(
            ts,
            Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap() + chrono::Duration::microseconds(123456)
        );
    }

    #[test]
    fn test_rfc3339_timestamp_with_offset() {
        let ts = parse_timestamp("2024-05-01T14:00:00+02:00").unwrap();
        assert_eq!(ts, Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap());
    }

    #[test]
    fn test_invalid_timestamp() {
        assert!(parse_timestamp("yesterday").is_err());
    }

    #[test]
    fn test_deserialize_simulator_payload() {
        let payload = r#"{
            "device_id": "device_0",
            "heart_rate": 72,
            "steps": 1000,
            "timestamp": "2024-05-01T12:00:00",
            "battery_level": 80
        }"#;

        let telemetry: DeviceTelemetry = serde_json::from_str(payload).unwrap();
        assert_eq!(telemetry.device_id, "device_0");
        assert_eq!(telemetry.heart_rate, 72);
        assert_eq!(telemetry.steps, 1000);
        assert_eq!(telemetry.battery_level, 80);
        assert_eq!(telemetry.timestamp, Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap());
    }
}
