//! Dashboard state as seen by the render path.
//!
//! The poller owns the only writable copy and publishes whole replacements;
//! readers never observe a partially applied update.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::model::{DashboardResponse, DeviceCard, DeviceTelemetry};
use crate::status::derive_card;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    /// No fetch has resolved yet
    Loading,
    /// At least one fetch has succeeded
    Ready,
    /// The latest fetch failed and none has ever succeeded
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardState {
    pub devices: Vec<DeviceTelemetry>,
    pub loading: bool,
    pub error: Option<String>,
    pub last_refreshed: Option<DateTime<Utc>>,
}

impl Default for DashboardState {
    fn default() -> Self {
        Self {
            devices: Vec::new(),
            loading: true,
            error: None,
            last_refreshed: None,
        }
    }
}

/// What the presentation layer should draw
#[derive(Debug, Clone)]
pub enum View {
    Loading,
    Error(String),
    Devices {
        cards: Vec<DeviceCard>,
        /// Set when the latest fetch failed; the cards are last-known-good
        banner: Option<String>,
        last_refreshed: DateTime<Utc>,
    },
}

impl DashboardState {
    /// Replaces the snapshot wholesale
    pub fn apply_success(&self, devices: Vec<DeviceTelemetry>, now: DateTime<Utc>) -> Self {
        Self {
            devices,
            loading: false,
            error: None,
            last_refreshed: Some(now),
        }
    }

    /// Keeps the previous snapshot and refresh time
    pub fn apply_failure(&self, message: impl Into<String>) -> Self {
        Self {
            devices: self.devices.clone(),
            loading: false,
            error: Some(message.into()),
            last_refreshed: self.last_refreshed,
        }
    }

    pub fn phase(&self) -> Phase {
        if self.last_refreshed.is_some() {
            Phase::Ready
        } else if self.loading {
            Phase::Loading
        } else {
            Phase::Error
        }
    }

    pub fn cards(&self, now: DateTime<Utc>) -> Vec<DeviceCard> {
        self.devices.iter().map(|d| derive_card(d, now)).collect()
    }

    pub fn view(&self, now: DateTime<Utc>) -> View {
        match (self.phase(), self.last_refreshed) {
            (Phase::Ready, Some(last_refreshed)) => View::Devices {
                cards: self.cards(now),
                banner: self.error.clone(),
                last_refreshed,
            },
            (Phase::Error, _) => View::Error(self.error.clone().unwrap_or_default()),
            _ => View::Loading,
        }
    }

    pub fn to_response(&self, now: DateTime<Utc>) -> DashboardResponse {
        let devices = self.cards(now);
        DashboardResponse {
            phase: self.phase(),
            loading: self.loading,
            error: self.error.clone(),
            last_refreshed: self.last_refreshed,
            total: devices.len(),
            devices,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::FETCH_FAILED;
    use crate::status::DeviceStatus;

    fn reading(device_id: &str, now: DateTime<Utc>) -> DeviceTelemetry {
        DeviceTelemetry {
            device_id: device_id.to_string(),
            heart_rate: 72,
            steps: 1000,
            timestamp: now,
            battery_level: 80,
        }
    }

    #[test]
    fn test_initial_state_is_loading() {
        let state = DashboardState::default();
        assert_eq!(state.phase(), Phase::Loading);
        assert!(matches!(state.view(Utc::now()), View::Loading));
    }

    #[test]
    fn test_success_replaces_devices() {
        let now = Utc::now();
        let state = DashboardState::default()
            .apply_success(vec![reading("A", now), reading("B", now)], now)
            .apply_success(vec![reading("C", now)], now);

        assert_eq!(state.devices, vec![reading("C", now)]);
        assert_eq!(state.error, None);
        assert_eq!(state.last_refreshed, Some(now));
        assert_eq!(state.phase(), Phase::Ready);
    }

    #[test]
    fn test_failure_before_success_is_error() {
        let state = DashboardState::default().apply_failure(FETCH_FAILED);
        assert_eq!(state.phase(), Phase::Error);
        assert!(!state.loading);
        match state.view(Utc::now()) {
            View::Error(message) => assert_eq!(message, FETCH_FAILED),
            other => panic!("expected error view, got {:?}", other),
        }
    }

    #[test]
    fn test_failure_after_success_keeps_stale_devices() {
        let now = Utc::now();
        let ready = DashboardState::default().apply_success(vec![reading("A", now)], now);
        let failed = ready.apply_failure(FETCH_FAILED);

        assert_eq!(failed.devices, ready.devices);
        assert_eq!(failed.last_refreshed, ready.last_refreshed);
        assert_eq!(failed.error.as_deref(), Some(FETCH_FAILED));
        assert_eq!(failed.phase(), Phase::Ready);

        match failed.view(now) {
            View::Devices { cards, banner, .. } => {
                assert_eq!(cards.len(), 1);
                assert_eq!(banner.as_deref(), Some(FETCH_FAILED));
            }
            other => panic!("expected devices view, got {:?}", other),
        }
    }

    #[test]
    fn test_recovery_clears_error() {
        let now = Utc::now();
        let state = DashboardState::default()
            .apply_failure(FETCH_FAILED)
            .apply_success(vec![reading("A", now)], now);
        assert_eq!(state.error, None);
        assert_eq!(state.phase(), Phase::Ready);
    }

    #[test]
    fn test_response_preserves_order() {
        let now = Utc::now();
        let state = DashboardState::default()
            .apply_success(vec![reading("Z", now), reading("A", now), reading("M", now)], now);

        let response = state.to_response(now);
        let ids: Vec<&str> = response
            .devices
            .iter()
            .map(|c| c.telemetry.device_id.as_str())
            .collect();
        assert_eq!(ids, vec!["Z", "A", "M"]);
        assert_eq!(response.total, 3);
        assert!(response.devices.iter().all(|c| c.status == DeviceStatus::Good));
    }
}
