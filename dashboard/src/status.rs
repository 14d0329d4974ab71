//! Display classifications derived from a single telemetry reading.
//!
//! Every function here is pure and total over its input domain. Thresholds
//! are compared against the raw reading; no smoothing or history is involved.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::model::{DeviceCard, DeviceTelemetry};

const GREEN: &str = "#4caf50";
const ORANGE: &str = "#ff9800";
const RED: &str = "#f44336";
const BLUE: &str = "#2196f3";

const BATTERY_FULL_ABOVE: u8 = 70;
const BATTERY_MEDIUM_ABOVE: u8 = 30;

const HEART_RATE_NORMAL_FROM: u32 = 60;
const HEART_RATE_ELEVATED_FROM: u32 = 100;
const HEART_RATE_HIGH_FROM: u32 = 140;

const BATTERY_CRITICAL_BELOW: u8 = 15;
const BATTERY_WARNING_BELOW: u8 = 30;
const STALE_CRITICAL_MINUTES: f64 = 30.0;
const STALE_WARNING_MINUTES: f64 = 15.0;

const HEART_RATE_GAUGE_MAX: f64 = 200.0;
const STEPS_GAUGE_MAX: f64 = 10_000.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BatteryTier {
    Full,
    Medium,
    Low,
}

impl BatteryTier {
    pub fn color(self) -> &'static str {
        match self {
            BatteryTier::Full => GREEN,
            BatteryTier::Medium => ORANGE,
            BatteryTier::Low => RED,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HeartRateTier {
    /// Below resting range; informational rather than abnormal
    Low,
    Normal,
    Elevated,
    High,
}

impl HeartRateTier {
    pub fn color(self) -> &'static str {
        match self {
            HeartRateTier::Low => BLUE,
            HeartRateTier::Normal => GREEN,
            HeartRateTier::Elevated => ORANGE,
            HeartRateTier::High => RED,
        }
    }
}

/// Overall device health, worst of battery and freshness
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceStatus {
    Good,
    Warning,
    Critical,
}

impl DeviceStatus {
    pub fn color(self) -> &'static str {
        match self {
            DeviceStatus::Good => GREEN,
            DeviceStatus::Warning => ORANGE,
            DeviceStatus::Critical => RED,
        }
    }
}

pub fn battery_tier(level: u8) -> BatteryTier {
    if level > BATTERY_FULL_ABOVE {
        BatteryTier::Full
    } else if level > BATTERY_MEDIUM_ABOVE {
        BatteryTier::Medium
    } else {
        BatteryTier::Low
    }
}

pub fn heart_rate_tier(rate: u32) -> HeartRateTier {
    if rate < HEART_RATE_NORMAL_FROM {
        HeartRateTier::Low
    } else if rate < HEART_RATE_ELEVATED_FROM {
        HeartRateTier::Normal
    } else if rate < HEART_RATE_HIGH_FROM {
        HeartRateTier::Elevated
    } else {
        HeartRateTier::High
    }
}

fn battery_status(battery_level: u8) -> DeviceStatus {
    if battery_level < BATTERY_CRITICAL_BELOW {
        DeviceStatus::Critical
    } else if battery_level < BATTERY_WARNING_BELOW {
        DeviceStatus::Warning
    } else {
        DeviceStatus::Good
    }
}

fn freshness_status(minutes_since_update: f64) -> DeviceStatus {
    if minutes_since_update > STALE_CRITICAL_MINUTES {
        DeviceStatus::Critical
    } else if minutes_since_update > STALE_WARNING_MINUTES {
        DeviceStatus::Warning
    } else {
        DeviceStatus::Good
    }
}

pub fn device_status(battery_level: u8, minutes_since_update: f64) -> DeviceStatus {
    battery_status(battery_level).max(freshness_status(minutes_since_update))
}

/// Fractional minutes elapsed between `timestamp` and `now`.
///
/// Readings stamped in the future yield a negative value, which never trips a
/// staleness threshold.
pub fn minutes_since(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> f64 {
    (now - timestamp).num_milliseconds() as f64 / 60_000.0
}

pub fn heart_rate_fraction(rate: u32) -> f64 {
    (rate as f64 / HEART_RATE_GAUGE_MAX).min(1.0)
}

pub fn steps_fraction(steps: u64) -> f64 {
    (steps as f64 / STEPS_GAUGE_MAX).min(1.0)
}

pub fn battery_fraction(level: u8) -> f64 {
    (level.min(100) as f64) / 100.0
}

/// Derives the full card for one device as of `now`
pub fn derive_card(telemetry: &DeviceTelemetry, now: DateTime<Utc>) -> DeviceCard {
    let minutes_since_update = minutes_since(telemetry.timestamp, now);
    let heart_rate_tier = heart_rate_tier(telemetry.heart_rate);
    let battery_tier = battery_tier(telemetry.battery_level);
    let status = device_status(telemetry.battery_level, minutes_since_update);

    DeviceCard {
        telemetry: telemetry.clone(),
        minutes_since_update,
        heart_rate_tier,
        heart_rate_color: heart_rate_tier.color(),
        battery_tier,
        battery_color: battery_tier.color(),
        heart_rate_fraction: heart_rate_fraction(telemetry.heart_rate),
        steps_fraction: steps_fraction(telemetry.steps),
        battery_fraction: battery_fraction(telemetry.battery_level),
        status,
        status_color: status.color(),
    }
}
