use std::collections::HashSet;

use crate::errors::{Error, Result};
use crate::model::DeviceTelemetry;

const BATTERY_MAX: u8 = 100;

/// Validates a single telemetry reading
pub fn validate(telemetry: &DeviceTelemetry) -> Result<()> {
    // Validate device_id
    if telemetry.device_id.is_empty() {
        return Err(Error::Validation("Device ID cannot be empty".to_string()));
    }

    // Validate battery
    if telemetry.battery_level > BATTERY_MAX {
        return Err(Error::Validation(format!(
            "Battery {} out of range [0, {}] for device {}",
            telemetry.battery_level, BATTERY_MAX, telemetry.device_id
        )));
    }

    Ok(())
}

/// Validates a whole snapshot; device IDs must be unique within it
pub fn validate_snapshot(snapshot: &[DeviceTelemetry]) -> Result<()> {
    let mut seen = HashSet::with_capacity(snapshot.len());

    for telemetry in snapshot {
        validate(telemetry)?;

        if !seen.insert(telemetry.device_id.as_str()) {
            return Err(Error::Validation(format!(
                "Duplicate device ID {} in snapshot",
                telemetry.device_id
            )));
        }
    }

    Ok(())
}
