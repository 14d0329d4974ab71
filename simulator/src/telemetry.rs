use chrono::{DateTime, Utc};
use rand::Rng;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct Telemetry {
    pub device_id: String,
    pub heart_rate: u32,
    pub steps: u64,
    pub timestamp: DateTime<Utc>,
    pub battery_level: u8,
}

/// A simulated wearable producing fresh readings on demand
#[derive(Debug, Clone)]
pub struct DeviceSimulator {
    device_id: String,
}

impl DeviceSimulator {
    pub fn new(device_id: impl Into<String>) -> Self {
        Self {
            device_id: device_id.into(),
        }
    }

    pub fn device_id(&self) -> &str {
        &self.device_id
    }

    pub fn generate_telemetry(&self, rng: &mut impl Rng) -> Telemetry {
        Telemetry {
            device_id: self.device_id.clone(),
            heart_rate: rng.gen_range(60..=120),
            steps: rng.gen_range(0..=1000),
            timestamp: Utc::now(),
            battery_level: rng.gen_range(10..=100),
        }
    }

    /// Devices named `device_0` through `device_{count - 1}`
    pub fn fleet(count: usize) -> Vec<Self> {
        (0..count).map(|i| Self::new(format!("device_{}", i))).collect()
    }
}
