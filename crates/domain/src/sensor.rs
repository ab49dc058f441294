//! External power sensor readings.

use serde::{Deserialize, Serialize};

use crate::id::SensorId;

/// Parsed value of a power observable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SensorReading {
    On,
    Off,
    Unknown,
    Unavailable,
}

impl SensorReading {
    /// Lenient parse of a raw host state string.
    ///
    /// Anything not recognised is [`Unknown`](Self::Unknown).
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "on" | "true" | "1" | "home" => Self::On,
            "off" | "false" | "0" | "not_home" => Self::Off,
            "unavailable" => Self::Unavailable,
            _ => Self::Unknown,
        }
    }

    /// Whether this reading may override power belief.
    #[must_use]
    pub const fn is_trusted(self) -> bool {
        matches!(self, Self::On | Self::Off)
    }
}

/// One sensor push.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SensorChange {
    pub sensor_id: SensorId,
    pub reading: SensorReading,
}
