use chrono::serde::ts_seconds;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::DEFAULT_PORT;

/// weewx unit-system code for US customary units.
pub const US_UNITS: i32 = 1;

/// One poll cycle of decoded observations, in US customary units.
///
/// A field is `None` when the station answered with a line the decoder could
/// not make sense of; consumers treat that as no reading for the cycle.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Readings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub in_temp: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub out_temp: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub in_humidity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub out_humidity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wind_speed: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wind_dir: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wind_gust: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wind_gust_dir: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub barometer: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rain: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rain_rate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub windchill: Option<f64>,
}

/// A timestamped loop packet in the weewx wire shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Unix timestamp of the observation.
    #[serde(rename = "dateTime", with = "ts_seconds")]
    pub date_time: DateTime<Utc>,

    /// Unit system of every value in the packet (1 = US).
    #[serde(rename = "usUnits")]
    pub us_units: i32,

    #[serde(flatten)]
    pub readings: Readings,
}

impl Snapshot {
    /// Stamp a set of readings with the current time.
    pub fn now(readings: Readings) -> Self {
        Self {
            date_time: Utc::now(),
            us_units: US_UNITS,
            readings,
        }
    }
}

/// Driver settings, deserializable from a weewx-style config block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DriverConfig {
    /// Serial device the station is attached to.
    pub port: String,
    /// Hardware model name reported alongside the data.
    pub model: String,
    /// Poll attempts before a cycle is abandoned.
    pub max_tries: u32,
    /// Seconds to wait after a failed poll attempt.
    pub retry_wait: u64,
    /// Seconds between emitted loop packets.
    pub loop_interval: f64,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT.to_string(),
            model: "ID5001".to_string(),
            max_tries: 5,
            retry_wait: 5,
            loop_interval: 5.0,
        }
    }
}
