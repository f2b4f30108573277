pub mod decoders;
pub mod models;
pub mod session;

mod clock;

pub use models::{DriverConfig, Readings, Snapshot};
pub use session::Station;

use crate::serial::SerialError;

/// Serial port the station ships wired to on a stock install.
pub const DEFAULT_PORT: &str = "/dev/ttyUSB0";

#[derive(Debug, thiserror::Error)]
pub enum StationError {
    #[error("Serial communication error: {0}")]
    Serial(#[from] SerialError),

    #[error("Max retries ({tries}) exceeded for readings")]
    RetriesExceeded { tries: u32 },

    #[error("Malformed clock response: {0:?}")]
    ClockFormat(String),
}

pub type Result<T> = std::result::Result<T, StationError>;
