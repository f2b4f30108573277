//! Serial polling driver for the Heathkit ID-5001 Weather Computer.
//!
//! The ID-5001 speaks a command set over RS-232 that closely resembles the
//! Hayes AT modem vocabulary: every frame is `AT` plus a mnemonic,
//! terminated by a carriage return, at 9600 bps 8-N-1 with no flow control.
//! This crate opens the port, puts the station into polled mode, and turns
//! each command cycle into a weewx-style loop packet in US units.

pub mod serial;
pub mod station;

pub use serial::{SerialError, SerialTransport, Transport};
pub use station::{DriverConfig, Readings, Snapshot, Station, StationError, DEFAULT_PORT};

/// Version reported in the startup log.
pub const DRIVER_VERSION: &str = env!("CARGO_PKG_VERSION");
