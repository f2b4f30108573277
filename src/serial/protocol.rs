use std::fmt;

use super::{Result, Transport};

/// Every frame begins with this prefix, Hayes-modem style.
pub const COMMAND_PREFIX: &str = "AT";

/// The instrument functions this driver exercises.
///
/// The first four put the station into polled mode at connection open; the
/// `Read` group covers one poll cycle plus the onboard clock; the `Set` pair
/// writes the clock and carries its zero-padded payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// `EC` - stop the station echoing command characters back.
    EchoClear,
    /// `LS` - line-feed handling on response lines.
    LinefeedSet,
    /// `XCA` - stop unsolicited automatic transmissions.
    AutoTransmitClear,
    /// `CWGH` - reset the peak wind gust accumulator.
    ClearWindGustHigh,
    ReadTempIndoor,
    ReadTempOutdoor,
    ReadHumidityIndoor,
    ReadHumidityOutdoor,
    ReadWindAverage,
    ReadWindGustHigh,
    ReadBarometer,
    ReadRainTotal,
    ReadRainRate,
    ReadWindChill,
    ReadTime,
    ReadDate,
    SetTime { hour: u32, minute: u32, second: u32 },
    SetDate { year: u32, month: u32, day: u32 },
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Command::EchoClear => f.write_str("EC"),
            Command::LinefeedSet => f.write_str("LS"),
            Command::AutoTransmitClear => f.write_str("XCA"),
            Command::ClearWindGustHigh => f.write_str("CWGH"),
            Command::ReadTempIndoor => f.write_str("RTI"),
            Command::ReadTempOutdoor => f.write_str("RTO"),
            Command::ReadHumidityIndoor => f.write_str("RHI"),
            Command::ReadHumidityOutdoor => f.write_str("RHO"),
            Command::ReadWindAverage => f.write_str("RWA"),
            Command::ReadWindGustHigh => f.write_str("RWGH"),
            Command::ReadBarometer => f.write_str("RB"),
            Command::ReadRainTotal => f.write_str("RR"),
            Command::ReadRainRate => f.write_str("RRR"),
            Command::ReadWindChill => f.write_str("RWCA"),
            Command::ReadTime => f.write_str("RT"),
            Command::ReadDate => f.write_str("RD"),
            Command::SetTime {
                hour,
                minute,
                second,
            } => write!(f, "ST{:02}{:02}{:02}", hour, minute, second),
            Command::SetDate { year, month, day } => {
                write!(f, "SD{:02}{:02}{:02}", year, month, day)
            }
        }
    }
}

/// Frames commands in the station's AT syntax and drives one
/// request/response exchange per call.
///
/// No retry happens at this layer: a failure mid-sequence invalidates the
/// whole poll cycle, not one command, so retries belong to the session.
#[derive(Debug)]
pub struct AtProtocol<T> {
    transport: T,
}

impl<T: Transport> AtProtocol<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    /// Send one command and return the trimmed response line.
    pub fn send_command(&mut self, command: Command) -> Result<String> {
        let frame = format!("{}{}", COMMAND_PREFIX, command);
        self.transport.send_and_receive(&frame)
    }

    pub fn close(&mut self) {
        self.transport.close();
    }

    /// Get mutable access to the underlying transport.
    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }
}
