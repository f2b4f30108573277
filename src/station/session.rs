use std::thread;
use std::time::Duration;

use chrono::{DateTime, Datelike, Timelike, Utc};

use crate::serial::{self, AtProtocol, Command, SerialTransport, Transport};

use super::clock::station_time;
use super::decoders;
use super::models::Readings;
use super::{Result, StationError};

/// A live session with the weather computer.
///
/// Opening a session puts the station into polled mode and primes the
/// rainfall accumulator; after that each [`poll`](Station::poll) runs one
/// command cycle and hands back a set of readings.
#[derive(Debug)]
pub struct Station<T = SerialTransport> {
    protocol: AtProtocol<T>,
    last_rain: f64,
}

impl Station {
    /// Open the station on a serial port and run the initialization
    /// sequence.
    pub fn open(port: &str) -> Result<Self> {
        log::info!("Using serial port {}", port);
        let transport = SerialTransport::open(port)?;
        Self::with_transport(transport)
    }
}

impl<T: Transport> Station<T> {
    /// Bring up a station over an already-open transport.
    pub fn with_transport(transport: T) -> Result<Self> {
        let mut protocol = AtProtocol::new(transport);

        // Put the station in a known state: no command echo, no line
        // feeds, no unsolicited transmissions, gust accumulator cleared.
        protocol.send_command(Command::EchoClear)?;
        protocol.send_command(Command::LinefeedSet)?;
        protocol.send_command(Command::AutoTransmitClear)?;
        protocol.send_command(Command::ClearWindGustHigh)?;

        // Prime the rainfall accumulator so the first poll reports a
        // delta instead of the lifetime total.
        let buf = protocol.send_command(Command::ReadRainTotal)?;
        let last_rain = decoders::rain(&buf).unwrap_or(0.0);

        Ok(Self {
            protocol,
            last_rain,
        })
    }

    /// Run poll cycles until one succeeds, waiting `retry_wait` after each
    /// failed attempt.
    ///
    /// Only transient transport faults trigger a retry; a response the
    /// decoders cannot make sense of still counts as a successful cycle
    /// with the affected fields absent.
    pub fn poll(&mut self, max_tries: u32, retry_wait: Duration) -> Result<Readings> {
        for ntries in 1..=max_tries {
            match self.read_cycle() {
                Ok(readings) => return Ok(readings),
                Err(e) if e.is_transient() => {
                    log::info!(
                        "Failed attempt {} of {} to get readings: {}",
                        ntries,
                        max_tries,
                        e
                    );
                    thread::sleep(retry_wait);
                }
                Err(e) => return Err(e.into()),
            }
        }

        log::error!("Max retries ({}) exceeded for readings", max_tries);
        Err(StationError::RetriesExceeded { tries: max_tries })
    }

    /// One full command cycle against the station, in the fixed order the
    /// instrument expects.
    fn read_cycle(&mut self) -> serial::Result<Readings> {
        let mut readings = Readings::default();

        let buf = self.protocol.send_command(Command::ReadTempIndoor)?;
        readings.in_temp = decoders::temperature(&buf);

        let buf = self.protocol.send_command(Command::ReadTempOutdoor)?;
        readings.out_temp = decoders::temperature(&buf);

        let buf = self.protocol.send_command(Command::ReadHumidityIndoor)?;
        readings.in_humidity = decoders::humidity(&buf);

        let buf = self.protocol.send_command(Command::ReadHumidityOutdoor)?;
        readings.out_humidity = decoders::humidity(&buf);

        let buf = self.protocol.send_command(Command::ReadWindAverage)?;
        readings.wind_speed = decoders::wind_speed(&buf);
        readings.wind_dir = decoders::wind_direction(&buf);

        let buf = self.protocol.send_command(Command::ReadWindGustHigh)?;
        readings.wind_gust = decoders::wind_speed(&buf);
        readings.wind_gust_dir = decoders::wind_direction(&buf);

        // Response discarded; this re-arms the gust peak for the next
        // cycle.
        self.protocol.send_command(Command::ClearWindGustHigh)?;

        let buf = self.protocol.send_command(Command::ReadBarometer)?;
        readings.barometer = decoders::barometer(&buf);

        let buf = self.protocol.send_command(Command::ReadRainTotal)?;
        if let Some(total) = decoders::rain(&buf) {
            readings.rain = Some(self.rain_delta(total));
        }

        let buf = self.protocol.send_command(Command::ReadRainRate)?;
        readings.rain_rate = decoders::rain(&buf);

        let buf = self.protocol.send_command(Command::ReadWindChill)?;
        readings.windchill = decoders::temperature(&buf);

        Ok(readings)
    }

    /// Loop rainfall is the movement of the lifetime counter since the
    /// last cycle. A counter that went backwards means the station reset;
    /// report no rain and track from the new total.
    fn rain_delta(&mut self, total: f64) -> f64 {
        let delta = total - self.last_rain;
        self.last_rain = total;
        if delta < 0.0 {
            0.0
        } else {
            delta
        }
    }

    /// Read the station clock, falling back to system time when the
    /// station cannot produce a usable answer.
    pub fn get_time(&mut self) -> DateTime<Utc> {
        match self.read_clock() {
            Ok(timestamp) => timestamp,
            Err(e) => {
                log::error!("get_time failed: {}", e);
                Utc::now()
            }
        }
    }

    fn read_clock(&mut self) -> Result<DateTime<Utc>> {
        let time_buf = self.protocol.send_command(Command::ReadTime)?;
        let time_raw: i64 = time_buf
            .parse()
            .map_err(|_| StationError::ClockFormat(time_buf.clone()))?;

        let date_buf = self.protocol.send_command(Command::ReadDate)?;
        let date_raw: i64 = date_buf
            .parse()
            .map_err(|_| StationError::ClockFormat(date_buf.clone()))?;

        let timestamp = station_time(time_raw, date_raw)
            .ok_or_else(|| StationError::ClockFormat(format!("{} {}", time_buf, date_buf)))?;

        log::debug!(
            "Station date: {}, time: {}, ({})",
            date_raw,
            time_raw,
            timestamp
        );
        Ok(timestamp)
    }

    /// Write `timestamp` to the station clock.
    ///
    /// The clock is kept in UTC, which sidesteps DST entirely.
    pub fn set_time(&mut self, timestamp: DateTime<Utc>) -> Result<()> {
        let time_cmd = Command::SetTime {
            hour: timestamp.hour(),
            minute: timestamp.minute(),
            second: timestamp.second(),
        };
        log::debug!("Set station time to {} ({})", timestamp, time_cmd);
        self.protocol.send_command(time_cmd)?;

        let date_cmd = Command::SetDate {
            year: timestamp.year().rem_euclid(100) as u32,
            month: timestamp.month(),
            day: timestamp.day(),
        };
        log::debug!("Set station date to {} ({})", timestamp, date_cmd);
        self.protocol.send_command(date_cmd)?;

        Ok(())
    }

    /// Release the underlying transport.
    pub fn close(&mut self) {
        self.protocol.close();
    }
}
