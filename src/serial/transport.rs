use std::io::{Read, Write};
use std::time::Duration;

use serialport::{ClearBuffer, DataBits, FlowControl, Parity, SerialPort, StopBits};

use super::{Result, SerialError, Transport};

// The ID-5001 link is fixed at 9600-8-N-1 with no flow control.
pub const BAUD_RATE: u32 = 9600;
pub const READ_TIMEOUT: Duration = Duration::from_secs(1);

/// Command and response lines are both terminated by a bare carriage return.
pub const DELIMITER: u8 = b'\r';

pub struct SerialTransport {
    port_name: String,
    port: Option<Box<dyn SerialPort>>,
}

impl SerialTransport {
    /// Open the station's serial port with the fixed link settings.
    pub fn open(port_name: &str) -> Result<Self> {
        log::debug!("Opening serial port {}", port_name);
        let port = serialport::new(port_name, BAUD_RATE)
            .data_bits(DataBits::Eight)
            .parity(Parity::None)
            .stop_bits(StopBits::One)
            .flow_control(FlowControl::None)
            .timeout(READ_TIMEOUT)
            .open()
            .map_err(|e| SerialError::ConnectionFailed(format!("{}: {}", port_name, e)))?;

        Ok(Self {
            port_name: port_name.to_string(),
            port: Some(port),
        })
    }

    /// Accumulate bytes until the delimiter arrives. A read timeout ends the
    /// line as-is: no data at all decodes to an empty string, which the field
    /// decoders reject downstream.
    fn read_line(port: &mut Box<dyn SerialPort>) -> Result<String> {
        let mut line: Vec<u8> = Vec::new();
        let mut byte = [0u8; 1];

        loop {
            match port.read(&mut byte) {
                Ok(0) => break,
                Ok(_) => {
                    line.push(byte[0]);
                    if byte[0] == DELIMITER {
                        break;
                    }
                }
                Err(ref e) if e.kind() == std::io::ErrorKind::TimedOut => break,
                Err(e) => return Err(SerialError::IoError(e)),
            }
        }

        Ok(String::from_utf8_lossy(&line).trim().to_string())
    }
}

impl Transport for SerialTransport {
    fn send_and_receive(&mut self, command: &str) -> Result<String> {
        let port = self.port.as_mut().ok_or(SerialError::NotOpen)?;

        // A stale or partial earlier response must not be read back as this
        // command's reply.
        port.clear(ClearBuffer::Input)?;

        port.write_all(command.as_bytes())?;
        port.write_all(&[DELIMITER])?;
        port.flush()?;
        log::debug!("Sent {}", command);

        let response = Self::read_line(port)?;
        log::debug!("Received {:?}", response);

        Ok(response)
    }

    fn close(&mut self) {
        if self.port.take().is_some() {
            log::debug!("Closed serial port {}", self.port_name);
        }
    }
}
