pub mod protocol;
pub mod transport;

pub use protocol::{AtProtocol, Command};
pub use transport::SerialTransport;

#[derive(Debug, thiserror::Error)]
pub enum SerialError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Serial port not open")]
    NotOpen,

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialport error: {0}")]
    SerialportError(#[from] serialport::Error),
}

impl SerialError {
    /// Whether a fresh attempt over the same connection could succeed.
    /// Single-exchange I/O faults are transient; a port that never opened
    /// or has already been closed is not.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            SerialError::IoError(_) | SerialError::SerialportError(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, SerialError>;

/// One blocking command/response exchange with the instrument.
///
/// Implemented by [`SerialTransport`] for the real wire; tests substitute a
/// scripted implementation to drive the layers above without hardware.
pub trait Transport {
    /// Write `command` plus the CR delimiter, then read back one
    /// CR-terminated line, returning it delimiter-stripped and trimmed.
    /// A read timeout with nothing buffered yields an empty string.
    fn send_and_receive(&mut self, command: &str) -> Result<String>;

    /// Release the underlying port. Must be idempotent.
    fn close(&mut self);
}
