//! Errors that can occur when using the MAX30100 device.
//!
//! This module provides an error type that encapsulates all possible errors that can occur during communication with MAX30100.
//! It is generic over the underlying bus error type.

use crate::config::ConfigError;
use crate::register::InvalidRegisterField;

/// This represents all possible errors that can occur when using the MAX30100 device.
#[derive(Debug)]
pub enum Max30100Error<BusError> {
    /// An error has occurred in the I2C driver.
    ///
    /// Transport timeouts surface here too; the driver never retries on its
    /// own, since a blind retry after a half-finished FIFO burst could hand
    /// the caller the same samples twice.
    Bus(BusError),

    /// The power-ready flag was never observed during initialization.
    ///
    /// Could possibly indicate an error with pin configuration and/or wiring.
    NotConnected,

    /// A bounded status poll ran out of attempts, e.g. waiting for a
    /// temperature conversion to finish.
    Timeout,

    /// The requested configuration is not supported by the hardware. Nothing
    /// was written to the device.
    Config(ConfigError),

    /// Reading from a register returned unexpected data. This should not happen in normal circumstances.
    ///
    /// Could possibly indicate a bug in the driver, or less likely, a faulty chip or interference.
    UnexpectedRegisterData(InvalidRegisterField),
}
