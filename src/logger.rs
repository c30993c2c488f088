//! Optional diagnostic sink for servo handlers.
//!
//! A [`ServoHandler`](crate::servo::ServoHandler) reports what it does to a [`Logger`]
//! when one is attached through [`ServoHooks`](crate::servo::ServoHooks). Without one,
//! nothing is formatted at all.

use core::fmt::{self, Write as _};

use heapless::String;

/// Capacity of the buffer [`Logger::debug_fmt`] formats into.
pub const MESSAGE_CAPACITY: usize = 64;

/// Receives debug messages from a servo handler.
pub trait Logger {
    /// Record one debug message.
    fn debug(&mut self, message: &str);

    /// Format `args` into a fixed-size buffer and pass it to [`Logger::debug`].
    ///
    /// Messages longer than [`MESSAGE_CAPACITY`] bytes are dropped.
    fn debug_fmt(&mut self, args: fmt::Arguments<'_>) {
        let mut message: String<MESSAGE_CAPACITY> = String::new();
        if message.write_fmt(args).is_ok() {
            self.debug(&message);
        }
    }
}

/// A [`Logger`] that forwards every message to `defmt` at debug level.
#[cfg(feature = "defmt")]
#[derive(Debug, Default, Clone, Copy)]
pub struct DefmtLogger;

#[cfg(feature = "defmt")]
impl Logger for DefmtLogger {
    fn debug(&mut self, message: &str) {
        defmt::debug!("{=str}", message);
    }
}
