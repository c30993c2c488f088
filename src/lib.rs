//! A `no_std` device abstraction for one hobby servo on a PWM output.
//!
//! A [`ServoHandler`](servo::ServoHandler) owns a servo's calibration: pulse-width bounds,
//! actuation range, center angle, left and right limits, and direction inversion. It turns
//! angle requests into pulse widths for a [`PwmDriver`](pwm::PwmDriver).
//!
//! # Glossary
//!
//! - **Actuation range:** total degrees of mechanical travel the servo is calibrated for.
//! - **Center angle:** the rest position within the actuation range.
//! - **Pulse width:** how long the PWM signal stays high each period; it encodes the angle.
//! - **Duty cycle:** pulse width divided by the PWM period.
//! - **Direction inversion:** mirroring angles (`actuation_range - angle`) for a servo
//!   mounted the other way round.
//!
//! # Features
//!
//! - `defmt`: log through [`defmt`](https://docs.rs/defmt) and derive `defmt::Format` on
//!   public types. Adds [`DefmtLogger`](logger::DefmtLogger).
#![no_std]

// Logging macros must come first so later modules can use them.
#[macro_use]
mod fmt;

pub mod direction;
mod error;
pub mod logger;
pub mod pwm;
pub mod servo;
pub mod shared;

pub use crate::direction::Direction;
// Re-export error types and result (used throughout)
pub use crate::error::{ERROR_CODE_START, Error, Result};
