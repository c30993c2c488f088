//! Calibration and optional collaborators for a [`ServoHandler`](super::ServoHandler).

use crate::logger::Logger;
use crate::{Error, Result};

/// Nanoseconds in one second.
pub const NANOS_PER_SECOND: u32 = 1_000_000_000;

/// Default PWM frequency for hobby servos (Hz).
pub const FREQUENCY_HZ_DEFAULT: u32 = 50;

/// Default minimum pulse width for hobby servos (nanoseconds).
pub const MIN_PULSE_NS_DEFAULT: u32 = 500_000;

/// Default maximum pulse width for hobby servos (nanoseconds).
pub const MAX_PULSE_NS_DEFAULT: u32 = 2_500_000;

/// Default actuation range (degrees).
pub const ACTUATION_RANGE_DEFAULT: u16 = 180;

/// Largest supported actuation range (degrees).
pub const ACTUATION_RANGE_MAX: u16 = 360;

/// Calibration of one servo.
///
/// Start from [`ServoConfig::DEFAULT`] and override fields with struct update syntax:
///
/// ```rust
/// use servo_envoy::servo::ServoConfig;
///
/// const STEERING: ServoConfig = ServoConfig {
///     center_angle: 100,
///     max_left_angle: 40,
///     max_right_angle: 40,
///     ..ServoConfig::DEFAULT
/// };
/// const _: () = assert!(STEERING.limits().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ServoConfig {
    /// PWM frequency (Hz). Must be nonzero.
    pub frequency_hz: u32,
    /// Pulse width at 0 degrees (nanoseconds).
    pub min_pulse_ns: u32,
    /// Pulse width at the end of the actuation range (nanoseconds).
    pub max_pulse_ns: u32,
    /// Total mechanical travel (degrees), within `1..=360`.
    pub actuation_range: u16,
    /// Rest angle (degrees), within the actuation range.
    pub center_angle: u16,
    /// How far below the center the servo may go (degrees).
    pub max_left_angle: u16,
    /// How far above the center the servo may go (degrees).
    pub max_right_angle: u16,
    /// Mirror every requested angle, for servos mounted the other way round.
    pub direction_inverted: bool,
}

impl ServoConfig {
    /// A 50 Hz, 500–2500 µs, 180° servo centered at 90° with full travel both ways.
    pub const DEFAULT: Self = Self {
        frequency_hz: FREQUENCY_HZ_DEFAULT,
        min_pulse_ns: MIN_PULSE_NS_DEFAULT,
        max_pulse_ns: MAX_PULSE_NS_DEFAULT,
        actuation_range: ACTUATION_RANGE_DEFAULT,
        center_angle: ACTUATION_RANGE_DEFAULT / 2,
        max_left_angle: ACTUATION_RANGE_DEFAULT / 2,
        max_right_angle: ACTUATION_RANGE_DEFAULT / 2,
        direction_inverted: false,
    };

    /// PWM period derived from the frequency.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidFrequency`] if the frequency is zero.
    pub const fn period_ns(&self) -> Result<u32> {
        match NANOS_PER_SECOND.checked_div(self.frequency_hz) {
            Some(period_ns) => Ok(period_ns),
            None => Err(Error::InvalidFrequency),
        }
    }

    /// Check both pulse widths against `period_ns`.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidMinPulseWidth`] or [`Error::InvalidMaxPulseWidth`], minimum first.
    pub const fn check_pulse_widths(&self, period_ns: u32) -> Result<()> {
        if self.min_pulse_ns == 0 || self.min_pulse_ns >= period_ns {
            return Err(Error::InvalidMinPulseWidth);
        }
        if self.max_pulse_ns == 0
            || self.max_pulse_ns >= period_ns
            || self.max_pulse_ns <= self.min_pulse_ns
        {
            return Err(Error::InvalidMaxPulseWidth);
        }
        Ok(())
    }

    /// Left and right angle limits, clamped to the actuation range.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidActuationRange`] or [`Error::InvalidCenterAngle`].
    pub const fn limits(&self) -> Result<(u16, u16)> {
        if self.actuation_range == 0 || self.actuation_range > ACTUATION_RANGE_MAX {
            return Err(Error::InvalidActuationRange);
        }
        if self.center_angle > self.actuation_range {
            return Err(Error::InvalidCenterAngle);
        }
        let left_limit = self.center_angle.saturating_sub(self.max_left_angle);
        let right_limit = self.center_angle.saturating_add(self.max_right_angle);
        let right_limit = if right_limit > self.actuation_range {
            self.actuation_range
        } else {
            right_limit
        };
        Ok((left_limit, right_limit))
    }
}

impl Default for ServoConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Optional collaborators of a [`ServoHandler`](super::ServoHandler).
///
/// Every hook may be absent; an absent hook is skipped.
#[derive(Default)]
pub struct ServoHooks<'d> {
    /// Called with the new angle after every effective angle change.
    pub after_set_angle: Option<&'d mut dyn FnMut(u16)>,
    /// While this returns `false`, the handler tracks angles but sends nothing to the PWM.
    pub is_movement_enabled: Option<&'d dyn Fn() -> bool>,
    /// Receives debug messages.
    pub logger: Option<&'d mut dyn Logger>,
}

impl ServoHooks<'_> {
    /// No hooks at all.
    pub const NONE: Self = Self {
        after_set_angle: None,
        is_movement_enabled: None,
        logger: None,
    };
}
