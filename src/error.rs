//! Crate error type and result alias.

/// First code of the numeric block reserved for servo errors.
pub const ERROR_CODE_START: u16 = 5230;

/// Errors reported by servo construction and the angle-set family.
///
/// Every variant maps to a stable numeric code (see [`Error::code`]) so firmware can
/// report failures over channels that only carry integers.
#[derive(Debug, derive_more::Display, derive_more::Error, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u16)]
pub enum Error {
    /// The PWM frequency was zero.
    #[display("PWM frequency must be nonzero")]
    InvalidFrequency = ERROR_CODE_START,
    /// The PWM peripheral rejected the requested period.
    #[display("failed to configure the PWM peripheral")]
    ConfigurationFailure,
    /// Servo initialization failed. Reserved; no current operation returns it.
    #[display("failed to initialize the servo")]
    InitializationFailure,
    /// No PWM channel exists for the given pin.
    #[display("no PWM channel for the given pin")]
    ChannelResolutionFailure,
    /// The minimum pulse width is zero or does not fit in the PWM period.
    #[display("minimum pulse width must be nonzero and shorter than the PWM period")]
    InvalidMinPulseWidth,
    /// The maximum pulse width is zero, does not fit in the PWM period, or is not above the minimum.
    #[display("maximum pulse width must exceed the minimum and be shorter than the PWM period")]
    InvalidMaxPulseWidth,
    /// The requested angle lies outside the servo's limits.
    #[display("angle is outside the servo limits")]
    AngleOutOfRange,
    /// The PWM driver failed to apply the duty cycle.
    #[display("failed to apply the duty cycle")]
    DutyApplicationFailure,
    /// No servo handler is available.
    #[display("no servo handler is installed")]
    NilHandler,
    /// The direction has no associated movement.
    #[display("unknown direction")]
    UnknownDirection,
    /// The actuation range is zero or exceeds 360 degrees.
    #[display("actuation range must be within 1..=360 degrees")]
    InvalidActuationRange,
    /// The center angle lies beyond the actuation range.
    #[display("center angle must lie within the actuation range")]
    InvalidCenterAngle,
}

const ALL: [Error; 12] = [
    Error::InvalidFrequency,
    Error::ConfigurationFailure,
    Error::InitializationFailure,
    Error::ChannelResolutionFailure,
    Error::InvalidMinPulseWidth,
    Error::InvalidMaxPulseWidth,
    Error::AngleOutOfRange,
    Error::DutyApplicationFailure,
    Error::NilHandler,
    Error::UnknownDirection,
    Error::InvalidActuationRange,
    Error::InvalidCenterAngle,
];

impl Error {
    /// Numeric code of this error.
    #[must_use]
    pub const fn code(self) -> u16 {
        self as u16
    }

    /// Look up the error carrying `code`, if any.
    #[must_use]
    pub fn from_code(code: u16) -> Option<Self> {
        ALL.into_iter().find(|error| error.code() == code)
    }
}

/// Result alias used throughout the crate.
pub type Result<T, E = Error> = core::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::{ALL, ERROR_CODE_START, Error};

    #[test]
    fn codes_are_consecutive_from_block_start() {
        for (offset, error) in (0_u16..).zip(ALL) {
            assert_eq!(error.code(), ERROR_CODE_START + offset);
        }
        assert_eq!(Error::InvalidFrequency.code(), 5230);
        assert_eq!(Error::InvalidCenterAngle.code(), 5241);
    }

    #[test]
    fn from_code_finds_every_variant() {
        for error in ALL {
            assert_eq!(Error::from_code(error.code()), Some(error));
        }
        assert_eq!(Error::from_code(ERROR_CODE_START - 1), None);
        assert_eq!(Error::from_code(5242), None);
    }
}
