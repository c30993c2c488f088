//! A device abstraction for hobby positional servo motors.
//!
//! A [`ServoHandler`] turns angles into PWM pulse widths. It keeps the servo within its
//! calibrated left and right limits, mirrors angles for servos mounted the other way
//! round, and can drive the servo relative to its center or by [`Direction`].
//!
//! Use the [`servo!`] macro for a keyword-driven constructor with defaults, or
//! [`ServoHandler::new`] to attach [`ServoHooks`].
//!
//! # Example
//!
//! ```rust
//! use servo_envoy::pwm::PwmDriver;
//! use servo_envoy::servo::Steering;
//! use servo_envoy::{Direction, servo};
//!
//! // A PWM peripheral with one channel per pin that accepts everything.
//! struct Board;
//!
//! impl PwmDriver for Board {
//!     type Pin = u8;
//!     type Channel = u8;
//!     type Error = ();
//!
//!     fn configure(&mut self, _period_ns: u32) -> Result<(), ()> { Ok(()) }
//!     fn channel(&mut self, pin: u8) -> Result<u8, ()> { Ok(pin) }
//!     fn set_duty(&mut self, _channel: u8, _pulse_ns: u32, _period_ns: u32) -> Result<(), ()> { Ok(()) }
//! }
//!
//! # fn main() -> servo_envoy::Result<()> {
//! let mut steering = servo!(
//!     pwm: Board,
//!     pin: 15,
//!     max_left_angle: 45,
//!     max_right_angle: 45,
//! )?;
//!
//! steering.set_angle_to_left(30)?;           // 60 degrees
//! assert_eq!(steering.angle(), 60);
//! steering.set_direction(Direction::Right, 90)?; // clamped to the right limit, 135 degrees
//! assert_eq!(steering.angle(), 135);
//! steering.set_angle_to_center()?;
//! assert!(steering.is_angle_centered());
//! # Ok(())
//! # }
//! ```

pub mod config;

pub use config::{ServoConfig, ServoHooks};

use crate::pwm::PwmDriver;
use crate::{Direction, Error, Result};

/// Create a [`ServoHandler`] with keyword arguments and [`ServoConfig::DEFAULT`] calibration.
///
/// Required fields: `pwm`, `pin` (in that order).
///
/// Optional fields: any [`ServoConfig`] field, such as `center_angle: 100` or
/// `direction_inverted: true`. The handler gets no [`ServoHooks`].
///
/// Evaluates to `Result<ServoHandler>`. See the [module-level example](self).
#[macro_export]
macro_rules! servo {
    (pwm: $pwm:expr, pin: $pin:expr $(, $field:ident : $value:expr)* $(,)?) => {
        $crate::servo::ServoHandler::new(
            $pwm,
            $pin,
            $crate::servo::ServoConfig {
                $($field: $value,)*
                ..$crate::servo::ServoConfig::DEFAULT
            },
            $crate::servo::ServoHooks::NONE,
        )
    };
}
#[doc(inline)]
pub use servo;

/// Angle control of a servo, in degrees.
///
/// The direction methods are aliases so callers can steer in terms of [`Direction`].
pub trait Steering {
    /// Move to `degrees`, measured before any direction inversion.
    ///
    /// # Errors
    ///
    /// [`Error::AngleOutOfRange`] if the angle lies outside the servo limits.
    fn set_angle(&mut self, degrees: u16) -> Result<()>;

    /// The current angle.
    fn angle(&self) -> u16;

    /// Move to `relative` degrees from the center; negative values go left.
    ///
    /// # Errors
    ///
    /// [`Error::AngleOutOfRange`] if the resulting angle lies outside the servo limits.
    fn set_angle_relative_to_center(&mut self, relative: i16) -> Result<()>;

    /// Whether the servo rests at its center angle.
    fn is_angle_centered(&self) -> bool;

    /// Move to the center angle.
    ///
    /// # Errors
    ///
    /// Errors only if the PWM fails to apply the pulse.
    fn set_angle_to_center(&mut self) -> Result<()>;

    /// Move `degrees` right of center, stopping at the right limit.
    ///
    /// # Errors
    ///
    /// See [`Steering::set_angle_relative_to_center`].
    fn set_angle_to_right(&mut self, degrees: u16) -> Result<()>;

    /// Move `degrees` left of center, stopping at the left limit.
    ///
    /// # Errors
    ///
    /// See [`Steering::set_angle_relative_to_center`].
    fn set_angle_to_left(&mut self, degrees: u16) -> Result<()>;

    /// Steer straight.
    ///
    /// # Errors
    ///
    /// See [`Steering::set_angle_to_center`].
    fn set_direction_to_center(&mut self) -> Result<()> {
        self.set_angle_to_center()
    }

    /// Steer right by `degrees`.
    ///
    /// # Errors
    ///
    /// See [`Steering::set_angle_to_right`].
    fn set_direction_to_right(&mut self, degrees: u16) -> Result<()> {
        self.set_angle_to_right(degrees)
    }

    /// Steer left by `degrees`.
    ///
    /// # Errors
    ///
    /// See [`Steering::set_angle_to_left`].
    fn set_direction_to_left(&mut self, degrees: u16) -> Result<()> {
        self.set_angle_to_left(degrees)
    }

    /// Steer towards `direction`; `degrees` is ignored for [`Direction::Straight`].
    ///
    /// # Errors
    ///
    /// [`Error::UnknownDirection`] for [`Direction::Nil`], otherwise as the matching alias.
    fn set_direction(&mut self, direction: Direction, degrees: u16) -> Result<()> {
        match direction {
            Direction::Left => self.set_direction_to_left(degrees),
            Direction::Right => self.set_direction_to_right(degrees),
            Direction::Straight => self.set_direction_to_center(),
            Direction::Nil => Err(Error::UnknownDirection),
        }
    }
}

/// A hobby servo driven through a [`PwmDriver`].
///
/// Angles are whole degrees in `0..=actuation_range`. The handler only ever rests within
/// `[left_limit, right_limit]`, which bracket the center angle.
///
/// When the direction is inverted, every requested angle is mirrored as
/// `actuation_range - degrees` before the limit check, and [`ServoHandler::angle`]
/// reports the mirrored value.
///
/// See the [module-level example](self) for usage.
pub struct ServoHandler<'d, P: PwmDriver> {
    pwm: P,
    channel: P::Channel,
    period_ns: u32,
    min_pulse_ns: u32,
    max_pulse_ns: u32,
    actuation_range: u16,
    center_angle: u16,
    left_limit: u16,
    right_limit: u16,
    direction_inverted: bool,
    angle: u16,
    hooks: ServoHooks<'d>,
}

impl<'d, P: PwmDriver> ServoHandler<'d, P> {
    /// Configure `pwm` for `config`, bind `pin`, and drive the servo to its center.
    ///
    /// A failure to apply the center pulse is not an error; the servo then moves on the
    /// first angle change.
    ///
    /// # Errors
    ///
    /// The first failing check, in order: [`Error::InvalidFrequency`],
    /// [`Error::ConfigurationFailure`], [`Error::ChannelResolutionFailure`],
    /// [`Error::InvalidMinPulseWidth`], [`Error::InvalidMaxPulseWidth`],
    /// [`Error::InvalidActuationRange`], [`Error::InvalidCenterAngle`].
    pub fn new(
        mut pwm: P,
        pin: P::Pin,
        config: ServoConfig,
        hooks: ServoHooks<'d>,
    ) -> Result<Self> {
        let period_ns = config.period_ns()?;
        pwm.configure(period_ns)
            .map_err(|_| Error::ConfigurationFailure)?;
        let channel = pwm
            .channel(pin)
            .map_err(|_| Error::ChannelResolutionFailure)?;
        config.check_pulse_widths(period_ns)?;
        let (left_limit, right_limit) = config.limits()?;

        info!(
            "servo period={}ns pulse={}..{}ns limits={}..{}",
            period_ns, config.min_pulse_ns, config.max_pulse_ns, left_limit, right_limit
        );

        let mut servo = Self {
            pwm,
            channel,
            period_ns,
            min_pulse_ns: config.min_pulse_ns,
            max_pulse_ns: config.max_pulse_ns,
            actuation_range: config.actuation_range,
            center_angle: config.center_angle,
            left_limit,
            right_limit,
            direction_inverted: config.direction_inverted,
            angle: config.center_angle,
            hooks,
        };
        if let Some(logger) = servo.hooks.logger.as_deref_mut() {
            logger.debug_fmt(format_args!("servo period {period_ns} ns"));
        }
        if servo.drive(servo.center_angle).is_err() {
            warn!("servo failed to apply the center pulse");
        }
        Ok(servo)
    }

    /// Move to `degrees`, measured before any direction inversion.
    ///
    /// Moving to the current angle does nothing: no pulse, no log, no callback.
    ///
    /// # Errors
    ///
    /// [`Error::AngleOutOfRange`] if the (mirrored) angle lies outside the limits, or
    /// [`Error::DutyApplicationFailure`] if the PWM rejects the pulse. Either way the
    /// stored angle is unchanged.
    pub fn set_angle(&mut self, degrees: u16) -> Result<()> {
        let target = if self.direction_inverted {
            self.actuation_range
                .checked_sub(degrees)
                .ok_or(Error::AngleOutOfRange)?
        } else {
            degrees
        };
        if !(self.left_limit..=self.right_limit).contains(&target) {
            return Err(Error::AngleOutOfRange);
        }
        self.move_to(target)
    }

    /// The current angle, after any direction inversion.
    #[must_use]
    pub const fn angle(&self) -> u16 {
        self.angle
    }

    /// Move to `relative` degrees from the center; negative values go left.
    ///
    /// The resulting angle then goes through [`ServoHandler::set_angle`], so an inverted
    /// servo turns the other way.
    ///
    /// # Errors
    ///
    /// [`Error::AngleOutOfRange`] if `center + relative` lies outside the limits, otherwise
    /// as [`ServoHandler::set_angle`].
    pub fn set_angle_relative_to_center(&mut self, relative: i16) -> Result<()> {
        let absolute = i32::from(self.center_angle).saturating_add(i32::from(relative));
        if absolute < i32::from(self.left_limit) || absolute > i32::from(self.right_limit) {
            return Err(Error::AngleOutOfRange);
        }
        #[expect(
            clippy::cast_possible_truncation,
            clippy::cast_sign_loss,
            reason = "checked against the limits above"
        )]
        let absolute = absolute as u16;
        self.set_angle(absolute)
    }

    /// Whether the servo rests at its center angle.
    #[must_use]
    pub const fn is_angle_centered(&self) -> bool {
        self.angle == self.center_angle
    }

    /// Move to the center angle.
    ///
    /// The center is not mirrored, so the servo reports centered afterwards even when
    /// its direction is inverted.
    ///
    /// # Errors
    ///
    /// [`Error::DutyApplicationFailure`] if the PWM rejects the pulse.
    pub fn set_angle_to_center(&mut self) -> Result<()> {
        self.move_to(self.center_angle)
    }

    /// Move `degrees` right of center, stopping at the right limit.
    ///
    /// # Errors
    ///
    /// As [`ServoHandler::set_angle_relative_to_center`].
    pub fn set_angle_to_right(&mut self, degrees: u16) -> Result<()> {
        let reach = self.right_limit.saturating_sub(self.center_angle);
        let relative = i16::try_from(degrees.min(reach)).map_err(|_| Error::AngleOutOfRange)?;
        self.set_angle_relative_to_center(relative)
    }

    /// Move `degrees` left of center, stopping at the left limit.
    ///
    /// # Errors
    ///
    /// As [`ServoHandler::set_angle_relative_to_center`].
    pub fn set_angle_to_left(&mut self, degrees: u16) -> Result<()> {
        let reach = self.center_angle.saturating_sub(self.left_limit);
        let relative = i16::try_from(degrees.min(reach)).map_err(|_| Error::AngleOutOfRange)?;
        self.set_angle_relative_to_center(relative.saturating_neg())
    }

    /// Pulse width (nanoseconds) for an angle, before any direction inversion.
    ///
    /// Angles beyond the actuation range map to the maximum pulse width. The result
    /// always lies within `[min_pulse_ns, max_pulse_ns]`.
    #[must_use]
    #[expect(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "the offset lies in [0, span] and span is a u32"
    )]
    pub fn pulse_for(&self, degrees: u16) -> u32 {
        let degrees = degrees.min(self.actuation_range);
        let span = self.max_pulse_ns.saturating_sub(self.min_pulse_ns);
        let offset = f64::from(span) * f64::from(degrees) / f64::from(self.actuation_range);
        self.min_pulse_ns.saturating_add(offset as u32).min(self.max_pulse_ns)
    }

    /// The center angle.
    #[must_use]
    pub const fn center_angle(&self) -> u16 {
        self.center_angle
    }

    /// The smallest angle the servo may rest at.
    #[must_use]
    pub const fn left_limit(&self) -> u16 {
        self.left_limit
    }

    /// The largest angle the servo may rest at.
    #[must_use]
    pub const fn right_limit(&self) -> u16 {
        self.right_limit
    }

    /// Total mechanical travel (degrees).
    #[must_use]
    pub const fn actuation_range(&self) -> u16 {
        self.actuation_range
    }

    /// PWM period (nanoseconds).
    #[must_use]
    pub const fn period_ns(&self) -> u32 {
        self.period_ns
    }

    /// Whether requested angles are mirrored.
    #[must_use]
    pub const fn is_direction_inverted(&self) -> bool {
        self.direction_inverted
    }

    /// Give back the PWM driver.
    #[must_use]
    pub fn into_pwm(self) -> P {
        self.pwm
    }

    fn is_movement_enabled(&self) -> bool {
        self.hooks.is_movement_enabled.is_none_or(|enabled| enabled())
    }

    // Angle must already be within the limits.
    fn move_to(&mut self, target: u16) -> Result<()> {
        if target == self.angle {
            return Ok(());
        }
        self.drive(target)?;
        self.angle = target;

        debug!("servo angle={}", target);
        if let Some(logger) = self.hooks.logger.as_deref_mut() {
            logger.debug_fmt(format_args!("servo angle set to {target} degrees"));
        }
        if let Some(after_set_angle) = self.hooks.after_set_angle.as_deref_mut() {
            after_set_angle(target);
        }
        Ok(())
    }

    fn drive(&mut self, angle: u16) -> Result<()> {
        if !self.is_movement_enabled() {
            return Ok(());
        }
        let pulse_ns = self.pulse_for(angle);
        self.pwm
            .set_duty(self.channel, pulse_ns, self.period_ns)
            .map_err(|_| {
                warn!("servo PWM rejected pulse={}ns", pulse_ns);
                Error::DutyApplicationFailure
            })
    }
}

impl<P: PwmDriver> Steering for ServoHandler<'_, P> {
    fn set_angle(&mut self, degrees: u16) -> Result<()> {
        Self::set_angle(self, degrees)
    }

    fn angle(&self) -> u16 {
        Self::angle(self)
    }

    fn set_angle_relative_to_center(&mut self, relative: i16) -> Result<()> {
        Self::set_angle_relative_to_center(self, relative)
    }

    fn is_angle_centered(&self) -> bool {
        Self::is_angle_centered(self)
    }

    fn set_angle_to_center(&mut self) -> Result<()> {
        Self::set_angle_to_center(self)
    }

    fn set_angle_to_right(&mut self, degrees: u16) -> Result<()> {
        Self::set_angle_to_right(self, degrees)
    }

    fn set_angle_to_left(&mut self, degrees: u16) -> Result<()> {
        Self::set_angle_to_left(self, degrees)
    }
}
