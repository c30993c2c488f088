//! The PWM collaborator a servo handler drives.
//!
//! [`PwmDriver`] is the narrow interface the handler needs from a PWM peripheral. Board
//! crates implement it directly; for a single output that already implements
//! [`embedded_hal::pwm::SetDutyCycle`], wrap it in [`HalPwm`].

use embedded_hal::pwm::SetDutyCycle;

/// A PWM peripheral able to produce servo pulses.
///
/// All times are in nanoseconds.
pub trait PwmDriver {
    /// Identifies an output pin.
    type Pin;
    /// Identifies the PWM channel wired to a pin.
    type Channel: Copy;
    /// Error reported by the peripheral.
    type Error;

    /// Set the PWM period.
    ///
    /// # Errors
    ///
    /// Returns an error if the peripheral cannot produce this period.
    fn configure(&mut self, period_ns: u32) -> Result<(), Self::Error>;

    /// Resolve the channel that drives `pin`.
    ///
    /// # Errors
    ///
    /// Returns an error if `pin` has no PWM channel.
    fn channel(&mut self, pin: Self::Pin) -> Result<Self::Channel, Self::Error>;

    /// Output pulses of `pulse_ns` every `period_ns` on `channel`.
    ///
    /// # Errors
    ///
    /// Returns an error if the peripheral rejects the duty cycle.
    fn set_duty(
        &mut self,
        channel: Self::Channel,
        pulse_ns: u32,
        period_ns: u32,
    ) -> Result<(), Self::Error>;
}

/// Errors from [`HalPwm`].
#[derive(Debug, derive_more::Display, derive_more::Error, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HalPwmError<E> {
    /// The requested period differs from the one the output was set up with.
    #[display("output runs at a {expected_ns} ns period, not {requested_ns} ns")]
    PeriodMismatch {
        /// Period the output was set up with.
        expected_ns: u32,
        /// Period that was requested.
        requested_ns: u32,
    },
    /// The output rejected the duty cycle.
    #[display("output rejected the duty cycle")]
    Output(#[error(not(source))] E),
}

/// Adapts one pre-configured [`SetDutyCycle`] output to [`PwmDriver`].
///
/// The output's frame period is fixed by the HAL when the output is created, so
/// [`PwmDriver::configure`] only accepts that period. There is a single channel, addressed
/// by the pin `()`.
#[derive(Debug)]
pub struct HalPwm<O> {
    output: O,
    period_ns: u32,
}

impl<O: SetDutyCycle> HalPwm<O> {
    /// Wrap `output`, whose frame period is `period_ns`.
    #[must_use]
    pub const fn new(output: O, period_ns: u32) -> Self {
        Self { output, period_ns }
    }

    /// Give back the wrapped output.
    #[must_use]
    pub fn into_inner(self) -> O {
        self.output
    }

    /// Duty counts for a pulse of `pulse_ns`, rounded down and capped at the output's maximum.
    #[must_use]
    pub fn duty_for(&self, pulse_ns: u32, period_ns: u32) -> u16 {
        let max_duty = self.output.max_duty_cycle();
        let duty = u64::from(pulse_ns)
            .saturating_mul(u64::from(max_duty))
            .checked_div(u64::from(period_ns))
            .unwrap_or(0);
        u16::try_from(duty).unwrap_or(max_duty).min(max_duty)
    }
}

impl<O: SetDutyCycle> PwmDriver for HalPwm<O> {
    type Pin = ();
    type Channel = ();
    type Error = HalPwmError<O::Error>;

    fn configure(&mut self, period_ns: u32) -> Result<(), Self::Error> {
        if period_ns == self.period_ns {
            Ok(())
        } else {
            Err(HalPwmError::PeriodMismatch {
                expected_ns: self.period_ns,
                requested_ns: period_ns,
            })
        }
    }

    fn channel(&mut self, _pin: Self::Pin) -> Result<Self::Channel, Self::Error> {
        Ok(())
    }

    fn set_duty(
        &mut self,
        _channel: Self::Channel,
        pulse_ns: u32,
        period_ns: u32,
    ) -> Result<(), Self::Error> {
        let duty = self.duty_for(pulse_ns, period_ns);
        self.output.set_duty_cycle(duty).map_err(HalPwmError::Output)
    }
}
