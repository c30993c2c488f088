//! Recording collaborators shared by the integration tests.
#![allow(dead_code, reason = "each test crate uses a different subset")]

use std::cell::RefCell;

use servo_envoy::logger::Logger;
use servo_envoy::pwm::PwmDriver;

/// Highest pin the mock board has.
pub const LAST_PIN: u8 = 29;

/// One pulse written to the mock PWM.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Duty {
    pub channel: u8,
    pub pulse_ns: u32,
    pub period_ns: u32,
}

/// Everything the mock PWM saw, plus switches to make it fail.
#[derive(Debug, Default)]
pub struct PwmLog {
    pub period_ns: Option<u32>,
    pub duties: Vec<Duty>,
    pub fail_configure: bool,
    pub fail_duty: bool,
}

impl PwmLog {
    pub fn pulses(&self) -> Vec<u32> {
        self.duties.iter().map(|duty| duty.pulse_ns).collect()
    }
}

/// A PWM board where pin `n` is wired to channel `n / 2`, like Pico PWM slices.
pub struct MockPwm<'a> {
    log: &'a RefCell<PwmLog>,
}

impl<'a> MockPwm<'a> {
    pub fn new(log: &'a RefCell<PwmLog>) -> Self {
        Self { log }
    }
}

impl PwmDriver for MockPwm<'_> {
    type Pin = u8;
    type Channel = u8;
    type Error = &'static str;

    fn configure(&mut self, period_ns: u32) -> Result<(), Self::Error> {
        let mut log = self.log.borrow_mut();
        if log.fail_configure {
            return Err("period not supported");
        }
        log.period_ns = Some(period_ns);
        Ok(())
    }

    fn channel(&mut self, pin: u8) -> Result<u8, Self::Error> {
        if pin > LAST_PIN {
            return Err("no such pin");
        }
        Ok(pin / 2)
    }

    fn set_duty(&mut self, channel: u8, pulse_ns: u32, period_ns: u32) -> Result<(), Self::Error> {
        let mut log = self.log.borrow_mut();
        if log.fail_duty {
            return Err("duty rejected");
        }
        log.duties.push(Duty {
            channel,
            pulse_ns,
            period_ns,
        });
        Ok(())
    }
}

/// A logger that keeps every message.
pub struct RecordingLogger<'a> {
    messages: &'a RefCell<Vec<String>>,
}

impl<'a> RecordingLogger<'a> {
    pub fn new(messages: &'a RefCell<Vec<String>>) -> Self {
        Self { messages }
    }
}

impl Logger for RecordingLogger<'_> {
    fn debug(&mut self, message: &str) {
        self.messages.borrow_mut().push(message.to_string());
    }
}
