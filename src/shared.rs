//! A servo slot shared between execution contexts.
//!
//! A servo handler is not reentrant. When both the main loop and an interrupt handler
//! steer the same servo, put the handler in a [`SharedServo`] and reach it through
//! [`SharedServo::with`], which serializes every access with a blocking mutex.
//!
//! ```rust
//! use servo_envoy::Error;
//! use servo_envoy::shared::SharedServo;
//!
//! static STEERING: SharedServo<u16> = SharedServo::new();
//! let slot = &STEERING;
//! assert_eq!(slot.with(|angle| Ok(*angle)), Err(Error::NilHandler));
//!
//! assert_eq!(slot.install(90), Ok(None));
//! assert_eq!(slot.with(|angle| Ok(*angle)), Ok(90));
//! ```

use core::cell::RefCell;

use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;

use crate::{Error, Result};

/// A critical-section-guarded slot that may hold a servo.
///
/// It can live in a `static` and be used from interrupts.
pub struct SharedServo<S> {
    slot: Mutex<CriticalSectionRawMutex, RefCell<Option<S>>>,
}

impl<S> SharedServo<S> {
    /// An empty slot.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            slot: Mutex::new(RefCell::new(None)),
        }
    }

    /// Put `servo` in the slot, returning the servo it replaces.
    ///
    /// # Errors
    ///
    /// [`Error::NilHandler`] if the slot is in use by [`SharedServo::with`] further up
    /// the call stack. `servo` is dropped.
    pub fn install(&self, servo: S) -> Result<Option<S>> {
        self.slot.lock(|slot| {
            let mut slot = slot.try_borrow_mut().map_err(|_| Error::NilHandler)?;
            Ok(slot.replace(servo))
        })
    }

    /// Empty the slot, returning its servo.
    ///
    /// # Errors
    ///
    /// [`Error::NilHandler`] if the slot is in use by [`SharedServo::with`] further up
    /// the call stack.
    pub fn take(&self) -> Result<Option<S>> {
        self.slot.lock(|slot| {
            let mut slot = slot.try_borrow_mut().map_err(|_| Error::NilHandler)?;
            Ok(slot.take())
        })
    }

    /// Whether the slot holds a servo.
    ///
    /// A slot in use by [`SharedServo::with`] holds one.
    #[must_use]
    pub fn is_installed(&self) -> bool {
        self.slot.lock(|slot| !matches!(slot.try_borrow().as_deref(), Ok(None)))
    }

    /// Run `operation` on the servo while holding the lock.
    ///
    /// # Errors
    ///
    /// [`Error::NilHandler`] if the slot is empty or already in use further up the call
    /// stack; otherwise whatever `operation` returns.
    pub fn with<T>(&self, operation: impl FnOnce(&mut S) -> Result<T>) -> Result<T> {
        self.slot.lock(|slot| {
            let mut slot = slot.try_borrow_mut().map_err(|_| Error::NilHandler)?;
            let servo = slot.as_mut().ok_or(Error::NilHandler)?;
            operation(servo)
        })
    }
}

impl<S> Default for SharedServo<S> {
    fn default() -> Self {
        Self::new()
    }
}
