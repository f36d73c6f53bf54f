//! Cross-context access to the engine
//!
//! The execution state, the remaining-pulse counters and the shared sync
//! output are mutated from both interrupt context (edge and pulse-boundary
//! events) and command context (host writes). Every access therefore goes
//! through a critical section; on a bare-metal target that is the
//! interrupts-disabled window provided by the `critical-section` port.

use core::cell::RefCell;

use critical_section::Mutex;

use pulsegen_core::{EventSink, PulseIo, PwmTimer};

use crate::PulseEngine;

/// Shares one engine between command context and interrupt handlers
pub struct SharedEngine<T, P, E> {
    inner: Mutex<RefCell<Option<PulseEngine<T, P, E>>>>,
}

impl<T, P, E> SharedEngine<T, P, E>
where
    T: PwmTimer,
    P: PulseIo,
    E: EventSink,
{
    /// Empty slot, suitable for a `static`
    pub const fn empty() -> Self {
        Self {
            inner: Mutex::new(RefCell::new(None)),
        }
    }

    /// Install the engine, returning the previously installed one if any
    pub fn install(&self, engine: PulseEngine<T, P, E>) -> Option<PulseEngine<T, P, E>> {
        critical_section::with(|cs| self.inner.borrow_ref_mut(cs).replace(engine))
    }

    /// Remove and return the installed engine
    pub fn take(&self) -> Option<PulseEngine<T, P, E>> {
        critical_section::with(|cs| self.inner.borrow_ref_mut(cs).take())
    }

    /// Run `f` with exclusive access to the engine, interrupts excluded for
    /// the duration. Returns `None` when no engine is installed.
    pub fn with<R>(&self, f: impl FnOnce(&mut PulseEngine<T, P, E>) -> R) -> Option<R> {
        critical_section::with(|cs| self.inner.borrow_ref_mut(cs).as_mut().map(f))
    }
}

impl<T, P, E> Default for SharedEngine<T, P, E>
where
    T: PwmTimer,
    P: PulseIo,
    E: EventSink,
{
    fn default() -> Self {
        Self::empty()
    }
}
