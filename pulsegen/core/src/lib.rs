#![no_std]
#![forbid(unsafe_code)]

//! # Pulsegen Core
//!
//! Core types, traits, and abstractions for the pulsegen four-channel
//! pulse generator. This crate provides the channel and trigger identifier
//! types, the timer-fitting algorithm, the collaborator interfaces the
//! engine is programmed against, and the wire-level register encodings.

#[cfg(feature = "std")]
extern crate std;

use core::fmt;

pub mod channel;
pub mod fit;
pub mod hal;
pub mod regs;
pub mod trigger;

pub use channel::*;
pub use fit::*;
pub use hal::*;
pub use trigger::*;

/// Pulsegen version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Result type used throughout the pulsegen crates
pub type PulseResult<T> = Result<T, PulseError>;

/// Error types for pulsegen operations
///
/// Every variant represents a rejected host write; nothing in the engine is
/// fatal and no error mutates state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PulseError {
    /// Requested pulse frequency is outside the supported range
    FrequencyOutOfRange,
    /// Requested duty cycle is outside the supported range
    DutyCycleOutOfRange,
    /// A finite pulse train needs at least one pulse
    ZeroPulseCount,
    /// A bitmask or mode write carried reserved bits
    ReservedBits,
    /// The addressed register cannot be written
    ReadOnlyRegister,
    /// The payload type does not match the addressed register
    TypeMismatch,
    /// No register is mapped at the given address
    UnknownRegister,
}

impl fmt::Display for PulseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PulseError::FrequencyOutOfRange => write!(f, "Frequency is out of range"),
            PulseError::DutyCycleOutOfRange => write!(f, "Duty cycle is out of range"),
            PulseError::ZeroPulseCount => write!(f, "Pulse count must be at least one"),
            PulseError::ReservedBits => write!(f, "Write carries reserved bits"),
            PulseError::ReadOnlyRegister => write!(f, "Register is read-only"),
            PulseError::TypeMismatch => write!(f, "Payload type mismatch"),
            PulseError::UnknownRegister => write!(f, "Unknown register address"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for PulseError {}

#[cfg(feature = "defmt")]
impl defmt::Format for PulseError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            PulseError::FrequencyOutOfRange => defmt::write!(fmt, "FrequencyOutOfRange"),
            PulseError::DutyCycleOutOfRange => defmt::write!(fmt, "DutyCycleOutOfRange"),
            PulseError::ZeroPulseCount => defmt::write!(fmt, "ZeroPulseCount"),
            PulseError::ReservedBits => defmt::write!(fmt, "ReservedBits"),
            PulseError::ReadOnlyRegister => defmt::write!(fmt, "ReadOnlyRegister"),
            PulseError::TypeMismatch => defmt::write!(fmt, "TypeMismatch"),
            PulseError::UnknownRegister => defmt::write!(fmt, "UnknownRegister"),
        }
    }
}
