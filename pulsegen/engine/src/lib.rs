#![no_std]
#![forbid(unsafe_code)]

//! # Pulsegen Engine
//!
//! The trigger-routing, timer-programming and execution-state engine of the
//! four-channel pulse generator. The engine converts requested frequency and
//! duty-cycle pairs into hardware timer parameters, routes edges on the five
//! trigger lines to per-channel start/stop actions, and keeps the
//! running-channel mask consistent between interrupt context and command
//! context.
//!
//! All hardware access goes through the collaborator traits of
//! [`pulsegen_core`]; cross-context access goes through [`SharedEngine`].

pub mod channel;
pub mod engine;
pub mod exec;
pub mod shared;
pub mod trigger;

mod bank;
mod command;

pub use pulsegen_core::*;

pub use channel::*;
pub use engine::*;
pub use exec::*;
pub use shared::*;
pub use trigger::*;

/// Default microcontroller clock feeding the timer units
pub const DEFAULT_CLOCK_HZ: u32 = 32_000_000;
