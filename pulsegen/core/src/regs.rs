//! Host-visible register map and packed wire encodings
//!
//! The command-dispatch layer of the host framework marshals raw bytes; this
//! module gives those bytes meaning. Registers are addressed exactly as on
//! the wire, and the packed mode bytes are decoded into the tagged enums the
//! rest of the crate works with. Nothing outside this module deals in packed
//! bits.

use crate::{
    AllAction, ChannelId, ChannelMode, PulseError, PulseResult, TriggerAction, TriggerId,
};

/// First address of the register bank
pub const BANK_FIRST: u8 = 32;
/// Last address of the register bank
pub const BANK_LAST: u8 = 74;

/// Bit carried by the trigger-input-state register for the "all" line
pub const TRIGGER_ALL_STATE_BIT: u8 = 1 << 4;

const MODE_INFINITE_BIT: u8 = 1 << 0;
const TRIGGER_STOP_BIT: u8 = 1 << 0;
const POLARITY_INVERT_BIT: u8 = 1 << 3;
const ALL_ACTION_MASK: u8 = 0x03;
const EVENT_ENABLE_BIT: u8 = 1 << 0;

/// A host-visible register of the pulse generator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Register {
    /// Requested pulse frequency in Hz (F32)
    Frequency(ChannelId),
    /// Requested duty cycle in percent (F32)
    DutyCycle(ChannelId),
    /// Number of pulses in Count mode (U32)
    PulseCount(ChannelId),
    /// Achievable frequency after discretization, read-only (F32)
    RealFrequency(ChannelId),
    /// Achievable duty cycle after discretization, read-only (F32)
    RealDutyCycle(ChannelId),
    /// Channel run mode (U8, bit 0)
    Mode(ChannelId),
    /// Channels started/stopped by this trigger input (U8, low four bits)
    TriggerTargets(TriggerId),
    /// Software start latch, self-clearing on read (U8, low four bits)
    StartCommand,
    /// Software stop latch, self-clearing on read (U8, low four bits)
    StopCommand,
    /// Channels that auto-disable after stopping (U8, low four bits)
    SingleShotDisable,
    /// Unused slot kept for wire compatibility (U8)
    Reserved,
    /// Trigger input semantics (U8: bit 0 action, bit 3 polarity)
    TriggerMode(TriggerId),
    /// Channels whose enable bit gates starting (U8, low four bits)
    ConfirmEnable,
    /// Channel enable bits (U8, low four bits)
    Enable,
    /// "Trigger all" semantics (U8: bits 0-1 action, bit 3 polarity)
    AllTriggerMode,
    /// Live trigger line levels, read-only (U8, bits 0-4)
    TriggerInputState,
    /// Live pulse output levels, read-only (U8, low four bits)
    ChannelOutputState,
    /// Running-channel mask, read-only (U8, low four bits)
    ExecutionState,
    /// Event reporting enable (U8, bit 0)
    EventEnable,
}

impl Register {
    /// Wire address of this register
    pub const fn address(self) -> u8 {
        match self {
            Register::Frequency(ch) => 32 + ch.index() as u8,
            Register::DutyCycle(ch) => 36 + ch.index() as u8,
            Register::PulseCount(ch) => 40 + ch.index() as u8,
            Register::RealFrequency(ch) => 44 + ch.index() as u8,
            Register::RealDutyCycle(ch) => 48 + ch.index() as u8,
            Register::Mode(ch) => 52 + ch.index() as u8,
            Register::TriggerTargets(trig) => 56 + trig.index() as u8,
            Register::StartCommand => 60,
            Register::StopCommand => 61,
            Register::SingleShotDisable => 62,
            Register::Reserved => 63,
            Register::TriggerMode(trig) => 64 + trig.index() as u8,
            Register::ConfirmEnable => 68,
            Register::Enable => 69,
            Register::AllTriggerMode => 70,
            Register::TriggerInputState => 71,
            Register::ChannelOutputState => 72,
            Register::ExecutionState => 73,
            Register::EventEnable => 74,
        }
    }

    /// Register mapped at a wire address
    pub fn from_address(address: u8) -> Option<Register> {
        let ch = |base: u8| ChannelId::from_index((address - base) as usize);
        let trig = |base: u8| match address - base {
            0 => Some(TriggerId::Trig0),
            1 => Some(TriggerId::Trig1),
            2 => Some(TriggerId::Trig2),
            3 => Some(TriggerId::Trig3),
            _ => None,
        };
        match address {
            32..=35 => ch(32).map(Register::Frequency),
            36..=39 => ch(36).map(Register::DutyCycle),
            40..=43 => ch(40).map(Register::PulseCount),
            44..=47 => ch(44).map(Register::RealFrequency),
            48..=51 => ch(48).map(Register::RealDutyCycle),
            52..=55 => ch(52).map(Register::Mode),
            56..=59 => trig(56).map(Register::TriggerTargets),
            60 => Some(Register::StartCommand),
            61 => Some(Register::StopCommand),
            62 => Some(Register::SingleShotDisable),
            63 => Some(Register::Reserved),
            64..=67 => trig(64).map(Register::TriggerMode),
            68 => Some(Register::ConfirmEnable),
            69 => Some(Register::Enable),
            70 => Some(Register::AllTriggerMode),
            71 => Some(Register::TriggerInputState),
            72 => Some(Register::ChannelOutputState),
            73 => Some(Register::ExecutionState),
            74 => Some(Register::EventEnable),
            _ => None,
        }
    }
}

/// Typed payload carried by a register read or write
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RegValue {
    U8(u8),
    U32(u32),
    F32(f32),
}

impl RegValue {
    pub fn as_u8(self) -> PulseResult<u8> {
        match self {
            RegValue::U8(v) => Ok(v),
            _ => Err(PulseError::TypeMismatch),
        }
    }

    pub fn as_u32(self) -> PulseResult<u32> {
        match self {
            RegValue::U32(v) => Ok(v),
            _ => Err(PulseError::TypeMismatch),
        }
    }

    pub fn as_f32(self) -> PulseResult<f32> {
        match self {
            RegValue::F32(v) => Ok(v),
            _ => Err(PulseError::TypeMismatch),
        }
    }
}

/// Decode a channel-mode byte
pub fn decode_channel_mode(bits: u8) -> PulseResult<ChannelMode> {
    if bits & !MODE_INFINITE_BIT != 0 {
        return Err(PulseError::ReservedBits);
    }
    if bits & MODE_INFINITE_BIT != 0 {
        Ok(ChannelMode::Infinite)
    } else {
        Ok(ChannelMode::Count)
    }
}

/// Encode a channel-mode byte
pub const fn encode_channel_mode(mode: ChannelMode) -> u8 {
    match mode {
        ChannelMode::Count => 0,
        ChannelMode::Infinite => MODE_INFINITE_BIT,
    }
}

/// Decode a trigger-mode byte into its action and polarity inversion
pub fn decode_trigger_mode(bits: u8) -> PulseResult<(TriggerAction, bool)> {
    if bits & !(TRIGGER_STOP_BIT | POLARITY_INVERT_BIT) != 0 {
        return Err(PulseError::ReservedBits);
    }
    let action = if bits & TRIGGER_STOP_BIT != 0 {
        TriggerAction::StartAndStop
    } else {
        TriggerAction::StartOnly
    };
    Ok((action, bits & POLARITY_INVERT_BIT != 0))
}

/// Encode a trigger-mode byte
pub const fn encode_trigger_mode(action: TriggerAction, invert: bool) -> u8 {
    let mut bits = match action {
        TriggerAction::StartOnly => 0,
        TriggerAction::StartAndStop => TRIGGER_STOP_BIT,
    };
    if invert {
        bits |= POLARITY_INVERT_BIT;
    }
    bits
}

/// Decode a "trigger all" mode byte into its action and polarity inversion
pub fn decode_all_mode(bits: u8) -> PulseResult<(AllAction, bool)> {
    if bits & !(ALL_ACTION_MASK | POLARITY_INVERT_BIT) != 0 {
        return Err(PulseError::ReservedBits);
    }
    let action = match bits & ALL_ACTION_MASK {
        0 => AllAction::TriggerAll,
        1 => AllAction::TriggerAllAndStop,
        2 => AllAction::Enable,
        _ => AllAction::EnableAndStop,
    };
    Ok((action, bits & POLARITY_INVERT_BIT != 0))
}

/// Encode a "trigger all" mode byte
pub const fn encode_all_mode(action: AllAction, invert: bool) -> u8 {
    let mut bits = match action {
        AllAction::TriggerAll => 0,
        AllAction::TriggerAllAndStop => 1,
        AllAction::Enable => 2,
        AllAction::EnableAndStop => 3,
    };
    if invert {
        bits |= POLARITY_INVERT_BIT;
    }
    bits
}

/// Decode an event-enable byte
pub fn decode_event_enable(bits: u8) -> PulseResult<bool> {
    if bits & !EVENT_ENABLE_BIT != 0 {
        return Err(PulseError::ReservedBits);
    }
    Ok(bits & EVENT_ENABLE_BIT != 0)
}

/// Encode an event-enable byte
pub const fn encode_event_enable(enabled: bool) -> u8 {
    if enabled {
        EVENT_ENABLE_BIT
    } else {
        0
    }
}
