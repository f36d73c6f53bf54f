//! Collaborator interfaces implemented by the host framework
//!
//! The engine never touches hardware directly; it is programmed against
//! these traits and the device integration supplies the implementations.

use crate::{ChannelId, TimerParams, TriggerLine};

/// The four hardware pulse timer units, one per channel
pub trait PwmTimer {
    /// Program the channel's unit with a period and duty compare value and
    /// start it
    fn program(&mut self, ch: ChannelId, params: TimerParams, duty_compare: u16);

    /// Halt the channel's unit
    fn halt(&mut self, ch: ChannelId);

    /// Whether the channel's unit is currently generating pulses
    fn is_active(&self, ch: ChannelId) -> bool;
}

/// Digital lines owned by the pulse generator
pub trait PulseIo {
    /// Drive the channel's synchronization output
    fn set_channel_sync(&mut self, ch: ChannelId, high: bool);

    /// Drive the shared synchronization output
    fn set_group_sync(&mut self, high: bool);

    /// Drive the channel's enable indicator
    fn set_enable_indicator(&mut self, ch: ChannelId, on: bool);

    /// Sample a trigger input line
    fn read_trigger(&self, line: TriggerLine) -> bool;

    /// Sample the channel's pulse output
    fn read_channel_output(&self, ch: ChannelId) -> bool;
}

/// Event notification transport
pub trait EventSink {
    /// Report a change of the register at `address`. `is_event` marks the
    /// message as an unsolicited event rather than a command reply.
    fn notify(&mut self, address: u8, is_event: bool);
}
