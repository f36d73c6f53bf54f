//! Validated host configuration writes
//!
//! Every write is checked at this boundary; a rejected write mutates
//! nothing. Writing the frequency, duty cycle or pulse count of a running
//! channel stops that channel first (the in-flight run keeps its old
//! parameters, the new ones apply on the next start), then re-derives the
//! achievable values.

use core::mem;

use pulsegen_core::{
    AllAction, ChannelId, ChannelMask, ChannelMode, EventSink, PulseError, PulseIo, PulseResult,
    PwmTimer, TriggerAction, TriggerId, TriggerMask,
};

use crate::PulseEngine;

impl<T, P, E> PulseEngine<T, P, E>
where
    T: PwmTimer,
    P: PulseIo,
    E: EventSink,
{
    /// Requested pulse frequency in Hz, valid from 0.5 to 32768
    pub fn write_frequency(&mut self, ch: ChannelId, hz: f32) -> PulseResult<()> {
        if hz < 0.5 || hz > 32_768.0 {
            return Err(PulseError::FrequencyOutOfRange);
        }
        self.channels[ch.index()].config.frequency_hz = hz;
        self.stop_and_refresh(ch);
        Ok(())
    }

    /// Requested duty cycle in percent, valid strictly between 0.1 and 99.9
    pub fn write_duty_cycle(&mut self, ch: ChannelId, pct: f32) -> PulseResult<()> {
        if pct <= 0.1 || pct >= 99.9 {
            return Err(PulseError::DutyCycleOutOfRange);
        }
        self.channels[ch.index()].config.duty_cycle_pct = pct;
        self.stop_and_refresh(ch);
        Ok(())
    }

    /// Number of pulses emitted in Count mode, at least one
    pub fn write_pulse_count(&mut self, ch: ChannelId, count: u32) -> PulseResult<()> {
        if count == 0 {
            return Err(PulseError::ZeroPulseCount);
        }
        self.channels[ch.index()].config.pulse_count = count;
        self.stop_and_refresh(ch);
        Ok(())
    }

    /// Run mode; takes effect on the next start
    pub fn write_channel_mode(&mut self, ch: ChannelId, mode: ChannelMode) {
        self.channels[ch.index()].config.mode = mode;
    }

    /// Channels a trigger input starts/stops
    pub fn write_trigger_targets(&mut self, trig: TriggerId, targets: ChannelMask) {
        self.triggers[trig.index()].targets = targets;
    }

    /// Edge semantics of a trigger input
    pub fn write_trigger_mode(&mut self, trig: TriggerId, action: TriggerAction, invert: bool) {
        let slot = &mut self.triggers[trig.index()];
        slot.action = action;
        slot.invert = invert;
    }

    /// Edge semantics of the shared "trigger all" line
    pub fn write_all_mode(&mut self, action: AllAction, invert: bool) {
        self.all_trigger.action = action;
        self.all_trigger.invert = invert;
    }

    /// Channel enable bits
    pub fn write_enable(&mut self, mask: ChannelMask) {
        for ch in ChannelId::ALL {
            self.channels[ch.index()].enabled = mask.contains(ch);
        }
        self.refresh_enable_indicators();
    }

    /// Channels whose enable bit gates starting; an unset bit means the
    /// channel behaves as always enabled
    pub fn write_confirm_enable(&mut self, mask: ChannelMask) {
        for ch in ChannelId::ALL {
            self.channels[ch.index()].confirm_enable = mask.contains(ch);
        }
        self.refresh_enable_indicators();
    }

    /// Channels that clear their enable bit whenever they stop
    pub fn write_single_shot(&mut self, mask: ChannelMask) {
        for ch in ChannelId::ALL {
            self.channels[ch.index()].single_shot = mask.contains(ch);
        }
    }

    /// Enable or disable unsolicited state-change events
    pub fn write_event_enable(&mut self, enabled: bool) {
        self.event_enable = enabled;
    }

    /// Software start latch: dispatches immediately, reads back until the
    /// latch is consumed
    pub fn write_start_command(&mut self, sources: TriggerMask) {
        self.start_latch = sources;
        self.start_command(sources);
    }

    /// Software stop latch: counterpart of [`Self::write_start_command`]
    pub fn write_stop_command(&mut self, sources: TriggerMask) {
        self.stop_latch = sources;
        self.stop_command(sources);
    }

    /// Consume the start latch (self-clearing read)
    pub fn take_start_command(&mut self) -> TriggerMask {
        mem::replace(&mut self.start_latch, TriggerMask::EMPTY)
    }

    /// Consume the stop latch (self-clearing read)
    pub fn take_stop_command(&mut self) -> TriggerMask {
        mem::replace(&mut self.stop_latch, TriggerMask::EMPTY)
    }

    /// Current enable bits as a mask
    pub fn enable_mask(&self) -> ChannelMask {
        self.compose(|channel| channel.enabled)
    }

    /// Current confirm-enable bits as a mask
    pub fn confirm_enable_mask(&self) -> ChannelMask {
        self.compose(|channel| channel.confirm_enable)
    }

    /// Current single-shot bits as a mask
    pub fn single_shot_mask(&self) -> ChannelMask {
        self.compose(|channel| channel.single_shot)
    }

    fn compose(&self, selected: impl Fn(&crate::Channel) -> bool) -> ChannelMask {
        let mut mask = ChannelMask::EMPTY;
        for ch in ChannelId::ALL {
            if selected(&self.channels[ch.index()]) {
                mask.insert(ch);
            }
        }
        mask
    }

    /// Stop the channel if it is running (with the usual notification), then
    /// re-derive its achievable values.
    fn stop_and_refresh(&mut self, ch: ChannelId) {
        if self.stop_channel(ch) {
            self.commit_batch(ChannelMask::single(ch), false);
        }
        let clock_hz = self.clock_hz;
        self.channels[ch.index()].recompute(clock_hz);
    }
}
