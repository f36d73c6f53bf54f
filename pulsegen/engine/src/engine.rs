//! The trigger-routing / timer-programming / execution-state engine

use pulsegen_core::regs::{self, Register};
use pulsegen_core::{
    ChannelId, ChannelMask, ChannelMode, EventSink, PulseIo, PwmTimer, TriggerAction, TriggerId,
    TriggerLine, TriggerMask, NUM_CHANNELS, NUM_TRIGGERS,
};

use crate::{AllTriggerSlot, Channel, ExecState, TriggerSlot, DEFAULT_CLOCK_HZ};

/// Power-on pulse counts for channels 0..3
const DEFAULT_PULSE_COUNTS: [u32; NUM_CHANNELS] = [10, 20, 30, 40];

/// The four-channel pulse generator engine
///
/// Owns the channel registry, the trigger routing tables and the execution
/// state, and drives the hardware collaborators `T` (timer units), `P`
/// (digital lines) and `E` (event transport). Every entry point runs to
/// completion without yielding; cross-context callers share the engine
/// through [`crate::SharedEngine`].
pub struct PulseEngine<T, P, E> {
    pub(crate) clock_hz: u32,
    pub(crate) channels: [Channel; NUM_CHANNELS],
    pub(crate) triggers: [TriggerSlot; NUM_TRIGGERS],
    pub(crate) all_trigger: AllTriggerSlot,
    pub(crate) exec: ExecState,
    pub(crate) event_enable: bool,
    pub(crate) start_latch: TriggerMask,
    pub(crate) stop_latch: TriggerMask,
    pub(crate) indicators_enabled: bool,
    pub(crate) timers: T,
    pub(crate) io: P,
    pub(crate) events: E,
}

impl<T, P, E> PulseEngine<T, P, E>
where
    T: PwmTimer,
    P: PulseIo,
    E: EventSink,
{
    /// Engine with the default 32 MHz timer clock, reset to power-on state
    pub fn new(timers: T, io: P, events: E) -> Self {
        Self::with_clock(DEFAULT_CLOCK_HZ, timers, io, events)
    }

    /// Engine with an explicit timer clock, reset to power-on state
    pub fn with_clock(clock_hz: u32, timers: T, io: P, events: E) -> Self {
        let mut engine = Self {
            clock_hz,
            channels: [Channel::new(1); NUM_CHANNELS],
            triggers: [
                TriggerSlot::new(TriggerId::Trig0),
                TriggerSlot::new(TriggerId::Trig1),
                TriggerSlot::new(TriggerId::Trig2),
                TriggerSlot::new(TriggerId::Trig3),
            ],
            all_trigger: AllTriggerSlot::new(),
            exec: ExecState::new(),
            event_enable: true,
            start_latch: TriggerMask::EMPTY,
            stop_latch: TriggerMask::EMPTY,
            indicators_enabled: true,
            timers,
            io,
            events,
        };
        engine.reset();
        engine
    }

    /// Restore the documented power-on state: default configuration, all
    /// timer units halted, execution state zero, derived values recomputed,
    /// outputs refreshed.
    pub fn reset(&mut self) {
        for (channel, counts) in self.channels.iter_mut().zip(DEFAULT_PULSE_COUNTS) {
            *channel = Channel::new(counts);
        }
        for trig in TriggerId::ALL {
            self.triggers[trig.index()] = TriggerSlot::new(trig);
        }
        self.all_trigger = AllTriggerSlot::new();
        self.event_enable = true;
        self.start_latch = TriggerMask::EMPTY;
        self.stop_latch = TriggerMask::EMPTY;
        self.exec.clear();

        let clock_hz = self.clock_hz;
        for channel in self.channels.iter_mut() {
            channel.recompute(clock_hz);
        }

        for ch in ChannelId::ALL {
            self.timers.halt(ch);
            self.io.set_channel_sync(ch, false);
        }
        self.refresh_group_sync();
        self.refresh_enable_indicators();
    }

    /// Stop everything when the device leaves the operational power mode.
    /// No notifications are emitted; the host learns the state on wake-up.
    pub fn enter_standby(&mut self) {
        for ch in ChannelId::ALL {
            self.stop_channel(ch);
        }
        self.exec.clear();
        self.start_latch = TriggerMask::EMPTY;
        self.stop_latch = TriggerMask::EMPTY;
        self.refresh_group_sync();
    }

    /// Edge-detection event on a discrete trigger input.
    ///
    /// The active edge starts the input's target channels; in
    /// start-and-stop mode the opposite edge stops them. Channels already in
    /// the requested state are skipped, so a repeated edge never restarts a
    /// running channel or resets its remaining-pulse counter.
    pub fn handle_trigger_edge(&mut self, trig: TriggerId, level: bool) {
        let slot = self.triggers[trig.index()];
        if slot.is_active_level(level) {
            self.start_masked(slot.targets);
        } else if slot.action == TriggerAction::StartAndStop {
            self.stop_masked(slot.targets);
        }
    }

    /// Edge-detection event on the shared "trigger all" line.
    ///
    /// Trigger-family actions start all four channels at once; enable-family
    /// actions set every enable bit instead, taking effect the next time a
    /// trigger attempts to start a channel. The *AndStop variants stop all
    /// running channels on the opposite edge.
    pub fn handle_all_edge(&mut self, level: bool) {
        let slot = self.all_trigger;
        if slot.is_active_level(level) {
            if slot.action.is_enable() {
                for channel in self.channels.iter_mut() {
                    channel.enabled = true;
                }
                self.refresh_enable_indicators();
            } else {
                self.start_masked(ChannelMask::FULL);
            }
        } else if slot.action.stops_on_opposite_edge() {
            self.stop_masked(ChannelMask::FULL);
        }
    }

    /// Timer compare-match event closing one pulse period.
    ///
    /// Decrements the channel's remaining-pulse counter; a Count-mode
    /// channel that reaches zero stops itself, with the same notification
    /// and synchronization updates as any other stop.
    pub fn handle_pulse_boundary(&mut self, ch: ChannelId) {
        let channel = &mut self.channels[ch.index()];
        channel.remaining_pulses = channel.remaining_pulses.wrapping_sub(1);
        if channel.remaining_pulses != 0 || channel.config.mode != ChannelMode::Count {
            return;
        }
        if self.stop_channel(ch) {
            self.commit_batch(ChannelMask::single(ch), false);
        }
    }

    /// Software start: run the start logic of every selected trigger input,
    /// with the same routing and idempotence rules as a hardware edge.
    pub fn start_command(&mut self, sources: TriggerMask) {
        for trig in sources.iter() {
            let targets = self.triggers[trig.index()].targets;
            self.start_masked(targets);
        }
    }

    /// Software stop: counterpart of [`Self::start_command`].
    pub fn stop_command(&mut self, sources: TriggerMask) {
        for trig in sources.iter() {
            let targets = self.triggers[trig.index()].targets;
            self.stop_masked(targets);
        }
    }

    /// Gate the enable indicator outputs, mirroring the host's visual
    /// setting. While off, all indicators are driven low.
    pub fn set_indicators_enabled(&mut self, on: bool) {
        self.indicators_enabled = on;
        self.refresh_enable_indicators();
    }

    /// Start every target channel that is not already running, then fold the
    /// batch into the execution state with a single notification.
    fn start_masked(&mut self, targets: ChannelMask) {
        let mut delta = ChannelMask::EMPTY;
        for ch in targets.iter() {
            if self.exec.is_running(ch) {
                continue;
            }
            if self.start_channel(ch) {
                delta.insert(ch);
            }
        }
        self.commit_batch(delta, true);
    }

    /// Stop every target channel that is running; one notification per batch.
    fn stop_masked(&mut self, targets: ChannelMask) {
        let mut delta = ChannelMask::EMPTY;
        for ch in targets.iter() {
            if !self.exec.is_running(ch) {
                continue;
            }
            if self.stop_channel(ch) {
                delta.insert(ch);
            }
        }
        self.commit_batch(delta, false);
    }

    /// Start primitive: snapshot the pulse budget and program the timer.
    /// No-op when the channel is gated off, unusable, or already running.
    pub(crate) fn start_channel(&mut self, ch: ChannelId) -> bool {
        if !self.channels[ch.index()].effectively_enabled() {
            return false;
        }
        if self.timers.is_active(ch) {
            return false;
        }
        let channel = &mut self.channels[ch.index()];
        let Some(timing) = channel.timing else {
            return false;
        };
        channel.remaining_pulses = channel.config.pulse_count;
        self.timers.program(ch, timing.params, timing.duty_compare);
        self.io.set_channel_sync(ch, true);
        true
    }

    /// Stop primitive: halt the timer and drop the sync output. A
    /// single-shot channel also loses its enable bit. No-op when already
    /// stopped.
    pub(crate) fn stop_channel(&mut self, ch: ChannelId) -> bool {
        if !self.timers.is_active(ch) {
            return false;
        }
        self.timers.halt(ch);
        self.io.set_channel_sync(ch, false);
        if self.channels[ch.index()].single_shot {
            self.channels[ch.index()].enabled = false;
            self.refresh_enable_indicator(ch);
        }
        true
    }

    /// Fold a batch delta into the execution state; notify the host once if
    /// the register changed, and recompute the shared sync output.
    pub(crate) fn commit_batch(&mut self, delta: ChannelMask, became_running: bool) {
        if self.exec.apply(delta, became_running) && self.event_enable {
            self.events.notify(Register::ExecutionState.address(), true);
        }
        self.refresh_group_sync();
    }

    /// Shared sync output: asserted iff at least one timer unit is active
    pub(crate) fn refresh_group_sync(&mut self) {
        let any_active = ChannelId::ALL.iter().any(|&ch| self.timers.is_active(ch));
        self.io.set_group_sync(any_active);
    }

    pub(crate) fn refresh_enable_indicator(&mut self, ch: ChannelId) {
        let on = self.indicators_enabled && self.channels[ch.index()].effectively_enabled();
        self.io.set_enable_indicator(ch, on);
    }

    pub(crate) fn refresh_enable_indicators(&mut self) {
        for ch in ChannelId::ALL {
            self.refresh_enable_indicator(ch);
        }
    }

    /// Current running-channel mask
    pub fn exec_state(&self) -> ChannelMask {
        self.exec.mask()
    }

    pub fn is_running(&self, ch: ChannelId) -> bool {
        self.exec.is_running(ch)
    }

    /// Live levels of the five trigger lines (bit 4 is the "all" line)
    pub fn trigger_input_state(&self) -> u8 {
        let mut bits = 0;
        for trig in TriggerId::ALL {
            if self.io.read_trigger(TriggerLine::Input(trig)) {
                bits |= trig.bit();
            }
        }
        if self.io.read_trigger(TriggerLine::All) {
            bits |= regs::TRIGGER_ALL_STATE_BIT;
        }
        bits
    }

    /// Live levels of the four pulse outputs
    pub fn channel_output_state(&self) -> u8 {
        let mut bits = 0;
        for ch in ChannelId::ALL {
            if self.io.read_channel_output(ch) {
                bits |= ch.bit();
            }
        }
        bits
    }

    pub fn channel(&self, ch: ChannelId) -> &Channel {
        &self.channels[ch.index()]
    }

    pub fn trigger(&self, trig: TriggerId) -> &TriggerSlot {
        &self.triggers[trig.index()]
    }

    pub fn all_trigger(&self) -> &AllTriggerSlot {
        &self.all_trigger
    }

    pub fn event_enable(&self) -> bool {
        self.event_enable
    }

    pub fn clock_hz(&self) -> u32 {
        self.clock_hz
    }

    pub fn timers(&self) -> &T {
        &self.timers
    }

    pub fn io(&self) -> &P {
        &self.io
    }

    pub fn io_mut(&mut self) -> &mut P {
        &mut self.io
    }

    pub fn events(&self) -> &E {
        &self.events
    }

    pub fn events_mut(&mut self) -> &mut E {
        &mut self.events
    }
}
