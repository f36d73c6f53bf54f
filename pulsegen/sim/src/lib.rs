#![no_std]
#![forbid(unsafe_code)]

//! # Pulsegen Sim
//!
//! In-memory implementations of the pulsegen collaborator traits: timer
//! units that record what they were programmed with, pins that remember
//! their level, and a bounded notification log. Tests and demos drive the
//! engine against these instead of hardware.

use pulsegen_core::{
    ChannelId, EventSink, PulseIo, PwmTimer, TimerParams, TriggerLine, NUM_CHANNELS, NUM_TRIGGERS,
};

/// Capacity of the simulated notification log
pub const EVENT_LOG_CAPACITY: usize = 32;

/// What a simulated timer unit was last programmed with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgrammedPulse {
    pub params: TimerParams,
    pub duty_compare: u16,
}

/// Four simulated timer units
#[derive(Debug, Default)]
pub struct SimTimers {
    units: [Option<ProgrammedPulse>; NUM_CHANNELS],
    /// How many times each unit has been programmed since construction
    pub program_count: [u32; NUM_CHANNELS],
}

impl SimTimers {
    pub const fn new() -> Self {
        Self {
            units: [None; NUM_CHANNELS],
            program_count: [0; NUM_CHANNELS],
        }
    }

    /// Parameters the unit is currently running with, `None` when halted
    pub fn programmed(&self, ch: ChannelId) -> Option<ProgrammedPulse> {
        self.units[ch.index()]
    }
}

impl PwmTimer for SimTimers {
    fn program(&mut self, ch: ChannelId, params: TimerParams, duty_compare: u16) {
        self.units[ch.index()] = Some(ProgrammedPulse {
            params,
            duty_compare,
        });
        self.program_count[ch.index()] += 1;
    }

    fn halt(&mut self, ch: ChannelId) {
        self.units[ch.index()] = None;
    }

    fn is_active(&self, ch: ChannelId) -> bool {
        self.units[ch.index()].is_some()
    }
}

/// Simulated digital lines
///
/// Outputs record the last driven level; inputs are plain fields the test
/// sets before letting the engine sample them.
#[derive(Debug, Default)]
pub struct SimPins {
    pub channel_sync: [bool; NUM_CHANNELS],
    pub group_sync: bool,
    pub indicators: [bool; NUM_CHANNELS],
    pub trigger_inputs: [bool; NUM_TRIGGERS],
    pub trigger_all_input: bool,
    pub channel_outputs: [bool; NUM_CHANNELS],
}

impl SimPins {
    pub const fn new() -> Self {
        Self {
            channel_sync: [false; NUM_CHANNELS],
            group_sync: false,
            indicators: [false; NUM_CHANNELS],
            trigger_inputs: [false; NUM_TRIGGERS],
            trigger_all_input: false,
            channel_outputs: [false; NUM_CHANNELS],
        }
    }
}

impl PulseIo for SimPins {
    fn set_channel_sync(&mut self, ch: ChannelId, high: bool) {
        self.channel_sync[ch.index()] = high;
    }

    fn set_group_sync(&mut self, high: bool) {
        self.group_sync = high;
    }

    fn set_enable_indicator(&mut self, ch: ChannelId, on: bool) {
        self.indicators[ch.index()] = on;
    }

    fn read_trigger(&self, line: TriggerLine) -> bool {
        match line {
            TriggerLine::Input(trig) => self.trigger_inputs[trig.index()],
            TriggerLine::All => self.trigger_all_input,
        }
    }

    fn read_channel_output(&self, ch: ChannelId) -> bool {
        self.channel_outputs[ch.index()]
    }
}

/// One recorded notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Notification {
    pub address: u8,
    pub is_event: bool,
}

/// Bounded log of notifications the engine emitted
#[derive(Debug, Default)]
pub struct SimEvents {
    log: heapless::Vec<Notification, EVENT_LOG_CAPACITY>,
}

impl SimEvents {
    pub const fn new() -> Self {
        Self {
            log: heapless::Vec::new(),
        }
    }

    pub fn count(&self) -> usize {
        self.log.len()
    }

    pub fn last(&self) -> Option<&Notification> {
        self.log.last()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Notification> {
        self.log.iter()
    }

    pub fn clear(&mut self) {
        self.log.clear();
    }
}

impl EventSink for SimEvents {
    fn notify(&mut self, address: u8, is_event: bool) {
        // A full log drops the notification; overflow is not an error here.
        let _ = self.log.push(Notification { address, is_event });
    }
}
