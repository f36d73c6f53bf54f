//! Per-channel configuration and derived timer state

use pulsegen_core::{fit_frequency, ChannelMode, TimerParams};

/// Derived hardware programming for one channel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelTiming {
    pub params: TimerParams,
    pub duty_compare: u16,
}

/// Requested configuration for one channel
#[derive(Debug, Clone, Copy)]
pub struct ChannelConfig {
    pub frequency_hz: f32,
    pub duty_cycle_pct: f32,
    pub pulse_count: u32,
    pub mode: ChannelMode,
}

impl ChannelConfig {
    /// Power-on configuration: 10 Hz, 50 % duty, Count mode
    pub const fn new(pulse_count: u32) -> Self {
        Self {
            frequency_hz: 10.0,
            duty_cycle_pct: 50.0,
            pulse_count,
            mode: ChannelMode::Count,
        }
    }
}

/// One pulse channel: requested values, achievable values and live run state
#[derive(Debug, Clone, Copy)]
pub struct Channel {
    pub(crate) config: ChannelConfig,
    pub(crate) real_frequency_hz: f32,
    pub(crate) real_duty_cycle_pct: f32,
    pub(crate) timing: Option<ChannelTiming>,
    pub(crate) remaining_pulses: u32,
    pub(crate) enabled: bool,
    pub(crate) confirm_enable: bool,
    pub(crate) single_shot: bool,
}

impl Channel {
    pub(crate) const fn new(pulse_count: u32) -> Self {
        Self {
            config: ChannelConfig::new(pulse_count),
            real_frequency_hz: 0.0,
            real_duty_cycle_pct: 0.0,
            timing: None,
            remaining_pulses: 0,
            enabled: false,
            confirm_enable: false,
            single_shot: false,
        }
    }

    /// Recompute the achievable frequency and duty cycle from the requested
    /// values.
    ///
    /// When the frequency does not fit a 16-bit timer, or the rounded duty
    /// compare value degenerates to a constant output level, both real
    /// values are zeroed and the channel keeps no programmed timing: it
    /// stays silent until reconfigured.
    pub(crate) fn recompute(&mut self, clock_hz: u32) {
        self.timing = None;
        self.real_frequency_hz = 0.0;
        self.real_duty_cycle_pct = 0.0;

        let Some(params) = fit_frequency(clock_hz, self.config.frequency_hz) else {
            return;
        };

        let duty_compare = params.duty_compare(self.config.duty_cycle_pct);
        let real_duty = 100.0 * duty_compare as f32 / params.top as f32;
        if real_duty <= 0.0 || real_duty >= 100.0 {
            return;
        }

        self.real_frequency_hz = params.real_frequency_hz(clock_hz);
        self.real_duty_cycle_pct = real_duty;
        self.timing = Some(ChannelTiming { params, duty_compare });
    }

    /// Effectively enabled: the confirm gate is off or the enable bit is set
    pub(crate) fn effectively_enabled(&self) -> bool {
        !self.confirm_enable || self.enabled
    }

    /// Requested configuration
    pub fn config(&self) -> &ChannelConfig {
        &self.config
    }

    /// Achievable frequency after discretization, zero when unusable
    pub fn real_frequency_hz(&self) -> f32 {
        self.real_frequency_hz
    }

    /// Achievable duty cycle after discretization, zero when unusable
    pub fn real_duty_cycle_pct(&self) -> f32 {
        self.real_duty_cycle_pct
    }

    /// Derived timer programming, `None` when the configuration is unusable
    pub fn timing(&self) -> Option<ChannelTiming> {
        self.timing
    }

    /// Pulses left in the current finite run; meaningful only while running
    pub fn remaining_pulses(&self) -> u32 {
        self.remaining_pulses
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn is_single_shot(&self) -> bool {
        self.single_shot
    }
}
