//! Channel start/stop and execution-state tests for pulsegen-engine
//! These run on the host against the simulated collaborators.

use pulsegen_engine::{
    ChannelId, ChannelMask, ChannelMode, Prescaler, PulseEngine, TriggerId, TriggerMask,
};
use pulsegen_sim::{SimEvents, SimPins, SimTimers};

const EXEC_STATE_ADDRESS: u8 = 73;

fn engine() -> PulseEngine<SimTimers, SimPins, SimEvents> {
    PulseEngine::new(SimTimers::new(), SimPins::new(), SimEvents::new())
}

#[test]
fn test_reset_defaults() {
    let engine = engine();

    for (index, expected_counts) in [10u32, 20, 30, 40].into_iter().enumerate() {
        let ch = ChannelId::from_index(index).unwrap();
        let channel = engine.channel(ch);
        assert_eq!(channel.config().frequency_hz, 10.0);
        assert_eq!(channel.config().duty_cycle_pct, 50.0);
        assert_eq!(channel.config().pulse_count, expected_counts);
        assert_eq!(channel.config().mode, ChannelMode::Count);
        assert_eq!(channel.real_frequency_hz(), 10.0);
        assert_eq!(channel.real_duty_cycle_pct(), 50.0);
    }

    let timing = engine.channel(ChannelId::Ch0).timing().unwrap();
    assert_eq!(timing.params.prescaler, Prescaler::Div64);
    assert_eq!(timing.params.top, 50_000);
    assert_eq!(timing.duty_compare, 25_000);

    assert!(engine.exec_state().is_empty());
    assert!(engine.event_enable());
    // Confirm gates are off, so every channel reads as enabled
    assert_eq!(engine.io().indicators, [true; 4]);
    assert!(!engine.io().group_sync);
}

#[test]
fn test_start_command_starts_default_target() {
    let mut engine = engine();
    engine.write_start_command(TriggerMask::single(TriggerId::Trig0));

    assert!(engine.is_running(ChannelId::Ch0));
    assert!(!engine.is_running(ChannelId::Ch1));
    assert_eq!(engine.exec_state(), ChannelMask::single(ChannelId::Ch0));

    let programmed = engine.timers().programmed(ChannelId::Ch0).unwrap();
    assert_eq!(programmed.params.top, 50_000);
    assert_eq!(programmed.duty_compare, 25_000);

    assert!(engine.io().channel_sync[0]);
    assert!(engine.io().group_sync);

    assert_eq!(engine.events().count(), 1);
    let notification = engine.events().last().unwrap();
    assert_eq!(notification.address, EXEC_STATE_ADDRESS);
    assert!(notification.is_event);
}

#[test]
fn test_start_is_idempotent() {
    let mut engine = engine();
    engine.write_start_command(TriggerMask::single(TriggerId::Trig0));

    for _ in 0..3 {
        engine.handle_pulse_boundary(ChannelId::Ch0);
    }
    assert_eq!(engine.channel(ChannelId::Ch0).remaining_pulses(), 7);

    // A second start must not reprogram the timer or reset the budget
    engine.write_start_command(TriggerMask::single(TriggerId::Trig0));
    assert_eq!(engine.channel(ChannelId::Ch0).remaining_pulses(), 7);
    assert_eq!(engine.timers().program_count[0], 1);
    assert_eq!(engine.events().count(), 1);
}

#[test]
fn test_count_mode_stops_after_exact_pulse_count() {
    let mut engine = engine();
    engine.write_pulse_count(ChannelId::Ch0, 3).unwrap();
    engine.write_start_command(TriggerMask::single(TriggerId::Trig0));
    assert_eq!(engine.events().count(), 1);

    engine.handle_pulse_boundary(ChannelId::Ch0);
    engine.handle_pulse_boundary(ChannelId::Ch0);
    assert!(engine.is_running(ChannelId::Ch0));
    assert_eq!(engine.events().count(), 1);

    engine.handle_pulse_boundary(ChannelId::Ch0);
    assert!(!engine.is_running(ChannelId::Ch0));
    assert!(engine.exec_state().is_empty());
    assert!(!engine.io().channel_sync[0]);
    assert!(!engine.io().group_sync);
    assert_eq!(engine.events().count(), 2);
}

#[test]
fn test_infinite_mode_never_autostops() {
    let mut engine = engine();
    engine.write_channel_mode(ChannelId::Ch0, ChannelMode::Infinite);
    engine.write_start_command(TriggerMask::single(TriggerId::Trig0));

    for _ in 0..25 {
        engine.handle_pulse_boundary(ChannelId::Ch0);
    }
    assert!(engine.is_running(ChannelId::Ch0));
    assert_eq!(engine.events().count(), 1);
}

#[test]
fn test_single_shot_disables_on_stop() {
    let mut engine = engine();
    let ch0 = ChannelMask::single(ChannelId::Ch0);
    engine.write_confirm_enable(ch0);
    engine.write_enable(ch0);
    engine.write_single_shot(ch0);

    engine.write_start_command(TriggerMask::single(TriggerId::Trig0));
    assert!(engine.is_running(ChannelId::Ch0));

    engine.write_stop_command(TriggerMask::single(TriggerId::Trig0));
    assert!(!engine.is_running(ChannelId::Ch0));
    assert!(!engine.channel(ChannelId::Ch0).is_enabled());
    assert!(!engine.io().indicators[0]);

    // Disabled now, so the next start attempt does nothing
    engine.write_start_command(TriggerMask::single(TriggerId::Trig0));
    assert!(!engine.is_running(ChannelId::Ch0));
    assert_eq!(engine.timers().program_count[0], 1);
}

#[test]
fn test_confirm_enable_gates_start() {
    let mut engine = engine();
    engine.write_confirm_enable(ChannelMask::single(ChannelId::Ch0));

    engine.write_start_command(TriggerMask::single(TriggerId::Trig0));
    assert!(!engine.is_running(ChannelId::Ch0));
    assert_eq!(engine.events().count(), 0);
}

#[test]
fn test_stop_is_idempotent() {
    let mut engine = engine();
    engine.write_stop_command(TriggerMask::single(TriggerId::Trig0));
    assert_eq!(engine.events().count(), 0);
    assert!(engine.exec_state().is_empty());
}

#[test]
fn test_standby_stops_everything_silently() {
    let mut engine = engine();
    engine.write_start_command(
        TriggerMask::new(TriggerId::Trig0.bit() | TriggerId::Trig1.bit()).unwrap(),
    );
    assert_eq!(engine.exec_state().raw(), 0b0011);
    engine.events_mut().clear();

    engine.enter_standby();
    assert!(engine.exec_state().is_empty());
    for ch in ChannelId::ALL {
        assert!(engine.timers().programmed(ch).is_none());
    }
    assert!(!engine.io().group_sync);
    assert_eq!(engine.events().count(), 0);
}

#[test]
fn test_group_sync_tracks_any_running_channel() {
    let mut engine = engine();
    engine.write_start_command(
        TriggerMask::new(TriggerId::Trig0.bit() | TriggerId::Trig1.bit()).unwrap(),
    );
    assert!(engine.io().group_sync);

    engine.write_stop_command(TriggerMask::single(TriggerId::Trig0));
    assert!(engine.io().group_sync);

    engine.write_stop_command(TriggerMask::single(TriggerId::Trig1));
    assert!(!engine.io().group_sync);
}

#[test]
fn test_indicator_gating() {
    let mut engine = engine();
    assert_eq!(engine.io().indicators, [true; 4]);

    engine.set_indicators_enabled(false);
    assert_eq!(engine.io().indicators, [false; 4]);

    // Enable state changes while the indicators are dark stay dark
    engine.write_confirm_enable(ChannelMask::FULL);
    engine.write_enable(ChannelMask::single(ChannelId::Ch2));
    assert_eq!(engine.io().indicators, [false; 4]);

    engine.set_indicators_enabled(true);
    assert_eq!(engine.io().indicators, [false, false, true, false]);
}

#[test]
fn test_degenerate_duty_zeroes_reals_and_blocks_start() {
    // A slow clock makes the duty compare value round down to zero
    let mut engine = PulseEngine::with_clock(
        32_000,
        SimTimers::new(),
        SimPins::new(),
        SimEvents::new(),
    );
    engine.write_frequency(ChannelId::Ch0, 100.0).unwrap();
    engine.write_duty_cycle(ChannelId::Ch0, 0.12).unwrap();

    let channel = engine.channel(ChannelId::Ch0);
    assert_eq!(channel.real_frequency_hz(), 0.0);
    assert_eq!(channel.real_duty_cycle_pct(), 0.0);
    assert!(channel.timing().is_none());

    engine.write_start_command(TriggerMask::single(TriggerId::Trig0));
    assert!(!engine.is_running(ChannelId::Ch0));
    assert_eq!(engine.events().count(), 0);
}

#[test]
fn test_saturated_duty_zeroes_reals() {
    let mut engine = PulseEngine::with_clock(
        32_000,
        SimTimers::new(),
        SimPins::new(),
        SimEvents::new(),
    );
    engine.write_frequency(ChannelId::Ch0, 100.0).unwrap();
    engine.write_duty_cycle(ChannelId::Ch0, 99.89).unwrap();

    let channel = engine.channel(ChannelId::Ch0);
    assert_eq!(channel.real_duty_cycle_pct(), 0.0);
    assert!(channel.timing().is_none());
}
