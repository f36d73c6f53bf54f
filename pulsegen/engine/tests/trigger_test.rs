//! Trigger routing tests for pulsegen-engine

use pulsegen_engine::{
    AllAction, ChannelId, ChannelMask, PulseEngine, TriggerAction, TriggerId,
};
use pulsegen_sim::{SimEvents, SimPins, SimTimers};

fn engine() -> PulseEngine<SimTimers, SimPins, SimEvents> {
    PulseEngine::new(SimTimers::new(), SimPins::new(), SimEvents::new())
}

#[test]
fn test_edge_starts_same_index_channel() {
    let mut engine = engine();
    engine.handle_trigger_edge(TriggerId::Trig1, true);

    assert_eq!(engine.exec_state(), ChannelMask::single(ChannelId::Ch1));
    assert_eq!(engine.events().count(), 1);
}

#[test]
fn test_inverted_polarity_starts_on_low() {
    let mut engine = engine();
    engine.write_trigger_mode(TriggerId::Trig0, TriggerAction::StartOnly, true);

    engine.handle_trigger_edge(TriggerId::Trig0, true);
    assert!(!engine.is_running(ChannelId::Ch0));

    engine.handle_trigger_edge(TriggerId::Trig0, false);
    assert!(engine.is_running(ChannelId::Ch0));
}

#[test]
fn test_start_only_ignores_opposite_edge() {
    let mut engine = engine();
    engine.handle_trigger_edge(TriggerId::Trig0, true);
    engine.handle_trigger_edge(TriggerId::Trig0, false);

    assert!(engine.is_running(ChannelId::Ch0));
    assert_eq!(engine.events().count(), 1);
}

#[test]
fn test_start_and_stop_on_opposite_edge() {
    let mut engine = engine();
    engine.write_trigger_mode(TriggerId::Trig0, TriggerAction::StartAndStop, false);

    engine.handle_trigger_edge(TriggerId::Trig0, true);
    assert!(engine.is_running(ChannelId::Ch0));

    engine.handle_trigger_edge(TriggerId::Trig0, false);
    assert!(!engine.is_running(ChannelId::Ch0));
    assert_eq!(engine.events().count(), 2);
}

#[test]
fn test_multi_channel_mask_notifies_once() {
    let mut engine = engine();
    let targets = ChannelMask::new(0b0101).unwrap();
    engine.write_trigger_targets(TriggerId::Trig0, targets);

    engine.handle_trigger_edge(TriggerId::Trig0, true);
    assert_eq!(engine.exec_state(), targets);
    assert_eq!(engine.events().count(), 1);
}

#[test]
fn test_trigger_all_skips_running_channel() {
    let mut engine = engine();
    engine.handle_trigger_edge(TriggerId::Trig1, true);
    assert_eq!(engine.events().count(), 1);
    let ch1_budget = engine.channel(ChannelId::Ch1).remaining_pulses();

    // Three channels start, the running one is left alone, one notification
    engine.handle_all_edge(true);
    assert_eq!(engine.exec_state(), ChannelMask::FULL);
    assert_eq!(engine.events().count(), 2);
    assert_eq!(engine.timers().program_count[1], 1);
    assert_eq!(engine.channel(ChannelId::Ch1).remaining_pulses(), ch1_budget);
}

#[test]
fn test_all_enable_mode_enables_without_starting() {
    let mut engine = engine();
    engine.write_all_mode(AllAction::Enable, false);
    engine.write_confirm_enable(ChannelMask::FULL);

    // Gated off: a discrete edge cannot start anything yet
    engine.handle_trigger_edge(TriggerId::Trig0, true);
    assert!(engine.exec_state().is_empty());

    engine.handle_all_edge(true);
    assert!(engine.exec_state().is_empty());
    assert_eq!(engine.enable_mask(), ChannelMask::FULL);
    assert_eq!(engine.events().count(), 0);

    // Enabled now: the discrete edge starts its target
    engine.handle_trigger_edge(TriggerId::Trig0, true);
    assert_eq!(engine.exec_state(), ChannelMask::single(ChannelId::Ch0));
}

#[test]
fn test_all_enable_and_stop_halts_on_opposite_edge() {
    let mut engine = engine();
    engine.write_all_mode(AllAction::EnableAndStop, false);

    engine.handle_trigger_edge(TriggerId::Trig0, true);
    assert!(engine.is_running(ChannelId::Ch0));

    // The opposite edge stops timers; it does not touch enable bits
    engine.handle_all_edge(false);
    assert!(!engine.is_running(ChannelId::Ch0));
    assert_eq!(engine.enable_mask(), ChannelMask::EMPTY);
}

#[test]
fn test_trigger_all_and_stop_roundtrip() {
    let mut engine = engine();
    engine.write_all_mode(AllAction::TriggerAllAndStop, false);

    engine.handle_all_edge(true);
    assert_eq!(engine.exec_state(), ChannelMask::FULL);
    assert_eq!(engine.events().count(), 1);

    engine.handle_all_edge(false);
    assert!(engine.exec_state().is_empty());
    assert_eq!(engine.events().count(), 2);
}

#[test]
fn test_all_inverted_polarity() {
    let mut engine = engine();
    engine.write_all_mode(AllAction::TriggerAll, true);

    engine.handle_all_edge(true);
    assert!(engine.exec_state().is_empty());

    engine.handle_all_edge(false);
    assert_eq!(engine.exec_state(), ChannelMask::FULL);
}

#[test]
fn test_repeated_edge_does_not_reset_pulse_budget() {
    let mut engine = engine();
    engine.handle_trigger_edge(TriggerId::Trig0, true);
    for _ in 0..4 {
        engine.handle_pulse_boundary(ChannelId::Ch0);
    }
    assert_eq!(engine.channel(ChannelId::Ch0).remaining_pulses(), 6);

    engine.handle_trigger_edge(TriggerId::Trig0, true);
    assert_eq!(engine.channel(ChannelId::Ch0).remaining_pulses(), 6);
    assert_eq!(engine.timers().program_count[0], 1);
}
