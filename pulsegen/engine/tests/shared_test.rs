//! Cross-context wrapper tests for pulsegen-engine
//! The std critical-section implementation stands in for the target's
//! interrupt-disable window.

use pulsegen_engine::{ChannelId, PulseEngine, SharedEngine, TriggerId, TriggerMask};
use pulsegen_sim::{SimEvents, SimPins, SimTimers};

type Engine = PulseEngine<SimTimers, SimPins, SimEvents>;

fn engine() -> Engine {
    PulseEngine::new(SimTimers::new(), SimPins::new(), SimEvents::new())
}

#[test]
fn test_empty_slot_yields_none() {
    let shared: SharedEngine<SimTimers, SimPins, SimEvents> = SharedEngine::empty();
    assert_eq!(shared.with(|_| ()), None);
}

#[test]
fn test_install_and_access() {
    let shared = SharedEngine::empty();
    assert!(shared.install(engine()).is_none());

    let running = shared.with(|engine| {
        engine.write_start_command(TriggerMask::single(TriggerId::Trig0));
        engine.is_running(ChannelId::Ch0)
    });
    assert_eq!(running, Some(true));

    // Command context and interrupt context see the same state
    let remaining = shared.with(|engine| {
        engine.handle_pulse_boundary(ChannelId::Ch0);
        engine.channel(ChannelId::Ch0).remaining_pulses()
    });
    assert_eq!(remaining, Some(9));
}

#[test]
fn test_take_removes_the_engine() {
    let shared = SharedEngine::empty();
    shared.install(engine());
    assert!(shared.take().is_some());
    assert_eq!(shared.with(|_| ()), None);
}
