//! Software-triggered burst on channel 0, run against the simulated
//! collaborators. Prints what the host would observe on the wire.

use pulsegen_engine::{ChannelId, PulseEngine, SharedEngine, TriggerId, TriggerMask};
use pulsegen_sim::{SimEvents, SimPins, SimTimers};

fn main() {
    let shared: SharedEngine<SimTimers, SimPins, SimEvents> = SharedEngine::empty();
    shared.install(PulseEngine::new(
        SimTimers::new(),
        SimPins::new(),
        SimEvents::new(),
    ));

    // Command context: a 5-pulse burst at 100 Hz
    shared.with(|engine| {
        engine.write_frequency(ChannelId::Ch0, 100.0).unwrap();
        engine.write_pulse_count(ChannelId::Ch0, 5).unwrap();
        engine.write_start_command(TriggerMask::single(TriggerId::Trig0));

        let timing = engine.channel(ChannelId::Ch0).timing().unwrap();
        println!(
            "programmed: prescaler {} top {} duty-compare {}",
            timing.params.prescaler, timing.params.top, timing.duty_compare
        );
    });

    // Interrupt context: one compare-match per pulse period
    loop {
        let still_running = shared
            .with(|engine| {
                engine.handle_pulse_boundary(ChannelId::Ch0);
                println!(
                    "pulse boundary, {} remaining, running: {}",
                    engine.channel(ChannelId::Ch0).remaining_pulses(),
                    engine.is_running(ChannelId::Ch0)
                );
                engine.is_running(ChannelId::Ch0)
            })
            .unwrap();
        if !still_running {
            break;
        }
    }

    shared.with(|engine| {
        println!("execution state: {}", engine.exec_state());
        for notification in engine.events().iter() {
            println!(
                "notified register {} (event: {})",
                notification.address, notification.is_event
            );
        }
    });
}
