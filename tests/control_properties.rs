//! Property tests for the control loop state machine.
//!
//! Runs on the host only, with fake sensor, lamp and clock:
//! `cargo test --no-default-features`

#![cfg(not(target_os = "none"))]

use std::collections::VecDeque;

use ambient_lamp::{
    ambient::{Intensity, LightSampler, MAX_INTENSITY},
    clock::Clock,
    compensation::compute_offset,
    config::Config,
    control::{ControlLoop, LampState, OffsetUpdate, decide},
    lamp::ActuatorDriver,
};
use embassy_futures::block_on;
use embassy_time::Duration;
use proptest::prelude::*;

/// Sensor that replays a script and remembers what it handed out.
struct ScriptedSensor {
    script: VecDeque<Intensity>,
    taken: Vec<Intensity>,
}

impl ScriptedSensor {
    fn new(script: Vec<Intensity>) -> Self {
        Self {
            script: script.into(),
            taken: Vec::new(),
        }
    }
}

impl LightSampler for ScriptedSensor {
    fn sample(&mut self) -> Intensity {
        let reading = self.script.pop_front().expect("sensor script exhausted");
        self.taken.push(reading);
        reading
    }
}

#[derive(Default)]
struct RecordingLamp(Vec<bool>);

impl ActuatorDriver for RecordingLamp {
    fn set_lamp(&mut self, on: bool) {
        self.0.push(on);
    }
}

struct NoopClock;

impl Clock for NoopClock {
    async fn sleep(&mut self, _: Duration) {}
}

fn config(threshold: Intensity) -> Config {
    Config {
        threshold,
        ..Config::default()
    }
}

fn readings() -> impl Strategy<Value = Vec<Intensity>> {
    proptest::collection::vec(0..=MAX_INTENSITY, 2..64)
}

proptest! {
    /// Whatever the sensor reports, the offset is zero while the lamp is off,
    /// and it only ever changes when the lamp switches on, to the measured delta.
    #[test]
    fn offset_tracks_transitions(
        threshold in 0..=MAX_INTENSITY,
        script in readings(),
    ) {
        let mut cl = ControlLoop::new(
            config(threshold),
            ScriptedSensor::new(script.clone()),
            RecordingLamp::default(),
            NoopClock,
        );
        // a switch-on consumes two readings
        let mut remaining = script.len();
        while remaining >= 2 {
            let before_state = cl.state();
            let before_offset = cl.offset();
            let report = block_on(cl.step());
            let consumed = if before_state == LampState::Off && cl.state() == LampState::On {
                2
            } else {
                1
            };
            remaining -= consumed;

            if cl.state() == LampState::Off {
                prop_assert_eq!(cl.offset(), 0);
            }
            match (before_state, cl.state()) {
                (LampState::Off, LampState::On) => {
                    let settled = script[script.len() - remaining - 1];
                    prop_assert_eq!(cl.offset(), compute_offset(report.reading, settled));
                }
                (LampState::On, LampState::On) | (LampState::Off, LampState::Off) => {
                    prop_assert_eq!(cl.offset(), before_offset);
                }
                (LampState::On, LampState::Off) => {}
            }
            prop_assert_eq!(report.lamp, cl.state());
            prop_assert_eq!(report.offset, cl.offset());
        }

        // commands alternate on and off, the last one matches the state
        let final_state = cl.state();
        let (_, lamp, _) = cl.release();
        for (i, on) in lamp.0.iter().enumerate() {
            prop_assert_eq!(*on, i % 2 == 0);
        }
        prop_assert_eq!(lamp.0.last().copied().unwrap_or(false), final_state.is_on());
    }

    /// Once on with offset `k`, the lamp stays on for every reading below `threshold + k`.
    #[test]
    fn lamp_holds_below_compensated_threshold(
        threshold in 1..=MAX_INTENSITY,
        before in 0..=MAX_INTENSITY,
        settled in 0..=MAX_INTENSITY,
        followups in proptest::collection::vec(0..=MAX_INTENSITY, 1..32),
    ) {
        // dark enough to switch on
        let before = before % threshold;
        let k = compute_offset(before, settled);
        let limit = i32::from(threshold) + k;
        let held: Vec<Intensity> = followups
            .into_iter()
            .filter(|reading| i32::from(*reading) < limit)
            .collect();

        let mut script = vec![before, settled];
        script.extend(&held);
        let mut cl = ControlLoop::new(
            config(threshold),
            ScriptedSensor::new(script),
            RecordingLamp::default(),
            NoopClock,
        );
        block_on(cl.step());
        prop_assert_eq!(cl.state(), LampState::On);
        prop_assert_eq!(cl.offset(), k);

        for _ in &held {
            block_on(cl.step());
            prop_assert_eq!(cl.state(), LampState::On);
            prop_assert_eq!(cl.offset(), k);
        }
        let (sensor, lamp, _) = cl.release();
        prop_assert_eq!(lamp.0, vec![true]);
        prop_assert_eq!(sensor.taken.len(), held.len() + 2);
    }

    /// When the reading agrees with the current state nothing is commanded.
    #[test]
    fn decide_is_idempotent_when_state_matches(
        reading in 0..=MAX_INTENSITY,
        threshold in 0..=MAX_INTENSITY,
        offset in -4095i32..=4095,
    ) {
        let desired_on = i32::from(reading) < i32::from(threshold) + offset;
        let state = LampState::from(desired_on);
        let decision = decide(reading, state, offset, threshold);
        prop_assert_eq!(decision.desired_on, desired_on);
        prop_assert_eq!(decision.next_state, state);
        prop_assert_eq!(decision.offset, OffsetUpdate::Keep);
        prop_assert_eq!(decision.command, None);
    }
}
