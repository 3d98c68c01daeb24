//! The sense, decide, actuate loop.
//!
//! Every iteration samples the light level, decides whether the lamp should
//! be on, switches it if needed and then sleeps for the configured period.
//! When the lamp is switched on, the loop waits for the sensor to settle and
//! measures how much the lamp itself shifted the reading. That offset is
//! applied to the threshold until the lamp goes off again, so the lamp does
//! not turn itself off with its own light.
//!
//! The decision is made by the pure [`decide`] function, the I/O lives in
//! [`ControlLoop`].

use core::fmt;

use log::info;

use crate::{
    ambient::{Intensity, LightSampler},
    clock::Clock,
    compensation::{Compensator, Offset, effective_threshold},
    config::Config,
    lamp::ActuatorDriver,
};

/// Last commanded state of the lamp.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum LampState {
    #[default]
    Off,
    On,
}

impl LampState {
    pub fn is_on(self) -> bool {
        self == Self::On
    }
}

impl From<bool> for LampState {
    fn from(on: bool) -> Self {
        if on { Self::On } else { Self::Off }
    }
}

/// What happens to the held offset after a decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OffsetUpdate {
    /// Leave it as it is
    Keep,
    /// Wait for the sensor to settle, sample again and store the difference
    Calibrate,
    /// Back to zero, the lamp is off
    Reset,
}

/// Outcome of a single evaluation of the state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decision {
    /// Whether the reading asks for the lamp to be on
    pub desired_on: bool,
    /// State after this iteration
    pub next_state: LampState,
    /// How the offset changes
    pub offset: OffsetUpdate,
    /// Level to drive the lamp to, `None` leaves the outputs alone
    pub command: Option<bool>,
}

/// Evaluate the state machine for one reading.
///
/// `offset` is the currently held compensation, zero while the lamp is off.
pub fn decide(
    reading: Intensity,
    state: LampState,
    offset: Offset,
    threshold: Intensity,
) -> Decision {
    let desired_on = Offset::from(reading) < effective_threshold(threshold, offset);
    match (desired_on, state) {
        (true, LampState::Off) => Decision {
            desired_on,
            next_state: LampState::On,
            offset: OffsetUpdate::Calibrate,
            command: Some(true),
        },
        (false, LampState::On) => Decision {
            desired_on,
            next_state: LampState::Off,
            offset: OffsetUpdate::Reset,
            command: Some(false),
        },
        _ => Decision {
            desired_on,
            next_state: state,
            offset: OffsetUpdate::Keep,
            command: None,
        },
    }
}

/// Point in the iteration a [`Report`] was taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Right after sampling, before any transition
    Sampled,
    /// After the transition and the inter-iteration delay
    Done,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sampled => f.write_str("1"),
            Self::Done => f.write_str("2"),
        }
    }
}

/// Snapshot of the loop, logged twice per iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Report {
    pub phase: Phase,
    pub desired_on: bool,
    pub lamp: LampState,
    pub reading: Intensity,
    pub offset: Offset,
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} t:{} l:{} a:{} o:{}",
            self.phase,
            u8::from(self.desired_on),
            u8::from(self.lamp.is_on()),
            self.reading,
            self.offset
        )
    }
}

/// Owns the lamp state and the compensation offset, nothing else writes them.
pub struct ControlLoop<S, A, C> {
    config: Config,
    sampler: S,
    actuator: A,
    clock: C,
    state: LampState,
    compensator: Compensator,
}

impl<S, A, C> ControlLoop<S, A, C>
where
    S: LightSampler,
    A: ActuatorDriver,
    C: Clock,
{
    /// Create the loop in the `Off` state.
    ///
    /// The lamp outputs must already be driven low.
    pub fn new(config: Config, sampler: S, actuator: A, clock: C) -> Self {
        Self {
            config,
            sampler,
            actuator,
            clock,
            state: LampState::Off,
            compensator: Compensator::new(),
        }
    }

    pub fn state(&self) -> LampState {
        self.state
    }

    pub fn offset(&self) -> Offset {
        self.compensator.offset()
    }

    /// Stop the loop and hand back the sensor, lamp and clock it was driving.
    pub fn release(self) -> (S, A, C) {
        (self.sampler, self.actuator, self.clock)
    }

    /// Run forever.
    pub async fn run(&mut self) -> ! {
        info!(
            "Control loop started: threshold {}, settle {}ms, period {}ms",
            self.config.threshold,
            self.config.settle_delay.as_millis(),
            self.config.period.as_millis()
        );
        loop {
            self.step().await;
        }
    }

    /// Run a single iteration, returning the report logged at its end.
    pub async fn step(&mut self) -> Report {
        let reading = self.sampler.sample();
        let decision = decide(
            reading,
            self.state,
            self.compensator.offset(),
            self.config.threshold,
        );
        info!("{}", self.report(Phase::Sampled, decision.desired_on, reading));

        if let Some(on) = decision.command {
            self.actuator.set_lamp(on);
        }
        self.state = decision.next_state;

        match decision.offset {
            OffsetUpdate::Keep => {}
            OffsetUpdate::Calibrate => {
                self.clock.sleep(self.config.settle_delay).await;
                let settled = self.sampler.sample();
                self.compensator.calibrate(reading, settled);
            }
            OffsetUpdate::Reset => self.compensator.reset(),
        }

        self.clock.sleep(self.config.period).await;

        let report = self.report(Phase::Done, decision.desired_on, reading);
        info!("{}", report);
        report
    }

    fn report(&self, phase: Phase, desired_on: bool, reading: Intensity) -> Report {
        Report {
            phase,
            desired_on,
            lamp: self.state,
            reading,
            offset: self.compensator.offset(),
        }
    }
}
