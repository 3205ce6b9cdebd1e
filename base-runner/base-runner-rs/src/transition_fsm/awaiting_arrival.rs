use log::{debug, info, warn};
use shared::{
    drone_hal::{BaseId, NavigationConfig},
    util::BoundedPoll,
    ControllerState,
};

use crate::{height_switch::HeightSwitchDetector, BaseRunner, NavigationError};

use super::{Aborted, Settling, TransitionFsm};

/// Open-loop movement phase. Ticks the drone along the commanded heading and
/// counts relative-height switches until the next pad is reached.
#[derive(Debug)]
pub struct AwaitingArrival {
    target: BaseId,
    detector: HeightSwitchDetector,
    baseline_poll: BoundedPoll,
    tick_poll: BoundedPoll,
    last_distance: Option<f32>,
}

impl<'f> ControllerState<TransitionFsm, BaseRunner<'f>> for AwaitingArrival {
    fn update(&mut self, runner: &mut BaseRunner<'f>) -> Option<TransitionFsm> {
        if !self.detector.has_baseline() {
            return self.acquire_baseline(runner);
        }

        if self.tick_poll.exhausted() {
            return Some(self.timed_out());
        }

        runner.driver.tick(runner.config.tick_duration());
        let ticks = self.tick_poll.record_attempt();

        let distance = runner.driver.ground_distance(runner.config.distance_unit);
        self.last_distance = Some(distance);
        runner.report.ticks = ticks;
        runner.report.last_distance = Some(distance);

        debug!("Bottom-range reading {}: {}", ticks, distance);

        if let Some(switch) = self.detector.observe(distance) {
            info!(
                "Relative height switch no. {} from {} to {}",
                switch.count, switch.from, switch.to
            );
            runner.report.switches = switch.count;
        }

        if self.detector.arrived() {
            info!("Distance-switching trips met after {} ticks", ticks);
            return Some(Settling::new(self.target));
        }

        None
    }

    fn enter_state(&mut self, _runner: &mut BaseRunner<'f>) {
        debug!(
            "Awaiting arrival at {} ({} height switches)",
            self.target,
            self.detector.target()
        );
    }

    fn exit_state(&mut self, _runner: &mut BaseRunner<'f>) {
        // Nothing
    }
}

impl AwaitingArrival {
    pub fn new(target: BaseId, config: &NavigationConfig) -> TransitionFsm {
        TransitionFsm::AwaitingArrival(Self {
            target,
            detector: HeightSwitchDetector::from_config(config),
            baseline_poll: BoundedPoll::new(config.tick_duration(), config.baseline_attempts),
            tick_poll: BoundedPoll::new(config.tick_duration(), config.max_arrival_ticks),
            last_distance: None,
        })
    }

    fn acquire_baseline(&mut self, runner: &mut BaseRunner) -> Option<TransitionFsm> {
        if self.baseline_poll.exhausted() {
            return Some(self.timed_out());
        }

        let distance = runner.driver.ground_distance(runner.config.distance_unit);
        self.baseline_poll.record_attempt();
        self.last_distance = Some(distance);
        runner.report.last_distance = Some(distance);

        self.detector.observe(distance);

        if self.detector.has_baseline() {
            debug!(
                "Initial bottom-range value ({}): {}",
                runner.config.distance_unit, distance
            );
        } else if self.baseline_poll.exhausted() {
            return Some(self.timed_out());
        } else {
            self.baseline_poll.wait(runner.driver);
        }

        None
    }

    fn timed_out(&self) -> TransitionFsm {
        warn!(
            "No arrival at {}: {} of {} height switches after {} ticks",
            self.target,
            self.detector.switches(),
            self.detector.target(),
            self.tick_poll.attempts(),
        );

        Aborted::new(NavigationError::ArrivalTimeout {
            ticks: self.tick_poll.attempts(),
            switches: self.detector.switches(),
            target: self.detector.target(),
            last_distance: self.last_distance,
        })
    }
}
