use log::{debug, error, info};
use shared::{
    drone_hal::{BaseId, ColorReading, NavigationConfig},
    util::BoundedPoll,
    ControllerState,
};

use crate::{BaseRunner, NavigationError};

use super::{Aborted, Complete, TransitionFsm};

/// Samples the color classifier after landing. The first reading where both
/// sensors agree on a base color wins, there is no voting.
#[derive(Debug)]
pub struct Classifying {
    expected: BaseId,
    poll: BoundedPoll,
    last_reading: Option<ColorReading>,
}

impl<'f> ControllerState<TransitionFsm, BaseRunner<'f>> for Classifying {
    fn update(&mut self, runner: &mut BaseRunner<'f>) -> Option<TransitionFsm> {
        if self.poll.exhausted() {
            return Some(self.failed());
        }

        let reading = runner.driver.classify_color();
        let attempt = self.poll.record_attempt();
        self.last_reading = Some(reading);
        runner.report.classify_attempts = attempt;

        let Some(label) = reading.agreed() else {
            debug!("Color detection {}: no agreeing base color {}", attempt, reading);

            if self.poll.exhausted() {
                return Some(self.failed());
            }

            self.poll.wait(runner.driver);
            return None;
        };

        let observed = label.base();
        info!("Detected {} associated with {}", label, observed);

        runner
            .driver
            .set_indicator_color(label.led(), runner.config.led_intensity);
        runner.report.landed = Some(observed);

        if observed != self.expected {
            error!("Drone landed on incorrect base {} (expected {})", observed, self.expected);

            return Some(Aborted::new(NavigationError::WrongBaseLanded {
                expected: self.expected,
                observed,
                color: label,
            }));
        }

        Some(Complete::new(observed))
    }

    fn enter_state(&mut self, _runner: &mut BaseRunner<'f>) {
        debug!("Classifying landing base, expecting {}", self.expected);
    }

    fn exit_state(&mut self, _runner: &mut BaseRunner<'f>) {
        // Nothing
    }
}

impl Classifying {
    pub fn new(expected: BaseId, config: &NavigationConfig) -> TransitionFsm {
        TransitionFsm::Classifying(Self {
            expected,
            poll: BoundedPoll::new(config.classify_interval(), config.classify_attempts),
            last_reading: None,
        })
    }

    fn failed(&self) -> TransitionFsm {
        error!(
            "Detected color {} is not one of the colors associated with a base",
            self.last_reading.unwrap_or_default()
        );

        Aborted::new(NavigationError::ClassificationFailure {
            attempts: self.poll.attempts(),
            last_reading: self.last_reading,
        })
    }
}
