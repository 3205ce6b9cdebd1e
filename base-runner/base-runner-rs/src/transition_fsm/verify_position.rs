use log::{debug, error, info};
use shared::{
    drone_hal::{BaseId, ColorReading, NavigationConfig},
    util::BoundedPoll,
    ControllerState,
};

use crate::{BaseRunner, NavigationError};

use super::{Aborted, CommandIssued, TransitionFsm};

/// Confirms the drone sits on the base the program believes it is on before
/// anything moves. A reading of a different base is fatal right away.
#[derive(Debug)]
pub struct VerifyPosition {
    expected: BaseId,
    poll: BoundedPoll,
    last_reading: Option<ColorReading>,
}

impl<'f> ControllerState<TransitionFsm, BaseRunner<'f>> for VerifyPosition {
    fn update(&mut self, runner: &mut BaseRunner<'f>) -> Option<TransitionFsm> {
        if self.poll.exhausted() {
            return Some(self.mismatch(None));
        }

        let reading = runner.driver.classify_color();
        let attempt = self.poll.record_attempt();
        self.last_reading = Some(reading);
        runner.report.verify_attempts = attempt;

        debug!("Position check {}: {}", attempt, reading);

        match reading.agreed() {
            Some(label) if label.base() == self.expected => {
                info!("Position verified: {} ({})", self.expected, label);
                Some(CommandIssued::new(self.expected))
            }
            Some(label) => {
                error!(
                    "Program current base and real-world current base are misaligned. Program base: {}, real base: {} ({})",
                    self.expected,
                    label.base(),
                    label,
                );
                Some(self.mismatch(Some(label.base())))
            }
            None => {
                if self.poll.exhausted() {
                    return Some(self.mismatch(None));
                }

                self.poll.wait(runner.driver);
                None
            }
        }
    }

    fn enter_state(&mut self, _runner: &mut BaseRunner<'f>) {
        debug!("Verifying drone is on {}", self.expected);
    }

    fn exit_state(&mut self, _runner: &mut BaseRunner<'f>) {
        // Nothing
    }
}

impl VerifyPosition {
    pub fn new(expected: BaseId, config: &NavigationConfig) -> TransitionFsm {
        TransitionFsm::VerifyPosition(Self {
            expected,
            poll: BoundedPoll::new(config.classify_interval(), config.verify_attempts),
            last_reading: None,
        })
    }

    fn mismatch(&self, observed: Option<BaseId>) -> TransitionFsm {
        Aborted::new(NavigationError::PositionMismatch {
            expected: self.expected,
            observed,
            last_reading: self.last_reading,
        })
    }
}
