use log::error;
use shared::{drone_hal::NEUTRAL_LED, ControllerState};

use crate::{BaseRunner, NavigationError};

use super::TransitionFsm;

/// Fatal end of a transition. Stops the drone, brings it down and drives the
/// indicator to neutral so the operator sees the ambiguity.
#[derive(Debug)]
pub struct Aborted {
    error: NavigationError,
}

impl<'f> ControllerState<TransitionFsm, BaseRunner<'f>> for Aborted {
    fn update(&mut self, _runner: &mut BaseRunner<'f>) -> Option<TransitionFsm> {
        None
    }

    fn enter_state(&mut self, runner: &mut BaseRunner<'f>) {
        error!("Transition aborted: {}", self.error);

        runner.driver.set_attitude(0, 0, 0);
        if runner.config.airborne {
            runner.driver.land();
        }
        runner.driver.set_indicator_color(NEUTRAL_LED, 0);
    }

    fn exit_state(&mut self, _runner: &mut BaseRunner<'f>) {
        // Nothing
    }
}

impl Aborted {
    pub fn new(error: NavigationError) -> TransitionFsm {
        TransitionFsm::Aborted(Self { error })
    }

    pub fn error(&self) -> &NavigationError {
        &self.error
    }

    pub fn into_error(self) -> NavigationError {
        self.error
    }
}
