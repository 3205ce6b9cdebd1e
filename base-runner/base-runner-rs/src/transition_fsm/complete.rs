use log::info;
use shared::{drone_hal::BaseId, ControllerState};

use crate::BaseRunner;

use super::TransitionFsm;

#[derive(Debug)]
pub struct Complete {
    landed: BaseId,
}

impl<'f> ControllerState<TransitionFsm, BaseRunner<'f>> for Complete {
    fn update(&mut self, _runner: &mut BaseRunner<'f>) -> Option<TransitionFsm> {
        None
    }

    fn enter_state(&mut self, _runner: &mut BaseRunner<'f>) {
        info!("Transition succeeded, drone is on {}", self.landed);
    }

    fn exit_state(&mut self, _runner: &mut BaseRunner<'f>) {
        // Nothing
    }
}

impl Complete {
    pub fn new(landed: BaseId) -> TransitionFsm {
        TransitionFsm::Complete(Self { landed })
    }

    pub fn landed(&self) -> BaseId {
        self.landed
    }
}
