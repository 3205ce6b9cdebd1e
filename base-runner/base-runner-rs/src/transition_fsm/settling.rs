use log::info;
use shared::{drone_hal::BaseId, ControllerState};

use crate::BaseRunner;

use super::{Classifying, TransitionFsm};

#[derive(Debug)]
pub struct Settling {
    target: BaseId,
}

impl<'f> ControllerState<TransitionFsm, BaseRunner<'f>> for Settling {
    fn update(&mut self, runner: &mut BaseRunner<'f>) -> Option<TransitionFsm> {
        runner.driver.delay(runner.config.settle_delay());

        Some(Classifying::new(self.target, &runner.config))
    }

    fn enter_state(&mut self, runner: &mut BaseRunner<'f>) {
        runner.driver.set_attitude(0, 0, 0);

        if let Some(waypoint) = runner.waypoint_for(self.target) {
            info!("Correcting drift toward {} waypoint {:?}", self.target, waypoint);
            runner
                .driver
                .navigate_to(waypoint, runner.config.waypoint_speed);
        }

        if runner.config.airborne {
            runner.driver.hover(runner.config.tick_duration());
            info!("Landing");
            runner.driver.land();
        }
    }

    fn exit_state(&mut self, _runner: &mut BaseRunner<'f>) {
        // Nothing
    }
}

impl Settling {
    pub fn new(target: BaseId) -> TransitionFsm {
        TransitionFsm::Settling(Self { target })
    }
}
