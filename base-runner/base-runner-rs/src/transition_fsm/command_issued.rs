use log::info;
use shared::{drone_hal::BaseId, ControllerState};

use crate::{heuristic::AttitudeCommand, BaseRunner};

use super::{AwaitingArrival, TransitionFsm};

#[derive(Debug)]
pub struct CommandIssued {
    from: BaseId,
}

impl<'f> ControllerState<TransitionFsm, BaseRunner<'f>> for CommandIssued {
    fn update(&mut self, runner: &mut BaseRunner<'f>) -> Option<TransitionFsm> {
        let command = AttitudeCommand::toward_next_base(self.from, &runner.config);

        info!(
            "Moving from {} to {}: {:?} (pitch {}, roll {})",
            self.from,
            self.from.next(),
            command.heading,
            command.pitch,
            command.roll,
        );

        runner
            .driver
            .set_attitude(command.pitch, command.roll, runner.config.throttle_power);

        Some(AwaitingArrival::new(self.from.next(), &runner.config))
    }

    fn enter_state(&mut self, runner: &mut BaseRunner<'f>) {
        if runner.config.airborne {
            info!("Taking off from {}", self.from);
            runner.driver.takeoff();
            runner.driver.hover(runner.config.takeoff_hover());
        }
    }

    fn exit_state(&mut self, _runner: &mut BaseRunner<'f>) {
        // Nothing
    }
}

impl CommandIssued {
    pub fn new(from: BaseId) -> TransitionFsm {
        TransitionFsm::CommandIssued(Self { from })
    }
}
