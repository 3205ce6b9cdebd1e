use shared::{drone_hal::TransitionState, ControllerFsm, ControllerState};

use crate::BaseRunner;

pub mod aborted;
pub mod awaiting_arrival;
pub mod classifying;
pub mod command_issued;
pub mod complete;
pub mod settling;
pub mod verify_position;

pub use aborted::Aborted;
pub use awaiting_arrival::AwaitingArrival;
pub use classifying::Classifying;
pub use command_issued::CommandIssued;
pub use complete::Complete;
pub use settling::Settling;
pub use verify_position::VerifyPosition;

/// One single-base transition:
/// `VerifyPosition -> CommandIssued -> AwaitingArrival -> Settling -> Classifying`,
/// ending in `Complete` or `Aborted`.
#[derive(Debug)]
pub enum TransitionFsm {
    VerifyPosition(VerifyPosition),
    CommandIssued(CommandIssued),
    AwaitingArrival(AwaitingArrival),
    Settling(Settling),
    Classifying(Classifying),
    Complete(Complete),
    Aborted(Aborted),
}

impl<'a> ControllerFsm<TransitionFsm, BaseRunner<'a>, TransitionState> for TransitionFsm {
    fn to_controller_state(&mut self) -> &mut dyn ControllerState<TransitionFsm, BaseRunner<'a>> {
        match self {
            TransitionFsm::VerifyPosition(state) => state,
            TransitionFsm::CommandIssued(state) => state,
            TransitionFsm::AwaitingArrival(state) => state,
            TransitionFsm::Settling(state) => state,
            TransitionFsm::Classifying(state) => state,
            TransitionFsm::Complete(state) => state,
            TransitionFsm::Aborted(state) => state,
        }
    }

    fn hal_state(&self) -> TransitionState {
        match self {
            TransitionFsm::VerifyPosition(_) => TransitionState::VerifyPosition,
            TransitionFsm::CommandIssued(_) => TransitionState::CommandIssued,
            TransitionFsm::AwaitingArrival(_) => TransitionState::AwaitingArrival,
            TransitionFsm::Settling(_) => TransitionState::Settling,
            TransitionFsm::Classifying(_) => TransitionState::Classifying,
            TransitionFsm::Complete(_) => TransitionState::Success,
            TransitionFsm::Aborted(state) => state.error().transition_state(),
        }
    }

    fn is_terminal(&self) -> bool {
        matches!(self, TransitionFsm::Complete(_) | TransitionFsm::Aborted(_))
    }
}
