use shared::drone_hal::{
    BaseId, ColorLabel, ColorReading, ConfigError, InvalidBaseIndex, TransitionState,
};
use thiserror::Error;

pub type Result<T> = core::result::Result<T, NavigationError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum NavigationError {
    #[error(
        "invalid advance request (current base {current}, bases to run {count}): \
         base must be within 0..=3 and the count non-negative"
    )]
    InvalidArgument { current: i64, count: i64 },

    #[error("program base {expected} and real-world base {} are misaligned", describe_base(.observed))]
    PositionMismatch {
        expected: BaseId,
        observed: Option<BaseId>,
        last_reading: Option<ColorReading>,
    },

    #[error(
        "no arrival after {ticks} movement ticks: {switches} of {target} height switches \
         (last distance {last_distance:?})"
    )]
    ArrivalTimeout {
        ticks: u32,
        switches: u32,
        target: u32,
        last_distance: Option<f32>,
    },

    #[error("no agreeing base color after {attempts} attempts (last reading {last_reading:?})")]
    ClassificationFailure {
        attempts: u32,
        last_reading: Option<ColorReading>,
    },

    #[error("drone landed on {observed} ({color}) instead of {expected}")]
    WrongBaseLanded {
        expected: BaseId,
        observed: BaseId,
        color: ColorLabel,
    },

    #[error(transparent)]
    InvalidBase(#[from] InvalidBaseIndex),

    #[error("unusable navigation config: {0}")]
    InvalidConfig(#[from] ConfigError),
}

impl NavigationError {
    /// Terminal transition state reported for this failure.
    pub fn transition_state(&self) -> TransitionState {
        match self {
            NavigationError::PositionMismatch { .. } => TransitionState::PositionMismatchFatal,
            NavigationError::ArrivalTimeout { .. } => TransitionState::TimeoutFatal,
            NavigationError::ClassificationFailure { .. } => TransitionState::ClassifyFailedFatal,
            NavigationError::WrongBaseLanded { .. } => TransitionState::WrongBaseFatal,
            NavigationError::InvalidArgument { .. }
            | NavigationError::InvalidBase(_)
            | NavigationError::InvalidConfig(_) => TransitionState::Rejected,
        }
    }

    /// Malformed requests and configs are recoverable by the caller,
    /// everything else aborted a movement in progress.
    pub fn is_fatal(&self) -> bool {
        !matches!(
            self,
            NavigationError::InvalidArgument { .. } | NavigationError::InvalidConfig(_)
        )
    }
}

fn describe_base(base: &Option<BaseId>) -> String {
    match base {
        Some(base) => base.to_string(),
        None => "unknown".to_string(),
    }
}
