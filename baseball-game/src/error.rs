use base_runner_rs::NavigationError;
use shared::drone_hal::{BaseId, ConfigError, DriverError};

pub type Result<T> = std::result::Result<T, GameError>;

#[derive(Debug, thiserror::Error)]
pub enum GameError {
    #[error(transparent)]
    Navigation(#[from] NavigationError),

    #[error(transparent)]
    Driver(#[from] DriverError),

    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("waypoint file error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("config file error: {0}")]
    Toml(#[from] toml::de::Error),

    /// The drone never sat on HOME long enough to start a game.
    #[error("drone not detected on HOME after {samples} color samples")]
    HomeNotDetected { samples: u32 },

    #[error("calibration expected the drone on {expected}, but it reads as {}", describe_base(.observed))]
    CalibrationMismatch {
        expected: BaseId,
        observed: Option<BaseId>,
    },

    #[error("drone does not support waypoint recording")]
    WaypointsUnsupported,
}

fn describe_base(base: &Option<BaseId>) -> String {
    match base {
        Some(base) => base.to_string(),
        None => "no base".to_string(),
    }
}
