#![deny(unsafe_code)]

pub mod calibration;
pub mod cli;
pub mod config;
pub mod error;
pub mod game;
pub mod hits;
pub mod logging;
pub mod session;
pub mod waypoint_store;

pub use config::{GameConfig, PlayConfig};
pub use error::{GameError, Result};
pub use hits::{Hit, OperatorInput};
pub use session::with_session;
