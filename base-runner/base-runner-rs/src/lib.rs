#![deny(unsafe_code)]

pub mod error;
pub mod heuristic;
pub mod height_switch;
pub mod runner;
pub mod transition_fsm;

pub use error::{NavigationError, Result};
pub use heuristic::{AttitudeCommand, Heading};
pub use height_switch::{HeightSwitch, HeightSwitchDetector};
pub use runner::{BaseRunner, TransitionReport};
