use core::{fmt, time::Duration};

use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumCount as EnumCountMacro, EnumIter, EnumString};
use thiserror::Error;

use crate::BASE_COUNT;

pub const NEUTRAL_LED: LedColor = LedColor { r: 0, g: 0, b: 0 };

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    EnumCountMacro,
    EnumIter,
    Display,
)]
pub enum BaseId {
    Home = 0,
    First = 1,
    Second = 2,
    Third = 3,
}

impl BaseId {
    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn next(&self) -> BaseId {
        match self {
            BaseId::Home => BaseId::First,
            BaseId::First => BaseId::Second,
            BaseId::Second => BaseId::Third,
            BaseId::Third => BaseId::Home,
        }
    }

    pub fn color(&self) -> ColorLabel {
        match self {
            BaseId::Home => ColorLabel::Green,
            BaseId::First => ColorLabel::Red,
            BaseId::Second => ColorLabel::Yellow,
            BaseId::Third => ColorLabel::Blue,
        }
    }

    /// Number of single-base transitions needed to reach HOME again.
    pub fn bases_to_home(&self) -> usize {
        BASE_COUNT - self.index()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("base index {0} is outside the 0..=3 cycle")]
pub struct InvalidBaseIndex(pub i64);

impl TryFrom<i64> for BaseId {
    type Error = InvalidBaseIndex;

    fn try_from(index: i64) -> Result<Self, Self::Error> {
        BaseId::iter()
            .find(|base| base.index() as i64 == index)
            .ok_or(InvalidBaseIndex(index))
    }
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    EnumCountMacro,
    EnumIter,
    EnumString,
    Display,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum ColorLabel {
    Green,
    Red,
    Yellow,
    Blue,
}

impl ColorLabel {
    pub fn base(&self) -> BaseId {
        match self {
            ColorLabel::Green => BaseId::Home,
            ColorLabel::Red => BaseId::First,
            ColorLabel::Yellow => BaseId::Second,
            ColorLabel::Blue => BaseId::Third,
        }
    }

    pub fn led(&self) -> LedColor {
        match self {
            ColorLabel::Green => LedColor::new(0, 255, 0),
            ColorLabel::Red => LedColor::new(255, 0, 0),
            ColorLabel::Yellow => LedColor::new(255, 255, 0),
            ColorLabel::Blue => LedColor::new(0, 0, 255),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl LedColor {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Front and back color sensor classification. `None` is a color the
/// classifier does not associate with any base.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ColorReading {
    pub front: Option<ColorLabel>,
    pub back: Option<ColorLabel>,
}

impl ColorReading {
    pub const fn new(front: Option<ColorLabel>, back: Option<ColorLabel>) -> Self {
        Self { front, back }
    }

    pub const fn both(label: ColorLabel) -> Self {
        Self::new(Some(label), Some(label))
    }

    pub const fn unrecognized() -> Self {
        Self::new(None, None)
    }

    /// The label both sensors agree on, if any.
    pub fn agreed(&self) -> Option<ColorLabel> {
        match (self.front, self.back) {
            (Some(front), Some(back)) if front == back => Some(front),
            _ => None,
        }
    }
}

impl fmt::Display for ColorReading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = |label: Option<ColorLabel>| match label {
            Some(label) => label.to_string(),
            None => "unknown".to_string(),
        };

        write!(f, "({}, {})", name(self.front), name(self.back))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumString, Display)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum DistanceUnit {
    Millimeter,
    Centimeter,
    Meter,
}

impl DistanceUnit {
    pub fn from_centimeters(&self, centimeters: f32) -> f32 {
        match self {
            DistanceUnit::Millimeter => centimeters * 10.0,
            DistanceUnit::Centimeter => centimeters,
            DistanceUnit::Meter => centimeters / 100.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Note {
    C4,
    E4,
    G4,
    C5,
    Mute,
}

/// Opaque handle to an absolute navigation target stored on the device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Waypoint(pub u32);

/// HAL-visible state of the single-base transition currently running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumIter)]
pub enum TransitionState {
    VerifyPosition,
    CommandIssued,
    AwaitingArrival,
    Settling,
    Classifying,
    Success,
    PositionMismatchFatal,
    TimeoutFatal,
    ClassifyFailedFatal,
    WrongBaseFatal,
    Rejected,
}

impl TransitionState {
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            TransitionState::PositionMismatchFatal
                | TransitionState::TimeoutFatal
                | TransitionState::ClassifyFailedFatal
                | TransitionState::WrongBaseFatal
                | TransitionState::Rejected
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavigationConfig {
    pub pitch_power: i8,
    pub roll_power: i8,
    pub throttle_power: i8,
    /// Take off before each transition and land once arrival is detected.
    pub airborne: bool,
    pub takeoff_hover_s: f32,
    pub distance_unit: DistanceUnit,
    pub switch_threshold: f32,
    pub saturation_ceiling: f32,
    pub target_switches: u32,
    pub tick_duration_s: f32,
    pub baseline_attempts: u32,
    pub max_arrival_ticks: u32,
    pub settle_delay_s: f32,
    pub verify_attempts: u32,
    pub classify_attempts: u32,
    pub classify_interval_s: f32,
    pub waypoint_speed: f32,
    pub led_intensity: u8,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            pitch_power: 30,
            roll_power: 20,
            throttle_power: 0,
            airborne: true,
            takeoff_hover_s: 1.0,
            distance_unit: DistanceUnit::Centimeter,
            switch_threshold: 20.0,
            saturation_ceiling: 900.0,
            target_switches: 2,
            tick_duration_s: 0.1,
            baseline_attempts: 50,
            max_arrival_ticks: 300,
            settle_delay_s: 3.0,
            verify_attempts: 5,
            classify_attempts: 20,
            classify_interval_s: 0.15,
            waypoint_speed: 0.5,
            led_intensity: 100,
        }
    }
}

impl NavigationConfig {
    pub fn tick_duration(&self) -> Duration {
        Duration::from_secs_f32(self.tick_duration_s)
    }

    pub fn settle_delay(&self) -> Duration {
        Duration::from_secs_f32(self.settle_delay_s)
    }

    pub fn classify_interval(&self) -> Duration {
        Duration::from_secs_f32(self.classify_interval_s)
    }

    pub fn takeoff_hover(&self) -> Duration {
        Duration::from_secs_f32(self.takeoff_hover_s)
    }

    /// Rejects settings that would make a transition impossible to complete.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.target_switches == 0 {
            return Err(ConfigError::OutOfRange("target_switches", "must be at least 1"));
        }

        if !(self.switch_threshold > 0.0) {
            return Err(ConfigError::OutOfRange("switch_threshold", "must be positive"));
        }

        if !(self.saturation_ceiling > self.switch_threshold) {
            return Err(ConfigError::OutOfRange(
                "saturation_ceiling",
                "must exceed switch_threshold",
            ));
        }

        let powers = [
            ("pitch_power", self.pitch_power),
            ("roll_power", self.roll_power),
            ("throttle_power", self.throttle_power),
        ];

        for (name, value) in powers {
            if !(-100..=100).contains(&value) {
                return Err(ConfigError::OutOfRange(name, "must be within -100..=100"));
            }
        }

        if !(self.waypoint_speed > 0.0) || !self.waypoint_speed.is_finite() {
            return Err(ConfigError::OutOfRange("waypoint_speed", "must be positive"));
        }

        let attempt_bounds = [
            ("baseline_attempts", self.baseline_attempts),
            ("max_arrival_ticks", self.max_arrival_ticks),
            ("verify_attempts", self.verify_attempts),
            ("classify_attempts", self.classify_attempts),
        ];

        for (name, value) in attempt_bounds {
            if value == 0 {
                return Err(ConfigError::OutOfRange(name, "must be at least 1"));
            }
        }

        let durations = [
            ("takeoff_hover_s", self.takeoff_hover_s),
            ("tick_duration_s", self.tick_duration_s),
            ("settle_delay_s", self.settle_delay_s),
            ("classify_interval_s", self.classify_interval_s),
        ];

        for (name, value) in durations {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::OutOfRange(name, "must be a non-negative duration"));
            }
        }

        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("config value `{0}` {1}")]
    OutOfRange(&'static str, &'static str),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DriverError {
    #[error("failed to pair with drone: {0}")]
    PairingFailed(String),
}

pub trait DroneDriver {
    fn pair(&mut self) -> Result<(), DriverError>;
    fn close(&mut self);

    fn takeoff(&mut self);
    fn hover(&mut self, duration: Duration);
    fn land(&mut self);

    /// Power levels in -100..=100, held until changed.
    fn set_attitude(&mut self, pitch: i8, roll: i8, throttle: i8);
    fn tick(&mut self, duration: Duration);

    /// Relative height to whatever surface is below the drone. Zero or
    /// negative when no surface is detected.
    fn ground_distance(&mut self, unit: DistanceUnit) -> f32;
    fn classify_color(&mut self) -> ColorReading;

    fn set_indicator_color(&mut self, color: LedColor, intensity: u8);
    fn buzzer(&mut self, note: Note, duration: Duration);

    fn delay(&mut self, duration: Duration);

    fn record_waypoint(&mut self) -> Option<Waypoint> {
        None
    }

    fn navigate_to(&mut self, _waypoint: Waypoint, _speed: f32) {
        // Nothing
    }
}
