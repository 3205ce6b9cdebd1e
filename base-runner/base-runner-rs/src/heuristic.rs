use shared::drone_hal::{BaseId, NavigationConfig};

use crate::Result;

/// Direction of travel toward the next base. The diamond is flown along its
/// diagonals, so each heading combines a pitch and a roll component.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Heading {
    /// HOME to FIRST, forward and to the right.
    Forward,
    /// FIRST to SECOND, forward and to the left.
    Left,
    /// SECOND to THIRD, backward and to the left.
    Backward,
    /// THIRD to HOME, backward and to the right.
    Right,
}

impl Heading {
    pub fn from_base(base: BaseId) -> Self {
        match base {
            BaseId::Home => Heading::Forward,
            BaseId::First => Heading::Left,
            BaseId::Second => Heading::Backward,
            BaseId::Third => Heading::Right,
        }
    }

    /// (pitch, roll) signs.
    fn signs(&self) -> (i8, i8) {
        match self {
            Heading::Forward => (1, 1),
            Heading::Left => (1, -1),
            Heading::Backward => (-1, -1),
            Heading::Right => (-1, 1),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttitudeCommand {
    pub heading: Heading,
    pub pitch: i8,
    pub roll: i8,
}

impl AttitudeCommand {
    pub fn toward_next_base(base: BaseId, config: &NavigationConfig) -> Self {
        let heading = Heading::from_base(base);
        let (pitch_sign, roll_sign) = heading.signs();

        Self {
            heading,
            pitch: config.pitch_power.saturating_mul(pitch_sign),
            roll: config.roll_power.saturating_mul(roll_sign),
        }
    }

    /// Same as [`AttitudeCommand::toward_next_base`] for a raw base index.
    pub fn from_base_index(index: i64, config: &NavigationConfig) -> Result<Self> {
        let base = BaseId::try_from(index)?;

        Ok(Self::toward_next_base(base, config))
    }
}
