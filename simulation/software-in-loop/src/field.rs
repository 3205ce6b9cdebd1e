use nalgebra::Vector2;
use serde::{Deserialize, Serialize};
use shared::drone_hal::{BaseId, ColorLabel};
use strum::IntoEnumIterator;

use super::Scalar;

/// Layout of the simulated diamond. Positions are in centimeters, x along
/// roll and y along pitch, with HOME at the origin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Pad centers indexed by base.
    pub pad_centers: [[Scalar; 2]; 4],
    pub pad_half_width_cm: Scalar,
    pub pad_height_cm: Scalar,
    pub hover_altitude_cm: Scalar,
    /// Planar speed per unit of commanded pitch or roll power.
    pub speed_per_power_cm_s: Scalar,
    /// Sleep for real on delays and ticks instead of only advancing sim time.
    pub realtime: bool,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            pad_centers: [[0.0, 0.0], [40.0, 60.0], [0.0, 120.0], [-40.0, 60.0]],
            pad_half_width_cm: 15.0,
            pad_height_cm: 25.0,
            hover_altitude_cm: 80.0,
            speed_per_power_cm_s: 1.0,
            realtime: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pad {
    pub base: BaseId,
    pub center: Vector2<Scalar>,
    pub half_width: Scalar,
}

impl Pad {
    pub fn contains(&self, position: &Vector2<Scalar>) -> bool {
        let offset = position - self.center;

        offset.x.abs() <= self.half_width && offset.y.abs() <= self.half_width
    }

    pub fn color(&self) -> ColorLabel {
        self.base.color()
    }
}

/// Four square pads on a flat floor.
#[derive(Debug, Clone)]
pub struct Field {
    pads: Vec<Pad>,
    pad_height: Scalar,
}

impl Field {
    pub fn new(config: &SimConfig) -> Self {
        let pads = BaseId::iter()
            .map(|base| {
                let [x, y] = config.pad_centers[base.index()];

                Pad {
                    base,
                    center: Vector2::new(x, y),
                    half_width: config.pad_half_width_cm,
                }
            })
            .collect();

        Self {
            pads,
            pad_height: config.pad_height_cm,
        }
    }

    pub fn pad(&self, base: BaseId) -> &Pad {
        &self.pads[base.index()]
    }

    pub fn pad_at(&self, position: &Vector2<Scalar>) -> Option<&Pad> {
        self.pads.iter().find(|pad| pad.contains(position))
    }

    /// Height of the surface under `position`.
    pub fn surface_height(&self, position: &Vector2<Scalar>) -> Scalar {
        if self.pad_at(position).is_some() {
            self.pad_height
        } else {
            0.0
        }
    }
}
