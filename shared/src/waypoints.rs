use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;

use crate::drone_hal::{BaseId, Waypoint};

/// Calibrated navigation target per base. Built once during calibration and
/// only read afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WaypointMap {
    waypoints: BTreeMap<BaseId, Waypoint>,
}

impl WaypointMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, base: BaseId, waypoint: Waypoint) -> Option<Waypoint> {
        self.waypoints.insert(base, waypoint)
    }

    pub fn get(&self, base: BaseId) -> Option<Waypoint> {
        self.waypoints.get(&base).copied()
    }

    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    /// Every base in the cycle has a waypoint.
    pub fn is_complete(&self) -> bool {
        BaseId::iter().all(|base| self.waypoints.contains_key(&base))
    }
}

impl FromIterator<(BaseId, Waypoint)> for WaypointMap {
    fn from_iter<I: IntoIterator<Item = (BaseId, Waypoint)>>(iter: I) -> Self {
        Self {
            waypoints: iter.into_iter().collect(),
        }
    }
}
