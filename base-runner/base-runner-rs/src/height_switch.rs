use shared::drone_hal::NavigationConfig;

/// A qualifying change in relative height between two accepted samples.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeightSwitch {
    pub from: f32,
    pub to: f32,
    pub count: u32,
}

/// Counts large relative-height changes while the drone crosses pad edges.
///
/// Samples are compared against the last *accepted* sample rather than the
/// previous raw one, so a slow drift never adds up to a switch. Readings at or
/// below zero (no surface) or at or above the saturation ceiling are ignored.
#[derive(Debug, Clone, PartialEq)]
pub struct HeightSwitchDetector {
    threshold: f32,
    saturation_ceiling: f32,
    target: u32,
    accepted: Option<f32>,
    switches: u32,
}

impl HeightSwitchDetector {
    pub fn new(threshold: f32, saturation_ceiling: f32, target: u32) -> Self {
        Self {
            threshold,
            saturation_ceiling,
            target,
            accepted: None,
            switches: 0,
        }
    }

    pub fn from_config(config: &NavigationConfig) -> Self {
        Self::new(
            config.switch_threshold,
            config.saturation_ceiling,
            config.target_switches,
        )
    }

    pub fn in_range(&self, sample: f32) -> bool {
        sample > 0.0 && sample < self.saturation_ceiling
    }

    /// Feeds one distance sample. The first in-range sample becomes the
    /// baseline; later ones report a switch when they differ from the
    /// accepted sample by at least the threshold.
    pub fn observe(&mut self, sample: f32) -> Option<HeightSwitch> {
        if !self.in_range(sample) {
            return None;
        }

        let Some(accepted) = self.accepted else {
            self.accepted = Some(sample);
            return None;
        };

        if (sample - accepted).abs() < self.threshold {
            return None;
        }

        self.switches += 1;
        self.accepted = Some(sample);

        Some(HeightSwitch {
            from: accepted,
            to: sample,
            count: self.switches,
        })
    }

    pub fn has_baseline(&self) -> bool {
        self.accepted.is_some()
    }

    pub fn accepted(&self) -> Option<f32> {
        self.accepted
    }

    pub fn switches(&self) -> u32 {
        self.switches
    }

    pub fn target(&self) -> u32 {
        self.target
    }

    pub fn arrived(&self) -> bool {
        self.switches >= self.target
    }

    pub fn reset(&mut self) {
        self.accepted = None;
        self.switches = 0;
    }
}
