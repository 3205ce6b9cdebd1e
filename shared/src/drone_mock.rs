use core::time::Duration;
use std::collections::VecDeque;

use crate::drone_hal::{
    ColorReading, DistanceUnit, DriverError, DroneDriver, LedColor, Note, Waypoint,
};

/// Everything a driver was asked to do, in order. Delays are tracked
/// separately since they do not touch the device.
#[derive(Debug, Clone, PartialEq)]
pub enum DroneCommand {
    Pair,
    Close,
    Takeoff,
    Hover(Duration),
    Land,
    SetAttitude { pitch: i8, roll: i8, throttle: i8 },
    Tick(Duration),
    SetIndicator { color: LedColor, intensity: u8 },
    Buzzer(Note, Duration),
    RecordWaypoint(Waypoint),
    NavigateTo(Waypoint),
}

/// Scripted driver. Distance and color reads pop from queues and repeat the
/// fallback value once a queue runs dry.
#[derive(Debug)]
pub struct DroneDriverMock {
    distances: VecDeque<f32>,
    colors: VecDeque<ColorReading>,
    fallback_distance: f32,
    fallback_color: ColorReading,
    commands: Vec<DroneCommand>,
    distance_reads: usize,
    color_reads: usize,
    elapsed: Duration,
    next_waypoint: u32,
    supports_waypoints: bool,
    pairing_error: Option<DriverError>,
}

impl DroneDriver for DroneDriverMock {
    fn pair(&mut self) -> Result<(), DriverError> {
        if let Some(error) = self.pairing_error.clone() {
            return Err(error);
        }

        self.commands.push(DroneCommand::Pair);
        Ok(())
    }

    fn close(&mut self) {
        self.commands.push(DroneCommand::Close);
    }

    fn takeoff(&mut self) {
        self.commands.push(DroneCommand::Takeoff);
    }

    fn hover(&mut self, duration: Duration) {
        self.elapsed += duration;
        self.commands.push(DroneCommand::Hover(duration));
    }

    fn land(&mut self) {
        self.commands.push(DroneCommand::Land);
    }

    fn set_attitude(&mut self, pitch: i8, roll: i8, throttle: i8) {
        self.commands.push(DroneCommand::SetAttitude {
            pitch,
            roll,
            throttle,
        });
    }

    fn tick(&mut self, duration: Duration) {
        self.elapsed += duration;
        self.commands.push(DroneCommand::Tick(duration));
    }

    fn ground_distance(&mut self, unit: DistanceUnit) -> f32 {
        self.distance_reads += 1;

        let centimeters = self.distances.pop_front().unwrap_or(self.fallback_distance);
        unit.from_centimeters(centimeters)
    }

    fn classify_color(&mut self) -> ColorReading {
        self.color_reads += 1;

        self.colors.pop_front().unwrap_or(self.fallback_color)
    }

    fn set_indicator_color(&mut self, color: LedColor, intensity: u8) {
        self.commands
            .push(DroneCommand::SetIndicator { color, intensity });
    }

    fn buzzer(&mut self, note: Note, duration: Duration) {
        self.commands.push(DroneCommand::Buzzer(note, duration));
    }

    fn delay(&mut self, duration: Duration) {
        self.elapsed += duration;
    }

    fn record_waypoint(&mut self) -> Option<Waypoint> {
        if !self.supports_waypoints {
            return None;
        }

        let waypoint = Waypoint(self.next_waypoint);
        self.next_waypoint += 1;
        self.commands.push(DroneCommand::RecordWaypoint(waypoint));

        Some(waypoint)
    }

    fn navigate_to(&mut self, waypoint: Waypoint, _speed: f32) {
        self.commands.push(DroneCommand::NavigateTo(waypoint));
    }
}

impl DroneDriverMock {
    pub fn new() -> Self {
        Self {
            distances: VecDeque::new(),
            colors: VecDeque::new(),
            fallback_distance: 0.0,
            fallback_color: ColorReading::unrecognized(),
            commands: Vec::new(),
            distance_reads: 0,
            color_reads: 0,
            elapsed: Duration::ZERO,
            next_waypoint: 0,
            supports_waypoints: false,
            pairing_error: None,
        }
    }

    pub fn with_distances(mut self, distances: impl IntoIterator<Item = f32>) -> Self {
        self.push_distances(distances);
        self
    }

    pub fn with_colors(mut self, colors: impl IntoIterator<Item = ColorReading>) -> Self {
        self.push_colors(colors);
        self
    }

    pub fn with_fallback_distance(mut self, distance: f32) -> Self {
        self.fallback_distance = distance;
        self
    }

    pub fn with_fallback_color(mut self, color: ColorReading) -> Self {
        self.fallback_color = color;
        self
    }

    pub fn with_waypoint_support(mut self) -> Self {
        self.supports_waypoints = true;
        self
    }

    pub fn with_pairing_error(mut self, error: DriverError) -> Self {
        self.pairing_error = Some(error);
        self
    }

    pub fn push_distances(&mut self, distances: impl IntoIterator<Item = f32>) {
        self.distances.extend(distances);
    }

    pub fn push_colors(&mut self, colors: impl IntoIterator<Item = ColorReading>) {
        self.colors.extend(colors);
    }

    pub fn commands(&self) -> &[DroneCommand] {
        &self.commands
    }

    pub fn distance_reads(&self) -> usize {
        self.distance_reads
    }

    pub fn color_reads(&self) -> usize {
        self.color_reads
    }

    pub fn remaining_colors(&self) -> usize {
        self.colors.len()
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn tick_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|command| matches!(command, DroneCommand::Tick(_)))
            .count()
    }

    pub fn last_indicator(&self) -> Option<(LedColor, u8)> {
        self.commands.iter().rev().find_map(|command| match command {
            DroneCommand::SetIndicator { color, intensity } => Some((*color, *intensity)),
            _ => None,
        })
    }

    /// True when the driver saw no commands and no sensor reads at all.
    pub fn untouched(&self) -> bool {
        self.commands.is_empty() && self.distance_reads == 0 && self.color_reads == 0
    }
}

impl Default for DroneDriverMock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::drone_hal::ColorLabel;

    #[test]
    fn test_queues_fall_back_when_empty() {
        let mut mock = DroneDriverMock::new()
            .with_distances([50.0, 20.0])
            .with_fallback_distance(80.0)
            .with_colors([ColorReading::both(ColorLabel::Red)]);

        assert_eq!(mock.ground_distance(DistanceUnit::Centimeter), 50.0);
        assert_eq!(mock.ground_distance(DistanceUnit::Millimeter), 200.0);
        assert_eq!(mock.ground_distance(DistanceUnit::Centimeter), 80.0);
        assert_eq!(mock.distance_reads(), 3);

        assert_eq!(mock.classify_color(), ColorReading::both(ColorLabel::Red));
        assert_eq!(mock.classify_color(), ColorReading::unrecognized());
        assert_eq!(mock.color_reads(), 2);
    }

    #[test]
    fn test_waypoints_only_when_supported() {
        let mut mock = DroneDriverMock::new();
        assert_eq!(mock.record_waypoint(), None);

        let mut mock = DroneDriverMock::new().with_waypoint_support();
        assert_eq!(mock.record_waypoint(), Some(Waypoint(0)));
        assert_eq!(mock.record_waypoint(), Some(Waypoint(1)));
    }
}
