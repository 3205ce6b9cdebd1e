use std::time::Duration;

use log::{debug, trace};
use nalgebra::Vector2;
use shared::drone_hal::{
    BaseId, ColorReading, DistanceUnit, DriverError, DroneDriver, LedColor, Note, Waypoint,
};

use crate::{
    dynamics::PlanarDynamics,
    field::{Field, SimConfig},
    logging::FlightLog,
    Scalar,
};

/// Deterministic drone flying over the simulated diamond.
#[derive(Debug)]
pub struct DroneDriverSim {
    config: SimConfig,
    field: Field,
    pub dynamics: PlanarDynamics,
    pub flight_log: FlightLog,
    paired: bool,
    waypoints: Vec<Vector2<Scalar>>,
    indicator: Option<(LedColor, u8)>,
    notes: Vec<(Note, Duration)>,
    pub current_sim_timestamp: Scalar,
}

impl DroneDriver for DroneDriverSim {
    fn pair(&mut self) -> Result<(), DriverError> {
        self.paired = true;
        Ok(())
    }

    fn close(&mut self) {
        self.paired = false;
    }

    fn takeoff(&mut self) {
        debug!("Sim drone taking off at {:?}", self.position());
        self.dynamics.flying = true;
    }

    fn hover(&mut self, duration: Duration) {
        let velocity = self.dynamics.velocity;
        self.dynamics.velocity = Vector2::zeros();
        self.advance_time(duration);
        self.dynamics.velocity = velocity;
    }

    fn land(&mut self) {
        debug!("Sim drone landing at {:?}", self.position());
        self.dynamics.land();
    }

    fn set_attitude(&mut self, pitch: i8, roll: i8, _throttle: i8) {
        self.dynamics.set_attitude(pitch, roll);
    }

    fn tick(&mut self, duration: Duration) {
        self.advance_time(duration);
    }

    fn ground_distance(&mut self, unit: DistanceUnit) -> f32 {
        let position = self.dynamics.position;
        let altitude = if self.dynamics.flying {
            self.config.hover_altitude_cm
        } else {
            self.field.surface_height(&position)
        };

        let distance = altitude - self.field.surface_height(&position);
        trace!("Sim ground distance at {:?}: {}", position, distance);

        unit.from_centimeters(distance)
    }

    fn classify_color(&mut self) -> ColorReading {
        if self.dynamics.flying {
            return ColorReading::unrecognized();
        }

        match self.field.pad_at(&self.dynamics.position) {
            Some(pad) => ColorReading::both(pad.color()),
            None => ColorReading::unrecognized(),
        }
    }

    fn set_indicator_color(&mut self, color: LedColor, intensity: u8) {
        self.indicator = Some((color, intensity));
    }

    fn buzzer(&mut self, note: Note, duration: Duration) {
        self.notes.push((note, duration));
    }

    fn delay(&mut self, duration: Duration) {
        self.advance_time(duration);
    }

    fn record_waypoint(&mut self) -> Option<Waypoint> {
        let waypoint = Waypoint(self.waypoints.len() as u32);
        self.waypoints.push(self.dynamics.position);

        Some(waypoint)
    }

    fn navigate_to(&mut self, waypoint: Waypoint, _speed: f32) {
        if let Some(position) = self.waypoints.get(waypoint.0 as usize) {
            debug!("Sim drone navigating to waypoint {:?} at {:?}", waypoint, position);
            self.dynamics.position = *position;
        }
    }
}

impl DroneDriverSim {
    pub fn new(config: SimConfig) -> Self {
        let field = Field::new(&config);
        let dynamics = PlanarDynamics::new(
            field.pad(BaseId::Home).center,
            config.speed_per_power_cm_s,
        );

        Self {
            config,
            field,
            dynamics,
            flight_log: FlightLog::new(),
            paired: false,
            waypoints: Vec::new(),
            indicator: None,
            notes: Vec::new(),
            current_sim_timestamp: 0.0,
        }
    }

    /// Sets the drone down in the middle of `base`'s pad.
    pub fn place_on(&mut self, base: BaseId) {
        self.dynamics.land();
        self.dynamics.position = self.field.pad(base).center;
    }

    pub fn position(&self) -> Vector2<Scalar> {
        self.dynamics.position
    }

    /// Base whose pad the drone is over, if any.
    pub fn base_below(&self) -> Option<BaseId> {
        self.field.pad_at(&self.dynamics.position).map(|pad| pad.base)
    }

    pub fn is_paired(&self) -> bool {
        self.paired
    }

    pub fn indicator(&self) -> Option<(LedColor, u8)> {
        self.indicator
    }

    pub fn notes(&self) -> &[(Note, Duration)] {
        &self.notes
    }

    fn advance_time(&mut self, duration: Duration) {
        let dt = duration.as_secs_f32();

        self.dynamics.update(dt);
        self.current_sim_timestamp += dt;
        self.flight_log
            .log_dynamics_data(self.current_sim_timestamp, &self.dynamics);

        if self.config.realtime {
            std::thread::sleep(duration);
        }
    }
}

impl Default for DroneDriverSim {
    fn default() -> Self {
        Self::new(SimConfig::default())
    }
}
