use std::{fs::File, io, path::Path};

use serde::{Deserialize, Serialize};

use crate::{dynamics::PlanarDynamics, Scalar};

/// One timestep of the simulated flight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlightFrame {
    pub t: Scalar,
    pub position: [Scalar; 2],
    pub velocity: [Scalar; 2],
    pub flying: bool,
}

/// Per-timestep record of a simulated run, dumped as JSON for replay.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FlightLog {
    pub frames: Vec<FlightFrame>,
}

impl FlightLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn log_dynamics_data(&mut self, t: Scalar, dynamics: &PlanarDynamics) {
        self.frames.push(FlightFrame {
            t,
            position: [dynamics.position.x, dynamics.position.y],
            velocity: [dynamics.velocity.x, dynamics.velocity.y],
            flying: dynamics.flying,
        });
    }

    pub fn num_timesteps(&self) -> usize {
        self.frames.len()
    }

    pub fn dump_to_file(&self, path: &Path) -> io::Result<()> {
        let file = File::create(path)?;
        serde_json::to_writer(file, self)?;

        Ok(())
    }
}

pub fn load_logs_from_file(path: &Path) -> io::Result<FlightLog> {
    let file = File::open(path)?;

    Ok(serde_json::from_reader(file)?)
}
