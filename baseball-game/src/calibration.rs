use std::io::{BufRead, Write};

use log::{info, warn};
use shared::{
    drone_hal::{BaseId, DroneDriver},
    WaypointMap,
};
use strum::IntoEnumIterator;

use crate::error::{GameError, Result};

/// Walks the operator around the diamond in cycle order and records a
/// waypoint on every pad. The drone must read as the prompted base before
/// its waypoint is taken.
pub fn calibrate(
    driver: &mut dyn DroneDriver,
    input: &mut impl BufRead,
    output: &mut impl Write,
) -> Result<WaypointMap> {
    let mut waypoints = WaypointMap::new();

    for base in BaseId::iter() {
        write!(
            output,
            "Place the drone on {} ({}) and press enter: ",
            base,
            base.color()
        )?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Err(std::io::Error::from(std::io::ErrorKind::UnexpectedEof).into());
        }

        let reading = driver.classify_color();
        let observed = reading.agreed().map(|label| label.base());

        if observed != Some(base) {
            warn!("Calibration reading {} does not match {}", reading, base);
            return Err(GameError::CalibrationMismatch {
                expected: base,
                observed,
            });
        }

        let waypoint = driver
            .record_waypoint()
            .ok_or(GameError::WaypointsUnsupported)?;
        info!("Recorded waypoint {:?} for {}", waypoint, base);

        waypoints.insert(base, waypoint);
    }

    writeln!(output, "Calibrated {} bases.", waypoints.len())?;

    Ok(waypoints)
}
