use std::{
    fs::{self, File},
    io::{BufReader, BufWriter},
    path::Path,
};

use log::info;
use shared::WaypointMap;

use crate::error::Result;

/// Reads the calibrated waypoints, `None` when the file does not exist yet.
pub fn load(path: &Path) -> Result<Option<WaypointMap>> {
    if !path.exists() {
        return Ok(None);
    }

    let reader = BufReader::new(File::open(path)?);
    let waypoints: WaypointMap = serde_json::from_reader(reader)?;
    info!("Loaded {} waypoints from {}", waypoints.len(), path.display());

    Ok(Some(waypoints))
}

pub fn save(path: &Path, waypoints: &WaypointMap) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(writer, waypoints)?;
    info!("Saved {} waypoints to {}", waypoints.len(), path.display());

    Ok(())
}
