use std::time::Duration;

use log::{error, info};
use shared::drone_hal::DroneDriver;

use crate::error::Result;

/// Pairs the drone, runs `session` and then lands and closes the connection,
/// whatever the session returned. A pairing failure skips the session.
pub fn with_session<D, T, F>(driver: &mut D, pair_settle: Duration, session: F) -> Result<T>
where
    D: DroneDriver + ?Sized,
    F: FnOnce(&mut D) -> Result<T>,
{
    driver.pair()?;
    driver.delay(pair_settle);
    info!("Drone paired");

    let result = session(&mut *driver);

    if let Err(error) = &result {
        error!("Session ended with error: {}", error);
    }

    driver.land();
    driver.close();
    info!("Drone landed and connection closed");

    result
}
