use core::time::Duration;

use crate::drone_hal::DroneDriver;

/// Attempt ceiling plus the wait between attempts for a sensing loop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundedPoll {
    interval: Duration,
    max_attempts: u32,
    attempts: u32,
}

impl BoundedPoll {
    pub fn new(interval: Duration, max_attempts: u32) -> Self {
        Self {
            interval,
            max_attempts,
            attempts: 0,
        }
    }

    pub fn record_attempt(&mut self) -> u32 {
        self.attempts += 1;
        self.attempts
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub fn exhausted(&self) -> bool {
        self.attempts >= self.max_attempts
    }

    pub fn reset(&mut self) {
        self.attempts = 0;
    }

    pub fn wait(&self, driver: &mut dyn DroneDriver) {
        if !self.interval.is_zero() {
            driver.delay(self.interval);
        }
    }
}
