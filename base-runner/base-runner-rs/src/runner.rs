use log::{error, info};
use serde::Serialize;
use shared::{
    drone_hal::{BaseId, DroneDriver, NavigationConfig, TransitionState, Waypoint},
    ControllerEntity, WaypointMap,
};

use crate::{
    transition_fsm::{TransitionFsm, VerifyPosition},
    NavigationError, Result,
};

/// Diagnostics for one single-base transition.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransitionReport {
    pub from: BaseId,
    pub target: BaseId,
    pub outcome: TransitionState,
    pub verify_attempts: u32,
    pub ticks: u32,
    pub switches: u32,
    pub last_distance: Option<f32>,
    pub classify_attempts: u32,
    pub landed: Option<BaseId>,
}

impl TransitionReport {
    fn new(from: BaseId) -> Self {
        Self {
            from,
            target: from.next(),
            outcome: TransitionState::VerifyPosition,
            verify_attempts: 0,
            ticks: 0,
            switches: 0,
            last_distance: None,
            classify_attempts: 0,
            landed: None,
        }
    }
}

/// Drives the drone around the diamond one verified base at a time. Owns the
/// logical base, which only changes after a transition lands on the expected
/// successor.
pub struct BaseRunner<'a> {
    pub config: NavigationConfig,
    pub driver: &'a mut dyn DroneDriver,
    waypoints: Option<&'a WaypointMap>,
    current_base: BaseId,
    transition_state: Option<TransitionState>,
    pub(crate) report: TransitionReport,
    reports: Vec<TransitionReport>,
}

impl<'a> BaseRunner<'a> {
    pub fn new(driver: &'a mut dyn DroneDriver, config: NavigationConfig) -> Self {
        Self {
            config,
            driver,
            waypoints: None,
            current_base: BaseId::Home,
            transition_state: None,
            report: TransitionReport::new(BaseId::Home),
            reports: Vec::new(),
        }
    }

    pub fn with_waypoints(mut self, waypoints: &'a WaypointMap) -> Self {
        self.waypoints = Some(waypoints);
        self
    }

    pub fn current_base(&self) -> BaseId {
        self.current_base
    }

    /// State of the running or most recent transition.
    pub fn transition_state(&self) -> Option<TransitionState> {
        self.transition_state
    }

    pub fn reports(&self) -> &[TransitionReport] {
        &self.reports
    }

    /// Runs `count` single-base transitions starting from `current`.
    ///
    /// A request that would pass HOME is clamped to end on HOME. The first
    /// failing transition aborts the rest of the request, leaving the logical
    /// base on the last verified base. A config that fails validation rejects
    /// every request before the drone is touched.
    pub fn advance(&mut self, current: i64, count: i64) -> Result<BaseId> {
        if let Err(e) = self.config.validate() {
            error!("Refusing to advance: {}", e);
            return Err(e.into());
        }

        let invalid_argument = NavigationError::InvalidArgument { current, count };

        if current < 0 || count < 0 {
            return Err(invalid_argument);
        }

        let mut base = match BaseId::try_from(current) {
            Ok(base) => base,
            Err(_) => {
                error!("Input base {} is outside bounds", current);
                return Err(invalid_argument);
            }
        };

        self.current_base = base;

        if count == 0 {
            info!("Drone does not move, staying on {}", base);
            return Ok(base);
        }

        let steps = (count as u64).min(base.bases_to_home() as u64);
        let mut target = base;
        for _ in 0..steps {
            target = target.next();
        }

        info!("(Current Base, Target Base): ({}, {})", base, target);

        for _ in 0..steps {
            match self.transition(base) {
                Ok(landed) => {
                    base = landed;
                    self.current_base = landed;
                }
                Err(error) => {
                    error!("Advance from {} to {} aborted on {}: {}", current, target, base, error);
                    return Err(error);
                }
            }
        }

        Ok(base)
    }

    /// [`BaseRunner::advance`] from the runner's own logical base.
    pub fn advance_by(&mut self, count: i64) -> Result<BaseId> {
        self.advance(self.current_base.index() as i64, count)
    }

    /// One verified move from `from` to its successor.
    pub fn transition(&mut self, from: BaseId) -> Result<BaseId> {
        self.report = TransitionReport::new(from);

        let initial_state = VerifyPosition::new(from, &self.config);
        let mut fsm: ControllerEntity<TransitionFsm, BaseRunner<'a>, TransitionState> =
            ControllerEntity::new(self, initial_state);
        self.transition_state = Some(fsm.hal_state());

        while !fsm.is_terminal() {
            fsm.update(self);
            self.transition_state = Some(fsm.hal_state());
        }

        self.report.outcome = fsm.hal_state();
        self.reports.push(self.report.clone());

        match fsm.into_state() {
            Some(TransitionFsm::Complete(complete)) => Ok(complete.landed()),
            Some(TransitionFsm::Aborted(aborted)) => Err(aborted.into_error()),
            state => unreachable!("transition stopped in a non-terminal state: {:?}", state),
        }
    }

    pub(crate) fn waypoint_for(&self, base: BaseId) -> Option<Waypoint> {
        self.waypoints.and_then(|waypoints| waypoints.get(base))
    }
}
