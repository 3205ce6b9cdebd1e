use base_runner_rs::{BaseRunner, NavigationError};
use shared::{
    drone_hal::{
        BaseId, ColorLabel, ColorReading, NavigationConfig, TransitionState, Waypoint, NEUTRAL_LED,
    },
    drone_mock::{DroneCommand, DroneDriverMock},
    WaypointMap,
};

const OVER_PAD: f32 = 55.0;
const OVER_FLOOR: f32 = 80.0;

/// Distance script for one transition: a baseline read, then ticks over the
/// starting pad, the floor from `leave_at` and the next pad from `land_at`.
fn fixture_flight(leave_at: u32, land_at: u32) -> Vec<f32> {
    let mut distances = vec![OVER_PAD];

    for tick in 1..=land_at {
        if tick < leave_at || tick >= land_at {
            distances.push(OVER_PAD);
        } else {
            distances.push(OVER_FLOOR);
        }
    }

    distances
}

/// Scripted drone for a clean run of `count` transitions starting on `from`.
fn fixture_clean_run(from: BaseId, count: usize) -> DroneDriverMock {
    let mut mock = DroneDriverMock::new();
    let mut base = from;

    for _ in 0..count {
        mock.push_colors([ColorReading::both(base.color())]);
        mock.push_distances(fixture_flight(3, 7));

        base = base.next();
        mock.push_colors([ColorReading::both(base.color())]);
    }

    mock
}

fn fixture_config() -> NavigationConfig {
    NavigationConfig::default()
}

#[test]
fn home_to_first_end_to_end() {
    let config = fixture_config();
    let mut mock = DroneDriverMock::new()
        .with_distances(fixture_flight(3, 7))
        .with_colors([
            ColorReading::both(ColorLabel::Green),
            ColorReading::new(Some(ColorLabel::Red), None),
            ColorReading::both(ColorLabel::Red),
        ]);

    let mut runner = BaseRunner::new(&mut mock, config.clone());
    assert_eq!(runner.advance(0, 1), Ok(BaseId::First));
    assert_eq!(runner.current_base(), BaseId::First);
    assert_eq!(runner.transition_state(), Some(TransitionState::Success));

    let report = runner.reports()[0].clone();
    assert_eq!(report.from, BaseId::Home);
    assert_eq!(report.target, BaseId::First);
    assert_eq!(report.outcome, TransitionState::Success);
    assert_eq!(report.verify_attempts, 1);
    assert_eq!(report.ticks, 7);
    assert_eq!(report.switches, 2);
    assert_eq!(report.classify_attempts, 2);
    assert_eq!(report.landed, Some(BaseId::First));
    drop(runner);

    let tick = DroneCommand::Tick(config.tick_duration());
    let mut expected = vec![
        DroneCommand::Takeoff,
        DroneCommand::Hover(config.takeoff_hover()),
        DroneCommand::SetAttitude {
            pitch: 30,
            roll: 20,
            throttle: 0,
        },
    ];
    expected.extend(std::iter::repeat(tick).take(7));
    expected.extend([
        DroneCommand::SetAttitude {
            pitch: 0,
            roll: 0,
            throttle: 0,
        },
        DroneCommand::Hover(config.tick_duration()),
        DroneCommand::Land,
        DroneCommand::SetIndicator {
            color: ColorLabel::Red.led(),
            intensity: config.led_intensity,
        },
    ]);

    assert_eq!(mock.commands(), expected.as_slice());
    assert_eq!(mock.last_indicator(), Some((ColorLabel::Red.led(), 100)));
    assert_eq!(mock.distance_reads(), 8);
    assert_eq!(mock.color_reads(), 3);
}

#[test]
fn runs_exactly_count_transitions() {
    for (from, count) in [(0_i64, 1_i64), (0, 2), (0, 3), (1, 2), (2, 1)] {
        let start = BaseId::try_from(from).unwrap();
        let mut mock = fixture_clean_run(start, count as usize);
        let mut runner = BaseRunner::new(&mut mock, fixture_config());

        let expected = BaseId::try_from((from + count) % 4).unwrap();
        assert_eq!(runner.advance(from, count), Ok(expected));
        assert_eq!(runner.reports().len(), count as usize);
        drop(runner);

        assert_eq!(mock.tick_count(), 7 * count as usize);
        assert_eq!(mock.remaining_colors(), 0);
    }
}

#[test]
fn overrun_clamps_to_home() {
    let mut mock = fixture_clean_run(BaseId::Second, 2);
    let mut runner = BaseRunner::new(&mut mock, fixture_config());

    assert_eq!(runner.advance(2, 5), Ok(BaseId::Home));
    assert_eq!(runner.current_base(), BaseId::Home);

    let landed = runner
        .reports()
        .iter()
        .map(|report| report.landed)
        .collect::<Vec<_>>();
    assert_eq!(landed, vec![Some(BaseId::Third), Some(BaseId::Home)]);
}

#[test]
fn home_run_circles_the_diamond() {
    let mut mock = fixture_clean_run(BaseId::Home, 4);
    let mut runner = BaseRunner::new(&mut mock, fixture_config());

    assert_eq!(runner.advance(0, 4), Ok(BaseId::Home));
    assert_eq!(runner.reports().len(), 4);
}

#[test]
fn advance_by_continues_from_logical_base() {
    let mut mock = fixture_clean_run(BaseId::Home, 3);
    let mut runner = BaseRunner::new(&mut mock, fixture_config());

    assert_eq!(runner.advance_by(1), Ok(BaseId::First));
    assert_eq!(runner.advance_by(2), Ok(BaseId::Third));
    assert_eq!(runner.advance_by(0), Ok(BaseId::Third));
    assert_eq!(runner.reports().len(), 3);
}

#[test]
fn wrong_base_aborts_and_keeps_last_verified_base() {
    let mut mock = fixture_clean_run(BaseId::Home, 1);
    mock.push_colors([ColorReading::both(ColorLabel::Red)]);
    mock.push_distances(fixture_flight(2, 5));
    mock.push_colors([ColorReading::both(ColorLabel::Blue)]);

    let mut runner = BaseRunner::new(&mut mock, fixture_config());

    assert_eq!(
        runner.advance(0, 3),
        Err(NavigationError::WrongBaseLanded {
            expected: BaseId::Second,
            observed: BaseId::Third,
            color: ColorLabel::Blue,
        })
    );
    assert_eq!(runner.current_base(), BaseId::First);
    assert_eq!(runner.transition_state(), Some(TransitionState::WrongBaseFatal));
    assert_eq!(runner.reports().len(), 2);
    assert_eq!(runner.reports()[1].landed, Some(BaseId::Third));
    drop(runner);

    assert_eq!(mock.last_indicator(), Some((NEUTRAL_LED, 0)));
    assert_eq!(mock.remaining_colors(), 0);
}

#[test]
fn missing_pad_edges_time_out() {
    let config = NavigationConfig {
        max_arrival_ticks: 10,
        ..fixture_config()
    };
    let mut mock = DroneDriverMock::new()
        .with_colors([ColorReading::both(ColorLabel::Green)])
        .with_fallback_distance(OVER_PAD);

    let mut runner = BaseRunner::new(&mut mock, config);

    assert_eq!(
        runner.advance(0, 1),
        Err(NavigationError::ArrivalTimeout {
            ticks: 10,
            switches: 0,
            target: 2,
            last_distance: Some(OVER_PAD),
        })
    );
    assert_eq!(runner.current_base(), BaseId::Home);
    drop(runner);

    assert_eq!(mock.tick_count(), 10);
    assert_eq!(mock.color_reads(), 1);
    assert_eq!(mock.last_indicator(), Some((NEUTRAL_LED, 0)));

    let tail = &mock.commands()[mock.commands().len() - 3..];
    assert_eq!(
        tail,
        &[
            DroneCommand::SetAttitude {
                pitch: 0,
                roll: 0,
                throttle: 0,
            },
            DroneCommand::Land,
            DroneCommand::SetIndicator {
                color: NEUTRAL_LED,
                intensity: 0,
            },
        ]
    );
}

#[test]
fn saturated_sensor_never_gets_a_baseline() {
    let config = NavigationConfig {
        baseline_attempts: 4,
        ..fixture_config()
    };
    let mut mock = DroneDriverMock::new()
        .with_colors([ColorReading::both(ColorLabel::Green)])
        .with_fallback_distance(1200.0);

    let mut runner = BaseRunner::new(&mut mock, config);

    assert_eq!(
        runner.advance(0, 1),
        Err(NavigationError::ArrivalTimeout {
            ticks: 0,
            switches: 0,
            target: 2,
            last_distance: Some(1200.0),
        })
    );
    drop(runner);

    assert_eq!(mock.distance_reads(), 4);
    assert_eq!(mock.tick_count(), 0);
}

#[test]
fn unrecognized_start_is_a_position_mismatch() {
    let mut mock = DroneDriverMock::new();
    let mut runner = BaseRunner::new(&mut mock, fixture_config());

    assert_eq!(
        runner.advance(1, 1),
        Err(NavigationError::PositionMismatch {
            expected: BaseId::First,
            observed: None,
            last_reading: Some(ColorReading::unrecognized()),
        })
    );
    drop(runner);

    assert_eq!(mock.color_reads(), 5);
    assert_eq!(mock.tick_count(), 0);
}

#[test]
fn waypoint_corrects_drift_before_landing() {
    let waypoints = [(BaseId::First, Waypoint(7)), (BaseId::Second, Waypoint(9))]
        .into_iter()
        .collect::<WaypointMap>();
    let mut mock = fixture_clean_run(BaseId::Home, 1);

    let mut runner = BaseRunner::new(&mut mock, fixture_config()).with_waypoints(&waypoints);
    assert_eq!(runner.advance(0, 1), Ok(BaseId::First));
    drop(runner);

    let navigate = mock
        .commands()
        .iter()
        .position(|command| *command == DroneCommand::NavigateTo(Waypoint(7)))
        .unwrap();
    let land = mock
        .commands()
        .iter()
        .position(|command| *command == DroneCommand::Land)
        .unwrap();

    assert!(navigate < land);
    assert!(!mock
        .commands()
        .contains(&DroneCommand::NavigateTo(Waypoint(9))));
}

#[test]
fn grounded_runs_never_take_off() {
    let config = NavigationConfig {
        airborne: false,
        ..fixture_config()
    };
    let mut mock = fixture_clean_run(BaseId::Third, 1);
    let mut runner = BaseRunner::new(&mut mock, config);

    assert_eq!(runner.advance(3, 1), Ok(BaseId::Home));
    drop(runner);

    assert!(!mock.commands().contains(&DroneCommand::Takeoff));
    assert!(!mock.commands().contains(&DroneCommand::Land));
    assert!(mock.commands().contains(&DroneCommand::SetAttitude {
        pitch: -30,
        roll: 20,
        throttle: 0,
    }));
}
