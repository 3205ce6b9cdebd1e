use std::str::FromStr;

use shared::drone_hal::{
    ColorLabel, ConfigError, DistanceUnit, NavigationConfig, TransitionState,
};

#[test]
fn partial_config_fills_defaults() {
    let config: NavigationConfig =
        serde_json::from_str(r#"{"switch_threshold": 15.0, "distance_unit": "meter"}"#).unwrap();

    assert_eq!(config.switch_threshold, 15.0);
    assert_eq!(config.distance_unit, DistanceUnit::Meter);
    assert_eq!(config.target_switches, 2);
    assert_eq!(config.classify_attempts, 20);
    assert_eq!(config.validate(), Ok(()));
}

#[test]
fn unusable_configs_are_rejected() {
    let no_bound = NavigationConfig {
        max_arrival_ticks: 0,
        ..NavigationConfig::default()
    };
    assert_eq!(
        no_bound.validate(),
        Err(ConfigError::OutOfRange("max_arrival_ticks", "must be at least 1"))
    );

    let ceiling_below_threshold = NavigationConfig {
        saturation_ceiling: 10.0,
        ..NavigationConfig::default()
    };
    assert!(ceiling_below_threshold.validate().is_err());

    let negative_delay = NavigationConfig {
        settle_delay_s: -1.0,
        ..NavigationConfig::default()
    };
    assert_eq!(
        negative_delay.validate(),
        Err(ConfigError::OutOfRange(
            "settle_delay_s",
            "must be a non-negative duration"
        ))
    );
}

#[test]
fn attitude_powers_and_waypoint_speed_are_bounded() {
    let overdriven = NavigationConfig {
        roll_power: -101,
        ..NavigationConfig::default()
    };
    assert_eq!(
        overdriven.validate(),
        Err(ConfigError::OutOfRange("roll_power", "must be within -100..=100"))
    );

    let full_reverse = NavigationConfig {
        pitch_power: -100,
        throttle_power: 100,
        ..NavigationConfig::default()
    };
    assert_eq!(full_reverse.validate(), Ok(()));

    for waypoint_speed in [0.0, -0.5, f32::NAN] {
        let stalled = NavigationConfig {
            waypoint_speed,
            ..NavigationConfig::default()
        };
        assert_eq!(
            stalled.validate(),
            Err(ConfigError::OutOfRange("waypoint_speed", "must be positive"))
        );
    }
}

#[test]
fn color_labels_parse_from_classifier_output() {
    assert_eq!(ColorLabel::from_str("Red"), Ok(ColorLabel::Red));
    assert_eq!(ColorLabel::from_str("YELLOW"), Ok(ColorLabel::Yellow));
    assert!(ColorLabel::from_str("purple").is_err());
}

#[test]
fn failed_outcomes_are_fatal() {
    assert!(!TransitionState::Success.is_fatal());
    assert!(!TransitionState::AwaitingArrival.is_fatal());
    assert!(TransitionState::TimeoutFatal.is_fatal());
    assert!(TransitionState::Rejected.is_fatal());
}
