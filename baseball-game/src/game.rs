use std::io::{BufRead, Write};

use base_runner_rs::BaseRunner;
use log::{debug, error, info, warn};
use shared::{
    drone_hal::{BaseId, ColorLabel, DroneDriver, Note},
    util::BoundedPoll,
    WaypointMap,
};

use crate::{
    config::{GameConfig, PlayConfig},
    error::{GameError, Result},
    hits::{OperatorInput, USAGE},
};

pub const FIRE_START_KEY: &str = "s";

/// Start song as (note, length in note units).
pub const START_SONG: [(Note, f32); 7] = [
    (Note::C4, 1.0),
    (Note::E4, 1.0),
    (Note::G4, 1.0),
    (Note::C5, 0.5),
    (Note::Mute, 1.0),
    (Note::G4, 1.0),
    (Note::C5, 3.0),
];

/// Blocks until the drone reports HOME for enough consecutive samples. Every
/// recognized base lights the indicator in its color.
pub fn wait_for_home(
    driver: &mut dyn DroneDriver,
    config: &PlayConfig,
    led_intensity: u8,
) -> Result<()> {
    let mut poll = BoundedPoll::new(config.home_detect_interval(), config.home_detect_max_samples);
    let mut streak = 0;

    while !poll.exhausted() {
        let reading = driver.classify_color();
        poll.record_attempt();
        debug!("Home check: {}", reading);

        match reading.agreed() {
            Some(label) => {
                driver.set_indicator_color(label.led(), led_intensity);

                if label.base() == BaseId::Home {
                    streak += 1;
                } else {
                    streak = 0;
                }
            }
            None => streak = 0,
        }

        if streak >= config.home_detect_threshold {
            info!("Drone detected on HOME after {} samples", poll.attempts());
            return Ok(());
        }

        poll.wait(driver);
    }

    error!("Drone never settled on HOME");
    Err(GameError::HomeNotDetected {
        samples: poll.attempts(),
    })
}

pub fn play_start_song(driver: &mut dyn DroneDriver, config: &PlayConfig) {
    for (note, length) in START_SONG {
        let duration = config.note_unit().mul_f32(length);

        driver.buzzer(note, duration);
        driver.delay(duration);
    }
}

/// Takes off and holds until the operator presses the start key, then sets
/// the drone back down on its pad.
pub fn fire_start(
    driver: &mut dyn DroneDriver,
    config: &PlayConfig,
    led_intensity: u8,
    input: &mut impl BufRead,
    output: &mut impl Write,
) -> Result<()> {
    driver.takeoff();
    driver.hover(config.fire_start_hover());
    driver.set_indicator_color(ColorLabel::Blue.led(), led_intensity);

    loop {
        write!(output, "Press {} to begin: ", FIRE_START_KEY)?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Err(std::io::Error::from(std::io::ErrorKind::UnexpectedEof).into());
        }

        if line.trim().eq_ignore_ascii_case(FIRE_START_KEY) {
            break;
        }
    }

    writeln!(output, "Beginning Flight.")?;
    driver.set_indicator_color(ColorLabel::Green.led(), led_intensity);
    driver.hover(config.fire_start_hover());
    driver.land();

    Ok(())
}

/// Operator loop. Reads hit values until `q` or end of input and returns the
/// base the runner finished on. Failed advances are reported and play goes on
/// from the last verified base.
pub fn await_input(
    runner: &mut BaseRunner,
    input: &mut impl BufRead,
    output: &mut impl Write,
) -> Result<BaseId> {
    loop {
        write!(output, "Insert a Hit Value: ")?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            info!("Operator input closed");
            break;
        }

        match OperatorInput::parse(&line) {
            OperatorInput::Quit => {
                writeln!(output, "Exiting.")?;
                break;
            }
            OperatorInput::Advance(bases) => match runner.advance_by(bases) {
                Ok(base) => writeln!(output, "Runner is on {}.", base)?,
                Err(error) => {
                    warn!("Advance of {} bases failed: {}", bases, error);
                    writeln!(output, "[ERROR] {}", error)?;
                    writeln!(output, "Runner stays on {}.", runner.current_base())?;
                }
            },
            OperatorInput::Unknown(_) => writeln!(output, "{}", USAGE)?,
        }
    }

    info!("User exit on {}", runner.current_base());
    Ok(runner.current_base())
}

/// Full game: waits for HOME, plays the start song and hands control to the
/// operator.
pub fn play_ball(
    driver: &mut dyn DroneDriver,
    config: &GameConfig,
    waypoints: Option<&WaypointMap>,
    fire: bool,
    input: &mut impl BufRead,
    output: &mut impl Write,
) -> Result<BaseId> {
    let led_intensity = config.navigation.led_intensity;

    wait_for_home(driver, &config.play, led_intensity)?;
    play_start_song(driver, &config.play);

    if fire {
        fire_start(driver, &config.play, led_intensity, input, output)?;
    }

    writeln!(output, "Play Ball!\n")?;
    driver.delay(config.play.start_pause());

    let mut runner = BaseRunner::new(driver, config.navigation.clone());
    if let Some(waypoints) = waypoints {
        runner = runner.with_waypoints(waypoints);
    }

    await_input(&mut runner, input, output)
}

#[cfg(test)]
mod test {
    use std::time::Duration;

    use shared::{
        drone_hal::ColorReading,
        drone_mock::{DroneCommand, DroneDriverMock},
    };

    use super::*;

    fn fixture_play_config() -> PlayConfig {
        PlayConfig {
            home_detect_threshold: 3,
            home_detect_max_samples: 10,
            ..PlayConfig::default()
        }
    }

    #[test]
    fn test_home_streak_resets() {
        let green = ColorReading::both(ColorLabel::Green);
        let mut mock = DroneDriverMock::new().with_colors([
            green,
            green,
            ColorReading::both(ColorLabel::Red),
            green,
            ColorReading::new(Some(ColorLabel::Green), None),
            green,
            green,
            green,
        ]);

        wait_for_home(&mut mock, &fixture_play_config(), 40).unwrap();

        assert_eq!(mock.color_reads(), 8);
        assert_eq!(mock.last_indicator(), Some((ColorLabel::Green.led(), 40)));
        assert!(mock.commands().contains(&DroneCommand::SetIndicator {
            color: ColorLabel::Red.led(),
            intensity: 40,
        }));
    }

    #[test]
    fn test_home_wait_is_bounded() {
        let mut mock = DroneDriverMock::new();

        assert!(matches!(
            wait_for_home(&mut mock, &fixture_play_config(), 100),
            Err(GameError::HomeNotDetected { samples: 10 })
        ));
        assert_eq!(mock.color_reads(), 10);
    }

    #[test]
    fn test_start_song() {
        let mut mock = DroneDriverMock::new();
        play_start_song(&mut mock, &PlayConfig::default());

        let notes = mock
            .commands()
            .iter()
            .filter_map(|command| match command {
                DroneCommand::Buzzer(note, duration) => Some((*note, duration.as_millis())),
                _ => None,
            })
            .collect::<Vec<_>>();

        assert_eq!(
            notes,
            vec![
                (Note::C4, 250),
                (Note::E4, 250),
                (Note::G4, 250),
                (Note::C5, 125),
                (Note::Mute, 250),
                (Note::G4, 250),
                (Note::C5, 750),
            ]
        );
        assert_eq!(mock.elapsed(), Duration::from_millis(2125));
    }

    #[test]
    fn test_fire_start_waits_for_key() {
        let mut mock = DroneDriverMock::new();
        let mut input = "go\nS\n".as_bytes();
        let mut output = Vec::new();

        fire_start(&mut mock, &PlayConfig::default(), 100, &mut input, &mut output).unwrap();

        let output = String::from_utf8(output).unwrap();
        assert_eq!(output.matches("Press s to begin: ").count(), 2);
        assert!(output.ends_with("Beginning Flight.\n"));
        assert_eq!(mock.commands().first(), Some(&DroneCommand::Takeoff));
        assert_eq!(mock.commands().last(), Some(&DroneCommand::Land));
        assert_eq!(mock.last_indicator(), Some((ColorLabel::Green.led(), 100)));
    }

    #[test]
    fn test_play_ball_lights_with_configured_intensity() {
        let green = ColorReading::both(ColorLabel::Green);
        let mut mock = DroneDriverMock::new().with_colors([green; 3]);
        let mut config = GameConfig {
            play: fixture_play_config(),
            ..GameConfig::default()
        };
        config.navigation.led_intensity = 25;
        let mut input = "s\nq\n".as_bytes();
        let mut output = Vec::<u8>::new();

        let base = play_ball(&mut mock, &config, None, true, &mut input, &mut output).unwrap();

        assert_eq!(base, BaseId::Home);
        let intensities = mock
            .commands()
            .iter()
            .filter_map(|command| match command {
                DroneCommand::SetIndicator { intensity, .. } => Some(*intensity),
                _ => None,
            })
            .collect::<Vec<_>>();
        assert_eq!(intensities, vec![25; 5]);
    }

    #[test]
    fn test_fire_start_without_operator() {
        let mut mock = DroneDriverMock::new();
        let mut input = "".as_bytes();
        let mut output = Vec::new();

        assert!(matches!(
            fire_start(&mut mock, &PlayConfig::default(), 100, &mut input, &mut output),
            Err(GameError::Io(_))
        ));
    }
}
