use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "baseball-game")]
#[command(about = "Fly a drone around a four-base baseball diamond")]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// TOML config file. Defaults are used when omitted.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Calibrated waypoint file
    #[arg(short, long, default_value = "waypoints.json")]
    pub waypoints: PathBuf,

    /// Directory for numbered log files
    #[arg(long, default_value = "logs")]
    pub log_dir: PathBuf,

    /// Log to stderr instead of a file
    #[arg(long)]
    pub log_stdout: bool,

    /// Take off and wait for the start key before play
    #[arg(long)]
    pub fire_start: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Wait for HOME and take hit values from the operator
    Play,
    /// Record a waypoint on every base
    Calibrate,
}

impl Args {
    pub fn command(&self) -> Command {
        self.command.unwrap_or(Command::Play)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_defaults_to_play() {
        let args = Args::parse_from(["baseball-game"]);

        assert_eq!(args.command(), Command::Play);
        assert_eq!(args.waypoints, PathBuf::from("waypoints.json"));
        assert_eq!(args.log_dir, PathBuf::from("logs"));
        assert!(!args.log_stdout);
        assert!(!args.fire_start);
    }

    #[test]
    fn test_calibrate_with_options() {
        let args = Args::parse_from([
            "baseball-game",
            "--config",
            "game.toml",
            "--log-stdout",
            "calibrate",
        ]);

        assert_eq!(args.command(), Command::Calibrate);
        assert_eq!(args.config, Some(PathBuf::from("game.toml")));
        assert!(args.log_stdout);
    }
}
