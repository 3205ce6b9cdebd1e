use std::io;

use baseball_game::{
    calibration::calibrate,
    cli::{Args, Command},
    game::play_ball,
    logging, waypoint_store, with_session, GameConfig, Result,
};
use clap::Parser;
use log::{error, info};
use software_in_loop::DroneDriverSim;

fn main() {
    let args = Args::parse();

    match logging::init(&args.log_dir, args.log_stdout) {
        Ok(Some(path)) => println!("Logging to {}", path.display()),
        Ok(None) => {}
        Err(e) => {
            eprintln!("Error: could not set up logging in {}: {}", args.log_dir.display(), e);
            std::process::exit(1);
        }
    }

    if let Err(e) = run(&args) {
        error!("{}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<()> {
    let config = GameConfig::load(args.config.as_deref())?;
    let mut drone = DroneDriverSim::new(config.sim.clone());

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout();

    match args.command() {
        Command::Play => {
            let waypoints = waypoint_store::load(&args.waypoints)?;
            if waypoints.is_none() {
                info!("No waypoints at {}, flying without drift correction", args.waypoints.display());
            }

            let base = with_session(&mut drone, config.play.pair_settle(), |drone| {
                play_ball(
                    drone,
                    &config,
                    waypoints.as_ref(),
                    args.fire_start,
                    &mut input,
                    &mut output,
                )
            })?;

            info!("Game over, drone on {}", base);
        }
        Command::Calibrate => {
            if args.waypoints.exists() {
                info!("Waypoints already calibrated at {}", args.waypoints.display());
                println!("{} exists, remove it to calibrate again.", args.waypoints.display());
                return Ok(());
            }

            let waypoints = with_session(&mut drone, config.play.pair_settle(), |drone| {
                calibrate(drone, &mut input, &mut output)
            })?;

            waypoint_store::save(&args.waypoints, &waypoints)?;
        }
    }

    Ok(())
}
