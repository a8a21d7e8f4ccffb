//! Roto Bounce entry point
//!
//! Headless native driver: runs the simulation at a nominal 60 Hz frame rate
//! and streams JSON frames on stdout for an external renderer.
//!
//! Usage: `roto-bounce [SETTINGS.json | PRESET] [SECONDS]`

use std::error::Error;
use std::process::ExitCode;

use roto_bounce::sim::{FixedStepper, SimState, TickInput};
use roto_bounce::{Preset, Settings, SettingsError};

/// Nominal render frame time
const FRAME_DT: f32 = 1.0 / 60.0;
/// Emit a frame every this many render frames
const EMIT_EVERY_FRAMES: u64 = 6;
/// Random kick cadence
const KICK_INTERVAL_SECS: f32 = 4.0;
const DEFAULT_RUN_SECS: f32 = 10.0;

/// A preset name, a settings file, or the defaults
fn load_settings(arg: Option<&str>) -> Result<Settings, SettingsError> {
    match arg {
        None => Ok(Settings::default()),
        Some(name) => match Preset::from_str(name) {
            Some(preset) => {
                log::info!("Using preset {}", preset.as_str());
                Ok(Settings::from_preset(preset))
            }
            None => Settings::load(name),
        },
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let settings = load_settings(args.first().map(String::as_str))?;
    let seconds = match args.get(1) {
        Some(s) => s.parse::<f32>()?,
        None => DEFAULT_RUN_SECS,
    };

    let mut state = SimState::new(settings)?;
    let mut stepper = FixedStepper::default();
    let mut input = TickInput::default();

    let frames = (seconds / FRAME_DT).ceil().max(0.0) as u64;
    let kick_every = (KICK_INTERVAL_SECS / FRAME_DT).round() as u64;
    let mut unsettled = 0u64;

    log::info!("Running {frames} frames ({seconds}s)");
    for frame in 0..frames {
        if frame > 0 && frame % kick_every == 0 {
            input.kick = true;
        }
        stepper.advance(&mut state, &mut input, FRAME_DT);

        if state.max_penetration() > 0.5 {
            unsettled += 1;
        }
        if frame % EMIT_EVERY_FRAMES == 0 {
            println!("{}", state.frame().to_json_line()?);
        }
    }

    log::info!(
        "Finished after {} ticks: ball at {:?}, speed {:.1}, {} frames with residual overlap",
        state.time_ticks,
        state.ball.pos,
        state.ball.vel.length(),
        unsettled
    );
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    log::info!("Roto Bounce (headless) starting...");

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            eprintln!("roto-bounce: {e}");
            ExitCode::FAILURE
        }
    }
}
