// Headless radar: drifting blips, a rotating sweep, and a ping whenever the sweep touches one.

use clap::Parser;
use log::{error, info};
use radar_ping_lib::{AudioEngine, EngineConfig, Point, SharedSweep, Sweep, TriggerLoop, DEFAULT_POLL_INTERVAL};
use std::path::PathBuf;
use std::time::Duration;

const RADAR_RADIUS: f32 = 400.0;
const SWEEP_SPEED: f32 = 2.0; // degrees per frame
const FRAME_TIME: Duration = Duration::from_millis(16);
const NUM_OBJECTS: usize = 10;

struct Blip {
    position: Point,
    heading: f32,
    speed: f32,
}

impl Blip {
    fn random() -> Self {
        let distance = fastrand::f32() * RADAR_RADIUS * 0.9;
        let bearing = fastrand::f32() * std::f32::consts::TAU;
        Self {
            position: Point::new(distance * bearing.cos(), distance * bearing.sin()),
            heading: fastrand::f32() * std::f32::consts::TAU,
            speed: 0.2 + fastrand::f32() * 1.5,
        }
    }

    fn update(&mut self) {
        self.position.x += self.speed * self.heading.cos();
        self.position.y += self.speed * self.heading.sin();
        if self.position.x.hypot(self.position.y) >= RADAR_RADIUS {
            *self = Blip::random();
        }
    }
}

/// Headless radar demo that pings whenever the sweep touches a blip
#[derive(Parser)]
#[command(name = "radar-ping")]
#[command(version)]
struct Args {
    /// JSON engine config; defaults are used when omitted
    config: Option<PathBuf>,

    /// Arm pings from a background polling thread instead of the frame loop
    #[arg(long)]
    poll: bool,

    /// How long to run the demo for
    #[arg(long, default_value_t = 20)]
    seconds: u64,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => match EngineConfig::from_path(path) {
            Ok(config) => config,
            Err(e) => {
                error!("{}", e);
                std::process::exit(1);
            }
        },
        None => EngineConfig::default(),
    };

    let mut engine = match AudioEngine::new(config) {
        Ok(engine) => engine,
        Err(e) => {
            error!("{}", e);
            std::process::exit(1);
        }
    };

    // No device just means no sound; the radar keeps sweeping
    if engine.open().is_err() {
        info!("Continuing without audio");
    }

    let mut blips: Vec<Blip> = (0..NUM_OBJECTS).map(|_| Blip::random()).collect();
    let mut positions: Vec<Point> = Vec::with_capacity(NUM_OBJECTS);

    let shared = SharedSweep::new(Sweep::new(0.0, RADAR_RADIUS));
    let mut trigger_loop = if args.poll {
        match TriggerLoop::spawn(engine.trigger_handle(), shared.clone(), DEFAULT_POLL_INTERVAL) {
            Ok(trigger_loop) => Some(trigger_loop),
            Err(e) => {
                error!("Failed to start trigger loop: {}", e);
                None
            }
        }
    } else {
        None
    };

    let direction = -1.0;
    let mut angle = 0.0f32;
    let frames = args.seconds * 1000 / FRAME_TIME.as_millis() as u64;

    for _ in 0..frames {
        for blip in blips.iter_mut() {
            blip.update();
        }
        positions.clear();
        positions.extend(blips.iter().map(|b| b.position));

        let sweep = Sweep::new(angle, RADAR_RADIUS);
        if trigger_loop.is_some() {
            shared.publish(sweep, &positions);
        } else {
            engine.trigger(&sweep, &positions);
        }

        angle = (angle + SWEEP_SPEED * direction).rem_euclid(360.0);
        std::thread::sleep(FRAME_TIME);
    }

    if let Some(trigger_loop) = trigger_loop.as_mut() {
        trigger_loop.stop();
    }
    engine.shutdown();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_defaults() {
        let args = Args::try_parse_from(["radar-ping"]).unwrap();
        assert!(args.config.is_none());
        assert!(!args.poll);
        assert_eq!(args.seconds, 20);
    }

    #[test]
    fn test_args_config_poll_and_seconds() {
        let args = Args::try_parse_from(["radar-ping", "radar.json", "--poll", "--seconds", "5"]).unwrap();
        assert_eq!(args.config, Some(PathBuf::from("radar.json")));
        assert!(args.poll);
        assert_eq!(args.seconds, 5);
    }

    #[test]
    fn test_args_reject_bad_input() {
        assert!(Args::try_parse_from(["radar-ping", "--seconds", "soon"]).is_err());
        assert!(Args::try_parse_from(["radar-ping", "a.json", "b.json"]).is_err());
    }
}
