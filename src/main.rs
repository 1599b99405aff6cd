//! Tile Hop headless runner
//!
//! Loads a level (or the built-in demo), drives the simulation with a scripted
//! input sequence at a fixed frame rate and prints the final frame as JSON.
//!
//! Usage: `tile-hop [level.json] [--mode platformer|top-down] [--config physics.json] [--ticks N]`

use std::path::PathBuf;

use tile_hop::level::{LevelDescriptor, ObjectDescriptor, TileCell};
use tile_hop::sim::{FixedTimestep, SimEvent, SimState, TickInput, tick};
use tile_hop::{Error, GameMode, Level, PhysicsConfig};

/// Command-line options
#[derive(Debug, Default)]
struct Options {
    level: Option<PathBuf>,
    config: Option<PathBuf>,
    mode: GameMode,
    max_ticks: Option<u64>,
}

impl Options {
    fn parse(args: impl IntoIterator<Item = String>) -> Result<Self, Error> {
        let mut options = Self::default();
        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--mode" => {
                    let value = args.next().unwrap_or_default();
                    options.mode =
                        GameMode::from_str(&value).ok_or(Error::UnknownMode(value))?;
                }
                "--config" => options.config = args.next().map(PathBuf::from),
                "--ticks" => {
                    let value = args.next().unwrap_or_default();
                    let ticks = value.parse().map_err(|_| {
                        Error::InvalidConfig(format!("--ticks expects a number, got '{value}'"))
                    })?;
                    options.max_ticks = Some(ticks);
                }
                _ => options.level = Some(PathBuf::from(arg)),
            }
        }
        Ok(options)
    }
}

/// 30x20 tiles: walls, a floor, a ledge and a row of bouncing tiles
fn demo_level() -> LevelDescriptor {
    let object = |x: f32, y: f32, w: f32, h: f32| ObjectDescriptor {
        x,
        y,
        width: Some(w),
        height: Some(h),
    };
    LevelDescriptor {
        width_tiles: 30,
        height_tiles: 20,
        tile_width: 16,
        tile_height: 16,
        colliders: vec![
            object(0.0, 304.0, 480.0, 16.0),
            object(0.0, 0.0, 16.0, 304.0),
            object(464.0, 0.0, 16.0, 304.0),
            object(320.0, 240.0, 64.0, 16.0),
            // Zero-height marker left behind by the editor
            object(200.0, 100.0, 32.0, 0.0),
        ],
        spawn: vec![object(48.0, 304.0, 16.0, 16.0)],
        interactive: (8..13).map(|x| TileCell { x, y: 15 }).collect(),
    }
}

/// Held inputs for a stretch of ticks
struct Segment {
    ticks: u32,
    input: TickInput,
}

fn demo_script() -> Vec<Segment> {
    let input = |left, right, up, down, jump| TickInput {
        up,
        down,
        left,
        right,
        jump,
    };
    vec![
        Segment {
            ticks: 30,
            input: TickInput::default(),
        },
        Segment {
            ticks: 45,
            input: input(false, true, false, false, false),
        },
        Segment {
            ticks: 30,
            input: input(false, false, false, false, true),
        },
        Segment {
            ticks: 60,
            input: input(false, true, false, false, true),
        },
        Segment {
            ticks: 40,
            input: input(true, false, true, false, false),
        },
        Segment {
            ticks: 30,
            input: TickInput::default(),
        },
    ]
}

/// Drives a simulation from wall-clock frames
struct Runner {
    state: SimState,
    timestep: FixedTimestep,
    script: Vec<Segment>,
    segment: usize,
    segment_ticks: u32,
    max_ticks: Option<u64>,
}

impl Runner {
    fn new(state: SimState, script: Vec<Segment>, max_ticks: Option<u64>) -> Self {
        Self {
            timestep: FixedTimestep::from_config(&state.config),
            state,
            script,
            segment: 0,
            segment_ticks: 0,
            max_ticks,
        }
    }

    /// Input for the next tick, or None once the script is exhausted
    fn next_input(&mut self) -> Option<TickInput> {
        loop {
            let segment = self.script.get(self.segment)?;
            if self.segment_ticks < segment.ticks {
                self.segment_ticks += 1;
                return Some(segment.input);
            }
            self.segment += 1;
            self.segment_ticks = 0;
        }
    }

    fn should_quit(&self) -> bool {
        self.max_ticks.is_some_and(|max| self.state.time_ticks >= max)
    }

    /// Run the ticks due for one frame; returns false when finished
    fn frame(&mut self, frame_dt: f32) -> bool {
        for _ in 0..self.timestep.ticks_due(frame_dt) {
            if self.should_quit() {
                return false;
            }
            let Some(input) = self.next_input() else {
                return false;
            };
            let result = tick(&mut self.state, &input);
            for event in &result.events {
                match event {
                    SimEvent::TileStruck { coord } => {
                        log::info!("[tick {}] Struck tile {}", self.state.time_ticks, coord)
                    }
                    other => log::debug!("[tick {}] {:?}", self.state.time_ticks, other),
                }
            }
        }
        true
    }
}

fn main() -> Result<(), Error> {
    env_logger::init();
    let options = Options::parse(std::env::args().skip(1))?;

    let level = match &options.level {
        Some(path) => Level::load(path)?,
        None => Level::from_descriptor(&demo_level())?,
    };
    let config = match &options.config {
        Some(path) => PhysicsConfig::load(path)?,
        None => PhysicsConfig::from_mode(options.mode),
    };
    if options.config.is_some() && options.mode != GameMode::default() {
        log::warn!(
            "--config replaces the {} preset; --mode is ignored",
            options.mode.as_str()
        );
    }
    log::info!(
        "Tile Hop starting ({} mode, {} Hz)",
        config.mode().as_str(),
        config.tick_rate
    );

    let frame_dt = config.tick_dt();
    let mut runner = Runner::new(SimState::new(level, config), demo_script(), options.max_ticks);
    while runner.frame(frame_dt) {}

    log::info!("Stopped after {} ticks", runner.state.time_ticks);
    let frame = runner.state.snapshot();
    let json = serde_json::to_string_pretty(&frame).map_err(|source| Error::Encode {
        what: "frame",
        source,
    })?;
    println!("{json}");
    Ok(())
}
