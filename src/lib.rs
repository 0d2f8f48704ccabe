pub mod cell;
pub mod config;
pub mod engine;
pub mod error;
pub mod grid;
pub mod input;
pub mod patterns;
pub mod render;
pub mod rng;
pub mod rules;
pub mod validate;
pub mod window;

use std::time::Instant;

use config::SimConfig;
use engine::{Engine, Renderer};
use error::ValidationError;

pub use cell::CellState;
pub use grid::Grid;

pub struct Timing {
    pub name: &'static str,
    pub ms: f64,
}

/// Build an engine from `config` and run it `steps` generations.
/// The renderer sees step 0 (if configured) and every step after it.
pub fn simulate<R: Renderer>(
    config: SimConfig,
    steps: usize,
    renderer: R,
) -> Result<(Engine<R>, Vec<Timing>), ValidationError> {
    let mut timings = Vec::new();
    let total_start = Instant::now();

    // 1. Validate + initial notification
    let t = Instant::now();
    let mut engine = Engine::new(config, renderer)?;
    timings.push(Timing {
        name: "construct",
        ms: t.elapsed().as_secs_f64() * 1000.0,
    });

    // 2. Generations
    let t = Instant::now();
    engine.advance(steps);
    timings.push(Timing {
        name: "advance",
        ms: t.elapsed().as_secs_f64() * 1000.0,
    });

    let total_ms = total_start.elapsed().as_secs_f64() * 1000.0;
    timings.push(Timing {
        name: "TOTAL",
        ms: total_ms,
    });

    Ok((engine, timings))
}
