mod clock;
mod config;
mod food;
mod game;
mod input;
mod snake;
mod state;
mod term;

use std::{env, fs::File, sync::Mutex};

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use crate::config::GameConfig;
use crate::game::Driver;
use crate::state::GameState;
use crate::term::TermManager;

pub type TermInt = u16;
pub type GridInt = i32;
pub type Coords = (GridInt, GridInt);

fn main() -> anyhow::Result<()> {
    init_logging()?;

    let config = GameConfig::from_env()?;
    config.validate()?;

    let mut term = TermManager::new()?;
    term.setup()?;

    // The terminal has to be handed back even when the game bails out
    let result = term.fit_grid(config.size).and_then(|_| {
        let state = GameState::new(config, rand::thread_rng());
        Driver::new(state, &mut term).run()
    });

    term.restore()?;
    result
}

fn init_logging() -> anyhow::Result<()> {
    let path = match env::var("SNAKE_LOG") {
        Ok(path) if !path.is_empty() => path,
        _ => return Ok(()),
    };

    let file = File::create(&path).with_context(|| format!("creating log file {}", path))?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();

    Ok(())
}
