use std::time::{Duration, Instant};

use rand::Rng;

use crate::clock::Clock;
use crate::input::{Command, InputSource};
use crate::state::GameState;
use crate::term::Renderer;

// Only used if the clock is somehow unarmed; keeps the input wait bounded
const IDLE_WAIT: Duration = Duration::from_millis(100);

/// Drives a game: waits for input until the next tick is due, then steps
/// the simulation, draws it, and schedules the following tick from the
/// current tick rate.
pub struct Driver<R, T> {
    state: GameState<R>,
    clock: Clock,
    term: T,
}

impl<R: Rng, T: Renderer + InputSource> Driver<R, T> {
    pub fn new(state: GameState<R>, term: T) -> Self {
        Driver { state, clock: Clock::new(), term }
    }

    pub fn run(&mut self) -> anyhow::Result<()> {
        self.render()?;
        self.clock.arm(Instant::now(), self.state.tick_interval());

        loop {
            let now = Instant::now();

            if self.clock.is_due(now) {
                self.on_tick()?;
                continue;
            }

            let wait = self.clock.remaining(now).unwrap_or(IDLE_WAIT);

            if let Some(cmd) = self.term.next_command(wait)? {
                if !self.handle(cmd)? {
                    tracing::info!(score = self.state.score(), "quit");
                    return Ok(());
                }
            }
        }
    }

    fn on_tick(&mut self) -> anyhow::Result<()> {
        self.state.tick();
        self.render()?;

        // Read the rate again, a meal this tick speeds up the very next one
        self.clock.arm(Instant::now(), self.state.tick_interval());
        Ok(())
    }

    /// Returns `false` once the player asked to quit.
    fn handle(&mut self, cmd: Command) -> anyhow::Result<bool> {
        match cmd {
            Command::Turn(dir) => self.state.turn(dir),
            Command::Restart if self.state.is_terminal() => {
                self.state.restart();
                self.render()?;
                self.clock.arm(Instant::now(), self.state.tick_interval());
            },
            Command::Restart => {},
            Command::Quit => return Ok(false),
        }

        Ok(true)
    }

    fn render(&mut self) -> anyhow::Result<()> {
        let frame = self.state.frame();

        if frame.terminal {
            self.term.draw_game_over(frame.score)
        } else {
            self.term.draw_frame(&frame)
        }
    }
}
