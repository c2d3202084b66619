use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::snake::Direction::{self, *};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Command {
    Turn(Direction),
    Restart,
    Quit,
}

/// Anything that can hand the driver player commands.
pub trait InputSource {
    /// Waits at most `timeout` for one command. `None` means nothing usable
    /// arrived in time.
    fn next_command(&mut self, timeout: Duration) -> anyhow::Result<Option<Command>>;
}

impl<T: InputSource + ?Sized> InputSource for &mut T {
    fn next_command(&mut self, timeout: Duration) -> anyhow::Result<Option<Command>> {
        (**self).next_command(timeout)
    }
}

pub fn command_for_key(ev: &KeyEvent) -> Option<Command> {
    if is_ctrl_c(ev) {
        return Some(Command::Quit);
    }

    match ev.code {
        KeyCode::Char('w') | KeyCode::Up => Some(Command::Turn(Up)),
        KeyCode::Char('a') | KeyCode::Left => Some(Command::Turn(Left)),
        KeyCode::Char('s') | KeyCode::Down => Some(Command::Turn(Down)),
        KeyCode::Char('d') | KeyCode::Right => Some(Command::Turn(Right)),
        KeyCode::Enter => Some(Command::Restart),
        KeyCode::Esc => Some(Command::Quit),
        _ => None,
    }
}

fn is_ctrl_c(ev: &KeyEvent) -> bool {
    matches!(ev, KeyEvent { code: KeyCode::Char('c'), modifiers: KeyModifiers::CONTROL })
}
