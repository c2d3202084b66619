use crate::input::{command_for_key, Command, InputSource};
use crate::state::Frame;
use crate::{Coords, GridInt, TermInt};
use std::{convert::TryFrom, io::{Stdout, Write, stdout}, time::Duration};

use anyhow::{bail, Context};
use crossterm::{cursor, execute, queue, style, terminal};
use crossterm::terminal::{ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::event::{Event, read, poll};

// Every grid cell is two terminal columns wide so the board looks square
const CELL_WIDTH: TermInt = 2;
const EMPTY_CELL: &str = "  ";
const SNAKE_CELL: &str = "██";
const FOOD_CELL: &str = "()";

// Row 0 holds the score, the bordered playfield starts below it
const BOARD_TOP: TermInt = 1;

/// Draws whatever the driver wants to show. Nothing flows back into the game.
pub trait Renderer {
    fn draw_frame(&mut self, frame: &Frame) -> anyhow::Result<()>;
    fn draw_game_over(&mut self, score: u32) -> anyhow::Result<()>;
}

impl<T: Renderer + ?Sized> Renderer for &mut T {
    fn draw_frame(&mut self, frame: &Frame) -> anyhow::Result<()> {
        (**self).draw_frame(frame)
    }

    fn draw_game_over(&mut self, score: u32) -> anyhow::Result<()> {
        (**self).draw_game_over(score)
    }
}

pub struct TermManager {
    width: TermInt,
    height: TermInt,
    stdout: Stdout,
    grid_size: GridInt,
    // Set while the game over box is up, so the next frame repaints from scratch
    showing_message: bool,
}

impl TermManager {
    pub fn new() -> anyhow::Result<Self> {
        let (width, height) = terminal::size().context("reading terminal size")?;
        Ok(TermManager { width, height, stdout: stdout(), grid_size: 0, showing_message: false })
    }

    pub fn setup(&mut self) -> anyhow::Result<()> {
        execute!(self.stdout, EnterAlternateScreen).context("entering alternate screen")?;
        terminal::enable_raw_mode().context("enabling raw mode")?;
        execute!(self.stdout, cursor::Hide, cursor::DisableBlinking).context("hiding cursor")?;
        Ok(())
    }

    pub fn restore(&mut self) -> anyhow::Result<()> {
        terminal::disable_raw_mode().context("disabling raw mode")?;
        execute!(self.stdout, cursor::Show, cursor::EnableBlinking).context("showing cursor")?;
        execute!(self.stdout, LeaveAlternateScreen).context("leaving alternate screen")?;
        Ok(())
    }

    /// Checks that a `size` x `size` board plus its border and score line,
    /// and the game over box drawn over it, fit on screen. Draws the empty
    /// board.
    pub fn fit_grid(&mut self, size: GridInt) -> anyhow::Result<()> {
        let (need_w, need_h) = screen_extent(size);

        if self.width < need_w || self.height < need_h {
            bail!(
                "terminal is {}x{}, a {}x{} board needs at least {}x{}",
                self.width, self.height, size, size, need_w, need_h
            );
        }

        self.grid_size = size;
        self.repaint_board()
    }

    fn repaint_board(&mut self) -> anyhow::Result<()> {
        self.clear()?;
        let (w, h) = board_extent(self.grid_size);
        self.draw_borders((0, BOARD_TOP), (w, h - BOARD_TOP))?;
        self.showing_message = false;
        Ok(())
    }

    fn draw_borders(&mut self, top_left: (TermInt, TermInt), (width, height): (TermInt, TermInt)) -> anyhow::Result<()> {
        let (left, top) = top_left;
        let end_x = left + width - 1;
        let end_y = top + height - 1;

        for x in left..=end_x {
            let ch = if x == left || x == end_x {'+'} else {'-'};
            self.print_at((x, top), ch)?;
            self.print_at((x, end_y), ch)?;
        }

        for y in top + 1..end_y {
            self.print_at((left, y), '|')?;
            self.print_at((end_x, y), '|')?;
        }

        self.flush()
    }

    fn show_message(&mut self, lines: &[String]) -> anyhow::Result<()> {
        let (top_left, (msg_width, msg_height)) = message_rect(self.grid_size, lines);

        let blank = " ".repeat(msg_width as usize);
        self.print_str_at((top_left.0, top_left.1), &blank)?;
        self.print_str_at((top_left.0, top_left.1 + msg_height - 1), &blank)?;

        for (i, line) in lines.iter().enumerate() {
            let padded_line = format!("{line: ^width$}", line = line, width = msg_width as usize);
            self.print_str_at((top_left.0, top_left.1 + i as TermInt + 1), &padded_line)?;
        }

        self.showing_message = true;
        self.flush()
    }

    fn print_at(&mut self, pos: (TermInt, TermInt), ch: char) -> anyhow::Result<()> {
        queue!(self.stdout, cursor::MoveTo(pos.0, pos.1), style::Print(ch)).context("writing to terminal")?;
        Ok(())
    }

    fn print_str_at(&mut self, pos: (TermInt, TermInt), s: &str) -> anyhow::Result<()> {
        queue!(self.stdout, cursor::MoveTo(pos.0, pos.1), style::Print(s)).context("writing to terminal")?;
        Ok(())
    }

    fn clear(&mut self) -> anyhow::Result<()> {
        execute!(self.stdout, terminal::Clear(ClearType::All)).context("clearing terminal")?;
        Ok(())
    }

    fn flush(&mut self) -> anyhow::Result<()> {
        self.stdout.flush().context("flushing terminal")?;
        Ok(())
    }
}

impl Renderer for TermManager {
    fn draw_frame(&mut self, frame: &Frame) -> anyhow::Result<()> {
        if self.showing_message || frame.size != self.grid_size {
            self.grid_size = frame.size;
            self.repaint_board()?;
        }

        let rows = board_rows(frame);
        for (y, row) in rows.iter().enumerate() {
            self.print_str_at((1, BOARD_TOP + 1 + y as TermInt), row)?;
        }

        self.print_str_at((0, 0), &format!("Score: {:<8}", frame.score))?;
        self.flush()
    }

    fn draw_game_over(&mut self, score: u32) -> anyhow::Result<()> {
        if self.showing_message {
            return Ok(());
        }

        self.show_message(&game_over_lines(score))
    }
}

impl InputSource for TermManager {
    fn next_command(&mut self, timeout: Duration) -> anyhow::Result<Option<Command>> {
        if !poll(timeout).context("polling terminal events")? {
            return Ok(None);
        }

        match read().context("reading terminal event")? {
            Event::Key(ev) => Ok(command_for_key(&ev)),
            _ => Ok(None),
        }
    }
}

/// Terminal columns and rows taken by the score line plus the bordered board.
fn board_extent(size: GridInt) -> (TermInt, TermInt) {
    let size = TermInt::try_from(size).unwrap_or(TermInt::MAX);
    (size.saturating_mul(CELL_WIDTH).saturating_add(2), size.saturating_add(BOARD_TOP + 2))
}

/// Columns and rows the whole screen needs: the board, and the game over
/// box for the widest score it can show.
fn screen_extent(size: GridInt) -> (TermInt, TermInt) {
    let (board_w, board_h) = board_extent(size);
    let ((left, top), (msg_w, msg_h)) = message_rect(size, &game_over_lines(u32::MAX));
    (board_w.max(left.saturating_add(msg_w)), board_h.max(top.saturating_add(msg_h)))
}

fn game_over_lines(score: u32) -> Vec<String> {
    vec![
        "GAME OVER".to_string(),
        format!("Score: {}", score),
        String::new(),
        "Press Enter to restart,".to_string(),
        "or Esc to quit.".to_string(),
    ]
}

/// Top-left corner and size of a message box centred on the board, with a
/// blank line above and below the text.
fn message_rect(size: GridInt, lines: &[String]) -> ((TermInt, TermInt), (TermInt, TermInt)) {
    let (board_w, board_h) = board_extent(size);
    let msg_height = (lines.len() + 2) as TermInt;
    let msg_width = (lines.iter().map(|x| x.chars().count()).max().unwrap_or(0) + 2) as TermInt;
    let center = (board_w / 2, BOARD_TOP + (board_h - BOARD_TOP) / 2);
    let top_left = (center.0.saturating_sub(msg_width / 2), center.1.saturating_sub(msg_height / 2));

    (top_left, (msg_width, msg_height))
}

/// One string per grid row. Food is painted over the snake.
fn board_rows(frame: &Frame) -> Vec<String> {
    let size = frame.size as usize;
    let mut cells = vec![EMPTY_CELL; size * size];
    let mut paint = |(x, y): Coords, cell: &'static str| {
        debug_assert!(
            (0..frame.size).contains(&x) && (0..frame.size).contains(&y),
            "cell {:?} is off the board", (x, y)
        );
        cells[y as usize * size + x as usize] = cell;
    };

    for pos in frame.body {
        paint(*pos, SNAKE_CELL);
    }
    paint(frame.food, FOOD_CELL);

    cells.chunks(size).map(|row| row.concat()).collect()
}
