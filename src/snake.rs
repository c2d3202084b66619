use crate::food::Food;
use crate::{Coords, GridInt};
use Direction::*;
use MoveResult::*;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right
}

impl Direction {
    pub fn opposite(self) -> Direction {
        match self {
            Up => Down,
            Down => Up,
            Left => Right,
            Right => Left,
        }
    }

    pub fn delta(self) -> Coords {
        match self {
            Up => (0, -1),
            Down => (0, 1),
            Left => (-1, 0),
            Right => (1, 0),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum MoveResult {
    /// No heading yet, nothing moved.
    Idle,
    Moved { new_head: Coords },
    Ate { new_head: Coords },
    Crashed { new_head: Coords },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snake {
    // Oldest segment first, head last
    body: Vec<Coords>,
    heading: Option<Direction>,
}

impl Snake {
    pub fn new(pos: Coords) -> Self {
        Snake { body: vec![pos], heading: None }
    }

    #[cfg(test)]
    pub fn from_body(body: Vec<Coords>, heading: Option<Direction>) -> Self {
        assert!(!body.is_empty(), "a snake needs at least one segment");
        Snake { body, heading }
    }

    pub fn body(&self) -> &[Coords] {
        &self.body
    }

    pub fn head(&self) -> Coords {
        self.body[self.body.len() - 1]
    }

    #[cfg(test)]
    pub fn heading(&self) -> Option<Direction> {
        self.heading
    }

    /// Reversing straight into the neck is ignored. Only the current heading
    /// is checked, so two quick turns between ticks can still reverse.
    pub fn set_heading(&mut self, requested: Direction) {
        match self.heading {
            Some(current) if current.opposite() == requested => {},
            _ => self.heading = Some(requested),
        }
    }

    pub fn step(&mut self, food: &Food, size: GridInt) -> MoveResult {
        let (dx, dy) = match self.heading {
            Some(dir) => dir.delta(),
            None => return Idle,
        };

        let head = self.head();
        let new_head = (head.0 + dx, head.1 + dy);

        // Every segment but the head counts, including the tail that may be dropped
        let neck = &self.body[..self.body.len() - 1];
        let out_of_bounds = new_head.0 < 0 || new_head.1 < 0 || new_head.0 > size - 1 || new_head.1 > size - 1;

        if out_of_bounds || neck.contains(&new_head) {
            return Crashed { new_head };
        }

        let result = if new_head == food.position() {
            Ate { new_head }
        } else {
            self.body.remove(0);
            Moved { new_head }
        };

        self.body.push(new_head);
        result
    }
}
