use rand::Rng;

use crate::{Coords, GridInt};

/// A single food item. It is moved around when eaten, never recreated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Food {
    position: Coords,
    size: GridInt,
}

impl Food {
    pub fn new<R: Rng + ?Sized>(size: GridInt, rng: &mut R) -> Self {
        let mut food = Food { position: (1, 1), size };
        food.reposition(rng);
        food
    }

    #[cfg(test)]
    pub fn at(position: Coords, size: GridInt) -> Self {
        Food { position, size }
    }

    pub fn position(&self) -> Coords {
        self.position
    }

    /// Picks a new cell in `[1, size - 2]` on both axes. The outer ring is
    /// never used. Cells under the snake are not avoided.
    pub fn reposition<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let range = 1..=self.size - 2;
        self.position = (rng.gen_range(range.clone()), rng.gen_range(range));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn stays_off_the_outer_ring() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut food = Food::new(30, &mut rng);

        for _ in 0..2000 {
            food.reposition(&mut rng);
            let (x, y) = food.position();
            assert!((1..=28).contains(&x), "x = {}", x);
            assert!((1..=28).contains(&y), "y = {}", y);
        }
    }

    #[test]
    fn covers_the_whole_inner_range() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut food = Food::new(5, &mut rng);
        let mut seen = std::collections::HashSet::new();

        for _ in 0..500 {
            food.reposition(&mut rng);
            seen.insert(food.position());
        }

        // 3x3 inner square of a 5x5 grid
        assert_eq!(seen.len(), 9);
    }

    #[test]
    fn smallest_grid_has_one_spot() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut food = Food::new(3, &mut rng);
        assert_eq!(food.position(), (1, 1));

        food.reposition(&mut rng);
        assert_eq!(food.position(), (1, 1));
    }
}
