use std::time::Duration;

use rand::Rng;

use crate::config::GameConfig;
use crate::food::Food;
use crate::snake::{Direction, MoveResult, Snake};
use crate::Coords;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Phase {
    Running,
    Terminal,
}

/// What the renderer gets to see of a game.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame<'a> {
    pub size: crate::GridInt,
    pub body: &'a [Coords],
    pub food: Coords,
    pub score: u32,
    pub terminal: bool,
}

pub struct GameState<R = rand::rngs::ThreadRng> {
    config: GameConfig,
    rng: R,
    snake: Snake,
    food: Food,
    score: u32,
    tick_rate_hz: f64,
    phase: Phase,
}

impl<R: Rng> GameState<R> {
    pub fn new(config: GameConfig, mut rng: R) -> Self {
        let snake = Snake::new(config.start);
        let food = Food::new(config.size, &mut rng);
        let tick_rate_hz = config.initial_rate_hz;

        GameState { config, rng, snake, food, score: 0, tick_rate_hz, phase: Phase::Running }
    }

    pub fn restart(&mut self) {
        self.snake = Snake::new(self.config.start);
        self.food = Food::new(self.config.size, &mut self.rng);
        self.score = 0;
        self.tick_rate_hz = self.config.initial_rate_hz;
        self.phase = Phase::Running;

        tracing::info!(food = ?self.food.position(), "game restarted");
    }

    pub fn turn(&mut self, dir: Direction) {
        if self.phase == Phase::Running {
            self.snake.set_heading(dir);
        }
    }

    pub fn tick(&mut self) -> MoveResult {
        if self.phase == Phase::Terminal {
            return MoveResult::Idle;
        }

        let res = self.snake.step(&self.food, self.config.size);

        match res {
            MoveResult::Ate { new_head } => {
                self.food.reposition(&mut self.rng);
                self.score += 1;
                self.tick_rate_hz += self.config.rate_increment_hz;
                tracing::debug!(
                    score = self.score,
                    rate_hz = self.tick_rate_hz,
                    head = ?new_head,
                    food = ?self.food.position(),
                    "food eaten"
                );
            },
            MoveResult::Crashed { new_head } => {
                self.phase = Phase::Terminal;
                tracing::info!(score = self.score, at = ?new_head, length = self.snake.body().len(), "game over");
            },
            MoveResult::Moved { new_head } => tracing::trace!(head = ?new_head, "moved"),
            MoveResult::Idle => {},
        }

        res
    }

    pub fn tick_interval(&self) -> Duration {
        GameConfig::tick_interval(self.tick_rate_hz)
    }

    pub fn frame(&self) -> Frame<'_> {
        Frame {
            size: self.config.size,
            body: self.snake.body(),
            food: self.food.position(),
            score: self.score,
            terminal: self.is_terminal(),
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.phase == Phase::Terminal
    }

    #[cfg(test)]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    #[cfg(test)]
    pub fn tick_rate_hz(&self) -> f64 {
        self.tick_rate_hz
    }

    #[cfg(test)]
    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    #[cfg(test)]
    pub fn food(&self) -> &Food {
        &self.food
    }

    #[cfg(test)]
    pub fn place(&mut self, snake: Snake, food: Food) {
        self.snake = snake;
        self.food = food;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snake::Direction::*;
    use rand::{rngs::StdRng, SeedableRng};

    const EPS: f64 = 1e-9;

    fn new_game() -> GameState<StdRng> {
        GameState::new(GameConfig::default(), StdRng::seed_from_u64(42))
    }

    #[test]
    fn starts_running_with_one_segment() {
        let game = new_game();
        assert_eq!(game.phase(), Phase::Running);
        assert_eq!(game.score(), 0);
        assert_eq!(game.snake().body(), &[(10, 10)]);
        assert_eq!(game.snake().heading(), None);
        assert!((game.tick_rate_hz() - 5.0).abs() < EPS);
    }

    #[test]
    fn first_tick_to_the_right() {
        let mut game = new_game();
        game.place(Snake::new((10, 10)), Food::at((11, 10), 30));
        game.turn(Right);

        game.tick();
        assert_eq!(game.snake().head(), (11, 10));
        assert_eq!(game.snake().body().len(), 2);
        assert!(!game.is_terminal());
    }

    #[test]
    fn ticks_before_any_input_do_nothing() {
        let mut game = new_game();
        for _ in 0..10 {
            assert_eq!(game.tick(), MoveResult::Idle);
        }
        assert_eq!(game.snake().body(), &[(10, 10)]);
        assert_eq!(game.score(), 0);
    }

    #[test]
    fn every_meal_adds_one_point_and_a_tenth_hertz() {
        let config = GameConfig { size: 200, ..GameConfig::default() };
        let mut game = GameState::new(config, StdRng::seed_from_u64(42));

        // Zigzag downwards, eating on every vertical step
        for meal in 1..=40u32 {
            let head = game.snake().head();
            game.place(game.snake().clone(), Food::at((head.0, head.1 + 1), 200));
            game.turn(Down);

            let before = game.snake().body().len();
            assert!(matches!(game.tick(), MoveResult::Ate { .. }));

            assert_eq!(game.score(), meal);
            assert_eq!(game.snake().body().len(), before + 1);
            assert!((game.tick_rate_hz() - (5.0 + 0.1 * meal as f64)).abs() < EPS);

            game.place(game.snake().clone(), Food::at((0, 0), 200));
            game.turn(if meal % 2 == 0 { Right } else { Left });
            assert!(matches!(game.tick(), MoveResult::Moved { .. }));
        }
    }

    #[test]
    fn eaten_food_moves_within_inner_range() {
        let mut game = new_game();
        game.place(Snake::new((10, 10)), Food::at((11, 10), 30));
        game.turn(Right);
        game.tick();

        let (x, y) = game.food().position();
        assert!((1..=28).contains(&x));
        assert!((1..=28).contains(&y));
    }

    #[test]
    fn plain_ticks_keep_length() {
        let mut game = new_game();
        game.place(Snake::from_body(vec![(5, 5), (6, 5), (7, 5)], Some(Right)), Food::at((1, 1), 30));

        for _ in 0..5 {
            let before = game.snake().body().len();
            assert!(matches!(game.tick(), MoveResult::Moved { .. }));
            assert_eq!(game.snake().body().len(), before);
        }
        assert_eq!(game.score(), 0);
    }

    #[test]
    fn interval_follows_rate() {
        let mut game = new_game();
        assert_eq!(game.tick_interval(), std::time::Duration::from_millis(200));

        game.place(Snake::new((10, 10)), Food::at((11, 10), 30));
        game.turn(Right);
        game.tick();
        assert!(game.tick_interval() < std::time::Duration::from_millis(200));
    }

    #[test]
    fn wall_ends_the_game() {
        let mut game = new_game();
        game.place(Snake::from_body(vec![(0, 5)], Some(Left)), Food::at((3, 3), 30));

        assert!(matches!(game.tick(), MoveResult::Crashed { .. }));
        assert_eq!(game.phase(), Phase::Terminal);
        assert!(game.frame().terminal);
    }

    #[test]
    fn terminal_state_freezes_simulation() {
        let mut game = new_game();
        game.place(Snake::from_body(vec![(5, 5), (6, 5), (7, 5)], Some(Left)), Food::at((3, 3), 30));
        game.tick();
        assert!(game.is_terminal());

        let body = game.snake().body().to_vec();
        game.turn(Up);
        assert_eq!(game.tick(), MoveResult::Idle);
        assert_eq!(game.snake().body(), &body[..]);
        assert_eq!(game.snake().heading(), Some(Left));
    }

    #[test]
    fn restart_resets_everything() {
        let mut game = new_game();
        game.place(Snake::new((10, 10)), Food::at((11, 10), 30));
        game.turn(Right);
        game.tick();
        game.turn(Up);
        for _ in 0..20 {
            game.tick();
        }
        assert!(game.is_terminal());
        assert_eq!(game.score(), 1);

        game.restart();
        assert_eq!(game.phase(), Phase::Running);
        assert_eq!(game.score(), 0);
        assert!((game.tick_rate_hz() - 5.0).abs() < EPS);
        assert_eq!(game.snake().body(), &[(10, 10)]);
        assert_eq!(game.snake().heading(), None);
    }

    #[test]
    fn frame_exposes_render_inputs() {
        let mut game = new_game();
        game.place(Snake::from_body(vec![(5, 5), (6, 5)], Some(Right)), Food::at((9, 9), 30));

        let frame = game.frame();
        assert_eq!(frame.size, 30);
        assert_eq!(frame.body, &[(5, 5), (6, 5)]);
        assert_eq!(frame.food, (9, 9));
        assert_eq!(frame.score, 0);
        assert!(!frame.terminal);
    }
}
