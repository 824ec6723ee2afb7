//! Snake grid model: body, heading, food and the per-tick transition.

use im::Vector;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::core::GameRng;

/// Grid coordinate. `(0, 0)` is the top-left cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Neighbouring cell one step in `direction`.
    #[must_use]
    pub fn step(self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Self::new(self.x + dx, self.y + dy)
    }

    #[must_use]
    pub fn manhattan(self, other: Position) -> i32 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }
}

impl From<(i32, i32)> for Position {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

/// Heading of the snake.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [Direction::Up, Direction::Down, Direction::Left, Direction::Right];

    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Unit offset; y grows downwards.
    #[must_use]
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }
}

/// Result of one tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum StepOutcome {
    /// Head advanced, tail followed.
    Moved,
    /// Head landed on food; the snake grew by one.
    Ate,
    /// Head left the grid.
    HitWall,
    /// Head ran into the body.
    HitSelf,
    /// Snake grew to cover every cell; no room for food.
    Filled,
    /// Tick arrived while not playing.
    Ignored,
}

impl StepOutcome {
    /// True if this outcome ends the round.
    #[must_use]
    pub fn is_fatal(self) -> bool {
        matches!(self, StepOutcome::HitWall | StepOutcome::HitSelf | StepOutcome::Filled)
    }
}

/// Snake game data.
///
/// The body is stored head-first in a persistent vector so snapshots are
/// O(1) clones.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnakeBoard {
    width: i32,
    height: i32,
    body: Vector<Position>,
    direction: Direction,
    next_direction: Direction,
    food: Option<Position>,
}

/// Segments in a freshly created snake.
pub const INITIAL_LENGTH: i32 = 3;

impl SnakeBoard {
    /// Fresh board: three segments centred on the grid facing right, one food.
    pub fn new(width: i32, height: i32, rng: &mut GameRng) -> Self {
        let origin = Position::new(width / 2, height / 2);
        let body = (0..INITIAL_LENGTH)
            .map(|i| Position::new(origin.x - i, origin.y))
            .collect();
        let mut board = Self {
            width,
            height,
            body,
            direction: Direction::Right,
            next_direction: Direction::Right,
            food: None,
        };
        board.food = board.spawn_food(rng);
        board
    }

    /// Board with an explicit body (head first), heading and food.
    ///
    /// Returns `None` if the body is empty, any part lies off the grid, two
    /// segments share a cell, or the food sits on the body.
    pub fn from_parts(
        width: i32,
        height: i32,
        body: impl IntoIterator<Item = Position>,
        direction: Direction,
        food: Option<Position>,
    ) -> Option<Self> {
        let body: Vector<Position> = body.into_iter().collect();
        let board = Self {
            width,
            height,
            body,
            direction,
            next_direction: direction,
            food,
        };
        let on_grid = board.body.iter().chain(board.food.iter()).all(|&p| board.in_bounds(p));
        let mut seen = FxHashSet::default();
        let distinct = board.body.iter().all(|&p| seen.insert(p));
        let food_free = board.food.map_or(true, |f| !seen.contains(&f));
        (!board.body.is_empty() && on_grid && distinct && food_free).then_some(board)
    }

    #[must_use]
    pub fn width(&self) -> i32 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> i32 {
        self.height
    }

    /// Body segments, head first.
    #[must_use]
    pub fn body(&self) -> &Vector<Position> {
        &self.body
    }

    #[must_use]
    pub fn head(&self) -> Position {
        self.body.front().copied().unwrap_or_default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.body.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Committed heading.
    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Heading that the next tick will commit.
    #[must_use]
    pub fn next_direction(&self) -> Direction {
        self.next_direction
    }

    #[must_use]
    pub fn food(&self) -> Option<Position> {
        self.food
    }

    #[must_use]
    pub fn in_bounds(&self, p: Position) -> bool {
        (0..self.width).contains(&p.x) && (0..self.height).contains(&p.y)
    }

    #[must_use]
    pub fn occupies(&self, p: Position) -> bool {
        self.body.iter().any(|&segment| segment == p)
    }

    fn cell_count(&self) -> usize {
        (self.width.max(0) as usize) * (self.height.max(0) as usize)
    }

    /// Buffer a turn for the next tick.
    ///
    /// Reversing the committed heading is rejected; the check is against the
    /// committed heading, not the buffered one, so at most one turn per tick
    /// takes effect.
    pub fn turn(&mut self, direction: Direction) -> bool {
        if direction == self.direction.opposite() {
            return false;
        }
        self.next_direction = direction;
        true
    }

    /// Pick an empty cell uniformly at random.
    ///
    /// Samples by rejection against the body; once the body covers most of
    /// the grid it falls back to choosing among the free cells directly.
    pub fn spawn_food(&self, rng: &mut GameRng) -> Option<Position> {
        let cells = self.cell_count();
        if self.body.len() >= cells {
            return None;
        }

        if self.body.len() * 2 <= cells {
            loop {
                let candidate = self.random_cell(rng);
                if !self.occupies(candidate) {
                    return Some(candidate);
                }
            }
        }

        let free: Vec<Position> = (0..self.height)
            .flat_map(|y| (0..self.width).map(move |x| Position::new(x, y)))
            .filter(|&p| !self.occupies(p))
            .collect();
        rng.choose(&free).copied()
    }

    fn random_cell(&self, rng: &mut GameRng) -> Position {
        let x = rng.gen_range_usize(0..self.width as usize) as i32;
        let y = rng.gen_range_usize(0..self.height as usize) as i32;
        Position::new(x, y)
    }

    /// Advance one tick.
    ///
    /// Commits the buffered heading, then checks the wall, then the body,
    /// then grows onto food or drops the tail. A fatal outcome leaves the
    /// body untouched.
    pub fn advance(&mut self, rng: &mut GameRng) -> StepOutcome {
        self.direction = self.next_direction;
        let head = self.head().step(self.direction);

        if !self.in_bounds(head) {
            return StepOutcome::HitWall;
        }
        if self.occupies(head) {
            return StepOutcome::HitSelf;
        }

        self.body.push_front(head);
        if self.food == Some(head) {
            self.food = self.spawn_food(rng);
            if self.food.is_none() {
                return StepOutcome::Filled;
            }
            StepOutcome::Ate
        } else {
            self.body.pop_back();
            StepOutcome::Moved
        }
    }
}
