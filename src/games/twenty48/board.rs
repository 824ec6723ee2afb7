//! 4×4 tile grid and the slide-and-merge transform.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::GameRng;

/// Side length of the grid.
pub const SIZE: usize = 4;

/// Raw tile matrix; `0` is an empty cell.
pub type Tiles = [[u32; SIZE]; SIZE];

/// Slide direction.
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
}

/// What a slide did to the board.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MoveOutcome {
    /// Some tile changed value or position.
    pub changed: bool,
    /// Sum of the tiles produced by merges.
    pub gained: u32,
}

/// True if two tiles merge: equal, non-empty, and the doubled value fits.
#[must_use]
pub fn can_merge(a: u32, b: u32) -> bool {
    a != 0 && a == b && a.checked_mul(2).is_some()
}

/// Slide one line towards index 0, merging each equal pair at most once.
///
/// Returns the new line and the points gained. Tiles whose double would not
/// fit in a `u32` never merge.
///
/// ```
/// use arcade_core::games::twenty48::slide_row;
///
/// assert_eq!(slide_row([2, 2, 2, 2]), ([4, 4, 0, 0], 8));
/// assert_eq!(slide_row([0, 4, 0, 4]), ([8, 0, 0, 0], 8));
/// ```
#[must_use]
pub fn slide_row(line: [u32; SIZE]) -> ([u32; SIZE], u32) {
    let tiles: SmallVec<[u32; SIZE]> = line.into_iter().filter(|&v| v != 0).collect();

    let mut merged: SmallVec<[u32; SIZE]> = SmallVec::new();
    let mut gained: u32 = 0;
    let mut i = 0;
    while i < tiles.len() {
        if i + 1 < tiles.len() && can_merge(tiles[i], tiles[i + 1]) {
            let value = tiles[i] << 1;
            merged.push(value);
            gained = gained.saturating_add(value);
            i += 2;
        } else {
            merged.push(tiles[i]);
            i += 1;
        }
    }

    let mut out = [0; SIZE];
    out[..merged.len()].copy_from_slice(&merged);
    (out, gained)
}

/// The 2048 grid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    tiles: Tiles,
}

impl Board {
    #[must_use]
    pub fn from_rows(tiles: Tiles) -> Self {
        Self { tiles }
    }

    #[must_use]
    pub fn rows(&self) -> &Tiles {
        &self.tiles
    }

    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> Option<u32> {
        self.tiles.get(row)?.get(col).copied()
    }

    /// Empty cells in row-major order.
    #[must_use]
    pub fn empty_cells(&self) -> SmallVec<[(usize, usize); SIZE * SIZE]> {
        (0..SIZE)
            .flat_map(|r| (0..SIZE).map(move |c| (r, c)))
            .filter(|&(r, c)| self.tiles[r][c] == 0)
            .collect()
    }

    #[must_use]
    pub fn max_tile(&self) -> u32 {
        self.tiles.iter().flatten().copied().max().unwrap_or(0)
    }

    /// True if some slide would change the board: an empty cell exists or
    /// two neighbours in a row or column can merge.
    #[must_use]
    pub fn has_moves(&self) -> bool {
        let t = &self.tiles;
        (0..SIZE).any(|r| {
            (0..SIZE).any(|c| {
                t[r][c] == 0
                    || (c + 1 < SIZE && can_merge(t[r][c], t[r][c + 1]))
                    || (r + 1 < SIZE && can_merge(t[r][c], t[r + 1][c]))
            })
        })
    }

    /// Put a 2 (or a 4 with `four_probability`) on a random empty cell.
    ///
    /// Returns the placed tile, or `None` if the board is full.
    pub fn add_random_tile(
        &mut self,
        rng: &mut GameRng,
        four_probability: f64,
    ) -> Option<(usize, usize, u32)> {
        let empty = self.empty_cells();
        let &(row, col) = rng.choose(&empty)?;
        let value = if rng.gen_bool(four_probability) { 4 } else { 2 };
        self.tiles[row][col] = value;
        Some((row, col, value))
    }

    /// Slide every line in `direction`.
    ///
    /// Right, up and down reuse the leftward primitive by reversing the row
    /// or reading the column.
    pub fn slide(&mut self, direction: Direction) -> MoveOutcome {
        let before = self.tiles;
        let mut gained: u32 = 0;

        for i in 0..SIZE {
            let line = self.read_line(direction, i);
            let (slid, points) = slide_row(line);
            gained = gained.saturating_add(points);
            self.write_line(direction, i, slid);
        }

        MoveOutcome {
            changed: self.tiles != before,
            gained,
        }
    }

    // Line `i` ordered so that index 0 is the edge tiles slide towards.
    fn read_line(&self, direction: Direction, i: usize) -> [u32; SIZE] {
        let t = &self.tiles;
        match direction {
            Direction::Left => t[i],
            Direction::Right => {
                let mut line = t[i];
                line.reverse();
                line
            }
            Direction::Up => std::array::from_fn(|k| t[k][i]),
            Direction::Down => std::array::from_fn(|k| t[SIZE - 1 - k][i]),
        }
    }

    fn write_line(&mut self, direction: Direction, i: usize, line: [u32; SIZE]) {
        for (k, value) in line.into_iter().enumerate() {
            match direction {
                Direction::Left => self.tiles[i][k] = value,
                Direction::Right => self.tiles[i][SIZE - 1 - k] = value,
                Direction::Up => self.tiles[k][i] = value,
                Direction::Down => self.tiles[SIZE - 1 - k][i] = value,
            }
        }
    }
}
