//! 9×9 grid model and the Sudoku placement rule.

use serde::{Deserialize, Serialize};

/// Side length of the grid.
pub const SIZE: usize = 9;

/// Side length of a box.
pub const BOX: usize = 3;

/// Plain digit matrix; `0` is an empty cell.
pub type Digits = [[u8; SIZE]; SIZE];

/// Pencil marks for a cell, one bit per digit (bits 1..=9).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NoteMask(u16);

impl NoteMask {
    const VALID: u16 = 0b11_1111_1110;

    #[must_use]
    pub const fn empty() -> Self {
        Self(0)
    }

    fn bit(digit: u8) -> u16 {
        if (1..=9).contains(&digit) {
            1 << digit
        } else {
            0
        }
    }

    #[must_use]
    pub fn contains(self, digit: u8) -> bool {
        self.0 & Self::bit(digit) != 0
    }

    /// Flip membership of `digit`. Returns whether it is now present.
    pub fn toggle(&mut self, digit: u8) -> bool {
        self.0 ^= Self::bit(digit);
        self.contains(digit)
    }

    pub fn insert(&mut self, digit: u8) {
        self.0 |= Self::bit(digit);
    }

    pub fn remove(&mut self, digit: u8) {
        self.0 &= !Self::bit(digit);
    }

    pub fn clear(&mut self) {
        self.0 = 0;
    }

    #[must_use]
    pub fn is_empty(self) -> bool {
        self.0 & Self::VALID == 0
    }

    #[must_use]
    pub fn len(self) -> usize {
        (self.0 & Self::VALID).count_ones() as usize
    }

    /// Marked digits in ascending order.
    pub fn iter(self) -> impl Iterator<Item = u8> {
        (1..=9u8).filter(move |&d| self.contains(d))
    }

    /// Raw bitmask.
    #[must_use]
    pub fn bits(self) -> u16 {
        self.0
    }
}

impl FromIterator<u8> for NoteMask {
    fn from_iter<I: IntoIterator<Item = u8>>(iter: I) -> Self {
        let mut mask = Self::empty();
        for d in iter {
            mask.insert(d);
        }
        mask
    }
}

/// One cell of the playing grid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    /// Digit 1..=9, or 0 when empty.
    pub value: u8,
    /// Revealed given; never rewritten.
    pub is_fixed: bool,
    /// Value disagrees with the solution.
    pub is_error: bool,
    pub notes: NoteMask,
}

impl Cell {
    #[must_use]
    pub fn given(value: u8) -> Self {
        Self {
            value,
            is_fixed: true,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.value == 0
    }
}

/// The playing grid.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    cells: [[Cell; SIZE]; SIZE],
}

impl Grid {
    /// Grid whose non-zero digits become fixed givens.
    #[must_use]
    pub fn from_givens(givens: &Digits) -> Self {
        let mut grid = Self::default();
        for (row, line) in givens.iter().enumerate() {
            for (col, &value) in line.iter().enumerate() {
                if value != 0 {
                    grid.cells[row][col] = Cell::given(value);
                }
            }
        }
        grid
    }

    #[must_use]
    pub fn cell(&self, row: usize, col: usize) -> Option<&Cell> {
        self.cells.get(row)?.get(col)
    }

    pub fn cell_mut(&mut self, row: usize, col: usize) -> Option<&mut Cell> {
        self.cells.get_mut(row)?.get_mut(col)
    }

    #[must_use]
    pub fn rows(&self) -> &[[Cell; SIZE]; SIZE] {
        &self.cells
    }

    /// Current values as a plain digit matrix.
    #[must_use]
    pub fn digits(&self) -> Digits {
        self.cells.map(|line| line.map(|cell| cell.value))
    }

    /// Number of fixed givens.
    #[must_use]
    pub fn given_count(&self) -> usize {
        self.cells.iter().flatten().filter(|c| c.is_fixed).count()
    }

    /// Coordinates of every empty cell in row-major order.
    pub fn empty_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        coordinates().filter(move |&(r, c)| self.cells[r][c].is_empty())
    }

    /// Sudoku rule check against the current values.
    #[must_use]
    pub fn is_valid_move(&self, row: usize, col: usize, value: u8) -> bool {
        is_placement_valid(&self.digits(), row, col, value)
    }
}

/// Every `(row, col)` in row-major order.
pub fn coordinates() -> impl Iterator<Item = (usize, usize)> {
    (0..SIZE).flat_map(|r| (0..SIZE).map(move |c| (r, c)))
}

/// True iff `value` (1..=9) does not already appear in the row, column or
/// box of `(row, col)`, ignoring the cell itself.
#[must_use]
pub fn is_placement_valid(digits: &Digits, row: usize, col: usize, value: u8) -> bool {
    if row >= SIZE || col >= SIZE || !(1..=9).contains(&value) {
        return false;
    }

    let in_row = (0..SIZE).any(|c| c != col && digits[row][c] == value);
    let in_col = (0..SIZE).any(|r| r != row && digits[r][col] == value);

    let (box_row, box_col) = (row - row % BOX, col - col % BOX);
    let in_box = (box_row..box_row + BOX)
        .flat_map(|r| (box_col..box_col + BOX).map(move |c| (r, c)))
        .any(|(r, c)| (r, c) != (row, col) && digits[r][c] == value);

    !(in_row || in_col || in_box)
}

/// True iff every row, column and box is a permutation of 1..=9.
#[must_use]
pub fn is_solved(digits: &Digits) -> bool {
    const FULL: u16 = 0b11_1111_1110;

    let row_ok = |r: usize| (0..SIZE).fold(0u16, |m, c| m | 1 << digits[r][c]) == FULL;
    let col_ok = |c: usize| (0..SIZE).fold(0u16, |m, r| m | 1 << digits[r][c]) == FULL;
    let box_ok = |b: usize| {
        let (br, bc) = ((b / BOX) * BOX, (b % BOX) * BOX);
        (0..SIZE).fold(0u16, |m, i| m | 1 << digits[br + i / BOX][bc + i % BOX]) == FULL
    };

    digits.iter().flatten().all(|&d| (1..=9).contains(&d))
        && (0..SIZE).all(|i| row_ok(i) && col_ok(i) && box_ok(i))
}
