//! Fixed-size toroidal playfield
//!
//! A [`Grid`] is a dense `width × height` buffer of [`Cell`]s indexed by
//! `y * width + x`. Its dimensions never change after construction; only cell
//! contents and breakpoint flags do. Cloning a grid produces an independent
//! copy, which is how the editor hands a program to a runner without the two
//! sharing state.

use super::{wrap, Position};
use thiserror::Error;

/// Code point of an empty cell (space)
pub const BLANK: i64 = 0x20;

/// Errors raised while building a grid from raw rows
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    /// Either dimension would be zero
    #[error("Grid must be at least 1x1, got {width}x{height}")]
    ZeroSize { width: usize, height: usize },

    /// `width * height` does not fit in memory
    #[error("Grid of {width}x{height} cells is too large")]
    TooLarge { width: usize, height: usize },

    /// A row does not match the width of the first row
    #[error("Line {line} has {found} characters, expected {expected}")]
    Ragged {
        line: usize,
        expected: usize,
        found: usize,
    },
}

/// A single grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    /// Code point stored in the cell (any i64, not necessarily a valid char)
    pub value: i64,
    pub breakpoint: bool,
}

impl Cell {
    pub const BLANK: Cell = Cell {
        value: BLANK,
        breakpoint: false,
    };

    pub fn new(value: i64) -> Self {
        Cell {
            value,
            breakpoint: false,
        }
    }

    /// The character stored in this cell, if the value is a Unicode scalar
    pub fn as_char(&self) -> Option<char> {
        u32::try_from(self.value).ok().and_then(char::from_u32)
    }

    /// The character stored in this cell, or U+FFFD when the value has none
    pub fn glyph(&self) -> char {
        self.as_char().unwrap_or(char::REPLACEMENT_CHARACTER)
    }
}

impl Default for Cell {
    fn default() -> Self {
        Cell::BLANK
    }
}

/// The program grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Create a grid filled with spaces
    pub fn blank(width: usize, height: usize) -> Result<Self, GridError> {
        if width == 0 || height == 0 {
            return Err(GridError::ZeroSize { width, height });
        }
        let too_large = GridError::TooLarge { width, height };
        let len = width.checked_mul(height).ok_or(too_large.clone())?;
        let mut cells = Vec::new();
        cells.try_reserve_exact(len).map_err(|_| too_large)?;
        cells.resize(len, Cell::BLANK);
        Ok(Grid {
            width,
            height,
            cells,
        })
    }

    /// Build a grid from rows of code points. Every row must have the same
    /// length as the first one.
    pub fn from_rows(rows: Vec<Vec<i64>>) -> Result<Self, GridError> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        if width == 0 || height == 0 {
            return Err(GridError::ZeroSize { width, height });
        }

        let mut cells = Vec::with_capacity(width * height);
        for (index, row) in rows.into_iter().enumerate() {
            if row.len() != width {
                return Err(GridError::Ragged {
                    line: index + 1,
                    expected: width,
                    found: row.len(),
                });
            }
            cells.extend(row.into_iter().map(Cell::new));
        }

        Ok(Grid {
            width,
            height,
            cells,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    fn index(&self, pos: Position) -> usize {
        (pos.y % self.height) * self.width + (pos.x % self.width)
    }

    /// Cell at `pos`
    pub fn cell(&self, pos: Position) -> Cell {
        self.cells[self.index(pos)]
    }

    pub fn cell_mut(&mut self, pos: Position) -> &mut Cell {
        let index = self.index(pos);
        &mut self.cells[index]
    }

    /// Fold signed coordinates into a position on this grid: `x` wraps by
    /// width and `y` by height, also for the `g` and `p` operands
    pub fn wrap_position(&self, x: i64, y: i64) -> Position {
        Position::new(wrap(x, self.width), wrap(y, self.height))
    }

    /// Position reached by moving `(dx, dy)` from `pos`, wrapping both axes
    pub fn offset(&self, pos: Position, dx: i64, dy: i64) -> Position {
        self.wrap_position(pos.x as i64 + dx, pos.y as i64 + dy)
    }

    /// Overwrite the code point at `pos`, keeping its breakpoint flag
    pub fn set_value(&mut self, pos: Position, value: i64) {
        self.cell_mut(pos).value = value;
    }

    /// Flip the breakpoint flag at `pos` and return the new value
    pub fn toggle_breakpoint(&mut self, pos: Position) -> bool {
        let cell = self.cell_mut(pos);
        cell.breakpoint = !cell.breakpoint;
        cell.breakpoint
    }

    /// Cells of row `y` (wrapped), left to right
    pub fn row(&self, y: usize) -> &[Cell] {
        let start = (y % self.height) * self.width;
        &self.cells[start..start + self.width]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.width)
    }

    pub fn breakpoint_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.breakpoint).count()
    }
}
