//! Program memory for the execution engine
//!
//! This module provides the two stores the engine operates on:
//! - [`grid`]: the toroidal playfield of [`grid::Cell`]s
//! - [`stack`]: the value stack of signed 64-bit integers
//!
//! # Wraparound
//!
//! Coordinates are never allowed outside the grid. Any out-of-range value is
//! folded back with [`wrap`], so moving off the right edge re-enters on the
//! left, and so on for every edge.
//!
//! ```text
//! wrap(-1, n) == n - 1
//! wrap(n, n)  == 0
//! ```

pub mod grid;
pub mod stack;

use std::fmt;

/// Fold `value` into `[0, size)`.
///
/// `size` must be at least 1; [`grid::Grid`] never reports a zero dimension.
pub fn wrap(value: i64, size: usize) -> usize {
    value.rem_euclid(size as i64) as usize
}

/// A cell coordinate inside a grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Position {
    pub x: usize,
    pub y: usize,
}

impl Position {
    pub const ORIGIN: Position = Position { x: 0, y: 0 };

    pub fn new(x: usize, y: usize) -> Self {
        Position { x, y }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn wrap_folds_edges() {
        assert_eq!(wrap(-1, 80), 79);
        assert_eq!(wrap(80, 80), 0);
        assert_eq!(wrap(0, 1), 0);
        assert_eq!(wrap(-161, 80), 79);
    }

    proptest! {
        #[test]
        fn wrap_always_lands_in_range(value in any::<i64>(), size in 1usize..10_000) {
            let wrapped = wrap(value, size);
            prop_assert!(wrapped < size);
        }

        #[test]
        fn wrap_matches_double_modulo(value in -1_000_000i64..1_000_000, size in 1usize..500) {
            let n = size as i64;
            prop_assert_eq!(wrap(value, size) as i64, ((value % n) + n) % n);
        }
    }
}
