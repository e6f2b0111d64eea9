//! Program counter and run state

use super::io::InputRequest;
use crate::memory::Position;
use rand::distributions::{Distribution, Standard};
use rand::Rng;
use std::fmt;

/// Direction of travel of the program counter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Unit step `(dx, dy)`; y grows downwards
    pub fn delta(self) -> (i64, i64) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    pub fn arrow(self) -> char {
        match self {
            Direction::Up => '↑',
            Direction::Down => '↓',
            Direction::Left => '←',
            Direction::Right => '→',
        }
    }
}

impl Distribution<Direction> for Standard {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Direction {
        Direction::ALL[rng.gen_range(0..Direction::ALL.len())]
    }
}

/// Program counter plus the dispatcher's mode flags
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgramState {
    pub position: Position,
    pub direction: Direction,
    pub string_mode: bool,
    pub skip_next: bool,
    pub halted: bool,
}

impl Default for ProgramState {
    fn default() -> Self {
        ProgramState {
            position: Position::ORIGIN,
            direction: Direction::Right,
            string_mode: false,
            skip_next: false,
            halted: false,
        }
    }
}

/// Step driver state as seen by the scheduler
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Running,
    /// Stopped on a breakpoint; `step()` is a no-op until `resume()`
    Paused,
    /// The current instruction needs input that has not been supplied yet.
    /// Nothing was mutated; the next `step()` retries the same cell.
    AwaitingInput(InputRequest),
    /// Terminal: reached `@` or an arithmetic fault
    Halted,
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunState::Running => write!(f, "running"),
            RunState::Paused => write!(f, "paused"),
            RunState::AwaitingInput(request) => write!(f, "awaiting {}", request),
            RunState::Halted => write!(f, "halted"),
        }
    }
}
