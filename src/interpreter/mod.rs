//! Grid language execution engine
//!
//! This module provides the core execution logic:
//! - [`engine`]: the [`engine::Engine`] with its dispatcher and step driver
//! - [`instruction`]: decoding cells into tagged instructions
//! - [`state`]: program counter, direction and run state
//! - [`io`]: input, output and diagnostic collaborators
//! - [`errors`]: runtime error types
//!
//! # Execution Model
//!
//! The engine never runs on its own. A scheduler (a key press, a timer, or a
//! headless loop) calls [`engine::Engine::step`], which executes the cell
//! under the program counter and then moves one cell in the current direction,
//! wrapping at every edge. Entering a cell with a breakpoint pauses the engine
//! until the scheduler calls `resume`.
//!
//! ```text
//! Running ──step──▶ Running
//!    │  └─breakpoint─▶ Paused ──resume──▶ Running
//!    ├─needs input──▶ AwaitingInput ──supply_input──▶ Running
//!    └─@ or fault───▶ Halted
//! ```

pub mod constants;
pub mod engine;
pub mod errors;
pub mod instruction;
pub mod io;
pub mod state;
