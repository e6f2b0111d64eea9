//! # Introduction
//!
//! Fungetty edits and runs programs written in a two-dimensional stack
//! language. A program is a rectangular grid of cells; a program counter moves
//! across it in one of four directions, wrapping at every edge, and each cell
//! it lands on is executed as a single instruction against a stack of signed
//! integers.
//!
//! ## Execution pipeline
//!
//! ```text
//! .bf file → Loader → Grid → Editor ─copy─▶ Engine ─step─▶ TUI / headless
//! ```
//!
//! 1. [`loader`]: reads and writes `.bf` files as character grids.
//! 2. [`memory`]: the [`memory::grid::Grid`] of cells with breakpoint flags
//!    and the [`memory::stack::Stack`] of values.
//! 3. [`interpreter`]: the [`interpreter::engine::Engine`], which decodes and
//!    executes one cell per step.
//! 4. [`config`]: grid size, extended mode and timing from a `KEY, VALUE` file.
//! 5. [`ui`]: ratatui-based TUI; not part of the stable library API.
//!
//! ## Instruction set
//!
//! Digits push themselves (`a`-`f` too in extended mode). `+ - * / %`
//! arithmetic, `!` and the backtick compare, `> < ^ v ?` move, `_ |` branch,
//! `:` and `$` manage the stack, `. , & ~` do I/O, `g p` read and write the
//! grid, `"` toggles string mode, `#` skips a cell and `@` halts.

pub mod config;
pub mod interpreter;
pub mod loader;
pub mod memory;
pub mod ui;
