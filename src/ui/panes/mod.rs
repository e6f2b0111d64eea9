//! TUI pane rendering modules
//!
//! # Pane Modules
//!
//! - [`grid`]: the program grid with cursor / program counter and breakpoints
//! - [`stack`]: the value stack, top first
//! - [`output`]: text printed by `.` and `,`
//! - [`status`]: status bar with keybindings and run state
//!
//! Each pane module exports a primary `render_*` function. Panes only read
//! engine and editor state; they never mutate it.

pub mod grid;
pub mod output;
pub mod stack;
pub mod status;

pub use grid::{render_grid_pane, GridRenderData};
pub use output::render_output_pane;
pub use stack::render_stack_pane;
pub use status::{render_status_bar, StatusRenderData};
