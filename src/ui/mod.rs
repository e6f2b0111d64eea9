//! Terminal user interface built on [ratatui](https://github.com/ratatui-org/ratatui).
//!
//! The UI is organized into four layers:
//!
//! - **[`app`]**: application state, keyboard event loop, editor and runner modes
//! - **[`editor`]**: the editable grid with its cursor and file path
//! - **[`panes`]**: stateless render functions for each visible pane (grid, stack,
//!   output, status bar)
//! - **[`theme`]**: centralized color palette used by all panes
//!
//! The entry point for consumers is [`App`]: construct it with an [`Editor`] and a
//! [`Config`] and call [`App::run`] to start the event loop. Starting the runner
//! hands a copy of the editor's grid to a fresh [`Engine`], so edits made later
//! never reach a running program.
//!
//! [`Config`]: crate::config::Config
//! [`Engine`]: crate::interpreter::engine::Engine
//! [`App::run`]: app::App::run

pub mod app;
pub mod editor;
pub mod panes;
pub mod theme;

pub use app::App;
pub use editor::Editor;
