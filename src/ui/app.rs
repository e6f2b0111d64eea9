//! Main TUI application state and logic

use super::editor::Editor;
use super::panes::{
    render_grid_pane, render_output_pane, render_stack_pane, render_status_bar, GridRenderData,
    StatusRenderData,
};
use super::theme::DEFAULT_THEME;
use crate::config::Config;
use crate::interpreter::engine::Engine;
use crate::interpreter::io::Severity;
use crate::interpreter::state::RunState;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use std::io;
use std::time::{Duration, Instant};
use tracing::{info, warn};

/// How long to wait for a key before checking the automatic-step timer
const POLL_INTERVAL: Duration = Duration::from_millis(20);

/// A running program and its scheduler state
pub struct Runner {
    pub engine: Engine,

    /// Whether automatic stepping is active
    pub automatic: bool,

    /// Last time a step was taken in automatic mode
    pub last_step: Instant,

    /// Text typed while the engine waits for input
    pub input_buffer: String,

    pub output_scroll: usize,
}

impl Runner {
    pub fn new(engine: Engine) -> Self {
        Runner {
            engine,
            automatic: false,
            last_step: Instant::now(),
            input_buffer: String::new(),
            output_scroll: 0,
        }
    }
}

/// The main application state
pub struct App {
    pub editor: Editor,

    /// Present while the runner view is open
    pub runner: Option<Runner>,

    pub config: Config,

    /// Status message to display
    pub status_message: String,

    /// Whether the status message reports a fault
    pub status_is_error: bool,

    /// Whether the app should quit
    pub should_quit: bool,
}

impl App {
    pub fn new(editor: Editor, config: Config) -> Self {
        App {
            editor,
            runner: None,
            config,
            status_message: String::from("Ready!"),
            status_is_error: false,
            should_quit: false,
        }
    }

    /// Run the TUI application
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            self.tick();

            if event::poll(POLL_INTERVAL)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key_event(key);
                    }
                }
            }
        }

        Ok(())
    }

    /// Take an automatic step when one is due
    pub fn tick(&mut self) {
        let due = self.runner.as_ref().is_some_and(|runner| {
            runner.automatic && runner.last_step.elapsed() >= self.config.step_time
        });
        if due {
            self.step_runner();
        }
    }

    /// Render the UI
    fn render(&mut self, frame: &mut Frame) {
        let size = frame.area();

        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(size);

        let pane_area = main_chunks[0];
        let status_area = main_chunks[1];

        let Some(runner) = self.runner.as_mut() else {
            let title = match self.editor.path() {
                Some(path) => format!(" Editor - {} ", path.display()),
                None => " Editor - <untitled> ".to_string(),
            };
            render_grid_pane(
                frame,
                pane_area,
                GridRenderData {
                    grid: self.editor.grid(),
                    focus: self.editor.cursor(),
                    title,
                    focus_bg: DEFAULT_THEME.cursor_bg,
                },
                true,
            );
            render_status_bar(
                frame,
                status_area,
                StatusRenderData::Editor {
                    message: &self.status_message,
                    cursor: self.editor.cursor(),
                    dirty: self.editor.is_dirty(),
                },
            );
            return;
        };

        // Left column: Grid (top) | Output (bottom); right column: Stack
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(0), Constraint::Length(15)])
            .split(pane_area);

        let left_rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
            .split(columns[0]);

        let engine = &runner.engine;
        let mode = if engine.extended_mode() { " (extended)" } else { "" };
        render_grid_pane(
            frame,
            left_rows[0],
            GridRenderData {
                grid: engine.grid(),
                focus: engine.position(),
                title: format!(" Runner{} ", mode),
                focus_bg: DEFAULT_THEME.program_counter_bg,
            },
            true,
        );

        render_output_pane(
            frame,
            left_rows[1],
            engine.output(),
            false,
            &mut runner.output_scroll,
        );

        render_stack_pane(frame, columns[1], engine.stack(), false);

        let input = match engine.run_state() {
            RunState::AwaitingInput(_) => Some(runner.input_buffer.as_str()),
            _ => None,
        };
        render_status_bar(
            frame,
            status_area,
            StatusRenderData::Runner {
                message: &self.status_message,
                position: engine.position(),
                direction: engine.direction(),
                steps: engine.steps(),
                run_state: engine.run_state(),
                automatic: runner.automatic,
                is_error: self.status_is_error,
                input,
            },
        );
    }

    /// Handle keyboard events
    pub fn handle_key_event(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL)
            && matches!(key.code, KeyCode::Char('q') | KeyCode::Char('c'))
        {
            self.should_quit = true;
            return;
        }

        if self.runner.is_some() {
            self.handle_runner_key(key);
        } else {
            self.handle_editor_key(key);
        }
    }

    fn handle_editor_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Up => self.editor.move_cursor(0, -1),
            KeyCode::Down => self.editor.move_cursor(0, 1),
            KeyCode::Left => self.editor.move_cursor(-1, 0),
            KeyCode::Right => self.editor.move_cursor(1, 0),
            KeyCode::Home => self.editor.row_start(),
            KeyCode::End => self.editor.row_end(),
            KeyCode::PageUp => self.editor.column_top(),
            KeyCode::PageDown => self.editor.column_bottom(),
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.editor.write(c);
            }
            KeyCode::F(1) => self.start_runner(),
            KeyCode::F(8) => {
                let set = self.editor.toggle_breakpoint();
                self.set_status(if set { "Breakpoint set" } else { "Breakpoint cleared" });
            }
            KeyCode::F(12) => self.save(),
            KeyCode::Esc => {
                self.should_quit = true;
            }
            _ => {}
        }
    }

    fn handle_runner_key(&mut self, key: KeyEvent) {
        let Some(runner) = self.runner.as_mut() else {
            return;
        };

        if let RunState::AwaitingInput(_) = runner.engine.run_state() {
            match key.code {
                KeyCode::Char(c) => runner.input_buffer.push(c),
                KeyCode::Backspace => {
                    runner.input_buffer.pop();
                }
                KeyCode::Enter => {
                    let text = std::mem::take(&mut runner.input_buffer);
                    runner.engine.supply_input(text);
                    self.step_runner();
                }
                KeyCode::Esc => self.stop_runner(),
                _ => {}
            }
            return;
        }

        match key.code {
            KeyCode::F(1) => {
                runner.automatic = false;
                self.step_runner();
            }
            KeyCode::F(5) => {
                if runner.engine.is_halted() {
                    self.set_status("Program halted");
                } else {
                    runner.automatic = !runner.automatic;
                    if runner.automatic {
                        runner.engine.resume();
                        runner.last_step = Instant::now()
                            .checked_sub(self.config.step_time)
                            .unwrap_or(Instant::now());
                        self.set_status("Playing...");
                    } else {
                        self.set_status("Stopped");
                    }
                }
            }
            KeyCode::Up => runner.output_scroll = runner.output_scroll.saturating_sub(1),
            KeyCode::Down => runner.output_scroll = runner.output_scroll.saturating_add(1),
            KeyCode::Esc => self.stop_runner(),
            _ => {}
        }
    }

    /// Open the runner on a copy of the editor's grid
    fn start_runner(&mut self) {
        let engine = Engine::new(self.editor.program(), self.config.engine_config());
        info!(
            breakpoints = self.editor.grid().breakpoint_count(),
            "runner started"
        );
        self.runner = Some(Runner::new(engine));
        self.set_status("F1 to step, F5 to run automatically");
    }

    fn stop_runner(&mut self) {
        if let Some(runner) = self.runner.take() {
            info!(steps = runner.engine.steps(), "runner closed");
        }
        self.set_status("Back to the editor");
    }

    /// Execute one instruction, resuming from a breakpoint if needed
    fn step_runner(&mut self) {
        let Some(runner) = self.runner.as_mut() else {
            return;
        };

        runner.engine.resume();
        let reported_before = runner.engine.diagnostic_count();
        let result = runner.engine.step();
        runner.last_step = Instant::now();
        runner.output_scroll = usize::MAX;

        let (message, is_error) = match result {
            Err(fault) => {
                runner.automatic = false;
                (fault.to_string(), fault.is_fatal())
            }
            Ok(state) => {
                if state != RunState::Running {
                    runner.automatic = false;
                }
                // Surface a notice raised by this step, if any
                let raised = runner.engine.diagnostic_count() > reported_before;
                let notice = runner
                    .engine
                    .last_diagnostic()
                    .filter(|_| raised)
                    .map(|diag| (diag.message.clone(), diag.severity == Severity::Error));
                match (notice, state) {
                    (Some(notice), _) => notice,
                    (None, RunState::Paused) => ("Breakpoint reached".to_string(), false),
                    (None, RunState::AwaitingInput(request)) => {
                        (format!("Waiting for {}", request), false)
                    }
                    (None, RunState::Halted) => ("Program halted".to_string(), false),
                    (None, RunState::Running) => {
                        let text = if runner.automatic { "Playing..." } else { "Stepped" };
                        (text.to_string(), false)
                    }
                }
            }
        };

        if is_error {
            warn!("{}", message);
        }
        self.status_message = message;
        self.status_is_error = is_error;
    }

    fn save(&mut self) {
        match self.editor.save() {
            Ok(Some(path)) => {
                let message = format!("Program saved to {}", path.display());
                self.set_status(&message);
            }
            Ok(None) => self.set_status("No file to save to; start with a .bf path"),
            Err(e) => {
                warn!(error = %e, "save failed");
                self.status_message = e.to_string();
                self.status_is_error = true;
            }
        }
    }

    fn set_status(&mut self, message: &str) {
        self.status_message = message.to_string();
        self.status_is_error = false;
    }
}
