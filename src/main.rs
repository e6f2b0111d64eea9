// Fungetty: editor and step-through runner for a two-dimensional stack language

use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use fungetty::config::{Config, DEFAULT_CONFIG_PATH};
use fungetty::interpreter::engine::Engine;
use fungetty::interpreter::io::StdinInput;
use fungetty::interpreter::state::RunState;
use fungetty::loader;
use fungetty::memory::grid::Grid;
use fungetty::ui::{App, Editor};

#[derive(Parser, Debug)]
#[command(name = "fungetty")]
#[command(about = "Edit and step through two-dimensional stack programs")]
struct Cli {
    /// Program file (.bf); created on save if it does not exist
    file: Option<PathBuf>,

    /// Configuration file
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Width of a new blank grid
    #[arg(long)]
    width: Option<usize>,

    /// Height of a new blank grid
    #[arg(long)]
    height: Option<usize>,

    /// Enable hexadecimal digits a-f
    #[arg(long)]
    extended: bool,

    /// Automatic stepping interval in milliseconds
    #[arg(long)]
    step_time: Option<u64>,

    /// Seed for the `?` instruction
    #[arg(long)]
    seed: Option<u64>,

    /// Run the program to completion on stdin/stdout instead of opening the TUI
    #[arg(long)]
    headless: bool,

    /// Stop a headless run after this many steps
    #[arg(long)]
    max_steps: Option<u64>,

    /// Log file used while the TUI owns the terminal
    #[arg(long, default_value = "fungetty.log")]
    log_file: PathBuf,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli)?;

    let config = load_config(&cli)?;
    let (grid, path) = open_program(&cli, &config)?;

    if cli.headless {
        if path.is_none() {
            bail!("--headless needs a program file");
        }
        return run_headless(grid, &config, cli.max_steps);
    }

    run_tui(Editor::new(grid, path), config)
}

fn filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

fn init_logging(cli: &Cli) -> Result<()> {
    if cli.headless {
        tracing_subscriber::registry()
            .with(filter())
            .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
            .init();
    } else {
        let file = File::create(&cli.log_file)
            .with_context(|| format!("cannot create log file {}", cli.log_file.display()))?;
        tracing_subscriber::registry()
            .with(filter())
            .with(
                tracing_subscriber::fmt::layer()
                    .with_ansi(false)
                    .with_writer(Mutex::new(file)),
            )
            .init();
    }
    Ok(())
}

/// File values first, then command-line overrides
fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = Config::load_or_default(&cli.config)
        .with_context(|| format!("loading {}", cli.config.display()))?;

    if let Some(width) = cli.width {
        config.width = width;
    }
    if let Some(height) = cli.height {
        config.height = height;
    }
    if cli.extended {
        config.extended_mode = true;
    }
    if let Some(millis) = cli.step_time {
        config.step_time = Duration::from_millis(millis);
    }
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }

    info!(?config, "configuration loaded");
    Ok(config)
}

/// Load the program file, or start a blank grid when there is none yet
fn open_program(cli: &Cli, config: &Config) -> Result<(Grid, Option<PathBuf>)> {
    let Some(path) = cli.file.as_deref() else {
        return Ok((blank_grid(config)?, None));
    };

    if path.exists() {
        let grid = loader::load_grid(path)?;
        return Ok((grid, Some(path.to_path_buf())));
    }

    if cli.headless {
        bail!("program file {} not found", path.display());
    }
    loader::check_extension(path)?;
    info!(path = %path.display(), "new program");
    Ok((blank_grid(config)?, Some(path.to_path_buf())))
}

fn blank_grid(config: &Config) -> Result<Grid> {
    Grid::blank(config.width, config.height).context("cannot create a blank grid")
}

/// Run to completion with stdin and stdout as the program's terminal
fn run_headless(grid: Grid, config: &Config, max_steps: Option<u64>) -> Result<()> {
    let mut engine = Engine::new(grid, config.engine_config()).with_input(StdinInput::new());
    let mut stdout = io::stdout();

    loop {
        if max_steps.is_some_and(|limit| engine.steps() >= limit) {
            warn!(steps = engine.steps(), "step limit reached");
            break;
        }

        let result = engine.step();
        flush_output(&mut engine, &mut stdout)?;

        match result {
            Ok(RunState::Running) => {}
            Ok(RunState::Paused) => {
                info!(position = %engine.position(), "breakpoint reached, resuming");
                engine.resume();
            }
            Ok(RunState::AwaitingInput(request)) => {
                bail!("input closed while waiting for {}", request);
            }
            Ok(RunState::Halted) => break,
            Err(fault) => {
                return Err(anyhow::Error::new(fault).context("program stopped"));
            }
        }
    }

    info!(steps = engine.steps(), "run finished");
    Ok(())
}

fn flush_output(engine: &mut Engine, stdout: &mut io::Stdout) -> Result<()> {
    let text = engine.output_mut().take_unflushed();
    if !text.is_empty() {
        stdout.write_all(text.as_bytes())?;
        stdout.flush()?;
    }
    Ok(())
}

fn run_tui(editor: Editor, config: Config) -> Result<()> {
    log_start(editor.path());

    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create and run app
    let mut app = App::new(editor, config);
    let res = app.run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res.context("terminal UI failed")
}

fn log_start(path: Option<&Path>) {
    match path {
        Some(path) => info!(path = %path.display(), "editor opened"),
        None => info!("editor opened on a blank grid"),
    }
}
