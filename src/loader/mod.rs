//! Program files
//!
//! Programs are stored as plain text with the `.bf` extension: one line per
//! grid row, every line the same number of characters. A single trailing
//! newline is tolerated, and `\r\n` line endings are accepted on load. Saving
//! writes rows joined by `\n` with no trailing newline.

use crate::memory::grid::{Grid, GridError};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

/// File extension for program files
pub const EXTENSION: &str = "bf";

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Wrong file extension: {}, expected .{}", .path.display(), EXTENSION)]
    WrongExtension { path: PathBuf },

    #[error("Cannot access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Wrongly formatted file {}: {source}", .path.display())]
    Format {
        path: PathBuf,
        #[source]
        source: GridError,
    },
}

/// Reject anything that is not a `.bf` path
pub fn check_extension(path: &Path) -> Result<(), LoadError> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(EXTENSION) => Ok(()),
        _ => Err(LoadError::WrongExtension {
            path: path.to_path_buf(),
        }),
    }
}

/// Build a grid from program text
pub fn parse_grid(text: &str) -> Result<Grid, GridError> {
    let text = text.strip_suffix('\n').unwrap_or(text);
    let rows = text
        .split('\n')
        .map(|line| {
            let line = line.strip_suffix('\r').unwrap_or(line);
            line.chars().map(|c| c as i64).collect()
        })
        .collect();
    Grid::from_rows(rows)
}

/// Program text for a grid; cells without a character become U+FFFD
pub fn render_grid(grid: &Grid) -> String {
    grid.rows()
        .map(|row| row.iter().map(|cell| cell.glyph()).collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn load_grid(path: &Path) -> Result<Grid, LoadError> {
    check_extension(path)?;
    let text = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let grid = parse_grid(&text).map_err(|source| LoadError::Format {
        path: path.to_path_buf(),
        source,
    })?;
    info!(
        path = %path.display(),
        width = grid.width(),
        height = grid.height(),
        "program loaded"
    );
    Ok(grid)
}

pub fn save_grid(path: &Path, grid: &Grid) -> Result<(), LoadError> {
    check_extension(path)?;
    fs::write(path, render_grid(grid)).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    info!(path = %path.display(), "Program saved");
    Ok(())
}
