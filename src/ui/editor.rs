//! Editor state: the user's copy of the grid, the cursor and the file path

use crate::loader::{self, LoadError};
use crate::memory::grid::Grid;
use crate::memory::Position;
use std::path::{Path, PathBuf};

pub struct Editor {
    grid: Grid,
    cursor: Position,
    path: Option<PathBuf>,
    /// Unsaved changes
    dirty: bool,
}

impl Editor {
    pub fn new(grid: Grid, path: Option<PathBuf>) -> Self {
        Editor {
            grid,
            cursor: Position::ORIGIN,
            path,
            dirty: false,
        }
    }

    /// Move the cursor, wrapping at the edges
    pub fn move_cursor(&mut self, dx: i64, dy: i64) {
        self.cursor = self.grid.offset(self.cursor, dx, dy);
    }

    pub fn row_start(&mut self) {
        self.cursor.x = 0;
    }

    pub fn row_end(&mut self) {
        self.cursor.x = self.grid.width() - 1;
    }

    pub fn column_top(&mut self) {
        self.cursor.y = 0;
    }

    pub fn column_bottom(&mut self) {
        self.cursor.y = self.grid.height() - 1;
    }

    /// Overwrite the cell under the cursor; the cursor stays put
    pub fn write(&mut self, c: char) {
        self.grid.set_value(self.cursor, c as i64);
        self.dirty = true;
    }

    pub fn toggle_breakpoint(&mut self) -> bool {
        self.grid.toggle_breakpoint(self.cursor)
    }

    /// Write the grid to its file
    pub fn save(&mut self) -> Result<Option<&Path>, LoadError> {
        let Some(path) = self.path.as_deref() else {
            return Ok(None);
        };
        loader::save_grid(path, &self.grid)?;
        self.dirty = false;
        Ok(Some(path))
    }

    /// Independent copy of the grid for a runner
    pub fn program(&self) -> Grid {
        self.grid.clone()
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn cursor(&self) -> Position {
        self.cursor
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::grid::Cell;

    fn editor() -> Editor {
        Editor::new(Grid::blank(4, 3).unwrap(), None)
    }

    #[test]
    fn cursor_wraps() {
        let mut ed = editor();
        ed.move_cursor(-1, -1);
        assert_eq!(ed.cursor(), Position::new(3, 2));
        ed.move_cursor(1, 1);
        assert_eq!(ed.cursor(), Position::ORIGIN);
    }

    #[test]
    fn home_end_page_keys_jump_to_edges() {
        let mut ed = editor();
        ed.row_end();
        ed.column_bottom();
        assert_eq!(ed.cursor(), Position::new(3, 2));
        ed.row_start();
        ed.column_top();
        assert_eq!(ed.cursor(), Position::ORIGIN);
    }

    #[test]
    fn runner_copy_is_independent() {
        let mut ed = editor();
        let program = ed.program();
        ed.write('@');
        assert!(ed.is_dirty());
        assert_eq!(program.cell(Position::ORIGIN), Cell::BLANK);
        assert_eq!(ed.grid().cell(Position::ORIGIN).value, '@' as i64);
    }

    #[test]
    fn save_without_path_does_nothing() {
        let mut ed = editor();
        ed.write('1');
        assert!(ed.save().unwrap().is_none());
        assert!(ed.is_dirty());
    }

    #[test]
    fn save_writes_grid() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prog.bf");
        let mut ed = Editor::new(Grid::blank(2, 1).unwrap(), Some(path.clone()));
        ed.write('@');
        ed.save().unwrap();
        assert!(!ed.is_dirty());
        assert_eq!(std::fs::read_to_string(path).unwrap(), "@ ");
    }
}
