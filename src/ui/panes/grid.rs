//! Grid pane rendering
//!
//! Draws the program grid with one highlighted cell (the editor cursor or the
//! program counter) and breakpoints in their own color. Grids larger than the
//! pane are scrolled so the highlighted cell stays in view.

use crate::memory::grid::{Cell, Grid};
use crate::memory::Position;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Data needed to render the grid pane
pub struct GridRenderData<'a> {
    pub grid: &'a Grid,
    pub focus: Position,
    pub title: String,
    /// Background of the focused cell
    pub focus_bg: Color,
}

/// First visible index so that `focus` stays on screen, centered when possible
pub fn viewport_origin(focus: usize, extent: usize, visible: usize) -> usize {
    if visible == 0 || extent <= visible {
        return 0;
    }
    focus.saturating_sub(visible / 2).min(extent - visible)
}

/// Character used to draw a cell; control characters would corrupt the screen
pub fn display_glyph(cell: &Cell) -> char {
    let glyph = cell.glyph();
    if glyph.is_control() {
        '·'
    } else {
        glyph
    }
}

/// Render the grid pane
pub fn render_grid_pane(frame: &mut Frame, area: Rect, data: GridRenderData, is_focused: bool) {
    let border_style = if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    };

    let block = Block::default()
        .title(data.title)
        .borders(Borders::ALL)
        .border_style(border_style);

    let visible_width = area.width.saturating_sub(2) as usize;
    let visible_height = area.height.saturating_sub(2) as usize;
    let grid = data.grid;

    let origin_x = viewport_origin(data.focus.x, grid.width(), visible_width);
    let origin_y = viewport_origin(data.focus.y, grid.height(), visible_height);
    let end_x = (origin_x + visible_width).min(grid.width());
    let end_y = (origin_y + visible_height).min(grid.height());

    let lines: Vec<Line> = (origin_y..end_y)
        .map(|y| {
            let row = grid.row(y);
            let spans: Vec<Span> = (origin_x..end_x)
                .map(|x| {
                    let cell = &row[x];
                    let mut style = Style::default().fg(DEFAULT_THEME.fg);
                    if cell.breakpoint {
                        style = style
                            .fg(DEFAULT_THEME.breakpoint)
                            .add_modifier(Modifier::BOLD);
                    }
                    if data.focus == Position::new(x, y) {
                        style = style.bg(data.focus_bg).fg(Color::Black);
                    }
                    Span::styled(display_glyph(cell).to_string(), style)
                })
                .collect();
            Line::from(spans)
        })
        .collect();

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn viewport_keeps_focus_visible() {
        assert_eq!(viewport_origin(5, 10, 20), 0);
        assert_eq!(viewport_origin(3, 100, 10), 0);
        assert_eq!(viewport_origin(50, 100, 10), 45);
        assert_eq!(viewport_origin(99, 100, 10), 90);
    }

    #[test]
    fn control_characters_are_masked() {
        assert_eq!(display_glyph(&Cell::new(0x07)), '·');
        assert_eq!(display_glyph(&Cell::new('v' as i64)), 'v');
    }
}
