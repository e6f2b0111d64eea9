//! Stack pane rendering
//!
//! Values are listed top first, right-aligned. Values of magnitude 10^10 or
//! more are shortened to six significant digits in scientific notation so
//! they fit the narrow column. When the stack is taller than the pane the
//! last visible row becomes `...`.

use crate::memory::stack::Stack;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

/// Magnitude from which values are shown in scientific notation
const SCIENTIFIC_THRESHOLD: u64 = 10_000_000_000;

/// Width of one stack entry
pub const ENTRY_WIDTH: usize = 11;

/// Format one stack value for display
pub fn format_stack_value(value: i64) -> String {
    let magnitude = value.unsigned_abs();
    if magnitude < SCIENTIFIC_THRESHOLD {
        return value.to_string();
    }

    // Truncated, not rounded: 1.23456e10 for 12345678901
    let digits = magnitude.to_string();
    let exponent = digits.len() - 1;
    let sign = if value < 0 { "-" } else { "" };
    format!("{}{}.{}e{}", sign, &digits[..1], &digits[1..6], exponent)
}

/// Render the stack pane
pub fn render_stack_pane(frame: &mut Frame, area: Rect, stack: &Stack, is_focused: bool) {
    let border_style = if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    };

    let block = Block::default()
        .title(" Stack ")
        .borders(Borders::ALL)
        .border_style(border_style);

    if stack.is_empty() {
        let paragraph = Paragraph::new("(empty)")
            .block(block)
            .alignment(Alignment::Right)
            .style(Style::default().fg(DEFAULT_THEME.comment));
        frame.render_widget(paragraph, area);
        return;
    }

    let visible_height = area.height.saturating_sub(2).max(1) as usize;
    let content_width = (area.width.saturating_sub(2) as usize).max(ENTRY_WIDTH);
    let truncated = stack.len() > visible_height;
    let shown = if truncated {
        visible_height - 1
    } else {
        stack.len()
    };

    let mut items: Vec<ListItem> = stack
        .iter()
        .take(shown)
        .map(|value| {
            let text = format!("{:>width$}", format_stack_value(value), width = content_width);
            ListItem::new(text).style(Style::default().fg(DEFAULT_THEME.number))
        })
        .collect();

    if truncated {
        let text = format!("{:^width$}", "...", width = content_width);
        items.push(ListItem::new(text).style(Style::default().fg(DEFAULT_THEME.comment)));
    }

    frame.render_widget(List::new(items).block(block), area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_values_print_plainly() {
        assert_eq!(format_stack_value(0), "0");
        assert_eq!(format_stack_value(-42), "-42");
        assert_eq!(format_stack_value(9_999_999_999), "9999999999");
    }

    #[test]
    fn large_values_use_scientific_notation() {
        assert_eq!(format_stack_value(12_345_678_901), "1.23456e10");
        assert_eq!(format_stack_value(-98_765_432_109_876), "-9.87654e13");
        assert_eq!(format_stack_value(i64::MAX), "9.22337e18");
        assert_eq!(format_stack_value(i64::MIN), "-9.22337e18");
    }

    #[test]
    fn formatted_values_fit_the_column() {
        for value in [i64::MIN, i64::MAX, -9_999_999_999, 10_000_000_000] {
            assert!(format_stack_value(value).len() <= ENTRY_WIDTH);
        }
    }
}
