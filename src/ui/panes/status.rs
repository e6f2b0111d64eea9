//! Status bar rendering with keybindings and state indicators

use crate::interpreter::state::{Direction, RunState};
use crate::memory::Position;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::{Alignment, Constraint, Direction as LayoutDirection, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

const EDITOR_KEYS: &[(&str, &str)] = &[
    ("F1", "run"),
    ("F8", "breakpoint"),
    ("F12", "save"),
    ("Esc", "quit"),
];
const RUNNER_KEYS: &[(&str, &str)] = &[("F1", "step"), ("F5", "auto"), ("Esc", "editor")];
const INPUT_KEYS: &[(&str, &str)] = &[("↵", "submit"), ("Esc", "editor")];

/// What the status bar describes
pub enum StatusRenderData<'a> {
    Editor {
        message: &'a str,
        cursor: Position,
        dirty: bool,
    },
    Runner {
        message: &'a str,
        position: Position,
        direction: Direction,
        steps: u64,
        run_state: RunState,
        automatic: bool,
        /// Message reports a fault
        is_error: bool,
        /// Text typed so far while the engine waits for input
        input: Option<&'a str>,
    },
}

/// Render the status bar at the bottom.
pub fn render_status_bar(frame: &mut Frame, area: Rect, data: StatusRenderData) {
    let layout = Layout::default()
        .direction(LayoutDirection::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(area);

    let bar = Style::default().bg(DEFAULT_THEME.status_bg);
    let sep_style = bar.fg(DEFAULT_THEME.comment);
    let key_style = Style::default().bg(DEFAULT_THEME.comment).fg(Color::Black);
    let desc_style = bar.fg(DEFAULT_THEME.fg);

    let badge = |text: String, color: Color| {
        Span::styled(
            text,
            Style::default()
                .bg(color)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
        )
    };

    let (left_spans, keys): (Vec<Span>, &[(&str, &str)]) = match data {
        StatusRenderData::Editor {
            message,
            cursor,
            dirty,
        } => (
            vec![
                badge(" EDIT ".to_string(), DEFAULT_THEME.primary),
                Span::styled(
                    format!(" {}{} ", cursor, if dirty { " *" } else { "" }),
                    desc_style,
                ),
                Span::styled("│", sep_style),
                Span::styled(format!(" {} ", message), desc_style),
            ],
            EDITOR_KEYS,
        ),
        StatusRenderData::Runner {
            message,
            position,
            direction,
            steps,
            run_state,
            automatic,
            is_error,
            input,
        } => {
            let (label, color) = match run_state {
                RunState::Running if automatic => (" ▶ AUTO ".to_string(), DEFAULT_THEME.secondary),
                RunState::Running => (" RUN ".to_string(), DEFAULT_THEME.success),
                RunState::Paused => (" ⏸ BREAK ".to_string(), DEFAULT_THEME.breakpoint),
                RunState::AwaitingInput(_) => (" ⌨ INPUT ".to_string(), DEFAULT_THEME.secondary),
                RunState::Halted => (" END ".to_string(), DEFAULT_THEME.error),
            };
            let mut spans = vec![
                badge(label, color),
                Span::styled(
                    format!(" {} {} step {} ", position, direction.arrow(), steps),
                    desc_style,
                ),
                Span::styled("│", sep_style),
            ];
            match (run_state, input) {
                (RunState::AwaitingInput(request), Some(text)) => {
                    spans.push(Span::styled(format!(" {}: ", request.prompt()), desc_style));
                    spans.push(Span::styled(
                        format!("{}▏", text),
                        bar.fg(DEFAULT_THEME.secondary).add_modifier(Modifier::BOLD),
                    ));
                }
                _ => {
                    let fg = if is_error {
                        DEFAULT_THEME.error
                    } else {
                        DEFAULT_THEME.fg
                    };
                    spans.push(Span::styled(format!(" {} ", message), bar.fg(fg)));
                }
            }
            let keys = if matches!(run_state, RunState::AwaitingInput(_)) {
                INPUT_KEYS
            } else {
                RUNNER_KEYS
            };
            (spans, keys)
        }
    };

    let left_paragraph = Paragraph::new(Line::from(left_spans))
        .style(bar)
        .alignment(Alignment::Left);
    frame.render_widget(left_paragraph, layout[0]);

    let mut right_spans = Vec::new();
    for (index, (key, desc)) in keys.iter().enumerate() {
        if index > 0 {
            right_spans.push(Span::styled("│", sep_style));
            right_spans.push(Span::styled(" ", desc_style));
        }
        right_spans.push(Span::styled(format!(" {} ", key), key_style));
        right_spans.push(Span::styled(format!(" {} ", desc), desc_style));
    }

    let right_paragraph = Paragraph::new(Line::from(right_spans))
        .style(bar)
        .alignment(Alignment::Right);
    frame.render_widget(right_paragraph, layout[1]);
}
