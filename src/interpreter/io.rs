//! Collaborators at the engine boundary
//!
//! - [`InputSource`]: replies to `&` and `~` requests
//! - [`OutputBuffer`]: captures what `.` and `,` emit, in order
//! - [`Diagnostic`]: non-fatal notices (invalid instructions, malformed input,
//!   completion) collected for the host to display

use crate::memory::Position;
use std::collections::VecDeque;
use std::fmt;
use std::io::{self, BufRead, Write};

/// Kind of value an input instruction waits for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputRequest {
    /// `&`: text matching `-?[0-9]+`
    Integer,
    /// `~`: a single character
    Character,
}

impl InputRequest {
    pub fn prompt(self) -> &'static str {
        match self {
            InputRequest::Integer => "Insert a number",
            InputRequest::Character => "Insert a character",
        }
    }
}

impl fmt::Display for InputRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputRequest::Integer => write!(f, "an integer"),
            InputRequest::Character => write!(f, "a character"),
        }
    }
}

/// Supplies replies to input instructions.
///
/// `read` returns `None` when nothing is available right now. The engine then
/// suspends in [`RunState::AwaitingInput`](super::state::RunState) without
/// touching any state. A malformed reply is not an error here: the engine
/// validates it and asks again.
pub trait InputSource {
    fn read(&mut self, request: InputRequest) -> Option<String>;
}

/// Input source that never has anything to offer. Hosts that collect input
/// themselves pair it with `Engine::supply_input`.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoInput;

impl InputSource for NoInput {
    fn read(&mut self, _request: InputRequest) -> Option<String> {
        None
    }
}

/// Replies handed out in order, regardless of the request kind
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    replies: VecDeque<String>,
}

impl ScriptedInput {
    pub fn new<I, S>(replies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ScriptedInput {
            replies: replies.into_iter().map(Into::into).collect(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.replies.len()
    }
}

impl InputSource for ScriptedInput {
    fn read(&mut self, _request: InputRequest) -> Option<String> {
        self.replies.pop_front()
    }
}

/// Blocking line reader over stdin. The prompt goes to stderr so stdout only
/// carries program output. Returns `None` once stdin is closed.
#[derive(Debug, Default)]
pub struct StdinInput;

impl StdinInput {
    pub fn new() -> Self {
        StdinInput
    }
}

impl InputSource for StdinInput {
    fn read(&mut self, request: InputRequest) -> Option<String> {
        let mut stderr = io::stderr();
        let _ = write!(stderr, "{}: ", request.prompt());
        let _ = stderr.flush();

        let mut line = String::new();
        match io::stdin().lock().read_line(&mut line) {
            Ok(0) => None,
            Ok(_) => {
                let trimmed = line.trim_end_matches(&['\n', '\r'][..]);
                Some(trimmed.to_string())
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to read from stdin");
                None
            }
        }
    }
}

/// Everything the program printed, in emission order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutputBuffer {
    text: String,
    flushed: usize,
}

impl OutputBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// `.`: decimal text, no separator
    pub fn print_number(&mut self, value: i64) {
        self.text.push_str(&value.to_string());
    }

    /// `,`
    pub fn print_char(&mut self, c: char) {
        self.text.push(c);
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Output split into display lines
    pub fn lines(&self) -> Vec<&str> {
        if self.text.is_empty() {
            return Vec::new();
        }
        let mut lines: Vec<&str> = self.text.split('\n').collect();
        if lines.last().is_some_and(|line| line.is_empty()) {
            lines.pop();
        }
        lines
    }

    /// Text emitted since the previous call
    pub fn take_unflushed(&mut self) -> &str {
        let start = self.flushed;
        self.flushed = self.text.len();
        &self.text[start..]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Info,
    Warning,
    Error,
}

/// A notice raised while stepping
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    pub message: String,
    /// Program counter when the notice was raised
    pub position: Position,
    /// Number of completed steps at that time
    pub step: u64,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self.severity {
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Error => "error",
        };
        write!(f, "[{}] {} (step {}, at {})", label, self.message, self.step, self.position)
    }
}
