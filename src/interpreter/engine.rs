// Execution engine for the grid language

use crate::interpreter::constants::{COMPLETION_NOTICE, MAX_DIAGNOSTICS};
use crate::interpreter::errors::RuntimeError;
use crate::interpreter::instruction::{
    ArithmeticOp, CompareOp, GridOp, Instruction, IoOp, Movement, StackOp,
};
use crate::interpreter::io::{
    Diagnostic, InputRequest, InputSource, NoInput, OutputBuffer, Severity,
};
use crate::interpreter::state::{Direction, ProgramState, RunState};
use crate::memory::grid::{Cell, Grid};
use crate::memory::stack::Stack;
use crate::memory::Position;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::collections::VecDeque;
use tracing::{debug, error, info, warn};

/// Settings fixed for the lifetime of an engine
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EngineConfig {
    /// Enables `a`-`f` as literals 10-15
    pub extended_mode: bool,
    /// Seed for `?`; `None` seeds from the OS
    pub seed: Option<u64>,
}

/// What the dispatcher asks the step driver to do next
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Instruction done; advance the program counter
    Continue,
    /// Instruction needs input that is not available; stay on this cell
    Suspend(InputRequest),
}

/// The execution engine: one grid, one stack, one program counter
pub struct Engine {
    /// Working copy of the program, never shared with the editor
    grid: Grid,

    stack: Stack,

    state: ProgramState,

    run_state: RunState,

    extended_mode: bool,

    /// Source of `?` directions
    rng: SmallRng,

    input: Box<dyn InputSource>,

    /// Replies handed over by the host, consumed before asking `input`
    pending_input: VecDeque<String>,

    output: OutputBuffer,

    diagnostics: VecDeque<Diagnostic>,

    /// Diagnostics ever reported, including ones dropped from the buffer
    reported: u64,

    /// Completed instructions
    steps: u64,
}

impl Engine {
    /// Create an engine at the origin, heading right, with no input source
    pub fn new(grid: Grid, config: EngineConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        };

        debug!(
            width = grid.width(),
            height = grid.height(),
            extended = config.extended_mode,
            "engine created"
        );

        Engine {
            grid,
            stack: Stack::new(),
            state: ProgramState::default(),
            run_state: RunState::Running,
            extended_mode: config.extended_mode,
            rng,
            input: Box::new(NoInput),
            pending_input: VecDeque::new(),
            output: OutputBuffer::new(),
            diagnostics: VecDeque::new(),
            reported: 0,
            steps: 0,
        }
    }

    /// Replace the input source
    pub fn with_input(mut self, input: impl InputSource + 'static) -> Self {
        self.input = Box::new(input);
        self
    }

    /// Execute exactly one instruction and move the program counter.
    ///
    /// No-op while paused or halted. Returns the run state after the step,
    /// or the fault that halted the engine.
    pub fn step(&mut self) -> Result<RunState, RuntimeError> {
        if matches!(self.run_state, RunState::Paused | RunState::Halted) {
            return Ok(self.run_state);
        }

        let cell = self.grid.cell(self.state.position);
        match self.execute(cell.value) {
            Ok(Flow::Continue) => {}
            Ok(Flow::Suspend(request)) => {
                if self.run_state != RunState::AwaitingInput(request) {
                    debug!(position = %self.state.position, %request, "waiting for input");
                }
                self.run_state = RunState::AwaitingInput(request);
                return Ok(self.run_state);
            }
            Err(fault) => {
                error!(%fault, "engine halted");
                self.state.halted = true;
                self.run_state = RunState::Halted;
                self.steps += 1;
                self.report_fault(&fault);
                return Err(fault);
            }
        }

        self.steps += 1;

        if self.state.halted {
            self.run_state = RunState::Halted;
            return Ok(self.run_state);
        }

        self.advance();

        self.run_state = if self.grid.cell(self.state.position).breakpoint {
            debug!(position = %self.state.position, "breakpoint reached");
            RunState::Paused
        } else {
            RunState::Running
        };
        Ok(self.run_state)
    }

    /// Step until the engine stops running or `limit` instructions have been
    /// executed by this call.
    pub fn run(&mut self, limit: Option<u64>) -> Result<RunState, RuntimeError> {
        let start = self.steps;
        loop {
            let state = self.step()?;
            if state != RunState::Running {
                return Ok(state);
            }
            if limit.is_some_and(|limit| self.steps - start >= limit) {
                return Ok(state);
            }
        }
    }

    /// Leave a breakpoint pause
    pub fn resume(&mut self) {
        if self.run_state == RunState::Paused {
            self.run_state = RunState::Running;
        }
    }

    /// Queue a reply for the next input instruction
    pub fn supply_input(&mut self, text: impl Into<String>) {
        self.pending_input.push_back(text.into());
        if let RunState::AwaitingInput(_) = self.run_state {
            self.run_state = RunState::Running;
        }
    }

    /// Apply the effect of `value` as the current cell. Does not move the
    /// program counter.
    pub fn execute(&mut self, value: i64) -> Result<Flow, RuntimeError> {
        if self.state.string_mode {
            if value == '"' as i64 {
                self.state.string_mode = false;
            } else {
                self.stack.push(value);
            }
            return Ok(Flow::Continue);
        }

        if self.state.skip_next {
            self.state.skip_next = false;
            return Ok(Flow::Continue);
        }

        let Some(instruction) = Instruction::decode(value, self.extended_mode) else {
            let err = RuntimeError::InvalidInstruction {
                value,
                glyph: Cell::new(value).glyph(),
                position: self.state.position,
            };
            warn!(%err, "skipping invalid instruction");
            self.report_fault(&err);
            return Ok(Flow::Continue);
        };

        match instruction {
            Instruction::Literal(n) => self.stack.push(n),
            Instruction::Arithmetic(op) => self.execute_arithmetic(op)?,
            Instruction::Compare(op) => self.execute_compare(op),
            Instruction::Movement(movement) => self.execute_movement(movement),
            Instruction::Stack(op) => self.execute_stack(op),
            Instruction::Io(op) => return Ok(self.execute_io(op)),
            Instruction::Grid(op) => self.execute_grid(op),
            Instruction::StringMode => self.state.string_mode = true,
            Instruction::Bridge => self.state.skip_next = true,
            Instruction::Nop => {}
            Instruction::Halt => {
                self.state.halted = true;
                info!(steps = self.steps + 1, "{}", COMPLETION_NOTICE);
                self.report(Severity::Info, COMPLETION_NOTICE.to_string());
            }
        }

        Ok(Flow::Continue)
    }

    fn execute_arithmetic(&mut self, op: ArithmeticOp) -> Result<(), RuntimeError> {
        let b = self.stack.pop();
        let a = self.stack.pop();
        let result = op.apply(a, b).ok_or(RuntimeError::ArithmeticFault {
            operation: op.name(),
            position: self.state.position,
        })?;
        self.stack.push(result);
        Ok(())
    }

    fn execute_compare(&mut self, op: CompareOp) {
        let result = match op {
            CompareOp::Not => self.stack.pop() == 0,
            CompareOp::Greater => {
                let b = self.stack.pop();
                let a = self.stack.pop();
                a > b
            }
        };
        self.stack.push(result as i64);
    }

    fn execute_movement(&mut self, movement: Movement) {
        self.state.direction = match movement {
            Movement::Go(direction) => direction,
            Movement::Random => self.rng.gen(),
            Movement::BranchHorizontal => {
                if self.stack.pop() == 0 {
                    Direction::Left
                } else {
                    Direction::Right
                }
            }
            Movement::BranchVertical => {
                if self.stack.pop() == 0 {
                    Direction::Up
                } else {
                    Direction::Down
                }
            }
        };
    }

    fn execute_stack(&mut self, op: StackOp) {
        match op {
            StackOp::Duplicate => {
                let top = self.stack.pop();
                self.stack.push(top);
                self.stack.push(top);
            }
            StackOp::Discard => {
                self.stack.pop();
            }
        }
    }

    fn execute_io(&mut self, op: IoOp) -> Flow {
        match op {
            IoOp::PrintNumber => {
                let value = self.stack.pop();
                self.output.print_number(value);
            }
            IoOp::PrintChar => {
                let value = self.stack.pop();
                let cell = Cell::new(value);
                if cell.as_char().is_none() {
                    let message = format!("{} is not a valid character, printing U+FFFD", value);
                    warn!("{}", message);
                    self.report(Severity::Warning, message);
                }
                self.output.print_char(cell.glyph());
            }
            IoOp::Read(request) => {
                let value = match request {
                    InputRequest::Integer => self.read_integer(),
                    InputRequest::Character => self.read_character(),
                };
                match value {
                    Some(value) => self.stack.push(value),
                    None => return Flow::Suspend(request),
                }
            }
        }
        Flow::Continue
    }

    fn execute_grid(&mut self, op: GridOp) {
        let y = self.stack.pop();
        let x = self.stack.pop();
        let pos = self.grid.wrap_position(x, y);
        match op {
            GridOp::Get => {
                let value = self.grid.cell(pos).value;
                self.stack.push(value);
            }
            GridOp::Put => {
                let value = self.stack.pop();
                self.grid.set_value(pos, value);
            }
        }
    }

    fn next_reply(&mut self, request: InputRequest) -> Option<String> {
        self.pending_input
            .pop_front()
            .or_else(|| self.input.read(request))
    }

    /// Ask for replies until one parses as an integer
    fn read_integer(&mut self) -> Option<i64> {
        loop {
            let reply = self.next_reply(InputRequest::Integer)?;
            match parse_integer(&reply) {
                Some(value) => return Some(value),
                None => self.report_malformed(InputRequest::Integer, reply),
            }
        }
    }

    /// Ask for replies until one is non-empty; only its first char is used
    fn read_character(&mut self) -> Option<i64> {
        loop {
            let reply = self.next_reply(InputRequest::Character)?;
            let mut chars = reply.chars();
            let Some(first) = chars.next() else {
                self.report_malformed(InputRequest::Character, reply);
                continue;
            };
            if chars.next().is_some() {
                let message = format!("Only one character expected, got {:?}; using '{}'", reply, first);
                warn!("{}", message);
                self.report(Severity::Warning, message);
            }
            return Some(first as i64);
        }
    }

    fn report_malformed(&mut self, request: InputRequest, text: String) {
        let err = RuntimeError::MalformedInput { request, text };
        warn!(%err, "asking again");
        self.report_fault(&err);
    }

    fn report(&mut self, severity: Severity, message: String) {
        self.record(severity, message, self.state.position);
    }

    /// Fatal faults are errors, everything else is a warning
    fn report_fault(&mut self, fault: &RuntimeError) {
        let severity = if fault.is_fatal() {
            Severity::Error
        } else {
            Severity::Warning
        };
        let position = fault.position().unwrap_or(self.state.position);
        self.record(severity, fault.to_string(), position);
    }

    fn record(&mut self, severity: Severity, message: String, position: Position) {
        if self.diagnostics.len() == MAX_DIAGNOSTICS {
            self.diagnostics.pop_front();
        }
        self.diagnostics.push_back(Diagnostic {
            severity,
            message,
            position,
            step: self.steps,
        });
        self.reported += 1;
    }

    fn advance(&mut self) {
        let (dx, dy) = self.state.direction.delta();
        self.state.position = self.grid.offset(self.state.position, dx, dy);
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Cell at `(x, y)`, wrapped into the grid
    pub fn peek_cell(&self, x: usize, y: usize) -> Cell {
        self.grid.cell(Position::new(x, y))
    }

    pub fn stack(&self) -> &Stack {
        &self.stack
    }

    /// Stack values, top first
    pub fn peek_stack(&self) -> Vec<i64> {
        self.stack.snapshot()
    }

    pub fn program_state(&self) -> &ProgramState {
        &self.state
    }

    pub fn position(&self) -> Position {
        self.state.position
    }

    pub fn direction(&self) -> Direction {
        self.state.direction
    }

    pub fn run_state(&self) -> RunState {
        self.run_state
    }

    pub fn is_halted(&self) -> bool {
        self.run_state == RunState::Halted
    }

    pub fn extended_mode(&self) -> bool {
        self.extended_mode
    }

    pub fn output(&self) -> &OutputBuffer {
        &self.output
    }

    pub fn output_mut(&mut self) -> &mut OutputBuffer {
        &mut self.output
    }

    pub fn diagnostics(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter()
    }

    pub fn last_diagnostic(&self) -> Option<&Diagnostic> {
        self.diagnostics.back()
    }

    /// Number of diagnostics reported so far; keeps counting past the buffer
    /// bound, so a change means a new notice
    pub fn diagnostic_count(&self) -> u64 {
        self.reported
    }

    pub fn steps(&self) -> u64 {
        self.steps
    }
}

/// Parse text matching `-?[0-9]+` that fits in an i64
fn parse_integer(text: &str) -> Option<i64> {
    let digits = text.strip_prefix('-').unwrap_or(text);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    text.parse().ok()
}
