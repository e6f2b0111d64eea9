// Integration tests for the execution engine

use fungetty::interpreter::engine::{Engine, EngineConfig};
use fungetty::interpreter::errors::RuntimeError;
use fungetty::interpreter::io::{InputRequest, ScriptedInput, Severity};
use fungetty::interpreter::state::{Direction, RunState};
use fungetty::loader::parse_grid;
use fungetty::memory::Position;
use proptest::prelude::*;

fn engine(program: &str) -> Engine {
    engine_with(program, false)
}

fn engine_with(program: &str, extended_mode: bool) -> Engine {
    let grid = parse_grid(program).expect("program should parse");
    Engine::new(
        grid,
        EngineConfig {
            extended_mode,
            seed: Some(42),
        },
    )
}

fn step_n(engine: &mut Engine, n: usize) {
    for _ in 0..n {
        engine.step().expect("step should not fault");
    }
}

#[test]
fn test_hello_world() {
    let mut e = engine("\"!dlroW olleH\",,,,,,,,,,,,@");
    let state = e.run(Some(1000)).unwrap();

    assert_eq!(state, RunState::Halted);
    assert_eq!(e.output().text(), "Hello World!");
    assert!(e.stack().is_empty());
}

#[test]
fn test_subtraction_order() {
    let mut e = engine("12-");
    step_n(&mut e, 3);
    assert_eq!(e.peek_stack(), vec![-1]);
}

#[test]
fn test_bridge_skips_print() {
    let mut e = engine("#.1");
    step_n(&mut e, 3);
    assert_eq!(e.peek_stack(), vec![1]);
    assert_eq!(e.output().text(), "");
}

#[test]
fn test_string_mode() {
    let mut e = engine("\"AB\"");
    step_n(&mut e, 4);
    assert_eq!(e.peek_stack(), vec![66, 65]);
}

#[test]
fn test_duplicate_on_empty_stack() {
    let mut e = engine(":");
    step_n(&mut e, 1);
    assert_eq!(e.peek_stack(), vec![0, 0]);
}

#[test]
fn test_division_by_zero_halts() {
    let mut e = engine("60/");
    step_n(&mut e, 2);

    let fault = e.step().unwrap_err();
    assert!(matches!(
        fault,
        RuntimeError::ArithmeticFault {
            position: Position { x: 2, y: 0 },
            ..
        }
    ));
    assert!(e.is_halted());
    assert_eq!(e.steps(), 3);
    assert_eq!(e.last_diagnostic().unwrap().severity, Severity::Error);

    // A halted engine ignores further steps
    let position = e.position();
    assert_eq!(e.step(), Ok(RunState::Halted));
    assert_eq!(e.steps(), 3);
    assert_eq!(e.position(), position);
}

#[test]
fn test_modulo_by_zero_halts() {
    let mut e = engine("50%");
    step_n(&mut e, 2);
    assert!(e.step().is_err());
    assert!(e.is_halted());
}

#[test]
fn test_breakpoint_pauses_until_resume() {
    let mut grid = parse_grid("1234@").unwrap();
    grid.toggle_breakpoint(Position::new(2, 0));
    let mut e = Engine::new(grid, EngineConfig::default());

    assert_eq!(e.step(), Ok(RunState::Running));
    assert_eq!(e.step(), Ok(RunState::Paused));
    assert_eq!(e.position(), Position::new(2, 0));

    // Paused steps change nothing
    assert_eq!(e.step(), Ok(RunState::Paused));
    assert_eq!(e.peek_stack(), vec![2, 1]);

    e.resume();
    assert_eq!(e.step(), Ok(RunState::Running));
    assert_eq!(e.peek_stack(), vec![3, 2, 1]);
    assert_eq!(e.run(None), Ok(RunState::Halted));
    assert_eq!(e.peek_stack(), vec![4, 3, 2, 1]);
}

#[test]
fn test_wraparound_moves_to_opposite_edge() {
    let mut e = engine("<  \n   ");
    step_n(&mut e, 1);
    assert_eq!(e.position(), Position::new(2, 0));
    assert_eq!(e.direction(), Direction::Left);

    let mut e = engine("^ \n  \n  ");
    step_n(&mut e, 1);
    assert_eq!(e.position(), Position::new(0, 2));
}

#[test]
fn test_branches() {
    let mut e = engine("0_");
    step_n(&mut e, 2);
    assert_eq!(e.direction(), Direction::Left);

    let mut e = engine("7|\n  \n  ");
    step_n(&mut e, 2);
    assert_eq!(e.direction(), Direction::Down);
    assert_eq!(e.position(), Position::new(1, 1));
}

#[test]
fn test_compare_instructions() {
    let mut e = engine("52`0!");
    step_n(&mut e, 5);
    assert_eq!(e.peek_stack(), vec![1, 1]);
}

#[test]
fn test_extended_digits() {
    let mut e = engine_with("af+", true);
    step_n(&mut e, 3);
    assert_eq!(e.peek_stack(), vec![25]);

    let mut e = engine_with("af+", false);
    step_n(&mut e, 3);
    assert_eq!(e.peek_stack(), vec![0]);
    let warnings = e
        .diagnostics()
        .filter(|d| d.severity == Severity::Warning)
        .count();
    assert_eq!(warnings, 2);
}

#[test]
fn test_put_writes_running_grid() {
    let mut e = engine("900p@");
    assert_eq!(e.run(None), Ok(RunState::Halted));
    assert_eq!(e.peek_cell(0, 0).value, 9);
}

#[test]
fn test_get_wraps_coordinates() {
    let mut e = engine("01-0g@");
    assert_eq!(e.run(None), Ok(RunState::Halted));
    assert_eq!(e.peek_stack(), vec!['@' as i64]);
}

#[test]
fn test_self_modifying_program_halts() {
    // Writes '@' over the cell at (6, 0) and walks into it
    let mut e = engine("88*60p     ");
    let state = e.run(Some(100)).unwrap();
    assert_eq!(state, RunState::Halted);
    assert_eq!(e.peek_cell(6, 0).value, '@' as i64);
}

#[test]
fn test_scripted_integer_input() {
    let mut e = engine("&&+.@").with_input(ScriptedInput::new(["3", "oops", "4"]));
    assert_eq!(e.run(None), Ok(RunState::Halted));
    assert_eq!(e.output().text(), "7");
    assert!(e
        .diagnostics()
        .any(|d| d.severity == Severity::Warning && d.message.contains("oops")));
}

#[test]
fn test_scripted_character_input() {
    let mut e = engine("~.@").with_input(ScriptedInput::new(["A"]));
    assert_eq!(e.run(None), Ok(RunState::Halted));
    assert_eq!(e.output().text(), "65");
}

#[test]
fn test_character_input_edge_cases() {
    // Empty reply is asked again; extra characters are dropped with a warning
    let mut e = engine("~.@").with_input(ScriptedInput::new(["", "xyz"]));
    assert_eq!(e.run(None), Ok(RunState::Halted));
    assert_eq!(e.output().text(), "120");

    let warnings: Vec<&str> = e
        .diagnostics()
        .filter(|d| d.severity == Severity::Warning)
        .map(|d| d.message.as_str())
        .collect();
    assert_eq!(warnings.len(), 2);
    assert!(warnings[0].contains("\"\""));
    assert!(warnings[1].contains("\"xyz\""));
    assert!(warnings[1].contains("'x'"));
}

#[test]
fn test_input_suspends_until_supplied() {
    let mut e = engine("&.@");

    assert_eq!(
        e.step(),
        Ok(RunState::AwaitingInput(InputRequest::Integer))
    );
    assert_eq!(e.position(), Position::ORIGIN);
    assert_eq!(e.steps(), 0);

    // Still waiting; nothing moves
    assert_eq!(
        e.step(),
        Ok(RunState::AwaitingInput(InputRequest::Integer))
    );
    assert_eq!(e.position(), Position::ORIGIN);

    e.supply_input("12");
    assert_eq!(e.run_state(), RunState::Running);
    assert_eq!(e.run(None), Ok(RunState::Halted));
    assert_eq!(e.output().text(), "12");
    assert_eq!(e.steps(), 3);
}

#[test]
fn test_print_invalid_character() {
    let mut e = engine("01-,@");
    assert_eq!(e.run(None), Ok(RunState::Halted));
    assert_eq!(e.output().text(), "\u{FFFD}");
}

#[test]
fn test_random_direction_is_seeded() {
    let directions = |seed| {
        let grid = parse_grid("?").unwrap();
        let mut e = Engine::new(
            grid,
            EngineConfig {
                extended_mode: false,
                seed: Some(seed),
            },
        );
        (0..200)
            .map(|_| {
                e.step().unwrap();
                e.direction()
            })
            .collect::<Vec<_>>()
    };

    let first = directions(7);
    assert_eq!(first, directions(7));
    for direction in Direction::ALL {
        assert!(first.contains(&direction));
    }
}

#[test]
fn test_halt_reports_completion() {
    let mut e = engine("@");
    assert_eq!(e.step(), Ok(RunState::Halted));
    assert_eq!(e.steps(), 1);
    assert_eq!(e.last_diagnostic().unwrap().severity, Severity::Info);
    assert_eq!(e.position(), Position::ORIGIN);
}

const ALPHABET: &[u8] = b"0123456789+-*/%!`><^v?_|:$.,#gp\"@ ";

fn program_strategy() -> impl Strategy<Value = (usize, usize, Vec<u8>)> {
    (1usize..8, 1usize..6).prop_flat_map(|(w, h)| {
        (
            Just(w),
            Just(h),
            prop::collection::vec(prop::sample::select(ALPHABET), w * h),
        )
    })
}

proptest! {
    #[test]
    fn position_stays_in_bounds((w, h, cells) in program_strategy(), seed in any::<u64>()) {
        let rows = cells
            .chunks(w)
            .map(|row| row.iter().map(|&b| b as char).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n");
        let grid = parse_grid(&rows).unwrap();
        let mut e = Engine::new(grid, EngineConfig { extended_mode: false, seed: Some(seed) });

        for _ in 0..200 {
            let result = e.step();
            let position = e.position();
            prop_assert!(position.x < w && position.y < h);
            match result {
                Ok(RunState::Running) => {}
                Ok(RunState::Paused) => e.resume(),
                Ok(_) | Err(_) => break,
            }
        }
    }
}
