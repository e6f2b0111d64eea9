//! Instruction decoding
//!
//! Each grid cell is decoded into an [`Instruction`] before it is executed.
//! Instructions are grouped by what they touch so each group can be tested on
//! its own:
//!
//! | group | cells |
//! |---|---|
//! | [`Instruction::Literal`] | `0`-`9`, `a`-`f` (extended mode) |
//! | [`Instruction::Arithmetic`] | `+ - * / %` |
//! | [`Instruction::Compare`] | `!` and the backtick |
//! | [`Instruction::Movement`] | `> < ^ v ? _ \|` |
//! | [`Instruction::Stack`] | `: $` |
//! | [`Instruction::Io`] | `. , & ~` |
//! | [`Instruction::Grid`] | `g p` |
//! | control | `" # @` and space |

use super::io::InputRequest;
use super::state::Direction;

/// Binary arithmetic. Operands are popped `b` first, then `a`; the result is
/// `a op b`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArithmeticOp {
    Add,
    Subtract,
    Multiply,
    Divide,
    Remainder,
}

impl ArithmeticOp {
    /// Apply to `a op b`. Returns `None` for a zero divisor.
    ///
    /// Overflow wraps. Division truncates toward zero and the remainder takes
    /// the sign of the dividend.
    pub fn apply(self, a: i64, b: i64) -> Option<i64> {
        match self {
            ArithmeticOp::Add => Some(a.wrapping_add(b)),
            ArithmeticOp::Subtract => Some(a.wrapping_sub(b)),
            ArithmeticOp::Multiply => Some(a.wrapping_mul(b)),
            ArithmeticOp::Divide => (b != 0).then(|| a.wrapping_div(b)),
            ArithmeticOp::Remainder => (b != 0).then(|| a.wrapping_rem(b)),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ArithmeticOp::Add => "addition",
            ArithmeticOp::Subtract => "subtraction",
            ArithmeticOp::Multiply => "multiplication",
            ArithmeticOp::Divide => "division",
            ArithmeticOp::Remainder => "remainder",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    /// `!`: 1 if the popped value is zero
    Not,
    /// `` ` ``: 1 if `a > b`
    Greater,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Movement {
    Go(Direction),
    Random,
    /// `_`: left on zero, right otherwise
    BranchHorizontal,
    /// `|`: up on zero, down otherwise
    BranchVertical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StackOp {
    Duplicate,
    Discard,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IoOp {
    PrintNumber,
    PrintChar,
    Read(InputRequest),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridOp {
    Get,
    Put,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    Literal(i64),
    Arithmetic(ArithmeticOp),
    Compare(CompareOp),
    Movement(Movement),
    Stack(StackOp),
    Io(IoOp),
    Grid(GridOp),
    StringMode,
    Bridge,
    Nop,
    Halt,
}

impl Instruction {
    /// Decode a cell value. Returns `None` for anything that is not an
    /// instruction in the current mode.
    pub fn decode(value: i64, extended_mode: bool) -> Option<Instruction> {
        let c = u32::try_from(value).ok().and_then(char::from_u32)?;
        let instruction = match c {
            '0'..='9' => Instruction::Literal(value - '0' as i64),
            'a'..='f' if extended_mode => Instruction::Literal(value - 'a' as i64 + 10),

            '+' => Instruction::Arithmetic(ArithmeticOp::Add),
            '-' => Instruction::Arithmetic(ArithmeticOp::Subtract),
            '*' => Instruction::Arithmetic(ArithmeticOp::Multiply),
            '/' => Instruction::Arithmetic(ArithmeticOp::Divide),
            '%' => Instruction::Arithmetic(ArithmeticOp::Remainder),

            '!' => Instruction::Compare(CompareOp::Not),
            '`' => Instruction::Compare(CompareOp::Greater),

            '>' => Instruction::Movement(Movement::Go(Direction::Right)),
            '<' => Instruction::Movement(Movement::Go(Direction::Left)),
            '^' => Instruction::Movement(Movement::Go(Direction::Up)),
            'v' => Instruction::Movement(Movement::Go(Direction::Down)),
            '?' => Instruction::Movement(Movement::Random),
            '_' => Instruction::Movement(Movement::BranchHorizontal),
            '|' => Instruction::Movement(Movement::BranchVertical),

            ':' => Instruction::Stack(StackOp::Duplicate),
            '$' => Instruction::Stack(StackOp::Discard),

            '.' => Instruction::Io(IoOp::PrintNumber),
            ',' => Instruction::Io(IoOp::PrintChar),
            '&' => Instruction::Io(IoOp::Read(InputRequest::Integer)),
            '~' => Instruction::Io(IoOp::Read(InputRequest::Character)),

            'g' => Instruction::Grid(GridOp::Get),
            'p' => Instruction::Grid(GridOp::Put),

            '"' => Instruction::StringMode,
            '#' => Instruction::Bridge,
            ' ' => Instruction::Nop,
            '@' => Instruction::Halt,
            _ => return None,
        };
        Some(instruction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(c: char, extended: bool) -> Option<Instruction> {
        Instruction::decode(c as i64, extended)
    }

    #[test]
    fn digits_decode_to_literals() {
        for (i, c) in ('0'..='9').enumerate() {
            assert_eq!(decode(c, false), Some(Instruction::Literal(i as i64)));
        }
    }

    #[test]
    fn hex_digits_need_extended_mode() {
        assert_eq!(decode('a', true), Some(Instruction::Literal(10)));
        assert_eq!(decode('f', true), Some(Instruction::Literal(15)));
        assert_eq!(decode('a', false), None);
        assert_eq!(decode('f', false), None);
        assert_eq!(decode('g', true), Some(Instruction::Grid(GridOp::Get)));
    }

    #[test]
    fn unknown_cells_do_not_decode() {
        assert_eq!(decode('\\', false), None);
        assert_eq!(decode('z', true), None);
        assert_eq!(Instruction::decode(-1, true), None);
        assert_eq!(Instruction::decode(i64::MAX, true), None);
    }

    #[test]
    fn arithmetic_uses_a_op_b() {
        assert_eq!(ArithmeticOp::Subtract.apply(1, 2), Some(-1));
        assert_eq!(ArithmeticOp::Divide.apply(7, 2), Some(3));
        assert_eq!(ArithmeticOp::Divide.apply(-7, 2), Some(-3));
        assert_eq!(ArithmeticOp::Remainder.apply(-7, 2), Some(-1));
        assert_eq!(ArithmeticOp::Remainder.apply(7, -2), Some(1));
    }

    #[test]
    fn zero_divisor_is_rejected() {
        assert_eq!(ArithmeticOp::Divide.apply(6, 0), None);
        assert_eq!(ArithmeticOp::Remainder.apply(6, 0), None);
    }

    #[test]
    fn overflow_wraps() {
        assert_eq!(ArithmeticOp::Add.apply(i64::MAX, 1), Some(i64::MIN));
        assert_eq!(ArithmeticOp::Divide.apply(i64::MIN, -1), Some(i64::MIN));
        assert_eq!(ArithmeticOp::Remainder.apply(i64::MIN, -1), Some(0));
    }
}
