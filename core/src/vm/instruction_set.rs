//! Instruction set of the condition stack machine.
//!
//! A compiled pattern is a flat sequence of [`Instruction`]s in Reverse Polish
//! Notation: operands are pushed, operators pop their arguments and push the
//! result.
//!
//! # Stack Discipline
//!
//! Stack effect notation: `[..., operand1, operand2] -> [..., result]`
//!
//! | Class      | Operators                 | Stack effect                    |
//! |------------|---------------------------|---------------------------------|
//! | Arithmetic | `+ - * / %`               | `[.., num, num] -> [.., num]`   |
//! | Comparison | `> < >= <= == !=`         | `[.., num, num] -> [.., bool]`  |
//! | Logical    | `&& \|\|`                 | `[.., bool, bool] -> [.., bool]`|
//! | Negation   | `!`                       | `[.., bool] -> [.., bool]`      |

use core::fmt;

use crate::String;

/// Operators understood by the compiler and the VM.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Operator {
    Or,
    And,
    Gt,
    Lt,
    Ge,
    Le,
    Eq,
    Ne,
    Add,
    Sub,
    Rem,
    Mul,
    Div,
    /// Prefix negation of a parenthesized group.
    Not,
}

/// Operator symbols and binding ranks, lowest first.
///
/// `!` has rank 0: it is resolved structurally at its closing parenthesis and
/// never popped by precedence resolution.
pub const OPERATOR_TABLE: [(&str, Operator, u8); 14] = [
    ("||", Operator::Or, 1),
    ("&&", Operator::And, 1),
    (">", Operator::Gt, 2),
    ("<", Operator::Lt, 2),
    (">=", Operator::Ge, 2),
    ("<=", Operator::Le, 2),
    ("==", Operator::Eq, 2),
    ("!=", Operator::Ne, 2),
    ("+", Operator::Add, 3),
    ("-", Operator::Sub, 3),
    ("%", Operator::Rem, 4),
    ("*", Operator::Mul, 4),
    ("/", Operator::Div, 4),
    ("!", Operator::Not, 0),
];

impl Operator {
    /// Looks up an operator by its source symbol.
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        OPERATOR_TABLE
            .iter()
            .find(|(s, _, _)| *s == symbol)
            .map(|(_, op, _)| *op)
    }

    pub const fn symbol(self) -> &'static str {
        OPERATOR_TABLE[self as usize].0
    }

    pub const fn precedence(self) -> u8 {
        OPERATOR_TABLE[self as usize].2
    }

    pub const fn is_arithmetic(self) -> bool {
        matches!(
            self,
            Operator::Add | Operator::Sub | Operator::Mul | Operator::Div | Operator::Rem
        )
    }

    pub const fn is_comparison(self) -> bool {
        matches!(
            self,
            Operator::Gt | Operator::Lt | Operator::Ge | Operator::Le | Operator::Eq | Operator::Ne
        )
    }

    pub const fn is_logical(self) -> bool {
        matches!(self, Operator::And | Operator::Or)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// A single RPN instruction.
#[derive(Debug, Clone, PartialEq)]
pub enum Instruction {
    /// Push a numeric literal.
    /// Stack: [...] -> [..., number]
    Number(f64),

    /// Push the runtime input value bound to `N`.
    /// Stack: [...] -> [..., n]
    Placeholder,

    /// Apply an operator to the top of the stack.
    Operator(Operator),

    /// Unvalidated token of a hand-built sequence, parsed as a number when executed.
    /// The compiler never emits this.
    Raw(String),
}

impl Instruction {
    /// Classifies a textual RPN token.
    pub fn from_token(token: &str) -> Self {
        if token == "N" {
            return Instruction::Placeholder;
        }
        match Operator::from_symbol(token) {
            Some(op) => Instruction::Operator(op),
            None => Instruction::Raw(String::from(token)),
        }
    }

    /// Net change of the operand stack height when executed.
    pub(crate) const fn stack_effect(&self) -> isize {
        match self {
            Instruction::Number(_) | Instruction::Placeholder | Instruction::Raw(_) => 1,
            Instruction::Operator(Operator::Not) => 0,
            Instruction::Operator(_) => -1,
        }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Instruction::Number(value) => write!(f, "{}", value),
            Instruction::Placeholder => f.write_str("N"),
            Instruction::Operator(op) => write!(f, "{}", op),
            Instruction::Raw(text) => f.write_str(text),
        }
    }
}
