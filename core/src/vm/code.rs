use core::{fmt, slice, str::FromStr};

use crate::{
    String, Vec,
    compiler::{self, SyntaxError},
    vm::{ExecutionError, Instruction, runtime},
};

/// A compiled pattern: an immutable RPN instruction sequence.
///
/// Produced once by [`compiler::compile`] and replayable against any number of
/// input values. Evaluation never mutates the sequence, so a single
/// `Instructions` can be shared across threads.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Instructions {
    instructions: Vec<Instruction>,
    max_stack_size: usize,
}

impl Instructions {
    pub(crate) fn new(instructions: Vec<Instruction>) -> Self {
        let mut depth: isize = 0;
        let mut max_depth: isize = 0;
        for instruction in &instructions {
            depth += instruction.stack_effect();
            max_depth = max_depth.max(depth);
        }
        Self {
            instructions,
            max_stack_size: max_depth as usize,
        }
    }

    /// Builds a sequence from textual RPN tokens, e.g. `["N", "2", ">"]`.
    ///
    /// Tokens are not validated: anything that is neither `N` nor an operator
    /// symbol becomes [`Instruction::Raw`] and is parsed as a number when the
    /// sequence is evaluated.
    pub fn from_tokens<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::new(
            tokens
                .into_iter()
                .map(|token| Instruction::from_token(token.as_ref()))
                .collect(),
        )
    }

    /// Evaluates the sequence with `N` bound to `n`.
    pub fn evaluate(&self, n: f64) -> Result<bool, ExecutionError> {
        runtime::evaluate(self, n)
    }

    pub fn as_slice(&self) -> &[Instruction] {
        &self.instructions
    }

    pub fn iter(&self) -> slice::Iter<'_, Instruction> {
        self.instructions.iter()
    }

    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    /// Deepest operand stack a well-formed run of this sequence reaches.
    pub fn max_stack_size(&self) -> usize {
        self.max_stack_size
    }

    /// The sequence as textual tokens, the inverse of [`Instructions::from_tokens`].
    pub fn tokens(&self) -> Vec<String> {
        use crate::ToString;
        self.instructions.iter().map(|i| i.to_string()).collect()
    }
}

impl fmt::Display for Instructions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, instruction) in self.instructions.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}", instruction)?;
        }
        Ok(())
    }
}

impl FromStr for Instructions {
    type Err = SyntaxError;

    fn from_str(pattern: &str) -> Result<Self, Self::Err> {
        compiler::compile(pattern)
    }
}

impl<'a> IntoIterator for &'a Instructions {
    type Item = &'a Instruction;
    type IntoIter = slice::Iter<'a, Instruction>;

    fn into_iter(self) -> Self::IntoIter {
        self.instructions.iter()
    }
}
