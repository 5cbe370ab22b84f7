use crate::{
    Vec,
    compiler::{SyntaxError, SyntaxErrorKind},
    vm::{Instruction, Instructions, Operator},
};

/// Entry of the compiler's operator stack.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum Pending {
    /// An unresolved `(`.
    Open,
    /// A `!` waiting for its parenthesized group to close.
    Not,
    Binary(Operator),
}

/// Compiles an infix pattern into RPN instructions.
///
/// # Example
///
/// ```
/// use condcfg_core::compile;
///
/// let rpn = compile("5+N*2-3").unwrap();
/// assert_eq!(rpn.to_string(), "5 N 2 * + 3 -");
/// ```
pub fn compile(pattern: &str) -> Result<Instructions, SyntaxError> {
    let result = Compiler::new(pattern).run();
    match &result {
        Ok(code) => tracing::trace!(pattern, rpn = %code, "compiled pattern"),
        Err(err) => tracing::debug!(pattern, %err, "pattern rejected"),
    }
    result
}

struct Compiler<'s> {
    source: &'s str,
    pos: usize,
    pending: Vec<Pending>,
    output: Vec<Instruction>,
}

impl<'s> Compiler<'s> {
    fn new(source: &'s str) -> Self {
        Self {
            source,
            pos: 0,
            pending: Vec::new(),
            output: Vec::new(),
        }
    }

    fn run(mut self) -> Result<Instructions, SyntaxError> {
        while let Some(byte) = self.peek(0) {
            match byte {
                b' ' | b'\t' | b'\r' | b'\n' => self.pos += 1,
                b'(' => {
                    self.pending.push(Pending::Open);
                    self.pos += 1;
                }
                b')' => self.close_group()?,
                b'+' => self.binary(Operator::Add, 1),
                b'-' => self.binary(Operator::Sub, 1),
                b'*' => self.binary(Operator::Mul, 1),
                b'/' => self.binary(Operator::Div, 1),
                b'%' => self.binary(Operator::Rem, 1),
                b'!' => match self.peek(1) {
                    Some(b'(') => {
                        self.pending.push(Pending::Not);
                        self.pos += 1;
                    }
                    Some(b'=') => self.binary(Operator::Ne, 2),
                    _ => return Err(self.invalid_token(self.pos + 1)),
                },
                b'>' => match self.peek(1) {
                    Some(b'=') => self.binary(Operator::Ge, 2),
                    _ => self.binary(Operator::Gt, 1),
                },
                b'<' => match self.peek(1) {
                    Some(b'=') => self.binary(Operator::Le, 2),
                    _ => self.binary(Operator::Lt, 1),
                },
                b'|' => self.doubled(b'|', Operator::Or)?,
                b'&' => self.doubled(b'&', Operator::And)?,
                b'=' => self.doubled(b'=', Operator::Eq)?,
                b'0'..=b'9' => self.number()?,
                b'N' => {
                    self.output.push(Instruction::Placeholder);
                    self.pos += 1;
                }
                _ => return Err(self.invalid_token(self.pos)),
            }
        }

        // An unmatched `(` is dropped here rather than reported.
        while let Some(entry) = self.pending.pop() {
            match entry {
                Pending::Open => {}
                Pending::Not => self.output.push(Instruction::Operator(Operator::Not)),
                Pending::Binary(op) => self.output.push(Instruction::Operator(op)),
            }
        }

        Ok(Instructions::new(self.output))
    }

    fn peek(&self, ahead: usize) -> Option<u8> {
        self.source.as_bytes().get(self.pos + ahead).copied()
    }

    /// Emits every pending operator binding at least as tightly as `op`, then
    /// pushes `op` and skips its `width` bytes.
    fn binary(&mut self, op: Operator, width: usize) {
        let precedence = op.precedence();
        while let Some(&Pending::Binary(top)) = self.pending.last() {
            if top.precedence() < precedence {
                break;
            }
            self.pending.pop();
            self.output.push(Instruction::Operator(top));
        }
        self.pending.push(Pending::Binary(op));
        self.pos += width;
    }

    /// `||`, `&&` and `==`: the operator character must be repeated.
    fn doubled(&mut self, expected: u8, op: Operator) -> Result<(), SyntaxError> {
        match self.peek(1) {
            Some(next) if next == expected => {
                self.binary(op, 2);
                Ok(())
            }
            _ => Err(self.invalid_token(self.pos + 1)),
        }
    }

    fn close_group(&mut self) -> Result<(), SyntaxError> {
        loop {
            match self.pending.pop() {
                Some(Pending::Open) => break,
                Some(Pending::Binary(op)) => self.output.push(Instruction::Operator(op)),
                Some(Pending::Not) => self.output.push(Instruction::Operator(Operator::Not)),
                None => {
                    return Err(SyntaxError::new(
                        SyntaxErrorKind::UnmatchedParen,
                        self.source,
                        self.pos,
                    ));
                }
            }
        }
        if self.pending.last() == Some(&Pending::Not) {
            self.pending.pop();
            self.output.push(Instruction::Operator(Operator::Not));
        }
        self.pos += 1;
        Ok(())
    }

    /// Digits with at most one `.`; the first byte is known to be a digit.
    fn number(&mut self) -> Result<(), SyntaxError> {
        let start = self.pos;
        let mut seen_dot = false;
        while let Some(byte) = self.peek(0) {
            match byte {
                b'0'..=b'9' => {}
                b'.' if !seen_dot => seen_dot = true,
                b'.' => return Err(self.invalid_token(self.pos)),
                _ => break,
            }
            self.pos += 1;
        }
        let value = self.source[start..self.pos]
            .parse::<f64>()
            .map_err(|_| self.invalid_token(start))?;
        self.output.push(Instruction::Number(value));
        Ok(())
    }

    /// Reports the character at `offset`, or the end of input if there is none.
    fn invalid_token(&self, offset: usize) -> SyntaxError {
        let kind = match self.source.get(offset..).and_then(|rest| rest.chars().next()) {
            Some(found) => SyntaxErrorKind::InvalidToken { found },
            None => SyntaxErrorKind::UnexpectedEnd,
        };
        SyntaxError::new(kind, self.source, offset)
    }
}
