use super::operators::{eval_arithmetic, eval_comparison, eval_logical};

use crate::vm::{ExecutionError, Instruction, Instructions, Operator, Stack};

/// A value on the VM's operand stack.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Operand {
    Number(f64),
    Boolean(bool),
}

/// Stack machine executing an [`Instructions`] sequence.
///
/// The VM only borrows the code, so any number of VMs can run the same
/// sequence concurrently. Reusing one VM for several inputs keeps its stack
/// allocation; every [`VM::run`] starts from an empty stack.
pub struct VM<'c> {
    code: &'c Instructions,
    stack: Stack<Operand>,
}

impl<'c> VM<'c> {
    pub fn new(code: &'c Instructions) -> Self {
        VM {
            code,
            stack: Stack::with_capacity(code.max_stack_size()),
        }
    }

    /// Runs the code with the placeholder `N` bound to `n`.
    pub fn run(&mut self, n: f64) -> Result<bool, ExecutionError> {
        self.stack.clear();
        for instruction in self.code {
            match instruction {
                Instruction::Number(value) => self.stack.push(Operand::Number(*value)),
                Instruction::Placeholder => self.stack.push(Operand::Number(n)),
                Instruction::Operator(op) => self.execute(*op)?,
                Instruction::Raw(text) => {
                    let value = text
                        .parse::<f64>()
                        .map_err(|_| ExecutionError::InvalidNumber { text: text.clone() })?;
                    self.stack.push(Operand::Number(value));
                }
            }
        }

        match (self.stack.pop(), self.stack.is_empty()) {
            (Some(Operand::Boolean(result)), true) => Ok(result),
            _ => Err(ExecutionError::InvalidCondition),
        }
    }

    fn execute(&mut self, op: Operator) -> Result<(), ExecutionError> {
        let result = if op.is_arithmetic() {
            let (left, right) = self.pop_numbers(ExecutionError::InvalidExpression)?;
            Operand::Number(eval_arithmetic(op, left, right)?)
        } else if op.is_comparison() {
            let (left, right) = self.pop_numbers(ExecutionError::InvalidCondition)?;
            Operand::Boolean(eval_comparison(op, left, right)?)
        } else if op.is_logical() {
            let right = self.pop_boolean()?;
            let left = self.pop_boolean()?;
            Operand::Boolean(eval_logical(op, left, right)?)
        } else {
            Operand::Boolean(!self.pop_boolean()?)
        };
        self.stack.push(result);
        Ok(())
    }

    /// Pops `[..., left, right]`, failing with `err` on underflow or a boolean.
    fn pop_numbers(&mut self, err: ExecutionError) -> Result<(f64, f64), ExecutionError> {
        match (self.stack.pop(), self.stack.pop()) {
            (Some(Operand::Number(right)), Some(Operand::Number(left))) => Ok((left, right)),
            _ => Err(err),
        }
    }

    fn pop_boolean(&mut self) -> Result<bool, ExecutionError> {
        match self.stack.pop() {
            Some(Operand::Boolean(value)) => Ok(value),
            _ => Err(ExecutionError::InvalidCondition),
        }
    }
}

/// Evaluates `code` once with `N` bound to `n`.
pub fn evaluate(code: &Instructions, n: f64) -> Result<bool, ExecutionError> {
    let result = VM::new(code).run(n);
    match &result {
        Ok(verdict) => tracing::trace!(n, verdict, "evaluated condition"),
        Err(err) => tracing::debug!(n, %err, "condition evaluation failed"),
    }
    result
}
