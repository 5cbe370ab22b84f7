//! Stack machine that evaluates compiled conditions.
//!
//! ## Design Principles
//!
//! - **Never panic**: stack underflow and mistyped operands are errors, never crashes
//! - **Stateless**: every run starts from an empty stack; the code is only borrowed
//! - **Single pass**: instructions execute strictly left to right, no jumps

mod code;
mod error;
mod instruction_set;
mod operators;
mod runtime;
mod stack;

pub use code::Instructions;
pub use error::ExecutionError;
pub use instruction_set::{Instruction, OPERATOR_TABLE, Operator};
pub use runtime::{Operand, VM, evaluate};

pub(crate) use stack::Stack;
