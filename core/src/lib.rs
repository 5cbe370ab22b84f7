#![cfg_attr(all(not(feature = "std"), not(test)), no_std)]

//! Compiler and stack machine for `N`-conditions.
//!
//! A pattern such as `"N>=30&&N<=80"` is compiled once into an [`Instructions`]
//! sequence in Reverse Polish Notation, then evaluated against any number of
//! input values:
//!
//! ```
//! use condcfg_core::compile;
//!
//! let rpn = compile("(N*(N-3)>=10)&&(N<7)&&(N>5)").unwrap();
//! assert_eq!(rpn.to_string(), "N N 3 - * 10 >= N 7 < && N 5 > &&");
//! assert_eq!(rpn.evaluate(6.0), Ok(true));
//! assert_eq!(rpn.evaluate(5.0), Ok(false));
//! ```

extern crate alloc;

// Re-export for convenience so other modules don't need alloc:: prefix
#[allow(unused_imports)]
pub(crate) use alloc::{boxed::Box, format, string::String, string::ToString, vec, vec::Vec};

pub mod compiler;
pub mod vm;

pub use compiler::{SyntaxError, SyntaxErrorKind, compile};
pub use vm::{ExecutionError, Instruction, Instructions, Operand, Operator, VM, evaluate};
