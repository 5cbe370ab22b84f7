//! Compiler from infix `N`-conditions to RPN instructions.
//!
//! ## Design
//!
//! - Single left-to-right scan; tokenizing and parsing happen in the same pass
//! - Operator-precedence resolution with an explicit operator stack, no AST
//! - Emits a flat [`Instructions`](crate::vm::Instructions) sequence for the VM

mod error;
mod rpn;


pub use error::{SyntaxError, SyntaxErrorKind};
pub use rpn::compile;
