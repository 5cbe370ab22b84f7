//! Pattern compilation errors.

use core::ops::Range;

use thiserror::Error;

use crate::String;

/// A pattern that cannot be compiled.
///
/// Compilation is deterministic, so a pattern that fails once fails forever;
/// callers are expected to remember the failure instead of retrying.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("'{pattern}' {kind} at {offset}")]
pub struct SyntaxError {
    pub kind: SyntaxErrorKind,
    /// The full pattern being compiled.
    pub pattern: String,
    /// Byte offset of the offending character in `pattern`.
    pub offset: usize,
}

/// Specific kinds of syntax errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SyntaxErrorKind {
    /// A character that cannot start or continue a token here.
    #[error("has invalid token {found:?}")]
    InvalidToken { found: char },
    /// An operator that needs a second character is at the end of input.
    #[error("ends unexpectedly")]
    UnexpectedEnd,
    /// A `)` without a matching `(`.
    #[error("has no '(' found for ')'")]
    UnmatchedParen,
}

impl SyntaxError {
    pub fn new(kind: SyntaxErrorKind, pattern: &str, offset: usize) -> Self {
        Self {
            kind,
            pattern: String::from(pattern),
            offset,
        }
    }

    /// Byte range of the offending character, empty at end of input.
    pub fn span(&self) -> Range<usize> {
        let width = match self.kind {
            SyntaxErrorKind::InvalidToken { found } => found.len_utf8(),
            SyntaxErrorKind::UnmatchedParen => 1,
            SyntaxErrorKind::UnexpectedEnd => 0,
        };
        self.offset..self.offset + width
    }

    /// Short description without the pattern, for annotated rendering.
    pub fn label(&self) -> String {
        match self.kind {
            SyntaxErrorKind::InvalidToken { found } => crate::format!("invalid token {:?}", found),
            SyntaxErrorKind::UnexpectedEnd => String::from("operator is incomplete"),
            SyntaxErrorKind::UnmatchedParen => String::from("no '(' found for this ')'"),
        }
    }
}
