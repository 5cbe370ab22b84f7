//! Cached patterns for validating config values.

use std::fmt;
use std::sync::{Mutex, PoisonError};

use condcfg_core::{Instructions, SyntaxError, compile};
use once_cell::sync::OnceCell;
use regex::Regex;

use crate::PatternError;

/// A pattern source that validates numbers as an `N`-condition and strings
/// as a regular expression.
///
/// Construction never fails. Each form is compiled on first use and cached,
/// including a compile failure, which makes every later query of that form
/// return `false`.
///
/// ```
/// use condcfg::Pattern;
///
/// let p = Pattern::new("N>=30&&N<=80");
/// assert!(p.validate_int(30));
/// assert!(!p.validate_float(80.5));
/// assert!(p.err().is_none());
/// ```
pub struct Pattern {
    source: String,
    condition: OnceCell<Result<Instructions, SyntaxError>>,
    regex: OnceCell<Result<Regex, regex::Error>>,
    last_error: Mutex<Option<PatternError>>,
}

impl Pattern {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            condition: OnceCell::new(),
            regex: OnceCell::new(),
            last_error: Mutex::new(None),
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// The compiled condition, compiling it on first call.
    pub fn instructions(&self) -> Result<&Instructions, &SyntaxError> {
        self.condition.get_or_init(|| compile(&self.source)).as_ref()
    }

    /// The compiled regular expression, compiling it on first call.
    pub fn regex(&self) -> Result<&Regex, &regex::Error> {
        self.regex.get_or_init(|| Regex::new(&self.source)).as_ref()
    }

    pub fn check_int(&self, n: i64) -> Result<bool, PatternError> {
        self.check_float(n as f64)
    }

    pub fn check_float(&self, n: f64) -> Result<bool, PatternError> {
        let code = self.instructions().map_err(|err| PatternError::Syntax(err.clone()))?;
        code.evaluate(n).map_err(|source| PatternError::Execution {
            pattern: self.source.clone(),
            n,
            source,
        })
    }

    pub fn check_string(&self, s: &str) -> Result<bool, PatternError> {
        let re = self.regex().map_err(|err| PatternError::Regex(err.clone()))?;
        Ok(re.is_match(s))
    }

    pub fn validate_int(&self, n: i64) -> bool {
        self.record(self.check_int(n))
    }

    pub fn validate_float(&self, n: f64) -> bool {
        self.record(self.check_float(n))
    }

    pub fn validate_string(&self, s: &str) -> bool {
        self.record(self.check_string(s))
    }

    /// The last error seen by a `validate_*` call, if any.
    pub fn err(&self) -> Option<PatternError> {
        self.last_error
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn record(&self, result: Result<bool, PatternError>) -> bool {
        match result {
            Ok(valid) => valid,
            Err(err) => {
                tracing::debug!(pattern = %self.source, %err, "validation failed");
                *self.last_error.lock().unwrap_or_else(PoisonError::into_inner) = Some(err);
                false
            }
        }
    }
}

impl fmt::Debug for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pattern")
            .field("source", &self.source)
            .field("condition", &self.condition.get())
            .finish_non_exhaustive()
    }
}

impl Clone for Pattern {
    fn clone(&self) -> Self {
        Self {
            source: self.source.clone(),
            condition: self.condition.clone(),
            regex: self.regex.clone(),
            last_error: Mutex::new(self.err()),
        }
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

impl From<&str> for Pattern {
    fn from(source: &str) -> Self {
        Pattern::new(source)
    }
}

impl From<String> for Pattern {
    fn from(source: String) -> Self {
        Pattern::new(source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use condcfg_core::{ExecutionError, SyntaxErrorKind};

    #[test]
    fn test_compiles_lazily_once() {
        let p = Pattern::new("N>1");
        assert!(p.condition.get().is_none());
        assert!(p.validate_int(2));
        let first = p.instructions().unwrap() as *const Instructions;
        assert!(!p.validate_int(0));
        assert_eq!(first, p.instructions().unwrap() as *const Instructions);
    }

    #[test]
    fn test_syntax_error_is_terminal() {
        let p = Pattern::new("N>1|N<0");
        assert!(!p.validate_int(5));
        assert!(!p.validate_float(-5.0));
        match p.err() {
            Some(PatternError::Syntax(err)) => {
                assert_eq!(err.kind, SyntaxErrorKind::InvalidToken { found: 'N' });
            }
            other => panic!("expected syntax error, got {:?}", other),
        }
    }

    #[test]
    fn test_execution_error_does_not_poison() {
        let p = Pattern::new("10/N>1");
        assert!(!p.validate_int(0));
        assert!(matches!(
            p.err(),
            Some(PatternError::Execution {
                source: ExecutionError::DivideByZero,
                ..
            })
        ));
        assert!(p.validate_int(5));
    }

    #[test]
    fn test_bad_regex() {
        let p = Pattern::new("^[^12&%*");
        assert!(!p.validate_string("1"));
        assert!(matches!(p.err(), Some(PatternError::Regex(_))));
    }

    #[test]
    fn test_string_and_condition_are_independent() {
        let p = Pattern::new("^N>1$");
        assert!(p.validate_string("N>1"));
        assert!(!p.validate_int(2));
        assert!(matches!(p.err(), Some(PatternError::Syntax(_))));
        assert!(p.validate_string("N>1"));
    }

    #[test]
    fn test_clone_keeps_compiled_state() {
        let p = Pattern::new("N%2==0");
        assert!(p.validate_int(4));
        let q = p.clone();
        assert!(q.condition.get().is_some());
        assert!(q.validate_int(8));
    }

    #[test]
    fn test_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Pattern>();
    }
}
