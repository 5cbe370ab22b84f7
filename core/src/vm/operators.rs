//! Operator implementations.

use crate::vm::{ExecutionError, Operator};

/// Evaluate an arithmetic operator on two numbers.
///
/// Follows IEEE 754 semantics except that `/` and `%` reject a zero divisor.
/// `%` truncates both operands to integers first.
pub(super) fn eval_arithmetic(op: Operator, left: f64, right: f64) -> Result<f64, ExecutionError> {
    match op {
        Operator::Add => Ok(left + right),
        Operator::Sub => Ok(left - right),
        Operator::Mul => Ok(left * right),
        Operator::Div => {
            if right == 0.0 {
                Err(ExecutionError::DivideByZero)
            } else {
                Ok(left / right)
            }
        }
        Operator::Rem => {
            let (left, right) = (left as i64, right as i64);
            if right == 0 {
                Err(ExecutionError::DivideByZero)
            } else {
                // wrapping_rem handles i64::MIN % -1
                Ok(left.wrapping_rem(right) as f64)
            }
        }
        _ => Err(ExecutionError::InvalidExpression),
    }
}

/// Evaluate a comparison operator on two numbers.
pub(super) fn eval_comparison(op: Operator, left: f64, right: f64) -> Result<bool, ExecutionError> {
    match op {
        Operator::Gt => Ok(left > right),
        Operator::Lt => Ok(left < right),
        Operator::Ge => Ok(left >= right),
        Operator::Le => Ok(left <= right),
        Operator::Eq => Ok(left == right),
        Operator::Ne => Ok(left != right),
        _ => Err(ExecutionError::InvalidCondition),
    }
}

/// Evaluate a binary logical operator. Both operands are already evaluated.
pub(super) fn eval_logical(op: Operator, left: bool, right: bool) -> Result<bool, ExecutionError> {
    match op {
        Operator::And => Ok(left && right),
        Operator::Or => Ok(left || right),
        _ => Err(ExecutionError::InvalidCondition),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_sub_mul() {
        assert_eq!(eval_arithmetic(Operator::Add, 2.0, 3.5).unwrap(), 5.5);
        assert_eq!(eval_arithmetic(Operator::Sub, 3.0, 10.0).unwrap(), -7.0);
        assert_eq!(eval_arithmetic(Operator::Mul, -2.0, 5.0).unwrap(), -10.0);
    }

    #[test]
    fn test_div() {
        assert_eq!(eval_arithmetic(Operator::Div, 40.0, 100.0).unwrap(), 0.4);
        assert_eq!(
            eval_arithmetic(Operator::Div, 1.0, 0.0),
            Err(ExecutionError::DivideByZero)
        );
        assert_eq!(
            eval_arithmetic(Operator::Div, 1.0, -0.0),
            Err(ExecutionError::DivideByZero)
        );
    }

    #[test]
    fn test_rem_truncates_operands() {
        assert_eq!(eval_arithmetic(Operator::Rem, 7.9, 2.0).unwrap(), 1.0);
        assert_eq!(eval_arithmetic(Operator::Rem, 9.0, 2.7).unwrap(), 1.0);
        assert_eq!(eval_arithmetic(Operator::Rem, -7.0, 2.0).unwrap(), -1.0);
    }

    #[test]
    fn test_rem_by_zero() {
        assert_eq!(
            eval_arithmetic(Operator::Rem, 5.0, 0.0),
            Err(ExecutionError::DivideByZero)
        );
        // 0.5 truncates to 0
        assert_eq!(
            eval_arithmetic(Operator::Rem, 5.0, 0.5),
            Err(ExecutionError::DivideByZero)
        );
    }

    #[test]
    fn test_rem_does_not_overflow() {
        assert_eq!(
            eval_arithmetic(Operator::Rem, i64::MIN as f64, -1.0).unwrap(),
            0.0
        );
    }

    #[test]
    fn test_comparisons() {
        assert!(eval_comparison(Operator::Gt, 3.0, 2.0).unwrap());
        assert!(!eval_comparison(Operator::Lt, 3.0, 2.0).unwrap());
        assert!(eval_comparison(Operator::Ge, 2.0, 2.0).unwrap());
        assert!(eval_comparison(Operator::Le, 2.0, 2.0).unwrap());
        assert!(eval_comparison(Operator::Eq, 0.5, 0.5).unwrap());
        assert!(eval_comparison(Operator::Ne, 0.5, 0.25).unwrap());
        assert!(!eval_comparison(Operator::Eq, f64::NAN, f64::NAN).unwrap());
    }

    #[test]
    fn test_logical() {
        assert!(eval_logical(Operator::And, true, true).unwrap());
        assert!(!eval_logical(Operator::And, true, false).unwrap());
        assert!(eval_logical(Operator::Or, false, true).unwrap());
        assert!(!eval_logical(Operator::Or, false, false).unwrap());
    }

    #[test]
    fn test_wrong_operator_class() {
        assert_eq!(
            eval_arithmetic(Operator::Gt, 1.0, 2.0),
            Err(ExecutionError::InvalidExpression)
        );
        assert_eq!(
            eval_comparison(Operator::Add, 1.0, 2.0),
            Err(ExecutionError::InvalidCondition)
        );
        assert_eq!(
            eval_logical(Operator::Not, true, true),
            Err(ExecutionError::InvalidCondition)
        );
    }
}
