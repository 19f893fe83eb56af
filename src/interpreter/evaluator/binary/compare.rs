use std::cmp::Ordering;

use crate::{
    ast::BinaryOperator,
    error::RuntimeError,
    interpreter::{
        evaluator::core::{EvalResult, Walker},
        value::core::Value,
    },
};

/// Tests whether an operator is `==` or `!=`.
const fn is_equality(op: BinaryOperator) -> bool {
    matches!(op, BinaryOperator::Equal | BinaryOperator::NotEqual)
}

impl Walker<'_> {
    /// Evaluates a comparison of the form `Value <Operator> Value`.
    ///
    /// The ordering is produced by the first applicable entry of the host's
    /// comparer registry: the null-aware comparer when either side is null,
    /// the numeric comparer when both sides are numeric, then any
    /// host-registered comparers, and finally the default comparer over the
    /// natural ordering of scalars. The resulting ordering is thresholded
    /// per operator.
    ///
    /// Values with no common ordering fail relational comparison with a
    /// type error, but equality between them degrades to a strict
    /// same-variant equality check instead of failing, so values of two
    /// incomparable variants simply compare not-equal.
    ///
    /// # Parameters
    /// - `op`: The comparison operator.
    /// - `left`: The left-hand value.
    /// - `right`: The right-hand value.
    /// - `line`: Current line number used for error reporting.
    ///
    /// # Returns
    /// An `EvalResult<Value>` containing a boolean result.
    pub fn eval_comparison(&self,
                           op: BinaryOperator,
                           left: &Value,
                           right: &Value,
                           line: usize)
                           -> EvalResult<Value> {
        use BinaryOperator::{Equal, Greater, GreaterEqual, Less, LessEqual, NotEqual};

        let entry = self.host.comparers().resolve(left, right);

        let ordering = match (entry.compare)(left, right, line) {
            Ok(ordering) => ordering,
            Err(RuntimeError::TypeError { .. }) if is_equality(op) => {
                let equal = left == right;
                return Ok(Value::Boolean(if op == Equal { equal } else { !equal }));
            },
            Err(error) => return Err(error),
        };

        Ok(Value::Boolean(match op {
                              Less => ordering == Ordering::Less,
                              LessEqual => ordering != Ordering::Greater,
                              Greater => ordering == Ordering::Greater,
                              GreaterEqual => ordering != Ordering::Less,
                              Equal => ordering == Ordering::Equal,
                              NotEqual => ordering != Ordering::Equal,
                              _ => unreachable!("eval_comparison used with non comparison operator"),
                          }))
    }
}
