use crate::{
    ast::BinaryOperator,
    interpreter::{
        evaluator::core::{EvalResult, Walker},
        value::core::Value,
    },
};

impl Walker<'_> {
    /// Evaluates a bit shift.
    ///
    /// Both operands coerce to integers through the full integer coercion
    /// (decimals truncate, booleans map to 0/1, parseable text parses). The
    /// shift amount wraps modulo the integer width, matching the wrapping
    /// integer semantics of the arithmetic operators.
    ///
    /// # Parameters
    /// - `op`: `ShiftLeft` or `ShiftRight`.
    /// - `left`: The value being shifted.
    /// - `right`: The shift amount.
    /// - `line`: Line number for error reporting.
    ///
    /// # Returns
    /// An `EvalResult<Value>` containing the shifted integer.
    pub(crate) fn eval_shift(op: BinaryOperator,
                             left: &Value,
                             right: &Value,
                             line: usize)
                             -> EvalResult<Value> {
        let value = left.as_integer(line)?;
        #[allow(clippy::cast_sign_loss)]
        let amount = right.as_integer(line)? as u32;

        let shifted = match op {
            BinaryOperator::ShiftLeft => value.wrapping_shl(amount),
            BinaryOperator::ShiftRight => value.wrapping_shr(amount),
            _ => unreachable!("eval_shift used with non shift operator"),
        };

        Ok(Value::Integer(shifted))
    }
}
