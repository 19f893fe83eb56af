use crate::{
    ast::BinaryOperator,
    interpreter::{
        evaluator::core::{EvalResult, Walker},
        value::core::Value,
    },
};

impl Walker<'_> {
    /// Evaluates a logical operation between two boolean values.
    ///
    /// The operands are converted to booleans using `as_boolean`. Supported
    /// operators are logical AND, XOR and OR. Both operands are evaluated
    /// before this function runs, so there is no short-circuiting.
    ///
    /// # Parameters
    /// - `op`: The logical operator.
    /// - `left`: Left operand.
    /// - `right`: Right operand.
    /// - `line`: Line number for error reporting.
    ///
    /// # Returns
    /// An `EvalResult<Value>` containing a boolean.
    pub(crate) fn eval_logic(op: BinaryOperator,
                             left: &Value,
                             right: &Value,
                             line: usize)
                             -> EvalResult<Value> {
        use BinaryOperator::{And, Or, Xor};

        let (a, b) = (left.as_boolean(line)?, right.as_boolean(line)?);

        match op {
            And => Ok(Value::Boolean(a && b)),
            Xor => Ok(Value::Boolean(a ^ b)),
            Or => Ok(Value::Boolean(a || b)),
            _ => unreachable!("eval_logic used with non logical operator"),
        }
    }
}
