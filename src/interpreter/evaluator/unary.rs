use crate::{
    ast::UnaryOperator,
    interpreter::{
        evaluator::core::{EvalResult, Walker},
        value::core::Value,
    },
};

impl Walker<'_> {
    /// Evaluates a unary operation on a value.
    ///
    /// Supported operators:
    /// - `Negate`: coerces the operand to decimal and negates it.
    /// - `Not`: boolean negation.
    /// - `Plus`: coerces the operand to decimal unchanged.
    ///
    /// Negation and identity go through the decimal coercion, so booleans
    /// and numeric text are admitted and the result is always a decimal.
    ///
    /// # Parameters
    /// - `op`: Unary operator.
    /// - `value`: Input value.
    /// - `line`: Line number for error reporting.
    ///
    /// # Returns
    /// The computed `Value` wrapped in `EvalResult`.
    ///
    /// # Example
    /// ```
    /// use rust_decimal::Decimal;
    /// use scriptlet::{
    ///     ast::UnaryOperator,
    ///     interpreter::{evaluator::core::Walker, value::core::Value},
    /// };
    ///
    /// let v = Walker::eval_unary(UnaryOperator::Negate, &Value::Integer(5), 1).unwrap();
    /// assert_eq!(v, Value::Decimal(Decimal::from(-5)));
    ///
    /// let v = Walker::eval_unary(UnaryOperator::Not, &Value::Boolean(false), 1).unwrap();
    /// assert_eq!(v, Value::Boolean(true));
    /// ```
    pub fn eval_unary(op: UnaryOperator, value: &Value, line: usize) -> EvalResult<Value> {
        match op {
            UnaryOperator::Negate => Ok(Value::Decimal(-value.as_decimal(line)?)),
            UnaryOperator::Not => Ok(Value::Boolean(!value.as_boolean(line)?)),
            UnaryOperator::Plus => Ok(Value::Decimal(value.as_decimal(line)?)),
        }
    }
}
