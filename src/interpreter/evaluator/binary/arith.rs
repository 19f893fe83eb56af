use crate::{
    ast::BinaryOperator,
    error::RuntimeError,
    interpreter::{
        evaluator::core::{EvalResult, Walker},
        value::core::Value,
    },
};

impl Walker<'_> {
    /// Evaluates an addition.
    ///
    /// Paths, in order of precedence:
    /// - either operand is text: both operands are rendered canonically and
    ///   concatenated;
    /// - two integers: wrapping two's-complement addition;
    /// - any other numeric pair: both widen to decimal;
    /// - a datetime plus a duration shifts the instant;
    /// - two durations add.
    ///
    /// Everything else is a type error.
    pub(crate) fn eval_add(left: &Value, right: &Value, line: usize) -> EvalResult<Value> {
        match (left, right) {
            (Value::Text(_), _) | (_, Value::Text(_)) => {
                Ok(Value::Text(format!("{left}{right}")))
            },
            (Value::Integer(a), Value::Integer(b)) => Ok(Value::Integer(a.wrapping_add(*b))),
            (a, b) if a.is_numeric() && b.is_numeric() => {
                let (x, y) = (a.as_decimal(line)?, b.as_decimal(line)?);
                x.checked_add(y)
                 .map(Value::Decimal)
                 .ok_or_else(|| decimal_overflow(line))
            },
            (Value::DateTime(instant), Value::Duration(span)) => {
                instant.checked_add_signed(*span)
                       .map(Value::DateTime)
                       .ok_or_else(|| temporal_overflow(line))
            },
            (Value::Duration(a), Value::Duration(b)) => {
                a.checked_add(b)
                 .map(Value::Duration)
                 .ok_or_else(|| temporal_overflow(line))
            },
            _ => Err(operand_mismatch(BinaryOperator::Add, left, right, line)),
        }
    }

    /// Evaluates a subtraction.
    ///
    /// Two integers subtract with wrapping; other numeric pairs widen to
    /// decimal. A duration subtracted from a datetime shifts the instant,
    /// two datetimes produce the duration between them, and two durations
    /// subtract. There is no text path.
    pub(crate) fn eval_sub(left: &Value, right: &Value, line: usize) -> EvalResult<Value> {
        match (left, right) {
            (Value::Integer(a), Value::Integer(b)) => Ok(Value::Integer(a.wrapping_sub(*b))),
            (a, b) if a.is_numeric() && b.is_numeric() => {
                let (x, y) = (a.as_decimal(line)?, b.as_decimal(line)?);
                x.checked_sub(y)
                 .map(Value::Decimal)
                 .ok_or_else(|| decimal_overflow(line))
            },
            (Value::DateTime(instant), Value::Duration(span)) => {
                instant.checked_sub_signed(*span)
                       .map(Value::DateTime)
                       .ok_or_else(|| temporal_overflow(line))
            },
            (Value::DateTime(a), Value::DateTime(b)) => {
                Ok(Value::Duration(a.signed_duration_since(*b)))
            },
            (Value::Duration(a), Value::Duration(b)) => {
                a.checked_sub(b)
                 .map(Value::Duration)
                 .ok_or_else(|| temporal_overflow(line))
            },
            _ => Err(operand_mismatch(BinaryOperator::Sub, left, right, line)),
        }
    }

    /// Evaluates multiplication, division or modulo.
    ///
    /// Both operands must be numeric and widen to decimal; the integer pair
    /// takes the decimal path too. Division and modulo by zero are
    /// arithmetic errors.
    pub(crate) fn eval_multiplicative(op: BinaryOperator,
                                      left: &Value,
                                      right: &Value,
                                      line: usize)
                                      -> EvalResult<Value> {
        use BinaryOperator::{Div, Mod, Mul};

        if !left.is_numeric() || !right.is_numeric() {
            return Err(operand_mismatch(op, left, right, line));
        }

        let (x, y) = (left.as_decimal(line)?, right.as_decimal(line)?);

        let result = match op {
            Mul => x.checked_mul(y),
            Div => {
                if y.is_zero() {
                    return Err(RuntimeError::ArithmeticError { details:
                                                                   "Division by zero".to_string(),
                                                               line });
                }
                x.checked_div(y)
            },
            Mod => {
                if y.is_zero() {
                    return Err(RuntimeError::ArithmeticError { details:
                                                                   "Modulo by zero".to_string(),
                                                               line });
                }
                x.checked_rem(y)
            },
            _ => unreachable!("eval_multiplicative used with non multiplicative operator"),
        };

        result.map(Value::Decimal)
              .ok_or_else(|| decimal_overflow(line))
    }
}

fn operand_mismatch(op: BinaryOperator, left: &Value, right: &Value, line: usize) -> RuntimeError {
    RuntimeError::TypeError { details: format!("Cannot use {op} on {} and {}",
                                               left.tag(),
                                               right.tag()),
                              line }
}

fn decimal_overflow(line: usize) -> RuntimeError {
    RuntimeError::ArithmeticError { details: "Decimal result is out of range".to_string(),
                                    line }
}

fn temporal_overflow(line: usize) -> RuntimeError {
    RuntimeError::ArithmeticError { details: "Temporal result is out of range".to_string(),
                                    line }
}
