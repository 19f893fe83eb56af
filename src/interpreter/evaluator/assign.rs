use crate::{
    ast::{AssignOperator, Assignment},
    error::RuntimeError,
    interpreter::{
        evaluator::core::{EvalResult, Walker},
        value::core::Value,
    },
};

impl Walker<'_> {
    /// Executes an assignment statement.
    ///
    /// Plain `=` evaluates the right-hand side and stores it. Compound
    /// operators require the target to hold an existing non-null value,
    /// apply the corresponding binary operator and store the result.
    /// Increment and decrement coerce the current value to an integer,
    /// step it and store; they too require a non-null current value.
    ///
    /// The right-hand side is always evaluated before the store. Writes
    /// target the walker's local scope, but the current value is read
    /// through the full scope chain, so a compound assignment can lift a
    /// host variable into the local scope.
    pub fn eval_assignment(&mut self, assignment: &Assignment) -> EvalResult<()> {
        let Assignment { target, op, value, line } = assignment;

        match op {
            AssignOperator::Assign => {
                let rhs = match value {
                    Some(expr) => self.eval_expression(expr)?,
                    None => Value::Null,
                };
                self.scope.define(target, rhs);
            },

            AssignOperator::Increment | AssignOperator::Decrement => {
                let current = self.lookup_variable(target)?;
                if current.is_null() {
                    return Err(RuntimeError::UnboundError { name: target.clone(),
                                                            line: *line, });
                }

                let n = current.as_integer(*line)?;
                let next = if *op == AssignOperator::Increment {
                    n.wrapping_add(1)
                } else {
                    n.wrapping_sub(1)
                };
                self.scope.define(target, Value::Integer(next));
            },

            compound => {
                let current = self.lookup_variable(target)?;
                if current.is_null() {
                    return Err(RuntimeError::UnboundError { name: target.clone(),
                                                            line: *line, });
                }

                let rhs = match value {
                    Some(expr) => self.eval_expression(expr)?,
                    None => Value::Null,
                };

                let Some(binary) = compound.binary_operator() else {
                    unreachable!("plain and step assignments are handled above")
                };

                let result = self.eval_binary(binary, &current, &rhs, *line)?;
                self.scope.define(target, result);
            },
        }

        Ok(())
    }
}
