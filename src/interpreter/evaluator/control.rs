use crate::{
    ast::{Block, Expr, JumpKind, Statement},
    error::RuntimeError,
    interpreter::{
        evaluator::core::{EvalResult, Flow, Signal, Walker},
        value::core::Value,
    },
};

impl Walker<'_> {
    /// Evaluates a jump statement.
    ///
    /// `break` and `continue` raise their signal with a null value; `return`
    /// evaluates its optional expression and carries the result upward.
    pub(crate) fn eval_jump(&mut self,
                            kind: JumpKind,
                            value: Option<&Expr>,
                            _line: usize)
                            -> EvalResult<Flow> {
        let signal = match kind {
            JumpKind::Break => Signal::Break,
            JumpKind::Continue => Signal::Continue,
            JumpKind::Return => {
                let carried = match value {
                    Some(expr) => self.eval_expression(expr)?,
                    None => Value::Null,
                };
                Signal::Return(carried)
            },
        };

        Ok(Flow { value:  Value::Null,
                  signal: Some(signal), })
    }

    /// Evaluates an `if` statement.
    ///
    /// The condition must produce a boolean. The selected block's statement
    /// list runs in the current scope; its value and any pending jump signal
    /// pass through to the caller.
    pub(crate) fn eval_if(&mut self,
                          condition: &Expr,
                          then_block: &Block,
                          else_block: Option<&Block>,
                          line: usize)
                          -> EvalResult<Flow> {
        if self.eval_expression(condition)?.as_boolean(line)? {
            self.eval_statement_list(&then_block.statements)
        } else if let Some(block) = else_block {
            self.eval_statement_list(&block.statements)
        } else {
            Ok(Flow::normal(Value::Null))
        }
    }

    /// Evaluates a C-style `for` statement.
    ///
    /// The initialiser runs once. Each iteration then checks cancellation,
    /// evaluates the condition, runs the body, handles jump signals, and
    /// finally runs the iterator statement. Results from each iteration are
    /// flattened into one list: block results that are collections
    /// contribute each element.
    ///
    /// # Parameters
    /// - `init`: Optional initialiser statement.
    /// - `condition`: Optional condition; the loop is unbounded without it.
    /// - `iterator`: Optional per-iteration statement.
    /// - `body`: The loop body.
    /// - `line`: Line number for error reporting.
    ///
    /// # Returns
    /// The flattened iteration results, plus a pending `Return` signal when
    /// the body returned out of the loop.
    pub(crate) fn eval_for(&mut self,
                           init: Option<&Statement>,
                           condition: Option<&Expr>,
                           iterator: Option<&Statement>,
                           body: &Block,
                           line: usize)
                           -> EvalResult<Flow> {
        if let Some(statement) = init {
            self.eval_statement(statement)?;
        }

        let mut results = Vec::new();

        loop {
            self.check_cancelled(line)?;

            if let Some(expr) = condition
               && !self.eval_expression(expr)?.as_boolean(line)?
            {
                break;
            }

            let flow = self.eval_statement_list(&body.statements)?;
            Self::flatten_into(&mut results, flow.value);

            match flow.signal {
                Some(Signal::Break) => break,
                Some(Signal::Return(value)) => {
                    return Ok(Flow { value:  Self::collect(results),
                                     signal: Some(Signal::Return(value)), });
                },
                Some(Signal::Continue) | None => {},
            }

            if let Some(statement) = iterator {
                self.eval_statement(statement)?;
            }
        }

        Ok(Flow::normal(Self::collect(results)))
    }

    /// Evaluates a `while` statement.
    ///
    /// Cancellation is checked at the top of every iteration. Iteration
    /// results are flattened exactly as in `for`.
    pub(crate) fn eval_while(&mut self,
                             condition: &Expr,
                             body: &Block,
                             line: usize)
                             -> EvalResult<Flow> {
        let mut results = Vec::new();

        loop {
            self.check_cancelled(line)?;

            if !self.eval_expression(condition)?.as_boolean(line)? {
                break;
            }

            let flow = self.eval_statement_list(&body.statements)?;
            Self::flatten_into(&mut results, flow.value);

            match flow.signal {
                Some(Signal::Break) => break,
                Some(Signal::Return(value)) => {
                    return Ok(Flow { value:  Self::collect(results),
                                     signal: Some(Signal::Return(value)), });
                },
                Some(Signal::Continue) | None => {},
            }
        }

        Ok(Flow::normal(Self::collect(results)))
    }

    /// Evaluates a `foreach` statement.
    ///
    /// The iterable must be a collection or text; text iterates per code
    /// point, yielding one-character text values. The iteration variable is
    /// bound in the current scope and removed again once the loop finishes.
    pub(crate) fn eval_foreach(&mut self,
                               variable: &str,
                               iterable: &Expr,
                               body: &Block,
                               line: usize)
                               -> EvalResult<Flow> {
        let source = self.eval_expression(iterable)?;

        let items: Vec<Value> = match source {
            Value::Collection(items) => items.iter().cloned().collect(),
            Value::Text(s) => s.chars().map(|c| Value::Text(c.to_string())).collect(),
            other => {
                return Err(RuntimeError::TypeError { details: format!("Cannot iterate over {}",
                                                                      other.tag()),
                                                     line });
            },
        };

        let mut results = Vec::new();
        let mut pending = None;

        for item in items {
            self.check_cancelled(line)?;
            self.scope.define(variable, item);

            let flow = self.eval_statement_list(&body.statements)?;
            Self::flatten_into(&mut results, flow.value);

            match flow.signal {
                Some(Signal::Break) => break,
                Some(Signal::Return(value)) => {
                    pending = Some(Signal::Return(value));
                    break;
                },
                Some(Signal::Continue) | None => {},
            }
        }

        self.scope.remove(variable);

        Ok(Flow { value:  Self::collect(results),
                  signal: pending, })
    }
}
