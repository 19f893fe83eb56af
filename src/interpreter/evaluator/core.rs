use std::rc::Rc;

use tracing::{debug, trace};

use crate::{
    ast::{Expr, Program, Statement},
    error::RuntimeError,
    host::{CancellationToken, Host},
    interpreter::{
        evaluator::scope::Scope,
        value::{core::Value, lambda::LambdaValue},
    },
};

/// Result type used by the evaluator.
///
/// All evaluation functions return either a value of type `T` or a
/// `RuntimeError` describing the failure.
pub type EvalResult<T> = Result<T, RuntimeError>;

/// A jump signal travelling up from a `break`, `continue` or `return`
/// statement.
///
/// Signals ride the return channel: statement lists stop and hand the signal
/// to their caller, loops consume `Break` and `Continue`, and `Return`
/// propagates until the enclosing lambda or the top level absorbs it.
#[derive(Debug, Clone, PartialEq)]
pub enum Signal {
    /// Terminate the enclosing loop.
    Break,
    /// Skip to the iterator step of the enclosing loop.
    Continue,
    /// Terminate the enclosing lambda (or the whole program) with the
    /// carried value.
    Return(Value),
}

/// The outcome of a statement or statement list: the produced value plus an
/// optional jump signal that has not been absorbed yet.
#[derive(Debug, Clone, PartialEq)]
pub struct Flow {
    /// The value the statement contributed (null for assignments and jumps).
    pub value:  Value,
    /// A pending jump, if one was raised and not yet absorbed.
    pub signal: Option<Signal>,
}

impl Flow {
    /// Wraps a plain value with no pending signal.
    #[must_use]
    pub const fn normal(value: Value) -> Self {
        Self { value, signal: None }
    }
}

/// The tree walker: a stateful visitor producing values from syntax tree
/// nodes.
///
/// A walker owns one flat local scope and borrows the host for everything
/// the language itself cannot answer. It is single-threaded and not safe for
/// concurrent use; independent evaluations require independent walkers.
/// Lambda invocation spawns a nested walker sharing the same host and
/// cancellation token.
pub struct Walker<'h> {
    pub(crate) host:  &'h dyn Host,
    /// The walker's local variable mapping.
    pub scope:        Scope,
    pub(crate) token: CancellationToken,
}

impl<'h> Walker<'h> {
    /// Creates a walker for the given host, fetching the cancellation token
    /// from the host.
    #[must_use]
    pub fn new(host: &'h dyn Host) -> Self {
        let token = host.cancellation();
        Self { host,
               scope: Scope::new(),
               token }
    }

    /// Creates a walker governed by an explicitly supplied token instead of
    /// the host's.
    #[must_use]
    pub fn with_token(host: &'h dyn Host, token: CancellationToken) -> Self {
        Self { host,
               scope: Scope::new(),
               token }
    }

    /// Creates the nested walker backing a lambda invocation.
    pub(crate) fn nested(host: &'h dyn Host, scope: Scope, token: CancellationToken) -> Self {
        Self { host, scope, token }
    }

    /// Evaluates a complete program.
    ///
    /// Parameter declarations are evaluated and handed to the host's
    /// parameter sink first. The top-level statement list then runs, and any
    /// remaining buffered host output is flushed and appended. The result is
    /// the list of non-null top-level statement values, or null when nothing
    /// was produced.
    ///
    /// # Parameters
    /// - `program`: The parsed program to execute.
    ///
    /// # Returns
    /// The final result list (`Value::Collection`), or `Value::Null` when no
    /// statement produced a value.
    pub fn eval_program(&mut self, program: &Program) -> EvalResult<Value> {
        debug!(parameters = program.parameters.len(),
               statements = program.statements.len(),
               "beginning evaluation");
        self.check_cancelled(0)?;

        for parameter in &program.parameters {
            let value = match &parameter.value {
                Some(expr) => self.eval_expression(expr)?,
                None => Value::Null,
            };
            self.host.save_parameter(&parameter.name, value)?;
        }

        let (mut results, signal) = self.run_statement_list(&program.statements)?;

        if let Some(Signal::Return(value)) = signal
           && !value.is_null()
        {
            results.push(value);
        }

        if let Some(text) = self.host.flush_output()
           && !text.is_empty()
        {
            results.push(Value::Text(text));
        }

        Ok(Self::collect(results))
    }

    /// Evaluates a statement list, accumulating non-null statement values.
    ///
    /// After each non-null statement result the host's output buffer is
    /// flushed. A collection result contributes each of its elements, with
    /// any flushed text appended afterwards as a single value; a scalar
    /// result is appended as one value, prefixed by the flushed text when
    /// there is any. The list stops early when a statement raises a jump
    /// signal and hands the signal to the caller together with the partial
    /// accumulation.
    pub fn eval_statement_list(&mut self, statements: &[Statement]) -> EvalResult<Flow> {
        let (results, signal) = self.run_statement_list(statements)?;
        Ok(Flow { value: Self::collect(results),
                  signal })
    }

    fn run_statement_list(&mut self,
                          statements: &[Statement])
                          -> EvalResult<(Vec<Value>, Option<Signal>)> {
        let mut results = Vec::new();

        for statement in statements {
            let flow = self.eval_statement(statement)?;

            if !flow.value.is_null() {
                self.absorb_statement_value(&mut results, flow.value);
            }
            if flow.signal.is_some() {
                return Ok((results, flow.signal));
            }
        }

        Ok((results, None))
    }

    /// Folds one non-null statement value into the accumulator, applying the
    /// output-buffer rule.
    fn absorb_statement_value(&self, results: &mut Vec<Value>, value: Value) {
        let flushed = self.host.flush_output().filter(|text| !text.is_empty());

        match (value, flushed) {
            (Value::Collection(items), text) => {
                results.extend(items.iter().cloned());
                if let Some(text) = text {
                    results.push(Value::Text(text));
                }
            },
            (scalar, Some(text)) => results.push(Value::Text(format!("{text}{scalar}"))),
            (scalar, None) => results.push(scalar),
        }
    }

    /// Packs accumulated statement values into the list result: null when
    /// empty, otherwise a collection.
    pub(crate) fn collect(results: Vec<Value>) -> Value {
        if results.is_empty() {
            Value::Null
        } else {
            Value::Collection(Rc::new(results))
        }
    }

    /// Splices a finished iteration value into a loop's result accumulator.
    /// Collections contribute each element; scalars contribute themselves.
    pub(crate) fn flatten_into(results: &mut Vec<Value>, value: Value) {
        match value {
            Value::Null => {},
            Value::Collection(items) => results.extend(items.iter().cloned()),
            scalar => results.push(scalar),
        }
    }

    /// Evaluates a single statement.
    ///
    /// Expression statements contribute their value; assignments and jumps
    /// contribute null (jumps additionally raise their signal); control-flow
    /// statements contribute whatever their blocks accumulate.
    pub fn eval_statement(&mut self, statement: &Statement) -> EvalResult<Flow> {
        match statement {
            Statement::Expression { expr, .. } => {
                Ok(Flow::normal(self.eval_expression(expr)?))
            },
            Statement::Assignment(assignment) => {
                self.eval_assignment(assignment)?;
                Ok(Flow::normal(Value::Null))
            },
            Statement::Jump { kind, value, line } => self.eval_jump(*kind, value.as_ref(), *line),
            Statement::If { condition,
                            then_block,
                            else_block,
                            line, } => {
                self.eval_if(condition, then_block, else_block.as_ref(), *line)
            },
            Statement::For { init,
                             condition,
                             iterator,
                             body,
                             line, } => self.eval_for(init.as_deref(),
                                                      condition.as_ref(),
                                                      iterator.as_deref(),
                                                      body,
                                                      *line),
            Statement::While { condition, body, line } => self.eval_while(condition, body, *line),
            Statement::Foreach { variable,
                                 iterable,
                                 body,
                                 line, } => self.eval_foreach(variable, iterable, body, *line),
        }
    }

    /// Evaluates an expression node.
    pub fn eval_expression(&mut self, expr: &Expr) -> EvalResult<Value> {
        match expr {
            Expr::Ternary { condition,
                            then_branch,
                            else_branch,
                            line, } => self.eval_ternary(condition,
                                                         then_branch.as_deref(),
                                                         else_branch.as_deref(),
                                                         *line),
            Expr::NullCoalesce { left, right, .. } => {
                let value = self.eval_expression(left)?;
                if value.is_null() {
                    self.eval_expression(right)
                } else {
                    Ok(value)
                }
            },
            Expr::Binary { left, op, right, line } => {
                let lhs = self.eval_expression(left)?;
                let rhs = self.eval_expression(right)?;
                self.eval_binary(*op, &lhs, &rhs, *line)
            },
            Expr::Unary { op, expr, line } => {
                let value = self.eval_expression(expr)?;
                Self::eval_unary(*op, &value, *line)
            },
            Expr::Primary { start, chain, line } => self.eval_primary(start, chain, *line),
            Expr::Lambda { params, body, .. } => {
                Ok(Value::Lambda(Rc::new(LambdaValue { params:   params.clone(),
                                                       body:     Rc::clone(body),
                                                       captured: self.scope.snapshot(), })))
            },
        }
    }

    /// Evaluates a ternary expression.
    ///
    /// With no branches the condition value passes through untouched.
    /// Otherwise the condition must produce a boolean and selects the branch;
    /// a false condition without an else branch yields null.
    fn eval_ternary(&mut self,
                    condition: &Expr,
                    then_branch: Option<&Expr>,
                    else_branch: Option<&Expr>,
                    line: usize)
                    -> EvalResult<Value> {
        let value = self.eval_expression(condition)?;

        if then_branch.is_none() && else_branch.is_none() {
            return Ok(value);
        }

        if value.as_boolean(line)? {
            then_branch.map_or(Ok(Value::Null), |branch| self.eval_expression(branch))
        } else {
            else_branch.map_or(Ok(Value::Null), |branch| self.eval_expression(branch))
        }
    }

    /// Looks up a name through the scope chain: the walker's local scope
    /// first, then the host's variable provider. Unknown names yield null.
    pub fn lookup_variable(&self, name: &str) -> EvalResult<Value> {
        if let Some(value) = self.scope.get(name) {
            return Ok(value.clone());
        }
        self.host.get_variable(name)
    }

    /// Fails with `CancelledError` when the cancellation token has been
    /// signalled.
    pub(crate) fn check_cancelled(&self, line: usize) -> EvalResult<()> {
        if self.token.is_cancelled() {
            trace!(line, "cancellation observed");
            return Err(RuntimeError::CancelledError { line });
        }
        Ok(())
    }
}
