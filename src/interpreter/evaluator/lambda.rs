use tracing::trace;

use crate::{
    ast::LambdaBody,
    error::RuntimeError,
    interpreter::{
        evaluator::{
            core::{EvalResult, Signal, Walker},
            scope::Scope,
        },
        value::{core::Value, lambda::LambdaValue},
    },
};

impl Walker<'_> {
    /// Invokes a lambda value.
    ///
    /// Invocation builds a fresh walker whose scope is seeded from the
    /// closure snapshot plus the parameter bindings, runs the body there,
    /// and reconciles the child scope back into the caller: every name that
    /// existed in the caller's scope before the call and is present in the
    /// child scope is rewritten with the child's value for that name. Names
    /// introduced inside the lambda are discarded, and caller bindings the
    /// child scope never saw are left untouched.
    ///
    /// A `return` inside the body terminates only this invocation; the
    /// carried value becomes the lambda's result.
    ///
    /// # Parameters
    /// - `lambda`: The lambda value being invoked.
    /// - `args`: Evaluated argument values, in source order.
    /// - `line`: Line number for error reporting.
    ///
    /// # Returns
    /// The body's value.
    ///
    /// # Errors
    /// - `ConflictError` when a parameter name is already bound in the
    ///   caller's scope.
    /// - `ArityError` when the argument count does not match the signature.
    pub fn invoke_lambda(&mut self,
                         lambda: &LambdaValue,
                         args: Vec<Value>,
                         line: usize)
                         -> EvalResult<Value> {
        for param in &lambda.params {
            if self.scope.contains(param) {
                return Err(RuntimeError::ConflictError { name: param.clone(),
                                                         line });
            }
        }

        if args.len() != lambda.params.len() {
            return Err(RuntimeError::ArityError { expected: lambda.params.len(),
                                                  found: args.len(),
                                                  line });
        }

        trace!(params = lambda.params.len(), "invoking lambda");

        let mut bindings = lambda.captured.clone();
        for (param, arg) in lambda.params.iter().zip(args) {
            bindings.insert(param.clone(), arg);
        }

        let mut child = Walker::nested(self.host, Scope::from_bindings(bindings),
                                       self.token.clone());

        let result = match lambda.body.as_ref() {
            LambdaBody::Expression(expr) => child.eval_expression(expr)?,
            LambdaBody::Block(block) => {
                let flow = child.eval_statement_list(&block.statements)?;
                match flow.signal {
                    Some(Signal::Return(value)) => value,
                    _ => flow.value,
                }
            },
        };

        for name in self.scope.names() {
            if let Some(value) = child.scope.get(&name) {
                let value = value.clone();
                self.scope.define(&name, value);
            }
        }

        Ok(result)
    }
}
