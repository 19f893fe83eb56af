use tracing::trace;

use crate::{
    ast::{ChainLink, Expr, PrimaryStart},
    error::RuntimeError,
    interpreter::{
        evaluator::core::{EvalResult, Walker},
        value::core::Value,
    },
};

/// The running state of a primary-expression chain: either an identifier
/// that has not been resolved yet, or a concrete value.
enum Chained {
    Name(String),
    Value(Value),
}

impl Walker<'_> {
    /// Evaluates a primary expression.
    ///
    /// The start (literal, identifier or parenthesised expression) is
    /// threaded left to right through the chain of indexers, member accesses
    /// and calls. An identifier start stays unresolved until the first chain
    /// link needs it as a receiver; a bare identifier with no chain resolves
    /// through the scope chain at the end.
    ///
    /// Chain semantics:
    /// - `[k1, k2, ...]` asks the host indexer for `receiver[k1]`, then
    ///   performs a member-by-name access for each further key on the
    ///   previous result.
    /// - `.name` reads a property, or invokes a method when an argument list
    ///   follows.
    /// - `(args...)` on an identifier invokes a local lambda of that name
    ///   when one is in scope, and otherwise dispatches a free method to the
    ///   host. A parenthesised lambda value may also be called directly.
    pub(crate) fn eval_primary(&mut self,
                               start: &PrimaryStart,
                               chain: &[ChainLink],
                               _line: usize)
                               -> EvalResult<Value> {
        let mut current = match start {
            PrimaryStart::Grouped(inner) => Chained::Value(self.eval_expression(inner)?),
            PrimaryStart::Literal(literal) => Chained::Value(Value::from(literal)),
            PrimaryStart::Identifier(name) => Chained::Name(name.clone()),
        };

        for link in chain {
            current = match link {
                ChainLink::Index { keys, line } => {
                    let receiver = self.resolve_chained(current)?;
                    self.eval_index_chain(receiver, keys, *line)?
                },
                ChainLink::Member { name, args, .. } => {
                    let receiver = self.resolve_chained(current)?;
                    let value = match args {
                        Some(arg_exprs) => {
                            let args = self.eval_arguments(arg_exprs)?;
                            trace!(member = %name, "dispatching method to host");
                            self.host.invoke_member(&receiver, name, Some(&args))?
                        },
                        None => {
                            trace!(member = %name, "reading property from host");
                            self.host.invoke_member(&receiver, name, None)?
                        },
                    };
                    Chained::Value(value)
                },
                ChainLink::Call { args, line } => {
                    let args = self.eval_arguments(args)?;
                    self.eval_call(current, args, *line)?
                },
            };
        }

        match current {
            Chained::Name(name) => self.lookup_variable(&name),
            Chained::Value(value) => Ok(value),
        }
    }

    /// Runs one bracket expression against a receiver.
    ///
    /// The first key goes to the host indexer; each subsequent key is
    /// rendered to text and looked up as a member name on the result.
    fn eval_index_chain(&mut self,
                        receiver: Value,
                        keys: &[Expr],
                        line: usize)
                        -> EvalResult<Chained> {
        let Some((first, rest)) = keys.split_first() else {
            return Err(RuntimeError::TypeError { details: "Empty index expression".to_string(),
                                                 line });
        };

        let key = self.eval_expression(first)?;
        trace!("dispatching indexer to host");
        let mut value = self.host.invoke_indexer(&receiver, &key)?;

        for extra in rest {
            let name = self.eval_expression(extra)?.to_text();
            value = self.host.invoke_member(&value, &name, None)?;
        }

        Ok(Chained::Value(value))
    }

    /// Dispatches a call link.
    ///
    /// An identifier naming a local lambda routes to lambda invocation;
    /// any other identifier is a free host method. A lambda value produced
    /// by the preceding chain can be called directly.
    fn eval_call(&mut self, target: Chained, args: Vec<Value>, line: usize) -> EvalResult<Chained> {
        match target {
            Chained::Name(name) => {
                if let Some(Value::Lambda(lambda)) = self.scope.get(&name).cloned() {
                    return Ok(Chained::Value(self.invoke_lambda(&lambda, args, line)?));
                }
                trace!(method = %name, "dispatching method to host");
                Ok(Chained::Value(self.host.invoke_method(&name, &args)?))
            },
            Chained::Value(Value::Lambda(lambda)) => {
                Ok(Chained::Value(self.invoke_lambda(&lambda, args, line)?))
            },
            Chained::Value(other) => {
                Err(RuntimeError::TypeError { details: format!("Cannot invoke a value of type {}",
                                                               other.tag()),
                                              line })
            },
        }
    }

    /// Resolves a pending identifier through the scope chain, or passes a
    /// concrete value through.
    fn resolve_chained(&mut self, target: Chained) -> EvalResult<Value> {
        match target {
            Chained::Name(name) => self.lookup_variable(&name),
            Chained::Value(value) => Ok(value),
        }
    }

    /// Evaluates call or indexer arguments in source order.
    pub(crate) fn eval_arguments(&mut self, exprs: &[Expr]) -> EvalResult<Vec<Value>> {
        let mut args = Vec::with_capacity(exprs.len());

        for expr in exprs {
            args.push(self.eval_expression(expr)?);
        }

        Ok(args)
    }
}
