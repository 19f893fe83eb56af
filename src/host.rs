use std::{
    cell::RefCell,
    collections::HashMap,
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
};

use crate::{
    error::RuntimeError,
    interpreter::{
        evaluator::{comparers::ComparerRegistry, core::EvalResult},
        value::core::Value,
    },
    util::num::i32_to_usize_checked,
};

/// A cooperative cancellation token.
///
/// The walker fetches a token from the host at the start of every evaluation
/// and checks it at the top of each loop iteration. The flag lives behind an
/// `Arc` so a host timer thread can signal it while the single-threaded walk
/// is in progress. A freshly created token never cancels until someone calls
/// [`cancel`](Self::cancel).
#[derive(Clone, Debug, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    /// Creates a token in the non-cancelled state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Signals the token. Every clone observes the signal.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    /// Tests whether the token has been signalled.
    ///
    /// # Example
    /// ```
    /// use scriptlet::host::CancellationToken;
    ///
    /// let token = CancellationToken::new();
    /// assert!(!token.is_cancelled());
    ///
    /// token.cancel();
    /// assert!(token.is_cancelled());
    /// ```
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }
}

/// The capability set a host application exposes to the evaluator.
///
/// The walker owns all language semantics. Everything living outside the
/// language (variables it does not know, callable members, indexers, the
/// parameter sink, the output buffer, cancellation and the comparer table)
/// is reached through this trait. One host instance is shared by a top-level
/// walker and all of its lambda walkers.
pub trait Host {
    /// Fallback variable lookup, consulted when a name is absent from the
    /// walker's local scope. Unknown names yield [`Value::Null`].
    fn get_variable(&self, name: &str) -> EvalResult<Value>;

    /// Invokes a free (global) method.
    fn invoke_method(&self, name: &str, args: &[Value]) -> EvalResult<Value>;

    /// Reads a property (`args` is `None`) or invokes a method (`args` is
    /// `Some`) on a receiver value.
    fn invoke_member(&self, receiver: &Value, name: &str, args: Option<&[Value]>)
        -> EvalResult<Value>;

    /// Looks up `receiver[key]`.
    fn invoke_indexer(&self, receiver: &Value, key: &Value) -> EvalResult<Value>;

    /// Receives one parameter declaration from the head of a program.
    fn save_parameter(&self, name: &str, value: Value) -> EvalResult<()>;

    /// Drains the buffered textual output, if any was produced since the
    /// last flush.
    fn flush_output(&self) -> Option<String>;

    /// Hands out the cancellation token governing the evaluation.
    fn cancellation(&self) -> CancellationToken;

    /// The comparer registry consulted by the comparison operators.
    fn comparers(&self) -> &ComparerRegistry;
}

/// An in-memory [`Host`] for tests and for embedders that need nothing
/// fancier.
///
/// Variables live in a map, parameter declarations are recorded (and made
/// visible as variables), and the `print` method buffers text that the
/// statement-list evaluator folds into the result list on flush.
pub struct BasicHost {
    variables:  RefCell<HashMap<String, Value>>,
    parameters: RefCell<Vec<(String, Value)>>,
    output:     RefCell<String>,
    token:      CancellationToken,
    comparers:  ComparerRegistry,
}

impl Default for BasicHost {
    fn default() -> Self {
        Self::new()
    }
}

impl BasicHost {
    /// Creates an empty host with the builtin comparers.
    #[must_use]
    pub fn new() -> Self {
        Self { variables:  RefCell::new(HashMap::new()),
               parameters: RefCell::new(Vec::new()),
               output:     RefCell::new(String::new()),
               token:      CancellationToken::new(),
               comparers:  ComparerRegistry::new(), }
    }

    /// Adds a variable and returns the host, for fluent setup.
    ///
    /// # Example
    /// ```
    /// use scriptlet::{host::BasicHost, interpreter::value::core::Value};
    ///
    /// let host = BasicHost::new().with_variable("limit", Value::Integer(10));
    /// ```
    #[must_use]
    pub fn with_variable(self, name: &str, value: Value) -> Self {
        self.variables.borrow_mut().insert(name.to_string(), value);
        self
    }

    /// Binds or replaces a host variable.
    pub fn set_variable(&self, name: &str, value: Value) {
        self.variables.borrow_mut().insert(name.to_string(), value);
    }

    /// Returns the parameters recorded so far, in declaration order.
    #[must_use]
    pub fn saved_parameters(&self) -> Vec<(String, Value)> {
        self.parameters.borrow().clone()
    }

    /// The token governing evaluations run against this host. Cancel it to
    /// abort a walk cooperatively.
    #[must_use]
    pub fn cancellation_token(&self) -> CancellationToken {
        self.token.clone()
    }

    /// Grants mutable access to the comparer registry so embedders can
    /// register their own orderings before evaluating.
    pub const fn comparers_mut(&mut self) -> &mut ComparerRegistry {
        &mut self.comparers
    }

    /// Appends text to the buffered output.
    pub fn write_output(&self, text: &str) {
        self.output.borrow_mut().push_str(text);
    }
}

impl Host for BasicHost {
    fn get_variable(&self, name: &str) -> EvalResult<Value> {
        Ok(self.variables
               .borrow()
               .get(name)
               .cloned()
               .unwrap_or(Value::Null))
    }

    fn invoke_method(&self, name: &str, args: &[Value]) -> EvalResult<Value> {
        match name {
            "print" => {
                let mut output = self.output.borrow_mut();
                for arg in args {
                    output.push_str(&arg.to_text());
                }
                Ok(Value::Null)
            },
            _ => Err(RuntimeError::HostError { details: format!("Unknown method '{name}'"), }),
        }
    }

    fn invoke_member(&self,
                     receiver: &Value,
                     name: &str,
                     args: Option<&[Value]>)
                     -> EvalResult<Value> {
        match (receiver, name, args) {
            (Value::Text(s), "length", None) => {
                let length = i32::try_from(s.chars().count()).unwrap_or(i32::MAX);
                Ok(Value::Integer(length))
            },
            (Value::Collection(items), "length", None) => {
                let length = i32::try_from(items.len()).unwrap_or(i32::MAX);
                Ok(Value::Integer(length))
            },
            (Value::Text(s), "upper", Some([])) => Ok(Value::Text(s.to_uppercase())),
            (Value::Text(s), "lower", Some([])) => Ok(Value::Text(s.to_lowercase())),
            _ => Err(RuntimeError::HostError { details: format!("Unknown member '{name}' on {}",
                                                                receiver.tag()), }),
        }
    }

    fn invoke_indexer(&self, receiver: &Value, key: &Value) -> EvalResult<Value> {
        match receiver {
            Value::Collection(items) => {
                let index = i32_to_usize_checked(key.as_integer(0)?, 0)?;
                items.get(index)
                     .cloned()
                     .ok_or_else(|| RuntimeError::HostError { details:
                                                                  format!("Index {index} is out of bounds for a collection of {}",
                                                                          items.len()), })
            },
            Value::Text(s) => {
                let index = i32_to_usize_checked(key.as_integer(0)?, 0)?;
                s.chars()
                 .nth(index)
                 .map(|c| Value::Text(c.to_string()))
                 .ok_or_else(|| RuntimeError::HostError { details:
                                                              format!("Index {index} is out of bounds for text of length {}",
                                                                      s.chars().count()), })
            },
            _ => Err(RuntimeError::HostError { details: format!("Cannot index into {}",
                                                                receiver.tag()), }),
        }
    }

    fn save_parameter(&self, name: &str, value: Value) -> EvalResult<()> {
        self.parameters
            .borrow_mut()
            .push((name.to_string(), value.clone()));
        self.variables
            .borrow_mut()
            .insert(name.to_string(), value);
        Ok(())
    }

    fn flush_output(&self) -> Option<String> {
        let mut output = self.output.borrow_mut();
        if output.is_empty() {
            None
        } else {
            Some(std::mem::take(&mut *output))
        }
    }

    fn cancellation(&self) -> CancellationToken {
        self.token.clone()
    }

    fn comparers(&self) -> &ComparerRegistry {
        &self.comparers
    }
}
