use std::collections::HashMap;

use crate::interpreter::value::core::Value;

/// The local variable mapping owned by a single walker.
///
/// A scope is flat: one mapping per active walker. Lookups that miss fall
/// through to the host's variable provider (handled by the walker); writes
/// always target the local mapping. Lambda invocation seeds a child walker's
/// scope from the closure snapshot and reconciles it back on exit.
#[derive(Debug, Default)]
pub struct Scope {
    bindings: HashMap<String, Value>,
}

impl Scope {
    /// Creates an empty scope.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a scope pre-seeded with the given bindings.
    ///
    /// Used when a lambda invocation builds its child walker from the
    /// closure snapshot plus the parameter bindings.
    #[must_use]
    pub const fn from_bindings(bindings: HashMap<String, Value>) -> Self {
        Self { bindings }
    }

    /// Retrieves a variable from the scope.
    ///
    /// # Example
    /// ```
    /// use scriptlet::interpreter::{evaluator::scope::Scope, value::core::Value};
    ///
    /// let mut scope = Scope::new();
    /// scope.define("x", Value::Integer(5));
    ///
    /// assert_eq!(scope.get("x"), Some(&Value::Integer(5)));
    /// assert_eq!(scope.get("y"), None);
    /// ```
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.bindings.get(name)
    }

    /// Binds a variable, replacing any existing value under the same name.
    pub fn define(&mut self, name: &str, value: Value) {
        self.bindings.insert(name.to_string(), value);
    }

    /// Removes a binding. Used to drop a foreach iteration variable once the
    /// loop finishes.
    pub fn remove(&mut self, name: &str) {
        self.bindings.remove(name);
    }

    /// Tests whether a name is bound.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.bindings.contains_key(name)
    }

    /// Returns the currently bound names.
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        self.bindings.keys().cloned().collect()
    }

    /// Copies the current bindings by value.
    ///
    /// This is the closure snapshot handed to lambda values at capture time.
    #[must_use]
    pub fn snapshot(&self) -> HashMap<String, Value> {
        self.bindings.clone()
    }
}
