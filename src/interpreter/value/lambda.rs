use std::{collections::HashMap, rc::Rc};

use crate::{ast::LambdaBody, interpreter::value::core::Value};

/// The payload of a [`Value::Lambda`](crate::interpreter::value::core::Value).
///
/// Holds the lambda signature, a shared reference to the body subtree and a
/// by-value snapshot of the enclosing scope taken when the lambda expression
/// was evaluated. Bindings are copied, not aliased; re-binding a captured
/// name in the defining scope after capture does not affect the snapshot.
#[derive(Debug)]
pub struct LambdaValue {
    /// Ordered parameter names, unique within the signature.
    pub params:   Vec<String>,
    /// The body subtree, shared with the AST node it was produced from.
    pub body:     Rc<LambdaBody>,
    /// The scope snapshot taken at capture time.
    pub captured: HashMap<String, Value>,
}
