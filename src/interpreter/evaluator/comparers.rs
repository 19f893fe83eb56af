use std::{cmp::Ordering, rc::Rc};

use crate::{
    error::RuntimeError,
    interpreter::{
        evaluator::core::EvalResult,
        value::core::{Value, ValueTag},
    },
};

/// An ordering function over a pair of values.
///
/// Returns the ordering of `left` relative to `right`; comparison operators
/// threshold the result. The line number is carried for error reporting.
pub type CompareFn = Rc<dyn Fn(&Value, &Value, usize) -> EvalResult<Ordering>>;

/// A predicate deciding whether a comparer entry applies to a value pair.
pub type AppliesFn = Rc<dyn Fn(&Value, &Value) -> bool>;

/// One entry of the comparer registry: a predicate over value pairs and the
/// ordering function used when the predicate matches.
pub struct ComparerEntry {
    /// A short name for diagnostics.
    pub name:    String,
    /// The applicability predicate.
    pub applies: AppliesFn,
    /// The ordering function.
    pub compare: CompareFn,
}

/// The ordered dispatch table mapping value pairs to ordering functions.
///
/// Resolution scans the entries in order and picks the first whose predicate
/// matches. Three builtins are always present: a null-aware comparer (first),
/// a numeric comparer widening both sides to decimal (second), and a default
/// comparer over the natural ordering of scalar values (last). Host-supplied
/// entries slot in between the numeric and default comparers, in registration
/// order.
pub struct ComparerRegistry {
    entries: Vec<ComparerEntry>,
}

impl Default for ComparerRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ComparerRegistry {
    /// Creates a registry holding the three builtin comparers.
    #[must_use]
    pub fn new() -> Self {
        let null_entry =
            ComparerEntry { name:    "null".to_string(),
                            applies: Rc::new(|left, right| left.is_null() || right.is_null()),
                            compare: Rc::new(|left, right, _| Ok(null_ordering(left, right))), };

        let numeric_entry =
            ComparerEntry { name:    "numeric".to_string(),
                            applies: Rc::new(|left, right| {
                                         left.is_numeric() && right.is_numeric()
                                     }),
                            compare: Rc::new(|left, right, line| {
                                         Ok(left.as_decimal(line)?.cmp(&right.as_decimal(line)?))
                                     }), };

        let default_entry = ComparerEntry { name:    "default".to_string(),
                                            applies: Rc::new(|_, _| true),
                                            compare: Rc::new(natural_ordering), };

        Self { entries: vec![null_entry, numeric_entry, default_entry], }
    }

    /// Registers a host comparer.
    ///
    /// The entry is inserted ahead of the default comparer but after the
    /// builtin null and numeric comparers and any previously registered host
    /// entries, so registration order decides precedence among host entries.
    pub fn register(&mut self, name: &str, applies: AppliesFn, compare: CompareFn) {
        let position = self.entries.len() - 1;
        self.entries.insert(position,
                            ComparerEntry { name: name.to_string(),
                                            applies,
                                            compare, });
    }

    /// Registers a host comparer keyed by a variant tag.
    ///
    /// The entry applies when both operands carry the given tag.
    pub fn register_for_tag(&mut self, name: &str, tag: ValueTag, compare: CompareFn) {
        self.register(name,
                      Rc::new(move |left, right| left.tag() == tag && right.tag() == tag),
                      compare);
    }

    /// Resolves the comparer for a pair of values.
    ///
    /// The scan always terminates on the default entry.
    #[must_use]
    pub fn resolve(&self, left: &Value, right: &Value) -> &ComparerEntry {
        self.entries
            .iter()
            .find(|entry| (entry.applies)(left, right))
            .unwrap_or_else(|| unreachable!("the default comparer applies to every pair"))
    }
}

/// The null-aware ordering: equal when both sides are null, greater
/// otherwise. A null operand therefore compares unequal to everything but
/// null.
fn null_ordering(left: &Value, right: &Value) -> Ordering {
    if left.is_null() && right.is_null() {
        Ordering::Equal
    } else {
        Ordering::Greater
    }
}

/// The default ordering over the natural order of scalar values.
///
/// Same-tag scalars compare directly; text and characters compare textually
/// across the two tags. Anything else has no natural order and yields a type
/// error, which equality operators downgrade to "not equal".
fn natural_ordering(left: &Value, right: &Value, line: usize) -> EvalResult<Ordering> {
    match (left, right) {
        (Value::Integer(a), Value::Integer(b)) => Ok(a.cmp(b)),
        (Value::Decimal(a), Value::Decimal(b)) => Ok(a.cmp(b)),
        (Value::Boolean(a), Value::Boolean(b)) => Ok(a.cmp(b)),
        (Value::Text(a), Value::Text(b)) => Ok(a.cmp(b)),
        (Value::Character(a), Value::Character(b)) => Ok(a.cmp(b)),
        (Value::Text(_) | Value::Character(_), Value::Text(_) | Value::Character(_)) => {
            Ok(left.to_text().cmp(&right.to_text()))
        },
        (Value::DateTime(a), Value::DateTime(b)) => Ok(a.cmp(b)),
        (Value::Duration(a), Value::Duration(b)) => Ok(a.cmp(b)),
        (Value::Guid(a), Value::Guid(b)) => Ok(a.cmp(b)),
        _ => Err(RuntimeError::TypeError { details: format!("Cannot compare {} with {}",
                                                            left.tag(),
                                                            right.tag()),
                                           line }),
    }
}
