use std::{cmp::Ordering, rc::Rc};

use rust_decimal::Decimal;
use scriptlet::interpreter::{
    evaluator::comparers::ComparerRegistry,
    value::core::{Value, ValueTag},
};

#[test]
fn null_comparer_wins_when_either_side_is_null() {
    let registry = ComparerRegistry::new();

    let entry = registry.resolve(&Value::Null, &Value::Integer(3));
    assert_eq!(entry.name, "null");

    let ordering = (entry.compare)(&Value::Null, &Value::Integer(3), 1).unwrap();
    assert_eq!(ordering, Ordering::Greater);

    let ordering = (entry.compare)(&Value::Null, &Value::Null, 1).unwrap();
    assert_eq!(ordering, Ordering::Equal);
}

#[test]
fn numeric_comparer_widens_mixed_operands() {
    let registry = ComparerRegistry::new();
    let left = Value::Integer(2);
    let right = Value::Decimal(Decimal::new(25, 1));

    let entry = registry.resolve(&left, &right);
    assert_eq!(entry.name, "numeric");
    assert_eq!((entry.compare)(&left, &right, 1).unwrap(), Ordering::Less);
}

#[test]
fn default_comparer_orders_text() {
    let registry = ComparerRegistry::new();
    let left = Value::Text("apple".into());
    let right = Value::Text("banana".into());

    let entry = registry.resolve(&left, &right);
    assert_eq!(entry.name, "default");
    assert_eq!((entry.compare)(&left, &right, 1).unwrap(), Ordering::Less);
}

#[test]
fn default_comparer_rejects_unordered_variants() {
    let registry = ComparerRegistry::new();
    let left = Value::Integer(1);
    let right = Value::Text("1".into());

    let entry = registry.resolve(&left, &right);
    assert_eq!(entry.name, "default");
    assert!((entry.compare)(&left, &right, 1).is_err());
}

#[test]
fn registered_comparer_takes_precedence_over_default() {
    let mut registry = ComparerRegistry::new();
    registry.register_for_tag("reverse-text",
                              ValueTag::Text,
                              Rc::new(|left: &Value, right: &Value, _| {
                                  Ok(right.to_text().cmp(&left.to_text()))
                              }));

    let left = Value::Text("apple".into());
    let right = Value::Text("banana".into());

    let entry = registry.resolve(&left, &right);
    assert_eq!(entry.name, "reverse-text");
    assert_eq!((entry.compare)(&left, &right, 1).unwrap(), Ordering::Greater);
}

#[test]
fn registered_comparer_never_shadows_the_null_builtin() {
    let mut registry = ComparerRegistry::new();
    registry.register("everything",
                      Rc::new(|_, _| true),
                      Rc::new(|_, _, _| Ok(Ordering::Less)));

    let entry = registry.resolve(&Value::Null, &Value::Null);
    assert_eq!(entry.name, "null");

    let entry = registry.resolve(&Value::Boolean(true), &Value::Boolean(true));
    assert_eq!(entry.name, "everything");
}
