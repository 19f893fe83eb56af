use std::{cmp::Ordering, rc::Rc};

use scriptlet::{
    ast::{Expr, Literal, PrimaryStart},
    evaluate,
    host::BasicHost,
    interpreter::{
        evaluator::core::Walker,
        value::core::{Value, ValueTag},
    },
};

fn literal(value: Literal) -> Expr {
    Expr::Primary { start: PrimaryStart::Literal(value),
                    chain: Vec::new(),
                    line:  1, }
}

#[test]
fn ternary_without_branches_passes_the_condition_through() {
    let host = BasicHost::new();
    let mut walker = Walker::new(&host);

    let expr = Expr::Ternary { condition:   Box::new(literal(Literal::Integer(7))),
                               then_branch: None,
                               else_branch: None,
                               line:        1, };

    assert_eq!(walker.eval_expression(&expr).unwrap(), Value::Integer(7));

    // Even a non-boolean condition passes through untouched.
    let expr = Expr::Ternary { condition:   Box::new(literal(Literal::Text("raw".into()))),
                               then_branch: None,
                               else_branch: None,
                               line:        1, };

    assert_eq!(walker.eval_expression(&expr).unwrap(), Value::Text("raw".into()));
}

#[test]
fn host_registered_comparers_drive_comparisons() {
    let mut host = BasicHost::new();
    host.comparers_mut()
        .register_for_tag("collection-length",
                          ValueTag::Collection,
                          Rc::new(|left: &Value, right: &Value, _| {
                              let (Value::Collection(a), Value::Collection(b)) = (left, right)
                              else {
                                  return Ok(Ordering::Equal);
                              };
                              Ok(a.len().cmp(&b.len()))
                          }));

    host.set_variable("xs", Value::Collection(Rc::new(vec![Value::Integer(1)])));
    host.set_variable("ys",
                      Value::Collection(Rc::new(vec![Value::Integer(1), Value::Integer(2)])));

    let result = evaluate("xs < ys", &host).unwrap();
    assert_eq!(result,
               Value::Collection(Rc::new(vec![Value::Boolean(true)])));
}

#[test]
fn walkers_share_the_host_variable_store() {
    let host = BasicHost::new().with_variable("base", Value::Integer(40));
    let mut walker = Walker::new(&host);

    let program = scriptlet::parse_source("base + 2").unwrap();
    let result = walker.eval_program(&program).unwrap();

    assert_eq!(result,
               Value::Collection(Rc::new(vec![Value::Integer(42)])));
}

#[test]
fn collections_without_natural_order_still_compare_equal_to_themselves() {
    let host = BasicHost::new();
    host.set_variable("xs", Value::Collection(Rc::new(vec![Value::Integer(1)])));

    let result = evaluate("xs == xs", &host).unwrap();
    assert_eq!(result,
               Value::Collection(Rc::new(vec![Value::Boolean(true)])));
}
