//! Property-based tests for the evaluator.
//!
//! These tests use proptest to generate random inputs and verify language
//! invariants hold for all of them.

use std::rc::Rc;

use proptest::prelude::*;
use rust_decimal::Decimal;
use scriptlet::{evaluate, host::BasicHost, interpreter::value::core::Value};
use uuid::Uuid;

fn eval_with(host: &BasicHost, source: &str) -> Value {
    match evaluate(source, host) {
        Ok(value) => value,
        Err(e) => panic!("Script failed: {source}\nError: {e}"),
    }
}

fn eval(source: &str) -> Value {
    eval_with(&BasicHost::new(), source)
}

fn list(values: Vec<Value>) -> Value {
    Value::Collection(Rc::new(values))
}

/// Strategy producing literal source text for self-comparison properties.
fn arb_literal() -> impl Strategy<Value = String> {
    prop_oneof![
        // Integers (non-negative, so the literal stays on the integer path).
        (0..=i32::MAX).prop_map(|n| n.to_string()),
        // Decimals, including negatives.
        (-1_000_000_000i64..1_000_000_000, 0u32..6)
            .prop_map(|(mantissa, scale)| Decimal::new(mantissa, scale).to_string()),
        // Booleans.
        Just("true".to_string()),
        Just("false".to_string()),
        // Simple strings.
        "[a-z ]{0,12}".prop_map(|s| format!("\"{s}\"")),
        // Guids.
        any::<u128>().prop_map(|n| Uuid::from_u128(n).to_string()),
    ]
}

proptest! {
    #[test]
    fn addition_roundtrips_subtraction(x in any::<i32>(), y in any::<i32>()) {
        let host = BasicHost::new().with_variable("a", Value::Integer(x))
                                   .with_variable("b", Value::Integer(y));

        // Integer arithmetic wraps, so the identity holds for every pair.
        prop_assert_eq!(eval_with(&host, "(a + b) - b"), list(vec![Value::Integer(x)]));
    }

    #[test]
    fn values_equal_themselves(lit in arb_literal()) {
        prop_assert_eq!(eval(&format!("{lit} == {lit}")), list(vec![Value::Boolean(true)]));
        prop_assert_eq!(eval(&format!("{lit} != {lit}")), list(vec![Value::Boolean(false)]));
    }

    #[test]
    fn null_is_only_equal_to_null(lit in arb_literal()) {
        prop_assert_eq!(eval(&format!("null == {lit}")), list(vec![Value::Boolean(false)]));
        prop_assert_eq!(eval(&format!("null != {lit}")), list(vec![Value::Boolean(true)]));
    }

    #[test]
    fn foreach_over_text_runs_once_per_code_point(s in "[a-z]{0,20}") {
        let expected = i32::try_from(s.chars().count()).unwrap();
        let host = BasicHost::new().with_variable("t", Value::Text(s));

        prop_assert_eq!(eval_with(&host, "n = 0; foreach (c in t) { n += 1; }; n"),
                        list(vec![Value::Integer(expected)]));
    }

    #[test]
    fn break_stops_remaining_iterations(k in 0i32..10) {
        let host = BasicHost::new().with_variable("k", Value::Integer(k));
        let source = "steps = 0; for (i = 0; i < 10; i++) { if (i == k) { break; }; steps += 1; }; steps";

        prop_assert_eq!(eval_with(&host, source), list(vec![Value::Integer(k)]));
    }

    #[test]
    fn lambda_invocation_is_deterministic(n in -10_000i32..10_000) {
        let host = BasicHost::new().with_variable("n", Value::Integer(n));

        prop_assert_eq!(eval_with(&host, "f = (x) => x * x; f(n) == f(n)"),
                        list(vec![Value::Boolean(true)]));
    }

    #[test]
    fn decimal_text_roundtrips(mantissa in -1_000_000_000i64..1_000_000_000, scale in 0u32..6) {
        let value = Decimal::new(mantissa, scale);
        let rendered = Value::Decimal(value).to_text();

        // A decimal with nothing after the point renders without one and
        // reparses as an integer literal, so compare numerically.
        let Value::Collection(items) = eval(&rendered) else {
            panic!("expected a single-element result list");
        };
        prop_assert_eq!(items[0].as_decimal(0).unwrap(), value);
    }

    #[test]
    fn integer_text_roundtrips(n in 0..=i32::MAX) {
        let rendered = Value::Integer(n).to_text();
        prop_assert_eq!(eval(&rendered), list(vec![Value::Integer(n)]));
    }

    #[test]
    fn text_roundtrips_when_requoted(s in "[a-z0-9 ]{0,16}") {
        let rendered = Value::Text(s.clone()).to_text();
        prop_assert_eq!(eval(&format!("\"{rendered}\"")), list(vec![Value::Text(s)]));
    }

    #[test]
    fn guid_text_roundtrips(n in any::<u128>()) {
        let guid = Uuid::from_u128(n);
        let rendered = Value::Guid(guid).to_text();

        prop_assert_eq!(eval(&rendered), list(vec![Value::Guid(guid)]));
    }
}
