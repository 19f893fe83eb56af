use std::rc::Rc;

use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use scriptlet::{evaluate, host::BasicHost, interpreter::value::core::Value};

fn eval(source: &str) -> Value {
    eval_with(&BasicHost::new(), source)
}

fn eval_with(host: &BasicHost, source: &str) -> Value {
    match evaluate(source, host) {
        Ok(value) => value,
        Err(e) => panic!("Script failed: {source}\nError: {e}"),
    }
}

fn assert_failure(source: &str) {
    let host = BasicHost::new();
    if evaluate(source, &host).is_ok() {
        panic!("Script succeeded but was expected to fail: {source}")
    }
}

fn list(values: Vec<Value>) -> Value {
    Value::Collection(Rc::new(values))
}

fn int(n: i32) -> Value {
    Value::Integer(n)
}

fn dec(text: &str) -> Value {
    Value::Decimal(text.parse().unwrap())
}

fn text(s: &str) -> Value {
    Value::Text(s.to_string())
}

fn boolean(b: bool) -> Value {
    Value::Boolean(b)
}

#[test]
fn integer_and_mixed_addition() {
    assert_eq!(eval("1 + 1"), list(vec![int(2)]));
    assert_eq!(eval("1 + 1.5"), list(vec![dec("2.5")]));
}

#[test]
fn integer_addition_wraps() {
    assert_eq!(eval("a = 2147483647; a + 1"), list(vec![int(i32::MIN)]));
}

#[test]
fn compound_assignment_and_multiplication() {
    // += keeps the integer path; * always widens to decimal.
    assert_eq!(eval("a = 3; a += 2; a * a"), list(vec![dec("25")]));
}

#[test]
fn division_and_modulo_widen_to_decimal() {
    assert_eq!(eval("7 / 2"), list(vec![dec("3.5")]));
    assert_eq!(eval("7 % 2"), list(vec![dec("1")]));
    assert_eq!(eval("6 * 7"), list(vec![dec("42")]));
}

#[test]
fn division_by_zero_is_error() {
    assert_failure("1 / 0");
    assert_failure("1 % 0");
}

#[test]
fn percent_literals() {
    assert_eq!(eval("50%"), list(vec![dec("0.5")]));
    assert_eq!(eval("1 + 12.5%"), list(vec![dec("1.125")]));
}

#[test]
fn shifts_coerce_to_integer() {
    assert_eq!(eval("1 << 4"), list(vec![int(16)]));
    assert_eq!(eval("256 >> 4"), list(vec![int(16)]));
    assert_eq!(eval("\"8\" << 1"), list(vec![int(16)]));
    assert_eq!(eval("a = 5.9; a << 1"), list(vec![int(10)]));
}

#[test]
fn text_concatenation() {
    assert_eq!(eval("\"a\" + 1"), list(vec![text("a1")]));
    assert_eq!(eval("1 + \"a\""), list(vec![text("1a")]));
    assert_eq!(eval("\"v=\" + 2.50"), list(vec![text("v=2.5")]));
    assert_eq!(eval("\"x\" + null"), list(vec![text("x")]));
    assert_eq!(eval("'a' + \"b\""), list(vec![text("ab")]));
}

#[test]
fn unary_operators() {
    assert_eq!(eval("-5"), list(vec![dec("-5")]));
    assert_eq!(eval("!true"), list(vec![boolean(false)]));
    assert_eq!(eval("a = 3; -a"), list(vec![dec("-3")]));
}

#[test]
fn comparisons() {
    assert_eq!(eval("1 < 2"), list(vec![boolean(true)]));
    assert_eq!(eval("2 <= 2"), list(vec![boolean(true)]));
    assert_eq!(eval("3 > 2"), list(vec![boolean(true)]));
    assert_eq!(eval("2 >= 3"), list(vec![boolean(false)]));
    assert_eq!(eval("2 == 2.0"), list(vec![boolean(true)]));
    assert_eq!(eval("1 != 2"), list(vec![boolean(true)]));
    assert_eq!(eval("\"a\" < \"b\""), list(vec![boolean(true)]));
}

#[test]
fn null_comparisons() {
    assert_eq!(eval("null == null"), list(vec![boolean(true)]));
    assert_eq!(eval("null == 1"), list(vec![boolean(false)]));
    assert_eq!(eval("null != 1"), list(vec![boolean(true)]));
}

#[test]
fn incomparable_variants_are_not_equal() {
    assert_eq!(eval("1 == \"1\""), list(vec![boolean(false)]));
    assert_eq!(eval("1 != \"1\""), list(vec![boolean(true)]));
    assert_failure("1 < \"1\"");
}

#[test]
fn logical_operators() {
    assert_eq!(eval("true and false"), list(vec![boolean(false)]));
    assert_eq!(eval("true or false"), list(vec![boolean(true)]));
    assert_eq!(eval("true xor true"), list(vec![boolean(false)]));
    assert_eq!(eval("true && true"), list(vec![boolean(true)]));
    assert_eq!(eval("false || false"), list(vec![boolean(false)]));
    assert_eq!(eval("\"true\" and true"), list(vec![boolean(true)]));
}

#[test]
fn ternary_expressions() {
    assert_eq!(eval("1 < 2 ? \"yes\" : \"no\""), list(vec![text("yes")]));
    assert_eq!(eval("1 > 2 ? \"yes\" : \"no\""), list(vec![text("no")]));
}

#[test]
fn null_coalescing() {
    assert_eq!(eval("null ?? \"fallback\""), list(vec![text("fallback")]));
    assert_eq!(eval("\"x\" ?? \"y\""), list(vec![text("x")]));
    assert_eq!(eval("null ?? null ?? 3"), list(vec![int(3)]));
}

#[test]
fn if_and_else_blocks() {
    assert_eq!(eval("a = 1; if (a == 1) { \"one\" } else { \"other\" }"),
               list(vec![text("one")]));
    assert_eq!(eval("a = 2; if (a == 1) { \"one\" } else { \"other\" }"),
               list(vec![text("other")]));
    assert_eq!(eval("a = 3; if (a == 1) { 1 } else if (a == 3) { 3 } else { 0 }"),
               list(vec![int(3)]));
    assert_eq!(eval("if (false) { 1 }"), Value::Null);
}

#[test]
fn for_loop_collects_iteration_values() {
    assert_eq!(eval("for (i = 0; i < 3; i++) { i }"),
               list(vec![int(0), int(1), int(2)]));
}

#[test]
fn while_loop() {
    assert_eq!(eval("i = 0; s = 0; while (i < 4) { i++; s += i; }; s"),
               list(vec![int(10)]));
}

#[test]
fn foreach_over_text_yields_code_points() {
    assert_eq!(eval("foreach (c in \"ab\") { c }"),
               list(vec![text("a"), text("b")]));
}

#[test]
fn foreach_variable_is_removed_after_loop() {
    // After the loop, `c` is no longer bound and incrementing it fails.
    assert_failure("foreach (c in \"ab\") { }; c++");
}

#[test]
fn foreach_over_host_collection() {
    let host = BasicHost::new().with_variable("xs",
                                              list(vec![int(1), int(2), int(3)]));
    assert_eq!(eval_with(&host, "s = 0; foreach (x in xs) { s += x; }; s"),
               list(vec![int(6)]));
}

#[test]
fn break_stops_the_loop() {
    assert_eq!(eval("for (i = 0; i < 10; i++) { if (i == 3) { break; }; i }"),
               list(vec![int(0), int(1), int(2)]));
}

#[test]
fn continue_skips_to_the_next_iteration() {
    assert_eq!(eval("for (i = 0; i < 5; i++) { if (i % 2 == 1) { continue; }; i }"),
               list(vec![int(0), int(2), int(4)]));
}

#[test]
fn lambda_invocation() {
    assert_eq!(eval("x = (n) => n * n; x(4) + x(5)"), list(vec![dec("41")]));
    assert_eq!(eval("inc = n => n + 1; inc(41)"), list(vec![int(42)]));
}

#[test]
fn lambda_block_body_and_return() {
    let source = "f = (n) => { if (n > 2) { return \"big\"; }; return \"small\"; }; f(5)";
    assert_eq!(eval(source), list(vec![text("big")]));

    let source = "f = (n) => { if (n > 2) { return \"big\"; }; return \"small\"; }; f(1)";
    assert_eq!(eval(source), list(vec![text("small")]));
}

#[test]
fn lambda_captures_by_value() {
    // The closure snapshots `a` at capture time; the later rebinding is not
    // seen, and the invocation writes the snapshot value back.
    assert_eq!(eval("a = 10; f = (n) => n + a; a = 20; f(1); a"),
               list(vec![int(11), int(10)]));
}

#[test]
fn lambda_writes_captured_bindings_back() {
    // Each invocation seeds from the capture-time snapshot, so two bumps
    // still leave the counter at one.
    assert_eq!(eval("count = 0; bump = () => { count = count + 1; }; bump(); bump(); count"),
               list(vec![int(1)]));
}

#[test]
fn lambda_returning_lambda() {
    assert_eq!(eval("add = (a) => (b) => a + b; add2 = add(2); add2(3)"),
               list(vec![int(5)]));
}

#[test]
fn lambda_parameter_conflicts_with_caller_binding() {
    assert_failure("n = 1; f = (n) => n; f(2)");
}

#[test]
fn lambda_arity_mismatch() {
    assert_failure("f = (a, b) => a + b; f(1)");
    assert_failure("f = (a) => a; f(1, 2)");
}

#[test]
fn duplicate_lambda_parameters_are_rejected() {
    assert_failure("f = (a, a) => a; f(1, 2)");
}

#[test]
fn return_at_top_level_contributes_its_value() {
    assert_eq!(eval("1; return 2; 3"), list(vec![int(1), int(2)]));
}

#[test]
fn compound_assignment_requires_a_value() {
    assert_failure("b += 1");
    assert_failure("b++");
    assert_failure("--b");
}

#[test]
fn increment_and_decrement() {
    assert_eq!(eval("a = 1; a++; a"), list(vec![int(2)]));
    assert_eq!(eval("a = 1; ++a; a"), list(vec![int(2)]));
    assert_eq!(eval("a = 1; a--; a"), list(vec![int(0)]));
    assert_eq!(eval("a = 2.9; a++; a"), list(vec![int(3)]));
}

#[test]
fn compound_assignment_reads_host_variables() {
    let host = BasicHost::new().with_variable("total", int(40));
    assert_eq!(eval_with(&host, "total += 2; total"), list(vec![int(42)]));
}

#[test]
fn logical_compound_assignments() {
    assert_eq!(eval("a = true; a &= false; a"), list(vec![boolean(false)]));
    assert_eq!(eval("a = false; a |= true; a"), list(vec![boolean(true)]));
    assert_eq!(eval("a = true; a ^= true; a"), list(vec![boolean(false)]));
    assert_eq!(eval("a = 1; a <<= 3; a"), list(vec![int(8)]));
}

#[test]
fn indexers_and_member_chains() {
    let host = BasicHost::new().with_variable("xs",
                                              list(vec![int(10), int(20), int(30)]));
    assert_eq!(eval_with(&host, "xs[1]"), list(vec![int(20)]));

    let host = BasicHost::new().with_variable("words", list(vec![text("hello")]));
    // The second bracket is a member-by-name lookup on the first result.
    assert_eq!(eval_with(&host, "words[0][\"length\"]"), list(vec![int(5)]));
}

#[test]
fn member_access_and_methods() {
    assert_eq!(eval("\"hi\".length"), list(vec![int(2)]));
    assert_eq!(eval("\"hi\".upper()"), list(vec![text("HI")]));
    assert_eq!(eval("\"Hi\".lower() + \"!\""), list(vec![text("hi!")]));
}

#[test]
fn host_output_merges_with_scalar_results() {
    assert_eq!(eval("print(\"a\"); print(\"b\"); \"c\""), list(vec![text("abc")]));
}

#[test]
fn host_output_flushes_at_program_end() {
    assert_eq!(eval("print(\"hello\")"), list(vec![text("hello")]));
}

#[test]
fn parameters_reach_the_sink_and_the_scope_chain() {
    let host = BasicHost::new();
    assert_eq!(eval_with(&host, "param greeting = \"hi\"; greeting + \"!\""),
               list(vec![text("hi!")]));
    assert_eq!(host.saved_parameters(),
               vec![("greeting".to_string(), text("hi"))]);
}

#[test]
fn parameters_after_statements_are_rejected() {
    assert_failure("a = 1; param b;");
}

#[test]
fn cancellation_aborts_evaluation() {
    let host = BasicHost::new();
    host.cancellation_token().cancel();
    assert!(evaluate("1 + 1", &host).is_err());
}

#[test]
fn verbatim_and_escaped_strings() {
    assert_eq!(eval("@\"C:\\temp\""), list(vec![text("C:\\temp")]));
    assert_eq!(eval("\"a\\nb\".length"), list(vec![int(3)]));
    assert_eq!(eval("@\"say \"\"hi\"\"\""), list(vec![text("say \"hi\"")]));
}

#[test]
fn character_literals() {
    assert_eq!(eval("'a'"), list(vec![Value::Character('a')]));
    assert_eq!(eval("'a' == 'a'"), list(vec![boolean(true)]));
    assert_eq!(eval("'a' == \"a\""), list(vec![boolean(true)]));
}

#[test]
fn temporal_arithmetic() {
    let day = Value::Duration(chrono::Duration::days(1));
    let host = BasicHost::new().with_variable("day", day);

    let expected = NaiveDate::from_ymd_opt(2024, 1, 16).unwrap()
                                                       .and_hms_opt(0, 0, 0)
                                                       .unwrap();
    assert_eq!(eval_with(&host, "#2024-01-15# + day"),
               list(vec![Value::DateTime(expected)]));

    assert_eq!(eval("#2024-01-16# - #2024-01-15#"),
               list(vec![Value::Duration(chrono::Duration::days(1))]));
    assert_eq!(eval("#2024-01-15 10:30:00# - #2024-01-15 09:30:00#"),
               list(vec![Value::Duration(chrono::Duration::hours(1))]));
}

#[test]
fn temporal_mismatches_are_errors() {
    assert_failure("#2024-01-15# + #2024-01-16#");
    assert_failure("#2024-01-15# * 2");
}

#[test]
fn guid_literals() {
    let expected = Value::Guid("6f9619ff-8b86-d011-b42d-00c04fc964ff".parse().unwrap());
    assert_eq!(eval("6f9619ff-8b86-d011-b42d-00c04fc964ff"), list(vec![expected]));
    assert_eq!(eval("6f9619ff-8b86-d011-b42d-00c04fc964ff == 6f9619ff-8b86-d011-b42d-00c04fc964ff"),
               list(vec![boolean(true)]));
}

#[test]
fn empty_program_yields_null() {
    assert_eq!(eval(""), Value::Null);
    assert_eq!(eval("a = 1"), Value::Null);
}

#[test]
fn multiple_statement_results_accumulate() {
    assert_eq!(eval("1; 2; 3"), list(vec![int(1), int(2), int(3)]));
    assert_eq!(eval("1; a = 5; a"), list(vec![int(1), int(5)]));
}

#[test]
fn comments_are_ignored() {
    assert_eq!(eval("// leading comment\n1 + 1 /* inline */ ; 2"),
               list(vec![int(2), int(2)]));
}

#[test]
fn unknown_names_resolve_to_null() {
    assert_eq!(eval("missing ?? \"default\""), list(vec![text("default")]));
}

#[test]
fn type_errors_are_reported() {
    assert_failure("true + 1");
    assert_failure("null + 1");
    assert_failure("if (1) { 2 }");
    assert_failure("foreach (x in 5) { x }");
}
