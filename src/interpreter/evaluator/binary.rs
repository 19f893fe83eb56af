/// Binary operator dispatch.
///
/// Routes each operator to its specialized handler.
pub mod core;

/// Arithmetic operators.
///
/// Addition, subtraction, multiplication, division and modulo, with the
/// integer, decimal, temporal and text paths.
pub mod arith;

/// Comparison operators.
///
/// Resolves an ordering through the comparer registry and thresholds it per
/// operator.
pub mod compare;

/// Logical operators.
///
/// Non-short-circuiting AND, OR and XOR over booleans.
pub mod logic;

/// Shift operators.
///
/// Left and right shifts over coerced integers.
pub mod shift;
