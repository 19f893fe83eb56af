/// Binary operator evaluation logic.
///
/// Handles the execution of all binary operations in expressions, including
/// arithmetic, comparisons, logical operators and shifts.
pub mod binary;

/// Unary operator evaluation logic.
///
/// Implements arithmetic negation, numeric identity and logical NOT.
pub mod unary;

/// Core evaluation logic and walker state.
///
/// Contains the tree walker, the statement-list evaluator, the jump-signal
/// plumbing and error propagation.
pub mod core;

/// Control-flow statements.
///
/// Evaluation of `if`, `for`, `while`, `foreach` and the jump statements,
/// including per-iteration cancellation checks and result flattening.
pub mod control;

/// Assignment statements.
///
/// Plain, compound and increment/decrement assignment against the local
/// scope.
pub mod assign;

/// Primary-expression chains.
///
/// Threads a literal, identifier or group through indexers, member accesses
/// and calls, dispatching to the host where the language ends.
pub mod primary;

/// Lambda invocation.
///
/// Builds the nested walker for a lambda call and reconciles its scope back
/// into the caller.
pub mod lambda;

/// Local variable scope.
///
/// The flat name-to-value mapping owned by each walker.
pub mod scope;

/// The comparer registry.
///
/// The ordered dispatch table backing the comparison operators, with its
/// null-aware, numeric and default builtins.
pub mod comparers;
