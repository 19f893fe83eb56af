/// Numeric conversion helpers.
///
/// This module provides reusable conversion routines used throughout the
/// evaluator. These include safe conversions between the language's numeric
/// value types without silent data loss.
///
/// # Responsibilities
/// - Safely convert between `Decimal`, `i32` and `usize` without silent data
///   loss.
/// - Provide general utility functions used in multiple modules.
pub mod num;
