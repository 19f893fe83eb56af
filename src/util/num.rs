use rust_decimal::{Decimal, prelude::ToPrimitive};

use crate::{error::RuntimeError, interpreter::evaluator::core::EvalResult};

/// Safely converts a `Decimal` to an `i32`, truncating toward zero.
///
/// ## Errors
/// Returns `Err(RuntimeError::ArithmeticError)` if the truncated value does
/// not fit in an `i32`.
///
/// ## Parameters
/// - `value`: The decimal to convert.
/// - `line`: Source code line number for error reporting.
///
/// ## Returns
/// - `Ok(i32)`: The truncated value if it is representable.
/// - `Err(RuntimeError::ArithmeticError)`: If the value is out of range.
///
/// ## Example
/// ```
/// use rust_decimal::Decimal;
/// use scriptlet::util::num::decimal_to_i32_checked;
///
/// let value = Decimal::new(1995, 2); // 19.95
/// assert_eq!(decimal_to_i32_checked(value, 1).unwrap(), 19);
///
/// let too_big = Decimal::from(i64::from(i32::MAX) + 1);
/// assert!(decimal_to_i32_checked(too_big, 1).is_err());
/// ```
pub fn decimal_to_i32_checked(value: Decimal, line: usize) -> EvalResult<i32> {
    value.trunc()
         .to_i32()
         .ok_or_else(|| RuntimeError::ArithmeticError { details:
                                                            format!("Value {value} does not fit in a 32-bit integer"),
                                                        line })
}

/// Safely converts an `i32` index to a `usize`.
///
/// ## Errors
/// Returns `Err(RuntimeError::ArithmeticError)` if the value is negative.
///
/// ## Parameters
/// - `value`: The integer index to convert.
/// - `line`: Source code line number for error reporting.
///
/// ## Returns
/// - `Ok(usize)`: The converted index.
/// - `Err(RuntimeError::ArithmeticError)`: If the index is negative.
pub fn i32_to_usize_checked(value: i32, line: usize) -> EvalResult<usize> {
    usize::try_from(value).map_err(|_| RuntimeError::ArithmeticError { details:
                                                                           format!("Index {value} is negative"),
                                                                       line })
}
