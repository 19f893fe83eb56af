use crate::{
    ast::BinaryOperator,
    interpreter::{
        evaluator::core::{EvalResult, Walker},
        value::core::Value,
    },
};

impl Walker<'_> {
    /// Evaluates a binary operation between two values.
    ///
    /// This function routes the operation to specialized handlers depending
    /// on the operator. Addition and subtraction carry the type-dependent
    /// semantics (integer, decimal, temporal and text paths); multiplication,
    /// division and modulo widen both operands to decimal; shifts coerce both
    /// operands to integers; comparisons resolve an ordering through the
    /// host's comparer registry; logical operators convert both operands to
    /// booleans.
    ///
    /// Both operands have already been evaluated by the caller, so logical
    /// operators never short-circuit.
    ///
    /// # Parameters
    /// - `op`: The operator.
    /// - `left`: Left operand.
    /// - `right`: Right operand.
    /// - `line`: Line number for error reporting.
    ///
    /// # Returns
    /// An `EvalResult<Value>` containing the evaluated result.
    pub fn eval_binary(&self,
                       op: BinaryOperator,
                       left: &Value,
                       right: &Value,
                       line: usize)
                       -> EvalResult<Value> {
        use BinaryOperator::{
            Add, And, Div, Equal, Greater, GreaterEqual, Less, LessEqual, Mod, Mul, NotEqual, Or,
            ShiftLeft, ShiftRight, Sub, Xor,
        };

        match op {
            Add => Self::eval_add(left, right, line),
            Sub => Self::eval_sub(left, right, line),
            Mul | Div | Mod => Self::eval_multiplicative(op, left, right, line),
            ShiftLeft | ShiftRight => Self::eval_shift(op, left, right, line),
            Less | LessEqual | Greater | GreaterEqual | Equal | NotEqual => {
                self.eval_comparison(op, left, right, line)
            },
            And | Or | Xor => Self::eval_logic(op, left, right, line),
        }
    }
}
