use std::rc::Rc;

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use uuid::Uuid;

/// Represents a literal value in the language.
///
/// `Literal` covers all raw, constant values that can appear directly in
/// source code: numbers, booleans, text, characters, dates, guids and `null`.
/// It is used in the AST to represent literal expressions and as a convenient
/// container for constants during evaluation.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    /// A 32-bit signed integer literal.
    Integer(i32),
    /// A base-10 decimal literal. Percent literals arrive here already
    /// divided by 100.
    Decimal(Decimal),
    /// A boolean literal value: `true` or `false`.
    Boolean(bool),
    /// A string literal. Verbatim strings have their leading `@` stripped by
    /// the lexer.
    Text(String),
    /// A single-character literal.
    Character(char),
    /// A date literal such as `#2024-01-15#`.
    DateTime(NaiveDateTime),
    /// A guid literal in `8-4-4-4-12` hex form.
    Guid(Uuid),
    /// The `null` literal.
    Null,
}

impl From<i32> for Literal {
    fn from(value: i32) -> Self {
        Self::Integer(value)
    }
}

impl From<Decimal> for Literal {
    fn from(value: Decimal) -> Self {
        Self::Decimal(value)
    }
}

impl From<bool> for Literal {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl From<&str> for Literal {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

/// Represents a binary operator.
///
/// Binary operators include arithmetic, shifts, comparisons and logic.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BinaryOperator {
    /// Addition (`+`)
    Add,
    /// Subtraction (`-`)
    Sub,
    /// Multiplication (`*`)
    Mul,
    /// Division (`/`)
    Div,
    /// Modulo (`%`)
    Mod,
    /// Left shift (`<<`)
    ShiftLeft,
    /// Right shift (`>>`)
    ShiftRight,
    /// Less than (`<`)
    Less,
    /// Less than or equal (`<=`)
    LessEqual,
    /// Greater than (`>`)
    Greater,
    /// Greater than or equal (`>=`)
    GreaterEqual,
    /// Equal to (`==`)
    Equal,
    /// Not equal to (`!=`)
    NotEqual,
    /// Logical and (`and`, `&&`, `&`)
    And,
    /// Logical or (`or`, `||`, `|`)
    Or,
    /// Logical exclusive or (`xor`, `^`)
    Xor,
}

impl std::fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use BinaryOperator::{
            Add, And, Div, Equal, Greater, GreaterEqual, Less, LessEqual, Mod, Mul, NotEqual, Or,
            ShiftLeft, ShiftRight, Sub, Xor,
        };
        let operator = match self {
            Add => "+",
            Sub => "-",
            Mul => "*",
            Div => "/",
            Mod => "%",
            ShiftLeft => "<<",
            ShiftRight => ">>",
            Less => "<",
            LessEqual => "<=",
            Greater => ">",
            GreaterEqual => ">=",
            Equal => "==",
            NotEqual => "!=",
            And => "and",
            Or => "or",
            Xor => "xor",
        };
        write!(f, "{operator}")
    }
}

/// Represents a unary operator.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum UnaryOperator {
    /// Arithmetic negation (e.g. `-x`). Produces a decimal.
    Negate,
    /// Logical NOT (e.g. `!x`).
    Not,
    /// Numeric identity (e.g. `+x`). Coerces to a decimal.
    Plus,
}

/// Represents an assignment operator, including the compound family and the
/// increment/decrement forms.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum AssignOperator {
    /// Plain assignment (`=`).
    Assign,
    /// `+=`
    Add,
    /// `-=`
    Sub,
    /// `*=`
    Mul,
    /// `/=`
    Div,
    /// `%=`
    Mod,
    /// `&=`
    And,
    /// `|=`
    Or,
    /// `^=`
    Xor,
    /// `<<=`
    ShiftLeft,
    /// `>>=`
    ShiftRight,
    /// `++` (prefix or postfix; both store the same result).
    Increment,
    /// `--` (prefix or postfix; both store the same result).
    Decrement,
}

impl AssignOperator {
    /// Maps a compound assignment operator to the binary operator it applies.
    ///
    /// Returns `None` for plain assignment and for increment/decrement, which
    /// do not route through the binary kernel.
    #[must_use]
    pub const fn binary_operator(self) -> Option<BinaryOperator> {
        match self {
            Self::Add => Some(BinaryOperator::Add),
            Self::Sub => Some(BinaryOperator::Sub),
            Self::Mul => Some(BinaryOperator::Mul),
            Self::Div => Some(BinaryOperator::Div),
            Self::Mod => Some(BinaryOperator::Mod),
            Self::And => Some(BinaryOperator::And),
            Self::Or => Some(BinaryOperator::Or),
            Self::Xor => Some(BinaryOperator::Xor),
            Self::ShiftLeft => Some(BinaryOperator::ShiftLeft),
            Self::ShiftRight => Some(BinaryOperator::ShiftRight),
            Self::Assign | Self::Increment | Self::Decrement => None,
        }
    }
}

/// Represents a jump statement kind.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum JumpKind {
    /// `break`
    Break,
    /// `continue`
    Continue,
    /// `return`
    Return,
}

/// The opening token of a primary expression, before any chain is applied.
#[derive(Debug, Clone, PartialEq)]
pub enum PrimaryStart {
    /// A parenthesised subexpression.
    Grouped(Box<Expr>),
    /// A literal value.
    Literal(Literal),
    /// A raw identifier, not yet resolved against any scope.
    Identifier(String),
}

/// One link in a primary-expression chain.
///
/// A primary expression starts with a literal, identifier or parenthesised
/// expression and is then threaded through any mix of indexers, member
/// accesses and method calls, left to right.
#[derive(Debug, Clone, PartialEq)]
pub enum ChainLink {
    /// A bracket expression `[k1][k2]...`. The first key addresses the
    /// host indexer; each further key performs a member-by-name access on
    /// the previous result.
    Index {
        /// The key expressions, in source order.
        keys: Vec<Expr>,
        /// Line number in the source code.
        line: usize,
    },
    /// A member access `.name`, optionally followed by an invocation.
    Member {
        /// The accessor name.
        name: String,
        /// Argument expressions when the member is invoked as a method,
        /// `None` for a property read.
        args: Option<Vec<Expr>>,
        /// Line number in the source code.
        line: usize,
    },
    /// A call `(args...)` applied directly to the primary start, used for
    /// lambda invocation and free host methods.
    Call {
        /// Argument expressions, in source order.
        args: Vec<Expr>,
        /// Line number in the source code.
        line: usize,
    },
}

/// The body of a lambda expression.
///
/// A body is either a single expression or a braced statement list.
#[derive(Debug, Clone, PartialEq)]
pub enum LambdaBody {
    /// A bare expression body, e.g. `x => x * x`.
    Expression(Expr),
    /// A block body, e.g. `x => { a = x; return a; }`.
    Block(Block),
}

/// An abstract syntax tree node representing an expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A conditional (`cond ? a : b`). When both branches are absent the
    /// condition value passes through untouched.
    Ternary {
        /// The condition expression.
        condition:   Box<Self>,
        /// Expression evaluated when the condition is true.
        then_branch: Option<Box<Self>>,
        /// Expression evaluated when the condition is false.
        else_branch: Option<Box<Self>>,
        /// Line number in the source code.
        line:        usize,
    },
    /// Null-coalescing (`left ?? right`).
    NullCoalesce {
        /// The preferred expression.
        left:  Box<Self>,
        /// The fallback, evaluated only when `left` is null.
        right: Box<Self>,
        /// Line number in the source code.
        line:  usize,
    },
    /// A binary operation (addition, comparison, logic, shift, ...).
    Binary {
        /// Left operand.
        left:  Box<Self>,
        /// The operator.
        op:    BinaryOperator,
        /// Right operand.
        right: Box<Self>,
        /// Line number in the source code.
        line:  usize,
    },
    /// A unary operation.
    Unary {
        /// The unary operator to apply.
        op:   UnaryOperator,
        /// The operand expression.
        expr: Box<Self>,
        /// Line number in the source code.
        line: usize,
    },
    /// A primary expression: a start value threaded through a chain of
    /// indexers, member accesses and calls.
    Primary {
        /// The opening literal, identifier or group.
        start: PrimaryStart,
        /// The chain applied to the start, in source order.
        chain: Vec<ChainLink>,
        /// Line number in the source code.
        line:  usize,
    },
    /// A lambda expression (signature plus body).
    Lambda {
        /// Ordered parameter names, unique within the signature.
        params: Vec<String>,
        /// The body subtree, shared with any lambda values produced from it.
        body:   Rc<LambdaBody>,
        /// Line number in the source code.
        line:   usize,
    },
}

impl Expr {
    /// Gets the line number from `self`.
    #[must_use]
    pub const fn line_number(&self) -> usize {
        match self {
            Self::Ternary { line, .. }
            | Self::NullCoalesce { line, .. }
            | Self::Binary { line, .. }
            | Self::Unary { line, .. }
            | Self::Primary { line, .. }
            | Self::Lambda { line, .. } => *line,
        }
    }
}

/// A braced statement list.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    /// Statements inside the block.
    pub statements: Vec<Statement>,
    /// Line number in the source code.
    pub line:       usize,
}

/// An assignment statement: plain, compound or increment/decrement.
///
/// The target is always a bare identifier.
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    /// The name of the variable being written.
    pub target: String,
    /// The assignment operator.
    pub op:     AssignOperator,
    /// The right-hand side. Absent for increment/decrement.
    pub value:  Option<Expr>,
    /// Line number in the source code.
    pub line:   usize,
}

/// Represents a statement.
///
/// Statements are the units executed by the statement-list evaluator. A
/// statement produces either null or a value; non-null values accumulate
/// into the enclosing list result.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// A standalone expression evaluated for its result.
    Expression {
        /// The expression to evaluate.
        expr: Expr,
        /// Line number in the source code.
        line: usize,
    },
    /// An assignment. Contributes null to the statement-list result.
    Assignment(Assignment),
    /// A `break`, `continue` or `return` statement.
    Jump {
        /// Which jump this is.
        kind:  JumpKind,
        /// The optional carried expression (`return <expr>` only).
        value: Option<Expr>,
        /// Line number in the source code.
        line:  usize,
    },
    /// An `if` statement with an optional `else` branch.
    If {
        /// The condition expression; must produce a boolean.
        condition:  Expr,
        /// Block executed when the condition is true.
        then_block: Block,
        /// Optional block executed when the condition is false.
        else_block: Option<Block>,
        /// Line number in the source code.
        line:       usize,
    },
    /// A C-style `for` statement.
    For {
        /// The optional initialiser, run once before the loop.
        init:      Option<Box<Statement>>,
        /// The optional condition, checked before each iteration.
        condition: Option<Expr>,
        /// The optional iterator statement, run after each iteration.
        iterator:  Option<Box<Statement>>,
        /// The loop body.
        body:      Block,
        /// Line number in the source code.
        line:      usize,
    },
    /// A `while` statement.
    While {
        /// The condition expression; must produce a boolean.
        condition: Expr,
        /// The loop body.
        body:      Block,
        /// Line number in the source code.
        line:      usize,
    },
    /// A `foreach` statement binding each element of an iterable in turn.
    Foreach {
        /// The iteration variable name.
        variable: String,
        /// The iterable expression (a collection, or text iterated per code
        /// point).
        iterable: Expr,
        /// The loop body.
        body:     Block,
        /// Line number in the source code.
        line:     usize,
    },
}

impl Statement {
    /// Gets the line number from `self`.
    #[must_use]
    pub const fn line_number(&self) -> usize {
        match self {
            Self::Expression { line, .. }
            | Self::Jump { line, .. }
            | Self::If { line, .. }
            | Self::For { line, .. }
            | Self::While { line, .. }
            | Self::Foreach { line, .. } => *line,
            Self::Assignment(assignment) => assignment.line,
        }
    }
}

/// A parameter declaration at the head of a program.
///
/// Parameters are forwarded to the host's parameter sink before the
/// statement list runs.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterDecl {
    /// The declared parameter name.
    pub name:  String,
    /// The optional initial value expression.
    pub value: Option<Expr>,
    /// Line number in the source code.
    pub line:  usize,
}

/// A complete parsed program: parameter declarations followed by the
/// top-level statement list.
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    /// Parameter declarations, in source order.
    pub parameters: Vec<ParameterDecl>,
    /// Top-level statements, in source order.
    pub statements: Vec<Statement>,
}
