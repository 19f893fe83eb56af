use std::{any::Any, rc::Rc};

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{
    ast::Literal,
    error::RuntimeError,
    interpreter::{evaluator::core::EvalResult, value::lambda::LambdaValue},
    util::num::decimal_to_i32_checked,
};

/// Represents a runtime value in the evaluator.
///
/// This enum models all the possible types that can appear in expressions,
/// assignments, lambda invocations and host calls. Every operator is defined
/// on specific variant combinations; anything else fails with a type error.
#[derive(Clone)]
pub enum Value {
    /// A 32-bit signed integer.
    Integer(i32),
    /// A 128-bit base-10 decimal number.
    Decimal(Decimal),
    /// A boolean value (`true` or `false`).
    /// Produced by comparison operators (`<`, `==`, `!=`, etc.) and logical
    /// operations. Conditions in `if`, `while` and ternaries must evaluate
    /// to `Boolean`.
    Boolean(bool),
    /// A text value.
    Text(String),
    /// A single character. Carried as a distinct tag but rendered as
    /// one-character text.
    Character(char),
    /// A point in time.
    DateTime(NaiveDateTime),
    /// A signed span of time.
    Duration(chrono::Duration),
    /// A 128-bit identifier.
    Guid(Uuid),
    /// The absence of a value.
    Null,
    /// An ordered sequence of values.
    Collection(Rc<Vec<Self>>),
    /// An opaque handle owned by the host, carried through host calls
    /// untouched. Compared by identity.
    HostObject(Rc<dyn Any>),
    /// A lambda: captured body subtree plus a snapshot of the enclosing
    /// scope at capture time.
    Lambda(Rc<LambdaValue>),
}

/// Identifies the variant of a [`Value`] without its payload.
///
/// Tags key the comparer registry and drive operator dispatch.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ValueTag {
    /// Tag of [`Value::Integer`].
    Integer,
    /// Tag of [`Value::Decimal`].
    Decimal,
    /// Tag of [`Value::Boolean`].
    Boolean,
    /// Tag of [`Value::Text`].
    Text,
    /// Tag of [`Value::Character`].
    Character,
    /// Tag of [`Value::DateTime`].
    DateTime,
    /// Tag of [`Value::Duration`].
    Duration,
    /// Tag of [`Value::Guid`].
    Guid,
    /// Tag of [`Value::Null`].
    Null,
    /// Tag of [`Value::Collection`].
    Collection,
    /// Tag of [`Value::HostObject`].
    HostObject,
    /// Tag of [`Value::Lambda`].
    Lambda,
}

impl std::fmt::Display for ValueTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Integer => "integer",
            Self::Decimal => "decimal",
            Self::Boolean => "boolean",
            Self::Text => "text",
            Self::Character => "character",
            Self::DateTime => "datetime",
            Self::Duration => "duration",
            Self::Guid => "guid",
            Self::Null => "null",
            Self::Collection => "collection",
            Self::HostObject => "host object",
            Self::Lambda => "lambda",
        };
        write!(f, "{name}")
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Self::Integer(v)
    }
}

impl From<Decimal> for Value {
    fn from(v: Decimal) -> Self {
        Self::Decimal(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Boolean(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<Vec<Self>> for Value {
    fn from(v: Vec<Self>) -> Self {
        Self::Collection(Rc::new(v))
    }
}

impl From<&Literal> for Value {
    fn from(literal: &Literal) -> Self {
        match literal {
            Literal::Integer(n) => Self::Integer(*n),
            Literal::Decimal(d) => Self::Decimal(*d),
            Literal::Boolean(b) => Self::Boolean(*b),
            Literal::Text(s) => Self::Text(s.clone()),
            Literal::Character(c) => Self::Character(*c),
            Literal::DateTime(dt) => Self::DateTime(*dt),
            Literal::Guid(g) => Self::Guid(*g),
            Literal::Null => Self::Null,
        }
    }
}

impl Value {
    /// Returns the tag identifying this value's variant.
    #[must_use]
    pub const fn tag(&self) -> ValueTag {
        match self {
            Self::Integer(_) => ValueTag::Integer,
            Self::Decimal(_) => ValueTag::Decimal,
            Self::Boolean(_) => ValueTag::Boolean,
            Self::Text(_) => ValueTag::Text,
            Self::Character(_) => ValueTag::Character,
            Self::DateTime(_) => ValueTag::DateTime,
            Self::Duration(_) => ValueTag::Duration,
            Self::Guid(_) => ValueTag::Guid,
            Self::Null => ValueTag::Null,
            Self::Collection(_) => ValueTag::Collection,
            Self::HostObject(_) => ValueTag::HostObject,
            Self::Lambda(_) => ValueTag::Lambda,
        }
    }

    /// Returns `true` if the value is [`Null`].
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns `true` if the value is a numeric variant.
    ///
    /// The numeric variants are [`Integer`] and [`Decimal`]; mixed pairs of
    /// the two are admitted by every arithmetic operator.
    ///
    /// [`Integer`]: Self::Integer
    /// [`Decimal`]: Self::Decimal
    #[must_use]
    pub const fn is_numeric(&self) -> bool {
        matches!(self, Self::Integer(..) | Self::Decimal(..))
    }

    /// Returns `true` if the value is [`Collection`].
    ///
    /// [`Collection`]: Self::Collection
    #[must_use]
    pub const fn is_collection(&self) -> bool {
        matches!(self, Self::Collection(..))
    }

    /// Converts the value to an `i32`, or returns an error.
    ///
    /// Accepts `Integer`, `Decimal` (truncating toward zero), `Boolean`
    /// (`false` is 0, `true` is 1) and `Text` parseable as an integer.
    ///
    /// # Parameters
    /// - `line`: Source code line number for error reporting.
    ///
    /// # Returns
    /// - `Ok(i32)`: The converted value.
    /// - `Err(RuntimeError::TypeError | ArithmeticError)`: If the variant is
    ///   not convertible or the decimal is out of range.
    ///
    /// # Example
    /// ```
    /// use scriptlet::interpreter::value::core::Value;
    ///
    /// assert_eq!(Value::Boolean(true).as_integer(1).unwrap(), 1);
    /// assert_eq!(Value::Text("42".into()).as_integer(1).unwrap(), 42);
    /// assert!(Value::Null.as_integer(1).is_err());
    /// ```
    pub fn as_integer(&self, line: usize) -> EvalResult<i32> {
        match self {
            Self::Integer(n) => Ok(*n),
            Self::Decimal(d) => decimal_to_i32_checked(*d, line),
            Self::Boolean(b) => Ok(i32::from(*b)),
            Self::Text(s) => {
                s.trim()
                 .parse()
                 .map_err(|_| RuntimeError::TypeError { details:
                                                            format!("Cannot read '{s}' as an integer"),
                                                        line })
            },
            _ => Err(RuntimeError::TypeError { details: format!("Cannot convert {} to integer",
                                                                self.tag()),
                                               line }),
        }
    }

    /// Converts the value to a `Decimal`, or returns an error.
    ///
    /// Accepts both numeric variants, `Boolean` and `Text` parseable as a
    /// decimal. Text parsing uses the invariant form and tolerates `,` as a
    /// grouping separator.
    ///
    /// # Parameters
    /// - `line`: Source code line number for error reporting.
    ///
    /// # Returns
    /// - `Ok(Decimal)`: The converted value.
    /// - `Err(RuntimeError::TypeError)`: If the variant is not convertible.
    ///
    /// # Example
    /// ```
    /// use rust_decimal::Decimal;
    /// use scriptlet::interpreter::value::core::Value;
    ///
    /// let value = Value::Text("1,234.5".into());
    /// assert_eq!(value.as_decimal(1).unwrap(), Decimal::new(12345, 1));
    /// ```
    pub fn as_decimal(&self, line: usize) -> EvalResult<Decimal> {
        match self {
            Self::Integer(n) => Ok(Decimal::from(*n)),
            Self::Decimal(d) => Ok(*d),
            Self::Boolean(b) => Ok(Decimal::from(i32::from(*b))),
            Self::Text(s) => {
                let plain = s.trim().replace(',', "");
                plain.parse()
                     .map_err(|_| RuntimeError::TypeError { details:
                                                                format!("Cannot read '{s}' as a decimal"),
                                                            line })
            },
            _ => Err(RuntimeError::TypeError { details: format!("Cannot convert {} to decimal",
                                                                self.tag()),
                                               line }),
        }
    }

    /// Converts the value to a `bool`, or returns an error.
    ///
    /// Accepts `Boolean` and `Text` equal to `true` or `false`
    /// (case-insensitive).
    ///
    /// # Parameters
    /// - `line`: Source code line number for error reporting.
    ///
    /// # Returns
    /// - `Ok(bool)`: The boolean value.
    /// - `Err(RuntimeError::TypeError)`: If the variant is not convertible.
    pub fn as_boolean(&self, line: usize) -> EvalResult<bool> {
        match self {
            Self::Boolean(b) => Ok(*b),
            Self::Text(s) if s.eq_ignore_ascii_case("true") => Ok(true),
            Self::Text(s) if s.eq_ignore_ascii_case("false") => Ok(false),
            _ => Err(RuntimeError::TypeError { details: format!("Cannot convert {} to boolean",
                                                                self.tag()),
                                               line }),
        }
    }

    /// Renders the value in its canonical textual form.
    ///
    /// This conversion is total. Decimals drop non-significant trailing
    /// zeros (keeping one fractional digit for a zero fraction on a zero
    /// integer part), null renders as empty text, and collections render
    /// their elements in brackets.
    ///
    /// # Example
    /// ```
    /// use rust_decimal::Decimal;
    /// use scriptlet::interpreter::value::core::Value;
    ///
    /// assert_eq!(Value::Decimal(Decimal::new(250, 2)).to_text(), "2.5");
    /// assert_eq!(Value::Null.to_text(), "");
    /// assert_eq!(Value::Character('x').to_text(), "x");
    /// ```
    #[must_use]
    pub fn to_text(&self) -> String {
        self.to_string()
    }
}

/// Renders a decimal without non-significant trailing zeros.
///
/// Zero keeps a single fractional digit so that a computation collapsing to
/// zero still reads as a decimal rather than an integer.
fn decimal_text(value: Decimal) -> String {
    let normalized = value.normalize();
    if normalized.is_zero() {
        "0.0".to_string()
    } else {
        normalized.to_string()
    }
}

/// Renders a duration as `[-][d.]hh:mm:ss`.
fn duration_text(value: chrono::Duration) -> String {
    let total = value.num_seconds();
    let magnitude = total.unsigned_abs();
    let (days, hours, minutes, seconds) =
        (magnitude / 86_400, magnitude / 3_600 % 24, magnitude / 60 % 60, magnitude % 60);

    let sign = if total < 0 { "-" } else { "" };
    if days > 0 {
        format!("{sign}{days}.{hours:02}:{minutes:02}:{seconds:02}")
    } else {
        format!("{sign}{hours:02}:{minutes:02}:{seconds:02}")
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Integer(n) => write!(f, "{n}"),
            Self::Decimal(d) => write!(f, "{}", decimal_text(*d)),
            Self::Boolean(b) => write!(f, "{b}"),
            Self::Text(s) => write!(f, "{s}"),
            Self::Character(c) => write!(f, "{c}"),
            Self::DateTime(dt) => write!(f, "{}", dt.format("%Y-%m-%d %H:%M:%S")),
            Self::Duration(d) => write!(f, "{}", duration_text(*d)),
            Self::Guid(g) => write!(f, "{g}"),
            Self::Null => Ok(()),
            Self::Collection(items) => {
                write!(f, "[")?;

                for (index, value) in items.iter().enumerate() {
                    if index > 0 {
                        write!(f, ", ")?;
                    }

                    write!(f, "{value}")?;
                }

                write!(f, "]")
            },
            Self::HostObject(_) => write!(f, "<host object>"),
            Self::Lambda(lambda) => write!(f, "<lambda({})>", lambda.params.join(", ")),
        }
    }
}

impl std::fmt::Debug for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Null => write!(f, "Null"),
            Self::HostObject(_) => write!(f, "HostObject(..)"),
            Self::Lambda(lambda) => write!(f, "Lambda({:?})", lambda.params),
            Self::Text(s) => write!(f, "Text({s:?})"),
            Self::Character(c) => write!(f, "Character({c:?})"),
            other => write!(f, "{}({other})", other.tag()),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Integer(a), Self::Integer(b)) => a == b,
            (Self::Decimal(a), Self::Decimal(b)) => a == b,
            (Self::Boolean(a), Self::Boolean(b)) => a == b,
            (Self::Text(a), Self::Text(b)) => a == b,
            (Self::Character(a), Self::Character(b)) => a == b,
            (Self::DateTime(a), Self::DateTime(b)) => a == b,
            (Self::Duration(a), Self::Duration(b)) => a == b,
            (Self::Guid(a), Self::Guid(b)) => a == b,
            (Self::Null, Self::Null) => true,
            (Self::Collection(a), Self::Collection(b)) => a == b,
            (Self::HostObject(a), Self::HostObject(b)) => Rc::ptr_eq(a, b),
            (Self::Lambda(a), Self::Lambda(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}
