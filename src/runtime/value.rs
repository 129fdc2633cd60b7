//! The universal runtime value.

use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

use crate::curry::{CurryError, Curried};

use super::function::{Function, NativeFunction};

/// A dynamically typed runtime value.
///
/// Every value the engine touches (arguments, receivers, results, and the
/// callables themselves) is a `Value`. Scalar variants are stored inline;
/// aggregate variants share their payload through [`Rc`], so cloning is
/// cheap and never deep-copies.
///
/// Records use a [`BTreeMap`] so field iteration and display order are
/// deterministic.
///
/// # Equality and identity
///
/// [`PartialEq`] compares scalars and aggregates structurally, except for
/// functions, which compare by identity (two callables are equal only when
/// they are the same allocation). [`Value::same`] compares by identity for
/// all reference-counted variants; the engine's rebinding rules use it to
/// decide whether two receivers are "the same object".
///
/// # Examples
///
/// ```rust
/// use curryrs::runtime::Value;
///
/// let point = Value::record([("x", Value::Int(1)), ("y", Value::Int(2))]);
/// assert_eq!(point.field("y"), Some(Value::Int(2)));
/// assert_eq!(point.type_name(), "record");
/// ```
#[derive(Clone, Debug)]
pub enum Value {
    /// The unit value, the result of computations with nothing to return.
    Unit,
    /// A boolean.
    Bool(bool),
    /// A signed integer.
    Int(i64),
    /// A double-precision float.
    Float(f64),
    /// An immutable string.
    Str(Rc<str>),
    /// An ordered list of values.
    List(Rc<Vec<Value>>),
    /// A record of named fields; the usual shape of a receiver object.
    Record(Rc<BTreeMap<String, Value>>),
    /// A callable value, plain or curried.
    Function(Function),
}

impl Value {
    // =========================================================================
    // Constructors
    // =========================================================================

    /// Creates a string value.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use curryrs::runtime::Value;
    ///
    /// let greeting = Value::string("hello");
    /// assert_eq!(greeting, Value::string("hello"));
    /// ```
    pub fn string(text: impl Into<Rc<str>>) -> Self {
        Self::Str(text.into())
    }

    /// Creates a list value from an iterator of elements.
    pub fn list<I>(elements: I) -> Self
    where
        I: IntoIterator<Item = Self>,
    {
        Self::List(Rc::new(elements.into_iter().collect()))
    }

    /// Creates a record value from `(name, value)` pairs.
    ///
    /// Records are the usual receiver objects: member-style computations
    /// resolve `this.field` against them.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use curryrs::runtime::Value;
    ///
    /// let receiver = Value::record([("base", Value::Int(10))]);
    /// assert_eq!(receiver.field("base"), Some(Value::Int(10)));
    /// ```
    pub fn record<I, K>(fields: I) -> Self
    where
        I: IntoIterator<Item = (K, Self)>,
        K: Into<String>,
    {
        Self::Record(Rc::new(
            fields
                .into_iter()
                .map(|(name, value)| (name.into(), value))
                .collect(),
        ))
    }

    /// Creates an anonymous native function value.
    ///
    /// The body receives the resolved receiver (if any) and the argument
    /// slice, and may recurse into the engine; engine errors propagate to
    /// the caller unchanged.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use curryrs::runtime::Value;
    ///
    /// let negate = Value::native(1, |_, arguments| match &arguments[0] {
    ///     Value::Int(number) => Ok(Value::Int(-number)),
    ///     _ => Ok(Value::Unit),
    /// });
    /// assert_eq!(negate.type_name(), "function");
    /// ```
    pub fn native<F>(parameter_count: usize, body: F) -> Self
    where
        F: Fn(Option<&Self>, &[Self]) -> Result<Self, CurryError> + 'static,
    {
        Self::Function(Function::Native(Rc::new(NativeFunction::new(
            parameter_count,
            body,
        ))))
    }

    /// Creates a named native function value.
    ///
    /// The name only affects diagnostics and display.
    pub fn native_named<F>(name: impl Into<Rc<str>>, parameter_count: usize, body: F) -> Self
    where
        F: Fn(Option<&Self>, &[Self]) -> Result<Self, CurryError> + 'static,
    {
        Self::Function(Function::Native(Rc::new(NativeFunction::named(
            name,
            parameter_count,
            body,
        ))))
    }

    // =========================================================================
    // Inspection
    // =========================================================================

    /// Returns the name of this value's runtime type, for diagnostics.
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Unit => "unit",
            Self::Bool(_) => "boolean",
            Self::Int(_) => "integer",
            Self::Float(_) => "float",
            Self::Str(_) => "string",
            Self::List(_) => "list",
            Self::Record(_) => "record",
            Self::Function(_) => "function",
        }
    }

    /// Returns `true` unless the value is unit, `false`, zero, or empty text.
    ///
    /// Lists, records, and functions are always truthy, regardless of
    /// content.
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Unit => false,
            Self::Bool(flag) => *flag,
            Self::Int(number) => *number != 0,
            Self::Float(number) => *number != 0.0,
            Self::Str(text) => !text.is_empty(),
            Self::List(_) | Self::Record(_) | Self::Function(_) => true,
        }
    }

    /// Returns the integer payload, if this value is an integer.
    pub const fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(number) => Some(*number),
            _ => None,
        }
    }

    /// Looks up a record field by name, cloning the stored value.
    ///
    /// Returns `None` for missing fields and for non-record values.
    pub fn field(&self, name: &str) -> Option<Self> {
        match self {
            Self::Record(fields) => fields.get(name).cloned(),
            _ => None,
        }
    }

    /// Returns the callable payload, if this value is a function.
    pub const fn as_function(&self) -> Option<&Function> {
        match self {
            Self::Function(function) => Some(function),
            _ => None,
        }
    }

    /// Returns the curried payload, if this value is a curried function.
    pub fn as_curried(&self) -> Option<&Curried> {
        match self {
            Self::Function(Function::Curried(curried)) => Some(curried.as_ref()),
            _ => None,
        }
    }

    /// Compares two values by identity.
    ///
    /// Scalars compare by content; reference-counted variants compare by
    /// allocation. This is the comparison the engine uses for receiver
    /// objects: two records with equal fields are *not* the same receiver.
    #[allow(clippy::float_cmp)]
    pub fn same(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Unit, Self::Unit) => true,
            (Self::Bool(first), Self::Bool(second)) => first == second,
            (Self::Int(first), Self::Int(second)) => first == second,
            (Self::Float(first), Self::Float(second)) => first == second,
            (Self::Str(first), Self::Str(second)) => Rc::ptr_eq(first, second),
            (Self::List(first), Self::List(second)) => Rc::ptr_eq(first, second),
            (Self::Record(first), Self::Record(second)) => Rc::ptr_eq(first, second),
            (Self::Function(first), Self::Function(second)) => first.same(second),
            _ => false,
        }
    }
}

impl PartialEq for Value {
    #[allow(clippy::float_cmp)]
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Unit, Self::Unit) => true,
            (Self::Bool(first), Self::Bool(second)) => first == second,
            (Self::Int(first), Self::Int(second)) => first == second,
            (Self::Float(first), Self::Float(second)) => first == second,
            (Self::Str(first), Self::Str(second)) => first == second,
            (Self::List(first), Self::List(second)) => first == second,
            (Self::Record(first), Self::Record(second)) => first == second,
            (Self::Function(first), Self::Function(second)) => first.same(second),
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unit => write!(formatter, "()"),
            Self::Bool(flag) => write!(formatter, "{flag}"),
            Self::Int(number) => write!(formatter, "{number}"),
            Self::Float(number) => write!(formatter, "{number}"),
            Self::Str(text) => write!(formatter, "{text:?}"),
            Self::List(elements) => {
                write!(formatter, "[")?;
                for (index, element) in elements.iter().enumerate() {
                    if index > 0 {
                        write!(formatter, ", ")?;
                    }
                    write!(formatter, "{element}")?;
                }
                write!(formatter, "]")
            }
            Self::Record(fields) => {
                write!(formatter, "{{")?;
                for (index, (name, value)) in fields.iter().enumerate() {
                    if index > 0 {
                        write!(formatter, ", ")?;
                    }
                    write!(formatter, "{name}: {value}")?;
                }
                write!(formatter, "}}")
            }
            Self::Function(function) => write!(formatter, "{function}"),
        }
    }
}
