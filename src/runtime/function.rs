//! Callable representations: native host functions and the callable sum.

use std::fmt;
use std::rc::Rc;

use crate::curry::{CurryError, Curried};

use super::value::Value;

/// The body of a native function.
///
/// Receives the resolved receiver (if any) and the argument slice. Bodies
/// are fallible so user callables can recurse into the engine and propagate
/// its errors with `?`.
pub type NativeBody = Rc<dyn Fn(Option<&Value>, &[Value]) -> Result<Value, CurryError>>;

/// A host function with a declared parameter count.
///
/// The parameter count is the function's *natural arity*: the arity the
/// engine targets when currying without an explicit arity. It is purely
/// declarative; the body always receives whatever argument slice the
/// invocation resolved to.
///
/// # Examples
///
/// ```rust
/// use curryrs::runtime::{NativeFunction, Value};
///
/// let double = NativeFunction::named("double", 1, |_, arguments| {
///     match &arguments[0] {
///         Value::Int(number) => Ok(Value::Int(number * 2)),
///         _ => Ok(Value::Unit),
///     }
/// });
///
/// assert_eq!(double.parameter_count(), 1);
/// assert_eq!(double.invoke(None, &[Value::Int(21)]), Ok(Value::Int(42)));
/// ```
#[derive(Clone)]
pub struct NativeFunction {
    name: Option<Rc<str>>,
    parameter_count: usize,
    body: NativeBody,
}

impl NativeFunction {
    /// Creates an anonymous native function.
    pub fn new<F>(parameter_count: usize, body: F) -> Self
    where
        F: Fn(Option<&Value>, &[Value]) -> Result<Value, CurryError> + 'static,
    {
        Self {
            name: None,
            parameter_count,
            body: Rc::new(body),
        }
    }

    /// Creates a named native function. The name only affects diagnostics.
    pub fn named<F>(name: impl Into<Rc<str>>, parameter_count: usize, body: F) -> Self
    where
        F: Fn(Option<&Value>, &[Value]) -> Result<Value, CurryError> + 'static,
    {
        Self {
            name: Some(name.into()),
            parameter_count,
            body: Rc::new(body),
        }
    }

    /// Returns the function's name, if it has one.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Returns the declared parameter count (the natural arity).
    pub const fn parameter_count(&self) -> usize {
        self.parameter_count
    }

    /// Invokes the body with the given receiver and arguments.
    ///
    /// This is a *plain* call: no arity bookkeeping happens here. The
    /// engine's partial-application step trims and accumulates arguments
    /// before it reaches this point.
    pub fn invoke(
        &self,
        receiver: Option<&Value>,
        arguments: &[Value],
    ) -> Result<Value, CurryError> {
        (self.body)(receiver, arguments)
    }
}

impl fmt::Debug for NativeFunction {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("NativeFunction")
            .field("name", &self.name)
            .field("parameter_count", &self.parameter_count)
            .finish_non_exhaustive()
    }
}

/// A callable value: a plain native function or a curried function.
///
/// Both variants share their payload through [`Rc`]; cloning a `Function`
/// never copies the underlying callable, and identity ([`Function::same`])
/// is preserved across clones. The engine relies on that identity for its
/// idempotence guarantee: re-currying a curried value with the same arity
/// and mode returns the *identical* callable.
#[derive(Clone, Debug)]
pub enum Function {
    /// A plain host function.
    Native(Rc<NativeFunction>),
    /// A partially-applicable callable produced by the engine.
    Curried(Rc<Curried>),
}

impl Function {
    /// Returns the function's name, if it has one.
    ///
    /// Curried functions report the name of their underlying native.
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Native(native) => native.name(),
            Self::Curried(curried) => curried.underlying().name(),
        }
    }

    /// Compares two callables by identity.
    pub fn same(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Native(first), Self::Native(second)) => Rc::ptr_eq(first, second),
            (Self::Curried(first), Self::Curried(second)) => Rc::ptr_eq(first, second),
            _ => false,
        }
    }
}

impl fmt::Display for Function {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Native(native) => write!(
                formatter,
                "<function {}/{}>",
                native.name().unwrap_or("anonymous"),
                native.parameter_count()
            ),
            Self::Curried(curried) => write!(
                formatter,
                "<curried {}/{}>",
                curried.underlying().name().unwrap_or("anonymous"),
                curried.arity()
            ),
        }
    }
}
