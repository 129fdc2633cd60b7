//! Error types for the currying engine.
//!
//! Every failure the engine can produce is immediate and synchronous; the
//! engine performs no suppression, retries, or fallback. Errors surface to
//! the caller at the exact point of violation.

/// Represents errors raised by the currying engine.
///
/// # Examples
///
/// ```rust
/// use curryrs::curry::CurryError;
///
/// let error = CurryError::NotCallable { found: "integer" };
/// assert_eq!(
///     format!("{}", error),
///     "not callable: expected a function, found integer"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CurryError {
    /// An entry point or introspection operation received a non-callable
    /// value.
    NotCallable {
        /// Runtime type name of the offending value.
        found: &'static str,
    },
    /// A requested arity is not a non-negative integer.
    InvalidArity {
        /// The arity that was requested.
        requested: i64,
    },
    /// An attempt to curry a function through an entry point that conflicts
    /// with its existing context mode. A curried function carries its mode
    /// for its entire lifetime; it cannot be unbound or rebound later.
    IncompatibleRebind {
        /// Binding style the function already carries.
        existing: &'static str,
        /// The conflicting binding that was requested.
        requested: &'static str,
    },
    /// A receiver-dependent invocation occurred without a resolvable
    /// call-site receiver.
    MissingReceiver,
    /// A call supplied zero arguments to a function requiring at least one,
    /// outside the receiver-seeding exception for uncaptured
    /// receiver-pending functions.
    ArityStarvation {
        /// Number of arguments the function still expects.
        arity: usize,
    },
}

impl std::fmt::Display for CurryError {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotCallable { found } => {
                write!(formatter, "not callable: expected a function, found {found}")
            }
            Self::InvalidArity { requested } => write!(
                formatter,
                "invalid arity: expected a non-negative integer, got {requested}"
            ),
            Self::IncompatibleRebind { existing, requested } => write!(
                formatter,
                "incompatible rebind: cannot re-curry a {existing} function {requested}"
            ),
            Self::MissingReceiver => write!(
                formatter,
                "missing receiver: a receiver-pending function was invoked without a call-site receiver"
            ),
            Self::ArityStarvation { arity } => write!(
                formatter,
                "arity starvation: at least one argument required, {arity} still expected"
            ),
        }
    }
}

impl std::error::Error for CurryError {}
