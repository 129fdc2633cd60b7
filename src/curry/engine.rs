//! The currying state machine: construction, partial application, and
//! introspection.

use std::fmt;
use std::rc::Rc;

use smallvec::SmallVec;

use crate::runtime::{Function, NativeFunction, Value};

use super::error::CurryError;

/// Inline capacity for accumulated arguments.
///
/// Arities in practice rarely exceed 4-5, so partial applications almost
/// never spill to the heap.
const ACCUMULATED_INLINE_CAPACITY: usize = 4;

/// Storage for arguments supplied by earlier partial applications.
type ArgumentVec = SmallVec<[Value; ACCUMULATED_INLINE_CAPACITY]>;

// =============================================================================
// Context Mode
// =============================================================================

/// The receiver-binding style of a curried function.
///
/// A curried function carries its context mode for its entire lifetime.
/// Partial application never changes the mode, with one exception: the
/// first invocation of a [`PendingReceiver`](Self::PendingReceiver)
/// function captures the call-site receiver, and every value derived from
/// that invocation is [`FixedReceiver`](Self::FixedReceiver) thereafter.
#[derive(Clone, Debug)]
pub enum ContextMode {
    /// The receiver is always absent. The underlying function is invoked
    /// without an execution context, and any call-site receiver is ignored.
    Unbound,
    /// The receiver was fixed permanently, either at construction time via
    /// [`bind_receiver`] or by invocation-time capture of a pending
    /// receiver. Any call-site receiver is ignored.
    FixedReceiver(Value),
    /// The receiver is not yet known; it will be captured from the call
    /// site of the first invocation and fixed for that lineage.
    PendingReceiver,
}

impl ContextMode {
    /// Returns `true` for the pending-receiver mode.
    pub const fn is_pending(&self) -> bool {
        matches!(self, Self::PendingReceiver)
    }

    /// Returns `true` when two modes are compatible: the same variant, and
    /// for fixed receivers, the same receiver object (identity, not
    /// structural equality).
    pub fn matches(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Unbound, Self::Unbound) | (Self::PendingReceiver, Self::PendingReceiver) => true,
            (Self::FixedReceiver(first), Self::FixedReceiver(second)) => first.same(second),
            _ => false,
        }
    }

    /// Returns a short diagnostic label for this mode.
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Unbound => "context-free",
            Self::FixedReceiver(_) => "receiver-bound",
            Self::PendingReceiver => "receiver-pending",
        }
    }
}

// =============================================================================
// Curried Function
// =============================================================================

/// A partially-applicable callable with controlled arity and receiver
/// binding.
///
/// A `Curried` value is an immutable tuple of:
///
/// - the number of arguments still required before invocation (`arity`)
/// - the original, never-curried function that will ultimately be invoked
/// - the receiver-binding style ([`ContextMode`])
/// - the arguments already supplied by earlier partial applications
///
/// No instance is ever mutated after construction: each partial application
/// produces a new, independent `Curried`, and distinct instances share no
/// mutable state. Externally observable instances always hold fewer
/// accumulated arguments than their arity; once enough arguments arrive,
/// the underlying function is invoked and a plain result is returned
/// instead.
///
/// Instances are created through the four entry points ([`curry`],
/// [`curry_to`], [`bind_receiver`], [`curry_deferred`]) and by partial
/// application itself; they are not constructed directly.
#[derive(Clone)]
pub struct Curried {
    arity: usize,
    mode: ContextMode,
    underlying: Rc<NativeFunction>,
    accumulated: ArgumentVec,
}

impl Curried {
    /// Returns the number of arguments still required before invocation.
    pub const fn arity(&self) -> usize {
        self.arity
    }

    /// Returns the receiver-binding style.
    pub const fn context_mode(&self) -> &ContextMode {
        &self.mode
    }

    /// Returns the original, never-curried function.
    pub fn underlying(&self) -> &NativeFunction {
        &self.underlying
    }

    fn fresh(underlying: Rc<NativeFunction>, arity: usize, mode: ContextMode) -> Value {
        Value::Function(Function::Curried(Rc::new(Self {
            arity,
            mode,
            underlying,
            accumulated: ArgumentVec::new(),
        })))
    }

    fn derived(&self, arity: usize, mode: ContextMode, accumulated: ArgumentVec) -> Value {
        Value::Function(Function::Curried(Rc::new(Self {
            arity,
            mode,
            underlying: Rc::clone(&self.underlying),
            accumulated,
        })))
    }

    fn recurried(&self, arity: usize) -> Value {
        self.derived(arity, self.mode.clone(), self.accumulated.clone())
    }

    /// Applies arguments under the given call-site receiver.
    ///
    /// Implements the partial-application step:
    ///
    /// - supplying at least `arity` arguments takes the first `arity` of
    ///   them (extras are silently discarded), invokes the underlying
    ///   function, and returns its plain result
    /// - supplying fewer produces a new `Curried` holding the extended
    ///   accumulated arguments, with the mode unchanged except for
    ///   pending-receiver capture
    /// - supplying none seeds the receiver on an uncaptured
    ///   receiver-pending function, and is an error otherwise
    ///
    /// An arity of zero invokes immediately, ignoring all arguments.
    ///
    /// # Errors
    ///
    /// - [`CurryError::ArityStarvation`] for a zero-argument call outside
    ///   the receiver-seeding exception
    /// - [`CurryError::MissingReceiver`] when a receiver-pending invocation
    ///   has no call-site receiver to capture
    /// - any error the underlying function itself returns
    pub fn apply(
        &self,
        call_site_receiver: Option<&Value>,
        arguments: &[Value],
    ) -> Result<Value, CurryError> {
        if self.arity == 0 {
            return self.invoke_underlying(call_site_receiver, &[]);
        }

        if arguments.is_empty() {
            // Receiver seeding: a zero-argument call is permitted only while
            // the receiver is still uncaptured.
            return match &self.mode {
                ContextMode::PendingReceiver => {
                    let captured = call_site_receiver.ok_or(CurryError::MissingReceiver)?;
                    Ok(self.derived(
                        self.arity,
                        ContextMode::FixedReceiver(captured.clone()),
                        self.accumulated.clone(),
                    ))
                }
                ContextMode::Unbound | ContextMode::FixedReceiver(_) => {
                    Err(CurryError::ArityStarvation { arity: self.arity })
                }
            };
        }

        if arguments.len() >= self.arity {
            return self.invoke_underlying(call_site_receiver, &arguments[..self.arity]);
        }

        let mode = match &self.mode {
            ContextMode::PendingReceiver => {
                let captured = call_site_receiver.ok_or(CurryError::MissingReceiver)?;
                ContextMode::FixedReceiver(captured.clone())
            }
            other => other.clone(),
        };
        let mut accumulated = self.accumulated.clone();
        accumulated.extend(arguments.iter().cloned());
        Ok(self.derived(self.arity - arguments.len(), mode, accumulated))
    }

    fn invoke_underlying(
        &self,
        call_site_receiver: Option<&Value>,
        taken: &[Value],
    ) -> Result<Value, CurryError> {
        let resolved = match &self.mode {
            ContextMode::Unbound => None,
            ContextMode::FixedReceiver(receiver) => Some(receiver),
            ContextMode::PendingReceiver => {
                Some(call_site_receiver.ok_or(CurryError::MissingReceiver)?)
            }
        };

        if self.accumulated.is_empty() {
            return self.underlying.invoke(resolved, taken);
        }

        let mut full_arguments = Vec::with_capacity(self.accumulated.len() + taken.len());
        full_arguments.extend(self.accumulated.iter().cloned());
        full_arguments.extend(taken.iter().cloned());
        self.underlying.invoke(resolved, &full_arguments)
    }
}

impl fmt::Debug for Curried {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Curried")
            .field("arity", &self.arity)
            .field("mode", &self.mode)
            .field("accumulated", &self.accumulated.len())
            .finish_non_exhaustive()
    }
}

// =============================================================================
// Construction Entry Points
// =============================================================================

/// The shared re-wrap step behind every entry point and style helper.
///
/// Plain natives are wrapped fresh. Curried values are checked against the
/// requested binding: an identical request is the identity, a same-receiver
/// arity change re-curries, and anything else is an incompatible rebind.
pub(crate) fn wrap_in_mode(
    function: &Value,
    arity: usize,
    mode: ContextMode,
) -> Result<Value, CurryError> {
    let Some(callable) = function.as_function() else {
        return Err(CurryError::NotCallable {
            found: function.type_name(),
        });
    };

    match callable {
        Function::Native(native) => Ok(Curried::fresh(Rc::clone(native), arity, mode)),
        Function::Curried(existing) => {
            if existing.mode.matches(&mode) {
                if existing.arity == arity {
                    return Ok(function.clone());
                }
                if matches!(mode, ContextMode::FixedReceiver(_)) {
                    // Re-currying to a new arity is allowed only while the
                    // receiver stays the same.
                    return Ok(existing.recurried(arity));
                }
                return Err(CurryError::IncompatibleRebind {
                    existing: existing.mode.label(),
                    requested: "to a different arity",
                });
            }

            let requested = match (&existing.mode, &mode) {
                (ContextMode::FixedReceiver(_), ContextMode::FixedReceiver(_)) => {
                    "to a different receiver"
                }
                (_, ContextMode::Unbound) => "as context-free",
                (_, ContextMode::FixedReceiver(_)) => "as receiver-bound",
                (_, ContextMode::PendingReceiver) => "as receiver-pending",
            };
            Err(CurryError::IncompatibleRebind {
                existing: existing.mode.label(),
                requested,
            })
        }
    }
}

fn validated_arity(requested: i64) -> Result<usize, CurryError> {
    usize::try_from(requested).map_err(|_| CurryError::InvalidArity { requested })
}

fn target_arity(function: &Value, arity: Option<i64>) -> Result<usize, CurryError> {
    match arity {
        Some(requested) => validated_arity(requested),
        None => arity_of(function),
    }
}

/// Curries a callable to its natural arity, context-free.
///
/// The natural arity is the declared parameter count of a plain native, or
/// the remaining arity of an already-curried value. Currying a context-free
/// curried value again is the identity: the *same* callable is returned.
///
/// # Errors
///
/// - [`CurryError::NotCallable`] if `function` is not a function
/// - [`CurryError::IncompatibleRebind`] if `function` was constructed with
///   a fixed or pending receiver; those must be re-wrapped through
///   [`bind_receiver`] or [`curry_deferred`]
///
/// # Examples
///
/// ```rust
/// use curryrs::prelude::*;
///
/// # fn main() -> Result<(), CurryError> {
/// let add_three = Value::native(3, |_, arguments| {
///     let sum = arguments.iter().filter_map(Value::as_int).sum();
///     Ok(Value::Int(sum))
/// });
///
/// let curried = curry(&add_three)?;
/// let step_one = call(&curried, &[Value::Int(1)])?;
/// let step_two = call(&step_one, &[Value::Int(2)])?;
/// assert_eq!(call(&step_two, &[Value::Int(3)])?, Value::Int(6));
/// # Ok(())
/// # }
/// ```
pub fn curry(function: &Value) -> Result<Value, CurryError> {
    let arity = arity_of(function)?;
    wrap_in_mode(function, arity, ContextMode::Unbound)
}

/// Curries a callable to an explicit arity, context-free.
///
/// The target arity need not equal the callable's declared parameter
/// count. An arity of zero produces a callable that invokes immediately on
/// any call, ignoring all arguments.
///
/// # Errors
///
/// - [`CurryError::InvalidArity`] for a negative arity
/// - the same compatibility errors as [`curry`]
///
/// # Examples
///
/// ```rust
/// use curryrs::prelude::*;
///
/// # fn main() -> Result<(), CurryError> {
/// let subtract = Value::native(2, |_, arguments| {
///     match (&arguments[0], &arguments[1]) {
///         (Value::Int(first), Value::Int(second)) => Ok(Value::Int(first - second)),
///         _ => Ok(Value::Unit),
///     }
/// });
///
/// let curried = curry_to(&subtract, 2)?;
/// // Superfluous arguments are silently discarded.
/// let result = call(&curried, &[Value::Int(5), Value::Int(2), Value::Int(99)])?;
/// assert_eq!(result, Value::Int(3));
/// # Ok(())
/// # }
/// ```
pub fn curry_to(function: &Value, arity: i64) -> Result<Value, CurryError> {
    wrap_in_mode(function, validated_arity(arity)?, ContextMode::Unbound)
}

/// Curries a callable with a permanently fixed receiver.
///
/// The underlying function is always invoked with exactly this receiver;
/// call-site receivers are ignored. Without an explicit arity, the
/// callable's natural arity is used.
///
/// Re-binding a function already bound to the *same* receiver object is
/// permitted: with a matching arity it is the identity, and with a new
/// arity it re-curries, the only case where re-currying to a different
/// arity is allowed.
///
/// # Errors
///
/// - [`CurryError::NotCallable`] if `function` is not a function
/// - [`CurryError::InvalidArity`] for a negative arity
/// - [`CurryError::IncompatibleRebind`] when `function` is bound to a
///   different receiver, is context-free, or is receiver-pending (a
///   pending receiver is captured at invocation time, never installed
///   directly)
///
/// # Examples
///
/// ```rust
/// use curryrs::prelude::*;
///
/// # fn main() -> Result<(), CurryError> {
/// let add_base = Value::native(1, |receiver, arguments| {
///     let base = receiver
///         .and_then(|this| this.field("base"))
///         .and_then(|value| value.as_int())
///         .unwrap_or(0);
///     match &arguments[0] {
///         Value::Int(number) => Ok(Value::Int(base + number)),
///         _ => Ok(Value::Unit),
///     }
/// });
///
/// let receiver = Value::record([("base", Value::Int(10))]);
/// let bound = bind_receiver(&receiver, &add_base, Some(1))?;
/// assert_eq!(call(&bound, &[Value::Int(5)])?, Value::Int(15));
///
/// // Binding the bound function to a different receiver fails.
/// let other = Value::record([("base", Value::Int(20))]);
/// assert!(matches!(
///     bind_receiver(&other, &bound, Some(1)),
///     Err(CurryError::IncompatibleRebind { .. })
/// ));
/// # Ok(())
/// # }
/// ```
pub fn bind_receiver(
    receiver: &Value,
    function: &Value,
    arity: Option<i64>,
) -> Result<Value, CurryError> {
    let target = target_arity(function, arity)?;
    wrap_in_mode(
        function,
        target,
        ContextMode::FixedReceiver(receiver.clone()),
    )
}

/// Curries a callable whose receiver is captured lazily ("object-curry").
///
/// The receiver is not yet known at wrap time; the first invocation that
/// supplies a call-site receiver captures it, and every partial
/// application derived from that invocation shares the captured receiver
/// permanently. Later call-site receivers never override a captured one.
///
/// A zero-argument call on an uncaptured function is permitted purely to
/// seed the receiver before any real arguments are known; see
/// [`Curried::apply`].
///
/// # Errors
///
/// - [`CurryError::NotCallable`] if `function` is not a function
/// - [`CurryError::InvalidArity`] for a negative arity
/// - [`CurryError::IncompatibleRebind`] when `function` is already curried
///   context-free or receiver-bound
///
/// # Examples
///
/// ```rust
/// use curryrs::prelude::*;
///
/// # fn main() -> Result<(), CurryError> {
/// let scale_sum = Value::native(2, |receiver, arguments| {
///     let factor = receiver
///         .and_then(|this| this.field("n"))
///         .and_then(|value| value.as_int())
///         .unwrap_or(1);
///     let sum: i64 = arguments.iter().filter_map(Value::as_int).sum();
///     Ok(Value::Int(factor * sum))
/// });
///
/// let deferred = curry_deferred(&scale_sum, None)?;
/// let doubler = Value::record([("n", Value::Int(2))]);
/// let result = apply(&deferred, Some(&doubler), &[Value::Int(2), Value::Int(3)])?;
/// assert_eq!(result, Value::Int(10));
/// # Ok(())
/// # }
/// ```
pub fn curry_deferred(function: &Value, arity: Option<i64>) -> Result<Value, CurryError> {
    let target = target_arity(function, arity)?;
    wrap_in_mode(function, target, ContextMode::PendingReceiver)
}

// =============================================================================
// Invocation
// =============================================================================

/// Invokes a callable under an explicit call-site receiver.
///
/// Curried values go through the partial-application step; plain natives
/// are invoked directly with the given receiver and arguments. The
/// call-site receiver only matters to receiver-pending callables; bound
/// and context-free ones resolve their receiver from their own mode.
///
/// # Errors
///
/// [`CurryError::NotCallable`] for non-functions, plus whatever the
/// partial-application step or the underlying function produces.
pub fn apply(
    function: &Value,
    receiver: Option<&Value>,
    arguments: &[Value],
) -> Result<Value, CurryError> {
    match function.as_function() {
        Some(Function::Native(native)) => native.invoke(receiver, arguments),
        Some(Function::Curried(curried)) => curried.apply(receiver, arguments),
        None => Err(CurryError::NotCallable {
            found: function.type_name(),
        }),
    }
}

/// Invokes a callable with no call-site receiver.
///
/// Shorthand for [`apply`] with `None`.
///
/// # Errors
///
/// Same as [`apply`].
pub fn call(function: &Value, arguments: &[Value]) -> Result<Value, CurryError> {
    apply(function, None, arguments)
}

// =============================================================================
// Introspection
// =============================================================================

/// Returns the number of arguments a callable still requires.
///
/// For a curried value this is the remaining arity; for a plain native it
/// is the declared parameter count.
///
/// # Errors
///
/// [`CurryError::NotCallable`] if `function` is not a function.
pub fn arity_of(function: &Value) -> Result<usize, CurryError> {
    match function.as_function() {
        Some(Function::Native(native)) => Ok(native.parameter_count()),
        Some(Function::Curried(curried)) => Ok(curried.arity()),
        None => Err(CurryError::NotCallable {
            found: function.type_name(),
        }),
    }
}

/// Returns `true` when the value is a curried function.
///
/// Plain natives and non-callables both report `false`; combinators use
/// this to decide whether a value needs wrapping before combination.
pub fn is_curried(function: &Value) -> bool {
    matches!(function.as_function(), Some(Function::Curried(_)))
}
