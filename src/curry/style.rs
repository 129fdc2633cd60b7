//! Style propagation for combinators.
//!
//! Combinators build a *new* callable out of one or two existing (possibly
//! curried) callables, and must decide how to curry the result so that
//! receiver semantics survive the combination. These helpers encode the
//! rules; combinators use them instead of re-deriving receiver semantics
//! themselves.
//!
//! # Rationale
//!
//! - A combination must not silently lose receiver semantics when either
//!   operand needs a live receiver, so a pending receiver on either side
//!   makes the result receiver-pending.
//! - A receiver shared by both operands is safe to preserve.
//! - Two conflicting receivers cannot be reconciled by picking one, so the
//!   result falls back to context-free.

use crate::runtime::Value;

use super::engine::{ContextMode, wrap_in_mode};
use super::error::CurryError;

/// Reads the context mode a callable carries; non-curried values default
/// to context-free.
fn mode_of(function: &Value) -> ContextMode {
    function
        .as_curried()
        .map_or(ContextMode::Unbound, |curried| curried.context_mode().clone())
}

/// Curries `replacement` to `arity` using the same context mode as
/// `existing`.
///
/// If `existing` is not curried (or is curried context-free), the result
/// is context-free. Used by single-operand combinators such as flipping
/// and wrapping.
///
/// # Errors
///
/// The same errors as the entry point matching the propagated mode:
/// [`CurryError::NotCallable`] for a non-callable replacement, and
/// [`CurryError::IncompatibleRebind`] when the replacement is already
/// curried with a conflicting mode.
///
/// # Examples
///
/// ```rust
/// use curryrs::prelude::*;
///
/// # fn main() -> Result<(), CurryError> {
/// let receiver = Value::record([("n", Value::Int(3))]);
/// let existing = bind_receiver(
///     &receiver,
///     &Value::native(1, |_, _| Ok(Value::Unit)),
///     None,
/// )?;
/// let replacement = Value::native(2, |_, _| Ok(Value::Unit));
///
/// // The replacement inherits the fixed receiver of `existing`.
/// let propagated = curry_with_consistent_style(&existing, &replacement, 2)?;
/// assert!(is_curried(&propagated));
/// # Ok(())
/// # }
/// ```
pub fn curry_with_consistent_style(
    existing: &Value,
    replacement: &Value,
    arity: usize,
) -> Result<Value, CurryError> {
    wrap_in_mode(replacement, arity, mode_of(existing))
}

/// Curries `replacement` to `arity`, selecting the context mode from two
/// operands.
///
/// The mode is chosen by precedence:
///
/// 1. if either operand is receiver-pending, the result is
///    receiver-pending
/// 2. otherwise, if the operands carry the same mode (both context-free,
///    or both bound to the identical receiver object), that mode is
///    preserved
/// 3. otherwise (different fixed receivers, or one bound and one free),
///    the result is context-free
///
/// # Errors
///
/// Same as [`curry_with_consistent_style`].
///
/// # Examples
///
/// ```rust
/// use curryrs::prelude::*;
///
/// # fn main() -> Result<(), CurryError> {
/// let pending = curry_deferred(&Value::native(1, |_, _| Ok(Value::Unit)), None)?;
/// let plain = Value::native(1, |_, _| Ok(Value::Unit));
/// let replacement = Value::native(2, |_, _| Ok(Value::Unit));
///
/// // A pending operand dominates: the result needs a live receiver too.
/// let combined = choose_curry_style(&pending, &plain, &replacement, 2)?;
/// assert!(matches!(
///     call(&combined, &[Value::Int(1)]),
///     Err(CurryError::MissingReceiver)
/// ));
/// # Ok(())
/// # }
/// ```
pub fn choose_curry_style(
    first: &Value,
    second: &Value,
    replacement: &Value,
    arity: usize,
) -> Result<Value, CurryError> {
    let first_mode = mode_of(first);
    let second_mode = mode_of(second);

    let chosen = if first_mode.is_pending() || second_mode.is_pending() {
        ContextMode::PendingReceiver
    } else if first_mode.matches(&second_mode) {
        first_mode
    } else {
        ContextMode::Unbound
    };

    wrap_in_mode(replacement, arity, chosen)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curry::engine::{bind_receiver, curry, curry_deferred};

    fn unit_native(parameter_count: usize) -> Value {
        Value::native(parameter_count, |_, _| Ok(Value::Unit))
    }

    #[test]
    fn test_consistent_style_defaults_to_context_free() {
        let plain = unit_native(1);
        let propagated = curry_with_consistent_style(&plain, &unit_native(2), 2).unwrap();
        let mode = propagated.as_curried().unwrap().context_mode().clone();
        assert!(matches!(mode, ContextMode::Unbound));
    }

    #[test]
    fn test_pending_dominates() {
        let pending = curry_deferred(&unit_native(1), None).unwrap();
        let free = curry(&unit_native(1)).unwrap();

        let combined = choose_curry_style(&pending, &free, &unit_native(2), 2).unwrap();
        assert!(combined.as_curried().unwrap().context_mode().is_pending());
    }

    #[test]
    fn test_shared_receiver_is_preserved() {
        let receiver = Value::record([("n", Value::Int(1))]);
        let first = bind_receiver(&receiver, &unit_native(1), None).unwrap();
        let second = bind_receiver(&receiver, &unit_native(1), None).unwrap();

        let combined = choose_curry_style(&first, &second, &unit_native(2), 2).unwrap();
        match combined.as_curried().unwrap().context_mode() {
            ContextMode::FixedReceiver(kept) => assert!(kept.same(&receiver)),
            other => panic!("expected a fixed receiver, got {other:?}"),
        }
    }

    #[test]
    fn test_conflicting_receivers_fall_back_to_context_free() {
        let first = bind_receiver(
            &Value::record([("n", Value::Int(1))]),
            &unit_native(1),
            None,
        )
        .unwrap();
        let second = bind_receiver(
            &Value::record([("n", Value::Int(2))]),
            &unit_native(1),
            None,
        )
        .unwrap();

        let combined = choose_curry_style(&first, &second, &unit_native(2), 2).unwrap();
        assert!(matches!(
            combined.as_curried().unwrap().context_mode(),
            ContextMode::Unbound
        ));
    }
}
