//! Higher-order combinators over runtime callables.
//!
//! Each combinator builds a new callable out of one or two existing
//! (possibly curried) callables. The result's receiver-binding style is
//! always derived through the engine's style-propagation helpers
//! ([`choose_curry_style`], [`curry_with_consistent_style`]); combinators
//! never re-derive receiver semantics themselves, so a pending receiver on
//! an operand survives the combination and a shared fixed receiver is
//! preserved.
//!
//! # Examples
//!
//! ```rust
//! use curryrs::prelude::*;
//!
//! # fn main() -> Result<(), CurryError> {
//! let double = Value::native(1, |_, arguments| match &arguments[0] {
//!     Value::Int(number) => Ok(Value::Int(number * 2)),
//!     _ => Ok(Value::Unit),
//! });
//! let add_one = Value::native(1, |_, arguments| match &arguments[0] {
//!     Value::Int(number) => Ok(Value::Int(number + 1)),
//!     _ => Ok(Value::Unit),
//! });
//!
//! // compose(f, g)(x) = f(g(x))
//! let composed = compose(&add_one, &double)?;
//! assert_eq!(call(&composed, &[Value::Int(5)])?, Value::Int(11));
//! # Ok(())
//! # }
//! ```

use crate::curry::{
    CurryError, apply, arity_of, choose_curry_style, curry_with_consistent_style,
};
use crate::runtime::Value;

/// Composes two callables right-to-left: `compose(f, g)(x...) = f(g(x...))`.
///
/// The composition takes as many arguments as `inner` and feeds `inner`'s
/// result to `outer` as a single argument. The call-site receiver is
/// forwarded to both stages, and the result's context mode is chosen from
/// both operands.
///
/// # Errors
///
/// [`CurryError::NotCallable`] when either operand is not a function, plus
/// any style-propagation error.
pub fn compose(outer: &Value, inner: &Value) -> Result<Value, CurryError> {
    let arity = arity_of(inner)?;
    arity_of(outer)?;

    let outer_stage = outer.clone();
    let inner_stage = inner.clone();
    let composed = Value::native(arity, move |receiver, arguments| {
        let intermediate = apply(&inner_stage, receiver, arguments)?;
        apply(&outer_stage, receiver, &[intermediate])
    });

    choose_curry_style(outer, inner, &composed, arity)
}

/// Swaps the first two arguments of a callable.
///
/// `flip(f)(a, b, rest...) = f(b, a, rest...)`. The flipped callable keeps
/// the operand's arity and inherits its context mode.
///
/// # Errors
///
/// [`CurryError::NotCallable`] when the operand is not a function.
pub fn flip(function: &Value) -> Result<Value, CurryError> {
    let arity = arity_of(function)?;

    let target = function.clone();
    let flipped = Value::native(arity, move |receiver, arguments| {
        if arguments.len() < 2 {
            return apply(&target, receiver, arguments);
        }
        let mut swapped = arguments.to_vec();
        swapped.swap(0, 1);
        apply(&target, receiver, &swapped)
    });

    curry_with_consistent_style(function, &flipped, arity)
}

/// Conjoins two predicates: the result is truthy when both are.
///
/// Evaluation short-circuits like a logical `and`: when the first
/// predicate yields a falsy value, that value is returned and the second
/// predicate never runs. The conjunction takes as many arguments as the
/// wider of the two predicates.
///
/// # Errors
///
/// [`CurryError::NotCallable`] when either operand is not a function, plus
/// any style-propagation error.
pub fn both(first: &Value, second: &Value) -> Result<Value, CurryError> {
    let arity = arity_of(first)?.max(arity_of(second)?);

    let first_predicate = first.clone();
    let second_predicate = second.clone();
    let conjoined = Value::native(arity, move |receiver, arguments| {
        let verdict = apply(&first_predicate, receiver, arguments)?;
        if verdict.is_truthy() {
            apply(&second_predicate, receiver, arguments)
        } else {
            Ok(verdict)
        }
    });

    choose_curry_style(first, second, &conjoined, arity)
}

/// Wraps a callable inside another: the wrapper receives the wrapped
/// callable as its first argument, followed by the call's arguments.
///
/// `wrap(inner, wrapper)(x...) = wrapper(inner, x...)`. The result takes
/// one argument fewer than the wrapper declares and inherits the *inner*
/// callable's context mode, so wrapping a receiver-bound function yields a
/// receiver-bound result.
///
/// # Errors
///
/// [`CurryError::NotCallable`] when either operand is not a function, plus
/// any style-propagation error.
pub fn wrap(inner: &Value, wrapper: &Value) -> Result<Value, CurryError> {
    let wrapper_arity = arity_of(wrapper)?;
    arity_of(inner)?;
    let arity = wrapper_arity.saturating_sub(1);

    let wrapped = inner.clone();
    let around = wrapper.clone();
    let combined = Value::native(arity, move |receiver, arguments| {
        let mut forwarded = Vec::with_capacity(arguments.len() + 1);
        forwarded.push(wrapped.clone());
        forwarded.extend(arguments.iter().cloned());
        apply(&around, receiver, &forwarded)
    });

    curry_with_consistent_style(inner, &combined, arity)
}
