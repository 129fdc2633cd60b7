//! The currying engine.
//!
//! This module converts runtime callables into partially-applicable
//! callables with controlled arity and controlled receiver-context binding.
//!
//! # Overview
//!
//! A curried function is obtained through one of four entry points:
//!
//! - [`curry`]: wrap to the callable's natural arity, context-free
//! - [`curry_to`]: wrap to an explicit arity, context-free
//! - [`bind_receiver`]: wrap with a permanently fixed receiver
//! - [`curry_deferred`]: wrap with a receiver captured lazily from the
//!   first invocation ("object-curry")
//!
//! Invocation goes through [`apply`] (explicit call-site receiver) or
//! [`call`] (no receiver). Supplying fewer arguments than the arity yields
//! a new curried value awaiting the remainder; supplying enough invokes
//! the underlying function and returns its plain result, silently
//! discarding any extras.
//!
//! Combinators that build new callables out of existing ones preserve
//! receiver semantics with [`curry_with_consistent_style`] and
//! [`choose_curry_style`] rather than re-deriving them. Introspection is
//! limited to [`arity_of`] and [`is_curried`].
//!
//! # Laws
//!
//! - **Idempotence**: re-currying a curried value with the same arity and
//!   mode returns the identical value
//! - **Partial-application equivalence**: for any split `n = a + b` with
//!   `a, b > 0`, applying `a` then `b` arguments equals applying all `n`
//!   at once
//! - **Excess-argument discard**: applying `m > n` arguments uses only the
//!   first `n`
//! - **Receiver-capture stability**: once a pending receiver is captured,
//!   every derived partial application keeps it, whatever receiver later
//!   call sites supply
//!
//! # Example
//!
//! ```rust
//! use curryrs::prelude::*;
//!
//! # fn main() -> Result<(), CurryError> {
//! let multiply = Value::native(2, |_, arguments| {
//!     match (&arguments[0], &arguments[1]) {
//!         (Value::Int(first), Value::Int(second)) => Ok(Value::Int(first * second)),
//!         _ => Ok(Value::Unit),
//!     }
//! });
//!
//! let curried = curry(&multiply)?;
//! let double = call(&curried, &[Value::Int(2)])?;
//! let triple = call(&curried, &[Value::Int(3)])?;
//!
//! assert_eq!(call(&double, &[Value::Int(5)])?, Value::Int(10));
//! assert_eq!(call(&triple, &[Value::Int(5)])?, Value::Int(15));
//! # Ok(())
//! # }
//! ```

mod engine;
mod error;
mod style;

pub use engine::{
    ContextMode, Curried, apply, arity_of, bind_receiver, call, curry, curry_deferred, curry_to,
    is_curried,
};
pub use error::CurryError;
pub use style::{choose_curry_style, curry_with_consistent_style};
