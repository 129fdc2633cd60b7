//! Integration tests for curry-style propagation.

use curryrs::prelude::*;
use rstest::rstest;

/// The binding styles an operand can arrive in. `FixedFirst`/`FixedSecond`
/// bind to two distinct receiver objects so conflicts are observable.
#[derive(Clone, Copy, Debug)]
enum Style {
    Plain,
    Unbound,
    FixedFirst,
    FixedSecond,
    Pending,
}

struct Fixtures {
    first_receiver: Value,
    second_receiver: Value,
}

impl Fixtures {
    fn new() -> Self {
        Self {
            first_receiver: Value::record([("id", Value::Int(1))]),
            second_receiver: Value::record([("id", Value::Int(2))]),
        }
    }

    fn operand(&self, style: Style) -> Value {
        let native = Value::native(1, |_, _| Ok(Value::Unit));
        match style {
            Style::Plain => native,
            Style::Unbound => curry(&native).unwrap(),
            Style::FixedFirst => bind_receiver(&self.first_receiver, &native, None).unwrap(),
            Style::FixedSecond => bind_receiver(&self.second_receiver, &native, None).unwrap(),
            Style::Pending => curry_deferred(&native, None).unwrap(),
        }
    }
}

fn mode_of(value: &Value) -> ContextMode {
    value.as_curried().expect("expected a curried value").context_mode().clone()
}

// =============================================================================
// choose_curry_style
// =============================================================================

#[rstest]
#[case::pending_and_plain(Style::Pending, Style::Plain)]
#[case::plain_and_pending(Style::Plain, Style::Pending)]
#[case::pending_and_fixed(Style::Pending, Style::FixedFirst)]
#[case::pending_and_pending(Style::Pending, Style::Pending)]
fn pending_operands_dominate(#[case] first: Style, #[case] second: Style) {
    let fixtures = Fixtures::new();
    let replacement = Value::native(2, |_, _| Ok(Value::Unit));

    let combined = choose_curry_style(
        &fixtures.operand(first),
        &fixtures.operand(second),
        &replacement,
        2,
    )
    .unwrap();

    assert!(mode_of(&combined).is_pending());
}

#[rstest]
#[case::both_plain(Style::Plain, Style::Plain)]
#[case::both_unbound(Style::Unbound, Style::Unbound)]
#[case::plain_and_unbound(Style::Plain, Style::Unbound)]
fn matching_context_free_operands_stay_context_free(#[case] first: Style, #[case] second: Style) {
    let fixtures = Fixtures::new();
    let replacement = Value::native(2, |_, _| Ok(Value::Unit));

    let combined = choose_curry_style(
        &fixtures.operand(first),
        &fixtures.operand(second),
        &replacement,
        2,
    )
    .unwrap();

    assert!(matches!(mode_of(&combined), ContextMode::Unbound));
}

#[test]
fn a_shared_fixed_receiver_is_preserved() {
    let fixtures = Fixtures::new();
    let replacement = Value::native(2, |_, _| Ok(Value::Unit));

    let combined = choose_curry_style(
        &fixtures.operand(Style::FixedFirst),
        &fixtures.operand(Style::FixedFirst),
        &replacement,
        2,
    )
    .unwrap();

    match mode_of(&combined) {
        ContextMode::FixedReceiver(kept) => assert!(kept.same(&fixtures.first_receiver)),
        other => panic!("expected a fixed receiver, got {other:?}"),
    }
}

#[rstest]
#[case::different_receivers(Style::FixedFirst, Style::FixedSecond)]
#[case::fixed_and_plain(Style::FixedFirst, Style::Plain)]
#[case::fixed_and_unbound(Style::FixedFirst, Style::Unbound)]
#[case::unbound_and_fixed(Style::Unbound, Style::FixedSecond)]
fn conflicting_operands_fall_back_to_context_free(#[case] first: Style, #[case] second: Style) {
    let fixtures = Fixtures::new();
    let replacement = Value::native(2, |_, _| Ok(Value::Unit));

    let combined = choose_curry_style(
        &fixtures.operand(first),
        &fixtures.operand(second),
        &replacement,
        2,
    )
    .unwrap();

    assert!(matches!(mode_of(&combined), ContextMode::Unbound));
}

// =============================================================================
// curry_with_consistent_style
// =============================================================================

#[rstest]
#[case::plain(Style::Plain)]
#[case::unbound(Style::Unbound)]
fn consistent_style_defaults_to_context_free(#[case] style: Style) {
    let fixtures = Fixtures::new();
    let replacement = Value::native(3, |_, _| Ok(Value::Unit));

    let propagated =
        curry_with_consistent_style(&fixtures.operand(style), &replacement, 3).unwrap();

    assert!(matches!(mode_of(&propagated), ContextMode::Unbound));
    assert_eq!(arity_of(&propagated), Ok(3));
}

#[test]
fn consistent_style_carries_a_fixed_receiver() {
    let fixtures = Fixtures::new();
    let replacement = Value::native(1, |_, _| Ok(Value::Unit));

    let propagated =
        curry_with_consistent_style(&fixtures.operand(Style::FixedFirst), &replacement, 1).unwrap();

    match mode_of(&propagated) {
        ContextMode::FixedReceiver(kept) => assert!(kept.same(&fixtures.first_receiver)),
        other => panic!("expected a fixed receiver, got {other:?}"),
    }
}

#[test]
fn consistent_style_carries_pending() {
    let fixtures = Fixtures::new();
    let replacement = Value::native(1, |_, _| Ok(Value::Unit));

    let propagated =
        curry_with_consistent_style(&fixtures.operand(Style::Pending), &replacement, 1).unwrap();

    assert!(mode_of(&propagated).is_pending());
}

#[test]
fn the_replacement_must_be_callable() {
    let fixtures = Fixtures::new();

    assert_eq!(
        curry_with_consistent_style(&fixtures.operand(Style::Plain), &Value::Int(9), 1),
        Err(CurryError::NotCallable { found: "integer" })
    );
    assert_eq!(
        choose_curry_style(
            &fixtures.operand(Style::Plain),
            &fixtures.operand(Style::Plain),
            &Value::Unit,
            1,
        ),
        Err(CurryError::NotCallable { found: "unit" })
    );
}
