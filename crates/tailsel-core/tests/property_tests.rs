//! Property tests for the recognizers and the composition pipeline.

use quickcheck::TestResult;
use quickcheck_macros::quickcheck;
use tailsel_core::generator::{ParsedModifiers, combine_selectors, compose};
use tailsel_core::nth::{NthFormula, is_nth_modifier, matches_position, parse_nth_modifier};
use tailsel_core::{ModifierResolver, classify, split_class};

#[quickcheck]
fn nth_formula_matches_its_own_terms(a: i8, b: i8, n: u8) -> TestResult {
    let formula = NthFormula {
        a: i64::from(a),
        b: i64::from(b),
    };
    let position = i64::from(a) * i64::from(n) + i64::from(b);
    let Ok(position) = u32::try_from(position) else {
        return TestResult::discard();
    };
    if position == 0 {
        return TestResult::discard();
    }
    TestResult::from_bool(formula.matches(position))
}

#[quickcheck]
fn literal_integer_formula_matches_only_itself(b: u16, position: u16) -> bool {
    let formula = b.to_string();
    matches_position(&formula, u32::from(position))
        == (position != 0 && position == b)
}

#[quickcheck]
fn nth_predicate_agrees_with_parser(token: String) -> bool {
    is_nth_modifier(&token) == parse_nth_modifier(&token).is_some()
}

#[quickcheck]
fn classify_never_panics_and_keeps_raw(token: String) -> bool {
    classify(&token).is_none_or(|modifier| modifier.raw() == token)
}

#[quickcheck]
fn empty_modifiers_are_identity(base: String) -> bool {
    compose(&base, &ParsedModifiers::default()) == base
}

#[quickcheck]
fn compose_is_deterministic(base: String, states: Vec<String>) -> bool {
    let modifiers = ParsedModifiers {
        state: states,
        ..ParsedModifiers::default()
    };
    compose(&base, &modifiers) == compose(&base, &modifiers)
}

#[quickcheck]
fn combine_drops_empty_entries(parts: Vec<String>) -> bool {
    let refs: Vec<&str> = parts.iter().map(String::as_str).collect();
    let non_empty: Vec<&str> = refs.iter().copied().filter(|p| !p.is_empty()).collect();
    combine_selectors(&refs, ">") == non_empty.join(">")
}

#[quickcheck]
fn split_then_join_round_trips(class: String) -> bool {
    let (variants, utility) = split_class(&class);
    let mut parts = variants;
    parts.push(utility);
    parts.join(":") == class
}

#[quickcheck]
fn resolution_is_deterministic(class: String) -> bool {
    let resolver = ModifierResolver::default();
    resolver.selector_for(&class) == resolver.selector_for(&class)
}

#[quickcheck]
fn classify_is_stable_on_raw(token: String) -> bool {
    classify(&token).is_none_or(|modifier| classify(modifier.raw()).as_ref() == Some(&modifier))
}

#[test]
fn named_tokens_reparse_identically() {
    for token in [
        "nth-child-[2n+1]",
        "not-read-write",
        "not-[.foo]",
        "supports-display-grid",
        "supports-[display:grid]",
        "user-valid",
        "group-hover",
        "peer",
    ] {
        let modifier = classify(token).unwrap();
        assert_eq!(classify(modifier.raw()), Some(modifier));
    }
}
