//! Integration tests for `nth-*` recognition, formula parsing and matching.

use tailsel_core::nth::{
    NTH_PRIORITY, NthFormula, NthKind, generate_nth_selector, is_nth_modifier,
    is_valid_nth_formula, matches_position, parse_nth_formula, parse_nth_modifier,
};

#[test]
fn test_literal_token() {
    let modifier = parse_nth_modifier("nth-child-3").unwrap();
    assert_eq!(modifier.kind, NthKind::NthChild);
    assert_eq!(modifier.formula, "3");
    assert_eq!(modifier.raw, "nth-child-3");
    assert_eq!(modifier.priority, NTH_PRIORITY);
}

#[test]
fn test_arbitrary_token_strips_brackets() {
    let modifier = parse_nth_modifier("nth-last-child-[-n+4]").unwrap();
    assert_eq!(modifier.kind, NthKind::NthLastChild);
    assert_eq!(modifier.formula, "-n+4");
}

#[test]
fn test_every_family_prefix() {
    for (token, kind) in [
        ("nth-child-odd", NthKind::NthChild),
        ("nth-of-type-even", NthKind::NthOfType),
        ("nth-last-child-2n", NthKind::NthLastChild),
        ("nth-last-of-type-[3n+1]", NthKind::NthLastOfType),
    ] {
        assert_eq!(parse_nth_modifier(token).unwrap().kind, kind, "{token}");
    }
}

#[test]
fn test_rejects_malformed_tokens() {
    for token in [
        "nth-child-",
        "nth-child-[]",
        "nth-child-abc",
        "nth-child-[2n+]",
        "nth-child-2n+1x",
        "nth-3",
        "nth-child-[odd",
        "first",
    ] {
        assert!(!is_nth_modifier(token), "{token}");
        assert!(parse_nth_modifier(token).is_none(), "{token}");
    }
}

#[test]
fn test_is_consistent_with_parse() {
    for token in ["nth-child-3", "nth-of-type-[2n-1]", "nth-child-x", "nth-child-"] {
        assert_eq!(is_nth_modifier(token), parse_nth_modifier(token).is_some());
    }
}

#[test]
fn test_formula_grammar() {
    for formula in ["odd", "even", "0", "7", "n", "-n", "2n", "2n+1", "2n-1", "-n+5", "10n+10"] {
        assert!(is_valid_nth_formula(formula), "{formula}");
    }
    for formula in ["", "+", "n+", "2x", "2n+1n", "odd+1", " 2n", "1.5n"] {
        assert!(!is_valid_nth_formula(formula), "{formula}");
    }
}

#[test]
fn test_formula_coefficients() {
    assert_eq!(parse_nth_formula("odd"), Some(NthFormula { a: 2, b: 1 }));
    assert_eq!(parse_nth_formula("even"), Some(NthFormula { a: 2, b: 0 }));
    assert_eq!(parse_nth_formula("4"), Some(NthFormula { a: 0, b: 4 }));
    assert_eq!(parse_nth_formula("n"), Some(NthFormula { a: 1, b: 0 }));
    assert_eq!(parse_nth_formula("-n+3"), Some(NthFormula { a: -1, b: 3 }));
    assert_eq!(parse_nth_formula("3n-2"), Some(NthFormula { a: 3, b: -2 }));
}

#[test]
fn test_modifier_coefficients() {
    let modifier = parse_nth_modifier("nth-child-[2n+1]").unwrap();
    assert_eq!(modifier.coefficients(), Some(NthFormula { a: 2, b: 1 }));
}

#[test]
fn test_matches_positions() {
    let odd: Vec<u32> = (1..=6).filter(|&p| matches_position("odd", p)).collect();
    assert_eq!(odd, [1, 3, 5]);

    let even: Vec<u32> = (1..=6).filter(|&p| matches_position("even", p)).collect();
    assert_eq!(even, [2, 4, 6]);

    let first_three: Vec<u32> = (1..=6).filter(|&p| matches_position("-n+3", p)).collect();
    assert_eq!(first_three, [1, 2, 3]);

    let from_four: Vec<u32> = (1..=6).filter(|&p| matches_position("n+4", p)).collect();
    assert_eq!(from_four, [4, 5, 6]);

    assert!(matches_position("3", 3));
    assert!(!matches_position("3", 4));
}

#[test]
fn test_position_zero_never_matches() {
    for formula in ["n", "even", "0", "2n"] {
        assert!(!matches_position(formula, 0), "{formula}");
    }
}

#[test]
fn test_invalid_formula_matches_nothing() {
    assert!(!matches_position("bogus", 1));
}

#[test]
fn test_generate_selector() {
    let modifier = parse_nth_modifier("nth-of-type-[2n+1]").unwrap();
    assert_eq!(
        generate_nth_selector(&modifier, ".item"),
        ".item:nth-of-type(2n+1)"
    );

    let modifier = parse_nth_modifier("nth-last-child-odd").unwrap();
    assert_eq!(
        generate_nth_selector(&modifier, "li"),
        "li:nth-last-child(odd)"
    );
}

#[test]
fn test_serializes_kind_as_type() {
    let modifier = parse_nth_modifier("nth-child-2").unwrap();
    let json = serde_json::to_value(&modifier).unwrap();
    assert_eq!(json["type"], "nth-child");
    assert_eq!(json["formula"], "2");
    assert_eq!(json["priority"], 11);
}
