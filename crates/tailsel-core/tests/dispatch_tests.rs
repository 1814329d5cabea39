//! Integration tests for token splitting, family dispatch and full-class
//! resolution.

use tailsel_core::dispatch::resolver::{
    DARK_MEDIA_QUERY, Diagnostic, ModifierResolver, ResolveError,
};
use tailsel_core::dispatch::{
    RECOGNIZERS, brackets_balanced, classify, classify_family, split_class,
};
use tailsel_core::{DarkMode, Modifier, ModifierFamily, ResolverConfig};

fn resolver() -> ModifierResolver {
    ModifierResolver::default()
}

// --- splitting ---

#[test]
fn test_split_plain_class() {
    let (variants, utility) = split_class("bg-blue-500");
    assert!(variants.is_empty());
    assert_eq!(utility, "bg-blue-500");
}

#[test]
fn test_split_keeps_bracketed_colons() {
    let (variants, utility) = split_class("supports-[display:grid]:hover:grid");
    assert_eq!(variants, ["supports-[display:grid]", "hover"]);
    assert_eq!(utility, "grid");

    let (variants, utility) = split_class("data-[state=open]:bg-[url(a:b)]");
    assert_eq!(variants, ["data-[state=open]"]);
    assert_eq!(utility, "bg-[url(a:b)]");
}

#[test]
fn test_brackets_balanced() {
    assert!(brackets_balanced("not-[:is(.a)]:p-4"));
    assert!(!brackets_balanced("not-[:hover:p-4"));
    assert!(!brackets_balanced("w-[10px)]"));
    assert!(brackets_balanced("content-['{']:p-4"));
    assert!(brackets_balanced("w-[\\]]"));
}

// --- dispatch ---

#[test]
fn test_classify_each_family() {
    assert_eq!(classify_family("nth-child-3"), Some(ModifierFamily::Nth));
    assert_eq!(classify_family("not-first"), Some(ModifierFamily::Not));
    assert_eq!(classify_family("not-[.x]"), Some(ModifierFamily::Not));
    assert_eq!(classify_family("noscript"), Some(ModifierFamily::Special));
    assert_eq!(
        classify_family("supports-display-grid"),
        Some(ModifierFamily::Special)
    );
    assert_eq!(classify_family("peer-focus"), Some(ModifierFamily::GroupPeer));
    assert_eq!(classify_family("hover"), None);
}

#[test]
fn test_classify_builds_modifier() {
    let modifier = classify("group-hover").unwrap();
    assert!(matches!(modifier, Modifier::GroupPeer(_)));
    assert_eq!(modifier.raw(), "group-hover");
    assert_eq!(modifier.priority(), 15);
    assert_eq!(modifier.apply(".x"), ".group:hover .x");
}

#[test]
fn test_recognizer_vocabularies_are_disjoint() {
    for token in [
        "nth-child-odd",
        "not-odd",
        "not-[.a]",
        "starting",
        "supports-[display:flex]",
        "user-invalid",
        "group",
        "peer-checked",
    ] {
        let claims = RECOGNIZERS
            .iter()
            .filter(|recognizer| recognizer.is_match(token))
            .count();
        assert_eq!(claims, 1, "{token}");
    }
}

#[test]
fn test_modifier_serializes_with_family_tag() {
    let json = serde_json::to_value(classify("nth-of-type-2").unwrap()).unwrap();
    assert_eq!(json["family"], "nth");
    assert_eq!(json["type"], "nth-of-type");
}

// --- resolution ---

#[test]
fn test_plain_utility() {
    assert_eq!(resolver().selector_for("p-4").unwrap(), ".p-4");
}

#[test]
fn test_core_variants() {
    assert_eq!(
        resolver().selector_for("md:hover:bg-blue-500").unwrap(),
        "@media (min-width: 768px) { .md\\:hover\\:bg-blue-500:hover }"
    );
    assert_eq!(
        resolver().selector_for("before:content-none").unwrap(),
        ".before\\:content-none::before"
    );
}

#[test]
fn test_recognizer_variants_shape_base() {
    assert_eq!(
        resolver().selector_for("group-hover:underline").unwrap(),
        ".group:hover .group-hover\\:underline"
    );
    assert_eq!(
        resolver().selector_for("peer-checked:not-first:block").unwrap(),
        ".peer:checked + .peer-checked\\:not-first\\:block:not(:first-child)"
    );
}

#[test]
fn test_priority_order_not_source_order() {
    // noscript (20) is applied after group (15) whatever the source order.
    let a = resolver().resolve("noscript:group-hover:p-4").unwrap();
    assert_eq!(
        a.selector(),
        "html.no-js .group:hover .noscript\\:group-hover\\:p-4"
    );
}

#[test]
fn test_wrapping_special_goes_through_pipeline() {
    let resolved = resolver().resolve("md:supports-display-grid:grid").unwrap();
    assert!(resolved.selector_modifiers.is_empty());
    assert_eq!(resolved.modifiers.state, ["@supports (display: grid)"]);
    assert_eq!(
        resolved.selector(),
        "@media (min-width: 768px) { @supports (display: grid) { .md\\:supports-display-grid\\:grid } }"
    );
}

#[test]
fn test_responsive_forms() {
    let r = resolver();
    assert_eq!(
        r.resolve("max-md:p-4").unwrap().modifiers.responsive["max-md"],
        "@media not all and (min-width: 768px)"
    );
    assert_eq!(
        r.resolve("min-[900px]:p-4").unwrap().modifiers.responsive["min-[900px]"],
        "@media (min-width: 900px)"
    );
    assert_eq!(
        r.resolve("max-[600px]:p-4").unwrap().modifiers.responsive["max-[600px]"],
        "@media (max-width: 600px)"
    );
}

#[test]
fn test_container_forms() {
    let r = resolver();
    assert_eq!(
        r.resolve("@md:p-4").unwrap().modifiers.container["@md"],
        "@container (min-width: 28rem)"
    );
    assert_eq!(
        r.resolve("@lg/sidebar:p-4").unwrap().modifiers.container["@lg/sidebar"],
        "@container sidebar (min-width: 32rem)"
    );
    assert_eq!(
        r.resolve("@max-[30rem]:p-4").unwrap().modifiers.container["@max-[30rem]"],
        "@container (max-width: 30rem)"
    );
    assert!(matches!(
        r.resolve("@huge:p-4"),
        Err(ResolveError::UnknownVariant { .. })
    ));
}

#[test]
fn test_aria_and_data() {
    assert_eq!(
        resolver().selector_for("aria-checked:data-[state=open]:flex").unwrap(),
        ".aria-checked\\:data-\\[state\\=open\\]\\:flex[aria-checked=\"true\"][data-state=open]"
    );
    let resolved = resolver().resolve("aria-[sort=ascending]:data-active:p-1").unwrap();
    assert_eq!(
        resolved.modifiers.aria["aria-[sort=ascending]"],
        "[aria-sort=ascending]"
    );
    assert_eq!(resolved.modifiers.data["data-active"], "[data-active]");
}

#[test]
fn test_dark_mode_strategies() {
    let media = resolver().resolve("dark:text-white").unwrap();
    assert_eq!(media.modifiers.state, [DARK_MEDIA_QUERY]);

    let config = ResolverConfig {
        dark_mode: DarkMode::Class,
        ..ResolverConfig::default()
    };
    let class = ModifierResolver::new(config).resolve("dark:text-white").unwrap();
    assert_eq!(class.ancestors, [".dark"]);
    assert_eq!(class.selector(), ".dark .dark\\:text-white");
}

#[test]
fn test_at_rule_state_variants() {
    assert_eq!(
        resolver().selector_for("print:hidden").unwrap(),
        "@media print { .print\\:hidden }"
    );
}

#[test]
fn test_errors() {
    let r = resolver();
    assert_eq!(r.resolve(""), Err(ResolveError::EmptyClass));
    assert_eq!(r.resolve("hover:"), Err(ResolveError::EmptyClass));
    assert_eq!(
        r.resolve("not-[:hover:p-4"),
        Err(ResolveError::UnbalancedBrackets {
            class: "not-[:hover:p-4".to_string()
        })
    );
    assert_eq!(
        r.resolve("wobble:p-4"),
        Err(ResolveError::UnknownVariant {
            token: "wobble".to_string()
        })
    );
    assert_eq!(
        r.resolve("before:after:p-4"),
        Err(ResolveError::Conflict {
            field: "pseudo-element",
            first: "before".to_string(),
            second: "after".to_string(),
        })
    );
    assert!(matches!(
        r.resolve("motion-safe:motion-reduce:p-4"),
        Err(ResolveError::Conflict { field: "motion", .. })
    ));
}

#[test]
fn test_error_messages() {
    let err = resolver().resolve("wobble:p-4").unwrap_err();
    assert_eq!(err.to_string(), "unknown variant 'wobble'");
}

#[test]
fn test_unvalidated_arbitrary_not_is_diagnosed() {
    let resolved = resolver().resolve("not-[a;b]:p-4").unwrap();
    assert_eq!(
        resolved.diagnostics,
        [Diagnostic::UnvalidatedArbitrary {
            token: "not-[a;b]".to_string()
        }]
    );

    let dangling = resolver().resolve("not-[>.a]:p-4").unwrap();
    assert_eq!(
        dangling.diagnostics,
        [Diagnostic::UnvalidatedArbitrary {
            token: "not-[>.a]".to_string()
        }]
    );
    assert!(dangling.selector().ends_with(":not(>.a)"));

    let trailing = resolver().resolve("not-[.a,]:p-4").unwrap();
    assert_eq!(trailing.diagnostics.len(), 1);

    let clean = resolver().resolve("not-[.active]:not-first:p-4").unwrap();
    assert!(clean.diagnostics.is_empty());
}

#[test]
fn test_pseudo_classes_nest_inside_at_rule_states() {
    let r = resolver();
    assert_eq!(
        r.selector_for("dark:hover:bg-black").unwrap(),
        "@media (prefers-color-scheme: dark) { .dark\\:hover\\:bg-black:hover }"
    );
    assert_eq!(
        r.selector_for("supports-display-grid:hover:grid").unwrap(),
        "@supports (display: grid) { .supports-display-grid\\:hover\\:grid:hover }"
    );
    assert_eq!(
        r.selector_for("pointer-coarse:focus:p-4").unwrap(),
        "@media (pointer: coarse) { .pointer-coarse\\:focus\\:p-4:focus }"
    );
    assert_eq!(
        r.selector_for("print:first:hidden").unwrap(),
        "@media print { .print\\:first\\:hidden:first-child }"
    );
}

#[test]
fn test_state_order_is_independent_of_at_rule_position() {
    let r = resolver();
    let before = r.resolve("dark:hover:focus:p-4").unwrap();
    let after = r.resolve("hover:focus:dark:p-4").unwrap();
    assert_eq!(before.modifiers.state, after.modifiers.state);
    assert_eq!(
        before.modifiers.state,
        [":hover", ":focus", "@media (prefers-color-scheme: dark)"]
    );
}

#[test]
fn test_at_rule_states_keep_source_order() {
    let resolved = resolver()
        .resolve("print:supports-display-grid:hover:p-4")
        .unwrap();
    assert_eq!(
        resolved.selector(),
        "@supports (display: grid) { @media print { .print\\:supports-display-grid\\:hover\\:p-4:hover } }"
    );
}

#[test]
fn test_resolution_is_deterministic() {
    let r = resolver();
    let class = "lg:dark:group-hover:nth-child-[2n+1]:before:p-4";
    assert_eq!(r.selector_for(class), r.selector_for(class));
}
