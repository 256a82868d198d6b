use dtk_registry::{BuildError, RegistryBuilder, RegistryConfig};
use dtk_test_utils::{chain_builder, palette_builder, token_name};
use dtk_token::{Category, RawValue, ValueError};

#[test]
fn test_override_cycle_names_both_tokens() {
    // Base: a -> b. Dark: b -> a.
    let mut builder = RegistryBuilder::new();
    builder
        .token("color.a", Category::Color, "{color.b}")
        .token("color.b", Category::Color, "#000000")
        .override_token("dark", "color.b", "{color.a}");

    match builder.build().unwrap_err() {
        BuildError::CycleDetected { theme, cycle } => {
            assert_eq!(theme, "dark");
            assert_eq!(
                cycle,
                vec![token_name("color.a"), token_name("color.b"), token_name("color.a")]
            );
        }
        other => panic!("expected cycle, got {other}"),
    }
}

#[test]
fn test_base_cycle_reported_under_default() {
    let mut builder = RegistryBuilder::new();
    builder
        .token("spacing.c", Category::Spacing, "{spacing.a}")
        .token("spacing.a", Category::Spacing, "{spacing.b}")
        .token("spacing.b", Category::Spacing, "{spacing.c}");

    let err = builder.build().unwrap_err();
    assert_eq!(
        err.to_string(),
        "reference cycle in theme 'default': spacing.a -> spacing.b -> spacing.c -> spacing.a"
    );
}

#[test]
fn test_self_reference_is_cycle() {
    let mut builder = RegistryBuilder::new();
    builder.token("color.loop", Category::Color, RawValue::reference("color.loop"));
    assert!(matches!(
        builder.build().unwrap_err(),
        BuildError::CycleDetected { cycle, .. } if cycle.len() == 2
    ));
}

#[test]
fn test_unknown_override_target_names_token() {
    let mut builder = palette_builder();
    builder.override_token("dark", "color.accent", "#ff0000");
    assert_eq!(
        builder.build().unwrap_err(),
        BuildError::UnknownOverrideTarget {
            theme: "dark".into(),
            token: "color.accent".into(),
        }
    );
}

#[test]
fn test_malformed_override_target_is_unknown_in_theme() {
    let mut builder = palette_builder();
    builder.override_token("dark", "color accent", "#ff0000");
    assert_eq!(
        builder.build().unwrap_err(),
        BuildError::UnknownOverrideTarget {
            theme: "dark".into(),
            token: "color accent".into(),
        }
    );
}

#[test]
fn test_spacing_referencing_color_is_category_mismatch() {
    let mut builder = palette_builder();
    builder.token("spacing.gap", Category::Spacing, "{color.primary.500}");
    match builder.build().unwrap_err() {
        BuildError::CategoryMismatch {
            token,
            category,
            target,
            target_category,
            theme,
        } => {
            assert_eq!(token, token_name("spacing.gap"));
            assert_eq!(category, Category::Spacing);
            assert_eq!(target, token_name("color.primary.500"));
            assert_eq!(target_category, Category::Color);
            assert_eq!(theme, "default");
        }
        other => panic!("expected category mismatch, got {other}"),
    }
}

#[test]
fn test_override_introducing_category_mismatch() {
    let mut builder = palette_builder();
    builder.override_token("dark", "spacing.lg", "{radius.md}");
    assert!(matches!(
        builder.build().unwrap_err(),
        BuildError::CategoryMismatch { theme, .. } if theme == "dark"
    ));
}

#[test]
fn test_duplicate_token() {
    let mut builder = palette_builder();
    builder.token("color.surface", Category::Color, "#000000");
    assert_eq!(
        builder.build().unwrap_err(),
        BuildError::DuplicateToken(token_name("color.surface"))
    );
}

#[test]
fn test_literal_not_accepted_by_category() {
    let mut builder = RegistryBuilder::new();
    builder.token("spacing.bad", Category::Spacing, "#ffffff");
    match builder.build().unwrap_err() {
        BuildError::InvalidValue { token, source, .. } => {
            assert_eq!(token, token_name("spacing.bad"));
            assert!(matches!(source, ValueError::NotAccepted { .. } | ValueError::InvalidLength(_)));
        }
        other => panic!("expected invalid value, got {other}"),
    }
}

#[test]
fn test_first_error_is_deterministic() {
    // Two independent duplicates; the lexicographically smaller one wins.
    let mut builder = RegistryBuilder::new();
    builder
        .token("spacing.z", Category::Spacing, "1px")
        .token("spacing.z", Category::Spacing, "2px")
        .token("color.a", Category::Color, "#000")
        .token("color.a", Category::Color, "#fff");
    assert_eq!(
        builder.build().unwrap_err(),
        BuildError::DuplicateToken(token_name("color.a"))
    );
}

#[test]
fn test_chain_at_depth_limit_builds() {
    let mut builder = chain_builder(8);
    builder.config(RegistryConfig::default().with_max_depth(8));
    let registry = builder.build().unwrap();
    assert_eq!(registry.resolve("spacing.chain.0", "default").unwrap().to_string(), "4px");

    let mut builder = chain_builder(9);
    builder.config(RegistryConfig::default().with_max_depth(8));
    assert!(matches!(
        builder.build().unwrap_err(),
        BuildError::ChainTooDeep { depth: 9, max_depth: 8, .. }
    ));
}

#[test]
fn test_error_points_at_offending_tokens() {
    let mut builder = palette_builder();
    builder.token("spacing.gap", Category::Spacing, "{color.surface}");
    assert_eq!(builder.build().unwrap_err().tokens(), vec!["spacing.gap", "color.surface"]);
}
