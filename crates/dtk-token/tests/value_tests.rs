use dtk_token::{Category, Color, Literal, RawValue, TokenName, TokenValue};
use proptest::prelude::*;

proptest! {
    #[test]
    fn prop_valid_names_parse_and_display_unchanged(
        segments in proptest::collection::vec("[a-zA-Z0-9_-]{1,8}", 1..5)
    ) {
        let text = segments.join(".");
        let name = TokenName::parse(&text).unwrap();
        prop_assert_eq!(name.as_str(), text.as_str());
        prop_assert_eq!(name.depth(), segments.len());
        prop_assert_eq!(name.leaf(), segments[segments.len() - 1].as_str());
    }

    #[test]
    fn prop_names_with_empty_segment_rejected(
        left in "[a-z]{1,6}",
        right in "[a-z]{1,6}"
    ) {
        let doubled = format!("{left}..{right}");
        let leading = format!(".{left}");
        let trailing = format!("{left}.");
        prop_assert!(TokenName::parse(&doubled).is_err());
        prop_assert!(TokenName::parse(&leading).is_err());
        prop_assert!(TokenName::parse(&trailing).is_err());
    }

    #[test]
    fn prop_hex_colors_display_canonically(r in any::<u8>(), g in any::<u8>(), b in any::<u8>()) {
        let hex = format!("#{r:02x}{g:02x}{b:02x}");
        let value = TokenValue::parse(&RawValue::from(hex.as_str()), Category::Color).unwrap();
        prop_assert_eq!(value.literal(), Some(&Literal::Color(Color::rgb(r, g, b))));
        prop_assert_eq!(value.to_string(), hex);
    }

    #[test]
    fn prop_weights_in_range_accepted(weight in 1u16..=1000) {
        let value = TokenValue::parse(&RawValue::from(i64::from(weight)), Category::TypographyWeight);
        prop_assert!(value.is_ok());
    }

    #[test]
    fn prop_brace_alias_always_reference(name in "[a-z]{1,6}(\\.[a-z0-9]{1,4}){0,3}") {
        for category in Category::ALL {
            let value = TokenValue::parse(&RawValue::from(format!("{{{name}}}")), category).unwrap();
            prop_assert_eq!(value.reference().map(TokenName::as_str), Some(name.as_str()));
        }
    }
}

#[test]
fn test_weight_out_of_range_rejected() {
    assert!(TokenValue::parse(&RawValue::from(0_i64), Category::TypographyWeight).is_err());
    assert!(TokenValue::parse(&RawValue::from(1001_i64), Category::TypographyWeight).is_err());
}

#[test]
fn test_lengths_need_units() {
    assert!(TokenValue::parse(&RawValue::from(16_i64), Category::Spacing).is_err());
    assert!(TokenValue::parse(&RawValue::from(0_i64), Category::Spacing).is_ok());
    assert!(TokenValue::parse(&RawValue::measured(16.0, "px"), Category::Spacing).is_ok());
}
