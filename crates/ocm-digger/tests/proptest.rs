//! Property-based tests for name matching and lookups.

use ocm_digger::{name_matches, Digger, Value};
use proptest::prelude::*;

// Turns `my_field_name` into `MyFieldName`.
fn camel(segment: &str) -> String {
    segment
        .split('_')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect()
}

proptest! {
    /// Every name matches itself.
    #[test]
    fn name_matches_itself(name in "[A-Za-z][A-Za-z0-9_]{0,20}") {
        prop_assert!(name_matches(&name, &name));
    }

    /// Matching ignores case.
    #[test]
    fn name_matching_ignores_case(name in "[a-z][a-z0-9]{0,20}") {
        prop_assert!(name_matches(&name.to_uppercase(), &name));
        prop_assert!(name_matches(&name, &name.to_uppercase()));
    }

    /// Snake case segments match their camel case spelling.
    #[test]
    fn snake_segment_matches_camel_name(segment in "[a-z]{2,6}(_[a-z]{2,6}){0,3}") {
        prop_assert!(name_matches(&camel(&segment), &segment));
    }

    /// A strict prefix never matches.
    #[test]
    fn prefixes_never_match(name in "[a-z]{2,12}", cut in 1usize..12) {
        let cut = cut.min(name.len() - 1);
        prop_assert!(!name_matches(&name, &name[..cut]));
        prop_assert!(!name_matches(&name[..cut], &name));
    }

    /// An empty path returns any scalar unchanged.
    #[test]
    fn empty_path_is_identity(text in ".*", number in any::<i64>()) {
        let digger = Digger::new();
        let text = Value::from(text);
        let number = Value::from(number);
        prop_assert_eq!(digger.dig(&text, ""), text);
        prop_assert_eq!(digger.dig(&number, ""), number);
    }

    /// Digging into nothing yields nothing, whatever the path.
    #[test]
    fn none_yields_none(path in "[a-z_.]{0,30}") {
        let digger = Digger::new();
        prop_assert!(digger.dig(&Value::None, &path).is_none());
    }
}
