//! Matching of path segments against member names.
//!
//! Path segments are written by users in `snake_case` or lowercase (for
//! example `external_id` or `api.url`), while member names follow whatever
//! convention the type author picked: `ExternalID`, `externalId`,
//! `external_id`. [`name_matches`] bridges those conventions.

/// Checks if a member `name` matches a path `segment`.
///
/// The comparison is case-insensitive and proceeds character by character.
/// An underscore in the segment matches either an underscore in the name or a
/// lowercase to uppercase transition in the name (without consuming a
/// character of the name). Underscores in the segment are otherwise optional,
/// so `authurl` and `auth_url` both match `AuthURL`. Both strings have to be
/// fully consumed, there is no prefix matching.
///
/// # Example
///
/// ```rust
/// use ocm_digger::name_matches;
///
/// assert!(name_matches("MyD", "my_d"));
/// assert!(name_matches("ID", "id"));
/// assert!(name_matches("external_id", "external_id"));
/// assert!(!name_matches("MyDog", "my_d"));
/// ```
pub fn name_matches(name: &str, segment: &str) -> bool {
    let name: Vec<char> = name.chars().collect();
    let segment: Vec<char> = segment.chars().collect();

    let (mut i, mut j) = (0, 0);
    while i < name.len() && j < segment.len() {
        let s = segment[j];
        if s == '_' {
            if name[i] == '_' {
                i += 1;
                j += 1;
                continue;
            }
            if i > 0 && name[i - 1].is_lowercase() && name[i].is_uppercase() {
                j += 1;
                continue;
            }
            return false;
        }
        if !chars_equal(name[i], s) {
            return false;
        }
        i += 1;
        j += 1;
    }

    i == name.len() && j == segment.len()
}

/// Removes a `Get`/`get_` accessor prefix from a method name.
///
/// The prefix is only removable when what follows it is the start of a new
/// word: `GetFoo` becomes `Foo` and `get_foo` becomes `foo`, but `Getaway`
/// and `getaway` are left alone.
///
/// ```rust
/// use ocm_digger::strip_get_prefix;
///
/// assert_eq!(strip_get_prefix("GetB"), Some("B"));
/// assert_eq!(strip_get_prefix("get_b"), Some("b"));
/// assert_eq!(strip_get_prefix("Getaway"), None);
/// ```
pub fn strip_get_prefix(name: &str) -> Option<&str> {
    if let Some(rest) = name.strip_prefix("get_") {
        return (!rest.is_empty()).then_some(rest);
    }
    let rest = name.strip_prefix("Get")?;
    match rest.chars().next() {
        Some(c) if c.is_uppercase() => Some(rest),
        _ => None,
    }
}

/// Checks a method name against a segment, with and without its `Get` prefix.
pub(crate) fn method_matches(name: &str, segment: &str) -> bool {
    if name_matches(name, segment) {
        return true;
    }
    strip_get_prefix(name).is_some_and(|stripped| name_matches(stripped, segment))
}

fn chars_equal(a: char, b: char) -> bool {
    a == b || a.to_lowercase().eq(b.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_match() {
        assert!(name_matches("name", "name"));
        assert!(name_matches("Name", "name"));
        assert!(name_matches("ID", "id"));
    }

    #[test]
    fn underscore_matches_camel_boundary() {
        assert!(name_matches("MyD", "my_d"));
        assert!(name_matches("ExternalID", "external_id"));
        assert!(name_matches("externalId", "external_id"));
    }

    #[test]
    fn underscore_is_optional() {
        assert!(name_matches("ExternalID", "externalid"));
    }

    #[test]
    fn underscore_without_boundary_fails() {
        assert!(!name_matches("Myd", "my_d"));
        assert!(!name_matches("MYD", "my_d"));
    }

    #[test]
    fn snake_names_match_snake_segments() {
        assert!(name_matches("external_id", "external_id"));
        assert!(!name_matches("external_id", "external"));
    }

    #[test]
    fn both_sides_must_be_consumed() {
        assert!(!name_matches("Name", "nam"));
        assert!(!name_matches("Nam", "name"));
        assert!(!name_matches("", "a"));
        assert!(!name_matches("a", ""));
        assert!(name_matches("", ""));
    }

    #[test]
    fn get_prefix_requires_word_boundary() {
        assert_eq!(strip_get_prefix("GetB"), Some("B"));
        assert_eq!(strip_get_prefix("GetAuthURL"), Some("AuthURL"));
        assert_eq!(strip_get_prefix("Getaway"), None);
        assert_eq!(strip_get_prefix("Get"), None);
        assert_eq!(strip_get_prefix("get_b"), Some("b"));
        assert_eq!(strip_get_prefix("get_"), None);
        assert_eq!(strip_get_prefix("getaway"), None);
        assert_eq!(strip_get_prefix("Name"), None);
    }

    #[test]
    fn method_matching_tries_both_forms() {
        assert!(method_matches("GetB", "b"));
        assert!(method_matches("GetB", "get_b"));
        assert!(method_matches("Getaway", "getaway"));
        assert!(!method_matches("Getaway", "away"));
        assert!(method_matches("get_auth_url", "auth_url"));
    }
}
