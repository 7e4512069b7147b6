//! Section identifiers.

use std::sync::LazyLock;

use regex::Regex;

use crate::payload::Division;

/// Namespace token prepended to every section id.
pub const SECTION_ID_PREFIX: &str = "sec-";

static UNSAFE_ID_CHARS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[^A-Za-z0-9.\-_]").unwrap_or_else(|err| panic!("invalid id pattern: {err}"))
});

/// Map every character outside `[A-Za-z0-9.\-_]` to `_`, then trim
/// underscores from both ends.
pub fn sanitize(raw: &str) -> String {
    UNSAFE_ID_CHARS
        .replace_all(raw, "_")
        .trim_matches('_')
        .to_string()
}

/// Id of the section rendered for `div`. Not deduplicated.
pub fn section_id(div: &Division) -> String {
    format!("{SECTION_ID_PREFIX}{}", sanitize(div.label()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_sanitize_keeps_safe_characters() {
        assert_eq!(sanitize("1.1-a_b"), "1.1-a_b");
    }

    #[test]
    fn test_sanitize_replaces_and_trims() {
        assert_eq!(sanitize(" Book 1, ch. 2 "), "Book_1__ch._2");
        assert_eq!(sanitize("§3"), "3");
        assert_eq!(sanitize("λόγος"), "");
    }

    #[test]
    fn test_section_id_falls_back_to_type() {
        let div = Division {
            kind: "pro logue".into(),
            ..Division::default()
        };
        assert_eq!(section_id(&div), "sec-pro_logue");
    }

    #[test]
    fn test_numeric_zero_label_falls_back_to_type() {
        let div: Division = serde_json::from_str(r#"{"n":0,"type":"verse"}"#).unwrap();
        assert_eq!(section_id(&div), "sec-verse");
    }

    #[test]
    fn test_section_id_for_empty_division_is_bare_prefix() {
        assert_eq!(section_id(&Division::default()), SECTION_ID_PREFIX);
    }

    proptest! {
        #[test]
        fn sanitized_ids_use_only_safe_characters(label in "\\PC{0,24}") {
            let div = Division { n: label, ..Division::default() };
            let id = section_id(&div);
            let body = id.strip_prefix(SECTION_ID_PREFIX).unwrap();
            prop_assert!(body
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_')));
            prop_assert!(!body.starts_with('_'));
            prop_assert!(!body.ends_with('_'));
        }
    }
}
