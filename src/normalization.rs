/// Normalizes a tag for lookups by stripping surrounding whitespace,
/// lowercasing it and decomposing it into Unicode Normalization Form D.
///
/// ```
/// use recipebot::normalization::normalize_tag;
/// assert_eq!(normalize_tag(" Crème Brûlée "), normalize_tag("crème brûlée"));
/// ```
pub fn normalize_tag(tag: impl AsRef<str>) -> String {
    use unicode_normalization::UnicodeNormalization;

    tag.as_ref().trim().to_lowercase().nfd().to_string()
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use unicode_normalization::is_nfd;

    use super::normalize_tag;

    fn count_whitespace(s: impl AsRef<str>) -> usize {
        s.as_ref().chars().filter(|c| c.is_whitespace()).count()
    }

    #[test]
    fn composed_and_decomposed_forms_match() {
        assert_eq!(normalize_tag("caf\u{e9}"), normalize_tag("cafe\u{301}"));
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 2000, ..ProptestConfig::default()
        })]

        #[test]
        fn normalization_works(string in "(\\S.*\\S|\\S+)", space_before in "\\s*", space_after in "\\s*") {
            let normalized = normalize_tag(format!("{}{}{}", space_before, string, space_after));

            prop_assert!(is_nfd(&normalized), "{:?} (normalized form of {:?}) is in NFD", normalized, string);

            prop_assert!(!normalized.starts_with(char::is_whitespace) && !normalized.ends_with(char::is_whitespace), "{:?} (normalized form of {:?}) has no leading or trailing whitespace", normalized, string);

            prop_assert_eq!(count_whitespace(&normalized), count_whitespace(normalized.trim()), "{:?} (normalized form of {:?}) preserves inner whitespace", normalized, string);
        }
    }
}
