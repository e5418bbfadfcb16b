use std::fmt;

use crate::category::RecipeCategory;

use super::char_length;

const SEPARATOR: &str = ", ";

/// Splits a comma-separated tag string, trimming each tag and dropping
/// empty ones.
pub fn parse_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_owned)
        .collect()
}

/// The tag footer of a recipe: the category name followed by the
/// user's tags.
#[derive(Clone, Debug, PartialEq)]
pub struct RecipeTags {
    category: RecipeCategory,
    tags: Vec<String>,
}

impl RecipeTags {
    pub fn new(category: RecipeCategory, tags: Vec<String>) -> Self {
        Self { category, tags }
    }

    /// The user's tags, without the category.
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn total_length(&self) -> usize {
        char_length(&self.to_string())
    }
}

impl fmt::Display for RecipeTags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.category.display_name())?;

        for tag in &self.tags {
            f.write_str(SEPARATOR)?;
            f.write_str(tag)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::{parse_tags, RecipeTags};
    use crate::category::RecipeCategory;

    #[test]
    fn category_comes_first() {
        let tags = RecipeTags::new(RecipeCategory::Fish, vec!["quick".into(), "easy".into()]);

        assert_eq!(tags.to_string(), "Fish, quick, easy");
        assert_eq!(tags.total_length(), "Fish, quick, easy".len());
    }

    #[test]
    fn category_alone() {
        assert_eq!(RecipeTags::new(RecipeCategory::Other, vec![]).to_string(), "Other");
    }

    #[test]
    fn parsing_drops_empty_tags() {
        assert_eq!(parse_tags(" quick,, easy ,  ,weeknight"), vec!["quick", "easy", "weeknight"]);
        assert!(parse_tags("").is_empty());
        assert!(parse_tags(" , ,").is_empty());
    }

    proptest! {
        #[test]
        fn joined_tags_split_back(tags in prop::collection::vec("[a-z][a-z ]{0,10}[a-z]", 0..8)) {
            let wrapper = RecipeTags::new(RecipeCategory::Vegan, tags.clone());
            let rendered = wrapper.to_string();
            let mut parts = rendered.split(", ");

            prop_assert_eq!(parts.next(), Some("Vegan"));
            prop_assert_eq!(parts.map(str::to_owned).collect::<Vec<_>>(), tags);
        }
    }
}
