use std::fmt;

use crate::errors::ArgumentError;

/// The classification attached to every recipe.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum RecipeCategory {
    Meat,
    Fish,
    Vegetarian,
    Vegan,
    Drinks,
    Pastry,
    Dessert,
    Snack,
    Other,
}

impl RecipeCategory {
    pub const ALL: [RecipeCategory; 9] = [
        RecipeCategory::Meat,
        RecipeCategory::Fish,
        RecipeCategory::Vegetarian,
        RecipeCategory::Vegan,
        RecipeCategory::Drinks,
        RecipeCategory::Pastry,
        RecipeCategory::Dessert,
        RecipeCategory::Snack,
        RecipeCategory::Other,
    ];

    /// The name shown at the start of the tag footer.
    pub fn display_name(self) -> &'static str {
        use RecipeCategory::*;

        match self {
            Meat => "Meat",
            Fish => "Fish",
            Vegetarian => "Vegetarian",
            Vegan => "Vegan",
            Drinks => "Drinks",
            Pastry => "Pastry",
            Dessert => "Dessert",
            Snack => "Snack",
            Other => "Other",
        }
    }
}

impl fmt::Display for RecipeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Mapping between categories and the choice values registered for
/// the `category` slash-command option.
pub mod choice {
    use super::{ArgumentError, RecipeCategory};

    const KIND: &str = "recipe category";

    pub fn to_choice(category: RecipeCategory) -> &'static str {
        use RecipeCategory::*;

        match category {
            Meat => "meat",
            Fish => "fish",
            Vegetarian => "vegetarian",
            Vegan => "vegan",
            Drinks => "drinks",
            Pastry => "pastry",
            Dessert => "dessert",
            Snack => "snack",
            Other => "other",
        }
    }

    pub fn from_choice(value: &str) -> Result<RecipeCategory, ArgumentError> {
        RecipeCategory::ALL
            .iter()
            .copied()
            .find(|category| to_choice(*category) == value)
            .ok_or_else(|| ArgumentError::InvalidEnum {
                kind: KIND,
                value: value.to_owned(),
            })
    }
}

/// Mapping between categories and the codes stored in the `category`
/// column. These codes are part of the database contract and must
/// never be renumbered.
pub mod persistent {
    use super::RecipeCategory;
    use crate::errors::BotError;

    pub fn to_code(category: RecipeCategory) -> i64 {
        use RecipeCategory::*;

        match category {
            Meat => 1,
            Fish => 2,
            Vegetarian => 3,
            Vegan => 4,
            Drinks => 10,
            Pastry => 20,
            Dessert => 21,
            Snack => 30,
            Other => 99,
        }
    }

    pub fn from_code(code: i64) -> Result<RecipeCategory, BotError> {
        RecipeCategory::ALL
            .iter()
            .copied()
            .find(|category| to_code(*category) == code)
            .ok_or(BotError::UnknownCategoryCode(code))
    }
}
