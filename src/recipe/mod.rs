//! The recipe pipeline: raw modal input is collected by the
//! [`RecipeDataBuilder`], validated into a [`RecipeModel`] by the
//! [`RecipeModelFactory`] and rendered by [`crate::embed`].

mod author;
mod builder;
mod data;
mod factory;
mod model;
mod tags;

pub use author::{AuthorData, AuthorModel};
pub use builder::{RecipeDataBuilder, ADDITIONAL_NOTES, COOKING_STEPS, INGREDIENTS};
pub use data::{RecipeData, RecipeFieldData};
pub use factory::RecipeModelFactory;
pub use model::{RecipeFieldModel, RecipeModel};
pub use tags::{parse_tags, RecipeTags};

/// Counts the characters in a string the way the chat platform does.
pub(crate) fn char_length(s: &str) -> usize {
    s.chars().count()
}
