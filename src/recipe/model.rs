use url::Url;

use crate::category::RecipeCategory;

use super::char_length;
use super::tags::RecipeTags;

/// A named part of a recipe that fits the field limits.
#[derive(Clone, Debug, PartialEq)]
pub struct RecipeFieldModel {
    name: String,
    value: String,
}

impl RecipeFieldModel {
    pub(crate) fn new(name: String, value: String) -> Self {
        Self { name, value }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn total_length(&self) -> usize {
        char_length(&self.name) + char_length(&self.value)
    }
}

/// A recipe that satisfies every configured limit. Only the
/// [`RecipeModelFactory`](super::RecipeModelFactory) creates these.
#[derive(Clone, Debug, PartialEq)]
pub struct RecipeModel {
    author_id: u64,
    category: RecipeCategory,
    fields: Vec<RecipeFieldModel>,
    title: String,
    tags: RecipeTags,
    image_url: Option<Url>,
}

impl RecipeModel {
    pub(crate) fn new(
        author_id: u64,
        category: RecipeCategory,
        fields: Vec<RecipeFieldModel>,
        title: String,
        tags: RecipeTags,
        image_url: Option<Url>,
    ) -> Self {
        Self {
            author_id,
            category,
            fields,
            title,
            tags,
            image_url,
        }
    }

    pub fn author_id(&self) -> u64 {
        self.author_id
    }

    pub fn category(&self) -> RecipeCategory {
        self.category
    }

    pub fn fields(&self) -> &[RecipeFieldModel] {
        &self.fields
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn tags(&self) -> &RecipeTags {
        &self.tags
    }

    pub fn image_url(&self) -> Option<&Url> {
        self.image_url.as_ref()
    }

    pub fn total_length(&self) -> usize {
        char_length(&self.title)
            + self.fields.iter().map(RecipeFieldModel::total_length).sum::<usize>()
            + self.tags.total_length()
    }
}
