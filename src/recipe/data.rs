use url::Url;

use crate::category::RecipeCategory;

use super::char_length;

/// A named part of a recipe before validation.
#[derive(Clone, Debug, PartialEq)]
pub struct RecipeFieldData {
    pub(crate) field_name: String,
    pub(crate) field_data: String,
}

impl RecipeFieldData {
    pub fn new(field_name: impl Into<String>, field_data: impl Into<String>) -> Self {
        Self {
            field_name: field_name.into(),
            field_data: field_data.into(),
        }
    }

    pub fn field_name(&self) -> &str {
        &self.field_name
    }

    pub fn field_data(&self) -> &str {
        &self.field_data
    }

    pub fn total_length(&self) -> usize {
        char_length(&self.field_name) + char_length(&self.field_data)
    }
}

/// Everything collected for a recipe, not yet checked against any
/// limits.
#[derive(Clone, Debug, PartialEq)]
pub struct RecipeData {
    pub(crate) author_id: u64,
    pub(crate) category: RecipeCategory,
    pub(crate) fields: Vec<RecipeFieldData>,
    pub(crate) title: String,
    pub(crate) tags: Option<String>,
    pub(crate) image_url: Option<Url>,
}

impl RecipeData {
    pub fn new(
        author_id: u64,
        category: RecipeCategory,
        title: impl Into<String>,
        fields: Vec<RecipeFieldData>,
    ) -> Self {
        Self {
            author_id,
            category,
            fields,
            title: title.into(),
            tags: None,
            image_url: None,
        }
    }

    pub fn with_tags(mut self, tags: Option<String>) -> Self {
        self.tags = tags;
        self
    }

    pub fn with_image_url(mut self, image_url: Option<Url>) -> Self {
        self.image_url = image_url;
        self
    }

    pub fn author_id(&self) -> u64 {
        self.author_id
    }

    pub fn category(&self) -> RecipeCategory {
        self.category
    }

    pub fn fields(&self) -> &[RecipeFieldData] {
        &self.fields
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn tags(&self) -> Option<&str> {
        self.tags.as_deref()
    }

    pub fn image_url(&self) -> Option<&Url> {
        self.image_url.as_ref()
    }
}
