use url::Url;

use crate::category::RecipeCategory;
use crate::errors::ArgumentError;
use crate::guard::{ensure_not_blank, ensure_url, is_image};
use crate::platform::Attachment;

use super::data::{RecipeData, RecipeFieldData};

pub const INGREDIENTS: &str = "Ingredients";
pub const COOKING_STEPS: &str = "Cooking Steps";
pub const ADDITIONAL_NOTES: &str = "Additional Notes";

/// Collects the raw input of one recipe submission.
#[derive(Debug)]
pub struct RecipeDataBuilder {
    author_id: u64,
    category: RecipeCategory,
    title: String,
    ingredients: String,
    steps: String,
    notes: Option<String>,
    tags: Option<String>,
    image_url: Option<Url>,
}

impl RecipeDataBuilder {
    /// Starts a recipe. The title, ingredients and steps must not be
    /// blank.
    pub fn new(
        author_id: u64,
        category: RecipeCategory,
        title: impl Into<String>,
        ingredients: impl Into<String>,
        steps: impl Into<String>,
    ) -> Result<Self, ArgumentError> {
        Ok(Self {
            author_id,
            category,
            title: ensure_not_blank("title", title)?,
            ingredients: ensure_not_blank("ingredients", ingredients)?,
            steps: ensure_not_blank("cooking steps", steps)?,
            notes: None,
            tags: None,
            image_url: None,
        })
    }

    /// Adds free-text notes. Blank notes are ignored.
    pub fn with_notes(mut self, notes: Option<impl Into<String>>) -> Self {
        self.notes = notes.map(Into::into).filter(|n| !n.trim().is_empty());
        self
    }

    /// Adds a comma-separated tag string. Blank strings are ignored.
    pub fn with_tags(mut self, tags: Option<impl Into<String>>) -> Self {
        self.tags = tags.map(Into::into).filter(|t| !t.trim().is_empty());
        self
    }

    /// Attaches an image, which must have an `image/*` content type.
    pub fn with_image(mut self, attachment: &Attachment) -> Result<Self, ArgumentError> {
        if !is_image(attachment.content_type.as_deref()) {
            return Err(ArgumentError::NotAnImage {
                filename: attachment.filename.clone(),
                content_type: attachment.content_type.clone(),
            });
        }

        self.image_url = Some(ensure_url("image URL", &attachment.url)?);
        Ok(self)
    }

    pub fn build(self) -> RecipeData {
        let mut fields = vec![
            RecipeFieldData::new(INGREDIENTS, self.ingredients),
            RecipeFieldData::new(COOKING_STEPS, self.steps),
        ];

        if let Some(notes) = self.notes {
            fields.push(RecipeFieldData::new(ADDITIONAL_NOTES, notes));
        }

        RecipeData::new(self.author_id, self.category, self.title, fields)
            .with_tags(self.tags)
            .with_image_url(self.image_url)
    }
}
