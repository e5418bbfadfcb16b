use crate::errors::ModelCreateError;
use crate::limits::CharacterLimits;

use super::char_length;
use super::data::{RecipeData, RecipeFieldData};
use super::model::{RecipeFieldModel, RecipeModel};
use super::tags::{parse_tags, RecipeTags};

/// Validates recipe data against the configured limits.
pub struct RecipeModelFactory<'a> {
    limits: &'a dyn CharacterLimits,
}

impl<'a> RecipeModelFactory<'a> {
    pub fn new(limits: &'a dyn CharacterLimits) -> Self {
        Self { limits }
    }

    /// Creates a model, or reports the first violated limit. Fields,
    /// tags and title are checked individually before the total size
    /// of the assembled recipe.
    pub fn create(&self, data: RecipeData) -> Result<RecipeModel, ModelCreateError> {
        let RecipeData {
            author_id,
            category,
            fields,
            title,
            tags,
            image_url,
        } = data;

        let fields = fields
            .into_iter()
            .map(|field| self.create_field(field))
            .collect::<Result<Vec<_>, _>>()?;

        let tags = RecipeTags::new(category, tags.as_deref().map(parse_tags).unwrap_or_default());
        let max_footer = self.limits.max_footer_length();
        if tags.total_length() > max_footer {
            return Err(ModelCreateError::new(format!(
                "Tags must be at most {} characters long, including the category",
                max_footer
            )));
        }

        let max_title = self.limits.max_title_length();
        if char_length(&title) > max_title {
            return Err(ModelCreateError::new(format!(
                "Title must be at most {} characters long",
                max_title
            )));
        }

        let model = RecipeModel::new(author_id, category, fields, title, tags, image_url);

        let max_message = self.limits.max_message_length();
        let total = model.total_length();
        if total > max_message {
            return Err(ModelCreateError::new(format!(
                "Recipe is {} characters long but may be at most {}",
                total, max_message
            )));
        }

        Ok(model)
    }

    fn create_field(&self, field: RecipeFieldData) -> Result<RecipeFieldModel, ModelCreateError> {
        let RecipeFieldData {
            field_name,
            field_data,
        } = field;

        let max_name = self.limits.max_field_name_length();
        if char_length(&field_name) > max_name {
            return Err(ModelCreateError::new(format!(
                "Field name {:?} must be at most {} characters long",
                field_name, max_name
            )));
        }

        let max_value = self.limits.max_field_value_length();
        if char_length(&field_data) > max_value {
            return Err(ModelCreateError::new(format!(
                "{} must be at most {} characters long",
                field_name, max_value
            )));
        }

        Ok(RecipeFieldModel::new(field_name, field_data))
    }
}
