use crate::config::get_variable_or;

/// Supplies the maximum lengths of each renderable part of a recipe.
pub trait CharacterLimits {
    fn max_title_length(&self) -> usize;

    fn max_author_name_length(&self) -> usize;

    fn max_field_name_length(&self) -> usize;

    fn max_field_value_length(&self) -> usize;

    fn max_message_length(&self) -> usize;

    fn max_footer_length(&self) -> usize;
}

/// Limits read from configuration, defaulting to Discord's embed
/// limits.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Limits {
    pub title: usize,
    pub author_name: usize,
    pub field_name: usize,
    pub field_value: usize,
    pub message: usize,
    pub footer: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            title: 256,
            author_name: 256,
            field_name: 256,
            field_value: 1024,
            message: 6000,
            footer: 2048,
        }
    }
}

impl Limits {
    /// Reads the limits from the `RECIPEBOT_MAX_*` variables, keeping
    /// the default for each one that is not set.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            title: get_variable_or("RECIPEBOT_MAX_TITLE_LENGTH", defaults.title),
            author_name: get_variable_or("RECIPEBOT_MAX_AUTHOR_NAME_LENGTH", defaults.author_name),
            field_name: get_variable_or("RECIPEBOT_MAX_FIELD_NAME_LENGTH", defaults.field_name),
            field_value: get_variable_or("RECIPEBOT_MAX_FIELD_VALUE_LENGTH", defaults.field_value),
            message: get_variable_or("RECIPEBOT_MAX_MESSAGE_LENGTH", defaults.message),
            footer: get_variable_or("RECIPEBOT_MAX_FOOTER_LENGTH", defaults.footer),
        }
    }
}

impl CharacterLimits for Limits {
    fn max_title_length(&self) -> usize {
        self.title
    }

    fn max_author_name_length(&self) -> usize {
        self.author_name
    }

    fn max_field_name_length(&self) -> usize {
        self.field_name
    }

    fn max_field_value_length(&self) -> usize {
        self.field_value
    }

    fn max_message_length(&self) -> usize {
        self.message
    }

    fn max_footer_length(&self) -> usize {
        self.footer
    }
}
