use url::Url;

use crate::errors::{ArgumentError, ModelCreateError};
use crate::guard::{ensure_not_blank, ensure_url};
use crate::limits::CharacterLimits;

use super::char_length;

/// The identity shown in the author block of a recipe embed.
#[derive(Clone, Debug, PartialEq)]
pub struct AuthorData {
    author_name: String,
    author_image_url: Url,
}

impl AuthorData {
    pub fn new(
        author_name: impl Into<String>,
        author_image_url: impl AsRef<str>,
    ) -> Result<Self, ArgumentError> {
        Ok(Self {
            author_name: ensure_not_blank("author name", author_name)?,
            author_image_url: ensure_url("author image URL", author_image_url)?,
        })
    }

    pub fn author_name(&self) -> &str {
        &self.author_name
    }

    pub fn author_image_url(&self) -> &Url {
        &self.author_image_url
    }
}

/// An author whose name fits in the author block.
#[derive(Clone, Debug, PartialEq)]
pub struct AuthorModel {
    data: AuthorData,
}

impl AuthorModel {
    pub fn new(data: AuthorData, limits: &dyn CharacterLimits) -> Result<Self, ModelCreateError> {
        let max = limits.max_author_name_length();

        if char_length(&data.author_name) > max {
            return Err(ModelCreateError::new(format!(
                "Author name must be at most {} characters long",
                max
            )));
        }

        Ok(Self { data })
    }

    pub fn name(&self) -> &str {
        &self.data.author_name
    }

    pub fn image_url(&self) -> &Url {
        &self.data.author_image_url
    }
}
