//! Chat embeds and the mapping from validated recipes onto them.

use serde::Serialize;
use thiserror::Error;

use crate::errors::ResponseCreateError;
use crate::recipe::{AuthorModel, RecipeModel};

/// Discord's hard limits on embeds, independent of the configured
/// character limits.
pub mod caps {
    pub const TITLE: usize = 256;
    pub const AUTHOR_NAME: usize = 256;
    pub const FIELD_NAME: usize = 256;
    pub const FIELD_VALUE: usize = 1024;
    pub const FOOTER: usize = 2048;
    pub const FIELDS: usize = 25;
    pub const TOTAL: usize = 6000;
}

/// The colour of the stripe beside recipe embeds.
const RECIPE_COLOUR: u32 = 0x00E6_7E22;

#[derive(Debug, Error, PartialEq)]
pub enum EmbedError {
    #[error("{part} is {length} characters long but may be at most {max}")]
    TooLong {
        part: &'static str,
        length: usize,
        max: usize,
    },

    #[error("embeds may have at most {} fields", caps::FIELDS)]
    TooManyFields,

    #[error("{part} must not be empty")]
    Empty { part: &'static str },
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Embed {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<EmbedAuthor>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<EmbedImage>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<EmbedField>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub footer: Option<EmbedFooter>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<u32>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct EmbedAuthor {
    pub name: String,
    pub icon_url: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct EmbedImage {
    pub url: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct EmbedField {
    pub name: String,
    pub value: String,
    pub inline: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct EmbedFooter {
    pub text: String,
}

/// Assembles an [`Embed`], enforcing the platform caps as each part is
/// added.
#[derive(Debug, Default)]
pub struct EmbedBuilder {
    embed: Embed,
}

impl EmbedBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Result<Self, EmbedError> {
        self.embed.title = Some(checked("title", title.into(), caps::TITLE)?);
        Ok(self)
    }

    pub fn author(mut self, name: impl Into<String>, icon_url: impl Into<String>) -> Result<Self, EmbedError> {
        self.embed.author = Some(EmbedAuthor {
            name: checked("author name", name.into(), caps::AUTHOR_NAME)?,
            icon_url: icon_url.into(),
        });
        Ok(self)
    }

    pub fn image(mut self, url: impl Into<String>) -> Self {
        self.embed.image = Some(EmbedImage { url: url.into() });
        self
    }

    pub fn field(mut self, name: impl Into<String>, value: impl Into<String>) -> Result<Self, EmbedError> {
        if self.embed.fields.len() >= caps::FIELDS {
            return Err(EmbedError::TooManyFields);
        }

        self.embed.fields.push(EmbedField {
            name: checked("field name", name.into(), caps::FIELD_NAME)?,
            value: checked("field value", value.into(), caps::FIELD_VALUE)?,
            inline: false,
        });
        Ok(self)
    }

    pub fn footer(mut self, text: impl Into<String>) -> Result<Self, EmbedError> {
        self.embed.footer = Some(EmbedFooter {
            text: checked("footer", text.into(), caps::FOOTER)?,
        });
        Ok(self)
    }

    pub fn color(mut self, color: u32) -> Self {
        self.embed.color = Some(color);
        self
    }

    pub fn build(self) -> Result<Embed, EmbedError> {
        let length = self.embed.length();

        if length > caps::TOTAL {
            return Err(EmbedError::TooLong {
                part: "embed",
                length,
                max: caps::TOTAL,
            });
        }

        Ok(self.embed)
    }
}

impl Embed {
    /// The number of characters Discord counts towards the total cap.
    pub fn length(&self) -> usize {
        let count = |s: &str| s.chars().count();

        self.title.as_deref().map_or(0, count)
            + self.author.as_ref().map_or(0, |a| count(&a.name))
            + self
                .fields
                .iter()
                .map(|f| count(&f.name) + count(&f.value))
                .sum::<usize>()
            + self.footer.as_ref().map_or(0, |f| count(&f.text))
    }
}

fn checked(part: &'static str, value: String, max: usize) -> Result<String, EmbedError> {
    let length = value.chars().count();

    if value.trim().is_empty() {
        Err(EmbedError::Empty { part })
    } else if length > max {
        Err(EmbedError::TooLong { part, length, max })
    } else {
        Ok(value)
    }
}

/// Renders a validated recipe as an embed.
pub fn recipe_embed(recipe: &RecipeModel, author: &AuthorModel) -> Result<Embed, ResponseCreateError> {
    let mut builder = EmbedBuilder::new()
        .author(author.name(), author.image_url().as_str())?
        .title(recipe.title())?
        .color(RECIPE_COLOUR);

    if let Some(url) = recipe.image_url() {
        builder = builder.image(url.as_str());
    }

    for field in recipe.fields() {
        builder = builder.field(field.name(), field.value())?;
    }

    let embed = builder.footer(recipe.tags().to_string())?.build()?;

    Ok(embed)
}
