use thiserror::Error;

use crate::embed::EmbedError;

/// Enumerates high-level errors returned by this library.
#[derive(Debug, Error)]
pub enum BotError {
    /// Represents missing or malformed input detected before validation.
    #[error(transparent)]
    Argument(#[from] ArgumentError),

    /// Represents a recipe that violates a length constraint.
    #[error(transparent)]
    ModelCreate(#[from] ModelCreateError),

    /// Represents a validated recipe that could not be rendered.
    #[error(transparent)]
    ResponseCreate(#[from] ResponseCreateError),

    /// Represents an SQL error.
    #[error("SQLx error")]
    Sqlx { source: sqlx::Error },

    /// Represents a failure to apply the database migrations.
    #[error("Migration error")]
    Migration { source: sqlx::migrate::MigrateError },

    /// Represents a stored category code with no corresponding category.
    #[error("Unknown stored category code {0}")]
    UnknownCategoryCode(i64),

    /// Represents a stored platform ID that is not a `u64`.
    #[error("Stored author ID {0:?} is not a valid user ID")]
    MalformedAuthorId(String),

    /// Represents a lookup for a recipe that does not exist.
    #[error("There is no recipe with ID {0}")]
    NonExistentRecipe(i64),

    /// Represents a lookup for an author who never saved a recipe.
    #[error("You have not saved any recipes")]
    NonExistentAuthor(u64),

    /// Represents an attempt to change a recipe owned by someone else.
    #[error("Only the author of recipe {0} can do that")]
    NotRecipeAuthor(i64),

    /// Represents a modal submitted for an attachment that has expired.
    #[error("The attached image expired, please run the command again")]
    ExpiredAttachment,

    /// Represents a modal submitted for an attachment another user made.
    #[error("That image was attached by someone else, please run the command yourself")]
    ForeignAttachment,

    /// Represents a command this bot does not know about.
    #[error("Unknown command {0:?}")]
    UnknownCommand(String),

    /// Represents an interaction type this bot does not handle.
    #[error("Unsupported interaction type {0}")]
    UnsupportedInteraction(u8),

    /// Represents an interaction body that is not valid JSON.
    #[error("Malformed interaction")]
    MalformedInteraction(#[source] serde_json::Error),

    /// Represents a request without the signature headers.
    #[error("Missing request signature")]
    MissingSignature,

    /// Represents a request whose signature does not verify.
    #[error("Invalid request signature")]
    InvalidSignature,

    /// Represents a public key that cannot be used for verification.
    #[error("Invalid public key")]
    InvalidPublicKey,
}

impl BotError {
    /// Whether the message of this error is meant to be shown to the
    /// user who triggered it.
    pub fn is_user_facing(&self) -> bool {
        use BotError::*;

        matches!(
            self,
            Argument(..)
                | ModelCreate(..)
                | ResponseCreate(..)
                | NonExistentRecipe(..)
                | NonExistentAuthor(..)
                | NotRecipeAuthor(..)
                | ExpiredAttachment
                | ForeignAttachment
        )
    }
}

/// Enumerates errors caused by missing or malformed input.
#[derive(Debug, Error)]
pub enum ArgumentError {
    #[error("{name} must not be empty")]
    Blank { name: &'static str },

    #[error("{value:?} is not a valid {kind}")]
    InvalidEnum { kind: &'static str, value: String },

    #[error("{name} {value:?} is not a valid URL")]
    InvalidUrl {
        name: &'static str,
        value: String,
        source: url::ParseError,
    },

    #[error("Attachment {filename:?} is not an image")]
    NotAnImage {
        filename: String,
        content_type: Option<String>,
    },

    #[error("Missing option {0:?}")]
    MissingOption(&'static str),

    #[error("Option {name:?} has the wrong type")]
    WrongOptionType { name: &'static str },
}

/// Raised when a recipe violates one of the configured limits.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct ModelCreateError {
    message: String,
}

impl ModelCreateError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Raised when a validated recipe is rejected by the embed builder.
#[derive(Debug, Error)]
#[error("Response could not be determined: {source}")]
pub struct ResponseCreateError {
    #[from]
    source: EmbedError,
}

pub(crate) fn map_sqlx_error(source: sqlx::Error) -> BotError {
    BotError::Sqlx { source }
}
