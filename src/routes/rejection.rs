use serde::Serialize;
use warp::reject;

use crate::errors::BotError;

#[derive(Debug)]
pub struct Rejection {
    pub(crate) context: Context,
    pub(crate) error: BotError,
}

impl Rejection {
    pub fn new(context: Context, error: BotError) -> Self {
        Rejection { context, error }
    }

    pub fn flatten(&self) -> FlattenedRejection {
        FlattenedRejection {
            context: self.context.clone(),
            message: format!("{}", self.error),
        }
    }
}

impl reject::Reject for Rejection {}

/// Wraps an error into a warp rejection that [`super::format_rejection`]
/// knows how to format.
pub fn rejected(context: Context, error: BotError) -> reject::Rejection {
    reject::custom(Rejection::new(context, error))
}

#[derive(Debug, Serialize)]
pub struct FlattenedRejection {
    #[serde(flatten)]
    pub(crate) context: Context,
    pub(crate) message: String,
}

#[derive(Clone, Debug, Serialize)]
#[serde(untagged)]
pub enum Context {
    Healthz,
    Interaction { id: Option<String> },
}

impl Context {
    pub fn healthz() -> Context {
        Context::Healthz
    }

    pub fn interaction(id: Option<String>) -> Context {
        Context::Interaction { id }
    }
}
