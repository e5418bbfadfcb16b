use std::sync::Arc;

use log::{error, warn, Logger};
use warp::http::StatusCode;
use warp::reject;
use warp::reply::{json, with_status, Json, WithStatus};

use crate::errors::BotError;

pub mod admin;
mod handlers;
mod rejection;
mod response;

pub use internal::*;

/// Discord interaction payloads are small; anything larger than this
/// is not an interaction.
const MAX_CONTENT_LENGTH: u64 = 64 * 1024;

pub async fn format_rejection(
    logger: Arc<Logger>,
    rej: reject::Rejection,
) -> Result<WithStatus<Json>, reject::Rejection> {
    if let Some(r) = rej.find::<rejection::Rejection>() {
        let e = &r.error;
        let status = status_code_for(e);

        if status.is_server_error() {
            error!(logger, "Bot error"; "context" => ?r.context, "error" => ?e, "status" => %status, "message" => %e);
        } else {
            warn!(logger, "Refused request"; "context" => ?r.context, "error" => ?e, "status" => %status, "message" => %e);
        }

        return Ok(with_status(json(&r.flatten()), status));
    }

    Err(rej)
}

fn status_code_for(e: &BotError) -> StatusCode {
    use BotError::*;

    match e {
        MissingSignature | InvalidSignature => StatusCode::UNAUTHORIZED,
        MalformedInteraction(..) | Argument(..) => StatusCode::BAD_REQUEST,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

mod internal {
    use warp::filters::BoxedFilter;
    use warp::path::end;
    use warp::Filter;
    use warp::Reply;
    use warp::{body, header, path as p, post};

    use super::{handlers, MAX_CONTENT_LENGTH};
    use crate::commands::Bot;
    use crate::environment::Environment;
    use crate::platform::{SIGNATURE_HEADER, TIMESTAMP_HEADER};

    type Route = BoxedFilter<(Box<dyn Reply>,)>;

    /// `POST /interactions`, the endpoint Discord delivers interactions
    /// to.
    pub fn make_interactions_route<B: Bot>(environment: Environment<B>) -> Route {
        warp::any()
            .map(move || environment.clone())
            .and(p("interactions"))
            .and(end())
            .and(post())
            .and(header::optional::<String>(SIGNATURE_HEADER))
            .and(header::optional::<String>(TIMESTAMP_HEADER))
            .and(body::content_length_limit(MAX_CONTENT_LENGTH))
            .and(body::bytes())
            .and_then(handlers::interactions::<B>)
            .boxed()
    }
}
