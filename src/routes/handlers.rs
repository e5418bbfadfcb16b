use std::time::{Duration, Instant};

use bytes::Bytes;
use log::trace;
use warp::reply::{json, with_header, Reply};

use crate::commands::{respond, Bot};
use crate::environment::Environment;
use crate::errors::BotError;
use crate::platform::Interaction;
use crate::routes::rejection::{rejected, Context};

const SERVER_TIMING_HEADER: &str = "server-timing";
type RouteResult = Result<Box<dyn Reply>, warp::Rejection>;

macro_rules! timed {
    ($($expression:stmt);+) => {
        let start = Instant::now();

        let result = { $($expression)+ };

        Ok(Box::new(with_header(
            result,
            SERVER_TIMING_HEADER,
            format_server_timing(start.elapsed()),
        )) as Box<dyn Reply>)
    };
}

pub async fn interactions<B: Bot>(
    environment: Environment<B>,
    signature: Option<String>,
    timestamp: Option<String>,
    body: Bytes,
) -> RouteResult {
    timed! {
        let (signature, timestamp) = match (signature, timestamp) {
            (Some(signature), Some(timestamp)) => (signature, timestamp),
            _ => return Err(rejected(Context::interaction(None), BotError::MissingSignature)),
        };

        environment
            .verifier
            .verify(&signature, &timestamp, &body)
            .map_err(|e| rejected(Context::interaction(None), e))?;

        let interaction: Interaction = serde_json::from_slice(&body)
            .map_err(|e| rejected(Context::interaction(None), BotError::MalformedInteraction(e)))?;

        trace!(environment.logger, "Received interaction"; "id" => &interaction.id, "type" => interaction.kind_code);

        let response = respond(&environment.bot, &environment.logger, &interaction).await;

        json(&response)
    }
}

fn format_server_timing(elapsed: Duration) -> String {
    format!("handler;dur={}", elapsed.as_secs_f64() * 1000.0)
}
