use std::error::Error;
use std::sync::Arc;

use futures::future::FutureExt;
use time::UtcOffset;
use warp::Filter;

use log::{info, initialize_logger};
use recipebot::commands::{Bot, WeekendBot};
use recipebot::config::{get_variable, get_variable_or, parse_variable};
use recipebot::environment::Environment;
use recipebot::platform::SignatureVerifier;
use recipebot::routes;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    dotenv::dotenv().ok();

    let logger = initialize_logger(WeekendBot::NAME);

    let port: u16 = parse_variable("WEEKENDBOT_PORT");
    let offset_hours: i8 = get_variable_or("WEEKENDBOT_UTC_OFFSET_HOURS", 0);
    let offset = UtcOffset::from_hms(offset_hours, 0, 0)?;

    info!(logger, "Starting..."; "port" => port, "utc_offset" => %offset);
    let logger = Arc::new(logger);

    let verifier = Arc::new(SignatureVerifier::from_hex(&get_variable("WEEKENDBOT_PUBLIC_KEY"))?);
    let environment = Environment::new(logger.clone(), verifier, WeekendBot::new(offset));

    let should_terminate = tokio::signal::ctrl_c().map(|_| ());

    let logger2 = logger.clone();
    let routes = routes::make_interactions_route(environment.clone())
        .or(routes::admin::make_healthz_route(environment))
        .recover(move |r| routes::format_rejection(logger2.clone(), r));

    let (_, server) = warp::serve(routes).bind_with_graceful_shutdown(([0, 0, 0, 0], port), should_terminate);

    server.await;

    info!(logger, "Exiting gracefully...");

    Ok(())
}
