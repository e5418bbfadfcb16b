use std::error::Error;
use std::sync::Arc;

use futures::future::FutureExt;
use warp::Filter;

use log::{info, initialize_logger};
use recipebot::commands::{Bot, RecipeBot};
use recipebot::config::{get_variable, parse_variable};
use recipebot::db::SqliteDb;
use recipebot::environment::Environment;
use recipebot::limits::Limits;
use recipebot::pending::PendingAttachments;
use recipebot::platform::SignatureVerifier;
use recipebot::routes;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    dotenv::dotenv().ok();

    let logger = initialize_logger(RecipeBot::NAME);

    let main_port: u16 = parse_variable("RECIPEBOT_PORT");
    let admin_port: u16 = parse_variable("RECIPEBOT_ADMIN_PORT");

    info!(logger, "Starting..."; "main_port" => main_port, "admin_port" => admin_port);
    let logger = Arc::new(logger);

    let verifier = Arc::new(SignatureVerifier::from_hex(&get_variable("RECIPEBOT_PUBLIC_KEY"))?);

    let limits = Limits::from_env();
    info!(logger, "Using limits"; "limits" => ?limits);

    info!(logger, "Opening database...");
    let connection_string = get_variable("RECIPEBOT_DB_CONNECTION_STRING");
    let db = Arc::new(SqliteDb::connect(&connection_string).await?);

    let bot = RecipeBot::new(db, limits, Arc::new(PendingAttachments::default()));
    let environment = Environment::new(logger.clone(), verifier, bot);

    let should_terminate = tokio::signal::ctrl_c()
        .map(|_| ())
        .shared();

    let main_server = {
        let should_terminate = should_terminate.clone();
        let logger2 = logger.clone();

        let routes = routes::make_interactions_route(environment.clone())
            .recover(move |r| routes::format_rejection(logger2.clone(), r));

        let (_, main_server) =
            warp::serve(routes).bind_with_graceful_shutdown(([0, 0, 0, 0], main_port), should_terminate);

        main_server
    };

    let admin_server = {
        let should_terminate = should_terminate.clone();
        let logger2 = logger.clone();

        let routes = routes::admin::make_healthz_route(environment.clone())
            .recover(move |r| routes::format_rejection(logger2.clone(), r));

        let (_, admin_server) =
            warp::serve(routes).bind_with_graceful_shutdown(([0, 0, 0, 0], admin_port), should_terminate);

        admin_server
    };

    tokio::join!(main_server, admin_server);

    info!(logger, "Exiting gracefully...");

    Ok(())
}
