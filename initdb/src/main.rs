//! A helper program to create the recipe database and apply the
//! migrations without starting the bot.

use std::env;
use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

use log::{debug, info, initialize_logger};

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();

    let logger = initialize_logger("initdb");
    let connection_string = env::var("RECIPEBOT_DB_CONNECTION_STRING")
        .expect("could not read RECIPEBOT_DB_CONNECTION_STRING");

    debug!(logger, "Connecting to database...");

    let options = SqliteConnectOptions::from_str(&connection_string)
        .expect("could not parse RECIPEBOT_DB_CONNECTION_STRING")
        .create_if_missing(true)
        .foreign_keys(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await
        .expect("could not connect to database");

    debug!(logger, "Running migrations...");
    let migrator = sqlx::migrate!("../migrations");
    migrator.run(&pool).await.expect("failed to run migrations");

    info!(logger, "Completed initialization."; "migrations" => migrator.iter().count());
}
