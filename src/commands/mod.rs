//! Command handlers. Each bot implements [`Bot`]; [`respond`] wraps a
//! bot with the behaviour every bot shares.

use futures::future::{BoxFuture, FutureExt};
use log::{debug, error, o, warn, Logger};

use crate::errors::{ArgumentError, BotError};
use crate::platform::{Interaction, InteractionKind, InteractionResponse, User};

mod recipe;
mod weekend;

pub use recipe::RecipeBot;
pub use weekend::{Clock, WeekendBot};

/// Shown when something went wrong that the user cannot fix.
pub const GENERIC_ERROR: &str = "Something went wrong, please try again later.";

pub trait Bot: Clone + Send + Sync + 'static {
    /// The name recorded in every log entry.
    const NAME: &'static str;

    /// Handles any interaction other than a ping.
    fn handle<'a>(
        &'a self,
        logger: &'a Logger,
        interaction: &'a Interaction,
    ) -> BoxFuture<'a, Result<InteractionResponse, BotError>>;

    /// The number of recipes in the bot's store, for bots that have
    /// one. Errors if the store cannot be reached.
    fn stored_recipes(&self) -> BoxFuture<'_, Result<Option<i64>, BotError>> {
        async { Ok(None) }.boxed()
    }
}

/// Produces the reply to an interaction. Errors never escape: those
/// the user can act on are shown to them, everything else is logged
/// and replaced with [`GENERIC_ERROR`].
pub async fn respond<B: Bot>(bot: &B, logger: &Logger, interaction: &Interaction) -> InteractionResponse {
    if interaction.kind() == Some(InteractionKind::Ping) {
        debug!(logger, "Answering ping"; "interaction" => &interaction.id);
        return InteractionResponse::pong();
    }

    let logger = logger.new(o!(
        "interaction" => interaction.id.clone(),
        "command" => interaction.command_name().or_else(|| interaction.custom_id()).map(str::to_owned),
        "user" => interaction.invoker().map(|u| u.id.clone()),
    ));

    match bot.handle(&logger, interaction).await {
        Ok(response) => {
            debug!(logger, "Handled interaction"; "response_type" => response.kind);
            response
        }
        Err(e) if e.is_user_facing() => {
            warn!(logger, "Rejected interaction"; "error" => ?e, "message" => %e);
            InteractionResponse::ephemeral(e.to_string())
        }
        Err(e) => {
            error!(logger, "Failed to handle interaction"; "error" => ?e, "message" => %e);
            InteractionResponse::ephemeral(GENERIC_ERROR)
        }
    }
}

fn invoker(interaction: &Interaction) -> Result<&User, ArgumentError> {
    interaction.invoker().ok_or(ArgumentError::MissingOption("user"))
}

fn unsupported(interaction: &Interaction) -> BotError {
    match interaction.kind() {
        Some(InteractionKind::ApplicationCommand) => {
            BotError::UnknownCommand(interaction.command_name().unwrap_or_default().to_owned())
        }
        _ => BotError::UnsupportedInteraction(interaction.kind_code),
    }
}
