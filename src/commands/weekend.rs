use std::sync::Arc;

use futures::future::{BoxFuture, FutureExt};
use log::Logger;
use time::{OffsetDateTime, UtcOffset};

use super::{unsupported, Bot};
use crate::errors::BotError;
use crate::platform::{Interaction, InteractionKind, InteractionResponse};
use crate::weekend::{describe, is_weekend, time_until_weekend};

pub type Clock = dyn Fn() -> OffsetDateTime + Send + Sync;

/// Answers questions about the weekend.
#[derive(Clone)]
pub struct WeekendBot {
    offset: UtcOffset,
    clock: Arc<Clock>,
}

impl Bot for WeekendBot {
    const NAME: &'static str = "weekend-bot";

    fn handle<'a>(
        &'a self,
        _logger: &'a Logger,
        interaction: &'a Interaction,
    ) -> BoxFuture<'a, Result<InteractionResponse, BotError>> {
        let now = (self.clock)();

        let result = match (interaction.kind(), interaction.command_name()) {
            (Some(InteractionKind::ApplicationCommand), Some("is-it-weekend")) => {
                Ok(InteractionResponse::message(if is_weekend(now, self.offset) {
                    "Yes, it is weekend!"
                } else {
                    "No, it is not weekend yet."
                }))
            }
            (Some(InteractionKind::ApplicationCommand), Some("time-until-weekend")) => {
                let remaining = time_until_weekend(now, self.offset);

                Ok(InteractionResponse::message(if remaining.is_zero() {
                    "It is already weekend!".to_owned()
                } else {
                    format!("The weekend starts in {}.", describe(remaining))
                }))
            }
            _ => Err(unsupported(interaction)),
        };

        async move { result }.boxed()
    }
}

impl WeekendBot {
    pub fn new(offset: UtcOffset) -> Self {
        Self::with_clock(offset, Arc::new(OffsetDateTime::now_utc))
    }

    pub fn with_clock(offset: UtcOffset, clock: Arc<Clock>) -> Self {
        Self { offset, clock }
    }
}
