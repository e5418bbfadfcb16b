use warp::filters::BoxedFilter;
use warp::reply::{json, Reply};
use warp::Filter;

use super::rejection::{rejected, Context};
use super::response::SuccessResponse;
use crate::commands::Bot;
use crate::environment::Environment;

/// `GET /healthz`: build information, plus the number of stored
/// recipes for bots that have a store. Fails if the store does.
pub fn make_healthz_route<B: Bot>(environment: Environment<B>) -> BoxedFilter<(Box<dyn Reply>,)> {
    warp::path("healthz")
        .and(warp::path::end())
        .and(warp::get())
        .and_then(move || {
            let environment = environment.clone();

            async move {
                let recipes = environment
                    .bot
                    .stored_recipes()
                    .await
                    .map_err(|e| rejected(Context::healthz(), e))?;

                Ok::<_, warp::Rejection>(Box::new(json(&SuccessResponse::Healthz {
                    bot: B::NAME,
                    revision: info::REVISION,
                    timestamp: info::BUILD_TIMESTAMP,
                    version: info::VERSION,
                    recipes,
                })) as Box<dyn Reply>)
            }
        })
        .boxed()
}
