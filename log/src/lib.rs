use std::sync::Mutex;

use slog::Drain;
use slog::Fuse;
use slog_async::Async;
use slog_json::Json;

pub use slog::{debug, error, info, o, trace, warn, Logger};

/// Creates the root JSON logger for the named bot.
pub fn initialize_logger(bot: &'static str) -> Logger {
    let drain = Mutex::new(Json::default(std::io::stderr())).map(Fuse);

    #[cfg(feature = "env_logging")]
    let drain = slog_envlogger::new(drain).fuse();

    let drain = Async::new(drain).build().fuse();

    Logger::root(
        drain,
        o!("bot" => bot, "version" => info::VERSION, "revision" => info::REVISION, "build_timestamp" => info::BUILD_TIMESTAMP),
    )
}

/// A logger that drops everything, for tests and tools.
pub fn discard() -> Logger {
    Logger::root(slog::Discard, o!())
}
