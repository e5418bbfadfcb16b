use std::sync::Arc;

use log::Logger;

use crate::platform::SignatureVerifier;

/// State shared by every request a bot serves. `B` is the bot itself,
/// holding whatever its commands need.
#[derive(Clone)]
pub struct Environment<B: Clone + Send + Sync> {
    pub logger: Arc<Logger>,
    pub verifier: Arc<SignatureVerifier>,
    pub bot: B,
}

impl<B: Clone + Send + Sync> Environment<B> {
    pub fn new(logger: Arc<Logger>, verifier: Arc<SignatureVerifier>, bot: B) -> Self {
        Self {
            logger,
            verifier,
            bot,
        }
    }
}
