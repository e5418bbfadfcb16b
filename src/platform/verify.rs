use std::convert::TryInto;

use ed25519_dalek::{Signature, Verifier, VerifyingKey};

use crate::errors::BotError;

pub const SIGNATURE_HEADER: &str = "x-signature-ed25519";
pub const TIMESTAMP_HEADER: &str = "x-signature-timestamp";

/// Checks that a request really comes from Discord, using the
/// application's public key.
#[derive(Clone, Debug)]
pub struct SignatureVerifier {
    key: VerifyingKey,
}

impl SignatureVerifier {
    /// Creates a verifier from the hex-encoded public key shown in the
    /// developer portal.
    pub fn from_hex(public_key: &str) -> Result<Self, BotError> {
        let bytes = hex::decode(public_key.trim()).map_err(|_| BotError::InvalidPublicKey)?;
        let bytes: [u8; 32] = bytes
            .as_slice()
            .try_into()
            .map_err(|_| BotError::InvalidPublicKey)?;
        let key = VerifyingKey::from_bytes(&bytes).map_err(|_| BotError::InvalidPublicKey)?;

        Ok(Self { key })
    }

    /// Verifies the hex-encoded signature over `timestamp || body`.
    pub fn verify(&self, signature: &str, timestamp: &str, body: &[u8]) -> Result<(), BotError> {
        let signature = hex::decode(signature).map_err(|_| BotError::InvalidSignature)?;
        let signature: [u8; 64] = signature
            .as_slice()
            .try_into()
            .map_err(|_| BotError::InvalidSignature)?;
        let signature = Signature::from_bytes(&signature);

        let mut message = Vec::with_capacity(timestamp.len() + body.len());
        message.extend_from_slice(timestamp.as_bytes());
        message.extend_from_slice(body);

        self.key
            .verify(&message, &signature)
            .map_err(|_| BotError::InvalidSignature)
    }
}
