//! Encryption envelope — what the relay sees.
//!
//! The relay is a dumb mailbox: it stores `(recipient, content,
//! sent_at)` and nothing else. `content` is RSA-OAEP ciphertext under
//! the recipient's long-lived public key, base64url-encoded without
//! padding. Sealing is NOT deterministic — OAEP is randomized, so two
//! seals of the same plaintext under the same key differ.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use bc_crypto::{CryptoError, CryptoProvider, Identity, PublicKeyRecord};

#[derive(Debug, Error)]
pub enum EnvelopeError {
    /// Not valid base64url, or decrypted to a non-UTF-8 byte sequence.
    #[error("malformed envelope: {0}")]
    MalformedEnvelope(String),

    #[error(transparent)]
    Crypto(#[from] CryptoError),
}

/// Transport-safe sealed message body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Envelope(String);

impl Envelope {
    /// Seal `plaintext` for the holder of `recipient`'s private key.
    ///
    /// The record has already been validated on its way in (export or
    /// lookup); the provider reconstructs the public key from it.
    pub async fn seal(
        provider: &dyn CryptoProvider,
        recipient: &PublicKeyRecord,
        plaintext: &str,
    ) -> Result<Self, EnvelopeError> {
        let key = provider
            .import_public_jwk(recipient)
            .await
            .map_err(CryptoError::from)?;
        let ciphertext = provider
            .encrypt(&key, plaintext.as_bytes())
            .await
            .map_err(CryptoError::from)?;
        Ok(Self(URL_SAFE_NO_PAD.encode(ciphertext)))
    }

    /// Open this envelope with the recipient's own identity.
    ///
    /// No fallback decoding is attempted: a failure to base64-decode,
    /// decrypt, or UTF-8 decode aborts with the corresponding error —
    /// garbled text is never surfaced as plaintext.
    pub async fn open(&self, identity: &Identity) -> Result<String, EnvelopeError> {
        let ciphertext = URL_SAFE_NO_PAD
            .decode(&self.0)
            .map_err(|e| EnvelopeError::MalformedEnvelope(format!("invalid base64url: {e}")))?;
        let plaintext = identity.decrypt(&ciphertext).await?;
        String::from_utf8(plaintext)
            .map_err(|e| EnvelopeError::MalformedEnvelope(format!("plaintext is not UTF-8: {e}")))
    }

    /// Wrap an envelope string that already came off the wire.
    pub fn from_encoded(encoded: impl Into<String>) -> Self {
        Self(encoded.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Envelope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
