use thiserror::Error;

use crate::provider::ProviderError;

#[derive(Debug, Error)]
pub enum CryptoError {
    #[error("cryptography provider failed: {0}")]
    Provider(#[from] ProviderError),

    #[error("malformed public key record: {0}")]
    MalformedKeyRecord(String),

    #[error("decryption failed (wrong key or corrupted ciphertext)")]
    DecryptionFailure,
}
