//! The cryptography-provider capability.
//!
//! The asymmetric primitive is not implemented here. A [`CryptoProvider`]
//! is injected where identities are created, so tests can substitute the
//! deterministic [`crate::fake::FakeProvider`] and applications can plug
//! in whichever audited RSA-OAEP backend they trust.
//!
//! The trait contract mirrors a WebCrypto-style backend:
//! 4096-bit modulus, OAEP with SHA-256, public exponent 65537. Key
//! material stays inside the provider; callers hold only opaque handles.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::jwk::PublicKeyRecord;

/// RSA modulus size providers must generate, in bits.
pub const MODULUS_BITS: usize = 4096;
/// RSA-OAEP ciphertext size under a [`MODULUS_BITS`] key, in bytes.
pub const MODULUS_BYTES: usize = MODULUS_BITS / 8;

/// Provider-scoped key identifier. Random, with no relation to the key
/// material it names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyId(Uuid);

impl KeyId {
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }
}

/// Handle to a public key held by a provider. Cheap to clone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicKeyHandle(KeyId);

impl PublicKeyHandle {
    pub fn new(id: KeyId) -> Self {
        Self(id)
    }

    pub fn id(&self) -> KeyId {
        self.0
    }
}

/// Handle to a private key held by a provider.
///
/// Deliberately NOT `Clone`: a private handle has exactly one owner (its
/// [`crate::identity::Identity`]) and is only ever passed by reference.
#[derive(Debug, PartialEq, Eq)]
pub struct PrivateKeyHandle(KeyId);

impl PrivateKeyHandle {
    pub fn new(id: KeyId) -> Self {
        Self(id)
    }

    pub fn id(&self) -> KeyId {
        self.0
    }
}

/// Raw JWK export as produced by a provider, BEFORE validation.
///
/// Field values are untrusted strings and `use` may be absent.
/// [`PublicKeyRecord::from_export`] is the only path from here to a key
/// record usable for encryption.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportedJwk {
    pub kty: String,
    pub n: String,
    pub e: String,
    pub alg: String,
    #[serde(default, rename = "use", skip_serializing_if = "Option::is_none")]
    pub key_use: Option<String>,
}

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("key generation failed: {0}")]
    KeyGeneration(String),

    #[error("unknown key handle")]
    UnknownHandle,

    #[error("key export failed: {0}")]
    Export(String),

    #[error("key import failed: {0}")]
    Import(String),

    #[error("encryption failed: {0}")]
    Encrypt(String),

    #[error("decryption rejected")]
    Decrypt,
}

/// Asymmetric-crypto backend capability.
///
/// Every operation is one cancellable unit of work: dropping the future
/// abandons the call, the same way an HTTP request future is abandoned.
#[async_trait]
pub trait CryptoProvider: Send + Sync {
    /// Generate a fresh RSA-OAEP key pair (4096-bit modulus, SHA-256,
    /// exponent 65537).
    async fn generate_key_pair(
        &self,
    ) -> Result<(PublicKeyHandle, PrivateKeyHandle), ProviderError>;

    /// Export the public half as a raw JWK. The result is unvalidated;
    /// callers must pass it through [`PublicKeyRecord::from_export`].
    async fn export_public_jwk(&self, key: &PublicKeyHandle)
        -> Result<ExportedJwk, ProviderError>;

    /// Import a validated record, yielding a handle usable with
    /// [`CryptoProvider::encrypt`].
    async fn import_public_jwk(
        &self,
        record: &PublicKeyRecord,
    ) -> Result<PublicKeyHandle, ProviderError>;

    /// RSA-OAEP encrypt under `key`. Output length equals the modulus
    /// size, and repeated calls with equal input differ (OAEP is
    /// randomized).
    async fn encrypt(&self, key: &PublicKeyHandle, plaintext: &[u8])
        -> Result<Vec<u8>, ProviderError>;

    /// RSA-OAEP decrypt under `key`. Providers must reject wrong-key or
    /// tampered input outright; partial plaintext is never returned.
    async fn decrypt(&self, key: &PrivateKeyHandle, ciphertext: &[u8])
        -> Result<Vec<u8>, ProviderError>;
}
