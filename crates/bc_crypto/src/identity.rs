//! Alias-bound identity key pair.
//!
//! Exactly one `Identity` exists per alias in a given client. The
//! private half lives inside the provider for the lifetime of the
//! process; no operation here (or anywhere) exposes raw private key
//! bytes, and the private handle is never cloned — concurrent callers
//! borrow the `Identity` instead.

use std::fmt;
use std::sync::Arc;

use crate::alias::Alias;
use crate::error::CryptoError;
use crate::jwk::PublicKeyRecord;
use crate::provider::{CryptoProvider, PrivateKeyHandle, PublicKeyHandle};

pub struct Identity {
    alias: Alias,
    provider: Arc<dyn CryptoProvider>,
    public: PublicKeyHandle,
    private: PrivateKeyHandle,
}

impl fmt::Debug for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Identity")
            .field("alias", &self.alias)
            .field("public", &self.public)
            .finish_non_exhaustive()
    }
}

impl Identity {
    /// Generate a fresh 4096-bit RSA-OAEP (SHA-256) key pair bound to
    /// `alias`, using the injected provider capability.
    pub async fn generate(
        provider: Arc<dyn CryptoProvider>,
        alias: Alias,
    ) -> Result<Self, CryptoError> {
        let (public, private) = provider.generate_key_pair().await?;
        Ok(Self { alias, provider, public, private })
    }

    pub fn alias(&self) -> &Alias {
        &self.alias
    }

    /// Export the public half as a canonical, validated record.
    ///
    /// A malformed export is fatal — the one permitted correction is
    /// defaulting an absent `use` to `"enc"` before re-validation.
    pub async fn public_record(&self) -> Result<PublicKeyRecord, CryptoError> {
        let export = self.provider.export_public_jwk(&self.public).await?;
        PublicKeyRecord::from_export(export)
    }

    /// Encrypt under this identity's OWN public key. Self-test path
    /// only; messages to a peer are sealed against the peer's resolved
    /// record instead.
    pub async fn encrypt(&self, plaintext: &[u8]) -> Result<Vec<u8>, CryptoError> {
        Ok(self.provider.encrypt(&self.public, plaintext).await?)
    }

    /// Decrypt under this identity's private key.
    ///
    /// Any provider rejection — wrong key, corrupted input — surfaces
    /// as [`CryptoError::DecryptionFailure`]. Partial plaintext is
    /// never returned.
    pub async fn decrypt(&self, ciphertext: &[u8]) -> Result<Vec<u8>, CryptoError> {
        self.provider
            .decrypt(&self.private, ciphertext)
            .await
            .map_err(|_| CryptoError::DecryptionFailure)
    }
}
