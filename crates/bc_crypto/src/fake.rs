//! Deterministic in-memory provider for tests and local development.
//!
//! Mimics the observable contract of a WebCrypto RSA-OAEP backend
//! without real RSA: fixed-size ciphertext (512 bytes, the 4096-bit
//! modulus size), randomized output, and hard rejection of wrong-key or
//! tampered input.
//!
//! A "key pair" is a single 512-byte pad; the public record carries the
//! pad itself as the modulus, so a record exported by one provider
//! instance can be imported and sealed against by another — the same
//! way a real modulus travels between clients.
//!
//! Block layout before XOR with the pad:
//!   [ len: u32 LE | plaintext | random filler | keyed BLAKE3 tag (32 bytes) ]

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use parking_lot::RwLock;
use rand::rngs::OsRng;
use rand::RngCore;
use zeroize::Zeroizing;

use crate::jwk::PublicKeyRecord;
use crate::provider::{
    CryptoProvider, ExportedJwk, KeyId, PrivateKeyHandle, ProviderError, PublicKeyHandle,
    MODULUS_BYTES,
};

const HEADER_LEN: usize = 4;
const TAG_LEN: usize = 32;
/// RSA-OAEP/SHA-256 plaintext ceiling for a 4096-bit key.
const MAX_PLAINTEXT: usize = MODULUS_BYTES - 2 - 2 * 32;

type Pad = Arc<Zeroizing<Vec<u8>>>;

#[derive(Default)]
pub struct FakeProvider {
    keys: RwLock<HashMap<KeyId, Pad>>,
    omit_use: bool,
}

impl FakeProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Provider variant that leaves `use` out of exports, the way some
    /// WebCrypto implementations do. Exercises the re-default path of
    /// record validation.
    pub fn omitting_use() -> Self {
        Self { omit_use: true, ..Self::default() }
    }

    fn pad(&self, id: KeyId) -> Result<Pad, ProviderError> {
        self.keys
            .read()
            .get(&id)
            .cloned()
            .ok_or(ProviderError::UnknownHandle)
    }

    fn tag(pad: &[u8], body: &[u8]) -> [u8; TAG_LEN] {
        let mut key = [0u8; 32];
        key.copy_from_slice(&pad[..32]);
        *blake3::keyed_hash(&key, body).as_bytes()
    }
}

#[async_trait]
impl CryptoProvider for FakeProvider {
    async fn generate_key_pair(
        &self,
    ) -> Result<(PublicKeyHandle, PrivateKeyHandle), ProviderError> {
        let mut pad = vec![0u8; MODULUS_BYTES];
        OsRng.fill_bytes(&mut pad);
        let pad: Pad = Arc::new(Zeroizing::new(pad));

        let public = PublicKeyHandle::new(KeyId::random());
        let private = PrivateKeyHandle::new(KeyId::random());
        let mut keys = self.keys.write();
        keys.insert(public.id(), Arc::clone(&pad));
        keys.insert(private.id(), pad);
        Ok((public, private))
    }

    async fn export_public_jwk(
        &self,
        key: &PublicKeyHandle,
    ) -> Result<ExportedJwk, ProviderError> {
        let pad = self.pad(key.id())?;
        Ok(ExportedJwk {
            kty: "RSA".into(),
            n: URL_SAFE_NO_PAD.encode(pad.as_slice()),
            e: "AQAB".into(),
            alg: "RSA-OAEP-256".into(),
            key_use: if self.omit_use { None } else { Some("enc".into()) },
        })
    }

    async fn import_public_jwk(
        &self,
        record: &PublicKeyRecord,
    ) -> Result<PublicKeyHandle, ProviderError> {
        let pad = URL_SAFE_NO_PAD
            .decode(record.n.as_str())
            .map_err(|e| ProviderError::Import(e.to_string()))?;
        if pad.len() != MODULUS_BYTES {
            return Err(ProviderError::Import(format!(
                "modulus must be {MODULUS_BYTES} bytes, got {}",
                pad.len()
            )));
        }
        let handle = PublicKeyHandle::new(KeyId::random());
        self.keys
            .write()
            .insert(handle.id(), Arc::new(Zeroizing::new(pad)));
        Ok(handle)
    }

    async fn encrypt(
        &self,
        key: &PublicKeyHandle,
        plaintext: &[u8],
    ) -> Result<Vec<u8>, ProviderError> {
        if plaintext.len() > MAX_PLAINTEXT {
            return Err(ProviderError::Encrypt(format!(
                "plaintext exceeds {MAX_PLAINTEXT} bytes"
            )));
        }
        let pad = self.pad(key.id())?;

        let mut block = vec![0u8; MODULUS_BYTES];
        block[..HEADER_LEN].copy_from_slice(&(plaintext.len() as u32).to_le_bytes());
        block[HEADER_LEN..HEADER_LEN + plaintext.len()].copy_from_slice(plaintext);
        // Random filler so two encryptions of equal plaintext differ,
        // matching OAEP's randomization.
        OsRng.fill_bytes(&mut block[HEADER_LEN + plaintext.len()..MODULUS_BYTES - TAG_LEN]);
        let tag = Self::tag(pad.as_slice(), &block[..MODULUS_BYTES - TAG_LEN]);
        block[MODULUS_BYTES - TAG_LEN..].copy_from_slice(&tag);

        for (b, p) in block.iter_mut().zip(pad.iter()) {
            *b ^= p;
        }
        Ok(block)
    }

    async fn decrypt(
        &self,
        key: &PrivateKeyHandle,
        ciphertext: &[u8],
    ) -> Result<Vec<u8>, ProviderError> {
        if ciphertext.len() != MODULUS_BYTES {
            return Err(ProviderError::Decrypt);
        }
        let pad = self.pad(key.id())?;

        let mut block = ciphertext.to_vec();
        for (b, p) in block.iter_mut().zip(pad.iter()) {
            *b ^= p;
        }
        let (body, tag) = block.split_at(MODULUS_BYTES - TAG_LEN);
        if Self::tag(pad.as_slice(), body)[..] != tag[..] {
            return Err(ProviderError::Decrypt);
        }
        let len = u32::from_le_bytes([body[0], body[1], body[2], body[3]]) as usize;
        if len > MAX_PLAINTEXT {
            return Err(ProviderError::Decrypt);
        }
        Ok(body[HEADER_LEN..HEADER_LEN + len].to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn ciphertext_has_modulus_size_and_is_randomized() {
        let provider = FakeProvider::new();
        let (public, _private) = provider.generate_key_pair().await.unwrap();
        let a = provider.encrypt(&public, b"same input").await.unwrap();
        let b = provider.encrypt(&public, b"same input").await.unwrap();
        assert_eq!(a.len(), MODULUS_BYTES);
        assert_eq!(b.len(), MODULUS_BYTES);
        assert_ne!(a, b, "two encryptions of equal plaintext must differ");
    }

    #[tokio::test]
    async fn round_trip_through_exported_record() {
        let alice = FakeProvider::new();
        let bob = FakeProvider::new();
        let (bob_public, bob_private) = bob.generate_key_pair().await.unwrap();
        let record =
            PublicKeyRecord::from_export(bob.export_public_jwk(&bob_public).await.unwrap())
                .unwrap();

        // Alice's provider never saw Bob's key pair; the record alone
        // must be enough to seal to him.
        let imported = alice.import_public_jwk(&record).await.unwrap();
        let ciphertext = alice.encrypt(&imported, b"cross-provider").await.unwrap();
        let plaintext = bob.decrypt(&bob_private, &ciphertext).await.unwrap();
        assert_eq!(plaintext, b"cross-provider");
    }

    #[tokio::test]
    async fn any_flipped_byte_is_rejected() {
        let provider = FakeProvider::new();
        let (public, private) = provider.generate_key_pair().await.unwrap();
        let ciphertext = provider.encrypt(&public, b"integrity").await.unwrap();
        for idx in [0, HEADER_LEN, 100, MODULUS_BYTES - TAG_LEN, MODULUS_BYTES - 1] {
            let mut corrupted = ciphertext.clone();
            corrupted[idx] ^= 0x80;
            assert!(
                provider.decrypt(&private, &corrupted).await.is_err(),
                "flip at {idx} was silently accepted"
            );
        }
    }

    #[tokio::test]
    async fn truncated_ciphertext_is_rejected() {
        let provider = FakeProvider::new();
        let (public, private) = provider.generate_key_pair().await.unwrap();
        let ciphertext = provider.encrypt(&public, b"short me").await.unwrap();
        assert!(provider
            .decrypt(&private, &ciphertext[..MODULUS_BYTES - 1])
            .await
            .is_err());
    }

    #[tokio::test]
    async fn oversized_plaintext_is_rejected() {
        let provider = FakeProvider::new();
        let (public, _private) = provider.generate_key_pair().await.unwrap();
        let big = vec![0u8; MAX_PLAINTEXT + 1];
        assert!(provider.encrypt(&public, &big).await.is_err());
    }

    #[tokio::test]
    async fn unknown_handle_is_rejected() {
        let provider = FakeProvider::new();
        let stray = PublicKeyHandle::new(KeyId::random());
        assert!(matches!(
            provider.encrypt(&stray, b"x").await,
            Err(ProviderError::UnknownHandle)
        ));
    }
}
