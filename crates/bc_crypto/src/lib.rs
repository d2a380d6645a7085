//! bc_crypto — BlindChannel client cryptographic identity
//!
//! # Design principles
//! - No custom asymmetric crypto: RSA-OAEP lives behind an injected
//!   [`CryptoProvider`] capability, never an ambient global.
//! - Private key material never leaves the provider; everything else in
//!   the crate deals in opaque handles.
//! - Public keys cross trust boundaries only as strictly validated
//!   [`PublicKeyRecord`]s. A record that fails validation is never
//!   usable for encryption.
//!
//! # Module layout
//! - `alias`    — validated public names
//! - `provider` — the cryptography-provider capability + opaque key handles
//! - `fake`     — deterministic in-memory provider for tests and local dev
//! - `jwk`      — canonical exported public-key record
//! - `identity` — alias-bound key pair
//! - `error`    — unified error type

pub mod alias;
pub mod error;
pub mod fake;
pub mod identity;
pub mod jwk;
pub mod provider;

pub use alias::Alias;
pub use error::CryptoError;
pub use fake::FakeProvider;
pub use identity::Identity;
pub use jwk::PublicKeyRecord;
pub use provider::{CryptoProvider, ProviderError};
