//! bc_proto — wire types and the encryption envelope for BlindChannel
//!
//! Everything on the wire is JSON. The relay sees a ciphertext envelope,
//! a recipient alias, and a timestamp — nothing else.
//!
//! # Modules
//! - `envelope` — sealing and opening of ciphertext envelopes
//! - `api`      — request/response bodies shared with the relay

pub mod api;
pub mod envelope;

pub use api::EncryptedMessage;
pub use envelope::{Envelope, EnvelopeError};
