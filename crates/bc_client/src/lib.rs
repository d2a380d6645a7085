//! bc_client — HTTP clients for the BlindChannel relay
//!
//! Two clients, one service: [`DirectoryClient`] talks to the alias →
//! public-key registry, [`MailboxClient`] exchanges sealed envelopes.
//! Exactly two HTTP statuses are translated into domain results (409 →
//! alias conflict, 404 → alias/recipient not found); every other
//! failure propagates as a transport error, untouched, because the
//! client cannot safely infer intent from an unexpected status.
//!
//! No operation retries internally and none defines its own timeout;
//! callers race the returned futures against their own cancellation
//! signal.

pub mod config;
pub mod directory;
pub mod error;
pub mod mailbox;

pub use config::RelayConfig;
pub use directory::DirectoryClient;
pub use error::ClientError;
pub use mailbox::MailboxClient;
