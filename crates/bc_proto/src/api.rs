//! API request/response types shared with the relay.
//! These map directly to JSON bodies on the wire.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use bc_crypto::{Alias, PublicKeyRecord};

use crate::envelope::Envelope;

/// POST /api/register
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub alias: Alias,
    #[serde(rename = "publicKey")]
    pub public_key: PublicKeyRecord,
}

/// GET /api/registry/{alias} success body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LookupResponse {
    #[serde(rename = "publicKey")]
    pub public_key: PublicKeyRecord,
}

/// POST /api/publish
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublishRequest {
    pub recipient: Alias,
    pub content: Envelope,
}

/// One stored mailbox entry, as returned by GET /api/messages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncryptedMessage {
    /// Sealed envelope — opaque to the relay.
    pub content: Envelope,

    /// Storage timestamp, assigned by the relay.
    #[serde(rename = "sentAt")]
    pub sent_at: DateTime<Utc>,
}
