//! Alias-addressed mailbox client.
//!
//! # Fetch ordering (pinned contract)
//! The relay orders a mailbox by `sent_at` ascending and applies
//! `limit` to that order: a fetch returns the OLDEST `limit` entries,
//! oldest first, truncating the newest. When `limit` is omitted the
//! server default (10) applies, and the server caps limits at 200. The
//! client assumes nothing beyond "consistent with `sent_at`" and never
//! re-sorts.

use reqwest::StatusCode;

use bc_crypto::Alias;
use bc_proto::api::{EncryptedMessage, PublishRequest};
use bc_proto::Envelope;

use crate::config::RelayConfig;
use crate::error::{unexpected_status, ClientError};

#[derive(Debug, Clone)]
pub struct MailboxClient {
    http: reqwest::Client,
    base_url: String,
}

impl MailboxClient {
    pub fn new(config: &RelayConfig) -> Self {
        Self {
            http: config.build_http(),
            base_url: config.trimmed_base_url(),
        }
    }

    /// Publish a sealed envelope to `recipient`'s mailbox.
    ///
    /// If the recipient alias has no directory entry the relay stores
    /// nothing and this returns [`ClientError::RecipientNotFound`].
    #[tracing::instrument(skip(self, envelope), name = "publish envelope")]
    pub async fn publish(
        &self,
        recipient: &Alias,
        envelope: &Envelope,
    ) -> Result<(), ClientError> {
        let body = PublishRequest {
            recipient: recipient.clone(),
            content: envelope.clone(),
        };
        let res = self
            .http
            .post(format!("{}/api/publish", self.base_url))
            .json(&body)
            .send()
            .await?;
        let status = res.status();
        if status.is_success() {
            return Ok(());
        }
        match status {
            StatusCode::NOT_FOUND => Err(ClientError::RecipientNotFound(recipient.to_string())),
            _ => Err(unexpected_status(res).await),
        }
    }

    /// Fetch envelopes addressed to `recipient`, at most `limit`.
    ///
    /// An unregistered recipient is [`ClientError::RecipientNotFound`]
    /// even if nothing was ever published to it — distinct from a
    /// registered alias with an empty mailbox, which is `Ok(vec![])`.
    #[tracing::instrument(skip(self), name = "fetch envelopes")]
    pub async fn fetch(
        &self,
        recipient: &Alias,
        limit: Option<u32>,
    ) -> Result<Vec<EncryptedMessage>, ClientError> {
        let mut request = self
            .http
            .get(format!("{}/api/messages", self.base_url))
            .query(&[("recipient", recipient.as_str())]);
        if let Some(limit) = limit {
            request = request.query(&[("limit", limit)]);
        }
        let res = request.send().await?;
        let status = res.status();
        if status == StatusCode::NOT_FOUND {
            return Err(ClientError::RecipientNotFound(recipient.to_string()));
        }
        if !status.is_success() {
            return Err(unexpected_status(res).await);
        }
        Ok(res.json().await?)
    }
}
