//! Alias → public key directory client.

use reqwest::StatusCode;

use bc_crypto::{Alias, PublicKeyRecord};
use bc_proto::api::{LookupResponse, RegisterRequest};

use crate::config::RelayConfig;
use crate::error::{unexpected_status, ClientError};

#[derive(Debug, Clone)]
pub struct DirectoryClient {
    http: reqwest::Client,
    base_url: String,
}

impl DirectoryClient {
    pub fn new(config: &RelayConfig) -> Self {
        Self {
            http: config.build_http(),
            base_url: config.trimmed_base_url(),
        }
    }

    /// Register `alias` under `record`.
    ///
    /// Non-idempotent: the directory rejects a second registration for
    /// the same alias even with an identical key, and the first
    /// registered record stays authoritative. Success is confirmed by
    /// the service — nothing is cached tentatively on the client.
    #[tracing::instrument(skip(self, record), name = "register alias")]
    pub async fn register(
        &self,
        alias: &Alias,
        record: &PublicKeyRecord,
    ) -> Result<(), ClientError> {
        let body = RegisterRequest {
            alias: alias.clone(),
            public_key: record.clone(),
        };
        let res = self
            .http
            .post(format!("{}/api/register", self.base_url))
            .json(&body)
            .send()
            .await?;
        let status = res.status();
        if status.is_success() {
            return Ok(());
        }
        match status {
            StatusCode::CONFLICT => Err(ClientError::AliasConflict(alias.to_string())),
            _ => Err(unexpected_status(res).await),
        }
    }

    /// Resolve `alias` to its registered record.
    ///
    /// A miss is `Ok(None)`, never an error. The body deserializes
    /// straight into the strict record type, so a key the directory
    /// hands back is validated before it can reach encryption.
    #[tracing::instrument(skip(self), name = "lookup alias key")]
    pub async fn lookup(&self, alias: &Alias) -> Result<Option<PublicKeyRecord>, ClientError> {
        let res = self
            .http
            .get(format!("{}/api/registry/{}", self.base_url, alias))
            .send()
            .await?;
        let status = res.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(unexpected_status(res).await);
        }
        let body: LookupResponse = res.json().await?;
        Ok(Some(body.public_key))
    }

    /// Fuzzy alias search. Order is the server's similarity ranking and
    /// is preserved as-is; an empty result is a valid answer.
    #[tracing::instrument(skip(self), name = "alias fuzzy search")]
    pub async fn search(&self, term: &str) -> Result<Vec<String>, ClientError> {
        let res = self
            .http
            .get(format!("{}/api/search/alias", self.base_url))
            .query(&[("alias", term)])
            .send()
            .await?;
        if !res.status().is_success() {
            return Err(unexpected_status(res).await);
        }
        Ok(res.json().await?)
    }
}
