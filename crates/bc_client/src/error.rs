use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    /// 409 from registration: the alias already has a key. Registration
    /// is non-idempotent, so this fires even for an identical key.
    #[error("alias `{0}` is already registered")]
    AliasConflict(String),

    /// 404 from the mailbox: the alias has no directory entry.
    #[error("recipient `{0}` is not registered")]
    RecipientNotFound(String),

    /// Any status outside the documented contract, carried verbatim
    /// rather than mapped to a domain error.
    #[error("unexpected status {status} from relay: {body}")]
    UnexpectedStatus { status: StatusCode, body: String },

    #[error(transparent)]
    Transport(#[from] reqwest::Error),
}

/// Capture an out-of-contract response for the caller to inspect.
pub(crate) async fn unexpected_status(res: reqwest::Response) -> ClientError {
    let status = res.status();
    let body = res.text().await.unwrap_or_default();
    ClientError::UnexpectedStatus { status, body }
}
