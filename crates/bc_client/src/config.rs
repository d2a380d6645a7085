//! Relay endpoint configuration shared by both clients.

use serde::Deserialize;

pub const DEFAULT_USER_AGENT: &str = concat!("blindchannel-client/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone, Deserialize)]
pub struct RelayConfig {
    /// Base URL of the relay, e.g. `https://relay.example.org`.
    pub base_url: String,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.into()
}

impl RelayConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            user_agent: default_user_agent(),
        }
    }

    pub(crate) fn build_http(&self) -> reqwest::Client {
        reqwest::Client::builder()
            .user_agent(&self.user_agent)
            .build()
            .expect("reqwest client")
    }

    pub(crate) fn trimmed_base_url(&self) -> String {
        self.base_url.trim_end_matches('/').to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_agent_defaults_when_absent() {
        let config: RelayConfig =
            serde_json::from_str(r#"{"base_url":"http://localhost:8000/"}"#).unwrap();
        assert_eq!(config.user_agent, DEFAULT_USER_AGENT);
        assert_eq!(config.trimmed_base_url(), "http://localhost:8000");
    }
}
