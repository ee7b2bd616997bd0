//! Relay HTTP client
//!
//! Uses ureq (sync HTTP). Server handlers call it from the blocking pool.

use super::{NotifyError, NotifyResult, Relay, RelayPayload};
use crate::config::NotifyConfig;
use std::time::Duration;
use tracing::debug;

/// Relay scripts commonly answer with a redirect to the real response
const MAX_REDIRECTS: u32 = 5;

/// POSTs payloads to the configured relay URL
pub struct RelayClient {
    url: Option<String>,
    agent: ureq::Agent,
}

fn make_agent(timeout_secs: u64) -> ureq::Agent {
    ureq::config::Config::builder()
        .http_status_as_error(false)
        .max_redirects(MAX_REDIRECTS)
        .timeout_global(Some(Duration::from_secs(timeout_secs)))
        .build()
        .new_agent()
}

impl RelayClient {
    pub fn new(url: Option<String>, timeout_secs: u64) -> Self {
        let url = url.map(|u| u.trim().to_string()).filter(|u| !u.is_empty());
        Self {
            url,
            agent: make_agent(timeout_secs),
        }
    }

    pub fn from_config(config: &NotifyConfig) -> Self {
        Self::new(config.relay_url.clone(), config.timeout_secs)
    }

    pub fn is_configured(&self) -> bool {
        self.url.is_some()
    }
}

impl Relay for RelayClient {
    fn send(&self, payload: &RelayPayload) -> NotifyResult<()> {
        let url = self.url.as_deref().ok_or(NotifyError::NotConfigured)?;
        debug!("Sending {} payload to relay", payload.kind);

        let response = self
            .agent
            .post(url)
            .header("Content-Type", "application/json")
            .send_json(payload)
            .map_err(|e| NotifyError::Request(e.to_string()))?;

        let status = response.status().as_u16();
        if !(200..300).contains(&status) {
            let body = response.into_body().read_to_string().unwrap_or_default();
            return Err(NotifyError::Status { status, body });
        }
        Ok(())
    }
}
