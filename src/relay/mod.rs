//! Sync-trigger relay
//!
//! Forwards one authenticated `POST` to the target application's
//! orchestrate-sync endpoint and hands back the decoded JSON body. There is no
//! retry, no backoff and no idempotency key: each call to
//! [`SyncTrigger::trigger`] issues at most one request, and the scheduler that
//! invokes it owns the retry policy.

pub mod config;
pub mod error;

use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value;
use std::sync::Arc;
use uuid::Uuid;

pub use config::{RelayConfig, ValidConfig, ORCHESTRATE_SYNC_PATH};
pub use error::{ErrorKind, RelayError};

use crate::task::{Task, TaskError};
use crate::telemetry::{Invocation, InvocationOutcome, Telemetry};

/// Relay client wrapper around reqwest::Client
#[derive(Clone)]
pub struct SyncTrigger {
    /// The underlying HTTP client
    pub(crate) client: reqwest::Client,
    pub(crate) config: RelayConfig,
    /// Optional sink for invocation records
    pub(crate) telemetry: Option<Arc<dyn Telemetry>>,
}

impl SyncTrigger {
    /// Create a relay with a fresh HTTP client.
    pub fn new(config: RelayConfig) -> Self {
        Self::with_client(reqwest::Client::new(), config)
    }

    /// Create a relay on top of an existing HTTP client (shared pools, custom TLS, timeouts).
    pub fn with_client(client: reqwest::Client, config: RelayConfig) -> Self {
        SyncTrigger {
            client,
            config,
            telemetry: None,
        }
    }

    /// Create a relay configured from `SYNC_TARGET_URL` and `SYNC_TARGET_API_KEY`.
    pub fn from_env() -> Self {
        Self::new(RelayConfig::from_env())
    }

    /// Attach a sink that receives one [`Invocation`] per call to [`trigger`](Self::trigger).
    pub fn with_telemetry(mut self, telemetry: Arc<dyn Telemetry>) -> Self {
        self.telemetry = Some(telemetry);
        self
    }

    pub fn config(&self) -> &RelayConfig {
        &self.config
    }

    /// Fire the sync trigger once.
    ///
    /// # Returns
    /// * `Ok(value)` - the target answered 2xx with a JSON body
    /// * `Err(RelayError::Configuration)` - URL or key missing; no request was sent
    /// * `Err(RelayError::Upstream)` - the target answered outside 2xx
    /// * `Err(RelayError::Decoding)` - 2xx, but the body is not JSON
    /// * `Err(RelayError::Transport)` - the request never got a response
    pub async fn trigger(&self) -> Result<Value, RelayError> {
        let id = Uuid::new_v4();
        let started_at = Utc::now();

        let endpoint = self.config.validate().ok().map(|valid| valid.endpoint());
        let result = self.send().await;

        match &result {
            Ok(_) => log::info!("Sync trigger {} relayed to {:?}", id, endpoint),
            Err(e @ RelayError::Configuration(_)) => log::error!("Sync trigger {}: {}", id, e),
            Err(e) => log::warn!("Sync trigger {} to {:?} failed: {}", id, endpoint, e),
        }

        if let Some(telemetry) = &self.telemetry {
            let outcome = match &result {
                Ok((status, _)) => InvocationOutcome::Succeeded { status: *status },
                Err(e) => InvocationOutcome::Failed {
                    kind: e.kind(),
                    message: e.to_string(),
                },
            };
            telemetry.record(Invocation {
                id,
                endpoint,
                started_at,
                finished_at: Utc::now(),
                outcome,
            });
            telemetry.flush();
        }

        result.map(|(_, body)| body)
    }

    /// validate -> call -> classify. Returns the success status with the body.
    async fn send(&self) -> Result<(u16, Value), RelayError> {
        let valid = self.config.validate()?;
        let url = valid.endpoint();
        log::debug!("POST {}", url);

        let response = self
            .client
            .post(url.as_str())
            .header("Authorization", format!("Bearer {}", valid.api_key))
            .header("Content-Type", "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let status_text = status
                .canonical_reason()
                .map(str::to_string)
                .unwrap_or_else(|| status.as_str().to_string());
            return Err(RelayError::Upstream {
                status: status.as_u16(),
                status_text,
            });
        }

        let body = response.text().await?;
        let value: Value = serde_json::from_str(&body)?;
        Ok((status.as_u16(), value))
    }
}

impl std::fmt::Debug for SyncTrigger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SyncTrigger")
            .field("config", &self.config)
            .field("telemetry", &self.telemetry.is_some())
            .finish()
    }
}

#[async_trait]
impl Task for SyncTrigger {
    fn name(&self) -> &str {
        "orchestrate-sync"
    }

    async fn run(&self) -> Result<Value, TaskError> {
        self.trigger()
            .await
            .map_err(|e| TaskError::new(self.name(), e))
    }
}
