use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Mutex;
use uuid::Uuid;

use crate::relay::error::ErrorKind;

/// How a single relay invocation ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum InvocationOutcome {
    Succeeded { status: u16 },
    Failed { kind: ErrorKind, message: String },
}

/// Record of one outbound sync trigger. Carries no credential.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Invocation {
    pub id: Uuid,
    pub endpoint: Option<String>,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub outcome: InvocationOutcome,
}

impl Invocation {
    pub fn succeeded(&self) -> bool {
        matches!(self.outcome, InvocationOutcome::Succeeded { .. })
    }
}

/// Trait for recording relay invocations.
pub trait Telemetry: Send + Sync {
    fn record(&self, invocation: Invocation);
    /// Called once after every `record`.
    fn flush(&self);
}

/// Simple in-memory collector for invocations.
#[derive(Default)]
pub struct MemoryTelemetry {
    invocations: Mutex<Vec<Invocation>>,
}

impl MemoryTelemetry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn invocations(&self) -> Vec<Invocation> {
        self.invocations
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

impl Telemetry for MemoryTelemetry {
    fn record(&self, invocation: Invocation) {
        self.invocations
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(invocation);
    }

    fn flush(&self) {
        // No-op for memory collector
    }
}
