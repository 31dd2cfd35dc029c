//! # Sigil
//!
//! Two small building blocks for the application shell:
//!
//! - **Identity gradients**: every identifier maps to a stable, three-stop diagonal
//!   gradient, so a workspace or user gets the same colors everywhere without storing them.
//! - **Sync-trigger relay**: a background task that forwards one authenticated request to
//!   the target application's orchestrate-sync endpoint (feature-gated behind `relay`).
//!
//! ## Quick Start
//!
//! ```rust
//! use sigil::gradient;
//!
//! let css = gradient::gradient_css("workspace-7f3a9c");
//! assert!(css.starts_with("linear-gradient(135deg, hsl(103, 70%, 20%)"));
//! ```
//!
//! ```rust,no_run
//! # #[cfg(feature = "relay")]
//! # async fn run() -> Result<(), sigil::RelayError> {
//! use sigil::{RelayConfig, SyncTrigger};
//!
//! let relay = SyncTrigger::new(RelayConfig::from_env());
//! let body = relay.trigger().await?;
//! println!("{}", body);
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Organization
//!
//! - [`gradient`]: Identifier to gradient derivation
//! - [`task`]: The unit-of-work trait schedulers invoke, plus a bounded concurrent batch
//! - `relay`: The orchestrate-sync relay (feature `relay`)
//! - `telemetry`: Invocation records and sinks (feature `relay`)

// ============================================================================
// Modules
// ============================================================================

pub mod gradient;
pub mod task;

#[cfg(feature = "relay")]
pub mod relay;

#[cfg(feature = "relay")]
pub mod telemetry;

// ============================================================================
// Public Re-exports
// ============================================================================

pub use gradient::{
    derive, derive_utf16, gradient_css, identity_hash, identity_hash_utf16, Gradient, Hsl,
};
pub use task::{Task, TaskBatch, TaskError};

#[cfg(feature = "relay")]
pub use relay::{ErrorKind, RelayConfig, RelayError, SyncTrigger};

#[cfg(feature = "relay")]
pub use telemetry::{Invocation, InvocationOutcome, MemoryTelemetry, Telemetry};

pub use serde_json::Value as JsonValue;

/// The main prelude: imports everything a scheduler or view layer needs.
///
/// # Example
/// ```rust
/// use sigil::prelude::*;
/// ```
pub mod prelude {
    pub use super::{derive, gradient_css, Gradient, Hsl, JsonValue, Task, TaskBatch, TaskError};

    #[cfg(feature = "relay")]
    pub use super::{
        ErrorKind, Invocation, InvocationOutcome, MemoryTelemetry, RelayConfig, RelayError,
        SyncTrigger, Telemetry,
    };
}

// ============================================================================
// Library Metadata
// ============================================================================

/// The version of this crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// The name of this crate.
pub const NAME: &str = env!("CARGO_PKG_NAME");
