//! Fires the orchestrate-sync trigger once, the way a scheduled job would.
//!
//! ```sh
//! SYNC_TARGET_URL=https://app.example.com SYNC_TARGET_API_KEY=... \
//!     RUST_LOG=debug cargo run --example trigger_sync -- workspace-7f3a9c
//! ```
//!
//! Any extra arguments are treated as identifiers and their gradients are printed
//! first, which is handy when checking what a workspace badge will look like.

use sigil::prelude::*;
use std::process::ExitCode;
use std::sync::Arc;

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    for identifier in std::env::args().skip(1) {
        println!("{:<24} {}", identifier, gradient_css(&identifier));
    }

    let telemetry = Arc::new(MemoryTelemetry::new());
    let relay = SyncTrigger::from_env().with_telemetry(telemetry.clone());

    let result = relay.trigger().await;

    for invocation in telemetry.invocations() {
        match serde_json::to_string(&invocation) {
            Ok(line) => println!("{}", line),
            Err(e) => log::warn!("could not serialize invocation record: {}", e),
        }
    }

    match result {
        Ok(body) => {
            println!("{}", body);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}
