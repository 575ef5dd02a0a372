//! Integration test infrastructure.
//!
//! Runs the `dynamodb_local` test suite of `authsession_store` against a
//! DynamoDB Local container.
//!
//! # Usage
//!
//! ```bash
//! # Start DynamoDB Local, run the suite, stop the container
//! cargo xtask integration
//!
//! # Use an already running DynamoDB Local on port 8000
//! cargo xtask integration --no-docker
//! ```

pub mod containers;
pub mod error;

pub use error::{IntegrationError, Result};

use std::time::Duration;

use crate::prelude::*;
use containers::{
    detect_runtime, is_running, start_container, stop_container, test_environment,
    wait_for_health, ContainerRuntime, DYNAMODB_SPEC,
};

/// Integration test command.
#[derive(Debug, clap::Parser)]
#[command(long_about = "Run integration tests against DynamoDB Local.

This command starts a DynamoDB Local container (docker or podman), waits
for it to accept requests, runs the session repository integration suite
against it, and stops the container afterward.")]
pub struct IntegrationCommand {
    /// Skip container management (assume DynamoDB Local is already running).
    #[arg(long)]
    pub no_docker: bool,

    /// Keep the container running after tests complete.
    #[arg(long)]
    pub keep_containers: bool,

    /// Prefer podman over docker.
    #[arg(long)]
    pub podman: bool,

    /// Timeout in seconds for container health checks.
    #[arg(long, default_value = "30")]
    pub health_timeout: u64,
}

/// Main entry point for integration command.
pub async fn run(command: IntegrationCommand, global: crate::Global) -> Result<()> {
    if !global.is_silent() {
        aprintln!("{}", p_b("Integration Tests"));
        aprintln!();
    }

    let runtime = if command.no_docker {
        if !global.is_silent() {
            aprintln!(
                "{} {}",
                p_y("⚠️"),
                "Skipping DynamoDB container management (--no-docker)"
            );
        }
        None
    } else {
        Some(detect_runtime(command.podman).await?)
    };

    let started = match runtime {
        Some(rt) => start_dynamodb_container(rt, command.health_timeout, &global).await?,
        None => false,
    };

    let passed = run_suite(&global).await;

    if let Some(rt) = runtime.filter(|_| started) {
        if command.keep_containers {
            if !global.is_silent() {
                aprintln!(
                    "{} {}",
                    p_y("⚠️"),
                    "Container left running (--keep-containers)"
                );
            }
        } else {
            if !global.is_silent() {
                aprintln!("{} {}", p_b("🐳"), "Stopping DynamoDB Local container...");
            }
            stop_container(rt, DYNAMODB_SPEC.name).await?;
        }
    }

    aprintln!();
    if passed? {
        aprintln!("{} {}", p_g("✅"), p_g("All integration tests passed!"));
        Ok(())
    } else {
        aprintln!("{} {}", p_r("❌"), p_r("Some integration tests failed"));
        Err(IntegrationError::TestFailed(
            "dynamodb_local suite failed".to_string(),
        ))
    }
}

/// Start the DynamoDB Local container. Returns false if one was already running.
async fn start_dynamodb_container(
    runtime: ContainerRuntime,
    timeout_secs: u64,
    global: &crate::Global,
) -> Result<bool> {
    if is_running(runtime, DYNAMODB_SPEC.name).await? {
        if !global.is_silent() {
            aprintln!(
                "{} {}",
                p_y("⚠️"),
                "DynamoDB Local container already running"
            );
        }
        return Ok(false);
    }

    if !global.is_silent() {
        aprintln!("{} {}", p_b("🐳"), "Starting DynamoDB Local container...");
    }
    start_container(runtime, &DYNAMODB_SPEC).await?;

    if !global.is_silent() {
        aprintln!(
            "{} {}",
            p_b("⏳"),
            format!("Waiting for container health (max {}s)...", timeout_secs)
        );
    }
    wait_for_health(&DYNAMODB_SPEC, Duration::from_secs(timeout_secs)).await?;

    if !global.is_silent() {
        aprintln!("{} {}", p_g("✅"), "DynamoDB Local is ready");
    }

    Ok(true)
}

/// Run the integration suite. Returns whether it passed.
async fn run_suite(global: &crate::Global) -> Result<bool> {
    if !global.is_silent() {
        aprintln!(
            "{} {}",
            p_b("🔧"),
            p_b("Running DynamoDB integration tests...")
        );
    }

    let mut cmd = tokio::process::Command::new("cargo");
    cmd.args([
        "test",
        "-p",
        "authsession_store",
        "--features",
        "dynamodb",
        "--test",
        "dynamodb_local",
    ]);
    if global.is_verbose() {
        cmd.args(["--", "--nocapture"]);
    }
    for (key, value) in test_environment(&DYNAMODB_SPEC) {
        cmd.env(key, value);
    }

    let status = cmd.status().await?;
    tracing::debug!(?status, "Integration suite finished");

    Ok(status.success())
}
