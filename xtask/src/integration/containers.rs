//! Container management for the DynamoDB Local integration suite.
//!
//! Follows the Functional Core - Imperative Shell pattern:
//!
//! - **Pure functions** build command arguments and the test environment.
//! - **I/O functions** execute container commands and poll health.

use std::time::Duration;

use tokio::process::Command;

use super::error::{IntegrationError, Result};

/// Container runtime (Docker or Podman).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ContainerRuntime {
    #[default]
    Docker,
    Podman,
}

/// Specification for a container.
#[derive(Debug, Clone)]
pub struct ContainerSpec {
    pub name: &'static str,
    pub image: &'static str,
    pub port: u16,
    pub command: Option<&'static str>,
    /// DynamoDB answers 400 to a bare GET once it is accepting requests.
    pub healthy_status: u16,
}

/// DynamoDB Local container specification.
///
/// Runs in-memory so every integration run starts from an empty store.
pub const DYNAMODB_SPEC: ContainerSpec = ContainerSpec {
    name: "authsession-dynamodb",
    image: "amazon/dynamodb-local:latest",
    port: 8000,
    command: Some("-jar DynamoDBLocal.jar -inMemory -sharedDb"),
    healthy_status: 400,
};

// ============================================================================
// Pure Functions (Functional Core)
// ============================================================================

/// Builds arguments for `docker run` / `podman run`.
pub fn container_run_args(spec: &ContainerSpec) -> Vec<String> {
    let mut args = vec![
        "run".to_string(),
        "--name".to_string(),
        spec.name.to_string(),
        "-d".to_string(),
        "-p".to_string(),
        format!("{}:{}", spec.port, spec.port),
        spec.image.to_string(),
    ];

    if let Some(cmd) = spec.command {
        args.extend(cmd.split_whitespace().map(String::from));
    }

    args
}

/// Environment for running the suite against a local container.
pub fn test_environment(spec: &ContainerSpec) -> Vec<(&'static str, String)> {
    vec![
        ("AWS_ENDPOINT_URL", format!("http://localhost:{}", spec.port)),
        ("AWS_REGION", "us-east-1".to_string()),
        ("AWS_ACCESS_KEY_ID", "test".to_string()),
        ("AWS_SECRET_ACCESS_KEY", "test".to_string()),
    ]
}

/// Returns the command name for the container runtime.
pub fn runtime_command(runtime: ContainerRuntime) -> &'static str {
    match runtime {
        ContainerRuntime::Docker => "docker",
        ContainerRuntime::Podman => "podman",
    }
}

// ============================================================================
// I/O Functions (Imperative Shell)
// ============================================================================

/// Detects which container runtime is available.
///
/// Checks Podman first when `prefer_podman` is set, Docker first otherwise.
pub async fn detect_runtime(prefer_podman: bool) -> Result<ContainerRuntime> {
    let check_order = if prefer_podman {
        [ContainerRuntime::Podman, ContainerRuntime::Docker]
    } else {
        [ContainerRuntime::Docker, ContainerRuntime::Podman]
    };

    for runtime in check_order {
        let output = Command::new(runtime_command(runtime))
            .arg("--version")
            .output()
            .await;

        if let Ok(output) = output {
            if output.status.success() {
                return Ok(runtime);
            }
        }
    }

    Err(IntegrationError::DockerNotAvailable(
        "Neither docker nor podman found in PATH".to_string(),
    ))
}

/// Returns true if a container with this name is running.
pub async fn is_running(runtime: ContainerRuntime, name: &str) -> Result<bool> {
    let output = Command::new(runtime_command(runtime))
        .args(["ps", "-q", "-f", &format!("name={}", name)])
        .output()
        .await?;

    Ok(!String::from_utf8_lossy(&output.stdout).trim().is_empty())
}

/// Stops and removes a container.
///
/// Errors are ignored since the container might not exist.
pub async fn stop_container(runtime: ContainerRuntime, name: &str) -> Result<()> {
    let cmd = runtime_command(runtime);

    let _ = Command::new(cmd).args(["stop", name]).output().await;
    let _ = Command::new(cmd).args(["rm", name]).output().await;

    Ok(())
}

/// Starts a container, replacing any stopped one with the same name.
pub async fn start_container(runtime: ContainerRuntime, spec: &ContainerSpec) -> Result<()> {
    stop_container(runtime, spec.name).await?;

    let output = Command::new(runtime_command(runtime))
        .args(container_run_args(spec))
        .output()
        .await?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(IntegrationError::ContainerFailed(format!(
            "Failed to start container '{}': {}",
            spec.name, stderr
        )));
    }

    Ok(())
}

/// Polls the container's HTTP port until it answers or the timeout elapses.
pub async fn wait_for_health(spec: &ContainerSpec, timeout: Duration) -> Result<()> {
    let start = std::time::Instant::now();
    let poll_interval = Duration::from_millis(500);
    let url = format!("http://localhost:{}/", spec.port);
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(2))
        .build()
        .map_err(|e| IntegrationError::ContainerFailed(e.to_string()))?;

    while start.elapsed() < timeout {
        if let Ok(response) = client.get(&url).send().await {
            if response.status().as_u16() == spec.healthy_status {
                return Ok(());
            }
        }
        tokio::time::sleep(poll_interval).await;
    }

    Err(IntegrationError::ContainerNotHealthy {
        name: spec.name.to_string(),
        timeout_secs: timeout.as_secs(),
    })
}
