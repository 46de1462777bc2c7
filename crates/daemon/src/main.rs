//! execd - Main Entry Point
//! Runs one configured executable per inbound TCP connection and sends
//! the captured output back to the client.

use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use execd_api_tcp::{TcpServer, TcpServerConfig};
use execd_core::AppError;
use execd_infra_process::SubprocessRunner;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Read the immutable startup configuration from the environment.
///
/// `EXECD_HOST` and `EXECD_PORT` fall back to the server defaults;
/// `EXECD_COMMAND` is required, there is no sensible default executable.
fn load_config() -> execd_core::Result<(TcpServerConfig, String)> {
    let mut config = TcpServerConfig::default();
    if let Ok(host) = std::env::var("EXECD_HOST") {
        config.host = host;
    }
    if let Ok(port) = std::env::var("EXECD_PORT") {
        config.port = port.parse().map_err(|_| {
            AppError::Config(format!("EXECD_PORT is not a valid port number: {port}"))
        })?;
    }
    let command = std::env::var("EXECD_COMMAND").map_err(|_| {
        AppError::Config("EXECD_COMMAND must name the executable to run per connection".to_string())
    })?;
    Ok((config, command))
}

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize logging
    let log_format = std::env::var("EXECD_LOG_FORMAT").unwrap_or_else(|_| "pretty".to_string());

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("execd=info"))
        .context("Failed to create env filter")?;

    match log_format.as_str() {
        "json" => {
            // Production: JSON structured logging
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().json())
                .init();
        }
        _ => {
            // Development: Pretty formatting with colors
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().pretty())
                .init();
        }
    }

    info!("execd v{} starting...", VERSION);

    // 2. Load configuration (read once at startup, immutable afterwards)
    let (config, command) = load_config()?;

    // 3. Setup dependencies (DI wiring)
    let runner = Arc::new(SubprocessRunner::new(command.clone()));
    let server = TcpServer::new(config, runner);

    // A bind failure is the one fatal error class: report it to the
    // operator and refuse to start
    let listener = match server.bind() {
        Ok(listener) => listener,
        Err(e @ AppError::Bind { .. }) => {
            error!(error = %e, "Cannot start: listening address unavailable");
            return Err(e.into());
        }
        Err(e) => return Err(e.into()),
    };

    info!(command = %command, "Ready. Serving one execution per connection");
    info!("Press Ctrl+C to shutdown");

    // 4. Serve until a fatal socket error or operator shutdown
    tokio::select! {
        result = server.serve(listener) => {
            result.context("Server loop terminated")?;
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Shutdown signal received. Exiting gracefully...");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    // Env vars are process-global, so all configuration cases run inside
    // one test to avoid cross-test races
    #[test]
    fn configuration_is_read_from_env_with_typed_errors() {
        std::env::remove_var("EXECD_HOST");
        std::env::remove_var("EXECD_PORT");
        std::env::remove_var("EXECD_COMMAND");

        // Missing command is a config error, not a panic
        assert!(matches!(load_config(), Err(AppError::Config(_))));

        std::env::set_var("EXECD_COMMAND", "/opt/tools/report");
        std::env::set_var("EXECD_PORT", "not-a-port");
        assert!(matches!(load_config(), Err(AppError::Config(_))));

        std::env::set_var("EXECD_HOST", "127.0.0.1");
        std::env::set_var("EXECD_PORT", "8080");
        let (config, command) = load_config().unwrap();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 8080);
        assert_eq!(command, "/opt/tools/report");

        // Defaults apply when host and port are unset
        std::env::remove_var("EXECD_HOST");
        std::env::remove_var("EXECD_PORT");
        let (config, _) = load_config().unwrap();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 44444);

        std::env::remove_var("EXECD_COMMAND");
    }
}
