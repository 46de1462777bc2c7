//! TCP Server
//!
//! Owns the listening socket. Each accepted connection is handled on its
//! own task: the configured executable runs once and its formatted output
//! is written back before the connection closes.

use crate::connection;
use execd_core::port::ProcessRunner;
use execd_core::AppError;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::{TcpListener, TcpSocket};
use tracing::info;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 44444;
// Matches the listen backlog the service has always used
const DEFAULT_BACKLOG: u32 = 5;

/// TCP Server Configuration
#[derive(Debug, Clone)]
pub struct TcpServerConfig {
    pub host: String,
    pub port: u16,
    pub backlog: u32,
}

impl Default for TcpServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            backlog: DEFAULT_BACKLOG,
        }
    }
}

/// TCP Server
pub struct TcpServer {
    config: TcpServerConfig,
    runner: Arc<dyn ProcessRunner>,
}

impl TcpServer {
    pub fn new(config: TcpServerConfig, runner: Arc<dyn ProcessRunner>) -> Self {
        Self { config, runner }
    }

    /// Bind the listening socket.
    ///
    /// SO_REUSEADDR is set so a restarted server can reclaim the port
    /// immediately instead of failing with "address in use".
    ///
    /// # Errors
    /// - AppError::Bind if the address is invalid or already held
    pub fn bind(&self) -> Result<TcpListener, AppError> {
        let addr_str = format!("{}:{}", self.config.host, self.config.port);
        let addr: SocketAddr = addr_str.parse().map_err(|e| AppError::Bind {
            addr: addr_str.clone(),
            source: std::io::Error::new(std::io::ErrorKind::InvalidInput, format!("{e}")),
        })?;

        let bind_err = |source| AppError::Bind {
            addr: addr_str.clone(),
            source,
        };

        let socket = if addr.is_ipv4() {
            TcpSocket::new_v4()
        } else {
            TcpSocket::new_v6()
        }
        .map_err(bind_err)?;

        socket.set_reuseaddr(true).map_err(bind_err)?;
        socket.bind(addr).map_err(bind_err)?;

        let listener = socket.listen(self.config.backlog).map_err(bind_err)?;

        info!(
            host = %self.config.host,
            port = %self.config.port,
            "Server listening"
        );

        Ok(listener)
    }

    /// Accept connections until an unrecoverable socket error.
    ///
    /// Each connection is served on an independent task, so a hung child
    /// process or a slow client stalls only its own connection. Never
    /// returns Ok under normal operation.
    pub async fn serve(&self, listener: TcpListener) -> Result<(), AppError> {
        loop {
            let (stream, peer) = listener.accept().await?;
            info!(peer = %peer, "Connection accepted");

            let runner = Arc::clone(&self.runner);
            tokio::spawn(async move {
                connection::handle(stream, peer, runner).await;
            });
        }
    }
}
