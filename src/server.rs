//! HTTP server lifecycle

use std::net::SocketAddr;

use axum::Router;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::api;
use crate::config::Config;
use crate::error::{Error, Result};

/// A bound, not yet running, HTTP server
pub struct Server {
    listener: TcpListener,
    router: Router,
}

/// Handle to a running server
pub struct ServerHandle {
    local_addr: SocketAddr,
    shutdown: CancellationToken,
    task: JoinHandle<std::io::Result<()>>,
}

impl Server {
    /// Bind the configured address and build the router
    pub async fn bind(config: &Config) -> Result<Self> {
        let router = if config.cors {
            api::create_router_with_cors()
        } else {
            api::create_router()
        };
        Self::bind_with_router(&config.addr(), router).await
    }

    /// Bind `addr` and serve `router` on it
    pub async fn bind_with_router(addr: &str, router: Router) -> Result<Self> {
        let listener = TcpListener::bind(addr).await?;
        Ok(Self { listener, router })
    }

    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    /// Start serving in the background
    pub fn start(self) -> Result<ServerHandle> {
        let local_addr = self.local_addr()?;
        let shutdown = CancellationToken::new();
        let signal = shutdown.clone();

        tracing::info!("Listening on {}", local_addr);

        let task = tokio::spawn(async move {
            axum::serve(self.listener, self.router)
                .with_graceful_shutdown(async move { signal.cancelled().await })
                .await
        });

        Ok(ServerHandle {
            local_addr,
            shutdown,
            task,
        })
    }
}

impl ServerHandle {
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Token that stops the server when cancelled
    pub fn shutdown_token(&self) -> CancellationToken {
        self.shutdown.clone()
    }

    /// Ask the server to stop accepting connections and drain
    pub fn stop(&self) {
        tracing::info!("Stopping server on {}", self.local_addr);
        self.shutdown.cancel();
    }

    /// Wait for the server task to finish
    pub async fn wait(self) -> Result<()> {
        self.task.await.map_err(Error::from)??;
        Ok(())
    }

    /// Stop the server and wait for it to drain
    pub async fn shutdown(self) -> Result<()> {
        self.stop();
        self.wait().await
    }
}
