//! Owned listener for the vote endpoint.

use axum::Router;
use dblapi_error::{DblError, DblResult, WebhookError, WebhookErrorKind};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::{error, info};

/// A running vote listener owned by one SDK instance.
///
/// Dropping the server aborts it; [`shutdown`](Self::shutdown) lets
/// in-flight requests finish first.
#[derive(Debug)]
pub struct WebhookServer {
    addr: SocketAddr,
    shutdown: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<DblResult<()>>>,
}

impl WebhookServer {
    /// Bind `addr` and start serving `router`.
    ///
    /// Port `0` picks a free port; see [`local_addr`](Self::local_addr).
    pub async fn bind(addr: SocketAddr, router: Router) -> DblResult<Self> {
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            WebhookError::new(WebhookErrorKind::Bind(format!("{}: {}", addr, e)))
        })?;
        let addr = listener
            .local_addr()
            .map_err(|e| WebhookError::new(WebhookErrorKind::Bind(e.to_string())))?;
        let (tx, rx) = oneshot::channel::<()>();

        let task = tokio::spawn(async move {
            axum::serve(listener, router)
                .with_graceful_shutdown(async {
                    let _ = rx.await;
                })
                .await
                .map_err(|e| {
                    error!(error = %e, "Vote webhook stopped");
                    DblError::from(WebhookError::new(WebhookErrorKind::Serve(e.to_string())))
                })
        });

        info!(address = %addr, "Vote webhook listening");
        Ok(Self {
            addr,
            shutdown: Some(tx),
            task: Some(task),
        })
    }

    /// Address actually bound.
    pub fn local_addr(&self) -> SocketAddr {
        self.addr
    }

    /// Stop accepting requests and wait for the listener to finish.
    pub async fn shutdown(mut self) -> DblResult<()> {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        let Some(task) = self.task.take() else {
            return Ok(());
        };
        let result = task
            .await
            .map_err(|e| WebhookError::new(WebhookErrorKind::Serve(e.to_string())))?;
        info!(address = %self.addr, "Vote webhook stopped");
        result
    }
}

impl Drop for WebhookServer {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}
