use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use http_body_util::{BodyExt, Full};
use hyper::body::Bytes;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::Response;
use hyper_util::rt::TokioIo;
use tokio::net::TcpListener;
use tracing::{debug, error, info};

use acmsite_core::DataProvider;

use crate::routes;

/// Accept connections until SIGINT/SIGTERM, one task per connection.
pub async fn run(provider: Arc<DataProvider>, addr: SocketAddr) -> Result<()> {
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!(%addr, "Listening");

    let shutdown = shutdown_signal();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            accept_result = listener.accept() => {
                let (stream, peer) = match accept_result {
                    Ok(conn) => conn,
                    Err(e) => {
                        error!(error = %e, "Failed to accept connection");
                        continue;
                    }
                };
                debug!(%peer, "Accepted connection");

                let io = TokioIo::new(stream);
                let provider = Arc::clone(&provider);

                tokio::task::spawn(async move {
                    let service = service_fn(move |req| {
                        let provider = Arc::clone(&provider);
                        async move {
                            Ok::<_, anyhow::Error>(
                                routes::handle_request(&provider, req)
                                    .await
                                    .unwrap_or_else(|e| {
                                        error!(error = %e, "Request handling failed");
                                        routes::internal_error().unwrap_or_else(|_| {
                                            // Last resort if even error response building fails
                                            Response::new(
                                                Full::new(Bytes::from(&b"Error"[..]))
                                                    .map_err(|e| match e {})
                                                    .boxed(),
                                            )
                                        })
                                    }),
                            )
                        }
                    });

                    if let Err(err) = http1::Builder::new().serve_connection(io, service).await {
                        debug!(error = %err, %peer, "Error serving connection");
                    }
                });
            }
            signal = &mut shutdown => {
                info!(signal, "Shutting down");
                return Ok(());
            }
        }
    }
}

#[cfg(unix)]
async fn shutdown_signal() -> &'static str {
    use tokio::signal::unix::{signal, SignalKind};

    let mut sigterm = match signal(SignalKind::terminate()) {
        Ok(s) => s,
        Err(e) => {
            error!(error = %e, "Failed to install SIGTERM handler");
            let _ = tokio::signal::ctrl_c().await;
            return "SIGINT";
        }
    };

    tokio::select! {
        _ = sigterm.recv() => "SIGTERM",
        _ = tokio::signal::ctrl_c() => "SIGINT",
    }
}

#[cfg(not(unix))]
async fn shutdown_signal() -> &'static str {
    let _ = tokio::signal::ctrl_c().await;
    "ctrl-c"
}
