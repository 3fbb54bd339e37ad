//! HTTP server exposing the document store.

pub mod routes;

use crate::store::DocumentStore;
use hyper::body::Incoming;
use hyper::service::service_fn;
use hyper::StatusCode;
use hyper_util::rt::{TokioExecutor, TokioIo};
use hyper_util::server::graceful::GracefulShutdown;
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::oneshot;

pub use routes::{route, HttpResponse, Route};

/// How long open connections get to finish after shutdown is requested.
const GRACEFUL_TIMEOUT: Duration = Duration::from_secs(10);

/// created by `make_http_server`
pub struct HttpServer {
    /// The address the server is listening on.
    pub addr: SocketAddr,
    /// The sender to shutdown the server.
    pub shutdown_tx: oneshot::Sender<()>,
    /// The join handle of the server.
    pub join: tokio::task::JoinHandle<()>,
}

impl HttpServer {
    /// Requests a graceful shutdown and waits for the accept loop to end.
    pub async fn shutdown(self) {
        let _ = self.shutdown_tx.send(());
        if let Err(err) = self.join.await {
            tracing::error!(error = %err, "server task failed");
        }
    }
}

/// Binds `addr` and serves the document API until shut down.
pub async fn make_http_server(
    addr: SocketAddr,
    store: Arc<DocumentStore>,
) -> std::io::Result<HttpServer> {
    type Server = hyper_util::server::conn::auto::Builder<TokioExecutor>;

    let listener = tokio::net::TcpListener::bind(addr).await?;
    let addr = listener.local_addr()?;
    tracing::info!(
        root = %store.root().display(),
        "document server listening on http://{addr}"
    );

    let make_service = move || {
        let store = store.clone();
        service_fn(move |req: hyper::Request<Incoming>| {
            let store = store.clone();
            async move { Ok::<_, Infallible>(serve_request(store, req).await) }
        })
    };

    let (shutdown_tx, mut shutdown_rx) = oneshot::channel::<()>();
    let graceful = GracefulShutdown::new();

    let serve_conn = move |server: &Server, graceful: &GracefulShutdown, conn| {
        let (stream, _peer_addr) = match conn {
            Ok(conn) => conn,
            Err(e) => {
                tracing::error!("accept error: {e}");
                return;
            }
        };

        let conn = server.serve_connection_with_upgrades(TokioIo::new(stream), make_service());
        let conn = graceful.watch(conn.into_owned());
        tokio::spawn(async move {
            if let Err(err) = conn.await {
                tracing::debug!("connection closed with error: {err}");
            }
        });
    };

    let join = tokio::spawn(async move {
        let mut server = Server::new(TokioExecutor::new());
        server.http1().keep_alive(true);

        loop {
            tokio::select! {
                conn = listener.accept() => serve_conn(&server, &graceful, conn),
                _ = &mut shutdown_rx => {
                    tracing::info!("graceful shutdown signal received");
                    break;
                }
            }
        }

        tokio::select! {
            _ = graceful.shutdown() => {
                tracing::info!("all connections closed");
            },
            _ = tokio::time::sleep(GRACEFUL_TIMEOUT) => {
                tracing::warn!("timed out waiting for connections, aborting");
            }
        }
    });

    Ok(HttpServer {
        addr,
        shutdown_tx,
        join,
    })
}

async fn serve_request(store: Arc<DocumentStore>, req: hyper::Request<Incoming>) -> HttpResponse {
    let method = req.method().clone();
    let path = req.uri().path().to_owned();

    let handled = {
        let method = method.clone();
        let path = path.clone();
        tokio::task::spawn_blocking(move || route(&store, &method, &path)).await
    };
    let response = match handled {
        Ok(response) => response,
        Err(err) => {
            tracing::error!(error = %err, "request handler panicked");
            let mut response = routes::with_cors(hyper::Response::new(Default::default()));
            *response.status_mut() = StatusCode::INTERNAL_SERVER_ERROR;
            response
        }
    };

    tracing::info!(%method, path = %path, status = response.status().as_u16(), "request");
    response
}
