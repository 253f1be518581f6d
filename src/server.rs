use core::future::Future;
use std::{io, net::SocketAddr, path::Path};

use axum::{
    Router,
    extract::{ConnectInfo, Request},
    middleware::{self, Next},
    response::Response,
};
use tokio::net::TcpListener;
use tower_http::services::ServeDir;

use crate::error::{Error, Result};

async fn log_request(request: Request, next: Next) -> Response {
    let remote = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map_or_else(|| "-".to_owned(), |ConnectInfo(addr)| addr.to_string());
    tracing::info!(target: "server", "{remote} {} {}", request.method(), request.uri());
    next.run(request).await
}

/// Static files under `dir`, every request logged.
pub fn router(dir: &Path) -> Router {
    Router::new()
        .fallback_service(ServeDir::new(dir))
        .layer(middleware::from_fn(log_request))
}

/// Serves `dir` on an already bound listener until `shutdown` resolves.
pub async fn run<F>(listener: TcpListener, dir: &Path, shutdown: F) -> io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let app = router(dir).into_make_service_with_connect_info::<SocketAddr>();
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
}

async fn ctrl_c() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(target: "server", "unable to listen for ctrl-c: {e}");
        core::future::pending::<()>().await;
    }
    tracing::info!(target: "server", "shutting down ...");
}

/// Binds `listen` and serves `dir` until ctrl-c. A bind failure is an error.
pub async fn serve(listen: SocketAddr, dir: &Path) -> Result<()> {
    let listener = TcpListener::bind(listen)
        .await
        .map_err(|e| Error::Bind(listen, e))?;
    let local = listener.local_addr().map_err(|e| Error::Bind(listen, e))?;

    tracing::info!(target: "server", "Listening on {local} ...");

    run(listener, dir, ctrl_c())
        .await
        .map_err(|e| Error::Io(dir.to_owned(), e))
}
