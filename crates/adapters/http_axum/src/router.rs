//! Axum router assembly.

use axum::Router;
use axum::routing::any;
use tower_http::trace::TraceLayer;

use produk_app::ports::ProductRepository;

use crate::state::AppState;

/// Build the top-level axum [`Router`].
///
/// Nests API routes under `/api` and exposes the liveness probe at `/health`.
/// Includes a [`TraceLayer`] that logs each HTTP request/response at the
/// `DEBUG` level using the `tracing` ecosystem.
pub fn build<R>(state: AppState<R>) -> Router
where
    R: ProductRepository + Send + Sync + 'static,
{
    Router::new()
        .route("/health", any(health_check))
        .nest("/api", crate::api::routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Liveness only: never consults storage and answers every method.
async fn health_check() -> &'static str {
    "OK"
}
