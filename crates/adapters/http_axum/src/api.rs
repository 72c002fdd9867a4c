//! JSON REST API handler modules.

#[allow(clippy::missing_errors_doc)]
pub mod products;

use axum::Router;
use axum::routing::{any, get};

use produk_app::ports::ProductRepository;

use crate::state::AppState;

/// Build the `/api` sub-router.
///
/// Verbs not listed on the collection are answered with `405 Method Not
/// Allowed` by the method router. Everything below `/produk/` goes to a single
/// handler that parses the identifier before looking at the verb.
pub fn routes<R>() -> Router<AppState<R>>
where
    R: ProductRepository + Send + Sync + 'static,
{
    Router::new()
        .route(
            "/produk",
            get(products::list::<R>).post(products::create::<R>),
        )
        .route("/produk/", any(products::missing_id))
        .route("/produk/{*id}", any(products::item::<R>))
}
