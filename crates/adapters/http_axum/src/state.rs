//! Shared application state for axum handlers.

use std::sync::Arc;

use produk_app::ports::ProductRepository;
use produk_app::services::product_service::ProductService;

/// Application state shared across all axum handlers.
///
/// Generic over the repository type to avoid dynamic dispatch.
/// `Clone` is implemented manually so the repository itself does not need to
/// be `Clone`; only the `Arc` wrapper is cloned.
pub struct AppState<R> {
    /// Product CRUD service.
    pub product_service: Arc<ProductService<R>>,
}

impl<R> Clone for AppState<R> {
    fn clone(&self) -> Self {
        Self {
            product_service: Arc::clone(&self.product_service),
        }
    }
}

impl<R> AppState<R>
where
    R: ProductRepository + Send + Sync + 'static,
{
    /// Create a new application state from a service instance.
    pub fn new(product_service: ProductService<R>) -> Self {
        Self {
            product_service: Arc::new(product_service),
        }
    }
}
