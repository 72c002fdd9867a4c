//! Storage port: repository trait for product persistence.

use std::future::Future;

use produk_domain::error::ProdukError;
use produk_domain::id::ProductId;
use produk_domain::product::{Product, ProductDraft};

/// Repository owning the authoritative product collection.
///
/// Implementations report storage failures as [`ProdukError::Storage`] and
/// express misses through `Option`/`bool` so the service layer decides how
/// a miss is surfaced.
pub trait ProductRepository {
    /// Persist a new product, assigning a fresh identifier and creation time.
    fn create(
        &self,
        draft: ProductDraft,
    ) -> impl Future<Output = Result<Product, ProdukError>> + Send;

    /// Get a product by its identifier.
    fn get_by_id(
        &self,
        id: ProductId,
    ) -> impl Future<Output = Result<Option<Product>, ProdukError>> + Send;

    /// Get all products, newest identifier first.
    fn get_all(&self) -> impl Future<Output = Result<Vec<Product>, ProdukError>> + Send;

    /// Replace every mutable field of an existing product.
    ///
    /// Resolves to `None` without touching storage when `id` is unknown.
    fn update(
        &self,
        id: ProductId,
        draft: ProductDraft,
    ) -> impl Future<Output = Result<Option<Product>, ProdukError>> + Send;

    /// Remove a product. Resolves to `false` when `id` is unknown.
    fn delete(&self, id: ProductId) -> impl Future<Output = Result<bool, ProdukError>> + Send;
}
