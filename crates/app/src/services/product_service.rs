//! Product service: use-cases for managing the catalogue.

use produk_domain::error::{NotFoundError, ProdukError};
use produk_domain::id::ProductId;
use produk_domain::product::{Product, ProductDraft};

use crate::ports::ProductRepository;

fn not_found(id: ProductId) -> ProdukError {
    NotFoundError {
        entity: "Product",
        id: id.to_string(),
    }
    .into()
}

/// Application service for product CRUD operations.
pub struct ProductService<R> {
    repo: R,
}

impl<R: ProductRepository> ProductService<R> {
    /// Create a new service backed by the given repository.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Create a new product after validating domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`ProdukError::Validation`] if invariants fail, or a
    /// storage error propagated from the repository.
    pub async fn create_product(&self, draft: ProductDraft) -> Result<Product, ProdukError> {
        draft.validate()?;
        let product = self.repo.create(draft).await?;
        tracing::debug!(id = %product.id, "product created");
        Ok(product)
    }

    /// Look up a product by id, returning an error if not found.
    ///
    /// # Errors
    ///
    /// Returns [`ProdukError::NotFound`] when no product with `id` exists,
    /// or a storage error from the repository.
    pub async fn get_product(&self, id: ProductId) -> Result<Product, ProdukError> {
        self.repo
            .get_by_id(id)
            .await?
            .ok_or_else(|| not_found(id))
    }

    /// List all products, newest identifier first.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn list_products(&self) -> Result<Vec<Product>, ProdukError> {
        self.repo.get_all().await
    }

    /// Replace every mutable field of an existing product.
    ///
    /// # Errors
    ///
    /// Returns [`ProdukError::Validation`] if invariants fail,
    /// [`ProdukError::NotFound`] when `id` is unknown, or a storage error.
    pub async fn update_product(
        &self,
        id: ProductId,
        draft: ProductDraft,
    ) -> Result<Product, ProdukError> {
        draft.validate()?;
        let product = self
            .repo
            .update(id, draft)
            .await?
            .ok_or_else(|| not_found(id))?;
        tracing::debug!(%id, "product replaced");
        Ok(product)
    }

    /// Delete a product by id.
    ///
    /// # Errors
    ///
    /// Returns [`ProdukError::NotFound`] when `id` is unknown, or a storage
    /// error propagated from the repository.
    pub async fn delete_product(&self, id: ProductId) -> Result<(), ProdukError> {
        if self.repo.delete(id).await? {
            tracing::debug!(%id, "product deleted");
            Ok(())
        } else {
            Err(not_found(id))
        }
    }
}
