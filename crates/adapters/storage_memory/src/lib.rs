//! # produk-adapter-storage-memory
//!
//! Volatile persistence adapter: the whole catalogue lives in process memory
//! and disappears on restart.
//!
//! ## Responsibilities
//! - Implement `ProductRepository` over an ordered map
//! - Serialize every operation through a single async mutex so concurrent
//!   requests never observe a half-applied write
//! - Hand out monotonically increasing identifiers that are never reused
//!
//! ## Dependency rule
//! Depends on `produk-app` (for port traits) and `produk-domain` (for domain types).

use std::collections::BTreeMap;
use std::future::Future;

use tokio::sync::Mutex;

use produk_app::ports::ProductRepository;
use produk_domain::error::ProdukError;
use produk_domain::id::ProductId;
use produk_domain::product::{Product, ProductDraft};
use produk_domain::time;

struct Catalogue {
    last_id: ProductId,
    products: BTreeMap<ProductId, Product>,
}

/// Product repository backed by a mutex-guarded in-memory map.
pub struct InMemoryProductRepository {
    inner: Mutex<Catalogue>,
}

impl Default for InMemoryProductRepository {
    fn default() -> Self {
        Self {
            inner: Mutex::new(Catalogue {
                last_id: ProductId::new(0),
                products: BTreeMap::new(),
            }),
        }
    }
}

impl InMemoryProductRepository {
    /// Create an empty repository. The first product receives id `1`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl ProductRepository for InMemoryProductRepository {
    fn create(
        &self,
        draft: ProductDraft,
    ) -> impl Future<Output = Result<Product, ProdukError>> + Send {
        async move {
            let mut inner = self.inner.lock().await;
            let id = inner.last_id.next();
            inner.last_id = id;

            let product = Product::from_draft(id, time::now(), draft);
            inner.products.insert(id, product.clone());
            Ok(product)
        }
    }

    fn get_by_id(
        &self,
        id: ProductId,
    ) -> impl Future<Output = Result<Option<Product>, ProdukError>> + Send {
        async move {
            let inner = self.inner.lock().await;
            Ok(inner.products.get(&id).cloned())
        }
    }

    fn get_all(&self) -> impl Future<Output = Result<Vec<Product>, ProdukError>> + Send {
        async move {
            let inner = self.inner.lock().await;
            Ok(inner.products.values().rev().cloned().collect())
        }
    }

    fn update(
        &self,
        id: ProductId,
        draft: ProductDraft,
    ) -> impl Future<Output = Result<Option<Product>, ProdukError>> + Send {
        async move {
            let mut inner = self.inner.lock().await;
            Ok(inner.products.get_mut(&id).map(|product| {
                product.replace_with(draft);
                product.clone()
            }))
        }
    }

    fn delete(&self, id: ProductId) -> impl Future<Output = Result<bool, ProdukError>> + Send {
        async move {
            let mut inner = self.inner.lock().await;
            Ok(inner.products.remove(&id).is_some())
        }
    }
}
