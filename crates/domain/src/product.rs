//! Product: the single resource managed by the service.

use serde::{Deserialize, Serialize};

use crate::error::{ProdukError, ValidationError};
use crate::id::ProductId;
use crate::time::Timestamp;

/// A stored product, including the fields assigned by storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub created_at: Timestamp,
    pub name: String,
    /// Price in minor currency units.
    pub price: i64,
    pub stock: i64,
}

impl Product {
    /// Assemble a stored product from a draft and the storage-assigned fields.
    #[must_use]
    pub fn from_draft(id: ProductId, created_at: Timestamp, draft: ProductDraft) -> Self {
        Self {
            id,
            created_at,
            name: draft.name,
            price: draft.price,
            stock: draft.stock,
        }
    }

    /// Overwrite every mutable field with the draft's values.
    ///
    /// `id` and `created_at` are left untouched; nothing is merged.
    pub fn replace_with(&mut self, draft: ProductDraft) {
        self.name = draft.name;
        self.price = draft.price;
        self.stock = draft.stock;
    }
}

/// A product before storage has assigned an identity.
///
/// Used both as the creation candidate and as the wholesale-replacement
/// payload of an update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductDraft {
    pub name: String,
    pub price: i64,
    pub stock: i64,
}

impl ProductDraft {
    /// Create a builder for constructing a [`ProductDraft`].
    #[must_use]
    pub fn builder() -> ProductDraftBuilder {
        ProductDraftBuilder::default()
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`ProdukError::Validation`] when `name` is empty or blank.
    pub fn validate(&self) -> Result<(), ProdukError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyName.into());
        }
        Ok(())
    }
}

/// Step-by-step builder for [`ProductDraft`].
#[derive(Debug, Default)]
pub struct ProductDraftBuilder {
    name: Option<String>,
    price: i64,
    stock: i64,
}

impl ProductDraftBuilder {
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn price(mut self, price: i64) -> Self {
        self.price = price;
        self
    }

    #[must_use]
    pub fn stock(mut self, stock: i64) -> Self {
        self.stock = stock;
        self
    }

    /// Consume the builder, validate, and return a [`ProductDraft`].
    ///
    /// # Errors
    ///
    /// Returns [`ProdukError::Validation`] if `name` is missing or empty.
    /// Surrounding whitespace is stripped from `name`.
    pub fn build(self) -> Result<ProductDraft, ProdukError> {
        let draft = ProductDraft {
            name: self.name.as_deref().map(str::trim).unwrap_or_default().to_string(),
            price: self.price,
            stock: self.stock,
        };
        draft.validate()?;
        Ok(draft)
    }
}
