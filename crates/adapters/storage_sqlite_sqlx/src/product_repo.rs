//! `SQLite` implementation of [`ProductRepository`].

use std::future::Future;

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use produk_app::ports::ProductRepository;
use produk_domain::error::ProdukError;
use produk_domain::id::ProductId;
use produk_domain::product::{Product, ProductDraft};
use produk_domain::time;

use crate::error::StorageError;

/// Wrapper for converting database rows into domain [`Product`].
struct Wrapper(Product);

impl Wrapper {
    fn maybe(value: Option<Self>) -> Option<Product> {
        value.map(|w| w.0)
    }
}

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: i64 = row.try_get("id")?;
        let created_at: String = row.try_get("created_at")?;
        let name: String = row.try_get("name")?;
        let price: i64 = row.try_get("price")?;
        let stock: i64 = row.try_get("stock")?;

        let created_at =
            time::from_text(&created_at).map_err(|err| sqlx::Error::Decode(Box::new(err)))?;

        Ok(Self(Product {
            id: ProductId::new(id),
            created_at,
            name,
            price,
            stock,
        }))
    }
}

const INSERT: &str = r"
    INSERT INTO product (created_at, name, price, stock)
    VALUES (?, ?, ?, ?)
    RETURNING id, created_at, name, price, stock
";
const SELECT_BY_ID: &str = "SELECT id, created_at, name, price, stock FROM product WHERE id = ?";
const SELECT_ALL: &str = "SELECT id, created_at, name, price, stock FROM product ORDER BY id DESC";
const UPDATE: &str = r"
    UPDATE product SET name = ?, price = ?, stock = ?
    WHERE id = ?
    RETURNING id, created_at, name, price, stock
";
const DELETE_BY_ID: &str = "DELETE FROM product WHERE id = ?";

/// `SQLite`-backed product repository.
pub struct SqliteProductRepository {
    pool: SqlitePool,
}

impl SqliteProductRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl ProductRepository for SqliteProductRepository {
    fn create(
        &self,
        draft: ProductDraft,
    ) -> impl Future<Output = Result<Product, ProdukError>> + Send {
        let pool = self.pool.clone();
        async move {
            let row: Wrapper = sqlx::query_as(INSERT)
                .bind(time::to_text(time::now()))
                .bind(&draft.name)
                .bind(draft.price)
                .bind(draft.stock)
                .fetch_one(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(row.0)
        }
    }

    fn get_by_id(
        &self,
        id: ProductId,
    ) -> impl Future<Output = Result<Option<Product>, ProdukError>> + Send {
        let pool = self.pool.clone();
        async move {
            let row: Option<Wrapper> = sqlx::query_as(SELECT_BY_ID)
                .bind(id.get())
                .fetch_optional(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(Wrapper::maybe(row))
        }
    }

    fn get_all(&self) -> impl Future<Output = Result<Vec<Product>, ProdukError>> + Send {
        let pool = self.pool.clone();
        async move {
            let rows: Vec<Wrapper> = sqlx::query_as(SELECT_ALL)
                .fetch_all(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(rows.into_iter().map(|w| w.0).collect())
        }
    }

    fn update(
        &self,
        id: ProductId,
        draft: ProductDraft,
    ) -> impl Future<Output = Result<Option<Product>, ProdukError>> + Send {
        let pool = self.pool.clone();
        async move {
            let row: Option<Wrapper> = sqlx::query_as(UPDATE)
                .bind(&draft.name)
                .bind(draft.price)
                .bind(draft.stock)
                .bind(id.get())
                .fetch_optional(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(Wrapper::maybe(row))
        }
    }

    fn delete(&self, id: ProductId) -> impl Future<Output = Result<bool, ProdukError>> + Send {
        let pool = self.pool.clone();
        async move {
            let result = sqlx::query(DELETE_BY_ID)
                .bind(id.get())
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(result.rows_affected() > 0)
        }
    }
}
