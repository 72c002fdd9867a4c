//! JSON REST handlers for products.

use std::str::FromStr;

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Path, Request, State};
use axum::http::{Method, StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use produk_app::ports::ProductRepository;
use produk_domain::error::ProdukError;
use produk_domain::id::ProductId;
use produk_domain::product::{Product, ProductDraft};

use crate::error::ApiError;
use crate::state::AppState;

/// Request body for creating or replacing a product.
///
/// The `nama`/`harga`/`stok` labels are accepted as aliases. Omitted `price`
/// and `stock` default to zero.
#[derive(Debug, Deserialize)]
pub struct ProductRequest {
    #[serde(alias = "nama")]
    pub name: String,
    #[serde(default, alias = "harga")]
    pub price: i64,
    #[serde(default, alias = "stok")]
    pub stock: i64,
}

impl TryFrom<ProductRequest> for ProductDraft {
    type Error = ProdukError;

    fn try_from(req: ProductRequest) -> Result<Self, Self::Error> {
        ProductDraft::builder()
            .name(req.name)
            .price(req.price)
            .stock(req.stock)
            .build()
    }
}

/// Confirmation returned after a successful delete.
#[derive(Debug, Serialize)]
pub struct DeletedBody {
    pub message: &'static str,
    pub id: ProductId,
}

/// Possible responses from the list endpoint.
pub enum ListResponse {
    Ok(Json<Vec<Product>>),
}

impl IntoResponse for ListResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the get and update endpoints.
pub enum GetResponse {
    Ok(Json<Product>),
}

impl IntoResponse for GetResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the create endpoint.
pub enum CreateResponse {
    Created(Json<Product>),
}

impl IntoResponse for CreateResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Created(json) => (StatusCode::CREATED, json).into_response(),
        }
    }
}

/// Possible responses from the delete endpoint.
pub enum DeleteResponse {
    Deleted(Json<DeletedBody>),
}

impl IntoResponse for DeleteResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Deleted(json) => json.into_response(),
        }
    }
}

fn parse_id(raw: &str) -> Result<ProductId, ApiError> {
    ProductId::from_str(raw).map_err(|_| ApiError::InvalidId(raw.to_string()))
}

/// `GET /api/produk`
pub async fn list<R>(State(state): State<AppState<R>>) -> Result<ListResponse, ApiError>
where
    R: ProductRepository + Send + Sync + 'static,
{
    let products = state.product_service.list_products().await?;
    Ok(ListResponse::Ok(Json(products)))
}

/// `* /api/produk/{id}`
///
/// The whole remainder of the path must be a decimal integer; anything else is
/// rejected with 400 whatever the verb. Only then is the verb dispatched, and
/// verbs other than GET, PUT and DELETE get an empty 405.
pub async fn item<R>(
    State(state): State<AppState<R>>,
    Path(raw): Path<String>,
    method: Method,
    request: Request,
) -> Result<Response, ApiError>
where
    R: ProductRepository + Send + Sync + 'static,
{
    let id = parse_id(&raw)?;
    match method {
        Method::GET => Ok(get(&state, id).await?.into_response()),
        Method::PUT => {
            let payload = Json::<ProductRequest>::from_request(request, &state).await;
            Ok(update(&state, id, payload).await?.into_response())
        }
        Method::DELETE => Ok(delete(&state, id).await?.into_response()),
        _ => Ok((
            StatusCode::METHOD_NOT_ALLOWED,
            [(header::ALLOW, "GET,PUT,DELETE")],
        )
            .into_response()),
    }
}

/// `GET /api/produk/{id}`
async fn get<R>(state: &AppState<R>, id: ProductId) -> Result<GetResponse, ApiError>
where
    R: ProductRepository + Send + Sync + 'static,
{
    let product = state.product_service.get_product(id).await?;
    Ok(GetResponse::Ok(Json(product)))
}

/// `PUT /api/produk/{id}`
async fn update<R>(
    state: &AppState<R>,
    id: ProductId,
    payload: Result<Json<ProductRequest>, JsonRejection>,
) -> Result<GetResponse, ApiError>
where
    R: ProductRepository + Send + Sync + 'static,
{
    let Json(req) = payload?;
    let draft = ProductDraft::try_from(req)?;
    let updated = state.product_service.update_product(id, draft).await?;
    Ok(GetResponse::Ok(Json(updated)))
}

/// `DELETE /api/produk/{id}`
async fn delete<R>(state: &AppState<R>, id: ProductId) -> Result<DeleteResponse, ApiError>
where
    R: ProductRepository + Send + Sync + 'static,
{
    state.product_service.delete_product(id).await?;
    tracing::info!(%id, "product deleted");
    Ok(DeleteResponse::Deleted(Json(DeletedBody {
        message: "product deleted",
        id,
    })))
}

/// `* /api/produk/`: item endpoint addressed without an identifier.
pub async fn missing_id() -> ApiError {
    ApiError::MissingId
}
