//! # produk-adapter-http-axum
//!
//! HTTP adapter built on [axum](https://docs.rs/axum).
//!
//! ## Responsibilities
//! - Serve the product resource as JSON under `/api/produk`
//! - Serve a storage-independent liveness probe at `/health`
//! - Map HTTP requests into application service calls (driving adapter)
//! - Map application results and errors into HTTP responses, in one place
//!
//! ## Dependency rule
//! Depends on `produk-app` (for port traits and services) and `produk-domain`
//! (for domain types used in request/response mapping). Never leaks axum types
//! into the domain.

pub mod api;
pub mod error;
pub mod router;
pub mod state;
