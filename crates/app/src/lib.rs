//! # produk-app
//!
//! Application layer: use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define the `ProductRepository` port that storage adapters implement
//! - Define the `ProductService` use-case struct that driving adapters call
//! - Turn storage misses into typed `NotFound` errors and reject invalid
//!   drafts before they reach storage
//!
//! ## Dependency rule
//! Depends on `produk-domain` only.
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod ports;
pub mod services;
