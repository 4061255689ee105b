//! `skuforge-core`: shared building blocks.
//!
//! Pure primitives used by every other crate (no IO, no HTTP, no async).

pub mod entity;
pub mod error;
pub mod id;

pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use id::ProductId;
