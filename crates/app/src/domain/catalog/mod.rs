//! Catalog
//!
//! Categories, brands and products. Read-mostly; written by the admin CLI.

pub mod data;
pub mod errors;
pub mod records;
pub(crate) mod repositories;
pub mod service;

pub use errors::CatalogServiceError;
pub use service::*;
