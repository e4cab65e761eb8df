//! Carts
//!
//! A cart owns its lines. Every mutation goes through the aggregate in
//! [`aggregate`], which keeps `cart_total` equal to the sum of line totals, and
//! is persisted in the same transaction under a row lock on the cart.

pub mod aggregate;
pub mod data;
pub mod errors;
pub mod pricing;
pub mod records;
pub(crate) mod repositories;
pub mod service;

pub use errors::CartsServiceError;
pub use pricing::CartPricing;
pub use service::*;
