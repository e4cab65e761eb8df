//! Sessions
//!
//! Server-side sessions keyed by an opaque cookie token. A session remembers
//! the shopper's active cart and, once logged in, their user.

pub mod errors;
pub mod records;
pub(crate) mod repository;
pub mod service;
pub mod token;

pub use errors::SessionsServiceError;
pub use records::DEFAULT_SESSION_TTL;
pub use service::*;
