//! Notifications
//!
//! Back-in-stock watches and the notifications they turn into.

pub mod errors;
pub mod records;
pub(crate) mod repository;
pub mod service;

pub use errors::NotificationsServiceError;
pub use service::*;
