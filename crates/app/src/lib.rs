//! Storefront domain services, persistence and shared helpers.

pub mod context;
pub mod database;
pub mod domain;
pub mod slug;
pub mod uuids;
pub mod validation;

#[cfg(test)]
mod test;
