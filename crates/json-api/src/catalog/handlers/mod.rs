//! Catalog Handlers

pub(crate) mod category;
pub(crate) mod index;
pub(crate) mod product;
