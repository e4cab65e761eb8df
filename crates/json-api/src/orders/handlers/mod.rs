//! Order Handlers

pub(crate) mod create;
pub(crate) mod form;
pub(crate) mod thank_you;
