//! Cart Handlers

pub(crate) mod add;
pub(crate) mod change_qty;
pub(crate) mod checkout;
pub(crate) mod get;
pub(crate) mod remove;
