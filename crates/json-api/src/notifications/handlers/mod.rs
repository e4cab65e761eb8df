//! Notification Handlers

pub(crate) mod index;
pub(crate) mod notify_me;
pub(crate) mod read;
