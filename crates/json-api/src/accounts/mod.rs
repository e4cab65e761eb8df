//! Accounts

mod errors;
mod handlers;
mod responses;

pub(crate) use errors::into_status_error;
pub(crate) use handlers::*;
pub(crate) use responses::UserResponse;
