//! Sessions
//!
//! Every storefront route runs behind [`middleware::handler`], which resolves
//! the session cookie or starts a new session.

mod cookie;
pub(crate) mod middleware;

pub(crate) use cookie::SessionCookie;
