//! Carts

mod errors;
mod handlers;
mod responses;

use salvo::http::StatusError;
use storefront_app::domain::{
    carts::{data::CartLookup, records::CartRecord},
    sessions::records::SessionRecord,
};
use tracing::debug;

use crate::state::State;

pub(crate) use errors::into_status_error;
pub(crate) use handlers::*;
pub(crate) use responses::{CartResponse, CartSummary};

/// The session's open cart, opening a new one when needed.
pub(crate) async fn current_cart(
    state: &State,
    session: &SessionRecord,
) -> Result<CartRecord, StatusError> {
    let lookup = state
        .app
        .carts
        .get_or_create_cart(session.uuid)
        .await
        .map_err(into_status_error)?;

    if let CartLookup::Created(cart) = &lookup {
        debug!(session_uuid = %session.uuid, cart_uuid = %cart.uuid, "opened cart for session");
    }

    Ok(lookup.into_cart())
}
