//! Change Item Quantity Handler

use salvo::{
    oapi::{ToSchema, extract::QueryParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use tracing::error;
use uuid::Uuid;

use storefront_app::domain::carts::records::CartItemUuid;

use crate::{
    carts::{current_cart, into_status_error},
    extensions::*,
};

/// Item Quantity Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ItemQuantityResponse {
    /// Number of lines in the cart
    pub cart_total: usize,

    /// New total of the changed line, in minor units
    pub item_total: u64,

    /// Cart total in minor units
    pub cart_total_price: u64,
}

/// Change Item Quantity Handler
#[endpoint(
    tags("carts"),
    summary = "Change Cart Item Quantity",
    responses(
        (status_code = StatusCode::OK, description = "Updated line and cart totals"),
        (status_code = StatusCode::BAD_REQUEST, description = "Quantity below 1"),
        (status_code = StatusCode::NOT_FOUND, description = "Item not in this cart"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "carts.change_quantity",
    skip(qty, item_id, depot),
    fields(cart_uuid = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    qty: QueryParam<u32, true>,
    item_id: QueryParam<Uuid, true>,
    depot: &mut Depot,
) -> Result<Json<ItemQuantityResponse>, StatusError> {
    let state = depot.state_or_500()?;
    let session = depot.session_or_500()?;
    let item = CartItemUuid::from_uuid(item_id.into_inner());

    let cart = current_cart(&state, session).await?;

    tracing::Span::current().record("cart_uuid", tracing::field::display(cart.uuid));

    let cart = state
        .app
        .carts
        .change_quantity(cart.uuid, item, qty.into_inner())
        .await
        .map_err(into_status_error)?;

    let Some(line) = cart.items.iter().find(|line| line.uuid == item) else {
        error!(cart_uuid = %cart.uuid, item_uuid = %item, "changed line missing from cart");

        return Err(StatusError::internal_server_error());
    };

    Ok(Json(ItemQuantityResponse {
        cart_total: cart.items.len(),
        item_total: line.item_total,
        cart_total_price: cart.cart_total,
    }))
}
