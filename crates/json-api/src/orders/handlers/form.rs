//! Order Form Handler

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use crate::{
    carts::{CartSummary, current_cart},
    extensions::*,
    orders::BuyingTypeResponse,
};

/// Order Form Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderFormResponse {
    /// Accepted `buying_type` values
    pub buying_types: Vec<BuyingTypeResponse>,

    pub cart: CartSummary,
}

/// Order Form Handler
///
/// Describes the checkout form. `address` is required for delivery only.
#[endpoint(
    tags("orders"),
    summary = "Order Form",
    responses(
        (status_code = StatusCode::OK, description = "Form choices and cart counters"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<OrderFormResponse>, StatusError> {
    let state = depot.state_or_500()?;
    let session = depot.session_or_500()?;

    let cart = current_cart(&state, session).await?;

    Ok(Json(OrderFormResponse {
        buying_types: BuyingTypeResponse::all(),
        cart: CartSummary::from(&cart),
    }))
}
