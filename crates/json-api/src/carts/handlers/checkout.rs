//! Checkout Handler

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use crate::{
    carts::{CartResponse, current_cart},
    extensions::*,
    orders::BuyingTypeResponse,
};

/// Checkout Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CheckoutResponse {
    pub cart: CartResponse,

    /// Choices for the order form
    pub buying_types: Vec<BuyingTypeResponse>,
}

/// Checkout Handler
///
/// The cart as it will be ordered, with the order form choices.
#[endpoint(
    tags("carts"),
    summary = "Checkout",
    responses(
        (status_code = StatusCode::OK, description = "Cart summary for checkout"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<CheckoutResponse>, StatusError> {
    let state = depot.state_or_500()?;
    let session = depot.session_or_500()?;

    let cart = current_cart(&state, session).await?;

    Ok(Json(CheckoutResponse {
        cart: cart.into(),
        buying_types: BuyingTypeResponse::all(),
    }))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use storefront_app::domain::carts::data::CartLookup;

    use crate::test_helpers::{Mocks, anonymous_session, make_cart, make_cart_item};

    use super::*;

    #[tokio::test]
    async fn checkout_returns_cart_and_choices() -> TestResult {
        let mut mocks = Mocks::default();
        let cart = make_cart(vec![
            make_cart_item("kettle", 2, 1_500),
            make_cart_item("toaster", 1, 2_000),
        ]);

        mocks
            .carts
            .expect_get_or_create_cart()
            .once()
            .return_once(move |_| Ok(CartLookup::Found(cart)));

        let service = mocks.service(anonymous_session(), Router::with_path("checkout").get(handler));

        let response: CheckoutResponse = TestClient::get("http://example.com/checkout")
            .send(&service)
            .await
            .take_json()
            .await?;

        assert_eq!(response.cart.items.len(), 2);
        assert_eq!(response.cart.cart_total_price, 5_000);
        assert_eq!(response.buying_types.len(), 2);

        Ok(())
    }
}
