//! Get Cart Handler

use salvo::prelude::*;

use crate::{
    carts::{CartResponse, current_cart},
    extensions::*,
};

/// Get Cart Handler
///
/// Returns the session's cart with its lines.
#[endpoint(
    tags("carts"),
    summary = "Get Cart",
    responses(
        (status_code = StatusCode::OK, description = "Current cart"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<CartResponse>, StatusError> {
    let state = depot.state_or_500()?;
    let session = depot.session_or_500()?;

    let cart = current_cart(&state, session).await?;

    Ok(Json(cart.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use storefront_app::domain::carts::{CartsServiceError, data::CartLookup};

    use crate::test_helpers::{Mocks, anonymous_session, make_cart, make_cart_item};

    use super::*;

    fn make_service(mocks: Mocks) -> Service {
        mocks.service(anonymous_session(), Router::with_path("cart").get(handler))
    }

    #[tokio::test]
    async fn get_returns_lines_and_totals() -> TestResult {
        let mut mocks = Mocks::default();
        let cart = make_cart(vec![make_cart_item("kettle", 3, 1_000)]);
        let cart_uuid = cart.uuid;

        mocks
            .carts
            .expect_get_or_create_cart()
            .once()
            .return_once(move |_| Ok(CartLookup::Found(cart)));

        let response: CartResponse = TestClient::get("http://example.com/cart")
            .send(&make_service(mocks))
            .await
            .take_json()
            .await?;

        assert_eq!(response.uuid, cart_uuid.into_uuid());
        assert_eq!(response.cart_total, 1);
        assert_eq!(response.cart_total_price, 3_000);
        assert_eq!(response.items[0].item_total, 3_000);

        Ok(())
    }

    #[tokio::test]
    async fn get_storage_failure_returns_500() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .carts
            .expect_get_or_create_cart()
            .once()
            .return_once(|_| Err(CartsServiceError::Sql(sqlx::Error::PoolTimedOut)));

        let res = TestClient::get("http://example.com/cart")
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::INTERNAL_SERVER_ERROR));

        Ok(())
    }
}
