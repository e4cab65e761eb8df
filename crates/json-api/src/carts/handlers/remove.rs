//! Remove From Cart Handler

use salvo::{oapi::extract::QueryParam, prelude::*};

use crate::{
    carts::{CartSummary, current_cart, into_status_error},
    extensions::*,
};

/// Remove From Cart Handler
///
/// Removes the product's line. Removing a product that is not in the cart
/// changes nothing.
#[endpoint(
    tags("carts"),
    summary = "Remove Product from Cart",
    responses(
        (status_code = StatusCode::OK, description = "Updated cart counters"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "carts.remove",
    skip(product_slug, depot),
    fields(cart_uuid = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    product_slug: QueryParam<String, true>,
    depot: &mut Depot,
) -> Result<Json<CartSummary>, StatusError> {
    let state = depot.state_or_500()?;
    let session = depot.session_or_500()?;

    let cart = current_cart(&state, session).await?;

    tracing::Span::current().record("cart_uuid", tracing::field::display(cart.uuid));

    let cart = state
        .app
        .carts
        .remove_product(cart.uuid, &product_slug.into_inner())
        .await
        .map_err(into_status_error)?;

    Ok(Json(CartSummary::from(&cart)))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use storefront_app::domain::carts::{CartsServiceError, data::CartLookup};

    use crate::test_helpers::{Mocks, anonymous_session, make_cart, make_cart_item};

    use super::*;

    fn make_service(mocks: Mocks) -> Service {
        mocks.service(
            anonymous_session(),
            Router::with_path("remove_from_cart").get(handler),
        )
    }

    #[tokio::test]
    async fn remove_returns_remaining_counters() -> TestResult {
        let mut mocks = Mocks::default();
        let cart = make_cart(vec![
            make_cart_item("kettle", 1, 1_500),
            make_cart_item("toaster", 2, 2_000),
        ]);
        let cart_uuid = cart.uuid;

        mocks
            .carts
            .expect_get_or_create_cart()
            .once()
            .return_once(move |_| Ok(CartLookup::Found(cart)));

        mocks
            .carts
            .expect_remove_product()
            .once()
            .withf(move |cart, slug| *cart == cart_uuid && slug == "kettle")
            .return_once(|_, _| Ok(make_cart(vec![make_cart_item("toaster", 2, 2_000)])));

        let response: CartSummary =
            TestClient::get("http://example.com/remove_from_cart?product_slug=kettle")
                .send(&make_service(mocks))
                .await
                .take_json()
                .await?;

        assert_eq!(response.cart_total, 1);
        assert_eq!(response.cart_total_price, 4_000);

        Ok(())
    }

    #[tokio::test]
    async fn remove_from_closed_cart_returns_409() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .carts
            .expect_get_or_create_cart()
            .once()
            .return_once(|_| Ok(CartLookup::Found(make_cart(Vec::new()))));

        mocks
            .carts
            .expect_remove_product()
            .once()
            .return_once(|_, _| Err(CartsServiceError::CartClosed));

        let res = TestClient::get("http://example.com/remove_from_cart?product_slug=kettle")
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CONFLICT));

        Ok(())
    }
}
