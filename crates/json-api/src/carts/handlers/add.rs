//! Add To Cart Handler

use salvo::{oapi::extract::QueryParam, prelude::*};

use crate::{
    carts::{CartSummary, current_cart, into_status_error},
    extensions::*,
};

/// Add To Cart Handler
///
/// Adds one unit of a product. A product already in the cart is left as is.
#[endpoint(
    tags("carts"),
    summary = "Add Product to Cart",
    responses(
        (status_code = StatusCode::OK, description = "Updated cart counters"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
        (status_code = StatusCode::CONFLICT, description = "Product is not available"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "carts.add",
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
        .add_product(cart.uuid, &product_slug.into_inner())
        .await
        .map_err(into_status_error)?;

    Ok(Json(CartSummary::from(&cart)))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use storefront_app::domain::carts::{CartsServiceError, data::CartLookup, records::CartUuid};

    use crate::test_helpers::{Mocks, anonymous_session, make_cart, make_cart_item};

    use super::*;

    fn make_service(mocks: Mocks) -> Service {
        mocks.service(
            anonymous_session(),
            Router::with_path("add_to_cart").get(handler),
        )
    }

    fn expect_cart(mocks: &mut Mocks) -> CartUuid {
        let cart = make_cart(Vec::new());
        let cart_uuid = cart.uuid;

        mocks
            .carts
            .expect_get_or_create_cart()
            .once()
            .return_once(move |_| Ok(CartLookup::Found(cart)));

        cart_uuid
    }

    #[tokio::test]
    async fn add_returns_line_count_and_total() -> TestResult {
        let mut mocks = Mocks::default();
        let cart_uuid = expect_cart(&mut mocks);

        mocks
            .carts
            .expect_add_product()
            .once()
            .withf(move |cart, slug| *cart == cart_uuid && slug == "kettle")
            .return_once(|_, _| Ok(make_cart(vec![make_cart_item("kettle", 1, 1_500)])));

        let response: CartSummary = TestClient::get("http://example.com/add_to_cart?product_slug=kettle")
            .send(&make_service(mocks))
            .await
            .take_json()
            .await?;

        assert_eq!(response.cart_total, 1);
        assert_eq!(response.cart_total_price, 1_500);

        Ok(())
    }

    #[tokio::test]
    async fn add_unavailable_product_returns_409() -> TestResult {
        let mut mocks = Mocks::default();
        expect_cart(&mut mocks);

        mocks
            .carts
            .expect_add_product()
            .once()
            .return_once(|_, _| Err(CartsServiceError::ProductUnavailable));

        let res = TestClient::get("http://example.com/add_to_cart?product_slug=kettle")
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CONFLICT));

        Ok(())
    }

    #[tokio::test]
    async fn add_unknown_product_returns_404() -> TestResult {
        let mut mocks = Mocks::default();
        expect_cart(&mut mocks);

        mocks
            .carts
            .expect_add_product()
            .once()
            .return_once(|_, _| Err(CartsServiceError::ProductNotFound));

        let res = TestClient::get("http://example.com/add_to_cart?product_slug=missing")
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }

    #[tokio::test]
    async fn add_without_slug_returns_400() -> TestResult {
        let mut mocks = Mocks::default();

        mocks.carts.expect_get_or_create_cart().never();
        mocks.carts.expect_add_product().never();

        let res = TestClient::get("http://example.com/add_to_cart")
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
