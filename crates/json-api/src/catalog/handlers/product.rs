//! Product Handler

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use crate::{
    carts::{CartSummary, current_cart},
    catalog::{CategoryResponse, ProductResponse, into_status_error, responses::categories},
    extensions::*,
};

/// Product Page Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductPageResponse {
    /// The product, available or not
    pub product: ProductResponse,

    pub categories: Vec<CategoryResponse>,
    pub cart: CartSummary,
}

/// Product Handler
///
/// Unavailable products are still shown here so shoppers can ask to be
/// notified when they return.
#[endpoint(
    tags("catalog"),
    summary = "Get Product",
    responses(
        (status_code = StatusCode::OK, description = "Product detail"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    slug: PathParam<String>,
    depot: &mut Depot,
) -> Result<Json<ProductPageResponse>, StatusError> {
    let state = depot.state_or_500()?;
    let session = depot.session_or_500()?;

    let product = state
        .app
        .catalog
        .get_product(&slug.into_inner())
        .await
        .map_err(into_status_error)?;

    let category_records = state
        .app
        .catalog
        .list_categories()
        .await
        .map_err(into_status_error)?;

    let cart = current_cart(&state, session).await?;

    Ok(Json(ProductPageResponse {
        product: product.into(),
        categories: categories(category_records),
        cart: CartSummary::from(&cart),
    }))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use storefront_app::domain::{carts::data::CartLookup, catalog::CatalogServiceError};

    use crate::test_helpers::{Mocks, anonymous_session, make_cart, make_product};

    use super::*;

    fn make_service(mocks: Mocks) -> Service {
        mocks.service(
            anonymous_session(),
            Router::with_path("product/{slug}").get(handler),
        )
    }

    #[tokio::test]
    async fn unavailable_product_is_still_shown() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .catalog
            .expect_get_product()
            .once()
            .withf(|slug| slug == "kettle")
            .return_once(|_| Ok(make_product("kettle", 1_500, false)));

        mocks
            .catalog
            .expect_list_categories()
            .once()
            .return_once(|| Ok(Vec::new()));

        mocks
            .carts
            .expect_get_or_create_cart()
            .once()
            .return_once(|_| Ok(CartLookup::Found(make_cart(Vec::new()))));

        let response: ProductPageResponse = TestClient::get("http://example.com/product/kettle")
            .send(&make_service(mocks))
            .await
            .take_json()
            .await?;

        assert_eq!(response.product.slug, "kettle");
        assert!(!response.product.available);

        Ok(())
    }

    #[tokio::test]
    async fn unknown_product_returns_404() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .catalog
            .expect_get_product()
            .once()
            .return_once(|_| Err(CatalogServiceError::NotFound));

        let res = TestClient::get("http://example.com/product/missing")
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
