//! Category Handler

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use crate::{
    carts::{CartSummary, current_cart},
    catalog::{
        CategoryResponse, ProductResponse, into_status_error,
        responses::{categories, products},
    },
    extensions::*,
};

/// Category Page Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CategoryPageResponse {
    pub category: CategoryResponse,

    /// Available products of this category
    pub products: Vec<ProductResponse>,

    pub categories: Vec<CategoryResponse>,
    pub cart: CartSummary,
}

/// Category Handler
#[endpoint(
    tags("catalog"),
    summary = "Get Category",
    responses(
        (status_code = StatusCode::OK, description = "Category with its available products"),
        (status_code = StatusCode::NOT_FOUND, description = "Category not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    slug: PathParam<String>,
    depot: &mut Depot,
) -> Result<Json<CategoryPageResponse>, StatusError> {
    let state = depot.state_or_500()?;
    let session = depot.session_or_500()?;
    let catalog = &state.app.catalog;

    let category = catalog
        .get_category(&slug.into_inner())
        .await
        .map_err(into_status_error)?;

    let product_records = catalog
        .list_category_products(category.uuid)
        .await
        .map_err(into_status_error)?;

    let category_records = catalog
        .list_categories()
        .await
        .map_err(into_status_error)?;

    let cart = current_cart(&state, session).await?;

    Ok(Json(CategoryPageResponse {
        category: category.into(),
        products: products(product_records),
        categories: categories(category_records),
        cart: CartSummary::from(&cart),
    }))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use storefront_app::domain::{carts::data::CartLookup, catalog::CatalogServiceError};

    use crate::test_helpers::{Mocks, anonymous_session, make_cart, make_category, make_product};

    use super::*;

    fn make_service(mocks: Mocks) -> Service {
        mocks.service(
            anonymous_session(),
            Router::with_path("category/{slug}").get(handler),
        )
    }

    #[tokio::test]
    async fn category_lists_its_products() -> TestResult {
        let mut mocks = Mocks::default();
        let category = make_category("kitchen");
        let category_uuid = category.uuid;

        mocks
            .catalog
            .expect_get_category()
            .once()
            .withf(|slug| slug == "kitchen")
            .return_once(move |_| Ok(category));

        mocks
            .catalog
            .expect_list_category_products()
            .once()
            .withf(move |uuid| *uuid == category_uuid)
            .return_once(|_| Ok(vec![make_product("kettle", 1_500, true)]));

        mocks
            .catalog
            .expect_list_categories()
            .once()
            .return_once(|| Ok(vec![make_category("kitchen"), make_category("garden")]));

        mocks
            .carts
            .expect_get_or_create_cart()
            .once()
            .return_once(|_| Ok(CartLookup::Created(make_cart(Vec::new()))));

        let response: CategoryPageResponse = TestClient::get("http://example.com/category/kitchen")
            .send(&make_service(mocks))
            .await
            .take_json()
            .await?;

        assert_eq!(response.category.slug, "kitchen");
        assert_eq!(response.products.len(), 1);
        assert_eq!(response.categories.len(), 2);
        assert_eq!(response.cart.cart_total, 0);

        Ok(())
    }

    #[tokio::test]
    async fn unknown_category_returns_404() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .catalog
            .expect_get_category()
            .once()
            .return_once(|_| Err(CatalogServiceError::NotFound));

        mocks.catalog.expect_list_category_products().never();

        let res = TestClient::get("http://example.com/category/missing")
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
