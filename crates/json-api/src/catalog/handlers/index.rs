//! Storefront Index Handler

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use crate::{
    carts::{CartSummary, current_cart},
    catalog::{
        CategoryResponse, ProductResponse, into_status_error,
        responses::{categories, products},
    },
    extensions::*,
};

/// Storefront Index Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct IndexResponse {
    pub categories: Vec<CategoryResponse>,

    /// Available products only
    pub products: Vec<ProductResponse>,

    pub cart: CartSummary,
}

/// Storefront Index Handler
///
/// Lists categories and available products alongside the session's cart.
#[endpoint(
    tags("catalog"),
    summary = "Storefront Index",
    responses(
        (status_code = StatusCode::OK, description = "Catalog listing"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<IndexResponse>, StatusError> {
    let state = depot.state_or_500()?;
    let session = depot.session_or_500()?;

    let category_records = state
        .app
        .catalog
        .list_categories()
        .await
        .map_err(into_status_error)?;

    let product_records = state
        .app
        .catalog
        .list_available_products()
        .await
        .map_err(into_status_error)?;

    let cart = current_cart(&state, session).await?;

    Ok(Json(IndexResponse {
        categories: categories(category_records),
        products: products(product_records),
        cart: CartSummary::from(&cart),
    }))
}
