//! Notify Me Handler

use salvo::{
    oapi::{ToSchema, extract::QueryParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use storefront_app::domain::notifications::records::WatchRecord;

use crate::{extensions::*, notifications::into_status_error};

/// Watch Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct WatchResponse {
    pub uuid: Uuid,
    pub product_uuid: Uuid,
    pub created_at: String,
}

impl From<WatchRecord> for WatchResponse {
    fn from(watch: WatchRecord) -> Self {
        Self {
            uuid: watch.uuid.into_uuid(),
            product_uuid: watch.product_uuid.into_uuid(),
            created_at: watch.created_at.to_string(),
        }
    }
}

/// Notify Me Handler
///
/// Asks to be notified when an unavailable product is back in stock. Asking
/// twice keeps the first request.
#[endpoint(
    tags("notifications"),
    summary = "Notify When Available",
    responses(
        (status_code = StatusCode::OK, description = "Watch registered"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Not logged in"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
        (status_code = StatusCode::CONFLICT, description = "Product is already available"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "notifications.notify_me",
    skip(product_slug, depot),
    fields(user_uuid = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    product_slug: QueryParam<String, true>,
    depot: &mut Depot,
) -> Result<Json<WatchResponse>, StatusError> {
    let state = depot.state_or_500()?;
    let user = depot.user_or_401()?;

    tracing::Span::current().record("user_uuid", tracing::field::display(user));

    let watch = state
        .app
        .notifications
        .watch_product(user, &product_slug.into_inner())
        .await
        .map_err(into_status_error)?;

    info!(user_uuid = %user, product_uuid = %watch.product_uuid, "product watch registered");

    Ok(Json(watch.into()))
}
