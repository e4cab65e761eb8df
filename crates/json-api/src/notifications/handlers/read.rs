//! Mark Notifications Read Handler

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use crate::{extensions::*, notifications::into_status_error};

/// Marked Read Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct MarkedReadResponse {
    /// Notifications that were unread until now
    pub marked: u64,
}

/// Mark Notifications Read Handler
#[endpoint(
    tags("notifications"),
    summary = "Mark Notifications Read",
    responses(
        (status_code = StatusCode::OK, description = "Unread notifications marked read"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Not logged in"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<MarkedReadResponse>, StatusError> {
    let state = depot.state_or_500()?;
    let user = depot.user_or_401()?;

    let marked = state
        .app
        .notifications
        .mark_notifications_read(user)
        .await
        .map_err(into_status_error)?;

    Ok(Json(MarkedReadResponse { marked }))
}
