//! Notifications Index Handler

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::domain::notifications::records::NotificationRecord;

use crate::{extensions::*, notifications::into_status_error};

/// Notification Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct NotificationResponse {
    pub uuid: Uuid,
    pub product_uuid: Uuid,
    pub product_slug: String,
    pub message: String,
    pub created_at: String,
    pub read: bool,
}

impl From<NotificationRecord> for NotificationResponse {
    fn from(notification: NotificationRecord) -> Self {
        Self {
            uuid: notification.uuid.into_uuid(),
            product_uuid: notification.product_uuid.into_uuid(),
            product_slug: notification.product_slug,
            message: notification.message,
            created_at: notification.created_at.to_string(),
            read: notification.read_at.is_some(),
        }
    }
}

/// Notifications Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct NotificationsResponse {
    /// Newest first
    pub notifications: Vec<NotificationResponse>,

    pub unread: usize,
}

/// Notifications Index Handler
#[endpoint(
    tags("notifications"),
    summary = "List Notifications",
    responses(
        (status_code = StatusCode::OK, description = "The user's notifications"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Not logged in"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<NotificationsResponse>, StatusError> {
    let state = depot.state_or_500()?;
    let user = depot.user_or_401()?;

    let notifications: Vec<NotificationResponse> = state
        .app
        .notifications
        .list_notifications(user)
        .await
        .map_err(into_status_error)?
        .into_iter()
        .map(Into::into)
        .collect();

    let unread = notifications.iter().filter(|notification| !notification.read).count();

    Ok(Json(NotificationsResponse {
        notifications,
        unread,
    }))
}
