//! Notification Errors

use salvo::http::StatusError;
use tracing::error;

use storefront_app::domain::notifications::NotificationsServiceError;

pub(crate) fn into_status_error(error: NotificationsServiceError) -> StatusError {
    match error {
        NotificationsServiceError::NotFound => StatusError::not_found().brief("Product not found"),
        NotificationsServiceError::ProductAvailable => {
            StatusError::conflict().brief("Product is already available")
        }
        NotificationsServiceError::InvalidReference | NotificationsServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid notification data")
        }
        NotificationsServiceError::Sql(source) => {
            error!("notification storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}
