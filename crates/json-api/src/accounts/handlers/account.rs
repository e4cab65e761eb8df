//! Account Handler

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};
use tracing::warn;

use storefront_app::domain::accounts::AccountsServiceError;

use crate::{
    accounts::{UserResponse, into_status_error},
    extensions::*,
    orders::{self, OrderResponse},
};

/// Account Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct AccountResponse {
    pub user: UserResponse,

    /// Orders placed while logged in, newest first
    pub orders: Vec<OrderResponse>,
}

/// Account Handler
#[endpoint(
    tags("accounts"),
    summary = "Account",
    responses(
        (status_code = StatusCode::OK, description = "User and order history"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Not logged in"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<AccountResponse>, StatusError> {
    let state = depot.state_or_500()?;
    let user_uuid = depot.user_or_401()?;

    let user = match state.app.accounts.get_user(user_uuid).await {
        Ok(user) => user,
        Err(AccountsServiceError::NotFound) => {
            warn!(%user_uuid, "session refers to a missing user");

            return Err(StatusError::unauthorized().brief("Login required"));
        }
        Err(error) => return Err(into_status_error(error)),
    };

    let history = state
        .app
        .orders
        .list_orders_for_user(user_uuid)
        .await
        .map_err(orders::into_status_error)?;

    Ok(Json(AccountResponse {
        user: user.into(),
        orders: history.into_iter().map(Into::into).collect(),
    }))
}
