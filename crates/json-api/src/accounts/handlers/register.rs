//! Registration Handler

use std::fmt;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use storefront_app::domain::accounts::{AccountsServiceError, data::Registration};

use crate::{
    accounts::{UserResponse, into_status_error},
    extensions::*,
    forms::{ValidationErrorResponse, render_invalid},
};

/// Registration Request
#[derive(Default, Serialize, Deserialize, ToSchema)]
pub(crate) struct RegistrationRequest {
    pub username: Option<String>,
    pub password: Option<String>,

    /// Must repeat `password`
    pub password_check: Option<String>,

    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
}

impl fmt::Debug for RegistrationRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistrationRequest")
            .field("username", &self.username)
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

impl From<RegistrationRequest> for Registration {
    fn from(request: RegistrationRequest) -> Self {
        Self {
            username: request.username,
            password: request.password,
            password_check: request.password_check,
            first_name: request.first_name,
            last_name: request.last_name,
            email: request.email,
        }
    }
}

/// Registration Handler
///
/// Creates a user, logs the current session in as them and reissues the
/// session cookie.
#[endpoint(
    tags("accounts"),
    summary = "Register",
    responses(
        (status_code = StatusCode::CREATED, description = "User created and logged in", body = UserResponse),
        (status_code = StatusCode::UNPROCESSABLE_ENTITY, description = "Invalid registration", body = ValidationErrorResponse),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<RegistrationRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<StatusCode, StatusError> {
    let state = depot.state_or_500()?;
    let session = depot.session_or_500()?;

    match state
        .app
        .accounts
        .register(session.uuid, json.into_inner().into())
        .await
    {
        Ok(signed_in) => {
            let user = signed_in.user;

            info!(user_uuid = %user.uuid, username = %user.username, "user registered");

            res.add_cookie(state.cookie.issue(&signed_in.session.token));
            res.render(Json(UserResponse::from(user)));

            Ok(StatusCode::CREATED)
        }
        Err(AccountsServiceError::Invalid(errors)) => Ok(render_invalid(res, &errors)),
        Err(error) => Err(into_status_error(error)),
    }
}
