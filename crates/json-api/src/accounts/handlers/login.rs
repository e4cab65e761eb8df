//! Login Handler

use std::fmt;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use storefront_app::domain::accounts::{AccountsServiceError, data::Credentials};

use crate::{
    accounts::{UserResponse, into_status_error},
    extensions::*,
    forms::{ValidationErrorResponse, render_invalid},
};

/// Login Request
#[derive(Default, Serialize, Deserialize, ToSchema)]
pub(crate) struct LoginRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

impl fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginRequest")
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

impl From<LoginRequest> for Credentials {
    fn from(request: LoginRequest) -> Self {
        Self {
            username: request.username,
            password: request.password,
        }
    }
}

/// Login Handler
///
/// Attaches the user to the current session and reissues the session
/// cookie. The session keeps its cart.
#[endpoint(
    tags("accounts"),
    summary = "Log In",
    responses(
        (status_code = StatusCode::OK, description = "Logged in", body = UserResponse),
        (status_code = StatusCode::UNPROCESSABLE_ENTITY, description = "Unknown user or wrong password", body = ValidationErrorResponse),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<LoginRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<StatusCode, StatusError> {
    let state = depot.state_or_500()?;
    let session = depot.session_or_500()?;

    match state
        .app
        .accounts
        .login(session.uuid, json.into_inner().into())
        .await
    {
        Ok(signed_in) => {
            info!(user_uuid = %signed_in.user.uuid, session_uuid = %session.uuid, "user logged in");

            res.add_cookie(state.cookie.issue(&signed_in.session.token));
            res.render(Json(UserResponse::from(signed_in.user)));

            Ok(StatusCode::OK)
        }
        Err(AccountsServiceError::Invalid(errors)) => Ok(render_invalid(res, &errors)),
        Err(error) => Err(into_status_error(error)),
    }
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use storefront_app::validation::FieldErrors;

    use crate::test_helpers::{
        Mocks, TEST_COOKIE_NAME, TEST_SESSION_UUID, anonymous_session, make_signed_in,
    };

    use super::*;

    fn make_service(mocks: Mocks) -> Service {
        mocks.service(anonymous_session(), Router::with_path("login").post(handler))
    }

    fn request(password: &str) -> LoginRequest {
        LoginRequest {
            username: Some("ann".to_string()),
            password: Some(password.to_string()),
        }
    }

    #[tokio::test]
    async fn login_returns_user() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .accounts
            .expect_login()
            .once()
            .withf(|session, credentials| {
                *session == TEST_SESSION_UUID && credentials.username.as_deref() == Some("ann")
            })
            .return_once(|_, _| Ok(make_signed_in("ann", "sf_v1_rotated")));

        let mut res = TestClient::post("http://example.com/login")
            .json(&request("secret"))
            .send(&make_service(mocks))
            .await;

        let cookie_value = res
            .cookie(TEST_COOKIE_NAME)
            .map(|cookie| cookie.value().to_owned());

        assert_eq!(cookie_value.as_deref(), Some("sf_v1_rotated"));

        let user: UserResponse = res.take_json().await?;

        assert_eq!(user.username, "ann");

        Ok(())
    }

    #[tokio::test]
    async fn wrong_password_returns_422() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .accounts
            .expect_login()
            .once()
            .return_once(|_, _| {
                Err(AccountsServiceError::Invalid(FieldErrors::single(
                    "password",
                    "Неверный пароль!",
                )))
            });

        let mut res = TestClient::post("http://example.com/login")
            .json(&request("wrong"))
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNPROCESSABLE_ENTITY));
        assert!(
            res.cookie(TEST_COOKIE_NAME).is_none(),
            "failed login must keep the old cookie"
        );

        let body: ValidationErrorResponse = res.take_json().await?;

        assert_eq!(body.messages_for("password"), ["Неверный пароль!"]);

        Ok(())
    }
}
