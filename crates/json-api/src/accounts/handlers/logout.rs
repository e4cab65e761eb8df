//! Logout Handler

use salvo::prelude::*;
use tracing::info;

use crate::{accounts::into_status_error, extensions::*};

/// Logout Handler
///
/// Detaches the user and the cart from the session and reissues the session
/// cookie, so the browser leaves with an empty anonymous session.
#[endpoint(
    tags("accounts"),
    summary = "Log Out",
    responses(
        (status_code = StatusCode::NO_CONTENT, description = "Logged out"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    depot: &mut Depot,
    res: &mut Response,
) -> Result<StatusCode, StatusError> {
    let state = depot.state_or_500()?;
    let session = depot.session_or_500()?;

    let issued = state
        .app
        .accounts
        .logout(session.uuid)
        .await
        .map_err(into_status_error)?;

    res.add_cookie(state.cookie.issue(&issued.token));

    info!(session_uuid = %session.uuid, "session logged out");

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use salvo::test::TestClient;
    use testresult::TestResult;

    use storefront_app::domain::accounts::AccountsServiceError;

    use crate::test_helpers::{
        Mocks, TEST_COOKIE_NAME, TEST_SESSION_UUID, anonymous_session, logged_in_session,
        reissued,
    };

    use super::*;

    fn make_service(mocks: Mocks) -> Service {
        mocks.service(logged_in_session(), Router::with_path("logout").post(handler))
    }

    #[tokio::test]
    async fn logout_returns_204() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .accounts
            .expect_logout()
            .once()
            .withf(|session| *session == TEST_SESSION_UUID)
            .return_once(|_| Ok(reissued("sf_v1_after_logout", anonymous_session())));

        let res = TestClient::post("http://example.com/logout")
            .add_header("cookie", format!("{TEST_COOKIE_NAME}=sf_v1_before_logout"), true)
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NO_CONTENT));

        let cookie_value = res
            .cookie(TEST_COOKIE_NAME)
            .map(|cookie| cookie.value().to_owned());

        assert_eq!(cookie_value.as_deref(), Some("sf_v1_after_logout"));

        Ok(())
    }

    #[tokio::test]
    async fn vanished_session_returns_500() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .accounts
            .expect_logout()
            .once()
            .return_once(|_| Err(AccountsServiceError::SessionNotFound));

        let res = TestClient::post("http://example.com/logout")
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::INTERNAL_SERVER_ERROR));

        Ok(())
    }
}
