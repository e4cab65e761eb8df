//! Session middleware.

use salvo::prelude::*;
use storefront_app::domain::sessions::{SessionsServiceError, records::SessionRecord};
use tracing::{debug, error, info};

use crate::{extensions::*, state::State};

#[salvo::handler]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    let state = match depot.state_or_500() {
        Ok(state) => state,
        Err(status) => {
            res.render(status);
            ctrl.skip_rest();

            return;
        }
    };

    let token = req
        .cookie(state.cookie.name())
        .map(|cookie| cookie.value().to_owned());

    match establish_session(&state, token.as_deref(), res).await {
        Ok(session) => {
            depot.insert_session(session);

            ctrl.call_next(req, depot, res).await;
        }
        Err(source) => {
            error!("failed to establish session: {source}");

            res.render(StatusError::internal_server_error());
            ctrl.skip_rest();
        }
    }
}

/// Resolve the presented token, starting a fresh session when there is none
/// or it no longer matches a stored session.
async fn establish_session(
    state: &State,
    token: Option<&str>,
    res: &mut Response,
) -> Result<SessionRecord, SessionsServiceError> {
    if let Some(token) = token {
        match state.app.sessions.resolve_session(token).await {
            Ok(session) => return Ok(session),
            Err(SessionsServiceError::NotFound) => {
                debug!("session cookie does not match a stored session");
            }
            Err(error) => return Err(error),
        }
    }

    let issued = state.app.sessions.start_session().await?;

    res.add_cookie(state.cookie.issue(&issued.token));

    info!(session_uuid = %issued.session.uuid, "started session");

    Ok(issued.session)
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use storefront_app::domain::sessions::records::IssuedSession;
    use testresult::TestResult;

    use crate::test_helpers::{Mocks, TEST_COOKIE_NAME, anonymous_session};

    use super::*;

    #[salvo::handler]
    async fn echo_session(depot: &mut Depot, res: &mut Response) {
        let session = depot
            .session_or_500()
            .map_or_else(|_| "missing".to_string(), |session| session.uuid.to_string());

        res.render(session);
    }

    fn make_service(mocks: Mocks) -> Service {
        Service::new(
            Router::new()
                .hoop(salvo::affix_state::inject(mocks.state()))
                .hoop(handler)
                .push(Router::new().get(echo_session)),
        )
    }

    #[tokio::test]
    async fn missing_cookie_starts_session_and_sets_cookie() -> TestResult {
        let mut mocks = Mocks::default();
        let session = anonymous_session();
        let expected = session.uuid.to_string();

        mocks.sessions.expect_start_session().once().return_once(move || {
            Ok(IssuedSession {
                token: "sf1_fresh".to_string(),
                session,
            })
        });

        let mut res = TestClient::get("http://example.com/")
            .send(&make_service(mocks))
            .await;

        let cookie_value = res
            .cookie(TEST_COOKIE_NAME)
            .map(|cookie| cookie.value().to_owned());

        assert_eq!(cookie_value.as_deref(), Some("sf1_fresh"));
        assert_eq!(res.take_string().await?, expected);

        Ok(())
    }

    #[tokio::test]
    async fn known_cookie_resolves_without_new_cookie() -> TestResult {
        let mut mocks = Mocks::default();
        let session = anonymous_session();
        let expected = session.uuid.to_string();

        mocks
            .sessions
            .expect_resolve_session()
            .once()
            .withf(|token| token == "sf1_known")
            .return_once(move |_| Ok(session));

        mocks.sessions.expect_start_session().never();

        let mut res = TestClient::get("http://example.com/")
            .add_header("cookie", format!("{TEST_COOKIE_NAME}=sf1_known"), true)
            .send(&make_service(mocks))
            .await;

        assert!(res.cookie(TEST_COOKIE_NAME).is_none(), "cookie should not be reissued");
        assert_eq!(res.take_string().await?, expected);

        Ok(())
    }

    #[tokio::test]
    async fn stale_cookie_is_replaced() -> TestResult {
        let mut mocks = Mocks::default();
        let session = anonymous_session();

        mocks
            .sessions
            .expect_resolve_session()
            .once()
            .return_once(|_| Err(SessionsServiceError::NotFound));

        mocks.sessions.expect_start_session().once().return_once(move || {
            Ok(IssuedSession {
                token: "sf1_replacement".to_string(),
                session,
            })
        });

        let res = TestClient::get("http://example.com/")
            .add_header("cookie", format!("{TEST_COOKIE_NAME}=sf1_stale"), true)
            .send(&make_service(mocks))
            .await;

        let cookie_value = res
            .cookie(TEST_COOKIE_NAME)
            .map(|cookie| cookie.value().to_owned());

        assert_eq!(cookie_value.as_deref(), Some("sf1_replacement"));

        Ok(())
    }

    #[tokio::test]
    async fn storage_failure_returns_500() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .sessions
            .expect_resolve_session()
            .once()
            .return_once(|_| Err(SessionsServiceError::Sql(sqlx::Error::PoolTimedOut)));

        mocks.sessions.expect_start_session().never();

        let res = TestClient::get("http://example.com/")
            .add_header("cookie", format!("{TEST_COOKIE_NAME}=sf1_known"), true)
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::INTERNAL_SERVER_ERROR));

        Ok(())
    }
}
