//! State

use std::sync::Arc;

use storefront_app::context::AppContext;

use crate::sessions::SessionCookie;

#[derive(Clone)]
pub(crate) struct State {
    pub(crate) app: AppContext,
    pub(crate) cookie: SessionCookie,
}

impl State {
    #[must_use]
    pub(crate) fn new(app: AppContext, cookie: SessionCookie) -> Self {
        Self { app, cookie }
    }

    #[must_use]
    pub(crate) fn shared(app: AppContext, cookie: SessionCookie) -> Arc<Self> {
        Arc::new(Self::new(app, cookie))
    }
}
