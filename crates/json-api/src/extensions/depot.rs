//! Depot helper extensions.

use std::{any::Any, sync::Arc};

use salvo::prelude::{Depot, StatusError};
use storefront_app::domain::{accounts::records::UserUuid, sessions::records::SessionRecord};
use tracing::error;

use crate::state::State;

/// Typed access to what the middleware stack leaves in the depot.
pub(crate) trait DepotExt {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError>;

    /// Shared application state injected at the router root.
    fn state_or_500(&self) -> Result<Arc<State>, StatusError>;

    fn insert_session(&mut self, session: SessionRecord);

    /// The session resolved by the session middleware.
    fn session_or_500(&self) -> Result<&SessionRecord, StatusError>;

    /// The logged-in user, or `401` for anonymous sessions.
    fn user_or_401(&self) -> Result<UserUuid, StatusError>;
}

impl DepotExt for Depot {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError> {
        self.obtain::<T>().map_err(|mistyped| {
            error!(
                mistyped = mistyped.is_some(),
                "depot is missing {}; middleware not installed?",
                std::any::type_name::<T>()
            );

            StatusError::internal_server_error()
        })
    }

    fn state_or_500(&self) -> Result<Arc<State>, StatusError> {
        self.obtain_or_500::<Arc<State>>().map(Arc::clone)
    }

    fn insert_session(&mut self, session: SessionRecord) {
        self.inject(session);
    }

    fn session_or_500(&self) -> Result<&SessionRecord, StatusError> {
        self.obtain_or_500::<SessionRecord>()
    }

    fn user_or_401(&self) -> Result<UserUuid, StatusError> {
        self.session_or_500()?
            .user_uuid
            .ok_or_else(|| StatusError::unauthorized().brief("Login required"))
    }
}
