//! Sessions service.

use async_trait::async_trait;
use jiff::SignedDuration;
use mockall::automock;
use tracing::{debug, info};
use uuid::Uuid;

use crate::{
    database::Db,
    domain::sessions::{
        errors::SessionsServiceError,
        records::{IssuedSession, PurgedSessions, SessionRecord, SessionUuid},
        repository::PgSessionsRepository,
        token::{issue_session_token, parse_session_token},
    },
};

/// Postgres-backed [`SessionsService`].
#[derive(Debug, Clone)]
pub struct PgSessionsService {
    db: Db,
    ttl: SignedDuration,
    repository: PgSessionsRepository,
}

impl PgSessionsService {
    /// Sessions started here stop resolving `ttl` after they are issued.
    #[must_use]
    pub fn new(db: Db, ttl: SignedDuration) -> Self {
        Self {
            db,
            ttl,
            repository: PgSessionsRepository::new(),
        }
    }
}

#[async_trait]
impl SessionsService for PgSessionsService {
    async fn start_session(&self) -> Result<IssuedSession, SessionsServiceError> {
        let (token, token_hash) = issue_session_token();

        let mut tx = self.db.begin().await?;

        let session = self
            .repository
            .create_session(&mut tx, SessionUuid::new(), &token_hash, self.ttl)
            .await?;

        tx.commit().await?;

        Ok(IssuedSession { token, session })
    }

    async fn resolve_session(&self, token: &str) -> Result<SessionRecord, SessionsServiceError> {
        let parsed = parse_session_token(token).map_err(|error| {
            debug!("rejected session token: {error}");

            SessionsServiceError::NotFound
        })?;

        let mut tx = self.db.begin().await?;

        let session = self
            .repository
            .find_session_by_token_hash(&mut tx, &parsed.hash())
            .await?
            .ok_or(SessionsServiceError::NotFound)?;

        tx.commit().await?;

        Ok(session)
    }

    #[tracing::instrument(name = "sessions.service.purge_expired", skip(self), err)]
    async fn purge_expired_sessions(&self) -> Result<PurgedSessions, SessionsServiceError> {
        let mut tx = self.db.begin().await?;

        let released = self.repository.delete_expired(&mut tx).await?;

        let carts: Vec<Uuid> = released.iter().flatten().copied().collect();

        let purged = PurgedSessions {
            sessions: released.len(),
            carts: self
                .repository
                .delete_abandoned_carts(&mut tx, &carts)
                .await?,
        };

        tx.commit().await?;

        info!(
            sessions = purged.sessions,
            carts = purged.carts,
            "purged expired sessions"
        );

        Ok(purged)
    }
}

/// Cookie-token sessions.
#[automock]
#[async_trait]
pub trait SessionsService: Send + Sync {
    /// Create a session with no cart and no user, returning its raw token.
    async fn start_session(&self) -> Result<IssuedSession, SessionsServiceError>;

    /// Look up the session for a cookie token.
    ///
    /// Malformed and unknown tokens both yield `NotFound`.
    async fn resolve_session(&self, token: &str) -> Result<SessionRecord, SessionsServiceError>;

    /// Delete expired sessions along with the open carts only they held.
    async fn purge_expired_sessions(&self) -> Result<PurgedSessions, SessionsServiceError>;
}
