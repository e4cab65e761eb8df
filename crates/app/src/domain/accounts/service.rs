//! Accounts service.

use async_trait::async_trait;
use jiff::SignedDuration;
use mockall::automock;
use sqlx::{Postgres, Transaction};
use tokio::task;
use tracing::info;

use crate::{
    database::Db,
    domain::{
        accounts::{
            data::{
                Credentials, EMAIL_TAKEN, Registration, UNKNOWN_USERNAME, USERNAME_TAKEN,
                WRONG_PASSWORD,
            },
            errors::AccountsServiceError,
            password::{Password, hash_password, verify_password},
            records::{SignedIn, UserRecord, UserUuid},
            repository::PgAccountsRepository,
        },
        sessions::{
            records::{IssuedSession, SessionUuid},
            repository::PgSessionsRepository,
            token::issue_session_token,
        },
    },
    validation::FieldErrors,
};

/// Postgres-backed [`AccountsService`].
#[derive(Debug, Clone)]
pub struct PgAccountsService {
    db: Db,
    session_ttl: SignedDuration,
    repository: PgAccountsRepository,
    sessions_repository: PgSessionsRepository,
}

impl PgAccountsService {
    /// `session_ttl` applies to tokens reissued on login, registration and
    /// logout.
    #[must_use]
    pub fn new(db: Db, session_ttl: SignedDuration) -> Self {
        Self {
            db,
            session_ttl,
            repository: PgAccountsRepository::new(),
            sessions_repository: PgSessionsRepository::new(),
        }
    }

    /// Replace the session's token so one captured before a privilege
    /// change stops working.
    async fn reissue_token(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        session: SessionUuid,
    ) -> Result<IssuedSession, AccountsServiceError> {
        let (token, token_hash) = issue_session_token();

        let session = self
            .sessions_repository
            .rotate_token(tx, session, &token_hash, self.session_ttl)
            .await?
            .ok_or(AccountsServiceError::SessionNotFound)?;

        Ok(IssuedSession { token, session })
    }
}

#[async_trait]
impl AccountsService for PgAccountsService {
    #[tracing::instrument(name = "accounts.service.register", skip_all, fields(session_uuid = %session), err)]
    async fn register(
        &self,
        session: SessionUuid,
        registration: Registration,
    ) -> Result<SignedIn, AccountsServiceError> {
        let registration = registration.validate()?;

        let password = registration.password.clone();
        let password_hash = task::spawn_blocking(move || hash_password(&password)).await??;

        let mut tx = self.db.begin().await?;

        let mut errors = FieldErrors::new();

        if self
            .repository
            .username_exists(&mut tx, &registration.username)
            .await?
        {
            errors.push("username", USERNAME_TAKEN);
        }

        if self
            .repository
            .email_exists(&mut tx, &registration.email)
            .await?
        {
            errors.push("email", EMAIL_TAKEN);
        }

        if !errors.is_empty() {
            return Err(AccountsServiceError::Invalid(errors));
        }

        let user = self
            .repository
            .create_user(&mut tx, UserUuid::new(), &registration, &password_hash)
            .await?;

        if self
            .sessions_repository
            .set_user(&mut tx, session, Some(user.uuid))
            .await?
            == 0
        {
            return Err(AccountsServiceError::SessionNotFound);
        }

        let session = self.reissue_token(&mut tx, session).await?;

        tx.commit().await?;

        info!(user_uuid = %user.uuid, "registered user");

        Ok(SignedIn { user, session })
    }

    #[tracing::instrument(name = "accounts.service.login", skip_all, fields(session_uuid = %session), err)]
    async fn login(
        &self,
        session: SessionUuid,
        credentials: Credentials,
    ) -> Result<SignedIn, AccountsServiceError> {
        let credentials = credentials.validate()?;

        let mut tx = self.db.begin().await?;

        let Some(stored) = self
            .repository
            .find_credentials_by_username(&mut tx, &credentials.username)
            .await?
        else {
            return Err(FieldErrors::single("username", UNKNOWN_USERNAME).into());
        };

        let password: Password = credentials.password;
        let password_hash = stored.password_hash;

        let verified =
            task::spawn_blocking(move || verify_password(&password, &password_hash)).await??;

        if !verified {
            return Err(FieldErrors::single("password", WRONG_PASSWORD).into());
        }

        if self
            .sessions_repository
            .set_user(&mut tx, session, Some(stored.user.uuid))
            .await?
            == 0
        {
            return Err(AccountsServiceError::SessionNotFound);
        }

        let session = self.reissue_token(&mut tx, session).await?;

        tx.commit().await?;

        info!(user_uuid = %stored.user.uuid, "user logged in");

        Ok(SignedIn {
            user: stored.user,
            session,
        })
    }

    #[tracing::instrument(name = "accounts.service.logout", skip(self), err)]
    async fn logout(&self, session: SessionUuid) -> Result<IssuedSession, AccountsServiceError> {
        let mut tx = self.db.begin().await?;

        if self.sessions_repository.clear(&mut tx, session).await? == 0 {
            return Err(AccountsServiceError::SessionNotFound);
        }

        let issued = self.reissue_token(&mut tx, session).await?;

        tx.commit().await?;

        Ok(issued)
    }

    async fn get_user(&self, user: UserUuid) -> Result<UserRecord, AccountsServiceError> {
        let mut tx = self.db.begin().await?;

        let user = self.repository.get_user(&mut tx, user).await?;

        tx.commit().await?;

        Ok(user)
    }
}

/// Registration and login against the current session.
#[automock]
#[async_trait]
pub trait AccountsService: Send + Sync {
    /// Create a user and log the session in as them under a new token.
    async fn register(
        &self,
        session: SessionUuid,
        registration: Registration,
    ) -> Result<SignedIn, AccountsServiceError>;

    /// Check credentials, attach the user to the session and reissue its
    /// token. The cart is kept.
    async fn login(
        &self,
        session: SessionUuid,
        credentials: Credentials,
    ) -> Result<SignedIn, AccountsServiceError>;

    /// Detach the user and the cart from the session and reissue its token.
    async fn logout(&self, session: SessionUuid) -> Result<IssuedSession, AccountsServiceError>;

    /// Fetch a user by id.
    async fn get_user(&self, user: UserUuid) -> Result<UserRecord, AccountsServiceError>;
}
