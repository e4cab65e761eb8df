//! Sessions Repository

use jiff::SignedDuration;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as, query_scalar};
use uuid::Uuid;

use crate::domain::{
    accounts::records::UserUuid,
    carts::records::CartUuid,
    sessions::records::{SessionRecord, SessionUuid},
};

const CLEAR_SESSION_SQL: &str = include_str!("sql/clear_session.sql");
const CREATE_SESSION_SQL: &str = include_str!("sql/create_session.sql");
const DELETE_ABANDONED_CARTS_SQL: &str = include_str!("sql/delete_abandoned_carts.sql");
const DELETE_EXPIRED_SESSIONS_SQL: &str = include_str!("sql/delete_expired_sessions.sql");
const FIND_SESSION_BY_TOKEN_HASH_SQL: &str = include_str!("sql/find_session_by_token_hash.sql");
const LOCK_SESSION_SQL: &str = include_str!("sql/lock_session.sql");
const ROTATE_SESSION_TOKEN_SQL: &str = include_str!("sql/rotate_session_token.sql");
const SET_SESSION_CART_SQL: &str = include_str!("sql/set_session_cart.sql");
const SET_SESSION_USER_SQL: &str = include_str!("sql/set_session_user.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgSessionsRepository;

impl PgSessionsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_session(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        session: SessionUuid,
        token_hash: &str,
        ttl: SignedDuration,
    ) -> Result<SessionRecord, sqlx::Error> {
        query_as::<Postgres, SessionRecord>(CREATE_SESSION_SQL)
            .bind(session.into_uuid())
            .bind(token_hash)
            .bind(ttl.as_secs_f64())
            .fetch_one(&mut **tx)
            .await
    }

    /// Swap in a new token hash and restart the expiry clock.
    pub(crate) async fn rotate_token(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        session: SessionUuid,
        token_hash: &str,
        ttl: SignedDuration,
    ) -> Result<Option<SessionRecord>, sqlx::Error> {
        query_as::<Postgres, SessionRecord>(ROTATE_SESSION_TOKEN_SQL)
            .bind(session.into_uuid())
            .bind(token_hash)
            .bind(ttl.as_secs_f64())
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn find_session_by_token_hash(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        token_hash: &str,
    ) -> Result<Option<SessionRecord>, sqlx::Error> {
        query_as::<Postgres, SessionRecord>(FIND_SESSION_BY_TOKEN_HASH_SQL)
            .bind(token_hash)
            .fetch_optional(&mut **tx)
            .await
    }

    /// Fetch a session and hold its row lock until the transaction ends.
    pub(crate) async fn lock_session(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        session: SessionUuid,
    ) -> Result<SessionRecord, sqlx::Error> {
        query_as::<Postgres, SessionRecord>(LOCK_SESSION_SQL)
            .bind(session.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn set_cart(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        session: SessionUuid,
        cart: Option<CartUuid>,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(SET_SESSION_CART_SQL)
            .bind(session.into_uuid())
            .bind(cart.map(CartUuid::into_uuid))
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn set_user(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        session: SessionUuid,
        user: Option<UserUuid>,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(SET_SESSION_USER_SQL)
            .bind(session.into_uuid())
            .bind(user.map(UserUuid::into_uuid))
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    /// Drop both the user and the cart.
    pub(crate) async fn clear(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        session: SessionUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(CLEAR_SESSION_SQL)
            .bind(session.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    /// Delete expired sessions, returning the carts they held.
    pub(crate) async fn delete_expired(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<Option<Uuid>>, sqlx::Error> {
        query_scalar::<Postgres, Option<Uuid>>(DELETE_EXPIRED_SESSIONS_SQL)
            .fetch_all(&mut **tx)
            .await
    }

    /// Delete open carts among `carts` that no session refers to.
    pub(crate) async fn delete_abandoned_carts(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        carts: &[Uuid],
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_ABANDONED_CARTS_SQL)
            .bind(carts)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, PgRow> for SessionRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: SessionUuid::from_uuid(row.try_get("uuid")?),
            cart_uuid: row
                .try_get::<Option<Uuid>, _>("cart_uuid")?
                .map(CartUuid::from_uuid),
            user_uuid: row
                .try_get::<Option<Uuid>, _>("user_uuid")?
                .map(UserUuid::from_uuid),
            expires_at: row.try_get::<SqlxTimestamp, _>("expires_at")?.to_jiff(),
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
