//! Notifications Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as, query_scalar};
use uuid::Uuid;

use crate::domain::{
    accounts::records::UserUuid,
    catalog::records::ProductUuid,
    notifications::records::{
        NotificationRecord, NotificationUuid, WatchRecord, WatchUuid,
    },
};

const CREATE_WATCH_SQL: &str = include_str!("sql/create_watch.sql");
const CONSUME_WATCHES_SQL: &str = include_str!("sql/consume_watches.sql");
const CREATE_NOTIFICATIONS_SQL: &str = include_str!("sql/create_notifications.sql");
const LIST_NOTIFICATIONS_SQL: &str = include_str!("sql/list_notifications.sql");
const MARK_NOTIFICATIONS_READ_SQL: &str = include_str!("sql/mark_notifications_read.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgNotificationsRepository;

impl PgNotificationsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Record a watch; an existing watch for the same pair is returned as-is.
    pub(crate) async fn create_watch(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        product: ProductUuid,
    ) -> Result<WatchRecord, sqlx::Error> {
        query_as::<Postgres, WatchRecord>(CREATE_WATCH_SQL)
            .bind(WatchUuid::new().into_uuid())
            .bind(user.into_uuid())
            .bind(product.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    /// Delete every pending watch on `product`, returning the watchers.
    pub(crate) async fn consume_watches(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
    ) -> Result<Vec<UserUuid>, sqlx::Error> {
        let users: Vec<Uuid> = query_scalar(CONSUME_WATCHES_SQL)
            .bind(product.into_uuid())
            .fetch_all(&mut **tx)
            .await?;

        Ok(users.into_iter().map(UserUuid::from_uuid).collect())
    }

    pub(crate) async fn create_notifications(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        users: &[UserUuid],
        product: ProductUuid,
        message: &str,
    ) -> Result<u64, sqlx::Error> {
        if users.is_empty() {
            return Ok(0);
        }

        let uuids: Vec<Uuid> = users
            .iter()
            .map(|_| NotificationUuid::new().into_uuid())
            .collect();

        let user_uuids: Vec<Uuid> = users.iter().map(|user| user.into_uuid()).collect();

        let rows_affected = query(CREATE_NOTIFICATIONS_SQL)
            .bind(uuids)
            .bind(user_uuids)
            .bind(product.into_uuid())
            .bind(message)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn list_notifications(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<Vec<NotificationRecord>, sqlx::Error> {
        query_as::<Postgres, NotificationRecord>(LIST_NOTIFICATIONS_SQL)
            .bind(user.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn mark_notifications_read(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(MARK_NOTIFICATIONS_READ_SQL)
            .bind(user.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, PgRow> for WatchRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: WatchUuid::from_uuid(row.try_get("uuid")?),
            user_uuid: UserUuid::from_uuid(row.try_get("user_uuid")?),
            product_uuid: ProductUuid::from_uuid(row.try_get("product_uuid")?),
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for NotificationRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: NotificationUuid::from_uuid(row.try_get("uuid")?),
            user_uuid: UserUuid::from_uuid(row.try_get("user_uuid")?),
            product_uuid: ProductUuid::from_uuid(row.try_get("product_uuid")?),
            product_slug: row.try_get("product_slug")?,
            message: row.try_get("message")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            read_at: row
                .try_get::<Option<SqlxTimestamp>, _>("read_at")?
                .map(SqlxTimestamp::to_jiff),
        })
    }
}
