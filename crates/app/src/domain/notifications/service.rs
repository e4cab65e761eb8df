//! Notifications service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::{
        accounts::records::UserUuid,
        catalog::repositories::PgProductsRepository,
        notifications::{
            errors::NotificationsServiceError,
            records::{NotificationRecord, WatchRecord},
            repository::PgNotificationsRepository,
        },
    },
};

/// Postgres-backed [`NotificationsService`].
#[derive(Debug, Clone)]
pub struct PgNotificationsService {
    db: Db,
    repository: PgNotificationsRepository,
    products_repository: PgProductsRepository,
}

impl PgNotificationsService {
    /// Service over `db`.
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgNotificationsRepository::new(),
            products_repository: PgProductsRepository::new(),
        }
    }
}

#[async_trait]
impl NotificationsService for PgNotificationsService {
    async fn watch_product(
        &self,
        user: UserUuid,
        product_slug: &str,
    ) -> Result<WatchRecord, NotificationsServiceError> {
        let mut tx = self.db.begin().await?;

        // Same row lock as `set_availability`.
        let product = self
            .products_repository
            .lock_product_by_slug(&mut tx, product_slug)
            .await?;

        if product.available {
            return Err(NotificationsServiceError::ProductAvailable);
        }

        let watch = self
            .repository
            .create_watch(&mut tx, user, product.uuid)
            .await?;

        tx.commit().await?;

        Ok(watch)
    }

    async fn list_notifications(
        &self,
        user: UserUuid,
    ) -> Result<Vec<NotificationRecord>, NotificationsServiceError> {
        let mut tx = self.db.begin().await?;

        let notifications = self.repository.list_notifications(&mut tx, user).await?;

        tx.commit().await?;

        Ok(notifications)
    }

    async fn mark_notifications_read(&self, user: UserUuid) -> Result<u64, NotificationsServiceError> {
        let mut tx = self.db.begin().await?;

        let marked = self
            .repository
            .mark_notifications_read(&mut tx, user)
            .await?;

        tx.commit().await?;

        Ok(marked)
    }
}

/// Back-in-stock watches and the notifications they produce.
#[automock]
#[async_trait]
pub trait NotificationsService: Send + Sync {
    /// Register interest in an unavailable product.
    ///
    /// Watching the same product twice keeps the original watch.
    async fn watch_product(
        &self,
        user: UserUuid,
        product_slug: &str,
    ) -> Result<WatchRecord, NotificationsServiceError>;

    /// Notifications for a user, newest first.
    async fn list_notifications(
        &self,
        user: UserUuid,
    ) -> Result<Vec<NotificationRecord>, NotificationsServiceError>;

    /// Mark every unread notification for a user as read.
    async fn mark_notifications_read(&self, user: UserUuid) -> Result<u64, NotificationsServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{
        domain::catalog::CatalogService,
        test::{TestContext, helpers},
    };

    use super::*;

    #[tokio::test]
    async fn watch_unavailable_product_succeeds() -> TestResult {
        let ctx = TestContext::new().await;
        let user = helpers::create_user(&ctx, "watcher").await?;
        let product = helpers::create_product(&ctx, "sold-out", 1000, false).await?;

        let watch = ctx.notifications.watch_product(user.uuid, "sold-out").await?;

        assert_eq!(watch.user_uuid, user.uuid);
        assert_eq!(watch.product_uuid, product.uuid);

        Ok(())
    }

    #[tokio::test]
    async fn watch_twice_keeps_single_watch() -> TestResult {
        let ctx = TestContext::new().await;
        let user = helpers::create_user(&ctx, "watcher").await?;
        helpers::create_product(&ctx, "sold-out", 1000, false).await?;

        let first = ctx.notifications.watch_product(user.uuid, "sold-out").await?;
        let second = ctx.notifications.watch_product(user.uuid, "sold-out").await?;

        assert_eq!(first.uuid, second.uuid);

        ctx.catalog.set_availability("sold-out", true).await?;

        let notifications = ctx.notifications.list_notifications(user.uuid).await?;

        assert_eq!(notifications.len(), 1, "one watch should notify once");

        Ok(())
    }

    #[tokio::test]
    async fn watch_available_product_is_rejected() -> TestResult {
        let ctx = TestContext::new().await;
        let user = helpers::create_user(&ctx, "watcher").await?;
        helpers::create_product(&ctx, "in-stock", 1000, true).await?;

        let result = ctx.notifications.watch_product(user.uuid, "in-stock").await;

        assert!(
            matches!(result, Err(NotificationsServiceError::ProductAvailable)),
            "expected ProductAvailable, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn watch_unknown_product_returns_not_found() -> TestResult {
        let ctx = TestContext::new().await;
        let user = helpers::create_user(&ctx, "watcher").await?;

        let result = ctx.notifications.watch_product(user.uuid, "missing").await;

        assert!(
            matches!(result, Err(NotificationsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn mark_notifications_read_sets_read_at() -> TestResult {
        let ctx = TestContext::new().await;
        let user = helpers::create_user(&ctx, "watcher").await?;
        helpers::create_product(&ctx, "sold-out", 1000, false).await?;

        ctx.notifications.watch_product(user.uuid, "sold-out").await?;
        ctx.catalog.set_availability("sold-out", true).await?;

        let marked = ctx.notifications.mark_notifications_read(user.uuid).await?;
        let notifications = ctx.notifications.list_notifications(user.uuid).await?;

        assert_eq!(marked, 1);
        assert!(notifications.iter().all(|n| n.read_at.is_some()));

        let marked_again = ctx.notifications.mark_notifications_read(user.uuid).await?;

        assert_eq!(marked_again, 0);

        Ok(())
    }
}
