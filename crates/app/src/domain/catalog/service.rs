//! Catalog service.

use async_trait::async_trait;
use mockall::automock;
use tracing::info;

use crate::{
    database::Db,
    domain::{
        catalog::{
            data::{NewBrand, NewCategory, NewProduct},
            errors::CatalogServiceError,
            records::{AvailabilityChange, BrandRecord, CategoryRecord, CategoryUuid, ProductRecord},
            repositories::{PgBrandsRepository, PgCategoriesRepository, PgProductsRepository},
        },
        notifications::{records::back_in_stock_message, repository::PgNotificationsRepository},
    },
    slug::is_slug,
};

/// Postgres-backed [`CatalogService`].
#[derive(Debug, Clone)]
pub struct PgCatalogService {
    db: Db,
    categories_repository: PgCategoriesRepository,
    brands_repository: PgBrandsRepository,
    products_repository: PgProductsRepository,
    notifications_repository: PgNotificationsRepository,
}

impl PgCatalogService {
    /// Service over `db`.
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            categories_repository: PgCategoriesRepository::new(),
            brands_repository: PgBrandsRepository::new(),
            products_repository: PgProductsRepository::new(),
            notifications_repository: PgNotificationsRepository::new(),
        }
    }
}

#[async_trait]
impl CatalogService for PgCatalogService {
    async fn list_categories(&self) -> Result<Vec<CategoryRecord>, CatalogServiceError> {
        let mut tx = self.db.begin().await?;

        let categories = self.categories_repository.list_categories(&mut tx).await?;

        tx.commit().await?;

        Ok(categories)
    }

    async fn get_category(&self, slug: &str) -> Result<CategoryRecord, CatalogServiceError> {
        let mut tx = self.db.begin().await?;

        let category = self
            .categories_repository
            .get_category_by_slug(&mut tx, slug)
            .await?;

        tx.commit().await?;

        Ok(category)
    }

    async fn create_category(
        &self,
        category: NewCategory,
    ) -> Result<CategoryRecord, CatalogServiceError> {
        let name = category.name.trim();
        let slug = category.resolved_slug();

        if name.is_empty() || slug.is_empty() {
            return Err(CatalogServiceError::MissingRequiredData);
        }

        if !is_slug(&slug) {
            return Err(CatalogServiceError::InvalidData);
        }

        let mut tx = self.db.begin().await?;

        let created = self
            .categories_repository
            .create_category(&mut tx, category.uuid, name, &slug)
            .await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn list_brands(&self) -> Result<Vec<BrandRecord>, CatalogServiceError> {
        let mut tx = self.db.begin().await?;

        let brands = self.brands_repository.list_brands(&mut tx).await?;

        tx.commit().await?;

        Ok(brands)
    }

    async fn create_brand(&self, brand: NewBrand) -> Result<BrandRecord, CatalogServiceError> {
        let name = brand.name.trim();

        if name.is_empty() {
            return Err(CatalogServiceError::MissingRequiredData);
        }

        let mut tx = self.db.begin().await?;

        let created = self
            .brands_repository
            .create_brand(&mut tx, brand.uuid, name)
            .await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn list_available_products(&self) -> Result<Vec<ProductRecord>, CatalogServiceError> {
        let mut tx = self.db.begin().await?;

        let products = self
            .products_repository
            .list_available_products(&mut tx)
            .await?;

        tx.commit().await?;

        Ok(products)
    }

    async fn list_category_products(
        &self,
        category: CategoryUuid,
    ) -> Result<Vec<ProductRecord>, CatalogServiceError> {
        let mut tx = self.db.begin().await?;

        let products = self
            .products_repository
            .list_category_products(&mut tx, category)
            .await?;

        tx.commit().await?;

        Ok(products)
    }

    async fn get_product(&self, slug: &str) -> Result<ProductRecord, CatalogServiceError> {
        let mut tx = self.db.begin().await?;

        let product = self
            .products_repository
            .get_product_by_slug(&mut tx, slug)
            .await?;

        tx.commit().await?;

        Ok(product)
    }

    async fn create_product(
        &self,
        product: NewProduct,
    ) -> Result<ProductRecord, CatalogServiceError> {
        if product.title.trim().is_empty() {
            return Err(CatalogServiceError::MissingRequiredData);
        }

        if !is_slug(&product.slug) {
            return Err(CatalogServiceError::InvalidData);
        }

        let mut tx = self.db.begin().await?;

        let created = self
            .products_repository
            .create_product(&mut tx, &product)
            .await?;

        tx.commit().await?;

        Ok(created)
    }

    #[tracing::instrument(
        name = "catalog.service.set_price",
        skip(self),
        fields(product_uuid = tracing::field::Empty),
        err
    )]
    async fn set_price(&self, slug: &str, price: u64) -> Result<ProductRecord, CatalogServiceError> {
        let mut tx = self.db.begin().await?;

        let updated = self
            .products_repository
            .update_product_price(&mut tx, slug, price)
            .await?;

        tx.commit().await?;

        tracing::Span::current().record("product_uuid", tracing::field::display(updated.uuid));

        info!(price, "product price changed");

        Ok(updated)
    }

    #[tracing::instrument(
        name = "catalog.service.set_availability",
        skip(self),
        fields(product_uuid = tracing::field::Empty),
        err
    )]
    async fn set_availability(
        &self,
        slug: &str,
        available: bool,
    ) -> Result<AvailabilityChange, CatalogServiceError> {
        let mut tx = self.db.begin().await?;

        let product = self
            .products_repository
            .lock_product_by_slug(&mut tx, slug)
            .await?;

        tracing::Span::current().record("product_uuid", tracing::field::display(product.uuid));

        if product.available == available {
            tx.commit().await?;

            return Ok(AvailabilityChange {
                product,
                notified: 0,
            });
        }

        let updated = self
            .products_repository
            .update_product_availability(&mut tx, product.uuid, available)
            .await?;

        let mut notified = 0;

        if available {
            let watchers = self
                .notifications_repository
                .consume_watches(&mut tx, updated.uuid)
                .await?;

            notified = self
                .notifications_repository
                .create_notifications(
                    &mut tx,
                    &watchers,
                    updated.uuid,
                    &back_in_stock_message(&updated.title),
                )
                .await?;
        }

        tx.commit().await?;

        info!(product = %updated.uuid, available, notified, "product availability changed");

        Ok(AvailabilityChange {
            product: updated,
            notified,
        })
    }
}

/// Categories, brands and products.
#[automock]
#[async_trait]
pub trait CatalogService: Send + Sync {
    /// Retrieves all categories, ordered by name.
    async fn list_categories(&self) -> Result<Vec<CategoryRecord>, CatalogServiceError>;

    /// Retrieve a category by slug.
    async fn get_category(&self, slug: &str) -> Result<CategoryRecord, CatalogServiceError>;

    /// Creates a category, deriving the slug from the name when none is given.
    async fn create_category(
        &self,
        category: NewCategory,
    ) -> Result<CategoryRecord, CatalogServiceError>;

    /// Retrieves all brands, ordered by name.
    async fn list_brands(&self) -> Result<Vec<BrandRecord>, CatalogServiceError>;

    async fn create_brand(&self, brand: NewBrand) -> Result<BrandRecord, CatalogServiceError>;

    /// Products shown in the storefront listing. Unavailable products are excluded.
    async fn list_available_products(&self) -> Result<Vec<ProductRecord>, CatalogServiceError>;

    /// Available products of one category.
    async fn list_category_products(
        &self,
        category: CategoryUuid,
    ) -> Result<Vec<ProductRecord>, CatalogServiceError>;

    /// Retrieve a product by slug, whether or not it is available.
    async fn get_product(&self, slug: &str) -> Result<ProductRecord, CatalogServiceError>;

    async fn create_product(&self, product: NewProduct)
    -> Result<ProductRecord, CatalogServiceError>;

    /// Change a product's price. Existing cart lines follow the cart pricing policy.
    async fn set_price(&self, slug: &str, price: u64) -> Result<ProductRecord, CatalogServiceError>;

    /// Change a product's availability.
    ///
    /// When the product comes back in stock every pending watch is consumed and
    /// turned into a notification in the same transaction.
    async fn set_availability(
        &self,
        slug: &str,
        available: bool,
    ) -> Result<AvailabilityChange, CatalogServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{
        domain::{
            catalog::records::{BrandUuid, ProductUuid},
            notifications::NotificationsService,
        },
        test::{TestContext, helpers},
    };

    use super::*;

    #[tokio::test]
    async fn create_category_derives_slug_from_name() -> TestResult {
        let ctx = TestContext::new().await;

        let category = ctx
            .catalog
            .create_category(NewCategory {
                uuid: CategoryUuid::new(),
                name: "Ноутбуки".to_string(),
                slug: None,
            })
            .await?;

        assert_eq!(category.slug, "noutbuki");

        let fetched = ctx.catalog.get_category("noutbuki").await?;

        assert_eq!(fetched.uuid, category.uuid);

        Ok(())
    }

    #[tokio::test]
    async fn create_category_duplicate_slug_returns_already_exists() -> TestResult {
        let ctx = TestContext::new().await;

        ctx.catalog
            .create_category(NewCategory {
                uuid: CategoryUuid::new(),
                name: "Phones".to_string(),
                slug: None,
            })
            .await?;

        let result = ctx
            .catalog
            .create_category(NewCategory {
                uuid: CategoryUuid::new(),
                name: "phones".to_string(),
                slug: None,
            })
            .await;

        assert!(
            matches!(result, Err(CatalogServiceError::AlreadyExists)),
            "expected AlreadyExists, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn create_category_without_usable_name_is_rejected() {
        let ctx = TestContext::new().await;

        let result = ctx
            .catalog
            .create_category(NewCategory {
                uuid: CategoryUuid::new(),
                name: "???".to_string(),
                slug: None,
            })
            .await;

        assert!(
            matches!(result, Err(CatalogServiceError::MissingRequiredData)),
            "expected MissingRequiredData, got {result:?}"
        );
    }

    #[tokio::test]
    async fn create_product_with_unknown_brand_returns_invalid_reference() -> TestResult {
        let ctx = TestContext::new().await;
        let category = helpers::create_category(&ctx, "phones").await?;

        let result = ctx
            .catalog
            .create_product(NewProduct {
                uuid: ProductUuid::new(),
                category_uuid: category.uuid,
                brand_uuid: BrandUuid::new(),
                title: "Orphan".to_string(),
                slug: "orphan".to_string(),
                description: String::new(),
                image_filename: None,
                price: 100,
                available: true,
            })
            .await;

        assert!(
            matches!(result, Err(CatalogServiceError::InvalidReference)),
            "expected InvalidReference, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn create_product_stores_image_path() -> TestResult {
        let ctx = TestContext::new().await;
        let category = helpers::create_category(&ctx, "phones").await?;
        let brand = helpers::create_brand(&ctx, "Acme").await?;

        let product = ctx
            .catalog
            .create_product(NewProduct {
                uuid: ProductUuid::new(),
                category_uuid: category.uuid,
                brand_uuid: brand.uuid,
                title: "Acme One".to_string(),
                slug: "acme-one".to_string(),
                description: "A phone".to_string(),
                image_filename: Some("photo.png".to_string()),
                price: 25_000,
                available: true,
            })
            .await?;

        assert_eq!(product.image.as_deref(), Some("acme-one/acme-one.png"));
        assert_eq!(product.price, 25_000);

        Ok(())
    }

    #[tokio::test]
    async fn listings_exclude_unavailable_products() -> TestResult {
        let ctx = TestContext::new().await;
        let shown = helpers::create_product(&ctx, "shown", 100, true).await?;
        let hidden = helpers::create_product(&ctx, "hidden", 100, false).await?;

        let products = ctx.catalog.list_available_products().await?;
        let uuids: Vec<ProductUuid> = products.iter().map(|p| p.uuid).collect();

        assert!(uuids.contains(&shown.uuid), "available product should be listed");
        assert!(!uuids.contains(&hidden.uuid), "unavailable product should be hidden");

        let in_category = ctx
            .catalog
            .list_category_products(hidden.category_uuid)
            .await?;

        assert!(in_category.is_empty(), "category listing should hide it too");

        Ok(())
    }

    #[tokio::test]
    async fn product_detail_returns_unavailable_product() -> TestResult {
        let ctx = TestContext::new().await;
        let hidden = helpers::create_product(&ctx, "hidden", 100, false).await?;

        let product = ctx.catalog.get_product("hidden").await?;

        assert_eq!(product.uuid, hidden.uuid);
        assert!(!product.available);

        Ok(())
    }

    #[tokio::test]
    async fn get_product_unknown_slug_returns_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx.catalog.get_product("nope").await;

        assert!(
            matches!(result, Err(CatalogServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn set_price_updates_product() -> TestResult {
        let ctx = TestContext::new().await;
        helpers::create_product(&ctx, "widget", 100, true).await?;

        let updated = ctx.catalog.set_price("widget", 250).await?;

        assert_eq!(updated.price, 250);
        assert_eq!(ctx.catalog.get_product("widget").await?.price, 250);

        Ok(())
    }

    #[tokio::test]
    async fn set_price_unknown_slug_returns_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx.catalog.set_price("ghost", 250).await;

        assert!(
            matches!(result, Err(CatalogServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn restock_notifies_each_watcher_once() -> TestResult {
        let ctx = TestContext::new().await;
        let alice = helpers::create_user(&ctx, "alice").await?;
        let bob = helpers::create_user(&ctx, "bob").await?;
        helpers::create_product(&ctx, "console", 50_000, false).await?;

        ctx.notifications.watch_product(alice.uuid, "console").await?;
        ctx.notifications.watch_product(bob.uuid, "console").await?;

        let change = ctx.catalog.set_availability("console", true).await?;

        assert!(change.product.available);
        assert_eq!(change.notified, 2);

        ctx.catalog.set_availability("console", false).await?;
        let again = ctx.catalog.set_availability("console", true).await?;

        assert_eq!(again.notified, 0, "consumed watches must not re-notify");

        let alice_notifications = ctx.notifications.list_notifications(alice.uuid).await?;

        assert_eq!(alice_notifications.len(), 1);
        assert_eq!(alice_notifications[0].product_slug, "console");

        Ok(())
    }

    #[tokio::test]
    async fn restock_without_watchers_is_noop() -> TestResult {
        let ctx = TestContext::new().await;
        helpers::create_product(&ctx, "console", 50_000, false).await?;

        let change = ctx.catalog.set_availability("console", true).await?;

        assert!(change.product.available);
        assert_eq!(change.notified, 0);

        Ok(())
    }

    #[tokio::test]
    async fn setting_same_availability_changes_nothing() -> TestResult {
        let ctx = TestContext::new().await;
        let product = helpers::create_product(&ctx, "console", 50_000, true).await?;

        let change = ctx.catalog.set_availability("console", true).await?;

        assert_eq!(change.product.updated_at, product.updated_at);
        assert_eq!(change.notified, 0);

        Ok(())
    }

    #[tokio::test]
    async fn set_availability_unknown_slug_returns_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx.catalog.set_availability("missing", true).await;

        assert!(
            matches!(result, Err(CatalogServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }
}
