//! Carts service.

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use sqlx::{Postgres, Transaction};
use tracing::{Span, info};

use crate::{
    database::Db,
    domain::{
        carts::{
            data::{CartLookup, NewCartItem},
            errors::CartsServiceError,
            pricing::CartPricing,
            records::{CartItemUuid, CartRecord, CartUuid},
            repositories::{PgCartItemsRepository, PgCartsRepository},
        },
        catalog::{records::ProductRecord, repositories::PgProductsRepository},
        sessions::{records::SessionUuid, repository::PgSessionsRepository},
    },
};

/// Postgres-backed [`CartsService`]. Every mutation holds the cart row lock.
#[derive(Debug, Clone)]
pub struct PgCartsService {
    db: Db,
    pricing: CartPricing,
    carts_repository: PgCartsRepository,
    items_repository: PgCartItemsRepository,
    products_repository: PgProductsRepository,
    sessions_repository: PgSessionsRepository,
}

impl PgCartsService {
    /// Carts priced by `pricing`.
    #[must_use]
    pub fn new(db: Db, pricing: CartPricing) -> Self {
        Self {
            db,
            pricing,
            carts_repository: PgCartsRepository::new(),
            items_repository: PgCartItemsRepository::new(),
            products_repository: PgProductsRepository::new(),
            sessions_repository: PgSessionsRepository::new(),
        }
    }

    async fn load_cart(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: CartUuid,
    ) -> Result<Option<CartRecord>, CartsServiceError> {
        let Some(mut record) = self.carts_repository.find_cart(tx, cart).await? else {
            return Ok(None);
        };

        record.items = self.items_repository.get_cart_items(tx, cart).await?;

        Ok(Some(record))
    }

    /// Lock an open cart, load its lines and apply the pricing policy.
    async fn lock_open_cart(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: CartUuid,
    ) -> Result<CartRecord, CartsServiceError> {
        let mut record = self
            .carts_repository
            .lock_cart(tx, cart)
            .await?
            .ok_or(CartsServiceError::NotFound)?;

        if record.is_checked_out() {
            return Err(CartsServiceError::CartClosed);
        }

        record.items = self.items_repository.get_cart_items(tx, cart).await?;

        if self.pricing == CartPricing::Catalog {
            let products: Vec<_> = record.items.iter().map(|line| line.product_uuid).collect();
            let prices = self
                .items_repository
                .get_catalog_prices(tx, &products)
                .await?;

            record.reprice(&prices)?;
        }

        Ok(record)
    }

    /// Write every line and the total, then read the cart back.
    async fn persist_cart(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        record: &CartRecord,
    ) -> Result<CartRecord, CartsServiceError> {
        self.items_repository
            .update_cart_items(tx, record.uuid, &record.items)
            .await?;

        self.carts_repository
            .update_cart_total(tx, record.uuid, record.cart_total)
            .await?;

        self.load_cart(tx, record.uuid)
            .await?
            .ok_or(CartsServiceError::NotFound)
    }

    async fn find_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product_slug: &str,
    ) -> Result<ProductRecord, CartsServiceError> {
        match self
            .products_repository
            .get_product_by_slug(tx, product_slug)
            .await
        {
            Ok(product) => Ok(product),
            Err(sqlx::Error::RowNotFound) => Err(CartsServiceError::ProductNotFound),
            Err(error) => Err(error.into()),
        }
    }
}

#[async_trait]
impl CartsService for PgCartsService {
    #[tracing::instrument(
        name = "carts.service.get_or_create_cart",
        skip(self),
        fields(cart_uuid = tracing::field::Empty),
        err
    )]
    async fn get_or_create_cart(&self, session: SessionUuid) -> Result<CartLookup, CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let record = match self.sessions_repository.lock_session(&mut tx, session).await {
            Ok(record) => record,
            Err(sqlx::Error::RowNotFound) => return Err(CartsServiceError::SessionNotFound),
            Err(error) => return Err(error.into()),
        };

        if let Some(cart_uuid) = record.cart_uuid
            && let Some(cart) = self.load_cart(&mut tx, cart_uuid).await?
            && !cart.is_checked_out()
        {
            tx.commit().await?;

            Span::current().record("cart_uuid", tracing::field::display(cart.uuid));

            return Ok(CartLookup::Found(cart));
        }

        let cart = self
            .carts_repository
            .create_cart(&mut tx, CartUuid::new())
            .await?;

        self.sessions_repository
            .set_cart(&mut tx, session, Some(cart.uuid))
            .await?;

        tx.commit().await?;

        Span::current().record("cart_uuid", tracing::field::display(cart.uuid));

        info!(cart_uuid = %cart.uuid, "created cart");

        Ok(CartLookup::Created(cart))
    }

    async fn get_cart(&self, cart: CartUuid) -> Result<CartRecord, CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let record = self
            .load_cart(&mut tx, cart)
            .await?
            .ok_or(CartsServiceError::NotFound)?;

        tx.commit().await?;

        Ok(record)
    }

    #[tracing::instrument(name = "carts.service.add_product", skip(self), fields(cart_uuid = %cart), err)]
    async fn add_product(
        &self,
        cart: CartUuid,
        product_slug: &str,
    ) -> Result<CartRecord, CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let mut record = self.lock_open_cart(&mut tx, cart).await?;
        let product = self.find_product(&mut tx, product_slug).await?;

        if !product.available {
            return Err(CartsServiceError::ProductUnavailable);
        }

        let line = NewCartItem::new(product).into_line(Timestamp::now());
        let inserted = line.clone();

        if record.attach(line)? {
            self.items_repository
                .create_cart_item(&mut tx, cart, &inserted)
                .await?;
        }

        let record = self.persist_cart(&mut tx, &record).await?;

        tx.commit().await?;

        info!(cart_total = record.cart_total, lines = record.line_count(), "added product to cart");

        Ok(record)
    }

    #[tracing::instrument(name = "carts.service.remove_product", skip(self), fields(cart_uuid = %cart), err)]
    async fn remove_product(
        &self,
        cart: CartUuid,
        product_slug: &str,
    ) -> Result<CartRecord, CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let mut record = self.lock_open_cart(&mut tx, cart).await?;
        let product = self.find_product(&mut tx, product_slug).await?;

        if let Some(removed) = record.detach(product.uuid)? {
            self.items_repository
                .delete_cart_item(&mut tx, cart, removed.uuid)
                .await?;
        }

        let record = self.persist_cart(&mut tx, &record).await?;

        tx.commit().await?;

        info!(cart_total = record.cart_total, lines = record.line_count(), "removed product from cart");

        Ok(record)
    }

    #[tracing::instrument(
        name = "carts.service.change_quantity",
        skip(self),
        fields(cart_uuid = %cart, item_uuid = %item),
        err
    )]
    async fn change_quantity(
        &self,
        cart: CartUuid,
        item: CartItemUuid,
        qty: u32,
    ) -> Result<CartRecord, CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let mut record = self.lock_open_cart(&mut tx, cart).await?;

        record.change_quantity(item, qty)?;

        let record = self.persist_cart(&mut tx, &record).await?;

        tx.commit().await?;

        info!(cart_total = record.cart_total, "changed item quantity");

        Ok(record)
    }
}

/// Session carts and their lines.
#[automock]
#[async_trait]
pub trait CartsService: Send + Sync {
    /// Resolve the open cart referenced by a session, creating one when the
    /// session has none or its cart has been checked out.
    async fn get_or_create_cart(&self, session: SessionUuid) -> Result<CartLookup, CartsServiceError>;

    /// Retrieve a cart with its lines.
    async fn get_cart(&self, cart: CartUuid) -> Result<CartRecord, CartsServiceError>;

    /// Attach an available product as a single-unit line. Adding a product
    /// that already has a line leaves the cart unchanged.
    async fn add_product(
        &self,
        cart: CartUuid,
        product_slug: &str,
    ) -> Result<CartRecord, CartsServiceError>;

    /// Detach the line for a product, if there is one.
    async fn remove_product(
        &self,
        cart: CartUuid,
        product_slug: &str,
    ) -> Result<CartRecord, CartsServiceError>;

    /// Set the quantity of one line.
    async fn change_quantity(
        &self,
        cart: CartUuid,
        item: CartItemUuid,
        qty: u32,
    ) -> Result<CartRecord, CartsServiceError>;
}
