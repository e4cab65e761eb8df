//! Orders service.

use async_trait::async_trait;
use mockall::automock;
use sqlx::{Postgres, Transaction};
use tracing::{Span, info};

use crate::{
    database::Db,
    domain::{
        accounts::records::UserUuid,
        carts::repositories::{PgCartItemsRepository, PgCartsRepository},
        orders::{
            data::BuyerForm,
            errors::OrdersServiceError,
            records::{OrderItemRecord, OrderItemUuid, OrderRecord, OrderUuid},
            repository::{OrderSource, PgOrdersRepository},
            status::OrderStatus,
        },
        sessions::{records::SessionUuid, repository::PgSessionsRepository},
    },
};

/// Postgres-backed [`OrdersService`].
#[derive(Debug, Clone)]
pub struct PgOrdersService {
    db: Db,
    repository: PgOrdersRepository,
    carts_repository: PgCartsRepository,
    items_repository: PgCartItemsRepository,
    sessions_repository: PgSessionsRepository,
}

impl PgOrdersService {
    /// Service over `db`.
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgOrdersRepository::new(),
            carts_repository: PgCartsRepository::new(),
            items_repository: PgCartItemsRepository::new(),
            sessions_repository: PgSessionsRepository::new(),
        }
    }

    async fn with_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderRecord,
    ) -> Result<OrderRecord, OrdersServiceError> {
        let mut orders = [order];

        self.repository.attach_items(tx, &mut orders).await?;

        let [order] = orders;

        Ok(order)
    }
}

#[async_trait]
impl OrdersService for PgOrdersService {
    #[tracing::instrument(
        name = "orders.service.place_order",
        skip(self, buyer),
        fields(order_uuid = tracing::field::Empty, cart_uuid = tracing::field::Empty),
        err
    )]
    async fn place_order(
        &self,
        session: SessionUuid,
        user: Option<UserUuid>,
        buyer: BuyerForm,
    ) -> Result<OrderRecord, OrdersServiceError> {
        let buyer = buyer.validate()?;

        let mut tx = self.db.begin().await?;

        let session_record = match self.sessions_repository.lock_session(&mut tx, session).await {
            Ok(record) => record,
            Err(sqlx::Error::RowNotFound) => return Err(OrdersServiceError::SessionNotFound),
            Err(error) => return Err(error.into()),
        };

        let cart_uuid = session_record.cart_uuid.ok_or(OrdersServiceError::EmptyCart)?;

        Span::current().record("cart_uuid", tracing::field::display(cart_uuid));

        let cart = self
            .carts_repository
            .lock_cart(&mut tx, cart_uuid)
            .await?
            .filter(|cart| !cart.is_checked_out())
            .ok_or(OrdersServiceError::EmptyCart)?;

        let lines = self.items_repository.get_cart_items(&mut tx, cart.uuid).await?;

        if lines.is_empty() {
            return Err(OrdersServiceError::EmptyCart);
        }

        let items: Vec<OrderItemRecord> = lines
            .into_iter()
            .map(|line| OrderItemRecord {
                uuid: OrderItemUuid::new(),
                product_uuid: line.product_uuid,
                title: line.title,
                qty: line.qty,
                unit_price: line.unit_price,
                item_total: line.item_total,
            })
            .collect();

        let source = OrderSource {
            uuid: OrderUuid::new(),
            user,
            cart: cart.uuid,
            total: cart.cart_total,
        };

        let mut order = self.repository.create_order(&mut tx, source, &buyer).await?;

        self.repository
            .create_order_items(&mut tx, order.uuid, &items)
            .await?;

        self.carts_repository
            .mark_checked_out(&mut tx, cart.uuid)
            .await?;

        self.sessions_repository
            .set_cart(&mut tx, session, None)
            .await?;

        tx.commit().await?;

        order.items = items;

        Span::current().record("order_uuid", tracing::field::display(order.uuid));

        info!(order_number = order.number, total = order.total, "placed order");

        Ok(order)
    }

    async fn get_order(&self, order: OrderUuid) -> Result<OrderRecord, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let order = self.repository.get_order(&mut tx, order).await?;
        let order = self.with_items(&mut tx, order).await?;

        tx.commit().await?;

        Ok(order)
    }

    async fn list_orders_for_user(
        &self,
        user: UserUuid,
    ) -> Result<Vec<OrderRecord>, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let mut orders = self.repository.list_orders_for_user(&mut tx, user).await?;

        self.repository.attach_items(&mut tx, &mut orders).await?;

        tx.commit().await?;

        Ok(orders)
    }

    async fn list_orders(
        &self,
        status: Option<OrderStatus>,
    ) -> Result<Vec<OrderRecord>, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let mut orders = self.repository.list_orders(&mut tx, status).await?;

        self.repository.attach_items(&mut tx, &mut orders).await?;

        tx.commit().await?;

        Ok(orders)
    }

    #[tracing::instrument(name = "orders.service.advance_order", skip(self), fields(order_uuid = %order), err)]
    async fn advance_order(&self, order: OrderUuid) -> Result<OrderRecord, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let current = self.repository.lock_order(&mut tx, order).await?;

        let next = current
            .status
            .advance()
            .ok_or(OrdersServiceError::InvalidTransition)?;

        let updated = self
            .repository
            .update_order_status(&mut tx, order, next)
            .await?;

        let updated = self.with_items(&mut tx, updated).await?;

        tx.commit().await?;

        info!(from = %current.status, to = %next, "advanced order");

        Ok(updated)
    }

    #[tracing::instrument(name = "orders.service.mark_paid", skip(self, orders), fields(requested = orders.len()), err)]
    async fn mark_paid(&self, orders: &[OrderUuid]) -> Result<u64, OrdersServiceError> {
        if orders.is_empty() {
            return Ok(0);
        }

        let mut tx = self.db.begin().await?;

        let marked = self.repository.mark_orders_paid(&mut tx, orders).await?;

        tx.commit().await?;

        info!(marked, status = %OrderStatus::Paid, "marked orders paid");

        Ok(marked)
    }
}

/// Checkout and order administration.
#[automock]
#[async_trait]
pub trait OrdersService: Send + Sync {
    /// Turn the session's cart into an order.
    ///
    /// The cart is closed and detached from the session in the same
    /// transaction, so a repeated submission fails with `EmptyCart`.
    async fn place_order(
        &self,
        session: SessionUuid,
        user: Option<UserUuid>,
        buyer: BuyerForm,
    ) -> Result<OrderRecord, OrdersServiceError>;

    async fn get_order(&self, order: OrderUuid) -> Result<OrderRecord, OrdersServiceError>;

    /// Orders placed by a user, newest first.
    async fn list_orders_for_user(
        &self,
        user: UserUuid,
    ) -> Result<Vec<OrderRecord>, OrdersServiceError>;

    /// Every order, or only those in `status`, newest first.
    async fn list_orders(
        &self,
        status: Option<OrderStatus>,
    ) -> Result<Vec<OrderRecord>, OrdersServiceError>;

    /// Move an order one step along `accepted -> in_progress -> paid`.
    async fn advance_order(&self, order: OrderUuid) -> Result<OrderRecord, OrdersServiceError>;

    /// Force the listed orders to `paid`. Returns how many changed.
    async fn mark_paid(&self, orders: &[OrderUuid]) -> Result<u64, OrdersServiceError>;
}
