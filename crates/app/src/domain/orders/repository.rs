//! Orders Repository

use jiff_sqlx::{Date as SqlxDate, Timestamp as SqlxTimestamp};
use rustc_hash::FxHashMap;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};
use uuid::Uuid;

use crate::{
    database::{amount_to_i64, try_get_amount},
    domain::{
        accounts::records::UserUuid,
        carts::records::CartUuid,
        catalog::records::ProductUuid,
        orders::{
            data::BuyerInfo,
            records::{OrderItemRecord, OrderItemUuid, OrderRecord, OrderUuid},
            status::{BuyingType, OrderStatus},
        },
    },
};

const CREATE_ORDER_SQL: &str = include_str!("sql/create_order.sql");
const CREATE_ORDER_ITEMS_SQL: &str = include_str!("sql/create_order_items.sql");
const GET_ORDER_SQL: &str = include_str!("sql/get_order.sql");
const LOCK_ORDER_SQL: &str = include_str!("sql/lock_order.sql");
const LIST_ORDERS_SQL: &str = include_str!("sql/list_orders.sql");
const LIST_ORDERS_BY_STATUS_SQL: &str = include_str!("sql/list_orders_by_status.sql");
const LIST_ORDERS_FOR_USER_SQL: &str = include_str!("sql/list_orders_for_user.sql");
const GET_ORDER_ITEMS_SQL: &str = include_str!("sql/get_order_items.sql");
const UPDATE_ORDER_STATUS_SQL: &str = include_str!("sql/update_order_status.sql");
const MARK_ORDERS_PAID_SQL: &str = include_str!("sql/mark_orders_paid.sql");

/// Order header values copied from the cart at checkout.
#[derive(Debug, Clone, Copy)]
pub(crate) struct OrderSource {
    pub(crate) uuid: OrderUuid,
    pub(crate) user: Option<UserUuid>,
    pub(crate) cart: CartUuid,
    pub(crate) total: u64,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct PgOrdersRepository;

impl PgOrdersRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        source: OrderSource,
        buyer: &BuyerInfo,
    ) -> Result<OrderRecord, sqlx::Error> {
        query_as::<Postgres, OrderRecord>(CREATE_ORDER_SQL)
            .bind(source.uuid.into_uuid())
            .bind(source.user.map(UserUuid::into_uuid))
            .bind(source.cart.into_uuid())
            .bind(amount_to_i64(source.total, "total")?)
            .bind(&buyer.first_name)
            .bind(&buyer.last_name)
            .bind(&buyer.phone)
            .bind(&buyer.address)
            .bind(buyer.buying_type.as_str())
            .bind(buyer.delivery_date.map(SqlxDate::from))
            .bind(&buyer.comments)
            .fetch_one(&mut **tx)
            .await
    }

    /// Insert `items` in order; their position is their index.
    pub(crate) async fn create_order_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
        items: &[OrderItemRecord],
    ) -> Result<u64, sqlx::Error> {
        let mut uuids: Vec<Uuid> = Vec::with_capacity(items.len());
        let mut products: Vec<Uuid> = Vec::with_capacity(items.len());
        let mut titles: Vec<&str> = Vec::with_capacity(items.len());
        let mut quantities: Vec<i32> = Vec::with_capacity(items.len());
        let mut unit_prices: Vec<i64> = Vec::with_capacity(items.len());
        let mut item_totals: Vec<i64> = Vec::with_capacity(items.len());

        for item in items {
            uuids.push(item.uuid.into_uuid());
            products.push(item.product_uuid.into_uuid());
            titles.push(&item.title);
            quantities.push(i32::try_from(item.qty).map_err(|e| sqlx::Error::ColumnDecode {
                index: "qty".to_string(),
                source: Box::new(e),
            })?);
            unit_prices.push(amount_to_i64(item.unit_price, "unit_price")?);
            item_totals.push(amount_to_i64(item.item_total, "item_total")?);
        }

        let rows_affected = query(CREATE_ORDER_ITEMS_SQL)
            .bind(order.into_uuid())
            .bind(uuids)
            .bind(products)
            .bind(titles)
            .bind(quantities)
            .bind(unit_prices)
            .bind(item_totals)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn get_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
    ) -> Result<OrderRecord, sqlx::Error> {
        query_as::<Postgres, OrderRecord>(GET_ORDER_SQL)
            .bind(order.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn lock_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
    ) -> Result<OrderRecord, sqlx::Error> {
        query_as::<Postgres, OrderRecord>(LOCK_ORDER_SQL)
            .bind(order.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    /// All orders, or only those in `status`, newest first.
    pub(crate) async fn list_orders(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        status: Option<OrderStatus>,
    ) -> Result<Vec<OrderRecord>, sqlx::Error> {
        match status {
            Some(status) => {
                query_as::<Postgres, OrderRecord>(LIST_ORDERS_BY_STATUS_SQL)
                    .bind(status.as_str())
                    .fetch_all(&mut **tx)
                    .await
            }
            None => {
                query_as::<Postgres, OrderRecord>(LIST_ORDERS_SQL)
                    .fetch_all(&mut **tx)
                    .await
            }
        }
    }

    pub(crate) async fn list_orders_for_user(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<Vec<OrderRecord>, sqlx::Error> {
        query_as::<Postgres, OrderRecord>(LIST_ORDERS_FOR_USER_SQL)
            .bind(user.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    /// Load the lines of every order in `orders`.
    pub(crate) async fn attach_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        orders: &mut [OrderRecord],
    ) -> Result<(), sqlx::Error> {
        if orders.is_empty() {
            return Ok(());
        }

        let uuids: Vec<Uuid> = orders.iter().map(|order| order.uuid.into_uuid()).collect();

        let rows = query(GET_ORDER_ITEMS_SQL)
            .bind(uuids)
            .fetch_all(&mut **tx)
            .await?;

        let mut items: FxHashMap<OrderUuid, Vec<OrderItemRecord>> = FxHashMap::default();

        for row in &rows {
            let order = OrderUuid::from_uuid(row.try_get("order_uuid")?);

            items
                .entry(order)
                .or_default()
                .push(OrderItemRecord::from_row(row)?);
        }

        for order in orders {
            order.items = items.remove(&order.uuid).unwrap_or_default();
        }

        Ok(())
    }

    pub(crate) async fn update_order_status(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
        status: OrderStatus,
    ) -> Result<OrderRecord, sqlx::Error> {
        query_as::<Postgres, OrderRecord>(UPDATE_ORDER_STATUS_SQL)
            .bind(order.into_uuid())
            .bind(status.as_str())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn mark_orders_paid(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        orders: &[OrderUuid],
    ) -> Result<u64, sqlx::Error> {
        let uuids: Vec<Uuid> = orders.iter().map(|order| order.into_uuid()).collect();

        let rows_affected = query(MARK_ORDERS_PAID_SQL)
            .bind(uuids)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

fn decode_error(column: &str, error: impl std::error::Error + Send + Sync + 'static) -> sqlx::Error {
    sqlx::Error::ColumnDecode {
        index: column.to_string(),
        source: Box::new(error),
    }
}

impl<'r> FromRow<'r, PgRow> for OrderRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let buying_type: String = row.try_get("buying_type")?;
        let status: String = row.try_get("status")?;

        Ok(Self {
            uuid: OrderUuid::from_uuid(row.try_get("uuid")?),
            number: row.try_get("number")?,
            user_uuid: row
                .try_get::<Option<Uuid>, _>("user_uuid")?
                .map(UserUuid::from_uuid),
            cart_uuid: CartUuid::from_uuid(row.try_get("cart_uuid")?),
            total: try_get_amount(row, "total")?,
            first_name: row.try_get("first_name")?,
            last_name: row.try_get("last_name")?,
            phone: row.try_get("phone")?,
            address: row.try_get("address")?,
            buying_type: buying_type
                .parse::<BuyingType>()
                .map_err(|e| decode_error("buying_type", e))?,
            delivery_date: row
                .try_get::<Option<SqlxDate>, _>("delivery_date")?
                .map(SqlxDate::to_jiff),
            comments: row.try_get("comments")?,
            status: status
                .parse::<OrderStatus>()
                .map_err(|e| decode_error("status", e))?,
            items: Vec::new(),
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for OrderItemRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let qty: i32 = row.try_get("qty")?;

        Ok(Self {
            uuid: OrderItemUuid::from_uuid(row.try_get("uuid")?),
            product_uuid: ProductUuid::from_uuid(row.try_get("product_uuid")?),
            title: row.try_get("title")?,
            qty: u32::try_from(qty).map_err(|e| decode_error("qty", e))?,
            unit_price: try_get_amount(row, "unit_price")?,
            item_total: try_get_amount(row, "item_total")?,
        })
    }
}
