//! Cart Items Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use rustc_hash::FxHashMap;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};
use uuid::Uuid;

use crate::{
    database::{amount_to_i64, try_get_amount},
    domain::{
        carts::records::{CartItemRecord, CartItemUuid, CartUuid},
        catalog::records::ProductUuid,
    },
};

const GET_CART_ITEMS_SQL: &str = include_str!("../sql/get_cart_items.sql");
const CREATE_CART_ITEM_SQL: &str = include_str!("../sql/create_cart_item.sql");
const DELETE_CART_ITEM_SQL: &str = include_str!("../sql/delete_cart_item.sql");
const UPDATE_CART_ITEMS_SQL: &str = include_str!("../sql/update_cart_items.sql");
const GET_CATALOG_PRICES_SQL: &str = include_str!("../sql/get_catalog_prices.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgCartItemsRepository;

impl PgCartItemsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn get_cart_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: CartUuid,
    ) -> Result<Vec<CartItemRecord>, sqlx::Error> {
        query_as::<Postgres, CartItemRecord>(GET_CART_ITEMS_SQL)
            .bind(cart.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn create_cart_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: CartUuid,
        item: &CartItemRecord,
    ) -> Result<(), sqlx::Error> {
        query(CREATE_CART_ITEM_SQL)
            .bind(item.uuid.into_uuid())
            .bind(cart.into_uuid())
            .bind(item.product_uuid.into_uuid())
            .bind(qty_to_i32(item.qty)?)
            .bind(amount_to_i64(item.unit_price, "unit_price")?)
            .bind(amount_to_i64(item.item_total, "item_total")?)
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    pub(crate) async fn delete_cart_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: CartUuid,
        item: CartItemUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_CART_ITEM_SQL)
            .bind(item.into_uuid())
            .bind(cart.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    /// Write quantities, prices and totals for `items`; unchanged rows are skipped.
    pub(crate) async fn update_cart_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: CartUuid,
        items: &[CartItemRecord],
    ) -> Result<u64, sqlx::Error> {
        if items.is_empty() {
            return Ok(0);
        }

        let mut uuids: Vec<Uuid> = Vec::with_capacity(items.len());
        let mut quantities: Vec<i32> = Vec::with_capacity(items.len());
        let mut unit_prices: Vec<i64> = Vec::with_capacity(items.len());
        let mut item_totals: Vec<i64> = Vec::with_capacity(items.len());

        for item in items {
            uuids.push(item.uuid.into_uuid());
            quantities.push(qty_to_i32(item.qty)?);
            unit_prices.push(amount_to_i64(item.unit_price, "unit_price")?);
            item_totals.push(amount_to_i64(item.item_total, "item_total")?);
        }

        let rows_affected = query(UPDATE_CART_ITEMS_SQL)
            .bind(cart.into_uuid())
            .bind(uuids)
            .bind(quantities)
            .bind(unit_prices)
            .bind(item_totals)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    /// Current catalog price for each of `products`.
    pub(crate) async fn get_catalog_prices(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        products: &[ProductUuid],
    ) -> Result<FxHashMap<ProductUuid, u64>, sqlx::Error> {
        if products.is_empty() {
            return Ok(FxHashMap::default());
        }

        let uuids: Vec<Uuid> = products.iter().map(|product| product.into_uuid()).collect();

        let rows = query(GET_CATALOG_PRICES_SQL)
            .bind(uuids)
            .fetch_all(&mut **tx)
            .await?;

        let mut prices = FxHashMap::with_capacity_and_hasher(rows.len(), Default::default());

        for row in &rows {
            prices.insert(
                ProductUuid::from_uuid(row.try_get("uuid")?),
                try_get_amount(row, "price")?,
            );
        }

        Ok(prices)
    }
}

fn qty_to_i32(qty: u32) -> Result<i32, sqlx::Error> {
    i32::try_from(qty).map_err(|e| sqlx::Error::ColumnDecode {
        index: "qty".to_string(),
        source: Box::new(e),
    })
}

impl<'r> FromRow<'r, PgRow> for CartItemRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let qty: i32 = row.try_get("qty")?;

        Ok(Self {
            uuid: CartItemUuid::from_uuid(row.try_get("uuid")?),
            product_uuid: ProductUuid::from_uuid(row.try_get("product_uuid")?),
            product_slug: row.try_get("product_slug")?,
            title: row.try_get("title")?,
            qty: u32::try_from(qty).map_err(|e| sqlx::Error::ColumnDecode {
                index: "qty".to_string(),
                source: Box::new(e),
            })?,
            unit_price: try_get_amount(row, "unit_price")?,
            item_total: try_get_amount(row, "item_total")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
