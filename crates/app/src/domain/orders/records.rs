//! Order Records

use jiff::{Timestamp, civil::Date};

use crate::{
    domain::{
        accounts::records::UserUuid,
        carts::records::CartUuid,
        catalog::records::ProductUuid,
        orders::status::{BuyingType, OrderStatus},
    },
    uuids::TypedUuid,
};

/// Order UUID
pub type OrderUuid = TypedUuid<OrderRecord>;

/// Order Record
///
/// A snapshot taken at checkout. Only `status` changes afterwards.
#[derive(Debug, Clone)]
pub struct OrderRecord {
    pub uuid: OrderUuid,

    /// Sequential, human-facing order number.
    pub number: i64,

    pub user_uuid: Option<UserUuid>,

    /// The checked-out cart this order was taken from.
    pub cart_uuid: CartUuid,

    pub total: u64,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub address: String,
    pub buying_type: BuyingType,
    pub delivery_date: Option<Date>,
    pub comments: String,
    pub status: OrderStatus,
    pub items: Vec<OrderItemRecord>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl OrderRecord {
    /// "Заказ №N"
    #[must_use]
    pub fn label(&self) -> String {
        format!("Заказ №{}", self.number)
    }
}

/// Order Item UUID
pub type OrderItemUuid = TypedUuid<OrderItemRecord>;

/// Order Item Record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderItemRecord {
    pub uuid: OrderItemUuid,
    pub product_uuid: ProductUuid,
    pub title: String,
    pub qty: u32,
    pub unit_price: u64,
    pub item_total: u64,
}
