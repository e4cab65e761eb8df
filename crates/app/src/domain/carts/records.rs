//! Cart Records

use jiff::Timestamp;

use crate::{domain::catalog::records::ProductUuid, uuids::TypedUuid};

/// Cart UUID
pub type CartUuid = TypedUuid<CartRecord>;

/// Cart Record
#[derive(Debug, Clone)]
pub struct CartRecord {
    pub uuid: CartUuid,

    /// Sum of `item_total` over `items`, in minor units.
    pub cart_total: u64,

    pub items: Vec<CartItemRecord>,

    /// Set once the cart has been turned into an order.
    pub checked_out_at: Option<Timestamp>,

    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Cart Item UUID
pub type CartItemUuid = TypedUuid<CartItemRecord>;

/// Cart Item Record
#[derive(Debug, Clone, PartialEq)]
pub struct CartItemRecord {
    pub uuid: CartItemUuid,
    pub product_uuid: ProductUuid,
    pub product_slug: String,
    pub title: String,
    pub qty: u32,
    pub unit_price: u64,

    /// `qty * unit_price`
    pub item_total: u64,

    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
