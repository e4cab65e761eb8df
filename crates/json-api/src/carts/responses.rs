//! Cart Responses

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::domain::carts::records::{CartItemRecord, CartRecord};

/// Cart counters shown in page headers and returned by cart mutations.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartSummary {
    /// Number of lines in the cart
    pub cart_total: usize,

    /// Cart total in minor units
    pub cart_total_price: u64,
}

impl From<&CartRecord> for CartSummary {
    fn from(cart: &CartRecord) -> Self {
        Self {
            cart_total: cart.items.len(),
            cart_total_price: cart.cart_total,
        }
    }
}

/// Cart Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartResponse {
    pub uuid: Uuid,
    pub items: Vec<CartItemResponse>,

    /// Number of lines in the cart
    pub cart_total: usize,

    /// Cart total in minor units
    pub cart_total_price: u64,
}

impl From<CartRecord> for CartResponse {
    fn from(cart: CartRecord) -> Self {
        Self {
            uuid: cart.uuid.into_uuid(),
            cart_total: cart.items.len(),
            cart_total_price: cart.cart_total,
            items: cart.items.into_iter().map(Into::into).collect(),
        }
    }
}

/// Cart Item Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartItemResponse {
    pub uuid: Uuid,
    pub product_uuid: Uuid,
    pub product_slug: String,
    pub title: String,
    pub qty: u32,

    /// Price of one unit in minor units
    pub unit_price: u64,

    /// `qty * unit_price`
    pub item_total: u64,
}

impl From<CartItemRecord> for CartItemResponse {
    fn from(item: CartItemRecord) -> Self {
        Self {
            uuid: item.uuid.into_uuid(),
            product_uuid: item.product_uuid.into_uuid(),
            product_slug: item.product_slug,
            title: item.title,
            qty: item.qty,
            unit_price: item.unit_price,
            item_total: item.item_total,
        }
    }
}
