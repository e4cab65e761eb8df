//! Order Responses

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::domain::orders::{
    records::{OrderItemRecord, OrderRecord},
    status::BuyingType,
};

/// Buying Type Choice
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct BuyingTypeResponse {
    /// Value to submit in `buying_type`
    pub value: String,

    /// Display label
    pub label: String,
}

impl BuyingTypeResponse {
    pub(crate) fn all() -> Vec<Self> {
        BuyingType::ALL.into_iter().map(Self::from).collect()
    }
}

impl From<BuyingType> for BuyingTypeResponse {
    fn from(buying_type: BuyingType) -> Self {
        Self {
            value: buying_type.as_str().to_string(),
            label: buying_type.label().to_string(),
        }
    }
}

/// Order Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderResponse {
    pub uuid: Uuid,

    /// Sequential order number
    pub number: i64,

    /// Human readable name, e.g. `Заказ №12`
    pub label: String,

    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub address: String,
    pub buying_type: String,
    pub buying_type_label: String,

    /// `YYYY-MM-DD`
    pub delivery_date: Option<String>,

    pub comments: String,
    pub status: String,
    pub status_label: String,

    /// Order total in minor units, fixed at checkout
    pub total: u64,

    pub items: Vec<OrderItemResponse>,
    pub created_at: String,
}

impl From<OrderRecord> for OrderResponse {
    fn from(order: OrderRecord) -> Self {
        Self {
            uuid: order.uuid.into_uuid(),
            number: order.number,
            label: order.label(),
            first_name: order.first_name,
            last_name: order.last_name,
            phone: order.phone,
            address: order.address,
            buying_type: order.buying_type.as_str().to_string(),
            buying_type_label: order.buying_type.label().to_string(),
            delivery_date: order.delivery_date.map(|date| date.to_string()),
            comments: order.comments,
            status: order.status.as_str().to_string(),
            status_label: order.status.label().to_string(),
            total: order.total,
            items: order.items.into_iter().map(Into::into).collect(),
            created_at: order.created_at.to_string(),
        }
    }
}

/// Order Item Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderItemResponse {
    pub uuid: Uuid,
    pub product_uuid: Uuid,
    pub title: String,
    pub qty: u32,
    pub unit_price: u64,
    pub item_total: u64,
}

impl From<OrderItemRecord> for OrderItemResponse {
    fn from(item: OrderItemRecord) -> Self {
        Self {
            uuid: item.uuid.into_uuid(),
            product_uuid: item.product_uuid.into_uuid(),
            title: item.title,
            qty: item.qty,
            unit_price: item.unit_price,
            item_total: item.item_total,
        }
    }
}
