//! Notification Records

use jiff::Timestamp;

use crate::{
    domain::{accounts::records::UserUuid, catalog::records::ProductUuid},
    uuids::TypedUuid,
};

/// Product Watch UUID
pub type WatchUuid = TypedUuid<WatchRecord>;

/// A user's pending interest in an unavailable product.
#[derive(Debug, Clone)]
pub struct WatchRecord {
    pub uuid: WatchUuid,
    pub user_uuid: UserUuid,
    pub product_uuid: ProductUuid,
    pub created_at: Timestamp,
}

/// Notification UUID
pub type NotificationUuid = TypedUuid<NotificationRecord>;

/// Notification Record
#[derive(Debug, Clone)]
pub struct NotificationRecord {
    pub uuid: NotificationUuid,
    pub user_uuid: UserUuid,
    pub product_uuid: ProductUuid,
    pub product_slug: String,
    pub message: String,
    pub created_at: Timestamp,
    pub read_at: Option<Timestamp>,
}

/// Message recorded when a watched product comes back in stock.
#[must_use]
pub fn back_in_stock_message(title: &str) -> String {
    format!("Товар «{title}» снова в наличии")
}
