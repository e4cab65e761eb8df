//! Cart Data

use jiff::Timestamp;

use crate::domain::{
    carts::records::{CartItemRecord, CartItemUuid, CartRecord},
    catalog::records::ProductRecord,
};

/// Result of resolving the cart for a session.
#[derive(Debug, Clone)]
pub enum CartLookup {
    /// The session's open cart.
    Found(CartRecord),

    /// A new empty cart, now referenced by the session.
    Created(CartRecord),
}

impl CartLookup {
    /// The cart, found or created.
    #[must_use]
    pub fn cart(&self) -> &CartRecord {
        match self {
            Self::Found(cart) | Self::Created(cart) => cart,
        }
    }

    /// Take the cart, found or created.
    #[must_use]
    pub fn into_cart(self) -> CartRecord {
        match self {
            Self::Found(cart) | Self::Created(cart) => cart,
        }
    }

    /// Whether this request created the cart.
    #[must_use]
    pub fn is_created(&self) -> bool {
        matches!(self, Self::Created(_))
    }
}

/// New Cart Item Data
#[derive(Debug, Clone)]
pub struct NewCartItem {
    pub uuid: CartItemUuid,
    pub product: ProductRecord,
}

impl NewCartItem {
    /// A single-unit line at the product's current price.
    #[must_use]
    pub fn new(product: ProductRecord) -> Self {
        Self {
            uuid: CartItemUuid::new(),
            product,
        }
    }

    /// A single-unit line at the product's current price.
    #[must_use]
    pub fn into_line(self, now: Timestamp) -> CartItemRecord {
        CartItemRecord {
            uuid: self.uuid,
            product_uuid: self.product.uuid,
            product_slug: self.product.slug,
            title: self.product.title,
            qty: 1,
            unit_price: self.product.price,
            item_total: self.product.price,
            created_at: now,
            updated_at: now,
        }
    }
}
