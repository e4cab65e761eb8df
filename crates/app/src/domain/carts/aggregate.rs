//! Cart Aggregate
//!
//! Pure cart rules, independent of storage. Each mutator leaves the cart with
//! `item_total == qty * unit_price` on every line and `cart_total` equal to
//! their sum, or returns an error and leaves the cart unchanged.

use rustc_hash::FxHashMap;
use thiserror::Error;

use crate::domain::{
    carts::records::{CartItemRecord, CartItemUuid, CartRecord},
    catalog::records::ProductUuid,
};

/// Largest amount the store can persist.
pub const MAX_AMOUNT: u64 = i64::MAX.unsigned_abs();

/// Largest line quantity the store can persist.
pub const MAX_QTY: u32 = i32::MAX.unsigned_abs();

/// Cart rule violations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CartError {
    #[error("cart has been checked out")]
    Closed,

    #[error("item is not part of this cart")]
    ItemNotFound,

    #[error("quantity must be between 1 and 2147483647")]
    InvalidQuantity,

    #[error("cart amount out of range")]
    Overflow,
}

impl CartRecord {
    /// Number of distinct lines.
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.items.len()
    }

    /// Whether an order was placed from this cart.
    #[must_use]
    pub fn is_checked_out(&self) -> bool {
        self.checked_out_at.is_some()
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Line by its id.
    #[must_use]
    pub fn item(&self, item: CartItemUuid) -> Option<&CartItemRecord> {
        self.items.iter().find(|line| line.uuid == item)
    }

    /// Line holding `product`, if any.
    #[must_use]
    pub fn item_for_product(&self, product: ProductUuid) -> Option<&CartItemRecord> {
        self.items.iter().find(|line| line.product_uuid == product)
    }

    /// Attach a line unless one already exists for the same product.
    ///
    /// Returns `true` when the line was attached. An existing line is left
    /// as-is, quantity included.
    ///
    /// # Errors
    ///
    /// Fails on a checked-out cart or when the new total is out of range.
    pub fn attach(&mut self, line: CartItemRecord) -> Result<bool, CartError> {
        self.ensure_open()?;

        if self.item_for_product(line.product_uuid).is_some() {
            return Ok(false);
        }

        self.items.push(line);

        if let Err(error) = self.recompute() {
            self.items.pop();

            return Err(error);
        }

        Ok(true)
    }

    /// Detach the line for `product`; absent products are a no-op.
    ///
    /// # Errors
    ///
    /// Fails on a checked-out cart.
    pub fn detach(&mut self, product: ProductUuid) -> Result<Option<CartItemRecord>, CartError> {
        self.ensure_open()?;

        let Some(position) = self
            .items
            .iter()
            .position(|line| line.product_uuid == product)
        else {
            return Ok(None);
        };

        let removed = self.items.remove(position);

        // Removing a line can only lower the sum.
        self.recompute()?;

        Ok(Some(removed))
    }

    /// Set the quantity of one line.
    ///
    /// # Errors
    ///
    /// Fails on a checked-out cart, an unknown item, a quantity outside
    /// `1..=MAX_QTY`, or when a total would be out of range.
    pub fn change_quantity(&mut self, item: CartItemUuid, qty: u32) -> Result<(), CartError> {
        self.ensure_open()?;

        if !(1..=MAX_QTY).contains(&qty) {
            return Err(CartError::InvalidQuantity);
        }

        let line = self
            .items
            .iter_mut()
            .find(|line| line.uuid == item)
            .ok_or(CartError::ItemNotFound)?;

        let previous = std::mem::replace(&mut line.qty, qty);

        if let Err(error) = self.recompute() {
            if let Some(line) = self.items.iter_mut().find(|line| line.uuid == item) {
                line.qty = previous;
            }

            self.recompute()?;

            return Err(error);
        }

        Ok(())
    }

    /// Refresh unit prices from `prices`. Lines for products missing from the
    /// map keep their price.
    ///
    /// # Errors
    ///
    /// Fails when a total would be out of range; prices are restored.
    pub fn reprice(&mut self, prices: &FxHashMap<ProductUuid, u64>) -> Result<(), CartError> {
        let previous: Vec<u64> = self.items.iter().map(|line| line.unit_price).collect();

        for line in &mut self.items {
            if let Some(price) = prices.get(&line.product_uuid) {
                line.unit_price = *price;
            }
        }

        if let Err(error) = self.recompute() {
            for (line, price) in self.items.iter_mut().zip(previous) {
                line.unit_price = price;
            }

            self.recompute()?;

            return Err(error);
        }

        Ok(())
    }

    /// Recompute every line total and the cart total.
    ///
    /// # Errors
    ///
    /// Returns `Overflow` without modifying the cart when any amount exceeds
    /// [`MAX_AMOUNT`].
    pub fn recompute(&mut self) -> Result<u64, CartError> {
        let mut line_totals = Vec::with_capacity(self.items.len());
        let mut cart_total: u64 = 0;

        for line in &self.items {
            let item_total = line_total(line.qty, line.unit_price)?;

            cart_total = cart_total
                .checked_add(item_total)
                .filter(|total| *total <= MAX_AMOUNT)
                .ok_or(CartError::Overflow)?;

            line_totals.push(item_total);
        }

        for (line, item_total) in self.items.iter_mut().zip(line_totals) {
            line.item_total = item_total;
        }

        self.cart_total = cart_total;

        Ok(cart_total)
    }

    fn ensure_open(&self) -> Result<(), CartError> {
        if self.is_checked_out() {
            return Err(CartError::Closed);
        }

        Ok(())
    }
}

fn line_total(qty: u32, unit_price: u64) -> Result<u64, CartError> {
    u64::from(qty)
        .checked_mul(unit_price)
        .filter(|total| *total <= MAX_AMOUNT)
        .ok_or(CartError::Overflow)
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;

    use crate::domain::carts::records::CartUuid;

    use super::*;

    fn empty_cart() -> CartRecord {
        CartRecord {
            uuid: CartUuid::new(),
            cart_total: 0,
            items: Vec::new(),
            checked_out_at: None,
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
        }
    }

    fn line(product: ProductUuid, unit_price: u64) -> CartItemRecord {
        CartItemRecord {
            uuid: CartItemUuid::new(),
            product_uuid: product,
            product_slug: format!("product-{product}"),
            title: "Product".to_string(),
            qty: 1,
            unit_price,
            item_total: unit_price,
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
        }
    }

    fn assert_consistent(cart: &CartRecord) {
        for line in &cart.items {
            assert_eq!(
                line.item_total,
                u64::from(line.qty) * line.unit_price,
                "line total should be qty * unit price"
            );
        }

        assert_eq!(
            cart.cart_total,
            cart.items.iter().map(|line| line.item_total).sum::<u64>(),
            "cart total should be the sum of line totals"
        );
    }

    #[test]
    fn attach_adds_line_and_updates_total() {
        let mut cart = empty_cart();
        let product = ProductUuid::new();

        let attached = cart.attach(line(product, 1000)).expect("attach should succeed");

        assert!(attached);
        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.cart_total, 1000);
        assert_consistent(&cart);
    }

    #[test]
    fn attaching_same_product_twice_keeps_one_line_and_qty() {
        let mut cart = empty_cart();
        let product = ProductUuid::new();

        cart.attach(line(product, 1000)).expect("attach should succeed");
        let attached = cart.attach(line(product, 1000)).expect("attach should succeed");

        assert!(!attached, "second attach should be a no-op");
        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.items[0].qty, 1);
        assert_eq!(cart.cart_total, 1000);
    }

    #[test]
    fn change_quantity_updates_line_and_cart_totals() {
        let mut cart = empty_cart();
        let phone = line(ProductUuid::new(), 1000);
        let phone_uuid = phone.uuid;

        cart.attach(phone).expect("attach should succeed");
        cart.attach(line(ProductUuid::new(), 250))
            .expect("attach should succeed");

        cart.change_quantity(phone_uuid, 3)
            .expect("change should succeed");

        assert_eq!(cart.item(phone_uuid).map(|line| line.item_total), Some(3000));
        assert_eq!(cart.cart_total, 3250);
        assert_consistent(&cart);
    }

    #[test]
    fn change_quantity_rejects_zero() {
        let mut cart = empty_cart();
        let item = line(ProductUuid::new(), 1000);
        let item_uuid = item.uuid;

        cart.attach(item).expect("attach should succeed");

        assert_eq!(
            cart.change_quantity(item_uuid, 0),
            Err(CartError::InvalidQuantity)
        );
        assert_eq!(cart.items[0].qty, 1);
    }

    #[test]
    fn change_quantity_rejects_unstorable_quantity() {
        let mut cart = empty_cart();
        let item = line(ProductUuid::new(), 1000);
        let item_uuid = item.uuid;

        cart.attach(item).expect("attach should succeed");

        assert_eq!(
            cart.change_quantity(item_uuid, 3_000_000_000),
            Err(CartError::InvalidQuantity)
        );
        assert_eq!(cart.items[0].qty, 1);
        assert_eq!(cart.cart_total, 1000);

        cart.change_quantity(item_uuid, MAX_QTY)
            .expect("largest storable quantity should be accepted");

        assert_eq!(cart.items[0].qty, MAX_QTY);
        assert_consistent(&cart);
    }

    #[test]
    fn change_quantity_unknown_item_is_not_found() {
        let mut cart = empty_cart();

        assert_eq!(
            cart.change_quantity(CartItemUuid::new(), 2),
            Err(CartError::ItemNotFound)
        );
    }

    #[test]
    fn change_quantity_overflow_leaves_cart_unchanged() {
        let mut cart = empty_cart();
        let item = line(ProductUuid::new(), MAX_AMOUNT / 2 + 1);
        let item_uuid = item.uuid;

        cart.attach(item).expect("attach should succeed");

        assert_eq!(cart.change_quantity(item_uuid, 2), Err(CartError::Overflow));
        assert_eq!(cart.items[0].qty, 1);
        assert_consistent(&cart);
    }

    #[test]
    fn attach_overflowing_sum_is_rejected() {
        let mut cart = empty_cart();

        cart.attach(line(ProductUuid::new(), MAX_AMOUNT))
            .expect("attach should succeed");

        assert_eq!(
            cart.attach(line(ProductUuid::new(), 1)),
            Err(CartError::Overflow)
        );
        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.cart_total, MAX_AMOUNT);
    }

    #[test]
    fn detach_removes_line_and_updates_total() {
        let mut cart = empty_cart();
        let kept = ProductUuid::new();
        let removed = ProductUuid::new();

        cart.attach(line(kept, 100)).expect("attach should succeed");
        cart.attach(line(removed, 900)).expect("attach should succeed");

        let detached = cart.detach(removed).expect("detach should succeed");

        assert_eq!(detached.map(|line| line.product_uuid), Some(removed));
        assert_eq!(cart.cart_total, 100);
        assert_consistent(&cart);
    }

    #[test]
    fn detach_absent_product_is_noop() {
        let mut cart = empty_cart();

        cart.attach(line(ProductUuid::new(), 100))
            .expect("attach should succeed");

        let detached = cart.detach(ProductUuid::new()).expect("detach should succeed");

        assert!(detached.is_none());
        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.cart_total, 100);
    }

    #[test]
    fn reprice_refreshes_known_products_only() {
        let mut cart = empty_cart();
        let repriced = ProductUuid::new();
        let untouched = ProductUuid::new();

        cart.attach(line(repriced, 100)).expect("attach should succeed");
        cart.attach(line(untouched, 50)).expect("attach should succeed");

        let mut prices = FxHashMap::default();
        prices.insert(repriced, 175);

        cart.reprice(&prices).expect("reprice should succeed");

        assert_eq!(
            cart.item_for_product(repriced).map(|line| line.unit_price),
            Some(175)
        );
        assert_eq!(
            cart.item_for_product(untouched).map(|line| line.unit_price),
            Some(50)
        );
        assert_eq!(cart.cart_total, 225);
        assert_consistent(&cart);
    }

    #[test]
    fn reprice_overflow_restores_prices() {
        let mut cart = empty_cart();
        let product = ProductUuid::new();
        let other = ProductUuid::new();

        cart.attach(line(product, 10)).expect("attach should succeed");
        cart.attach(line(other, 10)).expect("attach should succeed");

        let mut prices = FxHashMap::default();
        prices.insert(product, MAX_AMOUNT);

        assert_eq!(cart.reprice(&prices), Err(CartError::Overflow));
        assert_eq!(cart.cart_total, 20);
        assert!(cart.items.iter().all(|line| line.unit_price == 10));
    }

    #[test]
    fn checked_out_cart_rejects_mutation() {
        let mut cart = empty_cart();
        let item = line(ProductUuid::new(), 100);
        let item_uuid = item.uuid;
        let product = item.product_uuid;

        cart.attach(item).expect("attach should succeed");
        cart.checked_out_at = Some(Timestamp::UNIX_EPOCH);

        assert_eq!(
            cart.attach(line(ProductUuid::new(), 1)),
            Err(CartError::Closed)
        );
        assert_eq!(cart.detach(product), Err(CartError::Closed));
        assert_eq!(cart.change_quantity(item_uuid, 2), Err(CartError::Closed));
        assert_eq!(cart.cart_total, 100);
    }

    #[test]
    fn recompute_repairs_stale_totals() {
        let mut cart = empty_cart();
        let mut stale = line(ProductUuid::new(), 40);
        stale.qty = 5;
        stale.item_total = 1;
        cart.items.push(stale);
        cart.cart_total = 7;

        assert_eq!(cart.recompute(), Ok(200));
        assert_consistent(&cart);
    }
}
