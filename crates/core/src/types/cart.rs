//! Shopping cart.
//!
//! The cart is transient session state: it is never written to the local
//! store, only handed to checkout, which snapshots the lines into an order.
//!
//! ## Invariants
//!
//! - No line ever has a quantity of zero. Reducing a line to zero removes it.
//! - At most one line exists per product id. Adding the same product again
//!   increments the existing line.
//!
//! Both hold for carts built through the methods below and for carts decoded
//! from JSON, which are normalized on the way in.

use serde::{Deserialize, Serialize};

use super::{Money, Product, ProductId};

/// A single cart line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    pub id: ProductId,
    pub name: String,
    pub price: Money,
    pub quantity: u32,
    pub image: String,
}

impl CartItem {
    /// Create a line for one unit of a product.
    #[must_use]
    pub fn from_product(product: &Product) -> Self {
        Self {
            id: product.id,
            name: product.name.clone(),
            price: product.price,
            quantity: 1,
            image: product.image.clone(),
        }
    }

    /// Price multiplied by quantity.
    #[must_use]
    pub fn line_total(&self) -> Money {
        self.price.times(self.quantity)
    }
}

/// An ordered list of cart lines.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<CartItem>", into = "Vec<CartItem>")]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Add one unit of a product.
    ///
    /// Increments the existing line if the product is already in the cart,
    /// otherwise appends a new line with quantity 1.
    pub fn add(&mut self, product: &Product) {
        match self.items.iter_mut().find(|item| item.id == product.id) {
            Some(item) => item.quantity = item.quantity.saturating_add(1),
            None => self.items.push(CartItem::from_product(product)),
        }
    }

    /// Adjust a line's quantity by a signed delta.
    ///
    /// A line that drops to zero or below is removed. Returns `false` if the
    /// product is not in the cart.
    pub fn update_quantity(&mut self, product_id: ProductId, delta: i64) -> bool {
        let Some(pos) = self.position(product_id) else {
            return false;
        };

        let current = self.items.get(pos).map_or(0, |item| i64::from(item.quantity));
        let next = current.saturating_add(delta);
        if next <= 0 {
            self.items.remove(pos);
        } else if let Some(item) = self.items.get_mut(pos) {
            item.quantity = u32::try_from(next).unwrap_or(u32::MAX);
        }
        true
    }

    /// Set a line's quantity. Zero removes the line.
    ///
    /// Returns `false` if the product is not in the cart.
    pub fn set_quantity(&mut self, product_id: ProductId, quantity: u32) -> bool {
        let Some(pos) = self.position(product_id) else {
            return false;
        };

        if quantity == 0 {
            self.items.remove(pos);
        } else if let Some(item) = self.items.get_mut(pos) {
            item.quantity = quantity;
        }
        true
    }

    /// Remove a product's line entirely. Returns `false` if it was absent.
    pub fn remove(&mut self, product_id: ProductId) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.id != product_id);
        self.items.len() != before
    }

    /// Remove every line.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Lines in insertion order.
    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Total number of units across all lines.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.items
            .iter()
            .fold(0u32, |acc, item| acc.saturating_add(item.quantity))
    }

    /// Sum of price times quantity over all lines.
    #[must_use]
    pub fn total(&self) -> Money {
        self.items.iter().map(CartItem::line_total).sum()
    }

    fn position(&self, product_id: ProductId) -> Option<usize> {
        self.items.iter().position(|item| item.id == product_id)
    }
}

impl From<Vec<CartItem>> for Cart {
    fn from(lines: Vec<CartItem>) -> Self {
        let mut items: Vec<CartItem> = Vec::with_capacity(lines.len());
        for line in lines.into_iter().filter(|line| line.quantity > 0) {
            match items.iter_mut().find(|item| item.id == line.id) {
                Some(existing) => {
                    existing.quantity = existing.quantity.saturating_add(line.quantity);
                }
                None => items.push(line),
            }
        }
        Self { items }
    }
}

impl From<Cart> for Vec<CartItem> {
    fn from(cart: Cart) -> Self {
        cart.items
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use std::collections::BTreeMap;

    use proptest::prelude::*;

    use super::*;

    fn product(id: u32, price: u64) -> Product {
        Product {
            id: ProductId::new(id),
            name: format!("Product {id}"),
            category: "Чехлы".to_string(),
            price: Money::new(price),
            image: format!("https://cdn.example.com/{id}.jpg"),
            badge: None,
        }
    }

    fn assert_invariants(cart: &Cart) {
        for (i, item) in cart.items().iter().enumerate() {
            assert!(item.quantity > 0, "line {} has zero quantity", item.id);
            assert!(
                cart.items()[i + 1..].iter().all(|other| other.id != item.id),
                "duplicate line for {}",
                item.id
            );
        }
    }

    #[test]
    fn test_add_same_product_increments_line() {
        let mut cart = Cart::new();
        cart.add(&product(1, 350));
        cart.add(&product(1, 350));
        cart.add(&product(2, 500));

        assert_eq!(cart.items().len(), 2);
        assert_eq!(cart.items()[0].quantity, 2);
        assert_eq!(cart.item_count(), 3);
        assert_eq!(cart.total(), Money::new(1200));
    }

    #[test]
    fn test_update_quantity_to_zero_removes_line() {
        let mut cart = Cart::new();
        cart.add(&product(1, 350));
        assert!(cart.update_quantity(ProductId::new(1), 1));
        assert_eq!(cart.items()[0].quantity, 2);

        assert!(cart.update_quantity(ProductId::new(1), -5));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_update_quantity_unknown_product() {
        let mut cart = Cart::new();
        assert!(!cart.update_quantity(ProductId::new(9), 1));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_set_quantity_zero_removes_line() {
        let mut cart = Cart::new();
        cart.add(&product(3, 500));
        assert!(cart.set_quantity(ProductId::new(3), 4));
        assert_eq!(cart.total(), Money::new(2000));
        assert!(cart.set_quantity(ProductId::new(3), 0));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_remove() {
        let mut cart = Cart::new();
        cart.add(&product(1, 350));
        cart.add(&product(5, 250));
        assert!(cart.remove(ProductId::new(1)));
        assert!(!cart.remove(ProductId::new(1)));
        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.items()[0].id, ProductId::new(5));
    }

    #[test]
    fn test_decoding_normalizes_lines() {
        let json = r#"[
            {"id": 1, "name": "a", "price": 350, "quantity": 1, "image": ""},
            {"id": 2, "name": "b", "price": 500, "quantity": 0, "image": ""},
            {"id": 1, "name": "a", "price": 350, "quantity": 2, "image": ""}
        ]"#;
        let cart: Cart = serde_json::from_str(json).unwrap();
        assert_invariants(&cart);
        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.items()[0].quantity, 3);
    }

    #[derive(Debug, Clone)]
    enum CartOp {
        Add(u32),
        Update(u32, i64),
        Set(u32, u32),
        Remove(u32),
    }

    fn arb_op() -> impl Strategy<Value = CartOp> {
        let id = 1..=6u32;
        prop_oneof![
            3 => id.clone().prop_map(CartOp::Add),
            3 => (id.clone(), -5..=5i64).prop_map(|(id, delta)| CartOp::Update(id, delta)),
            1 => (id.clone(), 0..=4u32).prop_map(|(id, qty)| CartOp::Set(id, qty)),
            1 => id.prop_map(CartOp::Remove),
        ]
    }

    proptest! {
        /// Any sequence of cart operations keeps every line positive and
        /// unique, and agrees with a per-product quantity model.
        #[test]
        fn prop_invariants_hold_for_all_sequences(ops in prop::collection::vec(arb_op(), 0..64)) {
            let mut cart = Cart::new();
            let mut model: BTreeMap<u32, i64> = BTreeMap::new();

            for op in ops {
                match op {
                    CartOp::Add(id) => {
                        cart.add(&product(id, u64::from(id) * 100));
                        *model.entry(id).or_insert(0) += 1;
                    }
                    CartOp::Update(id, delta) => {
                        let present = model.contains_key(&id);
                        prop_assert_eq!(cart.update_quantity(ProductId::new(id), delta), present);
                        if let Some(qty) = model.get_mut(&id) {
                            *qty += delta;
                            if *qty <= 0 {
                                model.remove(&id);
                            }
                        }
                    }
                    CartOp::Set(id, qty) => {
                        let present = model.contains_key(&id);
                        prop_assert_eq!(cart.set_quantity(ProductId::new(id), qty), present);
                        if present {
                            if qty == 0 {
                                model.remove(&id);
                            } else {
                                model.insert(id, i64::from(qty));
                            }
                        }
                    }
                    CartOp::Remove(id) => {
                        prop_assert_eq!(cart.remove(ProductId::new(id)), model.remove(&id).is_some());
                    }
                }

                assert_invariants(&cart);
                let actual: BTreeMap<u32, i64> = cart
                    .items()
                    .iter()
                    .map(|item| (item.id.as_u32(), i64::from(item.quantity)))
                    .collect();
                prop_assert_eq!(&actual, &model);

                let expected_total: u64 = model
                    .iter()
                    .map(|(id, qty)| u64::from(*id) * 100 * u64::try_from(*qty).unwrap())
                    .sum();
                prop_assert_eq!(cart.total(), Money::new(expected_total));
            }
        }
    }
}
