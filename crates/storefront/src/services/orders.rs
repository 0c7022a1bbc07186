//! Local order history.
//!
//! The whole order sequence is stored as one JSON array under
//! [`keys::ORDERS`], newest first. Every mutation reads the full sequence,
//! modifies it and writes it back. Mutations through clones of one
//! [`OrderStore`] are serialized; separate processes sharing the data
//! directory (the server and the CLI) are not coordinated, and the last write
//! wins.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::instrument;

use boxpaper_core::{Order, OrderId, OrderStatus};

use crate::storage::{self, KeyValueStore, StorageError, keys};

/// Order store over an injected key-value store.
#[derive(Clone)]
pub struct OrderStore {
    store: Arc<dyn KeyValueStore>,
    writes: Arc<Mutex<()>>,
}

impl OrderStore {
    /// Create an order store backed by `store`.
    #[must_use]
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            writes: Arc::new(Mutex::new(())),
        }
    }

    /// Prepend an order to the history.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the sequence cannot be written.
    #[instrument(skip(self, order), fields(order_id = %order.order_id()))]
    pub fn save_order(&self, order: &Order) -> Result<(), StorageError> {
        let _lock = self.lock_writes();
        let mut orders = self.orders();
        orders.insert(0, order.clone());
        self.write(&orders)
    }

    /// All stored orders, newest first.
    ///
    /// Absent or malformed storage yields an empty list.
    #[must_use]
    pub fn orders(&self) -> Vec<Order> {
        storage::load_lenient(self.store.as_ref(), keys::ORDERS).unwrap_or_default()
    }

    /// Look up a single order.
    #[must_use]
    pub fn find_order(&self, order_id: &OrderId) -> Option<Order> {
        self.orders()
            .into_iter()
            .find(|order| order.order_id() == order_id)
    }

    /// Remove the order with `order_id`.
    ///
    /// Returns whether an order was removed. An unknown id is a no-op and
    /// leaves storage untouched.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the sequence cannot be written.
    #[instrument(skip(self))]
    pub fn delete_order(&self, order_id: &OrderId) -> Result<bool, StorageError> {
        let _lock = self.lock_writes();
        let mut orders = self.orders();
        let Some(pos) = orders.iter().position(|order| order.order_id() == order_id) else {
            tracing::debug!("Order not found, nothing to delete");
            return Ok(false);
        };

        orders.remove(pos);
        self.write(&orders)?;
        Ok(true)
    }

    /// Change the status of the order with `order_id`, leaving every other
    /// field as stored.
    ///
    /// Returns whether an order was updated. An unknown id is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the sequence cannot be written.
    #[instrument(skip(self))]
    pub fn update_order_status(
        &self,
        order_id: &OrderId,
        status: OrderStatus,
    ) -> Result<bool, StorageError> {
        let _lock = self.lock_writes();
        let mut orders = self.orders();
        let Some(order) = orders
            .iter_mut()
            .find(|order| order.order_id() == order_id)
        else {
            tracing::debug!("Order not found, nothing to update");
            return Ok(false);
        };

        order.set_status(status);
        self.write(&orders)?;
        Ok(true)
    }

    fn lock_writes(&self) -> MutexGuard<'_, ()> {
        self.writes.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self, orders: &[Order]) -> Result<(), StorageError> {
        storage::save(self.store.as_ref(), keys::ORDERS, orders)
    }
}
