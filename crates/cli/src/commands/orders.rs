//! Order history commands.

use std::io::Write;

use boxpaper_core::{OrderId, OrderStatus};
use boxpaper_storefront::services::OrderStore;

use super::CommandError;

/// Print every order, newest first.
///
/// # Errors
///
/// Returns an error if the output cannot be written.
pub fn list(orders: &OrderStore, json: bool, out: &mut impl Write) -> Result<(), CommandError> {
    let orders = orders.orders();

    if json {
        serde_json::to_writer_pretty(&mut *out, &orders)?;
        writeln!(out)?;
        return Ok(());
    }

    if orders.is_empty() {
        writeln!(out, "No orders")?;
        return Ok(());
    }

    for order in &orders {
        writeln!(
            out,
            "{:<24} {}  {:<10} {:<7} {:>8}  {} item(s)",
            order.order_id().as_str(),
            order.date().format("%Y-%m-%d %H:%M"),
            order.status().as_str(),
            order.payment_method().as_str(),
            order.total_amount().to_string(),
            order.items().len(),
        )?;
    }
    Ok(())
}

/// Print one order as JSON.
///
/// # Errors
///
/// Returns `CommandError::OrderNotFound` for an unknown id.
pub fn show(orders: &OrderStore, order_id: &OrderId, out: &mut impl Write) -> Result<(), CommandError> {
    let order = orders
        .find_order(order_id)
        .ok_or_else(|| CommandError::OrderNotFound(order_id.to_string()))?;
    serde_json::to_writer_pretty(&mut *out, &order)?;
    writeln!(out)?;
    Ok(())
}

/// Change an order's status. An unknown id changes nothing.
///
/// # Errors
///
/// Returns an error if the order history cannot be written.
pub fn set_status(
    orders: &OrderStore,
    order_id: &OrderId,
    status: OrderStatus,
    out: &mut impl Write,
) -> Result<(), CommandError> {
    if orders.update_order_status(order_id, status)? {
        writeln!(out, "{order_id}: {}", status.label())?;
    } else {
        writeln!(out, "No order {order_id}, nothing changed")?;
    }
    Ok(())
}

/// Delete an order. An unknown id changes nothing.
///
/// # Errors
///
/// Returns an error if the order history cannot be written.
pub fn delete(orders: &OrderStore, order_id: &OrderId, out: &mut impl Write) -> Result<(), CommandError> {
    if orders.delete_order(order_id)? {
        writeln!(out, "Deleted {order_id}")?;
    } else {
        writeln!(out, "No order {order_id}, nothing deleted")?;
    }
    Ok(())
}
