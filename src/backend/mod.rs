//! Backend boundary.
//!
//! The shop's source of truth is a spreadsheet fronted by a script endpoint
//! that accepts form-encoded action payloads. The quirk of that endpoint is
//! double encoding: complex values travel as JSON strings *inside* the JSON
//! envelope, and the payload builders here preserve that shape exactly.

pub mod memory;

use crate::core::types::{
    Order, OrderDraft, OrderQuery, OrderStatus, OrderSummary, SalesStatistics,
};
use crate::menu::{AvailabilityUpdate, Catalog};
use serde_json::json;

/// Order storage and catalog provider.
pub trait Backend {
    fn fetch_catalog(&self) -> Result<Catalog, String>;

    /// Persist a draft, returning the assigned order id.
    fn submit_order(&mut self, draft: OrderDraft) -> Result<String, String>;

    fn get_order(&self, order_id: &str) -> Result<Option<Order>, String>;

    fn search_orders(&self, query: &OrderQuery) -> Result<Vec<OrderSummary>, String>;

    /// Every stored order, oldest first — the admin dashboard's order board.
    fn list_orders(&self) -> Result<Vec<Order>, String>;

    /// Revenue, order count, popular items, and the per-day trend over an
    /// inclusive `YYYY-MM-DD` date range.
    fn sales_statistics(&self, start_date: &str, end_date: &str)
        -> Result<SalesStatistics, String>;

    fn update_order_status(&mut self, order_id: &str, status: OrderStatus) -> Result<(), String>;

    fn update_availability(&mut self, update: &AvailabilityUpdate) -> Result<(), String>;
}

/// Build the `createOrder` envelope. The line items are serialized to a JSON
/// string and embedded as a string field; the endpoint parses them a second
/// time on its side.
pub fn create_order_payload(draft: &OrderDraft) -> Result<serde_json::Value, String> {
    let items = serde_json::to_string(&draft.items)
        .map_err(|e| format!("failed to encode order items: {}", e))?;
    Ok(json!({
        "action": "createOrder",
        "orderData": {
            "items": items,
            "totalPrice": draft.total_price,
            "customerInfo": draft.customer_info,
            "orderType": draft.order_type,
        }
    }))
}

/// Build the `updateOrderStatus` envelope.
pub fn update_status_payload(order_id: &str, status: OrderStatus) -> serde_json::Value {
    json!({
        "action": "updateOrderStatus",
        "orderId": order_id,
        "status": status,
    })
}

/// Build the `updateAvailability` envelope. The toggle set is double-encoded
/// the same way order items are.
pub fn update_availability_payload(update: &AvailabilityUpdate) -> Result<serde_json::Value, String> {
    let encoded = serde_json::to_string(update)
        .map_err(|e| format!("failed to encode availability update: {}", e))?;
    Ok(json!({
        "action": "updateAvailability",
        "availability": encoded,
    }))
}

/// Build the `updateQuietHoursStatus` envelope, toggling the "not taking
/// orders right now" banner.
pub fn update_quiet_hours_payload(is_quiet_hours: bool) -> serde_json::Value {
    json!({
        "action": "updateQuietHoursStatus",
        "isQuietHours": is_quiet_hours,
    })
}
