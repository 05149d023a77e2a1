//! In-memory backend.
//!
//! Serves a catalog snapshot and stores orders in insertion order. Used by
//! the CLI order flow and as the reference behavior for the script endpoint.

use super::Backend;
use crate::core::types::{
    Order, OrderDraft, OrderQuery, OrderStatus, OrderSummary, PopularItem, SalesStatistics,
    SalesTrendData,
};
use crate::journal::now_iso8601;
use crate::menu::{AvailabilityUpdate, Catalog};
use indexmap::IndexMap;
use std::time::{SystemTime, UNIX_EPOCH};

pub struct InMemoryBackend {
    catalog: Catalog,
    orders: IndexMap<String, Order>,
}

impl InMemoryBackend {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog,
            orders: IndexMap::new(),
        }
    }

    pub fn order_count(&self) -> usize {
        self.orders.len()
    }

    fn generate_order_id(&self) -> String {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos())
            .unwrap_or(0);
        // Collisions within one store are still avoided by the counter suffix
        format!("OD-{:x}-{}", nanos, self.orders.len() + 1)
    }
}

impl Backend for InMemoryBackend {
    fn fetch_catalog(&self) -> Result<Catalog, String> {
        Ok(self.catalog.clone())
    }

    fn submit_order(&mut self, draft: OrderDraft) -> Result<String, String> {
        if draft.items.is_empty() {
            return Err("cannot submit an empty order".to_string());
        }
        let id = self.generate_order_id();
        let order = Order {
            id: id.clone(),
            status: OrderStatus::AwaitingConfirmation,
            order_type: draft.order_type,
            items: draft.items,
            customer_info: draft.customer_info,
            total_price: draft.total_price,
            created_at: now_iso8601(),
        };
        self.orders.insert(id.clone(), order);
        Ok(id)
    }

    fn get_order(&self, order_id: &str) -> Result<Option<Order>, String> {
        Ok(self.orders.get(order_id).cloned())
    }

    fn search_orders(&self, query: &OrderQuery) -> Result<Vec<OrderSummary>, String> {
        let matches = self.orders.values().filter(|order| {
            let name_ok = query
                .name
                .as_deref()
                .map(|n| order.customer_info.name.contains(n))
                .unwrap_or(true);
            let phone_ok = query
                .phone
                .as_deref()
                .map(|p| order.customer_info.phone == p)
                .unwrap_or(true);
            // ISO timestamps compare lexicographically
            let after_ok = query
                .start_date
                .as_deref()
                .map(|d| order.created_at.as_str() >= d)
                .unwrap_or(true);
            let before_ok = query
                .end_date
                .as_deref()
                .map(|d| &order.created_at[..d.len().min(order.created_at.len())] <= d)
                .unwrap_or(true);
            name_ok && phone_ok && after_ok && before_ok
        });
        Ok(matches
            .map(|order| OrderSummary {
                id: order.id.clone(),
                customer_name: order.customer_info.name.clone(),
                total_amount: order.total_price,
                timestamp: order.created_at.clone(),
            })
            .collect())
    }

    fn list_orders(&self) -> Result<Vec<Order>, String> {
        Ok(self.orders.values().cloned().collect())
    }

    fn sales_statistics(
        &self,
        start_date: &str,
        end_date: &str,
    ) -> Result<SalesStatistics, String> {
        let mut stats = SalesStatistics::default();
        let mut items: IndexMap<String, (u32, u32)> = IndexMap::new();
        let mut days: std::collections::BTreeMap<String, u32> = std::collections::BTreeMap::new();

        for order in self.orders.values() {
            let day = order.created_at.get(..10).unwrap_or(&order.created_at);
            if day < start_date || day > end_date {
                continue;
            }
            stats.order_count += 1;
            stats.total_revenue += order.total_price;
            *days.entry(day.to_string()).or_insert(0) += order.total_price;
            for line in &order.items {
                let entry = items.entry(line.item.name.clone()).or_insert((0, 0));
                entry.0 += line.quantity;
                entry.1 += line.total_price;
            }
        }

        stats.popular_items = items
            .into_iter()
            .map(|(name, (quantity, revenue))| PopularItem {
                name,
                quantity,
                revenue,
            })
            .collect();
        stats
            .popular_items
            .sort_by(|a, b| b.quantity.cmp(&a.quantity));
        stats.sales_trend = days
            .into_iter()
            .map(|(date, revenue)| SalesTrendData { date, revenue })
            .collect();
        Ok(stats)
    }

    fn update_order_status(&mut self, order_id: &str, status: OrderStatus) -> Result<(), String> {
        match self.orders.get_mut(order_id) {
            Some(order) => {
                order.status = status;
                Ok(())
            }
            None => Err(format!("unknown order '{}'", order_id)),
        }
    }

    fn update_availability(&mut self, update: &AvailabilityUpdate) -> Result<(), String> {
        self.catalog.apply_availability(update);
        Ok(())
    }
}
