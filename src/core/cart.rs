//! Cart mutation state machine.
//!
//! The store owns an ordered sequence of lines and applies pure, synchronous
//! transitions: add (merge-or-append), edit-in-place, quantity updates, and
//! removal. Aggregates are recomputed on demand, never cached.

use super::key::{cart_key, cart_line_id};
use super::pricing::line_total;
use super::types::{CartLine, CustomerInfo, MenuItem, OrderDraft, OrderType, Selection};

/// In-memory cart owned by one ordering session.
#[derive(Debug, Default)]
pub struct CartStore {
    lines: Vec<CartLine>,
    next_seq: u64,
}

impl CartStore {
    pub fn new() -> Self {
        Self {
            lines: Vec::new(),
            next_seq: 1,
        }
    }

    /// Current lines in insertion order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Look up a line by id — the entry point for re-opening a line in the
    /// selection surface before an edit.
    pub fn get(&self, cart_id: &str) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.cart_id == cart_id)
    }

    /// Confirm a fresh selection. Merges into an existing line when the
    /// normalized key matches (quantities accumulate and the price is
    /// recomputed from the existing line's stored selection); otherwise
    /// appends a new line with a fresh id. Returns the affected line's id.
    ///
    /// The caller's validation layer guarantees `quantity >= 1`; violating
    /// that here would corrupt downstream totals, so it fails loudly.
    pub fn add(
        &mut self,
        item: &MenuItem,
        quantity: u32,
        selection: Selection,
        category_title: &str,
    ) -> String {
        assert!(quantity >= 1, "cart line quantity must be >= 1");

        let key = cart_key(&item.id, &selection);
        if let Some(line) = self.lines.iter_mut().find(|l| l.cart_key == key) {
            line.quantity += quantity;
            line.total_price = line_total(&line.item, line.quantity, &line.selection);
            return line.cart_id.clone();
        }

        let seq = self.next_seq;
        self.next_seq += 1;
        let cart_id = cart_line_id(&key, seq);
        let total_price = line_total(item, quantity, &selection);
        self.lines.push(CartLine {
            cart_id: cart_id.clone(),
            cart_key: key,
            item: item.clone(),
            quantity,
            category_title: category_title.to_string(),
            selection,
            total_price,
        });
        cart_id
    }

    /// Confirm an edit of an existing line. The line keeps its id and its
    /// position; key and price are recomputed from the new fields. An edit
    /// never merges, even when the new key collides with another line.
    /// Returns false (no-op) when the id is unknown.
    pub fn edit(
        &mut self,
        cart_id: &str,
        item: &MenuItem,
        quantity: u32,
        selection: Selection,
        category_title: &str,
    ) -> bool {
        assert!(quantity >= 1, "cart line quantity must be >= 1");

        let Some(line) = self.lines.iter_mut().find(|l| l.cart_id == cart_id) else {
            return false;
        };
        line.cart_key = cart_key(&item.id, &selection);
        line.item = item.clone();
        line.quantity = quantity;
        line.category_title = category_title.to_string();
        line.total_price = line_total(item, quantity, &selection);
        line.selection = selection;
        true
    }

    /// Set a line's quantity. Zero removes the line; otherwise the price is
    /// recomputed from the line's own stored selection. Unknown ids are a
    /// no-op.
    pub fn update_quantity(&mut self, cart_id: &str, quantity: u32) {
        if quantity == 0 {
            self.remove(cart_id);
            return;
        }
        if let Some(line) = self.lines.iter_mut().find(|l| l.cart_id == cart_id) {
            line.quantity = quantity;
            line.total_price = line_total(&line.item, quantity, &line.selection);
        }
    }

    /// Drop a line unconditionally.
    pub fn remove(&mut self, cart_id: &str) {
        self.lines.retain(|l| l.cart_id != cart_id);
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Σ line.quantity, recomputed on every call.
    pub fn item_count(&self) -> u32 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    /// Σ line.total_price, recomputed on every call.
    pub fn total_price(&self) -> u32 {
        self.lines.iter().map(|l| l.total_price).sum()
    }

    /// Freeze the cart into a submission draft.
    pub fn draft(&self, customer_info: CustomerInfo, order_type: OrderType) -> OrderDraft {
        OrderDraft {
            items: self.lines.clone(),
            total_price: self.total_price(),
            customer_info,
            order_type,
        }
    }
}
