//! Data model for the ordering core.
//!
//! Menu, addon, and option shapes mirror the spreadsheet backend's JSON wire
//! format (camelCase field names), so the whole catalog and every order
//! payload roundtrip through serde unchanged.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Menu catalog
// ============================================================================

/// A named choice group (e.g. cold-noodle flavors, fried-item choice).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChoiceGroup {
    /// Display title shown above the group
    pub title: String,

    /// Offered option names
    pub options: Vec<String>,
}

/// A side-dish group where the guest must pick a fixed number of sides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SideChoice {
    /// Display title
    pub title: String,

    /// Offered side names
    pub options: Vec<String>,

    /// Required picks per unit of the item
    pub choices: u32,
}

/// A priced upgrade where exactly one option may be chosen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SingleChoiceAddon {
    /// Surcharge added once to the unit base price
    pub price: u32,

    /// Offered option names
    pub options: Vec<String>,
}

/// Customization capabilities of a menu item.
///
/// Every field is optional on the wire; an absent capability means the
/// selection surface never offers that category for the item.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Customizations {
    /// Steak doneness picker
    pub doneness: bool,

    /// Sauce picker fed from the dynamic sauce list
    pub sauce_choice: bool,

    /// Sauce quota per unit (defaults to 1 when absent)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sauces_per_item: Option<u32>,

    /// Drink picker
    pub drink_choice: bool,

    /// Dessert picker (A and B zones)
    pub dessert_choice: bool,

    /// Pasta picker (noodle and sauce zones)
    pub pasta_choice: bool,

    /// Item-specific component picker (e.g. fried chicken vs fried fish)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub component_choice: Option<ChoiceGroup>,

    /// Free-text notes field
    pub notes: bool,

    /// Priced single-choice upgrade
    #[serde(skip_serializing_if = "Option::is_none")]
    pub single_choice_addon: Option<SingleChoiceAddon>,

    /// Generic multi-choice group (e.g. cold-noodle flavor)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub multi_choice: Option<ChoiceGroup>,

    /// Side-dish group with a required pick count
    #[serde(skip_serializing_if = "Option::is_none")]
    pub side_choice: Option<SideChoice>,
}

/// Catalog entry. Immutable reference data owned by the menu provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    /// Unique item id
    pub id: String,

    /// Display name
    pub name: String,

    /// Abbreviated name for tickets
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short_name: Option<String>,

    /// Portion weight label (e.g. "10oz")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<String>,

    /// Base price in integer currency units
    pub price: u32,

    /// Menu description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Customization capabilities
    #[serde(default)]
    pub customizations: Customizations,

    /// Sold-out flag, toggled from the admin panel
    #[serde(default = "default_available")]
    pub is_available: bool,
}

fn default_available() -> bool {
    true
}

/// A menu section (order-preserving).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuCategory {
    pub title: String,
    pub items: Vec<MenuItem>,
}

/// Priced optional extra. Immutable reference data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Addon {
    pub id: String,
    pub name: String,
    pub price: u32,
    pub category: String,
    #[serde(default = "default_available")]
    pub is_available: bool,
}

/// One entry of a dynamic, server-supplied option list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionEntry {
    pub name: String,
    #[serde(default = "default_available")]
    pub is_available: bool,
}

/// The dynamic option lists the backend sheet feeds the selection surface.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OptionLists {
    pub sauces: Vec<OptionEntry>,
    pub desserts_a: Vec<OptionEntry>,
    pub desserts_b: Vec<OptionEntry>,
    pub pastas_a: Vec<OptionEntry>,
    pub pastas_b: Vec<OptionEntry>,
    pub cold_noodles: Vec<OptionEntry>,
    pub simple_meals: Vec<OptionEntry>,
}

// ============================================================================
// Selection bundle
// ============================================================================

/// A dynamic-list pick: option name plus chosen quantity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Picked {
    pub name: String,
    pub quantity: u32,
}

/// A generic addon pick. The addon is embedded so the cart line keeps its
/// price even if the catalog changes afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PickedAddon {
    #[serde(flatten)]
    pub addon: Addon,
    pub quantity: u32,
}

/// The ephemeral user input for one cart-line-in-progress.
///
/// Mapping categories use `IndexMap` to model the insertion-ordered object
/// the selection surface builds; key normalization sorts them, so insertion
/// order never leaks into cart identity.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Selection {
    pub donenesses: IndexMap<String, u32>,
    pub drinks: IndexMap<String, u32>,
    pub side_choices: IndexMap<String, u32>,
    pub multi_choice: IndexMap<String, u32>,
    pub component_choices: IndexMap<String, u32>,
    pub sauces: Vec<Picked>,
    pub desserts: Vec<Picked>,
    pub pastas: Vec<Picked>,
    pub addons: Vec<PickedAddon>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub single_choice_addon: Option<String>,
    pub notes: String,
}

// ============================================================================
// Cart
// ============================================================================

/// One row of the cart: an item, a frozen customization configuration, and a
/// quantity. `cart_key` decides merge equality; `cart_id` is the per-line
/// handle for edits and removal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    pub cart_id: String,
    pub cart_key: String,
    pub item: MenuItem,
    pub quantity: u32,
    pub category_title: String,
    #[serde(flatten)]
    pub selection: Selection,
    pub total_price: u32,
}

// ============================================================================
// Orders
// ============================================================================

/// Guest contact details collected at checkout.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CustomerInfo {
    pub name: String,
    pub phone: String,
    pub table_number: String,
}

/// Dine-in vs takeout. Serialized as the backend's Chinese wire strings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderType {
    #[default]
    #[serde(rename = "內用")]
    DineIn,
    #[serde(rename = "外帶")]
    Takeout,
}

impl fmt::Display for OrderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DineIn => write!(f, "內用"),
            Self::Takeout => write!(f, "外帶"),
        }
    }
}

/// Order lifecycle status, driven from the admin panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderStatus {
    #[serde(rename = "待店長確認")]
    AwaitingConfirmation,
    #[serde(rename = "待處理")]
    Pending,
    #[serde(rename = "製作中")]
    Preparing,
    #[serde(rename = "可以取餐")]
    ReadyForPickup,
    #[serde(rename = "已完成")]
    Completed,
    #[serde(rename = "錯誤")]
    Error,
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AwaitingConfirmation => write!(f, "待店長確認"),
            Self::Pending => write!(f, "待處理"),
            Self::Preparing => write!(f, "製作中"),
            Self::ReadyForPickup => write!(f, "可以取餐"),
            Self::Completed => write!(f, "已完成"),
            Self::Error => write!(f, "錯誤"),
        }
    }
}

/// The finalized cart as handed to the submission service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDraft {
    pub items: Vec<CartLine>,
    pub total_price: u32,
    pub customer_info: CustomerInfo,
    pub order_type: OrderType,
}

/// A stored order as the backend reports it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    pub status: OrderStatus,
    pub order_type: OrderType,
    pub items: Vec<CartLine>,
    pub customer_info: CustomerInfo,
    pub total_price: u32,
    pub created_at: String,
}

/// Search filters for order lookup.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OrderQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
}

/// One row of the popular-items board: a menu item's sold quantity and the
/// revenue it brought in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PopularItem {
    pub name: String,
    pub quantity: u32,
    pub revenue: u32,
}

/// One day of the sales trend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesTrendData {
    pub date: String,
    pub revenue: u32,
}

/// Aggregated sales over a date range, as the admin dashboard displays it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SalesStatistics {
    pub total_revenue: u32,
    pub order_count: u32,
    pub popular_items: Vec<PopularItem>,
    pub sales_trend: Vec<SalesTrendData>,
}

/// Compact order listing for lookups and the session journal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderSummary {
    pub id: String,
    pub customer_name: String,
    pub total_amount: u32,
    pub timestamp: String,
}

/// Steak doneness levels offered by the selection surface.
pub const DONENESS_LEVELS: [&str; 4] = ["3分熟", "5分熟", "7分熟", "全熟"];

/// Fixed drink choices.
pub const DRINK_CHOICES: [&str; 2] = ["無糖紅茶", "冰涼可樂"];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_menu_item_parse_defaults() {
        let yaml = r#"
id: set-1
name: 板腱牛排套餐
price: 399
"#;
        let item: MenuItem = serde_yaml_ng::from_str(yaml).unwrap();
        assert_eq!(item.id, "set-1");
        assert_eq!(item.price, 399);
        assert!(item.is_available);
        assert!(!item.customizations.doneness);
        assert!(item.customizations.side_choice.is_none());
    }

    #[test]
    fn test_menu_item_camel_case_wire() {
        let json = r#"{
            "id": "set-1",
            "name": "套餐",
            "price": 399,
            "customizations": {
                "doneness": true,
                "sauceChoice": true,
                "saucesPerItem": 2,
                "drinkChoice": true,
                "componentChoice": {"title": "炸物選擇", "options": ["脆皮炸雞", "炸魚"]}
            },
            "isAvailable": true
        }"#;
        let item: MenuItem = serde_json::from_str(json).unwrap();
        assert!(item.customizations.doneness);
        assert_eq!(item.customizations.sauces_per_item, Some(2));
        let comp = item.customizations.component_choice.unwrap();
        assert_eq!(comp.options, vec!["脆皮炸雞", "炸魚"]);
    }

    #[test]
    fn test_order_type_wire_strings() {
        assert_eq!(serde_json::to_string(&OrderType::DineIn).unwrap(), "\"內用\"");
        assert_eq!(serde_json::to_string(&OrderType::Takeout).unwrap(), "\"外帶\"");
        let t: OrderType = serde_json::from_str("\"外帶\"").unwrap();
        assert_eq!(t, OrderType::Takeout);
    }

    #[test]
    fn test_order_status_roundtrip() {
        for status in [
            OrderStatus::AwaitingConfirmation,
            OrderStatus::Pending,
            OrderStatus::Preparing,
            OrderStatus::ReadyForPickup,
            OrderStatus::Completed,
            OrderStatus::Error,
        ] {
            let json = serde_json::to_string(&status).unwrap();
            let back: OrderStatus = serde_json::from_str(&json).unwrap();
            assert_eq!(back, status);
            assert_eq!(json, format!("\"{}\"", status));
        }
    }

    #[test]
    fn test_option_lists_wire_names() {
        let json = r#"{
            "sauces": [{"name": "黑胡椒", "isAvailable": true}],
            "dessertsA": [{"name": "法式烤布蕾佐冰淇淋"}],
            "coldNoodles": []
        }"#;
        let lists: OptionLists = serde_json::from_str(json).unwrap();
        assert_eq!(lists.sauces.len(), 1);
        assert_eq!(lists.desserts_a.len(), 1);
        assert!(lists.desserts_a[0].is_available);
        assert!(lists.pastas_a.is_empty());
    }

    #[test]
    fn test_cart_line_flattens_selection() {
        let item: MenuItem = serde_yaml_ng::from_str("{id: a, name: n, price: 10}").unwrap();
        let mut selection = Selection::default();
        selection.drinks.insert("無糖紅茶".to_string(), 1);
        let line = CartLine {
            cart_id: "x-1".to_string(),
            cart_key: "k".to_string(),
            item,
            quantity: 1,
            category_title: "套餐".to_string(),
            selection,
            total_price: 10,
        };
        let json = serde_json::to_string(&line).unwrap();
        // Selection fields sit at the line's top level on the wire
        assert!(json.contains("\"drinks\":{\"無糖紅茶\":1}"));
        assert!(json.contains("\"totalPrice\":10"));
    }
}
