//! Kitchen ticket rendering.
//!
//! The thermal printer gets one dense line: order number, mains merged by
//! display name, then per-category aggregates across all lines, then the
//! total. Category order is fixed so the kitchen can scan tickets fast.

use crate::core::types::CartLine;
use indexmap::IndexMap;

fn bump(map: &mut IndexMap<String, u32>, name: &str, count: u32) {
    *map.entry(name.to_string()).or_insert(0) += count;
}

fn format_counts(map: &IndexMap<String, u32>) -> String {
    map.iter()
        .map(|(name, count)| format!("{}x{}", name, count))
        .collect::<Vec<_>>()
        .join(".")
}

/// Render the compact single-line ticket body.
pub fn kitchen_ticket(order_id: &str, items: &[CartLine], total_price: u32) -> String {
    // Mains merge by normalized display name; half-set labels collapse into
    // the set label so the grill sees one count
    let mut mains: IndexMap<String, (u32, u32)> = IndexMap::new();
    for line in items {
        let name = line.item.name.replace("半全餐", "套餐").replace("半套餐", "套餐");
        let entry = mains.entry(name).or_insert((0, 0));
        entry.0 += line.quantity;
        entry.1 += line.total_price;
    }

    let mut components: IndexMap<String, u32> = IndexMap::new();
    let mut drinks: IndexMap<String, u32> = IndexMap::new();
    let mut sauces: IndexMap<String, u32> = IndexMap::new();
    let mut addons: IndexMap<String, u32> = IndexMap::new();
    let mut donenesses: IndexMap<String, u32> = IndexMap::new();

    for line in items {
        for (name, &count) in &line.selection.component_choices {
            bump(&mut components, name, count);
        }
        for (name, &count) in &line.selection.drinks {
            bump(&mut drinks, name, count);
        }
        for pick in &line.selection.sauces {
            bump(&mut sauces, &pick.name, pick.quantity);
        }
        for pick in &line.selection.addons {
            bump(&mut addons, &pick.addon.name, pick.quantity);
        }
        for (name, &count) in &line.selection.donenesses {
            bump(&mut donenesses, name, count);
        }
        // The upgrade applies to every unit of the line
        if let Some(name) = line
            .selection
            .single_choice_addon
            .as_deref()
            .filter(|n| !n.is_empty())
        {
            bump(&mut addons, name, line.quantity);
        }
    }

    let mut parts = vec![format!("單號:{}", order_id)];
    parts.push(
        mains
            .iter()
            .map(|(name, (quantity, price))| format!("{}x{}${}", name, quantity, price))
            .collect::<Vec<_>>()
            .join("."),
    );
    for map in [&components, &drinks, &sauces, &addons, &donenesses] {
        parts.push(format_counts(map));
    }
    parts.push(format!("總金額:${}", total_price));

    parts.retain(|part| !part.is_empty());
    parts.join(".")
}

/// Render the full printable ticket: shop header, the compact body, footer.
pub fn printable(order_id: &str, items: &[CartLine], total_price: u32) -> String {
    format!(
        "無名牛排\n廚房工作單\n{}\n感謝您的訂購！\n",
        kitchen_ticket(order_id, items, total_price)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::cart::CartStore;
    use crate::core::types::{Addon, MenuItem, PickedAddon, Selection};

    fn item(id: &str, name: &str, price: u32) -> MenuItem {
        serde_yaml_ng::from_str(&format!(
            "{{id: {}, name: {}, price: {}}}",
            id, name, price
        ))
        .unwrap()
    }

    #[test]
    fn test_ticket_minimal_order() {
        let mut cart = CartStore::new();
        cart.add(&item("burger-kimchi", "吃到堡", 80), 2, Selection::default(), "炸物&漢堡");
        let ticket = kitchen_ticket("OD-7", cart.lines(), cart.total_price());
        assert_eq!(ticket, "單號:OD-7.吃到堡x2$160.總金額:$160");
    }

    #[test]
    fn test_ticket_aggregates_across_lines() {
        let mut cart = CartStore::new();
        let steak = item("set-1", "板腱牛排套餐", 399);

        let mut a = Selection::default();
        a.donenesses.insert("5分熟".to_string(), 1);
        a.drinks.insert("無糖紅茶".to_string(), 1);
        cart.add(&steak, 1, a, "套餐");

        let mut b = Selection::default();
        b.donenesses.insert("5分熟".to_string(), 1);
        b.donenesses.insert("全熟".to_string(), 1);
        b.drinks.insert("冰涼可樂".to_string(), 2);
        cart.add(&steak, 2, b, "套餐");

        let ticket = kitchen_ticket("OD-9", cart.lines(), cart.total_price());
        // Mains merged by name, doneness and drink counts summed
        assert!(ticket.contains("板腱牛排套餐x3$1197"));
        assert!(ticket.contains("5分熟x2"));
        assert!(ticket.contains("全熟x1"));
        assert!(ticket.contains("無糖紅茶x1"));
        assert!(ticket.contains("冰涼可樂x2"));
        assert!(ticket.ends_with("總金額:$1197"));
    }

    #[test]
    fn test_ticket_merges_half_set_names() {
        let mut cart = CartStore::new();
        cart.add(&item("a", "雞腿半套餐", 200), 1, Selection::default(), "套餐");
        cart.add(&item("b", "雞腿套餐", 250), 1, Selection::default(), "套餐");
        let ticket = kitchen_ticket("OD-1", cart.lines(), cart.total_price());
        assert!(ticket.contains("雞腿套餐x2$450"));
        assert!(!ticket.contains("半套餐"));
    }

    #[test]
    fn test_ticket_upgrade_scales_with_line_quantity() {
        let mut cart = CartStore::new();
        let mut sel = Selection::default();
        sel.single_choice_addon = Some("加麵".to_string());
        sel.addons.push(PickedAddon {
            addon: Addon {
                id: "addon-soup".to_string(),
                name: "湯品 加購".to_string(),
                price: 30,
                category: "單點加購".to_string(),
                is_available: true,
            },
            quantity: 1,
        });
        cart.add(&item("pasta-choice-set", "任選義麵", 220), 3, sel, "義大利麵");

        let ticket = kitchen_ticket("OD-2", cart.lines(), cart.total_price());
        assert!(ticket.contains("加麵x3"));
        assert!(ticket.contains("湯品 加購x1"));
    }

    #[test]
    fn test_printable_wraps_ticket() {
        let mut cart = CartStore::new();
        cart.add(&item("x", "涼麵", 75), 1, Selection::default(), "涼麵");
        let page = printable("OD-3", cart.lines(), cart.total_price());
        assert!(page.starts_with("無名牛排\n廚房工作單\n單號:OD-3"));
        assert!(page.ends_with("感謝您的訂購！\n"));
    }
}
