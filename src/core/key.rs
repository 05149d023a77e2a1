//! Cart identity — normalized merge keys and per-line ids.
//!
//! Two selections that are semantically equivalent must land on the same
//! key, regardless of the insertion order of any mapping category and of any
//! zero-quantity leftovers. Free-text notes never participate in identity.

use super::types::Selection;
use indexmap::IndexMap;
use std::collections::BTreeMap;

/// Normalize a mapping category: drop non-positive quantities, sort the
/// remaining keys lexicographically, serialize as a JSON object string.
/// Empty after filtering → empty string.
fn stable_map_string(map: &IndexMap<String, u32>) -> String {
    let kept: BTreeMap<&str, u32> = map
        .iter()
        .filter(|(_, &qty)| qty > 0)
        .map(|(name, &qty)| (name.as_str(), qty))
        .collect();
    if kept.is_empty() {
        return String::new();
    }
    // A string-keyed map of integers always serializes
    serde_json::to_string(&kept).expect("JSON object of string keys")
}

/// Normalize an array-typed category: `"<name>:<qty>"` per retained entry,
/// sorted, comma-joined.
fn stable_list_string<'a>(entries: impl Iterator<Item = (&'a str, u32)>) -> String {
    let mut parts: Vec<String> = entries
        .filter(|(_, qty)| *qty > 0)
        .map(|(name, qty)| format!("{}:{}", name, qty))
        .collect();
    parts.sort();
    parts.join(",")
}

/// Derive the merge key for an item plus a selection bundle.
///
/// Total and deterministic over any well-formed selection; field order is
/// fixed, so equal normalized inputs always yield equal strings. Addons key
/// by addon id, dynamic-list picks by option name.
pub fn cart_key(item_id: &str, selection: &Selection) -> String {
    let single = selection
        .single_choice_addon
        .as_deref()
        .filter(|name| !name.is_empty())
        .unwrap_or("none");

    [
        format!("id={}", item_id),
        format!("donenesses={}", stable_map_string(&selection.donenesses)),
        format!("drinks={}", stable_map_string(&selection.drinks)),
        format!("sideChoices={}", stable_map_string(&selection.side_choices)),
        format!("multiChoice={}", stable_map_string(&selection.multi_choice)),
        format!(
            "componentChoices={}",
            stable_map_string(&selection.component_choices)
        ),
        format!(
            "addons={}",
            stable_list_string(
                selection
                    .addons
                    .iter()
                    .map(|a| (a.addon.id.as_str(), a.quantity))
            )
        ),
        format!(
            "sauces={}",
            stable_list_string(selection.sauces.iter().map(|p| (p.name.as_str(), p.quantity)))
        ),
        format!(
            "desserts={}",
            stable_list_string(
                selection
                    .desserts
                    .iter()
                    .map(|p| (p.name.as_str(), p.quantity))
            )
        ),
        format!(
            "pastas={}",
            stable_list_string(selection.pastas.iter().map(|p| (p.name.as_str(), p.quantity)))
        ),
        format!("singleChoiceAddon={}", single),
    ]
    .join("|")
}

/// Derive a cart-line id: a short BLAKE3 digest of the merge key plus a
/// store-lifetime sequence number. Lines sharing a key get distinct ids.
pub fn cart_line_id(cart_key: &str, seq: u64) -> String {
    let digest = blake3::hash(cart_key.as_bytes()).to_hex();
    format!("{}-{}", &digest.as_str()[..16], seq)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{Addon, Picked, PickedAddon};
    use proptest::prelude::*;

    fn addon(id: &str, price: u32) -> Addon {
        Addon {
            id: id.to_string(),
            name: id.to_string(),
            price,
            category: "單點加購".to_string(),
            is_available: true,
        }
    }

    #[test]
    fn test_key_stable_under_map_reorder() {
        let mut a = Selection::default();
        a.donenesses.insert("3分熟".to_string(), 1);
        a.donenesses.insert("全熟".to_string(), 2);
        a.drinks.insert("無糖紅茶".to_string(), 3);

        let mut b = Selection::default();
        b.drinks.insert("無糖紅茶".to_string(), 3);
        b.donenesses.insert("全熟".to_string(), 2);
        b.donenesses.insert("3分熟".to_string(), 1);

        assert_eq!(cart_key("set-1", &a), cart_key("set-1", &b));
    }

    #[test]
    fn test_key_drops_zero_quantities() {
        let mut a = Selection::default();
        a.drinks.insert("無糖紅茶".to_string(), 1);

        let mut b = a.clone();
        b.drinks.insert("冰涼可樂".to_string(), 0);

        assert_eq!(cart_key("set-1", &a), cart_key("set-1", &b));
    }

    #[test]
    fn test_key_sensitive_to_retained_choices() {
        let mut a = Selection::default();
        a.drinks.insert("無糖紅茶".to_string(), 1);
        let mut b = Selection::default();
        b.drinks.insert("冰涼可樂".to_string(), 1);
        assert_ne!(cart_key("set-1", &a), cart_key("set-1", &b));

        // Same choices, different quantity
        let mut c = a.clone();
        c.drinks.insert("無糖紅茶".to_string(), 2);
        assert_ne!(cart_key("set-1", &a), cart_key("set-1", &c));
    }

    #[test]
    fn test_key_sensitive_to_item() {
        let sel = Selection::default();
        assert_ne!(cart_key("set-1", &sel), cart_key("set-2", &sel));
    }

    #[test]
    fn test_key_ignores_notes() {
        let mut a = Selection::default();
        a.donenesses.insert("5分熟".to_string(), 1);
        let mut b = a.clone();
        a.notes = "不要洋蔥".to_string();
        b.notes = "醬多一點".to_string();
        assert_eq!(cart_key("set-1", &a), cart_key("set-1", &b));
    }

    #[test]
    fn test_key_single_choice_sentinel() {
        let none = Selection::default();
        let mut empty = Selection::default();
        empty.single_choice_addon = Some(String::new());
        assert_eq!(cart_key("x", &none), cart_key("x", &empty));
        assert!(cart_key("x", &none).ends_with("singleChoiceAddon=none"));

        let mut chosen = Selection::default();
        chosen.single_choice_addon = Some("加麵".to_string());
        assert_ne!(cart_key("x", &none), cart_key("x", &chosen));
    }

    #[test]
    fn test_key_addons_sorted_by_id() {
        let mut a = Selection::default();
        a.addons.push(PickedAddon { addon: addon("addon-soup", 30), quantity: 1 });
        a.addons.push(PickedAddon { addon: addon("addon-fries", 60), quantity: 2 });

        let mut b = Selection::default();
        b.addons.push(PickedAddon { addon: addon("addon-fries", 60), quantity: 2 });
        b.addons.push(PickedAddon { addon: addon("addon-soup", 30), quantity: 1 });

        assert_eq!(cart_key("x", &a), cart_key("x", &b));
        assert!(cart_key("x", &a).contains("addons=addon-fries:2,addon-soup:1"));
    }

    #[test]
    fn test_key_sauce_list_order_irrelevant() {
        let mut a = Selection::default();
        a.sauces.push(Picked { name: "黑胡椒".to_string(), quantity: 1 });
        a.sauces.push(Picked { name: "蒜味醬".to_string(), quantity: 1 });

        let mut b = Selection::default();
        b.sauces.push(Picked { name: "蒜味醬".to_string(), quantity: 1 });
        b.sauces.push(Picked { name: "黑胡椒".to_string(), quantity: 1 });

        assert_eq!(cart_key("x", &a), cart_key("x", &b));
    }

    #[test]
    fn test_cart_line_id_unique_per_seq() {
        let key = cart_key("set-1", &Selection::default());
        let a = cart_line_id(&key, 1);
        let b = cart_line_id(&key, 2);
        assert_ne!(a, b);
        // Same digest prefix, different sequence suffix
        assert_eq!(a.split('-').next(), b.split('-').next());
        assert_eq!(a.split('-').next().map(str::len), Some(16));
    }

    proptest! {
        #[test]
        fn prop_key_independent_of_insertion_order(
            entries in proptest::collection::hash_map("[a-z]{1,8}", 0u32..5, 0..8)
        ) {
            let mut asc = Selection::default();
            let mut sorted: Vec<_> = entries.iter().collect();
            sorted.sort();
            for (name, qty) in &sorted {
                asc.drinks.insert((*name).clone(), **qty);
            }
            let mut desc = Selection::default();
            for (name, qty) in sorted.iter().rev() {
                desc.drinks.insert((*name).clone(), **qty);
            }
            prop_assert_eq!(cart_key("item", &asc), cart_key("item", &desc));
        }

        #[test]
        fn prop_key_total_over_arbitrary_lists(
            picks in proptest::collection::vec(("[a-z]{1,8}", 0u32..5), 0..8)
        ) {
            let mut sel = Selection::default();
            for (name, quantity) in picks {
                sel.sauces.push(Picked { name, quantity });
            }
            // Never panics, always deterministic
            let k1 = cart_key("item", &sel);
            let k2 = cart_key("item", &sel);
            prop_assert_eq!(k1, k2);
        }
    }
}
