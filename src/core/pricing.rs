//! Line price computation.
//!
//! The base price (plus any single-choice surcharge) scales with quantity;
//! generic addons are a flat per-line charge that does NOT scale. That
//! asymmetry matches the shop's pricing and must not be "fixed".

use super::types::{MenuItem, Selection};

/// Total price for one cart line. Always recomputed from scratch so totals
/// can never drift from the formula:
///
/// `(price + single_choice_surcharge) * quantity + Σ addon.price * addon.qty`
pub fn line_total(item: &MenuItem, quantity: u32, selection: &Selection) -> u32 {
    let surcharge = match (&selection.single_choice_addon, &item.customizations.single_choice_addon) {
        (Some(name), Some(capability)) if !name.is_empty() => capability.price,
        _ => 0,
    };
    let addons_total: u32 = selection
        .addons
        .iter()
        .map(|a| a.addon.price * a.quantity)
        .sum();
    (item.price + surcharge) * quantity + addons_total
}
