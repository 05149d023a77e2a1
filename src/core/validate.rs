//! Selection and checkout validation.
//!
//! The cart store assumes it only ever receives bundles that satisfy the
//! item's customization quotas; this layer produces that guarantee before
//! `CartStore::add`/`edit` is called. Returns a list of errors (empty =
//! valid), one per violated rule.

use super::types::{
    CartLine, CustomerInfo, MenuItem, OptionEntry, OptionLists, Picked, Selection,
    DONENESS_LEVELS, DRINK_CHOICES,
};
use indexmap::IndexMap;
use regex::Regex;
use std::collections::HashSet;
use std::sync::OnceLock;

/// Validation error.
#[derive(Debug, Clone)]
pub struct ValidationError {
    pub message: String,
}

impl ValidationError {
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

fn map_total(map: &IndexMap<String, u32>) -> u32 {
    map.values().sum()
}

fn picks_total(picks: &[Picked]) -> u32 {
    picks.iter().map(|p| p.quantity).sum()
}

fn picks_total_in(picks: &[Picked], group: &HashSet<&str>) -> u32 {
    picks
        .iter()
        .filter(|p| group.contains(p.name.as_str()))
        .map(|p| p.quantity)
        .sum()
}

fn offered_names(list: &[OptionEntry]) -> HashSet<&str> {
    list.iter().map(|o| o.name.as_str()).collect()
}

fn check_offered_and_available(
    picks: &[Picked],
    lists: &[&[OptionEntry]],
    category: &str,
    errors: &mut Vec<ValidationError>,
) {
    for pick in picks.iter().filter(|p| p.quantity > 0) {
        let entry = lists
            .iter()
            .flat_map(|l| l.iter())
            .find(|o| o.name == pick.name);
        match entry {
            None => errors.push(ValidationError::new(format!(
                "{} '{}' is not offered",
                category, pick.name
            ))),
            Some(o) if !o.is_available => errors.push(ValidationError::new(format!(
                "{} '{}' is sold out",
                category, pick.name
            ))),
            Some(_) => {}
        }
    }
}

fn check_names_in(
    map: &IndexMap<String, u32>,
    allowed: &HashSet<&str>,
    category: &str,
    errors: &mut Vec<ValidationError>,
) {
    for name in map.iter().filter(|(_, &q)| q > 0).map(|(n, _)| n) {
        if !allowed.contains(name.as_str()) {
            errors.push(ValidationError::new(format!(
                "{} '{}' is not offered",
                category, name
            )));
        }
    }
}

/// Validate a selection bundle against an item's customization quotas and
/// the offered option lists. Every capability the item lacks is skipped.
pub fn validate_selection(
    item: &MenuItem,
    quantity: u32,
    selection: &Selection,
    options: &OptionLists,
) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let custom = &item.customizations;

    if quantity == 0 {
        errors.push(ValidationError::new("quantity must be at least 1"));
        return errors;
    }

    if custom.doneness {
        let allowed: HashSet<&str> = DONENESS_LEVELS.iter().copied().collect();
        check_names_in(&selection.donenesses, &allowed, "doneness", &mut errors);
        let total = map_total(&selection.donenesses);
        if total != quantity {
            errors.push(ValidationError::new(format!(
                "doneness requires exactly {} selections, got {}",
                quantity, total
            )));
        }
    }

    if custom.sauce_choice {
        let limit = custom.sauces_per_item.unwrap_or(1) * quantity;
        let total = picks_total(&selection.sauces);
        if total != limit {
            errors.push(ValidationError::new(format!(
                "sauces require exactly {} selections, got {}",
                limit, total
            )));
        }
        check_offered_and_available(&selection.sauces, &[&options.sauces], "sauce", &mut errors);
    }

    if custom.drink_choice {
        let allowed: HashSet<&str> = DRINK_CHOICES.iter().copied().collect();
        check_names_in(&selection.drinks, &allowed, "drink", &mut errors);
        let total = map_total(&selection.drinks);
        if total != quantity {
            errors.push(ValidationError::new(format!(
                "drinks require exactly {} selections, got {}",
                quantity, total
            )));
        }
    }

    if custom.dessert_choice {
        let zone_a = offered_names(&options.desserts_a);
        let zone_b = offered_names(&options.desserts_b);
        let total_a = picks_total_in(&selection.desserts, &zone_a);
        let total_b = picks_total_in(&selection.desserts, &zone_b);
        if total_a != quantity || total_b != quantity {
            errors.push(ValidationError::new(format!(
                "desserts require {} picks from zone A and {} from zone B, got {} and {}",
                quantity, quantity, total_a, total_b
            )));
        }
        check_offered_and_available(
            &selection.desserts,
            &[&options.desserts_a, &options.desserts_b],
            "dessert",
            &mut errors,
        );
    }

    if custom.pasta_choice {
        let zone_a = offered_names(&options.pastas_a);
        let zone_b = offered_names(&options.pastas_b);
        let total_a = picks_total_in(&selection.pastas, &zone_a);
        let total_b = picks_total_in(&selection.pastas, &zone_b);
        if total_a != quantity || total_b != quantity {
            errors.push(ValidationError::new(format!(
                "pasta requires {} noodle picks and {} sauce picks, got {} and {}",
                quantity, quantity, total_a, total_b
            )));
        }
        check_offered_and_available(
            &selection.pastas,
            &[&options.pastas_a, &options.pastas_b],
            "pasta",
            &mut errors,
        );
    }

    if let Some(group) = &custom.component_choice {
        let allowed: HashSet<&str> = group.options.iter().map(String::as_str).collect();
        check_names_in(&selection.component_choices, &allowed, &group.title, &mut errors);
        let total = map_total(&selection.component_choices);
        if total != quantity {
            errors.push(ValidationError::new(format!(
                "'{}' requires exactly {} selections, got {}",
                group.title, quantity, total
            )));
        }
    }

    if let Some(side) = &custom.side_choice {
        let allowed: HashSet<&str> = side.options.iter().map(String::as_str).collect();
        check_names_in(&selection.side_choices, &allowed, &side.title, &mut errors);
        let limit = side.choices * quantity;
        let total = map_total(&selection.side_choices);
        if total != limit {
            errors.push(ValidationError::new(format!(
                "'{}' requires exactly {} selections, got {}",
                side.title, limit, total
            )));
        }
    }

    if let Some(group) = &custom.multi_choice {
        // Dynamic groups resolve against the server-supplied lists; any other
        // group falls back to the item's own option list
        let own: Vec<OptionEntry>;
        let offered: &[OptionEntry] = if group.title.contains("涼麵") {
            &options.cold_noodles
        } else if group.title.contains("主餐選擇") {
            &options.simple_meals
        } else {
            own = group
                .options
                .iter()
                .map(|name| OptionEntry {
                    name: name.clone(),
                    is_available: true,
                })
                .collect();
            &own
        };
        let allowed = offered_names(offered);
        check_names_in(&selection.multi_choice, &allowed, &group.title, &mut errors);
        for (name, _) in selection.multi_choice.iter().filter(|(_, &q)| q > 0) {
            if let Some(entry) = offered.iter().find(|o| &o.name == name) {
                if !entry.is_available {
                    errors.push(ValidationError::new(format!(
                        "{} '{}' is sold out",
                        group.title, name
                    )));
                }
            }
        }
        let total = map_total(&selection.multi_choice);
        if total != quantity {
            errors.push(ValidationError::new(format!(
                "'{}' requires exactly {} selections, got {}",
                group.title, quantity, total
            )));
        }
    }

    if let Some(name) = selection
        .single_choice_addon
        .as_deref()
        .filter(|n| !n.is_empty())
    {
        match &custom.single_choice_addon {
            Some(cap) if cap.options.iter().any(|o| o == name) => {}
            Some(_) => errors.push(ValidationError::new(format!(
                "upgrade '{}' is not offered for '{}'",
                name, item.name
            ))),
            None => errors.push(ValidationError::new(format!(
                "'{}' has no single-choice upgrade",
                item.name
            ))),
        }
    }

    for picked in selection.addons.iter().filter(|a| a.quantity > 0) {
        if !picked.addon.is_available {
            errors.push(ValidationError::new(format!(
                "addon '{}' is sold out",
                picked.addon.name
            )));
        }
    }

    errors
}

fn phone_pattern() -> &'static Regex {
    static PHONE: OnceLock<Regex> = OnceLock::new();
    PHONE.get_or_init(|| Regex::new(r"^[0-9]{10}$").expect("valid phone pattern"))
}

/// Validate a cart + customer pair right before submission.
pub fn validate_checkout(lines: &[CartLine], customer: &CustomerInfo) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    if lines.is_empty() {
        errors.push(ValidationError::new("cart is empty"));
    }
    if customer.name.trim().is_empty() {
        errors.push(ValidationError::new("customer name is required"));
    }
    if customer.phone.trim().is_empty() {
        errors.push(ValidationError::new("customer phone is required"));
    } else if !phone_pattern().is_match(customer.phone.trim()) {
        errors.push(ValidationError::new(
            "customer phone must be a 10-digit mobile number",
        ));
    }
    errors
}
