//! Menu catalog: lookups, availability toggles, and fallback resolution.
//!
//! The catalog is reference data fetched from the backend sheet; when the
//! fetch fails or comes back hollow, a bundled fallback fills the gaps so
//! the shop can keep taking orders.

pub mod fallback;
pub mod parser;

use crate::core::types::{Addon, MenuCategory, MenuItem, OptionLists};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// The full menu payload: categories, addons, and the dynamic option lists.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Catalog {
    pub menu: Vec<MenuCategory>,
    pub addons: Vec<Addon>,
    pub options: OptionLists,
}

impl Catalog {
    /// Look up an item by id, returning the category it lives in.
    pub fn find_item(&self, item_id: &str) -> Option<(&MenuCategory, &MenuItem)> {
        self.menu.iter().find_map(|category| {
            category
                .items
                .iter()
                .find(|item| item.id == item_id)
                .map(|item| (category, item))
        })
    }

    pub fn find_addon(&self, addon_id: &str) -> Option<&Addon> {
        self.addons.iter().find(|addon| addon.id == addon_id)
    }

    /// Whether an item exists and is currently orderable.
    pub fn item_selectable(&self, item_id: &str) -> bool {
        self.find_item(item_id)
            .map(|(_, item)| item.is_available)
            .unwrap_or(false)
    }

    pub fn addon_selectable(&self, addon_id: &str) -> bool {
        self.find_addon(addon_id)
            .map(|addon| addon.is_available)
            .unwrap_or(false)
    }

    /// True when there are no categories or every category is empty.
    pub fn is_menu_empty(&self) -> bool {
        self.menu.iter().all(|category| category.items.is_empty())
    }

    /// Apply an availability toggle set in place. Ids and option names the
    /// catalog doesn't carry are ignored.
    pub fn apply_availability(&mut self, update: &AvailabilityUpdate) {
        for category in &mut self.menu {
            for item in &mut category.items {
                if let Some(&available) = update.menu.get(&item.id) {
                    item.is_available = available;
                }
            }
        }
        for addon in &mut self.addons {
            if let Some(&available) = update.addons.get(&addon.id) {
                addon.is_available = available;
            }
        }
        for (list_key, toggles) in &update.options {
            if let Some(list) = option_list_mut(&mut self.options, list_key) {
                for entry in list.iter_mut() {
                    if let Some(&available) = toggles.get(&entry.name) {
                        entry.is_available = available;
                    }
                }
            }
        }
    }

    /// Snapshot the current availability state as a toggle set, the shape
    /// the admin panel pushes back to the backend.
    pub fn availability_snapshot(&self) -> AvailabilityUpdate {
        let mut update = AvailabilityUpdate::default();
        for category in &self.menu {
            for item in &category.items {
                update.menu.insert(item.id.clone(), item.is_available);
            }
        }
        for addon in &self.addons {
            update.addons.insert(addon.id.clone(), addon.is_available);
        }
        for (list_key, list) in named_lists(&self.options) {
            if list.is_empty() {
                continue;
            }
            let toggles: IndexMap<String, bool> = list
                .iter()
                .map(|entry| (entry.name.clone(), entry.is_available))
                .collect();
            update.options.insert(list_key.to_string(), toggles);
        }
        update
    }
}

/// Each dynamic list paired with its wire key.
fn named_lists(options: &OptionLists) -> [(&'static str, &[crate::core::types::OptionEntry]); 7] {
    [
        ("sauces", &options.sauces),
        ("dessertsA", &options.desserts_a),
        ("dessertsB", &options.desserts_b),
        ("pastasA", &options.pastas_a),
        ("pastasB", &options.pastas_b),
        ("coldNoodles", &options.cold_noodles),
        ("simpleMeals", &options.simple_meals),
    ]
}

fn option_list_mut<'a>(
    options: &'a mut OptionLists,
    key: &str,
) -> Option<&'a mut Vec<crate::core::types::OptionEntry>> {
    match key {
        "sauces" => Some(&mut options.sauces),
        "dessertsA" => Some(&mut options.desserts_a),
        "dessertsB" => Some(&mut options.desserts_b),
        "pastasA" => Some(&mut options.pastas_a),
        "pastasB" => Some(&mut options.pastas_b),
        "coldNoodles" => Some(&mut options.cold_noodles),
        "simpleMeals" => Some(&mut options.simple_meals),
        _ => None,
    }
}

/// Availability toggle set keyed by item id, addon id, and option list name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AvailabilityUpdate {
    pub menu: IndexMap<String, bool>,
    pub addons: IndexMap<String, bool>,
    pub options: IndexMap<String, IndexMap<String, bool>>,
}

/// Where the working catalog came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogSource {
    Api,
    Fallback,
}

/// The catalog after fallback resolution, with provenance.
#[derive(Debug, Clone)]
pub struct ResolvedCatalog {
    pub catalog: Catalog,
    pub source: CatalogSource,
    /// The fetch succeeded but carried no sellable menu
    pub menu_was_empty: bool,
}

/// Resolve a fetched catalog against the bundled fallback.
///
/// No fetch at all → pure fallback. A fetch with a hollow menu keeps its
/// provenance but gets the fallback menu and addons substituted; each empty
/// option list is likewise backfilled individually.
pub fn resolve(fetched: Option<Catalog>) -> ResolvedCatalog {
    let defaults = fallback::catalog();
    match fetched {
        None => ResolvedCatalog {
            catalog: defaults,
            source: CatalogSource::Fallback,
            menu_was_empty: false,
        },
        Some(mut catalog) => {
            let menu_was_empty = catalog.is_menu_empty();
            if menu_was_empty {
                catalog.menu = defaults.menu;
                catalog.addons = defaults.addons;
            }
            backfill_options(&mut catalog.options, defaults.options);
            ResolvedCatalog {
                catalog,
                source: CatalogSource::Api,
                menu_was_empty,
            }
        }
    }
}

fn backfill_options(options: &mut OptionLists, defaults: OptionLists) {
    if options.sauces.is_empty() {
        options.sauces = defaults.sauces;
    }
    if options.desserts_a.is_empty() {
        options.desserts_a = defaults.desserts_a;
    }
    if options.desserts_b.is_empty() {
        options.desserts_b = defaults.desserts_b;
    }
    if options.pastas_a.is_empty() {
        options.pastas_a = defaults.pastas_a;
    }
    if options.pastas_b.is_empty() {
        options.pastas_b = defaults.pastas_b;
    }
    if options.cold_noodles.is_empty() {
        options.cold_noodles = defaults.cold_noodles;
    }
    if options.simple_meals.is_empty() {
        options.simple_meals = defaults.simple_meals;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_item_returns_category() {
        let catalog = fallback::catalog();
        let (category, item) = catalog.find_item("set-1").unwrap();
        assert_eq!(category.title, "套餐");
        assert_eq!(item.price, 399);
        assert!(catalog.find_item("no-such-item").is_none());
    }

    #[test]
    fn test_item_selectable_tracks_availability() {
        let mut catalog = fallback::catalog();
        assert!(catalog.item_selectable("set-1"));

        let mut update = AvailabilityUpdate::default();
        update.menu.insert("set-1".to_string(), false);
        catalog.apply_availability(&update);
        assert!(!catalog.item_selectable("set-1"));
        // Other items untouched
        assert!(catalog.item_selectable("set-2"));
    }

    #[test]
    fn test_apply_availability_toggles_options() {
        let mut catalog = fallback::catalog();
        let sauce = catalog.options.sauces[0].name.clone();

        let mut toggles = IndexMap::new();
        toggles.insert(sauce.clone(), false);
        let mut update = AvailabilityUpdate::default();
        update.options.insert("sauces".to_string(), toggles);
        catalog.apply_availability(&update);

        assert!(!catalog.options.sauces[0].is_available);
        // Unknown list keys are ignored
        let mut bogus = AvailabilityUpdate::default();
        bogus
            .options
            .insert("noSuchList".to_string(), IndexMap::new());
        catalog.apply_availability(&bogus);
    }

    #[test]
    fn test_snapshot_roundtrips_through_apply() {
        let mut catalog = fallback::catalog();
        let mut update = AvailabilityUpdate::default();
        update.menu.insert("set-2".to_string(), false);
        update.addons.insert("addon-soup".to_string(), false);
        let mut sauces = IndexMap::new();
        sauces.insert("泰式".to_string(), false);
        update.options.insert("sauces".to_string(), sauces);
        catalog.apply_availability(&update);

        let snapshot = catalog.availability_snapshot();
        assert_eq!(snapshot.menu.get("set-2"), Some(&false));
        assert_eq!(snapshot.addons.get("addon-soup"), Some(&false));
        assert_eq!(snapshot.options["sauces"].get("泰式"), Some(&false));
        // Empty lists stay out of the snapshot
        assert!(!snapshot.options.contains_key("simpleMeals"));
        assert_eq!(
            snapshot.options.keys().collect::<Vec<_>>(),
            ["sauces", "dessertsA", "dessertsB", "pastasA", "pastasB", "coldNoodles"]
        );

        let mut fresh = fallback::catalog();
        fresh.apply_availability(&snapshot);
        assert!(!fresh.item_selectable("set-2"));
        assert!(!fresh.addon_selectable("addon-soup"));
        assert!(!fresh
            .options
            .sauces
            .iter()
            .find(|o| o.name == "泰式")
            .unwrap()
            .is_available);
    }

    #[test]
    fn test_resolve_without_fetch_uses_fallback() {
        let resolved = resolve(None);
        assert_eq!(resolved.source, CatalogSource::Fallback);
        assert!(!resolved.menu_was_empty);
        assert!(!resolved.catalog.is_menu_empty());
    }

    #[test]
    fn test_resolve_hollow_menu_substitutes_fallback() {
        let hollow = Catalog {
            menu: vec![MenuCategory {
                title: "套餐".to_string(),
                items: Vec::new(),
            }],
            addons: Vec::new(),
            options: OptionLists::default(),
        };
        let resolved = resolve(Some(hollow));
        assert_eq!(resolved.source, CatalogSource::Api);
        assert!(resolved.menu_was_empty);
        assert!(resolved.catalog.find_item("set-1").is_some());
        assert!(!resolved.catalog.options.sauces.is_empty());
    }

    #[test]
    fn test_resolve_backfills_only_empty_lists() {
        let mut fetched = fallback::catalog();
        fetched.options.sauces = vec![crate::core::types::OptionEntry {
            name: "店家特調".to_string(),
            is_available: true,
        }];
        fetched.options.cold_noodles.clear();

        let resolved = resolve(Some(fetched));
        assert_eq!(resolved.catalog.options.sauces.len(), 1);
        assert_eq!(resolved.catalog.options.sauces[0].name, "店家特調");
        assert!(!resolved.catalog.options.cold_noodles.is_empty());
    }
}
