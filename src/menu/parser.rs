//! Catalog file parsing and structural validation.

use super::Catalog;
use crate::core::validate::ValidationError;
use std::collections::HashSet;
use std::path::Path;

/// Parse a catalog from a YAML string.
pub fn parse_catalog(content: &str) -> Result<Catalog, String> {
    serde_yaml_ng::from_str(content).map_err(|e| format!("failed to parse catalog: {}", e))
}

/// Parse a catalog from a YAML file.
pub fn parse_catalog_file(path: &Path) -> Result<Catalog, String> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("failed to read {}: {}", path.display(), e))?;
    parse_catalog(&content)
}

/// Structural checks a catalog must pass before it can serve orders:
/// unique ids, non-empty choice groups, sane quota numbers.
pub fn validate_catalog(catalog: &Catalog) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let mut ids: HashSet<&str> = HashSet::new();

    for category in &catalog.menu {
        if category.title.is_empty() {
            errors.push(ValidationError {
                message: "category with empty title".to_string(),
            });
        }
        for item in &category.items {
            if item.id.is_empty() {
                errors.push(ValidationError {
                    message: format!("item '{}' has empty id", item.name),
                });
            } else if !ids.insert(&item.id) {
                errors.push(ValidationError {
                    message: format!("duplicate id '{}'", item.id),
                });
            }
            let custom = &item.customizations;
            if let Some(quota) = custom.sauces_per_item {
                if quota == 0 {
                    errors.push(ValidationError {
                        message: format!("item '{}': saucesPerItem must be at least 1", item.id),
                    });
                }
            }
            for group in [&custom.component_choice, &custom.multi_choice]
                .into_iter()
                .flatten()
            {
                if group.options.is_empty() {
                    errors.push(ValidationError {
                        message: format!(
                            "item '{}': choice group '{}' has no options",
                            item.id, group.title
                        ),
                    });
                }
            }
            if let Some(side) = &custom.side_choice {
                if side.options.is_empty() {
                    errors.push(ValidationError {
                        message: format!(
                            "item '{}': side group '{}' has no options",
                            item.id, side.title
                        ),
                    });
                }
                if side.choices == 0 {
                    errors.push(ValidationError {
                        message: format!(
                            "item '{}': side group '{}' requires zero picks",
                            item.id, side.title
                        ),
                    });
                }
            }
            if let Some(upgrade) = &custom.single_choice_addon {
                if upgrade.options.is_empty() {
                    errors.push(ValidationError {
                        message: format!("item '{}': upgrade group has no options", item.id),
                    });
                }
            }
        }
    }

    for addon in &catalog.addons {
        if addon.id.is_empty() {
            errors.push(ValidationError {
                message: format!("addon '{}' has empty id", addon.name),
            });
        } else if !ids.insert(&addon.id) {
            errors.push(ValidationError {
                message: format!("duplicate id '{}'", addon.id),
            });
        }
    }

    errors
}
