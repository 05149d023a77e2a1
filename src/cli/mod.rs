//! CLI subcommands — init, validate, menu, order, recent.

use crate::backend::memory::InMemoryBackend;
use crate::backend::Backend;
use crate::core::cart::CartStore;
use crate::core::types::{CustomerInfo, OrderSummary, OrderType, Picked, PickedAddon, Selection};
use crate::core::validate::{validate_checkout, validate_selection};
use crate::journal;
use crate::menu::{self, parser, Catalog};
use crate::receipt;
use clap::Subcommand;
use indexmap::IndexMap;
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Write the bundled menu catalog as a starting menu.yaml
    Init {
        /// Directory to initialize (default: current)
        #[arg(default_value = ".")]
        path: PathBuf,
    },

    /// Validate a menu catalog file
    Validate {
        /// Path to menu.yaml
        #[arg(short, long, default_value = "menu.yaml")]
        file: PathBuf,
    },

    /// Show the menu with current availability
    Menu {
        /// Path to menu.yaml (bundled fallback when omitted)
        #[arg(short, long)]
        file: Option<PathBuf>,
    },

    /// Run an order script: build the cart, submit, print the ticket
    Order {
        /// Path to the order script
        #[arg(short, long, default_value = "order.yaml")]
        file: PathBuf,

        /// Path to menu.yaml (bundled fallback when omitted)
        #[arg(short, long)]
        menu: Option<PathBuf>,

        /// Journal directory
        #[arg(long, default_value = "journal")]
        journal_dir: PathBuf,
    },

    /// List recent orders from the journal
    Recent {
        /// Journal directory
        #[arg(long, default_value = "journal")]
        journal_dir: PathBuf,

        /// Number of entries to show
        #[arg(short, long, default_value_t = 10)]
        count: usize,
    },
}

/// Dispatch a CLI command.
pub fn dispatch(cmd: Commands) -> Result<(), String> {
    match cmd {
        Commands::Init { path } => cmd_init(&path),
        Commands::Validate { file } => cmd_validate(&file),
        Commands::Menu { file } => cmd_menu(file.as_deref()),
        Commands::Order {
            file,
            menu,
            journal_dir,
        } => cmd_order(&file, menu.as_deref(), &journal_dir),
        Commands::Recent { journal_dir, count } => cmd_recent(&journal_dir, count),
    }
}

fn cmd_init(path: &Path) -> Result<(), String> {
    let menu_path = path.join("menu.yaml");
    if menu_path.exists() {
        return Err(format!("{} already exists", menu_path.display()));
    }
    std::fs::create_dir_all(path).map_err(|e| format!("cannot create {}: {}", path.display(), e))?;

    let catalog = menu::fallback::catalog();
    let yaml = serde_yaml_ng::to_string(&catalog)
        .map_err(|e| format!("cannot serialize bundled catalog: {}", e))?;
    std::fs::write(&menu_path, yaml)
        .map_err(|e| format!("cannot write {}: {}", menu_path.display(), e))?;

    println!("Initialized menu at {}", menu_path.display());
    Ok(())
}

fn cmd_validate(file: &Path) -> Result<(), String> {
    let catalog = parser::parse_catalog_file(file)?;
    let errors = parser::validate_catalog(&catalog);

    if errors.is_empty() {
        let items: usize = catalog.menu.iter().map(|c| c.items.len()).sum();
        println!(
            "OK: {} categories, {} items, {} addons",
            catalog.menu.len(),
            items,
            catalog.addons.len()
        );
        Ok(())
    } else {
        for e in &errors {
            eprintln!("  ERROR: {}", e);
        }
        Err(format!("{} validation error(s)", errors.len()))
    }
}

/// Load the working catalog: a file when given, the bundled fallback
/// otherwise. Empty option lists are backfilled either way.
fn load_catalog(menu_file: Option<&Path>) -> Result<Catalog, String> {
    let fetched = match menu_file {
        Some(path) => {
            let catalog = parser::parse_catalog_file(path)?;
            let errors = parser::validate_catalog(&catalog);
            if !errors.is_empty() {
                for e in &errors {
                    eprintln!("  ERROR: {}", e);
                }
                return Err(format!("{} catalog error(s)", errors.len()));
            }
            Some(catalog)
        }
        None => None,
    };
    Ok(menu::resolve(fetched).catalog)
}

fn cmd_menu(menu_file: Option<&Path>) -> Result<(), String> {
    let catalog = load_catalog(menu_file)?;
    for category in &catalog.menu {
        println!("{}:", category.title);
        for item in &category.items {
            let marker = if item.is_available { " " } else { "x" };
            let weight = item
                .weight
                .as_deref()
                .map(|w| format!(" {}", w))
                .unwrap_or_default();
            println!("  {} {}{} ${}", marker, item.name, weight, item.price);
        }
    }
    if !catalog.addons.is_empty() {
        println!("加購:");
        for addon in &catalog.addons {
            let marker = if addon.is_available { " " } else { "x" };
            println!("  {} {} ${}", marker, addon.name, addon.price);
        }
    }
    Ok(())
}

// ============================================================================
// Order scripts
// ============================================================================

/// A scripted order: order type, customer, and one entry per cart line.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct OrderScript {
    order_type: OrderType,
    customer: CustomerInfo,
    items: Vec<ScriptItem>,
}

fn default_quantity() -> u32 {
    1
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ScriptItem {
    id: String,
    #[serde(default = "default_quantity")]
    quantity: u32,
    #[serde(default)]
    donenesses: IndexMap<String, u32>,
    #[serde(default)]
    drinks: IndexMap<String, u32>,
    #[serde(default)]
    side_choices: IndexMap<String, u32>,
    #[serde(default)]
    multi_choice: IndexMap<String, u32>,
    #[serde(default)]
    component_choices: IndexMap<String, u32>,
    #[serde(default)]
    sauces: IndexMap<String, u32>,
    #[serde(default)]
    desserts: IndexMap<String, u32>,
    #[serde(default)]
    pastas: IndexMap<String, u32>,
    #[serde(default)]
    addons: Vec<ScriptAddon>,
    #[serde(default)]
    single_choice_addon: Option<String>,
    #[serde(default)]
    notes: String,
}

#[derive(Debug, Deserialize)]
struct ScriptAddon {
    id: String,
    #[serde(default = "default_quantity")]
    quantity: u32,
}

fn picks(map: IndexMap<String, u32>) -> Vec<Picked> {
    map.into_iter()
        .map(|(name, quantity)| Picked { name, quantity })
        .collect()
}

impl ScriptItem {
    /// Turn the script entry into a selection bundle, resolving addon ids
    /// against the catalog.
    fn into_selection(self, catalog: &Catalog) -> Result<(String, u32, Selection), String> {
        let mut addons = Vec::new();
        for picked in self.addons {
            let addon = catalog
                .find_addon(&picked.id)
                .ok_or_else(|| format!("unknown addon '{}'", picked.id))?;
            addons.push(PickedAddon {
                addon: addon.clone(),
                quantity: picked.quantity,
            });
        }
        let selection = Selection {
            donenesses: self.donenesses,
            drinks: self.drinks,
            side_choices: self.side_choices,
            multi_choice: self.multi_choice,
            component_choices: self.component_choices,
            sauces: picks(self.sauces),
            desserts: picks(self.desserts),
            pastas: picks(self.pastas),
            addons,
            single_choice_addon: self.single_choice_addon,
            notes: self.notes,
        };
        Ok((self.id, self.quantity, selection))
    }
}

fn parse_order_script(path: &Path) -> Result<OrderScript, String> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("failed to read {}: {}", path.display(), e))?;
    serde_yaml_ng::from_str(&content)
        .map_err(|e| format!("failed to parse order script: {}", e))
}

fn cmd_order(file: &Path, menu_file: Option<&Path>, journal_dir: &Path) -> Result<(), String> {
    let script = parse_order_script(file)?;
    let mut backend = InMemoryBackend::new(load_catalog(menu_file)?);
    let catalog = backend.fetch_catalog()?;

    let mut cart = CartStore::new();
    for entry in script.items {
        let (item_id, quantity, selection) = entry.into_selection(&catalog)?;
        let (category, item) = catalog
            .find_item(&item_id)
            .ok_or_else(|| format!("unknown item '{}'", item_id))?;
        if !item.is_available {
            return Err(format!("'{}' is sold out", item.name));
        }
        let errors = validate_selection(item, quantity, &selection, &catalog.options);
        if !errors.is_empty() {
            for e in &errors {
                eprintln!("  ERROR: {}: {}", item.name, e);
            }
            return Err(format!("{} selection error(s) for '{}'", errors.len(), item.name));
        }
        cart.add(item, quantity, selection, &category.title);
    }

    let errors = validate_checkout(cart.lines(), &script.customer);
    if !errors.is_empty() {
        for e in &errors {
            eprintln!("  ERROR: {}", e);
        }
        return Err(format!("{} checkout error(s)", errors.len()));
    }

    let draft = cart.draft(script.customer.clone(), script.order_type);
    let total = draft.total_price;
    let items = draft.items.clone();
    let order_id = backend.submit_order(draft)?;

    print!("{}", receipt::printable(&order_id, &items, total));

    journal::append_order(
        journal_dir,
        &OrderSummary {
            id: order_id.clone(),
            customer_name: script.customer.name,
            total_amount: total,
            timestamp: journal::now_iso8601(),
        },
    )?;
    println!("Order {} submitted ({} items, ${}).", order_id, cart.item_count(), total);
    Ok(())
}

fn cmd_recent(journal_dir: &Path, count: usize) -> Result<(), String> {
    let entries = journal::recent_orders(journal_dir, count)?;
    if entries.is_empty() {
        println!("No orders in {}.", journal::journal_path(journal_dir).display());
        return Ok(());
    }
    for entry in &entries {
        println!(
            "{}  {}  {}  ${}",
            entry.timestamp, entry.id, entry.customer_name, entry.total_amount
        );
    }
    Ok(())
}
