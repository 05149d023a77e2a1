//! Bundled fallback catalog.
//!
//! Used whenever the backend sheet is unreachable or returns a hollow menu.
//! Data mirrors the shop's printed menu; availability defaults to true and
//! is only ever narrowed by a live availability fetch.

use super::Catalog;
use crate::core::types::{
    Addon, ChoiceGroup, Customizations, MenuCategory, MenuItem, OptionEntry, OptionLists,
    SideChoice,
};

fn item(
    id: &str,
    name: &str,
    weight: Option<&str>,
    price: u32,
    description: &str,
    customizations: Customizations,
) -> MenuItem {
    MenuItem {
        id: id.to_string(),
        name: name.to_string(),
        short_name: None,
        weight: weight.map(str::to_string),
        price,
        description: Some(description.to_string()),
        customizations,
        is_available: true,
    }
}

fn steak_set(sauces_per_item: u32, doneness: bool) -> Customizations {
    Customizations {
        doneness,
        sauce_choice: true,
        sauces_per_item: Some(sauces_per_item),
        drink_choice: true,
        notes: true,
        ..Customizations::default()
    }
}

fn fried_component() -> ChoiceGroup {
    ChoiceGroup {
        title: "炸物選擇".to_string(),
        options: vec!["脆皮炸雞".to_string(), "炸魚".to_string()],
    }
}

fn cold_noodle_flavors() -> ChoiceGroup {
    ChoiceGroup {
        title: "涼麵口味".to_string(),
        options: COLD_NOODLE_CHOICES.iter().map(|s| s.to_string()).collect(),
    }
}

fn addon(id: &str, name: &str, price: u32, category: &str) -> Addon {
    Addon {
        id: id.to_string(),
        name: name.to_string(),
        price,
        category: category.to_string(),
        is_available: true,
    }
}

fn entries(names: &[&str]) -> Vec<OptionEntry> {
    names
        .iter()
        .map(|name| OptionEntry {
            name: name.to_string(),
            is_available: true,
        })
        .collect()
}

const SAUCE_CHOICES: [&str; 11] = [
    "生蒜片",
    "黑胡椒",
    "泡菜",
    "巴薩米克醋",
    "蒜味醬",
    "橙汁醬",
    "椒鹽",
    "BBQ醬",
    "蕃茄醬",
    "泰式",
    "芥末",
];

const DESSERT_CHOICES_A: [&str; 6] = [
    "法式烤布蕾佐冰淇淋",
    "宇治紫米紅豆冰淇淋",
    "融岩巧克力佐冰淇淋",
    "阿薩斯蘋果佐冰淇淋",
    "烤焦糖布丁佐冰淇淋",
    "波士頓花生冰淇淋",
];

const DESSERT_CHOICES_B: [&str; 9] = [
    "蜜糖潛堡",
    "格子鬆餅",
    "美式鬆餅",
    "蜜糖吐司",
    "法式薄餅",
    "焦糖鍋巴",
    "蜜糖長棍",
    "香餅牛軋",
    "脆皮甜筒",
];

const PASTA_CHOICES_A: [&str; 4] = [
    "日豬/煎豬排天使義麵",
    "炸魚/煎魚天使義麵",
    "炸雞/雞肉天使義麵",
    "炒牛肉片天使義大利麵",
];

const PASTA_CHOICES_B: [&str; 8] = [
    "蕃茄索士",
    "青醬索士",
    "蒜油索士",
    "奶油索士",
    "海鮮索士",
    "黑椒索士",
    "肉醬索士",
    "沙茶索士",
];

const COLD_NOODLE_CHOICES: [&str; 12] = [
    "日式涼麵",
    "泰式涼麵",
    "沙茶涼麵",
    "蒜香涼麵",
    "金瓜涼麵",
    "巴薩米醋涼麵",
    "香葱涼麵",
    "凱撒涼麵",
    "橙汁涼麵",
    "黑胡椒涼麵",
    "台式涼麵",
    "BBQ涼麵",
];

/// Build the bundled catalog.
pub fn catalog() -> Catalog {
    let menu = vec![
        MenuCategory {
            title: "套餐".to_string(),
            items: vec![
                item(
                    "set-1",
                    "板腱牛排+脆皮炸雞(炸魚)套餐",
                    Some("10oz"),
                    399,
                    "附:①日湯②麵包③主餐④脆薯⑤飲料 6oz牛排 4oz雞塊",
                    Customizations {
                        component_choice: Some(fried_component()),
                        ..steak_set(2, true)
                    },
                ),
                item(
                    "set-2",
                    "板腱牛排+脆皮炸雞(炸魚)套餐",
                    Some("15oz"),
                    499,
                    "附:①日湯②麵包③主餐④脆薯⑤飲料 10oz牛排 5oz雞塊",
                    Customizations {
                        component_choice: Some(fried_component()),
                        ..steak_set(2, true)
                    },
                ),
                item(
                    "set-6",
                    "板腱牛排套餐",
                    Some("12oz"),
                    499,
                    "附:①日湯②麵包③主餐④脆薯⑤飲料",
                    steak_set(2, true),
                ),
                item(
                    "set-8",
                    "香煎櫻桃鴨胸套餐",
                    Some("10oz"),
                    399,
                    "附:①日湯②麵包③主餐④脆薯⑤飲料",
                    steak_set(2, false),
                ),
                item(
                    "set-10",
                    "香煎鮮嫩雞腿套餐",
                    Some("10oz"),
                    250,
                    "附:①日湯②麵包③主餐④脆薯⑤飲料",
                    steak_set(2, false),
                ),
            ],
        },
        MenuCategory {
            title: "組合餐".to_string(),
            items: vec![
                item(
                    "combo-1",
                    "日豬、雞腿、上蓋組合餐",
                    Some("15oz"),
                    529,
                    "附:①日湯②麵包③主餐④脆薯⑤飲料",
                    steak_set(2, true),
                ),
                item(
                    "combo-2",
                    "炸魚、雞腿、板腱組合餐",
                    Some("15oz"),
                    529,
                    "附:①日湯②麵包③主餐④脆薯⑤飲料",
                    Customizations {
                        component_choice: Some(fried_component()),
                        ..steak_set(2, true)
                    },
                ),
            ],
        },
        MenuCategory {
            title: "炸物&漢堡".to_string(),
            items: vec![
                item(
                    "fried-chicken-single",
                    "黃金脆皮炸雞塊",
                    None,
                    75,
                    "單點",
                    Customizations {
                        notes: true,
                        ..Customizations::default()
                    },
                ),
                item(
                    "fried-chicken-set",
                    "黃金脆皮炸雞塊套餐",
                    None,
                    175,
                    "附:①日湯②主餐③脆薯④甜品⑤飲料",
                    Customizations {
                        drink_choice: true,
                        notes: true,
                        ..Customizations::default()
                    },
                ),
                item(
                    "burger-kimchi",
                    "黃金泡菜脆皮雞塊吃到堡",
                    None,
                    80,
                    "單點",
                    Customizations {
                        notes: true,
                        ..Customizations::default()
                    },
                ),
            ],
        },
        MenuCategory {
            title: "涼麵".to_string(),
            items: vec![
                item(
                    "cold-noodle-single",
                    "涼麵",
                    None,
                    75,
                    "單點。請選擇口味",
                    Customizations {
                        multi_choice: Some(cold_noodle_flavors()),
                        notes: true,
                        ..Customizations::default()
                    },
                ),
                item(
                    "cold-noodle-set",
                    "涼麵套餐",
                    None,
                    175,
                    "附:①日湯②主餐③脆薯④甜品⑤飲料",
                    Customizations {
                        multi_choice: Some(cold_noodle_flavors()),
                        drink_choice: true,
                        notes: true,
                        ..Customizations::default()
                    },
                ),
            ],
        },
        MenuCategory {
            title: "義大利麵".to_string(),
            items: vec![
                item(
                    "pasta-choice-single",
                    "任選義麵 (簡餐)",
                    None,
                    160,
                    "簡餐附(選二)→①日湯 ②脆薯 ③甜品 ④飲料",
                    Customizations {
                        pasta_choice: true,
                        notes: true,
                        side_choice: Some(SideChoice {
                            title: "簡餐附餐 (請選二)".to_string(),
                            options: vec![
                                "日湯".to_string(),
                                "脆薯".to_string(),
                                "甜品".to_string(),
                                "飲料".to_string(),
                            ],
                            choices: 2,
                        }),
                        ..Customizations::default()
                    },
                ),
                item(
                    "pasta-choice-set",
                    "任選義麵 (套餐)",
                    None,
                    220,
                    "套餐附:①日湯 ②主餐 ③甜品 ④麵包 ⑤飲料",
                    Customizations {
                        pasta_choice: true,
                        drink_choice: true,
                        notes: true,
                        ..Customizations::default()
                    },
                ),
            ],
        },
        MenuCategory {
            title: "甜品".to_string(),
            items: vec![
                item(
                    "dessert-choice-single",
                    "任選甜品",
                    None,
                    99,
                    "A區、B區各任選一種。",
                    Customizations {
                        dessert_choice: true,
                        notes: true,
                        ..Customizations::default()
                    },
                ),
                item(
                    "dessert-choice-set",
                    "任選甜品套餐",
                    None,
                    200,
                    "附:①日湯②主餐③脆薯④雞塊⑤飲料",
                    Customizations {
                        dessert_choice: true,
                        drink_choice: true,
                        notes: true,
                        ..Customizations::default()
                    },
                ),
            ],
        },
    ];

    let addons = vec![
        addon("addon-top-blade-5oz", "板腱加購 5oz", 200, "主餐加購"),
        addon("addon-ribeye-cap-5oz", "上蓋加購 5oz", 200, "主餐加購"),
        addon("addon-chicken-leg-5oz", "雞腿加購 5oz", 120, "主餐加購"),
        addon("addon-duck-breast-5oz", "鴨胸加購 5oz", 120, "主餐加購"),
        addon("addon-pasta", "義麵加購", 150, "主餐加購"),
        addon("addon-soup", "湯品 加購", 30, "單點加購"),
        addon("addon-fries", "脆薯 加購", 60, "單點加購"),
        addon("addon-daily-dessert", "是日甜品 加購", 60, "單點加購"),
        addon("addon-drink-side", "飲料 加購", 20, "單點加購"),
        addon("addon-nuggets-side", "雞塊 加購", 75, "單點加購"),
    ];

    let options = OptionLists {
        sauces: entries(&SAUCE_CHOICES),
        desserts_a: entries(&DESSERT_CHOICES_A),
        desserts_b: entries(&DESSERT_CHOICES_B),
        pastas_a: entries(&PASTA_CHOICES_A),
        pastas_b: entries(&PASTA_CHOICES_B),
        cold_noodles: entries(&COLD_NOODLE_CHOICES),
        // Filled in by the backend when a simple-meal group is in season
        simple_meals: Vec::new(),
    };

    Catalog {
        menu,
        addons,
        options,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_ids_unique() {
        let catalog = catalog();
        let mut seen = std::collections::HashSet::new();
        for category in &catalog.menu {
            for item in &category.items {
                assert!(seen.insert(item.id.clone()), "duplicate id {}", item.id);
            }
        }
        for addon in &catalog.addons {
            assert!(seen.insert(addon.id.clone()), "duplicate id {}", addon.id);
        }
    }

    #[test]
    fn test_fallback_everything_available() {
        let catalog = catalog();
        assert!(catalog
            .menu
            .iter()
            .flat_map(|c| c.items.iter())
            .all(|i| i.is_available));
        assert!(catalog.addons.iter().all(|a| a.is_available));
        assert!(catalog.options.sauces.iter().all(|o| o.is_available));
    }

    #[test]
    fn test_fallback_sauce_quota_menu_wide() {
        let catalog = catalog();
        let (_, item) = catalog.find_item("set-1").unwrap();
        assert_eq!(item.customizations.sauces_per_item, Some(2));
        assert_eq!(item.customizations.component_choice.as_ref().unwrap().title, "炸物選擇");
    }

    #[test]
    fn test_fallback_option_lists_populated() {
        let options = catalog().options;
        assert_eq!(options.sauces.len(), 11);
        assert_eq!(options.desserts_a.len(), 6);
        assert_eq!(options.desserts_b.len(), 9);
        assert_eq!(options.pastas_a.len(), 4);
        assert_eq!(options.pastas_b.len(), 8);
        assert_eq!(options.cold_noodles.len(), 12);
        assert!(options.simple_meals.is_empty());
    }
}
