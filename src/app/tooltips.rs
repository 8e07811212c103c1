//! Tooltip and title strings, written in `§` markup.

use crate::api::models::{PriceLevel, Quote};
use crate::catalog::{Category, Product, Section};
use crate::util::{format_number, plural, title_case};

/// Price levels shown in the order/offer tooltips.
pub const TOP_LEVELS: usize = 7;
pub const STACK_SIZE: f64 = 64.0;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tooltip {
    pub title: String,
    pub text: Option<String>,
}

impl Tooltip {
    fn new(title: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            text: Some(text.into()),
        }
    }
}

pub fn category(c: &Category) -> Tooltip {
    Tooltip::new(format!("§{}{}", c.colour.as_char(), c.name), "§8Category")
}

pub fn section(s: &Section) -> Tooltip {
    Tooltip::new(
        format!("§e{}", s.name),
        format!("§8{} products", s.products.len()),
    )
}

fn product_title(p: &Product) -> String {
    format!("§{}{}", p.rarity.color_code().as_char(), p.name)
}

/// Short tooltip used in a section's product list.
pub fn product(p: &Product) -> Tooltip {
    Tooltip::new(
        product_title(p),
        format!("§8{} commodity", title_case(p.rarity.label())),
    )
}

/// The item card on the detail page: description and rarity line.
pub fn item_card(p: &Product) -> Tooltip {
    Tooltip::new(
        product_title(p),
        format!(
            "§{}{}§p§p§l§{}{}",
            p.description_colour.as_char(),
            p.description,
            p.rarity.color_code().as_char(),
            p.rarity.label()
        ),
    )
}

pub fn buy_instantly(p: &Product, q: Option<&Quote>) -> Tooltip {
    let unit = q.map(Quote::unit_buy_price);
    Tooltip::new(
        "§aBuy Instantly",
        format!(
            "§8{}§p§p§7Price per unit: §6{} coins§p§7Stack price: §6{} coins§p§p§eClick to pick amount!",
            p.name,
            price(unit),
            price(unit.map(|u| u * STACK_SIZE)),
        ),
    )
}

pub fn sell_instantly(p: &Product, q: Option<&Quote>) -> Tooltip {
    Tooltip::new(
        "§6Sell Instantly",
        format!(
            "§8{}§p§p§7Price per unit: §6{} coins",
            p.name,
            price(q.map(Quote::unit_sell_price))
        ),
    )
}

/// Standing buy orders, best first.
pub fn buy_orders(p: &Product, q: Option<&Quote>) -> Tooltip {
    let levels = q.map_or(&[][..], |q| q.top_orders(TOP_LEVELS));
    Tooltip::new(
        "§aCreate Buy Order",
        format!("§8{}§p§p§aTop Orders:§p{}", p.name, level_lines(levels, "order")),
    )
}

/// Standing sell offers, best first.
pub fn sell_offers(p: &Product, q: Option<&Quote>) -> Tooltip {
    let levels = q.map_or(&[][..], |q| q.top_offers(TOP_LEVELS));
    Tooltip::new(
        "§6Create Sell Offer",
        format!("§8{}§p§p§6Top Offers:§p{}", p.name, level_lines(levels, "offer")),
    )
}

fn level_lines(levels: &[PriceLevel], noun: &str) -> String {
    levels
        .iter()
        .map(|l| {
            format!(
                "§8- §6{} coins §7each | §a{}§7x from §f{}",
                format_number(l.price_per_unit, 1),
                format_number(l.amount as f64, 0),
                plural(l.orders, noun),
            )
        })
        .collect::<Vec<_>>()
        .join("§p")
}

fn price(v: Option<f64>) -> String {
    v.map_or_else(|| "-".to_string(), |v| format_number(v, 1))
}

/// Header line above the bazaar grid.
pub fn bazaar_title(
    orders_page: bool,
    category: &str,
    section: Option<&str>,
    item: Option<&str>,
) -> String {
    if orders_page {
        return "Bazaar ➜ Orders".to_string();
    }
    match (section, item) {
        (None, None) => format!("Bazaar ➜ {category}"),
        (Some(s), None) => format!("{category} ➜ {s}"),
        (Some(s), Some(i)) if i == s => format!("{category} ➜ {s}"),
        (Some(s), Some(i)) => format!("{s} ➜ {i}"),
        (None, Some(_)) => "Bazaar".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::models::tests::quote;
    use crate::catalog::Catalog;
    use crate::catalog::tests::SMALL;

    fn catalog() -> Catalog {
        Catalog::from_json(SMALL).unwrap()
    }

    #[test]
    fn category_and_section_tooltips() {
        let c = catalog();
        let farming = c.category("farming").unwrap();
        assert_eq!(category(farming), Tooltip::new("§eFarming", "§8Category"));
        let wheat = c.section("farming", "wheat").unwrap();
        assert_eq!(section(wheat), Tooltip::new("§eWheat & Seeds", "§82 products"));
    }

    #[test]
    fn product_tooltip_uses_rarity() {
        let c = catalog();
        let t = product(c.lookup("enchanted_bread"));
        assert_eq!(t.title, "§aEnchanted Bread");
        assert_eq!(t.text.as_deref(), Some("§8Uncommon commodity"));
        let t = product(c.lookup("retired_gem"));
        assert_eq!(t.text.as_deref(), Some("§8Very Special commodity"));
    }

    #[test]
    fn item_card_for_placeholder() {
        let c = catalog();
        let t = item_card(c.lookup("gone"));
        assert_eq!(t.title, "§4Unknown Item");
        assert_eq!(
            t.text.as_deref(),
            Some("§cThis item does not exist in the bazaar data.§p§p§l§4ADMIN")
        );
    }

    #[test]
    fn buy_and_sell_prices() {
        let c = catalog();
        let q = quote("WHEAT", 1234.56, 7.0);
        let p = c.lookup("wheat");
        let t = buy_instantly(p, Some(&q));
        assert_eq!(
            t.text.as_deref(),
            Some("§8Wheat§p§p§7Price per unit: §61,234.6 coins§p§7Stack price: §679,011.8 coins§p§p§eClick to pick amount!")
        );
        let t = sell_instantly(p, Some(&q));
        assert_eq!(t.text.as_deref(), Some("§8Wheat§p§p§7Price per unit: §67.0 coins"));
        let t = sell_instantly(p, None);
        assert_eq!(t.text.as_deref(), Some("§8Wheat§p§p§7Price per unit: §6- coins"));
    }

    #[test]
    fn order_book_lines() {
        let c = catalog();
        let mut q = quote("WHEAT", 6.0, 5.0);
        q.sell_summary[0].orders = 1;
        q.sell_summary[0].amount = 71_000;
        let t = buy_orders(c.lookup("wheat"), Some(&q));
        assert_eq!(
            t.text.as_deref(),
            Some("§8Wheat§p§p§aTop Orders:§p§8- §65.0 coins §7each | §a71,000§7x from §f1 order")
        );
        let t = sell_offers(c.lookup("wheat"), Some(&q));
        assert_eq!(
            t.text.as_deref(),
            Some("§8Wheat§p§p§6Top Offers:§p§8- §66.0 coins §7each | §a1,200§7x from §f1 offer")
        );
    }

    #[test]
    fn order_lines_capped_at_seven() {
        let c = catalog();
        let mut q = quote("WHEAT", 6.0, 5.0);
        let level = q.sell_summary[0];
        q.sell_summary = vec![level; 10];
        let text = buy_orders(c.lookup("wheat"), Some(&q)).text.unwrap();
        assert_eq!(text.matches("§8- ").count(), 7);
    }

    #[test]
    fn titles() {
        assert_eq!(bazaar_title(false, "Farming", None, None), "Bazaar ➜ Farming");
        assert_eq!(bazaar_title(false, "Farming", Some("Wheat"), None), "Farming ➜ Wheat");
        assert_eq!(bazaar_title(false, "Farming", Some("Wheat"), Some("Wheat")), "Farming ➜ Wheat");
        assert_eq!(bazaar_title(false, "Farming", Some("Wheat"), Some("Enchanted Bread")), "Wheat ➜ Enchanted Bread");
        assert_eq!(bazaar_title(true, "Farming", Some("Wheat"), None), "Bazaar ➜ Orders");
    }
}
