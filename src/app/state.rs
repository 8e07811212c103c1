use crate::account::ORDER_CAPACITY;
use crate::api::models::{Quote, QuoteResponse, QuoteSet};
use crate::app::session::Session;
use crate::app::tooltips;
use crate::catalog::{Catalog, Category, Product, Section};
use crate::markup::ColorCode;
use crate::trade::{Fill, MAX_BUY_AMOUNT, Market};
use crate::util::format_number;
use chrono::{DateTime, Local};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Bazaar,
    Orders,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Amount,
}

#[derive(Debug)]
pub struct MarketData {
    pub catalog: Catalog,
    pub quotes: QuoteSet,
    pub last_updated: i64,
}

#[derive(Debug)]
pub struct NavState {
    pub page: Page,
    pub category: String,
    pub section: Option<String>,
    pub item: Option<String>,
    pub selected_index: usize,
}

#[derive(Debug)]
pub struct App {
    pub status: String,
    pub data: MarketData,
    pub session: Session,
    pub nav: NavState,
    pub mode: InputMode,
    pub amount_input: String,
}

/// One inventory row as shown in the sidebar.
#[derive(Debug, Clone, PartialEq)]
pub struct InventoryRow {
    pub name: String,
    pub quantity: u64,
    pub color: ColorCode,
}

impl App {
    pub fn new(catalog: Catalog, response: QuoteResponse, session: Session) -> Self {
        let category = catalog.categories.keys().next().cloned().unwrap_or_default();
        Self {
            status: "Loaded".into(),
            data: MarketData {
                catalog,
                quotes: response.products,
                last_updated: response.last_updated,
            },
            session,
            nav: NavState {
                page: Page::Bazaar,
                category,
                section: None,
                item: None,
                selected_index: 0,
            },
            mode: InputMode::Normal,
            amount_input: String::new(),
        }
    }

    pub fn market(&self) -> Market<'_> {
        Market::new(&self.data.catalog, &self.data.quotes)
    }

    pub fn current_category(&self) -> Option<&Category> {
        self.data.catalog.category(&self.nav.category)
    }

    pub fn current_section(&self) -> Option<&Section> {
        let section = self.nav.section.as_deref()?;
        self.data.catalog.section(&self.nav.category, section)
    }

    pub fn current_item(&self) -> Option<&Product> {
        self.data.catalog.find(self.nav.item.as_deref()?)
    }

    pub fn current_quote(&self) -> Option<&Quote> {
        let id = self.nav.item.as_deref()?;
        self.market().quote_for(id).ok()
    }

    pub fn title(&self) -> String {
        tooltips::bazaar_title(
            self.nav.page == Page::Orders,
            self.current_category().map_or("", |c| c.name.as_str()),
            self.current_section().map(|s| s.name.as_str()),
            self.current_item().map(|p| p.name.as_str()),
        )
    }

    /// Local time of the quote snapshot, or "unknown" when the API gave none.
    pub fn prices_updated(&self) -> String {
        if self.data.last_updated <= 0 {
            return "unknown".into();
        }
        DateTime::from_timestamp_millis(self.data.last_updated)
            .map(|t| t.with_timezone(&Local).format("%d/%m/%Y %I:%M%P").to_string())
            .unwrap_or_else(|| "unknown".into())
    }

    pub fn orders_label(&self) -> String {
        format!(
            "{}/{ORDER_CAPACITY}",
            format_number(self.session.account.orders.len() as f64, 0)
        )
    }

    pub fn inventory_rows(&self) -> Vec<InventoryRow> {
        self.session
            .account
            .inventory
            .iter()
            .map(|e| {
                let p = self.data.catalog.lookup(&e.id);
                InventoryRow {
                    name: p.name.clone(),
                    quantity: e.quantity,
                    color: p.rarity.color_code(),
                }
            })
            .collect()
    }

    // --- Navigation ---

    /// Number of selectable rows on the current screen.
    pub fn list_len(&self) -> usize {
        if self.nav.page == Page::Orders || self.nav.item.is_some() {
            return 0;
        }
        match self.current_section() {
            Some(s) => s.products.len(),
            None => self.current_category().map_or(0, |c| c.sections.len()),
        }
    }

    pub fn move_selection(&mut self, delta: isize) {
        let len = self.list_len();
        if len == 0 {
            return;
        }
        let idx = (self.nav.selected_index as isize + delta).clamp(0, len as isize - 1);
        self.nav.selected_index = idx as usize;
    }

    pub fn jump_to_top(&mut self) {
        self.nav.selected_index = 0;
    }

    pub fn jump_to_bottom(&mut self) {
        self.nav.selected_index = self.list_len().saturating_sub(1);
    }

    /// Switches category on the bazaar front page, wrapping around.
    pub fn cycle_category(&mut self, delta: isize) {
        if self.nav.page != Page::Bazaar || self.nav.section.is_some() {
            return;
        }
        let keys = &self.data.catalog.categories;
        if keys.is_empty() {
            return;
        }
        let current = keys.get_index_of(&self.nav.category).unwrap_or(0) as isize;
        let next = (current + delta).rem_euclid(keys.len() as isize) as usize;
        if let Some((id, _)) = keys.get_index(next) {
            self.nav.category = id.clone();
            self.nav.selected_index = 0;
        }
    }

    pub fn enter(&mut self) {
        if self.nav.page != Page::Bazaar || self.nav.item.is_some() {
            return;
        }
        let idx = self.nav.selected_index;
        if self.nav.section.is_some() {
            let picked = self
                .current_section()
                .and_then(|s| s.products.get(idx))
                .map(|p| (p.id.clone(), p.name.clone()));
            if let Some((id, name)) = picked {
                self.nav.item = Some(id);
                self.status = format!("Viewing {name}");
            }
            return;
        }
        let picked = self
            .current_category()
            .and_then(|c| c.sections.get_index(idx))
            .map(|(id, _)| id.clone());
        if let Some(id) = picked {
            self.nav.section = Some(id);
            self.nav.selected_index = 0;
        }
    }

    /// Goes up one level. Returns `true` when already at the front page.
    pub fn back(&mut self) -> bool {
        if self.nav.page == Page::Orders {
            self.nav.page = Page::Bazaar;
            return false;
        }
        if self.nav.item.take().is_some() {
            return false;
        }
        if let Some(section) = self.nav.section.take() {
            self.nav.selected_index = self
                .current_category()
                .and_then(|c| c.sections.get_index_of(&section))
                .unwrap_or(0);
            return false;
        }
        true
    }

    pub fn open_orders(&mut self) {
        self.nav = NavState {
            page: Page::Orders,
            category: self.nav.category.clone(),
            section: None,
            item: None,
            selected_index: 0,
        };
    }

    // --- Trading ---

    pub fn begin_buy(&mut self) {
        if self.current_item().is_some() {
            self.mode = InputMode::Amount;
            self.amount_input.clear();
        }
    }

    pub fn on_amount_char(&mut self, ch: char) {
        let max_len = MAX_BUY_AMOUNT.to_string().len();
        if ch.is_ascii_digit() && self.amount_input.len() < max_len {
            self.amount_input.push(ch);
        }
    }

    pub fn on_amount_backspace(&mut self) {
        self.amount_input.pop();
    }

    pub fn cancel_amount(&mut self) {
        self.mode = InputMode::Normal;
        self.amount_input.clear();
    }

    /// Buys the typed amount of the open item. Bad input or a rejected
    /// trade leaves everything as it was.
    pub fn confirm_buy(&mut self) -> Option<Fill> {
        let amount = self.amount_input.parse::<u64>().ok();
        self.cancel_amount();
        let item = self.nav.item.clone()?;
        let market = Market::new(&self.data.catalog, &self.data.quotes);
        let fill = self.session.buy(market, &item, amount?)?;
        self.report(&fill);
        Some(fill)
    }

    /// Sells the whole held stack of the open item.
    pub fn sell_held(&mut self) -> Option<Fill> {
        let item = self.nav.item.clone()?;
        let market = Market::new(&self.data.catalog, &self.data.quotes);
        let fill = self.session.sell_held(market, &item)?;
        self.report(&fill);
        Some(fill)
    }

    pub fn sell_inventory(&mut self) -> Vec<Fill> {
        let market = Market::new(&self.data.catalog, &self.data.quotes);
        let fills = self.session.sell_inventory(market);
        if !fills.is_empty() {
            let total: f64 = fills.iter().map(|f| f.total).sum();
            self.status = format!(
                "Sold {} item types for {} coins",
                fills.len(),
                format_number(total, 1)
            );
        }
        fills
    }

    fn report(&mut self, fill: &Fill) {
        let name = &self.data.catalog.lookup(&fill.item_id).name;
        self.status = format!(
            "{} {}x {} for {} coins",
            fill.side.verb(),
            fill.amount,
            name,
            format_number(fill.total, 1)
        );
    }
}
