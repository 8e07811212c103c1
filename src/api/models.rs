use serde::Deserialize;
use std::collections::HashMap;

/// Live quotes keyed by bazaar product id.
pub type QuoteSet = HashMap<String, Quote>;

#[derive(Debug, Deserialize, Clone)]
pub struct QuoteResponse {
    pub success: bool,
    pub cause: Option<String>,
    #[serde(rename = "lastUpdated", default)]
    pub last_updated: i64,
    #[serde(default)]
    pub products: QuoteSet,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct Quote {
    pub product_id: String,
    /// Standing buy orders, best price first. Instant sells fill against these.
    #[serde(default)]
    pub sell_summary: Vec<PriceLevel>,
    /// Standing sell offers, best price first. Instant buys fill against these.
    #[serde(default)]
    pub buy_summary: Vec<PriceLevel>,
    pub quick_status: QuickStatus,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PriceLevel {
    pub amount: u64,
    pub price_per_unit: f64,
    pub orders: u64,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct QuickStatus {
    pub product_id: String,
    pub sell_price: f64,
    pub sell_volume: u64,
    pub sell_moving_week: u64,
    pub sell_orders: u64,
    pub buy_price: f64,
    pub buy_volume: u64,
    pub buy_moving_week: u64,
    pub buy_orders: u64,
}

impl Quote {
    /// Price paid per unit by an instant buy.
    pub fn unit_buy_price(&self) -> f64 {
        self.quick_status.buy_price
    }

    /// Price received per unit by an instant sell.
    pub fn unit_sell_price(&self) -> f64 {
        self.quick_status.sell_price
    }

    pub fn has_sell_offers(&self) -> bool {
        !self.buy_summary.is_empty()
    }

    pub fn has_buy_orders(&self) -> bool {
        !self.sell_summary.is_empty()
    }

    pub fn top_orders(&self, n: usize) -> &[PriceLevel] {
        &self.sell_summary[..n.min(self.sell_summary.len())]
    }

    pub fn top_offers(&self, n: usize) -> &[PriceLevel] {
        &self.buy_summary[..n.min(self.buy_summary.len())]
    }
}
