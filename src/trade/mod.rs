//! Instant buy and instant sell against the live quote snapshot.
//!
//! Both operations are pure: they check their preconditions in a fixed order
//! and return the holdings the account should end up with. Persisting and
//! mirroring the result is left to the caller, so a rejected trade can never
//! leave a half-applied account behind.

use crate::account::{Account, Holdings};
use crate::api::models::{Quote, QuoteSet};
use crate::catalog::Catalog;
use thiserror::Error;

pub const MAX_BUY_AMOUNT: u64 = 1024;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum TradeError {
    #[error("`{0}` has no catalog entry with a quote key")]
    UnknownItem(String),
    #[error("no live quote for `{0}`")]
    NoQuote(String),
    #[error("buy amount {0} is outside 1..={max}", max = MAX_BUY_AMOUNT)]
    InvalidAmount(u64),
    #[error("sell amount must be at least 1")]
    EmptySell,
    #[error("no standing sell offers for `{0}`")]
    NoSellOffers(String),
    #[error("no standing buy orders for `{0}`")]
    NoBuyOrders(String),
    #[error("needs {needed} coins, purse holds {available}")]
    InsufficientCoins { needed: f64, available: f64 },
    #[error("wants to sell {wanted}, holds {held}")]
    InsufficientQuantity { wanted: u64, held: u64 },
}

impl TradeError {
    /// The catalog or quote data is missing, as opposed to the user asking
    /// for something the market or purse cannot satisfy.
    pub fn is_missing_mapping(&self) -> bool {
        matches!(self, TradeError::UnknownItem(_) | TradeError::NoQuote(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Buy,
    Sell,
}

impl Side {
    pub fn verb(self) -> &'static str {
        match self {
            Side::Buy => "Bought",
            Side::Sell => "Sold",
        }
    }
}

/// An executed trade and the resulting holdings.
#[derive(Debug, Clone, PartialEq)]
pub struct Fill {
    pub side: Side,
    pub item_id: String,
    pub amount: u64,
    pub unit_price: f64,
    pub total: f64,
    pub holdings: Holdings,
}

/// Catalog plus live quotes: everything needed to price an item.
#[derive(Debug, Clone, Copy)]
pub struct Market<'a> {
    pub catalog: &'a Catalog,
    pub quotes: &'a QuoteSet,
}

impl<'a> Market<'a> {
    pub fn new(catalog: &'a Catalog, quotes: &'a QuoteSet) -> Self {
        Self { catalog, quotes }
    }

    pub fn quote_for(&self, item_id: &str) -> Result<&'a Quote, TradeError> {
        let key = self
            .catalog
            .find(item_id)
            .and_then(|p| p.bazaar_id.as_deref())
            .ok_or_else(|| TradeError::UnknownItem(item_id.to_string()))?;
        self.quotes
            .get(key)
            .ok_or_else(|| TradeError::NoQuote(key.to_string()))
    }
}

pub fn instant_buy(
    market: Market<'_>,
    account: &Account,
    item_id: &str,
    amount: u64,
) -> Result<Fill, TradeError> {
    let quote = market.quote_for(item_id)?;
    if !(1..=MAX_BUY_AMOUNT).contains(&amount) {
        return Err(TradeError::InvalidAmount(amount));
    }
    if !quote.has_sell_offers() {
        return Err(TradeError::NoSellOffers(quote.product_id.clone()));
    }

    let unit_price = quote.unit_buy_price();
    let total = unit_price * amount as f64;
    if account.coins < total {
        return Err(TradeError::InsufficientCoins {
            needed: total,
            available: account.coins,
        });
    }

    let mut holdings = account.holdings();
    holdings.coins -= total;
    holdings.stats.coins_spent += total;
    holdings.add_item(item_id, amount);

    Ok(Fill {
        side: Side::Buy,
        item_id: item_id.to_string(),
        amount,
        unit_price,
        total,
        holdings,
    })
}

pub fn instant_sell(
    market: Market<'_>,
    account: &Account,
    item_id: &str,
    amount: u64,
) -> Result<Fill, TradeError> {
    let quote = market.quote_for(item_id)?;
    if !quote.has_buy_orders() {
        return Err(TradeError::NoBuyOrders(quote.product_id.clone()));
    }
    if amount == 0 {
        return Err(TradeError::EmptySell);
    }

    let mut holdings = account.holdings();
    if !holdings.remove_item(item_id, amount) {
        return Err(TradeError::InsufficientQuantity {
            wanted: amount,
            held: account.held(item_id),
        });
    }

    let unit_price = quote.unit_sell_price();
    let total = unit_price * amount as f64;
    holdings.coins += total;
    holdings.stats.coins_earned += total;

    Ok(Fill {
        side: Side::Sell,
        item_id: item_id.to_string(),
        amount,
        unit_price,
        total,
        holdings,
    })
}
