//! Per-user account document: purse, inventory, orders and trading stats.

pub mod store;

pub use store::{AccountStore, JsonFileStore, StoreError};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const STARTING_COINS: f64 = 1_000_000.0;
pub const ORDER_CAPACITY: usize = 14;
pub const DEFAULT_USERNAME: &str = "New User";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryEntry {
    pub id: String,
    pub quantity: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderKind {
    Buy,
    Sell,
}

/// A standing order placed by the user. Nothing fills these yet; the list is
/// only shown and capped at [`ORDER_CAPACITY`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub item_id: String,
    pub kind: OrderKind,
    pub amount: u64,
    pub price_per_unit: f64,
    pub created: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Stats {
    pub coins_spent: f64,
    pub coins_earned: f64,
}

/// The part of an account that a trade rewrites.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Holdings {
    pub coins: f64,
    pub inventory: Vec<InventoryEntry>,
    pub stats: Stats,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub username: String,
    pub coins: f64,
    #[serde(default)]
    pub inventory: Vec<InventoryEntry>,
    #[serde(default)]
    pub orders: Vec<Order>,
    #[serde(default)]
    pub stats: Stats,
    pub created: DateTime<Utc>,
    #[serde(default)]
    pub updated: Option<DateTime<Utc>>,
}

impl Account {
    pub fn new(username: impl Into<String>, coins: f64, created: DateTime<Utc>) -> Self {
        Self {
            username: username.into(),
            coins,
            inventory: Vec::new(),
            orders: Vec::new(),
            stats: Stats::default(),
            created,
            updated: None,
        }
    }

    /// Quantity of `id` held, 0 when absent.
    pub fn held(&self, id: &str) -> u64 {
        self.inventory
            .iter()
            .find(|e| e.id == id)
            .map_or(0, |e| e.quantity)
    }

    pub fn holdings(&self) -> Holdings {
        Holdings {
            coins: self.coins,
            inventory: self.inventory.clone(),
            stats: self.stats,
        }
    }

    /// Merges repeated item entries and drops empty ones, so every held
    /// item has exactly one entry with quantity of at least 1.
    pub fn normalize_inventory(&mut self) {
        let mut merged: Vec<InventoryEntry> = Vec::with_capacity(self.inventory.len());
        for entry in self.inventory.drain(..) {
            match merged.iter_mut().find(|e| e.id == entry.id) {
                Some(e) => e.quantity += entry.quantity,
                None => merged.push(entry),
            }
        }
        merged.retain(|e| e.quantity > 0);
        self.inventory = merged;
    }

    pub fn apply(&mut self, holdings: Holdings, updated: DateTime<Utc>) {
        self.coins = holdings.coins;
        self.inventory = holdings.inventory;
        self.stats = holdings.stats;
        self.updated = Some(updated);
    }
}

impl Holdings {
    pub fn add_item(&mut self, id: &str, quantity: u64) {
        if quantity == 0 {
            return;
        }
        match self.inventory.iter_mut().find(|e| e.id == id) {
            Some(entry) => entry.quantity += quantity,
            None => self.inventory.push(InventoryEntry {
                id: id.to_string(),
                quantity,
            }),
        }
    }

    /// Takes `quantity` of `id` out of the inventory, dropping the entry when
    /// it reaches zero. Returns `false` and changes nothing if not enough is held.
    pub fn remove_item(&mut self, id: &str, quantity: u64) -> bool {
        let Some(pos) = self.inventory.iter().position(|e| e.id == id) else {
            return quantity == 0;
        };
        let entry = &mut self.inventory[pos];
        if entry.quantity < quantity {
            return false;
        }
        entry.quantity -= quantity;
        if entry.quantity == 0 {
            self.inventory.remove(pos);
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn holdings() -> Holdings {
        Holdings {
            coins: 100.0,
            inventory: vec![InventoryEntry {
                id: "wheat".into(),
                quantity: 10,
            }],
            stats: Stats::default(),
        }
    }

    #[test]
    fn new_account_is_empty() {
        let a = Account::new("steve", STARTING_COINS, Utc::now());
        assert_eq!(a.coins, 1_000_000.0);
        assert!(a.inventory.is_empty());
        assert!(a.orders.is_empty());
        assert_eq!(a.stats, Stats::default());
        assert!(a.updated.is_none());
    }

    #[test]
    fn add_merges_existing_entry() {
        let mut h = holdings();
        h.add_item("wheat", 5);
        h.add_item("carrot", 2);
        assert_eq!(h.inventory.len(), 2);
        assert_eq!(h.inventory[0].quantity, 15);
        assert_eq!(h.inventory[1].quantity, 2);
    }

    #[test]
    fn adding_zero_creates_nothing() {
        let mut h = holdings();
        h.add_item("carrot", 0);
        assert_eq!(h.inventory.len(), 1);
    }

    #[test]
    fn remove_to_zero_drops_entry() {
        let mut h = holdings();
        assert!(h.remove_item("wheat", 10));
        assert!(h.inventory.is_empty());
    }

    #[test]
    fn partial_remove_keeps_remainder() {
        let mut h = holdings();
        assert!(h.remove_item("wheat", 4));
        assert_eq!(h.inventory[0].quantity, 6);
    }

    #[test]
    fn over_remove_is_rejected() {
        let mut h = holdings();
        assert!(!h.remove_item("wheat", 11));
        assert!(!h.remove_item("carrot", 1));
        assert_eq!(h, holdings());
    }

    #[test]
    fn apply_mirrors_holdings() {
        let mut a = Account::new("alex", 100.0, Utc::now());
        let mut h = a.holdings();
        h.coins = 40.0;
        h.add_item("bone", 3);
        let ts = Utc::now();
        a.apply(h, ts);
        assert_eq!(a.coins, 40.0);
        assert_eq!(a.held("bone"), 3);
        assert_eq!(a.updated, Some(ts));
    }

    #[test]
    fn normalize_merges_and_drops_empty() {
        let mut a = Account::new("alex", 0.0, Utc::now());
        a.inventory = vec![
            InventoryEntry { id: "bone".into(), quantity: 1 },
            InventoryEntry { id: "wheat".into(), quantity: 0 },
            InventoryEntry { id: "bone".into(), quantity: 4 },
        ];
        a.normalize_inventory();
        assert_eq!(a.inventory, vec![InventoryEntry { id: "bone".into(), quantity: 5 }]);
        assert_eq!(a.held("wheat"), 0);
    }

    #[test]
    fn document_shape() {
        let a = Account::new("alex", 5.0, Utc::now());
        let v = serde_json::to_value(&a).unwrap();
        assert_eq!(v["username"], "alex");
        assert_eq!(v["stats"]["coins_spent"], 0.0);
        assert!(v["inventory"].as_array().unwrap().is_empty());
    }
}
