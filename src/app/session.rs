//! Signed-in user session: the account mirror plus the store it came from.
//!
//! Trades go through [`Session::commit`]. A rejected trade and a failed
//! store write are both logged and otherwise ignored; the local account is
//! only touched after the store accepts the write.

use crate::account::{Account, AccountStore, DEFAULT_USERNAME, StoreError};
use crate::trade::{self, Fill, Market, TradeError};
use chrono::Utc;
use tracing::{debug, info, warn};

/// Who is signed in, as reported by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub user_id: String,
    pub display_name: Option<String>,
}

pub struct Session {
    pub uid: String,
    pub account: Account,
    store: Box<dyn AccountStore>,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("uid", &self.uid)
            .field("account", &self.account)
            .finish_non_exhaustive()
    }
}

impl Session {
    /// Loads the user's account, creating it on first sign-in.
    ///
    /// Unlike trade writes, a failure to create the account is returned to
    /// the caller.
    pub fn sign_in(
        store: Box<dyn AccountStore>,
        identity: &Identity,
        starting_coins: f64,
    ) -> Result<Self, StoreError> {
        let account = match store.load(&identity.user_id)? {
            Some(mut account) => {
                account.normalize_inventory();
                info!(uid = %identity.user_id, username = %account.username, "signed in");
                account
            }
            None => {
                let username = identity
                    .display_name
                    .as_deref()
                    .map(str::trim)
                    .filter(|n| !n.is_empty())
                    .unwrap_or(DEFAULT_USERNAME);
                let account = Account::new(username, starting_coins, Utc::now());
                store.create(&identity.user_id, &account)?;
                account
            }
        };
        Ok(Self {
            uid: identity.user_id.clone(),
            account,
            store,
        })
    }

    pub fn buy(&mut self, market: Market<'_>, item_id: &str, amount: u64) -> Option<Fill> {
        let result = trade::instant_buy(market, &self.account, item_id, amount);
        self.commit(result)
    }

    pub fn sell(&mut self, market: Market<'_>, item_id: &str, amount: u64) -> Option<Fill> {
        let result = trade::instant_sell(market, &self.account, item_id, amount);
        self.commit(result)
    }

    /// Sells the whole held stack of `item_id`.
    pub fn sell_held(&mut self, market: Market<'_>, item_id: &str) -> Option<Fill> {
        let held = self.account.held(item_id);
        self.sell(market, item_id, held)
    }

    /// Instantly sells every held item that currently has buyers.
    pub fn sell_inventory(&mut self, market: Market<'_>) -> Vec<Fill> {
        let ids: Vec<String> = self.account.inventory.iter().map(|e| e.id.clone()).collect();
        ids.iter()
            .filter_map(|id| self.sell_held(market, id))
            .collect()
    }

    fn commit(&mut self, result: Result<Fill, TradeError>) -> Option<Fill> {
        let fill = match result {
            Ok(fill) => fill,
            Err(e) if e.is_missing_mapping() => {
                warn!(error = %e, "trade skipped");
                return None;
            }
            Err(e) => {
                debug!(error = %e, "trade rejected");
                return None;
            }
        };

        match self.store.save_holdings(&self.uid, &fill.holdings) {
            Ok(updated) => {
                self.account.apply(fill.holdings.clone(), updated);
                info!(
                    side = ?fill.side,
                    item = %fill.item_id,
                    amount = fill.amount,
                    total = fill.total,
                    coins = self.account.coins,
                    "trade executed"
                );
                Some(fill)
            }
            Err(e) => {
                warn!(error = %e, item = %fill.item_id, "trade write failed");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::account::InventoryEntry;
    use crate::account::store::memory::MemoryStore;
    use crate::api::models::QuoteSet;
    use crate::api::models::tests::quote;
    use crate::catalog::Catalog;
    use crate::catalog::tests::SMALL;
    use crate::trade::Side;
    use std::sync::Arc;

    fn identity(name: Option<&str>) -> Identity {
        Identity {
            user_id: "uid1".into(),
            display_name: name.map(str::to_string),
        }
    }

    fn fixtures() -> (Catalog, QuoteSet) {
        let catalog = Catalog::from_json(SMALL).unwrap();
        let mut quotes = QuoteSet::new();
        quotes.insert("WHEAT".into(), quote("WHEAT", 100.0, 80.0));
        quotes.insert("DIAMOND".into(), quote("DIAMOND", 10.0, 9.0));
        (catalog, quotes)
    }

    fn session(coins: f64) -> (Arc<MemoryStore>, Session) {
        let store = Arc::new(MemoryStore::default());
        let s = Session::sign_in(Box::new(store.clone()), &identity(Some("steve")), coins).unwrap();
        (store, s)
    }

    #[test]
    fn first_sign_in_creates_account() {
        let (store, s) = session(1_000_000.0);
        assert_eq!(s.account.username, "steve");
        assert_eq!(s.account.coins, 1_000_000.0);
        let stored = store.docs.lock().unwrap().get("uid1").cloned().unwrap();
        assert_eq!(stored, s.account);
    }

    #[test]
    fn blank_display_name_falls_back() {
        let store = Arc::new(MemoryStore::default());
        let s = Session::sign_in(Box::new(store), &identity(Some("  ")), 10.0).unwrap();
        assert_eq!(s.account.username, "New User");
    }

    #[test]
    fn returning_user_keeps_document() {
        let store = Arc::new(MemoryStore::default());
        let mut existing = Account::new("alex", 42.0, Utc::now());
        existing.inventory.push(InventoryEntry {
            id: "wheat".into(),
            quantity: 2,
        });
        store.docs.lock().unwrap().insert("uid1".into(), existing.clone());
        let s = Session::sign_in(Box::new(store), &identity(Some("ignored")), 1e6).unwrap();
        assert_eq!(s.account, existing);
    }

    #[test]
    fn loaded_inventory_is_normalized() {
        let store = Arc::new(MemoryStore::default());
        let mut existing = Account::new("alex", 0.0, Utc::now());
        existing.inventory = vec![
            InventoryEntry { id: "wheat".into(), quantity: 0 },
            InventoryEntry { id: "diamond".into(), quantity: 2 },
            InventoryEntry { id: "diamond".into(), quantity: 3 },
        ];
        store.docs.lock().unwrap().insert("uid1".into(), existing);
        let (c, q) = fixtures();
        let mut s = Session::sign_in(Box::new(store), &identity(None), 1e6).unwrap();
        assert_eq!(
            s.account.inventory,
            vec![InventoryEntry { id: "diamond".into(), quantity: 5 }]
        );
        let fill = s.sell_held(Market::new(&c, &q), "diamond").unwrap();
        assert_eq!(fill.amount, 5);
        assert!(s.account.inventory.is_empty());
    }

    #[test]
    fn creation_failure_is_surfaced() {
        let store = Arc::new(MemoryStore::default());
        store.set_offline(true);
        let err = Session::sign_in(Box::new(store), &identity(None), 1e6).unwrap_err();
        assert!(matches!(err, StoreError::Io { .. }));
    }

    #[test]
    fn buy_persists_then_mirrors() {
        let (c, q) = fixtures();
        let (store, mut s) = session(1000.0);
        let fill = s.buy(Market::new(&c, &q), "wheat", 5).unwrap();
        assert_eq!(fill.side, Side::Buy);
        assert_eq!(s.account.coins, 500.0);
        assert_eq!(s.account.held("wheat"), 5);
        assert!(s.account.updated.is_some());
        let stored = store.docs.lock().unwrap().get("uid1").cloned().unwrap();
        assert_eq!(stored.coins, 500.0);
        assert_eq!(stored.held("wheat"), 5);
    }

    #[test]
    fn rejected_buy_is_silent_no_op() {
        let (c, q) = fixtures();
        let (store, mut s) = session(100.0);
        let before = s.account.clone();
        assert!(s.buy(Market::new(&c, &q), "wheat", 5).is_none());
        assert!(s.buy(Market::new(&c, &q), "missing", 1).is_none());
        assert_eq!(s.account, before);
        assert_eq!(store.docs.lock().unwrap().get("uid1").cloned().unwrap(), before);
    }

    #[test]
    fn failed_write_leaves_mirror_untouched() {
        let (c, q) = fixtures();
        let (store, mut s) = session(1000.0);
        store.set_offline(true);
        let before = s.account.clone();
        assert!(s.buy(Market::new(&c, &q), "wheat", 1).is_none());
        assert_eq!(s.account, before);
    }

    #[test]
    fn sell_held_sells_whole_stack() {
        let (c, q) = fixtures();
        let (_store, mut s) = session(1000.0);
        s.buy(Market::new(&c, &q), "wheat", 10).unwrap();
        let fill = s.sell_held(Market::new(&c, &q), "wheat").unwrap();
        assert_eq!(fill.amount, 10);
        assert_eq!(s.account.held("wheat"), 0);
        assert!(s.account.inventory.is_empty());
        assert_eq!(s.account.coins, 800.0);
        assert_eq!(s.account.stats.coins_spent, 1000.0);
        assert_eq!(s.account.stats.coins_earned, 800.0);
    }

    #[test]
    fn sell_held_with_nothing_held_does_nothing() {
        let (c, q) = fixtures();
        let (_store, mut s) = session(1000.0);
        assert!(s.sell_held(Market::new(&c, &q), "wheat").is_none());
    }

    #[test]
    fn sell_inventory_skips_unsellable() {
        let (c, mut q) = fixtures();
        let (_store, mut s) = session(10_000.0);
        s.buy(Market::new(&c, &q), "wheat", 2).unwrap();
        s.buy(Market::new(&c, &q), "diamond", 3).unwrap();
        s.account.inventory.push(InventoryEntry {
            id: "stale_id".into(),
            quantity: 1,
        });
        q.get_mut("DIAMOND").unwrap().sell_summary.clear();

        let fills = s.sell_inventory(Market::new(&c, &q));
        assert_eq!(fills.len(), 1);
        assert_eq!(fills[0].item_id, "wheat");
        assert_eq!(s.account.held("wheat"), 0);
        assert_eq!(s.account.held("diamond"), 3);
    }
}
