//! Account document storage.
//!
//! Writes are last-writer-wins: a trade rewrites the whole holdings of the
//! document with no version check, which is fine for single-user accounts.

use super::{Account, Holdings};
use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage I/O at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("corrupt account document: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("no account for user `{0}`")]
    NotFound(String),
    #[error("account for user `{0}` already exists")]
    AlreadyExists(String),
    #[error("invalid user id `{0}`")]
    InvalidUser(String),
}

pub trait AccountStore {
    fn load(&self, uid: &str) -> Result<Option<Account>, StoreError>;

    /// Writes a new document. Fails if one already exists for `uid`.
    fn create(&self, uid: &str, account: &Account) -> Result<(), StoreError>;

    /// Replaces coins, inventory and stats of an existing document and
    /// returns the update timestamp assigned by the store.
    fn save_holdings(&self, uid: &str, holdings: &Holdings) -> Result<DateTime<Utc>, StoreError>;
}

/// One pretty-printed JSON document per user under `<root>/users/`.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    root: PathBuf,
}

impl JsonFileStore {
    pub fn open(root: &Path) -> Result<Self, StoreError> {
        let users = root.join("users");
        std::fs::create_dir_all(&users).map_err(|source| StoreError::Io {
            path: users.clone(),
            source,
        })?;
        info!("account store at {}", users.display());
        Ok(Self {
            root: root.to_path_buf(),
        })
    }

    fn path_for(&self, uid: &str) -> Result<PathBuf, StoreError> {
        let valid = !uid.is_empty()
            && uid
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(StoreError::InvalidUser(uid.to_string()));
        }
        Ok(self.root.join("users").join(format!("{uid}.json")))
    }

    fn write(&self, path: &Path, account: &Account) -> Result<(), StoreError> {
        let body = serde_json::to_string_pretty(account)?;
        let tmp = path.with_extension("json.tmp");
        let io = |source: std::io::Error| StoreError::Io {
            path: path.to_path_buf(),
            source,
        };
        std::fs::write(&tmp, body).map_err(io)?;
        std::fs::rename(&tmp, path).map_err(io)?;
        Ok(())
    }
}

impl AccountStore for JsonFileStore {
    fn load(&self, uid: &str) -> Result<Option<Account>, StoreError> {
        let path = self.path_for(uid)?;
        let body = match std::fs::read_to_string(&path) {
            Ok(b) => b,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(source) => return Err(StoreError::Io { path, source }),
        };
        Ok(Some(serde_json::from_str(&body)?))
    }

    fn create(&self, uid: &str, account: &Account) -> Result<(), StoreError> {
        let path = self.path_for(uid)?;
        if path.exists() {
            return Err(StoreError::AlreadyExists(uid.to_string()));
        }
        self.write(&path, account)?;
        info!(uid, username = %account.username, "account created");
        Ok(())
    }

    fn save_holdings(&self, uid: &str, holdings: &Holdings) -> Result<DateTime<Utc>, StoreError> {
        let path = self.path_for(uid)?;
        let mut account = self
            .load(uid)?
            .ok_or_else(|| StoreError::NotFound(uid.to_string()))?;
        let now = Utc::now();
        account.apply(holdings.clone(), now);
        self.write(&path, &account)?;
        debug!(uid, coins = holdings.coins, "holdings saved");
        Ok(now)
    }
}
