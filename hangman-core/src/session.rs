//! Player session: the persisted nickname and the cached best score.
//!
//! Storage is injected through [`SessionStore`] so the same identity logic
//! runs against memory in tests and against a database in the binary.
//! The identity lives from the first `set_nick` until `clear_nick`.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use hangman_types::PlayerIdentity;
use tracing::{debug, info, warn};

pub const NICK_KEY: &str = "nick";
pub const POINTS_KEY: &str = "points";

/// Key-value storage for session state.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>>;
    async fn set(&self, key: &str, value: &str) -> Result<()>;
    async fn remove(&self, key: &str) -> Result<()>;
}

/// Store that lives as long as the process.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let entries = self
            .entries
            .lock()
            .map_err(|_| anyhow!("session store lock poisoned"))?;
        Ok(entries.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| anyhow!("session store lock poisoned"))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| anyhow!("session store lock poisoned"))?;
        entries.remove(key);
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NickChange {
    /// No identity existed before.
    Created,
    /// The stored nickname was already this one.
    Unchanged,
    /// A different nickname was stored before.
    Replaced,
}

impl NickChange {
    /// A nickname the leaderboard has not been told about yet.
    pub fn needs_registration(&self) -> bool {
        matches!(self, NickChange::Created | NickChange::Replaced)
    }
}

#[derive(Clone)]
pub struct Session {
    store: Arc<dyn SessionStore>,
}

impl Session {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemorySessionStore::new()))
    }

    pub async fn get_nick(&self) -> Result<Option<String>> {
        let nick = self.store.get(NICK_KEY).await?;
        Ok(nick.filter(|nick| !nick.trim().is_empty()))
    }

    pub async fn identity(&self) -> Result<Option<PlayerIdentity>> {
        Ok(self
            .get_nick()
            .await?
            .and_then(|nick| PlayerIdentity::new(&nick).ok()))
    }

    pub async fn set_nick(&self, nick: &str) -> Result<NickChange> {
        let identity = PlayerIdentity::new(nick)?;
        let previous = self.get_nick().await?;

        let change = match previous {
            None => NickChange::Created,
            Some(previous) if previous == identity.nick => NickChange::Unchanged,
            Some(_) => NickChange::Replaced,
        };

        if change != NickChange::Unchanged {
            self.store.set(NICK_KEY, &identity.nick).await?;
            info!("Stored nickname {} ({:?})", identity.nick, change);
        }
        if change == NickChange::Replaced {
            // The cached score belonged to the previous nickname.
            self.store.remove(POINTS_KEY).await?;
        }

        Ok(change)
    }

    pub async fn clear_nick(&self) -> Result<()> {
        self.store.remove(NICK_KEY).await?;
        self.store.remove(POINTS_KEY).await?;
        info!("Cleared player identity");
        Ok(())
    }

    /// Last observed best score; 0 when nothing usable is cached.
    pub async fn best_score(&self) -> Result<i64> {
        let Some(raw) = self.store.get(POINTS_KEY).await? else {
            return Ok(0);
        };
        match raw.trim().parse() {
            Ok(points) => Ok(points),
            Err(_) => {
                warn!("Ignoring unreadable cached score {:?}", raw);
                Ok(0)
            }
        }
    }

    pub async fn set_best_score(&self, points: i64) -> Result<()> {
        debug!("Caching best score {}", points);
        self.store.set(POINTS_KEY, &points.to_string()).await
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session").finish_non_exhaustive()
    }
}
