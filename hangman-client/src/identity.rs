use anyhow::Result;
use hangman_core::Session;
use tracing::{info, warn};

use crate::ranking::{RankingClient, RankingError};

/// What happened to the leaderboard registration when a nickname was set.
#[derive(Debug)]
pub enum Registration {
    /// The nickname was already stored; nothing was sent.
    AlreadyRegistered,
    Registered,
    /// The nickname is stored locally but the service did not accept it.
    Failed(RankingError),
}

impl Registration {
    pub fn is_failed(&self) -> bool {
        matches!(self, Registration::Failed(_))
    }
}

/// Owns the first-run flow: persist the nickname, then register it once.
#[derive(Debug, Clone)]
pub struct IdentityService {
    ranking: RankingClient,
}

impl IdentityService {
    pub fn new(ranking: RankingClient) -> Self {
        Self { ranking }
    }

    pub fn ranking(&self) -> &RankingClient {
        &self.ranking
    }

    pub fn session(&self) -> &Session {
        self.ranking.session()
    }

    pub async fn current_nick(&self) -> Result<Option<String>> {
        self.session().get_nick().await
    }

    /// Store `nick` and register it with the leaderboard when it is new.
    /// A failed registration is reported, not retried.
    pub async fn choose_nick(&self, nick: &str) -> Result<Registration> {
        let change = self.session().set_nick(nick).await?;
        if !change.needs_registration() {
            return Ok(Registration::AlreadyRegistered);
        }

        let nick = nick.trim();
        match self.ranking.register_player(nick).await {
            Ok(()) => {
                info!("Player {} registered ({:?})", nick, change);
                Ok(Registration::Registered)
            }
            Err(e) => {
                warn!("Registration of {} failed: {}", nick, e);
                Ok(Registration::Failed(e))
            }
        }
    }

    pub async fn forget(&self) -> Result<()> {
        self.session().clear_nick().await
    }

    /// No nickname stored yet.
    pub async fn is_first_run(&self) -> Result<bool> {
        Ok(self.current_nick().await?.is_none())
    }
}
