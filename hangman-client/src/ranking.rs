use std::time::Duration;

use hangman_core::Session;
use hangman_types::{GameResultRequest, LeaderboardEntry, NewPlayerRequest, RankingResponse};
use reqwest::{Client, StatusCode};
use serde::Serialize;
use tracing::{debug, info, warn};

/// Client for the remote leaderboard service.
///
/// Every call is a single attempt. Failures are returned to the caller,
/// which decides whether to log, show or ignore them.
#[derive(Debug, Clone)]
pub struct RankingClient {
    client: Client,
    base_url: String,
    session: Session,
}

impl RankingClient {
    pub fn new(base_url: impl Into<String>, session: Session) -> Self {
        Self::with_client(Client::new(), base_url, session)
    }

    pub fn with_timeout(
        base_url: impl Into<String>,
        session: Session,
        timeout: Duration,
    ) -> Result<Self, RankingError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(client, base_url, session))
    }

    fn with_client(client: Client, base_url: impl Into<String>, session: Session) -> Self {
        let base_url: String = base_url.into();
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            session,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Announce a newly created nickname.
    pub async fn register_player(&self, nick: &str) -> Result<(), RankingError> {
        info!("Registering player {}", nick);
        self.post_new(&NewPlayerRequest {
            nick: nick.to_string(),
        })
        .await
    }

    /// Record the points of one finished round.
    pub async fn submit_result(&self, nick: &str, points: u32) -> Result<(), RankingError> {
        info!("Submitting {} points for {}", points, nick);
        self.post_new(&GameResultRequest {
            nick: nick.to_string(),
            game_points: points,
        })
        .await
    }

    /// Fetch the leaderboard and cache the current player's points as the
    /// best score (0 when the player has no entry).
    pub async fn fetch_leaderboard(&self) -> Result<Vec<LeaderboardEntry>, RankingError> {
        let url = format!("{}/ranking", self.base_url);
        debug!("Fetching leaderboard from {}", url);

        let response = self.client.get(&url).send().await.map_err(|e| {
            warn!("Failed to fetch leaderboard: {:?}", e);
            RankingError::Network(e)
        })?;

        if !response.status().is_success() {
            warn!("Leaderboard fetch returned status: {}", response.status());
            return Err(RankingError::Status {
                endpoint: "/ranking",
                status: response.status(),
            });
        }

        let body = response.text().await?;
        let ranking: RankingResponse = serde_json::from_str(&body).map_err(|e| {
            warn!("Failed to parse leaderboard JSON: {:?}", e);
            RankingError::Decode(e)
        })?;

        debug!("Fetched leaderboard with {} entries", ranking.rank.len());
        self.cache_best_score(&ranking.rank).await?;

        Ok(ranking.rank)
    }

    async fn cache_best_score(&self, entries: &[LeaderboardEntry]) -> Result<(), RankingError> {
        let nick = self.session.get_nick().await.map_err(RankingError::Storage)?;

        let points = match nick.as_deref() {
            Some(nick) => entries
                .iter()
                .find(|entry| entry.nick == nick)
                .map(|entry| entry.points)
                .unwrap_or_else(|| {
                    debug!("No leaderboard entry for {}, caching 0", nick);
                    0
                }),
            None => 0,
        };

        self.session
            .set_best_score(points)
            .await
            .map_err(RankingError::Storage)
    }

    async fn post_new<T: Serialize>(&self, body: &T) -> Result<(), RankingError> {
        let url = format!("{}/new", self.base_url);

        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| {
                warn!("Failed to reach leaderboard at {}: {:?}", url, e);
                RankingError::Network(e)
            })?;

        if !response.status().is_success() {
            warn!("Leaderboard POST /new returned status: {}", response.status());
            return Err(RankingError::Status {
                endpoint: "/new",
                status: response.status(),
            });
        }

        Ok(())
    }
}

/// 1-based position and entry of `nick` in a leaderboard snapshot.
pub fn player_standing<'a>(
    entries: &'a [LeaderboardEntry],
    nick: &str,
) -> Option<(usize, &'a LeaderboardEntry)> {
    entries
        .iter()
        .enumerate()
        .find(|(_, entry)| entry.nick == nick)
        .map(|(index, entry)| (index + 1, entry))
}

#[derive(Debug, thiserror::Error)]
pub enum RankingError {
    #[error("Leaderboard request failed: {0}")]
    Network(#[from] reqwest::Error),
    #[error("Leaderboard {endpoint} returned {status}")]
    Status {
        endpoint: &'static str,
        status: StatusCode,
    },
    #[error("Leaderboard response was malformed: {0}")]
    Decode(serde_json::Error),
    #[error("Failed to cache best score: {0:#}")]
    Storage(anyhow::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(nick: &str, points: i64) -> LeaderboardEntry {
        LeaderboardEntry {
            nick: nick.to_string(),
            points,
        }
    }

    #[test]
    fn test_base_url_is_normalized() {
        let client = RankingClient::new("http://localhost:3333/", Session::in_memory());
        assert_eq!(client.base_url(), "http://localhost:3333");
    }

    #[test]
    fn test_player_standing() {
        let entries = vec![entry("Faker", 900), entry("Caps", 700), entry("Rekkles", 650)];

        let (position, found) = player_standing(&entries, "Caps").unwrap();
        assert_eq!(position, 2);
        assert_eq!(found.points, 700);
        assert!(player_standing(&entries, "Nobody").is_none());
        assert!(player_standing(&[], "Faker").is_none());
    }

    #[tokio::test]
    async fn test_unreachable_service_is_network_failure() {
        let client = RankingClient::with_timeout(
            "http://127.0.0.1:1",
            Session::in_memory(),
            Duration::from_secs(2),
        )
        .unwrap();

        let result = client.register_player("Faker").await;
        assert!(matches!(result, Err(RankingError::Network(_))));
    }
}
