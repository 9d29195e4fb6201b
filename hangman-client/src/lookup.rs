//! Champion title and splash art shown after a round ends.
//!
//! Lookups are cosmetic. Callers go through [`lookup_title_or_default`] and
//! [`lookup_splash_or_default`], which turn any failure into an empty string.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use tracing::{debug, warn};

#[async_trait]
pub trait ChampionLookup: Send + Sync {
    async fn title(&self, word: &str) -> Result<String, LookupError>;
    async fn splash(&self, word: &str) -> Result<String, LookupError>;
}

#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    #[error("Lookup request failed: {0}")]
    Network(#[from] reqwest::Error),
    #[error("Lookup for {word} returned {status}")]
    Status { word: String, status: StatusCode },
    #[error("No title found for {0}")]
    Missing(String),
}

/// Champion ids whose casing cannot be derived from the lowercase word.
const ID_OVERRIDES: &[(&str, &str)] = &[
    ("aurelionsol", "AurelionSol"),
    ("belveth", "Belveth"),
    ("chogath", "Chogath"),
    ("drmundo", "DrMundo"),
    ("jarvaniv", "JarvanIV"),
    ("khazix", "Khazix"),
    ("kogmaw", "KogMaw"),
    ("leblanc", "Leblanc"),
    ("leesin", "LeeSin"),
    ("masteryi", "MasterYi"),
    ("missfortune", "MissFortune"),
    ("reksai", "RekSai"),
    ("tahmkench", "TahmKench"),
    ("twistedfate", "TwistedFate"),
    ("velkoz", "Velkoz"),
    ("wukong", "MonkeyKing"),
    ("xinzhao", "XinZhao"),
];

/// Capitalize the first letter of a catalog word: `"ashe"` -> `"Ashe"`.
pub fn display_name(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Identifier the asset service uses for a catalog word.
pub fn champion_id(word: &str) -> String {
    let word = word.trim().to_ascii_lowercase();
    ID_OVERRIDES
        .iter()
        .find(|(key, _)| *key == word)
        .map(|(_, id)| id.to_string())
        .unwrap_or_else(|| display_name(&word))
}

/// Lookup against a Data Dragon style static asset host.
#[derive(Debug, Clone)]
pub struct DataDragonLookup {
    client: Client,
    base_url: String,
    version: String,
    locale: String,
}

impl DataDragonLookup {
    pub fn new(
        client: Client,
        base_url: impl Into<String>,
        version: impl Into<String>,
        locale: impl Into<String>,
    ) -> Self {
        let base_url: String = base_url.into();
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            version: version.into(),
            locale: locale.into(),
        }
    }

    pub fn title_url(&self, word: &str) -> String {
        format!(
            "{}/cdn/{}/data/{}/champion/{}.json",
            self.base_url,
            self.version,
            self.locale,
            champion_id(word)
        )
    }

    pub fn splash_url(&self, word: &str) -> String {
        format!(
            "{}/cdn/img/champion/splash/{}_0.jpg",
            self.base_url,
            champion_id(word)
        )
    }
}

#[async_trait]
impl ChampionLookup for DataDragonLookup {
    async fn title(&self, word: &str) -> Result<String, LookupError> {
        let url = self.title_url(word);
        debug!("Fetching champion data from {}", url);

        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(LookupError::Status {
                word: word.to_string(),
                status: response.status(),
            });
        }

        let body: Value = response.json().await?;
        body.get("data")
            .and_then(|data| data.get(champion_id(word)))
            .and_then(|champion| champion.get("title"))
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| LookupError::Missing(word.to_string()))
    }

    async fn splash(&self, word: &str) -> Result<String, LookupError> {
        Ok(self.splash_url(word))
    }
}

pub async fn lookup_title_or_default(lookup: &dyn ChampionLookup, word: &str) -> String {
    lookup.title(word).await.unwrap_or_else(|e| {
        warn!("Title lookup for {} failed: {}", word, e);
        String::new()
    })
}

pub async fn lookup_splash_or_default(lookup: &dyn ChampionLookup, word: &str) -> String {
    lookup.splash(word).await.unwrap_or_else(|e| {
        warn!("Splash lookup for {} failed: {}", word, e);
        String::new()
    })
}
