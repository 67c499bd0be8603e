//! Steam Web API client.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, instrument, warn};
use url::Url;

use affinity_cache::TtlCache;
use affinity_core::{
    AffinityError, CollectionProvider, OwnedCollection, PeerSummary, Result,
};

const DEFAULT_BASE_URL: &str = "http://api.steampowered.com/";
const USER_API: &str = "ISteamUser";
const PLAYER_API: &str = "IPlayerService";

/// Steam client configuration.
#[derive(Clone, Debug)]
pub struct SteamConfig {
    /// Steam Web API key.
    pub api_key: String,
    /// API base URL. Overridable for tests.
    pub base_url: String,
    /// Request timeout in seconds.
    pub timeout_seconds: u64,
    /// Renewal window for the player-summaries cache.
    pub summary_ttl: Duration,
}

impl SteamConfig {
    /// Creates a config with the given API key and default endpoints.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.into(),
            timeout_seconds: 30,
            summary_ttl: Duration::from_secs(24 * 60 * 60),
        }
    }

    /// Overrides the API base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Overrides the summary cache TTL.
    pub fn with_summary_ttl(mut self, ttl: Duration) -> Self {
        self.summary_ttl = ttl;
        self
    }
}

/// Client for the Steam Web API.
///
/// Steam signals a bad steamid by answering with an HTML error page
/// instead of JSON, so a `text/html` content type maps to
/// `InvalidIdentifier`. Network and decode failures are transient.
pub struct SteamClient {
    config: SteamConfig,
    http_client: reqwest::Client,
    summaries: Arc<TtlCache<PeerSummary>>,
}

#[derive(Deserialize)]
struct FriendsListResponse {
    #[serde(default)]
    friendslist: FriendsList,
}

#[derive(Default, Deserialize)]
struct FriendsList {
    #[serde(default)]
    friends: Vec<Friend>,
}

#[derive(Deserialize)]
struct Friend {
    steamid: String,
}

#[derive(Deserialize)]
struct OwnedGamesResponse {
    #[serde(default)]
    response: OwnedCollection,
}

#[derive(Deserialize)]
struct SummariesResponse {
    #[serde(default)]
    response: Summaries,
}

#[derive(Default, Deserialize)]
struct Summaries {
    #[serde(default)]
    players: Vec<PeerSummary>,
}

impl SteamClient {
    /// Creates a client with the given configuration.
    pub fn new(config: SteamConfig) -> Self {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .expect("Failed to create HTTP client");

        let summaries = Arc::new(TtlCache::new(config.summary_ttl));

        Self {
            config,
            http_client,
            summaries,
        }
    }

    /// The player-summaries cache, for sweeper wiring.
    pub fn summaries_cache(&self) -> Arc<TtlCache<PeerSummary>> {
        Arc::clone(&self.summaries)
    }

    fn endpoint(&self, interface: &str, method: &str, version: &str) -> Result<Url> {
        let base = Url::parse(&self.config.base_url)
            .map_err(|err| AffinityError::Internal(format!("invalid base URL: {err}")))?;
        base.join(&format!("{interface}/{method}/{version}/"))
            .map_err(|err| AffinityError::Internal(format!("invalid endpoint: {err}")))
    }

    async fn get_json<T>(&self, url: Url, params: &[(&str, &str)], id: &str) -> Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        let response = self
            .http_client
            .get(url)
            .query(&[("key", self.config.api_key.as_str())])
            .query(params)
            .send()
            .await
            .map_err(|err| AffinityError::transient(err.to_string()))?;

        // Steam answers bad ids with an HTML error page, not a status code
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default();
        if content_type.contains("text/html") {
            warn!(id, "Steam rejected identifier");
            return Err(AffinityError::invalid_identifier(id));
        }

        response
            .json::<T>()
            .await
            .map_err(|err| AffinityError::transient(format!("decode failed: {err}")))
    }

    /// Fetches the friend list for a steamid, returning friend ids.
    #[instrument(skip(self))]
    pub async fn get_friend_list(&self, steamid: &str) -> Result<Vec<String>> {
        let url = self.endpoint(USER_API, "GetFriendList", "v0001")?;
        let body: FriendsListResponse = self
            .get_json(url, &[("steamid", steamid), ("relationship", "friend")], steamid)
            .await?;

        let ids: Vec<String> = body
            .friendslist
            .friends
            .into_iter()
            .map(|friend| friend.steamid)
            .collect();
        debug!(steamid, friends = ids.len(), "Fetched friend list");
        Ok(ids)
    }

    /// Fetches the game library for a steamid.
    #[instrument(skip(self))]
    pub async fn get_owned_games(&self, steamid: &str) -> Result<OwnedCollection> {
        let url = self.endpoint(PLAYER_API, "GetOwnedGames", "v0001")?;
        let body: OwnedGamesResponse = self
            .get_json(url, &[("steamid", steamid), ("include_appinfo", "true")], steamid)
            .await?;

        let mut collection = body.response;
        // Steam omits the owner id in the response body
        collection.owner_id = steamid.to_string();
        debug!(steamid, games = collection.count, "Fetched owned games");
        Ok(collection)
    }

    /// Fetches player summaries, serving cached players without a fetch.
    ///
    /// Only uncached ids go upstream (one batched call); everything
    /// returned is written back to the summaries cache. The merged result
    /// is sorted by id for a stable response.
    #[instrument(skip(self, steamids))]
    pub async fn get_player_summaries(&self, steamids: &[String]) -> Result<Vec<PeerSummary>> {
        let mut players = Vec::with_capacity(steamids.len());
        let mut uncached = Vec::new();

        for id in steamids {
            if self.summaries.is_hit(id) {
                debug!(id, "Summary cache hit");
                players.push(self.summaries.read(id));
            } else {
                uncached.push(id.as_str());
            }
        }

        if !uncached.is_empty() {
            let url = self.endpoint(USER_API, "GetPlayerSummaries", "v0002")?;
            let joined = uncached.join(",");
            let body: SummariesResponse =
                self.get_json(url, &[("steamids", joined.as_str())], &joined).await?;

            for player in body.response.players {
                self.summaries.write(&player.id, player.clone());
                players.push(player);
            }
        }

        players.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(players)
    }
}

#[async_trait]
impl CollectionProvider for SteamClient {
    async fn fetch_peer_list(&self, subject_id: &str) -> Result<Vec<String>> {
        self.get_friend_list(subject_id).await
    }

    async fn fetch_owned_collection(&self, id: &str) -> Result<OwnedCollection> {
        self.get_owned_games(id).await
    }
}
