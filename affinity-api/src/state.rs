//! App state: Steam client, ranker, caches, config.

use std::sync::Arc;
use std::time::Duration;

use affinity_cache::{Sweeper, SweeperHandle};
use affinity_rank::{Ranker, RankerConfig};
use affinity_steam::{SteamClient, SteamConfig};

const DEFAULT_STEAM_BASE_URL: &str = "http://api.steampowered.com/";

/// Server configuration, read from the environment.
///
/// Cache renewal windows keep the original's env variable names and
/// minute-based units.
#[derive(Clone, Debug)]
pub struct ApiConfig {
    /// Steam Web API key.
    pub steam_api_key: String,
    /// Steam API base URL. Overridable for tests.
    pub steam_base_url: String,
    /// Renewal window for cached friend lists.
    pub friends_ttl: Duration,
    /// Renewal window for cached player summaries.
    pub summaries_ttl: Duration,
    /// Renewal window for cached game libraries.
    pub games_ttl: Duration,
    /// Interval between sweeps of each cache.
    pub sweep_interval: Duration,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            steam_api_key: String::new(),
            steam_base_url: DEFAULT_STEAM_BASE_URL.into(),
            friends_ttl: Duration::from_secs(5 * 60),
            summaries_ttl: Duration::from_secs(1440 * 60),
            games_ttl: Duration::from_secs(30 * 60),
            sweep_interval: Duration::from_secs(60 * 60),
        }
    }
}

fn env_minutes(var: &str, default_minutes: u64) -> Duration {
    let minutes = std::env::var(var)
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(default_minutes);
    Duration::from_secs(minutes * 60)
}

impl ApiConfig {
    /// Builds a configuration from environment variables (and `.env`).
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();

        Self {
            steam_api_key: std::env::var("STEAM_APIKEY").unwrap_or_default(),
            steam_base_url: std::env::var("STEAM_API_BASEURL")
                .unwrap_or_else(|_| DEFAULT_STEAM_BASE_URL.into()),
            friends_ttl: env_minutes("FRIENDS_CACHE_RENEW", 5),
            summaries_ttl: env_minutes("SUMMARIES_CACHE_RENEW", 1440),
            games_ttl: env_minutes("GAMES_CACHE_RENEW", 30),
            sweep_interval: env_minutes("SWEEP_INTERVAL", 60),
        }
    }
}

/// Long-lived state shared by every request handler.
pub struct AppState {
    /// Server configuration.
    pub config: ApiConfig,
    /// Steam Web API client (owns the summaries cache).
    pub steam: Arc<SteamClient>,
    /// Fan-out ranker (owns the collection and friend-list caches).
    pub ranker: Ranker<SteamClient>,
}

impl AppState {
    /// Builds the state: one Steam client and one ranker over it.
    pub fn new(config: ApiConfig) -> Self {
        let steam_config = SteamConfig::new(&config.steam_api_key)
            .with_base_url(&config.steam_base_url)
            .with_summary_ttl(config.summaries_ttl);
        let steam = Arc::new(SteamClient::new(steam_config));

        let ranker = Ranker::new(
            Arc::clone(&steam),
            RankerConfig {
                collection_ttl: config.games_ttl,
                peer_list_ttl: config.friends_ttl,
            },
        );

        Self {
            config,
            steam,
            ranker,
        }
    }

    /// Starts one sweeper per cache; the handles keep them alive.
    pub fn start_sweepers(&self) -> Vec<SweeperHandle> {
        vec![
            Sweeper::new(
                "owned-games",
                self.ranker.collections(),
                self.config.sweep_interval,
            )
            .start(),
            Sweeper::new(
                "friend-lists",
                self.ranker.peer_lists(),
                self.config.sweep_interval,
            )
            .start(),
            Sweeper::new(
                "summaries",
                self.steam.summaries_cache(),
                self.config.sweep_interval,
            )
            .start(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_windows() {
        let config = ApiConfig::default();
        assert_eq!(config.friends_ttl, Duration::from_secs(300));
        assert_eq!(config.games_ttl, Duration::from_secs(1800));
        assert_eq!(config.summaries_ttl, Duration::from_secs(86400));
    }

    #[tokio::test]
    async fn test_sweepers_start_and_stop() {
        let state = AppState::new(ApiConfig::default());
        let handles = state.start_sweepers();
        assert_eq!(handles.len(), 3);
        for handle in handles {
            handle.stop().await;
        }
    }
}
