//! Query parameter and response DTOs.
//!
//! Parameter names match the original public API (`steamid`, `listGames`).

use affinity_core::PeerSummary;
use serde::{Deserialize, Serialize};

/// Parameters for endpoints keyed by a single subject.
#[derive(Debug, Deserialize)]
pub struct SubjectParams {
    /// The subject's steamid.
    pub steamid: Option<String>,
}

/// Parameters for the summaries endpoint.
#[derive(Debug, Deserialize)]
pub struct SummariesParams {
    /// Comma-separated steamids.
    pub steamids: Option<String>,
}

/// Parameters for the pairwise comparison endpoint.
#[derive(Debug, Deserialize)]
pub struct CompareParams {
    /// First player's steamid.
    pub player1: Option<String>,
    /// Second player's steamid.
    pub player2: Option<String>,
    /// Whether to include the matching games in the response.
    #[serde(rename = "listGames", default)]
    pub list_games: bool,
}

/// Parameters for the ranking endpoint.
#[derive(Debug, Deserialize)]
pub struct RankingParams {
    /// The subject's steamid.
    pub steamid: Option<String>,
    /// Whether to include the matching games per peer.
    #[serde(rename = "listGames", default)]
    pub list_games: bool,
}

/// Player summaries response.
#[derive(Debug, Serialize)]
pub struct SummariesResponse {
    /// The resolved players, sorted by id.
    pub players: Vec<PeerSummary>,
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Always "ok".
    pub status: &'static str,
}
