//! API route handlers.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};
use tracing::debug;

use affinity_core::{OwnedCollection, RankingResponse};
use affinity_rank::compare;

use crate::dto::*;
use crate::error::ApiError;
use crate::state::AppState;

type Result<T> = std::result::Result<T, ApiError>;

fn require(param: Option<String>, name: &str) -> Result<String> {
    param.ok_or_else(|| ApiError::bad_request(format!("Query param '{name}' is required")))
}

/// GET /health
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

/// GET /api/v1/friends
pub async fn get_friends(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SubjectParams>,
) -> Result<Json<SummariesResponse>> {
    let steamid = require(params.steamid, "steamid")?;

    let friend_ids = state.ranker.peer_list(&steamid).await?;
    let players = state.steam.get_player_summaries(&friend_ids).await?;

    debug!(steamid, friends = players.len(), "Resolved friend summaries");
    Ok(Json(SummariesResponse { players }))
}

/// GET /api/v1/summaries
pub async fn get_summaries(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SummariesParams>,
) -> Result<Json<SummariesResponse>> {
    let steamids = require(params.steamids, "steamids")?;

    let ids: Vec<String> = steamids
        .split(',')
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .collect();
    let players = state.steam.get_player_summaries(&ids).await?;

    Ok(Json(SummariesResponse { players }))
}

/// GET /api/v1/ownedGames
pub async fn get_owned_games(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SubjectParams>,
) -> Result<Json<OwnedCollection>> {
    let steamid = require(params.steamid, "steamid")?;

    let collection = state.ranker.owned_collection(&steamid).await?;
    Ok(Json(collection))
}

/// GET /api/v1/ownedGames/compare
pub async fn compare_owned_games(
    State(state): State<Arc<AppState>>,
    Query(params): Query<CompareParams>,
) -> Result<Json<affinity_core::CompareResult>> {
    let player1 = require(params.player1, "player1")?;
    let player2 = require(params.player2, "player2")?;

    let subject = state.ranker.owned_collection(&player1).await?;
    let peer = state.ranker.owned_collection(&player2).await?;

    let result = compare(&subject, &peer, params.list_games);
    Ok(Json(result))
}

/// GET /api/v1/friends/ranking
pub async fn get_affinity_ranking(
    State(state): State<Arc<AppState>>,
    Query(params): Query<RankingParams>,
) -> Result<Json<RankingResponse>> {
    let steamid = require(params.steamid, "steamid")?;

    let response = state.ranker.rank(&steamid, params.list_games).await?;

    debug!(steamid, ranked = response.ranking.len(), "Ranking complete");
    Ok(Json(response))
}
