//! # Affinity API Server
//!
//! REST API over the affinity ranking engine, wire-compatible with the
//! original frontend.
//!
//! ## Endpoints
//!
//! - `GET /health` - Liveness check
//! - `GET /api/v1/friends?steamid=` - Friend list resolved to summaries
//! - `GET /api/v1/summaries?steamids=` - Player summaries for a list of ids
//! - `GET /api/v1/ownedGames?steamid=` - A player's game library
//! - `GET /api/v1/ownedGames/compare?player1=&player2=&listGames=` - Pairwise comparison
//! - `GET /api/v1/friends/ranking?steamid=&listGames=` - Full affinity ranking
//!
//! ## Example
//!
//! ```rust,ignore
//! use affinity_api::{ApiServer, ApiConfig};
//!
//! let server = ApiServer::new(ApiConfig::from_env());
//! server.run(([0, 0, 0, 0], 8080)).await?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

mod dto;
mod error;
mod handlers;
mod routes;
mod state;

pub use error::ApiError;
pub use routes::create_router;
pub use state::{ApiConfig, AppState};

use std::net::SocketAddr;
use std::sync::Arc;

use affinity_cache::SweeperHandle;
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

/// API server for the affinity service.
pub struct ApiServer {
    state: Arc<AppState>,
}

impl ApiServer {
    /// Creates a new API server with the given configuration.
    pub fn new(config: ApiConfig) -> Self {
        Self {
            state: Arc::new(AppState::new(config)),
        }
    }

    /// Creates the router with all routes and layers configured.
    pub fn router(&self) -> Router {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);

        create_router(self.state.clone())
            .layer(cors)
            .layer(TraceLayer::new_for_http())
    }

    /// Starts the cache sweepers for this server's state.
    pub fn start_sweepers(&self) -> Vec<SweeperHandle> {
        self.state.start_sweepers()
    }

    /// Runs the server on the given address.
    pub async fn run(self, addr: impl Into<SocketAddr>) -> std::io::Result<()> {
        let addr = addr.into();
        let listener = tokio::net::TcpListener::bind(addr).await?;

        info!("Affinity API server listening on {}", addr);

        axum::serve(listener, self.router()).await
    }
}
