//! # Affinity Steam
//!
//! Steam Web API client implementing the
//! [`CollectionProvider`](affinity_core::CollectionProvider) contract.
//!
//! Owned collections are Steam game libraries, peers are Steam friends.
//! Player summaries get their own sliding-TTL cache here; library and
//! friend-list caching is the ranker's read-through path.
//!
//! ## Example
//!
//! ```rust,ignore
//! use affinity_steam::{SteamClient, SteamConfig};
//!
//! let client = SteamClient::new(SteamConfig::new("MY_API_KEY"));
//! let games = client.get_owned_games("76561198000000001").await?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

mod client;

pub use client::{SteamClient, SteamConfig};
