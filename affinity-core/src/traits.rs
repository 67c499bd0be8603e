//! The upstream collaborator contract.
//!
//! The ranking engine only ever talks to the upstream through this trait,
//! which keeps the fan-out logic testable without a live provider.

use async_trait::async_trait;

use crate::error::Result;
use crate::types::OwnedCollection;

/// Interface to the upstream data provider.
///
/// Implementations might use:
/// - The Steam Web API (production)
/// - An in-memory fixture map (tests)
///
/// Errors must be classified: `InvalidIdentifier` when the upstream rejects
/// the id, `TransientFailure` for network or decoding problems.
#[async_trait]
pub trait CollectionProvider: Send + Sync {
    /// Fetches the list of peer ids associated with a subject.
    async fn fetch_peer_list(&self, subject_id: &str) -> Result<Vec<String>>;

    /// Fetches the collection a subject or peer owns.
    async fn fetch_owned_collection(&self, id: &str) -> Result<OwnedCollection>;
}
