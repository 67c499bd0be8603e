//! Domain types for the affinity service.
//!
//! Field renames keep the JSON wire format of the original public API, so
//! existing frontends keep working unchanged.

use serde::{Deserialize, Serialize};

/// A single item in an owned collection (a game in a Steam library).
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Item {
    /// Upstream item identifier.
    #[serde(rename = "appid")]
    pub id: u64,
    /// Human-readable name.
    pub name: String,
    /// Icon URL fragment, as returned by the upstream.
    #[serde(rename = "img_icon_url", default)]
    pub icon_url: String,
}

impl Item {
    /// Creates an item with an empty icon URL.
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            icon_url: String::new(),
        }
    }
}

/// The set of items one subject or peer owns.
///
/// Immutable after construction; enumeration order of `items` is preserved
/// and is the order matching items are reported in.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct OwnedCollection {
    /// The owning subject/peer identifier.
    #[serde(rename = "steamid", default)]
    pub owner_id: String,
    /// Collection size as reported by the upstream. May differ from
    /// `items.len()` when the upstream withholds item details.
    #[serde(rename = "game_count", default)]
    pub count: usize,
    /// The owned items.
    #[serde(rename = "games", default)]
    pub items: Vec<Item>,
}

impl OwnedCollection {
    /// Creates a collection whose count is the number of items.
    pub fn new(owner_id: impl Into<String>, items: Vec<Item>) -> Self {
        Self {
            owner_id: owner_id.into(),
            count: items.len(),
            items,
        }
    }

    /// Creates a collection with an explicit upstream-reported count.
    pub fn with_count(owner_id: impl Into<String>, count: usize, items: Vec<Item>) -> Self {
        Self {
            owner_id: owner_id.into(),
            count,
            items,
        }
    }
}

/// Public profile summary for a subject or peer.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PeerSummary {
    /// Peer identifier.
    #[serde(rename = "steamid")]
    pub id: String,
    /// Profile visibility state.
    #[serde(rename = "communityvisibilitystate", default)]
    pub visibility: i32,
    /// Display name.
    #[serde(rename = "personaname", default)]
    pub persona_name: String,
    /// Small avatar URL.
    #[serde(default)]
    pub avatar: String,
    /// Medium avatar URL.
    #[serde(rename = "avatarmedium", default)]
    pub avatar_medium: String,
    /// Full-size avatar URL.
    #[serde(rename = "avatarfull", default)]
    pub avatar_full: String,
}

/// Result of comparing one subject collection against one peer collection.
///
/// Produced exactly once per (subject, peer) pair per ranking request and
/// never mutated after construction.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CompareResult {
    /// Composite score: `similarity * weight`.
    pub affinity: f64,
    /// Overlap ratio: `matches / (subject.count + peer.count)`.
    pub similarity: f64,
    /// Harmonic-mean-style size-balance weight.
    pub weight: f64,
    /// Subject identifier.
    #[serde(rename = "player1ID")]
    pub subject_id: String,
    /// `matches / subject.count`, 0 when the subject owns nothing.
    #[serde(rename = "player1Ratio")]
    pub subject_ratio: f64,
    /// Peer identifier.
    #[serde(rename = "player2ID")]
    pub peer_id: String,
    /// `matches / peer.count`, 0 when the peer owns nothing.
    #[serde(rename = "player2Ratio")]
    pub peer_ratio: f64,
    /// The peer's collection size.
    #[serde(rename = "player2GamesCount")]
    pub peer_count: usize,
    /// Number of items owned by both.
    pub matches: usize,
    /// The matching items, in subject enumeration order. Omitted unless
    /// the caller asked for them.
    #[serde(rename = "matching_games", skip_serializing_if = "Option::is_none")]
    pub matching_items: Option<Vec<Item>>,
}

/// A fully-sorted ranking of every peer against the subject.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct RankingResponse {
    /// Compare results sorted by affinity descending, peer id ascending.
    pub ranking: Vec<CompareResult>,
}
