//! # Affinity Rank
//!
//! The engine of the affinity service: a pure pairwise collection
//! comparator and a cache-backed fan-out ranker.
//!
//! ## Example
//!
//! ```rust,ignore
//! use affinity_rank::{Ranker, RankerConfig};
//!
//! let ranker = Ranker::new(provider, RankerConfig::default());
//! let response = ranker.rank("76561198000000001", false).await?;
//!
//! for result in response.ranking {
//!     println!("{}: {:.3}", result.peer_id, result.affinity);
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

mod compare;
mod ranker;

pub use compare::compare;
pub use ranker::{Ranker, RankerConfig};
