//! # Affinity Core
//!
//! Core types, errors, and traits for the affinity ranking service.
//!
//! This crate provides the foundational building blocks used by all other
//! affinity crates:
//!
//! - **Types**: Domain models for owned collections, items, peer summaries,
//!   and comparison results
//! - **Errors**: Classified error types (invalid identifier vs. transient
//!   upstream failure)
//! - **Traits**: The upstream collaborator contract (`CollectionProvider`)
//!
//! ## Example
//!
//! ```rust
//! use affinity_core::{Item, OwnedCollection};
//!
//! let collection = OwnedCollection::new("subject", vec![Item::new(10, "Counter-Strike")]);
//! let json = serde_json::to_string(&collection).unwrap();
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, clippy::all)]

pub mod error;
pub mod traits;
pub mod types;

// Re-export commonly used items at crate root
pub use error::{AffinityError, Result};
pub use traits::*;
pub use types::*;
