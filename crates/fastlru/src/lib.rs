//! # fastlru
//!
//! Fixed-capacity LRU cache with O(1) lookup, insertion, and eviction.
//!
//! ## Architecture
//! - **Arena**: entries live in a `Vec` of slots addressed by integer
//!   index, with a free list recycling evicted slots
//! - **Predecessor index**: AHash map from each key to the slot *before*
//!   it in the recency chain, which makes splicing an entry out of a
//!   singly-linked chain O(1)
//! - **Sentinel header**: a permanent empty slot at the front so that
//!   insert-at-front and unlink never special-case an empty chain
//!
//! ## Example
//!
//! ```
//! use fastlru::FastLru;
//!
//! let mut cache = FastLru::new(10);
//! cache.put("answer", 42)?;
//! assert_eq!(cache.get("answer")?, &42);
//! # Ok::<(), fastlru::Error>(())
//! ```
//!
//! The engine assumes a single caller. For multi-threaded use, wrap it
//! in [`SharedCache`], which serializes every operation behind one mutex
//! and tracks hit/miss statistics.

#![warn(missing_docs)]

mod error;
mod lru;
mod shared;
mod stats;

pub use error::{Error, Result};
pub use lru::{FastLru, DEFAULT_CAPACITY, MAX_CAPACITY, MIN_CAPACITY};
pub use shared::SharedCache;
pub use stats::CacheStats;
