//! Partial hash-collision search over `prefix:counter` messages.
//!
//! Given a fixed prefix, find a numeric suffix whose SHA-256 digest of
//! `prefix:suffix` has its top N bits equal to zero. Two searchers share one
//! collision predicate: a single-threaded baseline and a worker-pool
//! searcher that dispatches expanding candidate windows in chunks, collects
//! results in completion order, and cancels the pool on the first hit.

pub mod config;
pub mod digest;
pub mod error;
pub mod mask;
pub mod parallel;
pub mod predicate;
pub mod sequential;

pub use config::{SearchConfig, DEFAULT_COLLISION_BITS, DEFAULT_WINDOW_SIZE};
pub use digest::{Digest256, Digest32, Sha256Digest, DIGEST_BITS, DIGEST_LEN};
pub use error::SearchError;
pub use mask::CollisionMask;
pub use parallel::ParallelSearcher;
pub use predicate::{CollisionPredicate, Match};
pub use sequential::SequentialSearcher;
