//! Single-threaded baseline searcher.

use crate::digest::Digest256;
use crate::predicate::{CollisionPredicate, Match};

/// Tries candidates one at a time from zero upward.
pub struct SequentialSearcher<'a, D> {
    predicate: &'a CollisionPredicate<D>,
}

impl<'a, D: Digest256> SequentialSearcher<'a, D> {
    pub fn new(predicate: &'a CollisionPredicate<D>) -> Self {
        Self { predicate }
    }

    /// Run until the first matching candidate and return its message.
    ///
    /// Unbounded: expected to take about 2^bits trials and has no timeout.
    /// Callers wanting a bound should use [`search_bounded`] instead.
    ///
    /// [`search_bounded`]: SequentialSearcher::search_bounded
    pub fn search(&self) -> Match {
        let mut candidate = 0u64;
        loop {
            if let Some(found) = self.predicate.check(candidate) {
                return found;
            }
            candidate += 1;
        }
    }

    /// Scan candidates `0..limit` and return the first match, if any.
    pub fn search_bounded(&self, limit: u64) -> Option<Match> {
        (0..limit).find_map(|candidate| self.predicate.check(candidate))
    }
}
