//! Collision predicate over `prefix:candidate` messages.

use crate::digest::Digest256;
use crate::error::SearchError;
use crate::mask::CollisionMask;

/// A winning message together with the candidate that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match {
    pub candidate: u64,
    pub message: String,
}

/// Pure predicate deciding whether the digest of `prefix:candidate` has all
/// of its masked leading bits clear.
///
/// The prefix is validated once here under the strict UTF-8 policy: a bad
/// prefix fails the whole run up front instead of on every candidate, since
/// the failure is deterministic and would recur each attempt.
#[derive(Debug)]
pub struct CollisionPredicate<D> {
    prefix: String,
    mask: CollisionMask,
    digest: D,
}

impl<D: Digest256> CollisionPredicate<D> {
    pub fn new(prefix: &[u8], mask: CollisionMask, digest: D) -> Result<Self, SearchError> {
        let prefix = std::str::from_utf8(prefix)
            .map_err(|e| SearchError::Encoding(format!("prefix is not valid UTF-8: {e}")))?
            .to_owned();
        Ok(Self {
            prefix,
            mask,
            digest,
        })
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn mask(&self) -> &CollisionMask {
        &self.mask
    }

    /// Render the trial message for `candidate`.
    pub fn message(&self, candidate: u64) -> String {
        format!("{}:{}", self.prefix, candidate)
    }

    /// Deterministic test of a single candidate.
    pub fn test(&self, candidate: u64) -> bool {
        self.check(candidate).is_some()
    }

    /// Test a candidate and return the winning [`Match`] on success.
    pub fn check(&self, candidate: u64) -> Option<Match> {
        let message = self.message(candidate);
        let digest = self.digest.digest(message.as_bytes());
        if self.mask.matches(&digest) {
            Some(Match { candidate, message })
        } else {
            None
        }
    }
}
