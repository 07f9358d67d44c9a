//! Deterministic digest stubs shared by the integration tests.
#![allow(dead_code)]

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use collide::{Digest256, Digest32};

/// Extract the decimal candidate suffix from a `prefix:candidate` message.
pub fn candidate_of(msg: &[u8]) -> u64 {
    let text = std::str::from_utf8(msg).expect("trial messages are UTF-8");
    let (_, suffix) = text.rsplit_once(':').expect("trial messages contain ':'");
    suffix.parse().expect("candidate suffix is decimal")
}

/// Matches every candidate congruent to `hit` modulo `period`; every other
/// digest has all bits set.
pub struct PeriodicDigest {
    pub period: u64,
    pub hit: u64,
}

impl Digest256 for PeriodicDigest {
    fn digest(&self, msg: &[u8]) -> Digest32 {
        if candidate_of(msg) % self.period == self.hit {
            [0x00; 32]
        } else {
            [0xFF; 32]
        }
    }
}

/// Never produces a digest with any leading zero bit.
pub struct NeverDigest;

impl Digest256 for NeverDigest {
    fn digest(&self, _msg: &[u8]) -> Digest32 {
        [0xFF; 32]
    }
}

/// Matches every candidate and counts invocations, for quiescence checks.
pub struct CountingDigest {
    pub calls: Arc<AtomicU64>,
}

impl Digest256 for CountingDigest {
    fn digest(&self, _msg: &[u8]) -> Digest32 {
        self.calls.fetch_add(1, Ordering::Relaxed);
        [0x00; 32]
    }
}

/// Panics on one specific candidate, for worker-death propagation tests.
pub struct PanickingDigest {
    pub poison: u64,
}

impl Digest256 for PanickingDigest {
    fn digest(&self, msg: &[u8]) -> Digest32 {
        if candidate_of(msg) == self.poison {
            panic!("poisoned candidate {}", self.poison);
        }
        [0xFF; 32]
    }
}
