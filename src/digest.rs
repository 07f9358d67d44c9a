//! Digest primitive the collision predicate is built over.

use sha2::{Digest, Sha256};

/// Width of the digest space in bits.
pub const DIGEST_BITS: u32 = 256;
/// Width of a digest in bytes.
pub const DIGEST_LEN: usize = 32;

/// A 256-bit digest value.
pub type Digest32 = [u8; DIGEST_LEN];

/// Fixed-width cryptographic digest over a byte message.
///
/// The search only relies on the 256-bit output width, not the specific
/// algorithm, so any hash of matching width is substitutable. Tests swap in
/// deterministic stubs.
pub trait Digest256: Send + Sync {
    fn digest(&self, msg: &[u8]) -> Digest32;
}

/// SHA-256 backend, the default.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sha256Digest;

impl Digest256 for Sha256Digest {
    fn digest(&self, msg: &[u8]) -> Digest32 {
        Sha256::digest(msg).into()
    }
}
