//! Bitmask over the leading bits of a digest.

use crate::digest::{Digest32, DIGEST_BITS, DIGEST_LEN};
use crate::error::SearchError;

/// Mask with the top `bits` bits of a 256-bit word set to one.
///
/// A digest collides when every masked bit of it is zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollisionMask {
    bytes: [u8; DIGEST_LEN],
    bits: u32,
}

impl CollisionMask {
    /// Build a mask covering the top `bits` bits.
    ///
    /// `bits` may be zero, in which case the mask is empty and every digest
    /// matches. Anything above the digest width is rejected.
    pub fn new(bits: u32) -> Result<Self, SearchError> {
        if bits > DIGEST_BITS {
            return Err(SearchError::Config(format!(
                "collision bits {bits} exceeds digest width {DIGEST_BITS}"
            )));
        }
        let mut bytes = [0u8; DIGEST_LEN];
        let full = (bits / 8) as usize;
        for b in bytes.iter_mut().take(full) {
            *b = 0xFF;
        }
        let rem = bits % 8;
        if rem > 0 {
            bytes[full] = 0xFF << (8 - rem);
        }
        Ok(Self { bytes, bits })
    }

    /// Number of leading bits this mask covers.
    pub fn bits(&self) -> u32 {
        self.bits
    }

    /// True when all masked bits of `digest` are zero.
    pub fn matches(&self, digest: &Digest32) -> bool {
        self.bytes.iter().zip(digest.iter()).all(|(m, d)| m & d == 0)
    }
}
