use crate::error::SearchError;
use crate::mask::CollisionMask;

/// Leading zero bits required of a winning digest by default.
pub const DEFAULT_COLLISION_BITS: u32 = 23;
/// Candidates dispatched per parallel round by default.
pub const DEFAULT_WINDOW_SIZE: u64 = 1_000_000;

/// Tunables shared by the sequential and parallel searchers.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Leading digest bits required to be zero.
    pub collision_bits: u32,
    /// Candidates dispatched per round across the whole pool.
    pub window_size: u64,
    /// Worker threads for the parallel searcher.
    pub workers: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            collision_bits: DEFAULT_COLLISION_BITS,
            window_size: DEFAULT_WINDOW_SIZE,
            workers: num_cpus::get(),
        }
    }
}

impl SearchConfig {
    /// Reject configurations the searchers cannot honour.
    pub fn validate(&self) -> Result<(), SearchError> {
        CollisionMask::new(self.collision_bits)?;
        if self.window_size == 0 {
            return Err(SearchError::Config("window size must be positive".into()));
        }
        if self.workers == 0 {
            return Err(SearchError::Config("worker count must be positive".into()));
        }
        Ok(())
    }

    /// Mask over the leading `collision_bits` digest bits.
    pub fn mask(&self) -> Result<CollisionMask, SearchError> {
        CollisionMask::new(self.collision_bits)
    }

    /// Candidates handed to one worker as a single unit of work.
    pub fn chunk_size(&self) -> u64 {
        self.window_size.div_ceil(self.workers as u64)
    }
}
