//! Worker-pool searcher with windowed dispatch and first-match cancellation.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crossbeam_channel::{bounded, unbounded, Receiver, Sender};

use crate::config::SearchConfig;
use crate::digest::Digest256;
use crate::error::SearchError;
use crate::predicate::{CollisionPredicate, Match};

/// Candidates scanned between cancellation checks inside a chunk.
const CANCEL_CHECK_INTERVAL: u64 = 1024;

/// A contiguous candidate range handed to one worker, upper bound exclusive.
#[derive(Debug, Clone, Copy)]
struct Chunk {
    start: u64,
    end: u64,
}

/// Outcome of one chunk: first in-chunk match if any, or the panic message
/// of a worker that died scanning it.
type ChunkOutcome = Result<Option<Match>, String>;

/// Distributes candidate windows across a fixed thread pool and returns the
/// first match observed, cancelling all outstanding work.
///
/// The pool is scoped to one [`search`] call: workers are spawned at entry
/// and joined on every exit path. The predicate is broadcast once per pool
/// lifetime, one `Arc` clone per worker, never per task.
///
/// [`search`]: ParallelSearcher::search
pub struct ParallelSearcher<D> {
    predicate: Arc<CollisionPredicate<D>>,
    config: SearchConfig,
}

impl<D: Digest256 + 'static> ParallelSearcher<D> {
    pub fn new(predicate: CollisionPredicate<D>, config: SearchConfig) -> Self {
        Self {
            predicate: Arc::new(predicate),
            config,
        }
    }

    /// Search until some worker finds a matching candidate.
    ///
    /// Unbounded like the sequential baseline: windows advance until a match
    /// turns up. Fails fast if a worker dies; never hangs waiting on a dead
    /// pool.
    pub fn search(&self) -> Result<Match, SearchError> {
        self.config.validate()?;
        let pool = WorkerPool::start(Arc::clone(&self.predicate), self.config.workers);
        let result = self.dispatch(&pool);
        pool.shutdown();
        result
    }

    /// Dispatch windows round by round, consuming chunk results in
    /// completion order, until the first match.
    fn dispatch(&self, pool: &WorkerPool) -> Result<Match, SearchError> {
        let window = self.config.window_size;
        let chunk_size = self.config.chunk_size();
        let mut round = 0u64;
        loop {
            let lo = round.checked_mul(window).ok_or_else(|| {
                SearchError::Config("candidate space exhausted without a match".into())
            })?;
            let hi = lo.checked_add(window).ok_or_else(|| {
                SearchError::Config("candidate space exhausted without a match".into())
            })?;

            let mut outstanding = 0usize;
            let mut start = lo;
            while start < hi {
                let end = hi.min(start + chunk_size);
                pool.submit(Chunk { start, end })?;
                outstanding += 1;
                start = end;
            }
            log::debug!("dispatched window {lo}..{hi} as {outstanding} chunks");

            while outstanding > 0 {
                let outcome = pool.next_result()?;
                outstanding -= 1;
                match outcome {
                    Ok(Some(found)) => {
                        log::debug!("match at candidate {}", found.candidate);
                        return Ok(found);
                    }
                    Ok(None) => {}
                    Err(died) => return Err(SearchError::Worker(died)),
                }
            }
            round += 1;
        }
    }
}

/// Fixed pool of scanning threads fed over a chunk queue.
struct WorkerPool {
    jobs: Sender<Chunk>,
    results: Receiver<ChunkOutcome>,
    cancel: Arc<AtomicBool>,
    handles: Vec<JoinHandle<()>>,
}

impl WorkerPool {
    fn start<D: Digest256 + 'static>(
        predicate: Arc<CollisionPredicate<D>>,
        workers: usize,
    ) -> Self {
        let (job_tx, job_rx) = unbounded::<Chunk>();
        let (result_tx, result_rx) = bounded::<ChunkOutcome>(workers * 2);
        let cancel = Arc::new(AtomicBool::new(false));

        let mut handles = Vec::with_capacity(workers);
        for id in 0..workers {
            let predicate = Arc::clone(&predicate);
            let jobs = job_rx.clone();
            let results = result_tx.clone();
            let cancel = Arc::clone(&cancel);
            handles.push(thread::spawn(move || {
                worker_loop(id, &predicate, &jobs, &results, &cancel)
            }));
        }

        Self {
            jobs: job_tx,
            results: result_rx,
            cancel,
            handles,
        }
    }

    fn submit(&self, chunk: Chunk) -> Result<(), SearchError> {
        self.jobs
            .send(chunk)
            .map_err(|_| SearchError::Worker("worker pool is gone".into()))
    }

    /// Block until the next chunk finishes, in completion order.
    fn next_result(&self) -> Result<ChunkOutcome, SearchError> {
        self.results.recv().map_err(|_| {
            SearchError::Worker("all workers exited before the window completed".into())
        })
    }

    /// Cancel outstanding work and join every worker.
    fn shutdown(self) {
        self.cancel.store(true, Ordering::Relaxed);
        // Closing the job queue stops idle workers; closing the result queue
        // unparks any worker blocked on a send of a now-unwanted outcome.
        drop(self.jobs);
        drop(self.results);
        for handle in self.handles {
            let _ = handle.join();
        }
    }
}

fn worker_loop<D: Digest256>(
    id: usize,
    predicate: &CollisionPredicate<D>,
    jobs: &Receiver<Chunk>,
    results: &Sender<ChunkOutcome>,
    cancel: &AtomicBool,
) {
    while let Ok(chunk) = jobs.recv() {
        if cancel.load(Ordering::Relaxed) {
            break;
        }
        let outcome = catch_unwind(AssertUnwindSafe(|| scan_chunk(predicate, chunk, cancel)))
            .map_err(|panic| {
                let msg = panic
                    .downcast_ref::<&str>()
                    .map(|s| s.to_string())
                    .or_else(|| panic.downcast_ref::<String>().cloned())
                    .unwrap_or_else(|| "unknown panic".into());
                format!(
                    "worker {id} died scanning {}..{}: {msg}",
                    chunk.start, chunk.end
                )
            });
        if results.send(outcome).is_err() {
            // Pool shut down while this chunk was in flight.
            break;
        }
    }
    log::trace!("worker {id} exiting");
}

/// Scan a chunk in order and return the first match.
///
/// The cancellation flag is only honoured between candidates, and it is only
/// raised at pool shutdown. While the pool is live a worker runs its chunk to
/// completion even if a sibling has already queued a match, so
/// near-simultaneous discoveries all reach the collector and the first one
/// consumed wins.
fn scan_chunk<D: Digest256>(
    predicate: &CollisionPredicate<D>,
    chunk: Chunk,
    cancel: &AtomicBool,
) -> Option<Match> {
    for candidate in chunk.start..chunk.end {
        if candidate % CANCEL_CHECK_INTERVAL == 0 && cancel.load(Ordering::Relaxed) {
            return None;
        }
        if let Some(found) = predicate.check(candidate) {
            return Some(found);
        }
    }
    None
}
