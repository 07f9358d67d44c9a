use std::process::ExitCode;
use std::time::{Duration, Instant};

use clap::Parser;
use sha2::{Digest, Sha256};

use collide::{
    CollisionPredicate, Match, ParallelSearcher, SearchConfig, SearchError, SequentialSearcher,
    Sha256Digest, DEFAULT_COLLISION_BITS, DEFAULT_WINDOW_SIZE,
};

/// Find a numeric suffix whose SHA-256 digest of `PREFIX:suffix` starts with
/// a run of zero bits, first single-threaded and then across a worker pool.
#[derive(Parser)]
#[command(version, about)]
struct Args {
    /// Input prefix; candidate messages are `PREFIX:<n>`.
    #[clap(default_value = "ABCDEFGHIJKLMNOPQRSTUVWXYZ")]
    prefix: String,

    /// Leading digest bits required to be zero.
    #[clap(long, default_value_t = DEFAULT_COLLISION_BITS)]
    bits: u32,

    /// Candidates dispatched per parallel round.
    #[clap(long, default_value_t = DEFAULT_WINDOW_SIZE)]
    window: u64,

    /// Worker threads; defaults to the number of CPUs.
    #[clap(long)]
    workers: Option<usize>,

    /// Skip the single-threaded baseline run.
    #[clap(long)]
    skip_sequential: bool,

    /// Emit results as JSON lines instead of plain text.
    #[clap(long)]
    json: bool,
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();
    if let Err(e) = run(&args) {
        eprintln!("{e}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

fn run(args: &Args) -> Result<(), SearchError> {
    let config = SearchConfig {
        collision_bits: args.bits,
        window_size: args.window,
        workers: args.workers.unwrap_or_else(num_cpus::get),
    };
    config.validate()?;
    let mask = config.mask()?;

    if !args.skip_sequential {
        let predicate = CollisionPredicate::new(args.prefix.as_bytes(), mask, Sha256Digest)?;
        let start = Instant::now();
        let found = SequentialSearcher::new(&predicate).search();
        report("sequential", &found, start.elapsed(), args.json);
    }

    let predicate = CollisionPredicate::new(args.prefix.as_bytes(), mask, Sha256Digest)?;
    let searcher = ParallelSearcher::new(predicate, config);
    let start = Instant::now();
    let found = searcher.search()?;
    report("parallel", &found, start.elapsed(), args.json);

    Ok(())
}

fn report(mode: &str, found: &Match, elapsed: Duration, json: bool) {
    let digest = Sha256::digest(found.message.as_bytes());
    if json {
        let out = serde_json::json!({
            "mode": mode,
            "message": found.message,
            "candidate": found.candidate,
            "digest": hex::encode(digest),
            "elapsed_ms": elapsed.as_millis() as u64,
        });
        println!("{out}");
    } else {
        println!(
            "{mode}: {} in {:.4}s (sha256 {})",
            found.message,
            elapsed.as_secs_f64(),
            hex::encode(digest)
        );
    }
}
