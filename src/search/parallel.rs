//! Embarrassingly parallel search.
//!
//! The depth is split across workers, each of which runs the complete
//! sequential search on its own random stream. Workers share nothing;
//! their results are reduced once all of them have joined.

use rayon::prelude::*;
use tracing::{debug, info};

use super::seed::worker_rng;
use super::{search_sequential, Candidate};
use crate::config::SearchConfig;
use crate::error::{Error, Result};

/// Split `depth` rolls across `workers` as evenly as possible, earlier
/// workers taking the smaller shares.
pub fn split_depth(depth: u32, workers: usize) -> Vec<u32> {
    let mut left = depth;
    (0..workers)
        .map(|i| {
            let share = left / (workers - i) as u32;
            left -= share;
            share
        })
        .collect()
}

/// Reduce worker results to one winner: lowest score, and among exact
/// matches the shortest program. Earlier candidates win remaining ties.
pub fn merge<I>(candidates: I) -> Option<Candidate>
where
    I: IntoIterator<Item = Candidate>,
{
    candidates.into_iter().fold(None, |best, candidate| match best {
        None => Some(candidate),
        Some(current) if candidate.score < current.score => Some(candidate),
        Some(current)
            if candidate.score == 0
                && current.score == 0
                && candidate.program_len() < current.program_len() =>
        {
            Some(candidate)
        }
        kept => kept,
    })
}

/// Run `config.workers` independent searches seeded from `master_seed`
/// and merge their winners.
pub fn search_parallel(target: &[u16], config: &SearchConfig, master_seed: u64) -> Result<Candidate> {
    let workers = usize::from(config.workers.max(1));
    let shares = split_depth(config.search_depth, workers);

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(workers)
        .thread_name(|i| format!("seqvm-worker-{}", i))
        .build()?;

    let results: Vec<Option<Candidate>> = pool.install(|| {
        shares
            .par_iter()
            .enumerate()
            .map(|(index, &share)| {
                if share == 0 {
                    return None;
                }
                let mut rng = worker_rng(master_seed, index);
                let best = search_sequential(target, config, share, &mut rng).ok()?;
                debug!(worker = index, share, score = best.score, "worker finished");
                Some(best)
            })
            .collect()
    });

    let best = merge(results.into_iter().flatten()).ok_or(Error::NoCandidateFound)?;
    info!(
        workers,
        score = best.score,
        length = best.program_len(),
        "worker results merged"
    );
    Ok(best)
}
