//! Monte-Carlo program search.
//!
//! A roll generates one random program and runs it until it has emitted
//! as many values as the target or its step budget runs out. The search
//! keeps the lowest-scoring roll. Every exact match replaces the best and
//! lowers the length ceiling for later rolls to that program's length, so
//! the remaining budget hunts for shorter exact programs.

pub mod fitness;
mod parallel;
pub mod seed;
#[cfg(test)]
mod tests;

use rand::Rng;
use tracing::{debug, info, trace};

use crate::config::SearchConfig;
use crate::error::{Error, Result};
use crate::vm::{generate, Machine};

pub use fitness::{score, score_with, Metric, WORST_SCORE};
pub use parallel::{merge, search_parallel, split_depth};
pub use seed::{derive_worker_seed, worker_rng, WorkerRng};

/// Rolls between progress trace events.
const PROGRESS_INTERVAL: u32 = 1000;

/// A scored, executed candidate.
#[derive(Clone, Debug)]
pub struct Candidate {
    pub machine: Machine,
    pub score: u32,
}

impl Candidate {
    pub fn program_len(&self) -> u16 {
        self.machine.program().len()
    }
}

/// Generate one program under `length_limit` and run it against `target`.
pub fn roll<R: Rng + ?Sized>(
    rng: &mut R,
    config: &SearchConfig,
    length_limit: u16,
    target: &[u16],
) -> Machine {
    let program = generate(rng, length_limit);
    let mut machine = Machine::new(program, config.tape_length, config.addressing);
    machine.run(config.step_budget, target.len());
    machine
}

/// Run `depth` rolls on one random stream and return the best candidate.
pub fn search_sequential<R: Rng + ?Sized>(
    target: &[u16],
    config: &SearchConfig,
    depth: u32,
    rng: &mut R,
) -> Result<Candidate> {
    search_sequential_observed(target, config, depth, rng, |_, _| {})
}

/// [`search_sequential`], handing every rolled machine and its score to
/// `observe` in generation order.
pub fn search_sequential_observed<R, F>(
    target: &[u16],
    config: &SearchConfig,
    depth: u32,
    rng: &mut R,
    mut observe: F,
) -> Result<Candidate>
where
    R: Rng + ?Sized,
    F: FnMut(&Machine, u32),
{
    let mut best: Option<Candidate> = None;
    let mut length_limit = config.length_limit;

    for index in 0..depth {
        if index % PROGRESS_INTERVAL == 0 {
            trace!(index, depth, best = ?best.as_ref().map(|b| b.score), "search progress");
        }

        let machine = roll(rng, config, length_limit, target);
        let score = score_with(config.metric, target, machine.output());
        observe(&machine, score);

        let improves = best.as_ref().map_or(true, |b| score < b.score);
        if !improves && score != 0 {
            continue;
        }
        let len = machine.program().len();
        if score == 0 {
            // Later rolls may not exceed the newest exact program.
            length_limit = len;
            debug!(index, length = len, "exact match, length ceiling tightened");
        } else {
            debug!(index, score, length = len, "new best candidate");
        }
        best = Some(Candidate { machine, score });
    }

    best.ok_or(Error::NoCandidateFound)
}

/// Resume a winning machine until its output reaches `target_len + extra`
/// values or `step_budget` more steps have run. A short result is not an
/// error.
pub fn extend(mut machine: Machine, target_len: usize, extra: u16, step_budget: u32) -> Machine {
    let wanted = target_len + usize::from(extra);
    let executed = machine.run(step_budget, wanted);
    if machine.output().len() < wanted {
        debug!(
            executed,
            produced = machine.output().len(),
            wanted,
            "extension budget exhausted"
        );
    }
    machine
}

/// Outcome of a full search-and-extend run.
#[derive(Clone, Debug)]
pub struct Prediction {
    /// The winning machine, extended past the target.
    pub machine: Machine,
    /// Score of the winner against the target prefix.
    pub score: u32,
    pub target_len: usize,
    /// Continuation length that was requested.
    pub extra: u16,
    /// Master seed the search ran under.
    pub seed: u64,
}

impl Prediction {
    /// Fitted prefix followed by the continuation.
    pub fn output(&self) -> &[u16] {
        self.machine.output()
    }

    /// Values produced past the target length.
    pub fn continuation(&self) -> &[u16] {
        self.output().get(self.target_len..).unwrap_or(&[])
    }

    pub fn is_exact(&self) -> bool {
        self.score == 0
    }
}

/// Search for a program reproducing `target`, then extend it by
/// `config.extra` values.
pub fn predict(target: &[u16], config: &SearchConfig) -> Result<Prediction> {
    config.validate()?;
    if target.is_empty() {
        return Err(Error::EmptyTarget);
    }

    let seed = config.seed.unwrap_or_else(seed::entropy_seed);
    info!(
        seed,
        target_len = target.len(),
        depth = config.search_depth,
        workers = config.workers,
        "search starting"
    );

    let best = if config.workers <= 1 {
        search_sequential(target, config, config.search_depth, &mut worker_rng(seed, 0))?
    } else {
        search_parallel(target, config, seed)?
    };
    info!(score = best.score, length = best.program_len(), "search complete");

    let machine = extend(best.machine, target.len(), config.extra, config.extend_budget);
    Ok(Prediction {
        machine,
        score: best.score,
        target_len: target.len(),
        extra: config.extra,
        seed,
    })
}
