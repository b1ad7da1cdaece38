use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use super::*;
use crate::vm::{Addressing, Instruction, Op, Program};

fn config(depth: u32) -> SearchConfig {
    SearchConfig {
        step_budget: 100,
        search_depth: depth,
        seed: Some(42),
        ..SearchConfig::default()
    }
}

/// `add 5; out` forever: 5, 10, 15, ...
fn counter_machine() -> Machine {
    let program = Program::new(vec![
        Instruction::jump(Op::Add, 5, 0),
        Instruction::jump(Op::Output, 0, u16::MAX),
    ])
    .unwrap();
    Machine::new(program, 8, Addressing::ProgramLength)
}

fn candidate(score: u32, len: u16) -> Candidate {
    let instructions = (0..len)
        .map(|i| Instruction::fall_through(i, Op::Add, 0))
        .collect();
    let machine = Machine::new(Program::new(instructions).unwrap(), 4, Addressing::ProgramLength);
    Candidate { machine, score }
}

// -- Roll --

#[test]
fn test_roll_stops_at_target_length() {
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let config = config(1);
    for _ in 0..200 {
        let m = roll(&mut rng, &config, 100, &[1, 2, 3]);
        assert!(m.output().len() <= 3);
        assert!(m.steps() <= u64::from(config.step_budget));
    }
}

// -- Sequential search --

#[test]
fn test_zero_depth_reports_no_candidate() {
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let result = search_sequential(&[1, 2, 3], &config(0), 0, &mut rng);
    assert!(matches!(result, Err(Error::NoCandidateFound)));
}

#[test]
fn test_single_roll_always_yields_a_candidate() {
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let best = search_sequential(&[1, 2, 3], &config(1), 1, &mut rng).unwrap();
    assert!(best.score <= WORST_SCORE);
}

#[test]
fn test_sequential_search_is_deterministic() {
    let target = [3, 6, 9, 12];
    let cfg = config(500);
    let a = search_sequential(&target, &cfg, 500, &mut worker_rng(42, 0)).unwrap();
    let b = search_sequential(&target, &cfg, 500, &mut worker_rng(42, 0)).unwrap();
    assert_eq!(a.score, b.score);
    assert_eq!(a.machine.program(), b.machine.program());
    assert_eq!(a.machine.output(), b.machine.output());
}

#[test]
fn test_best_score_bounds_every_evaluated_score() {
    let target = [5, 10, 15];
    let mut seen = Vec::new();
    let best = search_sequential_observed(
        &target,
        &config(2000),
        2000,
        &mut worker_rng(9, 0),
        |_, s| seen.push(s),
    )
    .unwrap();
    assert_eq!(seen.len(), 2000);
    assert!(seen.iter().all(|&s| best.score <= s));
    assert_eq!(Some(&best.score), seen.iter().min());
}

#[test]
fn test_deeper_search_never_scores_worse() {
    let target = [5, 10, 15];
    let cfg = SearchConfig {
        step_budget: 50,
        ..config(0)
    };
    let shallow = search_sequential(&target, &cfg, 100, &mut worker_rng(42, 0)).unwrap();
    let deep = search_sequential(&target, &cfg, 10_000, &mut worker_rng(42, 0)).unwrap();
    assert!(deep.score <= shallow.score);
}

#[test]
fn test_reported_score_matches_output() {
    let target = [2, 4, 6];
    let best = search_sequential(&target, &config(300), 300, &mut worker_rng(5, 0)).unwrap();
    assert_eq!(best.score, score(&target, best.machine.output()));
}

#[test]
fn test_latest_exact_match_replaces_earlier_ones() {
    // A single zero target is easy to hit exactly: any program that emits a
    // zero cell first matches.
    let target = [0];
    let mut exact: Vec<Program> = Vec::new();
    let best = search_sequential_observed(&target, &config(3000), 3000, &mut worker_rng(3, 0), |m, s| {
        if s == 0 {
            exact.push(m.program().clone());
        }
    })
    .unwrap();
    assert!(exact.len() > 1, "expected several exact matches, got {}", exact.len());
    assert!(exact.iter().any(|p| p != &exact[0]));
    assert_eq!(best.score, 0);
    assert_eq!(best.machine.program(), exact.last().unwrap());
}

#[test]
fn test_exact_match_caps_later_lengths() {
    let target = [0];
    let cfg = config(3000);
    let mut rolls: Vec<(u16, u32)> = Vec::new();
    search_sequential_observed(&target, &cfg, 3000, &mut worker_rng(3, 0), |m, s| {
        rolls.push((m.program().len(), s));
    })
    .unwrap();

    let first_exact = rolls.iter().position(|&(_, s)| s == 0).expect("an exact match");
    assert!(first_exact + 1 < rolls.len());

    // Lengths are drawn from [1, limit + 1]; every exact match resets the
    // limit to its own length.
    let mut limit = cfg.length_limit;
    for (index, &(len, s)) in rolls.iter().enumerate() {
        assert!(len <= limit + 1, "roll {} has length {} over limit {}", index, len, limit);
        if s == 0 {
            limit = len;
        }
    }
}

#[test]
fn test_circular_metric_is_used() {
    let target = [65535];
    let cfg = SearchConfig {
        metric: Metric::Circular,
        ..config(500)
    };
    let best = search_sequential(&target, &cfg, 500, &mut worker_rng(4, 0)).unwrap();
    assert_eq!(best.score, score_with(Metric::Circular, &target, best.machine.output()));
}

// -- Extension --

#[test]
fn test_extend_reaches_requested_length() {
    let mut m = counter_machine();
    m.run(100, 3);
    assert_eq!(m.output(), &[5, 10, 15]);
    let m = extend(m, 3, 5, 1_000);
    assert_eq!(m.output(), &[5, 10, 15, 20, 25, 30, 35, 40]);
}

#[test]
fn test_extend_stops_when_budget_runs_out() {
    let mut m = counter_machine();
    m.run(100, 3);
    // Two steps per value: four steps buy two more values.
    let m = extend(m, 3, 5, 4);
    assert_eq!(m.output(), &[5, 10, 15, 20, 25]);
}

#[test]
fn test_extend_preserves_state() {
    let mut m = counter_machine();
    m.run(100, 3);
    let steps = m.steps();
    let m = extend(m, 3, 0, 1_000);
    assert_eq!(m.steps(), steps);
    assert_eq!(m.output().len(), 3);
}

// -- Parallel search --

#[test]
fn test_split_depth_covers_everything() {
    assert_eq!(split_depth(10, 3), vec![3, 3, 4]);
    assert_eq!(split_depth(2, 4), vec![0, 0, 1, 1]);
    assert_eq!(split_depth(10_000, 1), vec![10_000]);
    assert_eq!(split_depth(1001, 8).iter().sum::<u32>(), 1001);
}

#[test]
fn test_merge_prefers_lower_score() {
    let best = merge(vec![candidate(7, 3), candidate(2, 9), candidate(5, 1)]).unwrap();
    assert_eq!(best.score, 2);
    assert_eq!(best.program_len(), 9);
}

#[test]
fn test_merge_breaks_exact_ties_by_length() {
    let best = merge(vec![candidate(0, 6), candidate(0, 2), candidate(0, 4)]).unwrap();
    assert_eq!(best.program_len(), 2);
}

#[test]
fn test_merge_keeps_first_on_nonzero_tie() {
    let best = merge(vec![candidate(4, 6), candidate(4, 2)]).unwrap();
    assert_eq!(best.program_len(), 6);
}

#[test]
fn test_merge_of_nothing_is_none() {
    assert!(merge(Vec::new()).is_none());
}

#[test]
fn test_single_worker_matches_sequential() {
    let target = [1, 1, 2, 3, 5];
    let cfg = SearchConfig {
        workers: 1,
        ..config(800)
    };
    let sequential = search_sequential(&target, &cfg, 800, &mut worker_rng(77, 0)).unwrap();
    let parallel = search_parallel(&target, &cfg, 77).unwrap();
    assert_eq!(parallel.score, sequential.score);
    assert_eq!(parallel.machine.program(), sequential.machine.program());
    assert_eq!(parallel.machine.output(), sequential.machine.output());
}

#[test]
fn test_parallel_result_is_min_over_workers() {
    let target = [2, 4, 6, 8];
    let cfg = SearchConfig {
        workers: 4,
        ..config(1000)
    };
    let merged = search_parallel(&target, &cfg, 11).unwrap();
    let individual: Vec<u32> = split_depth(cfg.search_depth, 4)
        .into_iter()
        .enumerate()
        .map(|(i, share)| {
            search_sequential(&target, &cfg, share, &mut worker_rng(11, i))
                .unwrap()
                .score
        })
        .collect();
    assert_eq!(Some(&merged.score), individual.iter().min());
}

#[test]
fn test_parallel_search_is_reproducible() {
    let target = [9, 8, 7];
    let cfg = SearchConfig {
        workers: 3,
        ..config(600)
    };
    let a = search_parallel(&target, &cfg, 5).unwrap();
    let b = search_parallel(&target, &cfg, 5).unwrap();
    assert_eq!(a.score, b.score);
    assert_eq!(a.machine.program(), b.machine.program());
}

#[test]
fn test_parallel_with_no_depth_fails() {
    let cfg = SearchConfig {
        workers: 4,
        ..config(0)
    };
    assert!(matches!(
        search_parallel(&[1], &cfg, 1),
        Err(Error::NoCandidateFound)
    ));
}

// -- Prediction --

#[test]
fn test_predict_rejects_empty_target() {
    assert!(matches!(predict(&[], &config(10)), Err(Error::EmptyTarget)));
}

#[test]
fn test_predict_validates_config() {
    let cfg = SearchConfig {
        step_budget: 0,
        ..config(10)
    };
    assert!(matches!(
        predict(&[1], &cfg),
        Err(Error::InvalidConfig { .. })
    ));
}

#[test]
fn test_predict_reports_seed_and_continuation() {
    let cfg = config(200);
    let prediction = predict(&[4, 8], &cfg).unwrap();
    assert_eq!(prediction.seed, 42);
    assert_eq!(prediction.target_len, 2);
    assert!(prediction.continuation().len() <= usize::from(cfg.extra));
    assert_eq!(
        prediction.output().len(),
        prediction.target_len.min(prediction.output().len()) + prediction.continuation().len()
    );
}
