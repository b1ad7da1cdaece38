//! Per-worker random streams.
//!
//! Every worker owns its own generator for its whole run. Worker 0 uses
//! the master seed directly, so a one-worker search replays the
//! sequential search exactly. Other workers hash the master seed with
//! their index.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Generator type used by every search worker.
pub type WorkerRng = ChaCha8Rng;

const WORKER_SEED_DOMAIN: &[u8] = b"seqvm.worker-seed.v1";

/// Seed of worker `index` under `master`.
pub fn derive_worker_seed(master: u64, index: usize) -> u64 {
    if index == 0 {
        return master;
    }
    let mut hasher = blake3::Hasher::new();
    hasher.update(WORKER_SEED_DOMAIN);
    hasher.update(&master.to_le_bytes());
    hasher.update(&(index as u64).to_le_bytes());
    let digest = hasher.finalize();
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&digest.as_bytes()[..8]);
    u64::from_le_bytes(bytes)
}

pub fn worker_rng(master: u64, index: usize) -> WorkerRng {
    WorkerRng::seed_from_u64(derive_worker_seed(master, index))
}

/// A fresh master seed from OS entropy.
pub fn entropy_seed() -> u64 {
    rand::random()
}
