//! Program bundles: a winning program plus what it needs to be replayed.
//!
//! Persisted as rkyv archives. Loading validates the archive and then
//! re-checks the program, so a bundle that decodes is always runnable.

use std::path::Path;

use rkyv::rancor;
use rkyv::util::AlignedVec;
use rkyv::{Archive, Deserialize, Serialize};

use crate::config::SearchConfig;
use crate::error::{Error, Result};
use crate::search::{Metric, Prediction};
use crate::vm::{Addressing, Machine, Program};

/// Bumped whenever the bundle layout changes.
pub const BUNDLE_VERSION: u32 = 1;

#[derive(Archive, Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[rkyv(derive(Debug))]
pub struct ProgramBundle {
    pub version: u32,
    pub program: Program,
    pub tape_length: u16,
    pub addressing: Addressing,
    pub metric: Metric,
    /// Target the program was fitted to.
    pub target: Vec<u16>,
    pub score: u32,
    pub seed: u64,
}

impl ProgramBundle {
    pub fn from_prediction(prediction: &Prediction, target: &[u16], config: &SearchConfig) -> Self {
        Self {
            version: BUNDLE_VERSION,
            program: prediction.machine.program().clone(),
            tape_length: config.tape_length,
            addressing: config.addressing,
            metric: config.metric,
            target: target.to_vec(),
            score: prediction.score,
            seed: prediction.seed,
        }
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let bytes = rkyv::to_bytes::<rancor::Error>(self).map_err(|e| Error::Artifact(e.to_string()))?;
        Ok(bytes.to_vec())
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let mut aligned = AlignedVec::<16>::with_capacity(bytes.len());
        aligned.extend_from_slice(bytes);
        let bundle = rkyv::from_bytes::<ProgramBundle, rancor::Error>(&aligned)
            .map_err(|e| Error::Artifact(e.to_string()))?;
        if bundle.version != BUNDLE_VERSION {
            return Err(Error::Artifact(format!(
                "unsupported bundle version {} (expected {})",
                bundle.version, BUNDLE_VERSION
            )));
        }
        // Archived programs bypass `Program::new`; re-check them.
        if Program::new(bundle.program.instructions().to_vec()).is_none() {
            return Err(Error::Artifact("bundle holds a malformed program".to_string()));
        }
        Ok(bundle)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.to_bytes()?).map_err(|e| Error::io(path, e))
    }

    pub fn load(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path).map_err(|e| Error::io(path, e))?;
        Self::from_bytes(&bytes)
    }

    /// Run the program from a fresh state until it emits `count` values or
    /// `step_budget` steps have run.
    pub fn replay(&self, count: usize, step_budget: u32) -> Machine {
        let mut machine = Machine::new(self.program.clone(), self.tape_length, self.addressing);
        machine.run(step_budget, count);
        machine
    }
}
