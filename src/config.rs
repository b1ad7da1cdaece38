//! Search configuration: defaults, validation, and a minimal `seqvm.toml`
//! loader.

use std::path::Path;

use crate::error::{Error, Result};
use crate::search::Metric;
use crate::vm::Addressing;

/// Upper bound on concurrent search workers.
pub const MAX_WORKERS: u16 = 256;

/// Every knob the search and extension phases consume.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchConfig {
    /// Steps per roll.
    pub step_budget: u32,
    /// Initial program-length ceiling.
    pub length_limit: u16,
    /// Cells per tape.
    pub tape_length: u16,
    /// Total rolls, summed across workers.
    pub search_depth: u32,
    /// Values to predict past the target.
    pub extra: u16,
    /// Steps allowed while extending the winner.
    pub extend_budget: u32,
    pub workers: u16,
    /// Master seed; drawn from OS entropy when absent.
    pub seed: Option<u64>,
    pub metric: Metric,
    pub addressing: Addressing,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            step_budget: 500,
            length_limit: 100,
            tape_length: 100,
            search_depth: 10_000,
            extra: 10,
            extend_budget: 10_000,
            workers: 1,
            seed: None,
            metric: Metric::Absolute,
            addressing: Addressing::ProgramLength,
        }
    }
}

impl SearchConfig {
    /// Reject zero budgets and out-of-range worker counts.
    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("step_budget", u64::from(self.step_budget)),
            ("length_limit", u64::from(self.length_limit)),
            ("tape_length", u64::from(self.tape_length)),
            ("search_depth", u64::from(self.search_depth)),
            ("extend_budget", u64::from(self.extend_budget)),
            ("workers", u64::from(self.workers)),
        ];
        for (field, value) in positive {
            if value == 0 {
                return Err(Error::config(field, "must be a positive integer"));
            }
        }
        if self.workers > MAX_WORKERS {
            return Err(Error::config(
                "workers",
                format!("at most {} workers are supported", MAX_WORKERS),
            ));
        }
        Ok(())
    }

    /// Load a config file. Keys absent from the file keep their defaults.
    pub fn load(path: &Path) -> Result<SearchConfig> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        let mut config = SearchConfig::default();
        config.apply_toml(&content)?;
        Ok(config)
    }

    /// Apply `key = value` lines from the `[search]` section of a minimal
    /// TOML document.
    pub fn apply_toml(&mut self, content: &str) -> Result<()> {
        let mut section = String::new();
        for (line_no, line) in content.lines().enumerate() {
            let trimmed = line.trim();
            if trimmed.starts_with('#') || trimmed.is_empty() {
                continue;
            }
            if trimmed.starts_with('[') && trimmed.ends_with(']') {
                section = trimmed[1..trimmed.len() - 1].trim().to_string();
                continue;
            }
            let Some((key, value)) = trimmed.split_once('=') else {
                return Err(Error::config(
                    "file",
                    format!("line {}: expected `key = value`", line_no + 1),
                ));
            };
            if section != "search" {
                continue;
            }
            let value = strip_comment(value).trim_matches('"');
            self.set(key.trim(), value)?;
        }
        Ok(())
    }

    /// Set one field from its textual value.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "step_budget" => self.step_budget = parse_int(key, value)?,
            "length_limit" => self.length_limit = parse_int(key, value)?,
            "tape_length" => self.tape_length = parse_int(key, value)?,
            "search_depth" => self.search_depth = parse_int(key, value)?,
            "extra" => self.extra = parse_int(key, value)?,
            "extend_budget" => self.extend_budget = parse_int(key, value)?,
            "workers" => self.workers = parse_int(key, value)?,
            "seed" => self.seed = Some(parse_int(key, value)?),
            "metric" => self.metric = value.parse().map_err(|e| Error::config(key, e))?,
            "addressing" => self.addressing = value.parse().map_err(|e| Error::config(key, e))?,
            _ => return Err(Error::config(key, "unknown key")),
        }
        Ok(())
    }
}

fn strip_comment(value: &str) -> &str {
    value.split_once('#').map_or(value, |(v, _)| v).trim()
}

fn parse_int<T: std::str::FromStr>(key: &str, value: &str) -> Result<T> {
    value
        .parse()
        .map_err(|_| Error::config(key, format!("'{}' is not a valid integer", value)))
}
