//! Synthetic dataset generation: newline-delimited JSON log records.
//!
//! The record count is derived from the configured size target and the
//! assumed bytes-per-record estimate, so the file size is approximate.
//! Sampling runs off a fixed-seed LCG, making the dataset byte-reproducible
//! across runs and hosts.

use anyhow::{Context, Result};
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};

use crate::config::Config;

const LEVELS: [&str; 4] = ["info", "warn", "error", "debug"];
const MESSAGES: [&str; 4] = ["Login successful", "Timeout", "API Request", "Internal Error"];

/// Every record carries the same timestamp; only level, request_id and
/// message vary.
const TIMESTAMP: &str = "2026-02-20T19:30:00Z";

const SEED: u64 = 42;

/// One log record. Field order here is the serialized field order, which
/// keeps the byte layout stable for the raw-pattern reference filter.
#[derive(Serialize)]
struct LogRecord<'a> {
    timestamp: &'a str,
    level: &'a str,
    request_id: u32,
    message: &'a str,
}

/// Deterministic pseudo-random via simple LCG — no external deps needed.
struct Lcg(u64);

impl Lcg {
    fn next(&mut self) -> u32 {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.0 >> 32) as u32
    }

    fn pick<'a>(&mut self, choices: &[&'a str]) -> &'a str {
        choices[self.next() as usize % choices.len()]
    }
}

/// Generate the dataset at `config.data_path` unless it already exists.
///
/// An existing file is reused as-is, whatever its size: the skip is a cache
/// contract, not a size check. I/O failure is fatal to the run.
pub fn generate(config: &Config) -> Result<()> {
    if config.data_path.exists() {
        return Ok(());
    }

    let count = config.record_count();
    eprintln!(
        "--- Generating {}GB of data ({count} records)... ---",
        config.size_gb
    );

    let file = File::create(&config.data_path)
        .with_context(|| format!("failed to create dataset: {}", config.data_path.display()))?;
    let mut out = BufWriter::with_capacity(1 << 20, file);

    let mut rng = Lcg(SEED);
    for _ in 0..count {
        let record = LogRecord {
            timestamp: TIMESTAMP,
            level: rng.pick(&LEVELS),
            request_id: 10_000 + rng.next() % 90_000,
            message: rng.pick(&MESSAGES),
        };
        serde_json::to_writer(&mut out, &record)
            .with_context(|| format!("failed to write record: {}", config.data_path.display()))?;
        out.write_all(b"\n")
            .with_context(|| format!("failed to write record: {}", config.data_path.display()))?;
    }

    out.flush()
        .with_context(|| format!("failed to flush dataset: {}", config.data_path.display()))?;
    Ok(())
}
