//! Timed benchmark loop: warmup, one measured run, throughput.
//!
//! Scenarios run strictly in sequence so every measurement sees an
//! uncontended CPU and disk. The warmup run primes OS file caches; its
//! outcome and timing are both discarded.

use anyhow::Result;
use std::time::{Duration, Instant};

use crate::exec::Execute;
use crate::scenario::Scenario;

/// A completed measurement for one scenario.
#[derive(Debug, Clone, PartialEq)]
pub struct BenchResult {
    pub name: String,
    pub duration: Duration,
    /// Gigabytes per second over the configured dataset size.
    pub throughput: f64,
}

/// One scenario's benchmark: a timing, or the execution error that
/// replaced it.
#[derive(Debug)]
pub struct BenchOutcome {
    pub name: String,
    pub result: Result<BenchResult>,
}

/// Run every scenario: one unmeasured warmup, then one measured run.
/// A failing measured run records an error outcome for that scenario and
/// the loop continues.
pub fn run<E: Execute>(exec: &E, scenarios: &[Scenario], size_gb: f64) -> Vec<BenchOutcome> {
    let mut outcomes = Vec::with_capacity(scenarios.len());

    for scenario in scenarios {
        eprintln!("Benchmarking {}...", scenario.name);

        // Warmup failures are not interesting on their own: the measured
        // run hits the same command and reports the real error.
        let _ = exec.run_discard(&scenario.command);

        let start = Instant::now();
        let result = exec.run_discard(&scenario.command).map(|()| {
            let duration = start.elapsed();
            BenchResult {
                name: scenario.name.clone(),
                duration,
                throughput: throughput(size_gb, duration),
            }
        });

        outcomes.push(BenchOutcome {
            name: scenario.name.clone(),
            result,
        });
    }

    outcomes
}

/// Dataset size in gigabytes over elapsed wall-clock seconds.
pub fn throughput(size_gb: f64, duration: Duration) -> f64 {
    size_gb / duration.as_secs_f64()
}
