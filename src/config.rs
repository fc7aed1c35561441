//! Harness configuration, threaded explicitly through every component.

use std::path::PathBuf;

/// All knobs for one harness invocation. Built from the CLI in `main`,
/// passed by reference everywhere else so components stay testable with
/// temporary paths and mock commands.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path of the newline-delimited JSON dataset.
    pub data_path: PathBuf,
    /// Target dataset size in gigabytes. The generated file is approximate:
    /// the record count is derived from `bytes_per_record`, not measured.
    pub size_gb: f64,
    /// Assumed average serialized record size, including the trailing
    /// newline. An estimate by design, not a measurement.
    pub bytes_per_record: u64,
    /// Path of the primary candidate filter binary.
    pub tool_bin: String,
    /// Predicate field name.
    pub key: String,
    /// Predicate field value.
    pub val: String,
    /// Also benchmark the structure-aware referee when it is on `$PATH`.
    pub bench_jq: bool,
}

impl Config {
    pub fn target_bytes(&self) -> u64 {
        (self.size_gb * 1024.0 * 1024.0 * 1024.0) as u64
    }

    /// Number of records to generate: `floor(target_bytes / bytes_per_record)`.
    pub fn record_count(&self) -> u64 {
        self.target_bytes() / self.bytes_per_record
    }

    /// Display name of the primary tool, derived from its binary path.
    pub fn tool_name(&self) -> &str {
        std::path::Path::new(&self.tool_bin)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or(&self.tool_bin)
    }
}
