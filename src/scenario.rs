//! Scenario construction: one named shell command per (tool, mode) pairing.

use crate::config::Config;

/// A named, fully-formed shell command under test. The name is the
/// scenario's identity; two scenarios may run the same binary in different
/// modes.
#[derive(Debug, Clone)]
pub struct Scenario {
    pub name: String,
    pub command: String,
}

/// The fixed command set for one predicate over one dataset: the primary
/// candidate in both modes, the raw-pattern reference, and the
/// structure-aware referee.
#[derive(Debug)]
pub struct CommandSet {
    /// Primary tool reading the dataset via a path argument.
    pub primary_file: String,
    /// Primary tool reading the dataset from stdin behind a cat stage.
    pub primary_pipe: String,
    /// Raw substring match over the serialized records. Counts can drift
    /// from a structure-aware filter on formatting differences alone.
    pub raw_reference: String,
    pub raw_reference_pipe: String,
    /// Structure-aware referee, used as the tie-breaker.
    pub referee: String,
    pub referee_pipe: String,
}

impl CommandSet {
    pub fn new(config: &Config) -> Self {
        let path = config.data_path.display();
        let bin = &config.tool_bin;
        let (key, val) = (&config.key, &config.val);
        // The raw pattern mirrors the generator's exact byte layout
        // (compact serialization, no space after the colon).
        let pattern = format!(r#""{key}":"{val}""#);

        CommandSet {
            primary_file: format!("{bin} --file '{path}' --key {key} --val {val}"),
            primary_pipe: format!("cat '{path}' | {bin} --key {key} --val {val}"),
            raw_reference: format!("grep '{pattern}' '{path}'"),
            raw_reference_pipe: format!("cat '{path}' | grep '{pattern}'"),
            referee: format!(r#"jq -c 'select(.{key} == "{val}")' '{path}'"#),
            referee_pipe: format!(r#"cat '{path}' | jq -c 'select(.{key} == "{val}")'"#),
        }
    }

    /// Scenarios to benchmark, in execution order. The referee pair is
    /// opt-in and only included when the referee is actually present.
    pub fn bench_scenarios(&self, config: &Config, jq_available: bool) -> Vec<Scenario> {
        let tool = config.tool_name();
        let mut scenarios = vec![
            Scenario {
                name: format!("{tool} (file)"),
                command: self.primary_file.clone(),
            },
            Scenario {
                name: format!("{tool} (pipe)"),
                command: self.primary_pipe.clone(),
            },
            Scenario {
                name: "grep (file)".to_string(),
                command: self.raw_reference.clone(),
            },
            Scenario {
                name: "grep (pipe)".to_string(),
                command: self.raw_reference_pipe.clone(),
            },
        ];
        if config.bench_jq && jq_available {
            scenarios.push(Scenario {
                name: "jq (file)".to_string(),
                command: self.referee.clone(),
            });
            scenarios.push(Scenario {
                name: "jq (pipe)".to_string(),
                command: self.referee_pipe.clone(),
            });
        }
        scenarios
    }
}
