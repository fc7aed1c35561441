//! Integrity verification: establish that the primary tool's result set is
//! trustworthy before timing it.
//!
//! The tie-break policy: unequal counts between two modes of the *same*
//! tool are always a hard failure; unequal counts between *different*
//! implementations only become one when a second structure-aware referee
//! also disagrees. A raw-pattern reference routinely over- or under-counts
//! against structured records, so on its own it can never fail the run.

use anyhow::Result;

use crate::exec::Execute;
use crate::scenario::CommandSet;

/// File-mode count vs pipe-mode count of the primary tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeCheck {
    Consistent { count: u64 },
    /// The same tool disagreed with itself across invocation modes. Always
    /// a hard failure.
    Inconsistent { file: u64, pipe: u64 },
}

impl ModeCheck {
    pub fn diff(&self) -> u64 {
        match *self {
            ModeCheck::Consistent { .. } => 0,
            ModeCheck::Inconsistent { file, pipe } => file.abs_diff(pipe),
        }
    }
}

/// Primary count vs the reference implementations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefCheck {
    /// Raw-pattern reference agreed exactly.
    RawAgreed { count: u64 },
    /// Raw reference disagreed on text, but the structure-aware referee
    /// confirmed the primary count. Semantically equal.
    RefereeConfirmed { primary: u64, raw: u64 },
    /// Two structure-aware implementations disagree. Hard failure.
    RefereeDisputed { primary: u64, referee: u64 },
    /// Raw mismatch with no referee on the host: an advisory, not a
    /// verdict.
    Unresolved { primary: u64, raw: u64 },
}

impl RefCheck {
    pub fn diff(&self) -> u64 {
        match *self {
            RefCheck::RawAgreed { .. } => 0,
            RefCheck::RefereeConfirmed { primary, raw } => primary.abs_diff(raw),
            RefCheck::RefereeDisputed { primary, referee } => primary.abs_diff(referee),
            RefCheck::Unresolved { primary, raw } => primary.abs_diff(raw),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VerifyReport {
    pub modes: ModeCheck,
    pub reference: RefCheck,
}

impl VerifyReport {
    /// True when a mismatch was proven, as opposed to advisory or resolved.
    pub fn hard_failure(&self) -> bool {
        matches!(self.modes, ModeCheck::Inconsistent { .. })
            || matches!(self.reference, RefCheck::RefereeDisputed { .. })
    }
}

/// Run the full integrity check. Execution errors (a command that fails to
/// start or exits non-zero) propagate to the caller; the caller reports
/// them and moves on to benchmarking.
pub fn verify<E: Execute>(exec: &E, commands: &CommandSet, tool: &str) -> Result<VerifyReport> {
    eprintln!("Counting results: {tool} (file)...");
    let file_count = exec.count_lines(&commands.primary_file)?;

    eprintln!("Counting results: {tool} (pipe)...");
    let pipe_count = exec.count_lines(&commands.primary_pipe)?;

    eprintln!("Counting results: grep...");
    let raw_count = exec.count_lines(&commands.raw_reference)?;

    let modes = if file_count == pipe_count {
        ModeCheck::Consistent { count: file_count }
    } else {
        ModeCheck::Inconsistent {
            file: file_count,
            pipe: pipe_count,
        }
    };

    let reference = if file_count == raw_count {
        RefCheck::RawAgreed { count: raw_count }
    } else if exec.is_available("jq") {
        eprintln!("Verifying with jq (whitespace-agnostic)...");
        let referee_count = exec.count_lines(&commands.referee)?;
        if referee_count == file_count {
            RefCheck::RefereeConfirmed {
                primary: file_count,
                raw: raw_count,
            }
        } else {
            RefCheck::RefereeDisputed {
                primary: file_count,
                referee: referee_count,
            }
        }
    } else {
        RefCheck::Unresolved {
            primary: file_count,
            raw: raw_count,
        }
    };

    Ok(VerifyReport { modes, reference })
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::bail;
    use std::collections::HashMap;

    /// Mock executor: fixed count per command string, plus a jq-availability
    /// switch.
    struct Mock {
        counts: HashMap<String, u64>,
        jq: bool,
    }

    impl Execute for Mock {
        fn count_lines(&self, command: &str) -> Result<u64> {
            match self.counts.get(command) {
                Some(&n) => Ok(n),
                None => bail!("command exited with exit status: 1: {command}"),
            }
        }

        fn run_discard(&self, _command: &str) -> Result<()> {
            Ok(())
        }

        fn is_available(&self, tool: &str) -> bool {
            tool == "jq" && self.jq
        }
    }

    fn commands() -> CommandSet {
        CommandSet {
            primary_file: "primary-file".to_string(),
            primary_pipe: "primary-pipe".to_string(),
            raw_reference: "raw".to_string(),
            raw_reference_pipe: "raw-pipe".to_string(),
            referee: "referee".to_string(),
            referee_pipe: "referee-pipe".to_string(),
        }
    }

    fn mock(entries: &[(&str, u64)], jq: bool) -> Mock {
        Mock {
            counts: entries
                .iter()
                .map(|&(k, v)| (k.to_string(), v))
                .collect(),
            jq,
        }
    }

    #[test]
    fn all_counts_agree() {
        let exec = mock(
            &[("primary-file", 100), ("primary-pipe", 100), ("raw", 100)],
            true,
        );
        let report = verify(&exec, &commands(), "zog").unwrap();
        assert_eq!(report.modes, ModeCheck::Consistent { count: 100 });
        assert_eq!(report.reference, RefCheck::RawAgreed { count: 100 });
        assert!(!report.hard_failure());
    }

    #[test]
    fn mode_divergence_is_a_hard_failure_with_diff() {
        let exec = mock(
            &[("primary-file", 105), ("primary-pipe", 98), ("raw", 105)],
            true,
        );
        let report = verify(&exec, &commands(), "zog").unwrap();
        assert_eq!(report.modes, ModeCheck::Inconsistent { file: 105, pipe: 98 });
        assert_eq!(report.modes.diff(), 7);
        assert!(report.hard_failure());
    }

    #[test]
    fn raw_mismatch_resolved_by_referee() {
        let exec = mock(
            &[
                ("primary-file", 100),
                ("primary-pipe", 100),
                ("raw", 99),
                ("referee", 100),
            ],
            true,
        );
        let report = verify(&exec, &commands(), "zog").unwrap();
        assert_eq!(
            report.reference,
            RefCheck::RefereeConfirmed { primary: 100, raw: 99 }
        );
        assert!(!report.hard_failure());
    }

    #[test]
    fn referee_disagreement_is_a_hard_failure() {
        let exec = mock(
            &[
                ("primary-file", 100),
                ("primary-pipe", 100),
                ("raw", 99),
                ("referee", 97),
            ],
            true,
        );
        let report = verify(&exec, &commands(), "zog").unwrap();
        assert_eq!(
            report.reference,
            RefCheck::RefereeDisputed { primary: 100, referee: 97 }
        );
        assert_eq!(report.reference.diff(), 3);
        assert!(report.hard_failure());
    }

    #[test]
    fn raw_mismatch_without_referee_is_advisory() {
        let exec = mock(
            &[("primary-file", 100), ("primary-pipe", 100), ("raw", 99)],
            false,
        );
        let report = verify(&exec, &commands(), "zog").unwrap();
        assert_eq!(
            report.reference,
            RefCheck::Unresolved { primary: 100, raw: 99 }
        );
        assert!(!report.hard_failure());
    }

    #[test]
    fn execution_error_propagates() {
        // primary-pipe missing from the mock -> execution error
        let exec = mock(&[("primary-file", 100), ("raw", 100)], true);
        let err = verify(&exec, &commands(), "zog").unwrap_err();
        assert!(err.to_string().contains("primary-pipe"));
    }

    #[test]
    fn zero_matches_everywhere_still_passes() {
        let exec = mock(
            &[("primary-file", 0), ("primary-pipe", 0), ("raw", 0)],
            false,
        );
        let report = verify(&exec, &commands(), "zog").unwrap();
        assert_eq!(report.modes, ModeCheck::Consistent { count: 0 });
        assert!(!report.hard_failure());
    }
}
