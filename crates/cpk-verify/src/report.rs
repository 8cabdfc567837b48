//! Verification report with per-entry outcomes and summary statistics.

use std::fmt;

use cpk_core::CpkDependency;

use crate::error::VerifyFailure;

/// The outcome of verifying a single manifest entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryOutcome {
    Passed,
    Failed(VerifyFailure),
}

/// Summary statistics for a verification run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportSummary {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
}

/// The complete verification report, ordered as the input manifest.
#[derive(Debug, Clone)]
pub struct VerifyReport {
    pub entries: Vec<(CpkDependency, EntryOutcome)>,
    pub summary: ReportSummary,
}

impl VerifyReport {
    pub(crate) fn new(entries: Vec<(CpkDependency, EntryOutcome)>) -> Self {
        let total = entries.len();
        let failed = entries
            .iter()
            .filter(|(_, outcome)| matches!(outcome, EntryOutcome::Failed(_)))
            .count();
        VerifyReport {
            entries,
            summary: ReportSummary {
                total,
                passed: total - failed,
                failed,
            },
        }
    }

    /// All failures, in manifest order.
    pub fn failures(&self) -> impl Iterator<Item = &VerifyFailure> {
        self.entries.iter().filter_map(|(_, outcome)| match outcome {
            EntryOutcome::Failed(failure) => Some(failure),
            EntryOutcome::Passed => None,
        })
    }

    /// Whether every entry passed.
    pub fn passed(&self) -> bool {
        self.summary.failed == 0
    }
}

impl fmt::Display for VerifyReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Dependency Verification Report ===")?;
        writeln!(
            f,
            "Total: {} | Passed: {} | Failed: {}",
            self.summary.total, self.summary.passed, self.summary.failed,
        )?;

        if self.summary.failed > 0 {
            writeln!(f, "--- Failures ---")?;
            for (_, outcome) in &self.entries {
                if let EntryOutcome::Failed(failure) = outcome {
                    writeln!(f, "[FAIL] {failure}")?;
                }
            }
        }
        Ok(())
    }
}
