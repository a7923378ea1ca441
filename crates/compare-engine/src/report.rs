//! Check results and the aggregated validation report.

use serde::Serialize;
use std::fmt;
use std::time::Duration;

/// Exit status reserved for runs that could not complete. It lies outside
/// the range of check bitmasks.
pub const FATAL_EXIT_CODE: i32 = 32;

/// The five check invocations of a run, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckKind {
    Counts,
    Indexes,
    SampleContent,
    FirstIds,
    LastIds,
}

impl CheckKind {
    pub const ALL: [CheckKind; 5] = [
        CheckKind::Counts,
        CheckKind::Indexes,
        CheckKind::SampleContent,
        CheckKind::FirstIds,
        CheckKind::LastIds,
    ];

    /// Exit status bit set when this check fails.
    pub fn bit(self) -> i32 {
        match self {
            CheckKind::Counts => 1,
            CheckKind::Indexes => 2,
            CheckKind::SampleContent => 4,
            CheckKind::FirstIds => 8,
            CheckKind::LastIds => 16,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            CheckKind::Counts => "document counts",
            CheckKind::Indexes => "index definitions",
            CheckKind::SampleContent => "sampled document content",
            CheckKind::FirstIds => "first _id values",
            CheckKind::LastIds => "last _id values",
        }
    }
}

impl fmt::Display for CheckKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Outcome of one check. Built once by the check and never modified.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CheckResult {
    pub check: CheckKind,
    pub passed: bool,
    /// Human-readable lines explaining a failure.
    pub diagnostics: Vec<String>,
    /// How many items the check looked at (documents, indexes or ids).
    pub examined: u64,
    pub duration: Duration,
}

impl CheckResult {
    pub fn pass(check: CheckKind, examined: u64) -> Self {
        Self {
            check,
            passed: true,
            diagnostics: Vec::new(),
            examined,
            duration: Duration::ZERO,
        }
    }

    pub fn fail(check: CheckKind, examined: u64, diagnostics: Vec<String>) -> Self {
        Self {
            check,
            passed: false,
            diagnostics,
            examined,
            duration: Duration::ZERO,
        }
    }

    /// Pass when `diagnostics` is empty, fail otherwise.
    pub fn from_diagnostics(check: CheckKind, examined: u64, diagnostics: Vec<String>) -> Self {
        if diagnostics.is_empty() {
            Self::pass(check, examined)
        } else {
            Self::fail(check, examined, diagnostics)
        }
    }

    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }
}

/// All check results of one run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ValidationReport {
    pub source: String,
    pub target: String,
    pub results: Vec<CheckResult>,
    pub total_duration: Duration,
}

impl ValidationReport {
    /// Logical AND of every check verdict.
    pub fn passed(&self) -> bool {
        self.results.iter().all(|result| result.passed)
    }

    /// Sum of the bits of every failed check; `0` means full success.
    pub fn exit_code(&self) -> i32 {
        self.results
            .iter()
            .filter(|result| !result.passed)
            .map(|result| result.check.bit())
            .sum()
    }

    pub fn failed_checks(&self) -> Vec<CheckKind> {
        self.results
            .iter()
            .filter(|result| !result.passed)
            .map(|result| result.check)
            .collect()
    }

    pub fn result(&self, check: CheckKind) -> Option<&CheckResult> {
        self.results.iter().find(|result| result.check == check)
    }

    /// The closing line of the text output.
    pub fn summary(&self) -> &'static str {
        if self.passed() {
            "Passed all validation checks"
        } else {
            "Some validation checks failed. See above."
        }
    }
}
