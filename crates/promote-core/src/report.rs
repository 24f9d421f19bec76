//! Per-item promotion outcomes and the batch report.

use serde::{Deserialize, Serialize};

/// Terminal state of a single component promotion.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum PromotionStatus {
    /// Source existed and was copied to the destination.
    Copied,

    /// Dry-run: source existed, copy deliberately suppressed.
    SkippedDryRun,

    /// Source object absent at check time.
    NotFound,

    /// Base name matched no mapping entry.
    Unmatched,

    /// No extractable trailing version in the identifier.
    InvalidIdentifier,

    /// The storage gateway's check or copy call failed.
    CopyFailed,
}

impl PromotionStatus {
    /// Whether this status counts as success for the overall run.
    pub fn is_success(&self) -> bool {
        matches!(self, PromotionStatus::Copied | PromotionStatus::SkippedDryRun)
    }

    /// Stable snake_case name, matching the serde representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            PromotionStatus::Copied => "copied",
            PromotionStatus::SkippedDryRun => "skipped_dry_run",
            PromotionStatus::NotFound => "not_found",
            PromotionStatus::Unmatched => "unmatched",
            PromotionStatus::InvalidIdentifier => "invalid_identifier",
            PromotionStatus::CopyFailed => "copy_failed",
        }
    }
}

impl std::fmt::Display for PromotionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Outcome of one input identifier. The keys are present once resolution
/// succeeded; `detail` carries the underlying error for failed items.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PromotionOutcome {
    /// The raw input identifier.
    pub identifier: String,

    /// Terminal status.
    pub status: PromotionStatus,

    /// Resolved source object key (absent when resolution failed).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_key: Option<String>,

    /// Resolved destination object key (absent when resolution failed).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination_key: Option<String>,

    /// Diagnostic message for failed items.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

/// Summary counts by status.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct BatchSummary {
    pub total: usize,
    pub copied: usize,
    pub skipped_dry_run: usize,
    pub not_found: usize,
    pub unmatched: usize,
    pub invalid_identifier: usize,
    pub copy_failed: usize,
}

impl BatchSummary {
    /// Number of items whose status counts as success.
    pub fn succeeded(&self) -> usize {
        self.copied + self.skipped_dry_run
    }

    /// Number of items whose status counts as failure.
    pub fn failed(&self) -> usize {
        self.total - self.succeeded()
    }
}

/// Result of a complete promotion batch, one outcome per input
/// identifier, in input order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BatchReport {
    /// Per-item outcomes, in input order.
    pub outcomes: Vec<PromotionOutcome>,

    /// Total duration in milliseconds.
    pub duration_ms: u64,
}

impl BatchReport {
    /// Whether every item ended in a success status.
    pub fn success(&self) -> bool {
        self.outcomes.iter().all(|o| o.status.is_success())
    }

    /// Number of outcomes with the given status.
    pub fn count(&self, status: PromotionStatus) -> usize {
        self.outcomes.iter().filter(|o| o.status == status).count()
    }

    /// Aggregate counts by status.
    pub fn summary(&self) -> BatchSummary {
        BatchSummary {
            total: self.outcomes.len(),
            copied: self.count(PromotionStatus::Copied),
            skipped_dry_run: self.count(PromotionStatus::SkippedDryRun),
            not_found: self.count(PromotionStatus::NotFound),
            unmatched: self.count(PromotionStatus::Unmatched),
            invalid_identifier: self.count(PromotionStatus::InvalidIdentifier),
            copy_failed: self.count(PromotionStatus::CopyFailed),
        }
    }
}
