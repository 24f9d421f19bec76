//! Batch promotion orchestration.

use std::sync::Arc;
use std::time::Instant;

use tracing::{error, info};

use crate::config::PromotionConfig;
use crate::error::PromoteError;
use crate::mapping::MappingTable;
use crate::report::{BatchReport, PromotionOutcome, PromotionStatus};
use crate::resolve;
use crate::storage::StorageClient;

/// Drives the per-component pipeline: resolve, check existence, then
/// copy or skip. One outcome per input identifier, in input order.
pub struct PromotionOrchestrator;

impl PromotionOrchestrator {
    /// Run a full promotion batch.
    ///
    /// Per-item failures become terminal outcome statuses; the batch
    /// never short-circuits. The caller decides the process exit status
    /// from [`BatchReport::success`].
    pub async fn run(
        client: Arc<dyn StorageClient>,
        config: &PromotionConfig,
        table: &MappingTable,
        identifiers: &[String],
    ) -> BatchReport {
        let start = Instant::now();
        let total = identifiers.len();
        let mut outcomes = Vec::with_capacity(total);

        info!(
            bucket = %config.bucket,
            source_prefix = %config.source_prefix,
            destination_prefix = %config.destination_prefix,
            dry_run = config.dry_run,
            components = total,
            "Starting promotion batch"
        );

        for (index, identifier) in identifiers.iter().enumerate() {
            info!(
                identifier = %identifier,
                progress = format!("{}/{}", index + 1, total),
                "Processing component"
            );
            let outcome = Self::promote_one(client.as_ref(), config, table, identifier).await;
            if outcome.status.is_success() {
                info!(identifier = %identifier, status = %outcome.status, "Component done");
            } else {
                error!(
                    identifier = %identifier,
                    status = %outcome.status,
                    detail = outcome.detail.as_deref().unwrap_or(""),
                    "Component failed"
                );
            }
            outcomes.push(outcome);
        }

        let report = BatchReport {
            outcomes,
            duration_ms: start.elapsed().as_millis() as u64,
        };

        let summary = report.summary();
        info!(
            total = summary.total,
            succeeded = summary.succeeded(),
            failed = summary.failed(),
            "Promotion batch finished"
        );

        report
    }

    /// Run the state machine for a single identifier to its terminal
    /// outcome. Never returns an error; failures are encoded in the
    /// outcome status.
    async fn promote_one(
        client: &dyn StorageClient,
        config: &PromotionConfig,
        table: &MappingTable,
        identifier: &str,
    ) -> PromotionOutcome {
        let resolved = match resolve::resolve(
            identifier,
            table,
            &config.source_prefix,
            &config.destination_prefix,
        ) {
            Ok(resolved) => resolved,
            Err(err) => {
                let status = match err {
                    PromoteError::InvalidIdentifier { .. } => PromotionStatus::InvalidIdentifier,
                    PromoteError::NoMatch { .. } => PromotionStatus::Unmatched,
                    // Residual resolution defects (templates are validated
                    // at load time) still fail only this item.
                    _ => PromotionStatus::CopyFailed,
                };
                return PromotionOutcome {
                    identifier: identifier.to_string(),
                    status,
                    source_key: None,
                    destination_key: None,
                    detail: Some(err.to_string()),
                };
            }
        };

        info!(
            identifier = %identifier,
            version = %resolved.version,
            source_key = %resolved.source_key,
            destination_key = %resolved.destination_key,
            "Resolved component"
        );

        let outcome = |status: PromotionStatus, detail: Option<String>| PromotionOutcome {
            identifier: identifier.to_string(),
            status,
            source_key: Some(resolved.source_key.clone()),
            destination_key: Some(resolved.destination_key.clone()),
            detail,
        };

        // Existence check runs in dry-run mode too; only the copy is
        // suppressed.
        match client.exists(&config.bucket, &resolved.source_key).await {
            Ok(true) => {}
            Ok(false) => {
                return outcome(
                    PromotionStatus::NotFound,
                    Some(format!("source object absent: {}", resolved.source_key)),
                );
            }
            Err(err) => {
                return outcome(
                    PromotionStatus::CopyFailed,
                    Some(format!("existence check failed: {}", err)),
                );
            }
        }

        if config.dry_run {
            info!(
                identifier = %identifier,
                source_key = %resolved.source_key,
                destination_key = %resolved.destination_key,
                "[dry-run] would copy"
            );
            return outcome(PromotionStatus::SkippedDryRun, None);
        }

        match client
            .copy(&config.bucket, &resolved.source_key, &resolved.destination_key)
            .await
        {
            Ok(()) => outcome(PromotionStatus::Copied, None),
            Err(err) => outcome(PromotionStatus::CopyFailed, Some(err.to_string())),
        }
    }
}
