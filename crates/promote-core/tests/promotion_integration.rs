//! Integration tests for the promotion orchestrator with the in-memory
//! storage fake.

use std::sync::Arc;

use promote_core::fakes::MemoryStorageClient;
use promote_core::{
    ComponentMappingEntry, MappingTable, PromotionConfig, PromotionOrchestrator, PromotionStatus,
};

const BUCKET: &str = "cdn-main";
const SLOTMACHINE_KEY: &str =
    "dev/krembo/krembo_componentsV2/game_type/slotmachine/slotmachine.22.min.js";

fn sample_table() -> MappingTable {
    MappingTable::new(vec![
        ComponentMappingEntry {
            component_key: "KP-Core".to_string(),
            path_format: "/krembo/krembo_components/krembo_core/krembo.{version}.min.js"
                .to_string(),
        },
        ComponentMappingEntry {
            component_key: "KP-SlotMachine-V2".to_string(),
            path_format:
                "/krembo/krembo_componentsV2/game_type/slotmachine/slotmachine.{0}.min.js"
                    .to_string(),
        },
        ComponentMappingEntry {
            component_key: "KP-BookOfPiggyBank".to_string(),
            path_format: "/krembo/krembo_components/game_type/bopb/bopb.{0}.min.js".to_string(),
        },
        ComponentMappingEntry {
            component_key: "KP-BookOfPiggyBank-V2".to_string(),
            path_format: "/krembo/krembo_componentsV2/game_type/bopb/bopb.{0}.min.js".to_string(),
        },
    ])
    .expect("valid sample table")
}

fn config(dry_run: bool) -> PromotionConfig {
    PromotionConfig {
        bucket: BUCKET.to_string(),
        source_prefix: "dev".to_string(),
        destination_prefix: "stage".to_string(),
        dry_run,
    }
}

/// Scenario 1: full resolve-check-copy round for a versioned identifier.
#[tokio::test]
async fn test_promotes_slotmachine_component() {
    let client = Arc::new(MemoryStorageClient::new());
    client.put_object(BUCKET, SLOTMACHINE_KEY);

    let report = PromotionOrchestrator::run(
        client.clone(),
        &config(false),
        &sample_table(),
        &["KP-SlotMachine-V2-22".to_string()],
    )
    .await;

    assert!(report.success());
    let outcome = &report.outcomes[0];
    assert_eq!(outcome.status, PromotionStatus::Copied);
    assert_eq!(outcome.source_key.as_deref(), Some(SLOTMACHINE_KEY));
    assert_eq!(
        outcome.destination_key.as_deref(),
        Some("stage/krembo/krembo_componentsV2/game_type/slotmachine/slotmachine.22.min.js")
    );
    assert!(client.contains(
        BUCKET,
        "stage/krembo/krembo_componentsV2/game_type/slotmachine/slotmachine.22.min.js"
    ));
}

/// Scenario 2: absent source yields not_found and no copy call.
#[tokio::test]
async fn test_missing_source_is_not_found() {
    let client = Arc::new(MemoryStorageClient::new());

    let report = PromotionOrchestrator::run(
        client.clone(),
        &config(false),
        &sample_table(),
        &["KP-SlotMachine-V2-22".to_string()],
    )
    .await;

    assert!(!report.success());
    assert_eq!(report.outcomes[0].status, PromotionStatus::NotFound);
    assert!(client.copy_calls().is_empty());
}

/// Scenario 3: dry-run still checks existence but never copies.
#[tokio::test]
async fn test_dry_run_checks_but_never_copies() {
    let client = Arc::new(MemoryStorageClient::new());
    client.put_object(BUCKET, SLOTMACHINE_KEY);

    let report = PromotionOrchestrator::run(
        client.clone(),
        &config(true),
        &sample_table(),
        &["KP-SlotMachine-V2-22".to_string()],
    )
    .await;

    assert!(report.success());
    assert_eq!(report.outcomes[0].status, PromotionStatus::SkippedDryRun);
    assert_eq!(client.exists_calls(), vec![SLOTMACHINE_KEY.to_string()]);
    assert!(client.copy_calls().is_empty());
    assert!(!client.contains(
        BUCKET,
        "stage/krembo/krembo_componentsV2/game_type/slotmachine/slotmachine.22.min.js"
    ));
}

/// Scenario 4: identifier matching no mapping entry.
#[tokio::test]
async fn test_unknown_component_is_unmatched() {
    let client = Arc::new(MemoryStorageClient::new());

    let report = PromotionOrchestrator::run(
        client.clone(),
        &config(false),
        &sample_table(),
        &["ZZ-Unknown-1".to_string()],
    )
    .await;

    assert_eq!(report.outcomes[0].status, PromotionStatus::Unmatched);
    assert!(client.exists_calls().is_empty());
}

/// The longer V2 key wins for a V2 base name; the plain key keeps winning
/// for the plain base name.
#[tokio::test]
async fn test_most_specific_mapping_entry_wins() {
    let client = Arc::new(MemoryStorageClient::new());
    client.put_object(BUCKET, "dev/krembo/krembo_componentsV2/game_type/bopb/bopb.7.min.js");
    client.put_object(BUCKET, "dev/krembo/krembo_components/game_type/bopb/bopb.3.min.js");

    let report = PromotionOrchestrator::run(
        client.clone(),
        &config(false),
        &sample_table(),
        &[
            "KP-BookOfPiggyBank-V2-7".to_string(),
            "KP-BookOfPiggyBank-3".to_string(),
        ],
    )
    .await;

    assert!(report.success());
    assert_eq!(
        report.outcomes[0].source_key.as_deref(),
        Some("dev/krembo/krembo_componentsV2/game_type/bopb/bopb.7.min.js")
    );
    assert_eq!(
        report.outcomes[1].source_key.as_deref(),
        Some("dev/krembo/krembo_components/game_type/bopb/bopb.3.min.js")
    );
}

/// One outcome per input, input order preserved, no short-circuit on
/// mixed failures.
#[tokio::test]
async fn test_batch_preserves_order_and_length() {
    let client = Arc::new(MemoryStorageClient::new());
    client.put_object(BUCKET, SLOTMACHINE_KEY);
    client.put_object(BUCKET, "dev/krembo/krembo_components/krembo_core/krembo.19.min.js");

    let identifiers = vec![
        "KP-SlotMachine-V2-22".to_string(), // copied
        "ZZ-Unknown-1".to_string(),         // unmatched
        "KP-Core".to_string(),              // invalid identifier
        "KP-Core-19".to_string(),           // copied
        "KP-Core-99".to_string(),           // not found
    ];

    let report = PromotionOrchestrator::run(
        client.clone(),
        &config(false),
        &sample_table(),
        &identifiers,
    )
    .await;

    assert_eq!(report.outcomes.len(), identifiers.len());
    for (outcome, identifier) in report.outcomes.iter().zip(&identifiers) {
        assert_eq!(&outcome.identifier, identifier);
    }

    let statuses: Vec<_> = report.outcomes.iter().map(|o| o.status).collect();
    assert_eq!(
        statuses,
        vec![
            PromotionStatus::Copied,
            PromotionStatus::Unmatched,
            PromotionStatus::InvalidIdentifier,
            PromotionStatus::Copied,
            PromotionStatus::NotFound,
        ]
    );

    let summary = report.summary();
    assert_eq!(summary.total, 5);
    assert_eq!(summary.copied, 2);
    assert_eq!(summary.failed(), 3);
    assert!(!report.success());
}

/// A gateway copy failure marks the item copy_failed with the error in
/// detail, and the batch continues.
#[tokio::test]
async fn test_copy_failure_does_not_abort_batch() {
    let client = Arc::new(MemoryStorageClient::new());
    client.put_object(BUCKET, SLOTMACHINE_KEY);
    client.put_object(BUCKET, "dev/krembo/krembo_components/krembo_core/krembo.19.min.js");
    client.fail_copies();

    let report = PromotionOrchestrator::run(
        client.clone(),
        &config(false),
        &sample_table(),
        &["KP-SlotMachine-V2-22".to_string(), "KP-Core-19".to_string()],
    )
    .await;

    assert_eq!(report.outcomes.len(), 2);
    for outcome in &report.outcomes {
        assert_eq!(outcome.status, PromotionStatus::CopyFailed);
        assert!(outcome.detail.as_deref().unwrap().contains("access denied"));
    }
    assert_eq!(client.copy_calls().len(), 2);
}

/// Dry-run is idempotent: two identical runs produce identical outcome
/// lists and leave storage untouched.
#[tokio::test]
async fn test_dry_run_is_idempotent() {
    let client = Arc::new(MemoryStorageClient::new());
    client.put_object(BUCKET, SLOTMACHINE_KEY);

    let identifiers = vec![
        "KP-SlotMachine-V2-22".to_string(),
        "ZZ-Unknown-1".to_string(),
        "KP-Core-19".to_string(),
    ];

    let first = PromotionOrchestrator::run(
        client.clone(),
        &config(true),
        &sample_table(),
        &identifiers,
    )
    .await;
    let second = PromotionOrchestrator::run(
        client.clone(),
        &config(true),
        &sample_table(),
        &identifiers,
    )
    .await;

    assert_eq!(first.outcomes, second.outcomes);
    assert!(client.copy_calls().is_empty());
}
