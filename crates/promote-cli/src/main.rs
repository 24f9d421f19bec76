//! s3promote - promote versioned component artifacts between environment
//! prefixes of a single S3 bucket.
//!
//! Reads a mapping table and a component identifier list from JSON files,
//! resolves each identifier to concrete object keys, and copies the
//! artifacts server-side from the source prefix to the destination
//! prefix. `--dry-run` performs every check but suppresses the copies.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info, Level};

use promote_core::{
    load_identifier_file, load_mapping_file, telemetry, BatchReport, PromotionConfig,
    PromotionOrchestrator, StorageClient,
};
use promote_s3::S3StorageClient;

#[derive(Parser)]
#[command(name = "s3promote")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Promote component artifacts between S3 environment prefixes", long_about = None)]
struct Cli {
    /// S3 bucket name
    #[arg(long)]
    bucket: String,

    /// Path to the component mappings JSON file
    #[arg(long, default_value = "config/components_mapping.json")]
    mapping_file: PathBuf,

    /// Path to the component identifiers JSON file
    #[arg(long, default_value = "config/components_to_replace.json")]
    components_file: PathBuf,

    /// Comma-separated component identifiers (overrides --components-file)
    #[arg(long)]
    components: Option<String>,

    /// AWS region (default: auto-detect from the bucket)
    #[arg(long)]
    region: Option<String>,

    /// AWS profile name (default: provider chain)
    #[arg(long)]
    profile: Option<String>,

    /// Source path prefix (e.g. dev, stage, prd)
    #[arg(long, default_value = "dev")]
    source_prefix: String,

    /// Destination path prefix (e.g. stage, prd)
    #[arg(long, default_value = "stage")]
    destination_prefix: String,

    /// Validate and show what would be done without copying
    #[arg(long)]
    dry_run: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Emit JSON-formatted log lines
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    telemetry::init_tracing(cli.json, level);

    // Configuration load errors are fatal and surface before any AWS call.
    let table = load_mapping_file(&cli.mapping_file).with_context(|| {
        format!(
            "Failed to load mapping file: {}",
            cli.mapping_file.display()
        )
    })?;
    info!(entries = table.len(), mapping_file = %cli.mapping_file.display(), "Loaded component mappings");

    let identifiers = match &cli.components {
        Some(inline) => {
            let identifiers: Vec<String> = inline
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect();
            anyhow::ensure!(
                !identifiers.is_empty(),
                "--components was given but contains no identifiers"
            );
            info!(components = identifiers.len(), "Using components from command line");
            identifiers
        }
        None => load_identifier_file(&cli.components_file).with_context(|| {
            format!(
                "Failed to load components file: {}",
                cli.components_file.display()
            )
        })?,
    };
    info!(components = identifiers.len(), "Components to process");

    let client = build_client(&cli).await;

    let config = PromotionConfig {
        bucket: cli.bucket.clone(),
        source_prefix: cli.source_prefix.clone(),
        destination_prefix: cli.destination_prefix.clone(),
        dry_run: cli.dry_run,
    };

    if cli.dry_run {
        info!("DRY RUN MODE - no changes will be made to S3");
    }

    let report = PromotionOrchestrator::run(client, &config, &table, &identifiers).await;
    render_report(&report, cli.dry_run);

    if !report.success() {
        std::process::exit(1);
    }
    Ok(())
}

/// Build the S3 client, auto-detecting the bucket region when the caller
/// did not pin one. Detection runs against an initial default-region
/// client which is replaced when the bucket lives elsewhere.
async fn build_client(cli: &Cli) -> Arc<dyn StorageClient> {
    if let Some(region) = &cli.region {
        info!(region = %region, "Using AWS region (user-specified)");
        return Arc::new(S3StorageClient::from_env(cli.profile.as_deref(), Some(region.clone())).await);
    }

    let initial =
        S3StorageClient::from_env(cli.profile.as_deref(), Some("us-east-1".to_string())).await;
    match initial.detect_region(&cli.bucket).await {
        Ok(region) if region != "us-east-1" => {
            info!(region = %region, "Recreating S3 client with detected region");
            Arc::new(S3StorageClient::from_env(cli.profile.as_deref(), Some(region)).await)
        }
        Ok(region) => {
            info!(region = %region, "Using AWS region");
            Arc::new(initial)
        }
        Err(err) => {
            error!(error = %err, "Could not detect bucket region, defaulting to us-east-1");
            Arc::new(initial)
        }
    }
}

/// Log every outcome plus the summary block, enumerating successful and
/// failed identifiers.
fn render_report(report: &BatchReport, dry_run: bool) {
    for outcome in &report.outcomes {
        if outcome.status.is_success() {
            info!(
                identifier = %outcome.identifier,
                status = %outcome.status,
                source_key = outcome.source_key.as_deref().unwrap_or("-"),
                destination_key = outcome.destination_key.as_deref().unwrap_or("-"),
                "outcome"
            );
        } else {
            error!(
                identifier = %outcome.identifier,
                status = %outcome.status,
                source_key = outcome.source_key.as_deref().unwrap_or("-"),
                destination_key = outcome.destination_key.as_deref().unwrap_or("-"),
                detail = outcome.detail.as_deref().unwrap_or(""),
                "outcome"
            );
        }
    }

    let summary = report.summary();
    info!(
        total = summary.total,
        succeeded = summary.succeeded(),
        failed = summary.failed(),
        not_found = summary.not_found,
        unmatched = summary.unmatched,
        invalid_identifier = summary.invalid_identifier,
        copy_failed = summary.copy_failed,
        duration_ms = report.duration_ms,
        dry_run,
        "Summary"
    );

    let succeeded: Vec<&str> = report
        .outcomes
        .iter()
        .filter(|o| o.status.is_success())
        .map(|o| o.identifier.as_str())
        .collect();
    if !succeeded.is_empty() {
        info!(components = ?succeeded, "Successfully processed");
    }

    let failed: Vec<&str> = report
        .outcomes
        .iter()
        .filter(|o| !o.status.is_success())
        .map(|o| o.identifier.as_str())
        .collect();
    if !failed.is_empty() {
        error!(components = ?failed, "Failed components");
    }

    if dry_run {
        info!("To perform the copy operations, run again without --dry-run");
    }
}
