//! promote-core - component promotion between S3 environment prefixes
//!
//! Provides the resolution and orchestration core:
//! - Extracts trailing version numbers from component identifiers
//! - Matches base names against a mapping table (longest prefix wins)
//! - Expands path templates into concrete source/destination object keys
//! - Drives the per-component check-then-copy sequence with dry-run support
//!
//! Storage access goes through the narrow [`StorageClient`] trait; an
//! in-memory fake is provided in the `fakes` module for tests.

pub mod config;
pub mod error;
pub mod fakes;
pub mod identifier;
pub mod mapping;
pub mod orchestrator;
pub mod report;
pub mod resolve;
pub mod storage;
pub mod telemetry;

// Re-export key types
pub use config::{load_identifier_file, load_mapping_file, PromotionConfig};
pub use error::{PromoteError, Result};
pub use mapping::{ComponentMappingEntry, MappingTable};
pub use orchestrator::PromotionOrchestrator;
pub use report::{BatchReport, BatchSummary, PromotionOutcome, PromotionStatus};
pub use resolve::ResolvedComponent;
pub use storage::{StorageClient, StorageError, StorageResult};
