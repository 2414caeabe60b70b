// Filing Synthesis - Core Library
// Folds per-filing statement snapshots into one golden record per entity

pub mod error;
pub mod period;       // Period keys
pub mod statement;    // Generic statement tree + field paths
pub mod schema;       // Canonical sections and line items
pub mod snapshot;     // Per-filing input (immutable)
pub mod projection;   // Period Projector
pub mod discovery;    // Period Discovery
pub mod dominance;    // Dominance Comparator
pub mod restatement;  // Restatement Detector
pub mod completeness; // Completeness Scorer
pub mod identity;     // Identity Validator
pub mod diagnostics;  // Non-fatal findings
pub mod config;       // Engine settings
pub mod record;       // Golden record + period records
pub mod engine;       // Zipper: stitch / merge_snapshots
pub mod audit;        // Fingerprint + restatement CSV

// Re-export commonly used types
pub use error::{Result, SynthesisError};
pub use period::PeriodKey;
pub use statement::{
    AdditionalItem, FieldPath, Section, Statement, StatementKind, Statements,
};
pub use schema::{fields, StatementSchema};
pub use snapshot::{
    load_snapshots, LineValue, Snapshot, SourceMetadata, StatementPayload,
};
pub use projection::{project, PeriodStatements, ProjectedLine, Reported};
pub use discovery::discover_periods;
pub use dominance::{compare, dominant, Verdict};
pub use restatement::{Restatement, RestatementDetector, RestatementSeverity};
pub use completeness::completeness;
pub use identity::{IdentityCheck, IdentityValidator, IdentityViolation};
pub use diagnostics::{Diagnostics, Finding, Severity};
pub use config::{ComparisonItem, IdentityFields, SynthesisConfig};
pub use record::{EntityId, GoldenRecord, MergeSummary, PeriodRecord};
pub use engine::ZipperEngine;
pub use audit::{fingerprint, write_restatements_csv};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
