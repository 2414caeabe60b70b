// 🏆 Golden Record - the authoritative multi-period view of one entity
//
// Derived and recomputable: re-stitching the same snapshots yields the same
// record. Restatements are append-only; nothing removes or rewrites them.

use crate::diagnostics::Diagnostics;
use crate::period::PeriodKey;
use crate::projection::{PeriodStatements, Reported};
use crate::restatement::Restatement;
use crate::snapshot::SourceMetadata;
use crate::statement::FieldPath;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

// ============================================================================
// ENTITY
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityId {
    pub ticker: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cik: Option<String>,
}

impl EntityId {
    pub fn new(ticker: impl Into<String>) -> Self {
        EntityId {
            ticker: ticker.into(),
            cik: None,
        }
    }

    pub fn with_cik(mut self, cik: impl Into<String>) -> Self {
        self.cik = Some(cik.into());
        self
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.cik {
            Some(cik) => write!(f, "{} (CIK {})", self.ticker, cik),
            None => f.write_str(&self.ticker),
        }
    }
}

// ============================================================================
// PERIOD RECORD
// ============================================================================

/// Authoritative slice of one period, sourced from exactly one filing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodRecord {
    pub period: PeriodKey,
    pub statements: PeriodStatements,
    pub source: SourceMetadata,

    /// Share of canonical fields present, in [0, 1]
    pub completeness: f64,
}

impl PeriodRecord {
    /// Value at `path`; Absent when the item is missing or undisclosed.
    pub fn value(&self, path: &FieldPath) -> Reported {
        self.statements
            .get(path)
            .map(|line| line.value)
            .unwrap_or_default()
    }
}

// ============================================================================
// GOLDEN RECORD
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoldenRecord {
    pub entity: EntityId,
    pub last_updated: DateTime<Utc>,
    pub timeline: BTreeMap<PeriodKey, PeriodRecord>,

    /// Append-only audit log, in detection order
    #[serde(default)]
    pub restatements: Vec<Restatement>,

    #[serde(default)]
    pub diagnostics: Diagnostics,
}

impl GoldenRecord {
    pub fn new(entity: EntityId) -> Self {
        GoldenRecord {
            entity,
            last_updated: Utc::now(),
            timeline: BTreeMap::new(),
            restatements: Vec::new(),
            diagnostics: Diagnostics::default(),
        }
    }

    pub fn period(&self, period: &PeriodKey) -> Option<&PeriodRecord> {
        self.timeline.get(period)
    }

    /// Period keys, ascending.
    pub fn periods(&self) -> impl Iterator<Item = &PeriodKey> {
        self.timeline.keys()
    }

    pub fn latest_period(&self) -> Option<&PeriodRecord> {
        self.timeline.values().next_back()
    }

    pub fn value(&self, period: &PeriodKey, path: &FieldPath) -> Reported {
        self.period(period)
            .map(|record| record.value(path))
            .unwrap_or_default()
    }

    /// Restatements logged for `period`, oldest first.
    pub fn restatements_for<'a>(&'a self, period: &PeriodKey) -> impl Iterator<Item = &'a Restatement> + 'a {
        let period = period.clone();
        self.restatements.iter().filter(move |r| r.period == period)
    }

    pub fn summary(&self) -> String {
        let span = match (self.timeline.keys().next(), self.timeline.keys().next_back()) {
            (Some(first), Some(last)) => format!("{}..{}", first, last),
            _ => "empty".to_string(),
        };
        format!(
            "{}: {} periods ({}), {} restatements, {}",
            self.entity,
            self.timeline.len(),
            span,
            self.restatements.len(),
            self.diagnostics.summary()
        )
    }
}

// ============================================================================
// MERGE SUMMARY
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeSummary {
    /// Snapshots that contributed at least a discovery pass
    pub snapshots_applied: usize,

    /// Malformed snapshots
    pub snapshots_skipped: usize,

    pub periods_installed: usize,
    pub periods_retained: usize,
    pub restatements_logged: usize,
}

impl MergeSummary {
    pub fn summary(&self) -> String {
        format!(
            "{} snapshots applied, {} skipped | {} periods installed, {} retained | {} restatements",
            self.snapshots_applied,
            self.snapshots_skipped,
            self.periods_installed,
            self.periods_retained,
            self.restatements_logged
        )
    }
}

// ============================================================================
// TESTS
// ============================================================================
