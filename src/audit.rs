// 🔏 Audit - fingerprints and restatement exports
//
// fingerprint: SHA-256 over the canonical JSON of a golden record, blind to
// wall-clock fields, so two records built from any permutation of the same
// filings hash the same.
// write_restatements_csv: one row per restatement for review in a sheet.

use crate::error::Result;
use crate::period::PeriodKey;
use crate::record::{EntityId, GoldenRecord, PeriodRecord};
use crate::restatement::{Restatement, RestatementSeverity};
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use std::io::Write;

// ============================================================================
// FINGERPRINT
// ============================================================================

#[derive(Serialize)]
struct CanonicalRecord<'a> {
    entity: &'a EntityId,
    timeline: &'a BTreeMap<PeriodKey, PeriodRecord>,
    restatements: Vec<CanonicalRestatement<'a>>,
}

#[derive(Serialize)]
struct CanonicalRestatement<'a> {
    period: &'a PeriodKey,
    item: &'a str,
    old_value: f64,
    new_value: f64,
    delta_percent: Option<f64>,
    severity: RestatementSeverity,
    old_source: &'a str,
    new_source: &'a str,
}

impl<'a> From<&'a Restatement> for CanonicalRestatement<'a> {
    fn from(r: &'a Restatement) -> Self {
        CanonicalRestatement {
            period: &r.period,
            item: &r.item,
            old_value: r.old_value,
            new_value: r.new_value,
            delta_percent: r.delta_percent,
            severity: r.severity,
            old_source: &r.old_source,
            new_source: &r.new_source,
        }
    }
}

/// Hex SHA-256 of the record's entity, timeline and restatement set.
///
/// `last_updated`, `detected_at` and diagnostics are excluded; restatements
/// are hashed as a set (sorted), not in detection order.
pub fn fingerprint(record: &GoldenRecord) -> Result<String> {
    let mut restatements: Vec<CanonicalRestatement> =
        record.restatements.iter().map(CanonicalRestatement::from).collect();
    restatements.sort_by(|a, b| {
        (a.period, a.item, a.old_source, a.new_source)
            .cmp(&(b.period, b.item, b.old_source, b.new_source))
            .then(a.old_value.total_cmp(&b.old_value))
            .then(a.new_value.total_cmp(&b.new_value))
    });

    let canonical = CanonicalRecord {
        entity: &record.entity,
        timeline: &record.timeline,
        restatements,
    };

    let mut hasher = Sha256::new();
    hasher.update(serde_json::to_vec(&canonical)?);
    Ok(format!("{:x}", hasher.finalize()))
}

// ============================================================================
// CSV EXPORT
// ============================================================================

#[derive(Serialize)]
struct RestatementRow<'a> {
    period: &'a str,
    item: &'a str,
    old_value: f64,
    new_value: f64,
    delta_percent: Option<f64>,
    severity: RestatementSeverity,
    old_source: &'a str,
    new_source: &'a str,
    detected_at: String,
}

/// Write `restatements` as CSV (with header). Returns rows written.
pub fn write_restatements_csv<W: Write>(restatements: &[Restatement], writer: W) -> Result<usize> {
    let mut wtr = csv::Writer::from_writer(writer);

    for r in restatements {
        wtr.serialize(RestatementRow {
            period: r.period.as_str(),
            item: &r.item,
            old_value: r.old_value,
            new_value: r.new_value,
            delta_percent: r.delta_percent,
            severity: r.severity,
            old_source: &r.old_source,
            new_source: &r.new_source,
            detected_at: r.detected_at.to_rfc3339(),
        })?;
    }

    wtr.flush().map_err(csv::Error::from)?;
    Ok(restatements.len())
}

// ============================================================================
// TESTS
// ============================================================================
