// 🤐 Zipper Engine - fold filings into one golden record per entity
//
// For each snapshot, oldest filing first:
//   discover periods -> compare sources -> project -> detect restatements
//   -> install (with completeness)
// then validate the accounting identity over the whole timeline.
//
// Synchronous and single-threaded. Different entities can be stitched in
// parallel; merges into the same record must be serialized by the caller.

use crate::completeness::completeness;
use crate::config::SynthesisConfig;
use crate::diagnostics::Finding;
use crate::discovery::discover_periods;
use crate::dominance;
use crate::error::{Result, SynthesisError};
use crate::identity;
use crate::period::PeriodKey;
use crate::projection::project;
use crate::record::{EntityId, GoldenRecord, MergeSummary, PeriodRecord};
use crate::restatement::{Replacement, RestatementDetector};
use crate::schema::StatementSchema;
use crate::snapshot::{Snapshot, StatementPayload};
use chrono::{DateTime, NaiveDate, Utc};
use tracing::{debug, info, warn};

// ============================================================================
// ENGINE
// ============================================================================

pub struct ZipperEngine {
    config: SynthesisConfig,
    schema: StatementSchema,
}

impl ZipperEngine {
    /// Create engine with default config and the standard schema
    pub fn new() -> Self {
        ZipperEngine {
            config: SynthesisConfig::default(),
            schema: StatementSchema::standard(),
        }
    }

    pub fn with_config(config: SynthesisConfig) -> Result<Self> {
        config.validate()?;
        Ok(ZipperEngine {
            config,
            schema: StatementSchema::standard(),
        })
    }

    pub fn config(&self) -> &SynthesisConfig {
        &self.config
    }

    pub fn schema(&self) -> &StatementSchema {
        &self.schema
    }

    /// Build a fresh golden record from `snapshots`, in any order.
    pub fn stitch(&self, entity: EntityId, snapshots: &[Snapshot]) -> Result<GoldenRecord> {
        if snapshots.is_empty() {
            return Err(SynthesisError::EmptyInput {
                ticker: entity.ticker,
            });
        }

        info!(entity = %entity, snapshots = snapshots.len(), "stitching golden record");

        let mut record = GoldenRecord::new(entity);
        self.merge_snapshots(&mut record, snapshots)?;

        info!(
            entity = %record.entity,
            periods = record.timeline.len(),
            restatements = record.restatements.len(),
            identity_violations = record.diagnostics.identity_violations.len(),
            "stitch complete"
        );

        Ok(record)
    }

    /// Fold newly arrived snapshots into an existing record.
    ///
    /// Dominance is judged against the record as it stands, so a batch of
    /// older filings cannot displace newer sources installed earlier.
    pub fn merge_snapshots(&self, record: &mut GoldenRecord, snapshots: &[Snapshot]) -> Result<MergeSummary> {
        info!(
            entity = %record.entity,
            snapshots = snapshots.len(),
            existing_periods = record.timeline.len(),
            "merging snapshots"
        );

        let detected_at = Utc::now();
        let mut summary = MergeSummary::default();
        let mut previous: Option<&Snapshot> = None;

        for snapshot in chronological(snapshots) {
            if let Some(prev) = previous {
                ensure_ascending(prev, snapshot)?;
            }
            previous = Some(snapshot);

            let Some(payload) = snapshot.usable_payload() else {
                let reason = malformed_reason(snapshot);
                warn!(document_id = snapshot.document_id(), reason, "skipping malformed snapshot");
                record.diagnostics.warnings.push(Finding::MalformedSnapshot {
                    document_id: snapshot.document_id().to_string(),
                    reason: reason.to_string(),
                });
                summary.snapshots_skipped += 1;
                continue;
            };

            summary.snapshots_applied += 1;
            self.apply(record, snapshot, payload, detected_at, &mut summary);
        }

        self.revalidate(record);
        record.last_updated = Utc::now();

        info!(entity = %record.entity, "{}", summary.summary());
        Ok(summary)
    }

    // ========================================================================
    // FOLD STEP
    // ========================================================================

    fn apply(
        &self,
        record: &mut GoldenRecord,
        snapshot: &Snapshot,
        payload: &StatementPayload,
        detected_at: DateTime<Utc>,
        summary: &mut MergeSummary,
    ) {
        for period in discover_periods(snapshot, &self.config.anchor_fields) {
            let verdict = record
                .timeline
                .get(&period)
                .map(|existing| dominance::compare(&existing.source, &snapshot.source));

            if let Some(verdict) = verdict.filter(|v| !v.supersedes()) {
                debug!(
                    period = %period,
                    document_id = snapshot.document_id(),
                    verdict = %verdict,
                    "retaining existing source"
                );
                summary.periods_retained += 1;
                continue;
            }

            let incoming = self.project_period(snapshot, payload, &period);

            if let Some(outgoing) = record.timeline.get(&period) {
                let detector = RestatementDetector::new(
                    &self.config.comparison_items,
                    self.config.significance_threshold,
                );
                let detection = detector.detect(
                    &Replacement {
                        period: &period,
                        old: &outgoing.statements,
                        old_source: &outgoing.source.document_id,
                        new: &incoming.statements,
                        new_source: snapshot.document_id(),
                    },
                    detected_at,
                );

                for finding in &detection.findings {
                    warn!("{}", finding.message());
                }
                for restatement in detection.restatements.iter().filter(|r| r.is_significant()) {
                    warn!("significant restatement: {}", restatement.summary());
                }

                summary.restatements_logged += detection.restatements.len();
                record.restatements.extend(detection.restatements);
                record.diagnostics.warnings.extend(detection.findings);
            }

            let reason = verdict.map_or_else(|| "first source".to_string(), |v| v.to_string());
            debug!(
                period = %period,
                document_id = snapshot.document_id(),
                verdict = %reason,
                completeness = incoming.completeness,
                "installing period"
            );
            summary.periods_installed += 1;
            record.timeline.insert(period, incoming);
        }
    }

    fn project_period(&self, snapshot: &Snapshot, payload: &StatementPayload, period: &PeriodKey) -> PeriodRecord {
        let statements = project(payload, period, &self.schema);
        let completeness = completeness(&statements, &self.config.completeness_fields);

        PeriodRecord {
            period: period.clone(),
            statements,
            source: snapshot.source.clone(),
            completeness,
        }
    }

    fn revalidate(&self, record: &mut GoldenRecord) {
        let violations = identity::validate(record, &self.config);
        for violation in &violations {
            warn!("identity violation: {}", violation.summary());
        }
        record.diagnostics.identity_violations = violations;
    }
}

impl Default for ZipperEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Position of a snapshot in the fold.
fn fold_key(snapshot: &Snapshot) -> (&NaiveDate, &str) {
    (&snapshot.source.filing_date, snapshot.document_id())
}

/// Snapshots by filing date, then document id; stable for exact ties.
fn chronological(snapshots: &[Snapshot]) -> Vec<&Snapshot> {
    let mut ordered: Vec<&Snapshot> = snapshots.iter().collect();
    ordered.sort_by(|a, b| fold_key(a).cmp(&fold_key(b)));
    ordered
}

/// Guard for the fold: a snapshot may never precede the one folded before it.
fn ensure_ascending(previous: &Snapshot, next: &Snapshot) -> Result<()> {
    if fold_key(next) < fold_key(previous) {
        return Err(SynthesisError::out_of_order(fold_key(previous), fold_key(next)));
    }
    Ok(())
}

fn malformed_reason(snapshot: &Snapshot) -> &'static str {
    match &snapshot.payload {
        None => "payload missing",
        Some(payload) if payload.is_empty() => "payload has no line items",
        Some(_) => "payload has no line item with a value",
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::Finding;
    use crate::projection::Reported;
    use crate::restatement::RestatementSeverity;
    use crate::schema::fields;
    use crate::snapshot::{LineValue, SourceMetadata};

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn filing(id: &str, filed: &str, form: &str, primary: i32, revenue: &[(i32, f64)]) -> Snapshot {
        let mut line = LineValue::new("Revenue");
        for (year, value) in revenue {
            line = line.with_period(*year, *value);
        }
        let mut payload = StatementPayload::new();
        payload.set(&fields::revenue(), line);
        Snapshot::new(SourceMetadata::new(id, date(filed), form), primary, payload)
    }

    fn revenue(record: &GoldenRecord, year: i32) -> Reported {
        record.value(&PeriodKey::from(year), &fields::revenue())
    }

    #[test]
    fn test_empty_input_fails() {
        let err = ZipperEngine::new().stitch(EntityId::new("ACME"), &[]).unwrap_err();
        assert!(matches!(err, SynthesisError::EmptyInput { ref ticker } if ticker == "ACME"));
    }

    #[test]
    fn test_with_config_validates() {
        assert!(ZipperEngine::with_config(SynthesisConfig::new().with_tolerance(-1.0)).is_err());

        let engine = ZipperEngine::with_config(SynthesisConfig::new().with_tolerance(0.05)).unwrap();
        assert_eq!(engine.config().identity_tolerance, 0.05);
    }

    #[test]
    fn test_later_filing_restates_overlap() {
        let a = filing("A", "2024-02-28", "10-K", 2023, &[(2023, 100.0), (2022, 50.0)]);
        let b = filing("B", "2025-02-28", "10-K", 2024, &[(2024, 120.0), (2023, 100.0), (2022, 52.0)]);

        let record = ZipperEngine::new().stitch(EntityId::new("ACME"), &[b, a]).unwrap();

        assert_eq!(record.timeline.len(), 3);
        assert_eq!(revenue(&record, 2022), Reported::Present(52.0));
        assert_eq!(record.period(&PeriodKey::from(2023)).unwrap().source.document_id, "B");

        // 2023 moved to B but the value did not change
        assert_eq!(record.restatements.len(), 1);
        let r = &record.restatements[0];
        assert_eq!(r.period, PeriodKey::from(2022));
        assert_eq!(r.item, "Revenue");
        assert!((r.delta_percent.unwrap() - 4.0).abs() < 1e-9);
        assert_eq!(r.severity, RestatementSeverity::Routine);
    }

    #[test]
    fn test_merge_summary_counts() {
        let a = filing("A", "2024-02-28", "10-K", 2023, &[(2023, 100.0), (2022, 50.0)]);
        let engine = ZipperEngine::new();
        let mut record = engine.stitch(EntityId::new("ACME"), &[a.clone()]).unwrap();

        let b = filing("B", "2025-02-28", "10-K", 2024, &[(2024, 120.0), (2023, 101.0)]);
        let summary = engine.merge_snapshots(&mut record, &[b, a]).unwrap();

        // A again: both periods retained (B installs 2023 after A is retained)
        assert_eq!(summary.snapshots_applied, 2);
        assert_eq!(summary.periods_retained, 2);
        assert_eq!(summary.periods_installed, 2);
        assert_eq!(summary.restatements_logged, 1);
        assert_eq!(revenue(&record, 2022), Reported::Present(50.0));
        assert_eq!(revenue(&record, 2023), Reported::Present(101.0));
    }

    #[test]
    fn test_merge_same_snapshot_twice_is_noop() {
        let a = filing("A", "2024-02-28", "10-K", 2023, &[(2023, 100.0), (2022, 50.0)]);
        let engine = ZipperEngine::new();
        let mut record = engine.stitch(EntityId::new("ACME"), &[a.clone()]).unwrap();
        let before = record.timeline.clone();

        let summary = engine.merge_snapshots(&mut record, &[a]).unwrap();

        assert_eq!(summary.periods_installed, 0);
        assert_eq!(record.timeline, before);
        assert!(record.restatements.is_empty());
    }

    #[test]
    fn test_malformed_snapshot_is_skipped() {
        let good = filing("A", "2024-02-28", "10-K", 2023, &[(2023, 100.0)]);
        let empty = Snapshot::new(
            SourceMetadata::new("EMPTY", date("2025-01-01"), "10-K"),
            2024,
            StatementPayload::new(),
        );
        let missing = Snapshot {
            source: SourceMetadata::new("MISSING", date("2025-02-01"), "10-K"),
            primary_period: PeriodKey::from(2024),
            payload: None,
        };

        let record = ZipperEngine::new()
            .stitch(EntityId::new("ACME"), &[good, empty, missing])
            .unwrap();

        assert_eq!(record.periods().collect::<Vec<_>>(), vec![&PeriodKey::from(2023)]);
        assert_eq!(record.diagnostics.warnings.len(), 2);
        assert!(record
            .diagnostics
            .warnings
            .iter()
            .all(|w| matches!(w, Finding::MalformedSnapshot { .. })));
    }

    #[test]
    fn test_restatement_from_zero_is_flagged() {
        let a = filing("A", "2024-02-28", "10-K", 2023, &[(2023, 0.0)]);
        let b = filing("B", "2025-02-28", "10-K", 2024, &[(2024, 5.0), (2023, 10.0)]);

        let record = ZipperEngine::new().stitch(EntityId::new("ACME"), &[a, b]).unwrap();

        assert_eq!(record.restatements[0].delta_percent, None);
        assert!(record.restatements[0].is_significant());
        assert!(matches!(
            record.diagnostics.warnings[0],
            Finding::UndefinedDelta { ref document_id, .. } if document_id == "B"
        ));
    }

    #[test]
    fn test_completeness_recorded_per_period() {
        let a = filing("A", "2024-02-28", "10-K", 2023, &[(2023, 100.0)]);
        let record = ZipperEngine::new().stitch(EntityId::new("ACME"), &[a]).unwrap();

        // revenue only, out of five canonical fields
        assert!((record.period(&PeriodKey::from(2023)).unwrap().completeness - 0.2).abs() < 1e-9);
    }

    #[test]
    fn test_chronological_breaks_date_ties_by_document_id() {
        let b = filing("B", "2024-02-28", "10-K", 2023, &[(2023, 1.0)]);
        let a = filing("A", "2024-02-28", "10-K", 2023, &[(2023, 2.0)]);
        let snapshots = vec![b, a];

        let ids: Vec<&str> = chronological(&snapshots).iter().map(|s| s.document_id()).collect();
        assert_eq!(ids, vec!["A", "B"]);
    }

    #[test]
    fn test_hollow_snapshot_reports_reason() {
        let hollow = filing("HOLLOW", "2024-03-15", "10-K", 2023, &[]);
        assert!(hollow.usable_payload().is_none());
        assert_eq!(malformed_reason(&hollow), "payload has no line item with a value");

        let empty = Snapshot::new(
            SourceMetadata::new("EMPTY", date("2024-03-15"), "10-K"),
            2023,
            StatementPayload::new(),
        );
        assert_eq!(malformed_reason(&empty), "payload has no line items");
    }

    #[test]
    fn test_ensure_ascending() {
        let early = filing("A", "2024-02-28", "10-K", 2023, &[(2023, 1.0)]);
        let same_day = filing("B", "2024-02-28", "10-K", 2023, &[(2023, 1.0)]);
        let late = filing("C", "2025-02-28", "10-K", 2024, &[(2024, 1.0)]);

        assert!(ensure_ascending(&early, &late).is_ok());
        assert!(ensure_ascending(&early, &same_day).is_ok());
        assert!(ensure_ascending(&early, &early).is_ok());

        let err = ensure_ascending(&late, &early).unwrap_err();
        assert!(matches!(err, SynthesisError::OutOfOrder { .. }));
        assert!(err.to_string().contains("C (2025-02-28)"));
        assert!(err.to_string().contains("A (2024-02-28)"));

        // date ties fall back to document id
        assert!(ensure_ascending(&same_day, &early).is_err());
    }
}
