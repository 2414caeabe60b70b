// 📝 Restatement Detector - log every value a dominant filing changes
//
// Compares the outgoing and incoming slice of one period on the configured
// comparison items. Purely additive: a restatement never blocks or reverses
// an installation, however large it is.

use crate::config::ComparisonItem;
use crate::diagnostics::Finding;
use crate::period::PeriodKey;
use crate::projection::PeriodStatements;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ============================================================================
// RESTATEMENT
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RestatementSeverity {
    Routine,
    /// Large or undefined delta; wants a human look
    Significant,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Restatement {
    pub period: PeriodKey,
    pub item: String,
    pub old_value: f64,
    pub new_value: f64,

    /// `(new - old) / old * 100`; None when old is zero
    pub delta_percent: Option<f64>,

    pub severity: RestatementSeverity,
    pub detected_at: DateTime<Utc>,

    /// Document ids
    pub old_source: String,
    pub new_source: String,
}

impl Restatement {
    pub fn is_significant(&self) -> bool {
        self.severity == RestatementSeverity::Significant
    }

    pub fn summary(&self) -> String {
        let delta = match self.delta_percent {
            Some(d) => format!("{:+.2}%", d),
            None => "undefined".to_string(),
        };
        format!(
            "{} {}: {} -> {} ({}) [{} -> {}]",
            self.period, self.item, self.old_value, self.new_value, delta, self.old_source, self.new_source
        )
    }
}

// ============================================================================
// DETECTOR
// ============================================================================

pub struct RestatementDetector<'a> {
    items: &'a [ComparisonItem],

    /// Fraction, e.g. 0.5 for 50%
    significance_threshold: f64,
}

/// Result of comparing two slices of one period.
#[derive(Debug, Default)]
pub struct Detection {
    pub restatements: Vec<Restatement>,
    pub findings: Vec<Finding>,
}

/// Which slice is being replaced, and by which filing.
pub struct Replacement<'a> {
    pub period: &'a PeriodKey,
    pub old: &'a PeriodStatements,
    pub old_source: &'a str,
    pub new: &'a PeriodStatements,
    pub new_source: &'a str,
}

impl<'a> RestatementDetector<'a> {
    pub fn new(items: &'a [ComparisonItem], significance_threshold: f64) -> Self {
        RestatementDetector {
            items,
            significance_threshold,
        }
    }

    pub fn detect(&self, change: &Replacement<'_>, detected_at: DateTime<Utc>) -> Detection {
        let mut detection = Detection::default();

        for item in self.items {
            let old = change.old.get(&item.field).and_then(|l| l.value.as_option());
            let new = change.new.get(&item.field).and_then(|l| l.value.as_option());

            let (Some(old_value), Some(new_value)) = (old, new) else {
                continue;
            };
            if old_value == 0.0 && new_value == 0.0 {
                continue;
            }
            if old_value == new_value {
                continue;
            }

            let delta_percent = delta_percent(old_value, new_value);
            let severity = self.classify(delta_percent);

            if delta_percent.is_none() {
                detection.findings.push(Finding::UndefinedDelta {
                    period: change.period.clone(),
                    item: item.name.clone(),
                    old_value,
                    new_value,
                    document_id: change.new_source.to_string(),
                });
            }

            detection.restatements.push(Restatement {
                period: change.period.clone(),
                item: item.name.clone(),
                old_value,
                new_value,
                delta_percent,
                severity,
                detected_at,
                old_source: change.old_source.to_string(),
                new_source: change.new_source.to_string(),
            });
        }

        detection
    }

    fn classify(&self, delta_percent: Option<f64>) -> RestatementSeverity {
        match delta_percent {
            Some(d) if d.abs() < self.significance_threshold * 100.0 => RestatementSeverity::Routine,
            _ => RestatementSeverity::Significant,
        }
    }
}

fn delta_percent(old: f64, new: f64) -> Option<f64> {
    if old == 0.0 {
        None
    } else {
        Some((new - old) / old * 100.0)
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projection::{ProjectedLine, Reported};
    use crate::schema::fields;
    use crate::statement::FieldPath;

    fn items() -> Vec<ComparisonItem> {
        vec![
            ComparisonItem::new("Revenue", fields::revenue()),
            ComparisonItem::new("TotalAssets", fields::total_assets()),
        ]
    }

    fn slice(values: &[(FieldPath, Reported)]) -> PeriodStatements {
        let mut out = PeriodStatements::new();
        for (path, value) in values {
            out.set(
                path,
                ProjectedLine {
                    value: *value,
                    ..Default::default()
                },
            );
        }
        out
    }

    fn detect(old: &PeriodStatements, new: &PeriodStatements) -> Detection {
        let items = items();
        let detector = RestatementDetector::new(&items, 0.5);
        let period = PeriodKey::from(2022);
        detector.detect(
            &Replacement {
                period: &period,
                old,
                old_source: "A",
                new,
                new_source: "B",
            },
            Utc::now(),
        )
    }

    #[test]
    fn test_revenue_restated() {
        let old = slice(&[(fields::revenue(), Reported::Present(50.0))]);
        let new = slice(&[(fields::revenue(), Reported::Present(52.0))]);

        let detection = detect(&old, &new);

        assert_eq!(detection.restatements.len(), 1);
        let r = &detection.restatements[0];
        assert_eq!(r.item, "Revenue");
        assert_eq!(r.old_value, 50.0);
        assert_eq!(r.new_value, 52.0);
        assert!((r.delta_percent.unwrap() - 4.0).abs() < 1e-9);
        assert_eq!(r.severity, RestatementSeverity::Routine);
        assert_eq!((r.old_source.as_str(), r.new_source.as_str()), ("A", "B"));
        assert!(detection.findings.is_empty());
    }

    #[test]
    fn test_absent_side_and_equal_values_are_skipped() {
        let old = slice(&[
            (fields::revenue(), Reported::Present(50.0)),
            (fields::total_assets(), Reported::Present(10.0)),
        ]);
        let new = slice(&[
            (fields::revenue(), Reported::Absent),
            (fields::total_assets(), Reported::Present(10.0)),
        ]);

        assert!(detect(&old, &new).restatements.is_empty());
    }

    #[test]
    fn test_both_zero_is_skipped() {
        let old = slice(&[(fields::revenue(), Reported::Present(0.0))]);
        let new = slice(&[(fields::revenue(), Reported::Present(0.0))]);

        assert!(detect(&old, &new).restatements.is_empty());
    }

    #[test]
    fn test_from_zero_is_undefined_and_flagged() {
        let old = slice(&[(fields::revenue(), Reported::Present(0.0))]);
        let new = slice(&[(fields::revenue(), Reported::Present(10.0))]);

        let detection = detect(&old, &new);

        assert_eq!(detection.restatements[0].delta_percent, None);
        assert!(detection.restatements[0].is_significant());
        assert!(matches!(detection.findings[0], Finding::UndefinedDelta { .. }));
    }

    #[test]
    fn test_large_delta_is_significant() {
        let old = slice(&[(fields::total_assets(), Reported::Present(100.0))]);
        let new = slice(&[(fields::total_assets(), Reported::Present(40.0))]);

        let detection = detect(&old, &new);
        assert_eq!(detection.restatements[0].severity, RestatementSeverity::Significant);
        assert!(detection.restatements[0].summary().contains("-60.00%"));
    }

    #[test]
    fn test_threshold_boundary_is_significant() {
        let severity = |old: f64, new: f64| {
            let old = slice(&[(fields::revenue(), Reported::Present(old))]);
            let new = slice(&[(fields::revenue(), Reported::Present(new))]);
            detect(&old, &new).restatements[0].severity
        };

        // exactly 50% either way
        assert_eq!(severity(100.0, 150.0), RestatementSeverity::Significant);
        assert_eq!(severity(100.0, 50.0), RestatementSeverity::Significant);

        assert_eq!(severity(100.0, 149.0), RestatementSeverity::Routine);
        assert_eq!(severity(100.0, 51.0), RestatementSeverity::Routine);
    }
}
