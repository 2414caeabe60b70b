// ⚖️ Identity Validator - Assets = Liabilities + Equity, per period
//
// Following the formula:
//   |assets - (liabilities + equity)| <= tolerance * |assets|
//
// Advisory only. A violation is a data-quality signal for whoever reads
// the golden record; the merge that produced it has already succeeded.

use crate::config::{IdentityFields, SynthesisConfig};
use crate::diagnostics::Severity;
use crate::period::PeriodKey;
use crate::record::{GoldenRecord, PeriodRecord};
use crate::statement::FieldPath;
use serde::{Deserialize, Serialize};

// ============================================================================
// CHECK RESULT
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdentityViolation {
    pub period: PeriodKey,
    pub total_assets: f64,
    pub total_liabilities: f64,
    pub total_equity: f64,

    /// assets - (liabilities + equity)
    pub difference: f64,

    /// Relative tolerance the check used
    pub tolerance: f64,

    /// Document the period is sourced from
    pub source_document: String,
}

impl IdentityViolation {
    /// A broken identity means the record itself may be wrong.
    pub fn severity(&self) -> Severity {
        Severity::Critical
    }

    pub fn summary(&self) -> String {
        format!(
            "{}: assets {:.2} != liabilities {:.2} + equity {:.2} (off by {:.2}, tolerance {:.1}%) [{}]",
            self.period,
            self.total_assets,
            self.total_liabilities,
            self.total_equity,
            self.difference,
            self.tolerance * 100.0,
            self.source_document
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum IdentityCheck {
    /// Identity holds within tolerance
    Balanced,

    /// Identity broken beyond tolerance
    Violation(IdentityViolation),

    /// At least one of the three totals is absent
    Incomplete,
}

impl IdentityCheck {
    pub fn is_balanced(&self) -> bool {
        matches!(self, IdentityCheck::Balanced)
    }
}

// ============================================================================
// VALIDATOR
// ============================================================================

pub struct IdentityValidator<'a> {
    /// Relative tolerance (default: 1%)
    tolerance: f64,
    fields: &'a IdentityFields,
}

impl<'a> IdentityValidator<'a> {
    pub fn new(tolerance: f64, fields: &'a IdentityFields) -> Self {
        IdentityValidator { tolerance, fields }
    }

    pub fn from_config(config: &'a SynthesisConfig) -> Self {
        Self::new(config.identity_tolerance, &config.identity_fields)
    }

    pub fn check(&self, record: &PeriodRecord) -> IdentityCheck {
        let value = |path: &FieldPath| record.value(path).as_option();

        let (Some(assets), Some(liabilities), Some(equity)) = (
            value(&self.fields.assets),
            value(&self.fields.liabilities),
            value(&self.fields.equity),
        ) else {
            return IdentityCheck::Incomplete;
        };

        let difference = assets - (liabilities + equity);

        if difference.abs() <= self.tolerance * assets.abs() {
            IdentityCheck::Balanced
        } else {
            IdentityCheck::Violation(IdentityViolation {
                period: record.period.clone(),
                total_assets: assets,
                total_liabilities: liabilities,
                total_equity: equity,
                difference,
                tolerance: self.tolerance,
                source_document: record.source.document_id.clone(),
            })
        }
    }

    /// Violations across the whole timeline, in period order.
    pub fn validate(&self, record: &GoldenRecord) -> Vec<IdentityViolation> {
        record
            .timeline
            .values()
            .filter_map(|period| match self.check(period) {
                IdentityCheck::Violation(v) => Some(v),
                _ => None,
            })
            .collect()
    }
}

/// Identity violations of `record` under `config`.
pub fn validate(record: &GoldenRecord, config: &SynthesisConfig) -> Vec<IdentityViolation> {
    IdentityValidator::from_config(config).validate(record)
}

// ============================================================================
// TESTS
// ============================================================================
