// 🩺 Diagnostics - non-fatal findings attached to a golden record
//
// Nothing in here aborts a merge. Consumers check `is_clean()` instead of
// assuming the record is well-formed.

use crate::identity::IdentityViolation;
use crate::period::PeriodKey;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    Critical, // Record may be wrong
    Warning,  // Input was dropped or a number needs a human look
}

// ============================================================================
// FINDINGS
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Finding {
    /// Snapshot had no usable payload and contributed no periods
    MalformedSnapshot { document_id: String, reason: String },

    /// Restatement from exactly zero: percentage delta is undefined
    UndefinedDelta {
        period: PeriodKey,
        item: String,
        old_value: f64,
        new_value: f64,
        document_id: String,
    },
}

impl Finding {
    pub fn severity(&self) -> Severity {
        match self {
            Finding::MalformedSnapshot { .. } => Severity::Warning,
            Finding::UndefinedDelta { .. } => Severity::Warning,
        }
    }

    pub fn message(&self) -> String {
        match self {
            Finding::MalformedSnapshot { document_id, reason } => {
                format!("snapshot {} skipped: {}", document_id, reason)
            }
            Finding::UndefinedDelta {
                period,
                item,
                old_value,
                new_value,
                document_id,
            } => format!(
                "{} {} restated from {} to {} by {} (delta undefined)",
                period, item, old_value, new_value, document_id
            ),
        }
    }
}

// ============================================================================
// DIAGNOSTICS
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Diagnostics {
    /// Accumulated across merges
    #[serde(default)]
    pub warnings: Vec<Finding>,

    /// Recomputed after every merge
    #[serde(default)]
    pub identity_violations: Vec<IdentityViolation>,
}

impl Diagnostics {
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty() && self.identity_violations.is_empty()
    }

    /// Findings and identity violations at `severity`.
    pub fn count_by_severity(&self, severity: Severity) -> usize {
        let findings = self.warnings.iter().filter(|w| w.severity() == severity).count();
        let violations = self
            .identity_violations
            .iter()
            .filter(|v| v.severity() == severity)
            .count();
        findings + violations
    }

    pub fn summary(&self) -> String {
        format!(
            "{} warnings ({} malformed snapshots), {} identity violations",
            self.warnings.len(),
            self.warnings
                .iter()
                .filter(|w| matches!(w, Finding::MalformedSnapshot { .. }))
                .count(),
            self.identity_violations.len()
        )
    }
}
