// ⚙️ Synthesis Config - explicit engine settings instead of globals
//
// Loaded from JSON (every field optional) or built in code:
//
//   {
//     "identity_tolerance": 0.01,
//     "significance_threshold": 0.5,
//     "anchor_fields": ["income_statement.gross_profit_section.revenues", ...],
//     "comparison_items": [{"name": "Revenue", "field": "income_statement.gross_profit_section.revenues"}],
//     "completeness_fields": [...],
//     "identity_fields": {"assets": "...", "liabilities": "...", "equity": "..."}
//   }

use crate::error::{Result, SynthesisError};
use crate::schema::{fields, StatementSchema};
use crate::statement::FieldPath;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::warn;

// ============================================================================
// PARTS
// ============================================================================

/// A line item watched for restatements, with the name logged for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonItem {
    pub name: String,
    pub field: FieldPath,
}

impl ComparisonItem {
    pub fn new(name: impl Into<String>, field: FieldPath) -> Self {
        ComparisonItem {
            name: name.into(),
            field,
        }
    }
}

/// The three totals of the accounting identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityFields {
    pub assets: FieldPath,
    pub liabilities: FieldPath,
    pub equity: FieldPath,
}

impl Default for IdentityFields {
    fn default() -> Self {
        IdentityFields {
            assets: fields::total_assets(),
            liabilities: fields::total_liabilities(),
            equity: fields::total_equity(),
        }
    }
}

// ============================================================================
// CONFIG
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SynthesisConfig {
    /// Relative tolerance for assets = liabilities + equity (default: 1%)
    pub identity_tolerance: f64,

    /// |delta| at or above this fraction tags a restatement Significant (default: 0.5)
    pub significance_threshold: f64,

    /// Items whose comparative columns drive period discovery
    pub anchor_fields: Vec<FieldPath>,

    /// Items compared when a period's source changes
    pub comparison_items: Vec<ComparisonItem>,

    /// Items counted by the completeness score
    pub completeness_fields: Vec<FieldPath>,

    pub identity_fields: IdentityFields,
}

impl SynthesisConfig {
    pub fn new() -> Self {
        SynthesisConfig {
            identity_tolerance: 0.01,
            significance_threshold: 0.5,
            anchor_fields: vec![
                fields::revenue(),
                fields::total_assets(),
                fields::cash_and_equivalents(),
                fields::net_income_start(),
                fields::net_cash_operating(),
            ],
            comparison_items: vec![
                ComparisonItem::new("Revenue", fields::revenue()),
                ComparisonItem::new("TotalAssets", fields::total_assets()),
                ComparisonItem::new("TotalLiabilities", fields::total_liabilities()),
                ComparisonItem::new("TotalEquity", fields::total_equity()),
            ],
            completeness_fields: vec![
                fields::total_assets(),
                fields::total_liabilities(),
                fields::total_equity(),
                fields::revenue(),
                fields::net_income_to_common(),
            ],
            identity_fields: IdentityFields::default(),
        }
    }

    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.identity_tolerance = tolerance;
        self
    }

    pub fn with_significance_threshold(mut self, threshold: f64) -> Self {
        self.significance_threshold = threshold;
        self
    }

    pub fn with_anchor_fields(mut self, anchors: Vec<FieldPath>) -> Self {
        self.anchor_fields = anchors;
        self
    }

    /// Load config from a JSON file. Missing keys take their defaults.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| SynthesisError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        serde_json::from_str(&content).map_err(|source| SynthesisError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Reject numeric settings outside their domain.
    ///
    /// Field paths the standard schema does not know are allowed (custom
    /// sections are projected too) but logged.
    pub fn validate(&self) -> Result<()> {
        if !self.identity_tolerance.is_finite() || self.identity_tolerance < 0.0 {
            return Err(SynthesisError::InvalidConfig(format!(
                "identity_tolerance must be a non-negative number, got {}",
                self.identity_tolerance
            )));
        }

        if !self.significance_threshold.is_finite() || self.significance_threshold <= 0.0 {
            return Err(SynthesisError::InvalidConfig(format!(
                "significance_threshold must be positive, got {}",
                self.significance_threshold
            )));
        }

        let schema = StatementSchema::standard();
        for path in self.referenced_fields() {
            if !schema.contains(path) {
                warn!(field = %path, "configured field is not in the standard schema");
            }
        }

        Ok(())
    }

    fn referenced_fields(&self) -> impl Iterator<Item = &FieldPath> {
        self.anchor_fields
            .iter()
            .chain(self.comparison_items.iter().map(|item| &item.field))
            .chain(self.completeness_fields.iter())
            .chain([
                &self.identity_fields.assets,
                &self.identity_fields.liabilities,
                &self.identity_fields.equity,
            ])
    }
}

impl Default for SynthesisConfig {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// TESTS
// ============================================================================
