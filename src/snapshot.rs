// 📸 Snapshots - one immutable extraction per source filing
//
// "Values are immutable. Identity has many values over time."
// A snapshot is never edited after the extraction layer hands it over; the
// golden record is the only thing that changes, and it is recomputable.

use crate::error::{Result, SynthesisError};
use crate::period::PeriodKey;
use crate::statement::Statements;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

// ============================================================================
// LINE VALUE
// ============================================================================

/// One line item as disclosed by a single filing.
///
/// `periods` holds the comparative columns. `value` is the bare scalar some
/// legacy single-period sources carry; once `periods` has any entry the
/// scalar is never authoritative for a period, see [`LineValue::value_for`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LineValue {
    #[serde(default)]
    pub label: String,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub periods: BTreeMap<PeriodKey, f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub xbrl_tag: Option<String>,

    /// Section/table/row identifiers from the extraction layer
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub provenance: BTreeMap<String, serde_json::Value>,
}

impl LineValue {
    pub fn new(label: impl Into<String>) -> Self {
        LineValue {
            label: label.into(),
            ..Default::default()
        }
    }

    /// Builder: add one comparative column
    pub fn with_period(mut self, period: impl Into<PeriodKey>, value: f64) -> Self {
        self.periods.insert(period.into(), value);
        self
    }

    /// Builder: set the legacy scalar
    pub fn with_value(mut self, value: f64) -> Self {
        self.value = Some(value);
        self
    }

    pub fn with_xbrl_tag(mut self, tag: impl Into<String>) -> Self {
        self.xbrl_tag = Some(tag.into());
        self
    }

    pub fn with_provenance(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.provenance.insert(key.into(), value.into());
        self
    }

    /// Value disclosed for `period`, if any.
    ///
    /// 1. the comparative column for `period`
    /// 2. the bare scalar, only when the item has no columns at all
    /// 3. nothing: a filing that shows other columns but not this one did
    ///    not disclose it, and borrowing another period's number is wrong
    pub fn value_for(&self, period: &PeriodKey) -> Option<f64> {
        match self.periods.get(period) {
            Some(v) => Some(*v),
            None if self.periods.is_empty() => self.value,
            None => None,
        }
    }

    /// True when the item carries any number at all.
    pub fn has_values(&self) -> bool {
        !self.periods.is_empty() || self.value.is_some()
    }

    /// Period keys this item discloses through its comparative columns.
    pub fn period_keys(&self) -> impl Iterator<Item = &PeriodKey> {
        self.periods.keys().filter(|k| !k.is_empty())
    }
}

/// Full statement payload of one filing.
pub type StatementPayload = Statements<LineValue>;

// ============================================================================
// SOURCE METADATA
// ============================================================================

/// Identity of the filing a value came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceMetadata {
    /// Accession number or other document id
    pub document_id: String,

    pub filing_date: NaiveDate,

    /// e.g. "10-K", "10-K/A"
    pub form_type: String,

    #[serde(default)]
    pub amended: bool,
}

impl SourceMetadata {
    /// Amendment status is inferred from the form type ("10-K/A" is amended).
    pub fn new(document_id: impl Into<String>, filing_date: NaiveDate, form_type: impl Into<String>) -> Self {
        let form_type = form_type.into();
        let amended = is_amendment_form(&form_type);
        SourceMetadata {
            document_id: document_id.into(),
            filing_date,
            form_type,
            amended,
        }
    }

    pub fn with_amended(mut self, amended: bool) -> Self {
        self.amended = amended;
        self
    }
}

fn is_amendment_form(form_type: &str) -> bool {
    form_type.trim().to_ascii_uppercase().ends_with("/A")
}

// ============================================================================
// SNAPSHOT
// ============================================================================

/// One immutable extraction from one source document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub source: SourceMetadata,

    /// Period the filing primarily reports (e.g. 2024 for FY2024 10-K)
    pub primary_period: PeriodKey,

    /// `None` when extraction produced nothing usable
    #[serde(default)]
    pub payload: Option<StatementPayload>,
}

impl Snapshot {
    pub fn new(source: SourceMetadata, primary_period: impl Into<PeriodKey>, payload: StatementPayload) -> Self {
        Snapshot {
            source,
            primary_period: primary_period.into(),
            payload: Some(payload),
        }
    }

    pub fn document_id(&self) -> &str {
        &self.source.document_id
    }

    /// Payload, unless it is missing or no line item carries a value.
    ///
    /// A hollow payload would otherwise win on recency and install an
    /// all-absent slice over a period that had real numbers.
    pub fn usable_payload(&self) -> Option<&StatementPayload> {
        self.payload
            .as_ref()
            .filter(|p| p.lines().any(LineValue::has_values))
    }
}

// ============================================================================
// LOADING
// ============================================================================

#[derive(Deserialize)]
#[serde(untagged)]
enum SnapshotFile {
    Many(Vec<Snapshot>),
    One(Box<Snapshot>),
}

/// Load snapshots from a JSON file holding one snapshot or an array.
pub fn load_snapshots<P: AsRef<Path>>(path: P) -> Result<Vec<Snapshot>> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|source| SynthesisError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let parsed: SnapshotFile = serde_json::from_str(&content).map_err(|source| SynthesisError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(match parsed {
        SnapshotFile::Many(snapshots) => snapshots,
        SnapshotFile::One(snapshot) => vec![*snapshot],
    })
}

// ============================================================================
// TESTS
// ============================================================================
