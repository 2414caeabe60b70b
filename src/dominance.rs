// 👑 Dominance Comparator - which filing is authoritative for a period?
//
// Strict priority:
//   1. Amendment dominance: an amendment beats a non-amendment, and is
//      never displaced by one, whatever the dates say.
//   2. Recency bias: with equal amendment status, a strictly later filing
//      date wins. Ties keep the existing source.
//
// Only well-defined as a left fold over snapshots in ascending filing-date
// order; the engine enforces that ordering.

use crate::snapshot::SourceMetadata;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    /// Incoming amendment replaces a non-amended source
    AmendmentSupersedes,

    /// Existing amendment stays against a non-amended source
    AmendmentRetained,

    /// Same amendment status, incoming filed later
    NewerFiling,

    /// Same amendment status, incoming not filed later
    NotNewer,
}

impl Verdict {
    pub fn supersedes(&self) -> bool {
        matches!(self, Verdict::AmendmentSupersedes | Verdict::NewerFiling)
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Verdict::AmendmentSupersedes => "amendment supersedes",
            Verdict::AmendmentRetained => "amendment retained",
            Verdict::NewerFiling => "newer filing",
            Verdict::NotNewer => "not newer",
        };
        f.write_str(text)
    }
}

pub fn compare(existing: &SourceMetadata, incoming: &SourceMetadata) -> Verdict {
    match (existing.amended, incoming.amended) {
        (false, true) => Verdict::AmendmentSupersedes,
        (true, false) => Verdict::AmendmentRetained,
        _ if incoming.filing_date > existing.filing_date => Verdict::NewerFiling,
        _ => Verdict::NotNewer,
    }
}

/// True if `incoming` should replace `existing` as the period's source.
pub fn dominant(existing: &SourceMetadata, incoming: &SourceMetadata) -> bool {
    compare(existing, incoming).supersedes()
}
