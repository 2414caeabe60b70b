// 🔭 Period Discovery - which periods does a filing disclose?
//
// Union of the comparative-column keys of a few anchor line items, plus the
// filing's declared primary period.
//
// Known gap: a period that appears only in non-anchor line items is not
// discovered. Anchors are configurable (SynthesisConfig::anchor_fields) so
// callers can widen the net deliberately.

use crate::period::PeriodKey;
use crate::snapshot::Snapshot;
use crate::statement::FieldPath;
use std::collections::BTreeSet;

/// Periods disclosed by `snapshot`, in ascending key order.
///
/// A snapshot without a usable payload discloses nothing, not even its
/// primary period.
pub fn discover_periods(snapshot: &Snapshot, anchors: &[FieldPath]) -> BTreeSet<PeriodKey> {
    let Some(payload) = snapshot.usable_payload() else {
        return BTreeSet::new();
    };

    let mut periods: BTreeSet<PeriodKey> = anchors
        .iter()
        .filter_map(|path| payload.get(path))
        .flat_map(|line| line.period_keys().cloned())
        .collect();

    if !snapshot.primary_period.is_empty() {
        periods.insert(snapshot.primary_period.clone());
    }

    periods
}
