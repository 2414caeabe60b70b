#![allow(dead_code)]

use chrono::NaiveDate;
use filing_synthesis::{
    FieldPath, LineValue, PeriodKey, Snapshot, SourceMetadata, StatementPayload,
};

pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

pub fn year(y: i32) -> PeriodKey {
    PeriodKey::from(y)
}

/// Small builder so scenarios read like the filings they describe.
pub struct Filing {
    source: SourceMetadata,
    primary: PeriodKey,
    payload: StatementPayload,
}

pub fn filing(id: &str, filed: &str, form: &str, primary: i32) -> Filing {
    Filing {
        source: SourceMetadata::new(id, date(filed), form),
        primary: PeriodKey::from(primary),
        payload: StatementPayload::new(),
    }
}

impl Filing {
    /// Item with comparative columns.
    pub fn item(mut self, path: FieldPath, columns: &[(i32, f64)]) -> Self {
        let mut line = LineValue::new("");
        for (y, v) in columns {
            line = line.with_period(*y, *v);
        }
        self.payload.set(&path, line);
        self
    }

    /// Item with columns and a stale scalar alongside.
    pub fn item_with_scalar(mut self, path: FieldPath, columns: &[(i32, f64)], scalar: f64) -> Self {
        let mut line = LineValue::new("").with_value(scalar);
        for (y, v) in columns {
            line = line.with_period(*y, *v);
        }
        self.payload.set(&path, line);
        self
    }

    pub fn build(self) -> Snapshot {
        Snapshot::new(self.source, self.primary, self.payload)
    }
}

/// All orderings of `items` (fine for the handful used in scenarios).
pub fn permutations<T: Clone>(items: &[T]) -> Vec<Vec<T>> {
    if items.len() <= 1 {
        return vec![items.to_vec()];
    }
    let mut out = Vec::new();
    for i in 0..items.len() {
        let mut rest = items.to_vec();
        let head = rest.remove(i);
        for mut tail in permutations(&rest) {
            tail.insert(0, head.clone());
            out.push(tail);
        }
    }
    out
}
